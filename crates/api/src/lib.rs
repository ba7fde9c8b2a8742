//! Storefront API server library.
//!
//! Exposes config, state, services, error handling and routes so the binary
//! entrypoint and integration tests share one router.

pub mod config;
pub mod error;
pub mod handlers;
pub mod query;
pub mod router;
pub mod routes;
pub mod services;
pub mod state;
