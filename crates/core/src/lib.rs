//! Storefront domain primitives.
//!
//! Zero internal dependencies: shared by the repository layer, the service
//! layer and the HTTP adapters.

pub mod error;
pub mod pagination;
pub mod types;
pub mod validation;
