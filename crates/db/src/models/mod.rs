//! Domain model structs and input DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` input struct consumed by the repository `create` call
//!
//! Identifiers and audit timestamps are assigned when the entity is built,
//! before it reaches the database.

pub mod account;
pub mod item;
pub mod order;
