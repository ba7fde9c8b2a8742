//! Domain services.
//!
//! Services accept loosely-typed commands from the transport layer, apply
//! business validation, and delegate to the store traits. They never see a
//! concrete repository, so tests run them against in-memory stores.

pub mod account;
pub mod error;
pub mod item;
pub mod order;

pub use account::{AccountService, CreateAccountCommand};
pub use error::ServiceError;
pub use item::ItemService;
pub use order::{CreateOrderCommand, OrderLineCommand, OrderService};
