//! Delivery domain module.
//!
//! Business rules for couriers, their transports and the orders they carry,
//! implemented purely as deterministic domain logic (no IO, no storage). The two
//! aggregates refer to each other by id only; resolving ids is the caller's job.

pub mod courier;
pub mod order;
pub mod transport;

pub use courier::{Courier, CourierStatus};
pub use order::{Order, OrderStatus};
pub use transport::{Transport, validate_name};
