//! `dispatch-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by every delivery
//! aggregate: the error model, typed identifiers, the entity/aggregate traits and
//! the shared-kernel grid [`Location`].

pub mod aggregate;
pub mod entity;
pub mod error;
pub mod id;
pub mod location;
pub mod value_object;

pub use aggregate::{AggregateRoot, ExpectedVersion};
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{CourierId, IdGenerator, OrderId, SequentialIdGenerator, TransportId, UuidV7Generator};
pub use location::Location;
pub use value_object::ValueObject;
