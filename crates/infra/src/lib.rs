//! Infrastructure layer: aggregate storage and persisted representations.

pub mod records;
pub mod repository;

pub use records::{CourierRecord, OrderRecord, RecordError, TransportRecord};
pub use repository::{InMemoryRepository, Repository, RepositoryError};
