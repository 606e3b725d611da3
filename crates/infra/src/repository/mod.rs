//! Repository boundary: load and store aggregates by id.

mod in_memory;

use std::sync::Arc;

use dispatch_core::{AggregateRoot, Entity, ExpectedVersion};
use thiserror::Error;

pub use in_memory::InMemoryRepository;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("optimistic concurrency check failed: {0}")]
    Concurrency(String),

    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Id-indexed aggregate storage.
///
/// Aggregates never hold references to one another; services resolve ids
/// through a repository instead.
pub trait Repository<A>: Send + Sync
where
    A: AggregateRoot,
{
    fn get(&self, id: &<A as Entity>::Id) -> Result<Option<A>, RepositoryError>;

    /// Store `aggregate`, provided the stored version matches `expected`.
    ///
    /// An absent aggregate counts as version 0.
    fn save(&self, aggregate: A, expected: ExpectedVersion) -> Result<(), RepositoryError>;

    fn list(&self) -> Result<Vec<A>, RepositoryError>;

    fn remove(&self, id: &<A as Entity>::Id) -> Result<Option<A>, RepositoryError>;
}

impl<A, R> Repository<A> for Arc<R>
where
    A: AggregateRoot,
    R: Repository<A> + ?Sized,
{
    fn get(&self, id: &<A as Entity>::Id) -> Result<Option<A>, RepositoryError> {
        (**self).get(id)
    }

    fn save(&self, aggregate: A, expected: ExpectedVersion) -> Result<(), RepositoryError> {
        (**self).save(aggregate, expected)
    }

    fn list(&self) -> Result<Vec<A>, RepositoryError> {
        (**self).list()
    }

    fn remove(&self, id: &<A as Entity>::Id) -> Result<Option<A>, RepositoryError> {
        (**self).remove(id)
    }
}
