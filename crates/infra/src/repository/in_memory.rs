use std::collections::HashMap;
use std::sync::RwLock;

use dispatch_core::{AggregateRoot, Entity, ExpectedVersion};

use super::{Repository, RepositoryError};

/// In-memory aggregate store.
///
/// Intended for tests/dev and the simulator. Not optimized for performance.
#[derive(Debug)]
pub struct InMemoryRepository<A: AggregateRoot> {
    inner: RwLock<HashMap<<A as Entity>::Id, A>>,
}

impl<A: AggregateRoot> InMemoryRepository<A> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }
}

impl<A: AggregateRoot> Default for InMemoryRepository<A> {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned() -> RepositoryError {
    RepositoryError::Unavailable("lock poisoned".to_string())
}

impl<A> Repository<A> for InMemoryRepository<A>
where
    A: AggregateRoot + Clone + Send + Sync + 'static,
    <A as Entity>::Id: Send + Sync,
{
    fn get(&self, id: &<A as Entity>::Id) -> Result<Option<A>, RepositoryError> {
        let map = self.inner.read().map_err(|_| poisoned())?;
        Ok(map.get(id).cloned())
    }

    fn save(&self, aggregate: A, expected: ExpectedVersion) -> Result<(), RepositoryError> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;

        let stored_version = map.get(aggregate.id()).map(|a| a.version()).unwrap_or(0);
        expected
            .check(stored_version)
            .map_err(|e| RepositoryError::Concurrency(e.to_string()))?;

        tracing::debug!(
            id = ?aggregate.id(),
            version = aggregate.version(),
            "aggregate saved"
        );
        map.insert(aggregate.id().clone(), aggregate);
        Ok(())
    }

    fn list(&self) -> Result<Vec<A>, RepositoryError> {
        let map = self.inner.read().map_err(|_| poisoned())?;
        Ok(map.values().cloned().collect())
    }

    fn remove(&self, id: &<A as Entity>::Id) -> Result<Option<A>, RepositoryError> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        Ok(map.remove(id))
    }
}
