use crate::framework::{DataFacade, Filters, Record, RecordId};
use async_trait::async_trait;

/// Trait for domain clients to inherit the standard read/search operations.
///
/// Implementors only expose their facade; `get`, `list`, `search` and `exists` come
/// for free, each wrapped in a tracing span.
#[async_trait]
pub trait DataClient<T: Record>: Send + Sync {
    /// Access the inner generic facade.
    fn facade(&self) -> &DataFacade<T>;

    /// Fetch a record by id.
    #[tracing::instrument(skip(self), fields(entity = T::ENTITY))]
    async fn get(&self, id: RecordId) -> Option<T> {
        self.facade().get(id).await
    }

    #[tracing::instrument(skip(self, filters), fields(entity = T::ENTITY))]
    async fn list(&self, filters: &Filters) -> Vec<T> {
        self.facade().list(filters).await
    }

    #[tracing::instrument(skip(self), fields(entity = T::ENTITY))]
    async fn search(&self, keyword: &str) -> Vec<T> {
        self.facade().search(keyword).await
    }

    async fn exists(&self, id: RecordId) -> bool {
        self.facade().exists(id).await
    }
}
