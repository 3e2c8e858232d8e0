//! # Data Providers
//!
//! The seam between a facade and a real backend. Real backends are not part of this
//! crate; [`NoopProvider`] is injected by default and answers every query with nothing.

use async_trait::async_trait;

use crate::framework::{FrameworkError, Filters, Record, RecordId};

/// Source of real (non-fixture) records.
///
/// Providers are injected into a [`DataFacade`](crate::framework::DataFacade) at
/// construction. Errors are reported here but never cross the facade, which logs them
/// and answers with an empty result.
#[async_trait]
pub trait DataProvider<T: Record>: Send + Sync {
    async fn get(&self, id: RecordId) -> Result<Option<T>, FrameworkError>;

    async fn list(&self, filters: &Filters) -> Result<Vec<T>, FrameworkError>;

    async fn search(&self, keyword: &str) -> Result<Vec<T>, FrameworkError>;
}

/// Provider used when no backend is wired in.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProvider;

#[async_trait]
impl<T: Record> DataProvider<T> for NoopProvider {
    async fn get(&self, _id: RecordId) -> Result<Option<T>, FrameworkError> {
        Ok(None)
    }

    async fn list(&self, _filters: &Filters) -> Result<Vec<T>, FrameworkError> {
        Ok(Vec::new())
    }

    async fn search(&self, _keyword: &str) -> Result<Vec<T>, FrameworkError> {
        Ok(Vec::new())
    }
}
