//! # Data Access Facade
//!
//! This module defines the generic facade every domain client wraps.
//!
//! ## Mode Resolution
//!
//! The mock/real decision is taken once, when the facade is built, from the `IS_MOCK`
//! flag. Changing the flag means building a new facade.
//!
//! - **Mock**: queries run against the in-memory [`FixtureSource`].
//! - **Real**: queries are delegated to the injected [`DataProvider`].
//!
//! With `fallback_to_real`, a mock-mode facade whose fixture file was missing delegates
//! to the provider as well.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::framework::{DataProvider, Filters, FixtureSource, NoopProvider, Record, RecordId};

/// Which source answers queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataMode {
    Mock,
    Real,
}

impl DataMode {
    pub fn from_flag(is_mock: bool) -> Self {
        if is_mock {
            DataMode::Mock
        } else {
            DataMode::Real
        }
    }

    pub fn is_mock(self) -> bool {
        self == DataMode::Mock
    }
}

/// Uniform read/search contract over fixtures or a real provider.
///
/// Read-only after construction; share it behind an `Arc`.
pub struct DataFacade<T: Record> {
    mode: DataMode,
    fixtures: FixtureSource<T>,
    provider: Arc<dyn DataProvider<T>>,
    fallback_to_real: bool,
}

impl<T: Record> DataFacade<T> {
    pub fn new(
        mode: DataMode,
        fixtures: FixtureSource<T>,
        provider: Arc<dyn DataProvider<T>>,
    ) -> Self {
        Self {
            mode,
            fixtures,
            provider,
            fallback_to_real: false,
        }
    }

    /// Mock-mode facade with the no-op provider.
    pub fn mock(fixtures: FixtureSource<T>) -> Self {
        Self::new(DataMode::Mock, fixtures, Arc::new(NoopProvider))
    }

    pub fn with_fallback_to_real(mut self, enabled: bool) -> Self {
        self.fallback_to_real = enabled;
        self
    }

    pub fn mode(&self) -> DataMode {
        self.mode
    }

    fn uses_provider(&self) -> bool {
        match self.mode {
            DataMode::Real => true,
            DataMode::Mock => self.fallback_to_real && !self.fixtures.is_available(),
        }
    }

    pub async fn get(&self, id: RecordId) -> Option<T> {
        let entity = T::ENTITY;
        if self.uses_provider() {
            return match self.provider.get(id).await {
                Ok(found) => found,
                Err(e) => {
                    warn!(entity, %id, error = %e, "Provider get failed");
                    None
                }
            };
        }

        let found = self
            .fixtures
            .records()
            .iter()
            .find(|record| record.id() == id)
            .cloned();
        debug!(entity, %id, found = found.is_some(), "Get");
        found
    }

    pub async fn list(&self, filters: &Filters) -> Vec<T> {
        let entity = T::ENTITY;
        if self.uses_provider() {
            return self.provider.list(filters).await.unwrap_or_else(|e| {
                warn!(entity, error = %e, "Provider list failed");
                Vec::new()
            });
        }

        let records: Vec<T> = self
            .fixtures
            .records()
            .iter()
            .filter(|record| filters.is_empty() || filters.matches(&record.attributes()))
            .cloned()
            .collect();
        debug!(entity, filters = filters.len(), matched = records.len(), "List");
        records
    }

    /// Empty keyword returns the whole collection, not an empty result.
    pub async fn search(&self, keyword: &str) -> Vec<T> {
        let entity = T::ENTITY;
        if self.uses_provider() {
            return self.provider.search(keyword).await.unwrap_or_else(|e| {
                warn!(entity, keyword, error = %e, "Provider search failed");
                Vec::new()
            });
        }

        if keyword.is_empty() {
            return self.fixtures.records().to_vec();
        }

        let needle = keyword.to_lowercase();
        let records: Vec<T> = self
            .fixtures
            .records()
            .iter()
            .filter(|record| record.matches_keyword(&needle))
            .cloned()
            .collect();
        debug!(entity, keyword, matched = records.len(), "Search");
        records
    }

    pub async fn exists(&self, id: RecordId) -> bool {
        self.get(id).await.is_some()
    }
}
