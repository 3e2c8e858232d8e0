//! # Mock Framework
//!
//! A [`DataProvider`] that answers from a queue of expectations, for testing real-mode
//! delegation without a backend.
//!
//! Queue expectations with [`MockProvider::expect_get`], [`MockProvider::expect_list`] or
//! [`MockProvider::expect_search`], hand [`MockProvider::provider`] to the facade, then call
//! [`MockProvider::verify`] to assert every expectation was consumed. A call that arrives
//! with no matching expectation panics, which is how tests prove a code path never
//! touched the provider.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::framework::{DataProvider, FrameworkError, Filters, Record, RecordId};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

enum Expectation<T: Record> {
    Get {
        id: RecordId,
        response: Result<Option<T>, FrameworkError>,
    },
    List {
        response: Result<Vec<T>, FrameworkError>,
    },
    Search {
        keyword: String,
        response: Result<Vec<T>, FrameworkError>,
    },
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

fn lock<T: Record>(queue: &Queue<T>) -> MutexGuard<'_, VecDeque<Expectation<T>>> {
    queue.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A provider with expectation tracking for fluent testing.
///
/// # Example
/// ```ignore
/// let mut mock = MockProvider::<User>::new();
/// mock.expect_get(RecordId(1)).return_ok(Some(user));
///
/// let facade = DataFacade::new(DataMode::Real, FixtureSource::empty(), mock.provider());
/// // Use facade in tests...
/// mock.verify(); // Ensures all expectations were met
/// ```
pub struct MockProvider<T: Record> {
    expectations: Queue<T>,
}

impl<T: Record> Clone for MockProvider<T> {
    fn clone(&self) -> Self {
        Self {
            expectations: self.expectations.clone(),
        }
    }
}

impl<T: Record> Default for MockProvider<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> MockProvider<T> {
    /// Creates a new mock provider with no expectations.
    pub fn new() -> Self {
        Self {
            expectations: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    /// Returns a handle to inject into a facade. Shares the expectation queue.
    pub fn provider(&self) -> Arc<dyn DataProvider<T>> {
        Arc::new(self.clone())
    }

    /// Expects a `get` call for `id`.
    pub fn expect_get(&mut self, id: RecordId) -> GetExpectationBuilder<T> {
        GetExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `list` call.
    pub fn expect_list(&mut self) -> ListExpectationBuilder<T> {
        ListExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `search` call for `keyword`.
    pub fn expect_search(&mut self, keyword: impl Into<String>) -> SearchExpectationBuilder<T> {
        SearchExpectationBuilder {
            keyword: keyword.into(),
            expectations: self.expectations.clone(),
        }
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let remaining = lock(&self.expectations).len();
        if remaining != 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }

    fn next(&self, call: &str) -> Expectation<T> {
        match lock(&self.expectations).pop_front() {
            Some(expectation) => expectation,
            None => panic!("Unexpected {} call on {} provider", call, T::ENTITY),
        }
    }
}

#[async_trait]
impl<T: Record> DataProvider<T> for MockProvider<T> {
    async fn get(&self, id: RecordId) -> Result<Option<T>, FrameworkError> {
        match self.next("get") {
            Expectation::Get { id: expected, response } => {
                assert_eq!(id, expected, "get called with unexpected id");
                response
            }
            _ => panic!("Unexpected request or expectation mismatch: get"),
        }
    }

    async fn list(&self, _filters: &Filters) -> Result<Vec<T>, FrameworkError> {
        match self.next("list") {
            Expectation::List { response } => response,
            _ => panic!("Unexpected request or expectation mismatch: list"),
        }
    }

    async fn search(&self, keyword: &str) -> Result<Vec<T>, FrameworkError> {
        match self.next("search") {
            Expectation::Search { keyword: expected, response } => {
                assert_eq!(keyword, expected, "search called with unexpected keyword");
                response
            }
            _ => panic!("Unexpected request or expectation mismatch: search"),
        }
    }
}

/// Builder for `get` expectations.
pub struct GetExpectationBuilder<T: Record> {
    id: RecordId,
    expectations: Queue<T>,
}

impl<T: Record> GetExpectationBuilder<T> {
    pub fn return_ok(self, value: Option<T>) {
        lock(&self.expectations).push_back(Expectation::Get {
            id: self.id,
            response: Ok(value),
        });
    }

    pub fn return_err(self, error: FrameworkError) {
        lock(&self.expectations).push_back(Expectation::Get {
            id: self.id,
            response: Err(error),
        });
    }
}

/// Builder for `list` expectations.
pub struct ListExpectationBuilder<T: Record> {
    expectations: Queue<T>,
}

impl<T: Record> ListExpectationBuilder<T> {
    pub fn return_ok(self, records: Vec<T>) {
        lock(&self.expectations).push_back(Expectation::List {
            response: Ok(records),
        });
    }

    pub fn return_err(self, error: FrameworkError) {
        lock(&self.expectations).push_back(Expectation::List {
            response: Err(error),
        });
    }
}

/// Builder for `search` expectations.
pub struct SearchExpectationBuilder<T: Record> {
    keyword: String,
    expectations: Queue<T>,
}

impl<T: Record> SearchExpectationBuilder<T> {
    pub fn return_ok(self, records: Vec<T>) {
        lock(&self.expectations).push_back(Expectation::Search {
            keyword: self.keyword,
            response: Ok(records),
        });
    }

    pub fn return_err(self, error: FrameworkError) {
        lock(&self.expectations).push_back(Expectation::Search {
            keyword: self.keyword,
            response: Err(error),
        });
    }
}
