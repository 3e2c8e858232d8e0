use std::sync::Arc;

use tracing::debug;

use crate::clients::data_client::DataClient;
use crate::framework::{DataFacade, RecordId};
use crate::model::Product;

/// Client for product records, with the stock check on top of the standard reads.
#[derive(Clone)]
pub struct ProductClient {
    inner: Arc<DataFacade<Product>>,
}

impl ProductClient {
    pub fn new(inner: DataFacade<Product>) -> Self {
        Self {
            inner: Arc::new(inner),
        }
    }

    /// True iff the product exists and holds at least `quantity` units.
    #[tracing::instrument(skip(self))]
    pub async fn check_stock(&self, id: RecordId, quantity: i64) -> bool {
        let available = match self.get(id).await {
            Some(product) => product.has_stock(quantity),
            None => false,
        };
        debug!(%id, quantity, available, "Stock check");
        available
    }
}

impl DataClient<Product> for ProductClient {
    fn facade(&self) -> &DataFacade<Product> {
        &self.inner
    }
}
