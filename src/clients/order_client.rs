use std::sync::Arc;

use crate::clients::data_client::DataClient;
use crate::framework::DataFacade;
use crate::model::Order;

/// Client for reading order records.
///
/// Orders reference users and products by id only; nothing here resolves them.
#[derive(Clone)]
pub struct OrderClient {
    inner: Arc<DataFacade<Order>>,
}

impl OrderClient {
    pub fn new(inner: DataFacade<Order>) -> Self {
        Self {
            inner: Arc::new(inner),
        }
    }
}

impl DataClient<Order> for OrderClient {
    fn facade(&self) -> &DataFacade<Order> {
        &self.inner
    }
}
