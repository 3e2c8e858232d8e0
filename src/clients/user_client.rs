use std::sync::Arc;

use crate::clients::data_client::DataClient;
use crate::framework::DataFacade;
use crate::model::User;

/// Client for reading user records.
#[derive(Clone)]
pub struct UserClient {
    inner: Arc<DataFacade<User>>,
}

impl UserClient {
    pub fn new(inner: DataFacade<User>) -> Self {
        Self {
            inner: Arc::new(inner),
        }
    }
}

impl DataClient<User> for UserClient {
    fn facade(&self) -> &DataFacade<User> {
        &self.inner
    }
}
