use std::sync::Arc;

use crate::client::ApiClient;

/// Shared by every page handler. Pages themselves are per request.
#[derive(Debug, Clone)]
pub struct AppState {
    pub client: Arc<ApiClient>,
}

impl AppState {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}
