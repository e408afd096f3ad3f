use std::sync::Arc;

use stockroom_infra::InventoryStore;

/// Handles shared by all request handlers.
#[derive(Clone)]
pub struct AppServices {
    pub store: Arc<dyn InventoryStore>,
}

impl AppServices {
    pub fn new(store: Arc<dyn InventoryStore>) -> Self {
        Self { store }
    }
}
