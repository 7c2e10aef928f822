//! Application state shared across handlers

use std::sync::Arc;

use crate::adapter::FormatAdapter;

/// Handler state; cloning only bumps a reference count
#[derive(Clone)]
pub struct AppState {
    pub adapter: Arc<FormatAdapter>,
}

impl AppState {
    #[must_use]
    pub fn new(adapter: FormatAdapter) -> Self {
        Self {
            adapter: Arc::new(adapter),
        }
    }
}
