use std::sync::Arc;

use todo_core::{DummyJsonClient, FormAction, Loader, Transport};

use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub loader: Loader,
    pub action: FormAction,
    /// Show developer diagnostics on error pages.
    pub dev: bool,
}

impl AppState {
    pub fn new(config: &Config, transport: Arc<dyn Transport>) -> Self {
        let client = DummyJsonClient::new(&config.api_base_url).with_delay(config.api_delay_ms);
        Self {
            loader: Loader::new(client.clone(), transport.clone()),
            action: FormAction::new(client, transport),
            dev: config.dev,
        }
    }
}
