use std::sync::Arc;

use polyglot_core::{AppConfig, Services};

pub struct AppState {
    pub services: Arc<Services>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(services: Arc<Services>, config: Arc<AppConfig>) -> Self {
        Self { services, config }
    }

    /// State backed by the inference service named in `config`
    pub fn from_config(config: Arc<AppConfig>) -> polyglot_core::Result<Self> {
        let services = Arc::new(Services::from_config(&config)?);
        Ok(Self::new(services, config))
    }
}
