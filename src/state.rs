use crate::catalog::Catalog;
use crate::config::{AppConfig, ClientConfig, ServerConfig};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub catalog: Arc<Catalog>,
}

impl AppState {
    pub fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let catalog = Arc::new(Catalog::from_env_path(config.catalog_path.as_deref())?);
        Ok(Self { config, catalog })
    }

    pub fn from_parts(config: Arc<AppConfig>, catalog: Arc<Catalog>) -> Self {
        Self { config, catalog }
    }

    pub fn fake() -> Self {
        let config = Arc::new(AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".into(),
                port: 0,
                static_dir: "client".into(),
            },
            client: ClientConfig {
                api_base_url: "http://127.0.0.1:3000".into(),
                timeout_secs: 1,
            },
            catalog_path: None,
            food_log_dir: ".nutrition-test".into(),
        });
        Self {
            config,
            catalog: Arc::new(Catalog::builtin()),
        }
    }
}
