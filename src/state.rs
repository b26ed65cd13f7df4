use std::sync::Arc;

use tracing::{info, warn};

use crate::ai::client::{GeminiClient, TextGenerator};
use crate::config::AppConfig;
use crate::db;
use crate::storage::{Storage, StorageClient};
use crate::store::Store;

/// Everything a handler may touch. Built once in `main`, read-only afterwards.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Store,
    pub ai: Arc<dyn TextGenerator>,
    pub storage: Option<Arc<dyn StorageClient>>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let store = match &config.database_url {
            Some(url) => {
                let pool = db::connect(url).await?;
                info!("connected to postgres");
                Store::postgres(pool)
            }
            None => {
                warn!("DATABASE_URL not set; using the in-memory store, data is lost on restart");
                Store::in_memory()
            }
        };

        let ai = Arc::new(GeminiClient::new(config.ai.clone())?) as Arc<dyn TextGenerator>;
        if !ai.is_configured() {
            warn!("GEMINI_API_KEY not set; AI routes will answer 503");
        }

        let storage = match &config.storage {
            Some(cfg) => Some(Arc::new(Storage::new(cfg).await?) as Arc<dyn StorageClient>),
            None => {
                warn!("MINIO_* not set; material uploads are disabled");
                None
            }
        };

        Ok(Self::from_parts(config, store, ai, storage))
    }

    pub fn from_parts(
        config: Arc<AppConfig>,
        store: Store,
        ai: Arc<dyn TextGenerator>,
        storage: Option<Arc<dyn StorageClient>>,
    ) -> Self {
        Self {
            config,
            store,
            ai,
            storage,
        }
    }

    /// Memory store, unconfigured AI, no object storage.
    #[cfg(test)]
    pub fn fake() -> Self {
        use crate::config::{AiConfig, JwtConfig};
        use crate::testing::FakeGenerator;

        let config = Arc::new(AppConfig {
            host: "127.0.0.1".into(),
            port: 0,
            database_url: None,
            jwt: JwtConfig {
                secret: "test-secret".into(),
                issuer: "test-issuer".into(),
                audience: "test-aud".into(),
                ttl_minutes: 5,
            },
            ai: AiConfig::default(),
            storage: None,
        });

        Self::from_parts(
            config,
            Store::in_memory(),
            Arc::new(FakeGenerator::unconfigured()),
            None,
        )
    }

    #[cfg(test)]
    pub fn with_ai(mut self, ai: Arc<dyn TextGenerator>) -> Self {
        self.ai = ai;
        self
    }

    #[cfg(test)]
    pub fn with_storage(mut self, storage: Arc<dyn StorageClient>) -> Self {
        self.storage = Some(storage);
        self
    }
}
