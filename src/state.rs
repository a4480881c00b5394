use crate::completion::{CompletionClient, OpenAiCompletionClient};
use crate::config::AppConfig;
use crate::profiles::repo::{PgProfileStore, ProfileStore};
use anyhow::Context;
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<AppConfig>,
    pub profiles: Arc<dyn ProfileStore>,
    pub completion: Arc<dyn CompletionClient>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let db = sqlx::postgres::PgPoolOptions::new()
            .max_connections(10)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;

        let profiles = Arc::new(PgProfileStore::new(db.clone())) as Arc<dyn ProfileStore>;
        let completion =
            Arc::new(OpenAiCompletionClient::new(&config.completion)?) as Arc<dyn CompletionClient>;

        Ok(Self {
            db,
            config,
            profiles,
            completion,
        })
    }
}
