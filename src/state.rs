use std::sync::Arc;

use crate::clients::anilist::{AnilistClient, GraphQlTransport};
use crate::config::Config;
use crate::db::Store;
use crate::services::{CatalogService, DiscoverService, SeaOrmCatalogService};

/// Everything built once at process start and shared by all requests.
#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub discover: DiscoverService,

    pub catalog: Arc<dyn CatalogService>,
}

impl SharedState {
    /// Connects the store and talks to the configured AniList endpoint.
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let upstream = Arc::new(AnilistClient::new(&config.upstream)?);
        Self::with_upstream(config, upstream).await
    }

    /// Same as [`SharedState::new`] with a caller-supplied upstream transport.
    pub async fn with_upstream(
        config: Config,
        upstream: Arc<dyn GraphQlTransport>,
    ) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let catalog: Arc<dyn CatalogService> = Arc::new(SeaOrmCatalogService::new(store.clone()));

        Ok(Self {
            config: Arc::new(config),
            store,
            discover: DiscoverService::new(upstream),
            catalog,
        })
    }
}
