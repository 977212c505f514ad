use std::sync::Arc;

use crate::config::Config;
use crate::db::Store;
use crate::services::{DefaultGymService, GymService, UploadService};

/// Everything a request handler may touch, built once at startup.
#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub uploads: Arc<UploadService>,

    pub gym_service: Arc<dyn GymService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let uploads = Arc::new(UploadService::new(&config.uploads.upload_dir));

        let gym_service = Arc::new(DefaultGymService::new(
            Arc::new(store.gyms()),
            uploads.clone(),
            config.security.api_key.clone(),
        )) as Arc<dyn GymService>;

        Ok(Self {
            config: Arc::new(config),
            store,
            uploads,
            gym_service,
        })
    }
}
