mod init;
mod list;
mod random;

pub use init::cmd_init;
pub use list::cmd_list_gyms;
pub use random::cmd_random_gym;

use std::sync::Arc;

use crate::config::Config;
use crate::db::Store;
use crate::services::{DefaultGymService, GymService, UploadService};

async fn build_gym_service(config: &Config) -> anyhow::Result<Arc<dyn GymService>> {
    let store = Store::new(&config.general.database_path).await?;
    let uploads = Arc::new(UploadService::new(&config.uploads.upload_dir));

    Ok(Arc::new(DefaultGymService::new(
        Arc::new(store.gyms()),
        uploads,
        config.security.api_key.clone(),
    )))
}
