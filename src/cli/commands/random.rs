use crate::config::Config;
use crate::services::GymError;

pub async fn cmd_random_gym(config: &Config) -> anyhow::Result<()> {
    let service = super::build_gym_service(config).await?;

    match service.pick_random().await {
        Ok(gym) => {
            println!("{}", serde_json::to_string_pretty(&gym)?);
            Ok(())
        }
        Err(GymError::EmptyCollection) => {
            println!("{}", GymError::EmptyCollection);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
