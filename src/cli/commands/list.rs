//! List gyms command handler

use crate::config::Config;

pub async fn cmd_list_gyms(config: &Config) -> anyhow::Result<()> {
    let service = super::build_gym_service(config).await?;
    let gyms = service.list_all().await?;

    if gyms.is_empty() {
        println!("No gyms in the registry yet.");
        println!();
        println!("Start the server with `gymreg serve` and open /add to add one.");
        return Ok(());
    }

    println!("Gyms ({} total)", gyms.len());
    println!("{:-<70}", "");

    for gym in gyms {
        let review = gym.review.as_deref().unwrap_or("-");
        let price = if gym.monthly_sub_price.is_empty() {
            "?"
        } else {
            gym.monthly_sub_price.as_str()
        };

        println!("[{:>3}] {} ({})", gym.id, gym.name, gym.location);
        println!("      Price: {price} | Review: {review}");
    }

    Ok(())
}
