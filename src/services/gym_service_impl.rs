//! Default implementation of the `GymService` trait over a [`GymRepository`].

use crate::db::GymRepository;
use crate::domain::{GymId, title_case};
use crate::models::gym::{Gym, NewGym};
use crate::services::gym_service::{GymError, GymInput, GymService};
use crate::services::upload::{ImageUpload, UploadService};
use crate::services::validation::{optional, require};
use async_trait::async_trait;
use rand::seq::IndexedRandom;
use std::sync::Arc;
use tracing::{info, warn};

pub struct DefaultGymService {
    repo: Arc<dyn GymRepository>,
    uploads: Arc<UploadService>,
    delete_key: String,
}

impl DefaultGymService {
    #[must_use]
    pub fn new(
        repo: Arc<dyn GymRepository>,
        uploads: Arc<UploadService>,
        delete_key: impl Into<String>,
    ) -> Self {
        Self {
            repo,
            uploads,
            delete_key: delete_key.into(),
        }
    }

    /// An unset key never authorizes anything.
    fn is_authorized(&self, supplied_key: Option<&str>) -> bool {
        !self.delete_key.is_empty() && supplied_key == Some(self.delete_key.as_str())
    }
}

#[async_trait]
impl GymService for DefaultGymService {
    async fn create(&self, input: GymInput, image: Option<ImageUpload>) -> Result<Gym, GymError> {
        let name = require("name", input.name.as_deref())?;
        let location = require("location", input.location.as_deref())?;

        let image_file = self
            .uploads
            .save_image(image)
            .await
            .map_err(|e| GymError::Upload(e.to_string()))?;

        let new_gym = NewGym {
            name,
            location,
            monthly_sub_price: input.monthly_sub_price.unwrap_or_default(),
            opening_time: optional(input.opening_time.as_deref()),
            closing_time: optional(input.closing_time.as_deref()),
            review: optional(input.review.as_deref()),
            website_url: optional(input.website_url.as_deref()),
            image_file,
        };

        let gym = self.repo.insert(new_gym).await?;
        metrics::counter!("gymreg_gyms_created_total").increment(1);
        Ok(gym)
    }

    async fn list_all(&self) -> Result<Vec<Gym>, GymError> {
        Ok(self.repo.list_all().await?)
    }

    async fn pick_random(&self) -> Result<Gym, GymError> {
        let gyms = self.repo.list_all().await?;

        let picked = {
            let mut rng = rand::rng();
            gyms.choose(&mut rng).cloned()
        };

        picked.ok_or(GymError::EmptyCollection)
    }

    async fn find_by_location(&self, raw_location: &str) -> Result<Gym, GymError> {
        let location = title_case(raw_location);
        if location.is_empty() {
            return Err(GymError::Validation(
                "Search location cannot be empty".to_string(),
            ));
        }

        self.repo
            .find_first_by_location(&location)
            .await?
            .ok_or_else(GymError::location_not_found)
    }

    async fn update_price(&self, id: GymId, new_price: Option<&str>) -> Result<Gym, GymError> {
        let price = require("new_price", new_price)?;

        self.repo
            .update_price(id.value(), &price)
            .await?
            .ok_or_else(GymError::id_not_found)
    }

    async fn delete(&self, id: GymId, supplied_key: Option<&str>) -> Result<(), GymError> {
        if !self.is_authorized(supplied_key) {
            warn!(gym_id = %id, "Rejected delete with invalid api key");
            metrics::counter!("gymreg_delete_rejections_total").increment(1);
            return Err(GymError::Forbidden);
        }

        if self.repo.delete(id.value()).await? {
            info!(gym_id = %id, "Gym removed from registry");
            metrics::counter!("gymreg_gyms_deleted_total").increment(1);
            Ok(())
        } else {
            Err(GymError::id_not_found())
        }
    }
}
