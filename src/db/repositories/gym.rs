use crate::entities::{gyms, prelude::*};
use crate::models::gym::{Gym, NewGym};
use anyhow::Result;
use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::{debug, info};

/// Persistence operations for gym records.
#[async_trait]
pub trait GymRepository: Send + Sync {
    /// Inserts a record and returns it with the storage-assigned id.
    async fn insert(&self, gym: NewGym) -> Result<Gym>;

    /// All records in insertion (id) order.
    async fn list_all(&self) -> Result<Vec<Gym>>;

    /// First record, by id, whose location equals `location` ignoring ASCII case.
    /// Non-ASCII letters must match exactly.
    async fn find_first_by_location(&self, location: &str) -> Result<Option<Gym>>;

    /// Sets the monthly price in one transaction. `None` when the id is unknown.
    async fn update_price(&self, id: i32, price: &str) -> Result<Option<Gym>>;

    /// Returns whether a row was removed.
    async fn delete(&self, id: i32) -> Result<bool>;
}

pub struct SeaOrmGymRepository {
    conn: DatabaseConnection,
}

impl SeaOrmGymRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(model: gyms::Model) -> Gym {
        Gym {
            id: model.id,
            name: model.name,
            location: model.location,
            monthly_sub_price: model.monthly_sub_price,
            opening_time: model.opening_time,
            closing_time: model.closing_time,
            review: model.review,
            website_url: model.website_url,
            image_file: model.image_file,
        }
    }
}

#[async_trait]
impl GymRepository for SeaOrmGymRepository {
    async fn insert(&self, gym: NewGym) -> Result<Gym> {
        let active_model = gyms::ActiveModel {
            name: Set(gym.name),
            location: Set(gym.location),
            monthly_sub_price: Set(gym.monthly_sub_price),
            opening_time: Set(gym.opening_time),
            closing_time: Set(gym.closing_time),
            review: Set(gym.review),
            website_url: Set(gym.website_url),
            image_file: Set(gym.image_file),
            ..Default::default()
        };

        let model = active_model.insert(&self.conn).await?;
        info!(gym_id = model.id, name = %model.name, "Added gym");
        Ok(Self::map_model(model))
    }

    async fn list_all(&self) -> Result<Vec<Gym>> {
        let rows = Gyms::find()
            .order_by_asc(gyms::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Self::map_model).collect())
    }

    async fn find_first_by_location(&self, location: &str) -> Result<Option<Gym>> {
        debug!(location = %location, "Searching gyms by location");

        let model = Gyms::find()
            .filter(
                // SQLite's lower() only folds ASCII, so the query side must match it.
                Expr::expr(Func::lower(Expr::col(gyms::Column::Location)))
                    .eq(location.to_ascii_lowercase()),
            )
            .order_by_asc(gyms::Column::Id)
            .one(&self.conn)
            .await?;

        Ok(model.map(Self::map_model))
    }

    async fn update_price(&self, id: i32, price: &str) -> Result<Option<Gym>> {
        let txn = self.conn.begin().await?;

        let Some(model) = Gyms::find_by_id(id).one(&txn).await? else {
            txn.rollback().await?;
            return Ok(None);
        };

        let mut active: gyms::ActiveModel = model.into();
        active.monthly_sub_price = Set(price.to_string());
        let updated = active.update(&txn).await?;

        txn.commit().await?;
        info!(gym_id = id, price = %price, "Updated gym price");
        Ok(Some(Self::map_model(updated)))
    }

    async fn delete(&self, id: i32) -> Result<bool> {
        let result = Gyms::delete_by_id(id).exec(&self.conn).await?;
        if result.rows_affected > 0 {
            info!(gym_id = id, "Deleted gym");
        }
        Ok(result.rows_affected > 0)
    }
}
