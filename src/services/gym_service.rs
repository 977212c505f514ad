//! Domain service for the gym registry.
//!
//! Owns the business rules around gym records: required fields on creation,
//! location search normalization, random selection and the shared-key check
//! guarding deletion. Transport layers (JSON API, browser form) only translate
//! requests into calls on [`GymService`].

use crate::domain::GymId;
use crate::models::gym::Gym;
use crate::services::upload::ImageUpload;
use crate::services::validation::FieldError;
use thiserror::Error;

/// Errors produced by registry operations.
#[derive(Debug, Error)]
pub enum GymError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Access denied. Make sure you are using the correct api_key.")]
    Forbidden,

    #[error("Sorry, there are no gyms in the database yet.")]
    EmptyCollection,

    #[error("Upload failed: {0}")]
    Upload(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl GymError {
    #[must_use]
    pub fn id_not_found() -> Self {
        Self::NotFound("Sorry no gym with that id was found in the database.".to_string())
    }

    #[must_use]
    pub fn location_not_found() -> Self {
        Self::NotFound("Sorry, no gym at that location.".to_string())
    }
}

impl From<FieldError> for GymError {
    fn from(err: FieldError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<sea_orm::DbErr> for GymError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for GymError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// Raw creation fields as received from a caller. Absent and blank values are
/// treated alike.
#[derive(Debug, Clone, Default)]
pub struct GymInput {
    pub name: Option<String>,
    pub location: Option<String>,
    pub monthly_sub_price: Option<String>,
    pub opening_time: Option<String>,
    pub closing_time: Option<String>,
    pub review: Option<String>,
    pub website_url: Option<String>,
}

/// Registry operations.
///
/// # Examples
///
/// ```rust,ignore
/// use gymreg::services::{GymError, GymService};
/// use std::sync::Arc;
///
/// async fn example(service: Arc<dyn GymService>) -> Result<(), GymError> {
///     let gym = service.find_by_location("austin").await?;
///     println!("{} charges {}", gym.name, gym.monthly_sub_price);
///     Ok(())
/// }
/// ```
#[async_trait::async_trait]
pub trait GymService: Send + Sync {
    /// Validates and stores a new gym, saving the image first when present.
    ///
    /// # Errors
    ///
    /// - [`GymError::Validation`] when `name` or `location` is missing or blank
    /// - [`GymError::Upload`] when the image cannot be written
    async fn create(&self, input: GymInput, image: Option<ImageUpload>) -> Result<Gym, GymError>;

    /// Every gym in insertion order.
    async fn list_all(&self) -> Result<Vec<Gym>, GymError>;

    /// A uniformly random gym.
    ///
    /// # Errors
    ///
    /// Returns [`GymError::EmptyCollection`] when there are no gyms.
    async fn pick_random(&self) -> Result<Gym, GymError>;

    /// The first gym whose location matches the title-cased query.
    ///
    /// # Errors
    ///
    /// - [`GymError::Validation`] for a blank query
    /// - [`GymError::NotFound`] when nothing matches
    async fn find_by_location(&self, raw_location: &str) -> Result<Gym, GymError>;

    /// Replaces the monthly price verbatim; no other field changes.
    ///
    /// # Errors
    ///
    /// - [`GymError::Validation`] for a blank price
    /// - [`GymError::NotFound`] for an unknown id
    async fn update_price(&self, id: GymId, new_price: Option<&str>) -> Result<Gym, GymError>;

    /// Removes a gym when `supplied_key` matches the configured key.
    ///
    /// # Errors
    ///
    /// - [`GymError::Forbidden`] on a missing or wrong key, checked first
    /// - [`GymError::NotFound`] for an unknown id
    async fn delete(&self, id: GymId, supplied_key: Option<&str>) -> Result<(), GymError>;
}
