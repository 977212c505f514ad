use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::gym::Gym;

#[derive(Debug, Serialize)]
pub struct GymResponse {
    pub gym: Gym,
}

#[derive(Debug, Serialize)]
pub struct GymListResponse {
    pub gyms: Vec<Gym>,
}

/// `{"response": {"success": "..."}}`
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub response: SuccessMessage,
}

#[derive(Debug, Serialize)]
pub struct SuccessMessage {
    pub success: String,
}

impl SuccessResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            response: SuccessMessage {
                success: message.into(),
            },
        }
    }
}

/// `{"error": {"<status reason>": "..."}}`
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: BTreeMap<String, String>,
}

impl ErrorResponse {
    pub fn new(label: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: BTreeMap::from([(label.into(), message.into())]),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub loc: Option<String>,
}

/// Form body of `POST /api/gym/add`, either urlencoded or multipart.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct AddGymRequest {
    pub name: Option<String>,
    pub loc: Option<String>,
    pub price: Option<String>,
    pub opening: Option<String>,
    pub closing: Option<String>,
    pub review: Option<String>,
    pub website: Option<String>,
}

impl AddGymRequest {
    /// Keeps the first value of each known field; unknown keys are ignored.
    pub fn set(&mut self, key: &str, value: String) {
        let slot = match key {
            "name" => &mut self.name,
            "loc" => &mut self.loc,
            "price" => &mut self.price,
            "opening" => &mut self.opening,
            "closing" => &mut self.closing,
            "review" => &mut self.review,
            "website" => &mut self.website,
            _ => return,
        };
        if slot.is_none() {
            *slot = Some(value);
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdatePriceParams {
    pub new_price: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DeleteParams {
    #[serde(rename = "api-key")]
    pub api_key: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthLiveResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthReadyResponse {
    pub ready: bool,
    pub database: bool,
}
