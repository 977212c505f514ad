use serde::{Deserialize, Serialize};

/// A persisted gym record. Field order matches the JSON API output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gym {
    pub id: i32,
    pub name: String,
    pub location: String,
    pub monthly_sub_price: String,
    pub opening_time: Option<String>,
    pub closing_time: Option<String>,
    pub review: Option<String>,
    pub website_url: Option<String>,
    pub image_file: Option<String>,
}

/// A validated record ready for insertion; the id is assigned by storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGym {
    pub name: String,
    pub location: String,
    pub monthly_sub_price: String,
    pub opening_time: Option<String>,
    pub closing_time: Option<String>,
    pub review: Option<String>,
    pub website_url: Option<String>,
    pub image_file: Option<String>,
}
