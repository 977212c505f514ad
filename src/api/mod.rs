use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware,
    routing::{delete, get, patch, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::services::GymService;
use crate::state::SharedState;

mod error;
pub mod gyms;
mod observability;
mod system;
mod types;

pub use error::ApiError;
pub use types::*;

use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }

    #[must_use]
    pub fn gyms(&self) -> &Arc<dyn GymService> {
        &self.shared.gym_service
    }
}

pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        prometheus_handle,
    })
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared, prometheus_handle))
}

/// Full application: JSON API, browser pages and uploaded images.
pub fn router(state: Arc<AppState>) -> Router {
    let upload_dir = state.shared.uploads.upload_dir().to_path_buf();
    let cors_origins = state.config().server.cors_allowed_origins.clone();
    let body_limit = state.config().server.max_upload_bytes;

    let api_router = api_routes()
        .route_layer(middleware::from_fn(observability::logging_middleware))
        .with_state(state.clone());

    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .nest("/api", api_router)
        .merge(crate::web::router(state))
        .nest_service("/uploads", ServeDir::new(upload_dir))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::security_headers_middleware))
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/gym/random", get(gyms::random_gym))
        .route("/gym/all", get(gyms::list_gyms))
        .route("/gym/search", get(gyms::search_gym))
        .route("/gym/add", post(gyms::add_gym))
        .route("/gym/update-price/{id}", patch(gyms::update_price))
        .route("/gym/delete/{id}", delete(gyms::delete_gym))
        .route("/health/live", get(system::health_live))
        .route("/health/ready", get(system::health_ready))
        .route("/metrics", get(observability::get_metrics))
}

pub(crate) use observability::logging_middleware;
