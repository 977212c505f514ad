//! Browser-facing pages: home, the add form and the gym list.

use axum::{
    Router,
    extract::{Multipart, State},
    http::StatusCode,
    middleware,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use std::sync::Arc;
use tower_sessions::{Expiry, MemoryStore, Session, SessionManagerLayer, cookie::Key};
use tracing::{info, warn};

use crate::api::AppState;
use crate::services::{FieldError, GymError};

pub mod form;
pub mod views;

use form::AddGymForm;

const CSRF_SESSION_KEY: &str = "csrf_token";

/// Errors that end a page request without re-rendering the form.
#[derive(Debug)]
pub enum PageError {
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::Internal(msg) => {
                tracing::error!("Page error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };
        (status, Html(views::error_page(&message))).into_response()
    }
}

impl From<tower_sessions::session::Error> for PageError {
    fn from(err: tower_sessions::session::Error) -> Self {
        Self::Internal(format!("Session error: {err}"))
    }
}

impl From<GymError> for PageError {
    fn from(err: GymError) -> Self {
        Self::Internal(err.to_string())
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    let config = state.config();

    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(config.server.secure_cookies)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(60)))
        .with_signed(signing_key(&config.security.secret_key));

    Router::new()
        .route("/", get(home))
        .route("/add", get(add_form).post(submit_add_form))
        .route("/gyms", get(list_gyms))
        .route_layer(middleware::from_fn(crate::api::logging_middleware))
        .layer(session_layer)
        .with_state(state)
}

/// Session cookies are signed with the configured secret when it is long
/// enough; otherwise sessions only survive until the process restarts.
fn signing_key(secret: &str) -> Key {
    match Key::try_from(secret.as_bytes()) {
        Ok(key) => key,
        Err(_) => {
            warn!("secret_key is missing or shorter than 64 bytes; using a random session key");
            Key::generate()
        }
    }
}

fn new_csrf_token() -> String {
    use rand::Rng;

    let mut rng = rand::rng();
    let bytes: [u8; 32] = rng.random();

    bytes.iter().fold(String::with_capacity(64), |mut acc, b| {
        use std::fmt::Write;
        let _ = write!(acc, "{b:02x}");
        acc
    })
}

/// Returns the session's CSRF token, creating one on first use.
async fn csrf_token(session: &Session) -> Result<String, PageError> {
    if let Some(token) = session.get::<String>(CSRF_SESSION_KEY).await? {
        return Ok(token);
    }

    let token = new_csrf_token();
    session.insert(CSRF_SESSION_KEY, &token).await?;
    Ok(token)
}

async fn home() -> Html<String> {
    Html(views::home_page())
}

async fn add_form(session: Session) -> Result<Html<String>, PageError> {
    let token = csrf_token(&session).await?;
    Ok(Html(views::add_page(&AddGymForm::default(), &token, &[])))
}

async fn submit_add_form(
    State(state): State<Arc<AppState>>,
    session: Session,
    multipart: Multipart,
) -> Result<Response, PageError> {
    let mut form = AddGymForm::from_multipart(multipart)
        .await
        .map_err(|e| PageError::BadRequest(e.body_text()))?;

    let expected = session.get::<String>(CSRF_SESSION_KEY).await?;
    let errors = form.validate(expected.as_deref());

    if !errors.is_empty() {
        let token = csrf_token(&session).await?;
        return Ok(Html(views::add_page(&form, &token, &errors)).into_response());
    }

    let image = form.take_image();

    match state.gyms().create(form.to_input(), image).await {
        Ok(gym) => {
            info!(id = gym.id, name = %gym.name, "Gym added through the form");
            Ok(Redirect::to("/gyms").into_response())
        }
        Err(GymError::Validation(msg)) => {
            let token = csrf_token(&session).await?;
            let errors = [FieldError::new("form", msg)];
            Ok(Html(views::add_page(&form, &token, &errors)).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

async fn list_gyms(State(state): State<Arc<AppState>>) -> Result<Html<String>, PageError> {
    let gyms = state.gyms().list_all().await?;
    Ok(Html(views::gyms_page(&gyms)))
}
