//! Gym registry JSON endpoints under `/api/gym`.
//!
//! Handlers only extract parameters and translate results; every rule lives
//! in [`crate::services::GymService`].

use axum::{
    Json,
    body::Bytes,
    extract::{FromRequest, Multipart, Path, Query, Request, State},
    http::header,
};
use std::sync::Arc;

use super::{
    AddGymRequest, ApiError, AppState, DeleteParams, GymListResponse, GymResponse, SearchQuery,
    SuccessResponse, UpdatePriceParams,
};
use crate::domain::GymId;
use crate::services::{GymError, GymInput};

/// `GET /api/gym/random`
pub async fn random_gym(
    State(state): State<Arc<AppState>>,
) -> Result<Json<GymResponse>, ApiError> {
    let gym = state.gyms().pick_random().await?;
    Ok(Json(GymResponse { gym }))
}

/// `GET /api/gym/all`
pub async fn list_gyms(
    State(state): State<Arc<AppState>>,
) -> Result<Json<GymListResponse>, ApiError> {
    let gyms = state.gyms().list_all().await?;
    Ok(Json(GymListResponse { gyms }))
}

/// `GET /api/gym/search?loc=...`
pub async fn search_gym(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<GymResponse>, ApiError> {
    let loc = query
        .loc
        .ok_or_else(|| ApiError::validation("Missing 'loc' query parameter"))?;
    let gym = state.gyms().find_by_location(&loc).await?;
    Ok(Json(GymResponse { gym }))
}

/// `POST /api/gym/add`
///
/// Accepts urlencoded and multipart bodies. Only `name` and `loc` are
/// enforced; hours, review and website may be omitted.
pub async fn add_gym(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<SuccessResponse>, ApiError> {
    let payload = read_add_request(request, &state).await?;
    let input = GymInput {
        name: payload.name,
        location: payload.loc,
        monthly_sub_price: payload.price,
        opening_time: payload.opening,
        closing_time: payload.closing,
        review: payload.review,
        website_url: payload.website,
    };

    state.gyms().create(input, None).await?;
    Ok(Json(SuccessResponse::new(
        "Successfully added the gym to the database.",
    )))
}

/// `PATCH /api/gym/update-price/{id}` with `new_price` in the query or a form body.
pub async fn update_price(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(params): Query<UpdatePriceParams>,
    body: Bytes,
) -> Result<Json<SuccessResponse>, ApiError> {
    let id = parse_gym_id(&id)?;
    let new_price = params
        .new_price
        .or_else(|| form_field(&body, "new_price"));

    state
        .gyms()
        .update_price(id, new_price.as_deref())
        .await?;

    Ok(Json(SuccessResponse::new(
        "Successfully updated the monthly subscription price.",
    )))
}

/// `DELETE /api/gym/delete/{id}` with `api-key` in the query or a form body.
pub async fn delete_gym(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(params): Query<DeleteParams>,
    body: Bytes,
) -> Result<Json<SuccessResponse>, ApiError> {
    let id = parse_gym_id(&id)?;
    let api_key = params.api_key.or_else(|| form_field(&body, "api-key"));

    state
        .gyms()
        .delete(id, api_key.as_deref())
        .await?;

    Ok(Json(SuccessResponse::new(
        "Successfully deleted the gym from the database.",
    )))
}

/// Ids that are not a valid integer cannot name a stored gym.
fn parse_gym_id(raw: &str) -> Result<GymId, ApiError> {
    raw.parse::<i32>()
        .map(GymId::new)
        .map_err(|_| GymError::id_not_found().into())
}

async fn read_add_request(
    request: Request,
    state: &Arc<AppState>,
) -> Result<AddGymRequest, ApiError> {
    let is_multipart = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("multipart/form-data"));

    let mut payload = AddGymRequest::default();

    if is_multipart {
        let mut multipart = Multipart::from_request(request, state)
            .await
            .map_err(|e| ApiError::validation(e.body_text()))?;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::validation(e.body_text()))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            // File parts are not part of the API contract.
            if field.file_name().is_some() {
                continue;
            }
            let value = field
                .text()
                .await
                .map_err(|e| ApiError::validation(e.body_text()))?;
            payload.set(&name, value);
        }
    } else {
        let body = Bytes::from_request(request, state)
            .await
            .map_err(|e| ApiError::validation(e.body_text()))?;
        for (key, value) in url::form_urlencoded::parse(&body) {
            payload.set(&key, value.into_owned());
        }
    }

    Ok(payload)
}

/// Reads one field from an urlencoded body. Bodies that are not urlencoded
/// simply yield nothing.
fn form_field(body: &[u8], key: &str) -> Option<String> {
    url::form_urlencoded::parse(body)
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_field_decodes_values() {
        let body = b"api-key=Top%20Secret&new_price=44.99";
        assert_eq!(form_field(body, "api-key").as_deref(), Some("Top Secret"));
        assert_eq!(form_field(body, "new_price").as_deref(), Some("44.99"));
        assert_eq!(form_field(body, "missing"), None);
        assert_eq!(form_field(b"", "new_price"), None);
    }

    #[test]
    fn malformed_ids_are_not_found() {
        assert_eq!(parse_gym_id("12").unwrap(), GymId::new(12));
        assert!(matches!(parse_gym_id("abc"), Err(ApiError::NotFound(_))));
        assert!(matches!(
            parse_gym_id("99999999999"),
            Err(ApiError::NotFound(_))
        ));
    }
}
