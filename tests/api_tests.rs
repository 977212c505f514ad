use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use gymreg::config::Config;
use http_body_util::BodyExt;
use tower::ServiceExt;

const API_KEY: &str = "TopSecretAPIKey";

async fn spawn_app() -> Router {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    config.uploads.upload_dir = std::env::temp_dir()
        .join(format!("gymreg-api-test-{}", uuid::Uuid::new_v4()))
        .display()
        .to_string();
    config.security.api_key = API_KEY.to_string();
    config.observability.metrics_enabled = false;

    let state = gymreg::api::create_app_state_from_config(config, None)
        .await
        .expect("Failed to create app state");
    gymreg::api::router(state)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn form(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            mime::APPLICATION_WWW_FORM_URLENCODED.as_ref(),
        )
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn add_gym(app: &Router, body: &str) {
    let (status, json) = send(app, form("POST", "/api/gym/add", body)).await;
    assert_eq!(status, StatusCode::OK, "{json}");
}

#[tokio::test]
async fn test_gym_lifecycle() {
    let app = spawn_app().await;

    let (status, json) = send(&app, get("/api/gym/all")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, serde_json::json!({"gyms": []}));

    let (status, json) = send(
        &app,
        form(
            "POST",
            "/api/gym/add",
            "name=Iron+Temple&loc=austin&price=%2440&opening=06%3A00&closing=22%3A00&review=4",
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json["response"]["success"],
        "Successfully added the gym to the database."
    );

    let (status, json) = send(&app, get("/api/gym/all")).await;
    assert_eq!(status, StatusCode::OK);
    let gym = &json["gyms"][0];
    assert_eq!(gym["id"], 1);
    assert_eq!(gym["name"], "Iron Temple");
    // Stored as submitted rather than title-cased; search still finds it below.
    assert_eq!(gym["location"], "austin");
    assert_eq!(gym["monthly_sub_price"], "$40");
    assert_eq!(gym["website_url"], serde_json::Value::Null);
    assert_eq!(gym["image_file"], serde_json::Value::Null);

    let (status, json) = send(&app, get("/api/gym/search?loc=AUSTIN")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["gym"]["name"], "Iron Temple");
    assert_eq!(json["gym"]["location"], "austin");

    let (status, json) = send(
        &app,
        form("PATCH", "/api/gym/update-price/1?new_price=%2445", ""),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json["response"]["success"],
        "Successfully updated the monthly subscription price."
    );

    let (_, json) = send(&app, get("/api/gym/random")).await;
    assert_eq!(json["gym"]["monthly_sub_price"], "$45");
    assert_eq!(json["gym"]["opening_time"], "06:00");

    let (status, json) = send(
        &app,
        form("DELETE", &format!("/api/gym/delete/1?api-key={API_KEY}"), ""),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json["response"]["success"],
        "Successfully deleted the gym from the database."
    );

    let (status, json) = send(&app, get("/api/gym/all")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["gyms"], serde_json::json!([]));
}

#[tokio::test]
async fn test_search_returns_first_match_by_id() {
    let app = spawn_app().await;
    add_gym(&app, "name=First&loc=New+York").await;
    add_gym(&app, "name=Second&loc=new+york").await;

    let (status, json) = send(&app, get("/api/gym/search?loc=new%20YORK")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["gym"]["name"], "First");

    let (status, json) = send(&app, get("/api/gym/search?loc=Boston")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        json,
        serde_json::json!({"error": {"Not Found": "Sorry, no gym at that location."}})
    );
}

#[tokio::test]
async fn test_search_non_ascii_location() {
    let app = spawn_app().await;
    add_gym(&app, "name=Basic-Fit&loc=%C3%89vry").await;

    for query in ["%C3%A9vry", "%C3%89vry", "%C3%89VRY"] {
        let (status, json) = send(&app, get(&format!("/api/gym/search?loc={query}"))).await;
        assert_eq!(status, StatusCode::OK, "{query}: {json}");
        assert_eq!(json["gym"]["location"], "Évry");
    }
}

#[tokio::test]
async fn test_add_accepts_multipart_fields() {
    let app = spawn_app().await;
    let boundary = "gymreg-api-boundary";
    let body = format!(
        "--{boundary}\r\nContent-Disposition: form-data; name=\"name\"\r\n\r\nIron\r\n\
         --{boundary}\r\nContent-Disposition: form-data; name=\"loc\"\r\n\r\nAustin\r\n\
         --{boundary}\r\nContent-Disposition: form-data; name=\"price\"\r\n\r\n30\r\n\
         --{boundary}--\r\n"
    );

    let request = Request::builder()
        .method("POST")
        .uri("/api/gym/add")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap();

    let (status, json) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK, "{json}");

    let (_, json) = send(&app, get("/api/gym/search?loc=austin")).await;
    assert_eq!(json["gym"]["name"], "Iron");
    assert_eq!(json["gym"]["monthly_sub_price"], "30");
}

#[tokio::test]
async fn test_malformed_ids_return_json_not_found() {
    let app = spawn_app().await;

    let (status, json) = send(
        &app,
        form("PATCH", "/api/gym/update-price/abc?new_price=10", ""),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        json["error"]["Not Found"],
        "Sorry no gym with that id was found in the database."
    );

    let (status, json) = send(
        &app,
        form(
            "DELETE",
            &format!("/api/gym/delete/99999999999?api-key={API_KEY}"),
            "",
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"]["Not Found"].is_string());
}

#[tokio::test]
async fn test_metrics_disabled_is_json_not_found() {
    let app = spawn_app().await;

    let (status, json) = send(&app, get("/api/metrics")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"]["Not Found"], "Metrics are disabled");
}

#[tokio::test]
async fn test_search_requires_location() {
    let app = spawn_app().await;

    let (status, json) = send(&app, get("/api/gym/search")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"]["Bad Request"].is_string());

    let (status, _) = send(&app, get("/api/gym/search?loc=%20%20")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_random_on_empty_registry() {
    let app = spawn_app().await;

    let (status, json) = send(&app, get("/api/gym/random")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        json["error"]["Not Found"],
        "Sorry, there are no gyms in the database yet."
    );
}

#[tokio::test]
async fn test_add_requires_name_and_location() {
    let app = spawn_app().await;

    let (status, json) = send(&app, form("POST", "/api/gym/add", "loc=Austin")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        json["error"]["Bad Request"]
            .as_str()
            .unwrap()
            .contains("name")
    );

    let (status, _) = send(&app, form("POST", "/api/gym/add", "name=Solo&loc=")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, json) = send(&app, get("/api/gym/all")).await;
    assert_eq!(json["gyms"], serde_json::json!([]));
}

#[tokio::test]
async fn test_update_price_from_body_and_errors() {
    let app = spawn_app().await;
    add_gym(&app, "name=Pump&loc=Leeds&price=20").await;

    let (status, _) = send(
        &app,
        form("PATCH", "/api/gym/update-price/1", "new_price=25"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, json) = send(&app, get("/api/gym/all")).await;
    assert_eq!(json["gyms"][0]["monthly_sub_price"], "25");
    assert_eq!(json["gyms"][0]["name"], "Pump");

    let (status, _) = send(&app, form("PATCH", "/api/gym/update-price/1", "")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, json) = send(
        &app,
        form("PATCH", "/api/gym/update-price/99?new_price=10", ""),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        json["error"]["Not Found"],
        "Sorry no gym with that id was found in the database."
    );
}

#[tokio::test]
async fn test_delete_checks_key_before_existence() {
    let app = spawn_app().await;
    add_gym(&app, "name=Keep&loc=Paris").await;

    let (status, json) = send(&app, form("DELETE", "/api/gym/delete/1?api-key=nope", "")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        json["error"]["Forbidden"],
        "Access denied. Make sure you are using the correct api_key."
    );

    let (status, _) = send(&app, form("DELETE", "/api/gym/delete/99", "")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &app,
        form("DELETE", &format!("/api/gym/delete/99?api-key={API_KEY}"), ""),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        form("DELETE", "/api/gym/delete/1", &format!("api-key={API_KEY}")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = spawn_app().await;

    let (status, json) = send(&app, get("/api/health/live")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");

    let (status, json) = send(&app, get("/api/health/ready")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["ready"], true);
    assert_eq!(json["database"], true);
}

#[tokio::test]
async fn test_security_headers_present() {
    let app = spawn_app().await;

    let response = app.clone().oneshot(get("/api/gym/all")).await.unwrap();
    let headers = response.headers();
    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert_eq!(headers["x-frame-options"], "DENY");
    assert!(headers.contains_key("x-request-id"));
}
