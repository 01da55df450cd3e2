//! Integration tests for the gateway composition layer: liveness, CORS
//! precedence, body-decoding order, prefix isolation, and fallback
//! behavior. The router is driven in-process with `tower::ServiceExt`.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    response::Response,
    routing::{get, post},
    Extension, Json, Router,
};
use bus_booking_api::{
    api,
    middleware::DecodedBody,
    server::{create_router, AppState, RouteGroup},
    Settings,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

/// Router with the production route groups mounted.
fn production_router() -> Router {
    create_router(AppState::new(Settings::default()), api::route_groups())
}

/// Router with caller-supplied groups and default settings.
fn test_router(groups: Vec<RouteGroup>) -> Router {
    create_router(AppState::new(Settings::default()), groups)
}

/// A group whose only endpoint reports its own name.
fn named_group(prefix: &'static str, name: &'static str) -> RouteGroup {
    RouteGroup::new(
        prefix,
        Router::new().route("/ping", get(move || async move { name })),
    )
}

/// A group that echoes the decoded body the middleware handed it.
fn echo_group(prefix: &'static str) -> RouteGroup {
    RouteGroup::new(prefix, Router::new().route("/echo", post(echo_decoded)))
}

async fn echo_decoded(Extension(body): Extension<DecodedBody>) -> Json<Value> {
    Json(body.value().cloned().unwrap_or(Value::Null))
}

async fn send(router: Router, request: Request<Body>) -> Response {
    router.oneshot(request).await.unwrap()
}

async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

async fn body_json(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

#[tokio::test]
async fn liveness_returns_exact_payload() {
    let response = send(
        production_router(),
        Request::builder().uri("/").body(Body::empty()).unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = body_bytes(response).await;
    assert_eq!(bytes, br#"{"message":"Bus Booking API is running!"}"#);
}

#[tokio::test]
async fn cors_headers_present_on_unmatched_routes() {
    // CORS runs before route resolution, so even a 404 carries its headers
    let response = send(
        production_router(),
        Request::builder()
            .uri("/nope")
            .header(header::ORIGIN, "http://example.com")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "*"
    );
}

#[tokio::test]
async fn cors_preflight_succeeds_without_touching_groups() {
    let response = send(
        production_router(),
        Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/auth/login")
            .header(header::ORIGIN, "http://example.com")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "*"
    );

    let methods = response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_METHODS)
        .unwrap()
        .to_str()
        .unwrap();
    for method in ["GET", "POST", "PUT", "DELETE", "OPTIONS"] {
        assert!(methods.contains(method), "missing method {method}");
    }

    let headers = response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_HEADERS)
        .unwrap()
        .to_str()
        .unwrap()
        .to_ascii_lowercase();
    assert!(headers.contains("content-type"));
}

#[tokio::test]
async fn json_body_is_decoded_before_dispatch() {
    let router = test_router(vec![echo_group("/api/auth")]);

    let payload = json!({"email": "amy@example.com", "password": "secret"});
    let response = send(
        router,
        Request::builder()
            .method(Method::POST)
            .uri("/api/auth/echo")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, payload);
}

#[tokio::test]
async fn nested_form_body_is_decoded_before_dispatch() {
    let router = test_router(vec![echo_group("/api/bookings")]);

    let response = send(
        router,
        Request::builder()
            .method(Method::POST)
            .uri("/api/bookings/echo")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(
                "passenger[name]=amy&seats[]=1A&seats[]=1B&bus_id=42",
            ))
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({
            "passenger": {"name": "amy"},
            "seats": ["1A", "1B"],
            "bus_id": "42"
        })
    );
}

#[tokio::test]
async fn empty_decodable_body_yields_null_payload() {
    let router = test_router(vec![echo_group("/api/auth")]);

    let response = send(
        router,
        Request::builder()
            .method(Method::POST)
            .uri("/api/auth/echo")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, Value::Null);
}

#[tokio::test]
async fn malformed_json_is_rejected_with_400() {
    let router = test_router(vec![echo_group("/api/auth")]);

    let response = send(
        router,
        Request::builder()
            .method(Method::POST)
            .uri("/api/auth/echo")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["type"], "invalid_request_error");
}

#[tokio::test]
async fn oversized_body_is_rejected_with_413() {
    let settings = Settings {
        max_body_bytes: 16,
        ..Settings::default()
    };
    let router = create_router(AppState::new(settings), vec![echo_group("/api/auth")]);

    let response = send(
        router,
        Request::builder()
            .method(Method::POST)
            .uri("/api/auth/echo")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"padding": "aaaaaaaaaaaaaaaaaaaaaaaa"}"#))
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn prefixes_route_to_their_own_group_only() {
    let groups = vec![
        named_group("/api/auth", "auth"),
        named_group("/api/buses", "buses"),
        named_group("/api/bookings", "bookings"),
    ];

    for (prefix, name) in [
        ("/api/auth", "auth"),
        ("/api/buses", "buses"),
        ("/api/bookings", "bookings"),
    ] {
        let response = send(
            test_router(groups.clone()),
            Request::builder()
                .uri(format!("{prefix}/ping"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_bytes(response).await, name.as_bytes());
    }
}

#[tokio::test]
async fn unknown_paths_fall_through_to_default_404() {
    for uri in ["/nope", "/api/unknown", "/api/buses/anything"] {
        let response = send(
            production_router(),
            Request::builder().uri(uri).body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "uri {uri}");
    }
}

#[tokio::test]
async fn responses_carry_a_trace_id() {
    let response = send(
        production_router(),
        Request::builder().uri("/").body(Body::empty()).unwrap(),
    )
    .await;
    assert!(response.headers().contains_key("x-trace-id"));

    // A caller-supplied trace ID is echoed back unchanged
    let response = send(
        production_router(),
        Request::builder()
            .uri("/")
            .header("x-trace-id", "caller-supplied")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(
        response.headers().get("x-trace-id").unwrap(),
        "caller-supplied"
    );
}
