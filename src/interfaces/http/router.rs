//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::identity::UserService;
use crate::application::ledger::LedgerService;
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::interfaces::http::common::ApiResponse;
use crate::interfaces::http::middleware::{auth_middleware, AuthState, AUTH_TOKEN_HEADER};
use crate::interfaces::http::modules::{auth, health, metrics, transactions};

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "token_auth",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(AUTH_TOKEN_HEADER))),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Auth
        auth::register,
        auth::login,
        // Transactions
        transactions::list_transactions,
        transactions::add_transaction,
        transactions::delete_transaction,
    ),
    components(
        schemas(
            ApiResponse<String>,
            // Auth
            auth::RegisterRequest,
            auth::LoginRequest,
            auth::LoginResponse,
            // Transactions
            transactions::AddTransactionRequest,
            transactions::TransactionDto,
            // Health
            health::HealthResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Server health check endpoints"),
        (name = "Authentication", description = "User registration and login (JWT via x-auth-token)"),
        (name = "Transactions", description = "Owner-scoped income/expense ledger"),
    ),
    info(
        title = "FinTrack API",
        version = "0.1.0",
        description = "REST API for a minimal personal finance tracker backed by a flat JSON file",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(
    users: Arc<UserService>,
    ledger: Arc<LedgerService>,
    jwt_config: JwtConfig,
    prometheus_handle: PrometheusHandle,
    started_at: Arc<Instant>,
) -> Router {
    let middleware_state = AuthState { jwt_config };

    // CORS configuration. The frontend is a standalone static page, so every
    // call arrives cross-origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // User routes (public)
    let user_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .with_state(auth::AuthHandlerState { users });

    // Transaction routes (protected)
    let transaction_routes = Router::new()
        .route("/", get(transactions::list_transactions))
        .route("/add", post(transactions::add_transaction))
        .route("/{id}", delete(transactions::delete_transaction))
        .layer(middleware::from_fn_with_state(
            middleware_state,
            auth_middleware,
        ))
        .with_state(transactions::LedgerHandlerState { ledger });

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(health::HealthState { started_at });

    let metrics_routes = Router::new()
        .route("/metrics", get(metrics::prometheus_metrics))
        .with_state(metrics::MetricsState {
            handle: prometheus_handle,
        });

    Router::new()
        .nest("/users", user_routes)
        .nest("/transactions", transaction_routes)
        .merge(health_routes)
        .merge(metrics_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(middleware::from_fn(metrics::http_metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use metrics_exporter_prometheus::PrometheusBuilder;
    use serde_json::{json, Value};

    use crate::infrastructure::crypto::jwt::TokenClaims;
    use crate::infrastructure::storage::{MemoryStore, Store};

    const TEST_SECRET: &str = "test-secret";

    fn test_router() -> Router {
        let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
        let jwt_config = JwtConfig {
            secret: TEST_SECRET.to_string(),
            expiration_hours: 1,
        };
        let users = Arc::new(UserService::new(store.clone(), jwt_config.clone()));
        let ledger = Arc::new(LedgerService::new(store));
        let handle = PrometheusBuilder::new().build_recorder().handle();
        create_api_router(users, ledger, jwt_config, handle, Arc::new(Instant::now()))
    }

    async fn send(app: Router, req: Request<Body>) -> axum::http::Response<Body> {
        use tower::Service;
        let mut svc = app.into_service();
        svc.call(req).await.unwrap()
    }

    fn json_request(
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json");
        if let Some(token) = token {
            builder = builder.header(AUTH_TOKEN_HEADER, token);
        }
        let body = match body {
            Some(value) => Body::from(serde_json::to_vec(&value).unwrap()),
            None => Body::empty(),
        };
        builder.body(body).unwrap()
    }

    async fn body_json(resp: axum::http::Response<Body>) -> Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn register(app: &Router, username: &str, password: &str) -> StatusCode {
        let req = json_request(
            "POST",
            "/users/register",
            None,
            Some(json!({"username": username, "password": password})),
        );
        send(app.clone(), req).await.status()
    }

    async fn login(app: &Router, username: &str, password: &str) -> String {
        let req = json_request(
            "POST",
            "/users/login",
            None,
            Some(json!({"username": username, "password": password})),
        );
        let resp = send(app.clone(), req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        body["data"]["token"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn full_user_journey() {
        let app = test_router();

        // register alice
        assert_eq!(register(&app, "alice", "secret1").await, StatusCode::CREATED);

        // registering the same username again fails and leaves login intact
        let resp = send(
            app.clone(),
            json_request(
                "POST",
                "/users/register",
                None,
                Some(json!({"username": "alice", "password": "other"})),
            ),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        let body = body_json(resp).await;
        assert_eq!(body["success"], json!(false));
        assert!(body["error"].as_str().unwrap().contains("alice"));

        // login with the original password still works
        let token = login(&app, "alice", "secret1").await;

        // add a transaction
        let resp = send(
            app.clone(),
            json_request(
                "POST",
                "/transactions/add",
                Some(&token),
                Some(json!({
                    "description": "coffee",
                    "amount": 4.5,
                    "type": "expense",
                    "date": "2024-01-01"
                })),
            ),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created = body_json(resp).await;
        let tx_id = created["data"]["id"].as_str().unwrap().to_string();
        assert!(!tx_id.is_empty());

        // the list contains exactly that transaction, fields intact
        let resp = send(
            app.clone(),
            json_request("GET", "/transactions", Some(&token), None),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let listed = body_json(resp).await;
        let items = listed["data"].as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["id"], json!(tx_id));
        assert_eq!(items[0]["description"], json!("coffee"));
        assert_eq!(items[0]["amount"], json!(4.5));
        assert_eq!(items[0]["type"], json!("expense"));
        assert_eq!(items[0]["date"], json!("2024-01-01"));

        // deleting an unknown id is a 404
        let resp = send(
            app.clone(),
            json_request("DELETE", "/transactions/wrong-id", Some(&token), None),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        // deleting the real id empties the list
        let resp = send(
            app.clone(),
            json_request(
                "DELETE",
                &format!("/transactions/{}", tx_id),
                Some(&token),
                None,
            ),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["data"], json!("Transaction removed"));

        let resp = send(
            app.clone(),
            json_request("GET", "/transactions", Some(&token), None),
        )
        .await;
        let listed = body_json(resp).await;
        assert_eq!(listed["data"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn login_with_wrong_password_is_rejected() {
        let app = test_router();
        register(&app, "alice", "secret1").await;

        let resp = send(
            app.clone(),
            json_request(
                "POST",
                "/users/login",
                None,
                Some(json!({"username": "alice", "password": "wrong"})),
            ),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(resp).await;
        assert_eq!(body["error"], json!("Invalid credentials"));
    }

    #[tokio::test]
    async fn protected_routes_require_a_token() {
        let app = test_router();

        let resp = send(app.clone(), json_request("GET", "/transactions", None, None)).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let resp = send(
            app.clone(),
            json_request("GET", "/transactions", Some("garbage"), None),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn expired_token_is_rejected() {
        let app = test_router();
        register(&app, "alice", "secret1").await;

        let now = chrono::Utc::now().timestamp();
        let stale = TokenClaims {
            sub: "whoever".to_string(),
            exp: now - 10,
            iat: now - 3610,
        };
        let token = jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            &stale,
            &jsonwebtoken::EncodingKey::from_secret(TEST_SECRET.as_bytes()),
        )
        .unwrap();

        let resp = send(
            app.clone(),
            json_request("GET", "/transactions", Some(&token), None),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(resp).await;
        assert_eq!(body["error"], json!("Token has expired"));
    }

    #[tokio::test]
    async fn users_only_see_and_delete_their_own_transactions() {
        let app = test_router();
        register(&app, "alice", "secret1").await;
        register(&app, "bob", "secret2").await;
        let alice = login(&app, "alice", "secret1").await;
        let bob = login(&app, "bob", "secret2").await;

        let resp = send(
            app.clone(),
            json_request(
                "POST",
                "/transactions/add",
                Some(&bob),
                Some(json!({
                    "description": "rent",
                    "amount": 800,
                    "type": "expense",
                    "date": "2024-02-01"
                })),
            ),
        )
        .await;
        let bob_tx = body_json(resp).await["data"]["id"]
            .as_str()
            .unwrap()
            .to_string();

        // alice's list does not contain bob's record
        let resp = send(
            app.clone(),
            json_request("GET", "/transactions", Some(&alice), None),
        )
        .await;
        assert_eq!(body_json(resp).await["data"].as_array().unwrap().len(), 0);

        // and alice cannot delete it
        let resp = send(
            app.clone(),
            json_request(
                "DELETE",
                &format!("/transactions/{}", bob_tx),
                Some(&alice),
                None,
            ),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        // bob still has it
        let resp = send(
            app.clone(),
            json_request("GET", "/transactions", Some(&bob), None),
        )
        .await;
        assert_eq!(body_json(resp).await["data"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn malformed_transaction_bodies_are_rejected() {
        let app = test_router();
        register(&app, "alice", "secret1").await;
        let token = login(&app, "alice", "secret1").await;

        // unknown type value never reaches the ledger
        let resp = send(
            app.clone(),
            json_request(
                "POST",
                "/transactions/add",
                Some(&token),
                Some(json!({
                    "description": "weird",
                    "amount": 1,
                    "type": "transfer",
                    "date": "2024-01-01"
                })),
            ),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        // negative magnitude is malformed input
        let resp = send(
            app.clone(),
            json_request(
                "POST",
                "/transactions/add",
                Some(&token),
                Some(json!({
                    "description": "refund",
                    "amount": -5.0,
                    "type": "income",
                    "date": "2024-01-01"
                })),
            ),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        // empty description fails declarative validation
        let resp = send(
            app.clone(),
            json_request(
                "POST",
                "/transactions/add",
                Some(&token),
                Some(json!({
                    "description": "",
                    "amount": 1,
                    "type": "income",
                    "date": "2024-01-01"
                })),
            ),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn list_is_ordered_by_date_descending() {
        let app = test_router();
        register(&app, "alice", "secret1").await;
        let token = login(&app, "alice", "secret1").await;

        for (desc, date) in [
            ("old", "2024-01-01"),
            ("new", "2024-03-01"),
            ("mid", "2024-02-01"),
        ] {
            let resp = send(
                app.clone(),
                json_request(
                    "POST",
                    "/transactions/add",
                    Some(&token),
                    Some(json!({
                        "description": desc,
                        "amount": 1,
                        "type": "expense",
                        "date": date
                    })),
                ),
            )
            .await;
            assert_eq!(resp.status(), StatusCode::CREATED);
        }

        let resp = send(
            app.clone(),
            json_request("GET", "/transactions", Some(&token), None),
        )
        .await;
        let body = body_json(resp).await;
        let order: Vec<&str> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["description"].as_str().unwrap())
            .collect();
        assert_eq!(order, vec!["new", "mid", "old"]);
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let app = test_router();
        let resp = send(app.clone(), json_request("GET", "/health", None, None)).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["status"], json!("ok"));
        assert!(body["version"].as_str().is_some());
    }

    #[tokio::test]
    async fn metrics_endpoint_renders_prometheus_text() {
        let app = test_router();
        let resp = send(app.clone(), json_request("GET", "/metrics", None, None)).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let content_type = resp
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap()
            .to_string();
        assert!(content_type.starts_with("text/plain"));
    }
}
