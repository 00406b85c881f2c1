//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use serde_json::Value;
use sqlx::SqlitePool;
use tower::ServiceExt;

use userhub_core::config::AppConfig;
use userhub_entity::user::{NewUser, User};

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Database pool for direct queries
    pub db_pool: SqlitePool,
    /// Application state, for reaching components directly
    pub state: userhub_api::state::AppState,
}

impl TestApp {
    /// Create a new test application backed by an in-memory database
    pub async fn new() -> Self {
        let mut config = AppConfig::default();
        config.auth.secret = "integration-test-secret".to_string();
        // In-memory SQLite: a single connection, or every new connection
        // would see its own empty database.
        config.database.url = "sqlite::memory:".to_string();
        config.database.max_connections = 1;
        config.database.min_connections = 1;

        let db_pool = userhub_database::connection::create_pool(&config.database)
            .await
            .expect("Failed to connect to test database");

        userhub_database::migration::run_migrations(&db_pool)
            .await
            .expect("Failed to run migrations");

        let user_repo = Arc::new(userhub_database::repositories::user::UserRepository::new(
            db_pool.clone(),
        ));

        let password_hasher = Arc::new(userhub_auth::password::hasher::PasswordHasher::new());
        let token_encoder = Arc::new(
            userhub_auth::jwt::encoder::TokenEncoder::new(&config.auth)
                .expect("Failed to build token encoder"),
        );
        let token_decoder = Arc::new(
            userhub_auth::jwt::decoder::TokenDecoder::new(&config.auth)
                .expect("Failed to build token decoder"),
        );

        let auth_service = Arc::new(userhub_service::auth::service::AuthService::new(
            Arc::clone(&user_repo),
            Arc::clone(&password_hasher),
            Arc::clone(&token_encoder),
        ));
        let user_service = Arc::new(userhub_service::user::service::UserService::new(Arc::clone(
            &user_repo,
        )));

        let state = userhub_api::state::AppState {
            config: Arc::new(config.clone()),
            db_pool: db_pool.clone(),
            token_encoder,
            token_decoder,
            password_hasher,
            user_repo,
            auth_service,
            user_service,
        };

        let router = userhub_api::router::build_router(state.clone());

        Self {
            router,
            db_pool,
            state,
        }
    }

    /// Register a user through the API and return the response
    pub async fn signup(
        &self,
        username: &str,
        password: &str,
        email: Option<&str>,
    ) -> TestResponse {
        let body = serde_json::json!({
            "username": username,
            "password": password,
            "email": email,
        });

        self.request("POST", "/auth/signup", Some(body), None).await
    }

    /// Login and return the bearer token
    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self
            .form_request(
                "/auth/login",
                &[("username", username), ("password", password)],
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        response
            .body
            .get("access_token")
            .and_then(|v| v.as_str())
            .expect("No access_token in login response")
            .to_string()
    }

    /// Insert a user directly through the repository and return it
    pub async fn seed_user(&self, username: &str, password: &str, email: Option<&str>) -> User {
        let password_hash = self
            .state
            .password_hasher
            .hash_password(password)
            .expect("Failed to hash password");

        self.state
            .user_repo
            .create(&NewUser {
                username: username.to_string(),
                email: email.map(str::to_string),
                password_hash,
            })
            .await
            .expect("Failed to seed user")
    }

    /// Make a JSON request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Make a form-encoded POST request to the test app
    pub async fn form_request(&self, path: &str, fields: &[(&str, &str)]) -> TestResponse {
        let body_str = fields
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");

        let req = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(Body::from(body_str))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Send a raw request to the test app
    pub async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Parsed JSON body
    pub body: Value,
}
