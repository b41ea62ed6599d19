use std::sync::Arc;

use auth::JwtHandler;
use auth::PasswordHasher;
use auth::SigningKeyProvider;
use auth::SystemClock;
use cloud_manager::domain::auth::models::Identity;
use cloud_manager::domain::auth::service::AuthService;
use cloud_manager::inbound::http::router::create_router;
use cloud_manager::user_store::InMemoryUserStore;

pub const INSTANCE_NAME: &str = "test-instance";

pub const ADMIN_NAME: &str = "alice";
pub const ADMIN_PASSWORD: &str = "secret";
pub const USER_NAME: &str = "bob";
pub const USER_PASSWORD: &str = "hunter2";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub api_client: reqwest::Client,
    /// Handler sharing the server's signing key, for inspecting and minting
    /// tokens in tests
    pub jwt_handler: JwtHandler,
    pub key_provider: SigningKeyProvider,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let hasher = PasswordHasher::new();
        let user_store = Arc::new(
            InMemoryUserStore::new()
                .with_user(
                    Identity::new(ADMIN_NAME, "local", true),
                    hasher.hash(ADMIN_PASSWORD).expect("Failed to hash password"),
                )
                .with_user(
                    Identity::new(USER_NAME, "local", false),
                    hasher.hash(USER_PASSWORD).expect("Failed to hash password"),
                ),
        );

        let key_provider = SigningKeyProvider::random();
        let auth_service = Arc::new(AuthService::new(
            user_store,
            &key_provider,
            Arc::new(SystemClock),
        ));

        let router = create_router(auth_service, Some(INSTANCE_NAME.to_string()));

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        let jwt_handler = JwtHandler::from_provider(&key_provider);

        Self {
            address,
            port,
            api_client: reqwest::Client::builder()
                .cookie_store(true)
                .build()
                .expect("Failed to create reqwest client"),
            jwt_handler,
            key_provider,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(&format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(&format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Log in with Basic credentials and return the issued token
    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self
            .post("/api/login")
            .basic_auth(username, Some(password))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::OK);

        response.text().await.expect("Failed to read token")
    }
}
