use std::sync::Arc;

use account_service::domain::user::service::AccountService;
use account_service::inbound::http::router::create_router;
use account_service::outbound::repositories::InMemoryUserRepository;
use auth::Authenticator;
use auth::TokenCodec;
use auth::TokenConfig;
use jsonwebtoken::Algorithm;

const TEST_SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub api_client: reqwest::Client,
    /// The server's user store, kept around so tests can reach behind
    /// the API (e.g. delete a user out from under a live token).
    pub users: Arc<InMemoryUserRepository>,
    /// Codec sharing the server's secret, for crafting arbitrary tokens.
    pub codec: TokenCodec,
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

        // Zero leeway so expiry tests do not have to outwait a skew window.
        let token_config =
            TokenConfig::new(TEST_SECRET, "HS256", 30, 7, 0).expect("Failed to build token config");
        let authenticator = Arc::new(Authenticator::new(token_config));

        let users = Arc::new(InMemoryUserRepository::new());
        let account_service = Arc::new(AccountService::new(
            Arc::clone(&users),
            Arc::clone(&authenticator),
        ));

        let router = create_router(account_service, authenticator, false);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        let codec = TokenCodec::new(TEST_SECRET.as_bytes(), Algorithm::HS256, 0);

        Self {
            address,
            port,
            api_client: reqwest::Client::builder()
                .cookie_store(true)
                .build()
                .expect("Failed to create reqwest client"),
            users,
            codec,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }
}
