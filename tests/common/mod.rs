// tests/common/mod.rs

use quizdesk::{config::Config, routes, state::AppState};
use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};

/// Spawns the app on a random port against a fresh in-memory SQLite
/// database. Returns the base URL and a handle to the same pool so
/// tests can inspect or seed rows directly.
///
/// A single pooled connection keeps the in-memory database alive for
/// the lifetime of the test.
pub async fn spawn_app() -> (String, SqlitePool) {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory SQLite database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to migrate database");

    let config = Config {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: "test_secret_for_integration_tests".to_string(),
        jwt_expiration: 600, // 10 minutes for tests
        rust_log: "error".to_string(),
    };

    let state = AppState {
        pool: pool.clone(),
        config,
    };

    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (address, pool)
}

/// Registers a user with a unique email and returns (email, password).
pub async fn register_user(
    client: &reqwest::Client,
    address: &str,
    name: &str,
    role: &str,
) -> (String, String) {
    let email = format!("{}_{}@example.com", role, &uuid::Uuid::new_v4().to_string()[..8]);
    let password = "password123".to_string();

    let response = client
        .post(format!("{}/register", address))
        .json(&serde_json::json!({
            "name": name,
            "email": email,
            "password": password,
            "role": role
        }))
        .send()
        .await
        .expect("Register failed");
    assert_eq!(response.status().as_u16(), 201);

    (email, password)
}

/// Logs in and returns the bearer token.
pub async fn login(client: &reqwest::Client, address: &str, email: &str, password: &str) -> String {
    let response = client
        .post(format!("{}/login", address))
        .json(&serde_json::json!({"email": email, "password": password}))
        .send()
        .await
        .expect("Login failed")
        .json::<serde_json::Value>()
        .await
        .expect("Failed to parse login json");

    response["token"]
        .as_str()
        .expect("Token not found")
        .to_string()
}
