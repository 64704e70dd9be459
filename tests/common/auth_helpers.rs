//! Authentication test helpers

use axum::http::StatusCode;
use serde_json::{json, Value};

use super::assertions::read_json;
use super::database::TestApp;

/// Password every helper-created user signs up with
pub const TEST_PASSWORD: &str = "test_password_123";

/// A registered user and their token
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: i64,
    pub login: String,
    pub password: String,
    pub token: String,
}

/// Signup body with the required fields
pub fn signup_body(login: &str, first_name: &str, last_name: &str) -> Value {
    json!({
        "login": login,
        "password": TEST_PASSWORD,
        "firstName": first_name,
        "lastName": last_name,
        "birthDay": "1990-01-01",
        "city": "Oxford",
    })
}

/// Create authorization header value
pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

impl TestApp {
    /// Register a user through `POST /signup`
    pub async fn signup(&self, login: &str, first_name: &str, last_name: &str) -> TestUser {
        let response = self
            .post("/signup", None, signup_body(login, first_name, last_name))
            .await;
        let (status, body) = read_json(response).await;
        assert_eq!(status, StatusCode::CREATED, "signup failed: {}", body);

        TestUser {
            id: body["user"]["id"].as_i64().expect("user id"),
            login: login.to_string(),
            password: TEST_PASSWORD.to_string(),
            token: body["token"].as_str().expect("token").to_string(),
        }
    }
}
