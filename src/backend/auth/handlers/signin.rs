/**
 * Signin Handler
 *
 * `POST /signin` exchanges a login and password for a bearer token.
 * An unknown login and a wrong password get the same 401 response.
 */

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{Json, Response},
};

use crate::backend::auth::handlers::types::AuthResponse;
use crate::backend::auth::users::verify_credentials;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::shared::social::Credentials;

/// Sign in handler
///
/// # Errors
///
/// * `400 Bad Request` - body is not valid credentials JSON
/// * `401 Unauthorized` - unknown login or wrong password
pub async fn signin(
    State(state): State<AppState>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<Response, BackendError> {
    let Json(credentials) = payload?;
    tracing::info!("Signin request for login: {}", credentials.login);

    let user = verify_credentials(&state.db_pool, &state.credentials, &credentials)
        .await
        .map_err(|e| {
            tracing::warn!("Signin for '{}' failed: {}", credentials.login, e);
            e
        })?;

    let response = AuthResponse::issue(&state.tokens, user)?;
    Ok(response.with_status(StatusCode::OK))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::auth::users::register_user;
    use crate::backend::server::state::{test_state, AppState};
    use crate::shared::social::SignupRequest;
    use chrono::NaiveDate;

    async fn seeded() -> AppState {
        let state = test_state().await;
        let request = SignupRequest {
            login: "alice".to_string(),
            password: "wonderland".to_string(),
            first_name: "Alice".to_string(),
            last_name: "Liddell".to_string(),
            birth_day: NaiveDate::from_ymd_opt(1990, 5, 4).unwrap(),
            gender: None,
            interests: None,
            city: None,
        };
        register_user(&state.db_pool, &state.credentials, &request).await.unwrap();
        state
    }

    fn credentials(login: &str, password: &str) -> Credentials {
        Credentials {
            login: login.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_signin_success() {
        let state = seeded().await;
        let response = signin(State(state), Ok(Json(credentials("alice", "wonderland"))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_signin_wrong_password() {
        let state = seeded().await;
        let result = signin(State(state), Ok(Json(credentials("alice", "looking-glass")))).await;
        assert!(matches!(result, Err(BackendError::Unauthenticated)));
    }

    #[tokio::test]
    async fn test_signin_unknown_login() {
        let state = seeded().await;
        let result = signin(State(state), Ok(Json(credentials("mallory", "wonderland")))).await;
        assert!(matches!(result, Err(BackendError::Unauthenticated)));
    }
}
