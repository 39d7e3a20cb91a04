use axum::extract::Request;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use chrono::Utc;
use http::header::AUTHORIZATION;
use thiserror::Error;

use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

/// Request extension holding the record of the verified token subject.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user: User,
}

/// Why the gate refused to run a protected handler.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthorizationError {
    #[error("{0}")]
    Unauthenticated(&'static str),

    /// Token was valid but its subject no longer exists
    #[error("User not found: {0}")]
    SubjectNotFound(UserId),

    #[error("{0}")]
    Internal(String),
}

impl From<AuthorizationError> for ApiError {
    fn from(err: AuthorizationError) -> Self {
        match err {
            AuthorizationError::Unauthenticated(_) => ApiError::Unauthorized(err.to_string()),
            AuthorizationError::SubjectNotFound(_) => ApiError::NotFound(err.to_string()),
            AuthorizationError::Internal(msg) => ApiError::InternalServerError(msg),
        }
    }
}

const INVALID_TOKEN: &str = "Invalid or expired token";

/// Authorization gate for protected routes.
///
/// Verifies the bearer token against the current time, resolves its subject
/// to a live user record and exposes it as an [`AuthenticatedUser`] extension.
/// Every token failure is reported as the same 401; a deleted subject is a 404.
pub async fn require_authentication(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = authorize(&state, req.headers()).await?;

    req.extensions_mut().insert(AuthenticatedUser { user });

    Ok(next.run(req).await)
}

async fn authorize(state: &AppState, headers: &HeaderMap) -> Result<User, AuthorizationError> {
    let token = extract_bearer_token(headers)?;

    let subject = state
        .authenticator
        .validate_token(token, Utc::now())
        .map_err(|e| {
            tracing::warn!(reason = %e, "Token rejected");
            AuthorizationError::Unauthenticated(INVALID_TOKEN)
        })?;

    let user_id = UserId::from_string(&subject).map_err(|e| {
        tracing::warn!(reason = %e, "Token subject is not a user id");
        AuthorizationError::Unauthenticated(INVALID_TOKEN)
    })?;

    match state.user_service.get_user(&user_id).await {
        Ok(user) => Ok(user),
        Err(UserError::NotFound(_)) => {
            tracing::info!(user_id = %user_id, "Token subject no longer exists");
            Err(AuthorizationError::SubjectNotFound(user_id))
        }
        Err(e) => Err(AuthorizationError::Internal(e.to_string())),
    }
}

fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, AuthorizationError> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .ok_or(AuthorizationError::Unauthenticated(
            "Missing Authorization header",
        ))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| AuthorizationError::Unauthenticated("Invalid Authorization header"))?;

    match auth_str.split_once(' ') {
        Some((scheme, token))
            if scheme.eq_ignore_ascii_case("Bearer")
                && !token.is_empty()
                && !token.contains(char::is_whitespace) =>
        {
            Ok(token)
        }
        _ => Err(AuthorizationError::Unauthenticated(
            "Invalid Authorization header format. Expected: Bearer <token>",
        )),
    }
}
