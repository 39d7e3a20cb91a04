use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiSuccess;
use super::UserData;
use crate::inbound::http::middleware::AuthenticatedUser;

/// Echo the identity resolved by the authorization gate.
pub async fn protected(
    Extension(authenticated): Extension<AuthenticatedUser>,
) -> ApiSuccess<ProtectedResponseData> {
    let user = &authenticated.user;

    ApiSuccess::new(
        StatusCode::OK,
        ProtectedResponseData {
            message: format!("Hello, {}! You are authenticated.", user.username),
            user: user.into(),
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProtectedResponseData {
    pub message: String,
    pub user: UserData,
}
