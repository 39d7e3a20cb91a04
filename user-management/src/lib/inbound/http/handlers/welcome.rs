use axum::http::StatusCode;
use serde::Serialize;

use super::ApiSuccess;

pub async fn welcome() -> ApiSuccess<WelcomeResponseData> {
    ApiSuccess::new(
        StatusCode::OK,
        WelcomeResponseData {
            message: "Welcome to the user management microservice".to_string(),
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WelcomeResponseData {
    pub message: String,
}
