use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::core::errors::UserHubError;

/// Body of `POST /users`, `PUT /users/{id}` and `POST /form`. Missing fields decode as empty strings.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct UserPayload {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// Envelope wrapped around every API response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub message: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn with_data(status: StatusCode, message: impl Into<String>, data: T) -> Self {
        ApiResponse {
            message: message.into(),
            status: status.as_u16(),
            data: Some(data),
        }
    }

    pub fn message(status: StatusCode, message: impl Into<String>) -> Self {
        ApiResponse {
            message: message.into(),
            status: status.as_u16(),
            data: None,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

// Newtype wrapper for UserHubError to implement IntoResponse
pub struct ApiError(pub UserHubError);

impl From<UserHubError> for ApiError {
    fn from(err: UserHubError) -> Self {
        ApiError(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            UserHubError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            UserHubError::MalformedInput(_) => StatusCode::BAD_REQUEST,
            UserHubError::UserNotFound(_) => StatusCode::NOT_FOUND,
            UserHubError::InvalidUpload(_) => StatusCode::BAD_REQUEST,
            UserHubError::UploadFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
            UserHubError::SnapshotError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        ApiResponse::<()>::message(status, self.0.to_string()).into_response()
    }
}
