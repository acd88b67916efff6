use crate::{
    api::{
        middleware::log_request,
        models::{ApiError, ApiResponse, UserPayload},
        openapi::{MessageEnvelope, UploadForm, UserEnvelope, UserListEnvelope},
    },
    core::{errors::UserHubError, models::user::User, services::UserService},
};
use axum::{
    Form, Router,
    body::Bytes,
    extract::{
        DefaultBodyLimit, Multipart, Path, State,
        multipart::MultipartRejection,
        rejection::{BytesRejection, FormRejection},
    },
    http::StatusCode,
    middleware,
    routing::{get, post, put},
};
use std::sync::Arc;

// Room for multipart boundaries and part headers on top of the file size limit.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

// Define API routes
pub fn api_routes(service: Arc<UserService>) -> Router {
    let upload_body_limit = service.max_upload_bytes().saturating_add(MULTIPART_OVERHEAD_BYTES);

    Router::new()
        .route(
            "/users",
            get(list_users).post(create_user).fallback(method_not_allowed),
        )
        .route(
            "/users/{id}",
            put(update_user).delete(delete_user).fallback(method_not_allowed),
        )
        .route("/form", post(submit_form).fallback(method_not_allowed))
        .route(
            "/upload",
            post(upload_file)
                .fallback(method_not_allowed)
                .layer(DefaultBodyLimit::max(upload_body_limit)),
        )
        .layer(middleware::from_fn(log_request))
        .with_state(service)
}

async fn method_not_allowed() -> ApiError {
    ApiError(UserHubError::MethodNotAllowed)
}

// Decoded by hand so every failure is a 400 carrying the decoder message, whatever the content type.
fn decode_user_payload(body: Result<Bytes, BytesRejection>) -> Result<UserPayload, ApiError> {
    let body = body.map_err(|e| UserHubError::MalformedInput(e.body_text()))?;
    serde_json::from_slice(&body).map_err(|e| UserHubError::MalformedInput(e.to_string()).into())
}

#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "Users retrieved successfully", body = UserListEnvelope),
        (status = 405, description = "Method not allowed", body = MessageEnvelope)
    )
)]
pub async fn list_users(State(service): State<Arc<UserService>>) -> Result<ApiResponse<Vec<User>>, ApiError> {
    let users = service.list_users().await?;
    Ok(ApiResponse::with_data(
        StatusCode::OK,
        "Users retrieved successfully",
        users,
    ))
}

#[utoipa::path(
    post,
    path = "/users",
    request_body = UserPayload,
    responses(
        (status = 201, description = "User created successfully", body = UserEnvelope),
        (status = 400, description = "Malformed or oversized JSON body", body = MessageEnvelope),
        (status = 405, description = "Method not allowed", body = MessageEnvelope)
    )
)]
pub async fn create_user(
    State(service): State<Arc<UserService>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<ApiResponse<User>, ApiError> {
    let req = decode_user_payload(body)?;
    let user = service.create_user(req.name, req.email).await?;
    Ok(ApiResponse::with_data(
        StatusCode::CREATED,
        "User created successfully",
        user,
    ))
}

#[utoipa::path(
    put,
    path = "/users/{id}",
    params(
        ("id" = i64, Path, description = "ID of the user to update")
    ),
    request_body = UserPayload,
    responses(
        (status = 200, description = "User updated successfully", body = UserEnvelope),
        (status = 400, description = "Malformed or oversized JSON body", body = MessageEnvelope),
        (status = 404, description = "User not found", body = MessageEnvelope),
        (status = 405, description = "Method not allowed", body = MessageEnvelope)
    )
)]
pub async fn update_user(
    State(service): State<Arc<UserService>>,
    Path(user_id): Path<String>,
    body: Result<Bytes, BytesRejection>,
) -> Result<ApiResponse<User>, ApiError> {
    let req = decode_user_payload(body)?;
    let user = service.update_user(&user_id, req.name, req.email).await?;
    Ok(ApiResponse::with_data(
        StatusCode::OK,
        "User updated successfully",
        user,
    ))
}

#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(
        ("id" = i64, Path, description = "ID of the user to delete")
    ),
    responses(
        (status = 200, description = "User deleted successfully", body = MessageEnvelope),
        (status = 404, description = "User not found", body = MessageEnvelope),
        (status = 405, description = "Method not allowed", body = MessageEnvelope)
    )
)]
pub async fn delete_user(
    State(service): State<Arc<UserService>>,
    Path(user_id): Path<String>,
) -> Result<ApiResponse<()>, ApiError> {
    service.delete_user(&user_id).await?;
    Ok(ApiResponse::message(StatusCode::OK, "User deleted successfully"))
}

/// Same as creating through `POST /users` but answers 200 rather than 201.
#[utoipa::path(
    post,
    path = "/form",
    request_body(content = UserPayload, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Form data processed successfully", body = UserEnvelope),
        (status = 400, description = "Malformed form body", body = MessageEnvelope),
        (status = 405, description = "Method not allowed", body = MessageEnvelope)
    )
)]
pub async fn submit_form(
    State(service): State<Arc<UserService>>,
    form: Result<Form<UserPayload>, FormRejection>,
) -> Result<ApiResponse<User>, ApiError> {
    let Form(req) = form.map_err(|e| UserHubError::MalformedInput(e.body_text()))?;
    let user = service.submit_form(req.name, req.email).await?;
    Ok(ApiResponse::with_data(
        StatusCode::OK,
        "Form data processed successfully",
        user,
    ))
}

#[utoipa::path(
    post,
    path = "/upload",
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "File uploaded successfully", body = MessageEnvelope),
        (status = 400, description = "Missing or invalid file part", body = MessageEnvelope),
        (status = 405, description = "Method not allowed", body = MessageEnvelope),
        (status = 500, description = "File could not be written", body = MessageEnvelope)
    )
)]
pub async fn upload_file(
    State(service): State<Arc<UserService>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<ApiResponse<()>, ApiError> {
    let mut multipart = multipart.map_err(|e| UserHubError::InvalidUpload(e.body_text()))?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| UserHubError::InvalidUpload(e.body_text()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| UserHubError::InvalidUpload("file part has no file name".to_string()))?;
        let bytes = field
            .bytes()
            .await
            .map_err(|e| UserHubError::InvalidUpload(e.body_text()))?;

        let stored = service.store_upload(&file_name, &bytes).await?;
        return Ok(ApiResponse::message(
            StatusCode::OK,
            format!("File {} uploaded successfully", stored),
        ));
    }

    Err(UserHubError::InvalidUpload("no file part named `file`".to_string()).into())
}
