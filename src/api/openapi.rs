use utoipa::{OpenApi, ToSchema};

use crate::{api::models::UserPayload, core::models::user::User};

// Schemas below describe the response envelope for each payload shape.

#[derive(ToSchema)]
pub struct UserEnvelope {
    pub message: String,
    pub status: u16,
    pub data: User,
}

#[derive(ToSchema)]
pub struct UserListEnvelope {
    pub message: String,
    pub status: u16,
    pub data: Vec<User>,
}

/// Envelope without a `data` member: errors, deletes and uploads.
#[derive(ToSchema)]
pub struct MessageEnvelope {
    pub message: String,
    pub status: u16,
}

#[derive(ToSchema)]
pub struct UploadForm {
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        super::handlers::list_users,
        super::handlers::create_user,
        super::handlers::update_user,
        super::handlers::delete_user,
        super::handlers::submit_form,
        super::handlers::upload_file
    ),
    components(schemas(
        User,
        UserPayload,
        UserEnvelope,
        UserListEnvelope,
        MessageEnvelope,
        UploadForm
    )),
    info(
        title = "Userhub API",
        description = "API for managing an in-memory user list",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;
