//! HTTP client for the user API.
//!
//! Every call decodes the response envelope whatever the HTTP status, so callers see the server's
//! `message` for failures as well as successes.

use crate::api::models::{ApiResponse, UserPayload};
use crate::core::models::user::User;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid upload path: {0}")]
    InvalidPath(String),
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        ApiClient {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn envelope<T: DeserializeOwned>(response: reqwest::Response) -> Result<ApiResponse<T>, ClientError> {
        Ok(response.json::<ApiResponse<T>>().await?)
    }

    pub async fn list_users(&self) -> Result<ApiResponse<Vec<User>>, ClientError> {
        let response = self.http.get(self.url("/users")).send().await?;
        Self::envelope(response).await
    }

    pub async fn create_user(&self, name: &str, email: &str) -> Result<ApiResponse<User>, ClientError> {
        let payload = UserPayload {
            name: name.to_string(),
            email: email.to_string(),
        };
        let response = self.http.post(self.url("/users")).json(&payload).send().await?;
        Self::envelope(response).await
    }

    pub async fn update_user(&self, user_id: &str, name: &str, email: &str) -> Result<ApiResponse<User>, ClientError> {
        let payload = UserPayload {
            name: name.to_string(),
            email: email.to_string(),
        };
        let response = self
            .http
            .put(self.url(&format!("/users/{}", user_id)))
            .json(&payload)
            .send()
            .await?;
        Self::envelope(response).await
    }

    pub async fn delete_user(&self, user_id: &str) -> Result<ApiResponse<serde_json::Value>, ClientError> {
        let response = self
            .http
            .delete(self.url(&format!("/users/{}", user_id)))
            .send()
            .await?;
        Self::envelope(response).await
    }

    pub async fn submit_form(&self, name: &str, email: &str) -> Result<ApiResponse<User>, ClientError> {
        let response = self
            .http
            .post(self.url("/form"))
            .form(&[("name", name), ("email", email)])
            .send()
            .await?;
        Self::envelope(response).await
    }

    pub async fn upload_file(&self, path: &Path) -> Result<ApiResponse<serde_json::Value>, ClientError> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ClientError::InvalidPath(path.display().to_string()))?
            .to_string();
        let bytes = tokio::fs::read(path).await.map_err(|source| ClientError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let form = Form::new().part("file", Part::bytes(bytes).file_name(file_name));
        let response = self.http.post(self.url("/upload")).multipart(form).send().await?;
        Self::envelope(response).await
    }
}
