//! Reqwest-backed identity directory adapter.
//!
//! Owns transport details only: URL construction, timeout and HTTP error
//! mapping, and JSON decoding into [`DirectoryUser`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;

use crate::domain::ports::{UserDirectory, UserDirectoryError};
use crate::domain::{DirectoryUser, UserId};

const DEFAULT_USER_AGENT: &str = "coursebird-backend/0.1";

/// Wire shape of a directory user record.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DirectoryUserDto {
    id: String,
    full_name: String,
    email: Option<String>,
    avatar_url: Option<String>,
}

impl DirectoryUserDto {
    fn into_domain(self) -> Result<DirectoryUser, UserDirectoryError> {
        let id = UserId::new(&self.id)
            .map_err(|err| UserDirectoryError::malformed(format!("bad user id: {err}")))?;
        Ok(DirectoryUser {
            id,
            full_name: self.full_name,
            email: self.email,
            avatar_url: self.avatar_url,
        })
    }
}

/// Directory adapter performing GET requests against one base URL.
pub struct HttpUserDirectory {
    client: Client,
    base_url: Url,
}

impl HttpUserDirectory {
    /// Build an adapter using a reqwest client with an explicit request
    /// timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(DEFAULT_USER_AGENT)
            .build()?;
        Ok(Self { client, base_url })
    }

    fn user_url(&self, user_id: &UserId) -> Result<Url, UserDirectoryError> {
        self.base_url
            .join(&format!("users/{user_id}"))
            .map_err(|err| UserDirectoryError::malformed(format!("bad directory url: {err}")))
    }
}

#[async_trait]
impl UserDirectory for HttpUserDirectory {
    async fn find_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<DirectoryUser>, UserDirectoryError> {
        let url = self.user_url(user_id)?;
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        parse_user(body.as_ref()).map(Some)
    }
}

fn parse_user(body: &[u8]) -> Result<DirectoryUser, UserDirectoryError> {
    let decoded: DirectoryUserDto = serde_json::from_slice(body)
        .map_err(|err| UserDirectoryError::malformed(format!("invalid directory JSON: {err}")))?;
    decoded.into_domain()
}

fn map_transport_error(error: reqwest::Error) -> UserDirectoryError {
    UserDirectoryError::unavailable(error.to_string())
}

fn map_status_error(status: StatusCode, body: &[u8]) -> UserDirectoryError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), preview)
    };
    if status.is_client_error() {
        UserDirectoryError::malformed(message)
    } else {
        UserDirectoryError::unavailable(message)
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
