//! Port for the external identity directory.
//!
//! The directory resolves a user id to display fields (name, email, avatar).
//! It stands in for the hosted auth provider the original product used; the
//! backend only ever reads from it.

use async_trait::async_trait;

use crate::domain::{DirectoryUser, UserId};

/// Errors raised by directory adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserDirectoryError {
    /// The directory could not be reached.
    #[error("user directory unavailable: {message}")]
    Unavailable { message: String },
    /// The directory answered with a payload this backend cannot read.
    #[error("user directory returned a malformed response: {message}")]
    Malformed { message: String },
}

impl UserDirectoryError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }
}

/// Port for resolving user display fields.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Resolve a user id to display fields; `None` when unknown.
    async fn find_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<DirectoryUser>, UserDirectoryError>;
}

/// Fixture directory that mirrors the id back with placeholder fields.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserDirectory;

#[async_trait]
impl UserDirectory for FixtureUserDirectory {
    async fn find_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<DirectoryUser>, UserDirectoryError> {
        Ok(Some(DirectoryUser {
            id: user_id.clone(),
            full_name: "Ada Lovelace".to_owned(),
            email: Some("ada@example.net".to_owned()),
            avatar_url: None,
        }))
    }
}
