//! The session log API boundary. The view-model only ever talks to a
//! [`SessionApi`]; [`HttpSessionApi`] is the implementation used at runtime.

pub mod http;

#[cfg(test)]
pub(crate) mod fake;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{ListQuery, SessionPage, SessionPayload};

pub use http::HttpSessionApi;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("HTTP {status}")]
    Status { status: u16 },
    #[error("request failed: {0}")]
    Transport(String),
    #[error("malformed response: {0}")]
    Decode(String),
}

impl ApiError {
    /// HTTP status of the failed request, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status } => Some(*status),
            ApiError::Transport(_) | ApiError::Decode(_) => None,
        }
    }
}

#[async_trait]
pub trait SessionApi: Send + Sync {
    async fn list_sessions(&self, query: &ListQuery) -> ApiResult<SessionPage>;

    /// Any 2xx counts as success; the response body is not inspected.
    async fn create_session(&self, payload: &SessionPayload) -> ApiResult<()>;

    async fn update_session(&self, id: i64, payload: &SessionPayload) -> ApiResult<()>;

    async fn delete_session(&self, id: i64) -> ApiResult<()>;
}
