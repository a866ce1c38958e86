use async_trait::async_trait;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::domain::auth::AuthenticatedUser;
use crate::domain::category::{Category, CategoryDraft};
use crate::domain::types::{AuthToken, CategoryId, EmailAddress, OtpCode, TypeConstraintError};
use crate::models::envelope::{ApiEnvelope, EnvelopeError};

pub mod auth;
pub mod category;

/// Errors surfaced by the remote-API boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// The transport failed before an HTTP response arrived.
    #[error("network unavailable: {0}")]
    Network(String),
    /// The server answered with a non-2xx status or a rejecting envelope.
    #[error("{message}")]
    Api {
        /// HTTP status, when the failure came from a status line rather
        /// than a 200-with-rejecting-envelope.
        status: Option<u16>,
        message: String,
    },
    /// The body could not be interpreted; carries the raw text.
    #[error("malformed response body: {0}")]
    Payload(String),
    /// A wire record violated a domain constraint.
    #[error("invalid record from server: {0}")]
    Validation(String),
}

impl From<reqwest::Error> for RepositoryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Payload(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<TypeConstraintError> for RepositoryError {
    fn from(err: TypeConstraintError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<EnvelopeError> for RepositoryError {
    fn from(err: EnvelopeError) -> Self {
        match err {
            EnvelopeError::Rejected(message) => Self::Api {
                status: None,
                message,
            },
            EnvelopeError::MissingData => Self::Payload(err.to_string()),
        }
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Read-only category operations against the remote API.
#[async_trait]
pub trait CategoryReader {
    /// Fetch the full flat category collection.
    async fn list_categories(&self, token: &AuthToken) -> RepositoryResult<Vec<Category>>;
    /// Fetch parent-variant categories only.
    async fn list_parent_categories(&self, token: &AuthToken) -> RepositoryResult<Vec<Category>>;
    /// Fetch the sub-categories attached to one parent.
    async fn list_sub_categories(
        &self,
        token: &AuthToken,
        parent_id: CategoryId,
    ) -> RepositoryResult<Vec<Category>>;
}

/// Mutating category operations against the remote API.
#[async_trait]
pub trait CategoryWriter {
    /// Create or update a category; returns the persisted record.
    async fn create_update_category(
        &self,
        token: &AuthToken,
        draft: &CategoryDraft,
    ) -> RepositoryResult<Category>;
    /// Soft-delete a category, or detach it from one parent when
    /// `parent_id` is given. Detaching the last parent link may leave the
    /// record detached rather than removed; the server decides.
    async fn delete_category(
        &self,
        token: &AuthToken,
        id: CategoryId,
        parent_id: Option<CategoryId>,
    ) -> RepositoryResult<()>;
}

/// Authentication operations against the remote API.
#[async_trait]
pub trait AuthApi {
    async fn login(
        &self,
        email: &EmailAddress,
        password: &str,
    ) -> RepositoryResult<AuthenticatedUser>;
    async fn request_otp(&self, email: &EmailAddress) -> RepositoryResult<()>;
    async fn verify_otp(
        &self,
        email: &EmailAddress,
        otp: &OtpCode,
    ) -> RepositoryResult<AuthenticatedUser>;
    async fn forgot_password(&self, email: &EmailAddress) -> RepositoryResult<()>;
}

/// Repository implementation backed by the remote grocery REST API.
///
/// The underlying `reqwest::Client` pools connections and is cheap to
/// clone, allowing the repository to be passed around freely between
/// handlers.
#[derive(Clone)]
pub struct RestRepository {
    client: reqwest::Client,
    api_url: String,
}

impl RestRepository {
    /// Create a repository for the API at `api_url` (no trailing slash).
    pub fn new(api_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), api_url)
    }

    /// Create a repository reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, api_url: impl Into<String>) -> Self {
        Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub(crate) fn client(&self) -> &reqwest::Client {
        &self.client
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    /// Read a response into an envelope, translating non-2xx statuses and
    /// non-JSON bodies into the repository error taxonomy.
    pub(crate) async fn read_envelope<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> RepositoryResult<ApiEnvelope<T>> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RepositoryError::Network(e.to_string()))?;

        if !status.is_success() {
            // Error bodies sometimes still carry an envelope with a usable
            // message; fall back to the raw text, then to the status line.
            let message = serde_json::from_str::<ApiEnvelope<serde_json::Value>>(&body)
                .ok()
                .and_then(|envelope| envelope.into_result().err())
                .map(|e| e.to_string())
                .unwrap_or_else(|| {
                    let trimmed = body.trim();
                    if trimmed.is_empty() {
                        format!("server error (HTTP {})", status.as_u16())
                    } else {
                        snippet(trimmed)
                    }
                });
            return Err(RepositoryError::Api {
                status: Some(status.as_u16()),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|_| RepositoryError::Payload(snippet(&body)))
    }
}

const SNIPPET_LIMIT: usize = 200;

fn snippet(body: &str) -> String {
    if body.chars().count() <= SNIPPET_LIMIT {
        body.to_string()
    } else {
        let mut cut: String = body.chars().take(SNIPPET_LIMIT).collect();
        cut.push('…');
        cut
    }
}
