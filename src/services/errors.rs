use thiserror::Error;

/// Generic error type used by service layer functions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The session token is missing or was rejected by the remote API.
    #[error("unauthorized")]
    Unauthorized,
    /// Requested resource was not found.
    #[error("not found")]
    NotFound,
    /// Submitted data failed validation; no request was issued.
    #[error("{0}")]
    Form(String),
    /// The remote API could not be reached.
    #[error("network unavailable")]
    Network,
    /// The remote API rejected the operation; the message is surfaced
    /// verbatim.
    #[error("{0}")]
    Remote(String),
    /// An unexpected internal error occurred.
    #[error("internal error")]
    Internal,
}

/// Convenient alias for results returned from service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;
