//! Response envelopes of the remote grocery API.
//!
//! The upstream service is inconsistent: some endpoints answer with
//! `{ errorCode, errorMessage, data }`, others with
//! `{ success, message, data? }`. Both shapes are accepted here and
//! normalised into one result, so nothing past this module ever sees an
//! envelope.

use serde::Deserialize;
use thiserror::Error;

/// Shown when the server rejected a request without a usable message.
pub const GENERIC_REMOTE_ERROR: &str = "The request was rejected by the server.";

/// Outcome extracted from a response envelope.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EnvelopeError {
    /// The envelope reported a failure; carries the server message or a
    /// generic fallback.
    #[error("{0}")]
    Rejected(String),
    /// The envelope reported success but carried no `data` field.
    #[error("response envelope carried no data")]
    MissingData,
}

/// Either of the two envelope shapes used by the remote API.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ApiEnvelope<T> {
    Coded {
        #[serde(rename = "errorCode")]
        error_code: i64,
        #[serde(rename = "errorMessage", default)]
        error_message: Option<String>,
        #[serde(default = "Option::default")]
        data: Option<T>,
    },
    Flagged {
        success: bool,
        #[serde(default)]
        message: Option<String>,
        #[serde(default = "Option::default")]
        data: Option<T>,
    },
}

fn server_message(message: Option<String>) -> String {
    message
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| GENERIC_REMOTE_ERROR.to_string())
}

impl<T> ApiEnvelope<T> {
    /// Normalises either shape into success-with-optional-data or a
    /// rejection carrying the server message.
    pub fn into_result(self) -> Result<Option<T>, EnvelopeError> {
        match self {
            Self::Coded {
                error_code: 0,
                data,
                ..
            } => Ok(data),
            Self::Coded { error_message, .. } => {
                Err(EnvelopeError::Rejected(server_message(error_message)))
            }
            Self::Flagged {
                success: true,
                data,
                ..
            } => Ok(data),
            Self::Flagged { message, .. } => {
                Err(EnvelopeError::Rejected(server_message(message)))
            }
        }
    }

    /// Success payload for endpoints that must return data.
    pub fn into_data(self) -> Result<T, EnvelopeError> {
        self.into_result()?.ok_or(EnvelopeError::MissingData)
    }

    /// Success acknowledgement for endpoints whose payload is irrelevant.
    pub fn into_ack(self) -> Result<(), EnvelopeError> {
        self.into_result().map(|_| ())
    }
}
