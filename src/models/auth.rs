//! Wire representations for the authentication endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::auth::AuthenticatedUser;
use crate::domain::types::{AuthToken, EmailAddress, TypeConstraintError};

/// Body for `POST /auth/login`.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub identifier: &'a str,
    pub password: &'a str,
}

/// Body for `POST /auth/request-otp` and `POST /auth/forgot-password`.
#[derive(Debug, Serialize)]
pub struct EmailRequest<'a> {
    pub email: &'a str,
}

/// Body for `POST /auth/verify-otp`.
#[derive(Debug, Serialize)]
pub struct VerifyOtpRequest<'a> {
    pub email: &'a str,
    pub otp: &'a str,
}

/// Token payload returned by `login` and `verify-otp`.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthPayload {
    #[serde(alias = "accessToken")]
    pub token: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl AuthPayload {
    /// Builds the session user, preferring the server-reported email and
    /// falling back to the one the user typed.
    pub fn into_user(
        self,
        fallback_email: &EmailAddress,
    ) -> Result<AuthenticatedUser, TypeConstraintError> {
        let email = match self.email {
            Some(email) => EmailAddress::new(email)?,
            None => fallback_email.clone(),
        };
        Ok(AuthenticatedUser::new(email, AuthToken::new(self.token)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_both_token_spellings() {
        let a: AuthPayload = serde_json::from_str(r#"{"token":"abc"}"#).unwrap();
        let b: AuthPayload = serde_json::from_str(r#"{"accessToken":"abc"}"#).unwrap();
        assert_eq!(a.token, b.token);
    }

    #[test]
    fn falls_back_to_the_typed_email() {
        let payload: AuthPayload = serde_json::from_str(r#"{"token":"abc"}"#).unwrap();
        let typed = EmailAddress::new("admin@example.com").unwrap();
        let user = payload.into_user(&typed).unwrap();
        assert_eq!(user.email, typed);
    }

    #[test]
    fn rejects_an_empty_token() {
        let payload: AuthPayload = serde_json::from_str(r#"{"token":"  "}"#).unwrap();
        let typed = EmailAddress::new("admin@example.com").unwrap();
        assert!(payload.into_user(&typed).is_err());
    }
}
