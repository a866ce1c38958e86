use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::types::{EmailAddress, OtpCode, TypeConstraintError};

#[derive(Deserialize, Validate)]
pub struct LoginForm {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoginFormPayload {
    pub email: EmailAddress,
    pub password: String,
}

#[derive(Debug, Error)]
pub enum LoginFormError {
    #[error("Login form validation failed: {0}")]
    Validation(String),
    #[error("Login form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for LoginFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for LoginFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<LoginForm> for LoginFormPayload {
    type Error = LoginFormError;

    fn try_from(value: LoginForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            email: EmailAddress::new(value.email)?,
            password: value.password,
        })
    }
}

#[derive(Deserialize, Validate)]
pub struct RequestOtpForm {
    #[validate(email)]
    pub email: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RequestOtpFormPayload {
    pub email: EmailAddress,
}

#[derive(Debug, Error)]
pub enum RequestOtpFormError {
    #[error("OTP request form validation failed: {0}")]
    Validation(String),
    #[error("OTP request form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for RequestOtpFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for RequestOtpFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<RequestOtpForm> for RequestOtpFormPayload {
    type Error = RequestOtpFormError;

    fn try_from(value: RequestOtpForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            email: EmailAddress::new(value.email)?,
        })
    }
}

#[derive(Deserialize, Validate)]
pub struct VerifyOtpForm {
    #[validate(email)]
    pub email: String,
    #[validate(length(equal = 6))]
    pub otp: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VerifyOtpFormPayload {
    pub email: EmailAddress,
    pub otp: OtpCode,
}

#[derive(Debug, Error)]
pub enum VerifyOtpFormError {
    #[error("OTP verification form validation failed: {0}")]
    Validation(String),
    #[error("OTP verification form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for VerifyOtpFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for VerifyOtpFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<VerifyOtpForm> for VerifyOtpFormPayload {
    type Error = VerifyOtpFormError;

    fn try_from(value: VerifyOtpForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            email: EmailAddress::new(value.email)?,
            otp: OtpCode::new(value.otp)?,
        })
    }
}

#[derive(Deserialize, Validate)]
pub struct ForgotPasswordForm {
    #[validate(email)]
    pub email: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForgotPasswordFormPayload {
    pub email: EmailAddress,
}

#[derive(Debug, Error)]
pub enum ForgotPasswordFormError {
    #[error("Password reset form validation failed: {0}")]
    Validation(String),
    #[error("Password reset form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for ForgotPasswordFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for ForgotPasswordFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<ForgotPasswordForm> for ForgotPasswordFormPayload {
    type Error = ForgotPasswordFormError;

    fn try_from(value: ForgotPasswordForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            email: EmailAddress::new(value.email)?,
        })
    }
}
