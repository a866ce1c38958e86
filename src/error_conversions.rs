//! Error conversion glue between the layer-specific error types.
//!
//! The domain and repository layers must not depend on service error types;
//! the translations live here instead.

use crate::domain::types::TypeConstraintError;
use crate::forms::auth::{
    ForgotPasswordFormError, LoginFormError, RequestOtpFormError, VerifyOtpFormError,
};
use crate::forms::categories::{DeleteCategoryFormError, SaveCategoryFormError};
use crate::repository::RepositoryError;
use crate::services::ServiceError;

impl From<RepositoryError> for ServiceError {
    fn from(val: RepositoryError) -> Self {
        match val {
            RepositoryError::Network(_) => ServiceError::Network,
            RepositoryError::Api {
                status: Some(401) | Some(403),
                ..
            } => ServiceError::Unauthorized,
            RepositoryError::Api {
                status: Some(404), ..
            } => ServiceError::NotFound,
            RepositoryError::Api { message, .. } => ServiceError::Remote(message),
            RepositoryError::Payload(_) | RepositoryError::Validation(_) => ServiceError::Internal,
        }
    }
}

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<SaveCategoryFormError> for ServiceError {
    fn from(val: SaveCategoryFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<DeleteCategoryFormError> for ServiceError {
    fn from(val: DeleteCategoryFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<LoginFormError> for ServiceError {
    fn from(val: LoginFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<RequestOtpFormError> for ServiceError {
    fn from(val: RequestOtpFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<VerifyOtpFormError> for ServiceError {
    fn from(val: VerifyOtpFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<ForgotPasswordFormError> for ServiceError {
    fn from(val: ForgotPasswordFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repository_statuses_map_to_service_variants() {
        let unauthorized = RepositoryError::Api {
            status: Some(401),
            message: "token expired".to_string(),
        };
        assert_eq!(ServiceError::from(unauthorized), ServiceError::Unauthorized);

        let missing = RepositoryError::Api {
            status: Some(404),
            message: "no such category".to_string(),
        };
        assert_eq!(ServiceError::from(missing), ServiceError::NotFound);

        let rejected = RepositoryError::Api {
            status: None,
            message: "name already taken".to_string(),
        };
        assert_eq!(
            ServiceError::from(rejected),
            ServiceError::Remote("name already taken".to_string())
        );

        let offline = RepositoryError::Network("connection refused".to_string());
        assert_eq!(ServiceError::from(offline), ServiceError::Network);
    }
}
