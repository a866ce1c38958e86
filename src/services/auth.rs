use crate::domain::auth::AuthenticatedUser;
use crate::forms::auth::{
    ForgotPasswordFormPayload, LoginFormPayload, RequestOtpFormPayload, VerifyOtpFormPayload,
};
use crate::repository::AuthApi;

use super::ServiceResult;

/// Exchanges credentials for an authenticated session.
pub async fn login<R>(payload: LoginFormPayload, repo: &R) -> ServiceResult<AuthenticatedUser>
where
    R: AuthApi,
{
    match repo.login(&payload.email, &payload.password).await {
        Ok(user) => Ok(user),
        Err(e) => {
            log::error!("Login failed for {}: {e}", payload.email);
            Err(e.into())
        }
    }
}

pub async fn request_otp<R>(payload: RequestOtpFormPayload, repo: &R) -> ServiceResult<()>
where
    R: AuthApi,
{
    match repo.request_otp(&payload.email).await {
        Ok(()) => Ok(()),
        Err(e) => {
            log::error!("OTP request failed for {}: {e}", payload.email);
            Err(e.into())
        }
    }
}

/// Exchanges a one-time code for an authenticated session.
pub async fn verify_otp<R>(
    payload: VerifyOtpFormPayload,
    repo: &R,
) -> ServiceResult<AuthenticatedUser>
where
    R: AuthApi,
{
    match repo.verify_otp(&payload.email, &payload.otp).await {
        Ok(user) => Ok(user),
        Err(e) => {
            log::error!("OTP verification failed for {}: {e}", payload.email);
            Err(e.into())
        }
    }
}

pub async fn forgot_password<R>(payload: ForgotPasswordFormPayload, repo: &R) -> ServiceResult<()>
where
    R: AuthApi,
{
    match repo.forgot_password(&payload.email).await {
        Ok(()) => Ok(()),
        Err(e) => {
            log::error!("Password reset request failed for {}: {e}", payload.email);
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{EmailAddress, OtpCode};
    use crate::repository::RepositoryError;
    use crate::repository::test::TestRepository;
    use crate::services::ServiceError;

    fn email() -> EmailAddress {
        EmailAddress::new("admin@example.com").unwrap()
    }

    #[tokio::test]
    async fn login_returns_a_session_token() {
        let repo = TestRepository::default();
        let payload = LoginFormPayload {
            email: email(),
            password: "hunter2".to_string(),
        };

        let user = login(payload, &repo).await.unwrap();
        assert_eq!(user.email, email());
        assert!(!user.token.as_str().is_empty());
    }

    #[tokio::test]
    async fn rejected_credentials_surface_as_unauthorized() {
        let repo = TestRepository::default().fail_with(RepositoryError::Api {
            status: Some(401),
            message: "bad credentials".to_string(),
        });
        let payload = LoginFormPayload {
            email: email(),
            password: "wrong".to_string(),
        };

        assert_eq!(
            login(payload, &repo).await.unwrap_err(),
            ServiceError::Unauthorized
        );
    }

    #[tokio::test]
    async fn otp_round_trip_authenticates() {
        let repo = TestRepository::default();
        request_otp(RequestOtpFormPayload { email: email() }, &repo)
            .await
            .unwrap();

        let payload = VerifyOtpFormPayload {
            email: email(),
            otp: OtpCode::new("123456").unwrap(),
        };
        let user = verify_otp(payload, &repo).await.unwrap();
        assert_eq!(user.email, email());
    }

    #[tokio::test]
    async fn wrong_otp_surfaces_the_server_message() {
        let repo = TestRepository::default();
        let payload = VerifyOtpFormPayload {
            email: email(),
            otp: OtpCode::new("999999").unwrap(),
        };

        assert_eq!(
            verify_otp(payload, &repo).await.unwrap_err(),
            ServiceError::Remote("invalid one-time code".to_string())
        );
    }
}
