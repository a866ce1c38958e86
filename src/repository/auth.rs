use async_trait::async_trait;

use crate::domain::auth::AuthenticatedUser;
use crate::domain::types::{EmailAddress, OtpCode};
use crate::models::auth::{AuthPayload, EmailRequest, LoginRequest, VerifyOtpRequest};
use crate::models::envelope::ApiEnvelope;
use crate::repository::{AuthApi, RepositoryResult, RestRepository};

impl RestRepository {
    async fn post_for_ack<B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> RepositoryResult<()> {
        let response = self
            .client()
            .post(self.endpoint(path))
            .json(body)
            .send()
            .await?;

        let envelope: ApiEnvelope<serde_json::Value> = Self::read_envelope(response).await?;
        Ok(envelope.into_ack()?)
    }

    async fn post_for_session<B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
        email: &EmailAddress,
    ) -> RepositoryResult<AuthenticatedUser> {
        let response = self
            .client()
            .post(self.endpoint(path))
            .json(body)
            .send()
            .await?;

        let envelope: ApiEnvelope<AuthPayload> = Self::read_envelope(response).await?;
        Ok(envelope.into_data()?.into_user(email)?)
    }
}

#[async_trait]
impl AuthApi for RestRepository {
    async fn login(
        &self,
        email: &EmailAddress,
        password: &str,
    ) -> RepositoryResult<AuthenticatedUser> {
        let body = LoginRequest {
            identifier: email.as_str(),
            password,
        };
        self.post_for_session("/auth/login", &body, email).await
    }

    async fn request_otp(&self, email: &EmailAddress) -> RepositoryResult<()> {
        let body = EmailRequest {
            email: email.as_str(),
        };
        self.post_for_ack("/auth/request-otp", &body).await
    }

    async fn verify_otp(
        &self,
        email: &EmailAddress,
        otp: &OtpCode,
    ) -> RepositoryResult<AuthenticatedUser> {
        let body = VerifyOtpRequest {
            email: email.as_str(),
            otp: otp.as_str(),
        };
        self.post_for_session("/auth/verify-otp", &body, email).await
    }

    async fn forgot_password(&self, email: &EmailAddress) -> RepositoryResult<()> {
        let body = EmailRequest {
            email: email.as_str(),
        };
        self.post_for_ack("/auth/forgot-password", &body).await
    }
}
