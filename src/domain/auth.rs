use serde::{Deserialize, Serialize};

use crate::domain::types::{AuthToken, EmailAddress};

/// Authenticated dashboard user, as issued by the remote authentication
/// service and persisted client-side in the cookie session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub email: EmailAddress,
    pub token: AuthToken,
}

impl AuthenticatedUser {
    pub fn new(email: EmailAddress, token: AuthToken) -> Self {
        Self { email, token }
    }
}
