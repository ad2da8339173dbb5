use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::api::{ApiBody, ApiCall, Session, Transport};
use crate::domain::{Acknowledgement, AuthResponse, PasswordReset, SignInRequest, SignUpRequest, User, UserPatch};
use crate::error::{AccountError, ApiError};

/// Sign-in, sign-up, password recovery and the signed-in user's profile.
#[derive(Clone)]
pub struct AccountClient {
    transport: Arc<dyn Transport>,
}

fn acknowledgement(body: ApiBody) -> Acknowledgement {
    Acknowledgement { message: body.message() }
}

impl AccountClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn sign_up(&self, request: SignUpRequest) -> Result<Acknowledgement, AccountError> {
        if request.username.trim().is_empty() || request.password.is_empty() {
            return Err(AccountError::ValidationError("username and password are required".to_string()));
        }
        if !request.email.contains('@') {
            return Err(AccountError::ValidationError(format!("invalid email: {}", request.email)));
        }
        let call = ApiCall::post(["api", "auth", "signup"]).anonymous().json(&request)?;
        let body = self.transport.execute(call).await?;
        info!("Account created");
        Ok(acknowledgement(body))
    }

    /// Exchanges credentials for a [`Session`].
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn sign_in(&self, request: SignInRequest) -> Result<Session, AccountError> {
        let call = ApiCall::post(["api", "auth", "signin"]).anonymous().json(&request)?;
        let auth: AuthResponse = self.transport.execute(call).await?.json()?;
        if auth.token.trim().is_empty() {
            return Err(ApiError::Decode("sign-in response carried no token".to_string()).into());
        }
        info!(user_id = %auth.id, "Signed in");
        Ok(Session::from(auth))
    }

    #[instrument(skip(self))]
    pub async fn sign_out(&self) -> Result<(), AccountError> {
        self.transport.execute(ApiCall::post(["api", "users", "signout"])).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn forgot_password(&self, email: String) -> Result<Acknowledgement, AccountError> {
        debug!("Sending request");
        let call = ApiCall::post(["api", "auth", "forgot-password"]).anonymous().query("email", email);
        Ok(acknowledgement(self.transport.execute(call).await?))
    }

    #[instrument(skip(self, reset))]
    pub async fn reset_password(&self, reset: PasswordReset) -> Result<Acknowledgement, AccountError> {
        if reset.new_password.is_empty() {
            return Err(AccountError::ValidationError("new password is required".to_string()));
        }
        let call = ApiCall::post(["api", "auth", "reset-password"]).anonymous().json(&reset)?;
        Ok(acknowledgement(self.transport.execute(call).await?))
    }

    /// Whether a password-reset token is still usable.
    #[instrument(skip(self, token))]
    pub async fn validate_reset_token(&self, token: String) -> Result<bool, AccountError> {
        let call = ApiCall::get(["api", "auth", "password", "validate"]).anonymous().query("token", token);
        match self.transport.execute(call).await {
            Ok(_) => Ok(true),
            Err(ApiError::BadRequest(message) | ApiError::NotFound(message) | ApiError::Unauthorized(message)) => {
                warn!(reason = %message, "Reset token rejected");
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self))]
    pub async fn profile(&self) -> Result<User, AccountError> {
        debug!("Sending request");
        Ok(self.transport.execute(ApiCall::get(["api", "users", "profile"])).await?.json()?)
    }

    #[instrument(skip(self, patch))]
    pub async fn update_profile(&self, patch: UserPatch) -> Result<User, AccountError> {
        debug!("Sending request");
        let call = ApiCall::put(["api", "users", "profile"]).json(&patch)?;
        Ok(self.transport.execute(call).await?.json()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Method;
    use crate::mock_framework::StubTransport;
    use serde_json::json;

    #[tokio::test]
    async fn test_sign_in_builds_session() {
        let transport = Arc::new(StubTransport::new());
        transport.push_json(json!({"token": "jwt-1", "id": "u-1", "username": "ama", "roles": ["ROLE_ADMIN"]}));
        let client = AccountClient::new(transport.clone());

        let session = client
            .sign_in(SignInRequest { username: "ama".into(), password: "pw".into() })
            .await
            .unwrap();

        assert!(session.is_admin());
        assert_eq!(session.token.expose_secret(), "jwt-1");
        let call = &transport.calls()[0];
        assert_eq!(call.path(), "/api/auth/signin");
        assert!(!call.authenticated);
    }

    #[tokio::test]
    async fn test_bad_credentials_surface_server_message() {
        let transport = Arc::new(StubTransport::new());
        transport.push_error(ApiError::Unauthorized("Bad credentials".into()));
        let client = AccountClient::new(transport);

        let err = client
            .sign_in(SignInRequest { username: "ama".into(), password: "nope".into() })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Bad credentials");
    }

    #[tokio::test]
    async fn test_rejected_token_is_invalid() {
        let transport = Arc::new(StubTransport::new());
        transport.push_error(ApiError::BadRequest("Token expired".into()));
        transport.push_empty();
        let client = AccountClient::new(transport.clone());

        assert!(!client.validate_reset_token("old".into()).await.unwrap());
        assert!(client.validate_reset_token("fresh".into()).await.unwrap());
        assert_eq!(transport.calls()[1].query_value("token"), Some("fresh"));
    }

    #[tokio::test]
    async fn test_forgot_password_uses_query() {
        let transport = Arc::new(StubTransport::new());
        transport.push_text("Reset link sent");
        let client = AccountClient::new(transport.clone());

        let ack = client.forgot_password("a@b.c".into()).await.unwrap();
        assert_eq!(ack.message.as_deref(), Some("Reset link sent"));
        let call = &transport.calls()[0];
        assert_eq!(call.method, Method::Post);
        assert_eq!(call.query_value("email"), Some("a@b.c"));
    }
}
