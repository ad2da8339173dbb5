use tracing::{debug, instrument};

use crate::actor_framework::ResourceClient;
use crate::domain::{User, UserCreate, UserPatch};
use crate::error::UserError;
use crate::resources::UserQuery;

/// Client for the admin user endpoints.
#[derive(Clone)]
pub struct UserClient {
    inner: ResourceClient<User>,
}

impl_client_new!(UserClient, User);

impl UserClient {
    #[instrument(skip(self))]
    pub async fn list_users(&self) -> Result<Vec<User>, UserError> {
        debug!("Sending request");
        Ok(self.inner.list(UserQuery::All).await?)
    }

    #[instrument(skip(self))]
    pub async fn users_by_role(&self, role: String) -> Result<Vec<User>, UserError> {
        debug!("Sending request");
        Ok(self.inner.list(UserQuery::ByRole(role)).await?)
    }

    #[instrument(skip(self, user), fields(username = %user.username))]
    pub async fn create_user(&self, user: UserCreate) -> Result<User, UserError> {
        if user.username.trim().is_empty() {
            return Err(UserError::ValidationError("username is required".to_string()));
        }
        if !user.email.contains('@') {
            return Err(UserError::ValidationError(format!("invalid email: {}", user.email)));
        }
        debug!("Sending request");
        Ok(self.inner.create(user).await?)
    }

    #[instrument(skip(self))]
    pub async fn update_user(&self, id: String, patch: UserPatch) -> Result<User, UserError> {
        debug!("Sending request");
        Ok(self.inner.update(id, patch).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_framework::{create_mock_client, expect_create, expect_update};

    fn new_user(email: &str) -> UserCreate {
        UserCreate {
            username: "ama".into(),
            email: email.into(),
            password: "secret".into(),
            first_name: None,
            last_name: None,
            phone_number: None,
            roles: vec!["ROLE_USER".into()],
        }
    }

    #[tokio::test]
    async fn test_create_user() {
        let (inner, mut receiver) = create_mock_client::<User>(4);
        let client = UserClient::new(inner);

        let task = tokio::spawn(async move { client.create_user(new_user("ama@example.com")).await });

        let (params, responder) = expect_create(&mut receiver).await.expect("Expected Create");
        assert_eq!(params.username, "ama");
        responder.send(Ok(User::new("u-7", "ama"))).unwrap();

        assert_eq!(task.await.unwrap().unwrap().id, "u-7");
    }

    #[tokio::test]
    async fn test_invalid_email_not_sent() {
        let (inner, mut receiver) = create_mock_client::<User>(4);
        let client = UserClient::new(inner);

        let result = client.create_user(new_user("not-an-email")).await;
        assert!(matches!(result, Err(UserError::ValidationError(_))));
        drop(client);
        assert!(receiver.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_disable_user() {
        let (inner, mut receiver) = create_mock_client::<User>(4);
        let client = UserClient::new(inner);

        let task = tokio::spawn(async move {
            let patch = UserPatch { enabled: Some(false), ..Default::default() };
            client.update_user("u-1".into(), patch).await
        });

        let (id, patch, responder) = expect_update(&mut receiver).await.expect("Expected Update");
        assert_eq!(id, "u-1");
        assert_eq!(patch.enabled, Some(false));
        let mut user = User::new("u-1", "ama");
        user.enabled = false;
        responder.send(Ok(user)).unwrap();

        assert!(!task.await.unwrap().unwrap().enabled);
    }
}
