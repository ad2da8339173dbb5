//! Signed-in session handed explicitly to the clients that need it.

use std::fmt;
use zeroize::Zeroizing;

use crate::domain::AuthResponse;

/// Bearer token; zeroed on drop and never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(Zeroizing<String>);

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Zeroizing::new(token.into()))
    }

    /// The raw token. Only the transport should need this.
    pub fn expose_secret(&self) -> &str {
        &self.0
    }

    pub fn header_value(&self) -> String {
        format!("Bearer {}", self.expose_secret())
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BearerToken(***REDACTED***)")
    }
}

impl fmt::Display for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "***REDACTED***")
    }
}

/// Who is signed in and with which token.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: BearerToken,
    pub user_id: Option<String>,
    pub username: Option<String>,
    pub roles: Vec<String>,
}

impl Session {
    /// A session known only by its token (e.g. supplied on the command line).
    pub fn from_token(token: impl Into<String>) -> Self {
        Self {
            token: BearerToken::new(token),
            user_id: None,
            username: None,
            roles: Vec::new(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.roles.iter().any(|role| role == "ROLE_ADMIN")
    }
}

impl From<AuthResponse> for Session {
    fn from(auth: AuthResponse) -> Self {
        Self {
            token: BearerToken::new(auth.token),
            user_id: Some(auth.id),
            username: Some(auth.username),
            roles: auth.roles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_is_redacted() {
        let session = Session::from_token("secret-jwt");
        assert!(!format!("{:?}", session).contains("secret-jwt"));
        assert_eq!(session.token.to_string(), "***REDACTED***");
        assert_eq!(session.token.header_value(), "Bearer secret-jwt");
    }

    #[test]
    fn admin_role_detected() {
        let mut session = Session::from_token("t");
        assert!(!session.is_admin());
        session.roles.push("ROLE_ADMIN".into());
        assert!(session.is_admin());
    }
}
