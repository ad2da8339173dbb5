use serde::{Deserialize, Serialize};

/// Represents a registered user account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub enabled: bool,
}

/// Payload for creating a user from the admin dashboard.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCreate {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    pub roles: Vec<String>,
}

/// Partial update; absent fields are left untouched by the backend.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

impl User {
    pub fn new(id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            email: None,
            first_name: None,
            last_name: None,
            phone_number: None,
            roles: Vec::new(),
            enabled: true,
        }
    }

    /// Role names without the `ROLE_` prefix (`ROLE_ADMIN` -> `ADMIN`).
    pub fn role_names(&self) -> impl Iterator<Item = &str> {
        self.roles
            .iter()
            .map(|role| role.strip_prefix("ROLE_").unwrap_or(role))
    }

    pub fn has_role(&self, role: &str) -> bool {
        let wanted = role.strip_prefix("ROLE_").unwrap_or(role);
        self.role_names().any(|name| name.eq_ignore_ascii_case(wanted))
    }

    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{} {}", first, last),
            (Some(first), None) => first.clone(),
            _ => self.username.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_prefix_is_ignored() {
        let mut user = User::new("1", "kamal");
        user.roles = vec!["ROLE_RESTAURANT_ADMIN".to_string()];
        assert!(user.has_role("RESTAURANT_ADMIN"));
        assert!(user.has_role("ROLE_RESTAURANT_ADMIN"));
        assert!(!user.has_role("ADMIN"));
    }

    #[test]
    fn patch_skips_absent_fields() {
        let patch = UserPatch { enabled: Some(false), ..Default::default() };
        assert_eq!(serde_json::to_string(&patch).unwrap(), r#"{"enabled":false}"#);
    }
}
