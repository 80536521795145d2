use serde::{Deserialize, Serialize};

/// Id carried by a user that has not been stored yet.
pub const UNSAVED_USER_ID: i64 = -1;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UserRole {
    #[default]
    Standard,
    Admin,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default = "unsaved_user_id")]
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default)]
    pub password_hash: String,
}

fn unsaved_user_id() -> i64 {
    UNSAVED_USER_ID
}

impl User {
    /// Builds an unsaved user, filling omitted fields with defaults.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        role: Option<UserRole>,
        password_hash: Option<String>,
    ) -> Self {
        Self {
            id: UNSAVED_USER_ID,
            name: name.into(),
            email: email.into(),
            role: role.unwrap_or_default(),
            password_hash: password_hash.unwrap_or_default(),
        }
    }
}

impl Default for User {
    fn default() -> Self {
        Self::new("", "", None, None)
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}
