use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;

/// Kind of account. Stored and returned, never enforced.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    ToSchema,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum UserType {
    AdminStaff,
    Organization,
    #[default]
    Jobseeker,
}

/// Stored user record. Owned by the store; callers only ever see clones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Store-assigned identifier, never reused
    pub id: i64,
    /// Display name (trimmed, non-empty)
    pub name: String,
    /// Normalized email (trimmed, lower-cased, unique)
    pub email: String,
    pub user_type: UserType,
    /// Argon2 PHC string
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Refresh `updated_at`, never letting it move backwards.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now().max(self.updated_at);
    }
}

/// A validated, hashed record that has not been given an identifier yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub user_type: UserType,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl NewUser {
    pub fn into_user(self, id: i64) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
            user_type: self.user_type,
            password_hash: self.password_hash,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}

/// Caller-facing user representation. Carries no password material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "John Doe")]
    pub name: String,
    #[schema(example = "john@example.com")]
    pub email: String,
    #[serde(rename = "type")]
    pub user_type: UserType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            user_type: user.user_type,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Payload for creating a user.
///
/// Missing or null fields deserialize as `None` so that the service reports
/// them with its own validation codes. `type` is kept raw and parsed by the
/// service; blank means the default.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateUser {
    #[serde(default)]
    #[schema(example = "John Doe")]
    pub name: Option<String>,
    #[serde(default)]
    #[schema(example = "john@example.com")]
    pub email: Option<String>,
    #[serde(default, rename = "type")]
    #[schema(value_type = Option<UserType>, example = "jobseeker")]
    pub user_type: Option<String>,
    #[serde(default)]
    #[schema(example = "securepassword123")]
    pub password: Option<String>,
}

/// Payload for a partial update.
///
/// An absent field and an empty (or whitespace-only) field both mean
/// "leave unchanged"; there is no way to clear a field.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateUser {
    #[schema(example = "Jane Doe")]
    pub name: Option<String>,
    #[schema(example = "jane@example.com")]
    pub email: Option<String>,
    #[serde(default, rename = "type")]
    #[schema(value_type = Option<UserType>, example = "organization")]
    pub user_type: Option<String>,
    pub password: Option<String>,
}

/// Validated field changes, merged into the stored record under the store's
/// write lock.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub name: Option<String>,
    /// Already normalized
    pub email: Option<String>,
    pub user_type: Option<UserType>,
    pub password_hash: Option<String>,
}

impl UserChanges {
    /// Overwrite the present fields and refresh `updated_at`.
    pub fn apply_to(self, user: &mut User) {
        if let Some(name) = self.name {
            user.name = name;
        }
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(user_type) = self.user_type {
            user.user_type = user_type;
        }
        if let Some(password_hash) = self.password_hash {
            user.password_hash = password_hash;
        }
        user.touch();
    }
}

/// Trim and lower-case an email for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
