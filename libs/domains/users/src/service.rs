use chrono::Utc;
use std::sync::Arc;
use tracing::instrument;

use crate::error::{UserError, UserResult, ValidationCode};
use crate::models::{
    normalize_email, CreateUser, NewUser, UpdateUser, UserChanges, UserResponse, UserType,
};
use crate::pagination::{paginate, Page, PageParams};
use crate::password::PasswordHasher;
use crate::store::UserStore;

/// Validation, normalization and redaction in front of a [`UserStore`].
#[derive(Clone)]
pub struct UserService<S: UserStore> {
    store: Arc<S>,
    hasher: PasswordHasher,
}

/// A field counts as present only if it has non-whitespace content.
fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.trim().is_empty())
}

fn check_email_format(email: &str) -> UserResult<()> {
    if email.contains('@') {
        Ok(())
    } else {
        Err(UserError::Validation(ValidationCode::InvalidEmail))
    }
}

/// Blank means "not given"; anything else must name a known type.
fn parse_user_type(raw: &Option<String>) -> UserResult<Option<UserType>> {
    present(raw)
        .map(|value| {
            let value = value.trim();
            value
                .parse::<UserType>()
                .map_err(|_| UserError::MalformedPayload(format!("unknown user type '{}'", value)))
        })
        .transpose()
}

impl<S: UserStore> UserService<S> {
    pub fn new(store: S) -> Self {
        Self::with_hasher(store, PasswordHasher::default())
    }

    pub fn with_hasher(store: S, hasher: PasswordHasher) -> Self {
        Self {
            store: Arc::new(store),
            hasher,
        }
    }

    /// Validate, normalize, hash and store a new user.
    #[instrument(skip_all)]
    pub async fn create_user(&self, input: CreateUser) -> UserResult<UserResponse> {
        let name = input.name.unwrap_or_default();
        let email = input.email.unwrap_or_default();
        let password = input.password.unwrap_or_default();

        let name = name.trim();
        let email = email.trim();

        if name.is_empty() {
            return Err(UserError::Validation(ValidationCode::MissingName));
        }
        if email.is_empty() {
            return Err(UserError::Validation(ValidationCode::MissingEmail));
        }
        if password.trim().is_empty() {
            return Err(UserError::Validation(ValidationCode::MissingPassword));
        }

        let email = normalize_email(email);
        check_email_format(&email)?;
        let user_type = parse_user_type(&input.user_type)?.unwrap_or_default();

        // Fail fast before paying for a hash; insert_unique re-checks under the lock
        if self.store.get_by_email(&email).await.is_some() {
            tracing::warn!("Rejected duplicate email on create");
            return Err(UserError::DuplicateEmail(email));
        }

        let password_hash = self.hasher.hash_blocking(&password).await?;

        let created = self
            .store
            .insert_unique(NewUser {
                name: name.to_string(),
                email,
                user_type,
                password_hash,
                created_at: Utc::now(),
            })
            .await?;

        Ok(created.into())
    }

    /// Get a user by ID
    pub async fn get_user(&self, id: i64) -> UserResult<UserResponse> {
        let user = self
            .store
            .get_by_id(id)
            .await
            .ok_or(UserError::NotFound(id))?;

        Ok(user.into())
    }

    /// One page of users in insertion order.
    pub async fn list_users(&self, params: PageParams) -> UserResult<Page<UserResponse>> {
        let users = self.store.list().await;
        Ok(paginate(users, params).map(UserResponse::from))
    }

    /// Apply a partial update. Absent or blank fields are left unchanged.
    ///
    /// Fields are validated and the password hashed up front; the merge into
    /// the current record happens inside the store's write lock so concurrent
    /// updates to one id do not overwrite each other.
    #[instrument(skip(self, input))]
    pub async fn update_user(&self, id: i64, input: UpdateUser) -> UserResult<UserResponse> {
        if self.store.get_by_id(id).await.is_none() {
            return Err(UserError::NotFound(id));
        }

        let mut changes = UserChanges {
            name: present(&input.name).map(|name| name.trim().to_string()),
            user_type: parse_user_type(&input.user_type)?,
            ..Default::default()
        };

        if let Some(email) = present(&input.email) {
            let email = normalize_email(email);
            check_email_format(&email)?;

            if let Some(owner) = self.store.get_by_email(&email).await {
                if owner.id != id {
                    tracing::warn!(user_id = id, "Rejected duplicate email on update");
                    return Err(UserError::DuplicateEmail(email));
                }
            }
            changes.email = Some(email);
        }

        if let Some(password) = present(&input.password) {
            changes.password_hash = Some(self.hasher.hash_blocking(password).await?);
        }

        let updated = self.store.patch_unique(id, changes).await?;
        Ok(updated.into())
    }

    /// Delete a user, returning the detached record.
    pub async fn delete_user(&self, id: i64) -> UserResult<UserResponse> {
        let deleted = self.store.delete(id).await.ok_or(UserError::NotFound(id))?;
        Ok(deleted.into())
    }
}
