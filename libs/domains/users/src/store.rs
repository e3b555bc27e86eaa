use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{UserError, UserResult};
use crate::models::{normalize_email, NewUser, User, UserChanges};

/// Authoritative storage for user records and the identifier counter.
///
/// Reads take a shared lock over the whole collection, writes an exclusive
/// one. Everything handed out is a clone.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Snapshot of every record in insertion order
    async fn list(&self) -> Vec<User>;

    /// Append a fully formed record. Does not check email uniqueness.
    async fn create(&self, user: User);

    /// Look up a record by identifier
    async fn get_by_id(&self, id: i64) -> Option<User>;

    /// Look up a record by email, ignoring case and surrounding whitespace
    async fn get_by_email(&self, email: &str) -> Option<User>;

    /// Replace the record with the given identifier. Returns `false` if absent.
    async fn update(&self, id: i64, user: User) -> bool;

    /// Remove and return the record with the given identifier
    async fn delete(&self, id: i64) -> Option<User>;

    /// Reserve the next identifier
    async fn next_id(&self) -> i64;

    /// Check the email is free, allocate an identifier and append, all under
    /// one exclusive lock.
    async fn insert_unique(&self, user: NewUser) -> UserResult<User>;

    /// Check the record exists and no other record owns its email, then
    /// replace it, all under one exclusive lock.
    async fn replace_unique(&self, user: User) -> UserResult<User>;

    /// Merge `changes` into the current record under one exclusive lock,
    /// rejecting an email owned by another record.
    async fn patch_unique(&self, id: i64, changes: UserChanges) -> UserResult<User>;
}

#[derive(Debug, Default)]
struct StoreState {
    users: Vec<User>,
    last_id: i64,
}

impl StoreState {
    fn allocate_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    fn position(&self, id: i64) -> Option<usize> {
        self.users.iter().position(|u| u.id == id)
    }

    fn email_owner(&self, email: &str) -> Option<&User> {
        self.users.iter().find(|u| u.email == email)
    }
}

/// Process-lifetime in-memory store. Cloning shares the same collection.
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserStore {
    state: Arc<RwLock<StoreState>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn list(&self) -> Vec<User> {
        self.state.read().await.users.clone()
    }

    async fn create(&self, user: User) {
        let mut state = self.state.write().await;
        tracing::info!(user_id = user.id, "Created user");
        state.users.push(user);
    }

    async fn get_by_id(&self, id: i64) -> Option<User> {
        let state = self.state.read().await;
        state.users.iter().find(|u| u.id == id).cloned()
    }

    async fn get_by_email(&self, email: &str) -> Option<User> {
        let email = normalize_email(email);
        let state = self.state.read().await;
        state.email_owner(&email).cloned()
    }

    async fn update(&self, id: i64, user: User) -> bool {
        let mut state = self.state.write().await;

        match state.position(id) {
            Some(index) => {
                state.users[index] = user;
                tracing::info!(user_id = id, "Updated user");
                true
            }
            None => false,
        }
    }

    async fn delete(&self, id: i64) -> Option<User> {
        let mut state = self.state.write().await;

        let index = state.position(id)?;
        let removed = state.users.remove(index);
        tracing::info!(user_id = id, "Deleted user");
        Some(removed)
    }

    async fn next_id(&self) -> i64 {
        self.state.write().await.allocate_id()
    }

    async fn insert_unique(&self, user: NewUser) -> UserResult<User> {
        let mut state = self.state.write().await;

        if state.email_owner(&user.email).is_some() {
            return Err(UserError::DuplicateEmail(user.email));
        }

        let id = state.allocate_id();
        let user = user.into_user(id);
        state.users.push(user.clone());

        tracing::info!(user_id = id, "Created user");
        Ok(user)
    }

    async fn replace_unique(&self, user: User) -> UserResult<User> {
        let mut state = self.state.write().await;

        let index = state.position(user.id).ok_or(UserError::NotFound(user.id))?;

        if state
            .email_owner(&user.email)
            .is_some_and(|owner| owner.id != user.id)
        {
            return Err(UserError::DuplicateEmail(user.email));
        }

        state.users[index] = user.clone();

        tracing::info!(user_id = user.id, "Updated user");
        Ok(user)
    }

    async fn patch_unique(&self, id: i64, changes: UserChanges) -> UserResult<User> {
        let mut state = self.state.write().await;

        let index = state.position(id).ok_or(UserError::NotFound(id))?;

        if let Some(email) = &changes.email {
            if state.email_owner(email).is_some_and(|owner| owner.id != id) {
                return Err(UserError::DuplicateEmail(email.clone()));
            }
        }

        let user = &mut state.users[index];
        changes.apply_to(user);
        let updated = user.clone();

        tracing::info!(user_id = id, "Updated user");
        Ok(updated)
    }
}
