//! Users Domain
//!
//! An in-memory user directory: create, read, update, delete and paginate
//! user records with email uniqueness and argon2 password hashing.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, envelope + status mapping
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, normalization, hashing, pagination, redaction
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │    Store    │  ← Lock-guarded record collection + id counter
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Records, payloads, responses
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_users::{handlers, InMemoryUserStore, UserService};
//!
//! let service = UserService::new(InMemoryUserStore::new());
//! let router = handlers::router(service);
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod pagination;
pub mod password;
pub mod service;
pub mod store;

// Re-export commonly used types
pub use error::{UserError, UserResult, ValidationCode};
pub use models::{CreateUser, UpdateUser, User, UserChanges, UserResponse, UserType};
pub use pagination::{Page, PageParams, Pagination};
pub use password::{HashingConfig, PasswordHasher};
pub use service::UserService;
pub use store::{InMemoryUserStore, UserStore};
