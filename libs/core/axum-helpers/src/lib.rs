//! # Axum Helpers
//!
//! Shared building blocks for the HTTP services in this workspace.
//!
//! ## Modules
//!
//! - **[`server`]**: Router assembly with OpenAPI docs, liveness endpoint, graceful shutdown
//! - **[`http`]**: HTTP middleware (CORS, security headers)
//! - **[`envelope`]**: The `{success, message, data, error}` response envelope
//! - **[`errors`]**: Fallback handlers
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_app, create_router};
//! use core_config::server::ServerConfig;
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServerConfig::default();
//!     let router = create_router::<ApiDoc>(Router::new(), "/api", &config)?;
//!     create_app(router, &config).await?;
//!     Ok(())
//! }
//! ```

pub mod envelope;
pub mod errors;
pub mod http;
pub mod server;

pub use envelope::ApiResponse;

pub use server::{create_app, create_router, health_router, shutdown_signal, HealthResponse};

pub use http::{create_cors_layer, create_permissive_cors_layer, security_headers};
