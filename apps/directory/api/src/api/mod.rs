use axum::{Router, routing::get};
use axum_helpers::{create_router, health_router};
use domain_users::{InMemoryUserStore, PasswordHasher, UserService, handlers};

use crate::config::Config;
use crate::openapi::ApiDoc;

pub mod health;

/// Creates the API routes without the `/api/v1` prefix.
/// The prefix is added by the `create_router` helper.
pub fn routes(hasher: PasswordHasher) -> Router {
    let service = UserService::with_hasher(InMemoryUserStore::new(), hasher);

    Router::new()
        .route("/health", get(health::health))
        .nest("/users", handlers::router(service))
}

/// Unprefixed routes merged beside the documented API.
pub fn root_router() -> Router {
    Router::new().route("/", get(health::welcome))
}

/// The complete application:
/// - `/api/v1/...`: documented API with middleware (via `create_router`)
/// - `/`: welcome message with endpoint map
/// - `/health`: liveness check with app name/version
pub fn app(config: &Config) -> eyre::Result<Router> {
    let hasher = PasswordHasher::new(config.hashing)?;
    let router = create_router::<ApiDoc>(routes(hasher), "/api/v1", &config.server)?;

    Ok(router
        .merge(root_router())
        .merge(health_router(config.app)))
}
