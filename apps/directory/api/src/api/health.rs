//! Service status and discovery endpoints.

use axum::Json;
use axum_helpers::ApiResponse;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Value, json};
use utoipa::ToSchema;

pub const API_VERSION: &str = "1.0.0";

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthStatus {
    #[schema(example = "up")]
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
}

/// Report that the API is serving requests
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is up", body = HealthStatus)
    )
)]
pub async fn health() -> Json<ApiResponse<HealthStatus>> {
    Json(ApiResponse::ok(
        "Service is healthy",
        HealthStatus {
            status: "up",
            timestamp: Utc::now(),
        },
    ))
}

/// Welcome message listing the top-level endpoints.
pub async fn welcome() -> Json<ApiResponse<Value>> {
    Json(ApiResponse::ok(
        "Welcome to the User Directory API",
        json!({
            "version": API_VERSION,
            "endpoints": {
                "health": "/api/v1/health",
                "users": "/api/v1/users",
                "docs": "/swagger-ui"
            }
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_reports_up() {
        let Json(body) = health().await;

        assert!(body.success);
        let data = body.data.unwrap();
        assert_eq!(data.status, "up");
        assert!(data.timestamp <= Utc::now());
    }

    #[tokio::test]
    async fn test_welcome_lists_endpoints() {
        let Json(body) = welcome().await;

        let data = body.data.unwrap();
        assert_eq!(data["version"], API_VERSION);
        assert_eq!(data["endpoints"]["users"], "/api/v1/users");
        assert_eq!(data["endpoints"]["health"], "/api/v1/health");
    }
}
