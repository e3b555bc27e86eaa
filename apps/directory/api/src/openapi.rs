use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(crate::api::health::health),
    components(schemas(crate::api::health::HealthStatus)),
    info(
        title = "Directory API",
        version = "1.0.0",
        description = "User directory with paginated listing and hashed credentials"
    ),
    servers(
        (url = "/api/v1", description = "API base path")
    ),
    nest(
        (path = "/users", api = domain_users::handlers::UsersApiDoc)
    )
)]
pub struct ApiDoc;
