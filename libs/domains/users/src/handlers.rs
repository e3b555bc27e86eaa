use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use axum_helpers::ApiResponse;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, UpdateUser, UserResponse, UserType};
use crate::pagination::{PageParams, Pagination};
use crate::service::UserService;
use crate::store::UserStore;

/// OpenAPI documentation for the users API
#[derive(OpenApi)]
#[openapi(
    paths(list_users, create_user, get_user, update_user, delete_user),
    components(schemas(
        UserResponse,
        UserType,
        CreateUser,
        UpdateUser,
        Pagination,
        UserListResponse,
        DeletedUserResponse
    )),
    tags((name = "users", description = "User directory operations"))
)]
pub struct UsersApiDoc;

/// Create the users router with all HTTP endpoints
pub fn router<S: UserStore + 'static>(service: UserService<S>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/{id}", get(get_user).put(update_user).delete(delete_user))
        .with_state(shared_service)
}

/// Page of users with pagination metadata
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserListResponse {
    pub users: Vec<UserResponse>,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeletedUserResponse {
    pub deleted_user: UserResponse,
}

/// Path ids must be positive integers.
fn parse_id(raw: &str) -> UserResult<i64> {
    raw.parse::<i64>()
        .ok()
        .filter(|id| *id >= 1)
        .ok_or_else(|| UserError::InvalidId(raw.to_string()))
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> UserResult<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|e| UserError::MalformedPayload(e.body_text()))
}

/// List users with pagination
#[utoipa::path(
    get,
    path = "",
    tag = "users",
    params(PageParams),
    responses(
        (status = 200, description = "Page of users", body = UserListResponse)
    )
)]
pub async fn list_users<S: UserStore>(
    State(service): State<Arc<UserService<S>>>,
    params: Result<Query<PageParams>, QueryRejection>,
) -> UserResult<Json<ApiResponse<UserListResponse>>> {
    // Unparseable paging falls back to the defaults
    let params = params.map(|Query(p)| p).unwrap_or_default();
    let page = service.list_users(params).await?;

    Ok(Json(ApiResponse::ok(
        "Users retrieved successfully",
        UserListResponse {
            users: page.items,
            pagination: page.pagination,
        },
    )))
}

/// Create a new user
#[utoipa::path(
    post,
    path = "",
    tag = "users",
    request_body = CreateUser,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Missing or malformed field"),
        (status = 409, description = "Email already in use"),
        (status = 500, description = "Password could not be processed")
    )
)]
pub async fn create_user<S: UserStore>(
    State(service): State<Arc<UserService<S>>>,
    payload: Result<Json<CreateUser>, JsonRejection>,
) -> UserResult<impl IntoResponse> {
    let user = service.create_user(json_body(payload)?).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("User created successfully", user)),
    ))
}

/// Get a user by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 400, description = "Invalid user ID"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user<S: UserStore>(
    State(service): State<Arc<UserService<S>>>,
    Path(id): Path<String>,
) -> UserResult<Json<ApiResponse<UserResponse>>> {
    let user = service.get_user(parse_id(&id)?).await?;
    Ok(Json(ApiResponse::ok("User retrieved successfully", user)))
}

/// Update a user. Omitted or empty fields are left unchanged.
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User ID")),
    request_body = UpdateUser,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Invalid user ID or field"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Email already in use")
    )
)]
pub async fn update_user<S: UserStore>(
    State(service): State<Arc<UserService<S>>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateUser>, JsonRejection>,
) -> UserResult<Json<ApiResponse<UserResponse>>> {
    let id = parse_id(&id)?;
    let user = service.update_user(id, json_body(payload)?).await?;
    Ok(Json(ApiResponse::ok("User updated successfully", user)))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted", body = DeletedUserResponse),
        (status = 400, description = "Invalid user ID"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user<S: UserStore>(
    State(service): State<Arc<UserService<S>>>,
    Path(id): Path<String>,
) -> UserResult<Json<ApiResponse<DeletedUserResponse>>> {
    let deleted_user = service.delete_user(parse_id(&id)?).await?;
    Ok(Json(ApiResponse::ok(
        "User deleted successfully",
        DeletedUserResponse { deleted_user },
    )))
}
