//! Tag Routes

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use storefront::{ApiError, ApiJson, ApiPath, ErrorBody};

use crate::models::{CreateTagRequest, TagResponse};
use crate::AppState;

/// Create new Tag
#[utoipa::path(
    post,
    path = "/api/v1/catalog/tags",
    request_body = CreateTagRequest,
    responses(
        (status = 201, description = "Tag created", body = TagResponse),
        (status = 400, description = "Missing label", body = ErrorBody),
        (status = 409, description = "Label already taken", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Tag"
)]
pub async fn create_tag(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateTagRequest>,
) -> Result<(StatusCode, Json<TagResponse>), ApiError> {
    let tag = state.tag_service.create_tag(payload.label).await?;
    Ok((StatusCode::CREATED, Json(tag.into())))
}

/// List all Tags
#[utoipa::path(
    get,
    path = "/api/v1/catalog/tags",
    responses(
        (status = 200, description = "List of all Tags", body = Vec<TagResponse>),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Tag"
)]
pub async fn list_tags(State(state): State<AppState>) -> Result<Json<Vec<TagResponse>>, ApiError> {
    let tags = state.tag_service.find_all().await?;
    Ok(Json(tags.into_iter().map(Into::into).collect()))
}

/// Get Tag by ID
#[utoipa::path(
    get,
    path = "/api/v1/catalog/tags/{id}",
    params(("id" = i64, Path, description = "Tag ID")),
    responses(
        (status = 200, description = "Tag found", body = TagResponse),
        (status = 404, description = "Tag not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Tag"
)]
pub async fn get_tag(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<TagResponse>, ApiError> {
    Ok(Json(state.tag_service.find_by_id(id).await?.into()))
}

/// Delete Tag
#[utoipa::path(
    delete,
    path = "/api/v1/catalog/tags/{id}",
    params(("id" = i64, Path, description = "Tag ID")),
    responses(
        (status = 200, description = "Tag deleted"),
        (status = 404, description = "Tag not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Tag"
)]
pub async fn delete_tag(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.tag_service.delete_tag(id).await?;

    Ok(Json(serde_json::json!({
        "status": "ok",
        "message": "Tag deleted"
    })))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/v1/catalog/tags", get(list_tags).post(create_tag))
        .route("/api/v1/catalog/tags/:id", get(get_tag).delete(delete_tag))
}
