//! Category Routes

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use storefront::{ApiError, ApiJson, ApiPath, ErrorBody};

use crate::models::{CategoryResponse, CreateCategoryRequest, OfferResponse};
use crate::AppState;

/// Create new Category
#[utoipa::path(
    post,
    path = "/api/v1/catalog/categories",
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created", body = CategoryResponse),
        (status = 400, description = "Missing name", body = ErrorBody),
        (status = 409, description = "Name already taken", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Category"
)]
pub async fn create_category(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<CategoryResponse>), ApiError> {
    let category = state
        .category_service
        .create_category(payload.name)
        .await?;
    Ok((StatusCode::CREATED, Json(category.into())))
}

/// List all Categories
#[utoipa::path(
    get,
    path = "/api/v1/catalog/categories",
    responses(
        (status = 200, description = "List of all Categories", body = Vec<CategoryResponse>),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Category"
)]
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryResponse>>, ApiError> {
    let categories = state.category_service.find_all().await?;
    Ok(Json(categories.into_iter().map(Into::into).collect()))
}

/// Get Category by ID
#[utoipa::path(
    get,
    path = "/api/v1/catalog/categories/{id}",
    params(("id" = i64, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category found", body = CategoryResponse),
        (status = 404, description = "Category not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Category"
)]
pub async fn get_category(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<CategoryResponse>, ApiError> {
    Ok(Json(state.category_service.find_by_id(id).await?.into()))
}

/// Get Category by name
#[utoipa::path(
    get,
    path = "/api/v1/catalog/categories/name/{name}",
    params(("name" = String, Path, description = "Category name")),
    responses(
        (status = 200, description = "Category found", body = CategoryResponse),
        (status = 404, description = "Category not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Category"
)]
pub async fn get_category_by_name(
    State(state): State<AppState>,
    ApiPath(name): ApiPath<String>,
) -> Result<Json<CategoryResponse>, ApiError> {
    Ok(Json(state.category_service.find_by_name(&name).await?.into()))
}

/// List the Offers in a Category
#[utoipa::path(
    get,
    path = "/api/v1/catalog/categories/{id}/offers",
    params(("id" = i64, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Offers in the Category", body = Vec<OfferResponse>),
        (status = 404, description = "Category not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Category"
)]
pub async fn category_offers(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Vec<OfferResponse>>, ApiError> {
    let offers = state.category_service.offers_of(id).await?;
    Ok(Json(offers.into_iter().map(Into::into).collect()))
}

/// Delete Category
#[utoipa::path(
    delete,
    path = "/api/v1/catalog/categories/{id}",
    params(("id" = i64, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category deleted"),
        (status = 404, description = "Category not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Category"
)]
pub async fn delete_category(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.category_service.delete_category(id).await?;

    Ok(Json(serde_json::json!({
        "status": "ok",
        "message": "Category deleted"
    })))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/v1/catalog/categories",
            get(list_categories).post(create_category),
        )
        .route(
            "/api/v1/catalog/categories/:id",
            get(get_category).delete(delete_category),
        )
        .route(
            "/api/v1/catalog/categories/name/:name",
            get(get_category_by_name),
        )
        .route("/api/v1/catalog/categories/:id/offers", get(category_offers))
}
