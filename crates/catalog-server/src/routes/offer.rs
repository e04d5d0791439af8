//! Offer Routes
//!
//! HTTP handlers that delegate to OfferService; one route, one service call.

use std::collections::HashMap;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use storefront::{split_labels, ApiError, ApiJson, ApiPath, ApiQuery, ErrorBody};

use crate::models::{
    AddPriceRequest, AvailabilityQuery, CategoryIdQuery, CreateOfferRequest, OfferResponse,
    OptionalCategoryIdQuery, PriceQuery, PriceRangeQuery, TagIdQuery, TagSearchQuery,
    UpdateOfferRequest,
};
use crate::AppState;

fn respond(offers: Vec<storefront::Offer>) -> Json<Vec<OfferResponse>> {
    Json(offers.into_iter().map(OfferResponse::from).collect())
}

/// Create new Offer
#[utoipa::path(
    post,
    path = "/api/v1/catalog/offers",
    request_body = CreateOfferRequest,
    responses(
        (status = 201, description = "Offer created", body = OfferResponse),
        (status = 400, description = "Missing name or invalid price", body = ErrorBody),
        (status = 404, description = "Referenced tag or category not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Offer"
)]
pub async fn create_offer(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateOfferRequest>,
) -> Result<(StatusCode, Json<OfferResponse>), ApiError> {
    let offer = state.offer_service.create_offer(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(offer.into())))
}

/// Replace an Offer
#[utoipa::path(
    put,
    path = "/api/v1/catalog/offers",
    request_body = UpdateOfferRequest,
    responses(
        (status = 200, description = "Offer updated", body = OfferResponse),
        (status = 400, description = "Missing name or invalid price", body = ErrorBody),
        (status = 404, description = "Offer not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Offer"
)]
pub async fn update_offer(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<UpdateOfferRequest>,
) -> Result<Json<OfferResponse>, ApiError> {
    let offer = state.offer_service.update_offer(payload.into()).await?;
    Ok(Json(offer.into()))
}

/// List all Offers
#[utoipa::path(
    get,
    path = "/api/v1/catalog/offers",
    responses(
        (status = 200, description = "List of all Offers", body = Vec<OfferResponse>),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Offer"
)]
pub async fn list_offers(
    State(state): State<AppState>,
) -> Result<Json<Vec<OfferResponse>>, ApiError> {
    Ok(respond(state.offer_service.find_all().await?))
}

/// Get Offer by ID
#[utoipa::path(
    get,
    path = "/api/v1/catalog/offers/{id}",
    params(("id" = i64, Path, description = "Offer ID")),
    responses(
        (status = 200, description = "Offer found", body = OfferResponse),
        (status = 404, description = "Offer not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Offer"
)]
pub async fn get_offer(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<OfferResponse>, ApiError> {
    let offer = state.offer_service.find_by_id(id).await?;
    Ok(Json(offer.into()))
}

/// Delete Offer
#[utoipa::path(
    delete,
    path = "/api/v1/catalog/offers/{id}",
    params(("id" = i64, Path, description = "Offer ID")),
    responses(
        (status = 200, description = "Offer deleted"),
        (status = 404, description = "Offer not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Offer"
)]
pub async fn delete_offer(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.offer_service.delete_offer(id).await?;

    Ok(Json(serde_json::json!({
        "status": "ok",
        "message": "Offer deleted"
    })))
}

/// Set Offer availability
#[utoipa::path(
    put,
    path = "/api/v1/catalog/offers/{id}",
    params(("id" = i64, Path, description = "Offer ID"), AvailabilityQuery),
    responses(
        (status = 200, description = "Availability updated", body = OfferResponse),
        (status = 404, description = "Offer not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Offer"
)]
pub async fn set_availability(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiQuery(query): ApiQuery<AvailabilityQuery>,
) -> Result<Json<OfferResponse>, ApiError> {
    let offer = state
        .offer_service
        .set_availability(id, query.availability)
        .await?;
    Ok(Json(offer.into()))
}

/// Search Offers by tag labels
#[utoipa::path(
    get,
    path = "/api/v1/catalog/offers/searchbytags",
    params(TagSearchQuery),
    responses(
        (status = 200, description = "Matching Offers", body = Vec<OfferResponse>),
        (status = 400, description = "Empty tag list", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Offer"
)]
pub async fn search_by_tags(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<TagSearchQuery>,
) -> Result<Json<Vec<OfferResponse>>, ApiError> {
    let labels = split_labels(&query.tag_list);
    let offers = state
        .offer_service
        .find_by_tags(&labels, query.match_mode.unwrap_or_default())
        .await?;
    Ok(respond(offers))
}

/// List Offers by availability
#[utoipa::path(
    get,
    path = "/api/v1/catalog/offers/availability",
    params(AvailabilityQuery),
    responses(
        (status = 200, description = "Matching Offers", body = Vec<OfferResponse>),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Offer"
)]
pub async fn find_by_availability(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<AvailabilityQuery>,
) -> Result<Json<Vec<OfferResponse>>, ApiError> {
    Ok(respond(
        state
            .offer_service
            .find_by_availability(query.availability)
            .await?,
    ))
}

/// Add a price to an Offer
#[utoipa::path(
    put,
    path = "/api/v1/catalog/offers/{id}/prices",
    params(("id" = i64, Path, description = "Offer ID")),
    request_body = AddPriceRequest,
    responses(
        (status = 200, description = "Price added", body = OfferResponse),
        (status = 400, description = "Invalid amount", body = ErrorBody),
        (status = 404, description = "Offer not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Offer"
)]
pub async fn add_price(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<AddPriceRequest>,
) -> Result<Json<OfferResponse>, ApiError> {
    let offer = state.offer_service.add_price(id, payload.amount).await?;
    Ok(Json(offer.into()))
}

/// Change the latest price of an Offer
#[utoipa::path(
    put,
    path = "/api/v1/catalog/offers/{id}/changeprices",
    params(("id" = i64, Path, description = "Offer ID"), PriceQuery),
    responses(
        (status = 200, description = "Price changed", body = OfferResponse),
        (status = 400, description = "Invalid amount", body = ErrorBody),
        (status = 404, description = "Offer not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Offer"
)]
pub async fn change_price(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiQuery(query): ApiQuery<PriceQuery>,
) -> Result<Json<OfferResponse>, ApiError> {
    let offer = state.offer_service.change_price(id, query.price).await?;
    Ok(Json(offer.into()))
}

/// List Offers whose lowest price lies in [min, max]
#[utoipa::path(
    get,
    path = "/api/v1/catalog/offers/pricefilters",
    params(PriceRangeQuery),
    responses(
        (status = 200, description = "Matching Offers", body = Vec<OfferResponse>),
        (status = 400, description = "min greater than max", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Offer"
)]
pub async fn find_by_price_range(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<PriceRangeQuery>,
) -> Result<Json<Vec<OfferResponse>>, ApiError> {
    Ok(respond(
        state
            .offer_service
            .find_by_price_range(query.min, query.max)
            .await?,
    ))
}

/// Link a Tag to an Offer
#[utoipa::path(
    put,
    path = "/api/v1/catalog/offers/{id}/tags",
    params(("id" = i64, Path, description = "Offer ID"), TagIdQuery),
    responses(
        (status = 200, description = "Tag linked", body = OfferResponse),
        (status = 404, description = "Offer or Tag not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Offer"
)]
pub async fn add_tag(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiQuery(query): ApiQuery<TagIdQuery>,
) -> Result<Json<OfferResponse>, ApiError> {
    let offer = state.offer_service.add_tag(id, query.tag_id).await?;
    Ok(Json(offer.into()))
}

/// Unlink a Tag from an Offer
#[utoipa::path(
    put,
    path = "/api/v1/catalog/offers/{id}/removetags",
    params(("id" = i64, Path, description = "Offer ID"), TagIdQuery),
    responses(
        (status = 200, description = "Tag unlinked", body = OfferResponse),
        (status = 404, description = "Offer not found or Tag not linked", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Offer"
)]
pub async fn remove_tag(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiQuery(query): ApiQuery<TagIdQuery>,
) -> Result<Json<OfferResponse>, ApiError> {
    let offer = state.offer_service.remove_tag(id, query.tag_id).await?;
    Ok(Json(offer.into()))
}

/// Put an Offer into a Category
#[utoipa::path(
    put,
    path = "/api/v1/catalog/offers/{id}/categories",
    params(("id" = i64, Path, description = "Offer ID"), CategoryIdQuery),
    responses(
        (status = 200, description = "Category assigned", body = OfferResponse),
        (status = 404, description = "Offer or Category not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Offer"
)]
pub async fn add_category(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiQuery(query): ApiQuery<CategoryIdQuery>,
) -> Result<Json<OfferResponse>, ApiError> {
    let offer = state
        .offer_service
        .add_category(id, query.category_id)
        .await?;
    Ok(Json(offer.into()))
}

/// Detach an Offer from its Category
#[utoipa::path(
    put,
    path = "/api/v1/catalog/offers/{id}/removecategories",
    params(("id" = i64, Path, description = "Offer ID"), OptionalCategoryIdQuery),
    responses(
        (status = 200, description = "Category detached", body = OfferResponse),
        (status = 404, description = "Offer not found or not in that Category", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Offer"
)]
pub async fn remove_category(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiQuery(query): ApiQuery<OptionalCategoryIdQuery>,
) -> Result<Json<OfferResponse>, ApiError> {
    let offer = state
        .offer_service
        .remove_category(id, query.category_id)
        .await?;
    Ok(Json(offer.into()))
}

/// Filter Offers by a string-keyed map
///
/// Keys: name, minPrice, maxPrice, category, tags, tagsMatch, availability.
#[utoipa::path(
    post,
    path = "/api/v1/catalog/offers/categories/offers/filteredOffers",
    request_body = HashMap<String, String>,
    responses(
        (status = 200, description = "Offers matching every supplied filter", body = Vec<OfferResponse>),
        (status = 400, description = "Unknown key or malformed value", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Offer"
)]
pub async fn filtered_offers(
    State(state): State<AppState>,
    ApiJson(filter): ApiJson<HashMap<String, String>>,
) -> Result<Json<Vec<OfferResponse>>, ApiError> {
    Ok(respond(
        state.offer_service.find_filtered_offers(&filter).await?,
    ))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/v1/catalog/offers",
            get(list_offers).post(create_offer).put(update_offer),
        )
        .route("/api/v1/catalog/offers/searchbytags", get(search_by_tags))
        .route(
            "/api/v1/catalog/offers/availability",
            get(find_by_availability),
        )
        .route(
            "/api/v1/catalog/offers/pricefilters",
            get(find_by_price_range),
        )
        .route(
            "/api/v1/catalog/offers/categories/offers/filteredOffers",
            post(filtered_offers),
        )
        .route(
            "/api/v1/catalog/offers/:id",
            get(get_offer).put(set_availability).delete(delete_offer),
        )
        .route("/api/v1/catalog/offers/:id/prices", put(add_price))
        .route("/api/v1/catalog/offers/:id/changeprices", put(change_price))
        .route("/api/v1/catalog/offers/:id/tags", put(add_tag))
        .route("/api/v1/catalog/offers/:id/removetags", put(remove_tag))
        .route("/api/v1/catalog/offers/:id/categories", put(add_category))
        .route(
            "/api/v1/catalog/offers/:id/removecategories",
            put(remove_category),
        )
}
