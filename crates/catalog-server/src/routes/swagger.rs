//! OpenAPI Documentation
//!
//! Centralized API documentation using utoipa.

use storefront::{ErrorBody, ErrorMessage, HealthCheck};
use utoipa::OpenApi;

use crate::models::{
    AddPriceRequest, CategoryResponse, CreateCategoryRequest, CreateOfferRequest, CreateTagRequest,
    OfferResponse, PriceInput, PriceResponse, TagResponse, UpdateOfferRequest,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::health_check,
        // Offer endpoints
        super::offer::create_offer,
        super::offer::update_offer,
        super::offer::list_offers,
        super::offer::get_offer,
        super::offer::delete_offer,
        super::offer::set_availability,
        super::offer::search_by_tags,
        super::offer::find_by_availability,
        super::offer::add_price,
        super::offer::change_price,
        super::offer::find_by_price_range,
        super::offer::add_tag,
        super::offer::remove_tag,
        super::offer::add_category,
        super::offer::remove_category,
        super::offer::filtered_offers,
        // Category endpoints
        super::category::create_category,
        super::category::list_categories,
        super::category::get_category,
        super::category::get_category_by_name,
        super::category::category_offers,
        super::category::delete_category,
        // Tag endpoints
        super::tag::create_tag,
        super::tag::list_tags,
        super::tag::get_tag,
        super::tag::delete_tag,
    ),
    info(
        title = "Catalog API",
        version = "0.1.0",
        description = "Offers with their prices, tags and categories",
        license(name = "MIT"),
    ),
    servers(
        (url = "/", description = "Current server"),
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Offer", description = "Offer management and searches"),
        (name = "Category", description = "Category management"),
        (name = "Tag", description = "Tag management"),
    ),
    components(
        schemas(
            HealthCheck,
            ErrorBody,
            ErrorMessage,
            // Offer
            CreateOfferRequest,
            UpdateOfferRequest,
            PriceInput,
            AddPriceRequest,
            PriceResponse,
            OfferResponse,
            // Category
            CreateCategoryRequest,
            CategoryResponse,
            // Tag
            CreateTagRequest,
            TagResponse,
        )
    ),
)]
pub struct ApiDoc;
