//! Offer DTOs and query parameters

use serde::{Deserialize, Serialize};
use storefront::{Category, Offer, Price, Tag, TagMatchMode};
use utoipa::{IntoParams, ToSchema};

use super::{CategoryResponse, TagResponse};

/// Price as sent by clients; `id` is omitted for new prices
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PriceInput {
    #[serde(default)]
    pub id: Option<i64>,
    pub amount: f64,
}

/// Create Offer request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOfferRequest {
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub available: bool,
    #[serde(default)]
    pub prices: Vec<PriceInput>,
    /// Ids of existing tags to link
    #[serde(default)]
    pub tag_ids: Vec<i64>,
    /// Id of an existing category
    pub category_id: Option<i64>,
}

/// Update Offer request (full replacement)
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOfferRequest {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub available: bool,
    /// Prices to keep (with id) or add (without id); others are dropped
    #[serde(default)]
    pub prices: Vec<PriceInput>,
    #[serde(default)]
    pub tag_ids: Vec<i64>,
    pub category_id: Option<i64>,
}

/// Add price request
#[derive(Debug, Deserialize, ToSchema)]
pub struct AddPriceRequest {
    pub amount: f64,
}

/// Price response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PriceResponse {
    pub id: i64,
    pub amount: f64,
}

/// Offer response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OfferResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub available: bool,
    pub prices: Vec<PriceResponse>,
    pub lowest_price: Option<f64>,
    pub tags: Vec<TagResponse>,
    pub category: Option<CategoryResponse>,
}

impl From<Offer> for OfferResponse {
    fn from(offer: Offer) -> Self {
        let lowest_price = offer.lowest_price();
        Self {
            id: offer.id,
            name: offer.name,
            description: offer.description,
            available: offer.available,
            prices: offer
                .prices
                .into_iter()
                .map(|p| PriceResponse {
                    id: p.id,
                    amount: p.amount,
                })
                .collect(),
            lowest_price,
            tags: offer.tags.into_iter().map(TagResponse::from).collect(),
            category: offer.category.map(CategoryResponse::from),
        }
    }
}

fn to_price(input: PriceInput) -> Price {
    Price {
        id: input.id.unwrap_or(0),
        amount: input.amount,
    }
}

/// Links carry only ids; the store resolves labels and names
fn to_links(tag_ids: Vec<i64>, category_id: Option<i64>) -> (Vec<Tag>, Option<Category>) {
    let tags = tag_ids
        .into_iter()
        .map(|id| Tag {
            id,
            label: String::new(),
        })
        .collect();
    let category = category_id.map(|id| Category {
        id,
        name: String::new(),
    });
    (tags, category)
}

impl From<CreateOfferRequest> for Offer {
    fn from(req: CreateOfferRequest) -> Self {
        let (tags, category) = to_links(req.tag_ids, req.category_id);
        Offer {
            prices: req.prices.into_iter().map(to_price).collect(),
            tags,
            category,
            ..Offer::new(req.name, req.description, req.available)
        }
    }
}

impl From<UpdateOfferRequest> for Offer {
    fn from(req: UpdateOfferRequest) -> Self {
        let (tags, category) = to_links(req.tag_ids, req.category_id);
        Offer {
            id: req.id,
            name: req.name,
            description: req.description,
            available: req.available,
            prices: req.prices.into_iter().map(to_price).collect(),
            tags,
            category,
        }
    }
}

// ============================================
// Query parameters
// ============================================

/// `?availability=`
#[derive(Debug, Deserialize, IntoParams)]
pub struct AvailabilityQuery {
    pub availability: bool,
}

/// `?tagList=a,b&match=any`
#[derive(Debug, Deserialize, IntoParams)]
pub struct TagSearchQuery {
    /// Comma-separated tag labels
    #[serde(rename = "tagList", default)]
    pub tag_list: String,
    /// `all` (default) or `any`
    #[serde(rename = "match", default)]
    #[param(value_type = Option<String>)]
    pub match_mode: Option<TagMatchMode>,
}

/// `?price=`
#[derive(Debug, Deserialize, IntoParams)]
pub struct PriceQuery {
    pub price: f64,
}

/// `?min=&max=`
#[derive(Debug, Deserialize, IntoParams)]
pub struct PriceRangeQuery {
    pub min: f64,
    pub max: f64,
}

/// `?tagId=`
#[derive(Debug, Deserialize, IntoParams)]
pub struct TagIdQuery {
    #[serde(rename = "tagId")]
    pub tag_id: i64,
}

/// `?categoryId=`
#[derive(Debug, Deserialize, IntoParams)]
pub struct CategoryIdQuery {
    #[serde(rename = "categoryId")]
    pub category_id: i64,
}

/// Optional `?categoryId=`
#[derive(Debug, Deserialize, IntoParams)]
pub struct OptionalCategoryIdQuery {
    #[serde(rename = "categoryId", default)]
    pub category_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_defaults() {
        let req: CreateOfferRequest = serde_json::from_str(r#"{"name":"Pen"}"#).unwrap();
        let offer = Offer::from(req);

        assert_eq!(offer.id, 0);
        assert!(!offer.available);
        assert!(offer.prices.is_empty());
        assert_eq!(offer.category, None);
    }

    #[test]
    fn test_update_request_keeps_price_ids() {
        let req: UpdateOfferRequest = serde_json::from_str(
            r#"{"id":4,"name":"Pen","prices":[{"id":9,"amount":2.5},{"amount":3.0}],"tag_ids":[1],"category_id":2}"#,
        )
        .unwrap();
        let offer = Offer::from(req);

        assert_eq!(offer.id, 4);
        assert_eq!(offer.prices.iter().map(|p| p.id).collect::<Vec<_>>(), vec![9, 0]);
        assert_eq!(offer.tag_ids(), vec![1]);
        assert_eq!(offer.category_id(), Some(2));
    }

    #[test]
    fn test_response_reports_lowest_price() {
        let mut offer = Offer::new("Pen".to_string(), None, true);
        offer.prices = vec![
            Price { id: 1, amount: 4.0 },
            Price { id: 2, amount: 2.5 },
        ];
        let response = OfferResponse::from(offer);
        assert_eq!(response.lowest_price, Some(2.5));
    }
}
