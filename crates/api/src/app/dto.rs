use std::str::FromStr;

use chrono::SecondsFormat;
use rust_decimal::Decimal;
use serde::Deserialize;

use productlist_core::DomainError;
use productlist_products::query::sort::{DEFAULT_DIRECTION, DEFAULT_SORT_KEY};
use productlist_products::{PageRequest, Product, SearchCriteria};

pub const NAME_REQUIRED: &str = "Product name cannot be null or empty";

// -------------------------
// Request DTOs
// -------------------------

/// `GET /products` query string.
#[derive(Debug, Deserialize)]
pub struct ListProductsParams {
    #[serde(default)]
    pub page: i64,
    #[serde(default = "default_size")]
    pub size: i64,
    #[serde(default = "default_sort")]
    pub sort: String,
    #[serde(default = "default_direction")]
    pub direction: String,
}

fn default_size() -> i64 {
    10
}

fn default_sort() -> String {
    DEFAULT_SORT_KEY.to_string()
}

fn default_direction() -> String {
    DEFAULT_DIRECTION.to_string()
}

impl ListProductsParams {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.size, &self.sort, &self.direction)
    }
}

/// `GET /products/search` query string. Numeric bounds arrive as text so
/// that empty values fall back to their defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchProductsParams {
    pub name: Option<String>,
    pub specifications: Option<String>,
    pub rating_min: Option<String>,
    pub rating_max: Option<String>,
    pub price_min: Option<String>,
    pub price_max: Option<String>,
}

impl SearchProductsParams {
    /// Validate and convert. Only `name` is required; it must be non-empty.
    pub fn into_criteria(self) -> Result<SearchCriteria, DomainError> {
        let name = self
            .name
            .filter(|n| !n.is_empty())
            .ok_or_else(|| DomainError::validation(NAME_REQUIRED))?;

        let defaults = SearchCriteria::default();
        let criteria = SearchCriteria::default()
            .with_name(name)
            .with_specifications(self.specifications.unwrap_or_default())
            .with_rating_range(
                decimal_param("ratingMin", self.rating_min, defaults.rating_min)?,
                decimal_param("ratingMax", self.rating_max, defaults.rating_max)?,
            )
            .with_price_range(
                decimal_param("priceMin", self.price_min, defaults.price_min)?,
                decimal_param("priceMax", self.price_max, defaults.price_max)?,
            );
        Ok(criteria)
    }
}

fn decimal_param(key: &str, raw: Option<String>, default: Decimal) -> Result<Decimal, DomainError> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(default);
    }
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|_| DomainError::validation(format!("{key} must be a number, got `{raw}`")))
}

// -------------------------
// Response mapping
// -------------------------

pub fn product_to_json(product: &Product) -> serde_json::Value {
    serde_json::json!({
        "productId": product.product_id(),
        "name": product.name(),
        "price": product.price(),
        "datCreation": product.created_at().to_rfc3339_opts(SecondsFormat::Millis, true),
        "datUpdate": product.updated_at().to_rfc3339_opts(SecondsFormat::Millis, true),
        "description": product.description(),
        "imageUrl": product.image_url(),
        "specificationsList": product.specifications(),
        "ratingList": product.ratings(),
        "averageRating": product.average_rating(),
    })
}

pub fn products_to_json(products: &[Product]) -> serde_json::Value {
    serde_json::Value::Array(products.iter().map(product_to_json).collect())
}
