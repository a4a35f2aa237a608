use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use productlist_core::{CustomerId, Entity, ProductId, RatingId, SpecificationId};

use crate::rating;
use crate::wire;

/// Key/value attribute tag attached to a product (e.g. `Color = Red`).
///
/// Only `key` and `value` are required in a dataset; missing ids read as empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Specification {
    #[serde(default, deserialize_with = "wire::null_as_default")]
    pub specification_id: SpecificationId,
    /// Back-reference to the owning product.
    #[serde(default, deserialize_with = "wire::null_as_default")]
    pub product_id: ProductId,
    pub key: String,
    pub value: String,
}

impl Specification {
    /// Build a specification with a freshly minted id.
    pub fn new(key: impl Into<String>, value: impl Into<String>, product_id: ProductId) -> Self {
        Self {
            specification_id: SpecificationId::generate(),
            product_id,
            key: key.into(),
            value: value.into(),
        }
    }
}

impl Entity for Specification {
    type Id = SpecificationId;

    fn id(&self) -> &Self::Id {
        &self.specification_id
    }
}

/// A customer's rating of a product.
///
/// `score` is nominally 1.0-5.0 but is not validated; out-of-range values are
/// carried through to aggregation as-is. Only the score is required in a
/// dataset; missing ids read as empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    #[serde(default, deserialize_with = "wire::null_as_default")]
    pub rating_id: RatingId,
    /// Back-reference to the rated product.
    #[serde(default, deserialize_with = "wire::null_as_default")]
    pub product_id: ProductId,
    #[serde(rename(serialize = "score", deserialize = "evaluation"), alias = "score")]
    pub score: Decimal,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "wire::null_as_default")]
    pub customer_id: CustomerId,
}

impl Rating {
    /// Build a rating with a freshly minted id.
    pub fn new(
        product_id: ProductId,
        score: Decimal,
        message: Option<String>,
        customer_id: CustomerId,
    ) -> Self {
        Self {
            rating_id: RatingId::generate(),
            product_id,
            score,
            message,
            customer_id,
        }
    }
}

impl Entity for Rating {
    type Id = RatingId;

    fn id(&self) -> &Self::Id {
        &self.rating_id
    }
}

/// Catalog entry.
///
/// Fields are private: once loaded, a product is read-only. Its identifier in
/// particular never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    product_id: ProductId,
    name: String,
    price: Decimal,
    #[serde(rename = "datCreation", with = "wire::timestamp")]
    created_at: DateTime<Utc>,
    /// `None` when the dataset omits it; reads fall back to `created_at`.
    #[serde(rename = "datUpdate", default, with = "wire::timestamp::option")]
    updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    image_url: Option<String>,
    #[serde(rename = "specificationsList", default, deserialize_with = "wire::null_as_default")]
    specifications: Vec<Specification>,
    #[serde(rename = "ratingList", default, deserialize_with = "wire::null_as_default")]
    ratings: Vec<Rating>,
}

impl Product {
    /// Create a product with no specifications or ratings.
    ///
    /// The update timestamp starts equal to the creation timestamp.
    pub fn new(
        product_id: ProductId,
        name: impl Into<String>,
        price: Decimal,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            product_id,
            name: name.into(),
            price,
            created_at,
            updated_at: Some(created_at),
            description: None,
            image_url: None,
            specifications: Vec::new(),
            ratings: Vec::new(),
        }
    }

    pub fn with_updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = Some(updated_at);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    /// Attach a `key`/`value` specification owned by this product.
    pub fn with_specification(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let spec = Specification::new(key, value, self.product_id.clone());
        self.specifications.push(spec);
        self
    }

    /// Attach an anonymous rating with the given score.
    pub fn with_rating(mut self, score: Decimal) -> Self {
        let rating = Rating::new(
            self.product_id.clone(),
            score,
            None,
            CustomerId::generate(),
        );
        self.ratings.push(rating);
        self
    }

    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at.unwrap_or(self.created_at)
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    pub fn specifications(&self) -> &[Specification] {
        &self.specifications
    }

    pub fn ratings(&self) -> &[Rating] {
        &self.ratings
    }

    /// Derived mean score, recomputed on every call (see [`rating::average_rating`]).
    pub fn average_rating(&self) -> Decimal {
        rating::average_rating(&self.ratings)
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.product_id
    }
}
