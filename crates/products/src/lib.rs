//! Product catalog domain module.
//!
//! This crate contains the catalog model and the query engine applied to it
//! (filtering, sorting, pagination, rating aggregation), implemented purely as
//! deterministic domain logic (no IO, no HTTP, no storage).

pub mod catalog;
pub mod product;
pub mod query;
pub mod rating;
pub mod wire;

pub use catalog::Catalog;
pub use product::{Product, Rating, Specification};
pub use query::{
    filter::{search, SearchCriteria, SpecFilter},
    sort::{paginate, Direction, PageRequest, SortKey},
};
pub use rating::average_rating;
