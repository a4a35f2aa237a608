//! Ordering and pagination.

use core::cmp::Ordering;

use rust_decimal::Decimal;

use crate::product::Product;

/// Sort key whose exact spelling skips sorting altogether.
///
/// Note this differs from [`DEFAULT_SORT_KEY`] (`datCreation`), which *does*
/// sort by creation date. Clients rely on both spellings, so they stay
/// distinct until the API contract is revised.
pub const UNSORTED_SORT_KEY: &str = "dateCreation";

/// Sort key applied when a request does not name one.
pub const DEFAULT_SORT_KEY: &str = "datCreation";

/// Direction applied when a request does not name one.
pub const DEFAULT_DIRECTION: &str = "DESC";

/// Comparator selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Lexicographic on name.
    Name,
    /// Numeric on price.
    Price,
    /// Numeric on the derived average rating.
    Rating,
    /// Creation timestamp (the fallback for unrecognised keys).
    CreatedAt,
    /// Keep the order the items arrived in.
    Unsorted,
}

impl SortKey {
    /// Map a request's sort parameter. Matching is case-sensitive.
    pub fn parse(raw: &str) -> Self {
        match raw {
            UNSORTED_SORT_KEY => SortKey::Unsorted,
            "name" => SortKey::Name,
            "price" => SortKey::Price,
            "rating" => SortKey::Rating,
            _ => SortKey::CreatedAt,
        }
    }
}

impl Default for SortKey {
    fn default() -> Self {
        SortKey::parse(DEFAULT_SORT_KEY)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    /// `DESC` in any case is descending; every other value is ascending.
    pub fn parse(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("DESC") {
            Direction::Desc
        } else {
            Direction::Asc
        }
    }
}

/// One page of an ordered listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub size: usize,
    pub sort: SortKey,
    pub direction: Direction,
}

impl PageRequest {
    /// Build from raw request values. Negative `page`/`size` clamp to 0.
    pub fn new(page: i64, size: i64, sort: &str, direction: &str) -> Self {
        Self {
            page: clamp_to_usize(page),
            size: clamp_to_usize(size),
            sort: SortKey::parse(sort),
            direction: Direction::parse(direction),
        }
    }

    /// Half-open `[from, to)` window over `total` items.
    pub fn window(&self, total: usize) -> (usize, usize) {
        let from = self.page.saturating_mul(self.size).min(total);
        let to = from.saturating_add(self.size).min(total);
        (from, to)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, 10, DEFAULT_SORT_KEY, DEFAULT_DIRECTION)
    }
}

/// Order `items` and return the requested page.
///
/// Sorting is stable in both directions: descending reverses the comparator,
/// not the result, so ties keep their input order. `items` is never reordered;
/// only the returned page is cloned.
pub fn paginate(items: &[Product], request: &PageRequest) -> Vec<Product> {
    tracing::debug!(
        page = request.page,
        size = request.size,
        sort = ?request.sort,
        direction = ?request.direction,
        total = items.len(),
        "paginating products"
    );

    let mut ranked: Vec<Ranked<'_>> = items.iter().map(|p| Ranked::new(p, request.sort)).collect();

    if request.sort != SortKey::Unsorted {
        match request.direction {
            Direction::Asc => ranked.sort_by(|a, b| a.compare(b, request.sort)),
            Direction::Desc => ranked.sort_by(|a, b| b.compare(a, request.sort)),
        }
    }

    let (from, to) = request.window(ranked.len());
    ranked[from..to].iter().map(|r| r.product.clone()).collect()
}

/// Product plus its precomputed average rating (only when sorting by rating).
struct Ranked<'a> {
    product: &'a Product,
    rating: Decimal,
}

impl<'a> Ranked<'a> {
    fn new(product: &'a Product, sort: SortKey) -> Self {
        let rating = match sort {
            SortKey::Rating => product.average_rating(),
            _ => Decimal::ZERO,
        };
        Self { product, rating }
    }

    fn compare(&self, other: &Self, sort: SortKey) -> Ordering {
        match sort {
            SortKey::Name => self.product.name().cmp(other.product.name()),
            SortKey::Price => self.product.price().cmp(&other.product.price()),
            SortKey::Rating => self.rating.cmp(&other.rating),
            SortKey::CreatedAt => self.product.created_at().cmp(&other.product.created_at()),
            SortKey::Unsorted => Ordering::Equal,
        }
    }
}

fn clamp_to_usize(n: i64) -> usize {
    usize::try_from(n).unwrap_or(0)
}
