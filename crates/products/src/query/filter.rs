//! Multi-criterion search pipeline.
//!
//! Filters run in a fixed order, each narrowing the working set:
//!
//! ```text
//! name (optional) → specifications (optional) → price range → rating range
//! ```
//!
//! Both range filters treat one upper-bound value as "no cap": `price_max == 0`
//! and `rating_max == 5`. Any other upper bound is inclusive.

use rust_decimal::Decimal;

use crate::product::Product;

/// `price_max` value meaning "no upper price limit".
pub const UNCAPPED_PRICE_MAX: Decimal = Decimal::ZERO;

/// `rating_max` value meaning "no upper rating limit".
pub const UNCAPPED_RATING_MAX: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

/// Search parameters. Blank text criteria are skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCriteria {
    pub name_contains: Option<String>,
    /// Raw `key:value;key2:value2` filter, parsed by [`SpecFilter::parse`].
    pub spec_filter: Option<String>,
    pub rating_min: Decimal,
    pub rating_max: Decimal,
    pub price_min: Decimal,
    pub price_max: Decimal,
}

impl Default for SearchCriteria {
    fn default() -> Self {
        Self {
            name_contains: None,
            spec_filter: None,
            rating_min: Decimal::ZERO,
            rating_max: UNCAPPED_RATING_MAX,
            price_min: Decimal::ZERO,
            price_max: UNCAPPED_PRICE_MAX,
        }
    }
}

impl SearchCriteria {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name_contains = Some(name.into());
        self
    }

    pub fn with_specifications(mut self, raw: impl Into<String>) -> Self {
        self.spec_filter = Some(raw.into());
        self
    }

    pub fn with_price_range(mut self, min: Decimal, max: Decimal) -> Self {
        self.price_min = min;
        self.price_max = max;
        self
    }

    pub fn with_rating_range(mut self, min: Decimal, max: Decimal) -> Self {
        self.rating_min = min;
        self.rating_max = max;
        self
    }
}

/// Parsed specification filter: every pair must be matched by the product.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpecFilter {
    /// `(key, value)` pairs, lowercased for matching.
    pairs: Vec<(String, String)>,
}

impl SpecFilter {
    /// Parse `key:value;key2:value2`.
    ///
    /// - Entries split on `;`, each entry on `:`; trailing empty segments are
    ///   ignored (`"a:b:"` reads as `a`/`b`).
    /// - Entries not yielding exactly two parts are silently dropped.
    /// - A key repeated verbatim keeps its last value.
    ///
    /// Keys and values are not trimmed.
    pub fn parse(raw: &str) -> Self {
        let mut entries: Vec<(&str, &str)> = Vec::new();

        for entry in raw.split(';') {
            let mut parts: Vec<&str> = entry.split(':').collect();
            while parts.last().is_some_and(|p| p.is_empty()) {
                parts.pop();
            }
            let [key, value] = parts[..] else {
                continue;
            };

            match entries.iter_mut().find(|(k, _)| *k == key) {
                Some(existing) => existing.1 = value,
                None => entries.push((key, value)),
            }
        }

        Self {
            pairs: entries
                .into_iter()
                .map(|(k, v)| (k.to_lowercase(), v.to_lowercase()))
                .collect(),
        }
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// True iff each pair has a specification on `product` whose key equals
    /// the pair's key and whose value contains the pair's value (both
    /// case-insensitive).
    pub fn matches(&self, product: &Product) -> bool {
        self.pairs.iter().all(|(key, value)| {
            product.specifications().iter().any(|spec| {
                spec.key.to_lowercase() == *key && spec.value.to_lowercase().contains(value.as_str())
            })
        })
    }
}

/// Run the search pipeline over `products`.
///
/// Returns clones of the matching products in input order; `products` itself is
/// untouched. No match is an empty result, not an error.
pub fn search(products: &[Product], criteria: &SearchCriteria) -> Vec<Product> {
    let mut working: Vec<&Product> = products.iter().collect();

    if let Some(name) = non_blank(criteria.name_contains.as_deref()) {
        tracing::debug!(name, "filtering products by name");
        let needle = name.to_lowercase();
        working.retain(|p| p.name().to_lowercase().contains(&needle));
    }

    if let Some(raw) = non_blank(criteria.spec_filter.as_deref()) {
        tracing::debug!(specifications = raw, "filtering products by specifications");
        let filter = SpecFilter::parse(raw);
        working.retain(|p| filter.matches(p));
    }

    tracing::debug!(
        price_min = %criteria.price_min,
        price_max = %criteria.price_max,
        "filtering products by price"
    );
    working.retain(|p| within(p.price(), criteria.price_min, criteria.price_max, UNCAPPED_PRICE_MAX));

    tracing::debug!(
        rating_min = %criteria.rating_min,
        rating_max = %criteria.rating_max,
        "filtering products by rating"
    );
    working.retain(|p| {
        within(
            p.average_rating(),
            criteria.rating_min,
            criteria.rating_max,
            UNCAPPED_RATING_MAX,
        )
    });

    tracing::info!(matches = working.len(), "found products matching the criteria");
    working.into_iter().cloned().collect()
}

/// Inclusive range check where `max == uncapped` disables the upper bound.
fn within(value: Decimal, min: Decimal, max: Decimal, uncapped: Decimal) -> bool {
    value >= min && (max == uncapped || value <= max)
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use productlist_core::ProductId;

    fn d(num: i64) -> Decimal {
        Decimal::new(num, 0)
    }

    fn product(id: &str, name: &str, price: i64, scores: &[i64]) -> Product {
        let mut p = Product::new(
            ProductId::new(id),
            name,
            d(price),
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        );
        for s in scores {
            p = p.with_rating(d(*s));
        }
        p
    }

    fn names(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.name()).collect()
    }

    fn laptops() -> Vec<Product> {
        vec![
            product("1", "Laptop Pro", 2200, &[4, 5]),
            product("2", "Laptop Air", 1800, &[]),
        ]
    }

    #[test]
    fn laptop_scenario_returns_only_pro() {
        let criteria = SearchCriteria::default()
            .with_name("laptop")
            .with_price_range(d(2000), d(0))
            .with_rating_range(Decimal::new(38, 1), d(5));

        let found = search(&laptops(), &criteria);
        assert_eq!(names(&found), ["Laptop Pro"]);
    }

    #[test]
    fn default_criteria_admit_everything_non_negative() {
        let found = search(&laptops(), &SearchCriteria::default());
        assert_eq!(names(&found), ["Laptop Pro", "Laptop Air"]);
    }

    #[test]
    fn name_match_is_case_insensitive_substring() {
        let criteria = SearchCriteria::default().with_name("AIR");
        assert_eq!(names(&search(&laptops(), &criteria)), ["Laptop Air"]);
    }

    #[test]
    fn blank_name_is_skipped() {
        let criteria = SearchCriteria::default().with_name("   ");
        assert_eq!(search(&laptops(), &criteria).len(), 2);
    }

    #[test]
    fn zero_price_max_means_uncapped() {
        let items = vec![product("1", "Cheap", 5, &[]), product("2", "Yacht", 9_000_000, &[])];
        let criteria = SearchCriteria::default().with_price_range(d(10), d(0));
        assert_eq!(names(&search(&items, &criteria)), ["Yacht"]);
    }

    #[test]
    fn non_zero_price_max_is_inclusive() {
        let items = vec![
            product("1", "A", 100, &[]),
            product("2", "B", 200, &[]),
            product("3", "C", 201, &[]),
        ];
        let criteria = SearchCriteria::default().with_price_range(d(100), d(200));
        assert_eq!(names(&search(&items, &criteria)), ["A", "B"]);
    }

    #[test]
    fn rating_max_of_five_means_uncapped() {
        // Out-of-range scores can push an average above 5.
        let items = vec![product("1", "Hyped", 1, &[9]), product("2", "Meh", 1, &[2])];
        let criteria = SearchCriteria::default().with_rating_range(d(3), d(5));
        assert_eq!(names(&search(&items, &criteria)), ["Hyped"]);
    }

    #[test]
    fn rating_max_below_five_is_inclusive() {
        let items = vec![
            product("1", "Four", 1, &[4]),
            product("2", "Five", 1, &[5]),
            product("3", "Unrated", 1, &[]),
        ];
        let criteria = SearchCriteria::default().with_rating_range(d(0), d(4));
        assert_eq!(names(&search(&items, &criteria)), ["Four", "Unrated"]);
    }

    #[test]
    fn rating_min_is_inclusive() {
        let items = vec![
            product("1", "Exact", 1, &[4]),
            product("2", "Below", 1, &[3, 4]),
            product("3", "Above", 1, &[5]),
        ];
        let criteria = SearchCriteria::default().with_rating_range(d(4), d(5));
        assert_eq!(names(&search(&items, &criteria)), ["Exact", "Above"]);

        let criteria = SearchCriteria::default().with_rating_range(Decimal::new(35, 1), d(4));
        assert_eq!(names(&search(&items, &criteria)), ["Exact", "Below"]);
    }

    #[test]
    fn no_match_is_empty_not_error() {
        let criteria = SearchCriteria::default().with_name("tablet");
        assert!(search(&laptops(), &criteria).is_empty());
    }

    #[test]
    fn input_is_left_untouched() {
        let items = laptops();
        let before = items.clone();
        let criteria = SearchCriteria::default().with_name("pro");
        let first = search(&items, &criteria);
        let second = search(&items, &criteria);
        assert_eq!(items, before);
        assert_eq!(first, second);
    }

    fn tagged(id: &str, specs: &[(&str, &str)]) -> Product {
        specs.iter().fold(product(id, id, 1, &[]), |p, (k, v)| p.with_specification(*k, *v))
    }

    #[test]
    fn spec_filter_requires_every_pair() {
        let items = vec![
            tagged("both", &[("Color", "Dark Red"), ("Size", "LARGE")]),
            tagged("color-only", &[("color", "red")]),
            tagged("bare", &[]),
        ];
        let criteria = SearchCriteria::default().with_specifications("color:red;size:large");
        assert_eq!(names(&search(&items, &criteria)), ["both"]);
    }

    #[test]
    fn spec_key_must_match_whole_key() {
        let items = vec![tagged("p", &[("Colorway", "red")])];
        let criteria = SearchCriteria::default().with_specifications("color:red");
        assert!(search(&items, &criteria).is_empty());
    }

    #[test]
    fn malformed_entries_are_dropped() {
        let filter = SpecFilter::parse("colorRed;size:large;a:b:c");
        assert_eq!(filter.pairs(), [("size".to_string(), "large".to_string())]);

        let items = vec![tagged("p", &[("Size", "Large")])];
        let criteria = SearchCriteria::default().with_specifications("colorRed;size:large");
        assert_eq!(names(&search(&items, &criteria)), ["p"]);
    }

    #[test]
    fn trailing_empty_segments_are_ignored() {
        assert_eq!(
            SpecFilter::parse("color:red:;size:").pairs(),
            [("color".to_string(), "red".to_string())]
        );
        assert_eq!(
            SpecFilter::parse(":red").pairs(),
            [(String::new(), "red".to_string())]
        );
    }

    #[test]
    fn repeated_key_keeps_last_value() {
        let filter = SpecFilter::parse("color:red;size:xl;color:blue");
        assert_eq!(
            filter.pairs(),
            [
                ("color".to_string(), "blue".to_string()),
                ("size".to_string(), "xl".to_string()),
            ]
        );
    }

    #[test]
    fn filter_with_only_malformed_entries_admits_all() {
        let items = vec![tagged("bare", &[]), tagged("tagged", &[("k", "v")])];
        let criteria = SearchCriteria::default().with_specifications("nonsense");
        assert_eq!(search(&items, &criteria).len(), 2);
    }

    #[test]
    fn product_without_specs_never_matches_non_empty_filter() {
        let filter = SpecFilter::parse("k:v");
        assert!(!filter.matches(&tagged("bare", &[])));
    }
}
