//! Rating aggregation.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::product::Rating;

/// Mean score of `ratings`, rounded to 2 decimal places.
///
/// - No ratings: exactly `0`.
/// - Otherwise `round(mean * 100) / 100`, where halves round towards positive
///   infinity (`4.125 -> 4.13`, `-1.005 -> -1.00`).
///
/// Scores are not range-checked. Sums that would overflow fall back to
/// averaging term by term instead of panicking.
pub fn average_rating(ratings: &[Rating]) -> Decimal {
    if ratings.is_empty() {
        return Decimal::ZERO;
    }

    let count = Decimal::from(ratings.len());
    let mean = ratings
        .iter()
        .try_fold(Decimal::ZERO, |acc, r| acc.checked_add(r.score))
        .and_then(|sum| sum.checked_div(count))
        .unwrap_or_else(|| {
            ratings
                .iter()
                .map(|r| r.score / count)
                .fold(Decimal::ZERO, |acc, part| acc.saturating_add(part))
        });

    round_half_up(mean)
}

fn round_half_up(value: Decimal) -> Decimal {
    let strategy = if value.is_sign_negative() {
        RoundingStrategy::MidpointTowardZero
    } else {
        RoundingStrategy::MidpointAwayFromZero
    };
    value.round_dp_with_strategy(2, strategy)
}
