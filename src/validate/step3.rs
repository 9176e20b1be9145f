//! Step 3: rating granularity and the review.

use super::step2::check_rating_range;
use super::{Issues, StepResult};
use crate::record::{FieldPath, Record};

pub const RATING_NOT_HALF_STEP: &str = "별점은 0.5점 단위여야 합니다.";
pub const REVIEW_TOO_SHORT: &str = "별점이 1점 또는 5점인 경우 독후감은 100자 이상이어야 합니다.";

/// Minimum review length, in characters, for an extreme rating.
pub const MIN_EXTREME_REVIEW_CHARS: usize = 100;

pub fn validate(record: &Record) -> StepResult {
    let mut issues = Issues::default();

    if check_rating_range(&mut issues, record.rating) && record.rating % 0.5 != 0.0 {
        issues.push(FieldPath::Rating, RATING_NOT_HALF_STEP);
    }

    if is_extreme(record.rating) {
        let chars = record.review().map_or(0, |r| r.chars().count());
        if chars < MIN_EXTREME_REVIEW_CHARS {
            issues.push(FieldPath::Review, REVIEW_TOO_SHORT);
        }
    }

    issues.finish()
}

fn is_extreme(rating: f64) -> bool {
    rating == 1.0 || rating == 5.0
}
