//! Step 2: recommendation and rating.
//!
//! A "not recommended" answer blocks the step.

use super::{Issues, StepResult};
use crate::record::{FieldPath, Record};

pub const RECOMMEND_REQUIRED: &str = "이 도서를 추천 하시겠습니까?";
pub const RATING_NOT_NUMBER: &str = "별점은 숫자여야 합니다.";
pub const RATING_TOO_LOW: &str = "별점은 0점 이상이어야 합니다.";
pub const RATING_TOO_HIGH: &str = "별점은 5점 이하여야 합니다.";

pub const MIN_RATING: f64 = 0.0;
pub const MAX_RATING: f64 = 5.0;

pub fn validate(record: &Record) -> StepResult {
    let mut issues = Issues::default();

    if !record.recommended {
        issues.push(FieldPath::Recommended, RECOMMEND_REQUIRED);
    }
    check_rating_range(&mut issues, record.rating);

    issues.finish()
}

/// Shared with step 3. Returns false when the rating was rejected.
pub(crate) fn check_rating_range(issues: &mut Issues, rating: f64) -> bool {
    if !rating.is_finite() {
        issues.push(FieldPath::Rating, RATING_NOT_NUMBER);
        return false;
    }
    if rating < MIN_RATING {
        issues.push(FieldPath::Rating, RATING_TOO_LOW);
        return false;
    }
    if rating > MAX_RATING {
        issues.push(FieldPath::Rating, RATING_TOO_HIGH);
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::ValidationError;

    fn record(recommended: bool, rating: f64) -> Record {
        Record {
            recommended,
            rating,
            ..Record::default()
        }
    }

    #[test]
    fn test_recommended_with_valid_rating_passes() {
        assert!(validate(&record(true, 0.0)).is_ok());
        assert!(validate(&record(true, 3.7)).is_ok());
        assert!(validate(&record(true, 5.0)).is_ok());
    }

    #[test]
    fn test_not_recommended_blocks_step() {
        let errors = validate(&record(false, 4.0)).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::new(FieldPath::Recommended, RECOMMEND_REQUIRED)]
        );
    }

    #[test]
    fn test_rating_out_of_range() {
        let errors = validate(&record(true, -0.5)).unwrap_err();
        assert_eq!(errors, vec![ValidationError::new(FieldPath::Rating, RATING_TOO_LOW)]);

        let errors = validate(&record(true, 5.5)).unwrap_err();
        assert_eq!(errors, vec![ValidationError::new(FieldPath::Rating, RATING_TOO_HIGH)]);

        let errors = validate(&record(true, f64::NAN)).unwrap_err();
        assert_eq!(errors, vec![ValidationError::new(FieldPath::Rating, RATING_NOT_NUMBER)]);
    }

    #[test]
    fn test_reports_all_errors_at_once() {
        let errors = validate(&record(false, 9.0)).unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}
