//! Step 1: title, author, reading status and the reading dates.
//!
//! Dates are `YYYY-MM-DD` strings, so plain string comparison orders them.

use super::{Issues, StepResult};
use crate::record::{FieldPath, ReadingStatus, Record};

pub const TITLE_REQUIRED: &str = "도서 제목을 입력해주세요.";
pub const AUTHOR_REQUIRED: &str = "도서 저자를 입력해주세요.";
pub const STATUS_REQUIRED: &str = "독서 상태를 선택해주세요.";
pub const PUBLISHED_REQUIRED: &str = "도서 출판일을 입력해주세요.";
pub const TO_READ_NO_DATES: &str = "'읽고 싶은 책' 상태에서는 날짜를 입력할 수 없습니다.";
pub const READING_START_REQUIRED: &str = "'읽는 중' 상태에서는 시작일을 입력해야 합니다.";
pub const READING_NO_END: &str = "'읽는 중' 상태에서는 종료일을 입력할 수 없습니다.";
pub const FINISHED_START_REQUIRED: &str = "'읽음' 상태에서는 시작일을 입력해야 합니다.";
pub const FINISHED_END_REQUIRED: &str = "'읽음' 상태에서는 종료일을 입력해야 합니다.";
pub const ON_HOLD_START_REQUIRED: &str = "'보류 중' 상태에서는 시작일을 입력해야 합니다.";
pub const ON_HOLD_NO_END: &str = "'보류 중' 상태에서는 종료일을 입력할 수 없습니다.";
pub const START_AFTER_END: &str = "시작일은 종료일보다 이후일 수 없습니다.";
pub const START_BEFORE_PUBLISHED: &str = "독서 시작일은 도서 출판일 이후여야 합니다.";

pub fn validate(record: &Record) -> StepResult {
    let mut issues = Issues::default();

    if record.title.is_empty() {
        issues.push(FieldPath::Title, TITLE_REQUIRED);
    }
    if record.author.is_empty() {
        issues.push(FieldPath::Author, AUTHOR_REQUIRED);
    }
    if !record.status.is_set() {
        issues.push(FieldPath::Status, STATUS_REQUIRED);
    }
    if record.published_date.is_empty() {
        issues.push(FieldPath::PublishedDate, PUBLISHED_REQUIRED);
    }

    let published = Some(record.published_date.as_str()).filter(|d| !d.is_empty());
    let start = record.start_date();
    let end = record.end_date();

    match record.status {
        ReadingStatus::Unset => {}
        ReadingStatus::ToRead => {
            if start.is_some() || end.is_some() {
                issues.push(FieldPath::StartDate, TO_READ_NO_DATES);
            }
        }
        ReadingStatus::Reading => {
            check_started(&mut issues, start, published, READING_START_REQUIRED);
            if end.is_some() {
                issues.push(FieldPath::EndDate, READING_NO_END);
            }
        }
        ReadingStatus::Finished => {
            if start.is_none() {
                issues.push(FieldPath::StartDate, FINISHED_START_REQUIRED);
            }
            if end.is_none() {
                issues.push(FieldPath::EndDate, FINISHED_END_REQUIRED);
            }
            if let (Some(start), Some(end)) = (start, end) {
                if start > end {
                    issues.push(FieldPath::StartDate, START_AFTER_END);
                }
                if published.is_some_and(|published| start < published) {
                    issues.push(FieldPath::StartDate, START_BEFORE_PUBLISHED);
                }
            }
        }
        ReadingStatus::OnHold => {
            check_started(&mut issues, start, published, ON_HOLD_START_REQUIRED);
            if end.is_some() {
                issues.push(FieldPath::EndDate, ON_HOLD_NO_END);
            }
        }
    }

    issues.finish()
}

/// A start date is required and may not precede the publication date.
fn check_started(issues: &mut Issues, start: Option<&str>, published: Option<&str>, missing: &str) {
    match start {
        None => issues.push(FieldPath::StartDate, missing),
        Some(start) => {
            if published.is_some_and(|published| start < published) {
                issues.push(FieldPath::StartDate, START_BEFORE_PUBLISHED);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::ValidationError;

    fn record(status: ReadingStatus, start: &str, end: &str) -> Record {
        Record {
            title: "해리포터".to_string(),
            author: "롤링".to_string(),
            status,
            published_date: "2000-01-01".to_string(),
            start_date: Some(start.to_string()),
            end_date: Some(end.to_string()),
            ..Record::default()
        }
    }

    fn paths(errors: &[ValidationError]) -> Vec<FieldPath> {
        errors.iter().map(|e| e.path).collect()
    }

    #[test]
    fn test_empty_record_reports_every_required_field() {
        let errors = validate(&Record::default()).unwrap_err();
        assert_eq!(
            paths(&errors),
            vec![
                FieldPath::Title,
                FieldPath::Author,
                FieldPath::Status,
                FieldPath::PublishedDate
            ]
        );
    }

    #[test]
    fn test_to_read_rejects_any_date() {
        assert!(validate(&record(ReadingStatus::ToRead, "", "")).is_ok());

        for (start, end) in [("2020-01-01", ""), ("", "2020-01-01"), ("2020-01-01", "2020-02-01")] {
            let errors = validate(&record(ReadingStatus::ToRead, start, end)).unwrap_err();
            assert_eq!(errors, vec![ValidationError::new(FieldPath::StartDate, TO_READ_NO_DATES)]);
        }
    }

    #[test]
    fn test_reading_start_before_published() {
        let errors = validate(&record(ReadingStatus::Reading, "1999-01-01", "")).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::new(FieldPath::StartDate, START_BEFORE_PUBLISHED)]
        );
    }

    #[test]
    fn test_reading_requires_start_and_forbids_end() {
        let errors = validate(&record(ReadingStatus::Reading, "", "2020-01-01")).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::new(FieldPath::StartDate, READING_START_REQUIRED),
                ValidationError::new(FieldPath::EndDate, READING_NO_END),
            ]
        );
        assert!(validate(&record(ReadingStatus::Reading, "2000-01-01", "")).is_ok());
    }

    #[test]
    fn test_finished_date_order() {
        assert!(validate(&record(ReadingStatus::Finished, "2010-05-01", "2010-06-01")).is_ok());
        assert!(validate(&record(ReadingStatus::Finished, "2010-05-01", "2010-05-01")).is_ok());
        assert!(validate(&record(ReadingStatus::Finished, "2000-01-01", "2000-01-01")).is_ok());

        let errors =
            validate(&record(ReadingStatus::Finished, "2010-06-01", "2010-05-01")).unwrap_err();
        assert_eq!(errors, vec![ValidationError::new(FieldPath::StartDate, START_AFTER_END)]);

        let errors =
            validate(&record(ReadingStatus::Finished, "1990-06-01", "1999-05-01")).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::new(FieldPath::StartDate, START_BEFORE_PUBLISHED)]
        );
    }

    #[test]
    fn test_finished_requires_both_dates() {
        let errors = validate(&record(ReadingStatus::Finished, "", "")).unwrap_err();
        assert_eq!(paths(&errors), vec![FieldPath::StartDate, FieldPath::EndDate]);
    }

    #[test]
    fn test_on_hold_rules() {
        assert!(validate(&record(ReadingStatus::OnHold, "2001-01-01", "")).is_ok());

        let errors = validate(&record(ReadingStatus::OnHold, "", "2001-01-01")).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::new(FieldPath::StartDate, ON_HOLD_START_REQUIRED),
                ValidationError::new(FieldPath::EndDate, ON_HOLD_NO_END),
            ]
        );

        let errors = validate(&record(ReadingStatus::OnHold, "1999-12-31", "")).unwrap_err();
        assert_eq!(paths(&errors), vec![FieldPath::StartDate]);
    }

    #[test]
    fn test_no_published_date_skips_comparison() {
        let mut r = record(ReadingStatus::Reading, "1900-01-01", "");
        r.published_date.clear();
        let errors = validate(&r).unwrap_err();
        assert_eq!(paths(&errors), vec![FieldPath::PublishedDate]);
    }

    #[test]
    fn test_validation_is_idempotent() {
        let r = record(ReadingStatus::Finished, "2010-06-01", "");
        assert_eq!(validate(&r), validate(&r));
    }
}
