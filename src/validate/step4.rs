//! Step 4: page count and quotes.

use super::{Issues, StepResult};
use crate::record::{FieldPath, Record};

pub const TOTAL_PAGES_TOO_LOW: &str = "총 페이지 수는 1 이상이어야 합니다.";
pub const QUOTES_REQUIRED: &str = "인용구를 최소 1개 이상 입력해주세요.";
pub const QUOTE_TEXT_REQUIRED: &str = "인용구를 입력해주세요.";
pub const PAGE_REQUIRED: &str = "두 개 이상의 인용구가 있을 경우 페이지 번호는 필수 입력 항목입니다.";
pub const PAGE_TOO_LOW: &str = "페이지 번호는 1 이상이어야 합니다.";
pub const PAGE_PAST_END: &str = "인용구 페이지 번호는 도서 전체 페이지 수보다 작아야 합니다.";

pub fn validate(record: &Record) -> StepResult {
    let mut issues = Issues::default();

    if record.total_pages < 1 {
        issues.push(FieldPath::TotalPages, TOTAL_PAGES_TOO_LOW);
    }
    if record.quotes.is_empty() {
        issues.push(FieldPath::Quotes, QUOTES_REQUIRED);
    }

    let pages_required = record.quotes.len() > 1;
    for (index, quote) in record.quotes.iter().enumerate() {
        if quote.text.is_empty() {
            issues.push(FieldPath::QuoteText(index), QUOTE_TEXT_REQUIRED);
        }

        match quote.page {
            None if pages_required => issues.push(FieldPath::QuotePage(index), PAGE_REQUIRED),
            None => {}
            Some(page) => {
                if page < 1 {
                    issues.push(FieldPath::QuotePage(index), PAGE_TOO_LOW);
                }
                if page >= record.total_pages {
                    issues.push(FieldPath::QuotePage(index), PAGE_PAST_END);
                }
            }
        }
    }

    issues.finish()
}
