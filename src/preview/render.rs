//! Presentation-only values derived from a record snapshot.
//!
//! Everything here is a pure function of the record.

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::Result;
use crate::record::{Quote, ReadingStatus, Record};

const MAX_STARS: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusBadge {
    pub label: &'static str,
    pub color: &'static str,
}

impl StatusBadge {
    pub fn for_status(status: ReadingStatus) -> Option<Self> {
        let (label, color) = match status {
            ReadingStatus::Unset => return None,
            ReadingStatus::ToRead => ("읽고 싶은 책", "#6366f1"),
            ReadingStatus::Reading => ("읽는 중", "#f59e0b"),
            ReadingStatus::Finished => ("읽음", "#10b981"),
            ReadingStatus::OnHold => ("보류 중", "#6b7280"),
        };
        Some(Self { label, color })
    }
}

/// Star rendering of a 0–5 rating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StarRating {
    pub full: u8,
    pub half: bool,
    pub empty: u8,
    pub label: String,
}

impl StarRating {
    pub fn from_rating(rating: f64) -> Self {
        let clamped = if rating.is_finite() {
            rating.clamp(0.0, f64::from(MAX_STARS))
        } else {
            0.0
        };
        let full = clamped.floor() as u8;
        let half = clamped % 1.0 >= 0.5;
        let empty = MAX_STARS - full - u8::from(half);
        let label = if clamped > 0.0 {
            format!("{:.1}", clamped)
        } else {
            "0.0".to_string()
        };
        Self {
            full,
            half,
            empty,
            label,
        }
    }
}

impl std::fmt::Display for StarRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", "★".repeat(usize::from(self.full)))?;
        if self.half {
            write!(f, "⯪")?;
        }
        write!(f, "{} {}", "☆".repeat(usize::from(self.empty)), self.label)
    }
}

/// Rendering-ready view of a record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Preview {
    pub record: Record,
    pub status: Option<StatusBadge>,
    pub published: Option<String>,
    pub started: Option<String>,
    pub finished: Option<String>,
    pub stars: StarRating,
    pub total_pages: String,
    pub visibility: &'static str,
}

impl Preview {
    pub fn from_record(record: &Record) -> Self {
        Self {
            record: record.clone(),
            status: StatusBadge::for_status(record.status),
            published: Some(record.published_date.as_str())
                .filter(|d| !d.is_empty())
                .map(format_date),
            started: record.start_date().map(format_date),
            finished: record.end_date().map(format_date),
            stars: StarRating::from_rating(record.rating),
            total_pages: group_thousands(record.total_pages),
            visibility: visibility_label(record.is_public),
        }
    }

    /// The record as pretty JSON, the way the preview pane shows it.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.record)?)
    }
}

impl std::fmt::Display for Preview {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let record = &self.record;
        let or_dash = |value: &str| {
            if value.is_empty() {
                "-".to_string()
            } else {
                value.to_string()
            }
        };

        writeln!(f, "제목: {}", or_dash(record.title.as_str()))?;
        writeln!(f, "저자: {}", or_dash(record.author.as_str()))?;
        match &self.status {
            Some(badge) => writeln!(f, "상태: {} ({})", badge.label, badge.color)?,
            None => writeln!(f, "상태: -")?,
        }
        writeln!(f, "출판일: {}", self.published.as_deref().unwrap_or("-"))?;
        writeln!(
            f,
            "독서 기간: {} ~ {}",
            self.started.as_deref().unwrap_or("-"),
            self.finished.as_deref().unwrap_or("-")
        )?;
        writeln!(f, "추천: {}", if record.recommended { "예" } else { "아니오" })?;
        writeln!(f, "별점: {}", self.stars)?;
        writeln!(f, "독후감: {}", or_dash(record.review().unwrap_or_default()))?;
        writeln!(f, "전체 페이지: {}", self.total_pages)?;
        for (index, quote) in record.quotes.iter().enumerate() {
            writeln!(f, "인용구 {}: {}", index + 1, format_quote(quote))?;
        }
        write!(f, "공개 여부: {}", self.visibility)
    }
}

/// `2000-01-01` becomes `2000년 1월 1일`; anything that is not a date is
/// shown as typed.
pub fn format_date(raw: &str) -> String {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|date| date.format("%Y년 %-m월 %-d일").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

pub fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

pub fn visibility_label(is_public: bool) -> &'static str {
    if is_public {
        "공개 상태"
    } else {
        "비공개 상태"
    }
}

fn format_quote(quote: &Quote) -> String {
    let text = if quote.text.is_empty() { "-" } else { quote.text.as_str() };
    match quote.page {
        Some(page) => format!("\"{}\" (p. {})", text, page),
        None => format!("\"{}\"", text),
    }
}
