mod field;

pub use field::FieldPath;

use serde::{Deserialize, Serialize};

use crate::error::{BooklogError, Result};

/// Page number given to a freshly added quote.
pub const DEFAULT_QUOTE_PAGE: i64 = 1;
pub const DEFAULT_TOTAL_PAGES: i64 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReadingStatus {
    #[default]
    #[serde(rename = "")]
    Unset,
    ToRead,
    Reading,
    Finished,
    OnHold,
}

impl ReadingStatus {
    pub fn is_set(&self) -> bool {
        !matches!(self, ReadingStatus::Unset)
    }
}

impl std::fmt::Display for ReadingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadingStatus::Unset => write!(f, ""),
            ReadingStatus::ToRead => write!(f, "to_read"),
            ReadingStatus::Reading => write!(f, "reading"),
            ReadingStatus::Finished => write!(f, "finished"),
            ReadingStatus::OnHold => write!(f, "on_hold"),
        }
    }
}

impl std::str::FromStr for ReadingStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "" => Ok(ReadingStatus::Unset),
            "to_read" | "toread" => Ok(ReadingStatus::ToRead),
            "reading" => Ok(ReadingStatus::Reading),
            "finished" => Ok(ReadingStatus::Finished),
            "on_hold" | "onhold" => Ok(ReadingStatus::OnHold),
            _ => Err(format!("Invalid reading status: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
}

impl Quote {
    pub fn new(text: impl Into<String>, page: Option<i64>) -> Self {
        Self {
            text: text.into(),
            page,
        }
    }
}

impl Default for Quote {
    fn default() -> Self {
        Self {
            text: String::new(),
            page: Some(DEFAULT_QUOTE_PAGE),
        }
    }
}

/// The in-progress reading record edited across all five steps.
///
/// Serializes with the camelCase keys of the persisted layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub title: String,
    pub author: String,
    pub status: ReadingStatus,
    pub published_date: String,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    pub recommended: bool,
    pub rating: f64,
    #[serde(default)]
    pub review: Option<String>,
    pub quotes: Vec<Quote>,
    pub total_pages: i64,
    pub is_public: bool,
}

impl Default for Record {
    fn default() -> Self {
        Self {
            title: String::new(),
            author: String::new(),
            status: ReadingStatus::Unset,
            published_date: String::new(),
            start_date: None,
            end_date: None,
            recommended: false,
            rating: 0.0,
            review: None,
            quotes: vec![Quote::default()],
            total_pages: DEFAULT_TOTAL_PAGES,
            is_public: false,
        }
    }
}

impl Record {
    pub fn start_date(&self) -> Option<&str> {
        present(&self.start_date)
    }

    pub fn end_date(&self) -> Option<&str> {
        present(&self.end_date)
    }

    pub fn review(&self) -> Option<&str> {
        present(&self.review)
    }

    pub fn add_quote(&mut self) {
        self.quotes.push(Quote::default());
    }

    pub fn remove_quote(&mut self, index: usize) -> Result<Quote> {
        let len = self.quotes.len();
        if index >= len {
            return Err(BooklogError::QuoteOutOfRange { index, len });
        }
        if len == 1 {
            return Err(BooklogError::LastQuote);
        }
        Ok(self.quotes.remove(index))
    }
}

/// An empty string counts as absent.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
