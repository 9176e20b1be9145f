use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use super::{Quote, ReadingStatus, Record};
use crate::error::{BooklogError, Result};

/// Typed address of a single field within a [`Record`].
///
/// Displays as the dotted path used by the persisted layout and error
/// reports, e.g. `publishedDate` or `quotes.0.page`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldPath {
    Title,
    Author,
    Status,
    PublishedDate,
    StartDate,
    EndDate,
    Recommended,
    Rating,
    Review,
    Quotes,
    QuoteText(usize),
    QuotePage(usize),
    TotalPages,
    IsPublic,
}

impl FieldPath {
    /// Top-level keys of the persisted record, in layout order.
    pub const TOP_LEVEL: [FieldPath; 12] = [
        FieldPath::Title,
        FieldPath::Author,
        FieldPath::Status,
        FieldPath::PublishedDate,
        FieldPath::StartDate,
        FieldPath::EndDate,
        FieldPath::Recommended,
        FieldPath::Rating,
        FieldPath::Review,
        FieldPath::Quotes,
        FieldPath::TotalPages,
        FieldPath::IsPublic,
    ];

    /// Parse raw user input into the JSON value this field accepts.
    ///
    /// This is the input layer: non-numeric text never reaches a numeric
    /// field.
    pub fn parse_input(&self, raw: &str) -> Result<Value> {
        let invalid = || BooklogError::InvalidValue {
            path: self.to_string(),
            value: raw.to_string(),
        };

        match self {
            FieldPath::Title
            | FieldPath::Author
            | FieldPath::Status
            | FieldPath::PublishedDate
            | FieldPath::StartDate
            | FieldPath::EndDate
            | FieldPath::Review
            | FieldPath::QuoteText(_) => Ok(Value::String(raw.to_string())),
            FieldPath::Recommended | FieldPath::IsPublic => {
                match raw.trim().to_lowercase().as_str() {
                    "true" | "yes" | "y" | "1" => Ok(Value::Bool(true)),
                    "false" | "no" | "n" | "0" => Ok(Value::Bool(false)),
                    _ => Err(invalid()),
                }
            }
            FieldPath::Rating => {
                let rating: f64 = raw.trim().parse().map_err(|_| invalid())?;
                serde_json::Number::from_f64(rating)
                    .map(Value::Number)
                    .ok_or_else(invalid)
            }
            FieldPath::TotalPages => {
                let pages: i64 = raw.trim().parse().map_err(|_| invalid())?;
                Ok(Value::from(pages))
            }
            FieldPath::QuotePage(_) => {
                let raw = raw.trim();
                if raw.is_empty() {
                    return Ok(Value::Null);
                }
                let page: i64 = raw.parse().map_err(|_| invalid())?;
                Ok(Value::from(page))
            }
            FieldPath::Quotes => Ok(serde_json::from_str(raw)?),
        }
    }

    fn expected(&self) -> &'static str {
        match self {
            FieldPath::Title
            | FieldPath::Author
            | FieldPath::Status
            | FieldPath::PublishedDate
            | FieldPath::QuoteText(_) => "a string",
            FieldPath::StartDate | FieldPath::EndDate | FieldPath::Review => "a string or null",
            FieldPath::Recommended | FieldPath::IsPublic => "a boolean",
            FieldPath::Rating => "a number",
            FieldPath::TotalPages => "an integer",
            FieldPath::QuotePage(_) => "an integer or null",
            FieldPath::Quotes => "a list of quotes",
        }
    }

    fn take<T: DeserializeOwned>(&self, value: Value) -> Result<T> {
        serde_json::from_value(value).map_err(|_| BooklogError::TypeMismatch {
            path: self.to_string(),
            expected: self.expected(),
        })
    }
}

impl std::fmt::Display for FieldPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldPath::Title => write!(f, "title"),
            FieldPath::Author => write!(f, "author"),
            FieldPath::Status => write!(f, "status"),
            FieldPath::PublishedDate => write!(f, "publishedDate"),
            FieldPath::StartDate => write!(f, "startDate"),
            FieldPath::EndDate => write!(f, "endDate"),
            FieldPath::Recommended => write!(f, "recommended"),
            FieldPath::Rating => write!(f, "rating"),
            FieldPath::Review => write!(f, "review"),
            FieldPath::Quotes => write!(f, "quotes"),
            FieldPath::QuoteText(i) => write!(f, "quotes.{}.text", i),
            FieldPath::QuotePage(i) => write!(f, "quotes.{}.page", i),
            FieldPath::TotalPages => write!(f, "totalPages"),
            FieldPath::IsPublic => write!(f, "isPublic"),
        }
    }
}

impl std::str::FromStr for FieldPath {
    type Err = BooklogError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let unknown = || BooklogError::UnknownField(s.to_string());

        let mut parts = s.split('.');
        let head = parts.next().unwrap_or_default();
        let path = match (head, parts.next(), parts.next(), parts.next()) {
            ("title", None, _, _) => FieldPath::Title,
            ("author", None, _, _) => FieldPath::Author,
            ("status", None, _, _) => FieldPath::Status,
            ("publishedDate", None, _, _) => FieldPath::PublishedDate,
            ("startDate", None, _, _) => FieldPath::StartDate,
            ("endDate", None, _, _) => FieldPath::EndDate,
            ("recommended", None, _, _) => FieldPath::Recommended,
            ("rating", None, _, _) => FieldPath::Rating,
            ("review", None, _, _) => FieldPath::Review,
            ("quotes", None, _, _) => FieldPath::Quotes,
            ("totalPages", None, _, _) => FieldPath::TotalPages,
            ("isPublic", None, _, _) => FieldPath::IsPublic,
            ("quotes", Some(index), Some(leaf), None) => {
                let index: usize = index.parse().map_err(|_| unknown())?;
                match leaf {
                    "text" => FieldPath::QuoteText(index),
                    "page" => FieldPath::QuotePage(index),
                    _ => return Err(unknown()),
                }
            }
            _ => return Err(unknown()),
        };
        Ok(path)
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FieldPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

impl Record {
    /// Write one field. Never validates; a value of the wrong type is
    /// rejected instead of coerced.
    pub fn set_field(&mut self, path: FieldPath, value: Value) -> Result<()> {
        match path {
            FieldPath::Title => self.title = path.take(value)?,
            FieldPath::Author => self.author = path.take(value)?,
            FieldPath::Status => {
                let raw: String = path.take(value)?;
                self.status = raw
                    .parse::<ReadingStatus>()
                    .map_err(|_| BooklogError::InvalidValue {
                        path: path.to_string(),
                        value: raw,
                    })?;
            }
            FieldPath::PublishedDate => self.published_date = path.take(value)?,
            FieldPath::StartDate => self.start_date = path.take(value)?,
            FieldPath::EndDate => self.end_date = path.take(value)?,
            FieldPath::Recommended => self.recommended = path.take(value)?,
            FieldPath::Rating => self.rating = path.take(value)?,
            FieldPath::Review => self.review = path.take(value)?,
            FieldPath::Quotes => self.quotes = path.take::<Vec<Quote>>(value)?,
            FieldPath::QuoteText(index) => {
                let text = path.take(value)?;
                self.quote_mut(index)?.text = text;
            }
            FieldPath::QuotePage(index) => {
                let page = path.take(value)?;
                self.quote_mut(index)?.page = page;
            }
            FieldPath::TotalPages => self.total_pages = path.take(value)?,
            FieldPath::IsPublic => self.is_public = path.take(value)?,
        }
        Ok(())
    }

    fn quote_mut(&mut self, index: usize) -> Result<&mut Quote> {
        let len = self.quotes.len();
        self.quotes
            .get_mut(index)
            .ok_or(BooklogError::QuoteOutOfRange { index, len })
    }
}
