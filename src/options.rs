//! Pick-one-of-N options for the title and author fields.

use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{BooklogError, Result};
use crate::record::FieldPath;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Options whose label contains `query`, ignoring case. An empty query
/// keeps every option.
pub fn filter_options<'a>(options: &'a [SelectOption], query: &str) -> Vec<&'a SelectOption> {
    if query.is_empty() {
        return options.iter().collect();
    }
    let query = query.to_lowercase();
    options
        .iter()
        .filter(|option| option.label.to_lowercase().contains(&query))
        .collect()
}

/// Supplies the options for a picker. May be slow.
pub trait OptionSource {
    fn fetch_options(&self) -> impl Future<Output = Result<Vec<SelectOption>>> + Send;
}

/// A fixed list of options with an optional simulated fetch delay.
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    options: Vec<SelectOption>,
    latency: Duration,
}

impl StaticCatalog {
    pub fn new(options: Vec<SelectOption>) -> Self {
        Self {
            options,
            latency: Duration::ZERO,
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn book_titles() -> Self {
        Self::from_pairs(&[
            ("1", "해리포터와 마법사의 돌"),
            ("2", "해리포터와 비밀의 방"),
            ("3", "해리포터와 아즈카반의 죄수"),
            ("4", "해리포터와 불의 잔"),
            ("5", "해리포터와 불사조 기사단"),
            ("6", "해리포터와 혼혈 왕자"),
            ("7", "해리포터와 죽음의 성물"),
            ("8", "반지의 제왕: 반지 원정대"),
            ("9", "반지의 제왕: 두 개의 탑"),
            ("10", "반지의 제왕: 왕의 귀환"),
        ])
    }

    pub fn authors() -> Self {
        Self::from_pairs(&[
            ("1", "J.K. 롤링"),
            ("2", "J.R.R. 톨킨"),
            ("3", "조지 R.R. 마틴"),
            ("4", "스티븐 킹"),
            ("5", "무라카미 하루키"),
            ("6", "김영하"),
            ("7", "한강"),
            ("8", "이상"),
        ])
    }

    fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self::new(
            pairs
                .iter()
                .map(|(value, label)| SelectOption::new(*value, *label))
                .collect(),
        )
    }
}

impl OptionSource for StaticCatalog {
    fn fetch_options(&self) -> impl Future<Output = Result<Vec<SelectOption>>> + Send {
        let options = self.options.clone();
        let latency = self.latency;
        async move {
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }
            Ok(options)
        }
    }
}

/// The built-in catalogs and the field each one fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Catalog {
    Titles,
    Authors,
}

impl Catalog {
    pub fn source(&self) -> StaticCatalog {
        match self {
            Catalog::Titles => StaticCatalog::book_titles(),
            Catalog::Authors => StaticCatalog::authors(),
        }
    }

    pub fn bound_field(&self) -> FieldPath {
        match self {
            Catalog::Titles => FieldPath::Title,
            Catalog::Authors => FieldPath::Author,
        }
    }
}

impl std::fmt::Display for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Catalog::Titles => write!(f, "titles"),
            Catalog::Authors => write!(f, "authors"),
        }
    }
}

impl std::str::FromStr for Catalog {
    type Err = BooklogError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "titles" | "title" => Ok(Catalog::Titles),
            "authors" | "author" => Ok(Catalog::Authors),
            _ => Err(BooklogError::InvalidCatalog(s.to_string())),
        }
    }
}
