//! Per-step validation of the reading record.
//!
//! Every validator is a pure function of the record and reports all
//! problems of its step in one pass.

mod errors;
pub mod step1;
pub mod step2;
pub mod step3;
pub mod step4;
pub mod step5;

pub use errors::ErrorTree;

use serde::{Deserialize, Serialize};

use crate::error::BooklogError;
use crate::record::{FieldPath, Record};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub path: FieldPath,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: FieldPath, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

pub type StepResult = std::result::Result<(), Vec<ValidationError>>;

/// Collects the errors of one validation pass.
#[derive(Debug, Default)]
pub(crate) struct Issues(Vec<ValidationError>);

impl Issues {
    pub(crate) fn push(&mut self, path: FieldPath, message: &str) {
        self.0.push(ValidationError::new(path, message));
    }

    pub(crate) fn finish(self) -> StepResult {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(self.0)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    Step1,
    Step2,
    Step3,
    Step4,
    Step5,
}

impl Step {
    pub const ALL: [Step; 5] = [Step::Step1, Step::Step2, Step::Step3, Step::Step4, Step::Step5];

    pub fn number(&self) -> u8 {
        match self {
            Step::Step1 => 1,
            Step::Step2 => 2,
            Step::Step3 => 3,
            Step::Step4 => 4,
            Step::Step5 => 5,
        }
    }

    pub fn from_number(n: u8) -> Option<Step> {
        Step::ALL.get(usize::from(n).checked_sub(1)?).copied()
    }

    pub fn next(&self) -> Option<Step> {
        Step::from_number(self.number() + 1)
    }

    pub fn prev(&self) -> Option<Step> {
        Step::from_number(self.number() - 1)
    }

    /// Run this step's validator against the record.
    pub fn validate(&self, record: &Record) -> StepResult {
        match self {
            Step::Step1 => step1::validate(record),
            Step::Step2 => step2::validate(record),
            Step::Step3 => step3::validate(record),
            Step::Step4 => step4::validate(record),
            Step::Step5 => step5::validate(record),
        }
    }

    /// Whether `path` is one of the fields this step edits.
    pub fn owns(&self, path: &FieldPath) -> bool {
        match self {
            Step::Step1 => matches!(
                path,
                FieldPath::Title
                    | FieldPath::Author
                    | FieldPath::Status
                    | FieldPath::PublishedDate
                    | FieldPath::StartDate
                    | FieldPath::EndDate
            ),
            Step::Step2 => matches!(path, FieldPath::Recommended | FieldPath::Rating),
            Step::Step3 => matches!(path, FieldPath::Rating | FieldPath::Review),
            Step::Step4 => matches!(
                path,
                FieldPath::TotalPages
                    | FieldPath::Quotes
                    | FieldPath::QuoteText(_)
                    | FieldPath::QuotePage(_)
            ),
            Step::Step5 => matches!(path, FieldPath::IsPublic),
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "step{}", self.number())
    }
}

impl std::str::FromStr for Step {
    type Err = BooklogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim().trim_start_matches("step");
        digits
            .parse::<u8>()
            .ok()
            .and_then(Step::from_number)
            .ok_or_else(|| BooklogError::InvalidStep(s.to_string()))
    }
}
