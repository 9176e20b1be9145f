use std::collections::BTreeMap;

use super::{Step, ValidationError};
use crate::record::FieldPath;

/// Step 1 fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityErrors {
    pub title: Option<String>,
    pub author: Option<String>,
    pub status: Option<String>,
    pub published_date: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Steps 2 and 3 fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssessmentErrors {
    pub recommended: Option<String>,
    pub rating: Option<String>,
    pub review: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteErrors {
    pub text: Option<String>,
    pub page: Option<String>,
}

/// Step 4 fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageErrors {
    pub total_pages: Option<String>,
    pub quotes: Option<String>,
    pub items: BTreeMap<usize, QuoteErrors>,
}

/// Step 5 fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibilityErrors {
    pub is_public: Option<String>,
}

/// Field errors currently attached to the record, grouped the way the
/// steps present them.
///
/// Each field keeps the first message reported for it. Document order is
/// the order fields appear on screen: identity, assessment, pages (total
/// pages, the list, then each quote's text and page), visibility.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorTree {
    pub identity: IdentityErrors,
    pub assessment: AssessmentErrors,
    pub pages: PageErrors,
    pub visibility: VisibilityErrors,
}

impl ErrorTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, error: &ValidationError) {
        let slot = self.slot_mut(error.path);
        if slot.is_none() {
            *slot = Some(error.message.clone());
        }
    }

    pub fn extend<'a>(&mut self, errors: impl IntoIterator<Item = &'a ValidationError>) {
        for error in errors {
            self.insert(error);
        }
    }

    pub fn get(&self, path: FieldPath) -> Option<&str> {
        let slot = match path {
            FieldPath::Title => &self.identity.title,
            FieldPath::Author => &self.identity.author,
            FieldPath::Status => &self.identity.status,
            FieldPath::PublishedDate => &self.identity.published_date,
            FieldPath::StartDate => &self.identity.start_date,
            FieldPath::EndDate => &self.identity.end_date,
            FieldPath::Recommended => &self.assessment.recommended,
            FieldPath::Rating => &self.assessment.rating,
            FieldPath::Review => &self.assessment.review,
            FieldPath::TotalPages => &self.pages.total_pages,
            FieldPath::Quotes => &self.pages.quotes,
            FieldPath::QuoteText(i) => return self.pages.items.get(&i)?.text.as_deref(),
            FieldPath::QuotePage(i) => return self.pages.items.get(&i)?.page.as_deref(),
            FieldPath::IsPublic => &self.visibility.is_public,
        };
        slot.as_deref()
    }

    /// Drop every error on a field owned by `step`.
    pub fn clear_step(&mut self, step: Step) {
        match step {
            Step::Step1 => self.identity = IdentityErrors::default(),
            Step::Step2 => {
                self.assessment.recommended = None;
                self.assessment.rating = None;
            }
            Step::Step3 => {
                self.assessment.rating = None;
                self.assessment.review = None;
            }
            Step::Step4 => self.pages = PageErrors::default(),
            Step::Step5 => self.visibility = VisibilityErrors::default(),
        }
    }

    /// Drop the errors of the quote at `index` and move the errors of every
    /// later quote down one slot, following the list.
    pub fn remove_quote(&mut self, index: usize) {
        let items = std::mem::take(&mut self.pages.items);
        self.pages.items = items
            .into_iter()
            .filter(|(i, _)| *i != index)
            .map(|(i, errors)| if i > index { (i - 1, errors) } else { (i, errors) })
            .collect();
    }

    /// Forget every per-quote error, for when the whole list is replaced.
    pub fn clear_quotes(&mut self) {
        self.pages.items.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.first().is_none()
    }

    /// The first field in document order that carries an error.
    pub fn first(&self) -> Option<FieldPath> {
        self.entries().into_iter().next().map(|(path, _)| path)
    }

    /// All errors in document order.
    pub fn entries(&self) -> Vec<(FieldPath, &str)> {
        let mut out = Vec::new();

        let identity = &self.identity;
        visit(&mut out, FieldPath::Title, &identity.title);
        visit(&mut out, FieldPath::Author, &identity.author);
        visit(&mut out, FieldPath::Status, &identity.status);
        visit(&mut out, FieldPath::PublishedDate, &identity.published_date);
        visit(&mut out, FieldPath::StartDate, &identity.start_date);
        visit(&mut out, FieldPath::EndDate, &identity.end_date);

        let assessment = &self.assessment;
        visit(&mut out, FieldPath::Recommended, &assessment.recommended);
        visit(&mut out, FieldPath::Rating, &assessment.rating);
        visit(&mut out, FieldPath::Review, &assessment.review);

        let pages = &self.pages;
        visit(&mut out, FieldPath::TotalPages, &pages.total_pages);
        visit(&mut out, FieldPath::Quotes, &pages.quotes);
        for (&index, quote) in &pages.items {
            visit(&mut out, FieldPath::QuoteText(index), &quote.text);
            visit(&mut out, FieldPath::QuotePage(index), &quote.page);
        }

        visit(&mut out, FieldPath::IsPublic, &self.visibility.is_public);
        out
    }

    fn slot_mut(&mut self, path: FieldPath) -> &mut Option<String> {
        match path {
            FieldPath::Title => &mut self.identity.title,
            FieldPath::Author => &mut self.identity.author,
            FieldPath::Status => &mut self.identity.status,
            FieldPath::PublishedDate => &mut self.identity.published_date,
            FieldPath::StartDate => &mut self.identity.start_date,
            FieldPath::EndDate => &mut self.identity.end_date,
            FieldPath::Recommended => &mut self.assessment.recommended,
            FieldPath::Rating => &mut self.assessment.rating,
            FieldPath::Review => &mut self.assessment.review,
            FieldPath::TotalPages => &mut self.pages.total_pages,
            FieldPath::Quotes => &mut self.pages.quotes,
            FieldPath::QuoteText(i) => &mut self.pages.items.entry(i).or_default().text,
            FieldPath::QuotePage(i) => &mut self.pages.items.entry(i).or_default().page,
            FieldPath::IsPublic => &mut self.visibility.is_public,
        }
    }
}

fn visit<'a>(out: &mut Vec<(FieldPath, &'a str)>, path: FieldPath, slot: &'a Option<String>) {
    if let Some(message) = slot {
        out.push((path, message.as_str()));
    }
}
