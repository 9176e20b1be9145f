//! The wizard controller: sole owner and writer of the record.

mod route;

pub use route::Route;

use serde_json::Value;
use tracing::debug;

use crate::error::Result;
use crate::options::SelectOption;
use crate::preview::PreviewProjector;
use crate::record::{FieldPath, Quote, Record};
use crate::storage::Persistence;
use crate::validate::{ErrorTree, Step, ValidationError};

/// Result of submitting the current step.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The step validated; the wizard moved to this route.
    Advanced(Route),
    /// The step has errors; the wizard stayed put.
    Rejected {
        step: Step,
        errors: Vec<ValidationError>,
        focus: Option<FieldPath>,
    },
}

/// One wizard session.
///
/// Field writes never validate. Validation runs only on [`Wizard::submit`].
/// Every change to the record is saved through the attached
/// [`Persistence`] and pushed to the attached [`PreviewProjector`].
#[derive(Debug, Default)]
pub struct Wizard {
    record: Record,
    errors: ErrorTree,
    route: Route,
    focus: Option<FieldPath>,
    persistence: Option<Persistence>,
    preview: Option<PreviewProjector>,
}

impl Wizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(record: Record) -> Self {
        Self {
            record,
            ..Self::default()
        }
    }

    /// Start a session from whatever `persistence` has saved, without
    /// validating it.
    pub fn resume(persistence: Persistence) -> Self {
        let mut record = Record::default();
        let restored = persistence.load_into(&mut record);
        let route = persistence.load_route().unwrap_or_default();
        debug!(restored, %route, "resumed wizard session");

        Self {
            record,
            route,
            persistence: Some(persistence),
            ..Self::default()
        }
    }

    pub fn with_persistence(mut self, persistence: Persistence) -> Self {
        self.persistence = Some(persistence);
        self
    }

    pub fn with_preview(mut self, preview: PreviewProjector) -> Self {
        self.preview = Some(preview);
        self
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    pub fn errors(&self) -> &ErrorTree {
        &self.errors
    }

    pub fn route(&self) -> Route {
        self.route
    }

    /// The field that should receive input focus after a rejected submit.
    pub fn focus(&self) -> Option<FieldPath> {
        self.focus
    }

    pub fn preview(&self) -> Option<&PreviewProjector> {
        self.preview.as_ref()
    }

    pub fn set_field(&mut self, path: FieldPath, value: Value) -> Result<()> {
        self.record.set_field(path, value)?;
        debug!(%path, "field updated");
        if path == FieldPath::Quotes {
            self.errors.clear_quotes();
            self.refocus();
        }
        self.changed();
        Ok(())
    }

    /// Bind a picked option's value into `path`.
    pub fn pick(&mut self, path: FieldPath, option: &SelectOption) -> Result<()> {
        self.set_field(path, Value::String(option.value.clone()))
    }

    pub fn add_quote(&mut self) {
        self.record.add_quote();
        self.changed();
    }

    pub fn remove_quote(&mut self, index: usize) -> Result<Quote> {
        let removed = self.record.remove_quote(index)?;
        self.errors.remove_quote(index);
        self.refocus();
        self.changed();
        Ok(removed)
    }

    /// Validate the current step and advance when it passes.
    pub fn submit(&mut self) -> SubmitOutcome {
        let Some(step) = self.route.step() else {
            return SubmitOutcome::Advanced(Route::Complete);
        };

        self.errors.clear_step(step);
        match step.validate(&self.record) {
            Ok(()) => {
                self.focus = None;
                let next = step.next().map_or(Route::Complete, Route::Step);
                debug!(%step, %next, "step accepted");
                self.go(next);
                SubmitOutcome::Advanced(next)
            }
            Err(errors) => {
                self.errors.extend(&errors);
                self.focus = self.errors.first();
                debug!(%step, count = errors.len(), "step rejected");
                SubmitOutcome::Rejected {
                    step,
                    errors,
                    focus: self.focus,
                }
            }
        }
    }

    /// Go to the previous step without validating. Only available on
    /// steps 2 to 5.
    pub fn back(&mut self) -> Option<Route> {
        let previous = Route::Step(self.route.step()?.prev()?);
        self.go(previous);
        Some(previous)
    }

    /// Jump straight to any step, whatever was completed before.
    pub fn navigate(&mut self, step: Step) {
        self.go(Route::Step(step));
    }

    /// Start over with a fresh record and forget the saved session.
    pub fn reset(&mut self) {
        self.record = Record::default();
        self.errors = ErrorTree::default();
        self.focus = None;
        self.route = Route::default();
        if let Some(persistence) = &self.persistence {
            persistence.clear();
        }
        if let Some(preview) = &mut self.preview {
            preview.update(&self.record);
        }
    }

    fn go(&mut self, route: Route) {
        self.route = route;
        self.focus = None;
        if let Some(persistence) = &self.persistence {
            persistence.save_route(route);
        }
    }

    /// Keep a pending focus pointing at a field that still has an error.
    fn refocus(&mut self) {
        if self.focus.is_some() {
            self.focus = self.errors.first();
        }
    }

    fn changed(&mut self) {
        if let Some(persistence) = &self.persistence {
            persistence.save(&self.record);
        }
        if let Some(preview) = &mut self.preview {
            preview.update(&self.record);
        }
    }
}
