pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod options;
pub mod preview;
pub mod record;
pub mod storage;
pub mod validate;
pub mod wizard;

pub use config::WizardConfig;
pub use error::{BooklogError, Result};
pub use record::{FieldPath, Record};
pub use wizard::{Route, SubmitOutcome, Wizard};
