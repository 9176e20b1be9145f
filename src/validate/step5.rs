//! Step 5: visibility. Any boolean is acceptable, so this step only
//! finalizes the wizard.

use super::StepResult;
use crate::record::Record;

pub fn validate(_record: &Record) -> StepResult {
    Ok(())
}
