use crate::error::BooklogError;
use crate::validate::Step;

/// Where the wizard currently is: one of the five step screens, or the
/// terminal completion screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Step(Step),
    Complete,
}

impl Route {
    pub fn step(&self) -> Option<Step> {
        match self {
            Route::Step(step) => Some(*step),
            Route::Complete => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Route::Complete)
    }
}

impl Default for Route {
    fn default() -> Self {
        Route::Step(Step::Step1)
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Route::Step(step) => write!(f, "/form/{}", step),
            Route::Complete => write!(f, "/form/complete"),
        }
    }
}

impl std::str::FromStr for Route {
    type Err = BooklogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segment = s.trim().trim_start_matches("/form/");
        if segment == "complete" {
            return Ok(Route::Complete);
        }
        segment
            .parse::<Step>()
            .map(Route::Step)
            .map_err(|_| BooklogError::InvalidRoute(s.to_string()))
    }
}
