//! Debounced, read-only preview of the record being edited.

mod debounce;
mod render;

pub use debounce::Debouncer;
pub use render::{
    format_date, group_thousands, visibility_label, Preview, StarRating, StatusBadge,
};

use std::time::Duration;

use tokio::sync::watch;

use crate::config::DEFAULT_DEBOUNCE_MS;
use crate::error::Result;
use crate::record::Record;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(DEFAULT_DEBOUNCE_MS);

/// Follows the live record and republishes it once typing settles.
#[derive(Debug)]
pub struct PreviewProjector {
    debouncer: Debouncer<Record>,
}

impl PreviewProjector {
    /// Must be called from within a Tokio runtime.
    pub fn new(initial: &Record, delay: Duration) -> Result<Self> {
        Ok(Self {
            debouncer: Debouncer::new(initial.clone(), delay)?,
        })
    }

    /// Schedule `record` for projection, replacing anything still pending.
    pub fn update(&mut self, record: &Record) {
        self.debouncer.push(record.clone());
    }

    pub fn cancel(&mut self) {
        self.debouncer.cancel();
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn feed(&self) -> PreviewFeed {
        PreviewFeed {
            rx: self.debouncer.subscribe(),
        }
    }
}

/// Read side of a [`PreviewProjector`].
#[derive(Debug, Clone)]
pub struct PreviewFeed {
    rx: watch::Receiver<Record>,
}

impl PreviewFeed {
    /// Preview of the most recently projected record.
    pub fn latest(&self) -> Preview {
        Preview::from_record(&self.rx.borrow())
    }

    /// Wait for the next projection. Returns `None` once the projector is
    /// gone.
    pub async fn next(&mut self) -> Option<Preview> {
        self.rx.changed().await.ok()?;
        let record = self.rx.borrow_and_update();
        Some(Preview::from_record(&record))
    }
}
