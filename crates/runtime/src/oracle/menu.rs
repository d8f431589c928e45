//! Menu oracle that queues requests instead of drawing anything.
use std::sync::Mutex;

use storage_core::{MenuOracle, MenuRequest};

/// Records every [`MenuRequest`] until drained.
#[derive(Debug, Default)]
pub struct RecordingMenuOracle {
    requests: Mutex<Vec<MenuRequest>>,
}

impl RecordingMenuOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns the queued requests, oldest first.
    pub fn drain(&self) -> Vec<MenuRequest> {
        match self.requests.lock() {
            Ok(mut requests) => std::mem::take(&mut *requests),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }

    pub fn len(&self) -> usize {
        self.requests.lock().map_or(0, |requests| requests.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl MenuOracle for RecordingMenuOracle {
    fn show_menu(&self, request: MenuRequest) {
        tracing::debug!(target = %request.target, farmer = %request.farmer, "menu requested");
        match self.requests.lock() {
            Ok(mut requests) => requests.push(request),
            Err(poisoned) => poisoned.into_inner().push(request),
        }
    }
}
