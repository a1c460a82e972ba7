use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::event::{EditorEvent, EventHandler};

/// Raised by any event that leaves the surface stale; the app clears it
/// after re-rendering.
#[derive(Debug, Clone, Default)]
pub struct RedrawFlag {
    dirty: Arc<AtomicBool>,
}

impl RedrawFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_set(&self) -> bool {
        self.dirty.load(Ordering::Relaxed)
    }

    pub fn set(&self) {
        self.dirty.store(true, Ordering::Relaxed);
    }

    /// Returns whether a redraw was requested and resets the flag.
    pub fn take(&self) -> bool {
        self.dirty.swap(false, Ordering::Relaxed)
    }
}

impl EventHandler for RedrawFlag {
    fn handle_event(&mut self, event: &EditorEvent) {
        if event.invalidates_surface() {
            self.set();
        }
    }
}
