//! Location history.

use std::sync::{Mutex, MutexGuard};

use tracing::debug;

/// Changes the current console location.
pub trait Navigator: Send + Sync + std::fmt::Debug {
    /// Go to `path`, keeping the current entry in history.
    fn push(&self, path: &str);

    /// Go to `path`, replacing the current entry.
    fn replace(&self, path: &str);

    /// Return to the previous entry. Does nothing at the first entry.
    fn back(&self);

    /// The current location.
    fn location(&self) -> String;
}

/// In-process history stack.
#[derive(Debug)]
pub struct HistoryNavigator {
    entries: Mutex<Vec<String>>,
}

impl HistoryNavigator {
    /// History starting at `initial`.
    pub fn new(initial: &str) -> Self {
        Self {
            entries: Mutex::new(vec![initial.to_string()]),
        }
    }

    /// Every entry, oldest first.
    pub fn entries(&self) -> Vec<String> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for HistoryNavigator {
    fn default() -> Self {
        Self::new("/")
    }
}

impl Navigator for HistoryNavigator {
    fn push(&self, path: &str) {
        debug!(to = %path, "Navigate");
        self.lock().push(path.to_string());
    }

    fn replace(&self, path: &str) {
        debug!(to = %path, "Navigate (replace)");
        let mut entries = self.lock();
        entries.pop();
        entries.push(path.to_string());
    }

    fn back(&self) {
        let mut entries = self.lock();
        if entries.len() > 1 {
            entries.pop();
        }
    }

    fn location(&self) -> String {
        self.lock().last().cloned().unwrap_or_else(|| "/".to_string())
    }
}
