//! Liveness of the view that started an operation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Handed to `confirm`/`reject` by the view that triggered them. The view
/// calls [`ViewToken::tear_down`] when it goes away; the workflow then keeps
/// the network call running but does not report its result to the view.
///
/// Clones share the same flag.
#[derive(Debug, Clone)]
pub struct ViewToken {
    torn_down: Arc<AtomicBool>,
}

impl ViewToken {
    pub fn new() -> Self {
        Self {
            torn_down: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Marks the view as gone. Irreversible.
    pub fn tear_down(&self) {
        self.torn_down.store(true, Ordering::Release);
    }

    pub fn is_live(&self) -> bool {
        !self.torn_down.load(Ordering::Acquire)
    }
}

impl Default for ViewToken {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_teardown() {
        let token = ViewToken::new();
        let held_by_view = token.clone();
        assert!(token.is_live());
        held_by_view.tear_down();
        assert!(!token.is_live());
    }
}
