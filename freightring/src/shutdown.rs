//! Cooperative shutdown signalling.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cloneable cancellation token polled by every simulation loop.
///
/// [`cancel`] may be called from any thread at any time, including a
/// signal handler thread. Observation is cooperative: trains and the
/// generator poll the token at the top of each main-loop iteration, so a
/// thread blocked in a gate wait or a timed delay does not observe
/// cancellation until that call returns. Shutdown latency is therefore
/// bounded by the longest pending delay or gate wait, and a permanently
/// stalled ring can hang shutdown entirely.
///
/// [`cancel`]: ShutdownToken::cancel
#[derive(Debug, Clone, Default)]
pub struct ShutdownToken {
    cancelled: Arc<AtomicBool>,
}

impl ShutdownToken {
    /// Creates a token in the not-cancelled state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests shutdown. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// True once [`cancel`] has been called on any clone.
    ///
    /// [`cancel`]: ShutdownToken::cancel
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_token_starts_clear() {
        let token = ShutdownToken::new();
        assert!(!token.is_cancelled());
    }

    #[test]
    fn test_cancel_is_visible_to_clones() {
        let token = ShutdownToken::new();
        let observer = token.clone();
        token.cancel();
        assert!(observer.is_cancelled());
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let token = ShutdownToken::new();
        token.cancel();
        token.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_cancel_crosses_threads() {
        let token = ShutdownToken::new();
        let remote = token.clone();
        thread::spawn(move || remote.cancel()).join().unwrap();
        assert!(token.is_cancelled());
    }
}
