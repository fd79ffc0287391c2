//! Mutable session state shared with commands.

use parking_lot::Mutex;
use std::sync::Arc;

/// Snapshot of the session's mutable state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    /// Current mode.
    pub mode: String,
    /// Raw command strings of successful runs, oldest first.
    pub history: Vec<String>,
    /// Raw command waiting for a yes/no reply.
    pub pending: Option<String>,
    /// Listing of every visible module and command.
    pub catalog: Vec<String>,
}

/// Cheaply clonable handle to the session state.
///
/// The session registers its handle as a dependency, so commands can
/// declare `Param::inject::<SessionHandle>(..)` to read or change the mode
/// and history. Locks are held only inside these methods.
#[derive(Debug, Clone, Default)]
pub struct SessionHandle {
    inner: Arc<Mutex<SessionState>>,
}

impl SessionHandle {
    /// New state starting in `mode`.
    pub fn new(mode: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(SessionState {
                mode: mode.into(),
                ..SessionState::default()
            })),
        }
    }

    /// Current mode.
    pub fn mode(&self) -> String {
        self.inner.lock().mode.clone()
    }

    /// Switch mode. Any string is accepted.
    pub fn set_mode(&self, mode: impl Into<String>) {
        self.inner.lock().mode = mode.into();
    }

    /// Recorded history.
    pub fn history(&self) -> Vec<String> {
        self.inner.lock().history.clone()
    }

    pub(crate) fn push_history(&self, command: impl Into<String>) {
        self.inner.lock().history.push(command.into());
    }

    /// Command awaiting confirmation.
    pub fn pending(&self) -> Option<String> {
        self.inner.lock().pending.clone()
    }

    pub(crate) fn set_pending(&self, command: impl Into<String>) {
        self.inner.lock().pending = Some(command.into());
    }

    pub(crate) fn take_pending(&self) -> Option<String> {
        self.inner.lock().pending.take()
    }

    /// Listing of visible modules and commands.
    pub fn catalog(&self) -> Vec<String> {
        self.inner.lock().catalog.clone()
    }

    pub(crate) fn set_catalog(&self, catalog: Vec<String>) {
        self.inner.lock().catalog = catalog;
    }

    /// Copy of the whole state.
    pub fn snapshot(&self) -> SessionState {
        self.inner.lock().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let handle = SessionHandle::new("normal");
        let other = handle.clone();
        other.set_mode("debug");
        other.push_history("a b");

        assert_eq!(handle.mode(), "debug");
        assert_eq!(handle.history(), vec!["a b"]);
    }

    #[test]
    fn test_pending_is_taken_once() {
        let handle = SessionHandle::new("normal");
        handle.set_pending("rm all");
        assert_eq!(handle.pending().as_deref(), Some("rm all"));
        assert_eq!(handle.take_pending().as_deref(), Some("rm all"));
        assert_eq!(handle.take_pending(), None);
        assert_eq!(handle.snapshot().pending, None);
    }
}
