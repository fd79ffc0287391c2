//! Outcome of dispatching one input line.

use crate::binder::BindingError;
use serde_json::Value;

/// What happened to a dispatched line.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    /// The command ran; carries its output.
    Executed(Value),
    /// Help text was written instead of running anything.
    Help,
    /// A confirmation prompt was written; the next line is the reply.
    Pending,
    /// A pending confirmation was declined.
    Cancelled,
    /// No module or command matched.
    NotFound,
    /// The command exists but is not active in the current mode.
    WrongMode,
    /// Arguments could not be bound; the command did not run.
    InvalidArguments(BindingError),
    /// The handler returned an error.
    Failed(String),
}

impl DispatchOutcome {
    /// Whether the line ran a command or showed help.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Executed(_) | Self::Help)
    }

    /// Whether the line was rejected or its command failed.
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Self::NotFound | Self::WrongMode | Self::InvalidArguments(_) | Self::Failed(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert!(DispatchOutcome::Executed(Value::Null).is_success());
        assert!(DispatchOutcome::Help.is_success());
        assert!(DispatchOutcome::WrongMode.is_failure());
        assert!(DispatchOutcome::Failed("x".into()).is_failure());
        assert!(!DispatchOutcome::Pending.is_success());
        assert!(!DispatchOutcome::Pending.is_failure());
        assert!(!DispatchOutcome::Cancelled.is_failure());
    }
}
