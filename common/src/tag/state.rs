use crate::error::WriteError;

/// Phase of a tag session.
///
/// `TagSession::state` only ever reports `Idle` or `Listening`, since every
/// operation settles back to `Idle`. `Succeeded` and `Failed` are reached
/// through [`WriteOutcome::state`] and describe how a write settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Listening,
    Succeeded,
    Failed,
}

/// How a write request settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Succeeded,
    Failed(WriteError),
    /// The caller cancelled, or a newer operation replaced this one.
    Cancelled,
}

impl WriteOutcome {
    pub fn state(&self) -> SessionState {
        match self {
            WriteOutcome::Succeeded => SessionState::Succeeded,
            WriteOutcome::Failed(_) => SessionState::Failed,
            WriteOutcome::Cancelled => SessionState::Idle,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, WriteOutcome::Succeeded)
    }
}
