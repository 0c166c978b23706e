use bevy::reflect::Reflect;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The outcome a behavior-tree Task reports to its parent on every tick.
///
/// Unlike a long-lived lifecycle marker, a Status is re-derived each tick;
/// the parent tree decides what to do with it (keep ticking, move on to a
/// sibling, bubble it up, etc.).
///
/// - Running is the only non-terminal Status.
/// - Success and Failure are terminal; once a Task reports either, the
///   executor is expected to call its completion hook and deschedule it.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Reflect)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Status {
    /// The Task has not finished yet and wants to be ticked again.
    Running,

    /// The Task did what it was supposed to.
    Success,

    /// The Task gave up, or the condition it guards no longer holds.
    ///
    /// This is an ordinary branching signal for the parent tree,
    /// NOT an error report.
    Failure,
}

impl Status {
    /// A shorthand for checking if this is Running.
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }

    /// A shorthand for checking if this is Success.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// A shorthand for checking if this is Failure.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure)
    }

    /// A shorthand for checking if the Task is done (Success or Failure).
    pub fn is_terminal(&self) -> bool {
        match self {
            Self::Success => true,
            Self::Failure => true,
            Self::Running => false,
        }
    }
}
