//! Controller lifecycle tracking.

use crate::error::CoreError;

/// Lifecycle states of the cache controller.
///
/// A controller normally moves `Installing -> Waiting -> Active`. The
/// `Waiting` gate exists so a new controller version does not take over
/// pages an older version still controls; both eager activation at the end
/// of install and an explicit skip-waiting message collapse it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// Install event dispatched, partitions being precached.
    Installing,
    /// Installed successfully, waiting to take over page control.
    Waiting,
    /// Controller is the sole responder for pages under its scope.
    Active,
    /// Controller has been replaced and will never serve again.
    Redundant,
}

impl LifecycleState {
    /// Whether fetch interception is allowed in this state.
    pub fn can_intercept(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// Whether this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Redundant)
    }

    /// Attempt a transition, returning the new state.
    pub fn transition(self, to: LifecycleState) -> Result<LifecycleState, CoreError> {
        let ok = matches!(
            (self, to),
            (Self::Installing, Self::Waiting)
                | (Self::Installing, Self::Redundant)
                | (Self::Waiting, Self::Active)
                | (Self::Waiting, Self::Redundant)
                | (Self::Active, Self::Redundant)
        );

        if ok {
            Ok(to)
        } else {
            Err(CoreError::InvalidTransition { from: self, to })
        }
    }
}

impl std::fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Installing => write!(f, "installing"),
            Self::Waiting => write!(f, "waiting"),
            Self::Active => write!(f, "active"),
            Self::Redundant => write!(f, "redundant"),
        }
    }
}
