//! Action parsing errors.

use crate::error::{ErrorSeverity, GameError};

/// Errors raised while turning free-form input into an [`Action`](super::Action).
///
/// [`Action::from_name`](super::Action::from_name) recovers from these by
/// falling back to a normal attack; only strict parsing surfaces them.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionParseError {
    #[error("unknown action name '{name}'")]
    InvalidActionName { name: String },
}

impl GameError for ActionParseError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidActionName { .. } => "ACTION_INVALID_NAME",
        }
    }
}
