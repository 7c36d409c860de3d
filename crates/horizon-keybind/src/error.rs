//! Error types for shortcut parsing and registration.

use thiserror::Error;

use crate::binding::MAX_SEQUENCE_STEPS;

/// Errors that can occur while parsing a shortcut spec.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The spec was empty or only whitespace.
    #[error("empty shortcut spec")]
    EmptySpec,

    /// A sequence was given with no steps.
    #[error("shortcut sequence has no steps")]
    EmptySequence,

    /// A token was neither a modifier nor a recognized key name.
    #[error("unknown token `{token}` in shortcut spec")]
    UnknownToken { token: String },

    /// The spec contained only modifiers, or a dangling separator.
    #[error("no base key in shortcut spec `{spec}`")]
    MissingBaseKey { spec: String },

    /// The spec contained more than one non-modifier key.
    #[error("more than one base key in shortcut spec `{spec}`")]
    DuplicateBaseKey { spec: String },

    /// A sequence exceeded the step limit.
    #[error("shortcut sequence has {count} steps, limit is {max}", max = MAX_SEQUENCE_STEPS)]
    TooManySteps { count: usize },
}

/// A registration collided with an existing handler under the
/// [`Error`](crate::ConflictPolicy::Error) conflict policy.
///
/// All fields are display strings captured at rejection time; the incoming
/// registration was not stored.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "shortcut conflict on `{binding}`: `{incoming_component}` ({incoming_description}) \
     collides with `{existing_component}` ({existing_description})"
)]
pub struct ConflictError {
    /// Display form of the contested binding.
    pub binding: String,
    /// Component that already holds the binding.
    pub existing_component: String,
    /// Description of the existing handler.
    pub existing_description: String,
    /// Component whose registration was rejected.
    pub incoming_component: String,
    /// Description of the rejected handler.
    pub incoming_description: String,
}

/// Errors that can occur during shortcut registration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShortcutError {
    /// The shortcut spec could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The registration was rejected by the conflict policy.
    #[error(transparent)]
    Conflict(#[from] ConflictError),
}

/// Result type for shortcut operations.
pub type ShortcutResult<T> = Result<T, ShortcutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::UnknownToken {
            token: "blorp".to_string(),
        };
        assert_eq!(err.to_string(), "unknown token `blorp` in shortcut spec");

        let err = ParseError::TooManySteps { count: 9 };
        assert_eq!(err.to_string(), "shortcut sequence has 9 steps, limit is 8");
    }

    #[test]
    fn test_conflict_error_display_names_both_parties() {
        let err = ConflictError {
            binding: "Ctrl+S".to_string(),
            existing_component: "Editor".to_string(),
            existing_description: "Save file".to_string(),
            incoming_component: "Sidebar".to_string(),
            incoming_description: "Save workspace".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Ctrl+S"));
        assert!(msg.contains("Editor"));
        assert!(msg.contains("Save file"));
        assert!(msg.contains("Sidebar"));
        assert!(msg.contains("Save workspace"));
    }

    #[test]
    fn test_shortcut_error_from_parse_error() {
        let err: ShortcutError = ParseError::EmptySpec.into();
        assert!(matches!(err, ShortcutError::Parse(ParseError::EmptySpec)));
        assert_eq!(err.to_string(), "empty shortcut spec");
    }
}
