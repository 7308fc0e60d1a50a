//=========================================================================
// Runner Errors
//=========================================================================
//
// Crate-wide error taxonomy.
//
// Categories:
//   Configuration  → EmptyCatalog, EmptyWindow, MissingCollaborator,
//                    InvalidConfig, ConfigParse,
//                    ConfigRead                (fatal to the session)
//   Contention     → Transition(Busy)          (rejected request)
//   Persistence    → Record                    (logged, not retried)
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::record::RecordError;
use crate::core::scene::TransitionError;

//=== RunnerError =========================================================

/// Umbrella error for everything that can fail while wiring or running
/// a runner session.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// A segment catalog required by the session has no templates.
    #[error("segment catalog for the {window} window is empty")]
    EmptyCatalog { window: &'static str },

    /// A stream window is still empty after the initial fill.
    #[error("the {window} window holds no segments after the initial fill")]
    EmptyWindow { window: &'static str },

    /// A collaborator the session needs was never provided.
    #[error("required collaborator missing: {0}")]
    MissingCollaborator(&'static str),

    /// A configuration value is out of range.
    #[error("invalid config value for {field}: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("failed to read config: {0}")]
    ConfigRead(#[from] std::io::Error),

    #[error(transparent)]
    Transition(#[from] TransitionError),

    #[error(transparent)]
    Record(#[from] RecordError),
}

impl RunnerError {
    /// True for errors that must halt the affected session at startup.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::EmptyCatalog { .. }
                | Self::EmptyWindow { .. }
                | Self::MissingCollaborator(_)
                | Self::InvalidConfig { .. }
                | Self::ConfigParse(_)
                | Self::ConfigRead(_)
        )
    }
}

/// Result alias used across the crate.
pub type RunnerResult<T> = Result<T, RunnerError>;

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_catalog_is_configuration_error() {
        let err = RunnerError::EmptyCatalog { window: "track" };
        assert!(err.is_configuration());
        assert_eq!(err.to_string(), "segment catalog for the track window is empty");
    }

    #[test]
    fn transition_error_is_not_configuration() {
        let err = RunnerError::from(TransitionError::UnknownScene("Nowhere".to_string()));
        assert!(!err.is_configuration());
    }
}
