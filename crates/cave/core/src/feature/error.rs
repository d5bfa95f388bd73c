use crate::error::{CaveError, ErrorSeverity};

/// Errors raised while resolving terrain by name.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FeatureError {
    /// No terrain in the loaded table carries this name.
    ///
    /// A missing core terrain means the data files are corrupt or belong to
    /// an incompatible version; there is no degraded mode for it.
    #[error("failed to find terrain feature '{name}'")]
    NotFound { name: String },
}

impl CaveError for FeatureError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            FeatureError::NotFound { .. } => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            FeatureError::NotFound { .. } => "FEATURE_NOT_FOUND",
        }
    }
}
