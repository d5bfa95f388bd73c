//! Common error infrastructure for cave-core.
//!
//! Domain errors (`FeatureError`, `IntegrityError`) live next to the code
//! that raises them and share the classification defined here.
//!
//! An operation either succeeds (possibly as a silent no-op) or fails with
//! an error the process boundary must not try to recover from. The severity
//! only records who is at fault.

/// Severity level of an error.
///
/// - **Internal**: A broken invariant between the crate's own structures
/// - **Fatal**: Corrupt or incompatible game data
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Internal error - the object lists disagree; a bug in the caller.
    Internal,

    /// Fatal error - the loaded data cannot run the game.
    ///
    /// Examples: missing well-known terrain
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }
}

/// Common trait for all cave-core errors.
pub trait CaveError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
