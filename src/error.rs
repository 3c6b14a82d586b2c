//! Error types for configuration and turtle interpretation.
//!
//! Grammar expansion is total over its inputs and has no error type.

/// Rejected inbound configuration. Raised at the boundary, before any
/// expansion or interpretation starts.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("generation count must be at least 1, got {0}")]
    Generations(u32),

    #[error("turn angle must be a finite number of degrees, got {0}")]
    TurnAngle(f64),

    #[error("step length must be a finite positive number, got {0}")]
    StepLength(f64),

    #[error("surface dimensions must be non-zero, got {width}x{height}")]
    Surface { width: u32, height: u32 },

    #[error("invalid rule `{rule}`: {reason}")]
    Rule { rule: String, reason: &'static str },

    #[error("duplicate rule for symbol `{0}`")]
    DuplicateRule(char),

    #[error("unknown preset `{0}`")]
    UnknownPreset(String),

    #[error("malformed configuration: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Serialization(e.to_string())
    }
}

/// Failure of a single interpretation step.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TurtleError {
    /// `]` with nothing saved. The run halts at `cursor`.
    #[error("stack underflow: restore at position {cursor} has no matching save")]
    StackUnderflow { cursor: usize },

    #[error("no program loaded; call configure first")]
    NotConfigured,
}
