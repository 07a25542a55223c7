use thiserror::Error;

/// Failure reported by a host capability callback.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CapabilityError {
    #[error("capability `{0}` is not available")]
    Unavailable(&'static str),
    #[error("capability `{capability}` failed: {reason}")]
    Failed { capability: &'static str, reason: String },
}

impl CapabilityError {
    pub fn failed(capability: &'static str, reason: impl Into<String>) -> Self {
        Self::Failed { capability, reason: reason.into() }
    }
}

/// Reasons a transcript never entered the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error("voice session is not active")]
    SessionInactive,
    #[error("a command is already being processed")]
    Busy,
    #[error("transcript is empty")]
    EmptyTranscript,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}
