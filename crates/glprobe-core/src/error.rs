//! Error taxonomy for a single probe invocation.
//!
//! Every variant is terminal: the validator stops at the first error and the
//! boolean entry points collapse all of them into `false`.

use thiserror::Error;

use crate::shaders::ShaderStage;

/// Failure to obtain a current graphics context.
#[derive(Debug, Clone, Error)]
pub enum ContextError {
    #[error("unable to open display: {0}")]
    Display(String),
    #[error("Unable to retrieve EGL config")]
    NoMatchingConfig,
    #[error("unable to create context: {0}")]
    CreateContext(String),
    #[error("Unable to make context current: {0}")]
    MakeCurrent(String),
}

/// Why a shader stage did not produce a usable shader object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CompileFailure {
    #[error("source is empty")]
    EmptySource,
    #[error("driver returned no shader object")]
    NoShaderObject,
    #[error("compiler rejected the source")]
    Rejected,
}

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error(transparent)]
    Context(#[from] ContextError),
    #[error("Failed to compile {stage} shader: {reason}")]
    Compile {
        stage: ShaderStage,
        reason: CompileFailure,
    },
    #[error("Program link failed")]
    Link,
}

impl ProbeError {
    /// Short machine-readable kind, used by the CLI's JSON output.
    pub fn kind(&self) -> &'static str {
        match self {
            ProbeError::Context(_) => "context",
            ProbeError::Compile { .. } => "compile",
            ProbeError::Link => "link",
        }
    }
}

pub type Result<T, E = ProbeError> = std::result::Result<T, E>;
