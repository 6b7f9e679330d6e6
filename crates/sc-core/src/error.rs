//! Processing errors

use std::fmt;
use std::path::PathBuf;

use sc_cad::CadError;

use crate::color::ColorError;
use crate::pipeline::PipelineState;

/// Pipeline stage an error is attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Load,
    Orient,
    Color,
    Save,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Load => "load",
            Stage::Orient => "orient",
            Stage::Color => "color",
            Stage::Save => "save",
        };
        f.write_str(name)
    }
}

/// Coarse error category shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Load,
    InvalidConfiguration,
    Save,
    Unknown,
}

/// Error aborting a processing run
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("failed to load STEP file {}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: CadError,
    },

    #[error("no shapes found in STEP file {}", .path.display())]
    NoShapes { path: PathBuf },

    #[error("invalid coloring configuration")]
    InvalidConfiguration(#[from] ColorError),

    #[error("failed to write STEP file {}", .path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: CadError,
    },

    #[error("failed to create temporary file in {}", .dir.display())]
    TempFile {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to move finished file to {}", .path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CAD kernel failed during {stage}")]
    Kernel {
        stage: Stage,
        #[source]
        source: CadError,
    },

    #[error("cannot {stage} while the pipeline is {state}")]
    OutOfOrder { stage: Stage, state: PipelineState },
}

impl ProcessError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProcessError::Load { .. } | ProcessError::NoShapes { .. } => ErrorKind::Load,
            ProcessError::InvalidConfiguration(_) => ErrorKind::InvalidConfiguration,
            ProcessError::Save { .. }
            | ProcessError::TempFile { .. }
            | ProcessError::Persist { .. } => ErrorKind::Save,
            ProcessError::Kernel { .. } | ProcessError::OutOfOrder { .. } => ErrorKind::Unknown,
        }
    }

    pub fn stage(&self) -> Stage {
        match self {
            ProcessError::Load { .. } | ProcessError::NoShapes { .. } => Stage::Load,
            ProcessError::InvalidConfiguration(_) => Stage::Color,
            ProcessError::Save { .. }
            | ProcessError::TempFile { .. }
            | ProcessError::Persist { .. } => Stage::Save,
            ProcessError::Kernel { stage, .. } | ProcessError::OutOfOrder { stage, .. } => *stage,
        }
    }

    /// Single-line message with the stage tag and every cause
    pub fn report(&self) -> String {
        let mut message = format!("[{}] {}", self.stage(), self);
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        message
    }
}
