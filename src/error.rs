//! Error taxonomy for a render run.

use std::{io, path::PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NetfigError {
    #[error("invalid argument: {0}")]
    ArgumentValidation(String),

    #[error("cannot read table {}: {reason}", .path.display())]
    InputFormat { path: PathBuf, reason: String },

    #[error("output directory {} already exists and was not overwritten", .0.display())]
    OutputDirConflict(PathBuf),

    #[error("template error: {0}")]
    TemplateRender(String),

    #[error("invalid record key {key:?}: {reason}")]
    InvalidRecordKey { key: String, reason: &'static str },

    #[error("{op} {}: {source}", .path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl NetfigError {
    pub fn io(op: &'static str, path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { op, path, source }
    }

    /// Process exit code for a run that ended in this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::ArgumentValidation(_) => 2,
            Self::InputFormat { .. } => 3,
            Self::OutputDirConflict(_) => 4,
            Self::TemplateRender(_) => 5,
            Self::InvalidRecordKey { .. } | Self::Io { .. } => 1,
        }
    }
}

/// Walk an `anyhow` chain and pick the exit code of the first domain error.
pub fn exit_code_for(err: &anyhow::Error) -> u8 {
    err.chain()
        .find_map(|e| e.downcast_ref::<NetfigError>())
        .map_or(1, NetfigError::exit_code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn exit_code_found_through_context() {
        let err = Err::<(), _>(NetfigError::OutputDirConflict("out/x".into()))
            .context("resolve output dir")
            .unwrap_err();
        assert_eq!(exit_code_for(&err), 4);
    }

    #[test]
    fn plain_anyhow_is_generic_failure() {
        let err = anyhow::anyhow!("boom");
        assert_eq!(exit_code_for(&err), 1);
    }

    #[test]
    fn io_error_names_the_path() {
        let e = NetfigError::io("write", "out/r1.txt")(io::Error::other("disk full"));
        assert_eq!(e.to_string(), "write out/r1.txt: disk full");
    }
}
