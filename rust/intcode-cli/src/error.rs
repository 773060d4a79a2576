use std::path::PathBuf;

use intcode_core::ProgramParseError;
use intcode_vm::VmError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("cannot read '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot write '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid toml in '{}': {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid program: {0}")]
    Parse(#[from] ProgramParseError),
    #[error("invalid --input: {0}")]
    Input(#[source] ProgramParseError),
    #[error("{} already exists, not overwriting", .0.display())]
    AlreadyExists(PathBuf),
    #[error(transparent)]
    Vm(#[from] VmError),
    #[error("cannot encode memory: {0}")]
    Json(#[from] serde_json::Error),
}
