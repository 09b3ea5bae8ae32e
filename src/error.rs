//! Error types.
//!
//! Missing symbols, declarations and unresolvable modules are ordinary
//! negative outcomes and never show up here. These errors cover the few
//! situations where an entry point cannot run at all; the host decorator turns
//! them into "no additional diagnostics".

use smol_str::SmolStr;
use thiserror::Error;

use crate::base::{FileId, NodeId};

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("{0} is not part of the program")]
    UnknownFile(FileId),

    #[error("node {node:?} does not exist in {file}")]
    UnknownNode { file: FileId, node: NodeId },

    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("deprecation marker must not be empty")]
    EmptyMarker,

    #[error("max_traversal_depth must be at least 1")]
    ZeroDepth,

    #[error("module extension `{0}` must start with `.` or `/`")]
    BadExtension(SmolStr),
}

pub type Result<T, E = AnalysisError> = std::result::Result<T, E>;
