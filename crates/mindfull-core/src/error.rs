use thiserror::Error;

/// Error type for element id parsing failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdParseError {
    #[error("Port id is missing the node/anchor separator: {0}")]
    MissingSeparator(String),
    #[error("Port id has an empty node part: {0}")]
    EmptyNode(String),
    #[error("Unknown port anchor: {0}")]
    UnknownAnchor(String),
}
