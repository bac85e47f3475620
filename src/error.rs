//! Error types for mediascan.
//!
//! Uses `thiserror` for ergonomic error definitions.
//!
//! Ordinary transport failures (timeout, refused, reset, unreachable) are
//! recovered inside the prober and classifier and never reach these types;
//! `ScanError` only carries conditions that must abort a scan.

use crate::types::InvalidPortSpec;
use thiserror::Error;

/// Fatal error raised out of a scan batch.
#[derive(Error, Debug)]
pub enum ScanError {
    /// Unexpected socket failure that must not be masked as a closed port,
    /// e.g. file descriptor exhaustion from too many simultaneous probes.
    #[error("socket error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for scan operations.
pub type Result<T> = std::result::Result<T, ScanError>;

/// Errors surfaced by the command-line front-end.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    InvalidPorts(#[from] InvalidPortSpec),

    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for CLI operations.
pub type CliResult<T> = std::result::Result<T, CliError>;
