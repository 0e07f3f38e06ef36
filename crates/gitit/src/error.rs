//! Error types for git-it operations.

use gitit_format::ParseTicketError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::output::render::RenderError;

/// The error type for git-it operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// No `.it` directory was found above the working directory.
    #[error("Not a git-it repository (run 'it init' first)")]
    NotInitialized,

    /// A ticket file could not be parsed.
    #[error("Invalid ticket: {0}")]
    Parse(#[from] ParseTicketError),

    /// A ticket could not be rendered.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Creating the ticket directory or writing the ticket file failed.
    #[error("Failed to write ticket to {}: {source}", path.display())]
    StorageWriteFailure {
        /// Target path of the failed write.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },

    /// A release name that cannot be used as a directory below the ticket root.
    #[error("Invalid release '{release}': {reason}")]
    InvalidRelease {
        /// The rejected name.
        release: String,
        /// What is wrong with it.
        reason: &'static str,
    },

    /// No ticket id starts with the given prefix.
    #[error("Ticket not found: {0}")]
    TicketNotFound(String),

    /// More than one ticket id starts with the given prefix.
    #[error("Ticket id '{0}' is ambiguous; type more characters")]
    AmbiguousTicketId(String),

    /// The git identity needed to file or take a ticket is not configured.
    #[error("{0} not set. use \"git config [--global] {0} ...\" to set it")]
    IdentityMissing(String),

    /// Input ended before all answers were collected.
    #[error("Input ended before the ticket was complete")]
    InputAborted,
}

/// A specialized Result type for git-it operations.
pub type Result<T> = std::result::Result<T, Error>;
