//! # gitit-format
//!
//! Parser and serializer for git-it ticket files.
//!
//! Every ticket lives in its own small text file, which keeps merges
//! simple and diffs readable when the ticket tree is versioned with git.
//!
//! ## Example
//!
//! ```rust
//! use gitit_format::{parse_ticket, serialize_ticket, TicketKind};
//!
//! let input = "\
//! Subject: Fix the bug
//! Issuer: Jane Doe <jane@example.com>
//! Date: 2009-03-07 14:05:09
//! Type: bug
//! Priority: 2
//! Status: open
//! Assigned to: -
//!
//! This needs to be fixed.
//! ";
//!
//! let ticket = parse_ticket(input, Some("000123"), Some("v1")).unwrap();
//! assert_eq!(ticket.title, "Fix the bug");
//! assert_eq!(ticket.kind, TicketKind::Bug);
//! // Files written before weights existed read as the smallest weight.
//! assert_eq!(ticket.weight, 1);
//!
//! let output = serialize_ticket(&ticket);
//! assert!(output.contains("Weight: 1"));
//! ```
//!
//! ## Format
//!
//! ```text
//! Subject: <text>
//! Issuer: <text>
//! Date: <YYYY-MM-DD HH:MM:SS>
//! Type: <issue|task|feature|bug>
//! Priority: <1|2|3>
//! Weight: <positive integer>
//! Status: <open|closed|rejected|fixed>
//! Assigned to: <text|->
//!
//! <body>
//! ```
//!
//! `Weight` is optional. Lines starting with `#` and blank lines are
//! ignored. The release and id of a ticket are not stored in the file; they
//! are the names of its directory and of the file itself.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod parser;
mod serializer;
mod types;

pub use parser::{OPTIONAL_HEADERS, ParseTicketError, REQUIRED_HEADERS, parse_ticket};
pub use serializer::serialize_ticket;
pub use types::*;

use std::path::Path;

/// Read and parse a ticket file.
///
/// # Errors
///
/// Returns [`ReadError::Io`] if the file cannot be read and
/// [`ReadError::Parse`] if its content is not a valid ticket.
pub fn read_ticket_file(
    path: &Path,
    id: Option<&str>,
    release: Option<&str>,
) -> Result<TicketRecord, ReadError> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_ticket(&content, id, release)?)
}

/// Serialize a ticket and write it to `path`.
///
/// The parent directory must already exist.
///
/// # Errors
///
/// Returns any error from writing the file.
pub fn write_ticket_file(path: &Path, ticket: &TicketRecord) -> std::io::Result<()> {
    std::fs::write(path, serialize_ticket(ticket))
}

/// Errors that can occur when reading a ticket file.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    /// The file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The file content is not a valid ticket.
    #[error("Parse error: {0}")]
    Parse(#[from] ParseTicketError),
}
