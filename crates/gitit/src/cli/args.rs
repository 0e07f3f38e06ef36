//! CLI argument structs for all commands.
//!
//! Each command has its own argument struct with clap derive attributes
//! for parsing and validation.

use clap::Parser;

use super::validators::{validate_release, validate_ticket_id};

/// Arguments for the `init` command
#[derive(Parser, Debug, Clone)]
pub struct InitArgs {
    /// Suppress output messages
    #[arg(short, long)]
    pub quiet: bool,
}

/// Arguments for the `new` command
#[derive(Parser, Debug, Clone)]
pub struct NewArgs {}

/// Arguments for the `list` command
#[derive(Parser, Debug, Clone)]
pub struct ListArgs {
    /// Only show tickets in this release
    #[arg(short, long, value_parser = validate_release)]
    pub release: Option<String>,

    /// Include closed, rejected and fixed tickets
    #[arg(short, long)]
    pub all: bool,

    /// Only show tickets assigned to you
    #[arg(short, long)]
    pub mine: bool,

    /// Show the owner of each assigned ticket after its title
    #[arg(short, long)]
    pub owners: bool,
}

/// Arguments for commands acting on a single ticket
#[derive(Parser, Debug, Clone)]
pub struct TicketArgs {
    /// Ticket ID, or any unique prefix of it
    #[arg(value_parser = validate_ticket_id)]
    pub id: String,
}

/// Arguments for the `move` command
#[derive(Parser, Debug, Clone)]
pub struct MoveArgs {
    /// Ticket ID, or any unique prefix of it
    #[arg(value_parser = validate_ticket_id)]
    pub id: String,

    /// Release to move the ticket to
    #[arg(value_parser = validate_release)]
    pub release: String,
}
