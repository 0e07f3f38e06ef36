//! CLI argument parsing and command dispatch.
//!
//! This module provides the command-line interface for git-it using clap's derive API.
//! Each command has its own argument struct with validation and helpful error messages.
//!
//! # Commands
//!
//! - `init`: Initialize a new git-it repository
//! - `new`: Create a new ticket interactively
//! - `list`: List tickets grouped by release
//! - `show`: Show ticket details
//! - `close`, `reject`, `fix`, `reopen`: Change a ticket's status
//! - `take`, `leave`: Assign a ticket to yourself or unassign it
//! - `move`: Move a ticket to another release
//!
//! # Global Flags
//!
//! - `--json`: Output in JSON format (applies to all commands)
//!
//! # Example
//!
//! ```bash
//! it new
//! it list --all --owners
//! it take 3f2a
//! it fix 3f2a
//! ```

mod args;
mod execute;
mod types;
mod validators;

use anyhow::Result;
use clap::{Parser, Subcommand};

// Re-export argument structs
pub use args::{InitArgs, ListArgs, MoveArgs, NewArgs, TicketArgs};

// Re-export types
pub use types::{ChangeAction, CreatedTicket, StatusChange, TicketChange};

// Re-export validators for external use
pub use validators::{validate_release, validate_ticket_id};

/// git-it - issue tracking inside your git repository
///
/// Each ticket is a plain text file under the ticket root, grouped in one
/// directory per release, so tickets travel with the code.
#[derive(Parser, Debug)]
#[command(name = "it")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format for programmatic use
    #[arg(long, global = true)]
    pub json: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Initialize a new git-it repository
    ///
    /// Creates the `.it/` directory with configuration and the ticket root.
    Init(InitArgs),

    /// Create a new ticket
    ///
    /// Asks for title, type, priority and release, then files the ticket
    /// under your git identity.
    New(NewArgs),

    /// List tickets
    ///
    /// Shows open tickets grouped by release. Use `--all` to include
    /// resolved ones.
    List(ListArgs),

    /// Show all fields of a ticket
    Show(TicketArgs),

    /// Mark a ticket as closed
    Close(TicketArgs),

    /// Mark a ticket as rejected
    Reject(TicketArgs),

    /// Mark a ticket as fixed
    Fix(TicketArgs),

    /// Set a resolved ticket back to open
    Reopen(TicketArgs),

    /// Assign a ticket to yourself
    Take(TicketArgs),

    /// Remove the owner of a ticket
    Leave(TicketArgs),

    /// Move a ticket to another release
    Move(MoveArgs),
}

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        <Self as Parser>::parse()
    }

    /// Parse CLI arguments from an iterator (for testing)
    pub fn try_parse_from<I, T>(iter: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Execute the CLI command
    pub fn execute(&self) -> Result<()> {
        use crate::app::App;
        use crate::output::OutputMode;

        let output_mode = if self.json {
            OutputMode::Json
        } else {
            OutputMode::Text
        };

        match &self.command {
            Some(Commands::Init(args)) => execute::execute_init(args),
            Some(Commands::New(_)) => {
                let app = App::from_directory(&std::env::current_dir()?)?;
                execute::execute_new(&app, output_mode)
            }
            Some(Commands::List(args)) => {
                let app = App::from_directory(&std::env::current_dir()?)?;
                execute::execute_list(&app, args, output_mode)
            }
            Some(Commands::Show(args)) => {
                let app = App::from_directory(&std::env::current_dir()?)?;
                execute::execute_show(&app, args, output_mode)
            }
            Some(Commands::Close(args)) => {
                let app = App::from_directory(&std::env::current_dir()?)?;
                execute::execute_status(&app, args, StatusChange::Close, output_mode)
            }
            Some(Commands::Reject(args)) => {
                let app = App::from_directory(&std::env::current_dir()?)?;
                execute::execute_status(&app, args, StatusChange::Reject, output_mode)
            }
            Some(Commands::Fix(args)) => {
                let app = App::from_directory(&std::env::current_dir()?)?;
                execute::execute_status(&app, args, StatusChange::Fix, output_mode)
            }
            Some(Commands::Reopen(args)) => {
                let app = App::from_directory(&std::env::current_dir()?)?;
                execute::execute_status(&app, args, StatusChange::Reopen, output_mode)
            }
            Some(Commands::Take(args)) => {
                let app = App::from_directory(&std::env::current_dir()?)?;
                execute::execute_take(&app, args, output_mode)
            }
            Some(Commands::Leave(args)) => {
                let app = App::from_directory(&std::env::current_dir()?)?;
                execute::execute_leave(&app, args, output_mode)
            }
            Some(Commands::Move(args)) => {
                let app = App::from_directory(&std::env::current_dir()?)?;
                execute::execute_move(&app, args, output_mode)
            }
            None => {
                println!("git-it issue tracking");
                println!("Use --help for more information");
                Ok(())
            }
        }
    }
}
