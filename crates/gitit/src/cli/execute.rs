//! Command execution logic.
//!
//! This module contains the implementation of all CLI commands.

use anyhow::Result;

use super::args::{InitArgs, ListArgs, MoveArgs, TicketArgs};
use super::types::{ChangeAction, CreatedTicket, StatusChange, TicketChange};
use crate::app::App;
use crate::identity::{GitIdentity, IdentityProvider};
use crate::output::{self, OutputConfig, OutputMode};

/// Short id length used in confirmation messages
const SHORT_ID_LENGTH: usize = 7;

/// Execute the init command
pub fn execute_init(args: &InitArgs) -> Result<()> {
    use crate::commands::init;

    let current_dir = std::env::current_dir()?;
    let result = init::init(&current_dir)?;

    if !args.quiet {
        println!("Initialized git-it in {}", result.it_dir.display());
        println!("  Config:  {}", result.config_file.display());
        println!("  Tickets: {}", result.ticket_root.display());
    }

    Ok(())
}

/// Execute the new command
pub fn execute_new(app: &App, output_mode: OutputMode) -> Result<()> {
    use crate::commands::new::{StdinAnswers, create_interactive};

    let mut ticket = create_interactive(&mut StdinAnswers, &GitIdentity)?;
    let path = app.store().create(&mut ticket)?;

    match output_mode {
        OutputMode::Json => output::print_json(&CreatedTicket {
            id: ticket.id.clone(),
            release: ticket.release.clone(),
            path,
        })?,
        OutputMode::Text => {
            let config = OutputConfig::from_env();
            let message = format!("New ticket '{}' saved", ticket.short_id(SHORT_ID_LENGTH));
            output::print_message(&output::success(&message, &config))?;
        }
    }

    Ok(())
}

/// Execute the list command
pub fn execute_list(app: &App, args: &ListArgs, output_mode: OutputMode) -> Result<()> {
    use crate::commands::list::{ListFilter, list};

    let owner = if args.mine {
        Some(GitIdentity.fullname()?)
    } else {
        None
    };
    let filter = ListFilter {
        release: args.release.clone(),
        include_resolved: args.all,
        owner,
    };

    let tickets = list(app.store(), &filter)?;
    output::print_tickets(&tickets, app.columns(), args.owners, output_mode)?;

    Ok(())
}

/// Execute the show command
pub fn execute_show(app: &App, args: &TicketArgs, output_mode: OutputMode) -> Result<()> {
    let ticket = app.store().find(&args.id)?;
    output::print_ticket_details(&ticket, output_mode)?;
    Ok(())
}

/// Execute the close, reject, fix and reopen commands
pub fn execute_status(
    app: &App,
    args: &TicketArgs,
    change: StatusChange,
    output_mode: OutputMode,
) -> Result<()> {
    use crate::commands::update::set_status;

    let ticket = set_status(app.store(), &args.id, change.target())?;
    report_change(&TicketChange::new(&ticket, change.action()), output_mode)
}

/// Execute the take command
pub fn execute_take(app: &App, args: &TicketArgs, output_mode: OutputMode) -> Result<()> {
    use crate::commands::update::take;

    let ticket = take(app.store(), &args.id, &GitIdentity)?;
    report_change(&TicketChange::new(&ticket, ChangeAction::Taken), output_mode)
}

/// Execute the leave command
pub fn execute_leave(app: &App, args: &TicketArgs, output_mode: OutputMode) -> Result<()> {
    use crate::commands::update::leave;

    let ticket = leave(app.store(), &args.id)?;
    report_change(&TicketChange::new(&ticket, ChangeAction::Left), output_mode)
}

/// Execute the move command
pub fn execute_move(app: &App, args: &MoveArgs, output_mode: OutputMode) -> Result<()> {
    use crate::commands::update::move_ticket;

    let ticket = move_ticket(app.store(), &args.id, &args.release)?;
    report_change(&TicketChange::new(&ticket, ChangeAction::Moved), output_mode)
}

fn report_change(change: &TicketChange, output_mode: OutputMode) -> Result<()> {
    match output_mode {
        OutputMode::Json => output::print_json(change)?,
        OutputMode::Text => {
            let config = OutputConfig::from_env();
            let message = change.message(SHORT_ID_LENGTH);
            output::print_message(&output::success(&message, &config))?;
        }
    }
    Ok(())
}
