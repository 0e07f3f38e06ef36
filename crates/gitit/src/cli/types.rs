//! Types shared by the CLI commands.

use gitit_format::{TicketRecord, TicketStatus};
use serde::Serialize;
use std::path::PathBuf;

/// Status transitions offered as commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusChange {
    /// `it close`
    Close,
    /// `it reject`
    Reject,
    /// `it fix`
    Fix,
    /// `it reopen`
    Reopen,
}

impl StatusChange {
    /// Status the ticket ends up with.
    pub fn target(self) -> TicketStatus {
        match self {
            StatusChange::Close => TicketStatus::Closed,
            StatusChange::Reject => TicketStatus::Rejected,
            StatusChange::Fix => TicketStatus::Fixed,
            StatusChange::Reopen => TicketStatus::Open,
        }
    }

    /// Action reported once the change is applied.
    pub fn action(self) -> ChangeAction {
        match self {
            StatusChange::Close => ChangeAction::Closed,
            StatusChange::Reject => ChangeAction::Rejected,
            StatusChange::Fix => ChangeAction::Fixed,
            StatusChange::Reopen => ChangeAction::Reopened,
        }
    }
}

/// What a command did to a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeAction {
    /// Status set to closed
    Closed,
    /// Status set to rejected
    Rejected,
    /// Status set to fixed
    Fixed,
    /// Status set back to open
    Reopened,
    /// Assigned to the current user
    Taken,
    /// Owner removed
    Left,
    /// Filed under another release
    Moved,
}

impl ChangeAction {
    /// Past tense used in confirmation messages.
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeAction::Closed => "closed",
            ChangeAction::Rejected => "rejected",
            ChangeAction::Fixed => "fixed",
            ChangeAction::Reopened => "reopened",
            ChangeAction::Taken => "taken",
            ChangeAction::Left => "left",
            ChangeAction::Moved => "moved",
        }
    }
}

/// JSON output of commands that change a ticket.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TicketChange {
    /// Full ticket id
    pub id: String,
    /// Release after the change
    pub release: String,
    /// What happened
    pub action: ChangeAction,
    /// Status after the change
    pub status: TicketStatus,
    /// Owner after the change
    pub assigned_to: String,
}

impl TicketChange {
    /// Describe `action` applied to `ticket`.
    pub fn new(ticket: &TicketRecord, action: ChangeAction) -> Self {
        Self {
            id: ticket.id.clone(),
            release: ticket.release.clone(),
            action,
            status: ticket.status,
            assigned_to: ticket.assigned_to.clone(),
        }
    }

    /// Confirmation line naming the ticket by the first `id_length`
    /// characters of its id.
    pub fn message(&self, id_length: usize) -> String {
        let short_id: String = self.id.chars().take(id_length).collect();
        match self.action {
            ChangeAction::Moved => format!("Ticket '{short_id}' moved to {}", self.release),
            ChangeAction::Taken => format!("Ticket '{short_id}' taken by {}", self.assigned_to),
            action => format!("Ticket '{short_id}' {}", action.as_str()),
        }
    }
}

/// JSON output of the `new` command.
#[derive(Debug, Clone, Serialize)]
pub struct CreatedTicket {
    /// Full ticket id
    pub id: String,
    /// Release the ticket was filed under
    pub release: String,
    /// Location of the ticket file
    pub path: PathBuf,
}
