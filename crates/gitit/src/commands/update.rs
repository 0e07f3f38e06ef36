//! Changes to existing tickets: status, ownership and release.
//!
//! Every operation looks the ticket up by id prefix, changes it and writes
//! it back through the store.

use gitit_format::{TicketRecord, TicketStatus, UNASSIGNED};
use tracing::debug;

use crate::error::Result;
use crate::identity::IdentityProvider;
use crate::storage::TicketStore;

/// Set the status of the ticket matching `prefix`.
///
/// # Errors
///
/// Returns an error if the ticket cannot be found or saved.
pub fn set_status(store: &TicketStore, prefix: &str, status: TicketStatus) -> Result<TicketRecord> {
    let mut ticket = store.find(prefix)?;
    let previous = ticket.status;
    ticket.status = status;
    store.save(&ticket)?;

    debug!(id = %ticket.id, from = %previous, to = %status, "Changed ticket status");
    Ok(ticket)
}

/// Assign the ticket matching `prefix` to the current user.
///
/// # Errors
///
/// Returns an error if the identity is incomplete or the ticket cannot be
/// found or saved.
pub fn take<I>(store: &TicketStore, prefix: &str, identity: &I) -> Result<TicketRecord>
where
    I: IdentityProvider + ?Sized,
{
    let owner = identity.fullname()?;
    let mut ticket = store.find(prefix)?;
    ticket.assigned_to = owner;
    store.save(&ticket)?;

    debug!(id = %ticket.id, owner = %ticket.assigned_to, "Took ticket");
    Ok(ticket)
}

/// Remove the owner of the ticket matching `prefix`.
///
/// # Errors
///
/// Returns an error if the ticket cannot be found or saved.
pub fn leave(store: &TicketStore, prefix: &str) -> Result<TicketRecord> {
    let mut ticket = store.find(prefix)?;
    ticket.assigned_to = UNASSIGNED.to_string();
    store.save(&ticket)?;

    debug!(id = %ticket.id, "Left ticket");
    Ok(ticket)
}

/// Move the ticket matching `prefix` to `release`.
///
/// # Errors
///
/// Returns an error if the ticket cannot be found, written to its new
/// location, or removed from its old one.
pub fn move_ticket(store: &TicketStore, prefix: &str, release: &str) -> Result<TicketRecord> {
    let mut ticket = store.find(prefix)?;
    let from = ticket.release.clone();
    store.move_to(&mut ticket, release)?;

    debug!(id = %ticket.id, from = %from, to = %release, "Moved ticket");
    Ok(ticket)
}
