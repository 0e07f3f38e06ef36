//! Selecting tickets for the `list` command.

use gitit_format::TicketRecord;

use crate::error::Result;
use crate::storage::TicketStore;

/// Which tickets `list` shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    /// Only tickets in this release.
    pub release: Option<String>,
    /// Include closed, rejected and fixed tickets.
    pub include_resolved: bool,
    /// Only tickets assigned to this owner.
    pub owner: Option<String>,
}

impl ListFilter {
    /// Returns `true` if `ticket` passes every condition except the release.
    pub fn matches(&self, ticket: &TicketRecord) -> bool {
        if !self.include_resolved && ticket.status.is_resolved() {
            return false;
        }
        self.owner
            .as_deref()
            .is_none_or(|owner| ticket.is_assigned_to(owner))
    }
}

/// Load the tickets selected by `filter`, sorted by release then id.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn list(store: &TicketStore, filter: &ListFilter) -> Result<Vec<TicketRecord>> {
    let tickets = store.list(filter.release.as_deref())?;
    Ok(tickets.into_iter().filter(|t| filter.matches(t)).collect())
}
