//! Domain types for git-it ticket files.

use chrono::{Local, NaiveDateTime, Timelike};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Textual format of the `Date` header.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Placeholder id carried by a ticket until storage assigns one.
pub const DEFAULT_ID: &str = "000000";

/// Release used when none was given.
pub const DEFAULT_RELEASE: &str = "uncategorized";

/// Sentinel stored in `Assigned to` for unassigned tickets.
pub const UNASSIGNED: &str = "-";

/// Weight of a "small" ticket, and the value legacy files without a
/// `Weight` header get.
pub const DEFAULT_WEIGHT: u32 = 1;

/// Priority given to tickets created without an explicit one.
pub const DEFAULT_PRIORITY: i64 = 3;

/// One ticket.
///
/// `id` and `release` describe where the ticket lives on disk and are never
/// part of the serialized content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TicketRecord {
    /// Single-line summary (`Subject`)
    pub title: String,
    /// Ticket type (`Type`)
    #[serde(rename = "type")]
    pub kind: TicketKind,
    /// Who filed it, conventionally `Name <email>`
    pub issuer: String,
    /// Creation time, second precision (`Date`)
    pub created_at: NaiveDateTime,
    /// Free-form description, stored verbatim after the headers
    pub body: String,
    /// 1 = high, 2 = medium, 3 = low
    pub priority: i64,
    /// Effort estimate; every factor of 3 moves one size name up
    pub weight: u32,
    /// Current status
    pub status: TicketStatus,
    /// Assignee, or [`UNASSIGNED`]
    pub assigned_to: String,
    /// File name of the ticket
    pub id: String,
    /// Directory the ticket lives in
    pub release: String,
}

impl Default for TicketRecord {
    fn default() -> Self {
        Self {
            title: String::new(),
            kind: TicketKind::default(),
            issuer: String::new(),
            created_at: now_seconds(),
            body: String::new(),
            priority: DEFAULT_PRIORITY,
            weight: DEFAULT_WEIGHT,
            status: TicketStatus::default(),
            assigned_to: UNASSIGNED.to_string(),
            id: DEFAULT_ID.to_string(),
            release: DEFAULT_RELEASE.to_string(),
        }
    }
}

impl TicketRecord {
    /// Returns `true` unless `assigned_to` holds the unassigned sentinel.
    pub fn is_assigned(&self) -> bool {
        self.assigned_to != UNASSIGNED
    }

    /// Returns `true` if the ticket is assigned to exactly `name`.
    pub fn is_assigned_to(&self, name: &str) -> bool {
        self.is_assigned() && self.assigned_to == name
    }

    /// The first `len` characters of the id.
    pub fn short_id(&self, len: usize) -> &str {
        match self.id.char_indices().nth(len) {
            Some((idx, _)) => &self.id[..idx],
            None => &self.id,
        }
    }
}

/// The local wall clock truncated to whole seconds, matching what the
/// `Date` header can hold.
pub fn now_seconds() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

/// What kind of work a ticket tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketKind {
    /// General problem or question.
    #[default]
    Issue,
    /// A piece of work to do.
    Task,
    /// New functionality.
    Feature,
    /// Something broken.
    Bug,
}

impl TicketKind {
    /// All kinds, in prompt order.
    pub const ALL: [Self; 4] = [Self::Bug, Self::Feature, Self::Issue, Self::Task];

    /// Wire spelling of the kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Issue => "issue",
            Self::Task => "task",
            Self::Feature => "feature",
            Self::Bug => "bug",
        }
    }
}

impl fmt::Display for TicketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TicketKind {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "issue" => Ok(Self::Issue),
            "task" => Ok(Self::Task),
            "feature" => Ok(Self::Feature),
            "bug" => Ok(Self::Bug),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

/// Lifecycle state of a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    /// Still to be dealt with.
    #[default]
    Open,
    /// Done without a fix, or no longer relevant.
    Closed,
    /// Will not be done.
    Rejected,
    /// Resolved by a change.
    Fixed,
}

impl TicketStatus {
    /// Wire spelling of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Rejected => "rejected",
            Self::Fixed => "fixed",
        }
    }

    /// Returns `true` for every status except `open`.
    pub fn is_resolved(self) -> bool {
        self != Self::Open
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TicketStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(Self::Open),
            "closed" => Ok(Self::Closed),
            "rejected" => Ok(Self::Rejected),
            "fixed" => Ok(Self::Fixed),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

/// A string that names no variant of the target enum.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown value: {0}")]
pub struct UnknownVariant(pub String);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_default_record() {
        let record = TicketRecord::default();
        assert_eq!(record.id, "000000");
        assert_eq!(record.release, "uncategorized");
        assert_eq!(record.assigned_to, "-");
        assert_eq!(record.weight, 1);
        assert_eq!(record.priority, 3);
        assert_eq!(record.kind, TicketKind::Issue);
        assert_eq!(record.status, TicketStatus::Open);
        assert_eq!(record.created_at.nanosecond(), 0);
    }

    #[rstest]
    #[case("issue", TicketKind::Issue)]
    #[case("task", TicketKind::Task)]
    #[case("feature", TicketKind::Feature)]
    #[case("bug", TicketKind::Bug)]
    fn test_kind_wire_spelling(#[case] text: &str, #[case] kind: TicketKind) {
        assert_eq!(text.parse::<TicketKind>().unwrap(), kind);
        assert_eq!(kind.to_string(), text);
    }

    #[rstest]
    #[case("open", TicketStatus::Open)]
    #[case("closed", TicketStatus::Closed)]
    #[case("rejected", TicketStatus::Rejected)]
    #[case("fixed", TicketStatus::Fixed)]
    fn test_status_wire_spelling(#[case] text: &str, #[case] status: TicketStatus) {
        assert_eq!(text.parse::<TicketStatus>().unwrap(), status);
        assert_eq!(status.to_string(), text);
    }

    #[rstest]
    #[case(TicketStatus::Open, false)]
    #[case(TicketStatus::Closed, true)]
    #[case(TicketStatus::Rejected, true)]
    #[case(TicketStatus::Fixed, true)]
    fn test_is_resolved(#[case] status: TicketStatus, #[case] resolved: bool) {
        assert_eq!(status.is_resolved(), resolved);
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let err = "in-progress".parse::<TicketStatus>().unwrap_err();
        assert_eq!(err, UnknownVariant("in-progress".to_string()));
        assert!("Open".parse::<TicketStatus>().is_err());
    }

    #[test]
    fn test_assignment_helpers() {
        let mut record = TicketRecord::default();
        assert!(!record.is_assigned());
        assert!(!record.is_assigned_to("-"));

        record.assigned_to = "Jane Doe".to_string();
        assert!(record.is_assigned());
        assert!(record.is_assigned_to("Jane Doe"));
        assert!(!record.is_assigned_to("Jane"));
    }

    #[test]
    fn test_short_id() {
        let record = TicketRecord {
            id: "9f86d081884c7d659a2f".to_string(),
            ..TicketRecord::default()
        };
        assert_eq!(record.short_id(6), "9f86d0");
        assert_eq!(record.short_id(100), record.id);
    }
}
