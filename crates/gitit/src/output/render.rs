//! One-line and full-page views of a ticket.
//!
//! The lookup tables here (priority names, weight names, status and
//! priority colors) are fixed; nothing mutates them at runtime. Colors are
//! referred to by name and resolved through a [`ColorTable`], so the same
//! code renders colored and plain output.

use chrono::Datelike;
use gitit_format::{DATE_FORMAT, TicketRecord, TicketStatus};
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use thiserror::Error;

use super::color::{ColorTable, DEFAULT};

/// Priority names, indexed by `priority - 1`.
pub const PRIORITY_NAMES: [&str; 3] = ["high", "med", "low"];

/// Weight names from smallest to largest. Each step is three times the
/// previous one: `weight = 3^index`.
pub const WEIGHT_NAMES: [&str; 4] = ["small", "minor", "major", "super"];

/// Lower bounds on `weight²` for every weight name after the first.
///
/// `round(log₃ w)` reaches `k` once `w ≥ 3^(k - 1/2)`, i.e. once
/// `w² ≥ 3^(2k - 1)`. Comparing squares keeps the boundaries exact.
const WEIGHT_SQUARED_THRESHOLDS: [u64; 3] = [3, 27, 243];

const PRIORITY_COLORS: [(&str, &str); 3] = [
    ("high", "red-on-white"),
    ("med", "yellow-on-white"),
    ("low", "white"),
];

/// Color used for field labels in the full view.
const LABEL_COLOR: &str = "red-on-white";

const TITLE_ELLIPSIS: &str = "..";
const STATUS_WIDTH: usize = 8;
const PRIORITY_WIDTH: usize = 4;
const WEIGHT_WIDTH: usize = 5;

/// Errors raised while rendering a ticket.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A value has no entry in one of the lookup tables. The ticket was
    /// built or parsed without validation.
    #[error("No entry for '{value}' in the {table} table")]
    InvalidEnumValue {
        /// Which table the lookup failed in.
        table: &'static str,
        /// The value that was looked up.
        value: String,
    },

    /// Writing the rendered output failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// One column of the one-line view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Column identifier: `id`, `type`, `date`, `title`, `status`, `prio`
    /// or `wght`. Other identifiers are skipped.
    pub id: String,
    /// Cell width in characters. Ignored by the fixed-width columns
    /// (`status`, `prio`, `wght`).
    pub width: usize,
    /// Hidden columns produce no cell.
    #[serde(default = "visible_by_default")]
    pub visible: bool,
}

fn visible_by_default() -> bool {
    true
}

impl ColumnSpec {
    /// A visible column.
    pub fn new(id: impl Into<String>, width: usize) -> Self {
        Self {
            id: id.into(),
            width,
            visible: true,
        }
    }

    /// The same column, hidden.
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }
}

/// Columns shown by `it list` when the configuration names none.
pub fn default_columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::new("id", 6),
        ColumnSpec::new("type", 7),
        ColumnSpec::new("date", 5),
        ColumnSpec::new("title", 34),
        ColumnSpec::new("status", STATUS_WIDTH),
        ColumnSpec::new("prio", PRIORITY_WIDTH),
        ColumnSpec::new("wght", WEIGHT_WIDTH).hidden(),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Id,
    Type,
    Date,
    Title,
    Status,
    Prio,
    Wght,
}

impl Column {
    fn from_id(id: &str) -> Option<Self> {
        match id {
            "id" => Some(Self::Id),
            "type" => Some(Self::Type),
            "date" => Some(Self::Date),
            "title" => Some(Self::Title),
            "status" => Some(Self::Status),
            "prio" => Some(Self::Prio),
            "wght" => Some(Self::Wght),
            _ => None,
        }
    }
}

/// Name of a priority: 1 → `high`, 2 → `med`, 3 → `low`.
///
/// # Errors
///
/// Any other value is [`RenderError::InvalidEnumValue`].
pub fn priority_name(priority: i64) -> Result<&'static str, RenderError> {
    usize::try_from(priority)
        .ok()
        .and_then(|priority| priority.checked_sub(1))
        .and_then(|index| PRIORITY_NAMES.get(index))
        .copied()
        .ok_or_else(|| RenderError::InvalidEnumValue {
            table: "priority",
            value: priority.to_string(),
        })
}

/// Name of the closest power of three to `weight`: 1 → `small`,
/// 3 → `minor`, 9 → `major`, 27 and above → `super`.
///
/// Zero is below every threshold and reads as `small`.
pub fn weight_name(weight: u32) -> &'static str {
    let squared = u64::from(weight) * u64::from(weight);
    let index = WEIGHT_SQUARED_THRESHOLDS
        .iter()
        .take_while(|&&threshold| squared >= threshold)
        .count();
    WEIGHT_NAMES[index]
}

/// Color name for a status.
pub fn status_color(status: TicketStatus) -> &'static str {
    match status {
        TicketStatus::Open => "bold",
        TicketStatus::Closed => DEFAULT,
        TicketStatus::Rejected => "red-on-white",
        TicketStatus::Fixed => "green-on-white",
    }
}

fn priority_color(name: &str) -> Result<&'static str, RenderError> {
    PRIORITY_COLORS
        .iter()
        .find(|(priority, _)| *priority == name)
        .map(|(_, color)| *color)
        .ok_or_else(|| RenderError::InvalidEnumValue {
            table: "priority color",
            value: name.to_string(),
        })
}

fn lookup(colors: &ColorTable, name: &str) -> Result<&'static str, RenderError> {
    colors.get(name).ok_or_else(|| RenderError::InvalidEnumValue {
        table: "color",
        value: name.to_string(),
    })
}

/// Wrap `text` in the named color, closed by the table's default.
fn paint(colors: &ColorTable, color: &str, text: &str) -> Result<String, RenderError> {
    Ok(format!(
        "{}{text}{}",
        lookup(colors, color)?,
        lookup(colors, DEFAULT)?
    ))
}

/// Cut `text` to at most `width` characters, ending in `suffix` when cut.
///
/// A width too narrow to hold the suffix cuts without it.
fn chop(text: &str, width: usize, suffix: &str) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let suffix_len = suffix.chars().count();
    if width <= suffix_len {
        return text.chars().take(width).collect();
    }
    let mut chopped: String = text.chars().take(width - suffix_len).collect();
    chopped.push_str(suffix);
    chopped
}

/// Left-align `text` in a field of `width` characters.
fn pad(text: &str, width: usize) -> String {
    format!("{text:<width$}")
}

fn fit(text: &str, width: usize) -> String {
    pad(&chop(text, width, ""), width)
}

/// Render a ticket as one row of the list view.
///
/// Each visible, recognised column produces one cell; cells are joined by
/// a single space. With `annotate_ownership`, assigned tickets show the
/// assignee's first name after the title instead of the status color.
///
/// # Errors
///
/// Returns [`RenderError::InvalidEnumValue`] if the priority is outside
/// 1..=3 or a color is missing from `colors`.
pub fn one_line(
    ticket: &TicketRecord,
    columns: &[ColumnSpec],
    annotate_ownership: bool,
    colors: &ColorTable,
) -> Result<String, RenderError> {
    let mut cells = Vec::with_capacity(columns.len());

    for spec in columns.iter().filter(|spec| spec.visible) {
        let Some(column) = Column::from_id(&spec.id) else {
            tracing::debug!(column = %spec.id, "Skipping unknown column");
            continue;
        };
        let width = spec.width;

        let cell = match column {
            Column::Id => chop(&ticket.id, width, ""),
            Column::Type => fit(ticket.kind.as_str(), width),
            Column::Date => fit(
                &format!("{}/{}", ticket.created_at.month(), ticket.created_at.day()),
                width,
            ),
            Column::Title => title_cell(ticket, width, annotate_ownership, colors)?,
            Column::Status => paint(
                colors,
                status_color(ticket.status),
                &pad(ticket.status.as_str(), STATUS_WIDTH),
            )?,
            Column::Prio => {
                let name = priority_name(ticket.priority)?;
                paint(colors, priority_color(name)?, &pad(name, PRIORITY_WIDTH))?
            }
            Column::Wght => pad(weight_name(ticket.weight), WEIGHT_WIDTH),
        };
        cells.push(cell);
    }

    Ok(cells.join(" "))
}

fn title_cell(
    ticket: &TicketRecord,
    width: usize,
    annotate_ownership: bool,
    colors: &ColorTable,
) -> Result<String, RenderError> {
    if annotate_ownership && ticket.is_assigned() {
        let first_name = ticket.assigned_to.split_whitespace().next().unwrap_or("");
        let suffix = format!(" ({first_name})");
        let width = width.saturating_sub(suffix.chars().count());
        return Ok(pad(&chop(&ticket.title, width, TITLE_ELLIPSIS), width) + &suffix);
    }

    paint(
        colors,
        status_color(ticket.status),
        &pad(&chop(&ticket.title, width, TITLE_ELLIPSIS), width),
    )
}

/// Render every field of a ticket, one per line, followed by a blank line
/// and the body.
///
/// `identifier` adds a leading `Ticket` line, typically with the full id.
///
/// # Errors
///
/// Returns [`RenderError::InvalidEnumValue`] if a color is missing from
/// `colors`.
pub fn full_view(
    ticket: &TicketRecord,
    identifier: Option<&str>,
    colors: &ColorTable,
) -> Result<String, RenderError> {
    let created_at = ticket.created_at.format(DATE_FORMAT).to_string();
    let priority = ticket.priority.to_string();
    let weight = ticket.weight.to_string();

    let mut fields: Vec<(&str, &str, &str)> = Vec::with_capacity(10);
    if let Some(identifier) = identifier {
        fields.push(("Ticket", identifier, DEFAULT));
    }
    fields.extend([
        ("Subject", ticket.title.as_str(), DEFAULT),
        ("Issuer", ticket.issuer.as_str(), DEFAULT),
        ("Date", created_at.as_str(), DEFAULT),
        ("Type", ticket.kind.as_str(), DEFAULT),
        ("Priority", priority.as_str(), DEFAULT),
        ("Weight", weight.as_str(), DEFAULT),
        ("Status", ticket.status.as_str(), status_color(ticket.status)),
        ("Assigned to", ticket.assigned_to.as_str(), DEFAULT),
        ("Release", ticket.release.as_str(), DEFAULT),
    ]);

    let mut view = String::new();
    for (label, value, value_color) in fields {
        view.push_str(&paint(colors, LABEL_COLOR, &format!("{label}:"))?);
        view.push(' ');
        view.push_str(&paint(colors, value_color, value)?);
        view.push('\n');
    }
    view.push('\n');
    view.push_str(&ticket.body);

    Ok(view)
}

/// Write [`one_line`] output followed by a newline.
///
/// # Errors
///
/// Returns rendering errors and any error from `w`.
pub fn write_one_line<W: Write>(
    w: &mut W,
    ticket: &TicketRecord,
    columns: &[ColumnSpec],
    annotate_ownership: bool,
    colors: &ColorTable,
) -> Result<(), RenderError> {
    writeln!(w, "{}", one_line(ticket, columns, annotate_ownership, colors)?)?;
    Ok(())
}

/// Write [`full_view`] output, ending with exactly one newline.
///
/// # Errors
///
/// Returns rendering errors and any error from `w`.
pub fn write_full_view<W: Write>(
    w: &mut W,
    ticket: &TicketRecord,
    identifier: Option<&str>,
    colors: &ColorTable,
) -> Result<(), RenderError> {
    let view = full_view(ticket, identifier, colors)?;
    w.write_all(view.as_bytes())?;
    if !view.ends_with('\n') {
        writeln!(w)?;
    }
    Ok(())
}
