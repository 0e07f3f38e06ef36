//! Output formatting for CLI commands.
//!
//! This module provides utilities for formatting command output in both
//! human-readable text format and JSON format for programmatic use.
//!
//! Submodules:
//! - [`color`]: Color tables and semantic message colors
//! - [`render`]: One-line and full views of a ticket

pub mod color;
pub mod render;

use gitit_format::TicketRecord;
use serde::Serialize;
use std::env;
use std::io::{self, Write};

pub use color::{ColorTable, error, success};
pub use render::{ColumnSpec, RenderError, default_columns};

// ============================================================================
// Output Configuration
// ============================================================================

/// Configuration for output formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Fixed width for the title column, overriding the configured one.
    pub title_width: Option<usize>,
    /// Whether to use colors in output.
    pub use_colors: bool,
}

impl OutputConfig {
    /// Create a new `OutputConfig` with explicit values.
    pub fn new(title_width: Option<usize>, use_colors: bool) -> Self {
        Self {
            title_width,
            use_colors,
        }
    }

    /// Create an `OutputConfig` by reading from environment variables.
    ///
    /// Reads:
    /// - `GITIT_TITLE_WIDTH`: Fixed title column width (default: fill the terminal)
    /// - `NO_COLOR`: Standard env var to disable colors (any value disables colors)
    /// - `GITIT_COLOR`: Set to "0" or "false" to disable colors (default: true)
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`OutputConfig::from_env`] with variables read through `var`.
    pub fn from_lookup<F>(var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let title_width = match var("GITIT_TITLE_WIDTH") {
            Some(s) if !s.is_empty() => match s.parse() {
                Ok(width) => Some(width),
                Err(_) => {
                    tracing::warn!(
                        env_var = "GITIT_TITLE_WIDTH",
                        value = %s,
                        "Invalid value, using configured width"
                    );
                    None
                }
            },
            _ => None,
        };

        // Respect NO_COLOR standard (https://no-color.org/)
        // Also support GITIT_COLOR for explicit control
        let use_colors = var("NO_COLOR").is_none()
            && var("GITIT_COLOR")
                .is_none_or(|v| v != "0" && !v.eq_ignore_ascii_case("false"));

        Self {
            title_width,
            use_colors,
        }
    }

    /// Adjust `columns` for display.
    ///
    /// An explicit title width wins. Otherwise the title column absorbs
    /// whatever room the terminal has beyond the configured row width.
    pub fn layout(&self, columns: &[ColumnSpec], terminal_width: Option<usize>) -> Vec<ColumnSpec> {
        let mut columns = columns.to_vec();
        let Some(title) = columns
            .iter()
            .position(|spec| spec.visible && spec.id == "title")
        else {
            return columns;
        };

        if let Some(width) = self.title_width {
            columns[title].width = width;
        } else if let Some(terminal_width) = terminal_width {
            let row_width = row_width(&columns);
            if terminal_width > row_width {
                columns[title].width += terminal_width - row_width;
            }
        }

        columns
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            title_width: None,
            use_colors: true,
        }
    }
}

/// Characters a row of `columns` occupies, separators included.
fn row_width(columns: &[ColumnSpec]) -> usize {
    let visible: Vec<&ColumnSpec> = columns.iter().filter(|spec| spec.visible).collect();
    let cells: usize = visible.iter().map(|spec| spec.width).sum();
    cells + visible.len().saturating_sub(1)
}

// ============================================================================
// Terminal Width Detection
// ============================================================================

/// Get the current terminal width, if stdout is a terminal.
fn get_terminal_width() -> Option<usize> {
    terminal_size::terminal_size().map(|(w, _)| usize::from(w.0))
}

/// Output format mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text format
    Text,
    /// JSON format for programmatic use
    Json,
}

// ============================================================================
// Public Dispatch Functions
// ============================================================================

/// Print a list of tickets in the specified format
///
/// # Errors
///
/// Returns rendering errors and errors writing to stdout.
pub fn print_tickets(
    tickets: &[TicketRecord],
    columns: &[ColumnSpec],
    annotate_ownership: bool,
    mode: OutputMode,
) -> Result<(), RenderError> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let config = OutputConfig::from_env();

    match mode {
        OutputMode::Text => {
            let columns = config.layout(columns, get_terminal_width());
            print_tickets_text(
                &mut handle,
                tickets,
                &columns,
                annotate_ownership,
                &ColorTable::for_config(&config),
            )
        }
        OutputMode::Json => Ok(write_json(&mut handle, &tickets)?),
    }
}

/// Print a ticket with all of its fields (for the show command)
///
/// # Errors
///
/// Returns rendering errors and errors writing to stdout.
pub fn print_ticket_details(ticket: &TicketRecord, mode: OutputMode) -> Result<(), RenderError> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let config = OutputConfig::from_env();

    match mode {
        OutputMode::Text => render::write_full_view(
            &mut handle,
            ticket,
            Some(&ticket.id),
            &ColorTable::for_config(&config),
        ),
        OutputMode::Json => Ok(write_json(&mut handle, ticket)?),
    }
}

/// Print a simple message
///
/// # Errors
///
/// Returns any error writing to stdout.
pub fn print_message(msg: &str) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{msg}")
}

/// Print a JSON-formatted result for any serializable value
///
/// # Errors
///
/// Returns any error serializing `value` or writing to stdout.
pub fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_json(&mut handle, value)
}

fn write_json<W: Write, T: Serialize + ?Sized>(w: &mut W, value: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(w, "{json}")
}

// ============================================================================
// Text Formatting
// ============================================================================

fn print_tickets_text<W: Write>(
    w: &mut W,
    tickets: &[TicketRecord],
    columns: &[ColumnSpec],
    annotate_ownership: bool,
    colors: &ColorTable,
) -> Result<(), RenderError> {
    if tickets.is_empty() {
        writeln!(w, "No tickets found.")?;
        return Ok(());
    }

    let mut release: Option<&str> = None;
    for ticket in tickets {
        if release != Some(ticket.release.as_str()) {
            if release.is_some() {
                writeln!(w)?;
            }
            writeln!(w, "{}:", ticket.release)?;
            release = Some(ticket.release.as_str());
        }
        render::write_one_line(w, ticket, columns, annotate_ownership, colors)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gitit_format::{TicketKind, TicketStatus};
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> OutputConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        OutputConfig::from_lookup(|name| vars.get(name).cloned())
    }

    fn test_ticket(id: &str, release: &str, title: &str) -> TicketRecord {
        TicketRecord {
            title: title.to_string(),
            kind: TicketKind::Bug,
            priority: 1,
            status: TicketStatus::Open,
            id: id.to_string(),
            release: release.to_string(),
            ..TicketRecord::default()
        }
    }

    #[test]
    fn test_output_config_defaults() {
        let config = config_from(&[]);
        assert_eq!(config, OutputConfig::default());
    }

    #[test]
    fn test_output_config_title_width() {
        assert_eq!(config_from(&[("GITIT_TITLE_WIDTH", "40")]).title_width, Some(40));
        assert_eq!(config_from(&[("GITIT_TITLE_WIDTH", "wide")]).title_width, None);
        assert_eq!(config_from(&[("GITIT_TITLE_WIDTH", "")]).title_width, None);
    }

    #[test]
    fn test_output_config_colors() {
        assert!(!config_from(&[("NO_COLOR", "1")]).use_colors);
        assert!(!config_from(&[("NO_COLOR", "")]).use_colors);
        assert!(!config_from(&[("GITIT_COLOR", "0")]).use_colors);
        assert!(!config_from(&[("GITIT_COLOR", "False")]).use_colors);
        assert!(config_from(&[("GITIT_COLOR", "1")]).use_colors);
    }

    #[test]
    fn test_layout_explicit_title_width() {
        let config = OutputConfig::new(Some(12), true);
        let columns = config.layout(&default_columns(), Some(200));

        let title = columns.iter().find(|c| c.id == "title").unwrap();
        assert_eq!(title.width, 12);
    }

    #[test]
    fn test_layout_fills_terminal() {
        let config = OutputConfig::default();
        let base = default_columns();
        // id 6, type 7, date 5, title 34, status 8, prio 4 and five separators
        assert_eq!(row_width(&base), 69);

        let wide = config.layout(&base, Some(100));
        assert_eq!(row_width(&wide), 100);

        let narrow = config.layout(&base, Some(40));
        assert_eq!(narrow, base);

        let unknown = config.layout(&base, None);
        assert_eq!(unknown, base);
    }

    #[test]
    fn test_layout_without_title_column() {
        let columns = vec![ColumnSpec::new("id", 6)];
        let config = OutputConfig::new(Some(30), true);
        assert_eq!(config.layout(&columns, Some(100)), columns);
    }

    #[test]
    fn test_print_tickets_groups_by_release() {
        let tickets = vec![
            test_ticket("aaa111", "v1", "First"),
            test_ticket("bbb222", "v1", "Second"),
            test_ticket("ccc333", "v2", "Third"),
        ];
        let columns = vec![ColumnSpec::new("id", 3), ColumnSpec::new("title", 6)];
        let mut buffer = Vec::new();

        print_tickets_text(&mut buffer, &tickets, &columns, false, &ColorTable::plain()).unwrap();

        let output = String::from_utf8(buffer).unwrap();
        assert_eq!(output, "v1:\naaa First \nbbb Second\n\nv2:\nccc Third \n");
    }

    #[test]
    fn test_print_tickets_empty() {
        let mut buffer = Vec::new();
        print_tickets_text(&mut buffer, &[], &default_columns(), false, &ColorTable::plain())
            .unwrap();

        assert_eq!(String::from_utf8(buffer).unwrap(), "No tickets found.\n");
    }

    #[test]
    fn test_print_tickets_propagates_render_errors() {
        let mut ticket = test_ticket("aaa111", "v1", "Broken");
        ticket.priority = 9;
        let mut buffer = Vec::new();

        let result = print_tickets_text(
            &mut buffer,
            &[ticket],
            &default_columns(),
            false,
            &ColorTable::plain(),
        );
        assert!(matches!(result, Err(RenderError::InvalidEnumValue { .. })));
    }

    #[test]
    fn test_write_json() {
        let ticket = test_ticket("aaa111", "v1", "Json");
        let mut buffer = Vec::new();

        write_json(&mut buffer, &ticket).unwrap();

        let parsed: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(parsed["id"], "aaa111");
        assert_eq!(parsed["type"], "bug");
        assert_eq!(parsed["status"], "open");
        assert_eq!(parsed["assigned_to"], "-");
    }
}
