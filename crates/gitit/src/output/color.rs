//! Color and styling helpers for CLI output.
//!
//! Ticket rendering works with symbolic color names (`bold`,
//! `red-on-white`, ...) looked up in a [`ColorTable`]. Every colored cell
//! is closed with the table's `default` entry, so colors never leak from
//! one cell into the next.
//!
//! Status and progress messages use `colored` directly through the
//! semantic helpers at the bottom of this module.

use colored::Colorize;
use std::collections::BTreeMap;

use super::OutputConfig;

/// Name of the entry that resets all attributes.
pub const DEFAULT: &str = "default";

/// Names every table must provide.
pub const REQUIRED_COLORS: [&str; 6] = [
    DEFAULT,
    "bold",
    "red-on-white",
    "yellow-on-white",
    "green-on-white",
    "white",
];

const ANSI_COLORS: [(&str, &str); 6] = [
    (DEFAULT, "\x1b[0m"),
    ("bold", "\x1b[1m"),
    ("red-on-white", "\x1b[31;47m"),
    ("yellow-on-white", "\x1b[33;47m"),
    ("green-on-white", "\x1b[32;47m"),
    ("white", "\x1b[37m"),
];

/// Maps symbolic color names to terminal escape sequences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorTable {
    entries: BTreeMap<&'static str, &'static str>,
}

impl ColorTable {
    /// ANSI escape sequences.
    pub fn ansi() -> Self {
        Self {
            entries: ANSI_COLORS.into_iter().collect(),
        }
    }

    /// Every known name maps to the empty string.
    pub fn plain() -> Self {
        Self {
            entries: ANSI_COLORS.iter().map(|(name, _)| (*name, "")).collect(),
        }
    }

    /// The table matching the color setting of `config`.
    pub fn for_config(config: &OutputConfig) -> Self {
        if config.use_colors {
            Self::ansi()
        } else {
            Self::plain()
        }
    }

    /// Build a table from explicit entries.
    ///
    /// Missing names are not filled in; lookups for them fail at render time.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'static str, &'static str)>,
    {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Escape sequence for `name`, if the table has one.
    pub fn get(&self, name: &str) -> Option<&'static str> {
        self.entries.get(name).copied()
    }
}

impl Default for ColorTable {
    fn default() -> Self {
        Self::ansi()
    }
}

/// Apply semantic "success" color (green) to text.
pub fn success(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.green().to_string()
}

/// Apply semantic "error" color (red) to text.
pub fn error(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.red().to_string()
}
