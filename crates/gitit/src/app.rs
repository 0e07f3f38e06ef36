//! Application context for CLI command execution.
//!
//! # Example
//!
//! ```no_run
//! use gitit::app::App;
//! use std::path::Path;
//!
//! fn main() -> anyhow::Result<()> {
//!     let app = App::from_directory(Path::new("."))?;
//!     println!("{} tickets", app.store().list(None)?.len());
//!     Ok(())
//! }
//! ```

use crate::commands::init::{CONFIG_FILE_NAME, IT_DIR_NAME, ItConfig, find_root};
use crate::error::{Error, Result};
use crate::output::render::ColumnSpec;
use crate::storage::TicketStore;
use std::path::Path;
use tracing::debug;

/// Application context for CLI operations.
///
/// Holds the repository configuration and the ticket store it points at.
#[derive(Debug)]
pub struct App {
    store: TicketStore,
    config: ItConfig,
}

impl App {
    /// Create an App instance from the given working directory.
    ///
    /// Searches up the directory tree to find a `.it/` directory and loads
    /// its configuration. A missing config file means defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No git-it repository is found in the directory tree
    /// - The configuration cannot be read or parsed
    pub fn from_directory(working_dir: &Path) -> Result<Self> {
        let root_dir = find_root(working_dir).ok_or(Error::NotInitialized)?;

        let config_path = root_dir.join(IT_DIR_NAME).join(CONFIG_FILE_NAME);
        let config = if config_path.exists() {
            ItConfig::load(&config_path)?
        } else {
            debug!(path = %config_path.display(), "No configuration file, using defaults");
            ItConfig::default()
        };

        let store = TicketStore::new(root_dir.join(&config.ticket_root));
        debug!(root = %store.root().display(), "Opened ticket store");

        Ok(Self { store, config })
    }

    /// The ticket store.
    pub fn store(&self) -> &TicketStore {
        &self.store
    }

    /// Columns of the one-line view.
    pub fn columns(&self) -> &[ColumnSpec] {
        &self.config.columns
    }
}
