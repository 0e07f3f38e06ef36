//! Implementation of the `init` command.
//!
//! This module handles initialization of a new git-it repository, creating
//! the `.it/` directory with its configuration and the ticket root.

use crate::error::{Error, Result};
use crate::output::render::{ColumnSpec, default_columns};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Name of the git-it directory
pub const IT_DIR_NAME: &str = ".it";

/// Name of the configuration file
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Ticket root used when the configuration does not name one
pub const DEFAULT_TICKET_ROOT: &str = ".tickets";

/// Maximum directory depth to traverse when searching for the repository root
pub const MAX_TRAVERSAL_DEPTH: usize = 256;

/// Configuration file structure for git-it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ItConfig {
    /// Ticket root, relative to the repository root
    #[serde(rename = "ticket-root")]
    pub ticket_root: String,

    /// Columns of the one-line ticket view
    pub columns: Vec<ColumnSpec>,
}

impl ItConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        debug!(path = %path.display(), "Loaded configuration");
        serde_yaml::from_str(&content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            serde_yaml::to_string(self).map_err(|e| Error::Config(format!("YAML error: {e}")))?;
        fs::write(path, content)?;
        Ok(())
    }
}

impl Default for ItConfig {
    fn default() -> Self {
        Self {
            ticket_root: DEFAULT_TICKET_ROOT.to_string(),
            columns: default_columns(),
        }
    }
}

/// Result of the init command
#[derive(Debug)]
pub struct InitResult {
    /// Path to the created `.it` directory
    pub it_dir: PathBuf,
    /// Path to the created config file
    pub config_file: PathBuf,
    /// Path to the ticket root
    pub ticket_root: PathBuf,
}

/// Initialize a new git-it repository in the given directory.
///
/// # Errors
///
/// Returns an error if:
/// - The `.it/` directory already exists
/// - File system operations fail
pub fn init(base_dir: &Path) -> Result<InitResult> {
    let it_dir = base_dir.join(IT_DIR_NAME);

    if it_dir.exists() {
        return Err(Error::Config(format!(
            "git-it is already initialized in this directory. Found existing '{IT_DIR_NAME}'"
        )));
    }

    fs::create_dir_all(&it_dir)?;

    let config_file = it_dir.join(CONFIG_FILE_NAME);
    let config = ItConfig::default();
    config.save(&config_file)?;

    let ticket_root = base_dir.join(&config.ticket_root);
    fs::create_dir_all(&ticket_root)?;

    Ok(InitResult {
        it_dir,
        config_file,
        ticket_root,
    })
}

/// Check if a directory has been initialized with git-it.
pub fn is_initialized(base_dir: &Path) -> bool {
    base_dir.join(IT_DIR_NAME).is_dir()
}

/// Find the repository root by searching up the directory tree.
///
/// Returns the directory containing `.it/`, or `None` if none is found
/// within the depth limit.
pub fn find_root(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();
    let mut depth = 0;

    loop {
        if is_initialized(&current) {
            return Some(current);
        }

        depth += 1;
        if depth > MAX_TRAVERSAL_DEPTH || !current.pop() {
            return None;
        }
    }
}
