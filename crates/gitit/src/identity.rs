//! Who is filing or taking tickets.

use std::process::Command;
use tracing::debug;

use crate::error::{Error, Result};

/// Source of the current user's name and email.
pub trait IdentityProvider {
    /// Full name of the user.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IdentityMissing`] if no name is configured.
    fn fullname(&self) -> Result<String>;

    /// Email address of the user.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IdentityMissing`] if no email is configured.
    fn email(&self) -> Result<String>;

    /// `"Name <email>"`, as written to the `Issuer` header.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IdentityMissing`] if either part is missing.
    fn issuer(&self) -> Result<String> {
        Ok(format!("{} <{}>", self.fullname()?, self.email()?))
    }
}

/// Reads `user.name` and `user.email` from git configuration.
#[derive(Debug, Default, Clone, Copy)]
pub struct GitIdentity;

impl GitIdentity {
    fn config_value(key: &str) -> Result<String> {
        let output = Command::new("git").args(["config", key]).output()?;
        let value = String::from_utf8_lossy(&output.stdout).trim().to_string();

        if !output.status.success() || value.is_empty() {
            debug!(key, "git config value not set");
            return Err(Error::IdentityMissing(key.to_string()));
        }
        Ok(value)
    }
}

impl IdentityProvider for GitIdentity {
    fn fullname(&self) -> Result<String> {
        Self::config_value("user.name")
    }

    fn email(&self) -> Result<String> {
        Self::config_value("user.email")
    }
}

/// An identity with fixed values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedIdentity {
    /// Full name.
    pub name: String,
    /// Email address.
    pub email: String,
}

impl FixedIdentity {
    /// Create an identity with the given name and email.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

impl IdentityProvider for FixedIdentity {
    fn fullname(&self) -> Result<String> {
        if self.name.is_empty() {
            return Err(Error::IdentityMissing("user.name".to_string()));
        }
        Ok(self.name.clone())
    }

    fn email(&self) -> Result<String> {
        if self.email.is_empty() {
            return Err(Error::IdentityMissing("user.email".to_string()));
        }
        Ok(self.email.clone())
    }
}
