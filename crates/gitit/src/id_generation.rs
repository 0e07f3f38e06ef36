//! Hash-based ticket ids.
//!
//! A new ticket's id is the SHA-256 of its serialized content, the current
//! time and a nonce, hex encoded and cut to [`ID_LENGTH`] characters. The
//! nonce is bumped until the id does not clash with any registered id.

use chrono::Utc;
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::fmt::Write as _;
use tracing::debug;

/// Number of hex characters in a generated id.
pub const ID_LENGTH: usize = 40;

/// Generates ticket ids that do not collide with known ones.
#[derive(Debug, Default)]
pub struct IdGenerator {
    existing_ids: HashSet<String>,
}

impl IdGenerator {
    /// Create a generator aware of `ids`.
    pub fn with_existing<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self {
            existing_ids: ids.into_iter().collect(),
        }
    }

    /// Generate a new unique id for a ticket whose file content is `content`.
    pub fn generate(&mut self, content: &str) -> String {
        let timestamp = Utc::now().timestamp_nanos_opt().unwrap_or_default();

        let mut nonce: u64 = 0;
        loop {
            let id = hash_id(content, timestamp, nonce);
            if self.existing_ids.insert(id.clone()) {
                if nonce > 0 {
                    debug!(nonce, "Generated unique id after collision retries");
                }
                return id;
            }
            nonce += 1;
        }
    }
}

fn hash_id(content: &str, timestamp: i64, nonce: u64) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hasher.update(timestamp.to_le_bytes());
    hasher.update(nonce.to_le_bytes());
    let digest = hasher.finalize();

    let mut id = String::with_capacity(ID_LENGTH);
    for byte in digest.iter().take(ID_LENGTH / 2) {
        let _ = write!(id, "{byte:02x}");
    }
    id
}
