//! File-per-ticket storage.
//!
//! Tickets live at `<root>/<release>/<id>`. The file itself carries neither
//! the id nor the release; both come from its location when it is loaded.

use gitit_format::{TicketRecord, parse_ticket, write_ticket_file};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::id_generation::IdGenerator;

/// Check that `release` names a single visible directory below the root.
///
/// # Errors
///
/// Returns [`Error::InvalidRelease`] for empty names, names starting with
/// `.`, and names containing a path separator.
pub fn validate_release(release: &str) -> Result<()> {
    let reason = if release.is_empty() {
        "releases cannot be empty"
    } else if release.starts_with('.') {
        "releases cannot start with '.'"
    } else if release.contains(['/', '\\']) {
        "releases cannot contain path separators"
    } else {
        return Ok(());
    };

    Err(Error::InvalidRelease {
        release: release.to_string(),
        reason,
    })
}

/// Stores each ticket as a text file below a ticket root directory.
#[derive(Debug, Clone)]
pub struct TicketStore {
    root: PathBuf,
}

impl TicketStore {
    /// Create a store rooted at `root`. Nothing is touched on disk.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The ticket root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Canonical location of a ticket.
    pub fn path_for(&self, release: &str, id: &str) -> PathBuf {
        self.root.join(release).join(id)
    }

    /// Write `ticket` to its canonical location, creating the release
    /// directory when needed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRelease`] if the ticket's release is not a
    /// valid directory name and [`Error::StorageWriteFailure`] if the
    /// directory or file cannot be written.
    pub fn save(&self, ticket: &TicketRecord) -> Result<PathBuf> {
        validate_release(&ticket.release)?;
        let path = self.path_for(&ticket.release, &ticket.id);
        self.save_to(ticket, &path)?;
        Ok(path)
    }

    /// Write `ticket` to an explicit `path`.
    ///
    /// The write is not atomic; a failure may leave a partial file behind.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StorageWriteFailure`] if the directory or file
    /// cannot be written.
    pub fn save_to(&self, ticket: &TicketRecord, path: &Path) -> Result<()> {
        let write_failure = |source: io::Error| Error::StorageWriteFailure {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_failure)?;
        }
        write_ticket_file(path, ticket).map_err(write_failure)?;

        debug!(path = %path.display(), "Saved ticket");
        Ok(())
    }

    /// Give `ticket` a fresh id and save it.
    ///
    /// # Errors
    ///
    /// Returns an error if the existing tickets cannot be listed or the
    /// new file cannot be written.
    pub fn create(&self, ticket: &mut TicketRecord) -> Result<PathBuf> {
        let existing = self.list(None)?.into_iter().map(|t| t.id);
        let mut generator = IdGenerator::with_existing(existing);
        ticket.id = generator.generate(&gitit_format::serialize_ticket(ticket));
        self.save(ticket)
    }

    /// Move `ticket` into `release`, removing its old file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRelease`] for an unusable release name, or an
    /// error if the new file cannot be written or the old one cannot be
    /// removed.
    pub fn move_to(&self, ticket: &mut TicketRecord, release: &str) -> Result<PathBuf> {
        validate_release(release)?;
        let old_path = self.path_for(&ticket.release, &ticket.id);
        ticket.release = release.to_string();
        let new_path = self.save(ticket)?;

        if old_path != new_path {
            fs::remove_file(&old_path)?;
        }
        Ok(new_path)
    }

    /// Load the ticket at `path`, taking its id from the file name and its
    /// release from the parent directory name.
    ///
    /// Returns `Ok(None)` if the file is missing, unreadable, or empty.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] if the file content is not a valid ticket.
    pub fn load(&self, path: &Path) -> Result<Option<TicketRecord>> {
        let id = path.file_name().and_then(|name| name.to_str());
        let release = path
            .parent()
            .and_then(Path::file_name)
            .and_then(|name| name.to_str());

        match (id, release) {
            (Some(id), Some(release)) => self.load_as(path, id, release),
            _ => self.load_content(path, None),
        }
    }

    /// Load the ticket at `path` with an explicit id and release.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] if the file content is not a valid ticket.
    pub fn load_as(&self, path: &Path, id: &str, release: &str) -> Result<Option<TicketRecord>> {
        self.load_content(path, Some((id, release)))
    }

    fn load_content(
        &self,
        path: &Path,
        location: Option<(&str, &str)>,
    ) -> Result<Option<TicketRecord>> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Ticket file has no content");
                return Ok(None);
            }
        };
        if content.is_empty() {
            warn!(path = %path.display(), "Ticket file has no content");
            return Ok(None);
        }

        let (id, release) = location.unzip();
        Ok(Some(parse_ticket(&content, id, release)?))
    }

    /// Release directories below the root, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the root exists but cannot be read.
    pub fn releases(&self) -> Result<Vec<String>> {
        if !self.root.is_dir() {
            return Ok(Vec::new());
        }

        let mut releases = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            if let Some(name) = visible_name(&entry.path()) {
                releases.push(name);
            }
        }

        releases.sort();
        Ok(releases)
    }

    /// Load every ticket, or only those in `release`, sorted by release
    /// then id.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory cannot be read or a ticket file
    /// cannot be parsed.
    pub fn list(&self, release: Option<&str>) -> Result<Vec<TicketRecord>> {
        let releases = match release {
            Some(release) => vec![release.to_string()],
            None => self.releases()?,
        };

        let mut tickets = Vec::new();
        for release in releases {
            let dir = self.root.join(&release);
            if !dir.is_dir() {
                debug!(release = %release, "Release directory does not exist");
                continue;
            }

            let mut release_tickets = Vec::new();
            for entry in fs::read_dir(&dir)? {
                let entry = entry?;
                if !entry.file_type()?.is_file() {
                    continue;
                }
                let path = entry.path();
                let Some(id) = visible_name(&path) else {
                    continue;
                };
                if let Some(ticket) = self.load_as(&path, &id, &release)? {
                    release_tickets.push(ticket);
                }
            }

            release_tickets.sort_by(|a, b| a.id.cmp(&b.id));
            tickets.extend(release_tickets);
        }

        Ok(tickets)
    }

    /// Find the ticket whose id starts with `prefix`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TicketNotFound`] if no id matches and
    /// [`Error::AmbiguousTicketId`] if several do.
    pub fn find(&self, prefix: &str) -> Result<TicketRecord> {
        let mut matches = self
            .list(None)?
            .into_iter()
            .filter(|ticket| ticket.id.starts_with(prefix));

        match (matches.next(), matches.next()) {
            (Some(ticket), None) => Ok(ticket),
            (None, _) => Err(Error::TicketNotFound(prefix.to_string())),
            (Some(_), Some(_)) => Err(Error::AmbiguousTicketId(prefix.to_string())),
        }
    }
}

/// File name of `path` unless it is hidden or not UTF-8.
fn visible_name(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    if name.starts_with('.') {
        None
    } else {
        Some(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gitit_format::{TicketKind, TicketStatus};
    use rstest::rstest;
    use tempfile::TempDir;

    fn ticket(release: &str, id: &str, title: &str) -> TicketRecord {
        TicketRecord {
            title: title.to_string(),
            kind: TicketKind::Task,
            issuer: "Jane <jane@example.com>".to_string(),
            priority: 2,
            release: release.to_string(),
            id: id.to_string(),
            ..TicketRecord::default()
        }
    }

    fn store() -> (TempDir, TicketStore) {
        let temp = TempDir::new().unwrap();
        let store = TicketStore::new(temp.path().join(".tickets"));
        (temp, store)
    }

    #[test]
    fn test_path_for() {
        let store = TicketStore::new("/repo/.tickets");
        assert_eq!(
            store.path_for("v1", "000123"),
            PathBuf::from("/repo/.tickets/v1/000123")
        );
    }

    #[test]
    fn test_save_creates_release_directory() {
        let (_temp, store) = store();
        let record = ticket("v1", "000123", "Crash on start");

        let path = store.save(&record).unwrap();

        assert_eq!(path, store.root().join("v1").join("000123"));
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("Subject: Crash on start\n"));
        assert!(!content.contains("000123"));
    }

    #[test]
    fn test_save_to_unwritable_path() {
        let (temp, store) = store();
        let blocker = temp.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();
        let target = blocker.join("v1").join("abc");

        let result = store.save_to(&ticket("v1", "abc", "x"), &target);

        match result {
            Err(Error::StorageWriteFailure { path, .. }) => assert_eq!(path, target),
            other => panic!("expected StorageWriteFailure, got {other:?}"),
        }
    }

    #[test]
    fn test_load_takes_location_from_path() {
        let (_temp, store) = store();
        let record = ticket("v1", "000123", "Crash on start");
        let path = store.save(&record).unwrap();

        let loaded = store.load(&path).unwrap().unwrap();
        assert_eq!(loaded, record);
    }

    #[test]
    fn test_load_as_overrides_location() {
        let (_temp, store) = store();
        let path = store.save(&ticket("v1", "000123", "Crash")).unwrap();

        let loaded = store.load_as(&path, "abcdef", "v9").unwrap().unwrap();
        assert_eq!(loaded.id, "abcdef");
        assert_eq!(loaded.release, "v9");
    }

    #[test]
    fn test_load_missing_or_empty_is_none() {
        let (temp, store) = store();
        assert!(store.load(&temp.path().join("nope")).unwrap().is_none());

        let empty = temp.path().join("empty");
        fs::write(&empty, "").unwrap();
        assert!(store.load(&empty).unwrap().is_none());
    }

    #[test]
    fn test_load_propagates_parse_errors() {
        let (temp, store) = store();
        let bad = temp.path().join("bad");
        fs::write(&bad, "Subject: only a subject\n").unwrap();

        assert!(matches!(store.load(&bad), Err(Error::Parse(_))));
    }

    #[test]
    fn test_releases_and_list_are_sorted() {
        let (_temp, store) = store();
        store.save(&ticket("v2", "bbb", "Two")).unwrap();
        store.save(&ticket("v1", "ccc", "Three")).unwrap();
        store.save(&ticket("v1", "aaa", "One")).unwrap();
        fs::create_dir_all(store.root().join(".hidden")).unwrap();
        fs::write(store.root().join("v1").join(".swap"), "junk").unwrap();

        assert_eq!(store.releases().unwrap(), vec!["v1", "v2"]);

        let ids: Vec<String> = store.list(None).unwrap().into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["aaa", "ccc", "bbb"]);

        let v2: Vec<String> = store
            .list(Some("v2"))
            .unwrap()
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(v2, vec!["Two"]);
    }

    #[test]
    fn test_list_without_root() {
        let (_temp, store) = store();
        assert!(store.releases().unwrap().is_empty());
        assert!(store.list(None).unwrap().is_empty());
        assert!(store.list(Some("v1")).unwrap().is_empty());
    }

    #[test]
    fn test_find_by_prefix() {
        let (_temp, store) = store();
        store.save(&ticket("v1", "abc123", "First")).unwrap();
        store.save(&ticket("v2", "abd456", "Second")).unwrap();

        assert_eq!(store.find("abc").unwrap().title, "First");
        assert_eq!(store.find("abd456").unwrap().release, "v2");
        assert!(matches!(store.find("ab"), Err(Error::AmbiguousTicketId(p)) if p == "ab"));
        assert!(matches!(store.find("fff"), Err(Error::TicketNotFound(p)) if p == "fff"));
    }

    #[test]
    fn test_create_assigns_id() {
        let (_temp, store) = store();
        let mut record = ticket("uncategorized", "", "New");

        let path = store.create(&mut record).unwrap();

        assert_eq!(record.id.len(), crate::id_generation::ID_LENGTH);
        assert_eq!(path, store.path_for("uncategorized", &record.id));
        assert_eq!(store.find(&record.id[..8]).unwrap().title, "New");
    }

    #[test]
    fn test_move_to_release() {
        let (_temp, store) = store();
        let mut record = ticket("v1", "abc", "Movable");
        let old_path = store.save(&record).unwrap();

        let new_path = store.move_to(&mut record, "v2").unwrap();

        assert!(!old_path.exists());
        assert!(new_path.exists());
        assert_eq!(record.release, "v2");
        assert_eq!(store.find("abc").unwrap().release, "v2");
    }

    #[rstest]
    #[case::empty("", "cannot be empty")]
    #[case::parent("../outside", "cannot start with '.'")]
    #[case::hidden(".git", "cannot start with '.'")]
    #[case::nested("v1/v2", "path separators")]
    #[case::backslash("v1\\v2", "path separators")]
    fn test_validate_release_rejects(#[case] release: &str, #[case] reason: &str) {
        let err = validate_release(release).unwrap_err();
        assert!(
            matches!(err, Error::InvalidRelease { release: ref r, reason: why } if r == release && why.contains(reason)),
            "unexpected error: {err:?}"
        );
    }

    #[rstest]
    #[case::simple("v1")]
    #[case::dotted("1.0.2")]
    #[case::words("next release")]
    fn test_validate_release_accepts(#[case] release: &str) {
        assert!(validate_release(release).is_ok());
    }

    #[test]
    fn test_save_refuses_release_outside_root() {
        let (temp, store) = store();
        let record = ticket("../outside", "abc", "Escapes");

        let result = store.save(&record);

        assert!(matches!(result, Err(Error::InvalidRelease { .. })));
        assert!(!temp.path().join("outside").exists());
    }

    #[test]
    fn test_move_to_invalid_release_keeps_ticket() {
        let (_temp, store) = store();
        let mut record = ticket("v1", "abc", "Stays");
        let path = store.save(&record).unwrap();

        let result = store.move_to(&mut record, "v1/v2");

        assert!(matches!(result, Err(Error::InvalidRelease { .. })));
        assert_eq!(record.release, "v1");
        assert!(path.exists());
    }

    #[test]
    fn test_save_keeps_status() {
        let (_temp, store) = store();
        let mut record = ticket("v1", "abc", "Fix me");
        store.save(&record).unwrap();

        record.status = TicketStatus::Fixed;
        store.save(&record).unwrap();

        assert_eq!(store.find("abc").unwrap().status, TicketStatus::Fixed);
    }
}
