//! Snapshot persistence with change detection.
//!
//! A write happens only when the bytes on disk differ from what would be
//! written, ignoring the generation timestamp, and then replaces the whole
//! file at once.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tempfile::NamedTempFile;

use crate::error::{FetchError, FetchResult};
use crate::models::Snapshot;

/// What [`SnapshotStore::write_if_changed`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The file was (re)written.
    Written {
        /// Size of the file on disk after the write.
        bytes: u64,
    },
    /// The existing file already holds this content; nothing was written.
    Unchanged,
}

/// SHA-256 of `text` as lowercase hex.
fn digest(text: &str) -> String {
    format!("{:x}", Sha256::digest(text.as_bytes()))
}

/// `metadata.last_updated` of a previously written file, if it has one.
fn previous_timestamp(text: &str) -> Option<String> {
    let value: serde_json::Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(error = %e, "Existing snapshot is not valid JSON, it will be replaced");
            return None;
        }
    };
    value.get("metadata")?.get("last_updated")?.as_str().map(str::to_owned)
}

/// The snapshot file at a fixed path.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    /// Store backed by `path`. Nothing is touched until a write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the snapshot file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw text of the file on disk, `None` when it does not exist.
    fn read_existing(&self) -> FetchResult<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(FetchError::io("read snapshot", &self.path, e)),
        }
    }

    /// Persist `snapshot` unless the file on disk already holds exactly its
    /// serialization, up to `last_updated`.
    ///
    /// The old file is compared as raw bytes: the new snapshot is serialized
    /// with the old file's timestamp and both texts are digested. A prior file
    /// in any other layout, or with extra fields, is therefore rewritten.
    pub fn write_if_changed(&self, snapshot: &Snapshot) -> FetchResult<WriteOutcome> {
        let text = snapshot.to_json()?;

        if let Some(old) = self.read_existing()? {
            let candidate = match previous_timestamp(&old) {
                Some(last_updated) if last_updated != snapshot.metadata.last_updated => {
                    let mut stamped = snapshot.clone();
                    stamped.metadata.last_updated = last_updated;
                    stamped.to_json()?
                }
                _ => text.clone(),
            };

            let old_digest = digest(&old);
            let new_digest = digest(&candidate);
            if old_digest == new_digest {
                tracing::info!(path = %self.path.display(), digest = %new_digest, "Snapshot unchanged, skipping write");
                return Ok(WriteOutcome::Unchanged);
            }
            tracing::debug!(old = %old_digest, new = %new_digest, "Snapshot changed");
        }

        self.replace(text.as_bytes())?;

        let bytes = fs::metadata(&self.path)
            .map_err(|e| FetchError::io("verify snapshot", &self.path, e))?
            .len();

        tracing::info!(
            path = %self.path.display(),
            chars = text.chars().count(),
            bytes,
            "Snapshot written"
        );

        Ok(WriteOutcome::Written { bytes })
    }

    /// Atomic write: temp file in the target directory, then rename over the target.
    fn replace(&self, data: &[u8]) -> FetchResult<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        fs::create_dir_all(&dir).map_err(|e| FetchError::io("create directory", &dir, e))?;

        let mut tmp =
            NamedTempFile::new_in(&dir).map_err(|e| FetchError::io("create temp file", &dir, e))?;
        tmp.write_all(data).map_err(|e| FetchError::io("write snapshot", tmp.path(), e))?;
        tmp.persist(&self.path).map_err(|e| FetchError::io("replace snapshot", &self.path, e.error))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AuthorProfile, Papers, PublicationRecord};

    fn make_store() -> (tempfile::TempDir, SnapshotStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("data").join("scholar_stats.json"));
        (dir, store)
    }

    fn snapshot(citations: u64, last_updated: &str) -> Snapshot {
        let mut papers = Papers::new();
        papers.insert(
            "p1".to_string(),
            PublicationRecord {
                title: "A paper".to_string(),
                citations,
                year: "2021".to_string(),
                venue: "Venue".to_string(),
                authors: "A and B".to_string(),
            },
        );
        Snapshot {
            metadata: AuthorProfile {
                scholar_id: "id".to_string(),
                name: "Name".to_string(),
                affiliation: String::new(),
                last_updated: last_updated.to_string(),
                total_citations: citations,
                h_index: 1,
                i10_index: 0,
                publication_count: 1,
            },
            papers,
        }
    }

    #[test]
    fn first_write_creates_directory_and_file() {
        let (_dir, store) = make_store();
        let snap = snapshot(5, "2024-01-01 00:00:00");

        let outcome = store.write_if_changed(&snap).unwrap();
        let on_disk = fs::read_to_string(store.path()).unwrap();

        assert_eq!(outcome, WriteOutcome::Written { bytes: on_disk.len() as u64 });
        assert_eq!(on_disk, snap.to_json().unwrap());
    }

    #[test]
    fn identical_content_is_not_rewritten() {
        let (_dir, store) = make_store();
        store.write_if_changed(&snapshot(5, "2024-01-01 00:00:00")).unwrap();
        let before = fs::read_to_string(store.path()).unwrap();

        let outcome = store.write_if_changed(&snapshot(5, "2024-02-02 12:00:00")).unwrap();

        assert_eq!(outcome, WriteOutcome::Unchanged);
        assert_eq!(fs::read_to_string(store.path()).unwrap(), before);
    }

    #[test]
    fn changed_content_overwrites_file() {
        let (_dir, store) = make_store();
        store.write_if_changed(&snapshot(5, "2024-01-01 00:00:00")).unwrap();

        let updated = snapshot(6, "2024-01-02 00:00:00");
        let outcome = store.write_if_changed(&updated).unwrap();

        assert!(matches!(outcome, WriteOutcome::Written { .. }));
        assert_eq!(fs::read_to_string(store.path()).unwrap(), updated.to_json().unwrap());
    }

    #[test]
    fn unreadable_existing_file_is_replaced() {
        let (_dir, store) = make_store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "not json").unwrap();

        let snap = snapshot(1, "2024-01-01 00:00:00");
        let outcome = store.write_if_changed(&snap).unwrap();
        assert!(matches!(outcome, WriteOutcome::Written { .. }));
        assert_eq!(fs::read_to_string(store.path()).unwrap(), snap.to_json().unwrap());
    }

    #[test]
    fn non_canonical_prior_file_is_rewritten() {
        let (_dir, store) = make_store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();

        // Same metrics, but compact and carrying a field this tool never writes.
        let mut prior = serde_json::to_value(snapshot(5, "2024-01-01 00:00:00")).unwrap();
        prior["metadata"]["stale_field"] = serde_json::json!("left over");
        fs::write(store.path(), serde_json::to_string(&prior).unwrap()).unwrap();

        let snap = snapshot(5, "2024-02-02 12:00:00");
        let outcome = store.write_if_changed(&snap).unwrap();

        assert!(matches!(outcome, WriteOutcome::Written { .. }));
        let on_disk = fs::read_to_string(store.path()).unwrap();
        assert_eq!(on_disk, snap.to_json().unwrap());
        assert!(!on_disk.contains("stale_field"));
    }

    #[test]
    fn compact_prior_file_with_same_content_is_rewritten() {
        let (_dir, store) = make_store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        let prior = snapshot(5, "2024-01-01 00:00:00");
        fs::write(store.path(), serde_json::to_string(&prior).unwrap()).unwrap();

        let outcome = store.write_if_changed(&snapshot(5, "2024-01-01 00:00:00")).unwrap();

        assert!(matches!(outcome, WriteOutcome::Written { .. }));
        assert_eq!(fs::read_to_string(store.path()).unwrap(), prior.to_json().unwrap());
    }

    #[test]
    fn prior_file_without_timestamp_is_rewritten() {
        let (_dir, store) = make_store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        let mut prior = serde_json::to_value(snapshot(5, "2024-01-01 00:00:00")).unwrap();
        prior["metadata"].as_object_mut().unwrap().remove("last_updated");
        fs::write(store.path(), serde_json::to_string_pretty(&prior).unwrap()).unwrap();

        let outcome = store.write_if_changed(&snapshot(5, "2024-01-01 00:00:00")).unwrap();
        assert!(matches!(outcome, WriteOutcome::Written { .. }));
    }

    #[test]
    fn digest_is_lowercase_sha256_hex() {
        let hex = digest("abc");
        assert_eq!(hex, "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad");
    }

    #[test]
    fn no_temp_files_left_behind() {
        let (_dir, store) = make_store();
        store.write_if_changed(&snapshot(1, "2024-01-01 00:00:00")).unwrap();
        store.write_if_changed(&snapshot(2, "2024-01-01 00:00:00")).unwrap();

        let entries: Vec<_> = fs::read_dir(store.path().parent().unwrap()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }
}
