//! Saved ability sets.
//!
//! All sets live in one JSON array under the fixed namespace key
//! [`NAMESPACE_KEY`] (`<home>/df_ability_sets_v1.json`). The store never
//! fails the session:
//!
//! - Loading a missing, unreadable, corrupt or non-array file yields an
//!   empty collection.
//! - Saving is best-effort; failures are logged and swallowed.

use crate::ability::{AbilitySet, AbilitySpec};
use crate::fs::atomic_write_file;
use crate::prompt::PowerLevel;
use chrono::Utc;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[cfg(test)]
mod tests;

/// Namespace key the collection is stored under.
pub const NAMESPACE_KEY: &str = "df_ability_sets_v1";

/// File-backed collection of [`AbilitySet`]s.
#[derive(Debug, Clone)]
pub struct SetStore {
    path: PathBuf,
}

impl SetStore {
    /// Store rooted in the given home directory.
    pub fn in_dir<P: AsRef<Path>>(home: P) -> Self {
        Self {
            path: home.as_ref().join(format!("{}.json", NAMESPACE_KEY)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every saved set, in insertion order.
    pub fn load_all(&self) -> Vec<AbilitySet> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "saved sets unreadable, treating as empty");
                return Vec::new();
            }
        };

        let value: Value = match serde_json::from_str(&content) {
            Ok(value) => value,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "saved sets corrupt, treating as empty");
                return Vec::new();
            }
        };

        let Value::Array(entries) = value else {
            warn!(path = %self.path.display(), "saved sets are not a list, treating as empty");
            return Vec::new();
        };

        // One malformed entry should not hide the rest.
        entries
            .into_iter()
            .filter_map(|entry| match serde_json::from_value::<AbilitySet>(entry) {
                Ok(set) => Some(set),
                Err(e) => {
                    warn!(error = %e, "skipping malformed saved set");
                    None
                }
            })
            .collect()
    }

    /// Replace the whole collection. Failures are logged, never returned.
    pub fn save_all(&self, sets: &[AbilitySet]) {
        let json = match serde_json::to_string_pretty(sets) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "could not serialize saved sets");
                return;
            }
        };

        match atomic_write_file(&self.path, &json) {
            Ok(()) => debug!(count = sets.len(), path = %self.path.display(), "saved sets written"),
            Err(e) => warn!(error = %e, "could not write saved sets"),
        }
    }

    /// Save a new named set and return it.
    pub fn add(&self, name: &str, abilities: &[AbilitySpec], power_level: PowerLevel) -> AbilitySet {
        let mut sets = self.load_all();

        let set = AbilitySet {
            id: next_id(&sets, Utc::now().timestamp_millis()),
            name: name.trim().to_string(),
            abilities: abilities.to_vec(),
            power_level,
        };

        sets.push(set.clone());
        self.save_all(&sets);
        set
    }

    /// Look up a set by id.
    pub fn get(&self, id: u64) -> Option<AbilitySet> {
        self.load_all().into_iter().find(|s| s.id == id)
    }

    /// Remove a set by id. Returns whether anything was removed.
    pub fn delete(&self, id: u64) -> bool {
        let mut sets = self.load_all();
        let before = sets.len();
        sets.retain(|s| s.id != id);

        if sets.len() == before {
            return false;
        }
        self.save_all(&sets);
        true
    }
}

/// Timestamp-derived id, bumped past any existing id to stay unique.
fn next_id(existing: &[AbilitySet], now_millis: i64) -> u64 {
    let candidate = u64::try_from(now_millis).unwrap_or(0);
    match existing.iter().map(|s| s.id).max() {
        Some(max) if candidate <= max => max + 1,
        _ => candidate,
    }
}
