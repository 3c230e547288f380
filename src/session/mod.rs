//! Session state for the current batch of abilities.
//!
//! The session changes only through [`Session::apply`], a pure
//! `(Session, Action) -> Session` transition. Requests are stamped when they
//! begin; a completion whose stamp is not newer than the last applied one is
//! dropped, so a slow response can never overwrite a newer result.
//!
//! Between CLI invocations the session lives in `<home>/session.json`.
//! Separate processes share it through [`Session::update`], which reloads,
//! applies and saves while holding `<home>/session.lock`.

use crate::ability::{AbilitySet, AbilitySpec};
use crate::client::{GenerationError, ModelName};
use crate::error;
use crate::fs::{acquire_lock, atomic_write_file};
use crate::prompt::PowerLevel;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::{debug, warn};


/// How the ability list is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Cards,
    Table,
}

impl ViewMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ViewMode::Cards => "cards",
            ViewMode::Table => "table",
        }
    }
}

/// Outcome of the most recent action, shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Status {
    #[default]
    Idle,
    Generating,
    Rerolling {
        index: usize,
    },
    Generated {
        count: usize,
    },
    Rerolled {
        index: usize,
    },
    Restored,
    Loaded {
        name: String,
    },
    Failed {
        message: String,
    },
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Idle => f.write_str("Ready."),
            Status::Generating => f.write_str("Generating abilities..."),
            Status::Rerolling { index } => write!(f, "Rerolling ability {}...", index + 1),
            Status::Generated { count } => write!(f, "Generated {} abilities.", count),
            Status::Rerolled { index } => write!(f, "Rerolled ability {}.", index + 1),
            Status::Restored => f.write_str("Restored abilities from before the last reroll."),
            Status::Loaded { name } => write!(f, "Loaded set '{}'.", name),
            Status::Failed { message } => write!(f, "Error: {}", message),
        }
    }
}

/// Everything that can happen to a session.
#[derive(Debug, Clone)]
pub enum Action {
    BeginGeneration {
        model: ModelName,
    },
    /// `index` is 0-based.
    BeginReroll {
        index: usize,
    },
    GenerationFinished {
        stamp: u64,
        power_level: PowerLevel,
        outcome: Result<Vec<AbilitySpec>, GenerationError>,
    },
    RerollFinished {
        stamp: u64,
        index: usize,
        outcome: Result<Vec<AbilitySpec>, GenerationError>,
    },
    Undo,
    LoadSet(AbilitySet),
    SetViewMode(ViewMode),
}

impl Action {
    /// Short name recorded in the session lock.
    pub fn name(&self) -> &'static str {
        match self {
            Action::BeginGeneration { .. } => "begin_generation",
            Action::BeginReroll { .. } => "begin_reroll",
            Action::GenerationFinished { .. } => "generation_finished",
            Action::RerollFinished { .. } => "reroll_finished",
            Action::Undo => "undo",
            Action::LoadSet(_) => "load_set",
            Action::SetViewMode(_) => "set_view_mode",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Session {
    pub abilities: Vec<AbilitySpec>,
    pub power_level: PowerLevel,
    pub last_model: ModelName,
    pub view_mode: ViewMode,
    /// Ability list from before the last reroll. Single level.
    pub undo: Option<Vec<AbilitySpec>>,
    /// Stamp handed to the most recently begun request.
    pub issued: u64,
    /// Stamp of the most recently applied completion.
    pub applied: u64,
    pub status: Status,
    /// Verbatim response text kept after an extraction failure.
    pub raw_output: Option<String>,
}

impl Session {
    /// Load the session file. Missing or corrupt files give a fresh session.
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "session unreadable, starting fresh");
                return Self::default();
            }
        };

        serde_json::from_str(&content).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "session corrupt, starting fresh");
            Self::default()
        })
    }

    /// Persist the session. Failures are logged, never returned.
    pub fn save<P: AsRef<Path>>(&self, path: P) {
        let path = path.as_ref();
        let json = match serde_json::to_string_pretty(self) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "could not serialize session");
                return;
            }
        };
        if let Err(e) = atomic_write_file(path, &json) {
            warn!(error = %e, "could not write session");
        }
    }

    /// Reload the session at `path`, apply `action` and save it, all under
    /// the session lock.
    ///
    /// Another process may have begun or finished a request since this one
    /// last loaded the file, so completions must go through here for the
    /// stamp check to see the current `applied` value.
    pub fn update<P: AsRef<Path>>(path: P, action: Action) -> error::Result<Session> {
        let path = path.as_ref();
        let _lock = acquire_lock(&path.with_extension("lock"), action.name())?;

        let session = Self::load(path).apply(action);
        session.save(path);
        Ok(session)
    }

    /// Stamp of the request begun last; pass it back in the completion.
    pub fn pending_stamp(&self) -> u64 {
        self.issued
    }

    /// Whether the completion carrying `stamp` is the one applied last.
    pub fn applied_stamp(&self, stamp: u64) -> bool {
        self.applied == stamp
    }

    pub fn can_undo(&self) -> bool {
        self.undo.is_some()
    }

    /// Apply one action and return the next state.
    pub fn apply(mut self, action: Action) -> Session {
        match action {
            Action::BeginGeneration { model } => {
                self.issued += 1;
                self.last_model = model;
                self.status = Status::Generating;
            }

            Action::BeginReroll { index } => {
                self.issued += 1;
                if index < self.abilities.len() {
                    self.status = Status::Rerolling { index };
                }
            }

            Action::GenerationFinished {
                stamp,
                power_level,
                outcome,
            } => {
                if !self.accept(stamp) {
                    return self;
                }
                match outcome {
                    Ok(abilities) => {
                        self.status = Status::Generated {
                            count: abilities.len(),
                        };
                        self.abilities = abilities;
                        self.power_level = power_level;
                        self.undo = None;
                        self.raw_output = None;
                    }
                    Err(err) => self.fail(&err),
                }
            }

            Action::RerollFinished {
                stamp,
                index,
                outcome,
            } => {
                if !self.accept(stamp) {
                    return self;
                }
                match outcome {
                    Ok(mut abilities) => {
                        if index >= self.abilities.len() {
                            self.fail_with(format!("no ability at position {}", index + 1));
                        } else if abilities.is_empty() {
                            self.fail_with("reroll returned no ability".to_string());
                        } else {
                            let replacement = abilities.swap_remove(0);
                            if replacement == self.abilities[index] {
                                self.fail_with("reroll returned the same ability".to_string());
                            } else {
                                self.undo = Some(self.abilities.clone());
                                self.abilities[index] = replacement;
                                self.raw_output = None;
                                self.status = Status::Rerolled { index };
                            }
                        }
                    }
                    Err(err) => self.fail(&err),
                }
            }

            Action::Undo => {
                if let Some(previous) = self.undo.take() {
                    self.abilities = previous;
                    self.status = Status::Restored;
                }
            }

            Action::LoadSet(set) => {
                self.abilities = set.abilities;
                self.power_level = set.power_level;
                self.undo = None;
                self.raw_output = None;
                self.status = Status::Loaded { name: set.name };
            }

            Action::SetViewMode(mode) => {
                self.view_mode = mode;
            }
        }
        self
    }

    /// Record `stamp` as applied unless it is stale or was never issued.
    fn accept(&mut self, stamp: u64) -> bool {
        if stamp <= self.applied || stamp > self.issued {
            debug!(stamp, applied = self.applied, issued = self.issued, "stale result ignored");
            return false;
        }
        self.applied = stamp;
        true
    }

    fn fail(&mut self, err: &GenerationError) {
        self.raw_output = err.raw_text().map(str::to_string);
        self.status = Status::Failed {
            message: err.to_string(),
        };
    }

    fn fail_with(&mut self, message: String) {
        self.raw_output = None;
        self.status = Status::Failed { message };
    }
}
