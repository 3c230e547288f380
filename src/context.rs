//! Home directory resolution for fruitforge.
//!
//! Every command works against one home directory holding the config, the
//! starter form, the session file and the saved-sets store. The home is
//! `$FRUITFORGE_HOME` when set, otherwise `.fruitforge/` under the current
//! working directory.

use crate::error::{ForgeError, Result};
use crate::store::SetStore;
use std::env;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the home directory.
pub const HOME_ENV: &str = "FRUITFORGE_HOME";

/// Home directory name used when `FRUITFORGE_HOME` is unset.
pub const DEFAULT_HOME_DIR: &str = ".fruitforge";

/// Resolved paths for a fruitforge home.
#[derive(Debug, Clone)]
pub struct ForgeContext {
    /// Directory holding all fruitforge state.
    pub home: PathBuf,
}

impl ForgeContext {
    /// Resolve the home from the environment, then the working directory.
    pub fn resolve() -> Result<Self> {
        if let Ok(home) = env::var(HOME_ENV)
            && !home.trim().is_empty()
        {
            return Ok(Self::with_home(home));
        }

        let cwd = env::current_dir().map_err(|e| {
            ForgeError::UserError(format!("failed to get current working directory: {}", e))
        })?;

        Ok(Self::resolve_from(&cwd))
    }

    /// Default home below a specific directory.
    pub fn resolve_from<P: AsRef<Path>>(cwd: P) -> Self {
        Self::with_home(cwd.as_ref().join(DEFAULT_HOME_DIR))
    }

    /// Use an explicit home directory.
    pub fn with_home<P: Into<PathBuf>>(home: P) -> Self {
        Self { home: home.into() }
    }

    pub fn is_initialized(&self) -> bool {
        self.home.is_dir()
    }

    /// Return a user error pointing at `fruitforge init` when the home is missing.
    pub fn ensure_initialized(&self) -> Result<()> {
        if !self.is_initialized() {
            return Err(ForgeError::UserError(format!(
                "fruitforge home not initialized.\n\
                 Expected directory at: {}\n\n\
                 Run `fruitforge init` to create it, or set {} to an existing home.",
                self.home.display(),
                HOME_ENV
            )));
        }
        Ok(())
    }

    pub fn config_path(&self) -> PathBuf {
        self.home.join("config.yaml")
    }

    /// Form used when no `--form` is given.
    pub fn default_form_path(&self) -> PathBuf {
        self.home.join("form.yaml")
    }

    pub fn session_path(&self) -> PathBuf {
        self.home.join("session.json")
    }

    pub fn sets_path(&self) -> PathBuf {
        self.store().path().to_path_buf()
    }

    pub fn store(&self) -> SetStore {
        SetStore::in_dir(&self.home)
    }
}

/// Resolve the context and require an initialized home.
///
/// Used by every command except `init`.
pub fn require_initialized_home() -> Result<ForgeContext> {
    let ctx = ForgeContext::resolve()?;
    ctx.ensure_initialized()?;
    Ok(ctx)
}
