use crate::ability::{AbilitySpec, Mechanics};
use crate::context::ForgeContext;
use std::ffi::{OsStr, OsString};
use std::sync::{LazyLock, Mutex, MutexGuard};
use tempfile::TempDir;

static ENV_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

/// Sets an environment variable for the lifetime of the guard.
pub(crate) struct EnvGuard {
    key: &'static str,
    original: Option<OsString>,
    _lock: MutexGuard<'static, ()>,
}

impl EnvGuard {
    /// `None` removes the variable.
    pub(crate) fn set(key: &'static str, value: Option<&OsStr>) -> Self {
        // The process environment is global. Lock it so tests don't race even
        // if a #[serial] annotation is missed.
        let lock = ENV_LOCK.lock().unwrap_or_else(|poison| poison.into_inner());
        let original = std::env::var_os(key);
        // SAFETY: serialized by ENV_LOCK; no other test thread touches the env.
        unsafe {
            match value {
                Some(v) => std::env::set_var(key, v),
                None => std::env::remove_var(key),
            }
        }
        Self {
            key,
            original,
            _lock: lock,
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        // SAFETY: still holding ENV_LOCK.
        unsafe {
            match &self.original {
                Some(v) => std::env::set_var(self.key, v),
                None => std::env::remove_var(self.key),
            }
        }
    }
}

/// Temp directory with an initialized home inside it.
pub(crate) fn create_test_home() -> (TempDir, ForgeContext) {
    let temp_dir = TempDir::new().unwrap();
    let ctx = ForgeContext::resolve_from(temp_dir.path());
    std::fs::create_dir_all(&ctx.home).unwrap();
    (temp_dir, ctx)
}

pub(crate) fn sample_ability(name: &str) -> AbilitySpec {
    AbilitySpec {
        name: Some(name.to_string()),
        summary: Some(format!("{} in one line.", name)),
        description: Some(format!("{} described at length.", name)),
        mechanics: Mechanics {
            action_type: Some("Action".into()),
            range: Some("30 ft".into()),
            target: Some("One creature".into()),
            save: Some("DEX".into()),
            dc: Some("15".into()),
            damage: Some("4d6".into()),
            effect: Some("Pushed 10 ft.".into()),
        },
        ..Default::default()
    }
}

pub(crate) fn sample_abilities(names: &[&str]) -> Vec<AbilitySpec> {
    names.iter().map(|n| sample_ability(n)).collect()
}

/// JSON response body a generation backend might return for `names`.
pub(crate) fn generation_payload(names: &[&str]) -> String {
    serde_json::json!({ "abilities": sample_abilities(names) }).to_string()
}
