//! Tests for the init command.

use super::scaffolding::*;
use super::*;
use crate::config::Config;
use crate::prompt::{FormState, PowerLevel, PromptOptions};
use tempfile::TempDir;

#[test]
fn test_init_creates_home_and_files() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = ForgeContext::resolve_from(temp_dir.path());

    cmd_init(&ctx).unwrap();

    assert!(ctx.home.is_dir());
    assert!(ctx.config_path().exists());
    assert!(ctx.default_form_path().exists());
    assert!(ctx.ensure_initialized().is_ok());
}

#[test]
fn test_init_is_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = ForgeContext::resolve_from(temp_dir.path());

    assert_eq!(create_home(&ctx).unwrap(), ["config.yaml", "form.yaml"]);
    assert!(create_home(&ctx).unwrap().is_empty());
}

#[test]
fn test_init_preserves_existing_files() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = ForgeContext::resolve_from(temp_dir.path());
    std::fs::create_dir_all(&ctx.home).unwrap();
    std::fs::write(ctx.config_path(), "timeout_secs: 9\n").unwrap();
    std::fs::write(ctx.default_form_path(), "name: Robin\n").unwrap();

    assert!(create_home(&ctx).unwrap().is_empty());

    let config = Config::load(ctx.config_path()).unwrap();
    assert_eq!(config.timeout_secs, 9);
    assert_eq!(
        std::fs::read_to_string(ctx.default_form_path()).unwrap(),
        "name: Robin\n"
    );
}

#[test]
fn test_written_config_loads_as_default() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = ForgeContext::resolve_from(temp_dir.path());
    create_home(&ctx).unwrap();

    let config = Config::load(ctx.config_path()).unwrap();
    assert_eq!(config.timeout_secs, Config::default().timeout_secs);
    assert_eq!(config.endpoint, Config::default().endpoint);
}

#[test]
fn test_starter_form_parses_to_defaults() {
    let form: FormState = serde_yaml::from_str(STARTER_FORM).unwrap();
    let options = PromptOptions::from_form(&form);

    assert_eq!(options.count.get(), 3);
    assert_eq!(options.power, PowerLevel::default());
    assert!(options.name.is_none());
    assert!(options.effect_types.is_empty());
    assert!(options.participants.is_empty());
}

#[test]
fn test_starter_form_leaves_model_to_config() {
    let form: FormState = serde_yaml::from_str(STARTER_FORM).unwrap();
    assert!(form.model.is_none());
}

#[test]
fn test_home_below_a_file_is_storage_error() {
    let temp_dir = TempDir::new().unwrap();
    let blocker = temp_dir.path().join("blocker");
    std::fs::write(&blocker, "file").unwrap();
    let ctx = ForgeContext::with_home(blocker.join("home"));

    let err = create_home(&ctx).unwrap_err();
    assert!(matches!(err, crate::error::ForgeError::Storage(_)));
}
