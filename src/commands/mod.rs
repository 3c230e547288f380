//! Command implementations for fruitforge.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations, plus the form and config loading every command shares.
//! Handlers take a resolved [`ForgeContext`] so tests can point them at a
//! temporary home.

mod export;
mod generate;
mod init;
mod prompt;
mod sets;
mod show;

use crate::cli::{Command, SetsAction};
use crate::config::Config;
use crate::context::{ForgeContext, require_initialized_home};
use crate::error::{ForgeError, Result};
use crate::prompt::FormState;
use std::path::Path;

/// Dispatch a command to its implementation.
pub async fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Init => init::cmd_init(&ForgeContext::resolve()?),
        Command::Prompt(args) => prompt::cmd_prompt(&require_initialized_home()?, args),
        Command::Generate(args) => generate::cmd_generate(&require_initialized_home()?, args).await,
        Command::Reroll(args) => generate::cmd_reroll(&require_initialized_home()?, args).await,
        Command::Undo => generate::cmd_undo(&require_initialized_home()?),
        Command::Show(args) => show::cmd_show(&require_initialized_home()?, args),
        Command::Export(args) => export::cmd_export(&require_initialized_home()?, args),
        Command::Sets(sets_cmd) => {
            let ctx = require_initialized_home()?;
            match sets_cmd.action {
                SetsAction::List => sets::cmd_sets_list(&ctx),
                SetsAction::Save(args) => sets::cmd_sets_save(&ctx, args),
                SetsAction::Load(args) => sets::cmd_sets_load(&ctx, args),
                SetsAction::Delete(args) => sets::cmd_sets_delete(&ctx, args),
            }
        }
    }
}

/// Load the config, treating a missing file as defaults.
fn load_config(ctx: &ForgeContext) -> Result<Config> {
    Config::load_or_default(ctx.config_path())
}

/// Load the form at `path`, or the home's `form.yaml`.
fn load_form(ctx: &ForgeContext, path: Option<&Path>) -> Result<FormState> {
    let path = path.map_or_else(|| ctx.default_form_path(), Path::to_path_buf);

    let content = std::fs::read_to_string(&path).map_err(|e| {
        ForgeError::UserError(format!(
            "failed to read form file '{}': {}\n\n\
             Run `fruitforge init` to create a starter form, or pass --form.",
            path.display(),
            e
        ))
    })?;

    if content.trim().is_empty() {
        return Ok(FormState::default());
    }

    serde_yaml::from_str(&content).map_err(|e| {
        ForgeError::UserError(format!(
            "failed to parse form file '{}': {}",
            path.display(),
            e
        ))
    })
}
