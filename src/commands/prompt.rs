//! Implementation of the `fruitforge prompt` command.
//!
//! Prints the exact prompt `generate` (or `reroll N`) would send, without
//! calling anything.

use super::load_form;
use crate::cli::PromptArgs;
use crate::context::ForgeContext;
use crate::error::Result;
use crate::prompt::{build_prompt, build_reroll_prompt};
use crate::session::Session;

use super::generate::{other_names, validate_reroll_index};

/// Execute the `fruitforge prompt` command.
pub fn cmd_prompt(ctx: &ForgeContext, args: PromptArgs) -> Result<()> {
    println!("{}", prompt_text(ctx, &args)?);
    Ok(())
}

fn prompt_text(ctx: &ForgeContext, args: &PromptArgs) -> Result<String> {
    let form = load_form(ctx, args.form.as_deref())?;

    match args.reroll {
        None => Ok(build_prompt(&form)),
        Some(n) => {
            let session = Session::load(ctx.session_path());
            let index = validate_reroll_index(&session, n)?;
            Ok(build_reroll_prompt(
                &form,
                session.power_level,
                &other_names(&session, index),
            ))
        }
    }
}
