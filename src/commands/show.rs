//! Implementation of the `fruitforge show` command.
//!
//! Renders the current abilities in the session's view mode. `--view`
//! switches (and remembers) the mode; `--raw` prints the response text kept
//! from the last failed extraction.

use crate::cli::{ShowArgs, ViewArg};
use crate::context::ForgeContext;
use crate::error::Result;
use crate::render::render;
use crate::session::{Action, Session, ViewMode};

/// Execute the `fruitforge show` command.
pub fn cmd_show(ctx: &ForgeContext, args: ShowArgs) -> Result<()> {
    println!("{}", show_text(ctx, &args)?);
    Ok(())
}

fn show_text(ctx: &ForgeContext, args: &ShowArgs) -> Result<String> {
    let mut session = Session::load(ctx.session_path());

    if let Some(view) = args.view {
        let mode = match view {
            ViewArg::Cards => ViewMode::Cards,
            ViewArg::Table => ViewMode::Table,
        };
        if mode != session.view_mode {
            session = Session::update(ctx.session_path(), Action::SetViewMode(mode))?;
        }
    }

    if args.raw {
        return Ok(match &session.raw_output {
            Some(raw) => raw.clone(),
            None => "No raw response kept; the last request parsed cleanly.".to_string(),
        });
    }

    let mut text = render(&session);
    text.push('\n');
    text.push_str(&session.status.to_string());
    Ok(text)
}
