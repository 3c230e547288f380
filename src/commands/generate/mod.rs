//! Implementation of the `generate`, `reroll` and `undo` commands.
//!
//! Each request follows the same flow:
//!
//! 1. Apply the matching `Begin*` action through [`Session::update`]
//! 2. Call the backend once (no retry)
//! 3. Apply the `*Finished` action with the stamp from step 1, again through
//!    [`Session::update`] so a newer request from another process wins
//! 4. Render, then surface any failure
//!
//! A failed request leaves the abilities untouched; an extraction failure
//! keeps the raw response so `show --raw` can print it. A response that
//! lost to a newer one is reported as [`ForgeError::Superseded`].


use super::{load_config, load_form};
use crate::cli::{GenerateArgs, RerollArgs};
use crate::client::{GenerationBackend, GenerationRequest, backend_from_config, run_generation};
use crate::config::Config;
use crate::context::ForgeContext;
use crate::error::{ForgeError, Result};
use crate::prompt::{FormState, PromptOptions, build_prompt, build_reroll_prompt};
use crate::render::render;
use crate::session::{Action, Session, Status};
use tracing::info;

/// Execute the `fruitforge generate` command.
pub async fn cmd_generate(ctx: &ForgeContext, args: GenerateArgs) -> Result<()> {
    let config = load_config(ctx)?;
    let form = load_form(ctx, args.form.as_deref())?;

    let model = resolve_model(args.model, &form, &config);

    let backend = backend_from_config(&config)?;
    let session = report_raw(generate(ctx, backend.as_ref(), &form, &model).await)?;

    println!("{}", render(&session));
    println!("{}", session.status);
    Ok(())
}

/// `--model` beats the form, which beats the config.
fn resolve_model(flag: Option<String>, form: &FormState, config: &Config) -> String {
    flag.filter(|m| !m.trim().is_empty())
        .or_else(|| form.model.clone().filter(|m| !m.trim().is_empty()))
        .unwrap_or_else(|| config.model().as_str().to_string())
}

/// Execute the `fruitforge reroll` command.
pub async fn cmd_reroll(ctx: &ForgeContext, args: RerollArgs) -> Result<()> {
    let config = load_config(ctx)?;
    let form = load_form(ctx, args.form.as_deref())?;

    let backend = backend_from_config(&config)?;
    let session = report_raw(reroll(ctx, backend.as_ref(), &form, args.index).await)?;

    println!("{}", render(&session));
    println!("{}", session.status);
    Ok(())
}

/// Execute the `fruitforge undo` command.
pub fn cmd_undo(ctx: &ForgeContext) -> Result<()> {
    if !Session::load(ctx.session_path()).can_undo() {
        println!("Nothing to undo.");
        return Ok(());
    }

    let session = Session::update(ctx.session_path(), Action::Undo)?;

    println!("{}", render(&session));
    println!("{}", session.status);
    Ok(())
}

/// Run a full generation and persist the result.
pub(super) async fn generate(
    ctx: &ForgeContext,
    backend: &dyn GenerationBackend,
    form: &FormState,
    model: &str,
) -> Result<Session> {
    let request = GenerationRequest::new(build_prompt(form), model)?;
    let power_level = PromptOptions::from_form(form).power;

    let session = Session::update(
        ctx.session_path(),
        Action::BeginGeneration {
            model: request.model(),
        },
    )?;
    let stamp = session.pending_stamp();

    let outcome = run_generation(backend, &request).await;
    let failure = outcome.as_ref().err().cloned();

    let session = Session::update(
        ctx.session_path(),
        Action::GenerationFinished {
            stamp,
            power_level,
            outcome,
        },
    )?;

    if !session.applied_stamp(stamp) {
        info!(stamp, applied = session.applied, "generation superseded");
        return Err(ForgeError::Superseded);
    }
    match failure {
        Some(err) => Err(err.into()),
        None => {
            info!(count = session.abilities.len(), "generation applied");
            Ok(session)
        }
    }
}

/// Reroll ability `number` (1-based) and persist the result.
pub(super) async fn reroll(
    ctx: &ForgeContext,
    backend: &dyn GenerationBackend,
    form: &FormState,
    number: usize,
) -> Result<Session> {
    let session = Session::load(ctx.session_path());
    let index = validate_reroll_index(&session, number)?;

    let prompt = build_reroll_prompt(form, session.power_level, &other_names(&session, index));
    let request = GenerationRequest::new(prompt, session.last_model.as_str())?;

    let session = Session::update(ctx.session_path(), Action::BeginReroll { index })?;
    let stamp = session.pending_stamp();

    let outcome = run_generation(backend, &request).await;
    let failure = outcome.as_ref().err().cloned();

    let session = Session::update(
        ctx.session_path(),
        Action::RerollFinished {
            stamp,
            index,
            outcome,
        },
    )?;

    if !session.applied_stamp(stamp) {
        info!(stamp, applied = session.applied, "reroll superseded");
        return Err(ForgeError::Superseded);
    }
    if let Some(err) = failure {
        return Err(err.into());
    }
    if let Status::Failed { message } = &session.status {
        return Err(ForgeError::RerollRejected(message.clone()));
    }
    Ok(session)
}

/// Turn a 1-based ability number into an index into the session.
pub(crate) fn validate_reroll_index(session: &Session, number: usize) -> Result<usize> {
    let len = session.abilities.len();
    if len == 0 {
        return Err(ForgeError::UserError(
            "no abilities to reroll yet.\n\nRun `fruitforge generate` first.".to_string(),
        ));
    }
    if number == 0 || number > len {
        return Err(ForgeError::UserError(format!(
            "ability {} does not exist (choose 1-{}).",
            number, len
        )));
    }
    Ok(number - 1)
}

/// Display names of every ability except `index`.
pub(crate) fn other_names(session: &Session, index: usize) -> Vec<String> {
    session
        .abilities
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(i, a)| a.display_name(i))
        .collect()
}

/// Print the raw response of an extraction failure before passing it on.
fn report_raw(result: Result<Session>) -> Result<Session> {
    if let Err(ForgeError::Generation(err)) = &result
        && let Some(raw) = err.raw_text()
    {
        println!("Raw response (kept for `fruitforge show --raw`):");
        println!("{}", raw);
    }
    result
}
