//! Implementation of the `fruitforge sets` subcommands.

use crate::cli::{SetIdArgs, SetsSaveArgs};
use crate::context::ForgeContext;
use crate::error::{ForgeError, Result};
use crate::render::render;
use crate::session::{Action, Session};

/// Execute `fruitforge sets list`.
pub fn cmd_sets_list(ctx: &ForgeContext) -> Result<()> {
    let sets = ctx.store().load_all();
    if sets.is_empty() {
        println!("No saved sets.");
        return Ok(());
    }

    for set in &sets {
        println!(
            "{}  {}  ({} abilities, power {})",
            set.id,
            set.name,
            set.abilities.len(),
            set.power_level
        );
    }
    Ok(())
}

/// Execute `fruitforge sets save NAME`.
pub fn cmd_sets_save(ctx: &ForgeContext, args: SetsSaveArgs) -> Result<()> {
    if args.name.trim().is_empty() {
        return Err(ForgeError::UserError("set name must not be empty.".to_string()));
    }

    let session = Session::load(ctx.session_path());
    if session.abilities.is_empty() {
        return Err(ForgeError::UserError(
            "no abilities to save yet.\n\nRun `fruitforge generate` first.".to_string(),
        ));
    }

    let set = ctx
        .store()
        .add(&args.name, &session.abilities, session.power_level);
    println!("Saved set '{}' (id {}).", set.name, set.id);
    Ok(())
}

/// Execute `fruitforge sets load ID`.
pub fn cmd_sets_load(ctx: &ForgeContext, args: SetIdArgs) -> Result<()> {
    let set = ctx.store().get(args.id).ok_or_else(|| not_found(args.id))?;

    let session = Session::update(ctx.session_path(), Action::LoadSet(set))?;

    println!("{}", render(&session));
    println!("{}", session.status);
    Ok(())
}

/// Execute `fruitforge sets delete ID`.
pub fn cmd_sets_delete(ctx: &ForgeContext, args: SetIdArgs) -> Result<()> {
    if !ctx.store().delete(args.id) {
        return Err(not_found(args.id));
    }
    println!("Deleted set {}.", args.id);
    Ok(())
}

fn not_found(id: u64) -> ForgeError {
    ForgeError::UserError(format!(
        "saved set {} not found.\n\nUse `fruitforge sets list` to see saved sets.",
        id
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::PowerLevel;
    use crate::test_support::{create_test_home, sample_abilities};

    fn seed(ctx: &ForgeContext, names: &[&str], power: i64) {
        let mut session = Session::default();
        session.abilities = sample_abilities(names);
        session.power_level = PowerLevel::clamped(power);
        session.save(ctx.session_path());
    }

    #[test]
    fn test_save_then_load_restores_session() {
        let (_temp, ctx) = create_test_home();
        seed(&ctx, &["Gale Lance", "Storm Veil"], 9);
        cmd_sets_save(&ctx, SetsSaveArgs { name: "Storm kit".into() }).unwrap();
        let id = ctx.store().load_all()[0].id;

        seed(&ctx, &["Something Else"], 2);
        cmd_sets_load(&ctx, SetIdArgs { id }).unwrap();

        let session = Session::load(ctx.session_path());
        assert_eq!(session.abilities, sample_abilities(&["Gale Lance", "Storm Veil"]));
        assert_eq!(session.power_level.get(), 9);
        assert!(!session.can_undo());
    }

    #[test]
    fn test_delete_removes_set() {
        let (_temp, ctx) = create_test_home();
        seed(&ctx, &["A"], 5);
        cmd_sets_save(&ctx, SetsSaveArgs { name: "one".into() }).unwrap();
        let id = ctx.store().load_all()[0].id;

        cmd_sets_delete(&ctx, SetIdArgs { id }).unwrap();
        assert!(ctx.store().load_all().is_empty());

        let err = cmd_sets_delete(&ctx, SetIdArgs { id }).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_save_requires_abilities_and_name() {
        let (_temp, ctx) = create_test_home();
        assert!(cmd_sets_save(&ctx, SetsSaveArgs { name: "empty".into() }).is_err());

        seed(&ctx, &["A"], 5);
        assert!(cmd_sets_save(&ctx, SetsSaveArgs { name: "  ".into() }).is_err());
        assert!(ctx.store().load_all().is_empty());
    }

    #[test]
    fn test_load_unknown_id_fails() {
        let (_temp, ctx) = create_test_home();
        assert!(cmd_sets_load(&ctx, SetIdArgs { id: 42 }).is_err());
    }
}
