//! Implementation of the `fruitforge export` command.

use super::load_config;
use crate::cli::ExportArgs;
use crate::context::ForgeContext;
use crate::error::{ForgeError, Result};
use crate::export::stat_sheet;
use crate::fs::atomic_write_file;
use crate::session::Session;
use std::path::PathBuf;

/// Execute the `fruitforge export` command.
///
/// Writes the stat sheet to `--output`, or to `export_file` from the config
/// (relative to the working directory). `--stdout` prints it instead.
pub fn cmd_export(ctx: &ForgeContext, args: ExportArgs) -> Result<()> {
    let sheet = current_sheet(ctx)?;

    if args.stdout {
        println!("{}", sheet);
        return Ok(());
    }

    let path = match args.output {
        Some(path) => path,
        None => PathBuf::from(load_config(ctx)?.export_file),
    };
    atomic_write_file(&path, &sheet)?;

    println!("Exported stat sheet to {}", path.display());
    Ok(())
}

fn current_sheet(ctx: &ForgeContext) -> Result<String> {
    let session = Session::load(ctx.session_path());
    if session.abilities.is_empty() {
        return Err(ForgeError::UserError(
            "no abilities to export yet.\n\nRun `fruitforge generate` first.".to_string(),
        ));
    }
    Ok(stat_sheet(&session.abilities, session.power_level))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::DIVIDER;
    use crate::test_support::{create_test_home, sample_abilities};

    #[test]
    fn test_export_writes_stat_sheet() {
        let (temp, ctx) = create_test_home();
        let mut session = Session::default();
        session.abilities = sample_abilities(&["Gale Lance", "Storm Veil"]);
        session.save(ctx.session_path());

        let out = temp.path().join("kit.txt");
        cmd_export(
            &ctx,
            ExportArgs {
                output: Some(out.clone()),
                stdout: false,
            },
        )
        .unwrap();

        let text = std::fs::read_to_string(&out).unwrap();
        assert!(text.starts_with("[Gale Lance] – 6 – Strong PC / elite enemy\n"));
        assert_eq!(text.matches(DIVIDER).count(), 1);
    }

    #[test]
    fn test_export_without_abilities_is_user_error() {
        let (_temp, ctx) = create_test_home();

        let err = cmd_export(
            &ctx,
            ExportArgs {
                output: None,
                stdout: true,
            },
        )
        .unwrap_err();
        assert!(matches!(err, ForgeError::UserError(_)));
    }

    #[test]
    fn test_export_to_unwritable_path_is_storage_error() {
        let (temp, ctx) = create_test_home();
        let mut session = Session::default();
        session.abilities = sample_abilities(&["A"]);
        session.save(ctx.session_path());

        let blocker = temp.path().join("blocker");
        std::fs::write(&blocker, "file").unwrap();

        let err = cmd_export(
            &ctx,
            ExportArgs {
                output: Some(blocker.join("kit.txt")),
                stdout: false,
            },
        )
        .unwrap_err();
        assert!(matches!(err, ForgeError::Storage(_)));
    }
}
