//! CLI argument parsing for fruitforge.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Fruitforge: devil-fruit ability generator for One Piece-inspired DnD campaigns.
///
/// Describe a character in a YAML form, preview the prompt, and generate
/// table-ready abilities:
/// - `generate` asks the model for a full set
/// - `reroll N` replaces a single ability, `undo` brings it back
/// - `sets` saves and restores named sets; `export` writes a stat sheet
#[derive(Parser, Debug)]
#[command(name = "fruitforge")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log debug output to stderr (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for fruitforge.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the fruitforge home.
    ///
    /// Writes a default config.yaml and a starter form.yaml. Existing files
    /// are left untouched.
    Init,

    /// Print the prompt the current form would send.
    Prompt(PromptArgs),

    /// Generate a fresh set of abilities.
    ///
    /// Replaces the current abilities and clears the undo snapshot.
    Generate(GenerateArgs),

    /// Replace one ability with a new one.
    ///
    /// Only the chosen ability changes; `undo` restores the previous list.
    Reroll(RerollArgs),

    /// Restore the abilities from before the last reroll.
    Undo,

    /// Show the current abilities.
    Show(ShowArgs),

    /// Write the current abilities as a plain-text stat sheet.
    Export(ExportArgs),

    /// Saved set management commands.
    Sets(SetsCommand),
}

/// Arguments for the `prompt` command.
#[derive(Parser, Debug)]
pub struct PromptArgs {
    /// Form file to read (default: form.yaml in the home).
    #[arg(long)]
    pub form: Option<PathBuf>,

    /// Show the reroll prompt for ability N (1-based) instead.
    #[arg(long, value_name = "N")]
    pub reroll: Option<usize>,
}

/// Arguments for the `generate` command.
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Form file to read (default: form.yaml in the home).
    #[arg(long)]
    pub form: Option<PathBuf>,

    /// Model to use; overrides the form and the config.
    #[arg(long)]
    pub model: Option<String>,
}

/// Arguments for the `reroll` command.
#[derive(Parser, Debug)]
pub struct RerollArgs {
    /// Ability to replace (1-based, as shown by `show`).
    pub index: usize,

    /// Form file to read (default: form.yaml in the home).
    #[arg(long)]
    pub form: Option<PathBuf>,
}

/// Presentation for `show`.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewArg {
    Cards,
    Table,
}

/// Arguments for the `show` command.
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Switch the view mode (remembered for later `show` calls).
    #[arg(long, value_enum)]
    pub view: Option<ViewArg>,

    /// Print the raw response kept from the last failed extraction.
    #[arg(long)]
    pub raw: bool,
}

/// Arguments for the `export` command.
#[derive(Parser, Debug)]
pub struct ExportArgs {
    /// Output file (default: `export_file` from the config).
    #[arg(short, long, conflicts_with = "stdout")]
    pub output: Option<PathBuf>,

    /// Print the stat sheet instead of writing a file.
    #[arg(long)]
    pub stdout: bool,
}

/// Saved set subcommands.
#[derive(Parser, Debug)]
pub struct SetsCommand {
    #[command(subcommand)]
    pub action: SetsAction,
}

/// Available saved set actions.
#[derive(Subcommand, Debug)]
pub enum SetsAction {
    /// List saved sets.
    List,

    /// Save the current abilities under a name.
    Save(SetsSaveArgs),

    /// Replace the current abilities with a saved set.
    Load(SetIdArgs),

    /// Delete a saved set.
    Delete(SetIdArgs),
}

/// Arguments for `sets save`.
#[derive(Parser, Debug)]
pub struct SetsSaveArgs {
    /// Name for the set.
    pub name: String,
}

/// Arguments for `sets load` and `sets delete`.
#[derive(Parser, Debug)]
pub struct SetIdArgs {
    /// Set id, as shown by `sets list`.
    pub id: u64,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_init() {
        let cli = Cli::try_parse_from(["fruitforge", "init"]).unwrap();
        assert!(matches!(cli.command, Command::Init));
        assert!(!cli.verbose);
    }

    #[test]
    fn test_parse_prompt_reroll() {
        let cli =
            Cli::try_parse_from(["fruitforge", "prompt", "--form", "luffy.yaml", "--reroll", "2"])
                .unwrap();
        match cli.command {
            Command::Prompt(args) => {
                assert_eq!(args.form, Some(PathBuf::from("luffy.yaml")));
                assert_eq!(args.reroll, Some(2));
            }
            _ => panic!("Expected Prompt command"),
        }
    }

    #[test]
    fn test_parse_generate_with_model_and_verbose() {
        let cli = Cli::try_parse_from(["fruitforge", "generate", "--model", "gpt-5.1", "-v"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Command::Generate(args) => {
                assert_eq!(args.model.as_deref(), Some("gpt-5.1"));
                assert!(args.form.is_none());
            }
            _ => panic!("Expected Generate command"),
        }
    }

    #[test]
    fn test_parse_reroll_requires_index() {
        assert!(Cli::try_parse_from(["fruitforge", "reroll"]).is_err());
        assert!(Cli::try_parse_from(["fruitforge", "reroll", "two"]).is_err());

        let cli = Cli::try_parse_from(["fruitforge", "reroll", "3"]).unwrap();
        match cli.command {
            Command::Reroll(args) => assert_eq!(args.index, 3),
            _ => panic!("Expected Reroll command"),
        }
    }

    #[test]
    fn test_parse_show_view() {
        let cli = Cli::try_parse_from(["fruitforge", "show", "--view", "table"]).unwrap();
        match cli.command {
            Command::Show(args) => {
                assert_eq!(args.view, Some(ViewArg::Table));
                assert!(!args.raw);
            }
            _ => panic!("Expected Show command"),
        }

        assert!(Cli::try_parse_from(["fruitforge", "show", "--view", "grid"]).is_err());
    }

    #[test]
    fn test_export_output_conflicts_with_stdout() {
        assert!(Cli::try_parse_from(["fruitforge", "export", "-o", "kit.txt", "--stdout"]).is_err());
    }

    #[test]
    fn test_parse_sets_subcommands() {
        let cli = Cli::try_parse_from(["fruitforge", "sets", "save", "Storm kit"]).unwrap();
        match cli.command {
            Command::Sets(SetsCommand {
                action: SetsAction::Save(args),
            }) => assert_eq!(args.name, "Storm kit"),
            _ => panic!("Expected Sets Save command"),
        }

        let cli = Cli::try_parse_from(["fruitforge", "sets", "delete", "1700000000000"]).unwrap();
        match cli.command {
            Command::Sets(SetsCommand {
                action: SetsAction::Delete(args),
            }) => assert_eq!(args.id, 1_700_000_000_000),
            _ => panic!("Expected Sets Delete command"),
        }
    }
}
