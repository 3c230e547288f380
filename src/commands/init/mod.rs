//! Implementation of the `fruitforge init` command.
//!
//! # What `fruitforge init` does
//!
//! 1. Creates the home directory (default: `.fruitforge/`)
//! 2. Creates `config.yaml` with default values (if missing)
//! 3. Creates a commented starter `form.yaml` (if missing)
//!
//! The session file and saved-sets store are created lazily by the commands
//! that write them.

mod scaffolding;

#[cfg(test)]
mod tests;

use crate::context::ForgeContext;
use crate::error::Result;

use scaffolding::*;

/// Execute the `fruitforge init` command.
///
/// This command is **idempotent**: running it again never overwrites an
/// existing config or form.
pub fn cmd_init(ctx: &ForgeContext) -> Result<()> {
    let created = create_home(ctx)?;

    println!("Initialized fruitforge home.");
    println!();
    println!("Home: {}", ctx.home.display());
    println!();
    if created.is_empty() {
        println!("Nothing to create; existing files were left untouched.");
    } else {
        println!("Created:");
        for name in &created {
            println!("  {}", name);
        }
    }
    println!();
    println!("Describe your character in form.yaml, then run `fruitforge generate`.");

    Ok(())
}
