//! Directory and file scaffolding for the init command.

use crate::config::Config;
use crate::context::ForgeContext;
use crate::error::{ForgeError, Result};
use crate::fs::atomic_write_file;
use std::fs;

/// Starter form written by `init`. Every field may be left blank.
pub(super) const STARTER_FORM: &str = r#"# fruitforge character form
#
# Blank or missing fields are fine: empty categories tell the generator to
# "use whatever fits best", and empty notes are left out of the prompt.

# Character context
name: ""
role: ""
theme: ""
backstory: ""

# Effect types, e.g. [damage, control, mobility, support]
effect_types: []
effect_notes: ""

# Devil fruit types, e.g. [Logia, Paramecia, Zoan]
fruit_types: []
fruit_notes: ""

# Desired outcome / ability shape, e.g. [finisher, setup, defensive]
outcomes: []
outcome_notes: ""

# Combo focus (moderate and complex tiers)
combo_focus: []
combo_notes: ""

# Output style
num_abilities: 3
power_level: 6            # 1 (trivial) .. 10 (godlike)
preferred_dc: ""          # advisory; the power ladder still applies
format_style: stat-block  # stat-block | minimal | cinematic
mechanics_detail: detailed # simple | detailed
package_type: standalone  # standalone | combo-kit
tier: complex             # basic | moderate | complex
tone_epic: false
output_notes: ""
# model: gpt-5.1           # overrides default_model in config.yaml

# Multi-character combo (complex tier only)
participants: []
#  - name: Zoro
#    role: Swordsman
#    has_power: false
#    skill: Three-sword style
#    contribution: Cuts through the storm wall
"#;

/// Create the home directory, config and starter form.
///
/// Returns the names of the files it created.
pub(super) fn create_home(ctx: &ForgeContext) -> Result<Vec<&'static str>> {
    fs::create_dir_all(&ctx.home).map_err(|e| {
        ForgeError::Storage(format!(
            "failed to create home directory '{}': {}",
            ctx.home.display(),
            e
        ))
    })?;

    let mut created = Vec::new();

    let config_path = ctx.config_path();
    if !config_path.exists() {
        let yaml = Config::default().to_yaml()?;
        atomic_write_file(&config_path, &yaml)?;
        created.push("config.yaml");
    }

    let form_path = ctx.default_form_path();
    if !form_path.exists() {
        atomic_write_file(&form_path, STARTER_FORM)?;
        created.push("form.yaml");
    }

    Ok(created)
}
