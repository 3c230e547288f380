//! Prompt assembly.
//!
//! The prompt is a fixed sequence of `=== Section ===` blocks. Sections are
//! built line by line; optional free-text notes are only emitted when present
//! and empty multi-selects render [`FALLBACK_PHRASE`].

use super::ladder::{LADDER, PowerLevel};
use super::options::{FormState, Participant, PromptOptions};

/// Rendered in place of an empty multi-select category.
pub const FALLBACK_PHRASE: &str = "Use whatever fits best.";

/// Build the generation prompt for the given form.
pub fn build_prompt(form: &FormState) -> String {
    render(&PromptOptions::from_form(form))
}

/// Build a prompt asking for exactly one replacement ability.
///
/// `power` is the level of the abilities on screen, which can differ from
/// the form after a saved set is loaded. `existing_names` are the names the
/// new ability must differ from (normally every ability except the one being
/// rerolled).
pub fn build_reroll_prompt(
    form: &FormState,
    power: PowerLevel,
    existing_names: &[String],
) -> String {
    let mut options = PromptOptions::from_form(form);
    options.power = power;
    let mut prompt = render(&options);
    prompt.push_str(&reroll_directive(options.power, existing_names));
    prompt
}

/// Render normalized options into the full prompt text.
pub fn render(options: &PromptOptions) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!(
        "Create {} original, devil-fruit-based abilities for a One Piece–inspired DnD campaign.",
        options.count
    ));
    lines.push(String::new());

    character_section(options, &mut lines);
    effect_section(options, &mut lines);
    fruit_section(options, &mut lines);
    outcome_section(options, &mut lines);
    if options.tier.features().participants && !options.participants.is_empty() {
        participants_section(&options.participants, &mut lines);
    }
    output_style_section(options, &mut lines);
    mechanics_section(&mut lines);
    output_format_section(options, &mut lines);

    lines.join("\n")
}

fn character_section(o: &PromptOptions, lines: &mut Vec<String>) {
    lines.push("=== Character Context ===".into());
    lines.push(format!(
        "Name: {}",
        o.name.as_deref().unwrap_or("Unnamed PC")
    ));
    push_opt(lines, "Combat Role", &o.role);
    push_opt(lines, "Theme / Vibe", &o.theme);
    push_opt(lines, "Backstory / Notes", &o.backstory);
    lines.push(String::new());
}

fn effect_section(o: &PromptOptions, lines: &mut Vec<String>) {
    lines.push("=== Effect Types ===".into());
    lines.push(format!(
        "Desired effect categories: {}",
        list_or_fallback(&o.effect_types)
    ));
    push_opt(lines, "Extra effect guidance", &o.effect_notes);
    lines.push(String::new());
}

fn fruit_section(o: &PromptOptions, lines: &mut Vec<String>) {
    lines.push("=== Devil Fruit Types ===".into());
    lines.push(format!(
        "Fruit type categories involved: {}",
        list_or_fallback(&o.fruit_types)
    ));
    push_opt(lines, "Extra fruit combo notes", &o.fruit_notes);
    if o.tier.features().combo_focus {
        lines.push(format!(
            "Combo focus: {}",
            list_or_fallback(&o.combo_focus)
        ));
        push_opt(lines, "Combo focus notes", &o.combo_notes);
    }
    lines.push(String::new());
}

fn outcome_section(o: &PromptOptions, lines: &mut Vec<String>) {
    lines.push("=== Desired Outcome / Ability Shape ===".into());
    lines.push(format!(
        "High-level outcomes / shapes desired: {}",
        list_or_fallback(&o.outcomes)
    ));
    push_opt(lines, "Outcome / effect notes", &o.outcome_notes);
    if o.tone_epic {
        lines.push(
            "Tone: Epic, shonen-anime style, cinematic, but still readable at the table in a few seconds."
                .into(),
        );
    }
    lines.push(String::new());
}

fn participants_section(participants: &[Participant], lines: &mut Vec<String>) {
    lines.push("=== Multi-Character Combo ===".into());
    lines.push(format!(
        "These {} characters fight together. Build the abilities around their teamwork:",
        participants.len()
    ));
    for (i, p) in participants.iter().enumerate() {
        match &p.role {
            Some(role) => lines.push(format!("Participant {}: {} ({})", i + 1, p.name, role)),
            None => lines.push(format!("Participant {}: {}", i + 1, p.name)),
        }
        if p.has_power {
            lines.push(format!(
                "  Devil fruit power: {}",
                p.power.as_deref().unwrap_or("unspecified devil fruit")
            ));
        } else {
            lines.push(format!(
                "  No devil fruit. Mundane skill: {}",
                p.skill.as_deref().unwrap_or("unspecified")
            ));
        }
        if let Some(contribution) = &p.contribution {
            lines.push(format!("  Contributes: {}", contribution));
        }
    }
    lines.push(
        "At least one ability MUST mechanically depend on multiple participants acting together (e.g. both spend their action or reaction, or one sets up a condition the other exploits)."
            .into(),
    );
    lines.push(
        "Fill in \"combo_logic\" for every ability that involves more than one participant."
            .into(),
    );
    lines.push(String::new());
}

fn output_style_section(o: &PromptOptions, lines: &mut Vec<String>) {
    lines.push("=== Output Style Preferences ===".into());
    lines.push(format!(
        "Number of abilities: {}. Each ability MUST include: (1) Ability Name, (2) Summary, (3) Cinematic Description, (4) Simple DnD mechanics.",
        o.count
    ));
    lines.push(format!("Package type: {}", o.package.instruction()));
    lines.push(format!(
        "Presentation preference: {}",
        o.style.instruction()
    ));
    lines.push(format!(
        "Mechanics detail preference: {}",
        o.detail.instruction()
    ));
    if let Some(model) = &o.model {
        lines.push(format!(
            "Preferred model: {} (used by the backend, if available).",
            model
        ));
    }
    lines.push(match &o.preferred_dc {
        Some(dc) => format!(
            "Preferred DC: {} (treat this as a target; you may adjust ±1–2 based on power level and effect, but stay near this unless you have a strong reason).",
            dc
        ),
        None => {
            "Preferred DC: No fixed DC specified; choose DCs appropriate for the power level rating below."
                .to_string()
        }
    });
    lines.push(format!(
        "Desired power level (1–10): {} where 1 = trivial/weak and 10 = godlike, reality-warping with massive drawbacks. Damage, DCs, area, conditions, and drawbacks must clearly scale with this rating.",
        o.power
    ));
    lines.push(format!("Power level descriptor: {}", o.power.descriptor()));
    push_opt(lines, "Additional output constraints", &o.output_notes);

    lines.push(String::new());
    lines.push("=== Power Level Mechanics Ladder (IMPORTANT) ===".into());
    lines.push(
        "Use this ladder as your primary guide for DC, damage, area, effects, and drawbacks. Do not downgrade high power levels to feel 'balanced' — they can be broken on purpose if drawbacks are appropriate."
            .into(),
    );
    lines.push(String::new());
    lines.extend(LADDER.iter().map(|row| row.to_string()));
    lines.push(String::new());
}

fn mechanics_section(lines: &mut Vec<String>) {
    lines.push("=== Mechanics Requirements (IMPORTANT) ===".into());
    lines.push(
        "- Use a DnD 5e-like structure (actions/bonus actions, saves, ranges, damage dice) but do not overcomplicate rules."
            .into(),
    );
    lines.push(
        "- Keep everything usable at the table: avoid walls of text, avoid complex tracking (no deep resource systems)."
            .into(),
    );
    lines.push(
        "- Keep everything roughly at level 10–15 baseline, then scale intensity using the power ladder."
            .into(),
    );
    lines.push(
        "- Your #1 priority: mechanics (DC, damage, area, conditions, drawbacks) must visibly match the chosen power level."
            .into(),
    );
    lines.push(String::new());
}

fn output_format_section(o: &PromptOptions, lines: &mut Vec<String>) {
    let roles = o.tier.features().ability_roles;

    lines.push("=== Output JSON Format (VERY IMPORTANT) ===".into());
    lines.push(
        "Respond ONLY with valid JSON in this exact structure, with no extra text before or after:"
            .into(),
    );
    lines.push("{".into());
    lines.push("  \"abilities\": [".into());
    lines.push("    {".into());
    lines.push("      \"name\": \"Ability Name\",".into());
    if roles {
        lines.push(
            "      \"role\": \"Optional: which character or combat role uses it.\",".into(),
        );
    }
    lines.push("      \"summary\": \"One-line summary of what the ability does.\",".into());
    lines.push(
        "      \"description\": \"Cinematic but concise description of how it looks and feels.\","
            .into(),
    );
    if roles {
        lines.push(
            "      \"combo_logic\": \"Optional: how the combined powers or characters interact.\","
                .into(),
        );
    }
    lines.push("      \"mechanics\": {".into());
    lines.push("        \"action_type\": \"Action, Bonus Action, Reaction, etc.\",".into());
    lines.push("        \"range\": \"Range and area of effect.\",".into());
    lines.push("        \"target\": \"Who or what is affected.\",".into());
    lines.push("        \"save\": \"Saving throw type, if any (e.g. Dex save).\",".into());
    lines.push(
        "        \"dc\": \"Typical DC or formula (e.g. 16 or 8 + proficiency + ability modifier).\","
            .into(),
    );
    lines.push("        \"damage\": \"Damage dice and type, if any.\",".into());
    lines.push("        \"effect\": \"Main mechanical effect(s) in 1–2 sentences.\"".into());
    lines.push("      }".into());
    lines.push("    }".into());
    lines.push("  ]".into());
    lines.push("}".into());
    lines.push(
        "Make sure it is valid JSON. Do NOT include any commentary or Markdown, only the JSON object."
            .into(),
    );
}

fn reroll_directive(power: PowerLevel, existing_names: &[String]) -> String {
    let names: Vec<&str> = existing_names
        .iter()
        .map(|n| n.trim())
        .filter(|n| !n.is_empty())
        .collect();

    let mut out = String::from("\n\n=== REROLL REQUEST ===\n");
    out.push_str("Ignore the earlier instruction about the number of abilities.\n");
    out.push_str("Generate EXACTLY 1 new ability in the JSON 'abilities' array.\n");
    out.push_str(&format!(
        "It must match the same character, fruit types, effect types, outcome preferences, and power level ({}).\n",
        power
    ));
    if !names.is_empty() {
        out.push_str(&format!(
            "It must be distinct from these existing abilities: {}.\n",
            names.join(", ")
        ));
    }
    out.push_str("Follow the same JSON output format as specified above.");
    out
}

fn list_or_fallback(values: &[String]) -> String {
    if values.is_empty() {
        FALLBACK_PHRASE.to_string()
    } else {
        values.join(", ")
    }
}

fn push_opt(lines: &mut Vec<String>, label: &str, value: &Option<String>) {
    if let Some(value) = value {
        lines.push(format!("{}: {}", label, value));
    }
}
