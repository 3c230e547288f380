//! Text projections of the session's ability list.
//!
//! Rendering never mutates anything; it reads a [`Session`] and returns the
//! text to print. Missing fields show as the placeholder dash.

use crate::ability::{AbilitySpec, non_blank, or_dash};
use crate::prompt::PowerLevel;
use crate::session::{Session, ViewMode};

/// Shown instead of an empty list.
pub const EMPTY_HINT: &str = "No abilities to show yet. Generate some first.";

const TABLE_HEADERS: [&str; 7] = ["Name", "Power", "Action", "Range", "DC", "Damage", "Effect"];

/// Render the session's abilities in its current view mode.
pub fn render(session: &Session) -> String {
    if session.abilities.is_empty() {
        return EMPTY_HINT.to_string();
    }

    match session.view_mode {
        ViewMode::Cards => render_cards(&session.abilities, session.power_level),
        ViewMode::Table => render_table(&session.abilities, session.power_level),
    }
}

/// One card per ability, numbered from 1 so `reroll N` lines up.
pub fn render_cards(abilities: &[AbilitySpec], power_level: PowerLevel) -> String {
    abilities
        .iter()
        .enumerate()
        .map(|(index, ability)| card(index, ability, power_level))
        .collect::<Vec<_>>()
        .join("\n")
}

fn card(index: usize, ability: &AbilitySpec, power_level: PowerLevel) -> String {
    let mech = &ability.mechanics;
    let mut lines = vec![format!(
        "{}. {}  [{}]",
        index + 1,
        ability.display_name(index),
        power_level.descriptor()
    )];

    if let Some(role) = non_blank(&ability.role) {
        lines.push(format!("   Role: {}", role));
    }
    lines.push(format!(
        "   {}",
        non_blank(&ability.summary)
            .unwrap_or("No summary provided. Consider adding a brief one-line explanation.")
    ));
    lines.push(format!(
        "   {}",
        non_blank(&ability.description).unwrap_or("No description provided.")
    ));
    lines.push(format!(
        "   Action: {} | Range: {} | Target: {}",
        or_dash(&mech.action_type),
        or_dash(&mech.range),
        or_dash(&mech.target)
    ));
    lines.push(format!(
        "   Save: {} | DC: {} | Damage: {}",
        or_dash(&mech.save),
        or_dash(&mech.dc),
        or_dash(&mech.damage)
    ));
    lines.push(format!("   Effect: {}", or_dash(&mech.effect)));
    if let Some(combo) = non_blank(&ability.combo_logic) {
        lines.push(format!("   Combo: {}", combo));
    }

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// Aligned table, one row per ability.
pub fn render_table(abilities: &[AbilitySpec], power_level: PowerLevel) -> String {
    let rows: Vec<[String; 7]> = abilities
        .iter()
        .map(|ability| {
            let mech = &ability.mechanics;
            [
                or_dash(&ability.name).to_string(),
                power_level.descriptor().to_string(),
                or_dash(&mech.action_type).to_string(),
                or_dash(&mech.range).to_string(),
                or_dash(&mech.dc).to_string(),
                or_dash(&mech.damage).to_string(),
                or_dash(&mech.effect).to_string(),
            ]
        })
        .collect();

    let mut widths = TABLE_HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let headers = TABLE_HEADERS.map(str::to_string);
    let mut out = table_row(&headers, &widths);
    out.push_str(&table_row(&widths.map(|w| "-".repeat(w)), &widths));
    for row in &rows {
        out.push_str(&table_row(row, &widths));
    }
    out
}

fn table_row(cells: &[String; 7], widths: &[usize; 7]) -> String {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect::<Vec<_>>()
        .join(" | ");
    format!("{}\n", line.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::Mechanics;
    use crate::session::Action;

    fn abilities() -> Vec<AbilitySpec> {
        vec![
            AbilitySpec {
                name: Some("Gale Lance".into()),
                role: Some("Opener".into()),
                summary: Some("A spear of compressed wind.".into()),
                mechanics: Mechanics {
                    action_type: Some("Action".into()),
                    range: Some("60 ft line".into()),
                    dc: Some("15".into()),
                    damage: Some("4d8 slashing".into()),
                    ..Default::default()
                },
                ..Default::default()
            },
            AbilitySpec::default(),
        ]
    }

    #[test]
    fn empty_session_shows_hint() {
        assert_eq!(render(&Session::default()), EMPTY_HINT);
    }

    #[test]
    fn cards_number_and_fill_placeholders() {
        let text = render_cards(&abilities(), PowerLevel::clamped(5));

        assert!(text.starts_with("1. Gale Lance  [5 – Standard PC-level ability]\n"));
        assert!(text.contains("   Role: Opener\n"));
        assert!(text.contains("   Action: Action | Range: 60 ft line | Target: -\n"));
        assert!(text.contains("2. Ability 2  ["));
        assert!(text.contains("No description provided."));
        assert!(!text.contains("Combo:"));
    }

    #[test]
    fn table_aligns_columns() {
        let text = render_table(&abilities(), PowerLevel::clamped(5));
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Name       | Power"));
        assert!(lines[1].starts_with("---------- | -----"));
        assert!(lines[2].starts_with("Gale Lance | 5 – Standard PC-level ability | Action"));
        assert!(lines[3].starts_with("-          | 5 –"));
    }

    #[test]
    fn view_mode_selects_projection() {
        let mut session = Session::default();
        session.abilities = abilities();

        assert!(render(&session).starts_with("1. Gale Lance"));

        let session = session.apply(Action::SetViewMode(ViewMode::Table));
        assert!(render(&session).starts_with("Name"));
    }
}
