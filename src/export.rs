//! Plain-text stat sheet export.

use crate::ability::{AbilitySpec, non_blank, or_dash};
use crate::prompt::PowerLevel;

/// Separator between ability blocks in a stat sheet.
pub const DIVIDER: &str = "\n------------------------------\n\n";

/// File name used when no output path is given.
pub const DEFAULT_EXPORT_FILE: &str = "devil-fruit-abilities.txt";

/// Render one ability as a copyable text block.
pub fn format_ability_text(ability: &AbilitySpec, power_level: PowerLevel) -> String {
    let mech = &ability.mechanics;
    let mut text = format!(
        "[{}] – {}\n\
         Action: {} | Range: {} | Target: {}\n\
         Save: {} | DC: {} | Damage: {}\n\
         Effect: {}\n",
        non_blank(&ability.name).unwrap_or("Unnamed Ability"),
        power_level.descriptor(),
        or_dash(&mech.action_type),
        or_dash(&mech.range),
        or_dash(&mech.target),
        or_dash(&mech.save),
        or_dash(&mech.dc),
        or_dash(&mech.damage),
        or_dash(&mech.effect),
    );

    if let Some(description) = non_blank(&ability.description) {
        text.push_str(&format!("Description: {}\n", description));
    }

    text
}

/// Every ability as one text document, blocks separated by [`DIVIDER`].
pub fn stat_sheet(abilities: &[AbilitySpec], power_level: PowerLevel) -> String {
    abilities
        .iter()
        .map(|a| format_ability_text(a, power_level))
        .collect::<Vec<_>>()
        .join(DIVIDER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::Mechanics;

    fn magma_fist() -> AbilitySpec {
        AbilitySpec {
            name: Some("Magma Fist".into()),
            description: Some("A molten punch that leaves the ground burning.".into()),
            mechanics: Mechanics {
                action_type: Some("Action".into()),
                range: Some("30 ft".into()),
                target: Some("One creature".into()),
                save: Some("DEX".into()),
                dc: Some("16".into()),
                damage: Some("5d8 fire".into()),
                effect: Some("Target is set ablaze.".into()),
            },
            ..Default::default()
        }
    }

    #[test]
    fn formats_full_block() {
        let text = format_ability_text(&magma_fist(), PowerLevel::clamped(6));
        assert_eq!(
            text,
            "[Magma Fist] – 6 – Strong PC / elite enemy\n\
             Action: Action | Range: 30 ft | Target: One creature\n\
             Save: DEX | DC: 16 | Damage: 5d8 fire\n\
             Effect: Target is set ablaze.\n\
             Description: A molten punch that leaves the ground burning.\n"
        );
    }

    #[test]
    fn missing_fields_use_dash_and_skip_description() {
        let text = format_ability_text(&AbilitySpec::default(), PowerLevel::clamped(1));
        assert_eq!(
            text,
            "[Unnamed Ability] – 1 – Trivial / weak\n\
             Action: - | Range: - | Target: -\n\
             Save: - | DC: - | Damage: -\n\
             Effect: -\n"
        );
    }

    #[test]
    fn stat_sheet_joins_with_divider() {
        let sheet = stat_sheet(&[magma_fist(), AbilitySpec::default()], PowerLevel::default());
        let blocks: Vec<_> = sheet.split(DIVIDER).collect();

        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].starts_with("[Magma Fist]"));
        assert!(blocks[1].starts_with("[Unnamed Ability]"));
    }

    #[test]
    fn empty_list_is_empty_sheet() {
        assert_eq!(stat_sheet(&[], PowerLevel::default()), "");
    }
}
