//! Power level and ability count normalization, plus the static power ladder.

use crate::lenient;
use serde::{Deserialize, Deserializer, Serialize};

/// Short label shown next to every rendered ability, indexed by level - 1.
const DESCRIPTORS: [&str; 10] = [
    "1 – Trivial / weak",
    "2 – Very weak",
    "3 – Weak but useful",
    "4 – Low-tier, modest impact",
    "5 – Standard PC-level ability",
    "6 – Strong PC / elite enemy",
    "7 – Boss-tier with drawback",
    "8 – Very high, near-mythic",
    "9 – Mythic-level, encounter-defining",
    "10 – Godlike, reality-warping with massive drawback",
];

/// Mechanics ladder restated in every prompt, indexed by level - 1.
pub const LADDER: [&str; 10] = [
    "1: DC 4–6. Very weak / trivial. 0–1 die or tiny effect. Mostly utility or soft flavor. No real drawback.",
    "2: DC 6–7. Very weak but noticeable. 1–2 dice or a light debuff. Small area or single target. No real drawback.",
    "3: DC 7–9. Weak but useful. 1–2 dice + minor rider or small control. Still feels like a low-impact trick.",
    "4: DC 9–11. Low-tier solid move. 2–3 dice, small area or moderate utility. Could be a secondary attack option.",
    "5: DC 11–13. Standard PC-level ability. 3–4 dice, clear and reliable effect. Good mainline combat option.",
    "6: DC 13–16. Strong PC / elite enemy move. 4–5 dice or strong control in a modest area. No or light drawback.",
    "7: DC 16–20. Boss-tier. 6–8 dice OR strong control in a decent area. Must include a meaningful drawback (HP cost, limited uses, self-debuff, etc.).",
    "8: DC 20–23. Very high, near-mythic. 8–10+ dice OR large area with strong conditions (stun, restrain, banish) or powerful battlefield control. Serious drawback is required.",
    "9: DC 24–28. Mythic-level. May deal 100+ total damage across targets, combine multiple damage types and conditions, and create lasting hazards or terrain changes. Heavy drawback (HP or max HP cost, exhaustion, huge cooldown, chance of backfiring).",
    "10: DC 26–32. Godlike, shonen finisher. Encounter- or arc-defining. Massive or arena-scale area, multiple stages of damage, multiple conditions and long-lasting or semi-permanent battlefield impact. Damage can be extremely high (hundreds), but there must be a massive drawback (severe HP drain, permanent scar, once-per-arc usage, risk of losing control, etc.).",
];

/// Requested intensity of generated abilities, always within `1..=10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct PowerLevel(u8);

impl PowerLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;
    pub const DEFAULT: u8 = 6;

    /// Clamp any integer into the valid range.
    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(Self::MIN as i64, Self::MAX as i64) as u8)
    }

    /// Parse user text; missing or non-numeric input yields the default.
    pub fn parse_or_default(text: Option<&str>) -> Self {
        match text.and_then(parse_leading_int) {
            Some(n) => Self::clamped(n),
            None => Self::default(),
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Verbal label, e.g. `10 – Godlike, reality-warping with massive drawback`.
    pub fn descriptor(self) -> &'static str {
        DESCRIPTORS[(self.0 - 1) as usize]
    }

    /// The ladder row for this level.
    pub fn ladder_row(self) -> &'static str {
        LADDER[(self.0 - 1) as usize]
    }
}

impl Default for PowerLevel {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl std::fmt::Display for PowerLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for PowerLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = lenient::opt_string(deserializer)?;
        Ok(Self::parse_or_default(text.as_deref()))
    }
}

/// Number of abilities to request; always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbilityCount(u32);

impl AbilityCount {
    pub const DEFAULT: u32 = 3;

    /// Parse user text; missing, non-numeric or non-positive input yields 3.
    pub fn parse_or_default(text: Option<&str>) -> Self {
        match text.and_then(parse_leading_int) {
            Some(n) if n > 0 => Self(u32::try_from(n).unwrap_or(u32::MAX)),
            _ => Self::default(),
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for AbilityCount {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl std::fmt::Display for AbilityCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reads the leading integer of `text` ("7", " 7 ", "7.5", "+3", "-2").
fn parse_leading_int(text: &str) -> Option<i64> {
    let text = text.trim();
    let sign_len = usize::from(text.starts_with(['-', '+']));
    let digits = text[sign_len..]
        .chars()
        .take_while(char::is_ascii_digit)
        .count();
    if digits == 0 {
        return None;
    }
    text[..sign_len + digits].parse().ok()
}
