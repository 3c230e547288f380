//! Form state and its normalized prompt options.
//!
//! `FormState` mirrors the YAML form file exactly as the user wrote it.
//! `PromptOptions` is the normalized view the builder consumes: every
//! enumerated field resolved to its enum, every number parsed and clamped,
//! every blank string dropped.

use super::ladder::{AbilityCount, PowerLevel};
use crate::lenient;
use serde::{Deserialize, Serialize};

/// Raw form input, as read from `form.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormState {
    // =========================================================================
    // Character identity
    // =========================================================================
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub backstory: Option<String>,

    // =========================================================================
    // Multi-select categories and their notes
    // =========================================================================
    #[serde(deserialize_with = "lenient::string_list")]
    pub effect_types: Vec<String>,
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub effect_notes: Option<String>,

    #[serde(deserialize_with = "lenient::string_list")]
    pub fruit_types: Vec<String>,
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub fruit_notes: Option<String>,

    #[serde(deserialize_with = "lenient::string_list")]
    pub outcomes: Vec<String>,
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub outcome_notes: Option<String>,

    #[serde(deserialize_with = "lenient::string_list")]
    pub combo_focus: Vec<String>,
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub combo_notes: Option<String>,

    // =========================================================================
    // Output preferences
    // =========================================================================
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub num_abilities: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub format_style: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub mechanics_detail: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub power_level: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub preferred_dc: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub output_notes: Option<String>,
    pub tone_epic: bool,
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub package_type: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub tier: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Characters taking part in a multi-character combo.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub participants: Vec<ComboParticipant>,
}

/// One character contributing to a combo ability.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComboParticipant {
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Whether this character has eaten a devil fruit.
    pub has_power: bool,
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub power: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub skill: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub contribution: Option<String>,
}

/// How verbose the generated ability text should be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PresentationStyle {
    /// Compact 5e spell/feature layout (baseline).
    #[default]
    StatBlock,
    /// Bare quick reference.
    Minimal,
    /// More descriptive flavor, mechanics still separated.
    Cinematic,
}

impl PresentationStyle {
    /// Parse a presentation style from a string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim() {
            "stat-block" => Some(Self::StatBlock),
            "minimal" => Some(Self::Minimal),
            "cinematic" => Some(Self::Cinematic),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::StatBlock => "stat-block",
            Self::Minimal => "minimal",
            Self::Cinematic => "cinematic",
        }
    }

    pub(crate) fn instruction(self) -> &'static str {
        match self {
            Self::StatBlock => {
                "mechanics should read like a clear DnD 5e spell or feature — compact but structured and easy to scan."
            }
            Self::Minimal => {
                "very minimal quick reference. Keep descriptions tight and avoid long paragraphs."
            }
            Self::Cinematic => {
                "a bit more descriptive and cinematic, but still with clearly separated mechanics."
            }
        }
    }
}

/// How much rules detail each ability carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MechanicsDetail {
    Simple,
    #[default]
    Detailed,
}

impl MechanicsDetail {
    /// Anything other than `simple` means detailed.
    pub fn parse(s: Option<&str>) -> Self {
        match s.map(str::trim) {
            Some("simple") => Self::Simple,
            _ => Self::Detailed,
        }
    }

    pub(crate) fn instruction(self) -> &'static str {
        match self {
            Self::Simple => {
                "Simple: include action type, range, saving throw (if any), basic damage, and 1–2 core effects."
            }
            Self::Detailed => {
                "Detailed: include action type, range, save, damage/scaling ideas, and any conditions or special rules."
            }
        }
    }
}

/// Whether abilities stand alone or are built as one interlocking kit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PackageType {
    #[default]
    Standalone,
    ComboKit,
}

impl PackageType {
    /// Parse a package type from a string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim() {
            "standalone" => Some(Self::Standalone),
            "combo-kit" => Some(Self::ComboKit),
            _ => None,
        }
    }

    pub(crate) fn instruction(self) -> &'static str {
        match self {
            Self::Standalone => "standalone abilities that each work on their own.",
            Self::ComboKit => {
                "a combo kit: abilities should set each other up and chain together in play."
            }
        }
    }
}

/// Which optional prompt features are enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeatureTier {
    Basic,
    Moderate,
    #[default]
    Complex,
}

/// Feature switches for a tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierFeatures {
    /// Render the combo-focus line in the fruit section.
    pub combo_focus: bool,
    /// Ask for `role` and `combo_logic` in each ability.
    pub ability_roles: bool,
    /// Render the multi-character combo section.
    pub participants: bool,
}

impl FeatureTier {
    /// Parse a tier from a string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim() {
            "basic" => Some(Self::Basic),
            "moderate" => Some(Self::Moderate),
            "complex" => Some(Self::Complex),
            _ => None,
        }
    }

    pub fn features(self) -> TierFeatures {
        match self {
            Self::Basic => TierFeatures {
                combo_focus: false,
                ability_roles: false,
                participants: false,
            },
            Self::Moderate => TierFeatures {
                combo_focus: true,
                ability_roles: true,
                participants: false,
            },
            Self::Complex => TierFeatures {
                combo_focus: true,
                ability_roles: true,
                participants: true,
            },
        }
    }
}

/// A participant with blank fields dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub name: String,
    pub role: Option<String>,
    pub has_power: bool,
    pub power: Option<String>,
    pub skill: Option<String>,
    pub contribution: Option<String>,
}

/// Normalized builder input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptOptions {
    pub name: Option<String>,
    pub role: Option<String>,
    pub theme: Option<String>,
    pub backstory: Option<String>,
    pub effect_types: Vec<String>,
    pub effect_notes: Option<String>,
    pub fruit_types: Vec<String>,
    pub fruit_notes: Option<String>,
    pub outcomes: Vec<String>,
    pub outcome_notes: Option<String>,
    pub combo_focus: Vec<String>,
    pub combo_notes: Option<String>,
    pub count: AbilityCount,
    pub style: PresentationStyle,
    pub detail: MechanicsDetail,
    pub power: PowerLevel,
    pub preferred_dc: Option<String>,
    pub output_notes: Option<String>,
    pub tone_epic: bool,
    pub package: PackageType,
    pub tier: FeatureTier,
    pub model: Option<String>,
    pub participants: Vec<Participant>,
}

impl PromptOptions {
    pub fn from_form(form: &FormState) -> Self {
        Self {
            name: clean(&form.name),
            role: clean(&form.role),
            theme: clean(&form.theme),
            backstory: clean(&form.backstory),
            effect_types: clean_list(&form.effect_types),
            effect_notes: clean(&form.effect_notes),
            fruit_types: clean_list(&form.fruit_types),
            fruit_notes: clean(&form.fruit_notes),
            outcomes: clean_list(&form.outcomes),
            outcome_notes: clean(&form.outcome_notes),
            combo_focus: clean_list(&form.combo_focus),
            combo_notes: clean(&form.combo_notes),
            count: AbilityCount::parse_or_default(form.num_abilities.as_deref()),
            style: form
                .format_style
                .as_deref()
                .and_then(PresentationStyle::from_str)
                .unwrap_or_default(),
            detail: MechanicsDetail::parse(form.mechanics_detail.as_deref()),
            power: PowerLevel::parse_or_default(form.power_level.as_deref()),
            preferred_dc: clean(&form.preferred_dc),
            output_notes: clean(&form.output_notes),
            tone_epic: form.tone_epic,
            package: form
                .package_type
                .as_deref()
                .and_then(PackageType::from_str)
                .unwrap_or_default(),
            tier: form
                .tier
                .as_deref()
                .and_then(FeatureTier::from_str)
                .unwrap_or_default(),
            model: clean(&form.model),
            participants: form.participants.iter().filter_map(Participant::from_form).collect(),
        }
    }
}

impl Participant {
    /// Returns `None` for an entry with every field blank.
    fn from_form(p: &ComboParticipant) -> Option<Self> {
        let name = clean(&p.name);
        let role = clean(&p.role);
        let power = clean(&p.power);
        let skill = clean(&p.skill);
        let contribution = clean(&p.contribution);

        if name.is_none()
            && role.is_none()
            && power.is_none()
            && skill.is_none()
            && contribution.is_none()
        {
            return None;
        }

        Some(Self {
            name: name.unwrap_or_else(|| "Unnamed ally".to_string()),
            role,
            has_power: p.has_power,
            power,
            skill,
            contribution,
        })
    }
}

fn clean(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn clean_list(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}
