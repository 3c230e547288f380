//! Prompt construction for the generation endpoint.
//!
//! This module provides:
//!
//! - **Options**: the raw `FormState` read from `form.yaml` and its
//!   normalized `PromptOptions`
//! - **Ladder**: `PowerLevel`/`AbilityCount` normalization and the static
//!   power ladder
//! - **Builder**: the pure form-to-text functions
//!
//! Building a prompt never fails: unknown enumerations fall back to their
//! baseline value and bad numbers fall back to their defaults.

mod builder;
mod ladder;
mod options;


pub use builder::{FALLBACK_PHRASE, build_prompt, build_reroll_prompt, render};
pub use ladder::{AbilityCount, LADDER, PowerLevel};
pub use options::{
    ComboParticipant, FeatureTier, FormState, MechanicsDetail, PackageType, Participant,
    PresentationStyle, PromptOptions, TierFeatures,
};
