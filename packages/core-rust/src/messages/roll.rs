//! Dice and check roll schemas: params and results for the `roll-*` commands.

use serde::{Deserialize, Serialize};

/// The six ability keys used by ability/save rolls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AbilityKey {
    Str,
    Dex,
    Con,
    Int,
    Wis,
    Cha,
}

impl AbilityKey {
    pub const ALL: [Self; 6] = [
        Self::Str,
        Self::Dex,
        Self::Con,
        Self::Int,
        Self::Wis,
        Self::Cha,
    ];
}

/// Params for `roll-dice`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollDiceParams {
    pub formula: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub show_in_chat: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub flavor: Option<String>,
}

/// Params for `roll-ability`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollAbilityParams {
    pub actor_id: String,
    pub ability: AbilityKey,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub show_in_chat: Option<bool>,
}

/// Params for `roll-skill`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollSkillParams {
    pub actor_id: String,
    pub skill: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub show_in_chat: Option<bool>,
}

/// Params for `roll-save`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollSaveParams {
    pub actor_id: String,
    pub ability: AbilityKey,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub show_in_chat: Option<bool>,
}

/// Params for `roll-attack`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollAttackParams {
    pub actor_id: String,
    pub item_id: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub advantage: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub disadvantage: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub show_in_chat: Option<bool>,
}

/// Params for `roll-damage`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollDamageParams {
    pub actor_id: String,
    pub item_id: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub critical: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub show_in_chat: Option<bool>,
}

/// The per-die-group results inside a [`RollResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiceResult {
    /// Die type, e.g. `"d6"` or `"d20"`.
    #[serde(rename = "type")]
    pub die: String,
    pub count: u32,
    pub results: Vec<i32>,
}

/// Result for every `roll-*` command.
///
/// `is_critical`/`is_fumble` are emitted only when set, and only make
/// sense for rolls containing a single d20.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollResult {
    pub total: i64,
    pub formula: String,
    pub dice: Vec<DiceResult>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub is_critical: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub is_fumble: Option<bool>,
}
