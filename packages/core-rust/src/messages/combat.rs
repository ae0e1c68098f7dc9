//! Combat schemas: encounter lifecycle, turn order, initiative, and combatants.

use serde::{Deserialize, Serialize};

/// Params for `create-combat`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCombatParams {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub scene_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub activate: Option<bool>,
}

/// Params for `add-combatant`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCombatantParams {
    /// Defaults to the active combat when absent.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub combat_id: Option<String>,
    pub actor_id: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub token_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub initiative: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub hidden: Option<bool>,
}

/// Params for `remove-combatant`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveCombatantParams {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub combat_id: Option<String>,
    pub combatant_id: String,
}

/// Params for the commands that only address a combat: `start-combat`,
/// `end-combat`, `delete-combat`, `next-turn`, `previous-turn`,
/// `get-combat-state`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatIdParams {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub combat_id: Option<String>,
}

/// Params for `roll-initiative`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollInitiativeParams {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub combat_id: Option<String>,
    pub combatant_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub formula: Option<String>,
}

/// Params for `set-initiative`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetInitiativeParams {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub combat_id: Option<String>,
    pub combatant_id: String,
    pub initiative: f64,
}

/// Params for `roll-all-initiative`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollAllInitiativeParams {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub combat_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub formula: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub npcs_only: Option<bool>,
}

/// Params for `update-combatant`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCombatantParams {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub combat_id: Option<String>,
    pub combatant_id: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub initiative: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub defeated: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub hidden: Option<bool>,
}

/// Params for `set-combatant-defeated`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetCombatantDefeatedParams {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub combat_id: Option<String>,
    pub combatant_id: String,
    pub defeated: bool,
}

/// Params for `toggle-combatant-visibility`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleCombatantVisibilityParams {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub combat_id: Option<String>,
    pub combatant_id: String,
}

/// One combatant's initiative outcome inside an [`InitiativeRollResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitiativeResult {
    pub combatant_id: String,
    pub name: String,
    pub initiative: f64,
}

/// Result for `roll-initiative` and `roll-all-initiative`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitiativeRollResult {
    pub results: Vec<InitiativeResult>,
}

/// One combatant row. `token_id` and `initiative` are nullable, not optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatantResult {
    pub id: String,
    pub actor_id: String,
    pub token_id: Option<String>,
    pub name: String,
    pub img: String,
    pub initiative: Option<f64>,
    pub defeated: bool,
    pub hidden: bool,
}

/// Result for the combat lifecycle and turn commands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatResult {
    pub id: String,
    pub round: u32,
    pub turn: u32,
    pub started: bool,
    pub combatants: Vec<CombatantResult>,
    /// The combatant whose turn it is, if the combat has started.
    pub current: Option<CombatantResult>,
}
