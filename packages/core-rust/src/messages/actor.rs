//! Actor schemas: CRUD params, summaries, and the detail sheet result.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::roll::AbilityKey;

/// Params for `get-actor`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetActorParams {
    pub actor_id: String,
}

/// Params for `create-actor`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateActorParams {
    pub name: String,
    /// Actor type, e.g. `"character"` or `"npc"` (wire key `type`).
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub folder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub img: Option<String>,
    /// System-specific actor data, passed through opaquely.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub system: Option<HashMap<String, Value>>,
}

/// Params for `create-actor-from-compendium`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateActorFromCompendiumParams {
    pub pack_id: String,
    pub actor_id: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub folder: Option<String>,
}

/// Params for `update-actor`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateActorParams {
    pub actor_id: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub img: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub folder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub system: Option<HashMap<String, Value>>,
}

/// Params for `delete-actor`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteActorParams {
    pub actor_id: String,
}

/// Result for actor create/update commands. `folder` is nullable, not optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorResult {
    pub id: String,
    pub uuid: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub img: String,
    pub folder: Option<String>,
}

/// One entry in the `get-actors` listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorSummary {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub img: String,
}

/// Result for `get-actors`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorListResult {
    pub actors: Vec<ActorSummary>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HitPoints {
    pub value: i32,
    pub max: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbilityScore {
    pub value: i32,
    pub modifier: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillInfo {
    pub total: i32,
    pub proficient: bool,
}

/// One owned item on an actor's sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSummary {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub img: String,
}

/// Result for `get-actor`: the full sheet view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorDetailResult {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub img: String,
    pub hp: HitPoints,
    pub ac: i32,
    pub abilities: HashMap<AbilityKey, AbilityScore>,
    pub skills: HashMap<String, SkillInfo>,
    pub items: Vec<ItemSummary>,
}

/// Result for every `delete-*` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    pub deleted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_actor_params_type_key_on_wire() {
        let params: CreateActorParams =
            serde_json::from_str(r#"{"name":"Goblin","type":"npc"}"#).unwrap();
        assert_eq!(params.kind, "npc");
        assert!(params.system.is_none());

        let raw = serde_json::to_value(&params).unwrap();
        assert_eq!(raw["type"], "npc");
        assert!(raw.as_object().unwrap().get("kind").is_none());
    }

    #[test]
    fn actor_result_folder_serializes_null_when_absent() {
        let result = ActorResult {
            id: "a1".into(),
            uuid: "Actor.a1".into(),
            name: "Goblin".into(),
            kind: "npc".into(),
            img: "goblin.png".into(),
            folder: None,
        };
        let raw = serde_json::to_value(&result).unwrap();
        assert!(raw["folder"].is_null());
    }

    #[test]
    fn actor_detail_abilities_keyed_by_ability_tag() {
        let mut abilities = HashMap::new();
        abilities.insert(
            AbilityKey::Str,
            AbilityScore {
                value: 16,
                modifier: 3,
            },
        );
        let detail = ActorDetailResult {
            id: "a1".into(),
            name: "Fighter".into(),
            kind: "character".into(),
            img: "f.png".into(),
            hp: HitPoints { value: 20, max: 24 },
            ac: 17,
            abilities,
            skills: HashMap::new(),
            items: vec![],
        };
        let raw = serde_json::to_value(&detail).unwrap();
        assert_eq!(raw["abilities"]["str"]["modifier"], 3);
    }
}
