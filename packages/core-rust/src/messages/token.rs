//! Token schemas: placement, movement, and scene queries.

use serde::{Deserialize, Serialize};

/// Params for `create-token`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTokenParams {
    /// Defaults to the viewed scene when absent.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub scene_id: Option<String>,
    pub actor_id: String,
    pub x: f64,
    pub y: f64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub hidden: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub elevation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub rotation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub scale: Option<f64>,
}

/// Params for `delete-token`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteTokenParams {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub scene_id: Option<String>,
    pub token_id: String,
}

/// Params for `move-token`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveTokenParams {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub scene_id: Option<String>,
    pub token_id: String,
    pub x: f64,
    pub y: f64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub elevation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub rotation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub animate: Option<bool>,
}

/// Params for `update-token`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTokenParams {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub scene_id: Option<String>,
    pub token_id: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub hidden: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub elevation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub rotation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub scale: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub display_name: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub disposition: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub lock_rotation: Option<bool>,
}

/// Params for `get-scene-tokens`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetSceneTokensParams {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub scene_id: Option<String>,
}

/// One placed token. `actor_id` is nullable, not optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResult {
    pub id: String,
    pub name: String,
    pub actor_id: Option<String>,
    pub x: f64,
    pub y: f64,
    pub elevation: f64,
    pub rotation: f64,
    pub hidden: bool,
    pub img: String,
    pub disposition: i32,
}

/// Result for `get-scene-tokens`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneTokensResult {
    pub scene_id: String,
    pub scene_name: String,
    pub tokens: Vec<TokenResult>,
}
