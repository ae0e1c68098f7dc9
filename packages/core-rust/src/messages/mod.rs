//! Wire schemas for the `TableBridge` protocol surface.
//!
//! Each submodule covers one command family and defines the `params` and
//! `data` shapes for its tags in [`crate::CommandKind`]. Everything uses
//! camelCase field names on the wire; optional params are skipped when
//! absent, nullable result fields are serialized as JSON `null`.

pub mod actor;
pub mod chat;
pub mod combat;
pub mod journal;
pub mod roll;
pub mod token;

pub use actor::{
    AbilityScore, ActorDetailResult, ActorListResult, ActorResult, ActorSummary,
    CreateActorFromCompendiumParams, CreateActorParams, DeleteActorParams, DeleteResult,
    GetActorParams, HitPoints, ItemSummary, SkillInfo, UpdateActorParams,
};

pub use chat::{ChatMessageResult, SendChatMessageParams};

pub use combat::{
    AddCombatantParams, CombatIdParams, CombatResult, CombatantResult, CreateCombatParams,
    InitiativeResult, InitiativeRollResult, RemoveCombatantParams, RollAllInitiativeParams,
    RollInitiativeParams, SetCombatantDefeatedParams, SetInitiativeParams,
    ToggleCombatantVisibilityParams, UpdateCombatantParams,
};

pub use journal::{
    CreateJournalPageParams, CreateJournalParams, DeleteJournalPageParams, DeleteJournalParams,
    JournalPageResult, JournalPageType, JournalResult, UpdateJournalPageParams,
    UpdateJournalParams,
};

pub use roll::{
    AbilityKey, DiceResult, RollAbilityParams, RollAttackParams, RollDamageParams,
    RollDiceParams, RollResult, RollSaveParams, RollSkillParams,
};

pub use token::{
    CreateTokenParams, DeleteTokenParams, GetSceneTokensParams, MoveTokenParams,
    SceneTokensResult, TokenResult, UpdateTokenParams,
};
