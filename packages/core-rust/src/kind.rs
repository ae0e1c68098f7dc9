//! The closed, versioned set of command-type tags.
//!
//! `CommandKind` is the protocol surface: every tag the bridge is willing
//! to dispatch appears here, and each tag pairs with a params/result schema
//! in [`crate::messages`]. Tags travel on the wire as kebab-case strings
//! (`"roll-dice"`, `"get-scene-tokens"`, ...). Tags outside this set are
//! still legal *input*; the router answers them with a failure response.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a wire tag is not part of the protocol surface.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown command type: {tag}")]
pub struct ParseCommandKindError {
    pub tag: String,
}

/// A command-type tag. One handler may be registered per tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CommandKind {
    // Rolls
    RollDice,
    RollAbility,
    RollSkill,
    RollSave,
    RollAttack,
    RollDamage,
    // Actors
    GetActors,
    GetActor,
    CreateActor,
    CreateActorFromCompendium,
    UpdateActor,
    DeleteActor,
    // Chat
    SendChatMessage,
    // Journals
    CreateJournal,
    UpdateJournal,
    DeleteJournal,
    CreateJournalPage,
    UpdateJournalPage,
    DeleteJournalPage,
    // Combat
    CreateCombat,
    AddCombatant,
    RemoveCombatant,
    StartCombat,
    EndCombat,
    DeleteCombat,
    NextTurn,
    PreviousTurn,
    GetCombatState,
    RollInitiative,
    SetInitiative,
    RollAllInitiative,
    UpdateCombatant,
    SetCombatantDefeated,
    ToggleCombatantVisibility,
    // Tokens
    CreateToken,
    DeleteToken,
    MoveToken,
    UpdateToken,
    GetSceneTokens,
}

impl CommandKind {
    /// Every tag in the protocol surface, in documentation order.
    pub const ALL: [Self; 39] = [
        Self::RollDice,
        Self::RollAbility,
        Self::RollSkill,
        Self::RollSave,
        Self::RollAttack,
        Self::RollDamage,
        Self::GetActors,
        Self::GetActor,
        Self::CreateActor,
        Self::CreateActorFromCompendium,
        Self::UpdateActor,
        Self::DeleteActor,
        Self::SendChatMessage,
        Self::CreateJournal,
        Self::UpdateJournal,
        Self::DeleteJournal,
        Self::CreateJournalPage,
        Self::UpdateJournalPage,
        Self::DeleteJournalPage,
        Self::CreateCombat,
        Self::AddCombatant,
        Self::RemoveCombatant,
        Self::StartCombat,
        Self::EndCombat,
        Self::DeleteCombat,
        Self::NextTurn,
        Self::PreviousTurn,
        Self::GetCombatState,
        Self::RollInitiative,
        Self::SetInitiative,
        Self::RollAllInitiative,
        Self::UpdateCombatant,
        Self::SetCombatantDefeated,
        Self::ToggleCombatantVisibility,
        Self::CreateToken,
        Self::DeleteToken,
        Self::MoveToken,
        Self::UpdateToken,
        Self::GetSceneTokens,
    ];

    /// The kebab-case wire tag for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RollDice => "roll-dice",
            Self::RollAbility => "roll-ability",
            Self::RollSkill => "roll-skill",
            Self::RollSave => "roll-save",
            Self::RollAttack => "roll-attack",
            Self::RollDamage => "roll-damage",
            Self::GetActors => "get-actors",
            Self::GetActor => "get-actor",
            Self::CreateActor => "create-actor",
            Self::CreateActorFromCompendium => "create-actor-from-compendium",
            Self::UpdateActor => "update-actor",
            Self::DeleteActor => "delete-actor",
            Self::SendChatMessage => "send-chat-message",
            Self::CreateJournal => "create-journal",
            Self::UpdateJournal => "update-journal",
            Self::DeleteJournal => "delete-journal",
            Self::CreateJournalPage => "create-journal-page",
            Self::UpdateJournalPage => "update-journal-page",
            Self::DeleteJournalPage => "delete-journal-page",
            Self::CreateCombat => "create-combat",
            Self::AddCombatant => "add-combatant",
            Self::RemoveCombatant => "remove-combatant",
            Self::StartCombat => "start-combat",
            Self::EndCombat => "end-combat",
            Self::DeleteCombat => "delete-combat",
            Self::NextTurn => "next-turn",
            Self::PreviousTurn => "previous-turn",
            Self::GetCombatState => "get-combat-state",
            Self::RollInitiative => "roll-initiative",
            Self::SetInitiative => "set-initiative",
            Self::RollAllInitiative => "roll-all-initiative",
            Self::UpdateCombatant => "update-combatant",
            Self::SetCombatantDefeated => "set-combatant-defeated",
            Self::ToggleCombatantVisibility => "toggle-combatant-visibility",
            Self::CreateToken => "create-token",
            Self::DeleteToken => "delete-token",
            Self::MoveToken => "move-token",
            Self::UpdateToken => "update-token",
            Self::GetSceneTokens => "get-scene-tokens",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommandKind {
    type Err = ParseCommandKindError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == tag)
            .ok_or_else(|| ParseCommandKindError {
                tag: tag.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn all_covers_every_tag_exactly_once() {
        let tags: HashSet<&str> = CommandKind::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(tags.len(), CommandKind::ALL.len());
    }

    #[test]
    fn from_str_roundtrips_every_tag() {
        for kind in CommandKind::ALL {
            assert_eq!(kind.as_str().parse::<CommandKind>(), Ok(kind));
        }
    }

    #[test]
    fn from_str_rejects_unknown_tag() {
        let err = "warp-reality".parse::<CommandKind>().unwrap_err();
        assert_eq!(err.tag, "warp-reality");
    }

    #[test]
    fn serde_tag_matches_as_str() {
        // The serde rename and the manual wire tag must never drift apart.
        for kind in CommandKind::ALL {
            let json = serde_json::to_value(kind).unwrap();
            assert_eq!(json.as_str(), Some(kind.as_str()));
        }
    }

    #[test]
    fn representative_tags_are_kebab_case() {
        assert_eq!(CommandKind::RollDice.as_str(), "roll-dice");
        assert_eq!(
            CommandKind::CreateActorFromCompendium.as_str(),
            "create-actor-from-compendium"
        );
        assert_eq!(
            CommandKind::ToggleCombatantVisibility.as_str(),
            "toggle-combatant-visibility"
        );
    }
}
