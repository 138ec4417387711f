//! Game characters.
//!
//! Every character shares an identity (id + display name). What a character
//! can do depends on its [`CharacterKind`]:
//! - `Player`: human-controlled, carries progression
//! - `AiPlayer`: same payload as a player, actions chosen by a policy
//! - `Npc`: no progression, only used for dialogue and encounter triggers

use crate::action::SkillEffect;
use crate::combat::ElementType;

use super::{CharacterId, Player};

/// Combat-relevant stats of a character or wild creature.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatStats {
    pub element: ElementType,
    pub max_health: u32,
    pub attack: u32,
    pub heal_power: u32,
}

impl CombatStats {
    pub const fn new(element: ElementType, max_health: u32, attack: u32, heal_power: u32) -> Self {
        Self {
            element,
            max_health,
            attack,
            heal_power,
        }
    }
}

impl Default for CombatStats {
    fn default() -> Self {
        Self::new(ElementType::Terra, 100, 20, 15)
    }
}

/// Non-player character payload.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Npc {
    /// Opaque dialogue text, typically produced by a narrative provider.
    pub dialogue: Option<String>,
}

impl Npc {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dialogue(dialogue: impl Into<String>) -> Self {
        Self {
            dialogue: Some(dialogue.into()),
        }
    }
}

/// Kind-specific payload of a [`GameCharacter`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CharacterKind {
    Player(Player),
    AiPlayer(Player),
    Npc(Npc),
}

impl CharacterKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            CharacterKind::Player(_) => "player",
            CharacterKind::AiPlayer(_) => "ai_player",
            CharacterKind::Npc(_) => "npc",
        }
    }
}

/// A character that can be placed on city tiles and take part in battles.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameCharacter {
    id: CharacterId,
    pub name: String,
    pub kind: CharacterKind,
}

impl GameCharacter {
    /// Creates a character with a freshly allocated id.
    pub fn new(name: impl Into<String>, kind: CharacterKind) -> Self {
        Self::with_id(CharacterId::new(), name, kind)
    }

    /// Rebuilds a character with a known id (e.g. from a snapshot).
    pub fn with_id(id: CharacterId, name: impl Into<String>, kind: CharacterKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
        }
    }

    pub fn player(name: impl Into<String>, player: Player) -> Self {
        Self::new(name, CharacterKind::Player(player))
    }

    pub fn ai_player(name: impl Into<String>, player: Player) -> Self {
        Self::new(name, CharacterKind::AiPlayer(player))
    }

    pub fn npc(name: impl Into<String>, npc: Npc) -> Self {
        Self::new(name, CharacterKind::Npc(npc))
    }

    pub fn id(&self) -> CharacterId {
        self.id
    }

    /// Progression payload for players and AI players.
    pub fn as_player(&self) -> Option<&Player> {
        match &self.kind {
            CharacterKind::Player(player) | CharacterKind::AiPlayer(player) => Some(player),
            CharacterKind::Npc(_) => None,
        }
    }

    pub fn as_player_mut(&mut self) -> Option<&mut Player> {
        match &mut self.kind {
            CharacterKind::Player(player) | CharacterKind::AiPlayer(player) => Some(player),
            CharacterKind::Npc(_) => None,
        }
    }

    pub fn as_npc(&self) -> Option<&Npc> {
        match &self.kind {
            CharacterKind::Npc(npc) => Some(npc),
            _ => None,
        }
    }

    /// True for characters whose actions come from a policy.
    pub fn is_ai_controlled(&self) -> bool {
        matches!(self.kind, CharacterKind::AiPlayer(_))
    }

    /// Skill the character brings into battle, if any.
    pub fn skill(&self) -> Option<&SkillEffect> {
        self.as_player().and_then(|player| player.skill.as_ref())
    }
}
