//! Game session: the single owner and mutator of a running campaign.
//!
//! A [`GameSession`] holds the human player's snapshot, the cities loaded
//! for this run and every other spawned character. Battles are resolved
//! through it so that rewards land on the player exactly once, and saving
//! goes through it so the persisted snapshot is always consistent.

mod names;

use std::collections::BTreeMap;

use game_core::{
    ActionProvider, AdventureModeLocation, Battle, BattleState, CharacterId, CharacterKind, City,
    Combatant, CombatStats, Direction, GameCharacter, GameConfig, Item, LevelUp, Mission, Npc,
    Player, SavedGameData, WorldError,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{Result, SessionError};
use crate::narrative::{NarrativeProvider, SilentNarrator};
use crate::repository::SaveRepository;

pub use names::random_name;

/// Result of trying to walk one tile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved {
        location: AdventureModeLocation,
        /// The destination tile is a portal.
        portal: bool,
        /// A wild creature jumped out. Start the fight with
        /// [`GameSession::wild_battle`].
        encounter: Option<Combatant>,
    },
    /// The destination is outside the city; nothing changed.
    Blocked { attempted: AdventureModeLocation },
}

/// Summary of a resolved battle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BattleSummary {
    pub state: BattleState,
    pub turns: u32,
    /// Level change from the reward, when the human player won.
    pub level_up: Option<LevelUp>,
}

pub struct GameSession {
    config: GameConfig,
    save: SavedGameData,
    characters: BTreeMap<CharacterId, GameCharacter>,
    cities: Vec<City>,
    current_city: Option<usize>,
    rng: StdRng,
    narrator: Box<dyn NarrativeProvider>,
}

impl GameSession {
    /// Starts a fresh campaign ("NEW GAME").
    pub fn new_game(trainer_name: impl Into<String>, config: GameConfig) -> Self {
        let save = SavedGameData::new_game(trainer_name, &config);
        tracing::info!(trainer = %save.trainer_name, player = %save.player_id(), "new game started");
        Self::with_save(save, config)
    }

    /// Resumes a campaign from a snapshot ("LOAD GAME").
    ///
    /// The snapshot replaces all player state; cities and other characters
    /// start empty.
    pub fn from_save(save: SavedGameData, config: GameConfig) -> Result<Self> {
        save.validate()?;
        tracing::info!(
            trainer = %save.trainer_name,
            level = save.player().level(),
            "game resumed from snapshot"
        );
        Ok(Self::with_save(save, config))
    }

    fn with_save(save: SavedGameData, config: GameConfig) -> Self {
        Self {
            config,
            save,
            characters: BTreeMap::new(),
            cities: Vec::new(),
            current_city: None,
            rng: StdRng::from_entropy(),
            narrator: Box::new(SilentNarrator),
        }
    }

    /// Makes encounter rolls and generated names reproducible.
    #[must_use]
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    #[must_use]
    pub fn with_narrator(mut self, narrator: impl NarrativeProvider + 'static) -> Self {
        self.narrator = Box::new(narrator);
        self
    }

    // ===== accessors =====

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn trainer_name(&self) -> &str {
        &self.save.trainer_name
    }

    pub fn player(&self) -> &Player {
        self.save.player()
    }

    pub fn player_id(&self) -> CharacterId {
        self.save.player_id()
    }

    pub fn player_character(&self) -> GameCharacter {
        self.save.player_data.to_character()
    }

    /// Copy of the persistable state.
    pub fn snapshot(&self) -> SavedGameData {
        self.save.clone()
    }

    pub fn character(&self, id: CharacterId) -> Option<&GameCharacter> {
        self.characters.get(&id)
    }

    pub fn characters(&self) -> impl Iterator<Item = &GameCharacter> + '_ {
        self.characters.values()
    }

    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    pub fn city(&self, name: &str) -> Option<&City> {
        self.cities.iter().find(|city| city.name == name)
    }

    pub fn current_city(&self) -> Option<&City> {
        self.current_city.and_then(|index| self.cities.get(index))
    }

    /// Display name of any character in the session, the player included.
    pub fn name_of(&self, id: CharacterId) -> Option<&str> {
        if id == self.player_id() {
            return Some(&self.save.player_data.name);
        }
        self.characters.get(&id).map(|character| character.name.as_str())
    }

    // ===== world =====

    pub fn add_city(&mut self, city: City) -> Result<()> {
        if self.city(&city.name).is_some() {
            return Err(SessionError::DuplicateCity { name: city.name });
        }
        tracing::debug!(city = %city.name, width = city.width(), height = city.height(), "city added");
        self.cities.push(city);
        Ok(())
    }

    /// Places the player on `location` in the named city, leaving the
    /// previous city.
    pub fn enter_city(&mut self, name: &str, location: AdventureModeLocation) -> Result<()> {
        let index = self.city_index(name)?;
        let player_id = self.player_id();

        if !self.cities[index].contains(location.tile_x, location.tile_y) {
            return Err(WorldError::OutOfBounds {
                location,
                width: self.cities[index].width(),
                height: self.cities[index].height(),
            }
            .into());
        }

        if let Some(previous) = self.current_city {
            self.cities[previous].evict_everywhere(player_id);
        }
        self.cities[index].place_character(location, player_id)?;
        self.current_city = Some(index);
        let player = self.save.player_mut();
        player.city = Some(name.to_string());
        player.location = location;

        tracing::info!(city = name, %location, "entered city");
        Ok(())
    }

    /// Walks the player one tile in the current city.
    ///
    /// Leaving the grid is blocked. Entering a tile that allows wild
    /// encounters rolls the configured encounter chance.
    pub fn move_player(&mut self, direction: Direction) -> Result<MoveOutcome> {
        let index = self.current_city.ok_or(SessionError::NotInCity)?;
        let player_id = self.player_id();
        let from = self.player().location;
        let to = from.step(direction);

        let city = &mut self.cities[index];
        if !city.contains(to.tile_x, to.tile_y) {
            tracing::debug!(%from, ?direction, "move blocked by city edge");
            return Ok(MoveOutcome::Blocked { attempted: to });
        }
        city.move_character(player_id, from, to)?;
        self.save.player_mut().location = to;

        let (portal, wild) = match self.cities[index].tile_at(to) {
            Some(tile) => (tile.is_portal(), tile.can_encounter_wild_battles()),
            None => (false, false),
        };
        let encounter = if wild && self.rng.gen_bool(self.config.encounters.probability()) {
            Some(self.spawn_wild_creature())
        } else {
            None
        };

        tracing::debug!(%from, %to, portal, encounter = encounter.is_some(), "player moved");
        Ok(MoveOutcome::Moved {
            location: to,
            portal,
            encounter,
        })
    }

    /// A wild creature built from the encounter rules.
    pub fn spawn_wild_creature(&mut self) -> Combatant {
        let name = random_name(&mut self.rng);
        Combatant::wild(name, self.config.encounters.wild_stats)
    }

    /// Adds a character to the session and places it in a city.
    pub fn spawn(
        &mut self,
        character: GameCharacter,
        city: &str,
        location: AdventureModeLocation,
    ) -> Result<CharacterId> {
        let index = self.city_index(city)?;
        let id = character.id();
        self.cities[index].place_character(location, id)?;

        tracing::debug!(character = %character.name, kind = character.kind.as_str(), city, %location, "character spawned");
        self.characters.insert(id, character);
        Ok(id)
    }

    pub fn spawn_npc(
        &mut self,
        name: impl Into<String>,
        npc: Npc,
        city: &str,
        location: AdventureModeLocation,
    ) -> Result<CharacterId> {
        self.spawn(GameCharacter::npc(name, npc), city, location)
    }

    /// Spawns an AI player with a random name and the given stats.
    pub fn spawn_ai_player(
        &mut self,
        stats: CombatStats,
        city: &str,
        location: AdventureModeLocation,
    ) -> Result<CharacterId> {
        let name = random_name(&mut self.rng);
        let player = Player::new(&self.config.progression, stats);
        self.spawn(GameCharacter::ai_player(name, player), city, location)
    }

    /// Removes a character from the session after evicting it from every
    /// tile of every city.
    pub fn despawn(&mut self, id: CharacterId) -> Result<GameCharacter> {
        if id == self.player_id() {
            return Err(SessionError::CannotDespawnPlayer);
        }
        if !self.characters.contains_key(&id) {
            return Err(SessionError::UnknownCharacter { id });
        }

        let evicted: usize = self
            .cities
            .iter_mut()
            .map(|city| city.evict_everywhere(id))
            .sum();
        let character = self
            .characters
            .remove(&id)
            .ok_or(SessionError::UnknownCharacter { id })?;

        tracing::debug!(character = %character.name, evicted, "character despawned");
        Ok(character)
    }

    /// Characters standing on a tile of the current city, in arrival order.
    pub fn occupants(&self, location: AdventureModeLocation) -> Vec<CharacterId> {
        self.current_city()
            .and_then(|city| city.tile_at(location))
            .map(|tile| tile.characters().to_vec())
            .unwrap_or_default()
    }

    // ===== battles =====

    /// Prepares a battle between the player and a wild creature.
    pub fn wild_battle(&self, opponent: Combatant) -> Result<Battle> {
        let player = Combatant::from_character(&self.player_character())?;
        Ok(Battle::wild(
            player,
            opponent,
            self.config.battle,
            self.config.encounters.wild_reward,
        )?)
    }

    /// Prepares a battle between the player and a spawned AI player.
    pub fn challenge(&self, ai_player: CharacterId) -> Result<Battle> {
        let character = self
            .characters
            .get(&ai_player)
            .ok_or(SessionError::UnknownCharacter { id: ai_player })?;
        if !character.is_ai_controlled() {
            return Err(SessionError::WrongCharacterKind {
                name: character.name.clone(),
                kind: character.kind.as_str(),
                expected: "ai_player",
            });
        }

        let player = Combatant::from_character(&self.player_character())?;
        let opponent = Combatant::from_character(character)?;
        Ok(Battle::versus(
            player,
            opponent,
            self.config.battle,
            self.config.battle.versus_reward,
        )?)
    }

    /// Runs a battle to its end and pays out the reward if the player won.
    ///
    /// Aborted, drawn and lost battles leave the player untouched.
    pub fn resolve_battle(
        &mut self,
        battle: &mut Battle,
        player: &mut (impl ActionProvider + ?Sized),
        opponent: &mut (impl ActionProvider + ?Sized),
    ) -> Result<BattleSummary> {
        if battle.player1().id() != Some(self.player_id()) {
            return Err(SessionError::ForeignBattle);
        }

        tracing::info!(
            mode = battle.mode().as_str(),
            opponent = %battle.player2().name,
            "battle started"
        );

        let reports = battle.run_to_end(player, opponent)?;
        for report in &reports {
            for outcome in &report.actions {
                tracing::debug!(
                    turn = report.turn,
                    side = %outcome.side,
                    action = %outcome.action,
                    effect = ?outcome.effect,
                    recoil = outcome.recoil,
                    "battle action"
                );
            }
        }

        let level_up = if battle.state() == BattleState::Player1Won {
            let rules = self.config.progression;
            Some(self.save.player_mut().apply_reward(battle.reward(), &rules)?)
        } else {
            None
        };

        tracing::info!(
            state = %battle.state(),
            turns = battle.turn(),
            level = self.player().level(),
            "battle finished"
        );
        Ok(BattleSummary {
            state: battle.state(),
            turns: battle.turn(),
            level_up,
        })
    }

    // ===== progression =====

    pub fn complete_mission(&mut self, mission: &Mission) -> Result<LevelUp> {
        let rules = self.config.progression;
        let level_up = self.save.player_mut().complete_mission(mission, &rules)?;
        tracing::info!(mission = %mission.name, level = level_up.to, "mission completed");
        Ok(level_up)
    }

    pub fn purchase(&mut self, item: &Item) -> Result<()> {
        self.save.player_mut().purchase(item)?;
        tracing::info!(item = item.name(), cost = %item.cost(), "item purchased");
        Ok(())
    }

    // ===== narrative =====

    /// Asks the narrative provider for text.
    ///
    /// Provider failures are logged and yield `None`; the game goes on.
    pub fn narrate(&mut self, prompt: &str) -> Option<String> {
        match self.narrator.generate_text(prompt, &self.save.generation) {
            Ok(text) if text.trim().is_empty() => None,
            Ok(text) => Some(text),
            Err(error) => {
                tracing::warn!(%error, "narrative generation failed");
                None
            }
        }
    }

    /// Player talks to an NPC. New narration replaces the NPC's dialogue
    /// line; otherwise the previous line is repeated.
    pub fn talk_to(&mut self, npc_id: CharacterId) -> Result<Option<String>> {
        let character = self
            .characters
            .get(&npc_id)
            .ok_or(SessionError::UnknownCharacter { id: npc_id })?;
        if character.as_npc().is_none() {
            return Err(SessionError::WrongCharacterKind {
                name: character.name.clone(),
                kind: character.kind.as_str(),
                expected: "npc",
            });
        }

        let prompt = format!(
            "{} greets {}. Reply in character with one short line.",
            self.save.trainer_name, character.name
        );
        let line = self.narrate(&prompt);

        let Some(GameCharacter {
            kind: CharacterKind::Npc(npc),
            ..
        }) = self.characters.get_mut(&npc_id)
        else {
            return Err(SessionError::UnknownCharacter { id: npc_id });
        };
        if line.is_some() {
            npc.dialogue = line;
        }
        Ok(npc.dialogue.clone())
    }

    // ===== persistence =====

    pub fn save(&self, repo: &(impl SaveRepository + ?Sized), slot: &str) -> Result<()> {
        repo.save(slot, &self.save)?;
        tracing::info!(slot, trainer = %self.save.trainer_name, "game saved");
        Ok(())
    }

    pub fn load(
        repo: &(impl SaveRepository + ?Sized),
        slot: &str,
        config: GameConfig,
    ) -> Result<Self> {
        let save = repo.load(slot)?;
        tracing::info!(slot, "game loaded");
        Self::from_save(save, config)
    }

    fn city_index(&self, name: &str) -> Result<usize> {
        self.cities
            .iter()
            .position(|city| city.name == name)
            .ok_or_else(|| {
                WorldError::UnknownCity {
                    name: name.to_string(),
                }
                .into()
            })
    }
}
