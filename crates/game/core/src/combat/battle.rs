//! Battle state machine.
//!
//! A [`Battle`] pits `player1` against either a wild creature or another
//! player. Each call to [`Battle::resolve_turn`] asks both sides for an
//! action (player1 first), applies them in order and reports what happened.
//! Health lives on the battle-local [`Combatant`] snapshots, so the
//! characters that entered the battle are never touched.

use std::fmt;

use crate::action::{Action, SkillEffect, SkillKind};
use crate::config::BattleRules;
use crate::state::{CharacterId, CombatStats, GameCharacter, Reward};

use super::damage::{apply_damage, apply_heal, calculate_damage};
use super::error::BattleError;
use super::provider::{ActionCancelled, ActionProvider, ActionRequest};
use super::result::{ActionEffect, ActionOutcome, TurnReport};

/// Lifecycle of a battle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum BattleState {
    #[default]
    NotStarted,
    InProgress,
    Player1Won,
    Player2Won,
    Draw,
    Aborted,
}

impl BattleState {
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            BattleState::Player1Won
                | BattleState::Player2Won
                | BattleState::Draw
                | BattleState::Aborted
        )
    }
}

/// One of the two sides of a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Player1,
    Player2,
}

impl Side {
    pub const fn opponent(self) -> Side {
        match self {
            Side::Player1 => Side::Player2,
            Side::Player2 => Side::Player1,
        }
    }

    const fn victory(self) -> BattleState {
        match self {
            Side::Player1 => BattleState::Player1Won,
            Side::Player2 => BattleState::Player2Won,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Player1 => f.write_str("player 1"),
            Side::Player2 => f.write_str("player 2"),
        }
    }
}

/// Battle-local snapshot of a fighter.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    id: Option<CharacterId>,
    pub name: String,
    pub stats: CombatStats,
    health: u32,
    pub skill: Option<SkillEffect>,
}

impl Combatant {
    /// Snapshots a player or AI player at full health.
    pub fn from_character(character: &GameCharacter) -> Result<Self, BattleError> {
        let player = character
            .as_player()
            .ok_or(BattleError::NotACombatant {
                character: character.id(),
            })?;
        Ok(Self {
            id: Some(character.id()),
            name: character.name.clone(),
            stats: player.stats,
            health: player.stats.max_health,
            skill: player.skill.clone(),
        })
    }

    /// A creature without a character id, as spawned by wild encounters.
    pub fn wild(name: impl Into<String>, stats: CombatStats) -> Self {
        Self {
            id: None,
            name: name.into(),
            stats,
            health: stats.max_health,
            skill: None,
        }
    }

    #[must_use]
    pub fn with_skill(mut self, skill: SkillEffect) -> Self {
        self.skill = Some(skill);
        self
    }

    /// Overrides the starting health, clamped to `max_health`.
    #[must_use]
    pub fn with_health(mut self, health: u32) -> Self {
        self.health = health.min(self.stats.max_health);
        self
    }

    pub fn id(&self) -> Option<CharacterId> {
        self.id
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn is_defeated(&self) -> bool {
        self.health == 0
    }

    /// Restores up to `amount` health and returns what was actually gained.
    fn heal(&mut self, amount: u32) -> u32 {
        let before = self.health;
        self.health = apply_heal(self.health, amount, self.stats.max_health);
        self.health - before
    }

    /// Removes up to `amount` health and returns what was actually lost.
    fn hurt(&mut self, amount: u32) -> u32 {
        let before = self.health;
        self.health = apply_damage(self.health, amount);
        before - self.health
    }
}

/// Who player1 is fighting.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleMode {
    /// Against a wild creature.
    Wild(Combatant),
    /// Against another player (human or AI).
    Versus(Combatant),
}

impl BattleMode {
    fn combatant(&self) -> &Combatant {
        match self {
            BattleMode::Wild(combatant) | BattleMode::Versus(combatant) => combatant,
        }
    }

    fn combatant_mut(&mut self) -> &mut Combatant {
        match self {
            BattleMode::Wild(combatant) | BattleMode::Versus(combatant) => combatant,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            BattleMode::Wild(_) => "wild",
            BattleMode::Versus(_) => "versus",
        }
    }
}

/// A single battle between two combatants.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Battle {
    player1: Combatant,
    mode: BattleMode,
    state: BattleState,
    turn: u32,
    rules: BattleRules,
    reward: Reward,
}

impl Battle {
    /// Starts a battle against a wild creature.
    pub fn wild(
        player1: Combatant,
        opponent: Combatant,
        rules: BattleRules,
        reward: Reward,
    ) -> Result<Self, BattleError> {
        Self::with_mode(player1, BattleMode::Wild(opponent), rules, reward)
    }

    /// Starts a player-versus-player battle.
    pub fn versus(
        player1: Combatant,
        player2: Combatant,
        rules: BattleRules,
        reward: Reward,
    ) -> Result<Self, BattleError> {
        Self::with_mode(player1, BattleMode::Versus(player2), rules, reward)
    }

    fn with_mode(
        player1: Combatant,
        mode: BattleMode,
        rules: BattleRules,
        reward: Reward,
    ) -> Result<Self, BattleError> {
        if let Some(character) = player1.id.filter(|id| Some(*id) == mode.combatant().id) {
            return Err(BattleError::InvalidParticipants { character });
        }

        Ok(Self {
            player1,
            mode,
            state: BattleState::NotStarted,
            turn: 0,
            rules,
            reward,
        })
    }

    pub fn state(&self) -> BattleState {
        self.state
    }

    pub fn mode(&self) -> &BattleMode {
        &self.mode
    }

    /// Number of turns resolved so far.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn rules(&self) -> &BattleRules {
        &self.rules
    }

    /// Reward granted to player1 on victory.
    pub fn reward(&self) -> &Reward {
        &self.reward
    }

    pub fn player1(&self) -> &Combatant {
        &self.player1
    }

    /// The opponent of player1, wild or not.
    pub fn player2(&self) -> &Combatant {
        self.mode.combatant()
    }

    pub fn combatant(&self, side: Side) -> &Combatant {
        match side {
            Side::Player1 => &self.player1,
            Side::Player2 => self.mode.combatant(),
        }
    }

    pub fn winner(&self) -> Option<Side> {
        match self.state {
            BattleState::Player1Won => Some(Side::Player1),
            BattleState::Player2Won => Some(Side::Player2),
            _ => None,
        }
    }

    /// Character id of the winner, when the winner is a character.
    pub fn winner_id(&self) -> Option<CharacterId> {
        self.winner().and_then(|side| self.combatant(side).id)
    }

    /// Ends a battle that has not reached a terminal state yet.
    pub fn abort(&mut self) -> Result<(), BattleError> {
        self.ensure_running()?;
        self.state = BattleState::Aborted;
        Ok(())
    }

    /// Resolves one turn: player1 acts, then player2 unless the battle
    /// already ended.
    ///
    /// A provider returning [`ActionCancelled`] aborts the battle; the
    /// report then carries the cancelling side.
    pub fn resolve_turn(
        &mut self,
        player1: &mut (impl ActionProvider + ?Sized),
        player2: &mut (impl ActionProvider + ?Sized),
    ) -> Result<TurnReport, BattleError> {
        self.ensure_running()?;
        self.state = BattleState::InProgress;
        self.turn = self.turn.saturating_add(1);

        let mut report = TurnReport::new(self.turn);

        // A side that entered the battle already knocked out ends it before
        // anyone acts.
        if let Some(state) = self.knockout_state() {
            self.state = state;
        } else if self.act(Side::Player1, player1, &mut report).is_continue()
            && self.act(Side::Player2, player2, &mut report).is_continue()
            && self.turn >= self.rules.turn_limit()
        {
            self.state = BattleState::Draw;
            report.turn_limit_reached = true;
        }

        report.state = self.state;
        Ok(report)
    }

    /// Resolves turns until the battle reaches a terminal state.
    ///
    /// Always terminates: the turn limit ends undecided battles. Fails with
    /// [`BattleError::BattleAlreadyEnded`] when called on a finished battle.
    pub fn run_to_end(
        &mut self,
        player1: &mut (impl ActionProvider + ?Sized),
        player2: &mut (impl ActionProvider + ?Sized),
    ) -> Result<Vec<TurnReport>, BattleError> {
        self.ensure_running()?;
        let mut reports = Vec::new();
        while !self.state.is_terminal() {
            reports.push(self.resolve_turn(player1, player2)?);
        }
        Ok(reports)
    }

    fn ensure_running(&self) -> Result<(), BattleError> {
        if self.state.is_terminal() {
            return Err(BattleError::BattleAlreadyEnded { state: self.state });
        }
        Ok(())
    }

    /// Asks `side` for an action and applies it.
    ///
    /// Breaks when the battle ended (cancellation or defeat).
    fn act(
        &mut self,
        side: Side,
        provider: &mut (impl ActionProvider + ?Sized),
        report: &mut TurnReport,
    ) -> std::ops::ControlFlow<()> {
        let request = ActionRequest {
            side,
            turn: self.turn,
            actor: self.combatant(side),
            opponent: self.combatant(side.opponent()),
        };

        let action = match provider.provide_action(&request) {
            Ok(action) => action,
            Err(ActionCancelled) => {
                self.state = BattleState::Aborted;
                report.cancelled_by = Some(side);
                return std::ops::ControlFlow::Break(());
            }
        };

        report.actions.push(self.apply(side, action));

        match self.knockout_state() {
            Some(state) => {
                self.state = state;
                std::ops::ControlFlow::Break(())
            }
            None => std::ops::ControlFlow::Continue(()),
        }
    }

    fn apply(&mut self, side: Side, action: Action) -> ActionOutcome {
        let (actor, target) = match side {
            Side::Player1 => (&mut self.player1, self.mode.combatant_mut()),
            Side::Player2 => (self.mode.combatant_mut(), &mut self.player1),
        };

        match action {
            Action::NormalAttack => {
                let damage =
                    calculate_damage(actor.stats.attack, actor.stats.element, target.stats.element);
                target.hurt(damage.amount);
                ActionOutcome::new(side, action, ActionEffect::Damage(damage))
            }
            Action::NormalHeal => {
                let amount = actor.heal(actor.stats.heal_power);
                ActionOutcome::new(side, action, ActionEffect::Heal { amount })
            }
            Action::UseSkill => {
                let Some(skill) = actor.skill.clone() else {
                    return ActionOutcome::new(side, action, ActionEffect::Fizzled);
                };

                let effect = match skill.kind {
                    SkillKind::Damage { power, element } => {
                        let element = element.unwrap_or(actor.stats.element);
                        let damage = calculate_damage(power, element, target.stats.element);
                        target.hurt(damage.amount);
                        ActionEffect::Damage(damage)
                    }
                    SkillKind::Heal { amount } => ActionEffect::Heal {
                        amount: actor.heal(amount),
                    },
                };

                let mut outcome = ActionOutcome::new(side, action, effect);
                outcome.recoil = actor.hurt(skill.recoil);
                outcome.skill = Some(skill.name);
                outcome
            }
        }
    }

    fn knockout_state(&self) -> Option<BattleState> {
        match (self.player1.is_defeated(), self.player2().is_defeated()) {
            (true, true) => Some(BattleState::Draw),
            (false, true) => Some(Side::Player1.victory()),
            (true, false) => Some(Side::Player2.victory()),
            (false, false) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::{ElementType, Multiplier};
    use crate::state::Player;

    fn stats(element: ElementType, health: u32, attack: u32) -> CombatStats {
        CombatStats::new(element, health, attack, 10)
    }

    fn player(name: &str, stats: CombatStats) -> Combatant {
        let character = GameCharacter::player(name, Player::new(&Default::default(), stats));
        Combatant::from_character(&character).unwrap()
    }

    fn always(action: Action) -> impl FnMut(&ActionRequest<'_>) -> Result<Action, ActionCancelled> {
        move |_| Ok(action)
    }

    fn cancel() -> impl FnMut(&ActionRequest<'_>) -> Result<Action, ActionCancelled> {
        |_| Err(ActionCancelled)
    }

    fn versus(p1: Combatant, p2: Combatant) -> Battle {
        Battle::versus(p1, p2, BattleRules::default(), Reward::none()).unwrap()
    }

    #[test]
    fn super_effective_knockout_ends_pvp_battle() {
        let p1 = player("Ash", stats(ElementType::Terra, 20, 1));
        let p2 = player("Gary", stats(ElementType::Metal, 50, 10));
        let mut battle = versus(p1, p2);

        let report = battle
            .resolve_turn(&mut always(Action::NormalHeal), &mut always(Action::NormalAttack))
            .unwrap();

        assert_eq!(battle.state(), BattleState::Player2Won);
        assert_eq!(report.state, BattleState::Player2Won);
        let hit = &report.actions[1];
        assert_eq!(
            hit.effect,
            ActionEffect::Damage(crate::combat::Damage {
                amount: 20,
                multiplier: Multiplier::Double
            })
        );
        assert_eq!(battle.player1().health(), 0);
        assert_eq!(battle.winner(), Some(Side::Player2));
    }

    #[test]
    fn knockout_skips_the_second_action() {
        let p1 = player("Ash", stats(ElementType::Flame, 50, 30));
        let p2 = player("Gary", stats(ElementType::Ice, 40, 100));
        let mut battle = versus(p1, p2);
        let mut p2_asked = false;

        let report = battle
            .resolve_turn(
                &mut always(Action::NormalAttack),
                &mut |_: &ActionRequest<'_>| -> Result<Action, ActionCancelled> {
                    p2_asked = true;
                    Ok(Action::NormalAttack)
                },
            )
            .unwrap();

        assert_eq!(report.actions.len(), 1);
        assert_eq!(battle.state(), BattleState::Player1Won);
        assert!(!p2_asked);
        assert_eq!(battle.player1().health(), 50);
    }

    #[test]
    fn recoil_that_fells_both_sides_is_a_draw() {
        let skill = SkillEffect::damage("Self Destruct", 100, None).with_recoil(100);
        let p1 = player("Ash", stats(ElementType::Terra, 30, 5)).with_skill(skill);
        let p2 = player("Gary", stats(ElementType::Terra, 30, 5));
        let mut battle = versus(p1, p2);

        let report = battle
            .resolve_turn(&mut always(Action::UseSkill), &mut always(Action::NormalAttack))
            .unwrap();

        assert_eq!(report.state, BattleState::Draw);
        assert_eq!(report.actions[0].recoil, 30);
        assert_eq!(report.actions[0].skill.as_deref(), Some("Self Destruct"));
        assert_eq!(battle.winner(), None);
    }

    #[test]
    fn skill_without_definition_fizzles() {
        let mut battle = versus(
            player("Ash", stats(ElementType::Terra, 30, 5)),
            player("Gary", stats(ElementType::Terra, 30, 5)),
        );

        let report = battle
            .resolve_turn(&mut always(Action::UseSkill), &mut always(Action::NormalHeal))
            .unwrap();

        assert_eq!(report.actions[0].effect, ActionEffect::Fizzled);
        assert_eq!(battle.player2().health(), 30);
        assert_eq!(battle.state(), BattleState::InProgress);
    }

    #[test]
    fn skill_element_overrides_user_element() {
        let skill = SkillEffect::damage("Gust", 10, Some(ElementType::Wind));
        let p1 = player("Ash", stats(ElementType::Terra, 30, 5)).with_skill(skill);
        let p2 = player("Gary", stats(ElementType::Wind, 30, 5));
        let mut battle = versus(p1, p2);

        let report = battle
            .resolve_turn(&mut always(Action::UseSkill), &mut always(Action::NormalHeal))
            .unwrap();

        assert_eq!(report.actions[0].damage_dealt(), 20);
    }

    #[test]
    fn heal_is_capped_at_max_health() {
        let mut battle = versus(
            player("Ash", stats(ElementType::Terra, 100, 5)).with_health(95),
            player("Gary", stats(ElementType::Terra, 100, 5)),
        );

        let report = battle
            .resolve_turn(&mut always(Action::NormalHeal), &mut always(Action::NormalHeal))
            .unwrap();

        assert_eq!(report.actions[0].effect, ActionEffect::Heal { amount: 5 });
        assert_eq!(battle.player1().health(), 100);
    }

    #[test]
    fn same_character_cannot_fight_itself() {
        let ash = player("Ash", CombatStats::default());
        let err = Battle::versus(ash.clone(), ash, BattleRules::default(), Reward::none())
            .unwrap_err();
        assert!(matches!(err, BattleError::InvalidParticipants { .. }));
    }

    #[test]
    fn npcs_cannot_fight() {
        let npc = GameCharacter::npc("Clerk", crate::state::Npc::new());
        assert_eq!(
            Combatant::from_character(&npc),
            Err(BattleError::NotACombatant { character: npc.id() })
        );
    }

    #[test]
    fn cancellation_aborts_and_blocks_further_turns() {
        let mut battle = Battle::wild(
            player("Ash", CombatStats::default()),
            Combatant::wild("Rattata", CombatStats::default()),
            BattleRules::default(),
            Reward::none(),
        )
        .unwrap();

        let report = battle
            .resolve_turn(&mut always(Action::NormalAttack), &mut cancel())
            .unwrap();
        assert_eq!(report.state, BattleState::Aborted);
        assert_eq!(report.cancelled_by, Some(Side::Player2));

        let err = battle
            .resolve_turn(&mut always(Action::NormalAttack), &mut always(Action::NormalAttack))
            .unwrap_err();
        assert_eq!(
            err,
            BattleError::BattleAlreadyEnded {
                state: BattleState::Aborted
            }
        );
        assert!(battle.abort().is_err());
    }

    #[test]
    fn abort_before_start() {
        let mut battle = versus(
            player("Ash", CombatStats::default()),
            player("Gary", CombatStats::default()),
        );
        assert_eq!(battle.state(), BattleState::NotStarted);
        battle.abort().unwrap();
        assert_eq!(battle.state(), BattleState::Aborted);
    }

    #[test]
    fn turn_limit_forces_a_draw() {
        let mut battle = Battle::versus(
            player("Ash", CombatStats::default()),
            player("Gary", CombatStats::default()),
            BattleRules::new(3),
            Reward::none(),
        )
        .unwrap();

        let reports = battle
            .run_to_end(&mut always(Action::NormalHeal), &mut always(Action::NormalHeal))
            .unwrap();

        assert_eq!(reports.len(), 3);
        assert!(reports[2].turn_limit_reached);
        assert_eq!(battle.state(), BattleState::Draw);
        assert_eq!(battle.turn(), 3);
    }

    #[test]
    fn wild_battle_runs_until_a_side_falls() {
        let mut battle = Battle::wild(
            player("Ash", stats(ElementType::Flame, 100, 25)),
            Combatant::wild("Oddish", stats(ElementType::Nature, 100, 5)),
            BattleRules::default(),
            Reward::none(),
        )
        .unwrap();

        let reports = battle
            .run_to_end(&mut always(Action::NormalAttack), &mut always(Action::NormalAttack))
            .unwrap();

        // 50 damage per hit against NATURE.
        assert_eq!(reports.len(), 2);
        assert_eq!(battle.state(), BattleState::Player1Won);
        assert_eq!(battle.winner_id(), battle.player1().id());
    }

    #[test]
    fn providers_see_their_own_side() {
        let mut battle = versus(
            player("Ash", CombatStats::default()),
            player("Gary", CombatStats::default()),
        );
        let mut seen = Vec::new();
        let mut recorder = |request: &ActionRequest<'_>| -> Result<Action, ActionCancelled> {
            seen.push((request.side, request.actor.name.clone(), request.turn));
            Ok(Action::NormalHeal)
        };
        battle
            .resolve_turn(&mut always(Action::NormalHeal), &mut recorder)
            .unwrap();
        assert_eq!(seen, vec![(Side::Player2, "Gary".to_string(), 1)]);
    }

    #[test]
    fn finished_battle_cannot_be_run_again() {
        let mut battle = Battle::wild(
            player("Ash", stats(ElementType::Flame, 100, 25)),
            Combatant::wild("Oddish", stats(ElementType::Nature, 50, 5)),
            BattleRules::default(),
            Reward::none(),
        )
        .unwrap();
        battle
            .run_to_end(&mut always(Action::NormalAttack), &mut always(Action::NormalAttack))
            .unwrap();
        assert_eq!(battle.state(), BattleState::Player1Won);

        let err = battle
            .run_to_end(&mut always(Action::NormalAttack), &mut always(Action::NormalAttack))
            .unwrap_err();
        assert_eq!(
            err,
            BattleError::BattleAlreadyEnded {
                state: BattleState::Player1Won
            }
        );
        assert_eq!(battle.turn(), 1);
    }

    #[test]
    fn fainted_opponent_loses_before_anyone_acts() {
        let mut battle = Battle::wild(
            player("Ash", CombatStats::default()),
            Combatant::wild("Magikarp", CombatStats::default()).with_health(0),
            BattleRules::default(),
            Reward::none(),
        )
        .unwrap();
        let mut asked = false;

        let report = battle
            .resolve_turn(
                &mut |_: &ActionRequest<'_>| -> Result<Action, ActionCancelled> {
                    asked = true;
                    Ok(Action::NormalAttack)
                },
                &mut always(Action::NormalAttack),
            )
            .unwrap();

        assert!(!asked);
        assert!(report.actions.is_empty());
        assert_eq!(report.state, BattleState::Player1Won);
        assert_eq!(battle.turn(), 1);
    }

    #[test]
    fn both_sides_fainted_on_entry_is_a_draw() {
        let mut battle = versus(
            player("Ash", CombatStats::default()).with_health(0),
            player("Gary", CombatStats::default()).with_health(0),
        );

        let reports = battle
            .run_to_end(&mut always(Action::NormalHeal), &mut always(Action::NormalHeal))
            .unwrap();

        assert_eq!(reports.len(), 1);
        assert_eq!(battle.state(), BattleState::Draw);
    }
}
