//! Replays a fixed list of actions.

use std::collections::VecDeque;

use game_core::{Action, ActionCancelled, ActionProvider, ActionRequest};

/// Provider that hands out queued actions in order.
///
/// When the queue runs dry the provider cancels, which aborts the battle.
/// Useful for tests and replays.
#[derive(Clone, Debug, Default)]
pub struct ScriptedActionProvider {
    queue: VecDeque<Action>,
}

impl ScriptedActionProvider {
    pub fn new(actions: impl IntoIterator<Item = Action>) -> Self {
        Self {
            queue: actions.into_iter().collect(),
        }
    }

    /// Queue `action` to be returned `times` times.
    pub fn repeat(action: Action, times: usize) -> Self {
        Self::new(std::iter::repeat_n(action, times))
    }

    pub fn push(&mut self, action: Action) {
        self.queue.push_back(action);
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl ActionProvider for ScriptedActionProvider {
    fn provide_action(&mut self, request: &ActionRequest<'_>) -> Result<Action, ActionCancelled> {
        let action = self.queue.pop_front().ok_or(ActionCancelled)?;
        tracing::trace!(side = %request.side, turn = request.turn, action = %action, "scripted action");
        Ok(action)
    }
}

#[cfg(test)]
mod tests {
    use game_core::{Battle, BattleRules, BattleState, Combatant, CombatStats, Reward};

    use super::*;

    #[test]
    fn exhausted_script_aborts_the_battle() {
        let mut battle = Battle::wild(
            Combatant::wild("A", CombatStats::default()),
            Combatant::wild("B", CombatStats::default()),
            BattleRules::default(),
            Reward::none(),
        )
        .unwrap();
        let mut p1 = ScriptedActionProvider::new([Action::NormalHeal, Action::NormalHeal]);
        let mut p2 = ScriptedActionProvider::repeat(Action::NormalHeal, 10);

        battle.run_to_end(&mut p1, &mut p2).unwrap();

        assert_eq!(battle.state(), BattleState::Aborted);
        assert_eq!(battle.turn(), 3);
        assert_eq!(p1.remaining(), 0);
        assert_eq!(p2.remaining(), 8);
    }
}
