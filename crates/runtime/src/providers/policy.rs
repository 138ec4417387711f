//! Built-in policy for AI-controlled players and wild creatures.

use game_core::{Action, ActionCancelled, ActionProvider, ActionRequest, SkillKind};

/// Rule-based policy: patch up when hurt, otherwise hit as hard as possible.
///
/// 1. Below `heal_threshold_percent` of max health: a healing skill if the
///    combatant has one, else `NORMAL HEAL`.
/// 2. A damaging skill whose recoil would not knock the user out.
/// 3. `NORMAL ATTACK`.
#[derive(Clone, Copy, Debug)]
pub struct AiPolicyProvider {
    heal_threshold_percent: u8,
}

impl AiPolicyProvider {
    pub const DEFAULT_HEAL_THRESHOLD_PERCENT: u8 = 30;

    pub fn new(heal_threshold_percent: u8) -> Self {
        Self {
            heal_threshold_percent: heal_threshold_percent.min(100),
        }
    }

    /// Picks an action without side effects.
    pub fn choose(&self, request: &ActionRequest<'_>) -> Action {
        let actor = request.actor;
        let max_health = u64::from(actor.stats.max_health);
        let hurt = u64::from(actor.health()) * 100 < max_health * u64::from(self.heal_threshold_percent);

        match &actor.skill {
            Some(skill) if hurt && matches!(skill.kind, SkillKind::Heal { .. }) => Action::UseSkill,
            _ if hurt && actor.stats.heal_power > 0 => Action::NormalHeal,
            Some(skill)
                if matches!(skill.kind, SkillKind::Damage { .. }) && skill.recoil < actor.health() =>
            {
                Action::UseSkill
            }
            _ => Action::NormalAttack,
        }
    }
}

impl Default for AiPolicyProvider {
    fn default() -> Self {
        Self::new(Self::DEFAULT_HEAL_THRESHOLD_PERCENT)
    }
}

impl ActionProvider for AiPolicyProvider {
    fn provide_action(&mut self, request: &ActionRequest<'_>) -> Result<Action, ActionCancelled> {
        let action = self.choose(request);
        tracing::trace!(
            combatant = %request.actor.name,
            health = request.actor.health(),
            action = %action,
            "ai policy decision"
        );
        Ok(action)
    }
}
