//! Action provider implementations for different combatant behaviors.

pub mod policy;
pub mod scripted;

pub use policy::AiPolicyProvider;
pub use scripted::ScriptedActionProvider;
