//! Narrative text generation.
//!
//! Dialogue and flavour text come from an external generator configured by
//! the saved [`GenerationConfig`]. The runtime only sees this trait; no
//! network client ships with the crate.

use game_core::GenerationConfig;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NarrativeError {
    #[error("narrative provider unavailable: {0}")]
    Unavailable(String),

    #[error("narrative provider rejected the prompt: {0}")]
    Rejected(String),
}

/// Synchronous text generator.
pub trait NarrativeProvider {
    fn generate_text(
        &mut self,
        prompt: &str,
        config: &GenerationConfig,
    ) -> Result<String, NarrativeError>;
}

/// Provider that never says anything.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentNarrator;

impl NarrativeProvider for SilentNarrator {
    fn generate_text(
        &mut self,
        _prompt: &str,
        _config: &GenerationConfig,
    ) -> Result<String, NarrativeError> {
        Ok(String::new())
    }
}

/// Provider cycling through a fixed set of lines.
#[derive(Clone, Debug)]
pub struct CannedNarrator {
    lines: Vec<String>,
    next: usize,
}

impl CannedNarrator {
    pub fn new(lines: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            next: 0,
        }
    }
}

impl NarrativeProvider for CannedNarrator {
    fn generate_text(
        &mut self,
        _prompt: &str,
        _config: &GenerationConfig,
    ) -> Result<String, NarrativeError> {
        if self.lines.is_empty() {
            return Err(NarrativeError::Unavailable("no canned lines".to_string()));
        }
        let line = self.lines[self.next % self.lines.len()].clone();
        self.next = self.next.wrapping_add(1);
        Ok(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canned_lines_cycle() {
        let mut narrator = CannedNarrator::new(["one", "two"]);
        let config = GenerationConfig::default();
        let said: Vec<_> = (0..3)
            .map(|_| narrator.generate_text("hi", &config).unwrap())
            .collect();
        assert_eq!(said, ["one", "two", "one"]);
    }

    #[test]
    fn empty_canned_narrator_is_unavailable() {
        let mut narrator = CannedNarrator::new(Vec::<String>::new());
        assert!(
            narrator
                .generate_text("hi", &GenerationConfig::default())
                .is_err()
        );
    }
}
