//! Line-oriented terminal I/O and the human battle provider.

use std::fmt::Display;
use std::io::{self, BufRead, Write};

use game_core::{Action, ActionCancelled, ActionProvider, ActionRequest, Combatant};

const ACTION_PROMPT: &str = "Action [NORMAL ATTACK / NORMAL HEAL / USE SKILL / RUN]: ";

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Prints `prompt` and reads one trimmed line. `None` on end of input.
    pub fn prompt(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    pub fn say(&mut self, text: impl Display) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}

/// Asks the player for each battle action.
///
/// Unknown names fall back to `NORMAL ATTACK`. `RUN`, end of input and I/O
/// failures cancel the battle.
pub struct ConsoleActionProvider<'a, R, W> {
    console: &'a mut Console<R, W>,
}

impl<'a, R: BufRead, W: Write> ConsoleActionProvider<'a, R, W> {
    pub fn new(console: &'a mut Console<R, W>) -> Self {
        Self { console }
    }

    fn ask(&mut self, request: &ActionRequest<'_>) -> io::Result<Option<String>> {
        self.console.say(format_args!(
            "-- Turn {} -- {} | {}",
            request.turn,
            health_line(request.actor),
            health_line(request.opponent)
        ))?;
        self.console.prompt(ACTION_PROMPT)
    }
}

impl<R: BufRead, W: Write> ActionProvider for ConsoleActionProvider<'_, R, W> {
    fn provide_action(&mut self, request: &ActionRequest<'_>) -> Result<Action, ActionCancelled> {
        let line = match self.ask(request) {
            Ok(Some(line)) => line,
            Ok(None) => return Err(ActionCancelled),
            Err(error) => {
                tracing::warn!(%error, "failed to read battle action");
                return Err(ActionCancelled);
            }
        };

        if line.eq_ignore_ascii_case("run") {
            return Err(ActionCancelled);
        }

        match Action::parse(&line) {
            Ok(action) => Ok(action),
            Err(error) => {
                tracing::warn!(%error, fallback = %Action::FALLBACK, "unrecognised action name");
                Ok(Action::from_name(&line))
            }
        }
    }
}

fn health_line(combatant: &Combatant) -> String {
    format!(
        "{} [{}] HP {}/{}",
        combatant.name,
        combatant.stats.element,
        combatant.health(),
        combatant.stats.max_health
    )
}
