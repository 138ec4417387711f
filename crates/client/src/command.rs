//! Exploration commands typed at the `>` prompt.
use std::str::FromStr;

use game_core::Direction;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    Look,
    Map,
    Status,
    Talk,
    Challenge,
    Shop,
    Buy(String),
    Missions,
    Chart,
    Save,
    Help,
    Quit,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command '{0}', type HELP for a list")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(verb, rest)| (verb, rest.trim()));

        let command = match verb.to_ascii_lowercase().as_str() {
            "n" | "north" => Command::Move(Direction::North),
            "s" | "south" => Command::Move(Direction::South),
            "e" | "east" => Command::Move(Direction::East),
            "w" | "west" => Command::Move(Direction::West),
            "go" | "move" => {
                let direction = rest
                    .parse()
                    .map_err(|_| CommandError::Usage("GO <north|south|east|west>"))?;
                Command::Move(direction)
            }
            "look" | "l" => Command::Look,
            "map" | "m" => Command::Map,
            "status" | "stats" => Command::Status,
            "talk" => Command::Talk,
            "challenge" | "fight" => Command::Challenge,
            "shop" => Command::Shop,
            "buy" if rest.is_empty() => return Err(CommandError::Usage("BUY <item name>")),
            "buy" => Command::Buy(rest.to_string()),
            "missions" => Command::Missions,
            "chart" => Command::Chart,
            "save" => Command::Save,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            _ => return Err(CommandError::Unknown(line.to_string())),
        };
        Ok(command)
    }
}

pub const HELP: &str = "\
Commands:
  N / S / E / W, GO <direction>   walk one tile
  LOOK                            who is standing here
  MAP                             show the current city
  STATUS                          your trainer card
  TALK                            talk to someone on this tile
  CHALLENGE                       battle a rival trainer on this tile
  SHOP, BUY <item>                browse and buy items
  MISSIONS                        list missions
  CHART                           element matchup chart
  SAVE                            save the game
  QUIT                            leave without saving";
