//! Interactive game loop.
//!
//! The title screen offers `NEW GAME` and `LOAD GAME`; afterwards the player
//! explores cities one command at a time. Session errors are reported and the
//! loop continues, I/O errors end it.

use std::io::{BufRead, Write};

use anyhow::{Result, anyhow};
use game_core::{
    AdventureModeLocation, Battle, BattleState, CharacterId, Combatant, LevelUp, Npc,
};
use runtime::{
    AiPolicyProvider, GameSession, MoveOutcome, SaveRepository, SessionError,
};

use crate::command::{Command, HELP};
use crate::console::{Console, ConsoleActionProvider};
use crate::content::GameContent;
use crate::view;

enum Flow {
    Continue,
    Quit,
}

pub struct App<R, W> {
    content: GameContent,
    repo: Box<dyn SaveRepository>,
    slot: String,
    rng_seed: Option<u64>,
    console: Console<R, W>,
}

impl<R: BufRead, W: Write> App<R, W> {
    pub fn new(
        content: GameContent,
        repo: Box<dyn SaveRepository>,
        slot: impl Into<String>,
        console: Console<R, W>,
    ) -> Self {
        Self {
            content,
            repo,
            slot: slot.into(),
            rng_seed: None,
            console,
        }
    }

    #[must_use]
    pub fn with_rng_seed(mut self, seed: Option<u64>) -> Self {
        self.rng_seed = seed;
        self
    }

    pub fn run(&mut self) -> Result<()> {
        let Some(mut session) = self.title_screen()? else {
            return Ok(());
        };
        self.populate(&mut session)?;

        self.console.say(format_args!(
            "Welcome, {}! Type HELP for a list of commands.",
            session.trainer_name()
        ))?;
        self.show_map(&session)?;

        while let Some(line) = self.console.prompt("> ")? {
            if line.is_empty() {
                continue;
            }
            let command = match line.parse::<Command>() {
                Ok(command) => command,
                Err(error) => {
                    self.console.say(error)?;
                    continue;
                }
            };

            match self.execute(&mut session, command) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => break,
                Err(error) => match error.downcast::<SessionError>() {
                    Ok(error) => {
                        tracing::warn!(%error, severity = ?error.severity(), "command failed");
                        self.console.say(error)?;
                    }
                    Err(error) => return Err(error),
                },
            }
        }

        self.console.say("Goodbye!")?;
        Ok(())
    }

    // ===== startup =====

    fn title_screen(&mut self) -> Result<Option<GameSession>> {
        self.console
            .say("Enter \"NEW GAME\" to create new saved game data.")?;
        self.console
            .say("Enter \"LOAD GAME\" to load existing saved game data.")?;

        loop {
            let Some(choice) = self.console.prompt("What do you want to do? ")? else {
                return Ok(None);
            };

            match choice.to_ascii_uppercase().as_str() {
                "NEW GAME" => return self.new_game(),
                "LOAD GAME" => {
                    match GameSession::load(self.repo.as_ref(), &self.slot, self.content.config.clone()) {
                        Ok(session) => return Ok(Some(self.seeded(session))),
                        Err(error) => {
                            tracing::warn!(%error, slot = %self.slot, "failed to load saved game");
                            self.console.say(format_args!(
                                "Could not load slot '{}': {error}",
                                self.slot
                            ))?;
                        }
                    }
                }
                _ => self.console.say("Please enter NEW GAME or LOAD GAME.")?,
            }
        }
    }

    fn new_game(&mut self) -> Result<Option<GameSession>> {
        loop {
            let Some(name) = self.console.prompt("What is your name? ")? else {
                return Ok(None);
            };
            if !name.is_empty() {
                let session = GameSession::new_game(name, self.content.config.clone());
                return Ok(Some(self.seeded(session)));
            }
        }
    }

    fn seeded(&self, session: GameSession) -> GameSession {
        match self.rng_seed {
            Some(seed) => session.with_rng_seed(seed),
            None => session,
        }
    }

    /// Loads every city, places a guide at each origin and a rival trainer
    /// in each far corner, then drops the player into the saved city or,
    /// failing that, at the origin of the first one.
    fn populate(&mut self, session: &mut GameSession) -> Result<()> {
        let rival_stats = self.content.config.encounters.wild_stats;

        for city in &self.content.cities {
            session.add_city(city.clone())?;

            let guide = Npc::with_dialogue(format!("Welcome to {}!", city.name));
            session.spawn_npc("Guide", guide, &city.name, AdventureModeLocation::ORIGIN)?;

            let corner = AdventureModeLocation::new(
                i32::try_from(city.width()).unwrap_or(1) - 1,
                i32::try_from(city.height()).unwrap_or(1) - 1,
            );
            session.spawn_ai_player(rival_stats, &city.name, corner)?;
        }

        // Resume where the snapshot left off when that city still exists.
        let saved = session.player();
        let resumed = saved
            .city
            .as_deref()
            .and_then(|name| self.content.cities.iter().find(|city| city.name == name))
            .filter(|city| city.contains(saved.location.tile_x, saved.location.tile_y))
            .map(|city| (city, saved.location));
        let (city, start) = match resumed {
            Some(resumed) => resumed,
            None => {
                let first = self
                    .content
                    .cities
                    .first()
                    .ok_or_else(|| anyhow!("no cities to start in"))?;
                (first, AdventureModeLocation::ORIGIN)
            }
        };
        session.enter_city(&city.name, start)?;
        Ok(())
    }

    // ===== commands =====

    fn execute(&mut self, session: &mut GameSession, command: Command) -> Result<Flow> {
        match command {
            Command::Move(direction) => match session.move_player(direction)? {
                MoveOutcome::Blocked { .. } => self.console.say("You can't go that way.")?,
                MoveOutcome::Moved {
                    location,
                    portal,
                    encounter,
                } => {
                    self.console.say(format_args!("You walk to {location}."))?;
                    if let Some(creature) = encounter {
                        self.fight_wild(session, creature)?;
                    }
                    if portal {
                        self.travel(session)?;
                    }
                }
            },
            Command::Look => self.look(session)?,
            Command::Map => self.show_map(session)?,
            Command::Status => self.status(session)?,
            Command::Talk => self.talk(session)?,
            Command::Challenge => self.challenge(session)?,
            Command::Shop => self.shop()?,
            Command::Buy(name) => self.buy(session, &name)?,
            Command::Missions => self.missions(session)?,
            Command::Chart => self.console.say(view::element_chart())?,
            Command::Save => {
                session.save(self.repo.as_ref(), &self.slot)?;
                self.console
                    .say(format_args!("Game saved to slot '{}'.", self.slot))?;
            }
            Command::Help => self.console.say(HELP)?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn look(&mut self, session: &GameSession) -> Result<()> {
        let others = self.others_here(session);
        if others.is_empty() {
            self.console.say("Nobody else is here.")?;
            return Ok(());
        }
        for id in others {
            if let Some(character) = session.character(id) {
                self.console.say(format_args!(
                    "{} ({}) is here.",
                    character.name,
                    character.kind.as_str()
                ))?;
            }
        }
        Ok(())
    }

    fn show_map(&mut self, session: &GameSession) -> Result<()> {
        match session.current_city() {
            Some(city) => self
                .console
                .say(view::city_map(city, session.player().location))?,
            None => self.console.say("You are not in a city.")?,
        }
        Ok(())
    }

    fn status(&mut self, session: &GameSession) -> Result<()> {
        let player = session.player();
        let stats = &player.stats;
        let skill = player
            .skill
            .as_ref()
            .map_or("none", |skill| skill.name.as_str());

        self.console.say(format_args!(
            "{}\nLevel {} ({} / {} EXP)\nCurrency: {}\nElement: {}  HP: {}  ATK: {}  HEAL: {}\nSkill: {}\nItems: {}",
            session.trainer_name().to_uppercase(),
            player.level(),
            player.exp(),
            player.required_exp(),
            player.currency(),
            stats.element,
            stats.max_health,
            stats.attack,
            stats.heal_power,
            skill,
            player.inventory().len(),
        ))?;
        Ok(())
    }

    fn talk(&mut self, session: &mut GameSession) -> Result<()> {
        let Some(npc) = self.find_here(session, |c| c.as_npc().is_some()) else {
            self.console.say("There is nobody to talk to here.")?;
            return Ok(());
        };
        let name = session.name_of(npc).unwrap_or("???").to_string();
        match session.talk_to(npc)? {
            Some(line) => self.console.say(format_args!("{name}: \"{line}\""))?,
            None => self.console.say(format_args!("{name} has nothing to say."))?,
        }
        Ok(())
    }

    fn challenge(&mut self, session: &mut GameSession) -> Result<()> {
        let Some(rival) = self.find_here(session, |c| c.is_ai_controlled()) else {
            self.console.say("There is no trainer to challenge here.")?;
            return Ok(());
        };
        let battle = session.challenge(rival)?;
        self.console.say(format_args!(
            "{} accepts your challenge!",
            battle.player2().name
        ))?;
        self.fight(session, battle)
    }

    fn fight_wild(&mut self, session: &mut GameSession, creature: Combatant) -> Result<()> {
        self.console
            .say(format_args!("A wild {} appeared!", creature.name))?;
        let battle = session.wild_battle(creature)?;
        self.fight(session, battle)
    }

    fn fight(&mut self, session: &mut GameSession, mut battle: Battle) -> Result<()> {
        let summary = {
            let mut player = ConsoleActionProvider::new(&mut self.console);
            session.resolve_battle(&mut battle, &mut player, &mut AiPolicyProvider::default())?
        };

        let verdict = match summary.state {
            BattleState::Player1Won => "You won the battle!",
            BattleState::Player2Won => "You lost the battle.",
            BattleState::Draw => "The battle ended in a draw.",
            BattleState::Aborted => "You ran away.",
            BattleState::NotStarted | BattleState::InProgress => "The battle was interrupted.",
        };
        self.console
            .say(format_args!("{verdict} ({} turns)", summary.turns))?;

        if summary.state == BattleState::Player1Won {
            let reward = battle.reward();
            self.console.say(format_args!(
                "You gained {} EXP and {} coins.",
                reward.exp(),
                reward.currency()
            ))?;
        }
        if let Some(level_up) = summary.level_up.filter(LevelUp::leveled_up) {
            self.console
                .say(format_args!("Level up! You are now level {}.", level_up.to))?;
        }
        Ok(())
    }

    fn travel(&mut self, session: &mut GameSession) -> Result<()> {
        let cities = session.cities();
        let Some(current) = session
            .current_city()
            .and_then(|city| cities.iter().position(|c| c.name == city.name))
        else {
            return Ok(());
        };
        let next = (current + 1) % cities.len();
        let Some(target) = cities.get(next).filter(|_| next != current) else {
            return Ok(());
        };

        let name = target.name.clone();
        let arrival = target
            .portals()
            .first()
            .copied()
            .unwrap_or(AdventureModeLocation::ORIGIN);
        session.enter_city(&name, arrival)?;

        self.console
            .say(format_args!("The portal takes you to {name}."))?;
        self.show_map(session)
    }

    fn shop(&mut self) -> Result<()> {
        if self.content.items.is_empty() {
            self.console.say("The shop is empty.")?;
        }
        for item in &self.content.items {
            self.console.say(format_args!(
                "{:<20} {:>12}  {}",
                item.name(),
                item.cost(),
                item.description()
            ))?;
        }
        Ok(())
    }

    fn buy(&mut self, session: &mut GameSession, name: &str) -> Result<()> {
        let Some(item) = self
            .content
            .items
            .iter()
            .find(|item| item.name().eq_ignore_ascii_case(name))
        else {
            self.console
                .say(format_args!("The shop does not sell '{name}'."))?;
            return Ok(());
        };
        session.purchase(item)?;
        self.console.say(format_args!(
            "You bought {}. {} coins left.",
            item.name(),
            session.player().currency()
        ))?;
        Ok(())
    }

    fn missions(&mut self, session: &GameSession) -> Result<()> {
        for mission in &self.content.missions {
            let mark = if session.player().has_completed(&mission.name) {
                "x"
            } else {
                " "
            };
            self.console.say(format_args!(
                "[{mark}] {}: {} (reward: {} EXP, {} coins)",
                mission.name,
                mission.description,
                mission.clear_reward.exp(),
                mission.clear_reward.currency()
            ))?;
        }
        Ok(())
    }

    fn others_here(&self, session: &GameSession) -> Vec<CharacterId> {
        let player = session.player_id();
        session
            .occupants(session.player().location)
            .into_iter()
            .filter(|id| *id != player)
            .collect()
    }

    fn find_here(
        &self,
        session: &GameSession,
        wanted: impl Fn(&game_core::GameCharacter) -> bool,
    ) -> Option<CharacterId> {
        self.others_here(session)
            .into_iter()
            .find(|id| session.character(*id).is_some_and(&wanted))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use game_core::{City, CityTile, CombatStats, ElementType, GameConfig, Item, TileFlags};
    use runtime::InMemorySaveRepository;
    use rust_decimal::Decimal;

    use super::*;

    fn content() -> GameContent {
        let mut config = GameConfig::default();
        config.encounters.wild_encounter_percent = 100;
        config.encounters.wild_stats = CombatStats::new(ElementType::Nature, 5, 1, 1);
        config.starting_stats = CombatStats::new(ElementType::Flame, 100, 30, 10);

        let home = City::from_rows(
            "Home",
            vec![
                vec![CityTile::new(), CityTile::with_flags(TileFlags::PORTAL)],
                vec![CityTile::with_flags(TileFlags::WILD_ENCOUNTERS), CityTile::new()],
            ],
        )
        .unwrap();
        let away = City::new("Away", 3, 1).unwrap();

        GameContent {
            config,
            cities: vec![home, away],
            items: vec![
                Item::new("Potion", "Heals a bit.", Decimal::from(150)).unwrap(),
                Item::new("Gold Crown", "Shiny.", Decimal::from(9_000_000)).unwrap(),
            ],
            missions: Vec::new(),
        }
    }

    fn play(script: &str) -> (String, Box<dyn SaveRepository>) {
        play_with(Box::new(InMemorySaveRepository::new()), script)
    }

    fn play_with(repo: Box<dyn SaveRepository>, script: &str) -> (String, Box<dyn SaveRepository>) {
        let mut app = App::new(
            content(),
            repo,
            "main",
            Console::new(Cursor::new(script.to_string()), Vec::new()),
        )
        .with_rng_seed(Some(9));
        app.run().unwrap();

        let App { console, repo, .. } = app;
        (String::from_utf8(console.into_output()).unwrap(), repo)
    }

    #[test]
    fn new_game_battle_and_save() {
        let (output, repo) =
            play("NEW GAME\nAsh\nlook\ns\nNORMAL ATTACK\nbuy potion\nsave\nquit\n");

        assert!(output.contains("Welcome, Ash!"));
        assert!(output.contains("Guide (npc) is here."));
        assert!(output.contains("A wild "));
        assert!(output.contains("You won the battle! (1 turns)"));
        assert!(output.contains("You bought Potion."));
        assert!(output.contains("Game saved to slot 'main'."));
        assert!(repo.exists("main"));

        let saved = repo.load("main").unwrap();
        assert_eq!(saved.trainer_name, "Ash");
        assert_eq!(saved.player().exp(), Decimal::from(100_000));
        assert_eq!(saved.player().inventory().len(), 1);
    }

    #[test]
    fn load_game_from_empty_slot_reprompts() {
        let (output, _) = play("LOAD GAME\nNEW GAME\nMisty\nquit\n");
        assert!(output.contains("Could not load slot 'main'"));
        assert!(output.contains("Welcome, Misty!"));
    }

    #[test]
    fn portal_moves_to_the_next_city() {
        let (output, _) = play("NEW GAME\nAsh\ne\nmap\nquit\n");
        assert!(output.contains("The portal takes you to Away."));
        assert!(output.contains("Away (3x1)"));
    }

    #[test]
    fn session_errors_do_not_end_the_game() {
        let (output, _) = play("NEW GAME\nAsh\nbuy gold crown\ndance\nn\nquit\n");
        assert!(output.contains("insufficient funds: cost 9000000, balance 5000000"));
        assert!(output.contains("unknown command 'dance'"));
        assert!(output.contains("You can't go that way."));
        assert!(output.contains("Goodbye!"));
    }

    #[test]
    fn loading_resumes_in_the_saved_city() {
        let (_, repo) = play("NEW GAME\nAsh\ne\nsave\nquit\n");
        let saved = repo.load("main").unwrap();
        assert_eq!(saved.player().city.as_deref(), Some("Away"));

        let (output, _) = play_with(repo, "LOAD GAME\nmap\nquit\n");
        assert!(output.contains("Away (3x1)"));
        assert!(!output.contains("Home (2x2)"));
    }
}
