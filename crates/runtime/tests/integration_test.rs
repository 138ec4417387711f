use game_core::{
    Action, AdventureModeLocation, BattleState, City, CityTile, CombatStats, Direction,
    ElementType, GameConfig, Item, Mission, Npc, Reward, TileFlags,
};
use runtime::{
    AiPolicyProvider, CannedNarrator, GameSession, InMemorySaveRepository, MoveOutcome,
    SaveRepository, ScriptedActionProvider, SessionError,
};
use rust_decimal::Decimal;

fn town() -> City {
    // 3x2 grid: plain row on top with a portal at (2, 0), encounter tiles below.
    let mut rows = vec![
        vec![CityTile::new(), CityTile::new(), CityTile::new()],
        vec![
            CityTile::with_flags(TileFlags::WILD_ENCOUNTERS),
            CityTile::with_flags(TileFlags::WILD_ENCOUNTERS),
            CityTile::with_flags(TileFlags::PORTAL),
        ],
    ];
    rows[0][2].set_portal(true);
    City::from_rows("Pallet Town", rows).expect("town grid is rectangular")
}

fn always_encounter() -> GameConfig {
    let mut config = GameConfig::default();
    config.encounters.wild_encounter_percent = 100;
    config.encounters.wild_stats = CombatStats::new(ElementType::Nature, 10, 1, 1);
    config.starting_stats = CombatStats::new(ElementType::Flame, 100, 20, 10);
    config
}

/// End-to-end adventure: walk into tall grass, win the wild battle, cash
/// the reward, save and resume.
#[test]
fn test_complete_adventure_scenario() {
    // ================================================================
    // PHASE 1: New game
    // ================================================================
    let mut session = GameSession::new_game("Ash", always_encounter()).with_rng_seed(7);
    session.add_city(town()).expect("city should be added");
    session
        .enter_city("Pallet Town", AdventureModeLocation::ORIGIN)
        .expect("origin is inside the town");

    assert_eq!(session.occupants(AdventureModeLocation::ORIGIN), [session.player_id()]);
    assert_eq!(session.player().city.as_deref(), Some("Pallet Town"));

    // ================================================================
    // PHASE 2: Exploration
    // ================================================================
    let outcome = session.move_player(Direction::North).expect("move should resolve");
    assert_eq!(
        outcome,
        MoveOutcome::Blocked {
            attempted: AdventureModeLocation::new(0, -1)
        }
    );
    assert_eq!(session.player().location, AdventureModeLocation::ORIGIN);

    let outcome = session.move_player(Direction::South).expect("move should resolve");
    let MoveOutcome::Moved {
        location,
        portal,
        encounter: Some(creature),
    } = outcome
    else {
        panic!("grass tile with 100% encounter chance must spawn a creature: {outcome:?}");
    };
    assert_eq!(location, AdventureModeLocation::new(0, 1));
    assert!(!portal);
    assert!(session.occupants(AdventureModeLocation::ORIGIN).is_empty());

    // ================================================================
    // PHASE 3: Wild battle
    // ================================================================
    let mut battle = session.wild_battle(creature).expect("battle should start");
    let summary = session
        .resolve_battle(
            &mut battle,
            &mut ScriptedActionProvider::repeat(Action::NormalAttack, 5),
            &mut AiPolicyProvider::default(),
        )
        .expect("battle should resolve");

    assert_eq!(summary.state, BattleState::Player1Won);
    assert_eq!(summary.turns, 1);
    assert_eq!(session.player().exp(), Decimal::from(100_000));
    assert_eq!(session.player().currency(), Decimal::from(5_001_000));

    // ================================================================
    // PHASE 4: Save and resume
    // ================================================================
    let repo = InMemorySaveRepository::new();
    session.save(&repo, "main").expect("save should succeed");

    let resumed = GameSession::load(&repo, "main", always_encounter()).expect("load should succeed");
    assert_eq!(resumed.snapshot(), session.snapshot());
    assert_eq!(resumed.player_id(), session.player_id());
    assert_eq!(resumed.player().location, AdventureModeLocation::new(0, 1));
}

#[test]
fn test_portal_flag_is_reported() {
    let mut config = GameConfig::default();
    config.encounters.wild_encounter_percent = 0;
    let mut session = GameSession::new_game("Ash", config).with_rng_seed(1);
    session.add_city(town()).unwrap();
    session
        .enter_city("Pallet Town", AdventureModeLocation::new(1, 0))
        .unwrap();

    let outcome = session.move_player(Direction::East).unwrap();
    assert_eq!(
        outcome,
        MoveOutcome::Moved {
            location: AdventureModeLocation::new(2, 0),
            portal: true,
            encounter: None
        }
    );

    // Encounter tiles never roll when the chance is zero.
    for direction in [Direction::South, Direction::West, Direction::West] {
        let outcome = session.move_player(direction).unwrap();
        assert!(matches!(outcome, MoveOutcome::Moved { encounter: None, .. }));
    }
}

#[test]
fn test_lost_and_aborted_battles_pay_nothing() {
    let mut config = always_encounter();
    config.starting_stats = CombatStats::new(ElementType::Terra, 10, 1, 1);
    let mut session = GameSession::new_game("Ash", config).with_rng_seed(3);
    let before = session.snapshot();

    let opponent = game_core::Combatant::wild("Brute", CombatStats::new(ElementType::Metal, 500, 50, 1));
    let mut battle = session.wild_battle(opponent.clone()).unwrap();
    let summary = session
        .resolve_battle(
            &mut battle,
            &mut ScriptedActionProvider::repeat(Action::NormalAttack, 10),
            &mut AiPolicyProvider::default(),
        )
        .unwrap();
    assert_eq!(summary.state, BattleState::Player2Won);
    assert_eq!(summary.level_up, None);

    let mut battle = session.wild_battle(opponent).unwrap();
    let summary = session
        .resolve_battle(
            &mut battle,
            &mut ScriptedActionProvider::default(),
            &mut AiPolicyProvider::default(),
        )
        .unwrap();
    assert_eq!(summary.state, BattleState::Aborted);

    assert_eq!(session.snapshot(), before);

    let err = session
        .resolve_battle(
            &mut battle,
            &mut ScriptedActionProvider::default(),
            &mut AiPolicyProvider::default(),
        )
        .unwrap_err();
    assert!(matches!(err, SessionError::Battle(_)));
}

#[test]
fn test_won_battle_pays_only_once() {
    let mut session = GameSession::new_game("Ash", always_encounter()).with_rng_seed(5);
    let wild = game_core::Combatant::wild("Pidgey", CombatStats::new(ElementType::Nature, 10, 1, 1));
    let mut battle = session.wild_battle(wild).unwrap();

    let summary = session
        .resolve_battle(
            &mut battle,
            &mut ScriptedActionProvider::repeat(Action::NormalAttack, 5),
            &mut AiPolicyProvider::default(),
        )
        .unwrap();
    assert_eq!(summary.state, BattleState::Player1Won);
    let after_win = session.snapshot();

    let err = session
        .resolve_battle(
            &mut battle,
            &mut ScriptedActionProvider::repeat(Action::NormalAttack, 5),
            &mut AiPolicyProvider::default(),
        )
        .unwrap_err();
    assert!(matches!(err, SessionError::Battle(_)));
    assert_eq!(session.snapshot(), after_win);
    assert_eq!(session.player().exp(), Decimal::from(100_000));
}

#[test]
fn test_challenge_ai_player() {
    let mut config = GameConfig::default();
    config.starting_stats = CombatStats::new(ElementType::Metal, 100, 60, 10);
    let mut session = GameSession::new_game("Ash", config).with_rng_seed(11);
    session.add_city(town()).unwrap();

    let rival = session
        .spawn_ai_player(
            CombatStats::new(ElementType::Terra, 100, 5, 5),
            "Pallet Town",
            AdventureModeLocation::new(1, 0),
        )
        .unwrap();
    let clerk = session
        .spawn_npc("Clerk", Npc::new(), "Pallet Town", AdventureModeLocation::new(1, 0))
        .unwrap();

    assert!(matches!(
        session.challenge(clerk),
        Err(SessionError::WrongCharacterKind { .. })
    ));

    let mut battle = session.challenge(rival).unwrap();
    let summary = session
        .resolve_battle(
            &mut battle,
            &mut ScriptedActionProvider::repeat(Action::NormalAttack, 5),
            &mut AiPolicyProvider::default(),
        )
        .unwrap();

    // METAL hits TERRA for double damage: 120 per attack.
    assert_eq!(summary.state, BattleState::Player1Won);
    assert_eq!(summary.turns, 1);
    assert_eq!(session.player().exp(), Decimal::from(500_000));
}

#[test]
fn test_despawn_evicts_from_every_tile() {
    let mut session = GameSession::new_game("Ash", GameConfig::default());
    session.add_city(town()).unwrap();
    let location = AdventureModeLocation::new(2, 1);
    let npc = session
        .spawn_npc("Guide", Npc::new(), "Pallet Town", location)
        .unwrap();
    session.enter_city("Pallet Town", location).unwrap();

    assert_eq!(session.occupants(location), [npc, session.player_id()]);

    let removed = session.despawn(npc).unwrap();
    assert_eq!(removed.name, "Guide");
    assert_eq!(session.occupants(location), [session.player_id()]);
    assert!(session.character(npc).is_none());

    assert!(matches!(
        session.despawn(npc),
        Err(SessionError::UnknownCharacter { .. })
    ));
    assert!(matches!(
        session.despawn(session.player_id()),
        Err(SessionError::CannotDespawnPlayer)
    ));
}

#[test]
fn test_world_errors_leave_state_unchanged() {
    let mut session = GameSession::new_game("Ash", GameConfig::default());
    assert!(matches!(
        session.move_player(Direction::East),
        Err(SessionError::NotInCity)
    ));
    assert!(matches!(
        session.enter_city("Atlantis", AdventureModeLocation::ORIGIN),
        Err(SessionError::World(game_core::WorldError::UnknownCity { .. }))
    ));

    session.add_city(town()).unwrap();
    assert!(matches!(
        session.add_city(town()),
        Err(SessionError::DuplicateCity { .. })
    ));
    assert!(matches!(
        session.enter_city("Pallet Town", AdventureModeLocation::new(3, 0)),
        Err(SessionError::World(game_core::WorldError::OutOfBounds { .. }))
    ));
    assert!(session.current_city().is_none());
}

#[test]
fn test_missions_and_shopping() {
    let mut session = GameSession::new_game("Ash", GameConfig::default());
    let mission = Mission::new(
        "Lost Parcel",
        "Bring it back.",
        Reward::new(Decimal::from(1_500_000), Decimal::from(10)).unwrap(),
    );

    let level_up = session.complete_mission(&mission).unwrap();
    assert_eq!((level_up.from, level_up.to), (1, 2));
    assert_eq!(session.player().exp(), Decimal::from(500_000));
    assert!(matches!(
        session.complete_mission(&mission),
        Err(SessionError::Progression(_))
    ));

    let charm = Item::new("Lucky Charm", "", Decimal::from(6_000_000)).unwrap();
    assert!(session.purchase(&charm).is_err());
    assert_eq!(session.player().currency(), Decimal::from(5_000_010));

    let potion = Item::new("Potion", "", Decimal::from(150)).unwrap();
    session.purchase(&potion).unwrap();
    assert_eq!(session.player().inventory(), [potion]);
    assert_eq!(session.player().currency(), Decimal::from(4_999_860));
}

#[test]
fn test_talking_to_npcs_uses_the_narrator() {
    let mut session = GameSession::new_game("Ash", GameConfig::default())
        .with_narrator(CannedNarrator::new(["Welcome to Pallet Town!"]));
    session.add_city(town()).unwrap();
    let npc = session
        .spawn_npc("Mom", Npc::new(), "Pallet Town", AdventureModeLocation::ORIGIN)
        .unwrap();

    let line = session.talk_to(npc).unwrap();
    assert_eq!(line.as_deref(), Some("Welcome to Pallet Town!"));
    assert_eq!(
        session.character(npc).and_then(|c| c.as_npc()).and_then(|n| n.dialogue.as_deref()),
        Some("Welcome to Pallet Town!")
    );
}

#[test]
fn test_failing_narrator_is_not_fatal() {
    let mut session = GameSession::new_game("Ash", GameConfig::default())
        .with_narrator(CannedNarrator::new(Vec::<String>::new()));
    assert_eq!(session.narrate("Describe the sky."), None);

    session.add_city(town()).unwrap();
    let npc = session
        .spawn_npc(
            "Old Man",
            Npc::with_dialogue("Zzz..."),
            "Pallet Town",
            AdventureModeLocation::ORIGIN,
        )
        .unwrap();
    assert_eq!(session.talk_to(npc).unwrap().as_deref(), Some("Zzz..."));
}

#[test]
fn test_empty_repository_slot() {
    let repo = InMemorySaveRepository::new();
    assert!(!repo.exists("main"));
    assert!(matches!(
        GameSession::load(&repo, "main", GameConfig::default()),
        Err(SessionError::Repository(runtime::RepositoryError::SlotNotFound(_)))
    ));
}
