use std::fs;
use std::str::FromStr;

use game_core::{
    CombatStats, ElementType, GameCharacter, GameConfig, GenerationConfig, Item, Player,
    ProgressionRules, Reward, SavedGameData, SkillEffect,
};
use runtime::repository::codec::{FORMAT_VERSION, HEADER_LEN, MAGIC};
use runtime::{FileSaveRepository, GameSession, RepositoryError, SaveRepository, SessionError};
use rust_decimal::Decimal;

fn decimal(value: &str) -> Decimal {
    Decimal::from_str(value).expect("valid decimal literal")
}

fn seasoned_snapshot() -> SavedGameData {
    let rules = ProgressionRules {
        starting_required_exp: decimal("1000000000"),
        ..ProgressionRules::default()
    };
    let mut player = Player::new(&rules, CombatStats::new(ElementType::Light, 240, 35, 18))
        .with_skill(SkillEffect::damage("Sunbeam", 70, None).with_recoil(12));
    player
        .apply_reward(
            &Reward::new(decimal("123456789.987654321"), Decimal::ZERO).expect("valid reward"),
            &rules,
        )
        .expect("reward below the first level threshold");
    player
        .purchase(&Item::new("Potion", "Restores a little health.", decimal("150.25")).expect("valid item"))
        .expect("starting currency covers a potion");

    let generation = GenerationConfig {
        temperature: 0.7,
        top_p: 0.9,
        top_k: 40.0,
        max_output_tokens: 512,
    };
    SavedGameData::new("Red", generation, GameCharacter::player("Red", player))
        .expect("player character is valid")
}

#[test]
fn test_snapshot_survives_file_round_trip() {
    let dir = tempfile::tempdir().expect("temp dir");
    let repo = FileSaveRepository::new(dir.path()).expect("repository");
    let snapshot = seasoned_snapshot();

    repo.save("campaign-1", &snapshot).expect("save");
    let loaded = repo.load("campaign-1").expect("load");

    assert_eq!(loaded, snapshot);
    assert_eq!(loaded.player().exp(), decimal("123456789.987654321"));
    assert_eq!(loaded.player().currency(), decimal("4999849.75"));
    assert_eq!(loaded.player().inventory()[0].cost(), decimal("150.25"));
    assert_eq!(loaded.generation.temperature, 0.7);
    assert_eq!(loaded.player_id(), snapshot.player_id());
}

#[test]
fn test_session_resumes_from_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let repo = FileSaveRepository::new(dir.path()).expect("repository");

    let session = GameSession::from_save(seasoned_snapshot(), GameConfig::default()).expect("session");
    session.save(&repo, "main").expect("save");

    let resumed = GameSession::load(&repo, "main", GameConfig::default()).expect("load");
    assert_eq!(resumed.trainer_name(), "Red");
    assert_eq!(resumed.snapshot(), session.snapshot());
    assert_eq!(repo.list_slots().expect("list"), ["main"]);
}

#[test]
fn test_overwriting_a_slot_keeps_the_latest_snapshot() {
    let dir = tempfile::tempdir().expect("temp dir");
    let repo = FileSaveRepository::new(dir.path()).expect("repository");

    let first = SavedGameData::new_game("Blue", &GameConfig::default());
    let second = seasoned_snapshot();
    repo.save("main", &first).expect("first save");
    repo.save("main", &second).expect("second save");

    assert_eq!(repo.load("main").expect("load"), second);
}

#[test]
fn test_corrupted_files_are_rejected() {
    let dir = tempfile::tempdir().expect("temp dir");
    let repo = FileSaveRepository::new(dir.path()).expect("repository");
    repo.save("main", &seasoned_snapshot()).expect("save");
    let path = repo.slot_path("main").expect("slot path");
    let pristine = fs::read(&path).expect("read save");

    // Flipped payload byte fails the checksum.
    let mut bytes = pristine.clone();
    let last = bytes.len() - 1;
    bytes[last] ^= 0xFF;
    fs::write(&path, &bytes).expect("write");
    assert!(matches!(repo.load("main"), Err(RepositoryError::CorruptedData(_))));

    // Truncated payload no longer matches the declared length.
    fs::write(&path, &pristine[..pristine.len() - 3]).expect("write");
    assert!(matches!(repo.load("main"), Err(RepositoryError::CorruptedData(_))));

    // Text that is not a save at all.
    fs::write(&path, b"definitely not a save file, just some text").expect("write");
    assert!(matches!(repo.load("main"), Err(RepositoryError::CorruptedData(_))));

    fs::write(&path, b"").expect("write");
    assert!(matches!(repo.load("main"), Err(RepositoryError::CorruptedData(_))));
}

#[test]
fn test_future_format_version_is_unsupported() {
    let dir = tempfile::tempdir().expect("temp dir");
    let repo = FileSaveRepository::new(dir.path()).expect("repository");
    repo.save("main", &seasoned_snapshot()).expect("save");
    let path = repo.slot_path("main").expect("slot path");

    let mut bytes = fs::read(&path).expect("read save");
    assert_eq!(&bytes[..MAGIC.len()], MAGIC);
    assert!(bytes.len() > HEADER_LEN);
    let version = FORMAT_VERSION + 1;
    bytes[MAGIC.len()..MAGIC.len() + 2].copy_from_slice(&version.to_le_bytes());
    fs::write(&path, &bytes).expect("write");

    match repo.load("main") {
        Err(RepositoryError::UnsupportedVersion { found, supported }) => {
            assert_eq!(found, FORMAT_VERSION + 1);
            assert_eq!(supported, FORMAT_VERSION);
        }
        other => panic!("expected unsupported version, got {other:?}"),
    }

    assert!(matches!(
        GameSession::load(&repo, "main", GameConfig::default()),
        Err(SessionError::Repository(RepositoryError::UnsupportedVersion { .. }))
    ));
}

#[test]
fn test_invalid_slot_names() {
    let dir = tempfile::tempdir().expect("temp dir");
    let repo = FileSaveRepository::new(dir.path()).expect("repository");
    let snapshot = seasoned_snapshot();

    for slot in ["", "../escape", "with space", "a/b"] {
        assert!(
            matches!(repo.save(slot, &snapshot), Err(RepositoryError::InvalidSlot(_))),
            "slot {slot:?} should be rejected"
        );
    }
    assert!(!repo.exists("../escape"));
}
