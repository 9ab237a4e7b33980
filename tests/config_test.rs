use std::io::Write;

use rov_qr_mission::{Config, ConfigError};

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[tracker]
max_distance = 60.0
max_frames_unseen = 30

[mission]
phase1_vocabulary = ["port", "starboard"]
vote_target = 3

[runtime]
frame_backoff_ms = 5
"#
    )
    .unwrap();

    let config = Config::load(file.path()).unwrap();
    assert_eq!(config.tracker.max_distance, 60.0);
    assert_eq!(config.tracker.max_frames_unseen, 30);
    assert_eq!(config.mission.vote_target, 3);
    assert!(config.mission.phase1_vocabulary.contains("starboard"));
    assert!(!config.mission.phase1_vocabulary.contains("go left"));
    assert!(config.mission.phase2_vocabulary.contains("drop left"));
    assert_eq!(config.runtime.frame_backoff_ms, 5);
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::load(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn test_unknown_section_is_fatal() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[controller]\ntype = \"xbox\"").unwrap();
    assert!(matches!(
        Config::load(file.path()),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn test_empty_phase2_vocabulary_is_fatal() {
    let err = Config::from_toml_str("[mission]\nphase2_vocabulary = []\n").unwrap_err();
    assert_eq!(
        err.to_string(),
        "vocabulary `mission.phase2_vocabulary` is empty"
    );
}
