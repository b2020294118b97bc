//! ---
//! ranklog_section: "01-core-functionality"
//! ranklog_subsection: "tests"
//! ranklog_type: "source"
//! ranklog_scope: "code"
//! ranklog_description: "Configuration file discovery and parsing tests."
//! ranklog_version: "v0.0.0-prealpha"
//! ranklog_owner: "tbd"
//! ---
use std::env;
use std::fs;

use ranklog_common::{Error, ManagerConfig, RankSelector, Severity};
use tempfile::tempdir;

#[test]
fn first_existing_candidate_wins() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing.toml");
    let present = dir.path().join("ranklog.toml");
    fs::write(&present, "level = \"debug\"\nranks = \"all\"\n").unwrap();

    let loaded = ManagerConfig::load_from(None, &[&missing, &present]).unwrap();
    assert_eq!(loaded.source.as_deref(), Some(present.as_path()));
    assert_eq!(loaded.config.level, Severity::Debug);
    assert_eq!(loaded.config.ranks, RankSelector::All);
}

#[test]
fn no_candidates_yields_defaults() {
    let dir = tempdir().unwrap();
    let loaded = ManagerConfig::load_from(None, &[dir.path().join("absent.toml")]).unwrap();
    assert!(loaded.source.is_none());
    assert_eq!(loaded.config, ManagerConfig::default());
}

#[test]
fn malformed_file_reports_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(&path, "level = \"screaming\"\n").unwrap();

    let err = ManagerConfig::from_path(&path).unwrap_err();
    match err {
        Error::Config { path: reported, message } => {
            assert_eq!(reported, path);
            assert!(message.contains("screaming"), "{message}");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn override_path_beats_candidates() {
    let dir = tempdir().unwrap();
    let candidate = dir.path().join("candidate.toml");
    let chosen = dir.path().join("chosen.toml");
    fs::write(&candidate, "level = \"debug\"\n").unwrap();
    fs::write(&chosen, "level = \"alert\"\nranks = \"all\"\n").unwrap();

    let loaded =
        ManagerConfig::load_from(Some(chosen.to_str().unwrap()), &[&candidate]).unwrap();
    assert_eq!(loaded.source.as_deref(), Some(chosen.as_path()));
    assert_eq!(loaded.config, ManagerConfig::new(Severity::Alert, RankSelector::All));

    let blank = ManagerConfig::load_from(Some("  "), &[&candidate]).unwrap();
    assert_eq!(blank.source.as_deref(), Some(candidate.as_path()));
}

// Only this test touches the process environment.
#[test]
fn environment_overrides_apply() {
    let dir = tempdir().unwrap();
    let candidate = dir.path().join("candidate.toml");
    let chosen = dir.path().join("chosen.toml");
    fs::write(&candidate, "level = \"debug\"\n").unwrap();
    fs::write(&chosen, "level = \"notice\"\n").unwrap();

    env::set_var(ManagerConfig::ENV_CONFIG_PATH, &chosen);
    let loaded = ManagerConfig::load_with_source(&[&candidate]);
    env::remove_var(ManagerConfig::ENV_CONFIG_PATH);
    let loaded = loaded.unwrap();
    assert_eq!(loaded.source.as_deref(), Some(chosen.as_path()));
    assert_eq!(loaded.config.level, Severity::Notice);

    env::set_var(ManagerConfig::ENV_LEVEL, "crit");
    env::set_var(ManagerConfig::ENV_RANKS, "all");
    let overridden = ManagerConfig::default().apply_env_overrides();
    env::set_var(ManagerConfig::ENV_LEVEL, "loud");
    let rejected = ManagerConfig::default().apply_env_overrides();
    env::remove_var(ManagerConfig::ENV_LEVEL);
    env::remove_var(ManagerConfig::ENV_RANKS);

    assert_eq!(
        overridden.unwrap(),
        ManagerConfig::new(Severity::Crit, RankSelector::All)
    );
    match rejected.unwrap_err() {
        Error::InvalidValue { key, value } => {
            assert_eq!(key, "severity");
            assert_eq!(value, "loud");
        }
        other => panic!("unexpected error {other:?}"),
    }
}
