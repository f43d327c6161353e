use super::fixtures::{corrupt, solid, GREEN, RED};
use clap::Parser;
use pixeldupe::cli::Cli;
use pixeldupe::error::ExitCode;
use pixeldupe::run_app;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn run(args: &[&str], config: &Path) -> anyhow::Result<ExitCode> {
    let mut argv = vec!["pixeldupe", "-q"];
    argv.extend_from_slice(args);
    if argv.contains(&"scan") {
        argv.extend(["--no-progress", "--config", config.to_str().unwrap()]);
    }
    run_app(Cli::try_parse_from(argv).unwrap())
}

fn empty_config(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("config.toml");
    fs::write(&path, "").unwrap();
    path
}

#[test]
fn test_exit_code_duplicates_found() {
    let dir = tempdir().unwrap();
    let images = dir.path().join("images");
    fs::create_dir(&images).unwrap();
    solid(&images, "a.png", RED);
    solid(&images, "b.png", RED);
    let config = empty_config(dir.path());

    let code = run(&["scan", images.to_str().unwrap(), "-o", "json"], &config).unwrap();
    assert_eq!(code, ExitCode::Success);
}

#[test]
fn test_exit_code_no_duplicates() {
    let dir = tempdir().unwrap();
    let images = dir.path().join("images");
    fs::create_dir(&images).unwrap();
    solid(&images, "a.png", RED);
    solid(&images, "b.png", GREEN);
    let config = empty_config(dir.path());

    let code = run(&["scan", images.to_str().unwrap(), "-o", "csv"], &config).unwrap();
    assert_eq!(code, ExitCode::NoDuplicates);
}

#[test]
fn test_exit_code_partial_success() {
    let dir = tempdir().unwrap();
    let images = dir.path().join("images");
    fs::create_dir(&images).unwrap();
    solid(&images, "a.png", RED);
    solid(&images, "b.png", RED);
    corrupt(&images, "c.png");
    let config = empty_config(dir.path());

    let code = run(&["scan", images.to_str().unwrap()], &config).unwrap();
    assert_eq!(code, ExitCode::PartialSuccess);
}

#[test]
fn test_missing_directory_is_error() {
    let dir = tempdir().unwrap();
    let config = empty_config(dir.path());
    let missing = dir.path().join("nope");

    let err = run(&["scan", missing.to_str().unwrap()], &config).unwrap_err();
    assert!(format!("{:#}", err).contains("nope"));
}

#[test]
fn test_hash_command() {
    let dir = tempdir().unwrap();
    let good = solid(dir.path(), "a.png", RED);
    let bad = corrupt(dir.path(), "b.png");
    let config = empty_config(dir.path());

    let ok = run(&["hash", good.to_str().unwrap()], &config).unwrap();
    assert_eq!(ok, ExitCode::Success);

    let mixed = run(
        &["hash", good.to_str().unwrap(), bad.to_str().unwrap()],
        &config,
    )
    .unwrap();
    assert_eq!(mixed, ExitCode::PartialSuccess);

    let failed = run(&["hash", bad.to_str().unwrap()], &config).unwrap();
    assert_eq!(failed, ExitCode::GeneralError);
}
