use clap::Parser;
use pixeldupe::cli::{Cli, Commands, OutputFormat};
use pixeldupe::config::Config;
use std::fs;
use tempfile::tempdir;

fn write_config(dir: &std::path::Path, body: &str) -> std::path::PathBuf {
    let path = dir.join("pixeldupe.toml");
    fs::write(&path, body).unwrap();
    path
}

#[test]
fn test_file_values_are_loaded() {
    let dir = tempdir().unwrap();
    let path = write_config(
        dir.path(),
        "parallel_threshold = 25\nthreads = 2\noutput = \"json\"\nprogress = false\n",
    );

    let config = Config::load(Some(&path)).unwrap();

    assert_eq!(config.parallel_threshold, 25);
    assert_eq!(config.threads, Some(2));
    assert_eq!(config.output, OutputFormat::Json);
    assert!(!config.progress);
}

#[test]
fn test_partial_file_keeps_defaults() {
    let dir = tempdir().unwrap();
    let path = write_config(dir.path(), "threads = 6\n");

    let config = Config::load(Some(&path)).unwrap();

    assert_eq!(config.parallel_threshold, 1000);
    assert_eq!(config.threads, Some(6));
    assert_eq!(config.output, OutputFormat::Text);
}

#[test]
fn test_flags_override_file() {
    let dir = tempdir().unwrap();
    let path = write_config(dir.path(), "parallel_threshold = 25\noutput = \"csv\"\n");
    let path_str = path.to_str().unwrap();

    let cli = Cli::try_parse_from([
        "pixeldupe",
        "scan",
        "/photos",
        "--config",
        path_str,
        "--threshold",
        "3",
    ])
    .unwrap();
    let Commands::Scan(args) = cli.command else {
        panic!("Expected Scan command");
    };

    let config = Config::load(args.config.as_deref())
        .unwrap()
        .with_scan_args(&args);

    assert_eq!(config.parallel_threshold, 3);
    assert_eq!(config.output, OutputFormat::Csv);
    assert_eq!(config.finder_config().parallel_threshold, 3);
}

#[test]
fn test_malformed_file_is_an_error() {
    let dir = tempdir().unwrap();
    let path = write_config(dir.path(), "parallel_threshold = [1, 2\n");

    assert!(Config::load(Some(&path)).is_err());
}
