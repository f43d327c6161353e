use super::fixtures::{corrupt, solid, GREEN, RED};
use pixeldupe::duplicates::{DuplicateFinder, FinderConfig, FinderError};
use pixeldupe::scanner::{FileErrorKind, ScanError};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_corrupt_file_is_skipped() {
    let dir = tempdir().unwrap();
    let a = solid(dir.path(), "a.png", RED);
    let b = solid(dir.path(), "b.png", RED);
    solid(dir.path(), "c.png", GREEN);
    let bad = corrupt(dir.path(), "broken.png");

    let outcome = DuplicateFinder::with_defaults()
        .find_duplicates(&[dir.path()])
        .unwrap();

    assert_eq!(outcome.report.len(), 1);
    assert_eq!(outcome.report.groups()[0].paths, vec![a, b]);
    assert!(!outcome.report.contains_path(&bad));

    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].path, bad);
    assert_eq!(outcome.failures[0].kind, FileErrorKind::UnreadableImage);
    assert_eq!(outcome.summary.failed_files, 1);
    assert_eq!(outcome.summary.fingerprinted_files, 3);
    assert!(!outcome.is_complete());
}

#[test]
fn test_non_image_files_are_skipped() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("notes.txt"), "shopping list").unwrap();
    fs::write(dir.path().join("empty.png"), b"").unwrap();
    solid(dir.path(), "ok.png", RED);

    let outcome = DuplicateFinder::with_defaults()
        .find_duplicates(&[dir.path()])
        .unwrap();

    assert!(outcome.report.is_empty());
    assert_eq!(outcome.failures.len(), 2);
    assert!(outcome
        .failures
        .iter()
        .all(|f| f.kind == FileErrorKind::UnreadableImage));
}

#[test]
fn test_failures_collected_in_parallel_batches() {
    let dir = tempdir().unwrap();
    for i in 0..6 {
        solid(dir.path(), &format!("img{}.png", i), RED);
    }
    for i in 0..3 {
        corrupt(dir.path(), &format!("bad{}.png", i));
    }

    let finder = DuplicateFinder::new(
        FinderConfig::default()
            .with_parallel_threshold(0)
            .with_threads(3),
    );
    let outcome = finder.find_duplicates(&[dir.path()]).unwrap();

    assert_eq!(outcome.failures.len(), 3);
    assert_eq!(outcome.report.len(), 1);
    assert_eq!(outcome.report.groups()[0].len(), 6);
}

#[test]
fn test_missing_directory_is_fatal() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("does-not-exist");

    let result = DuplicateFinder::with_defaults().find_duplicates(&[missing.as_path()]);

    match result {
        Err(FinderError::Scan(ScanError::DirectoryNotFound(path))) => assert_eq!(path, missing),
        other => panic!("Expected DirectoryNotFound, got {:?}", other.map(|o| o.report)),
    }
}

#[test]
fn test_file_instead_of_directory_is_fatal() {
    let dir = tempdir().unwrap();
    let file = solid(dir.path(), "single.png", RED);

    let result = DuplicateFinder::with_defaults().find_duplicates(&[file.as_path()]);

    assert!(matches!(result, Err(FinderError::Scan(_))));
}
