use super::fixtures::{checkerboard, solid, BLUE, GREEN, RED};
use pixeldupe::duplicates::{DuplicateFinder, FinderConfig};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_duplicate_across_directories() {
    let a = tempdir().unwrap();
    let b = tempdir().unwrap();
    let in_a = checkerboard(a.path(), "photo.png", 4);
    let in_b = b.path().join("copy.png");
    fs::copy(&in_a, &in_b).unwrap();
    let only_b = solid(b.path(), "unique.png", BLUE);

    let outcome = DuplicateFinder::with_defaults()
        .find_duplicates(&[a.path(), b.path()])
        .unwrap();

    assert_eq!(outcome.report.len(), 1);
    assert_eq!(outcome.report.groups()[0].paths, vec![in_a, in_b]);
    assert!(!outcome.report.contains_path(&only_b));
}

#[test]
fn test_groups_mix_within_and_across() {
    let a = tempdir().unwrap();
    let b = tempdir().unwrap();
    let a1 = solid(a.path(), "1.png", RED);
    let a2 = solid(a.path(), "2.png", RED);
    let b1 = solid(b.path(), "1.png", RED);
    let g1 = solid(b.path(), "g1.png", GREEN);
    let g2 = solid(b.path(), "g2.png", GREEN);

    let outcome = DuplicateFinder::with_defaults()
        .find_duplicates(&[a.path(), b.path()])
        .unwrap();

    assert_eq!(outcome.report.len(), 2);
    assert_eq!(outcome.report.group_of(&b1).unwrap().paths, vec![a1, a2, b1]);
    assert_eq!(outcome.report.group_of(&g1).unwrap().paths, vec![g1, g2]);
}

#[test]
fn test_batches_reported_per_directory() {
    let a = tempdir().unwrap();
    let b = tempdir().unwrap();
    solid(a.path(), "1.png", RED);
    solid(b.path(), "1.png", RED);
    solid(b.path(), "2.png", GREEN);
    solid(b.path(), "3.png", BLUE);

    let finder = DuplicateFinder::new(FinderConfig::default().with_parallel_threshold(2));
    let outcome = finder.find_duplicates(&[a.path(), b.path()]).unwrap();

    let batches = &outcome.summary.batches;
    assert_eq!(batches.len(), 2);
    assert_eq!(batches[0].directory, a.path());
    assert_eq!(batches[0].files, 1);
    assert!(!batches[0].strategy.is_parallel());
    assert_eq!(batches[1].files, 3);
    assert!(batches[1].strategy.is_parallel());
    assert_eq!(outcome.summary.total_files, 4);
}

#[test]
fn test_same_directory_twice() {
    let a = tempdir().unwrap();
    let img = solid(a.path(), "only.png", RED);

    let outcome = DuplicateFinder::with_defaults()
        .find_duplicates(&[a.path(), a.path()])
        .unwrap();

    assert_eq!(outcome.report.len(), 1);
    assert_eq!(outcome.report.groups()[0].paths, vec![img.clone(), img]);
}
