use super::fixtures::{checkerboard, solid, BLUE, GREEN, RED};
use pixeldupe::duplicates::{DuplicateFinder, ExecutionStrategy};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_scan_empty_directory() {
    let dir = tempdir().unwrap();

    let outcome = DuplicateFinder::with_defaults()
        .find_duplicates(&[dir.path()])
        .unwrap();

    assert!(outcome.report.is_empty());
    assert!(outcome.is_complete());
    assert_eq!(outcome.summary.total_files, 0);
    assert_eq!(outcome.summary.duplicate_groups, 0);
}

#[test]
fn test_scan_unique_images() {
    let dir = tempdir().unwrap();
    solid(dir.path(), "red.png", RED);
    solid(dir.path(), "green.png", GREEN);
    solid(dir.path(), "blue.png", BLUE);

    let outcome = DuplicateFinder::with_defaults()
        .find_duplicates(&[dir.path()])
        .unwrap();

    assert!(outcome.report.is_empty());
    assert_eq!(outcome.summary.total_files, 3);
    assert_eq!(outcome.summary.distinct_fingerprints, 3);
}

#[test]
fn test_two_identical_one_distinct() {
    let dir = tempdir().unwrap();
    let a = checkerboard(dir.path(), "a.png", 8);
    let b = dir.path().join("b.png");
    fs::copy(&a, &b).unwrap();
    let c = solid(dir.path(), "c.png", BLUE);

    let outcome = DuplicateFinder::with_defaults()
        .find_duplicates(&[dir.path()])
        .unwrap();

    assert_eq!(outcome.report.len(), 1);
    assert_eq!(outcome.report.groups()[0].paths, vec![a, b]);
    assert!(!outcome.report.contains_path(&c));
    assert_eq!(outcome.summary.duplicate_files, 2);
}

#[test]
fn test_same_pixels_different_container() {
    let dir = tempdir().unwrap();
    let png = checkerboard(dir.path(), "board.png", 16);
    let bmp = dir.path().join("board.bmp");
    image::open(&png).unwrap().save(&bmp).unwrap();

    let outcome = DuplicateFinder::with_defaults()
        .find_duplicates(&[dir.path()])
        .unwrap();

    assert_eq!(outcome.report.len(), 1);
    assert_eq!(outcome.report.groups()[0].len(), 2);
}

#[test]
fn test_red_and_green_are_not_duplicates() {
    let dir = tempdir().unwrap();
    solid(dir.path(), "red.png", RED);
    solid(dir.path(), "green.png", GREEN);

    let outcome = DuplicateFinder::with_defaults()
        .find_duplicates(&[dir.path()])
        .unwrap();

    assert!(outcome.report.is_empty());
}

#[test]
fn test_subdirectories_are_not_scanned() {
    let dir = tempdir().unwrap();
    let sub = dir.path().join("nested");
    fs::create_dir(&sub).unwrap();
    solid(dir.path(), "top.png", RED);
    solid(&sub, "inner.png", RED);

    let outcome = DuplicateFinder::with_defaults()
        .find_duplicates(&[dir.path()])
        .unwrap();

    assert!(outcome.report.is_empty());
    assert_eq!(outcome.summary.total_files, 1);
}

#[test]
fn test_group_order_follows_file_names() {
    let dir = tempdir().unwrap();
    let z1 = solid(dir.path(), "z1.png", GREEN);
    let z2 = solid(dir.path(), "z2.png", GREEN);
    let a1 = solid(dir.path(), "a1.png", RED);
    let a2 = solid(dir.path(), "a2.png", RED);

    let outcome = DuplicateFinder::with_defaults()
        .find_duplicates(&[dir.path()])
        .unwrap();

    let groups = outcome.report.groups();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].paths, vec![a1, a2]);
    assert_eq!(groups[1].paths, vec![z1, z2]);
    assert_eq!(
        outcome.summary.batches[0].strategy,
        ExecutionStrategy::Sequential
    );
}

#[test]
fn test_jpeg_copies_are_grouped() {
    let dir = tempdir().unwrap();
    let png = checkerboard(dir.path(), "board.png", 8);
    let jpg = dir.path().join("board.jpg");
    image::open(&png).unwrap().save(&jpg).unwrap();
    let jpg_copy = dir.path().join("board_copy.jpg");
    fs::copy(&jpg, &jpg_copy).unwrap();

    let outcome = DuplicateFinder::with_defaults()
        .find_duplicates(&[dir.path()])
        .unwrap();

    assert!(outcome.is_complete());
    let group = outcome.report.group_of(&jpg).unwrap();
    assert!(group.paths.contains(&jpg_copy));
}
