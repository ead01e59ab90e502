use chunkset::{ChunkSet, RangeError, StoreKind};

#[test]
fn insert_range_counts_new_values() {
    let mut set = ChunkSet::new();
    assert_eq!(set.insert_range(100..200), Ok(100));
    assert_eq!(set.insert_range(150..250), Ok(100));
    assert_eq!(set.len(), 150);
    assert!(set.contains(100));
    assert!(set.contains(249));
    assert!(!set.contains(250));
}

#[test]
fn ranges_across_a_run_boundary_stay_fused() {
    // run-backed set: two inserts bridging into one run
    let mut set = ChunkSet::new();
    set.insert_range(100..200).unwrap();
    set.optimize();
    assert_eq!(set.kind(), StoreKind::Run);
    set.insert_range(150..250).unwrap();
    assert_eq!(set.len(), 150);
    assert_eq!(set.serialized_size(), 2 + 4); // still a single run
}

#[test]
fn remove_range_splits_a_run() {
    let mut set = ChunkSet::new();
    set.insert_range(10..21).unwrap();
    set.optimize();
    assert_eq!(set.remove_range(15..16), Ok(1));
    let expected: Vec<u16> = (10..15).chain(16..21).collect();
    assert_eq!(set.iter().collect::<Vec<u16>>(), expected);
}

#[test]
fn remove_range_over_several_runs() {
    let mut set = ChunkSet::new();
    for start in [0u32, 100, 200, 300] {
        set.insert_range(start..start + 50).unwrap();
    }
    set.optimize();
    assert_eq!(set.kind(), StoreKind::Run);
    assert_eq!(set.remove_range(25..325), Ok(150));
    let expected: Vec<u16> = (0..25).chain(325..350).collect();
    assert_eq!(set.iter().collect::<Vec<u16>>(), expected);
}

#[test]
fn flip_range_complements_within_bounds() {
    // {5..10, 20..25} flipped over [0, 30) => {0..4, 11..19, 26..29}
    let mut set = ChunkSet::new();
    set.insert_range(5..11).unwrap();
    set.insert_range(20..26).unwrap();
    set.optimize();
    set.flip_range(0..30).unwrap();
    let expected: Vec<u16> = (0..5).chain(11..20).chain(26..30).collect();
    assert_eq!(set.iter().collect::<Vec<u16>>(), expected);
}

#[test]
fn flip_range_is_an_involution_on_every_representation() {
    let array_backed: ChunkSet = (0..100u16).step_by(3).collect();
    let bitmap_backed: ChunkSet = (0..20_000u16).step_by(3).collect();
    let mut run_backed = ChunkSet::new();
    run_backed.insert_range(1000..9000).unwrap();
    run_backed.optimize();

    for set in [array_backed, bitmap_backed, run_backed] {
        let mut flipped = set.clone();
        flipped.flip_range(0..1 << 16).unwrap();
        assert_eq!(flipped.len(), (1 << 16) - set.len());
        flipped.flip_range(0..1 << 16).unwrap();
        assert_eq!(flipped, set);
    }
}

#[test]
fn full_range_insert_becomes_a_single_run() {
    let mut set = ChunkSet::new();
    set.insert_range(0..1 << 16).unwrap();
    assert_eq!(set.kind(), StoreKind::Run);
    assert_eq!(set.len(), 1 << 16);
    assert_eq!(set, ChunkSet::full());
}

#[test]
fn invalid_ranges_are_rejected() {
    let mut set = ChunkSet::new();
    assert_eq!(set.insert_range(10..10), Err(RangeError::Empty));
    assert_eq!(set.insert_range(20..10), Err(RangeError::Empty));
    assert_eq!(set.insert_range(0..65_537), Err(RangeError::OutOfBounds));
    assert_eq!(set.remove_range(5..5), Err(RangeError::Empty));
    assert_eq!(set.remove_range(0..100_000), Err(RangeError::OutOfBounds));
    assert_eq!(set.flip_range(7..6), Err(RangeError::Empty));
    assert_eq!(set.flip_range(0..65_537), Err(RangeError::OutOfBounds));
    assert!(set.is_empty());
}

#[test]
fn range_operations_work_on_every_representation() {
    let mut array_backed: ChunkSet = (0..1000u16).step_by(5).collect();
    let mut bitmap_backed: ChunkSet = (0..20_000u16).step_by(3).collect();
    let mut run_backed = ChunkSet::new();
    run_backed.insert_range(0..5000).unwrap();
    run_backed.optimize();

    for set in [&mut array_backed, &mut bitmap_backed, &mut run_backed] {
        let before = set.len();
        let added = set.insert_range(50..150).unwrap();
        assert_eq!(set.len(), before + added);
        let removed = set.remove_range(50..150).unwrap();
        assert_eq!(removed, 100);
        assert!(!set.contains(50));
        assert!(!set.contains(149));
    }
}
