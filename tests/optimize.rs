use chunkset::{ChunkSet, StoreKind};

#[test]
fn dense_arrays_compress_to_runs() {
    let mut set: ChunkSet = (0..3000u16).collect();
    assert_eq!(set.kind(), StoreKind::Array);
    let before = set.serialized_size();
    assert!(set.optimize());
    assert_eq!(set.kind(), StoreKind::Run);
    assert!(set.serialized_size() < before);
    assert_eq!(set.serialized_size(), 2 + 4);
    assert_eq!(set.len(), 3000);
}

#[test]
fn scattered_arrays_stay_arrays() {
    let mut set: ChunkSet = (0..4000u16).step_by(2).collect();
    assert!(!set.optimize());
    assert_eq!(set.kind(), StoreKind::Array);
}

#[test]
fn dense_bitmaps_compress_to_runs() {
    let mut set = ChunkSet::new();
    set.insert_range(0..30_000).unwrap();
    set.remove(15_000);
    assert_eq!(set.kind(), StoreKind::Bitmap);
    assert!(set.optimize());
    assert_eq!(set.kind(), StoreKind::Run);
    assert_eq!(set.serialized_size(), 2 + 4 * 2);
    assert_eq!(set.len(), 29_999);
}

#[test]
fn noisy_bitmaps_stay_bitmaps() {
    // alternating bits make runs the worst possible representation
    let mut set: ChunkSet = (0..30_000u16).step_by(2).collect();
    assert_eq!(set.kind(), StoreKind::Bitmap);
    assert!(!set.optimize());
    assert_eq!(set.kind(), StoreKind::Bitmap);
}

#[test]
fn sparse_runs_fall_back_to_arrays() {
    let mut set = ChunkSet::new();
    set.insert_range(0..6000).unwrap();
    set.optimize();
    assert_eq!(set.kind(), StoreKind::Run);

    // punch holes until runs are the worst representation
    for v in (0..6000u32).step_by(2) {
        set.remove_range(v..v + 1).unwrap();
    }
    assert_eq!(set.kind(), StoreKind::Run);
    assert_eq!(set.len(), 3000);

    assert!(set.optimize());
    assert_eq!(set.kind(), StoreKind::Array);
}

#[test]
fn optimize_preserves_contents() {
    let mut set = ChunkSet::new();
    set.insert_range(100..5000).unwrap();
    set.insert(7000);
    let snapshot: Vec<u16> = set.iter().collect();
    set.optimize();
    assert_eq!(set.iter().collect::<Vec<u16>>(), snapshot);
    set.optimize();
    assert_eq!(set.iter().collect::<Vec<u16>>(), snapshot);
}

#[test]
fn optimize_is_size_monotone() {
    for set in [
        (0..100u16).collect::<ChunkSet>(),
        (0..10_000u16).step_by(2).collect(),
        ChunkSet::full(),
        ChunkSet::new(),
    ] {
        let mut optimized = set.clone();
        optimized.optimize();
        assert!(optimized.serialized_size() <= set.serialized_size());
        assert_eq!(optimized, set);
    }
}

#[test]
fn trim_keeps_contents() {
    let mut set = ChunkSet::new();
    for v in 0..100u16 {
        set.insert(v * 100);
    }
    for v in 0..99u16 {
        set.remove(v * 100);
    }
    set.trim();
    assert_eq!(set.len(), 1);
    assert!(set.contains(9900));
}
