use chunkset::{ChunkSet, StoreKind};

fn representative_sets() -> Vec<(ChunkSet, Vec<u16>)> {
    let array_values: Vec<u16> = (0..2000u16).step_by(7).collect();
    let array_backed: ChunkSet = array_values.iter().copied().collect();

    let bitmap_values: Vec<u16> = (0..20_000u16).step_by(3).collect();
    let bitmap_backed: ChunkSet = bitmap_values.iter().copied().collect();

    let mut run_backed = ChunkSet::new();
    run_backed.insert_range(10..500).unwrap();
    run_backed.insert_range(1000..1200).unwrap();
    run_backed.optimize();
    let run_values: Vec<u16> = (10..500).chain(1000..1200).collect();

    assert_eq!(array_backed.kind(), StoreKind::Array);
    assert_eq!(bitmap_backed.kind(), StoreKind::Bitmap);
    assert_eq!(run_backed.kind(), StoreKind::Run);

    vec![
        (array_backed, array_values),
        (bitmap_backed, bitmap_values),
        (run_backed, run_values),
    ]
}

#[test]
fn iteration_is_sorted_and_complete() {
    for (set, expected) in representative_sets() {
        let values: Vec<u16> = set.iter().collect();
        assert_eq!(values, expected);
    }
}

#[test]
fn reverse_iteration_mirrors_forward() {
    for (set, expected) in representative_sets() {
        let mut backward: Vec<u16> = set.iter().rev().collect();
        backward.reverse();
        assert_eq!(backward, expected);
    }
}

#[test]
fn iterators_are_exact_sized() {
    for (set, expected) in representative_sets() {
        let mut iter = set.iter();
        assert_eq!(iter.len(), expected.len());
        iter.next();
        iter.next_back();
        assert_eq!(iter.len(), expected.len() - 2);
    }
}

#[test]
fn meet_in_the_middle() {
    let set: ChunkSet = [1u16, 2, 3, 4].into_iter().collect();
    let mut iter = set.iter();
    assert_eq!(iter.next(), Some(1));
    assert_eq!(iter.next_back(), Some(4));
    assert_eq!(iter.next(), Some(2));
    assert_eq!(iter.next_back(), Some(3));
    assert_eq!(iter.next(), None);
    assert_eq!(iter.next_back(), None);
}

#[test]
fn owned_iteration_matches_borrowed() {
    for (set, expected) in representative_sets() {
        let values: Vec<u16> = set.clone().into_iter().collect();
        assert_eq!(values, expected);
        let mut backward: Vec<u16> = set.into_iter().rev().collect();
        backward.reverse();
        assert_eq!(backward, expected);
    }
}

#[test]
fn iterators_are_cloneable() {
    let set: ChunkSet = (0..100u16).collect();
    let mut iter = set.iter();
    iter.next();
    let fork = iter.clone();
    assert_eq!(iter.collect::<Vec<u16>>(), fork.collect::<Vec<u16>>());
}

#[test]
fn collect_round_trips() {
    let values: Vec<u16> = (500..600).chain(10_000..10_050).collect();
    let set: ChunkSet = values.iter().copied().collect();
    let back: Vec<u16> = set.iter().collect();
    assert_eq!(back, values);
}
