use algoviz::algorithm::sort;
use algoviz::engine::{drive, Recorder};
use algoviz::graph::generators;
use algoviz::model::ElementState;
use algoviz::{Error, SortKind, StepAlgorithm};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn sorted_copy(values: &[i64]) -> Vec<i64> {
    let mut expected = values.to_vec();
    expected.sort();
    expected
}

#[test]
fn test_bubble_sort_counts() {
    let result = sort(SortKind::Bubble, &[5, 3, 1, 4, 2]);

    assert_eq!(result.values, vec![1, 2, 3, 4, 5]);
    assert_eq!(result.comparisons, 10);
    assert_eq!(result.swaps, 7);
}

#[test]
fn test_every_sort_produces_sorted_permutation() {
    let mut rng = StdRng::seed_from_u64(17);

    for len in [0, 1, 2, 3, 7, 16, 31] {
        let values = generators::random_values(len, 20, &mut rng);
        for kind in SortKind::ALL {
            let result = sort(kind, &values);
            assert_eq!(
                result.values,
                sorted_copy(&values),
                "{} failed on {:?}",
                kind,
                values
            );
        }
    }
}

#[test]
fn test_sorted_input_costs() {
    let values: Vec<i64> = (1..=8).collect();

    let bubble = sort(SortKind::Bubble, &values);
    assert_eq!(bubble.comparisons, 7, "bubble sort stops after one clean pass");
    assert_eq!(bubble.swaps, 0);

    let insertion = sort(SortKind::Insertion, &values);
    assert_eq!(insertion.comparisons, 7);
    assert_eq!(insertion.swaps, 0);

    let selection = sort(SortKind::Selection, &values);
    assert_eq!(selection.comparisons, 28);
    assert_eq!(selection.swaps, 0);
}

#[test]
fn test_merge_sort_counts_writes_as_swaps() {
    let result = sort(SortKind::Merge, &[8, 7, 6, 5, 4, 3, 2, 1]);

    assert_eq!(result.values, (1..=8).collect::<Vec<i64>>());
    // three merge levels, each writing all eight slots
    assert_eq!(result.swaps, 24);
}

#[test]
fn test_counters_never_decrease() {
    let mut rng = StdRng::seed_from_u64(3);
    let values = generators::random_values(12, 50, &mut rng);

    for kind in SortKind::ALL {
        let mut recorder = Recorder::new();
        let mut run = kind.build(&values);
        drive(&mut run, &mut recorder);

        let counters: Vec<(u64, u64)> = recorder
            .stats
            .iter()
            .map(|s| (s.comparisons.unwrap_or(0), s.swaps.unwrap_or(0)))
            .collect();
        for pair in counters.windows(2) {
            assert!(pair[0].0 <= pair[1].0, "{} comparisons went down", kind);
            assert!(pair[0].1 <= pair[1].1, "{} swaps went down", kind);
        }
    }
}

#[test]
fn test_transient_markers_stay_local() {
    let mut rng = StdRng::seed_from_u64(99);
    let values = generators::random_values(15, 40, &mut rng);

    for kind in SortKind::ALL {
        let mut recorder = Recorder::new();
        let mut run = kind.build(&values);
        drive(&mut run, &mut recorder);

        for frame in &recorder.frames {
            let transient = frame
                .elements
                .iter()
                .filter(|e| e.state.is_transient())
                .count();
            assert!(transient <= 3, "{} left {} transient markers", kind, transient);
        }

        let last = recorder.last_frame().expect("at least one frame");
        assert!(
            last.elements.iter().all(|e| e.state == ElementState::Sorted),
            "{} did not mark every element sorted",
            kind
        );
    }
}

#[test]
fn test_insertion_sort_keeps_placed_prefix_marked() {
    let mut rng = StdRng::seed_from_u64(7);
    let values = generators::random_values(12, 50, &mut rng);
    let mut recorder = Recorder::new();
    let mut run = SortKind::Insertion.build(&values);
    drive(&mut run, &mut recorder);

    // once a slot is shown sorted it may be compared or swapped, but never reset
    let mut seen_sorted = vec![false; values.len()];
    for frame in &recorder.frames {
        for (i, element) in frame.elements.iter().enumerate() {
            if seen_sorted[i] {
                assert_ne!(element.state, ElementState::Default, "slot {} lost its sorted marker", i);
            }
            if element.state == ElementState::Sorted {
                seen_sorted[i] = true;
            }
        }
    }
}

#[test]
fn test_settle_clears_transient_markers() {
    let mut run = SortKind::Quick.build(&[9, 4, 7, 1, 8, 2]);
    for _ in 0..5 {
        run.step();
    }
    run.settle();

    let snapshot = run.snapshot();
    assert!(snapshot.elements.iter().all(|e| !e.state.is_transient()));
}

#[test]
fn test_snapshots_are_independent_copies() {
    let mut run = SortKind::Bubble.build(&[3, 2, 1]);
    let before = run.snapshot();
    run.step();
    run.step();

    assert_eq!(before.values(), vec![3, 2, 1]);
    assert_eq!(run.snapshot().values(), vec![2, 3, 1]);
}

#[test]
fn test_parse_sort_names() {
    assert_eq!("quick".parse::<SortKind>(), Ok(SortKind::Quick));
    assert_eq!("merge".parse::<SortKind>(), Ok(SortKind::Merge));
    assert_eq!(
        "bogo".parse::<SortKind>(),
        Err(Error::UnknownAlgorithm("bogo".to_string()))
    );
}
