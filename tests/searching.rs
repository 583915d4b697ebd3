use algoviz::algorithm::search;
use algoviz::engine::{drive, Recorder};
use algoviz::graph::generators;
use algoviz::model::ElementState;
use algoviz::{SearchKind, StepAlgorithm};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[test]
fn test_binary_search_example() {
    let result = search(SearchKind::Binary, &[1, 3, 5, 7, 9, 11], 7);

    assert_eq!(result.found, Some(3));
    assert_eq!(result.elements_visited, 3);
}

#[test]
fn test_linear_search_visits_up_to_target() {
    let result = search(SearchKind::Linear, &[4, 8, 15, 16, 23, 42], 16);
    assert_eq!(result.found, Some(3));
    assert_eq!(result.elements_visited, 4);

    let missing = search(SearchKind::Linear, &[4, 8, 15], 99);
    assert_eq!(missing.found, None);
    assert_eq!(missing.elements_visited, 3);
}

#[test]
fn test_linear_search_accepts_unsorted_input() {
    let result = search(SearchKind::Linear, &[9, 2, 7, 2], 7);
    assert_eq!(result.found, Some(2));
}

#[test]
fn test_all_searches_agree_with_contains() {
    let mut rng = StdRng::seed_from_u64(11);

    for len in [1, 2, 5, 16, 50] {
        let values = generators::sorted_random_values(len, 200, &mut rng);
        for _ in 0..20 {
            let target = rng.gen_range(0..=210);
            for kind in SearchKind::ALL {
                let result = search(kind, &values, target);
                match result.found {
                    Some(i) => assert_eq!(values[i], target, "{} returned a wrong index", kind),
                    None => assert!(
                        !values.contains(&target),
                        "{} missed {} in {:?}",
                        kind,
                        target,
                        values
                    ),
                }
                assert!(result.elements_visited as usize <= values.len());
            }
        }
    }
}

#[test]
fn test_empty_array_finishes_immediately() {
    for kind in SearchKind::ALL {
        let result = search(kind, &[], 5);
        assert_eq!(result.found, None);
        assert_eq!(result.elements_visited, 0);
    }
}

#[test]
fn test_interpolation_with_equal_values() {
    let result = search(SearchKind::Interpolation, &[4, 4, 4, 4], 4);
    assert_eq!(result.found, Some(0));
    assert_eq!(result.elements_visited, 1);

    let missing = search(SearchKind::Interpolation, &[4, 4, 4, 4], 5);
    assert_eq!(missing.found, None);
    assert_eq!(missing.elements_visited, 0);
}

#[test]
fn test_jump_search_scans_inside_block() {
    let values: Vec<i64> = (0..16).map(|i| i * 2).collect();
    let result = search(SearchKind::Jump, &values, 10);

    assert_eq!(result.found, Some(5));
    // block ends 3 and 7, then 4 and 5 inside the second block
    assert_eq!(result.elements_visited, 4);
}

#[test]
fn test_found_element_is_marked() {
    let mut recorder = Recorder::new();
    let mut run = SearchKind::Binary.build(&[1, 3, 5, 7, 9, 11], 9);
    let result = drive(&mut run, &mut recorder);

    let last = recorder.last_frame().expect("frames");
    assert_eq!(result.found, Some(4));
    assert_eq!(last.elements[4].state, ElementState::Found);
    assert_eq!(last.target, Some(9));
    assert_eq!(recorder.last_stats().and_then(|s| s.elements_visited), Some(2));
}

#[test]
fn test_settle_turns_checking_into_checked() {
    let mut run = SearchKind::Linear.build(&[1, 2, 3, 4], 4);
    run.step();
    run.step();
    run.settle();

    let snapshot = run.snapshot();
    assert_eq!(snapshot.elements[0].state, ElementState::Checked);
    assert_eq!(snapshot.elements[1].state, ElementState::Checked);
    assert!(snapshot.elements.iter().all(|e| !e.state.is_transient()));
}
