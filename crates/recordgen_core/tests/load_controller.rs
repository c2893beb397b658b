use std::sync::Once;

use rand::rngs::StdRng;
use rand::SeedableRng;
use recordgen_core::{
    Effect, Epoch, FailureClass, LoadController, PageFailure, PageRequest, QuerySpec, Record,
    Region,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

fn records(prefix: &str, count: usize) -> Vec<Record> {
    (0..count)
        .map(|i| {
            Record::new(
                format!("{prefix}-{i}"),
                format!("Name {prefix} {i}"),
                format!("{i} Main St"),
                format!("555-{i:04}"),
            )
        })
        .collect()
}

fn single_fetch(effects: &[Effect]) -> (Epoch, PageRequest) {
    match effects {
        [Effect::FetchPage { epoch, request }] => (*epoch, request.clone()),
        other => panic!("expected exactly one fetch, got {other:?}"),
    }
}

fn spec_a() -> QuerySpec {
    QuerySpec::new(Region::Usa, 0, "abc")
}

fn spec_b() -> QuerySpec {
    QuerySpec::new(Region::Poland, 3, "abc")
}

#[test]
fn spec_change_resets_and_requests_first_page() {
    init_logging();
    let mut controller = LoadController::new(10);
    assert_eq!(controller.epoch(), Epoch::default());

    let (epoch, request) = single_fetch(&controller.on_spec_changed(spec_a()));

    assert_ne!(epoch, Epoch::default());
    assert_eq!(request.page, 1);
    assert_eq!(request.batch_size, 10);
    assert_eq!(request.spec, spec_a());
    assert!(controller.is_loading());
    assert!(controller.has_more());
    assert!(controller.rows().is_empty());
}

#[test]
fn late_result_from_previous_epoch_is_discarded() {
    init_logging();
    let mut controller = LoadController::new(10);
    let (epoch_a, _) = single_fetch(&controller.on_spec_changed(spec_a()));
    let (epoch_b, request_b) = single_fetch(&controller.on_spec_changed(spec_b()));
    assert!(epoch_b > epoch_a);
    assert_eq!(request_b.page, 1);

    let rows_b = records("b", 10);
    assert!(controller.page_loaded(epoch_b, 1, Ok(rows_b.clone())));
    assert!(!controller.page_loaded(epoch_a, 1, Ok(records("a", 10))));

    assert_eq!(controller.rows(), rows_b.as_slice());
    assert_eq!(controller.next_page(), 2);
    assert!(!controller.is_loading());
}

#[test]
fn stale_result_arriving_first_does_not_release_the_loading_guard() {
    init_logging();
    let mut controller = LoadController::new(10);
    let (epoch_a, _) = single_fetch(&controller.on_spec_changed(spec_a()));
    let (epoch_b, _) = single_fetch(&controller.on_spec_changed(spec_b()));

    assert!(!controller.page_loaded(epoch_a, 1, Ok(records("a", 10))));
    assert!(controller.is_loading());
    assert!(controller.rows().is_empty());
    assert!(controller.request_next_page().is_empty());

    assert!(controller.page_loaded(epoch_b, 1, Ok(records("b", 3))));
    assert_eq!(controller.rows(), records("b", 3).as_slice());
}

#[test]
fn stale_failure_is_not_surfaced() {
    init_logging();
    let mut controller = LoadController::new(10);
    let (epoch_a, _) = single_fetch(&controller.on_spec_changed(spec_a()));
    let _ = controller.on_spec_changed(spec_b());

    let failure = PageFailure::new(FailureClass::Network, "connection reset");
    assert!(!controller.page_loaded(epoch_a, 1, Err(failure)));
    assert!(controller.last_error().is_none());
}

#[test]
fn exhaustion_stops_further_fetches() {
    init_logging();
    let mut controller = LoadController::new(10);
    let (epoch, _) = single_fetch(&controller.on_spec_changed(spec_a()));
    assert!(controller.page_loaded(epoch, 1, Ok(records("a", 7))));

    assert!(!controller.has_more());
    for _ in 0..5 {
        assert!(controller.request_next_page().is_empty());
    }
    assert!(!controller.is_loading());
    assert_eq!(controller.next_page(), 2);
}

#[test]
fn empty_page_after_full_pages_exhausts() {
    init_logging();
    let mut controller = LoadController::new(10);
    let (epoch, _) = single_fetch(&controller.on_spec_changed(spec_a()));
    assert!(controller.page_loaded(epoch, 1, Ok(records("a", 10))));
    let (_, request) = single_fetch(&controller.request_next_page());
    assert!(controller.page_loaded(epoch, request.page, Ok(Vec::new())));

    assert!(!controller.has_more());
    assert_eq!(controller.rows().len(), 10);
    assert!(controller.load_state().is_consistent(10));
}

#[test]
fn pages_append_in_request_order() {
    init_logging();
    let mut controller = LoadController::new(10);
    let (epoch, _) = single_fetch(&controller.on_spec_changed(spec_a()));
    let page1 = records("p1", 10);
    let page2 = records("p2", 10);
    let page3 = records("p3", 2);

    assert!(controller.page_loaded(epoch, 1, Ok(page1.clone())));

    let (_, request) = single_fetch(&controller.request_next_page());
    assert_eq!(request.page, 2);
    // Scroll triggers firing faster than the fetch completes.
    assert!(controller.request_next_page().is_empty());
    assert!(controller.request_next_page().is_empty());
    assert!(controller.page_loaded(epoch, 2, Ok(page2.clone())));

    let (_, request) = single_fetch(&controller.request_next_page());
    assert_eq!(request.page, 3);
    assert!(controller.page_loaded(epoch, 3, Ok(page3.clone())));

    let expected: Vec<Record> = [page1, page2, page3].concat();
    assert_eq!(controller.rows(), expected.as_slice());
    assert!(controller.load_state().is_consistent(10));
}

#[test]
fn overlapping_requests_issue_one_fetch() {
    init_logging();
    let mut controller = LoadController::new(10);
    let (epoch, _) = single_fetch(&controller.on_spec_changed(spec_a()));
    assert!(controller.page_loaded(epoch, 1, Ok(records("a", 10))));

    let first = controller.request_next_page();
    let second = controller.request_next_page();

    assert_eq!(first.len(), 1);
    assert!(second.is_empty());
}

#[test]
fn equal_spec_by_value_still_resets() {
    init_logging();
    let mut controller = LoadController::new(10);
    let (epoch, _) = single_fetch(&controller.on_spec_changed(spec_a()));
    assert!(controller.page_loaded(epoch, 1, Ok(records("a", 10))));

    let error_count = QuerySpec::parse_error_count("0").unwrap();
    let same = QuerySpec::new(Region::Usa, error_count, String::from("abc"));
    let (next_epoch, request) = single_fetch(&controller.on_spec_changed(same));

    assert!(next_epoch > epoch);
    assert_eq!(request.page, 1);
    assert!(controller.rows().is_empty());
    assert_eq!(controller.next_page(), 1);
}

#[test]
fn duplicate_spec_while_loading_is_ignored() {
    init_logging();
    let mut controller = LoadController::new(10);
    let (epoch, _) = single_fetch(&controller.on_spec_changed(spec_a()));

    let effects = controller.on_spec_changed(spec_a());

    assert!(effects.is_empty());
    assert_eq!(controller.epoch(), epoch);
    assert!(controller.is_loading());
}

#[test]
fn failure_keeps_cursor_for_retry() {
    init_logging();
    let mut controller = LoadController::new(10);
    let (epoch, _) = single_fetch(&controller.on_spec_changed(spec_a()));
    assert!(controller.page_loaded(epoch, 1, Ok(records("a", 10))));
    let _ = single_fetch(&controller.request_next_page());

    let failure = PageFailure::new(FailureClass::Protocol, "expected array");
    assert!(controller.page_loaded(epoch, 2, Err(failure.clone())));

    assert!(!controller.is_loading());
    assert!(controller.has_more());
    assert_eq!(controller.next_page(), 2);
    assert_eq!(controller.rows().len(), 10);
    assert_eq!(controller.last_error(), Some(&failure));

    let (_, retry) = single_fetch(&controller.request_next_page());
    assert_eq!(retry.page, 2);
    assert!(controller.page_loaded(epoch, 2, Ok(records("b", 10))));
    assert!(controller.last_error().is_none());
}

#[test]
fn unexpected_page_number_is_dropped() {
    init_logging();
    let mut controller = LoadController::new(10);
    let (epoch, _) = single_fetch(&controller.on_spec_changed(spec_a()));

    assert!(!controller.page_loaded(epoch, 2, Ok(records("x", 10))));
    assert!(controller.is_loading());
    assert!(controller.rows().is_empty());
}

#[test]
fn random_seed_overrides_manual_seed() {
    init_logging();
    let mut controller = LoadController::new(10);
    let _ = controller.set_manual_seed("abc");
    assert_eq!(controller.spec().seed, "abc");

    let mut rng = StdRng::seed_from_u64(42);
    let (_, request) = single_fetch(&controller.generate_random_seed(&mut rng));
    let random = controller.random_seed().to_string();

    assert!(!random.is_empty());
    assert_ne!(random, "abc");
    assert_eq!(request.spec.seed, random);

    // Typing a new manual seed reloads but the random seed still wins.
    let epoch = controller.epoch();
    let _ = controller.page_loaded(epoch, 1, Ok(records("r", 10)));
    let (_, request) = single_fetch(&controller.set_manual_seed("xyz"));
    assert_eq!(controller.manual_seed(), "xyz");
    assert_eq!(request.spec.seed, random);
}

#[test]
fn each_random_seed_starts_a_new_epoch() {
    init_logging();
    let mut controller = LoadController::new(10);
    let mut rng = StdRng::seed_from_u64(1);

    let (first_epoch, first) = single_fetch(&controller.generate_random_seed(&mut rng));
    let (second_epoch, second) = single_fetch(&controller.generate_random_seed(&mut rng));

    assert!(second_epoch > first_epoch);
    assert_ne!(first.spec.seed, second.spec.seed);
}

#[test]
fn end_to_end_two_pages_then_exhausted() {
    init_logging();
    let mut controller = LoadController::new(10);
    let spec = QuerySpec::new(Region::Usa, 0, "abc");

    let (epoch, request) = single_fetch(&controller.on_spec_changed(spec.clone()));
    assert_eq!(
        request,
        PageRequest {
            spec: spec.clone(),
            page: 1,
            batch_size: 10
        }
    );
    assert!(controller.page_loaded(epoch, 1, Ok(records("p1", 10))));
    assert!(controller.has_more());
    assert_eq!(controller.next_page(), 2);

    let (_, request) = single_fetch(&controller.request_next_page());
    assert_eq!(request.page, 2);
    assert!(controller.page_loaded(epoch, 2, Ok(records("p2", 4))));

    assert!(!controller.has_more());
    assert_eq!(controller.rows().len(), 14);
    assert!(controller.request_next_page().is_empty());
    assert!(controller.load_state().is_consistent(10));
}
