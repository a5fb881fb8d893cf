//! Session-level behaviour: tracing output and selection invariants.

use proptest::{prelude::*, test_runner::Config as ProptestConfig};
use reachgraph_core::{NodeId, PathAnswer, SelectionState, Session, SessionBuilder};
use reachgraph_test_support::{
    ci::property_test_profile::ProptestRunProfile, tracing::RecordingLayer,
};
use rstest::rstest;
use test_strategy::Arbitrary;
use tracing::Level;

#[rstest]
fn calculate_records_span_with_graph_size() {
    let mut session = Session::new();
    let a = session.add_node("A").expect("fresh label");
    let b = session.add_node("B").expect("fresh label");
    session.select_node(a, false).expect("node exists");
    session.select_node(b, false).expect("node exists");
    let layer = RecordingLayer::default();

    layer.in_scope(|| session.calculate());

    let spans = layer.spans_named("core.calculate");
    let span = spans.first().expect("core.calculate span must exist");
    assert_eq!(span.fields.get("nodes"), Some(&"2".to_owned()));
    assert_eq!(span.fields.get("edges"), Some(&"1".to_owned()));
    assert_eq!(layer.spans_named("core.build_matrix").len(), 1);
    assert_eq!(layer.spans_named("core.closure").len(), 1);

    let events = layer.events_with_message("closure computed");
    let event = events.first().expect("closure event must exist");
    assert_eq!(event.level, Level::DEBUG);
    assert_eq!(event.field("reachable_pairs"), Some("4"));
}

#[rstest]
fn rejected_selection_records_error() {
    let mut session = Session::new();
    let a = session.add_node("A").expect("fresh label");
    session.remove_node(a).expect("removal succeeds");
    let layer = RecordingLayer::default();

    let result = layer.in_scope(|| session.select_node(a, false));

    assert!(result.is_err());
    assert_eq!(layer.spans_named("core.selection.handle").len(), 1);
    assert!(
        layer
            .events()
            .iter()
            .any(|event| event.level == Level::ERROR)
    );
}

#[rstest]
fn placing_nodes_logs_each_addition() {
    let mut session = SessionBuilder::new().with_first_label(5).build();
    let layer = RecordingLayer::default();

    layer.in_scope(|| {
        session.place_node().expect("label available");
        session.place_node().expect("label available");
    });

    let labels: Vec<String> = layer
        .events_with_message("node added")
        .iter()
        .filter_map(|event| event.field("label").map(str::to_owned))
        .collect();
    assert_eq!(labels, ["5", "6"]);
    assert_eq!(layer.spans_named("core.place_node").len(), 2);
}

#[rstest]
fn query_tracks_calculation_lifecycle() {
    let mut session = Session::new();
    assert_eq!(session.query("A", "A"), PathAnswer::Unavailable);

    let a = session.add_node("A").expect("fresh label");
    session.select_node(a, true).expect("node exists");
    session.calculate();

    assert_eq!(session.query("A", "A"), PathAnswer::Reachable);
}

#[derive(Clone, Copy, Debug, Arbitrary)]
enum Gesture {
    Place,
    Select(#[strategy(0usize..6)] usize, bool),
    Remove(#[strategy(0usize..6)] usize),
    Cancel,
}

fn pick(session: &Session, index: usize) -> Option<NodeId> {
    let labels = session.labels();
    labels
        .get(index % labels.len().max(1))
        .and_then(|label| session.node_id(label))
}

fn apply(session: &mut Session, gesture: Gesture) {
    match gesture {
        Gesture::Place => {
            session.place_node().expect("a free label exists");
        }
        Gesture::Select(index, self_gesture) => {
            if let Some(id) = pick(session, index) {
                session.select_node(id, self_gesture).expect("node exists");
            }
        }
        Gesture::Remove(index) => {
            if let Some(id) = pick(session, index) {
                session.remove_node(id).expect("removal succeeds");
            }
        }
        Gesture::Cancel => {
            session.cancel_selection();
        }
    }
}

fn selection_config() -> ProptestConfig {
    let profile = ProptestRunProfile::load(128, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

proptest! {
    #![proptest_config(selection_config())]

    #[test]
    fn pending_node_always_exists_and_is_the_only_selected(
        gestures in proptest::collection::vec(any::<Gesture>(), 1..40),
    ) {
        let mut session = Session::new();
        for gesture in gestures {
            apply(&mut session, gesture);

            let selected: Vec<_> = session
                .graph()
                .nodes()
                .filter(|node| node.is_selected())
                .map(|node| node.id())
                .collect();
            match session.selection_state() {
                SelectionState::Idle => prop_assert!(selected.is_empty()),
                SelectionState::Pending(node) => {
                    prop_assert!(session.graph().contains_node(node));
                    prop_assert_eq!(selected, vec![node]);
                }
            }
        }
    }

    #[test]
    fn matrices_stay_symmetric_and_closure_contains_adjacency(
        gestures in proptest::collection::vec(any::<Gesture>(), 1..40),
    ) {
        let mut session = Session::new();
        for gesture in gestures {
            apply(&mut session, gesture);
        }

        let calculation = session.calculate();
        let adjacency = calculation.matrix().matrix();
        let reach = calculation.closure().matrix();
        prop_assert!(adjacency.is_symmetric());
        prop_assert!(reach.is_symmetric());
        for i in 0..adjacency.size() {
            for j in 0..adjacency.size() {
                if adjacency.get(i, j) == Some(true) {
                    prop_assert_eq!(reach.get(i, j), Some(true));
                }
            }
        }
    }
}
