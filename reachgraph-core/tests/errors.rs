use reachgraph_core::{Graph, GraphError, GraphErrorCode};
use rstest::rstest;

fn missing_node() -> GraphError {
    let mut graph = Graph::new();
    let id = graph.add_node("gone").expect("fresh label");
    graph.remove_node(id);
    graph
        .set_selected(id, true)
        .expect_err("removed nodes are unknown")
}

#[rstest]
#[case(
    GraphError::DuplicateLabel { label: "A".to_owned() },
    GraphErrorCode::DuplicateLabel,
    "GRAPH_DUPLICATE_LABEL",
)]
#[case(missing_node(), GraphErrorCode::UnknownNode, "GRAPH_UNKNOWN_NODE")]
#[case(
    GraphError::NotFound { label: "X".to_owned() },
    GraphErrorCode::NotFound,
    "GRAPH_LABEL_NOT_FOUND",
)]
fn returns_expected_graph_code(
    #[case] error: GraphError,
    #[case] expected: GraphErrorCode,
    #[case] text: &str,
) {
    assert_eq!(error.code(), expected);
    assert_eq!(error.code().as_str(), text);
    assert_eq!(error.code().to_string(), text);
}

#[rstest]
fn messages_name_the_offending_label() {
    let error = GraphError::NotFound {
        label: "Z".to_owned(),
    };

    assert!(error.to_string().contains("`Z`"));
}
