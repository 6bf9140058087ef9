//! Tests for the graph wire format and its lenient decoding.
mod common;
use common::*;
use flowgraph::prelude::*;
use serde_json::json;
use std::fs;

#[test]
fn test_round_trip() {
    let graph = FlowGraph::from_steps(
        "Auth",
        "login flow",
        vec![rich_step(10), step(11, -1, 10), step(2, 10, -1)],
    );
    let value = graph.to_json();
    let restored = FlowGraph::from_json(&value);
    assert_eq!(restored, graph);

    let keys: Vec<i64> = value["stepsByIndex"]
        .as_object()
        .expect("steps container is an object")
        .keys()
        .map(|k| k.parse().expect("numeric key"))
        .collect();
    assert_eq!(keys, vec![2, 10, 11]);
}

#[test]
fn test_text_round_trip_is_stable() {
    let graph = create_auth_graph();
    let text = graph.to_json_string();
    let restored = FlowGraph::from_json_str(&text).expect("valid JSON");
    assert_eq!(restored, graph);
    assert_eq!(restored.to_json_string(), text);

    let pretty = graph.to_json_string_pretty();
    assert!(pretty.contains('\n'));
    assert_eq!(FlowGraph::from_json_str(&pretty).expect("valid JSON"), graph);
}

#[test]
fn test_emission_order_is_numeric() {
    let graph = FlowGraph::from_steps("g", "", vec![step(10, -1, -1), step(9, -1, -1)]);
    let text = graph.to_json_string();
    let nine = text.find("\"9\"").expect("key 9 emitted");
    let ten = text.find("\"10\"").expect("key 10 emitted");
    assert!(nine < ten);
}

#[test]
fn test_serde_integration() {
    let graph = create_auth_graph();
    let text = serde_json::to_string(&graph).expect("graph serializes");
    assert_eq!(text, graph.to_json_string());
    let decoded: FlowGraph = serde_json::from_str(&text).expect("graph deserializes");
    assert_eq!(decoded, graph);
}

#[test]
fn test_stored_key_comes_from_step_index() {
    let graph = FlowGraph::from_json(&json!({
        "name": "g",
        "description": "",
        "stepsByIndex": {
            "1": { "index": 5, "title": "five" },
            "2": { "index": 6, "title": "six" }
        }
    }));
    assert_eq!(graph.indices(), vec![5, 6]);
    assert_eq!(graph.step_at(5).map(|s| s.title()), Some("five"));
    assert!(graph.step_at(1).is_none());
}

#[test]
fn test_negative_entries_are_dropped() {
    let graph = FlowGraph::from_json(&json!({
        "name": "g",
        "stepsByIndex": {
            "-1": { "index": 3 },
            "4": { "index": -1, "title": "sentinel" },
            "x": { "index": 8 },
            "7": { "index": 7 }
        }
    }));
    assert_eq!(graph.indices(), vec![7]);
    assert_eq!(graph.entry_index_wire(), 7);

    let emitted = graph.to_json();
    assert!(emitted["stepsByIndex"].get("-1").is_none());
}

#[test]
fn test_non_object_entries_are_skipped() {
    let graph = FlowGraph::from_json(&json!({
        "stepsByIndex": {
            "1": 17,
            "2": "two",
            "3": [ { "index": 3 } ],
            "4": { "index": 4 }
        }
    }));
    assert_eq!(graph.indices(), vec![4]);
}

#[test]
fn test_missing_index_drops_the_step() {
    let graph = FlowGraph::from_json(&json!({
        "stepsByIndex": { "3": { "title": "no index" } }
    }));
    assert!(graph.is_empty());
}

#[test]
fn test_malformed_shapes_never_fail() {
    for payload in [
        json!(null),
        json!(42),
        json!("graph"),
        json!([]),
        json!({ "name": 5, "description": false, "stepsByIndex": "nope" }),
        json!({ "stepsByIndex": null }),
    ] {
        let graph = FlowGraph::from_json(&payload);
        assert!(graph.is_empty(), "unexpected steps from {}", payload);
    }

    let graph = FlowGraph::from_json(&json!({ "name": 5, "description": false }));
    assert_eq!(graph.name(), "5");
    assert_eq!(graph.description(), "false");
}

#[test]
fn test_array_container_is_accepted() {
    let graph = FlowGraph::from_json(&json!({
        "name": "legacy",
        "stepsByIndex": [
            { "index": 2, "title": "first" },
            { "index": -1 },
            "junk",
            { "index": 2, "title": "second" }
        ]
    }));
    assert_eq!(graph.indices(), vec![2]);
    assert_eq!(graph.step_at(2).map(|s| s.title()), Some("second"));
}

#[test]
fn test_duplicate_decoded_index_keeps_last_entry() {
    let graph = FlowGraph::from_json(&json!({
        "stepsByIndex": {
            "1": { "index": 9, "title": "first" },
            "2": { "index": 9, "title": "second" }
        }
    }));
    assert_eq!(graph.len(), 1);
    assert_eq!(graph.step_at(9).map(|s| s.title()), Some("second"));
}

#[test]
fn test_indices_beyond_32_bits_round_trip() {
    let graph = FlowGraph::from_json(&json!({
        "name": "wide",
        "stepsByIndex": {
            "4294967296": { "index": 4_294_967_296_i64 },
            "1": { "index": 1, "nextOnSuccessIndex": 4_294_967_296_i64 }
        }
    }));
    assert_eq!(graph.indices(), vec![1, 4_294_967_296]);
    assert_eq!(
        graph.step_at(1).map(|s| s.on_success()),
        Some(Target::Step(4_294_967_296))
    );
    assert!(graph.step_at(4_294_967_296).is_some());

    let emitted = graph.to_json();
    assert_eq!(
        emitted["stepsByIndex"]["1"]["nextOnSuccessIndex"],
        json!(4_294_967_296_i64)
    );
    assert_eq!(FlowGraph::from_json(&emitted), graph);
}

#[test]
fn test_from_map_with_mismatched_key_round_trips() {
    let graph = FlowGraph::from_map("g", "", vec![(3, rich_step(5)), (4, step(5, 3, -1))]);
    let value = graph.to_json();
    let keys: Vec<_> = value["stepsByIndex"]
        .as_object()
        .expect("steps container is an object")
        .keys()
        .cloned()
        .collect();
    assert_eq!(keys, vec!["3", "4"]);
    assert_eq!(value["stepsByIndex"]["3"]["index"], json!(3));
    assert_eq!(FlowGraph::from_json(&value), graph);
}

#[test]
fn test_from_json_str_rejects_non_json_text() {
    let result = FlowGraph::from_json_str("{ not json");
    assert!(matches!(result, Err(FlowGraphError::MalformedJson(_))));
}

#[test]
fn test_save_and_load_file() {
    let path = std::env::temp_dir().join(format!("flowgraph_test_{}.json", std::process::id()));
    let path = path.to_str().expect("utf-8 temp path").to_string();

    let graph = FlowGraph::from_steps("Saved", "on disk", vec![rich_step(10), step(11, -1, -1)]);
    graph.save(&path).expect("graph saves");
    let loaded = FlowGraph::from_file(&path).expect("graph loads");
    fs::remove_file(&path).ok();

    assert_eq!(loaded, graph);
}

#[test]
fn test_missing_file_is_an_io_error() {
    let result = FlowGraph::from_file("/nonexistent/flowgraph/graph.json");
    match result {
        Err(FlowGraphError::Io { path, .. }) => assert!(path.contains("graph.json")),
        other => panic!("Expected Io error, got {:?}", other),
    }
}
