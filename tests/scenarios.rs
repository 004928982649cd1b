//! End-to-end scenarios: load a dataset, edit, inspect the report and view.

use relation_graph::{
	ChangeLog, PropagatedChange, RelationGraph, RelationSession, apply_edit, induced_subgraph,
	third_parties,
};

const DATASET: &str = r#"{
	"nodes": [
		{"id": "A", "code": "ar", "position": {"lat": -34.6, "lng": -58.4}},
		{"id": "B", "code": "br", "position": {"lat": -15.8, "lng": -47.9}},
		{"id": "C", "code": "cl", "position": {"lat": -33.4, "lng": -70.6}},
		{"id": "D", "code": "de", "position": {"lat": 52.5, "lng": 13.4}}
	],
	"edges": [
		{"from": "A", "to": "B", "weight": 2},
		{"from": "A", "to": "C", "weight": 6},
		{"from": "B", "to": "C", "weight": 5},
		{"from": "B", "to": "D", "weight": 9},
		{"from": "X", "to": "A", "weight": 3}
	]
}"#;

fn dataset() -> RelationGraph {
	RelationGraph::from_json_str(DATASET).unwrap()
}

#[test]
fn load_drops_orphan_edge() {
	let graph = dataset();
	assert_eq!(graph.node_count(), 4);
	assert_eq!(graph.edge_count(), 4);
}

#[test]
fn improving_edit_reports_both_third_party_edges() {
	let out = apply_edit(&dataset(), "A", "B", 8).unwrap();
	assert_eq!(
		out.changes,
		vec![
			PropagatedChange {
				from: "A".into(),
				to: "C".into(),
				old_weight: 6,
				new_weight: 7,
			},
			PropagatedChange {
				from: "B".into(),
				to: "C".into(),
				old_weight: 5,
				new_weight: 6,
			},
		]
	);
}

#[test]
fn party_missing_one_relation_is_left_alone() {
	let graph = dataset();
	assert_eq!(third_parties(&graph, "A", "B"), vec!["C", "D"]);
	let out = apply_edit(&graph, "A", "B", 8).unwrap();
	assert!(out.changes.iter().all(|c| c.from != "D" && c.to != "D"));
	assert_eq!(out.graph.get_edge("B", "D").unwrap().weight, 9);
}

#[test]
fn worsening_back_reverses_direction() {
	let raised = apply_edit(&dataset(), "A", "B", 8).unwrap().graph;
	let lowered = apply_edit(&raised, "A", "B", 2).unwrap();
	assert_eq!(lowered.graph.get_edge("A", "C").unwrap().weight, 6);
	assert_eq!(lowered.graph.get_edge("B", "C").unwrap().weight, 5);
}

#[test]
fn focus_view_after_edit() {
	let out = apply_edit(&dataset(), "A", "B", 8).unwrap();
	let view = induced_subgraph(&out.graph, "D");
	let ids: Vec<&str> = view.nodes().iter().map(|n| n.id.as_str()).collect();
	assert_eq!(ids, vec!["B", "D"]);
	assert_eq!(view.edge_count(), 1);
}

#[test]
fn log_accumulates_across_edits() {
	let mut session = RelationSession::new(dataset());
	session.request_edge_weight_change("A", "B", 8).unwrap();
	session.request_edge_weight_change("A", "B", 9).unwrap();
	assert_eq!(session.change_log().len(), 4);

	let replayed = ChangeLog::new()
		.record(session.change_log().iter().cloned())
		.record(session.change_log().iter().cloned());
	assert_eq!(&replayed, session.change_log());
}
