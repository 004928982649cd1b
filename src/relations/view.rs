use std::collections::HashSet;

use super::graph::RelationGraph;
use super::neighbors::neighbor_ids;

/// The focus node, its neighbors, and the edges incident to the focus.
/// An unknown focus yields the whole graph.
pub fn induced_subgraph(graph: &RelationGraph, focus: &str) -> RelationGraph {
	if !graph.contains_node(focus) {
		return graph.clone();
	}
	let mut keep: HashSet<&str> = neighbor_ids(graph, focus).into_iter().collect();
	keep.insert(focus);

	let nodes = graph
		.nodes()
		.iter()
		.filter(|node| keep.contains(node.id.as_str()))
		.cloned()
		.collect();
	let edges = graph
		.edges()
		.iter()
		.filter(|edge| edge.touches(focus))
		.cloned()
		.collect();
	RelationGraph::from_valid_parts(nodes, edges)
}

/// Nodes restricted to `ids`, and the edges with both endpoints among them.
/// Ids not in the graph are ignored.
pub fn induced_subgraph_for_set<S: AsRef<str>>(graph: &RelationGraph, ids: &[S]) -> RelationGraph {
	let keep: HashSet<&str> = ids.iter().map(AsRef::<str>::as_ref).collect();
	let nodes = graph
		.nodes()
		.iter()
		.filter(|node| keep.contains(node.id.as_str()))
		.cloned()
		.collect();
	let edges = graph
		.edges()
		.iter()
		.filter(|edge| keep.contains(edge.from.as_str()) && keep.contains(edge.to.as_str()))
		.cloned()
		.collect();
	RelationGraph::from_valid_parts(nodes, edges)
}
