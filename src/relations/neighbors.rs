//! Read-only adjacency queries over a single snapshot.
//!
//! Nothing here is cached, so a query always reflects the snapshot it is
//! handed. [`PairIndex`] borrows its snapshot and cannot outlive it.

use std::collections::HashMap;

use super::error::Result;
use super::graph::RelationGraph;
use super::types::{Edge, Node, Weight};

/// Every edge with `id` as an endpoint, in graph order.
pub fn edges_touching<'g>(graph: &'g RelationGraph, id: &str) -> Vec<&'g Edge> {
	graph.edges().iter().filter(|edge| edge.touches(id)).collect()
}

/// The endpoint of `edge` that is not `id`.
pub fn other_endpoint<'e>(edge: &'e Edge, id: &str) -> Result<&'e str> {
	edge.other_endpoint(id)
}

/// Weight of the relation between `a` and `b`, in either direction.
pub fn weight_between(graph: &RelationGraph, a: &str, b: &str) -> Option<Weight> {
	graph.get_edge(a, b).ok().map(|edge| edge.weight)
}

/// Pair lookup table over one snapshot, built in a single pass so repeated
/// `weight` calls are constant time.
#[derive(Debug)]
pub struct PairIndex<'g> {
	weights: HashMap<(&'g str, &'g str), Weight>,
}

impl<'g> PairIndex<'g> {
	pub fn new(graph: &'g RelationGraph) -> Self {
		let weights = graph
			.edges()
			.iter()
			.map(|edge| (edge.pair_key(), edge.weight))
			.collect();
		Self { weights }
	}

	/// Weight of the relation between `a` and `b`, in either direction.
	pub fn weight(&self, a: &str, b: &str) -> Option<Weight> {
		let key = if a <= b { (a, b) } else { (b, a) };
		self.weights.get(&key).copied()
	}

	pub fn len(&self) -> usize {
		self.weights.len()
	}

	pub fn is_empty(&self) -> bool {
		self.weights.is_empty()
	}
}

/// Ids of the nodes sharing an edge with `id`, first-seen order, no repeats.
pub fn neighbor_ids<'g>(graph: &'g RelationGraph, id: &str) -> Vec<&'g str> {
	let mut out: Vec<&str> = Vec::new();
	for edge in edges_touching(graph, id) {
		if let Ok(other) = edge.other_endpoint(id) {
			if other != id && !out.contains(&other) {
				out.push(other);
			}
		}
	}
	out
}

/// The nodes related to `id`, excluding `id` itself, in graph node order.
pub fn related_nodes<'g>(graph: &'g RelationGraph, id: &str) -> Result<Vec<&'g Node>> {
	graph.get_node(id)?;
	let neighbors = neighbor_ids(graph, id);
	Ok(graph
		.nodes()
		.iter()
		.filter(|node| neighbors.contains(&node.id.as_str()))
		.collect())
}
