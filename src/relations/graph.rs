use std::collections::HashSet;

use log::warn;

use super::error::{RelationError, Result};
use super::types::{Edge, MAX_WEIGHT, MIN_WEIGHT, Node, Weight};

/// Immutable snapshot of countries and the relations between them.
///
/// Node and edge order is the load order and is kept through every
/// derived snapshot, which is what makes propagation reports reproducible.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RelationGraph {
	nodes: Vec<Node>,
	edges: Vec<Edge>,
}

impl RelationGraph {
	/// Builds a graph, dropping anything that would break its invariants:
	/// repeated node ids, self-loops, edges to unknown nodes and repeated
	/// pairs (first occurrence wins). Out-of-range weights are clamped.
	pub fn from_parts(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
		let mut seen_nodes = HashSet::new();
		let nodes: Vec<Node> = nodes
			.into_iter()
			.filter(|node| {
				let fresh = seen_nodes.insert(node.id.clone());
				if !fresh {
					warn!("dropping duplicate node {}", node.id);
				}
				fresh
			})
			.collect();

		let mut seen_pairs: HashSet<(String, String)> = HashSet::new();
		let mut kept = Vec::with_capacity(edges.len());
		for mut edge in edges {
			if edge.from == edge.to {
				warn!("dropping self-loop on {}", edge.from);
				continue;
			}
			if !seen_nodes.contains(&edge.from) || !seen_nodes.contains(&edge.to) {
				warn!("dropping edge {}-{}: missing endpoint", edge.from, edge.to);
				continue;
			}
			let (a, b) = edge.pair_key();
			if !seen_pairs.insert((a.to_string(), b.to_string())) {
				warn!("dropping duplicate edge {}-{}", edge.from, edge.to);
				continue;
			}
			if !(MIN_WEIGHT..=MAX_WEIGHT).contains(&edge.weight) {
				warn!(
					"clamping weight {} on {}-{}",
					edge.weight, edge.from, edge.to
				);
				edge.weight = edge.weight.clamp(MIN_WEIGHT, MAX_WEIGHT);
			}
			kept.push(edge);
		}

		Self { nodes, edges: kept }
	}

	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	pub fn edge_count(&self) -> usize {
		self.edges.len()
	}

	pub fn contains_node(&self, id: &str) -> bool {
		self.nodes.iter().any(|node| node.id == id)
	}

	/// Looks a node up by id.
	pub fn get_node(&self, id: &str) -> Result<&Node> {
		self.nodes
			.iter()
			.find(|node| node.id == id)
			.ok_or_else(|| RelationError::NodeNotFound(id.to_string()))
	}

	/// Looks an edge up by its endpoints, in either order.
	pub fn get_edge(&self, a: &str, b: &str) -> Result<&Edge> {
		self.position_of(a, b)
			.map(|idx| &self.edges[idx])
			.ok_or_else(|| RelationError::EdgeNotFound {
				from: a.to_string(),
				to: b.to_string(),
			})
	}

	/// A copy of this graph where the `a`-`b` relation carries `weight`.
	/// The caller is responsible for keeping `weight` in range.
	pub fn with_updated_edge_weight(&self, a: &str, b: &str, weight: Weight) -> Result<Self> {
		let idx = self
			.position_of(a, b)
			.ok_or_else(|| RelationError::EdgeNotFound {
				from: a.to_string(),
				to: b.to_string(),
			})?;
		let mut next = self.clone();
		next.edges[idx].weight = weight;
		Ok(next)
	}

	/// Builds a graph from parts already known to be consistent, such as a
	/// filtered copy of an existing snapshot.
	pub(crate) fn from_valid_parts(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
		Self { nodes, edges }
	}

	pub(crate) fn set_weight_at(&mut self, idx: usize, weight: Weight) {
		self.edges[idx].weight = weight;
	}

	fn position_of(&self, a: &str, b: &str) -> Option<usize> {
		self.edges.iter().position(|edge| edge.connects(a, b))
	}
}
