use log::debug;

use super::change_log::ChangeLog;
use super::error::Result;
use super::graph::RelationGraph;
use super::neighbors::neighbor_ids;
use super::propagation::{PropagationRules, apply_edit_with};
use super::types::{NodeId, PropagatedChange};
use super::view::{induced_subgraph, induced_subgraph_for_set};

/// What part of the graph is on screen.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Focus {
	#[default]
	All,
	/// One node and its neighbors, with only the focus's own edges.
	Node(NodeId),
	/// An explicit selection and every edge inside it.
	Set(Vec<NodeId>),
}

/// Current snapshot plus the bookkeeping a front end needs between edits.
/// Edits are applied one at a time through `&mut self`.
#[derive(Clone, Debug, Default)]
pub struct RelationSession {
	graph: RelationGraph,
	log: ChangeLog,
	focus: Focus,
	rules: PropagationRules,
}

impl RelationSession {
	pub fn new(graph: RelationGraph) -> Self {
		Self::with_rules(graph, PropagationRules::default())
	}

	pub fn with_rules(graph: RelationGraph, rules: PropagationRules) -> Self {
		Self {
			graph,
			log: ChangeLog::default(),
			focus: Focus::All,
			rules,
		}
	}

	pub fn graph(&self) -> &RelationGraph {
		&self.graph
	}

	pub fn change_log(&self) -> &ChangeLog {
		&self.log
	}

	pub fn focus(&self) -> &Focus {
		&self.focus
	}

	/// Applies a user edit and returns the propagated changes. On error the
	/// session is left as it was.
	pub fn request_edge_weight_change(
		&mut self,
		from: &str,
		to: &str,
		new_weight: i64,
	) -> Result<Vec<PropagatedChange>> {
		let outcome = apply_edit_with(&self.rules, &self.graph, from, to, new_weight)?;
		self.graph = outcome.graph;
		self.log = std::mem::take(&mut self.log).record(outcome.changes.iter().cloned());
		Ok(outcome.changes)
	}

	/// Empties the change log, e.g. once the report has been dismissed.
	pub fn dismiss_changes(&mut self) {
		self.log = std::mem::take(&mut self.log).clear();
	}

	pub fn focus_on(&mut self, id: &str) {
		self.focus = Focus::Node(id.to_string());
	}

	/// Focuses on `id` and its related nodes, including the edges among them.
	pub fn focus_on_related(&mut self, id: &str) -> Result<()> {
		self.graph.get_node(id)?;
		let mut ids = vec![id.to_string()];
		ids.extend(neighbor_ids(&self.graph, id).into_iter().map(str::to_string));
		debug!("focusing on {id} and {} related", ids.len() - 1);
		self.focus = Focus::Set(ids);
		Ok(())
	}

	pub fn clear_focus(&mut self) {
		self.focus = Focus::All;
	}

	/// The subgraph to draw, recomputed from the current snapshot.
	pub fn visible_graph(&self) -> RelationGraph {
		match &self.focus {
			Focus::All => self.graph.clone(),
			Focus::Node(id) => induced_subgraph(&self.graph, id),
			Focus::Set(ids) => induced_subgraph_for_set(&self.graph, ids.as_slice()),
		}
	}
}
