//! Weight-edit propagation.
//!
//! Editing the relation between `from` and `to` nudges the relations both
//! of them hold with a shared third party. A third party that is strongly
//! aligned with both (average weight above the threshold) or strongly
//! opposed to both (average below the negative threshold) gets its two
//! relations pushed one step further in the direction of the edit; a
//! worsening edit flips the sign. Every average is read from the snapshot
//! taken right after the primary edit, so the visiting order never changes
//! the result.

use std::collections::{HashMap, HashSet};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::error::{RelationError, Result};
use super::graph::RelationGraph;
use super::neighbors::PairIndex;
use super::types::{MAX_WEIGHT, MIN_WEIGHT, NodeId, PropagatedChange, Weight, clamp_weight};

/// Largest nudge that still fits inside the weight range.
const MAX_STEP: Weight = MAX_WEIGHT - MIN_WEIGHT;

/// Thresholds of the propagation rule table.
///
/// `threshold` is a finite, non-negative bound and `step` lies in
/// `1..=MAX_STEP`; both are checked on construction and on deserialization.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RulesConfig")]
pub struct PropagationRules {
	threshold: f64,
	step: Weight,
}

#[derive(Deserialize)]
#[serde(default)]
struct RulesConfig {
	threshold: f64,
	step: i64,
}

impl Default for RulesConfig {
	fn default() -> Self {
		let rules = PropagationRules::default();
		Self {
			threshold: rules.threshold,
			step: rules.step as i64,
		}
	}
}

impl TryFrom<RulesConfig> for PropagationRules {
	type Error = RelationError;

	fn try_from(config: RulesConfig) -> Result<Self> {
		Self::new(config.threshold, config.step)
	}
}

impl Default for PropagationRules {
	fn default() -> Self {
		Self {
			threshold: 4.0,
			step: 1,
		}
	}
}

impl PropagationRules {
	/// Builds a rule table, rejecting a negative or non-finite threshold and
	/// a step outside `1..=MAX_STEP`.
	pub fn new(threshold: f64, step: i64) -> Result<Self> {
		if !threshold.is_finite() || threshold < 0.0 {
			return Err(RelationError::InvalidRules(format!(
				"threshold must be finite and non-negative, got {threshold}"
			)));
		}
		if !(1..=MAX_STEP as i64).contains(&step) {
			return Err(RelationError::InvalidRules(format!(
				"step must be within 1..={MAX_STEP}, got {step}"
			)));
		}
		Ok(Self {
			threshold,
			step: step as Weight,
		})
	}

	/// Exclusive bound on the third party's average weight.
	pub fn threshold(&self) -> f64 {
		self.threshold
	}

	/// Size of one nudge.
	pub fn step(&self) -> Weight {
		self.step
	}

	/// Signed adjustment for a third party whose average weight with the
	/// edited pair is `avg`.
	pub fn delta(&self, avg: f64, improved: bool) -> i64 {
		let polarity: i64 = if avg > self.threshold {
			1
		} else if avg < -self.threshold {
			-1
		} else {
			return 0;
		};
		let step = self.step as i64;
		if improved {
			polarity * step
		} else {
			-polarity * step
		}
	}
}

/// Outcome of a single edit.
#[derive(Clone, Debug, PartialEq)]
pub struct Propagation {
	/// Snapshot with the primary and every secondary adjustment applied.
	pub graph: RelationGraph,
	/// The user's own edit.
	pub primary: PropagatedChange,
	/// Secondary adjustments, in graph edge order.
	pub changes: Vec<PropagatedChange>,
}

impl Propagation {
	/// True if the edit made the primary relation strictly better.
	pub fn improved(&self) -> bool {
		self.primary.new_weight > self.primary.old_weight
	}
}

/// Applies an edit with the default rules.
pub fn apply_edit(
	graph: &RelationGraph,
	from: &str,
	to: &str,
	new_weight: i64,
) -> Result<Propagation> {
	apply_edit_with(&PropagationRules::default(), graph, from, to, new_weight)
}

/// Sets the `from`-`to` relation to `new_weight` (clamped) and propagates
/// the change to relations with shared third parties. Fails with
/// `EdgeNotFound` before doing anything if the relation does not exist.
pub fn apply_edit_with(
	rules: &PropagationRules,
	graph: &RelationGraph,
	from: &str,
	to: &str,
	new_weight: i64,
) -> Result<Propagation> {
	let new_weight = clamp_weight(new_weight);
	let primary_edge = graph.get_edge(from, to)?;
	let old_weight = primary_edge.weight;
	let primary = PropagatedChange {
		from: primary_edge.from.clone(),
		to: primary_edge.to.clone(),
		old_weight,
		new_weight,
	};

	let staged = graph.with_updated_edge_weight(from, to, new_weight)?;
	let improved = new_weight > old_weight;

	let pairs = PairIndex::new(&staged);
	let mut deltas: HashMap<&str, i64> = HashMap::new();
	for third in third_parties(&staged, from, to) {
		let (Some(with_from), Some(with_to)) =
			(pairs.weight(third, from), pairs.weight(third, to))
		else {
			debug!("{third}: missing a relation with {from}/{to}, skipped");
			continue;
		};
		let avg = (with_from as f64 + with_to as f64) / 2.0;
		let delta = rules.delta(avg, improved);
		debug!("{third}: avg {avg} with {from}/{to}, delta {delta}");
		if delta != 0 {
			deltas.insert(third.as_str(), delta);
		}
	}

	let mut updated = staged.clone();
	let mut changes = Vec::new();
	for (idx, edge) in staged.edges().iter().enumerate() {
		let third = match (edge.touches(from), edge.touches(to)) {
			(true, false) => edge.other_endpoint(from)?,
			(false, true) => edge.other_endpoint(to)?,
			_ => continue,
		};
		let Some(&delta) = deltas.get(third) else {
			continue;
		};

		let adjusted = clamp_weight(edge.weight as i64 + delta);
		updated.set_weight_at(idx, adjusted);
		changes.push(PropagatedChange {
			from: edge.from.clone(),
			to: edge.to.clone(),
			old_weight: edge.weight,
			new_weight: adjusted,
		});
	}

	info!(
		"{from}-{to}: {old_weight} -> {new_weight}, {} propagated",
		changes.len()
	);
	Ok(Propagation {
		graph: updated,
		primary,
		changes,
	})
}

/// Nodes other than `from` and `to` that share an edge with either of them,
/// in graph edge order.
pub fn third_parties<'g>(graph: &'g RelationGraph, from: &str, to: &str) -> Vec<&'g NodeId> {
	let mut seen: HashSet<&str> = HashSet::new();
	let mut out: Vec<&NodeId> = Vec::new();
	for edge in graph.edges() {
		for (near, far) in [(&edge.from, &edge.to), (&edge.to, &edge.from)] {
			if (near == from || near == to) && far != from && far != to && seen.insert(far.as_str()) {
				out.push(far);
			}
		}
	}
	out
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::relations::types::{Edge, Node};

	fn triangle(ab: Weight, ac: Weight, bc: Weight) -> RelationGraph {
		RelationGraph::from_parts(
			vec![
				Node::new("A", "ar", 0.0, 0.0),
				Node::new("B", "br", 0.0, 0.0),
				Node::new("C", "cl", 0.0, 0.0),
			],
			vec![
				Edge::new("A", "B", ab),
				Edge::new("A", "C", ac),
				Edge::new("B", "C", bc),
			],
		)
	}

	#[test]
	fn rule_table() {
		let rules = PropagationRules::default();
		assert_eq!(rules.delta(5.5, true), 1);
		assert_eq!(rules.delta(5.5, false), -1);
		assert_eq!(rules.delta(-5.5, true), -1);
		assert_eq!(rules.delta(-5.5, false), 1);
		assert_eq!(rules.delta(4.0, true), 0);
		assert_eq!(rules.delta(-4.0, false), 0);
		assert_eq!(rules.delta(0.0, true), 0);
	}

	#[test]
	fn improving_edit_pushes_aligned_party_up() {
		let out = apply_edit(&triangle(2, 6, 5), "A", "B", 8).unwrap();
		assert!(out.improved());
		assert_eq!(out.graph.get_edge("A", "B").unwrap().weight, 8);
		assert_eq!(out.graph.get_edge("A", "C").unwrap().weight, 7);
		assert_eq!(out.graph.get_edge("B", "C").unwrap().weight, 6);
		assert_eq!(
			out.changes,
			vec![
				PropagatedChange {
					from: "A".into(),
					to: "C".into(),
					old_weight: 6,
					new_weight: 7
				},
				PropagatedChange {
					from: "B".into(),
					to: "C".into(),
					old_weight: 5,
					new_weight: 6
				},
			]
		);
	}

	#[test]
	fn worsening_edit_pulls_aligned_party_down() {
		let out = apply_edit(&triangle(8, 6, 5), "A", "B", 2).unwrap();
		assert!(!out.improved());
		assert_eq!(out.graph.get_edge("A", "C").unwrap().weight, 5);
		assert_eq!(out.graph.get_edge("B", "C").unwrap().weight, 4);
		assert_eq!(out.changes.len(), 2);
	}

	#[test]
	fn opposed_party_follows_improvement_negatively() {
		let out = apply_edit(&triangle(0, -6, -10), "B", "A", 3).unwrap();
		assert_eq!(out.graph.get_edge("A", "C").unwrap().weight, -7);
		// already at the floor
		assert_eq!(out.graph.get_edge("B", "C").unwrap().weight, -10);
		assert_eq!(out.changes[1].old_weight, -10);
		assert_eq!(out.changes[1].new_weight, -10);
	}

	#[test]
	fn boundary_average_is_ignored() {
		let out = apply_edit(&triangle(0, 4, 4), "A", "B", 10).unwrap();
		assert!(out.changes.is_empty());
		let out = apply_edit(&triangle(0, -3, -5), "A", "B", 10).unwrap();
		assert!(out.changes.is_empty());
	}

	#[test]
	fn unchanged_weight_counts_as_worsened() {
		let out = apply_edit(&triangle(3, 6, 6), "A", "B", 3).unwrap();
		assert!(!out.improved());
		assert_eq!(out.graph.get_edge("A", "C").unwrap().weight, 5);
	}

	#[test]
	fn new_weight_is_clamped() {
		let out = apply_edit(&triangle(0, 0, 0), "A", "B", 99).unwrap();
		assert_eq!(out.primary.new_weight, 10);
		assert_eq!(out.graph.get_edge("A", "B").unwrap().weight, 10);
	}

	#[test]
	fn missing_edge_fails_without_change() {
		let graph = RelationGraph::from_parts(
			vec![Node::new("A", "ar", 0.0, 0.0), Node::new("B", "br", 0.0, 0.0)],
			vec![],
		);
		assert!(matches!(
			apply_edit(&graph, "A", "B", 5),
			Err(RelationError::EdgeNotFound { .. })
		));
	}

	#[test]
	fn custom_rules_widen_threshold() {
		let rules = PropagationRules::new(6.0, 2).unwrap();
		let out = apply_edit_with(&rules, &triangle(2, 6, 5), "A", "B", 8).unwrap();
		assert!(out.changes.is_empty());
		let out = apply_edit_with(&rules, &triangle(2, 8, 7), "A", "B", 8).unwrap();
		assert_eq!(out.graph.get_edge("A", "C").unwrap().weight, 10);
		assert_eq!(out.graph.get_edge("B", "C").unwrap().weight, 9);
	}

	#[test]
	fn rules_reject_bad_values() {
		assert!(matches!(
			PropagationRules::new(-5.0, 1),
			Err(RelationError::InvalidRules(_))
		));
		assert!(PropagationRules::new(f64::NAN, 1).is_err());
		assert!(PropagationRules::new(f64::INFINITY, 1).is_err());
		assert!(PropagationRules::new(4.0, 0).is_err());
		assert!(PropagationRules::new(4.0, i32::MIN as i64).is_err());
		assert!(PropagationRules::new(4.0, 21).is_err());
		assert_eq!(PropagationRules::new(0.0, 20).unwrap().step(), 20);
	}

	#[test]
	fn rules_config_is_validated() {
		let rules: PropagationRules = serde_json::from_str(r#"{"step": 3}"#).unwrap();
		assert_eq!(rules.threshold(), 4.0);
		assert_eq!(rules.step(), 3);
		assert_eq!(
			serde_json::from_str::<PropagationRules>("{}").unwrap(),
			PropagationRules::default()
		);
		assert!(serde_json::from_str::<PropagationRules>(r#"{"step": -2147483648}"#).is_err());
		assert!(serde_json::from_str::<PropagationRules>(r#"{"threshold": -5.0}"#).is_err());
	}

	#[test]
	fn largest_step_saturates_at_bounds() {
		let rules = PropagationRules::new(4.0, 20).unwrap();
		let out = apply_edit_with(&rules, &triangle(8, 6, 5), "A", "B", 2).unwrap();
		assert_eq!(out.graph.get_edge("A", "C").unwrap().weight, MIN_WEIGHT);
		assert_eq!(out.graph.get_edge("B", "C").unwrap().weight, MIN_WEIGHT);
	}

	#[test]
	fn party_without_both_relations_is_skipped() {
		let graph = RelationGraph::from_parts(
			vec![
				Node::new("A", "ar", 0.0, 0.0),
				Node::new("B", "br", 0.0, 0.0),
				Node::new("C", "cl", 0.0, 0.0),
				Node::new("D", "de", 0.0, 0.0),
			],
			vec![
				Edge::new("A", "B", 0),
				Edge::new("A", "C", 9),
				Edge::new("B", "C", 9),
				Edge::new("D", "B", 9),
			],
		);
		assert_eq!(third_parties(&graph, "A", "B"), vec!["C", "D"]);
		let out = apply_edit(&graph, "A", "B", 5).unwrap();
		assert_eq!(out.changes.len(), 2);
		assert_eq!(out.graph.get_edge("B", "D").unwrap().weight, 9);
	}

	#[test]
	fn third_parties_listed_once() {
		let graph = triangle(1, 1, 1);
		assert_eq!(third_parties(&graph, "A", "B"), vec!["C"]);
	}
}
