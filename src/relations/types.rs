use serde::{Deserialize, Serialize};

use super::error::{RelationError, Result};

/// Stable node identifier (an ISO-like country code in practice).
pub type NodeId = String;

/// Strength of a relation between two nodes.
pub type Weight = i32;

/// Lowest weight a relation can hold.
pub const MIN_WEIGHT: Weight = -10;
/// Highest weight a relation can hold.
pub const MAX_WEIGHT: Weight = 10;

/// Clamps any integer into `[MIN_WEIGHT, MAX_WEIGHT]`.
pub fn clamp_weight(weight: i64) -> Weight {
	weight.clamp(MIN_WEIGHT as i64, MAX_WEIGHT as i64) as Weight
}

/// Geographic position in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
	pub lat: f64,
	#[serde(alias = "lon")]
	pub lng: f64,
}

/// A country.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
	pub id: NodeId,
	/// Flag/asset lookup key.
	pub code: String,
	pub position: Position,
}

impl Node {
	/// Builds a node from its id, asset code and coordinates.
	pub fn new(id: impl Into<NodeId>, code: impl Into<String>, lat: f64, lng: f64) -> Self {
		Self {
			id: id.into(),
			code: code.into(),
			position: Position { lat, lng },
		}
	}
}

/// A weighted relation. The pair is unordered; `from`/`to` only keep the
/// order the relation was stored in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
	#[serde(alias = "source")]
	pub from: NodeId,
	#[serde(alias = "target")]
	pub to: NodeId,
	pub weight: Weight,
}

impl Edge {
	/// Builds an edge, clamping the weight into range.
	pub fn new(from: impl Into<NodeId>, to: impl Into<NodeId>, weight: Weight) -> Self {
		Self {
			from: from.into(),
			to: to.into(),
			weight: clamp_weight(weight as i64),
		}
	}

	/// True if `id` is one of the endpoints.
	pub fn touches(&self, id: &str) -> bool {
		self.from == id || self.to == id
	}

	/// True if the edge joins `a` and `b`, in either direction.
	pub fn connects(&self, a: &str, b: &str) -> bool {
		(self.from == a && self.to == b) || (self.from == b && self.to == a)
	}

	/// Endpoints sorted, so `(a, b)` and `(b, a)` share a key.
	pub fn pair_key(&self) -> (&str, &str) {
		if self.from <= self.to {
			(self.from.as_str(), self.to.as_str())
		} else {
			(self.to.as_str(), self.from.as_str())
		}
	}

	/// The endpoint that is not `id`.
	pub fn other_endpoint(&self, id: &str) -> Result<&str> {
		if self.from == id {
			Ok(self.to.as_str())
		} else if self.to == id {
			Ok(self.from.as_str())
		} else {
			Err(RelationError::NotIncident {
				node: id.to_string(),
				from: self.from.clone(),
				to: self.to.clone(),
			})
		}
	}
}

/// One weight adjustment, in the stored endpoint order of the edge it touched.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropagatedChange {
	pub from: NodeId,
	pub to: NodeId,
	pub old_weight: Weight,
	pub new_weight: Weight,
}

impl PropagatedChange {
	/// Signed difference between the new and old weight.
	pub fn delta(&self) -> Weight {
		self.new_weight - self.old_weight
	}
}
