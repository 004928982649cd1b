//! JSON boundary for the initial dataset.
//!
//! Accepts `{nodes: [{id, code, position: {lat, lng}}], edges: [{from, to, weight}]}`
//! as well as the older dataset layout with flat `lat`/`lon` on nodes and
//! `links` carrying `source`/`target`.

use std::io::Read;

use log::warn;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::Result;
use super::graph::RelationGraph;
use super::types::{Edge, Node, Position, clamp_weight};

#[derive(Debug, Deserialize)]
struct NodeRecord {
	id: String,
	#[serde(default)]
	code: Option<String>,
	#[serde(default)]
	position: Option<Position>,
	#[serde(default)]
	lat: Option<f64>,
	#[serde(default, alias = "lng")]
	lon: Option<f64>,
}

impl NodeRecord {
	fn into_node(self) -> Node {
		let position = self.position.unwrap_or(Position {
			lat: self.lat.unwrap_or_default(),
			lng: self.lon.unwrap_or_default(),
		});
		Node {
			code: self.code.unwrap_or_else(|| self.id.to_lowercase()),
			id: self.id,
			position,
		}
	}
}

/// An edge endpoint, either a bare id or an already resolved node object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Endpoint {
	Id(String),
	Node { id: String },
}

impl From<Endpoint> for String {
	fn from(endpoint: Endpoint) -> Self {
		match endpoint {
			Endpoint::Id(id) | Endpoint::Node { id } => id,
		}
	}
}

#[derive(Debug, Deserialize)]
struct EdgeRecord {
	#[serde(default, alias = "source")]
	from: Option<Endpoint>,
	#[serde(default, alias = "target")]
	to: Option<Endpoint>,
	#[serde(default)]
	weight: Option<i64>,
}

impl EdgeRecord {
	fn into_edge(self) -> Option<Edge> {
		match (self.from, self.to, self.weight) {
			(Some(from), Some(to), Some(weight)) => Some(Edge {
				from: from.into(),
				to: to.into(),
				weight: clamp_weight(weight),
			}),
			(from, to, _) => {
				warn!("dropping malformed edge {from:?}-{to:?}");
				None
			}
		}
	}
}

/// Entries are kept as raw values so one bad entry only costs itself.
#[derive(Debug, Deserialize)]
struct DocumentIn {
	#[serde(default)]
	nodes: Vec<Value>,
	#[serde(default, alias = "links")]
	edges: Vec<Value>,
}

fn decode<T: DeserializeOwned>(kind: &str, raw: Value) -> Option<T> {
	match serde_json::from_value(raw) {
		Ok(record) => Some(record),
		Err(err) => {
			warn!("dropping unreadable {kind}: {err}");
			None
		}
	}
}

#[derive(Debug, Serialize)]
struct DocumentOut<'g> {
	nodes: &'g [Node],
	edges: &'g [Edge],
}

impl From<DocumentIn> for RelationGraph {
	fn from(doc: DocumentIn) -> Self {
		let nodes = doc
			.nodes
			.into_iter()
			.filter_map(|raw| decode::<NodeRecord>("node", raw))
			.map(NodeRecord::into_node)
			.collect();
		let edges = doc
			.edges
			.into_iter()
			.filter_map(|raw| decode::<EdgeRecord>("edge", raw))
			.filter_map(EdgeRecord::into_edge)
			.collect();
		RelationGraph::from_parts(nodes, edges)
	}
}

impl RelationGraph {
	/// Parses a graph document. Only unparseable JSON is an error; bad
	/// entries are dropped.
	pub fn from_json_str(json: &str) -> Result<Self> {
		let doc: DocumentIn = serde_json::from_str(json)?;
		Ok(doc.into())
	}

	/// Like [`RelationGraph::from_json_str`], reading from `reader`.
	pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
		let doc: DocumentIn = serde_json::from_reader(reader)?;
		Ok(doc.into())
	}

	/// Serializes the snapshot in the canonical document layout.
	pub fn to_json_string(&self) -> Result<String> {
		let doc = DocumentOut {
			nodes: self.nodes(),
			edges: self.edges(),
		};
		Ok(serde_json::to_string(&doc)?)
	}
}
