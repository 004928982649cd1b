use thiserror::Error;

/// Errors returned by graph queries and edits. None of them leave a
/// partially updated graph behind.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RelationError {
	/// An edit named a pair with no existing relation.
	#[error("no relation between {from} and {to}")]
	EdgeNotFound { from: String, to: String },

	/// A query named a node that is not in the graph.
	#[error("unknown node: {0}")]
	NodeNotFound(String),

	/// `node` is not an endpoint of the edge `from`-`to`.
	#[error("{node} is not an endpoint of {from}-{to}")]
	NotIncident {
		node: String,
		from: String,
		to: String,
	},

	/// Propagation rules outside their valid range.
	#[error("invalid propagation rules: {0}")]
	InvalidRules(String),

	/// The graph document could not be parsed at all.
	#[error("load error: {0}")]
	Load(String),
}

impl From<serde_json::Error> for RelationError {
	fn from(err: serde_json::Error) -> Self {
		RelationError::Load(err.to_string())
	}
}

/// Result alias for this crate.
pub type Result<T> = std::result::Result<T, RelationError>;
