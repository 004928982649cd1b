mod change_log;
mod error;
mod graph;
mod load;
pub mod neighbors;
pub mod palette;
mod propagation;
mod session;
mod types;
mod view;

pub use change_log::ChangeLog;
pub use error::{RelationError, Result};
pub use graph::RelationGraph;
pub use neighbors::{edges_touching, other_endpoint, related_nodes, weight_between};
pub use palette::{StrengthBucket, StrengthPalette};
pub use propagation::{Propagation, PropagationRules, apply_edit, apply_edit_with, third_parties};
pub use session::{Focus, RelationSession};
pub use types::{
	Edge, MAX_WEIGHT, MIN_WEIGHT, Node, NodeId, Position, PropagatedChange, Weight, clamp_weight,
};
pub use view::{induced_subgraph, induced_subgraph_for_set};
