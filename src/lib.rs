//! Weighted country relation graph with edit propagation.
//!
//! A front end loads a [`RelationGraph`], reports slider edits through
//! [`apply_edit`] (or a [`RelationSession`]), and draws whatever
//! [`induced_subgraph`] or [`induced_subgraph_for_set`] hand back.

mod relations;

pub use relations::*;

/// Initialize logging and panic hooks for the WASM target.
#[cfg(feature = "wasm")]
pub fn init_logging() {
	let _ = console_log::init_with_level(log::Level::Debug);
	console_error_panic_hook::set_once();
	log::info!("Logging initialized");
}
