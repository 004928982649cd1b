use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::types::PropagatedChange;

/// Propagated changes accumulated across edits until the consumer clears
/// them. Entries are unique and keep their first-seen order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChangeLog {
	entries: Vec<PropagatedChange>,
}

impl ChangeLog {
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends `changes`, skipping any record already present.
	pub fn record<I>(mut self, changes: I) -> Self
	where
		I: IntoIterator<Item = PropagatedChange>,
	{
		let mut seen: HashSet<PropagatedChange> = self.entries.iter().cloned().collect();
		for change in changes {
			if seen.insert(change.clone()) {
				self.entries.push(change);
			}
		}
		self
	}

	/// Drops every entry.
	pub fn clear(self) -> Self {
		Self::default()
	}

	pub fn entries(&self) -> &[PropagatedChange] {
		&self.entries
	}

	pub fn iter(&self) -> std::slice::Iter<'_, PropagatedChange> {
		self.entries.iter()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

impl<'a> IntoIterator for &'a ChangeLog {
	type Item = &'a PropagatedChange;
	type IntoIter = std::slice::Iter<'a, PropagatedChange>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}
