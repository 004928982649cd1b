use serde::{Deserialize, Serialize};

use super::types::{MIN_WEIGHT, Weight};

const PARTICLE_SPEED_PER_STEP: f64 = 0.0004;

/// Colors at or above `min` use `color`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StrengthBucket {
	pub min: Weight,
	pub color: String,
}

impl StrengthBucket {
	fn new(min: Weight, color: &str) -> Self {
		Self {
			min,
			color: color.to_string(),
		}
	}
}

/// Presentation policy mapping relation strength to a color. Buckets are
/// checked in order; the first with `min <= weight` wins.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StrengthPalette {
	pub buckets: Vec<StrengthBucket>,
	pub fallback: String,
}

impl Default for StrengthPalette {
	/// Canvas variant: weak negatives red, strong negatives dark red.
	fn default() -> Self {
		Self {
			buckets: vec![
				StrengthBucket::new(7, "green"),
				StrengthBucket::new(3, "orange"),
				StrengthBucket::new(0, "gray"),
				StrengthBucket::new(-4, "red"),
			],
			fallback: "darkred".into(),
		}
	}
}

impl StrengthPalette {
	/// Graph view variant, with the two negative colors swapped.
	pub fn graph_view() -> Self {
		Self {
			buckets: vec![
				StrengthBucket::new(7, "green"),
				StrengthBucket::new(3, "orange"),
				StrengthBucket::new(0, "gray"),
				StrengthBucket::new(-4, "darkred"),
			],
			fallback: "red".into(),
		}
	}

	pub fn color_for(&self, weight: Weight) -> &str {
		self.buckets
			.iter()
			.find(|bucket| bucket.min <= weight)
			.map_or(self.fallback.as_str(), |bucket| bucket.color.as_str())
	}
}

/// Speed of the flow particles drawn along an edge; the weakest relation
/// still moves at one step.
pub fn particle_speed(weight: Weight) -> f64 {
	if weight <= MIN_WEIGHT {
		PARTICLE_SPEED_PER_STEP
	} else {
		(weight - MIN_WEIGHT) as f64 * PARTICLE_SPEED_PER_STEP
	}
}
