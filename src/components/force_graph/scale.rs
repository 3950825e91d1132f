//! Node size → radius mapping.

use crate::config::NodeScale;

/// Area grows linearly with size, clamped to the profile's bounds.
pub fn node_radius(size: f64, scale: &NodeScale) -> f64 {
	let span = (scale.max_size - 1.0).max(1.0);
	let t = ((size - 1.0) / span).clamp(0.0, 1.0);
	let (lo, hi) = (scale.min_radius.powi(2), scale.max_radius.powi(2));
	(lo + (hi - lo) * t).sqrt()
}
