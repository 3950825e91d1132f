//! App configuration and the two visual profiles.
//!
//! All of it is embedded at build time and parsed once on start-up.

use force_graph::SimulationParameters;
use serde::{Deserialize, Serialize};

use crate::engagement::{Column, Dataset, DatasetSchema, PersonGrouping};
use crate::error::{LoadError, Result};

const APP_JSON: &str = include_str!("../config/app.json");
const RADIAL_JSON: &str = include_str!("../config/radial.json");
const HIERARCHICAL_JSON: &str = include_str!("../config/hierarchical.json");

/// Graph presentation selected by the mode control.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GraphMode {
	/// Root in the centre, tiers on rings.
	#[default]
	Radial,
	/// Tiers on horizontal bands.
	Hierarchical,
}

impl GraphMode {
	/// Every mode in selector order.
	pub const ALL: [Self; 2] = [Self::Radial, Self::Hierarchical];

	/// Label shown in the selector.
	pub fn label(self) -> &'static str {
		match self {
			Self::Radial => "Radial",
			Self::Hierarchical => "Hierárquico",
		}
	}

	/// Inverse of [`GraphMode::label`].
	pub fn from_label(label: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|m| m.label() == label)
	}
}

/// Session defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
	/// Dataset header names.
	pub schema: DatasetSchema,
	/// Filterable columns in display order.
	pub filters: Vec<Column>,
	/// Initial minimum score.
	pub min_score: u32,
	/// Colour group for person nodes.
	pub person_grouping: PersonGrouping,
	/// Initial graph mode.
	pub mode: GraphMode,
}

impl Default for AppConfig {
	fn default() -> Self {
		Self {
			schema: DatasetSchema::default(),
			filters: vec![Column::Company, Column::Role],
			min_score: 0,
			person_grouping: PersonGrouping::default(),
			mode: GraphMode::default(),
		}
	}
}

impl AppConfig {
	/// The shipped `config/app.json`.
	pub fn embedded() -> Result<Self> {
		Self::from_json(APP_JSON)
	}

	/// Parse a config document; absent keys take defaults.
	pub fn from_json(text: &str) -> Result<Self> {
		Ok(serde_json::from_str(text)?)
	}

	/// Every declared filter must have a column in `dataset`.
	pub fn validate(&self, dataset: &Dataset) -> Result<()> {
		match self.filters.iter().find(|c| !dataset.supports(**c)) {
			Some(column) => Err(LoadError::UnavailableFilter(
				column.label(&self.schema).to_string(),
			)),
			None => Ok(()),
		}
	}
}

/// How tiers are placed on the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
	/// Concentric rings, root pinned in the centre.
	Radial,
	/// One horizontal band per tier.
	Layered,
}

/// Force simulation knobs, mirrored from `force_graph`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationSettings {
	/// Node repulsion.
	pub force_charge: f32,
	/// Edge spring strength.
	pub force_spring: f32,
	/// Force clamp.
	pub force_max: f32,
	/// Velocity scale.
	pub node_speed: f32,
	/// Velocity decay per tick.
	pub damping_factor: f32,
}

impl From<SimulationSettings> for SimulationParameters {
	fn from(s: SimulationSettings) -> Self {
		Self {
			force_charge: s.force_charge,
			force_spring: s.force_spring,
			force_max: s.force_max,
			node_speed: s.node_speed,
			damping_factor: s.damping_factor,
		}
	}
}

/// Node radius as a function of node size.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeScale {
	/// Radius for size ≤ 1.
	pub min_radius: f64,
	/// Radius for size ≥ `max_size`.
	pub max_radius: f64,
	/// Size at which the radius saturates.
	pub max_size: f64,
}

/// One visual profile.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphProfile {
	/// Tier placement.
	pub layout: Layout,
	/// Simulation knobs.
	pub simulation: SimulationSettings,
	/// Radius scaling.
	pub node_scale: NodeScale,
	/// Distance between tiers (ring spacing or band height).
	pub tier_spacing: f64,
}

/// Both profiles, keyed by mode.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GraphProfiles {
	radial: GraphProfile,
	hierarchical: GraphProfile,
}

impl GraphProfiles {
	/// The shipped profile files.
	pub fn embedded() -> Result<Self> {
		Ok(Self {
			radial: serde_json::from_str(RADIAL_JSON)?,
			hierarchical: serde_json::from_str(HIERARCHICAL_JSON)?,
		})
	}

	/// Profile forwarded to the renderer for `mode`.
	pub fn for_mode(&self, mode: GraphMode) -> GraphProfile {
		match mode {
			GraphMode::Radial => self.radial,
			GraphMode::Hierarchical => self.hierarchical,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	#[test]
	fn embedded_files_parse() {
		let config = AppConfig::embedded().unwrap();
		assert_eq!(config.filters, vec![Column::Company, Column::Role]);
		let profiles = GraphProfiles::embedded().unwrap();
		assert_eq!(profiles.for_mode(GraphMode::Radial).layout, Layout::Radial);
		assert_eq!(
			profiles.for_mode(GraphMode::Hierarchical).layout,
			Layout::Layered
		);
	}

	#[test]
	fn missing_keys_take_defaults() {
		let config = AppConfig::from_json(r#"{ "min_score": 4 }"#).unwrap();
		assert_eq!(config.min_score, 4);
		assert_eq!(config.schema, DatasetSchema::default());
		assert_eq!(config.person_grouping, PersonGrouping::Role);
	}

	#[test]
	fn industry_filter_needs_industry_column() {
		let config = AppConfig::from_json(r#"{ "filters": ["industry", "company"] }"#).unwrap();
		let err = config.validate(&Dataset::default()).unwrap_err();
		assert!(matches!(err, LoadError::UnavailableFilter(ref c) if c == "Setor"));
	}

	#[test]
	fn mode_labels_round_trip() {
		for mode in GraphMode::ALL {
			assert_eq!(GraphMode::from_label(mode.label()), Some(mode));
		}
		assert_eq!(GraphMode::from_label("3D"), None);
	}
}
