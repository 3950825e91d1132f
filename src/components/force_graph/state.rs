use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData};

use super::scale::node_radius;
use super::types::GraphData;
use crate::config::{GraphProfile, Layout};

const COLORS: &[&str] = &[
	"#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
	"#bcbd22", "#17becf",
];

/// Extra pick tolerance around a node, in world space.
pub const HIT_SLOP: f64 = 4.0;

#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub label: Option<String>,
	pub color: String,
	pub radius: f64,
	pub tier: u8,
}

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<DefaultNodeIdx>,
	pub neighbors: HashSet<DefaultNodeIdx>,
	pub highlight_t: f64,
	pub prev_node: Option<DefaultNodeIdx>,
	pub prev_neighbors: HashSet<DefaultNodeIdx>,
	delay_t: f64,
}

pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
	pub animation_running: bool,
	pub flow_time: f64,
	layout: Layout,
	tier_spacing: f64,
	edges: Vec<(DefaultNodeIdx, DefaultNodeIdx)>,
}

/// Seed position for the `slot`-th of `count` nodes on `tier`.
fn seed_position(layout: Layout, spacing: f64, tier: u8, slot: usize, count: usize) -> (f32, f32) {
	let count = count.max(1) as f64;
	let slot = slot as f64;
	match layout {
		Layout::Radial => {
			let angle = slot * 2.0 * PI / count;
			let r = tier as f64 * spacing;
			((r * angle.cos()) as f32, (r * angle.sin()) as f32)
		}
		Layout::Layered => {
			let x = (slot - (count - 1.0) / 2.0) * spacing * 0.5;
			(x as f32, band_y(spacing, tier) as f32)
		}
	}
}

fn band_y(spacing: f64, tier: u8) -> f64 {
	(tier as f64 - 1.5) * spacing
}

impl ForceGraphState {
	pub fn new(data: &GraphData, profile: &GraphProfile, width: f64, height: f64) -> Self {
		let mut graph = ForceGraph::new(profile.simulation.into());
		let mut id_to_idx = HashMap::new();
		let mut edges = Vec::new();

		let mut per_tier: HashMap<u8, usize> = HashMap::new();
		for node in &data.nodes {
			*per_tier.entry(node.id.tier()).or_default() += 1;
		}
		let mut placed: HashMap<u8, usize> = HashMap::new();

		for node in &data.nodes {
			let tier = node.id.tier();
			let slot = placed.entry(tier).or_default();
			let (x, y) = seed_position(
				profile.layout,
				profile.tier_spacing,
				tier,
				*slot,
				per_tier[&tier],
			);
			*slot += 1;

			let idx = graph.add_node(NodeData {
				x,
				y,
				mass: 10.0,
				is_anchor: tier == 0,
				user_data: NodeInfo {
					label: node.label.clone(),
					color: COLORS[node.group as usize % COLORS.len()].into(),
					radius: node_radius(node.size, &profile.node_scale),
					tier,
				},
			});
			id_to_idx.insert(node.id.clone(), idx);
		}

		for link in &data.links {
			if let (Some(&src), Some(&tgt)) =
				(id_to_idx.get(&link.source), id_to_idx.get(&link.target))
			{
				graph.add_edge(src, tgt, EdgeData::default());
				edges.push((src, tgt));
			}
		}

		Self {
			graph,
			edges,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			width,
			height,
			animation_running: true,
			flow_time: 0.0,
			layout: profile.layout,
			tier_spacing: profile.tier_spacing,
		}
	}

	/// Replace the simulation for new data, keeping the current viewport.
	pub fn rebuild(&mut self, data: &GraphData, profile: &GraphProfile) {
		let transform = std::mem::take(&mut self.transform);
		*self = Self::new(data, profile, self.width, self.height);
		self.transform = transform;
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			if (dx * dx + dy * dy).sqrt() < node.data.user_data.radius + HIT_SLOP {
				found = Some(node.index());
			}
		});
		found
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		if self.hover.node == node {
			return;
		}
		let was_hovering = self.hover.node.is_some();

		// Save previous state for fade-out
		if was_hovering && node.is_none() {
			self.hover.prev_node = self.hover.node.take();
			self.hover.prev_neighbors = std::mem::take(&mut self.hover.neighbors);
		} else {
			self.hover.prev_node = None;
			self.hover.prev_neighbors.clear();
		}

		self.hover.node = node;
		self.hover.neighbors.clear();

		if let Some(idx) = node {
			if !was_hovering {
				self.hover.delay_t = 0.0;
			}
			for &(src, tgt) in &self.edges {
				if src == idx {
					self.hover.neighbors.insert(tgt);
				} else if tgt == idx {
					self.hover.neighbors.insert(src);
				}
			}
		}
	}

	pub fn is_highlighted(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx)
			|| self.hover.neighbors.contains(&idx)
			|| self.hover.prev_node == Some(idx)
			|| self.hover.prev_neighbors.contains(&idx)
	}

	pub fn is_hovered(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx) || self.hover.prev_node == Some(idx)
	}

	pub fn has_active_highlight(&self) -> bool {
		self.hover.node.is_some() || self.hover.prev_node.is_some()
	}

	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);
		self.flow_time += dt as f64;

		if self.layout == Layout::Layered {
			let spacing = self.tier_spacing;
			self.graph.visit_nodes_mut(|node| {
				node.data.y = band_y(spacing, node.data.user_data.tier) as f32;
			});
		}

		let (target, delay, speed) = if self.hover.node.is_some() {
			(1.0, 0.08, 1.8)
		} else {
			(0.0, 0.0, 1.26)
		};

		if self.hover.node.is_some() {
			self.hover.delay_t = (self.hover.delay_t + dt as f64).min(delay);
			if self.hover.delay_t >= delay {
				self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			}
		} else {
			self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			if self.hover.highlight_t < 0.01 {
				self.hover.highlight_t = 0.0;
				self.hover.prev_node = None;
				self.hover.prev_neighbors.clear();
			}
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn layered_seeds_sit_on_their_band() {
		let (_, root_y) = seed_position(Layout::Layered, 100.0, 0, 0, 1);
		let (x0, y0) = seed_position(Layout::Layered, 100.0, 3, 0, 3);
		let (x2, y2) = seed_position(Layout::Layered, 100.0, 3, 2, 3);
		assert_eq!(root_y, -150.0);
		assert_eq!((y0, y2), (150.0, 150.0));
		assert_eq!(x0, -x2);
	}

	#[test]
	fn radial_root_is_centered() {
		assert_eq!(seed_position(Layout::Radial, 120.0, 0, 0, 1), (0.0, 0.0));
		let (x, y) = seed_position(Layout::Radial, 120.0, 2, 0, 4);
		assert_eq!((x, y), (240.0, 0.0));
	}
}
