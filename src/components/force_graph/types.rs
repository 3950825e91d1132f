use std::collections::HashMap;

use crate::engagement::{HierarchyGraph, NodeKey};

#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	pub id: NodeKey,
	pub label: Option<String>,
	pub size: f64,
	/// Palette slot, assigned per distinct group in first-seen order.
	pub group: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GraphLink {
	pub source: NodeKey,
	pub target: NodeKey,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub links: Vec<GraphLink>,
}

impl From<&HierarchyGraph> for GraphData {
	fn from(graph: &HierarchyGraph) -> Self {
		let mut groups: HashMap<&str, u32> = HashMap::new();
		let nodes = graph
			.nodes
			.iter()
			.map(|node| {
				let next = groups.len() as u32;
				let group = *groups.entry(node.group.as_str()).or_insert(next);
				GraphNode {
					id: node.key.clone(),
					label: Some(node.label.clone()),
					size: node.size as f64,
					group,
				}
			})
			.collect();
		let links = graph
			.edges
			.iter()
			.map(|edge| GraphLink {
				source: edge.source.clone(),
				target: edge.target.clone(),
			})
			.collect();
		Self { nodes, links }
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::engagement::{Contact, GraphBuilder, PersonGrouping, Signals};

	#[test]
	fn groups_get_stable_palette_slots() {
		let subset = [
			Contact::new("Ana Silva", "Acme", None, "CEO", Signals::default()),
			Contact::new("Bruno Costa", "Beta", None, "CEO", Signals::default()),
		];
		let graph = GraphBuilder::new(PersonGrouping::Company).build(&subset, 0);
		let data = GraphData::from(&graph);
		let slot = |key: NodeKey| data.nodes.iter().find(|n| n.id == key).map(|n| n.group);

		assert_eq!(slot(NodeKey::Root), Some(0));
		assert_eq!(slot(NodeKey::Company("Acme".into())), Some(1));
		assert_eq!(slot(NodeKey::Person("Ana Silva".into())), Some(1));
		assert_eq!(slot(NodeKey::Person("Bruno Costa".into())), Some(2));
		assert_eq!(data.links.len(), graph.edges.len());
	}
}
