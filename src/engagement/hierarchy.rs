//! Three-tier company → role → person graph.
//!
//! Company and role nodes carry the maximum score of their members, so a
//! group survives the threshold whenever any member does. A person's own
//! score is never above its role node's, which keeps every edge target
//! inside the node set.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use super::contact::Contact;

/// Node identity. Composite keys are structured, so names containing `@`
/// cannot collide; people with the same full name share a node.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodeKey {
	/// Synthetic root.
	Root,
	/// A company.
	Company(String),
	/// A role inside a company.
	Role {
		/// Owning company.
		company: String,
		/// Role title.
		role: String,
	},
	/// A person, keyed by full name.
	Person(String),
}

impl NodeKey {
	/// Depth below the root.
	pub fn tier(&self) -> u8 {
		match self {
			Self::Root => 0,
			Self::Company(_) => 1,
			Self::Role { .. } => 2,
			Self::Person(_) => 3,
		}
	}
}

impl fmt::Display for NodeKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Root => f.write_str("root"),
			Self::Company(company) => f.write_str(company),
			Self::Role { company, role } => write!(f, "{company}@{role}"),
			Self::Person(name) => f.write_str(name),
		}
	}
}

/// A node ready for rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphNode {
	/// Identity.
	pub key: NodeKey,
	/// Display text including the score.
	pub label: String,
	/// Visual weight: the (max) score, 1 for the root.
	pub size: u32,
	/// Colour group.
	pub group: String,
}

/// Parent → child link.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GraphEdge {
	/// Parent node.
	pub source: NodeKey,
	/// Child node.
	pub target: NodeKey,
}

/// Output of one build.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HierarchyGraph {
	/// Root first, then companies, roles and people.
	pub nodes: Vec<GraphNode>,
	/// Unique edges.
	pub edges: Vec<GraphEdge>,
}

impl HierarchyGraph {
	/// Look up a node by key.
	pub fn node(&self, key: &NodeKey) -> Option<&GraphNode> {
		self.nodes.iter().find(|n| &n.key == key)
	}

	/// Whether `key` was emitted.
	pub fn contains(&self, key: &NodeKey) -> bool {
		self.node(key).is_some()
	}
}

/// Colour group for person nodes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonGrouping {
	/// Colour by role title.
	#[default]
	Role,
	/// Colour by company, same as the parent nodes.
	Company,
}

/// Builds [`HierarchyGraph`]s from filtered contacts.
#[derive(Clone, Copy, Debug, Default)]
pub struct GraphBuilder {
	grouping: PersonGrouping,
}

impl GraphBuilder {
	/// Builder colouring people by `grouping`.
	pub fn new(grouping: PersonGrouping) -> Self {
		Self { grouping }
	}

	/// Build the graph for `subset`, dropping nodes whose (max) score is below `min_score`.
	pub fn build<'a, I>(&self, subset: I, min_score: u32) -> HierarchyGraph
	where
		I: IntoIterator<Item = &'a Contact>,
	{
		let mut company_max: BTreeMap<&str, u32> = BTreeMap::new();
		let mut role_max: BTreeMap<(&str, &str), u32> = BTreeMap::new();
		let mut people = Vec::new();
		for contact in subset {
			let score = contact.score();
			let company = company_max.entry(contact.company.as_str()).or_default();
			*company = (*company).max(score);
			let role = role_max
				.entry((contact.company.as_str(), contact.role.as_str()))
				.or_default();
			*role = (*role).max(score);
			people.push(contact);
		}

		let mut nodes = vec![GraphNode {
			key: NodeKey::Root,
			label: "root".into(),
			size: 1,
			group: "root".into(),
		}];
		let mut edges = IndexSet::new();

		for (company, score) in company_max {
			if score < min_score {
				continue;
			}
			let key = NodeKey::Company(company.to_string());
			edges.insert(GraphEdge {
				source: NodeKey::Root,
				target: key.clone(),
			});
			nodes.push(GraphNode {
				key,
				label: format!("{company}\n(max score={score})"),
				size: score,
				group: company.to_string(),
			});
		}

		for ((company, role), score) in role_max {
			if score < min_score {
				continue;
			}
			let key = role_key(company, role);
			edges.insert(GraphEdge {
				source: NodeKey::Company(company.to_string()),
				target: key.clone(),
			});
			nodes.push(GraphNode {
				key,
				label: format!("{role}\n(max score={score})"),
				size: score,
				group: company.to_string(),
			});
		}

		let mut seen = HashSet::new();
		for contact in people {
			let score = contact.score();
			if score < min_score {
				continue;
			}
			let key = NodeKey::Person(contact.full_name.clone());
			edges.insert(GraphEdge {
				source: role_key(&contact.company, &contact.role),
				target: key.clone(),
			});
			if !seen.insert(contact.full_name.as_str()) {
				continue;
			}
			let group = match self.grouping {
				PersonGrouping::Role => &contact.role,
				PersonGrouping::Company => &contact.company,
			};
			nodes.push(GraphNode {
				key,
				label: format!("{}\n(score={score})", contact.full_name),
				size: score,
				group: group.clone(),
			});
		}

		HierarchyGraph {
			nodes,
			edges: edges.into_iter().collect(),
		}
	}
}

fn role_key(company: &str, role: &str) -> NodeKey {
	NodeKey::Role {
		company: company.to_string(),
		role: role.to_string(),
	}
}
