//! Contact engagement core: scoring, ordered filter stack and the
//! company → role → person hierarchy.
//!
//! ```text
//! FilterEvent ──> filters::reduce ──> FilterSession
//!                                        │
//! Dataset ──────────────> pipeline::apply ┘──> FilterOutcome.visible
//!                                                    │
//!                              hierarchy::GraphBuilder::build(min_score)
//!                                                    │
//!                                         HierarchyGraph { nodes, edges }
//! ```
//!
//! Nothing in here touches the DOM; the page wires these pieces to signals.

pub mod contact;
pub mod filters;
pub mod hierarchy;
pub mod pipeline;
pub mod score;

pub use contact::{Column, Contact, Dataset, DatasetSchema, Signals};
pub use filters::{
	FieldId, FieldStatus, FilterEvent, FilterOrderState, FilterSession, Selections, Transition,
	reduce,
};
pub use hierarchy::{GraphBuilder, GraphEdge, GraphNode, HierarchyGraph, NodeKey, PersonGrouping};
pub use pipeline::{FilterOutcome, FilterStage, apply};
pub use score::{engagement_score, role_multiplier, signal_points};
