//! Graph data structures for input to the force graph component.

use crate::graph::NodeType;

/// A node in the graph.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	/// Unique identifier for this node. Used to reference nodes in links.
	pub id: String,
	pub label: String,
	/// Picks the node's fill from the theme palette.
	pub node_type: NodeType,
}

/// A directed, labeled edge between two nodes.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphLink {
	pub source: String,
	pub target: String,
	pub label: String,
}

/// Complete graph data: nodes and links.
///
/// A change of `epoch` replaces the layout; a change of `revision` alone
/// re-runs it over the existing positions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphData {
	pub epoch: u64,
	pub revision: u64,
	pub nodes: Vec<GraphNode>,
	pub links: Vec<GraphLink>,
}
