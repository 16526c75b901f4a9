//! In-memory graph model: typed nodes, labeled directed edges, and the live
//! graph a view session mutates.

use std::collections::HashSet;
use std::fmt;

use serde::Deserialize;

/// Category of a node. Drives the node's display color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
	/// The system's own components; the root is one.
	Component,
	/// Tooling attached to a component.
	Tool,
	/// Build outputs.
	Artifact,
	/// Cloud resources a component runs on.
	Resource,
	/// Deployment environments.
	Environment,
}

impl NodeType {
	/// Lowercase name, as used in the datasets.
	pub fn as_str(self) -> &'static str {
		match self {
			NodeType::Component => "component",
			NodeType::Tool => "tool",
			NodeType::Artifact => "artifact",
			NodeType::Resource => "resource",
			NodeType::Environment => "environment",
		}
	}
}

impl fmt::Display for NodeType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A graph node.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Node {
	/// Unique within a graph.
	pub id: String,
	/// Display text drawn next to the node.
	pub label: String,
	/// Category; `type` in the datasets.
	#[serde(rename = "type")]
	pub node_type: NodeType,
}

/// A directed edge labeled with its relation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Edge {
	/// `<relation>_<target>`.
	pub id: String,
	/// Source node id.
	pub source: String,
	/// Target node id.
	pub target: String,
	/// Relation keyword.
	pub label: String,
}

impl Edge {
	/// Builds an edge whose id is `<relation>_<target>`.
	pub fn new(source: impl Into<String>, target: impl Into<String>, relation: impl Into<String>) -> Self {
		let (target, label) = (target.into(), relation.into());
		Self {
			id: edge_id(&label, &target),
			source: source.into(),
			target,
			label,
		}
	}
}

/// Id of the edge labeled `relation` that points at `target`.
pub fn edge_id(relation: &str, target: &str) -> String {
	format!("{relation}_{target}")
}

/// The mutable graph behind the canvas for one view session.
///
/// Elements keep their insertion order. There is no removal: a session only
/// ever grows its graph, and a view switch replaces it wholesale.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LiveGraph {
	nodes: Vec<Node>,
	edges: Vec<Edge>,
	node_ids: HashSet<String>,
	edge_ids: HashSet<String>,
}

impl LiveGraph {
	/// An empty graph.
	pub fn new() -> Self {
		Self::default()
	}

	/// Whether a node with `id` exists.
	pub fn has_node(&self, id: &str) -> bool {
		self.node_ids.contains(id)
	}

	/// Whether an edge with `id` exists.
	pub fn has_edge(&self, id: &str) -> bool {
		self.edge_ids.contains(id)
	}

	/// Adds `node` unless a node with the same id exists. Returns whether it was added.
	pub fn add_node(&mut self, node: Node) -> bool {
		if !self.node_ids.insert(node.id.clone()) {
			return false;
		}
		self.nodes.push(node);
		true
	}

	/// Adds `edge` unless an edge with the same id exists. Returns whether it was added.
	pub fn add_edge(&mut self, edge: Edge) -> bool {
		if !self.edge_ids.insert(edge.id.clone()) {
			return false;
		}
		self.edges.push(edge);
		true
	}

	/// Looks up a node by id.
	pub fn node(&self, id: &str) -> Option<&Node> {
		self.nodes.iter().find(|n| n.id == id)
	}

	/// Looks up an edge by id.
	pub fn edge(&self, id: &str) -> Option<&Edge> {
		self.edges.iter().find(|e| e.id == id)
	}

	/// Nodes in insertion order.
	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	/// Edges in insertion order.
	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}
}
