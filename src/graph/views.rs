//! Predefined graph views: seed elements and the relations each view accepts.
//!
//! The datasets are configuration, embedded from `views.json` and validated
//! once at startup.

use std::fmt;
use std::str::FromStr;

use regex::{Regex, RegexBuilder};
use serde::Deserialize;
use thiserror::Error;

use super::model::{Edge, LiveGraph, Node, NodeType};

const BUILTIN_VIEWS: &str = include_str!("views.json");

/// Lowercase subject every command starts with.
const SUBJECT: &str = "component cart";

/// Identifier of one of the predefined views.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewId {
	/// Component–Tool relationships.
	View1,
	/// Component–Environment relationships.
	View2,
}

impl ViewId {
	/// Every view, in selector order.
	pub const ALL: [ViewId; 2] = [ViewId::View1, ViewId::View2];

	/// Value used for the view's `<option>` in the selector.
	pub fn as_str(self) -> &'static str {
		match self {
			ViewId::View1 => "view1",
			ViewId::View2 => "view2",
		}
	}

	fn index(self) -> usize {
		match self {
			ViewId::View1 => 0,
			ViewId::View2 => 1,
		}
	}
}

impl fmt::Display for ViewId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A selector value that names no view.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown view: {0}")]
pub struct UnknownView(pub String);

impl FromStr for ViewId {
	type Err = UnknownView;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		ViewId::ALL
			.into_iter()
			.find(|v| v.as_str() == s)
			.ok_or_else(|| UnknownView(s.to_string()))
	}
}

/// Errors raised while loading view datasets.
#[derive(Debug, Error)]
pub enum ViewStoreError {
	/// The dataset is not valid JSON or has the wrong shape.
	#[error("invalid view dataset: {0}")]
	Parse(#[from] serde_json::Error),

	/// One of the predefined views is absent.
	#[error("view {0} is not defined")]
	MissingView(ViewId),

	/// The same view is defined more than once.
	#[error("view {0} is defined more than once")]
	DuplicateView(ViewId),

	/// A view's seed lacks the shared root node.
	#[error("view {view} has no root node {root}")]
	MissingRoot {
		/// View being loaded.
		view: ViewId,
		/// Expected root node id.
		root: String,
	},

	/// Two seed nodes of one view share an id.
	#[error("node {node} appears more than once in view {view}")]
	DuplicateNode {
		/// View being loaded.
		view: ViewId,
		/// The repeated node id.
		node: String,
	},

	/// A seed edge points at a node the seed does not define.
	#[error("edge {edge} in view {view} references unknown node {node}")]
	DanglingEdge {
		/// View being loaded.
		view: ViewId,
		/// Id of the offending edge.
		edge: String,
		/// The missing endpoint.
		node: String,
	},

	/// A seed edge uses a relation the view does not allow.
	#[error("relation {relation} is not allowed in view {view}")]
	UnknownRelation {
		/// View being loaded.
		view: ViewId,
		/// The rejected relation keyword.
		relation: String,
	},

	/// The view's command pattern failed to compile.
	#[error("command pattern for view {view} is invalid: {source}")]
	Pattern {
		/// View being loaded.
		view: ViewId,
		/// Regex build error.
		#[source]
		source: regex::Error,
	},
}

/// Maps a relation keyword to the type of node it creates.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct RelationRule {
	/// Keyword as typed in a command.
	pub relation: String,
	/// Type given to the command's target node.
	pub node_type: NodeType,
}

#[derive(Deserialize)]
struct RawStore {
	root: String,
	views: Vec<RawView>,
}

#[derive(Deserialize)]
struct RawView {
	id: ViewId,
	title: String,
	example_target: String,
	relations: Vec<RelationRule>,
	seed: RawSeed,
}

#[derive(Deserialize)]
struct RawSeed {
	nodes: Vec<Node>,
	edges: Vec<RawEdge>,
}

#[derive(Deserialize)]
struct RawEdge {
	source: String,
	target: String,
	label: String,
}

/// A validated view definition.
#[derive(Clone, Debug)]
pub struct View {
	/// Which predefined view this is.
	pub id: ViewId,
	/// Label shown in the view selector.
	pub title: String,
	/// Sample target text shown in the command placeholder.
	pub example_target: String,
	/// Id of the node every command-created edge starts from.
	pub root: String,
	relations: Vec<RelationRule>,
	seed: LiveGraph,
	/// `^component cart (<relations>) (.+)$`, case-insensitive.
	pattern: Regex,
}

impl View {
	/// Relation keywords in declaration order.
	pub fn allowed_relations(&self) -> impl Iterator<Item = &str> {
		self.relations.iter().map(|r| r.relation.as_str())
	}

	/// Relation rules in declaration order.
	pub fn relations(&self) -> &[RelationRule] {
		&self.relations
	}

	/// Compiled command pattern. Capture 1 is the relation, capture 2 the
	/// target text.
	pub fn command_pattern(&self) -> &Regex {
		&self.pattern
	}

	/// Node type created by `relation`, if the view allows it.
	pub fn node_type_for(&self, relation: &str) -> Option<NodeType> {
		self.relations
			.iter()
			.find(|r| r.relation == relation)
			.map(|r| r.node_type)
	}

	/// A fresh copy of the view's seed graph.
	pub fn seed_graph(&self) -> LiveGraph {
		self.seed.clone()
	}
}

/// All predefined views, keyed by [`ViewId`].
#[derive(Clone, Debug)]
pub struct ViewStore {
	views: [View; 2],
}

impl ViewStore {
	/// Loads the datasets compiled into the binary.
	pub fn builtin() -> Result<Self, ViewStoreError> {
		Self::from_json(BUILTIN_VIEWS)
	}

	/// Parses and validates a dataset with exactly one entry per [`ViewId`].
	pub fn from_json(json: &str) -> Result<Self, ViewStoreError> {
		let raw: RawStore = serde_json::from_str(json)?;
		let mut slots: [Option<View>; 2] = [None, None];
		for v in raw.views {
			let view = build_view(v, &raw.root)?;
			let slot = &mut slots[view.id.index()];
			if slot.is_some() {
				return Err(ViewStoreError::DuplicateView(view.id));
			}
			*slot = Some(view);
		}
		match slots {
			[Some(view1), Some(view2)] => Ok(Self {
				views: [view1, view2],
			}),
			[None, _] => Err(ViewStoreError::MissingView(ViewId::View1)),
			[_, None] => Err(ViewStoreError::MissingView(ViewId::View2)),
		}
	}

	/// The view definition for `id`.
	pub fn view(&self, id: ViewId) -> &View {
		&self.views[id.index()]
	}

	/// All views, in [`ViewId::ALL`] order.
	pub fn views(&self) -> &[View] {
		&self.views
	}
}

fn command_pattern(relations: &[RelationRule]) -> Result<Regex, regex::Error> {
	let alternatives = relations
		.iter()
		.map(|r| regex::escape(&r.relation))
		.collect::<Vec<_>>();
	RegexBuilder::new(&format!(
		"^{} ({}) (.+)$",
		regex::escape(SUBJECT),
		alternatives.join("|")
	))
	.case_insensitive(true)
	.build()
}

fn build_view(raw: RawView, root: &str) -> Result<View, ViewStoreError> {
	let view = raw.id;
	let mut seed = LiveGraph::new();
	for node in raw.seed.nodes {
		let id = node.id.clone();
		if !seed.add_node(node) {
			return Err(ViewStoreError::DuplicateNode { view, node: id });
		}
	}
	if !seed.has_node(root) {
		return Err(ViewStoreError::MissingRoot {
			view,
			root: root.to_string(),
		});
	}
	for e in raw.seed.edges {
		if !raw.relations.iter().any(|r| r.relation == e.label) {
			return Err(ViewStoreError::UnknownRelation {
				view,
				relation: e.label,
			});
		}
		let edge = Edge::new(e.source, e.target, e.label);
		if let Some(node) = [&edge.source, &edge.target]
			.into_iter()
			.find(|id| !seed.has_node(id))
		{
			return Err(ViewStoreError::DanglingEdge {
				view,
				node: node.clone(),
				edge: edge.id,
			});
		}
		seed.add_edge(edge);
	}
	let pattern =
		command_pattern(&raw.relations).map_err(|source| ViewStoreError::Pattern { view, source })?;
	Ok(View {
		id: view,
		title: raw.title,
		example_target: raw.example_target,
		root: root.to_string(),
		relations: raw.relations,
		seed,
		pattern,
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn builtin_views_load() {
		let store = ViewStore::builtin().unwrap();
		let tools = store.view(ViewId::View1);
		assert_eq!(
			tools.allowed_relations().collect::<Vec<_>>(),
			["tests", "secures", "monitors"]
		);
		assert_eq!(tools.seed_graph().nodes().len(), 2);
		assert!(tools.seed_graph().has_edge("secures_ToolA"));

		let envs = store.view(ViewId::View2);
		assert_eq!(envs.node_type_for("deployed_in"), Some(NodeType::Environment));
		assert_eq!(envs.node_type_for("tests"), None);
		assert!(envs.seed_graph().has_node("Component_Cart"));
	}

	#[test]
	fn tool_view_maps_every_relation_to_tool() {
		let store = ViewStore::builtin().unwrap();
		let view = store.view(ViewId::View1);
		assert!(view.relations().iter().all(|r| r.node_type == NodeType::Tool));
	}

	#[test]
	fn view_ids_round_trip_through_select_values() {
		for id in ViewId::ALL {
			assert_eq!(id.as_str().parse::<ViewId>(), Ok(id));
		}
		assert_eq!("view3".parse::<ViewId>(), Err(UnknownView("view3".into())));
		assert_eq!(
			"View1".parse::<ViewId>().unwrap_err().to_string(),
			"unknown view: View1"
		);
	}

	#[test]
	fn command_pattern_is_compiled_at_load() {
		let store = ViewStore::builtin().unwrap();
		let re = store.view(ViewId::View2).command_pattern();
		let caps = re.captures("Component Cart deployed_in prod eu").unwrap();
		assert_eq!((&caps[1], &caps[2]), ("deployed_in", "prod eu"));
		assert!(!re.is_match("component cart tests prod"));
		assert!(!re.is_match("please component cart deployed_in prod"));
	}

	#[test]
	fn relation_keywords_match_literally() {
		let json = r#"{
			"root": "Component_Cart",
			"views": [
				{
					"id": "view1", "title": "t", "example_target": "X",
					"relations": [{ "relation": "runs.on", "node_type": "tool" }],
					"seed": { "nodes": [{ "id": "Component_Cart", "label": "Component Cart", "type": "component" }], "edges": [] }
				},
				{
					"id": "view2", "title": "t", "example_target": "X",
					"relations": [],
					"seed": { "nodes": [{ "id": "Component_Cart", "label": "Component Cart", "type": "component" }], "edges": [] }
				}
			]
		}"#;
		let store = ViewStore::from_json(json).unwrap();
		let re = store.view(ViewId::View1).command_pattern();
		assert!(re.is_match("component cart runs.on x"));
		assert!(!re.is_match("component cart runsxon x"));
	}

	fn dataset(v1_edges: &str, v1_nodes: &str) -> String {
		format!(
			r#"{{
				"root": "Component_Cart",
				"views": [
					{{
						"id": "view1", "title": "t", "example_target": "X",
						"relations": [{{ "relation": "tests", "node_type": "tool" }}],
						"seed": {{ "nodes": [{v1_nodes}], "edges": [{v1_edges}] }}
					}},
					{{
						"id": "view2", "title": "t", "example_target": "X",
						"relations": [],
						"seed": {{ "nodes": [{{ "id": "Component_Cart", "label": "Component Cart", "type": "component" }}], "edges": [] }}
					}}
				]
			}}"#
		)
	}

	const ROOT: &str = r#"{ "id": "Component_Cart", "label": "Component Cart", "type": "component" }"#;

	#[test]
	fn rejects_seed_edges_with_disallowed_relation() {
		let json = dataset(
			r#"{ "source": "Component_Cart", "target": "Component_Cart", "label": "deployed_to" }"#,
			ROOT,
		);
		assert!(matches!(
			ViewStore::from_json(&json),
			Err(ViewStoreError::UnknownRelation { view: ViewId::View1, .. })
		));
	}

	#[test]
	fn rejects_dangling_edges_and_missing_root() {
		let json = dataset(
			r#"{ "source": "Component_Cart", "target": "Ghost", "label": "tests" }"#,
			ROOT,
		);
		assert!(matches!(
			ViewStore::from_json(&json),
			Err(ViewStoreError::DanglingEdge { ref node, .. }) if node == "Ghost"
		));

		let json = dataset("", r#"{ "id": "ToolA", "label": "Tool A", "type": "tool" }"#);
		assert!(matches!(
			ViewStore::from_json(&json),
			Err(ViewStoreError::MissingRoot { view: ViewId::View1, .. })
		));
	}

	#[test]
	fn rejects_duplicate_seed_nodes() {
		let json = dataset("", &format!("{ROOT}, {ROOT}"));
		assert!(matches!(
			ViewStore::from_json(&json),
			Err(ViewStoreError::DuplicateNode { view: ViewId::View1, ref node }) if node == "Component_Cart"
		));
	}

	#[test]
	fn rejects_duplicate_views() {
		let view = r#"{
			"id": "view1", "title": "t", "example_target": "X",
			"relations": [],
			"seed": { "nodes": [{ "id": "Component_Cart", "label": "Component Cart", "type": "component" }], "edges": [] }
		}"#;
		let json = format!(r#"{{ "root": "Component_Cart", "views": [{view}, {view}] }}"#);
		assert!(matches!(
			ViewStore::from_json(&json),
			Err(ViewStoreError::DuplicateView(ViewId::View1))
		));
	}

	#[test]
	fn requires_both_views() {
		let json = r#"{ "root": "Component_Cart", "views": [] }"#;
		assert!(matches!(
			ViewStore::from_json(json),
			Err(ViewStoreError::MissingView(ViewId::View1))
		));
	}
}
