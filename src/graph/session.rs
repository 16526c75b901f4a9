//! The viewer's top-level state: which view is active, its live graph, and
//! the pending command text.

use log::{debug, info};

use super::command::{self, Applied, CommandError};
use super::model::LiveGraph;
use super::views::{View, ViewId, ViewStore};
use crate::components::force_graph::{GraphData, GraphLink, GraphNode};

/// Owns all mutable UI state. The page keeps exactly one of these.
#[derive(Clone, Debug)]
pub struct Session {
	store: ViewStore,
	active: ViewId,
	graph: LiveGraph,
	input: String,
	/// Bumped on every view (re)load; a new epoch means a fresh layout.
	epoch: u64,
	/// Bumped on every successful command; each bump asks for a re-layout.
	relayouts: u64,
}

impl Session {
	/// Starts on `active` with its seed graph.
	pub fn new(store: ViewStore, active: ViewId) -> Self {
		let graph = store.view(active).seed_graph();
		Self {
			store,
			active,
			graph,
			input: String::new(),
			epoch: 0,
			relayouts: 0,
		}
	}

	/// Id of the view being shown.
	pub fn active_view(&self) -> ViewId {
		self.active
	}

	/// Definition of the view being shown.
	pub fn view(&self) -> &View {
		self.store.view(self.active)
	}

	/// Every view, for the selector.
	pub fn views(&self) -> &[View] {
		self.store.views()
	}

	/// The live graph of the active view.
	pub fn graph(&self) -> &LiveGraph {
		&self.graph
	}

	/// Pending command text.
	pub fn input(&self) -> &str {
		&self.input
	}

	/// Replaces the pending command text.
	pub fn set_input(&mut self, text: impl Into<String>) {
		self.input = text.into();
	}

	/// Number of view switches so far.
	pub fn epoch(&self) -> u64 {
		self.epoch
	}

	/// Number of accepted commands so far.
	pub fn relayouts(&self) -> u64 {
		self.relayouts
	}

	/// Example command for the input placeholder.
	pub fn placeholder(&self) -> String {
		let view = self.view();
		let relation = view.allowed_relations().next().unwrap_or("<relation>");
		format!("e.g., Component Cart {relation} {}", view.example_target)
	}

	/// Activates `id` and rebuilds its graph from the seed, discarding any
	/// additions made so far.
	pub fn switch_view(&mut self, id: ViewId) {
		self.active = id;
		self.graph = self.store.view(id).seed_graph();
		self.epoch += 1;
		info!("switched to {} ({})", id, self.view().title);
	}

	/// Runs the pending input as a command.
	///
	/// Blank input is ignored and yields `Ok(None)`. On success the input is
	/// cleared and a re-layout is requested; on error nothing changes.
	pub fn submit_input(&mut self) -> Result<Option<Applied>, CommandError> {
		if self.input.trim().is_empty() {
			return Ok(None);
		}
		let view = self.store.view(self.active);
		let applied = command::submit(&self.input, view, &mut self.graph)?;
		if applied.is_no_op() {
			debug!("{} already present", applied.edge_id);
		} else {
			info!(
				"added {} (node: {}, edge: {})",
				applied.edge_id, applied.node_added, applied.edge_added
			);
		}
		self.input.clear();
		self.relayouts += 1;
		Ok(Some(applied))
	}

	/// Render model for the canvas.
	pub(crate) fn graph_data(&self) -> GraphData {
		GraphData {
			epoch: self.epoch,
			revision: self.relayouts,
			nodes: self
				.graph
				.nodes()
				.iter()
				.map(|n| GraphNode {
					id: n.id.clone(),
					label: n.label.clone(),
					node_type: n.node_type,
				})
				.collect(),
			links: self
				.graph
				.edges()
				.iter()
				.map(|e| GraphLink {
					source: e.source.clone(),
					target: e.target.clone(),
					label: e.label.clone(),
				})
				.collect(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn session() -> Session {
		Session::new(ViewStore::builtin().unwrap(), ViewId::View1)
	}

	#[test]
	fn blank_input_is_ignored() {
		let mut s = session();
		s.set_input("   ");
		assert_eq!(s.submit_input(), Ok(None));
		assert_eq!(s.relayouts(), 0);
		assert_eq!(s.input(), "   ");
	}

	#[test]
	fn success_clears_input_and_requests_relayout() {
		let mut s = session();
		s.set_input("component cart monitors grafana");
		let applied = s.submit_input().unwrap().unwrap();
		assert_eq!(applied.target_id, "grafana");
		assert_eq!(s.input(), "");
		assert_eq!(s.relayouts(), 1);

		s.set_input("component cart monitors grafana");
		assert!(s.submit_input().unwrap().unwrap().is_no_op());
		assert_eq!(s.relayouts(), 2);
	}

	#[test]
	fn rejection_keeps_input_and_graph() {
		let mut s = session();
		s.set_input("component cart deployed_to lambda");
		assert!(s.submit_input().is_err());
		assert_eq!(s.input(), "component cart deployed_to lambda");
		assert_eq!(s.graph(), &s.view().seed_graph());
		assert_eq!(s.relayouts(), 0);
	}

	#[test]
	fn placeholder_follows_active_view() {
		let mut s = session();
		assert_eq!(s.placeholder(), "e.g., Component Cart tests Tool X");
		s.switch_view(ViewId::View2);
		assert_eq!(s.placeholder(), "e.g., Component Cart packaged_as Artifact X");
	}

	#[test]
	fn graph_data_carries_types_and_labels() {
		let mut s = session();
		s.switch_view(ViewId::View2);
		let data = s.graph_data();
		assert_eq!(data.epoch, 1);
		assert_eq!(data.nodes.len(), 4);
		assert_eq!(data.links.len(), 3);
		assert!(data.links.iter().all(|l| l.source == "Component_Cart"));
		assert_eq!(data.links[0].label, "packaged_as");
	}
}
