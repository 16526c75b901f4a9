//! Simulation state behind the canvas: the `force_graph` physics graph with
//! per-node display info, pan/zoom transform, and drag/hover tracking.

use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData};
use log::debug;

use super::layout::LayoutConfig;
use super::theme::Theme;
use super::types::GraphData;

pub const NODE_RADIUS: f64 = 12.0;
pub const HIT_RADIUS: f64 = 16.0;

/// Golden angle, spreads successive new nodes around their source.
const SPAWN_ANGLE: f64 = 2.399_963;

#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub id: String,
	pub label: String,
	pub color: String,
}

/// A drawn edge. `lane` numbers parallel edges between the same pair so
/// their labels can be stacked.
#[derive(Clone, Debug)]
pub struct EdgeInfo {
	pub source: DefaultNodeIdx,
	pub target: DefaultNodeIdx,
	pub label: String,
	pub lane: usize,
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
	pub edges: Vec<EdgeInfo>,
	epoch: u64,
	revision: u64,
	node_count: usize,
	edge_count: usize,
}

impl ForceGraphState {
	pub fn new(data: &GraphData, width: f64, height: f64, layout: &LayoutConfig, theme: &Theme) -> Self {
		let n = data.nodes.len().max(1) as f64;
		let positions = data
			.nodes
			.iter()
			.enumerate()
			.map(|(i, node)| {
				let angle = (i as f64) * 2.0 * PI / n;
				(node.id.clone(), ((100.0 * angle.cos()) as f32, (100.0 * angle.sin()) as f32))
			})
			.collect();

		let mut state = Self {
			graph: ForceGraph::new(layout.initial.simulation()),
			edges: Vec::new(),
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
			epoch: data.epoch,
			revision: data.revision,
			node_count: 0,
			edge_count: 0,
		};
		state.populate(data, positions, layout.spawn_distance, theme);
		debug!(
			"layout built: {} nodes, {} edges (epoch {})",
			state.node_count, state.edge_count, data.epoch
		);
		state
	}

	/// Brings the simulation in line with `data`.
	///
	/// A new epoch replaces the whole layout. A new revision, or a changed
	/// element count, re-runs the layout from the current positions.
	pub fn sync(&mut self, data: &GraphData, layout: &LayoutConfig, theme: &Theme) {
		if data.epoch != self.epoch {
			let transform = self.transform.clone();
			*self = Self::new(data, self.width, self.height, layout, theme);
			self.transform = transform;
			return;
		}
		let changed = data.revision != self.revision
			|| data.nodes.len() != self.node_count
			|| data.links.len() != self.edge_count;
		if changed {
			self.relayout(data, layout, theme);
		}
	}

	fn relayout(&mut self, data: &GraphData, layout: &LayoutConfig, theme: &Theme) {
		let mut positions = HashMap::new();
		self.graph.visit_nodes(|node| {
			positions.insert(node.data.user_data.id.clone(), (node.x(), node.y()));
		});

		self.graph = ForceGraph::new(layout.relayout.simulation());
		self.edges.clear();
		self.drag = DragState::default();
		self.pan = PanState::default();
		self.hover = HoverState::default();
		self.revision = data.revision;
		self.animation_running = true;
		self.populate(data, positions, layout.spawn_distance, theme);
		debug!(
			"relayout: {} nodes, {} edges (revision {})",
			self.node_count, self.edge_count, data.revision
		);
	}

	/// Adds every node and link of `data` to the (empty) simulation. Nodes
	/// without a known position are dropped next to the source of their first
	/// incoming link.
	fn populate(
		&mut self,
		data: &GraphData,
		mut positions: HashMap<String, (f32, f32)>,
		spawn_distance: f32,
		theme: &Theme,
	) {
		let mut spawned = 0usize;
		for node in &data.nodes {
			if positions.contains_key(&node.id) {
				continue;
			}
			let anchor = data
				.links
				.iter()
				.find(|l| l.target == node.id)
				.and_then(|l| positions.get(&l.source).copied())
				.unwrap_or((0.0, 0.0));
			let angle = spawned as f64 * SPAWN_ANGLE;
			spawned += 1;
			positions.insert(
				node.id.clone(),
				(
					anchor.0 + spawn_distance * angle.cos() as f32,
					anchor.1 + spawn_distance * angle.sin() as f32,
				),
			);
		}

		let mut id_to_idx = HashMap::new();
		for node in &data.nodes {
			let (x, y) = positions.get(&node.id).copied().unwrap_or((0.0, 0.0));
			let idx = self.graph.add_node(NodeData {
				x,
				y,
				mass: 10.0,
				is_anchor: false,
				user_data: NodeInfo {
					id: node.id.clone(),
					label: node.label.clone(),
					color: theme.palette.color(node.node_type).to_css(),
				},
			});
			id_to_idx.insert(node.id.clone(), idx);
		}

		let mut lanes: HashMap<(DefaultNodeIdx, DefaultNodeIdx), usize> = HashMap::new();
		for link in &data.links {
			let (Some(&src), Some(&tgt)) = (id_to_idx.get(&link.source), id_to_idx.get(&link.target))
			else {
				continue;
			};
			let lane = lanes.entry((src, tgt)).or_insert(0);
			// One spring per pair, however many relations connect it.
			if *lane == 0 {
				self.graph.add_edge(src, tgt, EdgeData::default());
			}
			self.edges.push(EdgeInfo {
				source: src,
				target: tgt,
				label: link.label.clone(),
				lane: *lane,
			});
			*lane += 1;
		}

		self.node_count = data.nodes.len();
		self.edge_count = data.links.len();
	}

	/// Current position of every node, keyed by simulation index.
	pub fn positions(&self) -> HashMap<DefaultNodeIdx, (f64, f64)> {
		let mut out = HashMap::new();
		self.graph.visit_nodes(|node| {
			out.insert(node.index(), (node.x() as f64, node.y() as f64));
		});
		out
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
			// HIT_RADIUS is in world-space, scales with zoom like nodes
			if (dx * dx + dy * dy).sqrt() < HIT_RADIUS {
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

		// Keep the old set around so it can fade out
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
			for edge in &self.edges {
				if edge.source == idx {
					self.hover.neighbors.insert(edge.target);
				} else if edge.target == idx {
					self.hover.neighbors.insert(edge.source);
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
	use crate::components::force_graph::types::{GraphLink, GraphNode};
	use crate::graph::NodeType;

	fn data(epoch: u64, revision: u64, extra: &[&str]) -> GraphData {
		let mut nodes = vec![
			GraphNode {
				id: "Component_Cart".into(),
				label: "Component Cart".into(),
				node_type: NodeType::Component,
			},
			GraphNode {
				id: "ToolA".into(),
				label: "Tool A".into(),
				node_type: NodeType::Tool,
			},
		];
		let mut links: Vec<GraphLink> = ["tests", "secures", "monitors"]
			.into_iter()
			.map(|r| GraphLink {
				source: "Component_Cart".into(),
				target: "ToolA".into(),
				label: r.into(),
			})
			.collect();
		for id in extra {
			nodes.push(GraphNode {
				id: (*id).into(),
				label: (*id).into(),
				node_type: NodeType::Tool,
			});
			links.push(GraphLink {
				source: "Component_Cart".into(),
				target: (*id).into(),
				label: "tests".into(),
			});
		}
		GraphData {
			epoch,
			revision,
			nodes,
			links,
		}
	}

	fn state(d: &GraphData) -> ForceGraphState {
		ForceGraphState::new(d, 800.0, 600.0, &LayoutConfig::default(), &Theme::default())
	}

	#[test]
	fn parallel_edges_share_a_spring_but_get_their_own_lanes() {
		let s = state(&data(0, 0, &[]));
		assert_eq!(s.edges.len(), 3);
		assert_eq!(s.edges.iter().map(|e| e.lane).collect::<Vec<_>>(), [0, 1, 2]);
		let mut springs = 0;
		s.graph.visit_edges(|_, _, _| springs += 1);
		assert_eq!(springs, 1);
	}

	fn positions_by_id(s: &ForceGraphState) -> HashMap<String, (f64, f64)> {
		let mut out = HashMap::new();
		s.graph.visit_nodes(|n| {
			out.insert(n.data.user_data.id.clone(), (n.x() as f64, n.y() as f64));
		});
		out
	}

	#[test]
	fn relayout_keeps_known_positions_and_spawns_new_nodes_near_source() {
		let layout = LayoutConfig::default();
		let theme = Theme::default();
		let mut s = state(&data(0, 0, &[]));
		let before = positions_by_id(&s);

		s.sync(&data(0, 1, &["sonar"]), &layout, &theme);
		let after = positions_by_id(&s);
		assert_eq!(after.len(), 3);
		assert_eq!(after["Component_Cart"], before["Component_Cart"]);
		assert_eq!(after["ToolA"], before["ToolA"]);

		let (root, sonar) = (after["Component_Cart"], after["sonar"]);
		let dist = ((sonar.0 - root.0).powi(2) + (sonar.1 - root.1).powi(2)).sqrt();
		assert!((dist - layout.spawn_distance as f64).abs() < 1.0);
	}

	#[test]
	fn unchanged_data_leaves_layout_alone() {
		let layout = LayoutConfig::default();
		let theme = Theme::default();
		let d = data(0, 0, &[]);
		let mut s = state(&d);
		s.tick(0.016);
		let before = positions_by_id(&s);
		s.sync(&d, &layout, &theme);
		assert_eq!(positions_by_id(&s), before);
	}

	#[test]
	fn new_epoch_rebuilds_from_scratch() {
		let layout = LayoutConfig::default();
		let theme = Theme::default();
		let mut s = state(&data(0, 0, &["sonar"]));
		s.set_hover(Some(s.edges[0].source));
		s.sync(&data(1, 0, &[]), &layout, &theme);
		assert_eq!(s.positions().len(), 2);
		assert!(!s.has_active_highlight());
	}

	#[test]
	fn hover_highlights_neighbors() {
		let mut s = state(&data(0, 0, &["sonar"]));
		let root = s.edges[0].source;
		s.set_hover(Some(root));
		assert_eq!(s.hover.neighbors.len(), 2);
		assert!(s.is_hovered(root));
	}
}
