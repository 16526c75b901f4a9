//! Force simulation parameters for the two layout passes: the initial layout
//! of a freshly loaded view and the re-layout after the graph grows.

use force_graph::SimulationParameters;

/// One set of physics parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutParams {
	/// Node repulsion strength.
	pub charge: f32,
	/// Edge spring stiffness. Lower values give longer edges.
	pub spring: f32,
	pub max_force: f32,
	pub node_speed: f32,
	pub damping: f32,
}

impl LayoutParams {
	pub fn simulation(&self) -> SimulationParameters {
		SimulationParameters {
			force_charge: self.charge,
			force_spring: self.spring,
			force_max: self.max_force,
			node_speed: self.node_speed,
			damping_factor: self.damping,
		}
	}
}

/// Layout parameters for the canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutConfig {
	pub initial: LayoutParams,
	/// Used after a command adds elements; spreads the graph out a little more.
	pub relayout: LayoutParams,
	/// Distance from its source at which a new node is dropped in.
	pub spawn_distance: f32,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			initial: LayoutParams {
				charge: 260.0,
				spring: 0.05,
				max_force: 100.0,
				node_speed: 3000.0,
				damping: 0.9,
			},
			relayout: LayoutParams {
				charge: 320.0,
				spring: 0.04,
				max_force: 100.0,
				node_speed: 3000.0,
				damping: 0.9,
			},
			spawn_distance: 120.0,
		}
	}
}
