//! Force-directed graph canvas.
//!
//! Draws typed nodes and labeled, directed edges on an HTML canvas, laid out by
//! the `force_graph` simulation, with pan, zoom, node dragging, and hover
//! highlighting.

mod component;
mod layout;
mod render;
mod state;
mod theme;
mod types;

pub use component::ForceGraphCanvas;
pub use types::{GraphData, GraphLink, GraphNode};
