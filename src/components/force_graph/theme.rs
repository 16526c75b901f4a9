//! Visual theming for the graph canvas.
//!
//! Node fills come from a fixed per-type palette; everything else (background,
//! edges, labels) is a single dark style.

use crate::graph::NodeType;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Fill color for each node type.
#[derive(Clone, Debug)]
pub struct TypePalette {
	pub component: Color,
	pub tool: Color,
	pub artifact: Color,
	pub resource: Color,
	pub environment: Color,
}

impl TypePalette {
	pub fn color(&self, node_type: NodeType) -> Color {
		match node_type {
			NodeType::Component => self.component,
			NodeType::Tool => self.tool,
			NodeType::Artifact => self.artifact,
			NodeType::Resource => self.resource,
			NodeType::Environment => self.environment,
		}
	}
}

impl Default for TypePalette {
	fn default() -> Self {
		Self {
			component: Color::rgb(0x4c, 0xaf, 0x50),   // Green
			tool: Color::rgb(0x21, 0x96, 0xf3),        // Blue
			artifact: Color::rgb(0xff, 0x98, 0x00),    // Orange
			resource: Color::rgb(0x9c, 0x27, 0xb0),    // Purple
			environment: Color::rgb(0x60, 0x7d, 0x8b), // Gray-blue
		}
	}
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	pub background: Color,
	pub edge: Color,
	/// Relation label text.
	pub edge_label: Color,
	/// Backing plate drawn behind relation labels.
	pub edge_label_plate: Color,
	pub node_label: Color,
	pub node_border: Color,
	pub palette: TypePalette,
}

impl Default for Theme {
	fn default() -> Self {
		Self {
			background: Color::rgb(26, 26, 46),
			edge: Color::rgb(100, 180, 255),
			edge_label: Color::rgb(220, 230, 245),
			edge_label_plate: Color::rgba(26, 26, 46, 0.85),
			node_label: Color::rgb(255, 255, 255),
			node_border: Color::rgb(51, 51, 51),
			palette: TypePalette::default(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn palette_matches_node_type_colors() {
		let palette = TypePalette::default();
		let css = |t| palette.color(t).to_css();
		assert_eq!(css(NodeType::Component), "#4caf50");
		assert_eq!(css(NodeType::Tool), "#2196f3");
		assert_eq!(css(NodeType::Artifact), "#ff9800");
		assert_eq!(css(NodeType::Resource), "#9c27b0");
		assert_eq!(css(NodeType::Environment), "#607d8b");
	}

	#[test]
	fn translucent_colors_render_as_rgba() {
		assert_eq!(
			Color::rgb(10, 20, 30).with_alpha(0.5).to_css(),
			"rgba(10, 20, 30, 0.5)"
		);
		assert_eq!(Color::rgba(255, 255, 255, 1.0).to_css(), "#ffffff");
	}
}
