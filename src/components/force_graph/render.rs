use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::DefaultNodeIdx;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::{EdgeInfo, ForceGraphState, NODE_RADIUS};
use super::theme::Theme;

/// Vertical spacing between stacked labels of parallel edges, in screen pixels.
const LANE_SPACING: f64 = 14.0;

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

pub fn render(state: &ForceGraphState, theme: &Theme, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(&theme.background.to_css());
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	let positions = state.positions();
	draw_edges(state, theme, &positions, ctx);
	draw_nodes(state, theme, ctx);
	draw_edge_labels(state, theme, &positions, ctx);
	ctx.restore();
}

fn edge_alpha(state: &ForceGraphState, edge: &EdgeInfo, t: f64) -> (f64, f64) {
	let is_highlighted = state.is_highlighted(edge.source) && state.is_highlighted(edge.target);
	// t=0: all edges at base, t=1: highlighted brighten, others dim
	if is_highlighted {
		(0.6 + 0.3 * t, 1.0 + 0.3 * t)
	} else {
		(0.6 - 0.45 * t, 1.0 - 0.3 * t)
	}
}

fn draw_edges(
	state: &ForceGraphState,
	theme: &Theme,
	positions: &HashMap<DefaultNodeIdx, (f64, f64)>,
	ctx: &CanvasRenderingContext2d,
) {
	let k = state.transform.k;
	let (line_width, dash, gap, arrow_size) = (1.5 / k, 8.0 / k, 4.0 / k, 8.0 / k);
	let dash_offset = -(state.flow_time * 30.0) % (dash + gap);
	let t = ease_out_cubic(state.hover.highlight_t);

	// Parallel edges overlap; draw each pair once.
	for edge in state.edges.iter().filter(|e| e.lane == 0) {
		let (Some(&(x1, y1)), Some(&(x2, y2))) = (positions.get(&edge.source), positions.get(&edge.target))
		else {
			continue;
		};
		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			continue;
		}

		let (alpha, width_factor) = edge_alpha(state, edge, t);
		let color = theme.edge.with_alpha(alpha);

		ctx.set_stroke_style_str(&color.to_css());
		ctx.set_line_width(line_width * width_factor);
		let _ = ctx.set_line_dash(&js_sys::Array::of2(
			&JsValue::from_f64(dash),
			&JsValue::from_f64(gap),
		));
		ctx.set_line_dash_offset(dash_offset);

		let (ux, uy) = (dx / dist, dy / dist);
		ctx.begin_path();
		ctx.move_to(x1 + ux * NODE_RADIUS, y1 + uy * NODE_RADIUS);
		ctx.line_to(
			x2 - ux * (NODE_RADIUS + arrow_size),
			y2 - uy * (NODE_RADIUS + arrow_size),
		);
		ctx.stroke();

		let _ = ctx.set_line_dash(&js_sys::Array::new());
		ctx.set_fill_style_str(&theme.edge.with_alpha((alpha + 0.2).min(1.0)).to_css());
		let (tip_x, tip_y) = (x2 - ux * NODE_RADIUS, y2 - uy * NODE_RADIUS);
		let (back_x, back_y) = (tip_x - ux * arrow_size, tip_y - uy * arrow_size);
		let (px, py) = (-uy * arrow_size * 0.5, ux * arrow_size * 0.5);
		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();
	}
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn draw_edge_labels(
	state: &ForceGraphState,
	theme: &Theme,
	positions: &HashMap<DefaultNodeIdx, (f64, f64)>,
	ctx: &CanvasRenderingContext2d,
) {
	let k = state.transform.k;
	let t = ease_out_cubic(state.hover.highlight_t);
	let font_px = 11.0 / k.max(0.5);
	let (pad, spacing) = (3.0 / k.max(0.5), LANE_SPACING / k.max(0.5));
	ctx.set_font(&format!("bold {}px sans-serif", font_px));
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");

	for edge in &state.edges {
		let (Some(&(x1, y1)), Some(&(x2, y2))) = (positions.get(&edge.source), positions.get(&edge.target))
		else {
			continue;
		};
		let (alpha, _) = edge_alpha(state, edge, t);
		let (mx, my) = ((x1 + x2) / 2.0, (y1 + y2) / 2.0 + edge.lane as f64 * spacing);
		let text_w = ctx
			.measure_text(&edge.label)
			.map(|m| m.width())
			.unwrap_or(font_px * edge.label.len() as f64 * 0.6);

		ctx.set_fill_style_str(&theme.edge_label_plate.to_css());
		ctx.fill_rect(
			mx - text_w / 2.0 - pad,
			my - font_px / 2.0 - pad,
			text_w + pad * 2.0,
			font_px + pad * 2.0,
		);
		ctx.set_fill_style_str(&theme.edge_label.with_alpha((alpha + 0.3).min(1.0)).to_css());
		let _ = ctx.fill_text(&edge.label, mx, my);
	}
	ctx.set_text_align("start");
	ctx.set_text_baseline("alphabetic");
}

#[allow(clippy::too_many_arguments)]
fn draw_node(
	ctx: &CanvasRenderingContext2d,
	theme: &Theme,
	(x, y): (f64, f64),
	radius: f64,
	color: &str,
	label: &str,
	label_alpha: f64,
	k: f64,
) {
	ctx.begin_path();
	let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
	ctx.set_fill_style_str(color);
	ctx.fill();
	ctx.set_stroke_style_str(&theme.node_border.to_css());
	ctx.set_line_width(1.0 / k);
	ctx.stroke();

	ctx.set_fill_style_str(&theme.node_label.with_alpha(label_alpha).to_css());
	ctx.set_font(&format!("bold {}px sans-serif", 12.0 / k.max(0.5)));
	let _ = ctx.fill_text(label, x + radius + 4.0, y + 4.0);
}

fn draw_nodes(state: &ForceGraphState, theme: &Theme, ctx: &CanvasRenderingContext2d) {
	let (has_highlight, t, k) = (
		state.has_active_highlight(),
		ease_out_cubic(state.hover.highlight_t),
		state.transform.k,
	);

	state.graph.visit_nodes(|node| {
		let idx = node.index();
		if has_highlight && state.is_highlighted(idx) {
			return;
		}
		let pos = (node.x() as f64, node.y() as f64);
		let (alpha, radius) = (1.0 - 0.7 * t, NODE_RADIUS * (1.0 - 0.15 * t));
		let info = &node.data.user_data;

		ctx.set_global_alpha(alpha);
		draw_node(ctx, theme, pos, radius, &info.color, &info.label, 0.9, k);
		ctx.set_global_alpha(1.0);
	});

	if !has_highlight {
		return;
	}

	state.graph.visit_nodes(|node| {
		let idx = node.index();
		if !state.is_highlighted(idx) {
			return;
		}
		let (x, y) = (node.x() as f64, node.y() as f64);
		let is_hovered = state.is_hovered(idx);
		let is_neighbor =
			state.hover.neighbors.contains(&idx) || state.hover.prev_neighbors.contains(&idx);

		let (radius, glow_radius) = if is_hovered {
			(
				NODE_RADIUS * (1.0 + 0.35 * t),
				NODE_RADIUS * (1.8 + 1.2 * t),
			)
		} else if is_neighbor {
			(NODE_RADIUS * (1.0 + 0.2 * t), NODE_RADIUS * (1.4 + 0.6 * t))
		} else {
			(NODE_RADIUS, 0.0)
		};

		if glow_radius > 0.0 && t > 0.01 {
			if let Ok(gradient) = ctx.create_radial_gradient(x, y, radius * 0.3, x, y, glow_radius) {
				let alpha = if is_hovered { 0.35 * t } else { 0.2 * t };
				let _ = gradient.add_color_stop(0.0, &format!("rgba(255, 255, 255, {})", alpha));
				let _ = gradient.add_color_stop(0.6, &format!("rgba(200, 220, 255, {})", alpha * 0.3));
				let _ = gradient.add_color_stop(1.0, "rgba(255, 255, 255, 0)");
				ctx.begin_path();
				let _ = ctx.arc(x, y, glow_radius, 0.0, 2.0 * PI);
				#[allow(deprecated)]
				ctx.set_fill_style(&gradient);
				ctx.fill();
			}
		}

		let info = &node.data.user_data;
		draw_node(ctx, theme, (x, y), radius, &info.color, &info.label, 1.0, k);

		if is_hovered && t > 0.01 {
			ctx.begin_path();
			let _ = ctx.arc(x, y, radius + 2.0 / k, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str(&format!("rgba(255, 255, 255, {})", 0.7 * t));
			ctx.set_line_width(1.5 / k);
			ctx.stroke();
		}
	});
}
