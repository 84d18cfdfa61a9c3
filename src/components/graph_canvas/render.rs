use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::{CanvasState, NODE_RADIUS};
use crate::graph::Edge;

const EDGE_COLOR: &str = "#404040";

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

pub fn render(state: &CanvasState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str("#f5f5f0");
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
}

fn draw_edges(state: &CanvasState, ctx: &CanvasRenderingContext2d) {
	let editor = &state.editor;
	let selected = editor.selected_edge().map(Edge::id);
	let (head, line_width) = (NODE_RADIUS / 2.2, 4.0);

	for edge in editor.graph().edges() {
		let (Some(from), Some(to)) = (state.position(edge.start()), state.position(edge.end()))
		else {
			continue;
		};
		let (dx, dy) = (to.x - from.x, to.y - from.y);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < NODE_RADIUS {
			continue;
		}
		let (ux, uy) = (dx / dist, dy / dist);

		ctx.set_stroke_style_str(EDGE_COLOR);
		ctx.set_line_width(line_width);
		if selected == Some(edge.id()) {
			let _ = ctx.set_line_dash(&js_sys::Array::of2(
				&JsValue::from_f64(10.0),
				&JsValue::from_f64(6.0),
			));
		}
		ctx.begin_path();
		ctx.move_to(from.x, from.y);
		ctx.line_to(to.x, to.y);
		ctx.stroke();
		let _ = ctx.set_line_dash(&js_sys::Array::new());

		if editor.is_directed() {
			let (tip_x, tip_y) = (to.x - ux * NODE_RADIUS, to.y - uy * NODE_RADIUS);
			let (back_x, back_y) = (tip_x - ux * head, tip_y - uy * head);
			let (px, py) = (-uy * head / 1.2, ux * head / 1.2);
			ctx.begin_path();
			ctx.move_to(tip_x, tip_y);
			ctx.line_to(back_x + px, back_y + py);
			ctx.move_to(tip_x, tip_y);
			ctx.line_to(back_x - px, back_y - py);
			ctx.stroke();
		}

		if editor.is_weighted() {
			ctx.set_fill_style_str("black");
			ctx.set_font("bold 18px sans-serif");
			ctx.set_text_align("left");
			ctx.set_text_baseline("alphabetic");
			let _ = ctx.fill_text(
				&edge.weight.to_string(),
				from.x + dx / 2.0 + 6.0,
				from.y + dy / 2.0 - 6.0,
			);
		}
	}
}

fn draw_nodes(state: &CanvasState, ctx: &CanvasRenderingContext2d) {
	let t = ease_out_cubic(state.hover.highlight_t);

	for node in state.editor.graph().nodes() {
		let Some(at) = state.position(node.id()) else {
			continue;
		};

		if node.highlighted && t > 0.01 {
			ctx.begin_path();
			let _ = ctx.arc(at.x, at.y, NODE_RADIUS + 6.0 * t, 0.0, 2.0 * PI);
			ctx.set_fill_style_str(&format!("rgba(255, 200, 80, {})", 0.5 * t));
			ctx.fill();
		}

		ctx.begin_path();
		let _ = ctx.arc(at.x, at.y, NODE_RADIUS, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(state.node_color(node.id()));
		ctx.fill();

		ctx.set_fill_style_str("white");
		ctx.set_font("bold 20px sans-serif");
		ctx.set_text_align("center");
		ctx.set_text_baseline("middle");
		let _ = ctx.fill_text(&node.label, at.x, at.y);
	}
}
