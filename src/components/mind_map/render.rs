use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::editor::{NODE_HEIGHT, NODE_WIDTH, get_color};

use super::state::MindMapState;

const BACKGROUND: &str = "#f5f5f5";
const LABEL_PADDING: f64 = 8.0;

pub fn render(state: &MindMapState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	draw_connectors(state, ctx);
	draw_nodes(state, ctx);
}

fn draw_connectors(state: &MindMapState, ctx: &CanvasRenderingContext2d) {
	ctx.set_line_width(2.0);
	for connector in state.editor.connectors() {
		let dragging = state.dragged().is_some_and(|id| connector.touches(id));
		let dash = if dragging {
			js_sys::Array::of2(&JsValue::from_f64(6.0), &JsValue::from_f64(4.0))
		} else {
			js_sys::Array::new()
		};
		let _ = ctx.set_line_dash(&dash);

		let c = connector.control_point();
		ctx.set_stroke_style_str(connector.color);
		ctx.begin_path();
		ctx.move_to(connector.from.x, connector.from.y);
		ctx.quadratic_curve_to(c.x, c.y, connector.to.x, connector.to.y);
		ctx.stroke();
	}
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn draw_nodes(state: &MindMapState, ctx: &CanvasRenderingContext2d) {
	ctx.set_font("14px sans-serif");
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");

	for node in state.editor.nodes() {
		let (x, y) = (node.position.x, node.position.y);
		ctx.set_fill_style_str(get_color(node.depth));
		ctx.fill_rect(x, y, NODE_WIDTH, NODE_HEIGHT);

		if state.is_hovered(node.id) || state.is_dragging(node.id) {
			ctx.set_stroke_style_str("#333333");
			ctx.set_line_width(2.0);
			ctx.stroke_rect(x - 1.0, y - 1.0, NODE_WIDTH + 2.0, NODE_HEIGHT + 2.0);
		}

		let center = node.center();
		ctx.set_fill_style_str("white");
		let _ = ctx.fill_text_with_max_width(
			&node.label,
			center.x,
			center.y,
			NODE_WIDTH - 2.0 * LABEL_PADDING,
		);
	}
}
