use std::collections::HashSet;
use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::GraphCanvasState;
use crate::graph::{Graph, Node, NodeId, Weight};
use crate::session::NODE_RADIUS;

const EDGE_COLOR: &str = "#4a5568";
const LABEL_COLOR: &str = "#cbd5e0";
const NODE_BORDER: &str = "#cbd5e0";
const NODE_TEXT: &str = "#ecf0f1";
const PATH_COLOR: &str = "#48bb78";
const FONT: &str = "16px Arial";
// Weight labels sit beside the edge midpoint rather than on the line.
const LABEL_OFFSET: (f64, f64) = (20.0, 10.0);

pub fn render(state: &GraphCanvasState, ctx: &CanvasRenderingContext2d) {
	ctx.clear_rect(0.0, 0.0, state.width, state.height);
	let graph = state.session.graph();
	draw_edges(graph, ctx);
	draw_nodes(graph, state.session.selected(), ctx);
	if let Some(animation) = &state.animation {
		draw_path(graph, animation.revealed_segments(), &animation.lit_nodes(), ctx);
	}
}

fn draw_edges(graph: &Graph, ctx: &CanvasRenderingContext2d) {
	ctx.set_font(FONT);
	for edge in graph.edges() {
		let (Some(a), Some(b)) = (graph.node(edge.a), graph.node(edge.b)) else {
			continue;
		};
		ctx.begin_path();
		ctx.move_to(a.position.x, a.position.y);
		ctx.line_to(b.position.x, b.position.y);
		ctx.set_stroke_style_str(EDGE_COLOR);
		ctx.set_line_width(2.0);
		ctx.stroke();
		draw_weight(a, b, edge.weight, ctx);
	}
}

fn draw_weight(a: &Node, b: &Node, weight: Weight, ctx: &CanvasRenderingContext2d) {
	let (mx, my) = (
		(a.position.x + b.position.x) / 2.0 + LABEL_OFFSET.0,
		(a.position.y + b.position.y) / 2.0 + LABEL_OFFSET.1,
	);
	ctx.set_fill_style_str(LABEL_COLOR);
	let _ = ctx.fill_text(&weight.to_string(), mx, my);
}

fn draw_nodes(graph: &Graph, selected: Option<NodeId>, ctx: &CanvasRenderingContext2d) {
	for node in graph.nodes() {
		let (x, y) = (node.position.x, node.position.y);
		let (inner, outer) = if selected == Some(node.id) {
			("#ecc94b", "#d69e2e")
		} else {
			("#4a5568", "#2d3748")
		};

		ctx.begin_path();
		let _ = ctx.arc(x, y, NODE_RADIUS, 0.0, 2.0 * PI);
		if let Ok(gradient) = ctx.create_radial_gradient(x, y, 5.0, x, y, NODE_RADIUS) {
			let _ = gradient.add_color_stop(0.0, inner);
			let _ = gradient.add_color_stop(1.0, outer);
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
		} else {
			ctx.set_fill_style_str(outer);
		}
		ctx.fill();
		ctx.set_stroke_style_str(NODE_BORDER);
		ctx.set_line_width(1.0);
		ctx.stroke();
		draw_node_label(node, ctx);
	}
}

fn draw_node_label(node: &Node, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(NODE_TEXT);
	ctx.set_font(FONT);
	let _ = ctx.fill_text(
		&node.id.to_string(),
		node.position.x - 5.0,
		node.position.y + 5.0,
	);
}

fn draw_path(
	graph: &Graph,
	segments: impl Iterator<Item = (NodeId, NodeId)>,
	lit: &HashSet<NodeId>,
	ctx: &CanvasRenderingContext2d,
) {
	for (from, to) in segments {
		let (Some(a), Some(b)) = (graph.node(from), graph.node(to)) else {
			continue;
		};
		ctx.begin_path();
		ctx.move_to(a.position.x, a.position.y);
		ctx.line_to(b.position.x, b.position.y);
		ctx.set_stroke_style_str(PATH_COLOR);
		ctx.set_line_width(3.0);
		ctx.stroke();
		if let Some(edge) = graph.find_edge(from, to) {
			ctx.set_font(FONT);
			draw_weight(a, b, edge.weight, ctx);
		}
	}

	for node in graph.nodes().iter().filter(|n| lit.contains(&n.id)) {
		ctx.begin_path();
		let _ = ctx.arc(node.position.x, node.position.y, NODE_RADIUS, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(PATH_COLOR);
		ctx.fill();
		ctx.set_stroke_style_str(NODE_BORDER);
		ctx.stroke();
		draw_node_label(node, ctx);
	}
}
