//! Canvas painting for the collaboration graph.
//!
//! Two passes in world space: links first, then nodes. The focus node is drawn
//! last so it sits on top of its neighbors, with a ring around it.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::highlight::{Highlight, NodeRole};
use super::process::ProcessedGraph;
use super::scale::ScaleConfig;
use super::state::{ForceGraphState, NodeInfo};
use super::theme::Theme;

/// Renders the complete graph to the canvas.
pub fn render(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	graph: &ProcessedGraph,
	highlight: &Highlight,
	config: &ScaleConfig,
	theme: &Theme,
) {
	ctx.clear_rect(0.0, 0.0, state.width, state.height);
	if theme.background.a > 0.0 {
		ctx.set_fill_style_str(&theme.background.to_css());
		ctx.fill_rect(0.0, 0.0, state.width, state.height);
	}

	// A rebuilt graph may briefly outlive its simulation.
	if state.node_count() != graph.nodes.len() {
		return;
	}

	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);

	draw_links(state, ctx, highlight, config, theme);
	draw_nodes(state, ctx, graph, highlight, config, theme);

	ctx.restore();
}

fn draw_links(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	highlight: &Highlight,
	config: &ScaleConfig,
	theme: &Theme,
) {
	let k = state.transform.k;
	state.graph.visit_edges(|n1, n2, _| {
		let (a, b) = (n1.data.user_data.index, n2.data.user_data.index);
		let highlighted = highlight.link_highlighted(a, b);
		ctx.set_stroke_style_str(&highlight.link_color(a, b, theme).to_css());
		ctx.set_line_width(config.link_line_width(highlighted, k));
		ctx.begin_path();
		ctx.move_to(n1.x() as f64, n1.y() as f64);
		ctx.line_to(n2.x() as f64, n2.y() as f64);
		ctx.stroke();
	});
}

fn draw_nodes(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	graph: &ProcessedGraph,
	highlight: &Highlight,
	config: &ScaleConfig,
	theme: &Theme,
) {
	let k = state.transform.k;

	state.graph.visit_nodes(|node| {
		if highlight.node_role(node.data.user_data.index) != NodeRole::Focus {
			draw_node(ctx, node, graph, highlight, config, theme, k);
		}
	});

	let Some(focus) = highlight.focus() else {
		return;
	};
	state.graph.visit_nodes(|node| {
		if node.data.user_data.index != focus {
			return;
		}
		draw_node(ctx, node, graph, highlight, config, theme, k);

		let radius = config.node_radius(node.data.user_data.size, k);
		let ring_gap = config.ring_width * 2.0 / k;
		ctx.begin_path();
		let _ = ctx.arc(node.x() as f64, node.y() as f64, radius + ring_gap, 0.0, 2.0 * PI);
		ctx.set_stroke_style_str("rgba(255, 255, 255, 0.8)");
		ctx.set_line_width(config.ring_width / k);
		ctx.stroke();
	});
}

fn draw_node(
	ctx: &CanvasRenderingContext2d,
	node: &force_graph::Node<NodeInfo>,
	graph: &ProcessedGraph,
	highlight: &Highlight,
	config: &ScaleConfig,
	theme: &Theme,
	k: f64,
) {
	let info = &node.data.user_data;
	let radius = config.node_radius(info.size, k);
	let color = highlight.node_color(graph, info.index, theme);

	ctx.begin_path();
	let _ = ctx.arc(node.x() as f64, node.y() as f64, radius, 0.0, 2.0 * PI);
	ctx.set_fill_style_str(&color.to_css());
	ctx.fill();
}
