//! Focus-driven visuals handed to the renderer and the info panel.
//!
//! Everything here is derived from a [`ProcessedGraph`] and an [`Interaction`]
//! and rebuilt whenever either changes. Graph membership is never touched.

use std::collections::HashSet;

use super::colormap::review_color;
use super::format::{abbreviate_count, review_percent};
use super::interaction::Interaction;
use super::process::ProcessedGraph;
use super::theme::{Color, Theme};

/// How a node relates to the current focus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeRole {
	/// The hovered or selected node.
	Focus,
	/// Linked to the focus node.
	Neighbor,
	/// Everything else.
	Plain,
}

/// Per-node interaction flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NodeFlags {
	/// Focus node of a selection.
	pub is_selected: bool,
	/// Focus node of a hover.
	pub is_hovered: bool,
}

/// Resolved focus overlay for one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Highlight {
	focus: Option<usize>,
	selected: bool,
	neighbors: HashSet<usize>,
}

impl Highlight {
	/// Resolves the interaction's focus id against `graph`.
	pub fn new(graph: &ProcessedGraph, interaction: &Interaction) -> Self {
		let Some(focus) = interaction.focus().and_then(|id| graph.index_of(id)) else {
			return Self::default();
		};
		Self {
			focus: Some(focus),
			selected: interaction.selected().is_some(),
			neighbors: graph.nodes[focus].neighbors.iter().copied().collect(),
		}
	}

	/// Index of the focus node.
	pub fn focus(&self) -> Option<usize> {
		self.focus
	}

	/// How node `idx` relates to the focus.
	pub fn node_role(&self, idx: usize) -> NodeRole {
		if self.focus == Some(idx) {
			NodeRole::Focus
		} else if self.neighbors.contains(&idx) {
			NodeRole::Neighbor
		} else {
			NodeRole::Plain
		}
	}

	/// Selected/hovered flags for node `idx`.
	pub fn node_flags(&self, idx: usize) -> NodeFlags {
		let is_focus = self.focus == Some(idx);
		NodeFlags {
			is_selected: is_focus && self.selected,
			is_hovered: is_focus && !self.selected,
		}
	}

	/// Fill color: accent for the focus, neighbor accent for its neighbors,
	/// the review color otherwise.
	pub fn node_color(&self, graph: &ProcessedGraph, idx: usize, theme: &Theme) -> Color {
		match self.node_role(idx) {
			NodeRole::Focus => theme.accent_selected,
			NodeRole::Neighbor => theme.accent_neighbor,
			NodeRole::Plain => graph.nodes[idx].color,
		}
	}

	/// A link is highlighted when either endpoint is the focus.
	pub fn link_highlighted(&self, source: usize, target: usize) -> bool {
		self.focus.is_some_and(|f| f == source || f == target)
	}

	/// Highlight color for links touching the focus, dim otherwise.
	pub fn link_color(&self, source: usize, target: usize, theme: &Theme) -> Color {
		if self.link_highlighted(source, target) {
			theme.link_highlight
		} else {
			theme.link_dim
		}
	}
}

/// Info panel content for the focus node.
#[derive(Clone, Debug, PartialEq)]
pub struct FocusDetails {
	/// Company name.
	pub name: String,
	/// "Developer"/"Publisher", absent for unknown kinds.
	pub kind_label: Option<&'static str>,
	/// Games the company is associated with.
	pub game_count: u64,
	/// Abbreviated total owners, e.g. `"1.5M"`.
	pub owners: String,
	/// Review percentage text, e.g. `"91.5%"`.
	pub review: String,
	/// Pill background, from the review colormap.
	pub review_color: Color,
	/// First neighbor names, in link order.
	pub related: Vec<String>,
	/// Neighbors beyond `related`.
	pub more: usize,
	/// Whether the focus is pinned by a click.
	pub selected: bool,
}

impl FocusDetails {
	/// Details for the focus node, or `None` when nothing (present) is focused.
	pub fn new(graph: &ProcessedGraph, interaction: &Interaction, neighbor_limit: usize) -> Option<Self> {
		let idx = graph.index_of(interaction.focus()?)?;
		let node = &graph.nodes[idx];
		let related: Vec<String> = graph
			.neighbors(idx)
			.take(neighbor_limit)
			.map(|n| n.id.clone())
			.collect();
		Some(Self {
			name: node.id.clone(),
			kind_label: node.kind.label(),
			game_count: node.game_count,
			owners: abbreviate_count(node.total_owners),
			review: review_percent(node.avg_review_score),
			review_color: review_color(node.avg_review_score),
			more: node.neighbors.len() - related.len(),
			related,
			selected: interaction.selected().is_some(),
		})
	}

	/// `"+N more"` when neighbors were cut off.
	pub fn more_label(&self) -> Option<String> {
		(self.more > 0).then(|| format!("+{} more", self.more))
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::components::developer_universe::process::{ProcessOptions, process};
	use crate::components::developer_universe::types::{CompanyKind, RawGraph, RawLink, RawNode};

	fn star(spokes: usize) -> ProcessedGraph {
		let mut nodes = vec![RawNode {
			id: "Hub".into(),
			kind: CompanyKind::Publisher,
			game_count: 50,
			avg_review_score: 91.5,
			total_owners: 1_500_000,
		}];
		let mut links = Vec::new();
		for i in 0..spokes {
			let id = format!("Spoke {i}");
			nodes.push(RawNode {
				id: id.clone(),
				game_count: 8,
				avg_review_score: 40.0,
				..RawNode::default()
			});
			links.push(RawLink {
				source: "Hub".into(),
				target: id,
			});
		}
		nodes.push(RawNode {
			id: "Loner".into(),
			game_count: 8,
			..RawNode::default()
		});
		links.push(RawLink {
			source: "Loner".into(),
			target: "Spoke 0".into(),
		});
		process(&RawGraph { nodes, links }, &ProcessOptions::default())
	}

	#[test]
	fn idle_highlights_nothing() {
		let graph = star(2);
		let theme = Theme::default();
		let highlight = Highlight::new(&graph, &Interaction::Idle);

		assert_eq!(highlight.focus(), None);
		assert_eq!(highlight.node_color(&graph, 1, &theme), graph.nodes[1].color);
		assert_eq!(highlight.link_color(0, 1, &theme), theme.link_dim);
	}

	#[test]
	fn focus_and_neighbors_take_accents() {
		let graph = star(2);
		let theme = Theme::default();
		let hub = graph.index_of("Hub").unwrap();
		let loner = graph.index_of("Loner").unwrap();
		let highlight = Highlight::new(&graph, &Interaction::Hovering("Hub".into()));

		assert_eq!(highlight.node_color(&graph, hub, &theme), theme.accent_selected);
		assert_eq!(highlight.node_color(&graph, 1, &theme), theme.accent_neighbor);
		assert_eq!(highlight.node_color(&graph, loner, &theme), graph.nodes[loner].color);
		assert_eq!(highlight.node_flags(hub), NodeFlags { is_selected: false, is_hovered: true });
	}

	#[test]
	fn links_touching_the_focus_are_highlighted() {
		let graph = star(2);
		let theme = Theme::default();
		let highlight = Highlight::new(&graph, &Interaction::Selected("Spoke 0".into()));
		let spoke = graph.index_of("Spoke 0").unwrap();
		let loner = graph.index_of("Loner").unwrap();
		let other = graph.index_of("Spoke 1").unwrap();

		assert!(highlight.link_highlighted(0, spoke));
		assert!(highlight.link_highlighted(loner, spoke));
		assert_eq!(highlight.link_color(0, other, &theme), theme.link_dim);
		assert!(highlight.node_flags(spoke).is_selected);
	}

	#[test]
	fn unknown_focus_is_ignored() {
		let graph = star(1);
		let highlight = Highlight::new(&graph, &Interaction::Selected("Gone".into()));
		assert_eq!(highlight, Highlight::default());
		assert_eq!(FocusDetails::new(&graph, &Interaction::Selected("Gone".into()), 10), None);
	}

	#[test]
	fn details_describe_the_focus() {
		let graph = star(3);
		let details = FocusDetails::new(&graph, &Interaction::Hovering("Hub".into()), 10).unwrap();

		assert_eq!(
			details,
			FocusDetails {
				name: "Hub".into(),
				kind_label: Some("Publisher"),
				game_count: 50,
				owners: "1.5M".into(),
				review: "91.5%".into(),
				review_color: review_color(91.5),
				related: vec!["Spoke 0".into(), "Spoke 1".into(), "Spoke 2".into()],
				more: 0,
				selected: false,
			}
		);
		assert_eq!(details.more_label(), None);
	}

	#[test]
	fn details_cap_the_related_list() {
		let graph = star(13);
		let details = FocusDetails::new(&graph, &Interaction::Selected("Hub".into()), 10).unwrap();

		assert_eq!(details.related.len(), 10);
		assert_eq!(details.related[9], "Spoke 9");
		assert_eq!(details.more_label().as_deref(), Some("+3 more"));
		assert!(details.selected);
	}
}
