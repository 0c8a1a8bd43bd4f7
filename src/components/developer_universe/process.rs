//! Turns a raw collaboration document into a renderable graph.
//!
//! Processing is pure: the same document and options always produce the same
//! graph. Membership depends only on the document and `show_isolated`; focus
//! and hover never change which nodes are present.

use std::collections::{HashMap, HashSet};

use super::colormap::review_color;
use super::scale::LinearScale;
use super::theme::Color;
use super::types::{CompanyKind, RawGraph, RawNode};

/// Filtering and sizing knobs for [`process`].
#[derive(Clone, Debug, PartialEq)]
pub struct ProcessOptions {
	/// Keep nodes that appear in no link.
	pub show_isolated: bool,
	/// Nodes need strictly more games than this to be drawn.
	pub min_games: u64,
	/// Output range for the `game_count` size scale.
	pub size_range: (f64, f64),
	/// Uniform factor applied after the size scale.
	pub size_multiplier: f64,
}

impl Default for ProcessOptions {
	fn default() -> Self {
		Self {
			show_isolated: false,
			min_games: 5,
			size_range: (10.0, 800.0),
			size_multiplier: 1.0,
		}
	}
}

/// A company that survived filtering, with its derived visuals.
#[derive(Clone, Debug, PartialEq)]
pub struct ProcessedNode {
	/// Company name, unique in the graph.
	pub id: String,
	/// Developer or publisher.
	pub kind: CompanyKind,
	/// Games the company is associated with.
	pub game_count: u64,
	/// Average positive review percentage.
	pub avg_review_score: f64,
	/// Estimated owners over all its games.
	pub total_owners: u64,
	/// Area-like visual size from the `game_count` scale.
	pub size: f64,
	/// Review colormap color.
	pub color: Color,
	/// Indices into [`ProcessedGraph::nodes`], one entry per link occurrence.
	pub neighbors: Vec<usize>,
}

/// A link whose endpoints both survived filtering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProcessedLink {
	/// Index into [`ProcessedGraph::nodes`].
	pub source: usize,
	/// Index into [`ProcessedGraph::nodes`].
	pub target: usize,
}

/// Nodes and links ready for the layout engine.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProcessedGraph {
	/// Surviving companies, in document order.
	pub nodes: Vec<ProcessedNode>,
	/// Links whose endpoints both survived.
	pub links: Vec<ProcessedLink>,
	index: HashMap<String, usize>,
}

impl ProcessedGraph {
	/// True when no node survived filtering.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Index of the node with this id.
	pub fn index_of(&self, id: &str) -> Option<usize> {
		self.index.get(id).copied()
	}

	/// Node with this id.
	pub fn node(&self, id: &str) -> Option<&ProcessedNode> {
		self.index_of(id).map(|i| &self.nodes[i])
	}

	/// Whether a node with this id survived.
	pub fn contains(&self, id: &str) -> bool {
		self.index.contains_key(id)
	}

	/// Neighbor nodes of `idx` in link order.
	pub fn neighbors(&self, idx: usize) -> impl Iterator<Item = &ProcessedNode> + '_ {
		self.nodes
			.get(idx)
			.into_iter()
			.flat_map(|node| node.neighbors.iter())
			.map(|&n| &self.nodes[n])
	}

	/// The `(source, target)` ids of a link.
	pub fn link_ids(&self, link: &ProcessedLink) -> (&str, &str) {
		(
			self.nodes[link.source].id.as_str(),
			self.nodes[link.target].id.as_str(),
		)
	}
}

/// Filters, scales and annotates a raw document.
///
/// A node is kept when it has more than `min_games` games and either appears
/// as an endpoint of some raw link or `show_isolated` is set. Links are kept
/// when both endpoints were kept. Neighbor lists are filled from the kept
/// links, treating each link as undirected; a self-loop lists its node once.
pub fn process(raw: &RawGraph, options: &ProcessOptions) -> ProcessedGraph {
	let connected: HashSet<&str> = raw
		.links
		.iter()
		.flat_map(|link| [link.source.as_str(), link.target.as_str()])
		.collect();

	let kept: Vec<&RawNode> = raw
		.nodes
		.iter()
		.filter(|node| options.show_isolated || connected.contains(node.id.as_str()))
		.filter(|node| node.game_count > options.min_games)
		.collect();

	if kept.is_empty() {
		return ProcessedGraph::default();
	}

	let (min_games, max_games) = kept
		.iter()
		.fold((u64::MAX, u64::MIN), |(lo, hi), node| {
			(lo.min(node.game_count), hi.max(node.game_count))
		});
	let size_scale = LinearScale::new((min_games as f64, max_games as f64), options.size_range);

	let mut index = HashMap::with_capacity(kept.len());
	let mut nodes = Vec::with_capacity(kept.len());
	for node in kept {
		// Ids are unique in well-formed documents; the first occurrence wins.
		if index.contains_key(&node.id) {
			continue;
		}
		index.insert(node.id.clone(), nodes.len());
		nodes.push(ProcessedNode {
			id: node.id.clone(),
			kind: node.kind,
			game_count: node.game_count,
			avg_review_score: node.avg_review_score,
			total_owners: node.total_owners,
			size: size_scale.apply(node.game_count as f64) * options.size_multiplier,
			color: review_color(node.avg_review_score),
			neighbors: Vec::new(),
		});
	}

	let links: Vec<ProcessedLink> = raw
		.links
		.iter()
		.filter_map(|link| {
			Some(ProcessedLink {
				source: *index.get(&link.source)?,
				target: *index.get(&link.target)?,
			})
		})
		.collect();

	for link in &links {
		nodes[link.source].neighbors.push(link.target);
		if link.source != link.target {
			nodes[link.target].neighbors.push(link.source);
		}
	}

	ProcessedGraph {
		nodes,
		links,
		index,
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::components::developer_universe::types::RawLink;

	fn node(id: &str, game_count: u64, avg_review_score: f64) -> RawNode {
		RawNode {
			id: id.into(),
			kind: CompanyKind::Developer,
			game_count,
			avg_review_score,
			total_owners: 0,
		}
	}

	fn link(source: &str, target: &str) -> RawLink {
		RawLink {
			source: source.into(),
			target: target.into(),
		}
	}

	fn ids(graph: &ProcessedGraph) -> Vec<&str> {
		graph.nodes.iter().map(|n| n.id.as_str()).collect()
	}

	#[test]
	fn low_game_count_endpoint_drops_node_and_link() {
		let raw = RawGraph {
			nodes: vec![
				RawNode {
					total_owners: 1000,
					..node("A", 10, 90.0)
				},
				RawNode {
					total_owners: 10,
					..node("B", 3, 50.0)
				},
			],
			links: vec![link("A", "B")],
		};

		let graph = process(&raw, &ProcessOptions::default());

		assert_eq!(ids(&graph), vec!["A"]);
		assert!(graph.links.is_empty());
		assert!(graph.nodes[0].neighbors.is_empty());
	}

	#[test]
	fn equal_game_counts_share_one_size() {
		let raw = RawGraph {
			nodes: vec![node("A", 10, 80.0), node("C", 10, 40.0)],
			links: vec![link("A", "C")],
		};

		let graph = process(&raw, &ProcessOptions::default());

		assert_eq!(ids(&graph), vec!["A", "C"]);
		assert_eq!(graph.nodes[0].size, graph.nodes[1].size);
		assert_eq!(graph.nodes[0].size, 405.0);
		assert_eq!(graph.nodes[0].neighbors, vec![1]);
		assert_eq!(graph.nodes[1].neighbors, vec![0]);
	}

	#[test]
	fn isolated_nodes_need_the_flag() {
		let raw = RawGraph {
			nodes: vec![node("A", 10, 80.0), node("B", 20, 80.0), node("Solo", 30, 80.0)],
			links: vec![link("A", "B")],
		};

		let hidden = process(&raw, &ProcessOptions::default());
		assert_eq!(ids(&hidden), vec!["A", "B"]);

		let shown = process(
			&raw,
			&ProcessOptions {
				show_isolated: true,
				..ProcessOptions::default()
			},
		);
		assert_eq!(ids(&shown), vec!["A", "B", "Solo"]);
		assert!(shown.node("Solo").unwrap().neighbors.is_empty());
	}

	#[test]
	fn sizes_span_the_configured_range() {
		let raw = RawGraph {
			nodes: vec![node("Small", 6, 50.0), node("Big", 106, 50.0)],
			links: vec![link("Small", "Big")],
		};
		let options = ProcessOptions {
			size_multiplier: 2.0,
			..ProcessOptions::default()
		};

		let graph = process(&raw, &options);

		assert_eq!(graph.node("Small").unwrap().size, 20.0);
		assert_eq!(graph.node("Big").unwrap().size, 1600.0);
	}

	#[test]
	fn colors_follow_review_scores() {
		let raw = RawGraph {
			nodes: vec![node("Low", 10, 12.0), node("High", 10, 99.0)],
			links: vec![link("Low", "High")],
		};

		let graph = process(&raw, &ProcessOptions::default());

		assert_eq!(graph.node("Low").unwrap().color, review_color(30.0));
		assert_eq!(graph.node("High").unwrap().color, review_color(95.0));
	}

	#[test]
	fn self_loop_lists_its_node_once_per_occurrence() {
		let raw = RawGraph {
			nodes: vec![node("Loop", 10, 70.0)],
			links: vec![link("Loop", "Loop"), link("Loop", "Loop")],
		};

		let graph = process(&raw, &ProcessOptions::default());

		assert_eq!(graph.links.len(), 2);
		assert_eq!(graph.nodes[0].neighbors, vec![0, 0]);
	}

	#[test]
	fn duplicate_links_stay_independent() {
		let raw = RawGraph {
			nodes: vec![node("A", 10, 70.0), node("B", 10, 70.0)],
			links: vec![link("A", "B"), link("B", "A")],
		};

		let graph = process(&raw, &ProcessOptions::default());

		assert_eq!(graph.links.len(), 2);
		assert_eq!(graph.nodes[0].neighbors, vec![1, 1]);
		assert_eq!(graph.link_ids(&graph.links[1]), ("B", "A"));
	}

	#[test]
	fn links_to_unknown_ids_are_dropped() {
		let raw = RawGraph {
			nodes: vec![node("A", 10, 70.0)],
			links: vec![link("A", "Ghost")],
		};

		let graph = process(&raw, &ProcessOptions::default());

		assert_eq!(ids(&graph), vec!["A"]);
		assert!(graph.links.is_empty());
	}

	#[test]
	fn nothing_qualifies() {
		let raw = RawGraph {
			nodes: vec![node("A", 5, 70.0), node("B", 0, 70.0)],
			links: vec![link("A", "B")],
		};

		assert!(process(&raw, &ProcessOptions::default()).is_empty());
		assert!(process(&RawGraph::default(), &ProcessOptions::default()).is_empty());
	}

	#[test]
	fn neighbors_iterate_in_link_order() {
		let raw = RawGraph {
			nodes: vec![node("Hub", 10, 70.0), node("X", 10, 70.0), node("Y", 10, 70.0)],
			links: vec![link("Y", "Hub"), link("Hub", "X")],
		};

		let graph = process(&raw, &ProcessOptions::default());
		let hub = graph.index_of("Hub").unwrap();
		let names: Vec<&str> = graph.neighbors(hub).map(|n| n.id.as_str()).collect();

		assert_eq!(names, vec!["Y", "X"]);
		assert_eq!(graph.neighbors(99).count(), 0);
	}
}
