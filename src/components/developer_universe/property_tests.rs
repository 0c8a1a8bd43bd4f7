#![cfg(test)]
use proptest::prelude::*;

use super::colormap::{review_color, review_position};
use super::interaction::{Interaction, PointerEvent};
use super::process::{ProcessOptions, process};
use super::types::{CompanyKind, RawGraph, RawLink, RawNode};

const POOL: usize = 8;

fn name(i: usize) -> String {
	format!("Studio {i}")
}

fn arb_graph() -> impl Strategy<Value = RawGraph> {
	let nodes = prop::collection::vec((0..POOL, 0u64..20, -10.0f64..110.0, 0u64..5_000_000), 0..12);
	let links = prop::collection::vec((0..POOL, 0..POOL), 0..16);
	(nodes, links).prop_map(|(nodes, links)| RawGraph {
		nodes: nodes
			.into_iter()
			.map(|(i, game_count, avg_review_score, total_owners)| RawNode {
				id: name(i),
				kind: CompanyKind::Developer,
				game_count,
				avg_review_score,
				total_owners,
			})
			.collect(),
		links: links
			.into_iter()
			.map(|(s, t)| RawLink {
				source: name(s),
				target: name(t),
			})
			.collect(),
	})
}

fn arb_event() -> impl Strategy<Value = PointerEvent> {
	prop_oneof![
		(0..POOL).prop_map(|i| PointerEvent::Enter(name(i))),
		Just(PointerEvent::Leave),
		(0..POOL).prop_map(|i| PointerEvent::ClickNode(name(i))),
		Just(PointerEvent::ClickCanvas),
	]
}

proptest! {
	#[test]
	fn kept_nodes_pass_the_filter(raw in arb_graph(), show_isolated in any::<bool>()) {
		let options = ProcessOptions { show_isolated, ..ProcessOptions::default() };
		let graph = process(&raw, &options);
		for node in &graph.nodes {
			prop_assert!(node.game_count > 5);
			let linked = raw.links.iter().any(|l| l.source == node.id || l.target == node.id);
			prop_assert!(show_isolated || linked);
		}
	}

	#[test]
	fn links_resolve_to_kept_nodes(raw in arb_graph(), show_isolated in any::<bool>()) {
		let options = ProcessOptions { show_isolated, ..ProcessOptions::default() };
		let graph = process(&raw, &options);
		for link in &graph.links {
			let (source, target) = graph.link_ids(link);
			prop_assert!(graph.contains(source));
			prop_assert!(graph.contains(target));
		}
	}

	#[test]
	fn size_grows_with_game_count(raw in arb_graph()) {
		let options = ProcessOptions { show_isolated: true, ..ProcessOptions::default() };
		let graph = process(&raw, &options);
		for a in &graph.nodes {
			for b in &graph.nodes {
				if a.game_count < b.game_count {
					prop_assert!(a.size <= b.size);
				}
			}
		}
	}

	#[test]
	fn review_colors_clamp_and_order(a in -50.0f64..150.0, b in -50.0f64..150.0) {
		if a <= 30.0 {
			prop_assert_eq!(review_color(a), review_color(30.0));
		}
		if a >= 95.0 {
			prop_assert_eq!(review_color(a), review_color(95.0));
		}
		if a <= b {
			prop_assert!(review_position(a) <= review_position(b));
		}
	}

	#[test]
	fn neighbors_are_symmetric(raw in arb_graph()) {
		let graph = process(&raw, &ProcessOptions::default());
		for (u, node) in graph.nodes.iter().enumerate() {
			for v in 0..graph.nodes.len() {
				let expected = graph
					.links
					.iter()
					.filter(|l| (l.source == u && l.target == v) || (l.source == v && l.target == u))
					.count();
				let listed = node.neighbors.iter().filter(|&&n| n == v).count();
				prop_assert_eq!(listed, expected);
			}
		}
	}

	#[test]
	fn hover_and_selection_are_exclusive(events in prop::collection::vec(arb_event(), 0..40)) {
		let mut state = Interaction::Idle;
		for event in events {
			let was_selected = state.selected().map(str::to_owned);
			let passive = matches!(event, PointerEvent::Enter(_) | PointerEvent::Leave);
			state.apply(event);
			prop_assert!(state.hovered().is_none() || state.selected().is_none());
			if passive && was_selected.is_some() {
				prop_assert_eq!(state.selected().map(str::to_owned), was_selected);
			}
		}
	}
}
