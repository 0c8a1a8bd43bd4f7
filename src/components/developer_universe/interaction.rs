//! Hover and selection tracking.
//!
//! At most one node is the focus at any time. A selection pins the focus and
//! suppresses hover until it is cleared by clicking empty canvas.

use super::process::ProcessedGraph;

/// Pointer input, already resolved to a node id by hit testing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PointerEvent {
	/// The pointer moved onto a node.
	Enter(String),
	/// The pointer left every node.
	Leave,
	/// A press and release on a node without dragging.
	ClickNode(String),
	/// A press and release on empty canvas without dragging.
	ClickCanvas,
}

/// Current focus state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Interaction {
	/// Nothing focused.
	#[default]
	Idle,
	/// Pointer is over this node.
	Hovering(String),
	/// Clicked node; hover is ignored until cleared.
	Selected(String),
}

impl Interaction {
	/// The node driving highlights, hovered or selected.
	pub fn focus(&self) -> Option<&str> {
		match self {
			Interaction::Idle => None,
			Interaction::Hovering(id) | Interaction::Selected(id) => Some(id),
		}
	}

	/// Id under the pointer, when hovering.
	pub fn hovered(&self) -> Option<&str> {
		match self {
			Interaction::Hovering(id) => Some(id),
			_ => None,
		}
	}

	/// Id of the clicked node, when selected.
	pub fn selected(&self) -> Option<&str> {
		match self {
			Interaction::Selected(id) => Some(id),
			_ => None,
		}
	}

	/// The state after `event`.
	pub fn next(&self, event: PointerEvent) -> Interaction {
		match (self, event) {
			(_, PointerEvent::ClickNode(id)) => Interaction::Selected(id),
			(_, PointerEvent::ClickCanvas) => Interaction::Idle,
			(Interaction::Selected(_), _) => self.clone(),
			(_, PointerEvent::Enter(id)) => Interaction::Hovering(id),
			(_, PointerEvent::Leave) => Interaction::Idle,
		}
	}

	/// Applies `event` in place, returning whether the state changed.
	pub fn apply(&mut self, event: PointerEvent) -> bool {
		let next = self.next(event);
		if next == *self {
			return false;
		}
		*self = next;
		true
	}

	/// Drops the focus if its node is no longer part of `graph`.
	pub fn retain_in(&mut self, graph: &ProcessedGraph) -> bool {
		match self.focus() {
			Some(id) if !graph.contains(id) => {
				*self = Interaction::Idle;
				true
			}
			_ => false,
		}
	}
}
