//! Layout simulation state and view transform.
//!
//! Wraps the `force_graph` simulation with the processed-graph index of every
//! node, pan/zoom, node dragging, and the animated fit-to-view used after the
//! initial settle and by the reset control.

use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::process::ProcessedGraph;
use super::scale::ScaleConfig;

/// Seconds of simulation before the layout is considered settled.
const COOLDOWN: f64 = 15.0;

/// Pointer travel, in pixels, that turns a press into a drag.
const CLICK_SLOP: f64 = 3.0;

/// Per-node metadata attached to each simulation node.
#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	/// Index into [`ProcessedGraph::nodes`].
	pub index: usize,
	/// Visual size from the processed graph.
	pub size: f64,
}

/// Pan and zoom transform applied to the entire graph view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
	/// Horizontal pan in screen pixels.
	pub x: f64,
	/// Vertical pan in screen pixels.
	pub y: f64,
	/// Zoom factor (1.0 = 100%).
	pub k: f64,
}

impl ViewTransform {
	fn lerp(self, to: ViewTransform, t: f64) -> Self {
		Self {
			x: self.x + (to.x - self.x) * t,
			y: self.y + (to.y - self.y) * t,
			k: self.k + (to.k - self.k) * t,
		}
	}
}

/// An in-flight animated change of the view transform.
#[derive(Clone, Debug)]
struct Transition {
	from: ViewTransform,
	to: ViewTransform,
	elapsed: f64,
	duration: f64,
}

/// What a press/release pair turned out to be.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Click {
	/// Released on the node it was pressed on, without dragging.
	Node(usize),
	/// Released on empty canvas, without panning.
	Canvas,
}

/// Tracks an in-progress node drag operation.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	/// Node being dragged.
	pub node_idx: Option<DefaultNodeIdx>,
	/// Node x when the drag started.
	pub node_start_x: f32,
	/// Node y when the drag started.
	pub node_start_y: f32,
}

/// Tracks an in-progress canvas pan operation.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	/// Horizontal pan when the pan started.
	pub transform_start_x: f64,
	/// Vertical pan when the pan started.
	pub transform_start_y: f64,
}

/// The pointer press currently held down.
#[derive(Clone, Debug)]
enum Press {
	Node {
		index: usize,
		start_x: f64,
		start_y: f64,
		moved: bool,
		drag: DragState,
	},
	Canvas {
		start_x: f64,
		start_y: f64,
		moved: bool,
		pan: PanState,
	},
}

fn smooth_step(t: f64) -> f64 {
	t * t * (3.0 - 2.0 * t)
}

/// Simulation, view transform and pointer tracking for one processed graph.
///
/// Rebuilt whenever graph membership changes; highlight changes never touch it.
pub struct ForceGraphState {
	/// Layout simulation.
	pub graph: ForceGraph<NodeInfo, ()>,
	/// Current pan/zoom.
	pub transform: ViewTransform,
	/// Canvas width in pixels.
	pub width: f64,
	/// Canvas height in pixels.
	pub height: f64,
	/// False once the simulation has cooled down.
	pub animation_running: bool,
	sim_elapsed: f64,
	press: Option<Press>,
	transition: Option<Transition>,
	node_count: usize,
}

impl ForceGraphState {
	/// Places the nodes on a ring and links them for the simulation.
	pub fn new(data: &ProcessedGraph, width: f64, height: f64) -> Self {
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: 400.0,
			force_spring: 0.05,
			force_max: 280.0,
			node_speed: 7000.0,
			damping_factor: 0.9,
		});

		let count = data.nodes.len().max(1) as f64;
		let ring = 100.0 + 20.0 * count.sqrt();
		let mut indices = Vec::with_capacity(data.nodes.len());
		for (i, node) in data.nodes.iter().enumerate() {
			let angle = (i as f64) * 2.0 * PI / count;
			let idx = graph.add_node(NodeData {
				x: (ring * angle.cos()) as f32,
				y: (ring * angle.sin()) as f32,
				mass: 10.0,
				is_anchor: false,
				user_data: NodeInfo {
					index: i,
					size: node.size,
				},
			});
			indices.push(idx);
		}

		for link in &data.links {
			// Self-loops carry no spring force.
			if link.source != link.target {
				graph.add_edge(indices[link.source], indices[link.target], EdgeData::default());
			}
		}

		Self {
			graph,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			width,
			height,
			animation_running: !data.is_empty(),
			sim_elapsed: 0.0,
			press: None,
			transition: None,
			node_count: data.nodes.len(),
		}
	}

	/// Nodes in the simulation.
	pub fn node_count(&self) -> usize {
		self.node_count
	}

	/// Canvas pixels to world coordinates.
	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// World coordinates to canvas pixels.
	pub fn graph_to_screen(&self, gx: f64, gy: f64) -> (f64, f64) {
		(
			gx * self.transform.k + self.transform.x,
			gy * self.transform.k + self.transform.y,
		)
	}

	/// Processed index of the node under a screen position. The node drawn
	/// last (topmost) wins when several overlap.
	pub fn node_at_position(&self, sx: f64, sy: f64, config: &ScaleConfig) -> Option<usize> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let k = self.transform.k;
		let slop = config.hit_slop / k;
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			let radius = config.node_radius(node.data.user_data.size, k) + slop;
			if dx * dx + dy * dy < radius * radius {
				found = Some(node.data.user_data.index);
			}
		});
		found
	}

	/// Starts a press: on a node it begins a drag, elsewhere a pan.
	pub fn press(&mut self, sx: f64, sy: f64, config: &ScaleConfig) {
		let hit = self.node_at_position(sx, sy, config);
		self.press = Some(match hit {
			Some(index) => {
				let mut drag = DragState::default();
				self.graph.visit_nodes(|node| {
					if node.data.user_data.index == index {
						drag.node_idx = Some(node.index());
						drag.node_start_x = node.x();
						drag.node_start_y = node.y();
					}
				});
				Press::Node {
					index,
					start_x: sx,
					start_y: sy,
					moved: false,
					drag,
				}
			}
			None => Press::Canvas {
				start_x: sx,
				start_y: sy,
				moved: false,
				pan: PanState {
					transform_start_x: self.transform.x,
					transform_start_y: self.transform.y,
				},
			},
		});
	}

	/// Moves the held press. Returns `false` when nothing is pressed.
	pub fn drag_to(&mut self, sx: f64, sy: f64) -> bool {
		let k = self.transform.k;
		match &mut self.press {
			None => false,
			Some(Press::Node {
				start_x,
				start_y,
				moved,
				drag,
				..
			}) => {
				let (dx, dy) = (sx - *start_x, sy - *start_y);
				*moved |= dx.hypot(dy) > CLICK_SLOP;
				if !*moved {
					return true;
				}
				let (nx, ny) = (
					drag.node_start_x + (dx / k) as f32,
					drag.node_start_y + (dy / k) as f32,
				);
				if let Some(idx) = drag.node_idx {
					self.graph.visit_nodes_mut(|node| {
						if node.index() == idx {
							node.data.x = nx;
							node.data.y = ny;
							node.data.is_anchor = true;
						}
					});
				}
				true
			}
			Some(Press::Canvas {
				start_x,
				start_y,
				moved,
				pan,
			}) => {
				let (dx, dy) = (sx - *start_x, sy - *start_y);
				*moved |= dx.hypot(dy) > CLICK_SLOP;
				self.transform.x = pan.transform_start_x + dx;
				self.transform.y = pan.transform_start_y + dy;
				self.transition = None;
				true
			}
		}
	}

	/// Ends the held press. A press that never moved is a click.
	pub fn release(&mut self) -> Option<Click> {
		match self.press.take()? {
			Press::Node {
				index, moved: false, ..
			} => Some(Click::Node(index)),
			Press::Canvas { moved: false, .. } => Some(Click::Canvas),
			_ => None,
		}
	}

	/// Drops a held press without producing a click (pointer left the canvas).
	pub fn cancel_press(&mut self) {
		self.press = None;
	}

	/// Zooms by one wheel notch about a screen point.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, zoom_in: bool, config: &ScaleConfig) {
		let factor = if zoom_in { 1.1 } else { 0.9 };
		let new_k = config.clamp_zoom(self.transform.k * factor);
		let ratio = new_k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = new_k;
		self.transition = None;
	}

	/// Restarts the simulation and releases every pinned node.
	pub fn reheat(&mut self) {
		self.graph.visit_nodes_mut(|node| {
			node.data.is_anchor = false;
		});
		self.sim_elapsed = 0.0;
		self.animation_running = self.node_count > 0;
	}

	/// The transform that frames every node with `config.fit_padding` to spare.
	pub fn fit_transform(&self, config: &ScaleConfig) -> Option<ViewTransform> {
		let mut bounds: Option<(f64, f64, f64, f64)> = None;
		self.graph.visit_nodes(|node| {
			let r = config.node_radius(node.data.user_data.size, 1.0);
			let (x, y) = (node.x() as f64, node.y() as f64);
			bounds = Some(match bounds {
				None => (x - r, y - r, x + r, y + r),
				Some((x0, y0, x1, y1)) => (x0.min(x - r), y0.min(y - r), x1.max(x + r), y1.max(y + r)),
			});
		});
		let (x0, y0, x1, y1) = bounds?;
		let avail_w = (self.width - 2.0 * config.fit_padding).max(1.0);
		let avail_h = (self.height - 2.0 * config.fit_padding).max(1.0);
		let k = config.clamp_zoom((avail_w / (x1 - x0).max(1.0)).min(avail_h / (y1 - y0).max(1.0)));
		let (cx, cy) = ((x0 + x1) / 2.0, (y0 + y1) / 2.0);
		Some(ViewTransform {
			x: self.width / 2.0 - cx * k,
			y: self.height / 2.0 - cy * k,
			k,
		})
	}

	/// Frames every node, animating over `duration` seconds (0 = immediately).
	pub fn fit_to_view(&mut self, duration: f64, config: &ScaleConfig) {
		let Some(to) = self.fit_transform(config) else {
			return;
		};
		if duration <= 0.0 {
			self.transform = to;
			self.transition = None;
		} else {
			self.transition = Some(Transition {
				from: self.transform,
				to,
				elapsed: 0.0,
				duration,
			});
		}
	}

	/// Whether a fit animation is in progress.
	pub fn is_transitioning(&self) -> bool {
		self.transition.is_some()
	}

	/// Advances the simulation and any fit animation by `dt` seconds.
	pub fn tick(&mut self, dt: f32) {
		if self.animation_running {
			self.graph.update(dt);
			self.sim_elapsed += dt as f64;
			if self.sim_elapsed >= COOLDOWN {
				self.animation_running = false;
			}
		}

		if let Some(tr) = &mut self.transition {
			tr.elapsed += dt as f64;
			if tr.elapsed >= tr.duration {
				self.transform = tr.to;
				self.transition = None;
			} else {
				self.transform = tr.from.lerp(tr.to, smooth_step(tr.elapsed / tr.duration));
			}
		}
	}

	/// Records a new canvas size.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	/// Adopts a new canvas size and reframes the nodes for it over `duration` seconds.
	pub fn resize_and_fit(&mut self, width: f64, height: f64, duration: f64, config: &ScaleConfig) {
		self.resize(width, height);
		self.fit_to_view(duration, config);
	}
}
