//! Size scales and zoom-dependent widths.
//!
//! Node sizes live in world-space: the processor maps `game_count` to an
//! area-like `size`, and the renderer draws a circle of radius
//! `sqrt(size) * node_rel_size`. Link widths and hover rings are screen-space
//! so they stay legible at every zoom level.

/// Linear map from a numeric domain to a numeric range.
///
/// A degenerate domain (`lo == hi`) maps every input to the range midpoint
/// instead of dividing by zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
	/// Input interval.
	pub domain: (f64, f64),
	/// Output interval.
	pub range: (f64, f64),
}

impl LinearScale {
	/// Scale from `domain` onto `range`.
	pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
		Self { domain, range }
	}

	/// Maps `value` from the domain onto the range.
	pub fn apply(&self, value: f64) -> f64 {
		let (d0, d1) = self.domain;
		let (r0, r1) = self.range;
		let span = d1 - d0;
		if span.abs() < f64::EPSILON {
			return (r0 + r1) / 2.0;
		}
		r0 + (value - d0) / span * (r1 - r0)
	}
}

/// How a visual property scales with zoom level `k`.
#[derive(Clone, Debug)]
pub enum ScaleBehavior {
	/// Constant world-space size. Appears larger when zoomed in.
	World,
	/// Constant screen-space size in pixels.
	Screen,
}

impl ScaleBehavior {
	/// World-space value to draw with after the canvas transform is applied.
	pub fn apply(&self, base: f64, k: f64) -> f64 {
		match self {
			ScaleBehavior::World => base,
			ScaleBehavior::Screen => base / k,
		}
	}
}

/// Visual scaling for nodes, links and the view transform.
#[derive(Clone, Debug)]
pub struct ScaleConfig {
	/// Radius multiplier applied to `sqrt(size)`.
	pub node_rel_size: f64,
	/// Whether node radii follow the zoom.
	pub node_behavior: ScaleBehavior,
	/// Dim link width in pixels.
	pub link_width: f64,
	/// Width of links touching the focus node, in pixels.
	pub link_highlight_width: f64,
	/// Whether link widths follow the zoom.
	pub link_behavior: ScaleBehavior,
	/// Ring drawn around the focus node, in pixels.
	pub ring_width: f64,
	/// Extra pointer slop around each node for hit testing, in pixels.
	pub hit_slop: f64,
	/// Zoom clamp.
	pub min_zoom: f64,
	/// Largest zoom factor.
	pub max_zoom: f64,
	/// Screen padding kept around the graph by fit-to-view, in pixels.
	pub fit_padding: f64,
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self {
			node_rel_size: 1.0,
			node_behavior: ScaleBehavior::World,
			link_width: 1.0,
			link_highlight_width: 2.0,
			link_behavior: ScaleBehavior::Screen,
			ring_width: 1.5,
			hit_slop: 3.0,
			min_zoom: 0.02,
			max_zoom: 8.0,
			fit_padding: 40.0,
		}
	}
}

impl ScaleConfig {
	/// World-space radius of a node with the given processed `size`.
	pub fn node_radius(&self, size: f64, k: f64) -> f64 {
		let base = size.max(0.0).sqrt() * self.node_rel_size;
		self.node_behavior.apply(base, k)
	}

	/// World-space line width for a link, highlighted or not.
	pub fn link_line_width(&self, highlighted: bool, k: f64) -> f64 {
		let base = if highlighted {
			self.link_highlight_width
		} else {
			self.link_width
		};
		self.link_behavior.apply(base, k)
	}

	/// Keeps a zoom factor inside `[min_zoom, max_zoom]`.
	pub fn clamp_zoom(&self, k: f64) -> f64 {
		k.clamp(self.min_zoom, self.max_zoom)
	}
}
