//! Colors and visual style for the collaboration graph.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Alpha in `[0, 1]`.
	pub a: f64,
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Color with alpha.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Linear interpolation between two colors, rounding each channel.
	pub fn lerp(self, other: Color, t: f64) -> Self {
		let t = t.clamp(0.0, 1.0);
		let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
		Self {
			r: mix(self.r, other.r),
			g: mix(self.g, other.g),
			b: mix(self.b, other.b),
			a: self.a + (other.a - self.a) * t,
		}
	}

	/// `#rrggbb`, ignoring alpha.
	pub fn to_hex(self) -> String {
		format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
	}

	/// `rgb(...)` when opaque, `rgba(...)` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("rgb({}, {}, {})", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	/// Canvas clear color. Transparent lets the page background through.
	pub background: Color,
	/// Fill for the focused (hovered or selected) node.
	pub accent_selected: Color,
	/// Fill for the focus node's neighbors.
	pub accent_neighbor: Color,
	/// Links touching the focus node.
	pub link_highlight: Color,
	/// Every other link.
	pub link_dim: Color,
	/// Backdrop behind the canvas while in fullscreen.
	pub fullscreen_backdrop: Color,
	/// Neighbor pill background in the info panel.
	pub related_pill: Color,
}

impl Default for Theme {
	fn default() -> Self {
		Self {
			background: Color::rgba(0, 0, 0, 0.0),
			accent_selected: Color::rgb(192, 33, 233),
			accent_neighbor: Color::rgb(16, 133, 240),
			link_highlight: Color::rgb(16, 133, 240),
			link_dim: Color::rgba(255, 255, 255, 0.2),
			fullscreen_backdrop: Color::rgba(10, 10, 20, 0.95),
			related_pill: Color::rgb(33, 150, 243),
		}
	}
}
