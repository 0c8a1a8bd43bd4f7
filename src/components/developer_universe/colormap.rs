//! Diverging red→yellow→green colormap for average review scores.
//!
//! Scores are clamped to [`REVIEW_DOMAIN`] before sampling, so every score at
//! or below 30 is the red endpoint and every score at or above 95 is the green
//! endpoint.

use super::theme::Color;

/// Review percentages outside this range saturate to the endpoint colors.
pub const REVIEW_DOMAIN: (f64, f64) = (30.0, 95.0);

/// Evenly spaced stops, low to high.
const RED_YELLOW_GREEN: [Color; 5] = [
	Color::rgb(215, 25, 28),   // #d7191c
	Color::rgb(253, 174, 97),  // #fdae61
	Color::rgb(255, 255, 191), // #ffffbf
	Color::rgb(166, 217, 106), // #a6d96a
	Color::rgb(26, 150, 65),   // #1a9641
];

/// Position of a score along the colormap, in `[0, 1]`. NaN maps to 0.
pub fn review_position(score: f64) -> f64 {
	let (lo, hi) = REVIEW_DOMAIN;
	if score.is_nan() {
		return 0.0;
	}
	(score.clamp(lo, hi) - lo) / (hi - lo)
}

/// Samples the colormap at `t` in `[0, 1]` (clamped).
pub fn sample(t: f64) -> Color {
	let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
	let segments = (RED_YELLOW_GREEN.len() - 1) as f64;
	let scaled = t * segments;
	let i = (scaled.floor() as usize).min(RED_YELLOW_GREEN.len() - 2);
	RED_YELLOW_GREEN[i].lerp(RED_YELLOW_GREEN[i + 1], scaled - i as f64)
}

/// Color for an average review score.
pub fn review_color(score: f64) -> Color {
	sample(review_position(score))
}

/// CSS gradient matching the colormap, for the legend bar.
pub fn legend_gradient() -> String {
	let stops: Vec<String> = RED_YELLOW_GREEN.iter().map(|c| c.to_hex()).collect();
	format!("linear-gradient(to right, {})", stops.join(", "))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn endpoints_saturate() {
		assert_eq!(review_color(0.0), RED_YELLOW_GREEN[0]);
		assert_eq!(review_color(30.0), RED_YELLOW_GREEN[0]);
		assert_eq!(review_color(95.0), RED_YELLOW_GREEN[4]);
		assert_eq!(review_color(100.0), RED_YELLOW_GREEN[4]);
	}

	#[test]
	fn midpoint_is_yellow() {
		assert_eq!(review_color(62.5), RED_YELLOW_GREEN[2]);
	}

	#[test]
	fn nan_is_red() {
		assert_eq!(review_color(f64::NAN), RED_YELLOW_GREEN[0]);
	}

	#[test]
	fn legend_lists_every_stop() {
		assert_eq!(
			legend_gradient(),
			"linear-gradient(to right, #d7191c, #fdae61, #ffffbf, #a6d96a, #1a9641)"
		);
	}
}
