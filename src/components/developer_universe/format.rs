//! Human-readable numbers for the info panel.

/// Largest unit first.
const UNITS: [(f64, &str); 3] = [(1e9, "B"), (1e6, "M"), (1e3, "K")];

fn round1(value: f64) -> f64 {
	(value * 10.0).round() / 10.0
}

/// Abbreviates a count with one decimal: `1_500_000` → `"1.5M"`.
///
/// Counts below a thousand are printed as-is. A value that would round up to
/// `1000.0` of one unit is promoted to the next unit.
pub fn abbreviate_count(count: u64) -> String {
	let value = count as f64;
	for (div, suffix) in UNITS {
		if value >= div || (value >= 1000.0 && round1(value / (div / 1000.0)) >= 1000.0) {
			return format!("{:.1}{}", value / div, suffix);
		}
	}
	count.to_string()
}

/// A review percentage with at most two decimals: `91.5` → `"91.5%"`.
pub fn review_percent(score: f64) -> String {
	format!("{}%", (score * 100.0).round() / 100.0)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn abbreviates_by_magnitude() {
		assert_eq!(abbreviate_count(0), "0");
		assert_eq!(abbreviate_count(999), "999");
		assert_eq!(abbreviate_count(1_000), "1.0K");
		assert_eq!(abbreviate_count(12_345), "12.3K");
		assert_eq!(abbreviate_count(1_500_000), "1.5M");
		assert_eq!(abbreviate_count(2_760_000_000), "2.8B");
	}

	#[test]
	fn rounding_promotes_to_the_next_unit() {
		assert_eq!(abbreviate_count(950_000), "950.0K");
		assert_eq!(abbreviate_count(999_990), "1.0M");
	}

	#[test]
	fn percentages_drop_trailing_zeros() {
		assert_eq!(review_percent(91.5), "91.5%");
		assert_eq!(review_percent(90.0), "90%");
		assert_eq!(review_percent(77.123), "77.12%");
	}
}
