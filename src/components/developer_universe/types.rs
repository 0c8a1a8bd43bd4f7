//! Raw graph documents as produced by the data-preparation step.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Whether a company ships games it built or games it published.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CompanyKind {
	/// Builds games.
	Developer,
	/// Publishes games.
	Publisher,
	/// Missing, null, or unrecognised `type` values.
	#[default]
	Unknown,
}

impl<'de> Deserialize<'de> for CompanyKind {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let kind = Option::<String>::deserialize(deserializer)?;
		Ok(match kind.as_deref() {
			Some("developer") => CompanyKind::Developer,
			Some("publisher") => CompanyKind::Publisher,
			_ => CompanyKind::Unknown,
		})
	}
}

impl CompanyKind {
	/// Capitalised display label, `None` when the kind is unknown.
	pub fn label(self) -> Option<&'static str> {
		match self {
			CompanyKind::Developer => Some("Developer"),
			CompanyKind::Publisher => Some("Publisher"),
			CompanyKind::Unknown => None,
		}
	}
}

/// A developer or publisher. Identity is `id` (the company name).
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct RawNode {
	/// Company name.
	pub id: String,
	/// From the `type` field.
	#[serde(rename = "type", default)]
	pub kind: CompanyKind,
	/// Games the company is associated with.
	#[serde(default, deserialize_with = "count")]
	pub game_count: u64,
	/// Average positive review percentage in `[0, 100]`.
	#[serde(default, deserialize_with = "score")]
	pub avg_review_score: f64,
	/// Estimated owners summed over the company's games.
	#[serde(default, deserialize_with = "count")]
	pub total_owners: u64,
}

/// "Collaborated on at least one game together". Stored ordered, meant undirected.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct RawLink {
	/// Id of one endpoint.
	pub source: String,
	/// Id of the other endpoint.
	pub target: String,
}

/// The whole document: `{ nodes: [...], links: [...] }`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct RawGraph {
	/// Companies.
	#[serde(default)]
	pub nodes: Vec<RawNode>,
	/// Collaborations between companies.
	#[serde(default)]
	pub links: Vec<RawLink>,
}

impl RawGraph {
	/// True when the document has no nodes.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}
}

/// Any JSON value as a count: floats truncate toward zero, and negatives,
/// `null`, strings and the rest read as 0.
fn count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
	let value = Option::<Value>::deserialize(deserializer)?;
	Ok(match value {
		Some(Value::Number(n)) => n
			.as_u64()
			.or_else(|| n.as_f64().filter(|f| *f > 0.0).map(|f| f.trunc() as u64))
			.unwrap_or(0),
		_ => 0,
	})
}

/// Any JSON number as-is; every other value reads as 0.
fn score<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
	let value = Option::<Value>::deserialize(deserializer)?;
	Ok(value.as_ref().and_then(Value::as_f64).unwrap_or(0.0))
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn missing_and_null_fields_default_to_zero() {
		let graph: RawGraph = serde_json::from_str(
			r#"{
				"nodes": [
					{ "id": "Valve", "type": "developer", "game_count": 40, "avg_review_score": 91.5, "total_owners": 1500000 },
					{ "id": "Nobody", "game_count": null, "avg_review_score": null },
					{ "id": "Odd", "type": "studio" }
				],
				"links": [{ "source": "Valve", "target": "Nobody" }]
			}"#,
		)
		.unwrap();

		assert_eq!(graph.nodes[0].kind, CompanyKind::Developer);
		assert_eq!(graph.nodes[0].total_owners, 1_500_000);
		assert_eq!(
			graph.nodes[1],
			RawNode {
				id: "Nobody".into(),
				..RawNode::default()
			}
		);
		assert_eq!(graph.nodes[2].kind, CompanyKind::Unknown);
		assert_eq!(graph.links.len(), 1);
	}

	#[test]
	fn malformed_numbers_read_as_counts_instead_of_failing() {
		let graph: RawGraph = serde_json::from_str(
			r#"{
				"nodes": [
					{ "id": "Float", "game_count": 12.0, "total_owners": 2500.9 },
					{ "id": "Negative", "game_count": -3, "total_owners": -1 },
					{ "id": "Text", "game_count": "7", "avg_review_score": "high", "total_owners": [1] }
				]
			}"#,
		)
		.unwrap();

		assert_eq!(graph.nodes[0].game_count, 12);
		assert_eq!(graph.nodes[0].total_owners, 2500);
		assert_eq!(graph.nodes[1].game_count, 0);
		assert_eq!(graph.nodes[1].total_owners, 0);
		assert_eq!(
			graph.nodes[2],
			RawNode {
				id: "Text".into(),
				..RawNode::default()
			}
		);
	}

	#[test]
	fn missing_collections_are_empty() {
		let graph: RawGraph = serde_json::from_str("{}").unwrap();
		assert!(graph.is_empty());
		assert!(graph.links.is_empty());
	}

	#[test]
	fn kind_labels() {
		assert_eq!(CompanyKind::Publisher.label(), Some("Publisher"));
		assert_eq!(CompanyKind::Unknown.label(), None);
	}
}
