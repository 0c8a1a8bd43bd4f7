//! Fetches the collaboration document from a static path.
//!
//! Failures are folded into an empty, settled state by [`LoadState::settle`];
//! the cause is only reported through the log.

use log::{error, info};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

use super::types::RawGraph;

/// Why a document could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
	/// Not running in a browser window.
	#[error("no browser window available")]
	NoWindow,
	/// `fetch` rejected or the body could not be read.
	#[error("network error: {0}")]
	Network(String),
	/// Non-2xx HTTP status.
	#[error("server responded with status {0}")]
	Status(u16),
	/// The body resolved to something other than a string.
	#[error("response body is not text")]
	NotText,
	/// Body is not a graph document.
	#[error("malformed graph document: {0}")]
	Decode(#[from] serde_json::Error),
}

impl LoadError {
	fn network(value: JsValue) -> Self {
		LoadError::Network(format!("{value:?}"))
	}
}

/// Result alias for loading.
pub type Result<T> = std::result::Result<T, LoadError>;

/// Parses a `{ nodes, links }` document.
pub fn parse_graph(text: &str) -> Result<RawGraph> {
	Ok(serde_json::from_str(text)?)
}

/// Fetches and parses the document at `url`.
pub async fn fetch_graph(url: &str) -> Result<RawGraph> {
	let window = web_sys::window().ok_or(LoadError::NoWindow)?;
	let response = JsFuture::from(window.fetch_with_str(url))
		.await
		.map_err(LoadError::network)?;
	let response: Response = response.dyn_into().map_err(LoadError::network)?;
	if !response.ok() {
		return Err(LoadError::Status(response.status()));
	}
	let body = response.text().map_err(LoadError::network)?;
	let text = JsFuture::from(body).await.map_err(LoadError::network)?;
	parse_graph(&text.as_string().ok_or(LoadError::NotText)?)
}

/// Loading flag plus whatever document has arrived.
#[derive(Clone, Debug, PartialEq)]
pub struct LoadState {
	/// True until the first fetch settles.
	pub loading: bool,
	/// Loaded document, empty on failure.
	pub graph: RawGraph,
}

impl Default for LoadState {
	fn default() -> Self {
		Self {
			loading: true,
			graph: RawGraph::default(),
		}
	}
}

impl LoadState {
	/// Records the outcome of a fetch. Always clears `loading`; a failure
	/// leaves the graph empty.
	pub fn settle(&mut self, outcome: Result<RawGraph>) {
		self.loading = false;
		match outcome {
			Ok(graph) => {
				info!(
					"developer-universe: loaded {} nodes, {} links",
					graph.nodes.len(),
					graph.links.len()
				);
				self.graph = graph;
			}
			Err(e) => {
				error!("developer-universe: failed to load graph data: {}", e);
				self.graph = RawGraph::default();
			}
		}
	}
}

/// Fetches `url` and returns the settled state, never an error.
pub async fn load(url: &str) -> LoadState {
	let mut state = LoadState::default();
	state.settle(fetch_graph(url).await);
	state
}
