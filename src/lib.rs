//! developer-universe: Interactive graph of Steam developer and publisher collaborations.
//!
//! This crate provides a WASM-based dashboard view that fetches pre-computed
//! collaboration data and renders it as a force-directed graph with hover and
//! selection highlighting, an info panel, and fullscreen support.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info};

pub mod components;

pub use components::developer_universe::{
	Align, DeveloperUniverse, ProcessOptions, ProcessedGraph, RawGraph, RawLink, RawNode,
	UniverseConfig, process,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("developer-universe: logging initialized");
}

/// Main application component.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Steam Developer Universe" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<main class="dashboard">
			<DeveloperUniverse align=Align::Left />
		</main>
	}
}
