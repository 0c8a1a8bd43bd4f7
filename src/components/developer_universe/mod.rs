//! Developer/publisher collaboration graph.
//!
//! Fetches a `{ nodes, links }` document, filters and scales it into a
//! renderable graph, and draws it as an interactive force-directed layout:
//! - Nodes sized by game count and colored by average review score
//! - Hover or click a node to highlight it, its neighbors and its links
//! - Info panel with the focus node's stats and related companies
//! - Reset and fullscreen controls
//!
//! # Example
//!
//! ```ignore
//! use developer_universe::{Align, DeveloperUniverse};
//!
//! view! { <DeveloperUniverse align=Align::Right /> }
//! ```

pub mod colormap;
mod component;
pub mod format;
pub mod highlight;
pub mod interaction;
mod lifecycle;
pub mod loader;
mod panel;
pub mod process;
mod property_tests;
mod render;
pub mod scale;
pub mod state;
pub mod theme;
pub mod types;

pub use component::{Align, DeveloperUniverse, UniverseConfig};
pub use interaction::{Interaction, PointerEvent};
pub use process::{ProcessOptions, ProcessedGraph, ProcessedLink, ProcessedNode, process};
pub use types::{CompanyKind, RawGraph, RawLink, RawNode};
