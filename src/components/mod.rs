//! UI components.

pub mod developer_universe;
