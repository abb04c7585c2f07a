//! View Projection
//!
//! Read-only derivation of the displayed panels from the dashboard state.

mod panels;
pub mod selectors;

pub use panels::{dashboard_class, is_panel, project, Panel, PANELS};
