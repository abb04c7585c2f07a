//! View State Store
//!
//! Holds the dashboard's client-local state. Every other component reads it
//! or requests changes through [`Store::apply`]; side effects such as
//! persistence run in [`StateObserver`]s reacting to applied changes.

mod state;
#[allow(clippy::module_inception)]
mod store;

pub use state::{DashboardState, StatePatch};
pub use store::{Mutation, StateObserver, Store};
