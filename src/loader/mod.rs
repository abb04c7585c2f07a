//! Initial Load
//!
//! - **Client**: HTTP client for the scheduler API collections
//! - **InitialLoader**: concurrent fetch with an all-succeed barrier, merged
//!   into the store in one mutation

mod client;
mod error;
#[allow(clippy::module_inception)]
mod loader;

pub use client::{ApiClientConfig, HttpSchedulerApi, SchedulerApi};
pub use error::LoadError;
pub use loader::{InitialLoader, LoadedData};
