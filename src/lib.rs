//! # Interview Dashboard
//!
//! Headless core of an interview-scheduling dashboard: keeps a client-local
//! view of the scheduler's days, appointments and interviewers in sync with
//! the server, and derives the statistic panels a UI renders.
//!
//! ## Features
//!
//! - **Single state store**: all mutations go through one atomic entry point
//! - **Concurrent initial load**: days, appointments and interviewers fetched
//!   together and merged at once
//! - **Live updates**: `SET_INTERVIEW` push messages applied as targeted merges
//! - **Persisted focus**: the focused panel survives restarts
//!
//! ## Modules
//!
//! - [`store`]: View state and its mutation entry point
//! - [`loader`]: Initial fetch of the scheduler collections
//! - [`live`]: Push channel and the listener applying its updates
//! - [`persistence`]: Local storage and the focus bridge
//! - [`selection`]: Panel focus toggling
//! - [`projection`]: Panels derived from state
//! - [`dashboard`]: The component tying the above together
//! - [`server`]: Development scheduler API with a push channel
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use interview_dashboard::{Config, Dashboard, DashboardDeps};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let mut dashboard = Dashboard::initialize(DashboardDeps::from_config(&config)?);
//!
//!     dashboard.wait_until_loaded().await?;
//!     for panel in dashboard.panels().unwrap_or_default() {
//!         println!("{}", panel);
//!     }
//!
//!     // Focus the second panel, then close the push channel
//!     dashboard.select_panel(2);
//!     dashboard.teardown().await;
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod dashboard;
pub mod live;
pub mod loader;
pub mod model;
pub mod persistence;
pub mod projection;
pub mod selection;
pub mod server;
pub mod store;

#[cfg(test)]
mod testing;

// Re-export top-level types for convenience
pub use config::{Config, ConfigError, LoggingConfig};

pub use dashboard::{Dashboard, DashboardDeps};

pub use model::{
    Appointment, AppointmentId, Appointments, Day, Focus, Interview, Interviewer, InterviewerId,
    Interviewers, PanelId,
};

pub use store::{DashboardState, Mutation, StateObserver, StatePatch, Store};

pub use loader::{HttpSchedulerApi, InitialLoader, LoadError, SchedulerApi};

pub use live::{ChannelState, LiveUpdateListener, PushConnector, PushError, PushMessage};

pub use persistence::{FileStorage, FocusBridge, LocalStorage, MemoryStorage, StorageError};

pub use projection::Panel;
