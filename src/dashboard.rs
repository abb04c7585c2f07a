//! Dashboard Component
//!
//! The state-owning dashboard object. A rendering layer drives it through
//! three entry points:
//!
//! - [`Dashboard::initialize`]: seed focus, start the initial load and the
//!   push listener
//! - [`Dashboard::select_panel`]: apply the "user selected panel" event
//! - [`Dashboard::teardown`]: close the push channel and stop pending work
//!
//! and reads [`Dashboard::panels`] (or subscribes to state changes) to render.

use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::config::Config;
use crate::live::{ChannelState, ListenerHandle, LiveUpdateListener, PushConnector, WsConnector};
use crate::loader::{HttpSchedulerApi, InitialLoader, LoadError, SchedulerApi};
use crate::model::{Focus, PanelId};
use crate::persistence::{FileStorage, FocusBridge, LocalStorage};
use crate::projection::{self, Panel};
use crate::selection;
use crate::store::{DashboardState, Store};

/// External collaborators of a dashboard
pub struct DashboardDeps {
    pub api: Arc<dyn SchedulerApi>,
    pub connector: Arc<dyn PushConnector>,
    pub storage: Arc<dyn LocalStorage>,
}

impl DashboardDeps {
    /// HTTP API, WebSocket push channel and file-backed local storage
    pub fn from_config(config: &Config) -> Result<Self, LoadError> {
        let api = HttpSchedulerApi::new(config.api.client_config())?;

        Ok(Self {
            api: Arc::new(api),
            connector: Arc::new(WsConnector::new(config.push.url.clone())),
            storage: Arc::new(FileStorage::in_dir(config.storage.data_path())),
        })
    }
}

/// A running dashboard
pub struct Dashboard {
    store: Arc<Store>,
    listener: ListenerHandle,
    load_task: Option<JoinHandle<Result<(), LoadError>>>,
    torn_down: bool,
}

impl Dashboard {
    /// Start the dashboard
    ///
    /// Must be called from within a tokio runtime. Returns immediately; the
    /// initial load and the push connection proceed in the background.
    pub fn initialize(deps: DashboardDeps) -> Self {
        let store = Arc::new(Store::new());

        let bridge = Arc::new(FocusBridge::new(deps.storage));
        let focus = bridge.seed(&store);
        store.observe(bridge);

        let loader = InitialLoader::new(deps.api);
        let load_store = Arc::clone(&store);
        let load_task = tokio::spawn(async move { loader.load(&load_store).await });

        let listener = LiveUpdateListener::spawn(deps.connector, Arc::clone(&store));

        tracing::info!(%focus, "Dashboard initialized");

        Self {
            store,
            listener,
            load_task: Some(load_task),
            torn_down: false,
        }
    }

    pub fn store(&self) -> &Arc<Store> {
        &self.store
    }

    /// Snapshot of the current state
    pub fn state(&self) -> DashboardState {
        self.store.state()
    }

    /// Receiver notified after every state change
    pub fn subscribe(&self) -> watch::Receiver<DashboardState> {
        self.store.subscribe()
    }

    /// Panels to render, or `None` while loading
    pub fn panels(&self) -> Option<Vec<Panel>> {
        self.store.read(projection::project)
    }

    pub fn dashboard_class(&self) -> &'static str {
        self.store.read(projection::dashboard_class)
    }

    pub fn focus(&self) -> Focus {
        self.store.read(|state| state.focus)
    }

    /// Route a "user selected panel" event. Returns the resulting focus.
    pub fn select_panel(&self, id: PanelId) -> Focus {
        selection::select_panel(&self.store, id)
    }

    pub fn channel_state(&self) -> ChannelState {
        self.listener.state()
    }

    pub fn listener(&self) -> &ListenerHandle {
        &self.listener
    }

    /// Wait for the initial load to finish
    ///
    /// The load result is handed out once; later calls report `Ok` if the
    /// data is loaded and [`LoadError::Cancelled`] otherwise.
    pub async fn wait_until_loaded(&mut self) -> Result<(), LoadError> {
        match self.load_task.take() {
            Some(task) => match task.await {
                Ok(result) => result,
                Err(e) => {
                    tracing::debug!(error = %e, "Initial load task did not complete");
                    Err(LoadError::Cancelled)
                }
            },
            None if self.store.read(DashboardState::is_ready) => Ok(()),
            None => Err(LoadError::Cancelled),
        }
    }

    /// Close the push channel and abandon an unfinished initial load
    ///
    /// Idempotent.
    pub async fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;

        if let Some(task) = self.load_task.take() {
            if !task.is_finished() {
                tracing::debug!("Aborting unfinished initial load");
            }
            task.abort();
        }

        self.listener.shutdown().await;
        tracing::info!("Dashboard torn down");
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }
}

impl Drop for Dashboard {
    fn drop(&mut self) {
        if let Some(task) = self.load_task.take() {
            task.abort();
        }
    }
}
