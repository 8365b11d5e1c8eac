//! Startup and periodic refresh of dashboard resources
//!
//! Every resource and widget is loaded once when the scheduler starts. After
//! that a ticker re-loads the periodic subset on a fixed interval. Each load
//! runs as its own tokio task: overlapping loads of the same resource are not
//! deduplicated and whichever finishes last wins.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};

use crate::data::{Resource, Widget};

/// Default time between refresh cycles
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(60);

/// Something that knows how to load each resource and initialize each widget
#[async_trait]
pub trait DashboardLoader: Send + Sync + 'static {
    /// Startup precondition; when false nothing is loaded or scheduled
    fn is_dashboard_present(&self) -> bool;

    /// Loads one resource into its container
    async fn load(&self, resource: Resource);

    /// Runs a one-time widget initializer
    async fn init(&self, widget: Widget);
}

/// Configuration for refresh cycles
#[derive(Debug, Clone)]
pub struct RefreshConfig {
    /// Time between refresh cycles
    pub interval: Duration,
    /// Whether periodic refresh runs after startup
    pub enabled: bool,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval: REFRESH_INTERVAL,
            enabled: true,
        }
    }
}

/// Runs the startup loads and the periodic refresh cycle
pub struct RefreshScheduler {
    config: RefreshConfig,
    loader: Arc<dyn DashboardLoader>,
}

impl RefreshScheduler {
    pub fn new(config: RefreshConfig, loader: Arc<dyn DashboardLoader>) -> Self {
        Self { config, loader }
    }

    /// Starts loading
    ///
    /// # Returns
    /// * `None` if the dashboard is not present; nothing was loaded and no
    ///   ticker was started
    /// * `Some(RefreshHandle)` otherwise
    pub fn start(self) -> Option<RefreshHandle> {
        if !self.loader.is_dashboard_present() {
            tracing::debug!(event = "refresh.skipped", "No dashboard container, not starting");
            return None;
        }

        tracing::info!(
            event = "refresh.started",
            resources = Resource::ALL.len(),
            widgets = Widget::ALL.len(),
            periodic = self.config.enabled,
            interval_secs = self.config.interval.as_secs(),
            "Loading dashboard"
        );

        let mut startup = Vec::with_capacity(Resource::ALL.len() + Widget::ALL.len());
        for resource in Resource::ALL {
            startup.push(spawn_load(&self.loader, resource));
        }
        for widget in Widget::ALL {
            let loader = self.loader.clone();
            startup.push(tokio::spawn(async move { loader.init(widget).await }));
        }

        let ticker = self
            .config
            .enabled
            .then(|| spawn_ticker(self.loader.clone(), self.config.interval));

        Some(RefreshHandle { startup, ticker })
    }
}

fn spawn_load(loader: &Arc<dyn DashboardLoader>, resource: Resource) -> JoinHandle<()> {
    let loader = loader.clone();
    tokio::spawn(async move { loader.load(resource).await })
}

fn spawn_ticker(loader: Arc<dyn DashboardLoader>, period: Duration) -> JoinHandle<()> {
    let mut interval = interval_at(Instant::now() + period, period);

    tokio::spawn(async move {
        let mut cycle: u64 = 0;
        loop {
            interval.tick().await;
            cycle += 1;
            tracing::debug!(event = "refresh.cycle_started", cycle = cycle);

            for resource in Resource::PERIODIC {
                // detached: a slow load does not hold back the next cycle
                drop(spawn_load(&loader, resource));
            }
        }
    })
}

/// Handle to a started scheduler
///
/// There is no way to stop the ticker; dropping the handle detaches it.
pub struct RefreshHandle {
    startup: Vec<JoinHandle<()>>,
    ticker: Option<JoinHandle<()>>,
}

impl RefreshHandle {
    /// Whether a periodic ticker is running
    pub fn is_periodic(&self) -> bool {
        self.ticker.is_some()
    }

    /// Waits until every startup load and initializer has finished
    pub async fn startup_settled(&mut self) {
        let tasks = std::mem::take(&mut self.startup);
        for result in futures::future::join_all(tasks).await {
            if let Err(e) = result {
                tracing::error!(event = "refresh.startup_task_failed", error = %e);
            }
        }
    }

    /// Waits for the ticker, which runs until the process exits
    pub async fn run_forever(mut self) {
        self.startup_settled().await;
        if let Some(ticker) = self.ticker {
            if let Err(e) = ticker.await {
                tracing::error!(event = "refresh.ticker_failed", error = %e);
            }
        }
    }
}
