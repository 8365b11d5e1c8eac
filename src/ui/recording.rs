//! Headless view that keeps the latest panel per container

use std::collections::{BTreeSet, HashMap};
use std::sync::Mutex;

use super::{ContainerId, DashboardView, Panel};

/// Stores rendered panels in memory instead of displaying them
///
/// Useful for embedding the dashboard without a display and for tests.
#[derive(Debug, Default)]
pub struct RecordingView {
    dashboard: bool,
    containers: BTreeSet<ContainerId>,
    panels: Mutex<HashMap<ContainerId, Panel>>,
    renders: Mutex<Vec<ContainerId>>,
}

impl RecordingView {
    /// A dashboard exposing every container
    pub fn full() -> Self {
        Self::with_containers(ContainerId::ALL)
    }

    /// A dashboard exposing only the given containers
    pub fn with_containers(containers: impl IntoIterator<Item = ContainerId>) -> Self {
        Self {
            dashboard: true,
            containers: containers.into_iter().collect(),
            ..Default::default()
        }
    }

    /// A page without the dashboard root
    pub fn without_dashboard() -> Self {
        Self::default()
    }

    /// Latest panel rendered into `id`
    pub fn panel(&self, id: ContainerId) -> Option<Panel> {
        self.panels.lock().unwrap_or_else(|e| e.into_inner()).get(&id).cloned()
    }

    /// Every container rendered so far, in render order
    pub fn render_log(&self) -> Vec<ContainerId> {
        self.renders.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl DashboardView for RecordingView {
    fn has_dashboard(&self) -> bool {
        self.dashboard
    }

    fn has_container(&self, id: ContainerId) -> bool {
        self.dashboard && self.containers.contains(&id)
    }

    fn render(&self, id: ContainerId, panel: Panel) {
        self.renders.lock().unwrap_or_else(|e| e.into_inner()).push(id);
        self.panels.lock().unwrap_or_else(|e| e.into_inner()).insert(id, panel);
    }
}
