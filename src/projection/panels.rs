//! Panel list projection

use serde::Serialize;
use std::fmt;

use super::selectors;
use crate::model::PanelId;
use crate::store::DashboardState;

/// One summary statistic and its label
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panel {
    pub id: PanelId,
    pub label: &'static str,
    pub value: String,
}

impl fmt::Display for Panel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.id, self.label, self.value)
    }
}

/// Panel ids and labels, in display order
pub const PANELS: [(PanelId, &str); 4] = [
    (1, "Total Interviews"),
    (2, "Least Popular Time Slot"),
    (3, "Most Popular Day"),
    (4, "Interviews Per Day"),
];

/// Whether `id` names a dashboard panel
pub fn is_panel(id: PanelId) -> bool {
    PANELS.iter().any(|(panel, _)| *panel == id)
}

/// Panels to display, filtered by focus
///
/// Returns `None` while the dashboard is loading.
pub fn project(state: &DashboardState) -> Option<Vec<Panel>> {
    if state.loading {
        return None;
    }

    let panels = PANELS
        .iter()
        .filter(|(id, _)| state.focus.shows(*id))
        .map(|&(id, label)| Panel {
            id,
            label,
            value: panel_value(state, id),
        })
        .collect();

    Some(panels)
}

/// Container class for the renderer
pub fn dashboard_class(state: &DashboardState) -> &'static str {
    if state.focus.is_set() {
        "dashboard dashboard--focused"
    } else {
        "dashboard"
    }
}

fn panel_value(state: &DashboardState, id: PanelId) -> String {
    match id {
        1 => selectors::total_interviews(state).to_string(),
        2 => selectors::least_popular_time_slot(state).unwrap_or_default(),
        3 => selectors::most_popular_day(state).unwrap_or_default(),
        4 => format!("{:.1}", selectors::interviews_per_day(state)),
        _ => String::new(),
    }
}
