//! Per-window layout configuration: side panels, sidebar and zoom.

use crate::{FolderFilter, PanelLimits};
use serde::{Deserialize, Serialize};

/// Width of the folder sidebar when collapsed to its icon rail.
pub const SIDEBAR_COLLAPSED_WIDTH: f64 = 48.0;
/// Width of the folder sidebar when expanded.
pub const SIDEBAR_EXPANDED_WIDTH: f64 = 288.0;

pub const MIN_ZOOM_LEVEL: i32 = -3;
pub const MAX_ZOOM_LEVEL: i32 = 3;
const ZOOM_STEP: f64 = 1.1;

/// Everything that differs between the screens a window can show.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenConfig {
    /// Editor workspace panel, docked left of the memo sidebar.
    pub left_panel: PanelLimits,
    /// Memo/chat sidebar on the right edge.
    pub right_panel: PanelLimits,
    pub tabs_enabled: bool,
    pub zoom: Zoom,
}

impl ScreenConfig {
    pub fn main() -> Self {
        Self {
            left_panel: PanelLimits { min: 320.0, max: 900.0, default: 480.0, collapse_below: 160.0 },
            right_panel: PanelLimits { min: 280.0, max: 560.0, default: 320.0, collapse_below: 140.0 },
            tabs_enabled: true,
            zoom: Zoom::default(),
        }
    }

    /// Compact layout sized for the 300px sticky-note window.
    pub fn sticky_note() -> Self {
        Self {
            left_panel: PanelLimits { min: 160.0, max: 280.0, default: 240.0, collapse_below: 80.0 },
            right_panel: PanelLimits { min: 160.0, max: 280.0, default: 200.0, collapse_below: 80.0 },
            tabs_enabled: false,
            zoom: Zoom::new(-1),
        }
    }
}

/// Window zoom as an integer step; level 0 is 100%.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Zoom {
    level: i32,
}

impl Zoom {
    /// Builds a zoom clamped to `[MIN_ZOOM_LEVEL, MAX_ZOOM_LEVEL]`.
    #[must_use]
    pub fn new(level: i32) -> Self {
        Self { level: level.clamp(MIN_ZOOM_LEVEL, MAX_ZOOM_LEVEL) }
    }

    pub fn level(self) -> i32 {
        self.level
    }

    /// Rounded display percentage, `100 * 1.1^level`.
    pub fn percentage(self) -> u32 {
        (100.0 * ZOOM_STEP.powi(self.level)).round() as u32
    }

    #[must_use]
    pub fn zoom_in(self) -> Self {
        Self::new(self.level + 1)
    }

    #[must_use]
    pub fn zoom_out(self) -> Self {
        Self::new(self.level - 1)
    }

    /// Maps a slider position in `[0, 1]` to the nearest level.
    #[must_use]
    pub fn from_slider(fraction: f64) -> Self {
        let fraction = fraction.clamp(0.0, 1.0);
        let span = f64::from(MAX_ZOOM_LEVEL - MIN_ZOOM_LEVEL);
        Self::new((f64::from(MIN_ZOOM_LEVEL) + fraction * span).round() as i32)
    }
}

/// How the content grid lays out cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Masonry,
    Grid,
    List,
    Justified,
}

/// State of the folder sidebar.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sidebar {
    collapsed: bool,
    expanded_groups: Vec<String>,
    filter: FolderFilter,
}

impl Default for Sidebar {
    fn default() -> Self {
        Self {
            collapsed: false,
            expanded_groups: vec!["categories".to_string(), "folders".to_string()],
            filter: FolderFilter::All,
        }
    }
}

impl Sidebar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn width(&self) -> f64 {
        if self.collapsed {
            SIDEBAR_COLLAPSED_WIDTH
        } else {
            SIDEBAR_EXPANDED_WIDTH
        }
    }

    /// Flips the collapsed flag and returns the new width.
    pub fn toggle_collapsed(&mut self) -> f64 {
        self.collapsed = !self.collapsed;
        self.width()
    }

    pub fn filter(&self) -> &FolderFilter {
        &self.filter
    }

    pub fn select(&mut self, filter: FolderFilter) {
        self.filter = filter;
    }

    pub fn is_group_expanded(&self, group: &str) -> bool {
        self.expanded_groups.iter().any(|g| g == group)
    }

    /// Expands or folds a group; returns whether it is now expanded.
    pub fn toggle_group(&mut self, group: &str) -> bool {
        if let Some(pos) = self.expanded_groups.iter().position(|g| g == group) {
            self.expanded_groups.remove(pos);
            false
        } else {
            self.expanded_groups.push(group.to_string());
            true
        }
    }
}
