//! Drag-to-resize controller for the side panels.
//!
//! A [`PanelResizer`] owns one divider. Widths are validated against
//! [`PanelLimits`] before they are stored, so `width()` is always inside
//! `[min, max]`. A drag that pulls the panel below `collapse_below` closes the
//! panel instead of rendering it at a sliver width.

use crate::{HubError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Duration of the reset-to-default animation.
pub const RESET_DURATION: Duration = Duration::from_millis(240);

/// Width bounds and defaults for one panel, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelLimits {
    pub min: f64,
    pub max: f64,
    pub default: f64,
    pub collapse_below: f64,
}

impl PanelLimits {
    #[must_use]
    pub fn contains(&self, width: f64) -> bool {
        width >= self.min && width <= self.max
    }
}

/// Which side of the window the panel is docked to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    /// Divider on the panel's right; dragging right grows the panel.
    Left,
    /// Divider on the panel's left; dragging left grows the panel.
    Right,
}

#[derive(Debug, Clone, Copy)]
struct Drag {
    start_x: f64,
    start_width: f64,
}

#[derive(Debug, Clone, Copy)]
struct ResetAnimation {
    from: f64,
    elapsed: Duration,
}

/// Snapshot sent to the UI after every resize interaction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelState {
    pub width: f64,
    pub collapsed: bool,
    pub dragging: bool,
    pub animating: bool,
}

pub struct PanelResizer {
    limits: PanelLimits,
    edge: Edge,
    width: f64,
    collapsed: bool,
    drag: Option<Drag>,
    animation: Option<ResetAnimation>,
}

impl PanelResizer {
    pub fn new(limits: PanelLimits, edge: Edge) -> Self {
        Self {
            limits,
            edge,
            width: limits.default,
            collapsed: false,
            drag: None,
            animation: None,
        }
    }

    pub fn limits(&self) -> PanelLimits {
        self.limits
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn state(&self) -> PanelState {
        PanelState {
            width: self.width,
            collapsed: self.collapsed,
            dragging: self.drag.is_some(),
            animating: self.animation.is_some(),
        }
    }

    /// Stores `width` if it is within limits; otherwise leaves the panel untouched.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::WidthOutOfRange`] when `width` is outside `[min, max]`
    /// (NaN included).
    pub fn set_width(&mut self, width: f64) -> Result<()> {
        if !self.limits.contains(width) {
            return Err(HubError::WidthOutOfRange {
                requested: width,
                min: self.limits.min,
                max: self.limits.max,
            });
        }
        self.width = width;
        self.collapsed = false;
        self.animation = None;
        Ok(())
    }

    /// Starts a resize gesture at `pointer_x`.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::DragInProgress`] if a gesture is already active.
    pub fn begin_drag(&mut self, pointer_x: f64) -> Result<()> {
        if self.drag.is_some() {
            return Err(HubError::DragInProgress);
        }
        self.animation = None;
        let start_width = if self.collapsed { 0.0 } else { self.width };
        self.drag = Some(Drag { start_x: pointer_x, start_width });
        Ok(())
    }

    /// Applies a pointer move during a gesture. Moves outside a gesture are ignored.
    pub fn drag_to(&mut self, pointer_x: f64) -> PanelState {
        let Some(drag) = self.drag else {
            return self.state();
        };
        let delta = match self.edge {
            Edge::Left => pointer_x - drag.start_x,
            Edge::Right => drag.start_x - pointer_x,
        };
        let proposed = drag.start_width + delta;
        if proposed < self.limits.collapse_below {
            self.collapsed = true;
        } else if self.limits.contains(proposed) {
            self.width = proposed;
            self.collapsed = false;
        }
        self.state()
    }

    /// Ends the active gesture, wherever the pointer was released.
    pub fn end_drag(&mut self) -> PanelState {
        self.drag = None;
        self.state()
    }

    /// Starts animating back to the default width and reopens a collapsed panel.
    pub fn reset(&mut self) -> PanelState {
        self.drag = None;
        self.collapsed = false;
        if self.width != self.limits.default {
            self.animation = Some(ResetAnimation { from: self.width, elapsed: Duration::ZERO });
        }
        self.state()
    }

    /// Advances the reset animation by `dt`.
    pub fn advance(&mut self, dt: Duration) -> PanelState {
        if let Some(mut anim) = self.animation.take() {
            anim.elapsed += dt;
            let t = (anim.elapsed.as_secs_f64() / RESET_DURATION.as_secs_f64()).min(1.0);
            let eased = 1.0 - (1.0 - t).powi(3);
            self.width = anim.from + (self.limits.default - anim.from) * eased;
            if t < 1.0 {
                self.animation = Some(anim);
            } else {
                self.width = self.limits.default;
            }
        }
        self.state()
    }

    /// Opens a collapsed panel or collapses an open one, keeping the stored width.
    pub fn toggle_collapsed(&mut self) -> PanelState {
        self.drag = None;
        self.collapsed = !self.collapsed;
        self.state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits() -> PanelLimits {
        PanelLimits { min: 240.0, max: 640.0, default: 320.0, collapse_below: 120.0 }
    }

    #[test]
    fn test_set_width_rejects_out_of_range() {
        let mut panel = PanelResizer::new(limits(), Edge::Right);
        for w in [0.0, 239.9, 640.1, 10_000.0, -5.0, f64::NAN] {
            assert!(panel.set_width(w).is_err());
            assert_eq!(panel.width(), 320.0);
        }
        for w in [240.0, 400.0, 640.0] {
            panel.set_width(w).unwrap();
            assert_eq!(panel.width(), w);
        }
    }

    #[test]
    fn test_right_panel_grows_when_dragged_left() {
        let mut panel = PanelResizer::new(limits(), Edge::Right);
        panel.begin_drag(1000.0).unwrap();
        let state = panel.drag_to(900.0);
        assert_eq!(state.width, 420.0);
        assert!(state.dragging);
    }

    #[test]
    fn test_left_panel_grows_when_dragged_right() {
        let mut panel = PanelResizer::new(limits(), Edge::Left);
        panel.begin_drag(320.0).unwrap();
        assert_eq!(panel.drag_to(380.0).width, 380.0);
    }

    #[test]
    fn test_drag_beyond_max_keeps_last_valid_width() {
        let mut panel = PanelResizer::new(limits(), Edge::Right);
        panel.begin_drag(1000.0).unwrap();
        panel.drag_to(500.0);
        assert_eq!(panel.width(), 320.0);
        panel.drag_to(950.0);
        assert_eq!(panel.width(), 370.0);
    }

    #[test]
    fn test_drag_below_threshold_collapses() {
        let mut panel = PanelResizer::new(limits(), Edge::Right);
        panel.begin_drag(1000.0).unwrap();
        let state = panel.drag_to(1250.0);
        assert!(state.collapsed);
        assert_eq!(state.width, 320.0);
        let state = panel.drag_to(1050.0);
        assert!(!state.collapsed);
        assert_eq!(state.width, 270.0);
    }

    #[test]
    fn test_drag_between_threshold_and_min_is_rejected() {
        let mut panel = PanelResizer::new(limits(), Edge::Right);
        panel.begin_drag(1000.0).unwrap();
        let state = panel.drag_to(1150.0);
        assert!(!state.collapsed);
        assert_eq!(state.width, 320.0);
    }

    #[test]
    fn test_only_one_gesture_at_a_time() {
        let mut panel = PanelResizer::new(limits(), Edge::Right);
        panel.begin_drag(10.0).unwrap();
        assert!(matches!(panel.begin_drag(20.0), Err(HubError::DragInProgress)));
        panel.end_drag();
        assert!(panel.begin_drag(20.0).is_ok());
    }

    #[test]
    fn test_moves_after_release_are_ignored() {
        let mut panel = PanelResizer::new(limits(), Edge::Right);
        panel.begin_drag(1000.0).unwrap();
        panel.end_drag();
        assert_eq!(panel.drag_to(800.0).width, 320.0);
    }

    #[test]
    fn test_reset_animates_to_default() {
        let mut panel = PanelResizer::new(limits(), Edge::Right);
        panel.set_width(600.0).unwrap();
        assert!(panel.reset().animating);

        let mid = panel.advance(RESET_DURATION / 2);
        assert!(mid.animating);
        assert!(mid.width < 600.0 && mid.width > 320.0);

        let done = panel.advance(RESET_DURATION);
        assert!(!done.animating);
        assert_eq!(done.width, 320.0);
    }

    #[test]
    fn test_reset_reopens_collapsed_panel() {
        let mut panel = PanelResizer::new(limits(), Edge::Right);
        panel.toggle_collapsed();
        assert!(panel.is_collapsed());
        let state = panel.reset();
        assert!(!state.collapsed);
        assert!(!state.animating);
    }

    #[test]
    fn test_width_stays_in_range_under_any_sequence() {
        let mut panel = PanelResizer::new(limits(), Edge::Left);
        let moves = [0.0, 50.0, -400.0, 900.0, 333.0, 1e9, -1e9, 12.5];
        panel.begin_drag(300.0).unwrap();
        for x in moves {
            panel.drag_to(x);
            assert!(limits().contains(panel.width()));
            let _ = panel.set_width(x);
            assert!(limits().contains(panel.width()));
        }
        panel.end_drag();
        panel.reset();
        for _ in 0..20 {
            panel.advance(Duration::from_millis(17));
            assert!(limits().contains(panel.width()));
        }
    }
}
