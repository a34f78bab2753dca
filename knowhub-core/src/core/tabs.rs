//! Ordered set of open content tabs and the active selection.

use serde::Serialize;

/// Open tabs in insertion order, plus which one is active.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TabManager {
    tabs: Vec<String>,
    active: Option<String>,
}

impl TabManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens `id` and makes it active. An already-open tab is only activated.
    pub fn open(&mut self, id: &str) {
        if !self.tabs.iter().any(|t| t == id) {
            self.tabs.push(id.to_string());
        }
        self.active = Some(id.to_string());
    }

    /// Closes `id`. Closing the active tab activates the last remaining tab.
    ///
    /// Returns `false` if `id` was not open.
    pub fn close(&mut self, id: &str) -> bool {
        let Some(pos) = self.tabs.iter().position(|t| t == id) else {
            return false;
        };
        self.tabs.remove(pos);
        if self.active.as_deref() == Some(id) {
            self.active = self.tabs.last().cloned();
        }
        true
    }

    pub fn tabs(&self) -> &[String] {
        &self.tabs
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn is_open(&self, id: &str) -> bool {
        self.tabs.iter().any(|t| t == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> TabManager {
        let mut tabs = TabManager::new();
        tabs.open("A");
        tabs.open("B");
        tabs.open("C");
        tabs
    }

    #[test]
    fn test_reopening_only_changes_active() {
        let mut tabs = abc();
        tabs.open("A");
        assert_eq!(tabs.tabs(), &["A", "B", "C"]);
        assert_eq!(tabs.active(), Some("A"));
    }

    #[test]
    fn test_close_active_selects_last_remaining() {
        let mut tabs = abc();
        assert!(tabs.close("C"));
        assert_eq!(tabs.active(), Some("B"));
        assert_eq!(tabs.tabs(), &["A", "B"]);
    }

    #[test]
    fn test_close_inactive_keeps_active() {
        let mut tabs = abc();
        assert!(tabs.close("B"));
        assert_eq!(tabs.active(), Some("C"));
        assert_eq!(tabs.tabs(), &["A", "C"]);
    }

    #[test]
    fn test_close_active_in_middle_selects_last() {
        let mut tabs = abc();
        tabs.open("B");
        tabs.close("B");
        assert_eq!(tabs.active(), Some("C"));
    }

    #[test]
    fn test_close_last_tab_clears_active() {
        let mut tabs = TabManager::new();
        tabs.open("A");
        tabs.close("A");
        assert!(tabs.tabs().is_empty());
        assert_eq!(tabs.active(), None);
    }

    #[test]
    fn test_close_unknown_is_noop() {
        let mut tabs = abc();
        assert!(!tabs.close("Z"));
        assert_eq!(tabs.tabs().len(), 3);
        assert_eq!(tabs.active(), Some("C"));
    }
}
