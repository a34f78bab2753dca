//! One window's worth of UI state, configured by a [`ScreenConfig`].

use crate::{
    CapturedItem, ChatSession, ContentItem, Edge, FolderFilter, Library, MemoPanel, PanelResizer,
    PanelState, PendingItems, ScreenConfig, Sidebar, TabManager, ViewMode, Zoom,
};
use serde::{Deserialize, Serialize};

/// Selects one of the two resizable panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelSide {
    Left,
    Right,
}

/// Serializable view of the workbench sent to the UI on load.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkbenchSnapshot {
    pub config: ScreenConfig,
    pub sidebar: Sidebar,
    pub sidebar_width: f64,
    pub folder_name: String,
    pub view_mode: ViewMode,
    pub tabs: TabManager,
    pub left_panel: PanelState,
    pub right_panel: PanelState,
    pub zoom_level: i32,
    pub zoom_percentage: u32,
    pub selected: Vec<String>,
}

pub struct Workbench {
    config: ScreenConfig,
    library: Library,
    pending: PendingItems,
    sidebar: Sidebar,
    view_mode: ViewMode,
    tabs: TabManager,
    left: PanelResizer,
    right: PanelResizer,
    memo: MemoPanel,
    chat: ChatSession,
    zoom: Zoom,
}

impl Workbench {
    pub fn new(config: ScreenConfig, library: Library) -> Self {
        Self {
            config,
            library,
            pending: PendingItems::new(),
            sidebar: Sidebar::new(),
            view_mode: ViewMode::default(),
            tabs: TabManager::new(),
            left: PanelResizer::new(config.left_panel, Edge::Left),
            right: PanelResizer::new(config.right_panel, Edge::Right),
            memo: MemoPanel::new(),
            chat: ChatSession::new(),
            zoom: config.zoom,
        }
    }

    /// The main window's workbench over the seed dataset.
    pub fn main() -> Self {
        Self::new(ScreenConfig::main(), Library::seeded())
    }

    pub fn config(&self) -> &ScreenConfig {
        &self.config
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn library_mut(&mut self) -> &mut Library {
        &mut self.library
    }

    /// Adds a captured item to the library and holds it until the UI takes it.
    pub fn collect(&mut self, captured: CapturedItem) -> ContentItem {
        let item = self.library.add_captured(captured);
        self.pending.push(item.clone());
        item
    }

    pub fn take_pending(&mut self) -> Vec<ContentItem> {
        self.pending.drain()
    }

    /// The URL a link or video item points at, if the item exists and has one.
    pub fn item_url(&self, id: &str) -> Option<String> {
        self.library.get(id)?.kind.url().map(str::to_string)
    }

    pub fn sidebar(&self) -> &Sidebar {
        &self.sidebar
    }

    pub fn sidebar_mut(&mut self) -> &mut Sidebar {
        &mut self.sidebar
    }

    /// Items matching the sidebar's current selection.
    pub fn visible_items(&self) -> Vec<ContentItem> {
        self.library.items(self.sidebar.filter())
    }

    pub fn select_folder(&mut self, filter: FolderFilter) -> Vec<ContentItem> {
        self.sidebar.select(filter);
        self.visible_items()
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    /// Tab state, or `None` on screens without tabs.
    pub fn tabs(&self) -> Option<&TabManager> {
        self.config.tabs_enabled.then_some(&self.tabs)
    }

    pub fn tabs_mut(&mut self) -> Option<&mut TabManager> {
        if self.config.tabs_enabled {
            Some(&mut self.tabs)
        } else {
            None
        }
    }

    pub fn panel(&self, side: PanelSide) -> &PanelResizer {
        match side {
            PanelSide::Left => &self.left,
            PanelSide::Right => &self.right,
        }
    }

    pub fn panel_mut(&mut self, side: PanelSide) -> &mut PanelResizer {
        match side {
            PanelSide::Left => &mut self.left,
            PanelSide::Right => &mut self.right,
        }
    }

    pub fn memo(&self) -> &MemoPanel {
        &self.memo
    }

    pub fn memo_mut(&mut self) -> &mut MemoPanel {
        &mut self.memo
    }

    pub fn chat(&self) -> &ChatSession {
        &self.chat
    }

    pub fn chat_mut(&mut self) -> &mut ChatSession {
        &mut self.chat
    }

    pub fn zoom(&self) -> Zoom {
        self.zoom
    }

    pub fn set_zoom(&mut self, zoom: Zoom) -> Zoom {
        self.zoom = zoom;
        zoom
    }

    pub fn snapshot(&self) -> WorkbenchSnapshot {
        WorkbenchSnapshot {
            config: self.config,
            sidebar: self.sidebar.clone(),
            sidebar_width: self.sidebar.width(),
            folder_name: self.sidebar.filter().display_name(self.library.folders()),
            view_mode: self.view_mode,
            tabs: self.tabs.clone(),
            left_panel: self.left.state(),
            right_panel: self.right.state(),
            zoom_level: self.zoom.level(),
            zoom_percentage: self.zoom.percentage(),
            selected: self.library.selected().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ContentType;

    #[test]
    fn test_panels_follow_screen_config() {
        let main = Workbench::main();
        assert_eq!(main.panel(PanelSide::Right).width(), ScreenConfig::main().right_panel.default);

        let sticky = Workbench::new(ScreenConfig::sticky_note(), Library::seeded());
        assert_eq!(
            sticky.panel(PanelSide::Left).limits(),
            ScreenConfig::sticky_note().left_panel
        );
        assert_eq!(sticky.zoom().level(), -1);
    }

    #[test]
    fn test_tabs_absent_when_disabled() {
        let mut sticky = Workbench::new(ScreenConfig::sticky_note(), Library::seeded());
        assert!(sticky.tabs().is_none());
        assert!(sticky.tabs_mut().is_none());

        let mut main = Workbench::main();
        main.tabs_mut().unwrap().open("3");
        assert_eq!(main.tabs().unwrap().active(), Some("3"));
    }

    #[test]
    fn test_select_folder_filters_items() {
        let mut bench = Workbench::main();
        let links = bench.select_folder(FolderFilter::Category(ContentType::Link));
        assert!(!links.is_empty());
        assert!(links.iter().all(|i| i.content_type() == ContentType::Link));
        assert_eq!(bench.visible_items().len(), links.len());
    }

    #[test]
    fn test_collect_queues_until_taken() {
        let mut bench = Workbench::main();
        let before = bench.library().len();
        let item = bench.collect(CapturedItem::from_note("Idea\nmore", chrono::Utc::now()));
        assert_eq!(bench.library().len(), before + 1);
        assert_eq!(bench.visible_items()[0].id, item.id);
        assert_eq!(bench.take_pending(), vec![item]);
        assert!(bench.take_pending().is_empty());
    }

    #[test]
    fn test_item_url_only_for_links_and_videos() {
        let mut bench = Workbench::main();
        let link = bench.select_folder(FolderFilter::Category(ContentType::Link))[0].clone();
        assert_eq!(bench.item_url(&link.id).as_deref(), link.kind.url());
        assert!(bench.item_url(&link.id).is_some());

        let text = bench.select_folder(FolderFilter::Category(ContentType::Text))[0].clone();
        assert_eq!(bench.item_url(&text.id), None);
        assert_eq!(bench.item_url("no-such-item"), None);
    }

    #[test]
    fn test_snapshot_reports_zoom_and_sidebar() {
        let mut bench = Workbench::main();
        bench.set_zoom(Zoom::new(1));
        bench.sidebar_mut().toggle_collapsed();
        let snap = bench.snapshot();
        assert_eq!(snap.zoom_percentage, 110);
        assert_eq!(snap.sidebar_width, crate::SIDEBAR_COLLAPSED_WIDTH);
        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["viewMode"], "masonry");
        assert_eq!(json["zoomLevel"], 1);
    }
}
