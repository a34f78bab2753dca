//! In-memory content collection backing the main window.

use crate::core::seed;
use crate::{CapturedItem, ContentItem, ContentKind, ContentType, Folder, Stage};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What the sidebar currently has selected.
///
/// Serialized as the plain selection id used by the sidebar
/// (`"all"`, `"text"`, `"images"`, ..., or a folder id).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FolderFilter {
    All,
    Category(ContentType),
    Folder(String),
}

impl From<String> for FolderFilter {
    fn from(id: String) -> Self {
        match id.as_str() {
            "all" => Self::All,
            "text" => Self::Category(ContentType::Text),
            "images" => Self::Category(ContentType::Image),
            "links" => Self::Category(ContentType::Link),
            "videos" => Self::Category(ContentType::Video),
            "files" => Self::Category(ContentType::File),
            _ => Self::Folder(id),
        }
    }
}

impl From<FolderFilter> for String {
    fn from(filter: FolderFilter) -> Self {
        match filter {
            FolderFilter::All => "all".to_string(),
            FolderFilter::Category(ContentType::Text) => "text".to_string(),
            FolderFilter::Category(ContentType::Image) => "images".to_string(),
            FolderFilter::Category(ContentType::Link) => "links".to_string(),
            FolderFilter::Category(ContentType::Video) => "videos".to_string(),
            FolderFilter::Category(ContentType::File) => "files".to_string(),
            FolderFilter::Folder(id) => id,
        }
    }
}

impl FolderFilter {
    #[must_use]
    pub fn matches(&self, item: &ContentItem) -> bool {
        match self {
            Self::All => true,
            Self::Category(t) => item.content_type() == *t,
            Self::Folder(id) => item.folder_id.as_deref() == Some(id.as_str()),
        }
    }

    /// Heading shown above the content grid for this selection.
    #[must_use]
    pub fn display_name(&self, folders: &[Folder]) -> String {
        match self {
            Self::All => "All content".to_string(),
            Self::Category(ContentType::Text) => "Text highlights".to_string(),
            Self::Category(ContentType::Image) => "Images".to_string(),
            Self::Category(ContentType::Link) => "Links".to_string(),
            Self::Category(ContentType::Video) => "Videos".to_string(),
            Self::Category(ContentType::File) => "Files".to_string(),
            Self::Folder(id) => folders
                .iter()
                .find(|f| &f.id == id)
                .map(|f| f.name.clone())
                .unwrap_or_else(|| "Content".to_string()),
        }
    }
}

/// The process-lifetime content collection.
pub struct Library {
    items: Vec<ContentItem>,
    folders: Vec<Folder>,
    selected: Vec<String>,
}

impl Library {
    /// Builds a library from the static seed dataset.
    pub fn seeded() -> Self {
        Self::new(seed::seed_items(), seed::seed_folders())
    }

    pub fn new(items: Vec<ContentItem>, folders: Vec<Folder>) -> Self {
        Self { items, folders, selected: Vec::new() }
    }

    pub fn items(&self, filter: &FolderFilter) -> Vec<ContentItem> {
        self.items.iter().filter(|i| filter.matches(i)).cloned().collect()
    }

    pub fn folders(&self) -> &[Folder] {
        &self.folders
    }

    pub fn get(&self, id: &str) -> Option<&ContentItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Adds a captured item at the front of the collection and returns it.
    pub fn add_captured(&mut self, captured: CapturedItem) -> ContentItem {
        let now = chrono::Utc::now();
        let item = ContentItem {
            id: Uuid::new_v4().to_string(),
            title: captured.title,
            kind: ContentKind::bare(captured.content_type, &captured.content),
            content: captured.content,
            stage: Stage::Review,
            tags: Vec::new(),
            folder_id: None,
            created_at: captured.timestamp,
            updated_at: now,
        };
        log::debug!("added captured item {} to the collection", item.id);
        self.items.insert(0, item.clone());
        item
    }

    /// Toggles grid selection of `id`; returns whether it is now selected.
    pub fn toggle_selected(&mut self, id: &str) -> bool {
        if let Some(pos) = self.selected.iter().position(|s| s == id) {
            self.selected.remove(pos);
            false
        } else {
            self.selected.push(id.to_string());
            true
        }
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_filter_by_category_and_folder() {
        let lib = Library::seeded();
        let images = lib.items(&FolderFilter::from("images".to_string()));
        assert!(!images.is_empty());
        assert!(images.iter().all(|i| i.content_type() == ContentType::Image));

        let design = lib.items(&FolderFilter::Folder("design".to_string()));
        assert!(design.iter().all(|i| i.folder_id.as_deref() == Some("design")));
        assert_eq!(lib.items(&FolderFilter::All).len(), lib.len());
    }

    #[test]
    fn test_filter_round_trips_as_plain_id() {
        let json = serde_json::to_string(&FolderFilter::Category(ContentType::Link)).unwrap();
        assert_eq!(json, r#""links""#);
        let back: FolderFilter = serde_json::from_str(r#""research""#).unwrap();
        assert_eq!(back, FolderFilter::Folder("research".to_string()));
    }

    #[test]
    fn test_display_name_for_folder_and_unknown() {
        let lib = Library::seeded();
        assert_eq!(
            FolderFilter::Folder("research".to_string()).display_name(lib.folders()),
            "Research"
        );
        assert_eq!(
            FolderFilter::Folder("nope".to_string()).display_name(lib.folders()),
            "Content"
        );
        assert_eq!(FolderFilter::All.display_name(lib.folders()), "All content");
    }

    #[test]
    fn test_add_captured_link_gets_url_metadata() {
        let mut lib = Library::seeded();
        let before = lib.len();
        let added = lib.add_captured(CapturedItem {
            content_type: ContentType::Link,
            title: "Docs".to_string(),
            content: " https://docs.example.com/start ".to_string(),
            timestamp: Utc::now(),
        });
        assert_eq!(lib.len(), before + 1);
        assert_eq!(added.stage, Stage::Review);
        assert_eq!(added.hostname().as_deref(), Some("docs.example.com"));
        assert_eq!(lib.items(&FolderFilter::All)[0].id, added.id);
    }

    #[test]
    fn test_toggle_selected() {
        let mut lib = Library::seeded();
        assert!(lib.toggle_selected("1"));
        assert!(lib.toggle_selected("2"));
        assert!(!lib.toggle_selected("1"));
        assert_eq!(lib.selected(), &["2".to_string()]);
    }
}
