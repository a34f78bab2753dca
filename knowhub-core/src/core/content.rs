//! Content items, folders, and the capture payload handed over by the sticky note.
//!
//! Type-specific metadata lives inside [`ContentKind`], so an item can never
//! carry, say, image dimensions while being a link. On the wire the kind is
//! adjacently tagged:
//!
//! ```rust
//! use knowhub_core::ContentKind;
//!
//! let kind = ContentKind::Link { url: "https://example.com/a".to_string() };
//! let json = serde_json::to_value(&kind).unwrap();
//! assert_eq!(json["type"], "link");
//! assert_eq!(json["metadata"]["url"], "https://example.com/a");
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Workflow label shown on an item card. Purely a display tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Review,
    Refine,
    Consolidate,
}

/// The bare content type, without metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Text,
    Image,
    Link,
    File,
    Video,
}

/// Pixel dimensions of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Content type together with the metadata that is meaningful for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "metadata", rename_all = "lowercase")]
pub enum ContentKind {
    #[serde(rename_all = "camelCase")]
    Text {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        author: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Image {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        dimensions: Option<Dimensions>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        file_size: Option<u64>,
    },
    Link {
        url: String,
    },
    #[serde(rename_all = "camelCase")]
    File {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        file_size: Option<u64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        mime_type: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Video {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        url: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        author: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        views: Option<u64>,
    },
}

impl ContentKind {
    /// A metadata-free kind for the given type.
    #[must_use]
    pub fn bare(content_type: ContentType, body: &str) -> Self {
        match content_type {
            ContentType::Text => Self::Text { author: None },
            ContentType::Image => Self::Image { dimensions: None, file_size: None },
            ContentType::Link => Self::Link { url: body.trim().to_string() },
            ContentType::File => Self::File { file_size: None, mime_type: None },
            ContentType::Video => Self::Video { url: None, author: None, views: None },
        }
    }

    #[must_use]
    pub fn content_type(&self) -> ContentType {
        match self {
            Self::Text { .. } => ContentType::Text,
            Self::Image { .. } => ContentType::Image,
            Self::Link { .. } => ContentType::Link,
            Self::File { .. } => ContentType::File,
            Self::Video { .. } => ContentType::Video,
        }
    }

    /// The URL carried by link and video kinds.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Link { url } => Some(url),
            Self::Video { url, .. } => url.as_deref(),
            _ => None,
        }
    }
}

/// Returns the host name of `url`, or `None` if it does not parse.
#[must_use]
pub fn hostname_of(url: &str) -> Option<String> {
    url::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
}

/// A single collected or authored unit of content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(flatten)]
    pub kind: ContentKind,
    pub stage: Stage,
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ContentItem {
    #[must_use]
    pub fn content_type(&self) -> ContentType {
        self.kind.content_type()
    }

    /// Host name of the item's URL, for link and video items.
    #[must_use]
    pub fn hostname(&self) -> Option<String> {
        self.kind.url().and_then(hostname_of)
    }
}

/// A sidebar folder. `item_count` is denormalized and never recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub id: String,
    pub name: String,
    pub color: String,
    pub item_count: usize,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

/// An item captured outside the main window and handed to the collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapturedItem {
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub title: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl CapturedItem {
    /// Builds a text capture from a sticky note, titled by its first line.
    #[must_use]
    pub fn from_note(content: &str, now: DateTime<Utc>) -> Self {
        let first_line = content.lines().next().unwrap_or("").trim();
        let title = if first_line.is_empty() {
            "Quick Note".to_string()
        } else {
            first_line.to_string()
        };
        Self {
            content_type: ContentType::Text,
            title,
            content: content.to_string(),
            timestamp: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap()
    }

    #[test]
    fn test_item_serializes_type_and_metadata_at_top_level() {
        let item = ContentItem {
            id: "5".to_string(),
            title: "Competitor analysis".to_string(),
            content: "Similar tools".to_string(),
            kind: ContentKind::Link { url: "https://example.com/analysis".to_string() },
            stage: Stage::Refine,
            tags: vec!["market".to_string()],
            folder_id: None,
            created_at: ts(),
            updated_at: ts(),
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["type"], "link");
        assert_eq!(json["stage"], "refine");
        assert_eq!(json["metadata"]["url"], "https://example.com/analysis");
        assert!(json.get("folderId").is_none());
        assert_eq!(json["createdAt"], "2024-01-15T10:30:00Z");

        let back: ContentItem = serde_json::from_value(json).unwrap();
        assert_eq!(back, item);
        assert_eq!(back.hostname().as_deref(), Some("example.com"));
    }

    #[test]
    fn test_text_item_without_metadata_deserializes() {
        let json = r#"{
            "id": "1", "title": "Ideas", "content": "body", "type": "text",
            "stage": "review", "tags": [], "createdAt": "2024-01-15T10:30:00Z",
            "updatedAt": "2024-01-15T10:30:00Z", "metadata": {}
        }"#;
        let item: ContentItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.kind, ContentKind::Text { author: None });
        assert_eq!(item.hostname(), None);
    }

    #[test]
    fn test_link_without_url_is_rejected() {
        let json = r#"{
            "id": "1", "title": "t", "content": "c", "type": "link", "metadata": {},
            "stage": "review", "tags": [], "createdAt": "2024-01-15T10:30:00Z",
            "updatedAt": "2024-01-15T10:30:00Z"
        }"#;
        assert!(serde_json::from_str::<ContentItem>(json).is_err());
    }

    #[test]
    fn test_image_metadata_uses_camel_case() {
        let kind = ContentKind::Image {
            dimensions: Some(Dimensions { width: 640, height: 480 }),
            file_size: Some(2048),
        };
        let json = serde_json::to_value(&kind).unwrap();
        assert_eq!(json["metadata"]["fileSize"], 2048);
        assert_eq!(json["metadata"]["dimensions"]["width"], 640);
    }

    #[test]
    fn test_hostname_of_unparseable_url() {
        assert_eq!(hostname_of("not a url"), None);
        assert_eq!(hostname_of("https://sub.example.org:8080/x").as_deref(), Some("sub.example.org"));
    }

    #[test]
    fn test_captured_item_from_note_uses_first_line() {
        let item = CapturedItem::from_note("Buy milk\nand eggs", ts());
        assert_eq!(item.title, "Buy milk");
        assert_eq!(item.content_type, ContentType::Text);

        let untitled = CapturedItem::from_note("\nsecond line", ts());
        assert_eq!(untitled.title, "Quick Note");
    }

    #[test]
    fn test_captured_item_wire_shape() {
        let json = r#"{"type":"text","title":"Hi","content":"Hi there","timestamp":"2024-01-15T10:30:00Z"}"#;
        let item: CapturedItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.content_type, ContentType::Text);
        assert_eq!(item.title, "Hi");
    }
}
