//! Memo panel state: the markdown buffer and the content pills dropped onto it.
//!
//! Drops are never rejected. A structured payload that does not parse, or a
//! URL-looking string that is not a URL, degrades to a plain text pill.

use crate::{hostname_of, ContentItem, ContentType};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// MIME type of the structured drag payload produced by the content grid.
pub const CONTENT_ITEM_MIME: &str = "application/content-item";

/// Number of characters of dropped text used as a pill title.
pub const PILL_TITLE_CHARS: usize = 30;

const DEFAULT_BUFFER: &str = "# New memo\n\nStart writing here...";

/// Data carried by a drag started on a content card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragPayload {
    /// Serialized [`ContentItem`], set under [`CONTENT_ITEM_MIME`].
    pub content_item: String,
    /// Plain-text fallback for drop targets that ignore the structured form.
    pub text: String,
}

impl DragPayload {
    /// Builds the payload for dragging `item` out of the grid.
    ///
    /// # Errors
    ///
    /// Returns [`crate::HubError::Json`] if the item cannot be serialized.
    pub fn from_item(item: &ContentItem) -> crate::Result<Self> {
        Ok(Self {
            content_item: serde_json::to_string(item)?,
            text: item.content.clone(),
        })
    }
}

/// A file dropped from the desktop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DroppedFile {
    pub name: String,
    pub mime_type: String,
    /// Object URL or data URL the UI created for the file, if any.
    #[serde(default)]
    pub url: Option<String>,
}

/// Everything the UI could read from a drop event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropPayload {
    #[serde(default)]
    pub content_item: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub files: Vec<DroppedFile>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PillKind {
    Text,
    Image,
    Link,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkMeta {
    pub url: String,
    pub domain: Option<String>,
    pub favicon: Option<String>,
}

/// An ephemeral chip staged for insertion into the memo buffer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentPill {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: PillKind,
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<LinkMeta>,
}

impl ContentPill {
    fn new(kind: PillKind, title: String, content: String, link: Option<LinkMeta>) -> Self {
        Self { id: Uuid::new_v4().to_string(), kind, title, content, link }
    }

    fn text(content: &str) -> Self {
        let title: String = content.chars().take(PILL_TITLE_CHARS).collect();
        Self::new(PillKind::Text, title, content.to_string(), None)
    }

    /// Markdown inserted into the buffer for this pill.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        match self.kind {
            PillKind::Text => format!("{}\n\n", self.content),
            PillKind::Link => format!("[{}]({})\n\n", self.title, self.content),
            PillKind::Image => format!("![{}]({})\n\n", self.title, self.content),
        }
    }
}

fn favicon_for(domain: &str) -> String {
    format!("https://www.google.com/s2/favicons?domain={domain}&sz=16")
}

fn pill_from_item(item: &ContentItem) -> ContentPill {
    let kind = match item.content_type() {
        ContentType::Link => PillKind::Link,
        ContentType::Image => PillKind::Image,
        _ => PillKind::Text,
    };
    let link = (kind == PillKind::Link).then(|| {
        let url = item.kind.url().unwrap_or(&item.content).to_string();
        LinkMeta { domain: hostname_of(&url), url, favicon: None }
    });
    ContentPill::new(kind, item.title.clone(), item.content.clone(), link)
}

fn pill_from_text(text: &str) -> ContentPill {
    let looks_like_url = text.starts_with("http://") || text.starts_with("https://");
    if looks_like_url {
        if let Some(domain) = hostname_of(text) {
            return ContentPill::new(
                PillKind::Link,
                format!("Link from {domain}"),
                text.to_string(),
                Some(LinkMeta {
                    url: text.to_string(),
                    favicon: Some(favicon_for(&domain)),
                    domain: Some(domain),
                }),
            );
        }
        log::debug!("dropped text looked like a URL but did not parse; keeping it as text");
    }
    ContentPill::text(text)
}

fn pill_from_file(file: &DroppedFile) -> ContentPill {
    if file.mime_type.starts_with("image/") {
        let content = file.url.clone().unwrap_or_else(|| file.name.clone());
        ContentPill::new(PillKind::Image, file.name.clone(), content, None)
    } else {
        ContentPill::new(
            PillKind::Text,
            file.name.clone(),
            format!("File: {} ({})", file.name, file.mime_type),
            None,
        )
    }
}

/// The memo side panel for one editor session.
pub struct MemoPanel {
    buffer: String,
    /// Cursor position as a char offset into `buffer`.
    cursor: usize,
    language: String,
    pills: Vec<ContentPill>,
}

impl Default for MemoPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoPanel {
    pub fn new() -> Self {
        Self {
            buffer: DEFAULT_BUFFER.to_string(),
            cursor: DEFAULT_BUFFER.chars().count(),
            language: "markdown".to_string(),
            pills: Vec::new(),
        }
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn pills(&self) -> &[ContentPill] {
        &self.pills
    }

    /// Replaces the buffer with the editor's contents; the cursor is clamped to it.
    pub fn set_buffer(&mut self, text: String, cursor: usize) {
        self.cursor = cursor.min(text.chars().count());
        self.buffer = text;
    }

    pub fn set_language(&mut self, language: &str) {
        self.language = language.to_string();
    }

    /// Turns a drop into pills and stages them. Returns the new pills.
    pub fn handle_drop(&mut self, drop: DropPayload) -> Vec<ContentPill> {
        let mut added = Vec::new();

        let structured = drop.content_item.as_deref().and_then(|raw| {
            serde_json::from_str::<ContentItem>(raw)
                .map_err(|e| log::warn!("ignoring malformed content-item payload: {e}"))
                .ok()
        });

        if let Some(item) = structured {
            added.push(pill_from_item(&item));
        } else if let Some(text) = drop.text.as_deref().filter(|t| !t.is_empty()) {
            added.push(pill_from_text(text));
        } else if let Some(raw) = drop.content_item.as_deref().filter(|r| !r.is_empty()) {
            added.push(ContentPill::text(raw));
        }

        added.extend(drop.files.iter().map(pill_from_file));
        self.pills.extend(added.iter().cloned());
        added
    }

    pub fn remove_pill(&mut self, id: &str) -> bool {
        let before = self.pills.len();
        self.pills.retain(|p| p.id != id);
        self.pills.len() != before
    }

    /// Inserts the pill's markdown at the cursor and moves the cursor past it.
    ///
    /// Returns `false` if no pill has this id. The pill stays staged.
    pub fn insert_pill(&mut self, id: &str) -> bool {
        let Some(pill) = self.pills.iter().find(|p| p.id == id) else {
            return false;
        };
        let text = pill.to_markdown();
        let byte_at = self
            .buffer
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.buffer.len());
        self.buffer.insert_str(byte_at, &text);
        self.cursor += text.chars().count();
        true
    }

    /// Closes the panel: staged pills are discarded, the buffer is kept.
    pub fn close(&mut self) {
        self.pills.clear();
    }
}
