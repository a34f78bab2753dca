//! The closed set of privileged operations the UI may ask the host for.
//!
//! Every request arrives as JSON tagged by `op` and is routed by [`dispatch`]
//! to a [`Host`]. The desktop crate implements [`Host`] on top of Tauri; the
//! tests below implement it with in-memory fakes.

use crate::{CapturedItem, ContentItem, EventChannel, HostEvent, Result};
use serde::{Deserialize, Serialize};

/// A single bridge request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum BridgeRequest {
    GetClipboardContent,
    SetClipboardContent { text: String },
    CaptureScreenshot,
    ShowStickyNote,
    HideStickyNote,
    SaveNote { content: String },
    LoadNote,
    AddToCollection { item: CapturedItem },
    QuickCapture,
    Subscribe { channel: EventChannel },
    RemoveAllListeners { channel: EventChannel },
    TakePendingItems,
}

impl BridgeRequest {
    /// Every operation name, in the order the UI bridge object exposes them.
    pub const OPERATIONS: [&'static str; 12] = [
        "getClipboardContent",
        "setClipboardContent",
        "captureScreenshot",
        "showStickyNote",
        "hideStickyNote",
        "saveNote",
        "loadNote",
        "addToCollection",
        "quickCapture",
        "subscribe",
        "removeAllListeners",
        "takePendingItems",
    ];

    #[must_use]
    pub fn op(&self) -> &'static str {
        let index = match self {
            Self::GetClipboardContent => 0,
            Self::SetClipboardContent { .. } => 1,
            Self::CaptureScreenshot => 2,
            Self::ShowStickyNote => 3,
            Self::HideStickyNote => 4,
            Self::SaveNote { .. } => 5,
            Self::LoadNote => 6,
            Self::AddToCollection { .. } => 7,
            Self::QuickCapture => 8,
            Self::Subscribe { .. } => 9,
            Self::RemoveAllListeners { .. } => 10,
            Self::TakePendingItems => 11,
        };
        Self::OPERATIONS[index]
    }
}

/// The value handed back to the UI.
///
/// Serialized untagged: a string, `null`, a nullable string or an array.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BridgeResponse {
    Text(String),
    Done,
    Screenshot(Option<String>),
    Items(Vec<ContentItem>),
}

/// Native capabilities and shared state behind the bridge.
pub trait Host {
    /// Current clipboard text; empty when the clipboard holds no text.
    ///
    /// # Errors
    ///
    /// Returns [`crate::HubError::Clipboard`] if the clipboard cannot be opened.
    fn read_clipboard(&self) -> Result<String>;

    /// # Errors
    ///
    /// Returns [`crate::HubError::Clipboard`] if the write fails.
    fn write_clipboard(&self, text: &str) -> Result<()>;

    /// A PNG data URL of the primary screen, or `None` if capture is unavailable.
    fn capture_screen(&self) -> Option<String>;

    /// # Errors
    ///
    /// Returns the window error if the sticky note cannot be created or shown.
    fn show_sticky_note(&self) -> Result<()>;

    /// # Errors
    ///
    /// Returns the window error if hiding fails.
    fn hide_sticky_note(&self) -> Result<()>;

    /// # Errors
    ///
    /// Returns [`crate::HubError::Io`] if the note cannot be written.
    fn save_note(&self, content: &str) -> Result<()>;

    /// # Errors
    ///
    /// Returns [`crate::HubError::Io`] if the note exists but cannot be read.
    fn load_note(&self) -> Result<String>;

    /// Stores `item` in the collection and queues it for the main window.
    ///
    /// # Errors
    ///
    /// Returns an error only if the collection cannot be reached.
    fn add_to_collection(&self, item: CapturedItem) -> Result<ContentItem>;

    /// Pushes `event` to the main window; returns whether a listener took it.
    fn emit(&self, event: HostEvent) -> bool;

    /// Replaces the main window's listener on `channel`.
    fn subscribe(&self, channel: EventChannel);

    fn remove_all_listeners(&self, channel: EventChannel);

    /// Drains items queued by [`Host::add_to_collection`].
    fn take_pending_items(&self) -> Vec<ContentItem>;
}

/// Runs one bridge request against `host`.
///
/// # Errors
///
/// Propagates host failures for clipboard writes, window and note operations.
/// Clipboard reads and screenshot capture degrade to empty results instead.
pub fn dispatch<H: Host + ?Sized>(host: &H, request: BridgeRequest) -> Result<BridgeResponse> {
    log::debug!("bridge request {}", request.op());
    let response = match request {
        BridgeRequest::GetClipboardContent => BridgeResponse::Text(read_clipboard_or_empty(host)),
        BridgeRequest::SetClipboardContent { text } => {
            host.write_clipboard(&text)?;
            BridgeResponse::Done
        }
        BridgeRequest::CaptureScreenshot => BridgeResponse::Screenshot(host.capture_screen()),
        BridgeRequest::ShowStickyNote => {
            host.show_sticky_note()?;
            BridgeResponse::Done
        }
        BridgeRequest::HideStickyNote => {
            host.hide_sticky_note()?;
            BridgeResponse::Done
        }
        BridgeRequest::SaveNote { content } => {
            host.save_note(&content)?;
            BridgeResponse::Done
        }
        BridgeRequest::LoadNote => BridgeResponse::Text(host.load_note()?),
        BridgeRequest::AddToCollection { item } => {
            let stored = host.add_to_collection(item)?;
            let id = stored.id.clone();
            if !host.emit(HostEvent::CollectionItemAdded(stored)) {
                log::info!("item {id} queued until the main window collects it");
            }
            BridgeResponse::Done
        }
        BridgeRequest::QuickCapture => {
            push_clipboard(host);
            BridgeResponse::Done
        }
        BridgeRequest::Subscribe { channel } => {
            host.subscribe(channel);
            BridgeResponse::Done
        }
        BridgeRequest::RemoveAllListeners { channel } => {
            host.remove_all_listeners(channel);
            BridgeResponse::Done
        }
        BridgeRequest::TakePendingItems => BridgeResponse::Items(host.take_pending_items()),
    };
    Ok(response)
}

/// Sends the clipboard's text to the main window as `clipboard-content`.
///
/// Does nothing when the clipboard is empty or unreadable. Returns whether an
/// event was delivered.
pub fn push_clipboard<H: Host + ?Sized>(host: &H) -> bool {
    let text = read_clipboard_or_empty(host);
    if text.is_empty() {
        return false;
    }
    host.emit(HostEvent::ClipboardContent(text))
}

fn read_clipboard_or_empty<H: Host + ?Sized>(host: &H) -> String {
    host.read_clipboard().unwrap_or_else(|e| {
        log::warn!("clipboard unavailable: {e}");
        String::new()
    })
}
