//! Core library for Knowledge Hub, a desktop organizer for captured notes,
//! links, images and clips.
//!
//! The host-facing entry point is [`dispatch`], which runs a [`BridgeRequest`]
//! from the UI against a [`Host`]. Window and shortcut lifecycles live in
//! [`WindowController`] and [`ShortcutRegistry`]; per-window UI state lives in
//! [`Workbench`].
//!
//! Types are re-exported from their respective sub-modules for convenience;
//! consumers should import from the crate root rather than the `core` module.

pub mod core;

// Re-export commonly used types.
#[doc(inline)]
pub use core::{
    bridge::{dispatch, push_clipboard, BridgeRequest, BridgeResponse, Host},
    chat::{ChatMessage, ChatSession, Sender, CANNED_REPLY, GREETING},
    content::{
        hostname_of, CapturedItem, ContentItem, ContentKind, ContentType, Dimensions, Folder,
        Stage,
    },
    error::{HubError, Result},
    events::{EventChannel, EventRelay, HostEvent, Listener, PendingItems},
    layout::{
        ScreenConfig, Sidebar, ViewMode, Zoom, MAX_ZOOM_LEVEL, MIN_ZOOM_LEVEL,
        SIDEBAR_COLLAPSED_WIDTH, SIDEBAR_EXPANDED_WIDTH,
    },
    library::{FolderFilter, Library},
    memo::{
        ContentPill, DragPayload, DropPayload, DroppedFile, LinkMeta, MemoPanel, PillKind,
        CONTENT_ITEM_MIME, PILL_TITLE_CHARS,
    },
    resize::{Edge, PanelLimits, PanelResizer, PanelState, RESET_DURATION},
    shortcut::{
        ShortcutAction, ShortcutBackend, ShortcutRegistry, PUSH_CLIPBOARD_ACCELERATOR,
        TOGGLE_STICKY_NOTE_ACCELERATOR,
    },
    sticky_note::{NoteStore, STICKY_NOTE_FILE},
    summarizer::{Analysis, CompletionClient, CompletionRequest, Summarizer, SummarizerConfig},
    tabs::TabManager,
    window::{ShowOutcome, WindowController, WindowHost, WindowRole, WindowSpec},
    workbench::{PanelSide, Workbench, WorkbenchSnapshot},
};

#[cfg(feature = "openrouter")]
#[doc(inline)]
pub use core::summarizer::OpenRouterClient;
