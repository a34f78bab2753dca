//! Internal domain modules for the Knowledge Hub core library.
//!
//! All public types from these modules are re-exported at the crate root
//! with `#[doc(inline)]`; import from there in preference to this module.

pub mod bridge;
pub mod chat;
pub mod content;
pub mod error;
pub mod events;
pub mod layout;
pub mod library;
pub mod memo;
pub mod resize;
pub mod seed;
pub mod shortcut;
pub mod sticky_note;
pub mod summarizer;
pub mod tabs;
pub mod window;
pub mod workbench;

#[doc(inline)]
pub use bridge::{dispatch, push_clipboard, BridgeRequest, BridgeResponse, Host};
#[doc(inline)]
pub use chat::{ChatMessage, ChatSession, Sender};
#[doc(inline)]
pub use content::{
    hostname_of, CapturedItem, ContentItem, ContentKind, ContentType, Dimensions, Folder, Stage,
};
#[doc(inline)]
pub use error::{HubError, Result};
#[doc(inline)]
pub use events::{EventChannel, EventRelay, HostEvent, Listener, PendingItems};
#[doc(inline)]
pub use layout::{ScreenConfig, Sidebar, ViewMode, Zoom};
#[doc(inline)]
pub use library::{FolderFilter, Library};
#[doc(inline)]
pub use memo::{ContentPill, DragPayload, DropPayload, DroppedFile, LinkMeta, MemoPanel, PillKind};
#[doc(inline)]
pub use resize::{Edge, PanelLimits, PanelResizer, PanelState};
#[doc(inline)]
pub use shortcut::{ShortcutAction, ShortcutBackend, ShortcutRegistry};
#[doc(inline)]
pub use sticky_note::NoteStore;
#[doc(inline)]
pub use summarizer::{Analysis, CompletionClient, CompletionRequest, Summarizer, SummarizerConfig};
#[doc(inline)]
pub use tabs::TabManager;
#[doc(inline)]
pub use window::{ShowOutcome, WindowController, WindowHost, WindowRole, WindowSpec};
#[doc(inline)]
pub use workbench::{PanelSide, Workbench, WorkbenchSnapshot};
