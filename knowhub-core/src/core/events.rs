//! Host → UI events and their per-channel listeners.

use crate::ContentItem;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};

/// The closed set of channels the host pushes on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventChannel {
    ClipboardContent,
    NewCollection,
    ImportContent,
    CollectionItemAdded,
}

impl EventChannel {
    pub const ALL: [EventChannel; 4] = [
        Self::ClipboardContent,
        Self::NewCollection,
        Self::ImportContent,
        Self::CollectionItemAdded,
    ];

    /// Event name emitted to the webview.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::ClipboardContent => "clipboard-content",
            Self::NewCollection => "new-collection",
            Self::ImportContent => "import-content",
            Self::CollectionItemAdded => "collection-item-added",
        }
    }
}

/// An event with its typed payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum HostEvent {
    ClipboardContent(String),
    NewCollection,
    ImportContent,
    CollectionItemAdded(ContentItem),
}

impl HostEvent {
    #[must_use]
    pub fn channel(&self) -> EventChannel {
        match self {
            Self::ClipboardContent(_) => EventChannel::ClipboardContent,
            Self::NewCollection => EventChannel::NewCollection,
            Self::ImportContent => EventChannel::ImportContent,
            Self::CollectionItemAdded(_) => EventChannel::CollectionItemAdded,
        }
    }
}

pub type Listener = Box<dyn Fn(&HostEvent) + Send + Sync>;

/// At most one listener per channel.
#[derive(Default)]
pub struct EventRelay {
    listeners: HashMap<EventChannel, Listener>,
}

impl EventRelay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the listener for `channel`, replacing any previous one.
    ///
    /// Returns `true` if a previous listener was replaced.
    pub fn on(&mut self, channel: EventChannel, listener: Listener) -> bool {
        self.listeners.insert(channel, listener).is_some()
    }

    /// Drops the listener for `channel`. Returns whether one was registered.
    pub fn remove_all(&mut self, channel: EventChannel) -> bool {
        self.listeners.remove(&channel).is_some()
    }

    pub fn has_listener(&self, channel: EventChannel) -> bool {
        self.listeners.contains_key(&channel)
    }

    /// Delivers `event` to its channel's listener; returns whether anyone heard it.
    pub fn emit(&self, event: &HostEvent) -> bool {
        match self.listeners.get(&event.channel()) {
            Some(listener) => {
                listener(event);
                true
            }
            None => {
                log::debug!("no listener on {}", event.channel().name());
                false
            }
        }
    }
}

/// Items handed to the collection that the main window has not taken yet.
#[derive(Debug, Default)]
pub struct PendingItems {
    queue: VecDeque<ContentItem>,
}

impl PendingItems {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: ContentItem) {
        self.queue.push_back(item);
    }

    /// Removes and returns every queued item, oldest first.
    pub fn drain(&mut self) -> Vec<ContentItem> {
        self.queue.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counting(counter: &Arc<AtomicUsize>) -> Listener {
        let counter = Arc::clone(counter);
        Box::new(move |_: &HostEvent| {
            counter.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn test_resubscribing_does_not_stack() {
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));
        let mut relay = EventRelay::new();
        assert!(!relay.on(EventChannel::ClipboardContent, counting(&first)));
        assert!(relay.on(EventChannel::ClipboardContent, counting(&second)));

        assert!(relay.emit(&HostEvent::ClipboardContent("hello".to_string())));
        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_remove_all_unsubscribes_one_channel() {
        let hits = Arc::new(AtomicUsize::new(0));
        let mut relay = EventRelay::new();
        relay.on(EventChannel::NewCollection, counting(&hits));
        relay.on(EventChannel::ImportContent, counting(&hits));

        assert!(relay.remove_all(EventChannel::NewCollection));
        assert!(!relay.remove_all(EventChannel::NewCollection));
        assert!(!relay.emit(&HostEvent::NewCollection));
        assert!(relay.emit(&HostEvent::ImportContent));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_channel_names() {
        let json = serde_json::to_string(&EventChannel::ClipboardContent).unwrap();
        assert_eq!(json, r#""clipboard-content""#);
        for channel in EventChannel::ALL {
            let parsed: EventChannel =
                serde_json::from_str(&format!("\"{}\"", channel.name())).unwrap();
            assert_eq!(parsed, channel);
        }
    }

    #[test]
    fn test_clipboard_payload_is_bare_string() {
        let json = serde_json::to_value(HostEvent::ClipboardContent("x".to_string())).unwrap();
        assert_eq!(json, serde_json::json!("x"));
    }

    #[test]
    fn test_pending_items_drain_in_order() {
        let lib = crate::Library::seeded();
        let mut pending = PendingItems::new();
        pending.push(lib.get("1").unwrap().clone());
        pending.push(lib.get("2").unwrap().clone());
        let drained = pending.drain();
        assert_eq!(drained.iter().map(|i| i.id.as_str()).collect::<Vec<_>>(), ["1", "2"]);
        assert!(pending.is_empty());
    }
}
