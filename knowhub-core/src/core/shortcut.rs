//! Process-wide global shortcuts.

use crate::Result;
use serde::{Deserialize, Serialize};

/// Default accelerator for showing or hiding the sticky note.
pub const TOGGLE_STICKY_NOTE_ACCELERATOR: &str = "Alt+CommandOrControl+C";
/// Default accelerator for pushing clipboard text to the main window.
pub const PUSH_CLIPBOARD_ACCELERATOR: &str = "Alt+CommandOrControl+V";

/// What a global shortcut does when pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShortcutAction {
    ToggleStickyNote,
    PushClipboard,
}

/// The OS-level registration mechanism.
pub trait ShortcutBackend {
    /// # Errors
    ///
    /// Returns [`crate::HubError::Shortcut`] if the OS refuses the accelerator.
    fn register(&self, accelerator: &str) -> Result<()>;

    /// # Errors
    ///
    /// Returns [`crate::HubError::Shortcut`] if the OS call fails.
    fn unregister(&self, accelerator: &str) -> Result<()>;
}

fn normalize(accelerator: &str) -> String {
    accelerator
        .split('+')
        .map(|part| part.trim().to_ascii_lowercase())
        .collect::<Vec<_>>()
        .join("+")
}

/// Tracks which accelerators are registered and what they are bound to.
#[derive(Debug, Default)]
pub struct ShortcutRegistry {
    entries: Vec<(String, ShortcutAction)>,
}

impl ShortcutRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `accelerator` for `action`.
    ///
    /// Returns `Ok(false)` without touching the backend when the accelerator
    /// is already registered.
    ///
    /// # Errors
    ///
    /// Propagates the backend's failure; nothing is recorded in that case.
    pub fn register<B: ShortcutBackend>(
        &mut self,
        backend: &B,
        accelerator: &str,
        action: ShortcutAction,
    ) -> Result<bool> {
        if self.is_registered(accelerator) {
            log::debug!("shortcut {accelerator} already registered");
            return Ok(false);
        }
        backend.register(accelerator)?;
        log::info!("registered global shortcut {accelerator} -> {action:?}");
        self.entries.push((accelerator.to_string(), action));
        Ok(true)
    }

    pub fn is_registered(&self, accelerator: &str) -> bool {
        let key = normalize(accelerator);
        self.entries.iter().any(|(a, _)| normalize(a) == key)
    }

    pub fn action_for(&self, accelerator: &str) -> Option<ShortcutAction> {
        let key = normalize(accelerator);
        self.entries
            .iter()
            .find(|(a, _)| normalize(a) == key)
            .map(|(_, action)| *action)
    }

    /// Registered accelerators with their actions, in registration order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, ShortcutAction)> {
        self.entries.iter().map(|(a, action)| (a.as_str(), *action))
    }

    /// Unregisters every shortcut. Failures are logged; the registry ends empty.
    pub fn unregister_all<B: ShortcutBackend>(&mut self, backend: &B) -> usize {
        let mut failures = 0;
        for (accelerator, _) in self.entries.drain(..) {
            if let Err(e) = backend.unregister(&accelerator) {
                log::warn!("failed to unregister {accelerator}: {e}");
                failures += 1;
            }
        }
        failures
    }
}
