//! Ownership of the native windows: one optional handle per role.
//!
//! [`WindowController`] is the only place that creates windows. Creation goes
//! through a [`WindowHost`], which the desktop crate implements on top of
//! Tauri and tests implement with a fake.

use crate::Result;
use serde::{Deserialize, Serialize};

/// Logical width of the sticky-note window.
pub const STICKY_NOTE_WIDTH: f64 = 300.0;
/// Logical height of the sticky-note window.
pub const STICKY_NOTE_HEIGHT: f64 = 400.0;
/// Gap between the sticky note and the right edge of the work area.
const STICKY_NOTE_RIGHT_MARGIN: f64 = 20.0;
const STICKY_NOTE_TOP: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WindowRole {
    Main,
    StickyNote,
}

impl WindowRole {
    /// Window label used by the host for this role.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::StickyNote => "sticky-note",
        }
    }

    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "main" => Some(Self::Main),
            "sticky-note" => Some(Self::StickyNote),
            _ => None,
        }
    }
}

/// How a window of a given role is built.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowSpec {
    pub role: WindowRole,
    pub title: String,
    /// Page loaded into the webview, relative to the app's frontend root.
    pub route: String,
    pub width: f64,
    pub height: f64,
    pub min_size: Option<(f64, f64)>,
    pub position: Option<(f64, f64)>,
    pub decorations: bool,
    pub always_on_top: bool,
    pub skip_taskbar: bool,
    pub resizable: bool,
    pub minimizable: bool,
    pub maximizable: bool,
}

impl WindowSpec {
    pub fn main() -> Self {
        Self {
            role: WindowRole::Main,
            title: "Knowledge Hub".to_string(),
            route: "index.html".to_string(),
            width: 1280.0,
            height: 800.0,
            min_size: Some((1200.0, 700.0)),
            position: None,
            decorations: false,
            always_on_top: false,
            skip_taskbar: false,
            resizable: true,
            minimizable: true,
            maximizable: true,
        }
    }

    /// The sticky note, pinned near the top-right of a work area `work_area_width` wide.
    pub fn sticky_note(work_area_width: Option<f64>) -> Self {
        let position = work_area_width
            .map(|w| (w - STICKY_NOTE_WIDTH - STICKY_NOTE_RIGHT_MARGIN, STICKY_NOTE_TOP));
        Self {
            role: WindowRole::StickyNote,
            title: "Quick Note".to_string(),
            route: "sticky-note.html".to_string(),
            width: STICKY_NOTE_WIDTH,
            height: STICKY_NOTE_HEIGHT,
            min_size: None,
            position,
            decorations: false,
            always_on_top: true,
            skip_taskbar: true,
            resizable: true,
            minimizable: false,
            maximizable: false,
        }
    }
}

/// Native window operations the controller needs from the host.
pub trait WindowHost {
    type Window;

    /// Width of the primary display's work area, if known.
    fn work_area_width(&self) -> Option<f64>;

    /// # Errors
    ///
    /// Returns [`crate::HubError::WindowCreation`] if the window cannot be built.
    fn create(&self, spec: &WindowSpec) -> Result<Self::Window>;

    /// Shows a hidden window and gives it focus.
    ///
    /// # Errors
    ///
    /// Returns [`crate::HubError::WindowOperation`] if the native call fails.
    fn show_and_focus(&self, window: &Self::Window) -> Result<()>;

    /// # Errors
    ///
    /// Returns [`crate::HubError::WindowOperation`] if the native call fails.
    fn hide(&self, window: &Self::Window) -> Result<()>;
}

/// What a show request did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ShowOutcome {
    Created,
    Focused,
}

struct Slot<W> {
    window: W,
    visible: bool,
}

/// Owns the main and sticky-note windows.
pub struct WindowController<W> {
    main: Option<Slot<W>>,
    sticky_note: Option<Slot<W>>,
}

impl<W> Default for WindowController<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W> WindowController<W> {
    pub fn new() -> Self {
        Self { main: None, sticky_note: None }
    }

    fn slot(&self, role: WindowRole) -> &Option<Slot<W>> {
        match role {
            WindowRole::Main => &self.main,
            WindowRole::StickyNote => &self.sticky_note,
        }
    }

    fn slot_mut(&mut self, role: WindowRole) -> &mut Option<Slot<W>> {
        match role {
            WindowRole::Main => &mut self.main,
            WindowRole::StickyNote => &mut self.sticky_note,
        }
    }

    pub fn window(&self, role: WindowRole) -> Option<&W> {
        self.slot(role).as_ref().map(|s| &s.window)
    }

    pub fn is_open(&self, role: WindowRole) -> bool {
        self.slot(role).is_some()
    }

    pub fn is_visible(&self, role: WindowRole) -> bool {
        self.slot(role).as_ref().is_some_and(|s| s.visible)
    }

    /// Creates the main window, or focuses it if it already exists.
    ///
    /// # Errors
    ///
    /// Propagates the host's creation failure; at startup the caller treats it as fatal.
    pub fn open_main<H: WindowHost<Window = W>>(&mut self, host: &H) -> Result<ShowOutcome> {
        self.show(host, WindowRole::Main, WindowSpec::main())
    }

    /// Creates the sticky note if absent, otherwise shows and focuses the existing one.
    ///
    /// # Errors
    ///
    /// Returns the host's error; the main window is unaffected by a failure here.
    pub fn show_sticky_note<H: WindowHost<Window = W>>(&mut self, host: &H) -> Result<ShowOutcome> {
        let spec = WindowSpec::sticky_note(host.work_area_width());
        self.show(host, WindowRole::StickyNote, spec)
    }

    /// Hides the sticky note if it exists.
    ///
    /// # Errors
    ///
    /// Returns the host's error if hiding fails.
    pub fn hide_sticky_note<H: WindowHost<Window = W>>(&mut self, host: &H) -> Result<()> {
        if let Some(slot) = self.sticky_note.as_mut() {
            host.hide(&slot.window)?;
            slot.visible = false;
        }
        Ok(())
    }

    /// Hides a visible sticky note; otherwise shows it.
    ///
    /// # Errors
    ///
    /// Returns the host's error from the underlying show or hide.
    pub fn toggle_sticky_note<H: WindowHost<Window = W>>(&mut self, host: &H) -> Result<()> {
        if self.is_visible(WindowRole::StickyNote) {
            self.hide_sticky_note(host)
        } else {
            self.show_sticky_note(host).map(|_| ())
        }
    }

    /// Forgets the window of `role` after the host reports it closed.
    pub fn on_closed(&mut self, role: WindowRole) {
        if self.slot_mut(role).take().is_some() {
            log::debug!("{} window closed", role.label());
        }
    }

    fn show<H: WindowHost<Window = W>>(
        &mut self,
        host: &H,
        role: WindowRole,
        spec: WindowSpec,
    ) -> Result<ShowOutcome> {
        if let Some(slot) = self.slot_mut(role).as_mut() {
            host.show_and_focus(&slot.window)?;
            slot.visible = true;
            return Ok(ShowOutcome::Focused);
        }
        let window = host.create(&spec)?;
        log::info!("created {} window", role.label());
        *self.slot_mut(role) = Some(Slot { window, visible: true });
        Ok(ShowOutcome::Created)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::HubError;
    use std::cell::{Cell, RefCell};

    /// Records window calls; windows are plain ids.
    #[derive(Default)]
    pub(crate) struct FakeWindows {
        pub created: RefCell<Vec<WindowSpec>>,
        pub focused: Cell<usize>,
        pub hidden: Cell<usize>,
        pub fail_role: Cell<Option<WindowRole>>,
    }

    impl WindowHost for FakeWindows {
        type Window = usize;

        fn work_area_width(&self) -> Option<f64> {
            Some(1920.0)
        }

        fn create(&self, spec: &WindowSpec) -> Result<usize> {
            if self.fail_role.get() == Some(spec.role) {
                return Err(HubError::WindowCreation("no display".to_string()));
            }
            let mut created = self.created.borrow_mut();
            created.push(spec.clone());
            Ok(created.len())
        }

        fn show_and_focus(&self, _window: &usize) -> Result<()> {
            self.focused.set(self.focused.get() + 1);
            Ok(())
        }

        fn hide(&self, _window: &usize) -> Result<()> {
            self.hidden.set(self.hidden.get() + 1);
            Ok(())
        }
    }

    #[test]
    fn test_show_twice_creates_one_sticky_note() {
        let host = FakeWindows::default();
        let mut windows = WindowController::new();
        assert_eq!(windows.show_sticky_note(&host).unwrap(), ShowOutcome::Created);
        assert_eq!(windows.show_sticky_note(&host).unwrap(), ShowOutcome::Focused);
        assert_eq!(host.created.borrow().len(), 1);
        assert_eq!(host.focused.get(), 1);
    }

    #[test]
    fn test_closed_sticky_note_is_recreated() {
        let host = FakeWindows::default();
        let mut windows = WindowController::new();
        windows.show_sticky_note(&host).unwrap();
        windows.on_closed(WindowRole::StickyNote);
        assert!(!windows.is_open(WindowRole::StickyNote));
        assert_eq!(windows.show_sticky_note(&host).unwrap(), ShowOutcome::Created);
        assert_eq!(host.created.borrow().len(), 2);
    }

    #[test]
    fn test_closed_main_window_is_reopened() {
        let host = FakeWindows::default();
        let mut windows = WindowController::new();
        windows.open_main(&host).unwrap();
        assert_eq!(windows.open_main(&host).unwrap(), ShowOutcome::Focused);
        windows.on_closed(WindowRole::Main);
        assert_eq!(windows.open_main(&host).unwrap(), ShowOutcome::Created);
        let created = host.created.borrow();
        assert_eq!(created.len(), 2);
        assert!(created.iter().all(|spec| spec.role == WindowRole::Main));
    }

    #[test]
    fn test_sticky_note_spec_is_pinned_top_right() {
        let host = FakeWindows::default();
        let mut windows = WindowController::new();
        windows.show_sticky_note(&host).unwrap();
        let spec = host.created.borrow()[0].clone();
        assert_eq!(spec.position, Some((1600.0, 20.0)));
        assert!(spec.always_on_top);
        assert!(spec.skip_taskbar);
        assert!(!spec.decorations);
        assert_eq!(spec.route, "sticky-note.html");
    }

    #[test]
    fn test_hide_without_window_is_noop() {
        let host = FakeWindows::default();
        let mut windows: WindowController<usize> = WindowController::new();
        windows.hide_sticky_note(&host).unwrap();
        assert_eq!(host.hidden.get(), 0);
    }

    #[test]
    fn test_toggle_hides_then_shows_same_window() {
        let host = FakeWindows::default();
        let mut windows = WindowController::new();
        windows.toggle_sticky_note(&host).unwrap();
        assert!(windows.is_visible(WindowRole::StickyNote));
        windows.toggle_sticky_note(&host).unwrap();
        assert!(!windows.is_visible(WindowRole::StickyNote));
        assert!(windows.is_open(WindowRole::StickyNote));
        windows.toggle_sticky_note(&host).unwrap();
        assert!(windows.is_visible(WindowRole::StickyNote));
        assert_eq!(host.created.borrow().len(), 1);
        assert_eq!(host.hidden.get(), 1);
        assert_eq!(host.focused.get(), 1);
    }

    #[test]
    fn test_sticky_note_failure_leaves_main_window() {
        let host = FakeWindows::default();
        let mut windows = WindowController::new();
        windows.open_main(&host).unwrap();
        host.fail_role.set(Some(WindowRole::StickyNote));
        assert!(windows.show_sticky_note(&host).is_err());
        assert!(windows.is_open(WindowRole::Main));
        assert!(!windows.is_open(WindowRole::StickyNote));
    }

    #[test]
    fn test_role_labels_round_trip() {
        for role in [WindowRole::Main, WindowRole::StickyNote] {
            assert_eq!(WindowRole::from_label(role.label()), Some(role));
        }
        assert_eq!(WindowRole::from_label("devtools"), None);
    }
}
