//! Application menu construction for Knowledge Hub.

use tauri::{menu::*, AppHandle, Runtime};

/// Custom menu entries, keyed by their menu item id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    NewCollection,
    ImportContent,
    ShowStickyNote,
    QuickCapture,
    ShowMainWindow,
}

impl MenuCommand {
    pub const ALL: [MenuCommand; 5] = [
        Self::NewCollection,
        Self::ImportContent,
        Self::ShowStickyNote,
        Self::QuickCapture,
        Self::ShowMainWindow,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Self::NewCollection => "file_new_collection",
            Self::ImportContent => "file_import",
            Self::ShowStickyNote => "tools_sticky_note",
            Self::QuickCapture => "tools_quick_capture",
            Self::ShowMainWindow => "window_show_main",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.id() == id)
    }
}

/// Builds the application menu with File, Edit, View, Tools, and Window submenus.
///
/// # Errors
///
/// Returns [`tauri::Error`] if any menu item or submenu fails to build.
pub fn build_menu<R: Runtime>(app: &AppHandle<R>) -> Result<Menu<R>, tauri::Error> {
    let menu = MenuBuilder::new(app)
        // File menu
        .items(&[
            &SubmenuBuilder::new(app, "File")
                .items(&[
                    &MenuItemBuilder::with_id(MenuCommand::NewCollection.id(), "New Collection")
                        .accelerator("CmdOrCtrl+N")
                        .build(app)?,
                    &MenuItemBuilder::with_id(MenuCommand::ImportContent.id(), "Import...")
                        .accelerator("CmdOrCtrl+I")
                        .build(app)?,
                    &PredefinedMenuItem::separator(app)?,
                    &PredefinedMenuItem::quit(app, None)?,
                ])
                .build()?,

            // Edit menu
            &SubmenuBuilder::new(app, "Edit")
                .items(&[
                    &PredefinedMenuItem::undo(app, None)?,
                    &PredefinedMenuItem::redo(app, None)?,
                    &PredefinedMenuItem::separator(app)?,
                    &PredefinedMenuItem::cut(app, None)?,
                    &PredefinedMenuItem::copy(app, None)?,
                    &PredefinedMenuItem::paste(app, None)?,
                    &PredefinedMenuItem::select_all(app, None)?,
                ])
                .build()?,

            // View menu
            &SubmenuBuilder::new(app, "View")
                .items(&[&PredefinedMenuItem::fullscreen(app, None)?])
                .build()?,

            // Tools menu
            &SubmenuBuilder::new(app, "Tools")
                .items(&[
                    &MenuItemBuilder::with_id(MenuCommand::ShowStickyNote.id(), "Sticky Note")
                        .build(app)?,
                    &MenuItemBuilder::with_id(MenuCommand::QuickCapture.id(), "Quick Capture")
                        .build(app)?,
                ])
                .build()?,

            // Window menu
            &SubmenuBuilder::new(app, "Window")
                .items(&[
                    &MenuItemBuilder::with_id(MenuCommand::ShowMainWindow.id(), "Knowledge Hub")
                        .accelerator("CmdOrCtrl+0")
                        .build(app)?,
                    &PredefinedMenuItem::separator(app)?,
                    &PredefinedMenuItem::minimize(app, None)?,
                    &PredefinedMenuItem::close_window(app, None)?,
                ])
                .build()?,
        ])
        .build()?;

    Ok(menu)
}
