pub mod capture;
pub mod menu;
pub mod settings;

// Re-export core library
pub use knowhub_core::*;

use menu::MenuCommand;
use serde::Serialize;
use settings::AppSettings;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, TryLockError};
use tauri::{AppHandle, Emitter, EventTarget, Manager, RunEvent, State, WebviewWindow, WindowEvent};
use tauri_plugin_clipboard_manager::ClipboardExt;
use tauri_plugin_global_shortcut::{GlobalShortcutExt, Shortcut, ShortcutState};
use tauri_plugin_log::{Target, TargetKind};
use tauri_plugin_opener::OpenerExt;

#[derive(Clone)]
pub struct AppState {
    pub windows: Arc<Mutex<WindowController<WebviewWindow>>>,
    pub shortcuts: Arc<Mutex<ShortcutRegistry>>,
    pub workbench: Arc<Mutex<Workbench>>,
    pub relay: Arc<Mutex<EventRelay>>,
    pub settings: Arc<Mutex<AppSettings>>,
    pub notes: NoteStore,
}

impl AppState {
    fn new(settings: AppSettings) -> Self {
        Self {
            windows: Arc::new(Mutex::new(WindowController::new())),
            shortcuts: Arc::new(Mutex::new(ShortcutRegistry::new())),
            workbench: Arc::new(Mutex::new(Workbench::main())),
            relay: Arc::new(Mutex::new(EventRelay::new())),
            notes: NoteStore::new(&settings.data_directory),
            settings: Arc::new(Mutex::new(settings)),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// The running Tauri app seen through the core's host traits.
struct DesktopHost<'a> {
    app: &'a AppHandle,
    state: &'a AppState,
}

impl<'a> DesktopHost<'a> {
    fn new(app: &'a AppHandle, state: &'a AppState) -> Self {
        Self { app, state }
    }
}

impl WindowHost for DesktopHost<'_> {
    type Window = WebviewWindow;

    fn work_area_width(&self) -> Option<f64> {
        let monitor = self.app.primary_monitor().ok().flatten()?;
        let work_area = monitor.work_area();
        Some(work_area.size.to_logical::<f64>(monitor.scale_factor()).width)
    }

    fn create(&self, spec: &WindowSpec) -> Result<WebviewWindow> {
        let mut builder = tauri::WebviewWindowBuilder::new(
            self.app,
            spec.role.label(),
            tauri::WebviewUrl::App(spec.route.clone().into()),
        )
        .title(&spec.title)
        .inner_size(spec.width, spec.height)
        .decorations(spec.decorations)
        .always_on_top(spec.always_on_top)
        .skip_taskbar(spec.skip_taskbar)
        .resizable(spec.resizable)
        .minimizable(spec.minimizable)
        .maximizable(spec.maximizable);
        if let Some((width, height)) = spec.min_size {
            builder = builder.min_inner_size(width, height);
        }
        if let Some((x, y)) = spec.position {
            builder = builder.position(x, y);
        }
        builder
            .build()
            .map_err(|e| HubError::WindowCreation(format!("{}: {e}", spec.role.label())))
    }

    fn show_and_focus(&self, window: &WebviewWindow) -> Result<()> {
        window
            .show()
            .and_then(|_| window.set_focus())
            .map_err(|e| HubError::WindowOperation(format!("Failed to focus: {e}")))
    }

    fn hide(&self, window: &WebviewWindow) -> Result<()> {
        window
            .hide()
            .map_err(|e| HubError::WindowOperation(format!("Failed to hide: {e}")))
    }
}

impl ShortcutBackend for DesktopHost<'_> {
    fn register(&self, accelerator: &str) -> Result<()> {
        let shortcut = parse_shortcut(accelerator)?;
        self.app
            .global_shortcut()
            .register(shortcut)
            .map_err(|e| HubError::Shortcut(format!("{accelerator}: {e}")))
    }

    fn unregister(&self, accelerator: &str) -> Result<()> {
        let shortcut = parse_shortcut(accelerator)?;
        self.app
            .global_shortcut()
            .unregister(shortcut)
            .map_err(|e| HubError::Shortcut(format!("{accelerator}: {e}")))
    }
}

impl Host for DesktopHost<'_> {
    fn read_clipboard(&self) -> Result<String> {
        self.app
            .clipboard()
            .read_text()
            .map_err(|e| HubError::Clipboard(e.to_string()))
    }

    fn write_clipboard(&self, text: &str) -> Result<()> {
        self.app
            .clipboard()
            .write_text(text)
            .map_err(|e| HubError::Clipboard(e.to_string()))
    }

    fn capture_screen(&self) -> Option<String> {
        capture::capture_primary_screen()
    }

    fn show_sticky_note(&self) -> Result<()> {
        lock(&self.state.windows).show_sticky_note(self).map(|_| ())
    }

    fn hide_sticky_note(&self) -> Result<()> {
        lock(&self.state.windows).hide_sticky_note(self)
    }

    fn save_note(&self, content: &str) -> Result<()> {
        self.state.notes.save(content)
    }

    fn load_note(&self) -> Result<String> {
        self.state.notes.load()
    }

    fn add_to_collection(&self, item: CapturedItem) -> Result<ContentItem> {
        Ok(lock(&self.state.workbench).collect(item))
    }

    fn emit(&self, event: HostEvent) -> bool {
        lock(&self.state.relay).emit(&event)
    }

    fn subscribe(&self, channel: EventChannel) {
        let app = self.app.clone();
        lock(&self.state.relay).on(
            channel,
            Box::new(move |event: &HostEvent| {
                let target = EventTarget::webview_window(WindowRole::Main.label());
                if let Err(e) = app.emit_to(target, channel.name(), event.clone()) {
                    log::warn!("failed to deliver {}: {e}", channel.name());
                }
            }),
        );
    }

    fn remove_all_listeners(&self, channel: EventChannel) {
        lock(&self.state.relay).remove_all(channel);
    }

    fn take_pending_items(&self) -> Vec<ContentItem> {
        lock(&self.state.workbench).take_pending()
    }
}

/// Runs `task` on a blocking worker with the app's host.
///
/// Shortcut, menu and window-event handlers run on the main thread, while
/// window creation waits for the main event loop with the `windows` lock held.
/// Those handlers must never wait on that lock themselves.
fn off_main_thread<F>(app: &AppHandle, task: F)
where
    F: FnOnce(&DesktopHost<'_>) + Send + 'static,
{
    let app = app.clone();
    tauri::async_runtime::spawn_blocking(move || {
        let Some(state) = app.try_state::<AppState>() else {
            return;
        };
        task(&DesktopHost::new(&app, &state));
    });
}

/// Drops the handle of a destroyed window, deferring while a show holds the lock.
fn forget_window(app: &AppHandle, role: WindowRole) {
    let state = app.state::<AppState>();
    match state.windows.try_lock() {
        Ok(mut windows) => windows.on_closed(role),
        Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner().on_closed(role),
        Err(TryLockError::WouldBlock) => off_main_thread(app, move |host| {
            lock(&host.state.windows).on_closed(role);
        }),
    };
}

fn parse_shortcut(accelerator: &str) -> Result<Shortcut> {
    accelerator
        .parse::<Shortcut>()
        .map_err(|e| HubError::Shortcut(format!("invalid accelerator {accelerator}: {e}")))
}

/// Finds the action bound to a pressed shortcut.
fn action_for_shortcut(registry: &ShortcutRegistry, pressed: &Shortcut) -> Option<ShortcutAction> {
    registry
        .entries()
        .find(|(accelerator, _)| accelerator.parse::<Shortcut>().is_ok_and(|s| &s == pressed))
        .map(|(_, action)| action)
}

fn on_shortcut(app: &AppHandle, shortcut: &Shortcut) {
    let Some(state) = app.try_state::<AppState>() else {
        return;
    };
    let Some(action) = action_for_shortcut(&lock(&state.shortcuts), shortcut) else {
        return;
    };
    off_main_thread(app, move |host| match action {
        ShortcutAction::ToggleStickyNote => {
            if let Err(e) = lock(&host.state.windows).toggle_sticky_note(host) {
                log::error!("failed to toggle sticky note: {e}");
            }
        }
        ShortcutAction::PushClipboard => {
            push_clipboard(host);
        }
    });
}

fn register_shortcuts(host: &DesktopHost<'_>) {
    let bindings = lock(&host.state.settings).shortcuts.clone();
    let mut registry = lock(&host.state.shortcuts);
    for (accelerator, action) in [
        (bindings.toggle_sticky_note, ShortcutAction::ToggleStickyNote),
        (bindings.push_clipboard, ShortcutAction::PushClipboard),
    ] {
        if let Err(e) = registry.register(host, &accelerator, action) {
            log::warn!("global shortcut unavailable: {e}");
        }
    }
}

fn on_menu_command(app: &AppHandle, command: MenuCommand) {
    off_main_thread(app, move |host| match command {
        MenuCommand::NewCollection => {
            host.emit(HostEvent::NewCollection);
        }
        MenuCommand::ImportContent => {
            host.emit(HostEvent::ImportContent);
        }
        MenuCommand::ShowStickyNote => {
            if let Err(e) = host.show_sticky_note() {
                log::error!("failed to show sticky note: {e}");
            }
        }
        MenuCommand::QuickCapture => {
            push_clipboard(host);
        }
        MenuCommand::ShowMainWindow => open_main_window(host),
    });
}

/// Recreates the main window after it was closed, or focuses it.
fn open_main_window(host: &DesktopHost<'_>) {
    if let Err(e) = lock(&host.state.windows).open_main(host) {
        log::error!("failed to reopen main window: {e}");
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoomInfo {
    pub level: i32,
    pub percentage: u32,
}

impl From<Zoom> for ZoomInfo {
    fn from(zoom: Zoom) -> Self {
        Self { level: zoom.level(), percentage: zoom.percentage() }
    }
}

// Created windows must come from an async command to avoid a WebView2 deadlock on Windows.
#[tauri::command]
async fn bridge(
    app: AppHandle,
    state: State<'_, AppState>,
    request: BridgeRequest,
) -> std::result::Result<BridgeResponse, String> {
    let state = state.inner().clone();
    tauri::async_runtime::spawn_blocking(move || {
        let host = DesktopHost::new(&app, &state);
        dispatch(&host, request).map_err(|e| e.user_message())
    })
    .await
    .map_err(|e| e.to_string())?
}

/// Opens a link or video item in the system browser.
#[tauri::command]
fn open_item(
    app: AppHandle,
    state: State<'_, AppState>,
    id: String,
) -> std::result::Result<(), String> {
    let url = lock(&state.workbench)
        .item_url(&id)
        .ok_or_else(|| format!("Item {id} has no URL to open"))?;
    log::debug!("opening {url}");
    app.opener().open_url(url, None::<&str>).map_err(|e| e.to_string())
}

#[tauri::command]
fn get_workbench(state: State<'_, AppState>) -> WorkbenchSnapshot {
    lock(&state.workbench).snapshot()
}

#[tauri::command]
fn list_items(state: State<'_, AppState>, filter: FolderFilter) -> Vec<ContentItem> {
    lock(&state.workbench).select_folder(filter)
}

#[tauri::command]
fn list_folders(state: State<'_, AppState>) -> Vec<Folder> {
    lock(&state.workbench).library().folders().to_vec()
}

#[tauri::command]
fn toggle_item_selected(state: State<'_, AppState>, id: String) -> bool {
    lock(&state.workbench).library_mut().toggle_selected(&id)
}

#[tauri::command]
fn set_view_mode(state: State<'_, AppState>, mode: ViewMode) {
    lock(&state.workbench).set_view_mode(mode);
}

#[tauri::command]
fn toggle_sidebar(state: State<'_, AppState>) -> f64 {
    lock(&state.workbench).sidebar_mut().toggle_collapsed()
}

#[tauri::command]
fn toggle_sidebar_group(state: State<'_, AppState>, group: String) -> bool {
    lock(&state.workbench).sidebar_mut().toggle_group(&group)
}

#[tauri::command]
fn open_tab(state: State<'_, AppState>, id: String) -> std::result::Result<TabManager, String> {
    let mut workbench = lock(&state.workbench);
    let tabs = workbench.tabs_mut().ok_or("Tabs are disabled on this screen")?;
    tabs.open(&id);
    Ok(tabs.clone())
}

#[tauri::command]
fn close_tab(state: State<'_, AppState>, id: String) -> std::result::Result<TabManager, String> {
    let mut workbench = lock(&state.workbench);
    let tabs = workbench.tabs_mut().ok_or("Tabs are disabled on this screen")?;
    tabs.close(&id);
    Ok(tabs.clone())
}

#[tauri::command]
fn set_panel_width(
    state: State<'_, AppState>,
    side: PanelSide,
    width: f64,
) -> std::result::Result<PanelState, String> {
    let mut workbench = lock(&state.workbench);
    let panel = workbench.panel_mut(side);
    panel.set_width(width).map_err(|e| e.user_message())?;
    Ok(panel.state())
}

#[tauri::command]
fn begin_panel_drag(
    state: State<'_, AppState>,
    side: PanelSide,
    pointer_x: f64,
) -> std::result::Result<PanelState, String> {
    let mut workbench = lock(&state.workbench);
    let panel = workbench.panel_mut(side);
    panel.begin_drag(pointer_x).map_err(|e| e.user_message())?;
    Ok(panel.state())
}

#[tauri::command]
fn drag_panel(state: State<'_, AppState>, side: PanelSide, pointer_x: f64) -> PanelState {
    lock(&state.workbench).panel_mut(side).drag_to(pointer_x)
}

#[tauri::command]
fn end_panel_drag(state: State<'_, AppState>, side: PanelSide) -> PanelState {
    lock(&state.workbench).panel_mut(side).end_drag()
}

#[tauri::command]
fn reset_panel(state: State<'_, AppState>, side: PanelSide) -> PanelState {
    lock(&state.workbench).panel_mut(side).reset()
}

#[tauri::command]
fn advance_panel(state: State<'_, AppState>, side: PanelSide, elapsed_ms: u64) -> PanelState {
    lock(&state.workbench)
        .panel_mut(side)
        .advance(std::time::Duration::from_millis(elapsed_ms))
}

#[tauri::command]
fn toggle_panel(state: State<'_, AppState>, side: PanelSide) -> PanelState {
    lock(&state.workbench).panel_mut(side).toggle_collapsed()
}

#[tauri::command]
fn drag_payload(state: State<'_, AppState>, id: String) -> std::result::Result<DragPayload, String> {
    let workbench = lock(&state.workbench);
    let item = workbench
        .library()
        .get(&id)
        .ok_or_else(|| format!("No content item {id}"))?;
    DragPayload::from_item(item).map_err(|e| e.to_string())
}

#[tauri::command]
fn drop_on_memo(state: State<'_, AppState>, payload: DropPayload) -> Vec<ContentPill> {
    lock(&state.workbench).memo_mut().handle_drop(payload)
}

#[tauri::command]
fn update_memo(state: State<'_, AppState>, text: String, cursor: usize) {
    lock(&state.workbench).memo_mut().set_buffer(text, cursor);
}

#[tauri::command]
fn set_memo_language(state: State<'_, AppState>, language: String) {
    lock(&state.workbench).memo_mut().set_language(&language);
}

/// Inserts a pill at the cursor and returns the new buffer.
#[tauri::command]
fn insert_pill(state: State<'_, AppState>, id: String) -> std::result::Result<String, String> {
    let mut workbench = lock(&state.workbench);
    let memo = workbench.memo_mut();
    if !memo.insert_pill(&id) {
        return Err(format!("No pill {id}"));
    }
    Ok(memo.buffer().to_string())
}

#[tauri::command]
fn remove_pill(state: State<'_, AppState>, id: String) -> bool {
    lock(&state.workbench).memo_mut().remove_pill(&id)
}

#[tauri::command]
fn close_memo(state: State<'_, AppState>) {
    lock(&state.workbench).memo_mut().close();
}

#[tauri::command]
fn chat_messages(state: State<'_, AppState>) -> Vec<ChatMessage> {
    lock(&state.workbench).chat().messages().to_vec()
}

#[tauri::command]
fn send_chat(state: State<'_, AppState>, text: String) -> Vec<ChatMessage> {
    lock(&state.workbench).chat_mut().send(&text)
}

#[tauri::command]
fn set_zoom(state: State<'_, AppState>, level: i32) -> ZoomInfo {
    lock(&state.workbench).set_zoom(Zoom::new(level)).into()
}

#[tauri::command]
fn zoom_in(state: State<'_, AppState>) -> ZoomInfo {
    let mut workbench = lock(&state.workbench);
    let zoom = workbench.zoom().zoom_in();
    workbench.set_zoom(zoom).into()
}

#[tauri::command]
fn zoom_out(state: State<'_, AppState>) -> ZoomInfo {
    let mut workbench = lock(&state.workbench);
    let zoom = workbench.zoom().zoom_out();
    workbench.set_zoom(zoom).into()
}

#[tauri::command]
async fn analyze_content(
    state: State<'_, AppState>,
    content: String,
    title: Option<String>,
) -> std::result::Result<Analysis, String> {
    let config = lock(&state.settings).summarizer_config();
    tauri::async_runtime::spawn_blocking(move || {
        Summarizer::openrouter(config).analyze_content(&content, title.as_deref())
    })
    .await
    .map_err(|e| e.to_string())
}

#[tauri::command]
async fn analyze_items(
    state: State<'_, AppState>,
    ids: Vec<String>,
) -> std::result::Result<HashMap<String, Analysis>, String> {
    let config = lock(&state.settings).summarizer_config();
    let items: Vec<ContentItem> = {
        let workbench = lock(&state.workbench);
        ids.iter()
            .filter_map(|id| workbench.library().get(id).cloned())
            .collect()
    };
    tauri::async_runtime::spawn_blocking(move || {
        let summarizer = Summarizer::openrouter(config);
        summarizer.batch_analyze(
            items
                .iter()
                .map(|i| (i.id.as_str(), i.title.as_str(), i.content.as_str())),
        )
    })
    .await
    .map_err(|e| e.to_string())
}

#[tauri::command]
fn get_settings(state: State<'_, AppState>) -> AppSettings {
    lock(&state.settings).clone()
}

/// Saves settings; shortcut and data-directory changes apply on next launch.
#[tauri::command]
fn update_settings(
    state: State<'_, AppState>,
    settings: AppSettings,
) -> std::result::Result<(), String> {
    settings::save_settings(&settings)?;
    *lock(&state.settings) = settings;
    Ok(())
}

fn log_plugin() -> tauri::plugin::TauriPlugin<tauri::Wry> {
    let app_level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    tauri_plugin_log::Builder::new()
        .targets([
            Target::new(TargetKind::Stdout),
            Target::new(TargetKind::LogDir { file_name: None }),
        ])
        .level(log::LevelFilter::Info)
        .level_for("knowhub_core", app_level)
        .level_for("knowhub_desktop_lib", app_level)
        .build()
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    let app = tauri::Builder::default()
        .plugin(log_plugin())
        .plugin(tauri_plugin_opener::init())
        .plugin(tauri_plugin_clipboard_manager::init())
        .plugin(
            tauri_plugin_global_shortcut::Builder::new()
                .with_handler(|app, shortcut, event| {
                    if event.state() == ShortcutState::Pressed {
                        on_shortcut(app, shortcut);
                    }
                })
                .build(),
        )
        .setup(|app| {
            app.manage(AppState::new(settings::load_settings()));

            let menu = menu::build_menu(app.handle())?;
            app.set_menu(menu)?;

            let state = app.state::<AppState>();
            let host = DesktopHost::new(app.handle(), &state);
            lock(&state.windows).open_main(&host)?;
            register_shortcuts(&host);
            log::info!("notes stored at {}", state.notes.path().display());
            Ok(())
        })
        .on_menu_event(|app, event| {
            if let Some(command) = MenuCommand::from_id(event.id().as_ref()) {
                on_menu_command(app, command);
            }
        })
        .on_window_event(|window, event| {
            if let WindowEvent::Destroyed = event {
                if let Some(role) = WindowRole::from_label(window.label()) {
                    forget_window(window.app_handle(), role);
                }
            }
        })
        .invoke_handler(tauri::generate_handler![
            bridge,
            get_workbench,
            list_items,
            list_folders,
            toggle_item_selected,
            set_view_mode,
            toggle_sidebar,
            toggle_sidebar_group,
            open_tab,
            close_tab,
            set_panel_width,
            begin_panel_drag,
            drag_panel,
            end_panel_drag,
            reset_panel,
            advance_panel,
            toggle_panel,
            drag_payload,
            drop_on_memo,
            update_memo,
            set_memo_language,
            insert_pill,
            remove_pill,
            close_memo,
            chat_messages,
            send_chat,
            set_zoom,
            zoom_in,
            zoom_out,
            open_item,
            analyze_content,
            analyze_items,
            get_settings,
            update_settings,
        ])
        .build(tauri::generate_context!())
        .expect("error while building tauri application");

    app.run(|app, event| match event {
        RunEvent::Exit => {
            let state = app.state::<AppState>();
            let host = DesktopHost::new(app, &state);
            let failures = lock(&state.shortcuts).unregister_all(&host);
            if failures > 0 {
                log::warn!("{failures} global shortcut(s) failed to unregister");
            }
        }
        // Dock icon clicked with no main window.
        #[cfg(target_os = "macos")]
        RunEvent::Reopen { .. } => off_main_thread(app, open_main_window),
        _ => {}
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_accelerators_parse() {
        assert!(parse_shortcut(TOGGLE_STICKY_NOTE_ACCELERATOR).is_ok());
        assert!(parse_shortcut(PUSH_CLIPBOARD_ACCELERATOR).is_ok());
        assert!(matches!(parse_shortcut("Hyper+Banana"), Err(HubError::Shortcut(_))));
    }

    #[test]
    fn test_zoom_info_from_zoom() {
        let info = ZoomInfo::from(Zoom::new(2));
        assert_eq!(info.level, 2);
        assert_eq!(info.percentage, 121);
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["percentage"], 121);
    }
}
