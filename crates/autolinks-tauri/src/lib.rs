//! Dooplay Link Autofill Tauri Integration
//!
//! Provides a Tauri plugin that carries autofill requests from the frontend
//! to the editor page driver attached by the host application.
//!
//! # Usage
//!
//! Register the plugin in your Tauri application and attach a page driver
//! once the editor page is available:
//!
//! ```ignore
//! fn main() {
//!     tauri::Builder::default()
//!         .plugin(autolinks_tauri::init())
//!         .setup(|app| {
//!             let state = app.state::<autolinks_tauri::AutofillState>();
//!             tauri::async_runtime::block_on(state.attach(Box::new(MyEditorDriver::new())));
//!             Ok(())
//!         })
//!         .run(tauri::generate_context!())
//!         .expect("error while running tauri application");
//! }
//! ```
//!
//! Then invoke commands from the frontend:
//!
//! ```javascript
//! import { invoke } from '@tauri-apps/api/core';
//!
//! const response = await invoke('plugin:autolinks|dispatch', {
//!   request: { action: 'processLinks', links: linksText, size: '3 GB' }
//! });
//! ```

use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;

use autolinks_core::{Autofill, AutolinksConfig, EditorPage, JsonFileStore};
use tauri::{
    plugin::{Builder, TauriPlugin},
    Manager, Runtime,
};

mod commands;

/// Editor page driver shared between commands
pub type SharedPage = Arc<Mutex<Option<Box<dyn EditorPage + Send + Sync>>>>;

const SAVED_INPUTS_FILE: &str = "saved-inputs.json";

/// State managed by the plugin
///
/// The page driver sits behind a mutex so one request drives the page at a
/// time; a second request waits for the first to finish.
pub struct AutofillState {
    pub(crate) autofill: Autofill,
    pub(crate) page: SharedPage,
    pub(crate) store: Option<JsonFileStore>,
}

impl AutofillState {
    /// Create state with the given configuration and optional saved-inputs file
    pub fn new(config: AutolinksConfig, store_path: Option<PathBuf>) -> Self {
        Self {
            autofill: Autofill::with_config(config),
            page: Arc::new(Mutex::new(None)),
            store: store_path.map(JsonFileStore::new),
        }
    }

    /// Attach the driver for the current editor page, replacing any previous one
    pub async fn attach(&self, page: Box<dyn EditorPage + Send + Sync>) {
        *self.page.lock().await = Some(page);
    }

    /// Detach the page driver; requests then fail with a wrong-page error
    pub async fn detach(&self) {
        *self.page.lock().await = None;
    }

    /// Whether a page driver is attached
    pub async fn is_attached(&self) -> bool {
        self.page.lock().await.is_some()
    }
}

impl Default for AutofillState {
    fn default() -> Self {
        Self::new(AutolinksConfig::default(), None)
    }
}

/// Initialize the autolinks plugin with default configuration
pub fn init<R: Runtime>() -> TauriPlugin<R> {
    init_with_config(AutolinksConfig::default())
}

/// Initialize the autolinks plugin
///
/// # Returns
/// A configured TauriPlugin ready to be registered with the Tauri application
///
/// # Example
/// ```ignore
/// tauri::Builder::default()
///     .plugin(autolinks_tauri::init_with_config(config))
///     .run(tauri::generate_context!())
///     .expect("error while running tauri application");
/// ```
pub fn init_with_config<R: Runtime>(config: AutolinksConfig) -> TauriPlugin<R> {
    Builder::new("autolinks")
        .invoke_handler(tauri::generate_handler![
            commands::dispatch,
            commands::load_saved_inputs,
            commands::save_inputs
        ])
        .setup(move |app, _api| {
            let store_path = app.path().app_data_dir()?.join(SAVED_INPUTS_FILE);
            app.manage(AutofillState::new(config, Some(store_path)));
            Ok(())
        })
        .build()
}

// Re-export request types for convenience
pub use autolinks_core::{Request, Response, SavedInputs};
