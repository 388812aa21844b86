//! `PopupApp`: the top-level egui application state.
//!
//! This module declares the `PopupApp` struct, its constructor and the
//! `PageView` surface. Methods are split across the sibling sub-modules:
//!
//! - `navigation`: nav bar, page panels and the navigation tick
//! - `content`: scene painting and pointer sampling
//! - `assistant`: background chat and species requests
//! - `settings`: API key and appearance window

pub mod assistant;
pub mod content;
pub mod navigation;
pub mod settings;

use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::time::Instant;

use hive_popup::assistant::{Assistant, ChatReply, SpeciesOutcome};
use hive_popup::config::{app_dir, AppConfig};
use hive_popup::input::{NoOrientationSensor, OrientationSource};
use hive_popup::nav::{PageId, PageSurface};
use hive_popup::net::{FileCredentialStore, GeminiClient, TextService, UnavailableService};
use hive_popup::render::{build_scene, Scene, SceneConfig};
use hive_popup::SceneContext;

pub type HiveAssistant = Assistant<Box<dyn TextService>, FileCredentialStore>;

// ─── Page surface ────────────────────────────────────────────────────────────

/// What the window currently shows. Written only through [`PageSurface`].
#[derive(Debug, Default)]
pub struct PageView {
    pub visible: PageId,
    pub highlighted: PageId,
    pub home_chrome: bool,
    pub auxiliary: bool,
}

impl PageSurface for PageView {
    fn show_page(&mut self, page: PageId) {
        self.visible = page;
        self.highlighted = page;
    }

    fn set_home_chrome(&mut self, visible: bool) {
        self.home_chrome = visible;
    }

    fn set_auxiliary_visible(&mut self, visible: bool) {
        self.auxiliary = visible;
    }
}

// ─── Application state ───────────────────────────────────────────────────────

pub struct PopupApp {
    pub scene_ctx: SceneContext,
    pub base_scene: Scene,
    pub pages: PageView,
    pub assistant: Arc<HiveAssistant>,
    pub dark_mode: bool,
    /// Dark mode as last written to `config.json`
    pub saved_dark_mode: bool,
    pub config_dir: PathBuf,
    // Chat (Hive page)
    pub chat_input: String,
    pub chat_question: String,
    pub chat_reply: Option<ChatReply>,
    pub chat_rx: Option<mpsc::Receiver<ChatReply>>,
    // Species lookup
    pub species_input: String,
    pub species_result: Option<SpeciesOutcome>,
    pub species_rx: Option<mpsc::Receiver<SpeciesOutcome>>,
    // Settings window
    pub show_settings: bool,
    pub key_input: String,
    pub settings_status: Option<String>,
    pub pointer_inside: bool,
    pub orientation_source: Box<dyn OrientationSource>,
    pub interacted: bool,
    pub app_start: Instant,
}

impl PopupApp {
    pub fn new(config: AppConfig) -> Self {
        let service: Box<dyn TextService> =
            match GeminiClient::new(&config.api_base, &config.model) {
                Ok(client) => Box::new(client),
                Err(e) => {
                    log::error!("Text service unavailable: {}", e.diagnostic());
                    Box::new(UnavailableService {
                        reason: e.diagnostic(),
                    })
                }
            };
        let config_dir = app_dir();
        let credentials = FileCredentialStore::in_dir(&config_dir);
        log::info!("Credentials file: {}", credentials.path().display());

        let scene_ctx = SceneContext::new(&config);
        let mut pages = PageView::default();
        scene_ctx.navigator.sync(&mut pages);

        Self {
            scene_ctx,
            base_scene: build_scene(&SceneConfig::default()),
            pages,
            assistant: Arc::new(Assistant::new(service, credentials)),
            dark_mode: config.dark_mode,
            saved_dark_mode: config.dark_mode,
            config_dir,
            chat_input: String::new(),
            chat_question: String::new(),
            chat_reply: None,
            chat_rx: None,
            species_input: String::new(),
            species_result: None,
            species_rx: None,
            show_settings: false,
            key_input: String::new(),
            settings_status: None,
            pointer_inside: false,
            orientation_source: Box::new(NoOrientationSensor),
            interacted: false,
            app_start: Instant::now(),
        }
    }
}
