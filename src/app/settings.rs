//! Settings window for `PopupApp`: the stored API key and appearance.

use eframe::egui;
use hive_popup::config::AppConfig;
use hive_popup::net::CredentialStore;

use super::PopupApp;

impl PopupApp {
    pub fn draw_settings(&mut self, ctx: &egui::Context) {
        if !self.show_settings {
            return;
        }
        let mut open = true;
        egui::Window::new("Settings")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .default_width(360.0)
            .show(ctx, |ui| {
                let store = self.assistant.credentials();
                let configured = store.is_configured();

                ui.label(egui::RichText::new("Gemini API key").strong());
                ui.label(
                    egui::RichText::new(if configured {
                        "A key is stored on this computer."
                    } else {
                        "No key stored. Chat and species lookups are disabled."
                    })
                    .small()
                    .color(egui::Color32::GRAY),
                );
                ui.add(
                    egui::TextEdit::singleline(&mut self.key_input)
                        .password(true)
                        .hint_text("Paste key..."),
                );
                ui.horizontal(|ui| {
                    if ui
                        .add_enabled(!self.key_input.trim().is_empty(), egui::Button::new("Save"))
                        .clicked()
                    {
                        self.settings_status = Some(match store.set(&self.key_input) {
                            Ok(()) => "Key saved.".to_string(),
                            Err(e) => {
                                log::error!("Saving API key failed: {}", e);
                                format!("Could not save the key: {}", e)
                            }
                        });
                        self.key_input.clear();
                    }
                    if ui
                        .add_enabled(configured, egui::Button::new("Remove key"))
                        .clicked()
                    {
                        self.settings_status = Some(match store.clear() {
                            Ok(()) => "Key removed.".to_string(),
                            Err(e) => {
                                log::error!("Removing API key failed: {}", e);
                                format!("Could not remove the key: {}", e)
                            }
                        });
                    }
                });
                if let Some(status) = &self.settings_status {
                    ui.label(status);
                }

                ui.separator();
                ui.checkbox(&mut self.dark_mode, "Dark mode");
            });
        if !open {
            self.show_settings = false;
            self.settings_status = None;
            self.save_appearance();
        }
    }

    /// Write dark mode to `config.json` if it changed since the last save.
    pub fn save_appearance(&mut self) {
        if self.dark_mode == self.saved_dark_mode {
            return;
        }
        let dark_mode = self.dark_mode;
        match AppConfig::update_file(&self.config_dir, |c| c.dark_mode = dark_mode) {
            Ok(()) => self.saved_dark_mode = dark_mode,
            Err(e) => log::error!("Saving appearance failed: {}", e),
        }
    }
}
