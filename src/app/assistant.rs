//! Chat and species panels for `PopupApp`.
//!
//! Requests run on a worker thread and report back over a channel that is
//! polled every frame (`check_assistant`), so the scene keeps animating while
//! a request is in flight. A reply that lands after the reader has moved to
//! another page is stored and shown when they come back.

use std::sync::{mpsc, Arc};

use eframe::egui;
use hive_popup::assistant::SpeciesOutcome;

use super::PopupApp;
use crate::ui::{render_blocks, render_species_card, truncate_str};

impl PopupApp {
    /// Send the chat question in the background.
    pub fn ask_hive(&mut self, ctx: &egui::Context) {
        if self.chat_rx.is_some() {
            return;
        }
        let question = self.chat_input.trim().to_string();
        self.chat_question = question.clone();
        self.chat_reply = None;

        let (tx, rx) = mpsc::channel();
        self.chat_rx = Some(rx);
        let assistant = Arc::clone(&self.assistant);
        let ctx = ctx.clone();
        std::thread::spawn(move || {
            let reply = assistant.ask(&question);
            let _ = tx.send(reply);
            ctx.request_repaint();
        });
    }

    /// Look up the species card in the background.
    pub fn lookup_species(&mut self, ctx: &egui::Context) {
        if self.species_rx.is_some() {
            return;
        }
        let species = self.species_input.trim().to_string();
        self.species_result = None;

        let (tx, rx) = mpsc::channel();
        self.species_rx = Some(rx);
        let assistant = Arc::clone(&self.assistant);
        let ctx = ctx.clone();
        std::thread::spawn(move || {
            let outcome = assistant.describe_species(&species);
            let _ = tx.send(outcome);
            ctx.request_repaint();
        });
    }

    /// Poll both request channels.
    pub fn check_assistant(&mut self) {
        if let Some(rx) = &self.chat_rx {
            match rx.try_recv() {
                Ok(reply) => {
                    self.chat_reply = Some(reply);
                    self.chat_rx = None;
                }
                Err(mpsc::TryRecvError::Empty) => {}
                Err(mpsc::TryRecvError::Disconnected) => {
                    log::error!("Chat worker exited without a reply");
                    self.chat_rx = None;
                }
            }
        }
        if let Some(rx) = &self.species_rx {
            match rx.try_recv() {
                Ok(outcome) => {
                    self.species_result = Some(outcome);
                    self.species_rx = None;
                }
                Err(mpsc::TryRecvError::Empty) => {}
                Err(mpsc::TryRecvError::Disconnected) => {
                    log::error!("Species worker exited without a reply");
                    self.species_rx = None;
                }
            }
        }
    }

    fn offer_settings(&mut self, ui: &mut egui::Ui) {
        if !self.assistant.is_configured() && ui.button("Open settings").clicked() {
            self.show_settings = true;
        }
    }

    pub fn draw_chat(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.heading("Ask the hive");
        ui.add_space(6.0);

        let busy = self.chat_rx.is_some();
        ui.horizontal(|ui| {
            let response = ui.add_sized(
                [ui.available_width() - 60.0, 24.0],
                egui::TextEdit::singleline(&mut self.chat_input)
                    .hint_text("Why do bees dance?"),
            );
            let submit = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if (ui.add_enabled(!busy, egui::Button::new("Ask")).clicked() || submit) && !busy {
                self.ask_hive(ctx);
            }
        });
        ui.add_space(8.0);

        if busy {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("The hive is thinking...");
            });
            return;
        }

        let Some(reply) = &self.chat_reply else {
            return;
        };
        if !self.chat_question.is_empty() {
            ui.label(
                egui::RichText::new(format!("\u{201C}{}\u{201D}", truncate_str(&self.chat_question, 80)))
                    .italics()
                    .color(egui::Color32::GRAY),
            );
            ui.add_space(4.0);
        }
        let is_error = reply.is_error;
        egui::ScrollArea::vertical()
            .id_salt("chat_reply")
            .show(ui, |ui| render_blocks(ui, &reply.blocks, is_error));
        if is_error {
            self.offer_settings(ui);
        }
    }

    pub fn draw_species(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.heading("Species field guide");
        ui.add_space(6.0);

        let busy = self.species_rx.is_some();
        ui.horizontal(|ui| {
            let response = ui.add_sized(
                [ui.available_width() - 80.0, 24.0],
                egui::TextEdit::singleline(&mut self.species_input)
                    .hint_text("Bumblebee, lavender, mason bee..."),
            );
            let submit = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if (ui.add_enabled(!busy, egui::Button::new("Look up")).clicked() || submit) && !busy {
                self.lookup_species(ctx);
            }
        });
        ui.add_space(8.0);

        if busy {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Searching the meadow...");
            });
            return;
        }

        let mut failed = false;
        match &self.species_result {
            Some(SpeciesOutcome::Card(card)) => render_species_card(ui, card),
            Some(SpeciesOutcome::Failed(message)) => {
                ui.colored_label(egui::Color32::from_rgb(190, 60, 40), message);
                failed = true;
            }
            None => {}
        }
        if failed {
            self.offer_settings(ui);
        }
    }
}
