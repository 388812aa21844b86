//! Navigation methods for `PopupApp`.
//!
//! The nav bar, the per-page panels and the once-per-frame tick that fires
//! delayed page swaps and the auxiliary reveal.

use std::time::Instant;

use eframe::egui;
use hive_popup::nav::PageId;

use super::PopupApp;

impl PopupApp {
    /// Request `page`. The navigator decides whether the swap is immediate or delayed.
    pub fn go(&mut self, page: PageId) {
        self.note_interaction();
        self.scene_ctx
            .navigate(page, Instant::now(), &mut self.pages);
    }

    /// Fire due navigation tasks against the page view.
    pub fn tick_navigation(&mut self) {
        self.scene_ctx.tick(Instant::now(), &mut self.pages);
    }

    /// First user gesture: the only moment tilt permission may be requested.
    pub fn note_interaction(&mut self) {
        if self.interacted {
            return;
        }
        self.interacted = true;
        self.scene_ctx
            .input
            .orientation
            .on_first_interaction(self.orientation_source.as_mut());
        log::debug!(
            "Tilt input permission: {:?}",
            self.scene_ctx.input.orientation.permission()
        );
    }

    /// Render the top navigation strip.
    pub fn draw_nav_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.add_space(4.0);
            ui.label(egui::RichText::new("\u{1F41D} The Hive").strong().size(18.0));
            ui.separator();

            let mut clicked = None;
            for page in PageId::ALL {
                let selected = self.pages.highlighted == page;
                if ui.selectable_label(selected, page.label()).clicked() {
                    clicked = Some(page);
                }
            }
            if let Some(page) = clicked {
                self.go(page);
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("\u{2699} Settings").clicked() {
                    self.show_settings = true;
                }
                if self.scene_ctx.navigator.pending_page().is_some() {
                    ui.spinner();
                }
            });
        });
    }

    /// Panel body for whichever page is visible.
    pub fn draw_page(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        match self.pages.visible {
            PageId::Home => {}
            PageId::Hive => self.draw_chat(ui, ctx),
            PageId::Species => self.draw_species(ui, ctx),
            PageId::Team => draw_team(ui, self.pages.auxiliary),
        }
    }
}

fn draw_team(ui: &mut egui::Ui, swarm_out: bool) {
    ui.heading("Meet the colony");
    ui.add_space(6.0);
    for (role, blurb) in [
        ("Queen", "Lays up to two thousand eggs a day and sets the scent of the hive."),
        ("Workers", "Forage, build comb, nurse larvae and guard the entrance."),
        ("Drones", "Exist to mate with queens from other colonies."),
    ] {
        ui.label(egui::RichText::new(role).strong());
        ui.label(blurb);
        ui.add_space(4.0);
    }
    ui.add_space(8.0);
    if swarm_out {
        ui.colored_label(
            egui::Color32::from_rgb(200, 140, 0),
            "The swarm has come out to say hello.",
        );
    } else {
        ui.colored_label(egui::Color32::GRAY, "Stay a moment...");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hive_popup::input::{OrientationSource, Permission};
    use hive_popup::AppConfig;
    use std::cell::Cell;
    use std::rc::Rc;

    struct SharedSensor {
        requests: Rc<Cell<usize>>,
    }

    impl OrientationSource for SharedSensor {
        fn request_permission(&mut self) -> bool {
            self.requests.set(self.requests.get() + 1);
            true
        }
    }

    #[test]
    fn first_interaction_asks_the_app_sensor_once() {
        let requests = Rc::new(Cell::new(0));
        let mut app = PopupApp::new(AppConfig::default());
        app.orientation_source = Box::new(SharedSensor {
            requests: Rc::clone(&requests),
        });

        app.note_interaction();
        app.note_interaction();
        app.go(PageId::Hive);

        assert_eq!(requests.get(), 1);
        assert_eq!(
            app.scene_ctx.input.orientation.permission(),
            Permission::Granted
        );
    }

    #[test]
    fn desktop_default_denies_tilt() {
        let mut app = PopupApp::new(AppConfig::default());
        app.note_interaction();
        assert_eq!(
            app.scene_ctx.input.orientation.permission(),
            Permission::Denied
        );
    }
}
