mod app;
mod ui;

use eframe::egui;
use hive_popup::nav::PageId;
use hive_popup::AppConfig;

use app::PopupApp;

fn main() {
    env_logger::init();

    let config = AppConfig::load();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([480.0, 360.0]),
        ..Default::default()
    };

    if let Err(e) = eframe::run_native(
        "The Hive: a pop-up book",
        options,
        Box::new(move |_cc| Ok(Box::new(PopupApp::new(config)))),
    ) {
        log::error!("Window failed: {}", e);
        std::process::exit(1);
    }
}

impl eframe::App for PopupApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_assistant();
        self.tick_navigation();

        if self.dark_mode {
            ctx.set_visuals(egui::Visuals::dark());
        } else {
            ctx.set_visuals(egui::Visuals::light());
        }

        if ctx.input(|i| i.pointer.any_pressed() || !i.keys_down.is_empty()) {
            self.note_interaction();
        }

        egui::TopBottomPanel::top("nav").show(ctx, |ui| {
            self.draw_nav_bar(ui);
        });

        if self.pages.visible != PageId::Home {
            let ctx_clone = ctx.clone();
            egui::SidePanel::right("page")
                .default_width(380.0)
                .resizable(true)
                .show(ctx, |ui| {
                    self.draw_page(ui, &ctx_clone);
                });
        }

        self.draw_settings(ctx);

        // Book scene fills what is left
        let ctx_clone = ctx.clone();
        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                self.draw_scene(ui, &ctx_clone);
            });
    }
}
