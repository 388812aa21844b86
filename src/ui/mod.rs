//! Stateless egui helpers for generated text.
//!
//! Translates formatted reply blocks and species cards into egui widgets,
//! plus a small text utility used by the panels.

use egui::{Color32, RichText, Ui};
use hive_popup::assistant::markup::{Block, Span};
use hive_popup::assistant::SpeciesCard;

const ERROR_INK: Color32 = Color32::from_rgb(190, 60, 40);
const HONEY: Color32 = Color32::from_rgb(214, 150, 20);

// ─── Reply rendering ─────────────────────────────────────────────────────────

fn span_text(span: &Span, base: RichText) -> RichText {
    let mut rt = base;
    if span.bold {
        rt = rt.strong();
    }
    if span.italic {
        rt = rt.italics();
    }
    rt
}

fn render_spans(ui: &mut Ui, spans: &[Span], size: Option<f32>, color: Option<Color32>) {
    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing.x = 0.0;
        for span in spans {
            let mut base = RichText::new(&span.text);
            if let Some(size) = size {
                base = base.size(size).strong();
            }
            if let Some(color) = color {
                base = base.color(color);
            }
            ui.label(span_text(span, base));
        }
    });
}

/// Render reply blocks. Error replies are drawn in the warning colour.
pub fn render_blocks(ui: &mut Ui, blocks: &[Block], is_error: bool) {
    let color = is_error.then_some(ERROR_INK);
    for block in blocks {
        match block {
            Block::Heading(spans) => {
                render_spans(ui, spans, Some(18.0), color);
                ui.add_space(4.0);
            }
            Block::Bullet(spans) => {
                ui.horizontal(|ui| {
                    ui.label("  \u{2022}");
                    render_spans(ui, spans, None, color);
                });
            }
            Block::Paragraph(spans) => {
                render_spans(ui, spans, None, color);
                ui.add_space(6.0);
            }
        }
    }
}

/// Species card template: name, then one row per filled field.
pub fn render_species_card(ui: &mut Ui, card: &SpeciesCard) {
    egui::Frame::group(ui.style())
        .stroke(egui::Stroke::new(1.5, HONEY))
        .inner_margin(egui::Margin::same(10.0))
        .show(ui, |ui| {
            ui.label(RichText::new(&card.name).size(22.0).strong().color(HONEY));
            if !card.scientific_name.trim().is_empty() {
                ui.label(RichText::new(&card.scientific_name).italics());
            }
            ui.add_space(6.0);
            egui::Grid::new("species_card")
                .num_columns(2)
                .spacing([12.0, 6.0])
                .show(ui, |ui| {
                    for (label, value) in card.rows().into_iter().filter(|(l, _)| *l != "Scientific name") {
                        ui.label(RichText::new(label).strong());
                        ui.add(egui::Label::new(value).wrap());
                        ui.end_row();
                    }
                });
        });
}

// ─── Text utilities ───────────────────────────────────────────────────────────

/// Truncate `s` to at most `max_chars` Unicode scalar values, appending `"..."` if truncated.
pub fn truncate_str(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let t: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", t)
    }
}
