//! Scene painting for `PopupApp`.
//!
//! The central panel is one painter. Each frame the scene context advances,
//! hands its parameters to a [`SceneFrame`], and the frame's animated scene
//! is projected, depth-sorted and shaded onto the painter.

use egui::{pos2, Color32, Rect, Shape, Stroke};
use hive_popup::render::projection::Camera;
use hive_popup::render::scene::{Light, Primitive, Scene};
use hive_popup::render::animate_scene;
use hive_popup::{FrameParams, FrameSurface};

use super::PopupApp;

/// Frame adapter: receives the frame parameters and holds what to paint.
pub struct SceneFrame<'a> {
    base: &'a Scene,
    time: f32,
    animated: Option<Scene>,
    camera: Camera,
}

impl<'a> SceneFrame<'a> {
    pub fn new(base: &'a Scene, time: f32) -> Self {
        Self {
            base,
            time,
            animated: None,
            camera: Camera::default(),
        }
    }
}

impl FrameSurface for SceneFrame<'_> {
    fn apply_frame(&mut self, frame: &FrameParams) {
        self.animated = Some(animate_scene(
            self.base,
            &frame.derived,
            frame.auxiliary_visible,
            self.time,
        ));
        self.camera = Camera::with_offset(frame.camera.x, frame.camera.y);
    }
}

fn sub(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

/// Lambert term for a two-sided face.
fn face_light(corners: &[[f32; 3]; 4], light: &Light) -> f32 {
    let n = cross(sub(corners[1], corners[0]), sub(corners[3], corners[0]));
    let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
    if len <= f32::EPSILON {
        return light.ambient;
    }
    let d = light.direction;
    let lambert = ((n[0] * d[0] + n[1] * d[1] + n[2] * d[2]) / len).abs();
    light.ambient + (1.0 - light.ambient) * lambert
}

fn to_color(rgba: [f32; 4], shade: f32) -> Color32 {
    let c = |v: f32| (v * shade * 255.0).clamp(0.0, 255.0) as u8;
    Color32::from_rgba_unmultiplied(c(rgba[0]), c(rgba[1]), c(rgba[2]), (rgba[3] * 255.0) as u8)
}

/// Project every primitive and return `(depth, shape)` pairs, farthest first.
fn project_scene(scene: &Scene, camera: &Camera, rect: Rect) -> Vec<(f32, Shape)> {
    let (w, h) = (rect.width(), rect.height());
    let to_screen = |x: f32, y: f32| pos2(rect.min.x + x, rect.min.y + y);
    let mut shapes = Vec::with_capacity(scene.nodes.len());

    for node in &scene.nodes {
        match &node.primitive {
            Primitive::Quad { corners, color } => {
                let projected: Option<Vec<_>> =
                    corners.iter().map(|p| camera.project(*p, w, h)).collect();
                let Some(projected) = projected else { continue };
                let depth = projected.iter().map(|p| p.depth).sum::<f32>() / 4.0;
                let points = projected.iter().map(|p| to_screen(p.x, p.y)).collect();
                let fill = to_color(*color, face_light(corners, &scene.light));
                shapes.push((
                    depth,
                    Shape::convex_polygon(points, fill, Stroke::NONE),
                ));
            }
            Primitive::Sphere {
                center,
                radius,
                color,
            } => {
                let Some(p) = camera.project(*center, w, h) else { continue };
                let r = (radius * p.pixels_per_unit).max(0.5);
                let centre = to_screen(p.x, p.y);
                let lit = scene.light.ambient + (1.0 - scene.light.ambient) * 0.8;
                shapes.push((p.depth, Shape::circle_filled(centre, r, to_color(*color, lit))));
                // Specular dot toward the light
                let glint = centre + egui::vec2(-0.35 * r, -0.35 * r);
                shapes.push((
                    p.depth - 1e-4,
                    Shape::circle_filled(
                        glint,
                        r * 0.3,
                        Color32::from_white_alpha(70),
                    ),
                ));
            }
            Primitive::Line {
                start,
                end,
                thickness,
                color,
            } => {
                let (Some(a), Some(b)) = (camera.project(*start, w, h), camera.project(*end, w, h))
                else {
                    continue;
                };
                let width = (thickness * (a.pixels_per_unit + b.pixels_per_unit) * 0.5).max(1.0);
                shapes.push((
                    (a.depth + b.depth) * 0.5,
                    Shape::line_segment(
                        [to_screen(a.x, a.y), to_screen(b.x, b.y)],
                        Stroke::new(width, to_color(*color, 1.0)),
                    ),
                ));
            }
        }
    }

    shapes.sort_by(|a, b| b.0.total_cmp(&a.0));
    shapes
}

impl PopupApp {
    /// Render the book scene into the remaining space of `ui`.
    pub fn draw_scene(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let (response, painter) =
            ui.allocate_painter(ui.available_size(), egui::Sense::click());
        let rect = response.rect;

        // Pointer → parallax input
        if let Some(pos) = response.hover_pos() {
            self.pointer_inside = true;
            self.scene_ctx.input.pointer.on_pointer_move(
                pos.x - rect.min.x,
                pos.y - rect.min.y,
                rect.width(),
                rect.height(),
            );
        } else if self.pointer_inside {
            self.pointer_inside = false;
            self.scene_ctx.input.pointer.on_pointer_leave();
        }
        if response.clicked() {
            self.note_interaction();
        }

        let time = self.app_start.elapsed().as_secs_f32();
        let mut frame = SceneFrame::new(&self.base_scene, time);
        self.scene_ctx.render_step(rect.width(), &mut frame);

        painter.rect_filled(rect, 0.0, to_color(self.base_scene.background_color, 1.0));
        if let Some(scene) = &frame.animated {
            for (_, shape) in project_scene(scene, &frame.camera, rect) {
                painter.add(shape);
            }
        }

        if self.pages.home_chrome {
            let ink = if self.dark_mode {
                Color32::from_rgb(250, 235, 200)
            } else {
                Color32::from_rgb(70, 45, 10)
            };
            painter.text(
                rect.center_top() + egui::vec2(0.0, 32.0),
                egui::Align2::CENTER_TOP,
                "The Hive",
                egui::FontId::proportional(44.0),
                ink,
            );
            painter.text(
                rect.center_top() + egui::vec2(0.0, 86.0),
                egui::Align2::CENTER_TOP,
                "A pop-up book about bees and the flowers they love",
                egui::FontId::proportional(18.0),
                ink,
            );
        }

        // The book animates continuously
        ctx.request_repaint();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hive_popup::render::{build_scene, SceneConfig};
    use hive_popup::SceneContext;

    #[test]
    fn frame_adapter_receives_the_animated_scene() {
        let base = build_scene(&SceneConfig::default());
        let mut ctx = SceneContext::default();
        let mut frame = SceneFrame::new(&base, 0.0);
        ctx.render_step(1280.0, &mut frame);
        let scene = frame.animated.as_ref().unwrap();
        // Open book at rest: everything except the hidden swarm
        assert_eq!(
            scene.nodes.len(),
            base.nodes.len() - base.count(hive_popup::render::Group::Auxiliary)
        );
    }

    #[test]
    fn shapes_are_sorted_far_to_near() {
        let base = build_scene(&SceneConfig::default());
        let rect = Rect::from_min_size(pos2(0.0, 0.0), egui::vec2(800.0, 600.0));
        let shapes = project_scene(&base, &Camera::default(), rect);
        assert!(!shapes.is_empty());
        assert!(shapes.windows(2).all(|w| w[0].0 >= w[1].0));
    }

    #[test]
    fn shading_scales_rgb_but_not_alpha() {
        assert_eq!(to_color([1.0, 0.5, 0.0, 1.0], 1.0), Color32::from_rgb(255, 127, 0));
        let dim = to_color([1.0, 1.0, 1.0, 0.5], 0.5);
        assert_eq!(dim, Color32::from_rgba_unmultiplied(127, 127, 127, 127));
        // Over-bright shading saturates
        assert_eq!(to_color([0.8, 0.8, 0.8, 1.0], 2.0), Color32::WHITE);
    }

    #[test]
    fn flat_face_under_overhead_light_is_bright() {
        let light = Light {
            direction: [0.0, -1.0, 0.0],
            ambient: 0.4,
        };
        let flat = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 0.0, 1.0], [0.0, 0.0, 1.0]];
        assert!((face_light(&flat, &light) - 1.0).abs() < 1e-5);
        let upright = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]];
        assert!((face_light(&upright, &light) - 0.4).abs() < 1e-5);
    }
}
