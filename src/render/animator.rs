//! Pop-up book animator.
//!
//! Turns the static scene into the scene for one frame:
//! - Hinge: book halves rotate about the spine (Z axis) by `hinge_angle`
//! - Content: flowers/bees/trails scale about their anchors by `content_scale`
//! - Book scale: halves and content scale about the origin by `book_scale`
//! - Motion: bees bob, the auxiliary swarm orbits (time-driven)
//!
//! Nodes scaled to nothing are dropped so the painter never sees them.

use crate::render::scene::{Group, Motion, Primitive, Scene, SceneNode};
use crate::render::transition::DerivedFrameParams;

/// Bob speed in radians per second.
const BOB_SPEED: f32 = 2.2;

impl Primitive {
    /// Transform every point with `f` and scale radii/thickness by `size`.
    pub fn transformed(&self, f: impl Fn([f32; 3]) -> [f32; 3], size: f32) -> Primitive {
        match self {
            Primitive::Quad { corners, color } => Primitive::Quad {
                corners: [f(corners[0]), f(corners[1]), f(corners[2]), f(corners[3])],
                color: *color,
            },
            Primitive::Sphere {
                center,
                radius,
                color,
            } => Primitive::Sphere {
                center: f(*center),
                radius: radius * size,
                color: *color,
            },
            Primitive::Line {
                start,
                end,
                thickness,
                color,
            } => Primitive::Line {
                start: f(*start),
                end: f(*end),
                thickness: thickness * size,
                color: *color,
            },
        }
    }
}

/// Rotate a point about the Z axis through the origin.
fn rotate_z(p: [f32; 3], angle: f32) -> [f32; 3] {
    let (s, c) = angle.sin_cos();
    [p[0] * c - p[1] * s, p[0] * s + p[1] * c, p[2]]
}

fn scale_about(p: [f32; 3], pivot: [f32; 3], k: f32) -> [f32; 3] {
    [
        pivot[0] + (p[0] - pivot[0]) * k,
        pivot[1] + (p[1] - pivot[1]) * k,
        pivot[2] + (p[2] - pivot[2]) * k,
    ]
}

fn motion_offset(motion: Motion, t: f32) -> [f32; 3] {
    match motion {
        Motion::Static => [0.0, 0.0, 0.0],
        Motion::Bob { phase, amplitude } => [0.0, (t * BOB_SPEED + phase).sin() * amplitude, 0.0],
        Motion::Orbit {
            radius,
            speed,
            phase,
        } => {
            let angle = phase + t * speed;
            [angle.cos() * radius, (angle * 2.0).sin() * 0.08, angle.sin() * radius]
        }
    }
}

fn add(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

/// Animate the scene for one frame at time `t` (seconds since start).
pub fn animate_scene(
    base: &Scene,
    params: &DerivedFrameParams,
    auxiliary_visible: bool,
    t: f32,
) -> Scene {
    let book = params.book_scale;
    let origin = [0.0, 0.0, 0.0];
    let mut nodes = Vec::with_capacity(base.nodes.len());

    for node in &base.nodes {
        let primitive = match node.group {
            Group::Table => node.primitive.clone(),
            Group::LeftHalf | Group::RightHalf => {
                if book <= 0.0 {
                    continue;
                }
                let angle = if node.group == Group::LeftHalf {
                    -params.hinge_angle
                } else {
                    params.hinge_angle
                };
                node.primitive
                    .transformed(|p| scale_about(rotate_z(p, angle), origin, book), book)
            }
            Group::Content => {
                let k = params.content_scale;
                if k <= 0.0 || book <= 0.0 {
                    continue;
                }
                let offset = motion_offset(node.motion, t);
                let anchor = node.anchor;
                node.primitive.transformed(
                    |p| scale_about(add(scale_about(p, anchor, k), offset), origin, book),
                    k * book,
                )
            }
            Group::Auxiliary => {
                if !auxiliary_visible {
                    continue;
                }
                let offset = motion_offset(node.motion, t);
                node.primitive.transformed(|p| add(p, offset), 1.0)
            }
        };

        nodes.push(SceneNode {
            group: node.group,
            anchor: node.anchor,
            motion: node.motion,
            primitive,
        });
    }

    Scene {
        nodes,
        light: base.light,
        background_color: base.background_color,
    }
}
