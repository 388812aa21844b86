//! Static pop-up book scene.
//!
//! Built once at startup and never mutated. Every frame the animator takes
//! this base scene and produces a transformed copy for drawing.
//!
//! Coordinate system: Y up, the book lies flat on the table in the XZ plane
//! with its spine along the Z axis at `x = 0`.

/// Role of a primitive in the scene. The animator transforms each group differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Group {
    /// Table top under the book. Never animated.
    Table,
    /// Left book half, hinged on the spine.
    LeftHalf,
    /// Right book half, hinged on the spine.
    RightHalf,
    /// Flowers, bees and decorative lines that pop out of the open book.
    Content,
    /// Decorative swarm shown only while the auxiliary flag is set.
    Auxiliary,
}

/// Drawable shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// Flat four-cornered face (pages, covers, table)
    Quad {
        corners: [[f32; 3]; 4],
        color: [f32; 4],
    },
    /// Sphere (petals, flower centres, bee bodies and wings)
    Sphere {
        center: [f32; 3],
        radius: f32,
        color: [f32; 4],
    },
    /// Line segment (stems, trails)
    Line {
        start: [f32; 3],
        end: [f32; 3],
        thickness: f32,
        color: [f32; 4],
    },
}

/// Time-driven motion applied on top of the transition transforms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Motion {
    Static,
    /// Vertical sine drift
    Bob { phase: f32, amplitude: f32 },
    /// Circle around the Y axis
    Orbit { radius: f32, speed: f32, phase: f32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub group: Group,
    /// Pivot for content scaling (flower base, bee centre)
    pub anchor: [f32; 3],
    pub motion: Motion,
    pub primitive: Primitive,
}

/// Single directional light with an ambient floor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    /// Direction the light travels (normalized)
    pub direction: [f32; 3],
    pub ambient: f32,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            direction: normalize([-0.4, -1.0, -0.6]),
            ambient: 0.45,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub nodes: Vec<SceneNode>,
    pub light: Light,
    pub background_color: [f32; 4],
}

impl Scene {
    pub fn count(&self, group: Group) -> usize {
        self.nodes.iter().filter(|n| n.group == group).count()
    }
}

/// Layout knobs for the generated scene.
#[derive(Debug, Clone)]
pub struct SceneConfig {
    /// Width of one book half along X
    pub half_width: f32,
    /// Depth of the book along Z
    pub depth: f32,
    pub flowers: usize,
    pub bees: usize,
    /// Bees in the auxiliary swarm
    pub swarm: usize,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            half_width: 1.0,
            depth: 1.4,
            flowers: 9,
            bees: 4,
            swarm: 8,
        }
    }
}

const PETAL_COLORS: &[[f32; 4]] = &[
    [0.93, 0.38, 0.52, 1.0], // Rose
    [0.98, 0.78, 0.20, 1.0], // Buttercup
    [0.62, 0.42, 0.85, 1.0], // Lavender
    [0.98, 0.55, 0.25, 1.0], // Marigold
    [0.95, 0.95, 0.98, 1.0], // Daisy
];

const STEM_COLOR: [f32; 4] = [0.25, 0.55, 0.22, 1.0];
const FLOWER_CENTRE: [f32; 4] = [0.55, 0.35, 0.10, 1.0];
const BEE_BODY: [f32; 4] = [0.98, 0.76, 0.12, 1.0];
const BEE_WING: [f32; 4] = [0.85, 0.93, 1.0, 0.7];
const COVER_COLOR: [f32; 4] = [0.55, 0.27, 0.15, 1.0];
const PAGE_COLOR: [f32; 4] = [0.98, 0.95, 0.86, 1.0];
const TABLE_COLOR: [f32; 4] = [0.42, 0.30, 0.22, 1.0];
const TRAIL_COLOR: [f32; 4] = [0.95, 0.80, 0.35, 0.8];

/// Deterministic pseudo-random value in `0..=1`.
fn scatter(seed: usize) -> f32 {
    let x = seed.wrapping_mul(2654435761) ^ seed.wrapping_mul(340573321);
    ((x & 0xFFFF) as f32) / 65535.0
}

pub(crate) fn normalize(v: [f32; 3]) -> [f32; 3] {
    let len = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    if len > 1e-6 {
        [v[0] / len, v[1] / len, v[2] / len]
    } else {
        v
    }
}

/// Build the full pop-up book scene.
pub fn build_scene(config: &SceneConfig) -> Scene {
    let mut nodes = Vec::new();
    push_table(&mut nodes, config);
    push_book_half(&mut nodes, config, Group::LeftHalf);
    push_book_half(&mut nodes, config, Group::RightHalf);
    push_flowers(&mut nodes, config);
    push_bees(&mut nodes, config);
    push_trails(&mut nodes, config);
    push_swarm(&mut nodes, config);

    Scene {
        nodes,
        light: Light::default(),
        background_color: [0.99, 0.96, 0.88, 1.0],
    }
}

fn push_table(nodes: &mut Vec<SceneNode>, config: &SceneConfig) {
    let w = config.half_width * 3.0;
    let d = config.depth * 1.6;
    let y = -0.02;
    nodes.push(SceneNode {
        group: Group::Table,
        anchor: [0.0, y, 0.0],
        motion: Motion::Static,
        primitive: Primitive::Quad {
            corners: [[-w, y, d], [w, y, d], [w, y, -d], [-w, y, -d]],
            color: TABLE_COLOR,
        },
    });
}

fn push_book_half(nodes: &mut Vec<SceneNode>, config: &SceneConfig, group: Group) {
    // Outer edge of this half along X; the spine is at x = 0
    let side = if group == Group::LeftHalf { -1.0 } else { 1.0 };
    let outer = side * config.half_width;
    let hz = config.depth * 0.5;
    let margin = 0.05;

    nodes.push(SceneNode {
        group,
        anchor: [0.0, 0.0, 0.0],
        motion: Motion::Static,
        primitive: Primitive::Quad {
            corners: [[0.0, 0.0, hz], [outer, 0.0, hz], [outer, 0.0, -hz], [0.0, 0.0, -hz]],
            color: COVER_COLOR,
        },
    });

    let page_outer = outer - side * margin;
    let pz = hz - margin;
    nodes.push(SceneNode {
        group,
        anchor: [0.0, 0.0, 0.0],
        motion: Motion::Static,
        primitive: Primitive::Quad {
            corners: [
                [0.0, 0.01, pz],
                [page_outer, 0.01, pz],
                [page_outer, 0.01, -pz],
                [0.0, 0.01, -pz],
            ],
            color: PAGE_COLOR,
        },
    });
}

fn push_flowers(nodes: &mut Vec<SceneNode>, config: &SceneConfig) {
    let span_x = config.half_width * 0.8;
    let span_z = config.depth * 0.38;

    for i in 0..config.flowers {
        let x = (scatter(i * 3 + 1) * 2.0 - 1.0) * span_x;
        let z = (scatter(i * 3 + 2) * 2.0 - 1.0) * span_z;
        let height = 0.35 + scatter(i * 3 + 3) * 0.45;
        let base = [x, 0.01, z];
        let head = [x, base[1] + height, z];
        let petal = PETAL_COLORS[i % PETAL_COLORS.len()];

        nodes.push(SceneNode {
            group: Group::Content,
            anchor: base,
            motion: Motion::Static,
            primitive: Primitive::Line {
                start: base,
                end: head,
                thickness: 0.02,
                color: STEM_COLOR,
            },
        });

        let petal_count = 5;
        let petal_radius = 0.06;
        for p in 0..petal_count {
            let angle = p as f32 / petal_count as f32 * std::f32::consts::TAU;
            nodes.push(SceneNode {
                group: Group::Content,
                anchor: base,
                motion: Motion::Static,
                primitive: Primitive::Sphere {
                    center: [
                        head[0] + angle.cos() * petal_radius * 1.3,
                        head[1],
                        head[2] + angle.sin() * petal_radius * 1.3,
                    ],
                    radius: petal_radius,
                    color: petal,
                },
            });
        }

        nodes.push(SceneNode {
            group: Group::Content,
            anchor: base,
            motion: Motion::Static,
            primitive: Primitive::Sphere {
                center: [head[0], head[1] + 0.02, head[2]],
                radius: petal_radius * 0.8,
                color: FLOWER_CENTRE,
            },
        });
    }
}

fn bee_parts(center: [f32; 3], size: f32) -> [Primitive; 3] {
    [
        Primitive::Sphere {
            center,
            radius: size,
            color: BEE_BODY,
        },
        Primitive::Sphere {
            center: [center[0] - size * 0.6, center[1] + size * 0.9, center[2]],
            radius: size * 0.6,
            color: BEE_WING,
        },
        Primitive::Sphere {
            center: [center[0] + size * 0.6, center[1] + size * 0.9, center[2]],
            radius: size * 0.6,
            color: BEE_WING,
        },
    ]
}

fn push_bees(nodes: &mut Vec<SceneNode>, config: &SceneConfig) {
    for i in 0..config.bees {
        let x = (scatter(100 + i * 2) * 2.0 - 1.0) * config.half_width * 0.7;
        let z = (scatter(101 + i * 2) * 2.0 - 1.0) * config.depth * 0.3;
        let center = [x, 0.9 + scatter(150 + i) * 0.3, z];
        let motion = Motion::Bob {
            phase: i as f32 * 1.7,
            amplitude: 0.06,
        };
        for primitive in bee_parts(center, 0.05) {
            nodes.push(SceneNode {
                group: Group::Content,
                anchor: center,
                motion,
                primitive,
            });
        }
    }
}

fn push_trails(nodes: &mut Vec<SceneNode>, config: &SceneConfig) {
    // Dotted flight path arcing over the spine
    let segments = 12;
    let reach = config.half_width * 0.75;
    let arc = |t: f32| -> [f32; 3] {
        let x = -reach + t * reach * 2.0;
        let y = 0.6 + (t * std::f32::consts::PI).sin() * 0.55;
        [x, y, -config.depth * 0.2]
    };
    for s in (0..segments).step_by(2) {
        let start = arc(s as f32 / segments as f32);
        let end = arc((s + 1) as f32 / segments as f32);
        nodes.push(SceneNode {
            group: Group::Content,
            anchor: [start[0], 0.01, start[2]],
            motion: Motion::Static,
            primitive: Primitive::Line {
                start,
                end,
                thickness: 0.012,
                color: TRAIL_COLOR,
            },
        });
    }
}

fn push_swarm(nodes: &mut Vec<SceneNode>, config: &SceneConfig) {
    for i in 0..config.swarm {
        let phase = i as f32 / config.swarm.max(1) as f32 * std::f32::consts::TAU;
        let height = 1.2 + scatter(200 + i) * 0.5;
        let center = [0.0, height, 0.0];
        let motion = Motion::Orbit {
            radius: 1.9 + scatter(300 + i) * 0.4,
            speed: 0.6 + scatter(400 + i) * 0.3,
            phase,
        };
        for primitive in bee_parts(center, 0.045) {
            nodes.push(SceneNode {
                group: Group::Auxiliary,
                anchor: center,
                motion,
                primitive,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_has_every_group() {
        let scene = build_scene(&SceneConfig::default());
        assert_eq!(scene.count(Group::Table), 1);
        assert_eq!(scene.count(Group::LeftHalf), 2);
        assert_eq!(scene.count(Group::RightHalf), 2);
        assert!(scene.count(Group::Content) > 0);
        assert_eq!(scene.count(Group::Auxiliary), 8 * 3);
    }

    #[test]
    fn halves_meet_at_spine() {
        let scene = build_scene(&SceneConfig::default());
        for node in &scene.nodes {
            if let (Group::LeftHalf | Group::RightHalf, Primitive::Quad { corners, .. }) =
                (node.group, &node.primitive)
            {
                assert!(corners.iter().any(|c| c[0] == 0.0));
                let sign = if node.group == Group::LeftHalf { -1.0 } else { 1.0 };
                assert!(corners.iter().all(|c| c[0] * sign >= 0.0));
            }
        }
    }

    #[test]
    fn build_is_deterministic() {
        let a = build_scene(&SceneConfig::default());
        let b = build_scene(&SceneConfig::default());
        assert_eq!(a, b);
    }

    #[test]
    fn scatter_in_unit_range() {
        for seed in 0..1000 {
            let v = scatter(seed);
            assert!((0.0..=1.0).contains(&v));
        }
    }
}
