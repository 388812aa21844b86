//! Perspective camera for painting the scene onto a 2D surface.

use crate::render::scene::normalize;

/// Resting camera position, above and in front of the book.
pub const BASE_EYE: [f32; 3] = [0.0, 3.0, 4.4];
/// Point the camera always looks at.
pub const LOOK_AT: [f32; 3] = [0.0, 0.35, 0.0];
/// How far one unit of camera offset moves the eye.
const OFFSET_TRAVEL: [f32; 2] = [0.9, 0.5];
const NEAR: f32 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub eye: [f32; 3],
    pub target: [f32; 3],
    /// Vertical field of view in radians
    pub fov_y: f32,
}

/// A point projected into surface pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    pub x: f32,
    pub y: f32,
    /// Distance along the view direction (larger = farther)
    pub depth: f32,
    /// Pixels per world unit at this depth
    pub pixels_per_unit: f32,
}

fn sub(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn dot(a: [f32; 3], b: [f32; 3]) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: BASE_EYE,
            target: LOOK_AT,
            fov_y: 45.0_f32.to_radians(),
        }
    }
}

impl Camera {
    /// Default camera shifted by a parallax offset (x right, y down in screen terms).
    pub fn with_offset(offset_x: f32, offset_y: f32) -> Self {
        let mut cam = Self::default();
        cam.eye[0] += offset_x * OFFSET_TRAVEL[0];
        cam.eye[1] -= offset_y * OFFSET_TRAVEL[1];
        cam
    }

    /// Project a world point onto a `width` x `height` surface.
    /// Returns `None` for points behind the near plane.
    pub fn project(&self, p: [f32; 3], width: f32, height: f32) -> Option<Projected> {
        let forward = normalize(sub(self.target, self.eye));
        let right = normalize(cross(forward, [0.0, 1.0, 0.0]));
        let up = cross(right, forward);

        let rel = sub(p, self.eye);
        let cz = dot(rel, forward);
        if cz < NEAR {
            return None;
        }
        let cx = dot(rel, right);
        let cy = dot(rel, up);

        let f = 1.0 / (self.fov_y * 0.5).tan();
        let aspect = if height > 0.0 { width / height } else { 1.0 };
        let ndc_x = cx * f / (cz * aspect);
        let ndc_y = cy * f / cz;

        Some(Projected {
            x: (ndc_x + 1.0) * 0.5 * width,
            y: (1.0 - ndc_y) * 0.5 * height,
            depth: cz,
            pixels_per_unit: f / cz * height * 0.5,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn look_at_point_hits_centre() {
        let cam = Camera::default();
        let p = cam.project(LOOK_AT, 800.0, 600.0).unwrap();
        assert!((p.x - 400.0).abs() < 1e-3);
        assert!((p.y - 300.0).abs() < 1e-3);
    }

    #[test]
    fn behind_camera_is_culled() {
        let cam = Camera::default();
        assert!(cam.project([0.0, 3.0, 10.0], 800.0, 600.0).is_none());
    }

    #[test]
    fn right_of_target_projects_right() {
        let cam = Camera::default();
        let p = cam.project([1.0, 0.35, 0.0], 800.0, 600.0).unwrap();
        assert!(p.x > 400.0);
    }

    #[test]
    fn farther_points_are_smaller() {
        let cam = Camera::default();
        let near = cam.project([0.0, 0.0, 1.0], 800.0, 600.0).unwrap();
        let far = cam.project([0.0, 0.0, -1.0], 800.0, 600.0).unwrap();
        assert!(far.depth > near.depth);
        assert!(far.pixels_per_unit < near.pixels_per_unit);
    }

    #[test]
    fn offset_moves_eye() {
        let cam = Camera::with_offset(1.0, 1.0);
        assert!(cam.eye[0] > BASE_EYE[0]);
        assert!(cam.eye[1] < BASE_EYE[1]);
    }
}
