//! Orbit camera and perspective projection onto the egui canvas.

use egui::{Pos2, Rect, Vec2};
use glam::{Quat, Vec3};

const NEAR: f32 = 0.1;

#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    pub target: Vec3,
    /// Vertical field of view in radians
    pub fov: f32,
}

impl Default for Camera {
    fn default() -> Self {
        // Looking from roughly (10, 10, 45) toward the origin
        Self {
            yaw: -(10.0f32 / 45.0).atan(),
            pitch: (10.0f32 / 46.1).atan(),
            distance: 47.2,
            target: Vec3::ZERO,
            fov: 75f32.to_radians(),
        }
    }
}

impl Camera {
    /// Rotate around the target from a mouse drag in points
    pub fn orbit(&mut self, drag: Vec2) {
        self.yaw += drag.x * 0.01;
        self.pitch = (self.pitch + drag.y * 0.01).clamp(-1.5, 1.5);
    }

    /// Scroll in to get closer, out to back away
    pub fn zoom(&mut self, scroll: f32) {
        self.distance = (self.distance * (-scroll * 0.002).exp()).clamp(1.0, 1000.0);
    }

    fn view_rotation(&self) -> Quat {
        Quat::from_rotation_x(self.pitch) * Quat::from_rotation_y(self.yaw)
    }

    /// Screen position and depth of a scene point, `None` behind the camera
    pub fn project(&self, point: Vec3, rect: Rect) -> Option<(Pos2, f32)> {
        let v = self.view_rotation() * (point - self.target);
        let depth = self.distance - v.z;
        if depth <= NEAR {
            return None;
        }
        let focal = self.focal_length(rect);
        let screen = rect.center() + egui::vec2(v.x * focal / depth, -v.y * focal / depth);
        Some((screen, depth))
    }

    /// On-screen size of a scene-space length seen at `depth`
    pub fn projected_size(&self, length: f32, depth: f32, rect: Rect) -> f32 {
        length * self.focal_length(rect) / depth
    }

    fn focal_length(&self, rect: Rect) -> f32 {
        rect.height() * 0.5 / (self.fov * 0.5).tan()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> Rect {
        Rect::from_min_size(Pos2::ZERO, egui::vec2(800.0, 600.0))
    }

    #[test]
    fn target_projects_to_center() {
        let camera = Camera::default();
        let (pos, depth) = camera.project(Vec3::ZERO, canvas()).unwrap();
        assert!((pos - canvas().center()).length() < 1e-3);
        assert!((depth - camera.distance).abs() < 1e-3);
    }

    #[test]
    fn points_behind_camera_are_culled() {
        let camera = Camera {
            yaw: 0.0,
            pitch: 0.0,
            ..Camera::default()
        };
        assert!(camera.project(Vec3::new(0.0, 0.0, 100.0), canvas()).is_none());
    }

    #[test]
    fn zoom_is_clamped() {
        let mut camera = Camera::default();
        camera.zoom(1.0e6);
        assert_eq!(camera.distance, 1.0);
        camera.zoom(-1.0e6);
        assert_eq!(camera.distance, 1000.0);
    }
}
