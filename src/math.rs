// Math utilities for the square transform

use glam::{Mat4, Quat, Vec3};

use crate::scene::Viewport;

/// Placement of a model in screen space.
#[derive(Debug, Clone, Copy)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    pub fn new(position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    /// Translation to `position` with `angle` radians of rotation about Z.
    pub fn planar(position: Vec3, angle: f32) -> Self {
        Self::new(position, Quat::from_rotation_z(angle), Vec3::ONE)
    }

    /// Model matrix: translate, then rotate, then scale in local space.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

/// Pixel-space orthographic projection with the origin at the top-left corner.
pub fn projection(viewport: Viewport) -> Mat4 {
    Mat4::orthographic_rh_gl(
        0.0,
        viewport.width as f32,
        viewport.height as f32,
        0.0,
        -1.0,
        1.0,
    )
}

/// Full transform for the square: projection * translate(w/2, y) * rotate_z(angle).
pub fn square_transform(viewport: Viewport, vertical_position: f32, angle: f32) -> Mat4 {
    let center = Vec3::new(viewport.width as f32 / 2.0, vertical_position, 0.0);
    projection(viewport) * Transform::planar(center, angle).matrix()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    const VIEW: Viewport = Viewport {
        width: 720,
        height: 480,
    };

    #[test]
    fn projection_maps_pixel_corners_to_clip_space() {
        let proj = projection(VIEW);

        let top_left = proj.project_point3(Vec3::new(0.0, 0.0, 0.0));
        assert_relative_eq!(top_left.x, -1.0, epsilon = 1e-6);
        assert_relative_eq!(top_left.y, 1.0, epsilon = 1e-6);

        let bottom_right = proj.project_point3(Vec3::new(720.0, 480.0, 0.0));
        assert_relative_eq!(bottom_right.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(bottom_right.y, -1.0, epsilon = 1e-6);
    }

    #[test]
    fn unrotated_square_sits_centered_at_top() {
        let mvp = square_transform(VIEW, 0.0, 0.0);

        let center = mvp.project_point3(Vec3::ZERO);
        assert_relative_eq!(center.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(center.y, 1.0, epsilon = 1e-6);

        // Top-left vertex (-50, 50) lands at pixel (310, 50).
        let corner = mvp.project_point3(Vec3::new(-50.0, 50.0, 0.0));
        assert_relative_eq!(corner.x, 310.0 / 360.0 - 1.0, epsilon = 1e-6);
        assert_relative_eq!(corner.y, 1.0 - 50.0 / 240.0, epsilon = 1e-6);
    }

    #[test]
    fn vertical_position_moves_down_the_screen() {
        let mvp = square_transform(VIEW, 240.0, 0.0);
        let center = mvp.project_point3(Vec3::ZERO);
        assert_relative_eq!(center.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(center.y, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn rotation_is_applied_before_translation() {
        let mvp = square_transform(VIEW, 100.0, FRAC_PI_2);
        // (50, 0) rotated a quarter turn becomes (0, 50), then offset to (360, 150).
        let p = mvp.project_point3(Vec3::new(50.0, 0.0, 0.0));
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(p.y, 1.0 - 150.0 / 240.0, epsilon = 1e-5);
    }

    #[test]
    fn transform_matrix_keeps_translation_column() {
        let m = Transform::planar(Vec3::new(3.0, 4.0, 0.0), 1.0).matrix();
        assert_relative_eq!(m.w_axis.x, 3.0, epsilon = 1e-6);
        assert_relative_eq!(m.w_axis.y, 4.0, epsilon = 1e-6);
        assert_relative_eq!(m.w_axis.w, 1.0, epsilon = 1e-6);
    }
}
