// Scene state for the falling square

use std::time::Duration;

use glam::Mat4;

use crate::clock::FrameTime;
use crate::math;

/// Current drawable size in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Square falling at a constant speed and wrapping back to the top.
#[derive(Debug, Clone, Copy)]
pub struct FallingSquare {
    /// Vertical offset of the center from the top edge, in pixels.
    pub position: f64,
    /// Pixels per second.
    pub fall_speed: f64,
}

impl FallingSquare {
    pub fn new(fall_speed: f32) -> Self {
        Self {
            position: 0.0,
            fall_speed: f64::from(fall_speed),
        }
    }

    /// Moves the square by `fall_speed * dt`. Returns true if it passed
    /// `bound` and was reset to the top.
    pub fn advance(&mut self, dt: Duration, bound: u32) -> bool {
        self.position += self.fall_speed * dt.as_secs_f64();
        if self.position > f64::from(bound) {
            self.position = 0.0;
            return true;
        }
        false
    }
}

/// Rotation in radians: seconds since start, never wrapped.
pub fn rotation_angle(elapsed: Duration) -> f32 {
    elapsed.as_secs_f32()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Quit,
}

/// Everything the render loop mutates between frames.
#[derive(Debug)]
pub struct Scene {
    viewport: Viewport,
    square: FallingSquare,
    state: RunState,
}

impl Scene {
    pub fn new(viewport: Viewport, fall_speed: f32) -> Self {
        Self {
            viewport,
            square: FallingSquare::new(fall_speed),
            state: RunState::Running,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn square(&self) -> &FallingSquare {
        &self.square
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport = Viewport::new(width, height);
    }

    pub fn request_quit(&mut self) {
        self.state = RunState::Quit;
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    /// Advances the animation one frame and returns the transform to draw
    /// with, or `None` once quit has been requested.
    pub fn frame(&mut self, time: &FrameTime) -> Option<Mat4> {
        if !self.is_running() {
            return None;
        }

        if self.square.advance(time.dt, self.viewport.height) {
            log::trace!("Square wrapped on frame {}", time.frame_index);
        }

        Some(math::square_transform(
            self.viewport,
            self.square.position as f32,
            rotation_angle(time.elapsed),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // One frame at 60 Hz, rounded to the nanosecond.
    const FRAME_60HZ: Duration = Duration::from_nanos(16_666_667);

    fn frame_time(dt: Duration, elapsed: Duration, frame_index: u64) -> FrameTime {
        FrameTime {
            dt,
            elapsed,
            frame_index,
        }
    }

    #[test]
    fn square_wraps_after_288_frames_at_60hz() {
        let mut square = FallingSquare::new(100.0);
        for frame in 1..288 {
            assert!(!square.advance(FRAME_60HZ, 480), "wrapped early on frame {frame}");
            assert_relative_eq!(square.position, frame as f64 * 100.0 / 60.0, epsilon = 1e-3);
        }
        assert!(square.advance(FRAME_60HZ, 480));
        assert_eq!(square.position, 0.0);
    }

    #[test]
    fn motion_scales_with_real_frame_time() {
        let mut fast = FallingSquare::new(100.0);
        let mut slow = FallingSquare::new(100.0);

        for _ in 0..120 {
            fast.advance(Duration::from_secs_f64(1.0 / 120.0), 480);
        }
        for _ in 0..30 {
            slow.advance(Duration::from_secs_f64(1.0 / 30.0), 480);
        }

        assert_relative_eq!(fast.position, 100.0, epsilon = 1e-3);
        assert_relative_eq!(slow.position, 100.0, epsilon = 1e-3);
    }

    #[test]
    fn shrinking_the_window_wraps_immediately() {
        let mut square = FallingSquare::new(100.0);
        square.position = 300.0;
        assert!(square.advance(FRAME_60HZ, 200));
        assert_eq!(square.position, 0.0);
    }

    #[test]
    fn angle_is_elapsed_seconds() {
        assert_eq!(rotation_angle(Duration::ZERO), 0.0);
        assert_relative_eq!(rotation_angle(Duration::from_millis(2500)), 2.5);
        assert_relative_eq!(rotation_angle(Duration::from_secs(1000)), 1000.0);
    }

    #[test]
    fn resize_stores_exact_dimensions() {
        let mut scene = Scene::new(Viewport::new(720, 480), 100.0);
        scene.resize(1024, 333);
        assert_eq!(scene.viewport(), Viewport::new(1024, 333));

        scene.frame(&frame_time(FRAME_60HZ, FRAME_60HZ, 0));
        assert_eq!(scene.viewport(), Viewport::new(1024, 333));
    }

    #[test]
    fn frame_uses_current_viewport_for_projection() {
        let mut scene = Scene::new(Viewport::new(720, 480), 0.0);
        scene.resize(400, 300);

        let mvp = scene
            .frame(&frame_time(FRAME_60HZ, Duration::ZERO, 0))
            .expect("scene is running");
        let center = mvp.project_point3(glam::Vec3::ZERO);
        assert_relative_eq!(center.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(center.y, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn quit_stops_further_frames() {
        let mut scene = Scene::new(Viewport::new(720, 480), 100.0);
        assert!(scene.frame(&frame_time(FRAME_60HZ, FRAME_60HZ, 0)).is_some());
        let position = scene.square().position;

        scene.request_quit();
        assert!(!scene.is_running());
        assert!(scene.frame(&frame_time(FRAME_60HZ, FRAME_60HZ * 2, 1)).is_none());
        assert_eq!(scene.square().position, position);
    }

    #[test]
    fn empty_viewport_detection() {
        assert!(Viewport::new(0, 480).is_empty());
        assert!(Viewport::new(720, 0).is_empty());
        assert!(!Viewport::new(1, 1).is_empty());
    }
}
