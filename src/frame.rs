use std::time::{Duration, Instant};

use glam::{Mat3, Mat4, Vec3};

use crate::camera::Camera;
use crate::lighting::{Material, Spotlight};
use crate::shader::ShaderProgram;

pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 100.0;

/// Cube spin rate in degrees per second of wall-clock time.
pub const SPIN_DEGREES_PER_SECOND: f32 = 50.0;
pub const SPIN_AXIS: Vec3 = Vec3::new(0.5, 1.0, 0.0);

/// Frame timing snapshot.
#[derive(Debug, Clone, Copy)]
pub struct FrameTime {
    /// Seconds since the previous tick.
    pub delta: f32,
    /// Seconds since the clock was created.
    pub elapsed: f32,
    pub frame_index: u64,
}

/// Measures the time between consecutive frames.
///
/// Deltas are reported as measured. A stalled frame (window drag, debugger)
/// produces one large step unless a maximum is configured.
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
    last: Instant,
    frame_index: u64,
    max_delta: Option<Duration>,
}

impl FrameClock {
    pub fn new(start: Instant) -> Self {
        Self {
            start,
            last: start,
            frame_index: 0,
            max_delta: None,
        }
    }

    pub fn with_max_delta(mut self, max_delta: Option<Duration>) -> Self {
        self.max_delta = max_delta;
        self
    }

    pub fn start(&self) -> Instant {
        self.start
    }

    /// Advances the clock to `now`.
    pub fn tick(&mut self, now: Instant) -> FrameTime {
        let mut delta = now.saturating_duration_since(self.last);
        if let Some(max) = self.max_delta {
            delta = delta.min(max);
        }
        self.last = now;

        let time = FrameTime {
            delta: delta.as_secs_f32(),
            elapsed: now.saturating_duration_since(self.start).as_secs_f32(),
            frame_index: self.frame_index,
        };
        self.frame_index = self.frame_index.wrapping_add(1);
        time
    }
}

/// Lifecycle of the render loop. `Stopped` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopState {
    #[default]
    Running,
    Stopped,
}

impl LoopState {
    pub fn is_running(self) -> bool {
        self == Self::Running
    }
}

/// Matrices rebuilt from scratch every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transforms {
    pub projection: Mat4,
    pub view: Mat4,
    pub model: Mat4,
    pub normal: Mat3,
}

impl Transforms {
    pub fn compute(camera: &Camera, aspect: f32, elapsed: f32) -> Self {
        let model = spin_model(elapsed);
        Self {
            projection: camera.projection_matrix(aspect, NEAR_PLANE, FAR_PLANE),
            view: camera.view_matrix(),
            model,
            normal: Mat3::from_mat4(model).inverse().transpose(),
        }
    }

    pub fn apply(&self, program: &mut impl ShaderProgram) {
        program.set("projection", self.projection.into());
        program.set("view", self.view.into());
        program.set("model", self.model.into());
        program.set("normalMatrix", self.normal.into());
    }
}

/// Continuous rotation of the cube after `elapsed` seconds.
pub fn spin_model(elapsed: f32) -> Mat4 {
    Mat4::from_axis_angle(
        SPIN_AXIS.normalize(),
        elapsed * SPIN_DEGREES_PER_SECOND.to_radians(),
    )
}

/// Everything the shader needs for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameParams {
    pub spotlight: Spotlight,
    pub material: Material,
    pub transforms: Transforms,
    pub view_position: Vec3,
}

impl FrameParams {
    /// Pure function of the camera, the surface aspect ratio and the
    /// elapsed time.
    pub fn compute(camera: &Camera, aspect: f32, elapsed: f32) -> Self {
        Self {
            spotlight: Spotlight::attached_to(camera),
            material: Material::CUBE,
            transforms: Transforms::compute(camera, aspect, elapsed),
            view_position: camera.position(),
        }
    }

    /// Pushes every parameter into `program` by name.
    pub fn apply(&self, program: &mut impl ShaderProgram) {
        self.spotlight.apply(program);
        self.material.apply(program);
        self.transforms.apply(program);
        program.set("viewPos", self.view_position.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shader::ParameterLog;

    #[test]
    fn tick_reports_time_since_previous_frame() {
        let start = Instant::now();
        let mut clock = FrameClock::new(start);
        let first = clock.tick(start + Duration::from_millis(16));
        assert!((first.delta - 0.016).abs() < 1e-6);
        assert_eq!(first.frame_index, 0);

        let second = clock.tick(start + Duration::from_millis(48));
        assert!((second.delta - 0.032).abs() < 1e-6);
        assert!((second.elapsed - 0.048).abs() < 1e-6);
        assert_eq!(second.frame_index, 1);
    }

    #[test]
    fn stalls_are_not_clamped_by_default() {
        let start = Instant::now();
        let mut clock = FrameClock::new(start);
        let time = clock.tick(start + Duration::from_secs(5));
        assert!((time.delta - 5.0).abs() < 1e-6);
    }

    #[test]
    fn optional_max_delta_caps_stalls() {
        let start = Instant::now();
        let mut clock = FrameClock::new(start).with_max_delta(Some(Duration::from_millis(100)));
        let time = clock.tick(start + Duration::from_secs(5));
        assert!((time.delta - 0.1).abs() < 1e-6);
        assert!((time.elapsed - 5.0).abs() < 1e-6);
    }

    #[test]
    fn time_going_backwards_yields_zero_delta() {
        let start = Instant::now();
        let mut clock = FrameClock::new(start + Duration::from_secs(1));
        let time = clock.tick(start);
        assert_eq!(time.delta, 0.0);
    }

    #[test]
    fn model_starts_unrotated_and_spins() {
        assert!(spin_model(0.0).abs_diff_eq(Mat4::IDENTITY, 1e-6));
        let axis = SPIN_AXIS.normalize();
        let rotated = spin_model(1.0);
        // Points on the axis are fixed by the rotation.
        assert!((rotated.transform_vector3(axis) - axis).length() < 1e-5);
        assert!(!rotated.abs_diff_eq(Mat4::IDENTITY, 1e-3));
    }

    #[test]
    fn normal_matrix_matches_rotation() {
        let transforms = Transforms::compute(&Camera::default(), 4.0 / 3.0, 2.5);
        let rotation = Mat3::from_mat4(transforms.model);
        assert!(transforms.normal.abs_diff_eq(rotation, 1e-5));
    }

    #[test]
    fn apply_pushes_every_named_parameter() {
        let params = FrameParams::compute(&Camera::default(), 800.0 / 600.0, 0.0);
        let mut log = ParameterLog::new();
        params.apply(&mut log);

        for name in [
            "material.diffuse",
            "material.specular",
            "material.shininess",
            "spotLight.position",
            "spotLight.direction",
            "spotLight.ambient",
            "spotLight.diffuse",
            "spotLight.specular",
            "spotLight.constant",
            "spotLight.linear",
            "spotLight.quadratic",
            "spotLight.cutOff",
            "spotLight.outerCutOff",
            "projection",
            "view",
            "model",
            "normalMatrix",
            "viewPos",
        ] {
            assert!(log.get(name).is_some(), "missing parameter {name}");
        }
        assert_eq!(log.len(), 18);
        assert_eq!(log.vec3("viewPos"), Some(Vec3::new(0.0, 0.0, 3.0)));
    }

    #[test]
    fn projection_tracks_zoom() {
        let mut camera = Camera::default();
        let wide = FrameParams::compute(&camera, 1.0, 0.0).transforms.projection;
        camera.process_mouse_scroll(20.0);
        let narrow = FrameParams::compute(&camera, 1.0, 0.0).transforms.projection;
        // A narrower field of view scales x/y up.
        assert!(narrow.x_axis.x > wide.x_axis.x);
        assert!(narrow.y_axis.y > wide.y_axis.y);
    }
}
