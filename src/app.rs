use std::time::Instant;

use glam::{DVec2, Vec3};
use log::{debug, info, trace};

use crate::camera::Camera;
use crate::config::AppConfig;
use crate::frame::{FrameClock, FrameParams, LoopState};
use crate::input::{InputState, KeyCode};

/// Input delivered by the windowing layer, already stripped of platform
/// types.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Absolute cursor position in window pixels.
    CursorMoved { x: f64, y: f64 },
    /// Vertical scroll in wheel lines; positive scrolls up.
    Scrolled { lines: f32 },
    Key { key: KeyCode, pressed: bool },
    /// Cursor capture was enabled (`true`) or released (`false`).
    CaptureChanged(bool),
    CloseRequested,
}

/// Render-thread state: the camera, the input tracker and the loop clock.
#[derive(Debug, Clone)]
pub struct App {
    camera: Camera,
    input: InputState,
    clock: FrameClock,
    state: LoopState,
    captured: bool,
}

impl App {
    pub fn new(config: &AppConfig, start: Instant) -> Self {
        let centre = DVec2::new(config.width as f64 / 2.0, config.height as f64 / 2.0);
        Self::with_camera(
            config,
            Camera::new(Vec3::new(0.0, 0.0, 3.0)),
            InputState::new(centre),
            start,
        )
    }

    pub fn with_camera(
        config: &AppConfig,
        camera: Camera,
        input: InputState,
        start: Instant,
    ) -> Self {
        Self {
            camera,
            input,
            clock: FrameClock::new(start).with_max_delta(config.max_frame_delta),
            state: LoopState::Running,
            captured: true,
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn is_captured(&self) -> bool {
        self.captured
    }

    /// Requests the transition to `Stopped`.
    pub fn stop(&mut self) {
        if self.state.is_running() {
            info!("render loop stopping");
        }
        self.state = LoopState::Stopped;
    }

    /// Applies one input event. Cursor motion is ignored while the cursor
    /// is not captured.
    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::CursorMoved { x, y } => {
                if !self.captured {
                    return;
                }
                let offset = self.input.cursor_moved(DVec2::new(x, y));
                self.camera.process_mouse_movement(offset.x, offset.y);
            }
            InputEvent::Scrolled { lines } => self.camera.process_mouse_scroll(lines),
            InputEvent::Key { key, pressed: true } => self.input.set_key_down(key),
            InputEvent::Key { key, pressed: false } => self.input.set_key_up(key),
            InputEvent::CaptureChanged(captured) => {
                debug!("cursor capture {}", if captured { "enabled" } else { "released" });
                self.captured = captured;
                if captured {
                    self.input.reset_cursor_tracking();
                } else {
                    self.input.release_all_keys();
                }
            }
            InputEvent::CloseRequested => self.stop(),
        }
    }

    /// Runs the CPU half of one iteration: advances the clock, applies the
    /// held keys with this frame's delta and computes the shader parameters.
    ///
    /// Returns `None` once the loop has stopped, including when the quit key
    /// is seen during this poll.
    pub fn begin_frame(&mut self, now: Instant, aspect: f32) -> Option<FrameParams> {
        if !self.state.is_running() {
            return None;
        }

        let time = self.clock.tick(now);

        if self.input.quit_requested() {
            self.stop();
            return None;
        }
        for movement in self.input.held_movements() {
            self.camera.process_keyboard(movement, time.delta);
        }

        trace!(
            "frame {} dt={:.4}s pos={:?}",
            time.frame_index,
            time.delta,
            self.camera.position()
        );
        Some(FrameParams::compute(&self.camera, aspect, time.elapsed))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn app_at(start: Instant) -> App {
        App::new(&AppConfig::default(), start)
    }

    #[test]
    fn held_key_moves_with_frame_delta() {
        let start = Instant::now();
        let mut app = app_at(start);
        app.handle_event(InputEvent::Key {
            key: KeyCode::letter('W'),
            pressed: true,
        });
        let params = app.begin_frame(start + Duration::from_secs(1), 4.0 / 3.0).unwrap();
        let expected = Vec3::new(0.0, 0.0, 3.0 - 2.5);
        assert!((app.camera().position() - expected).length() < 1e-5);
        assert_eq!(params.view_position, app.camera().position());
    }

    #[test]
    fn escape_stops_the_loop() {
        let start = Instant::now();
        let mut app = app_at(start);
        app.handle_event(InputEvent::Key {
            key: KeyCode::Escape,
            pressed: true,
        });
        assert!(app.begin_frame(start, 1.0).is_none());
        assert_eq!(app.state(), LoopState::Stopped);
        assert!(app.begin_frame(start + Duration::from_secs(1), 1.0).is_none());
    }

    #[test]
    fn close_request_is_terminal() {
        let mut app = app_at(Instant::now());
        app.handle_event(InputEvent::CloseRequested);
        assert!(!app.is_running());
    }

    #[test]
    fn cursor_is_ignored_while_released() {
        let mut app = app_at(Instant::now());
        app.handle_event(InputEvent::CaptureChanged(false));
        app.handle_event(InputEvent::CursorMoved { x: 10.0, y: 10.0 });
        app.handle_event(InputEvent::CursorMoved { x: 500.0, y: 10.0 });
        assert_eq!(app.camera().yaw(), 0.0);

        app.handle_event(InputEvent::CaptureChanged(true));
        app.handle_event(InputEvent::CursorMoved { x: 900.0, y: 10.0 });
        assert_eq!(app.camera().yaw(), 0.0);
        app.handle_event(InputEvent::CursorMoved { x: 910.0, y: 10.0 });
        assert!((app.camera().yaw() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn losing_capture_releases_held_keys() {
        let start = Instant::now();
        let mut app = app_at(start);
        app.handle_event(InputEvent::Key {
            key: KeyCode::letter('D'),
            pressed: true,
        });
        app.handle_event(InputEvent::CaptureChanged(false));
        app.begin_frame(start + Duration::from_secs(1), 1.0);
        assert_eq!(app.camera().position(), Vec3::new(0.0, 0.0, 3.0));
    }

    #[test]
    fn scroll_zooms() {
        let mut app = app_at(Instant::now());
        app.handle_event(InputEvent::Scrolled { lines: 10.0 });
        assert_eq!(app.camera().zoom(), 35.0);
    }
}
