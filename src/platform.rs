//! Translation from winit events to viewer input.

use glam::DVec2;
use log::warn;
use winit::event::{MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode as WinitKey, PhysicalKey};
use winit::window::{CursorGrabMode, Window};

use crate::app::InputEvent;
use crate::input::KeyCode;

/// Pixel scroll distance treated as one wheel notch.
pub const PIXELS_PER_LINE: f64 = 120.0;

/// Translates the window events the viewer reacts to.
///
/// Cursor motion is not taken from here: while the cursor is locked the
/// window stops reporting positions, see [`VirtualCursor`].
pub fn translate_window_event(event: &WindowEvent) -> Option<InputEvent> {
    match event {
        WindowEvent::KeyboardInput { event, .. } if !event.repeat => {
            let key = map_key(event.physical_key)?;
            Some(InputEvent::Key {
                key,
                pressed: event.state.is_pressed(),
            })
        }
        WindowEvent::MouseWheel { delta, .. } => Some(InputEvent::Scrolled {
            lines: scroll_lines(*delta),
        }),
        WindowEvent::CloseRequested => Some(InputEvent::CloseRequested),
        _ => None,
    }
}

pub fn map_key(key: PhysicalKey) -> Option<KeyCode> {
    let PhysicalKey::Code(code) = key else {
        return None;
    };
    Some(match code {
        WinitKey::Escape => KeyCode::Escape,
        WinitKey::KeyA => KeyCode::letter('A'),
        WinitKey::KeyD => KeyCode::letter('D'),
        WinitKey::KeyI => KeyCode::letter('I'),
        WinitKey::KeyJ => KeyCode::letter('J'),
        WinitKey::KeyK => KeyCode::letter('K'),
        WinitKey::KeyL => KeyCode::letter('L'),
        WinitKey::KeyQ => KeyCode::letter('Q'),
        WinitKey::KeyS => KeyCode::letter('S'),
        WinitKey::KeyW => KeyCode::letter('W'),
        _ => return None,
    })
}

pub fn scroll_lines(delta: MouseScrollDelta) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => y,
        MouseScrollDelta::PixelDelta(position) => (position.y / PIXELS_PER_LINE) as f32,
    }
}

/// Unbounded cursor position rebuilt from raw mouse motion.
///
/// A locked cursor never moves on screen, so the look input integrates
/// device deltas instead of reading window coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VirtualCursor {
    position: DVec2,
}

impl VirtualCursor {
    pub fn new(position: DVec2) -> Self {
        Self { position }
    }

    pub fn position(&self) -> DVec2 {
        self.position
    }

    /// Accumulates one raw motion delta and returns the resulting event.
    pub fn apply_motion(&mut self, dx: f64, dy: f64) -> InputEvent {
        self.position += DVec2::new(dx, dy);
        InputEvent::CursorMoved {
            x: self.position.x,
            y: self.position.y,
        }
    }
}

/// Hides and grabs the cursor, or gives it back to the desktop.
pub fn set_cursor_capture(window: &Window, capture: bool) {
    if capture {
        let grabbed = window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));
        if let Err(err) = grabbed {
            warn!("cursor grab unavailable: {err}");
        }
    } else if let Err(err) = window.set_cursor_grab(CursorGrabMode::None) {
        warn!("failed to release cursor: {err}");
    }
    window.set_cursor_visible(!capture);
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;
    use winit::keyboard::NativeKeyCode;

    #[test]
    fn maps_movement_and_quit_keys() {
        assert_eq!(
            map_key(PhysicalKey::Code(WinitKey::KeyW)),
            Some(KeyCode::Character('W'))
        );
        assert_eq!(
            map_key(PhysicalKey::Code(WinitKey::Escape)),
            Some(KeyCode::Escape)
        );
        assert_eq!(map_key(PhysicalKey::Code(WinitKey::F5)), None);
        assert_eq!(
            map_key(PhysicalKey::Unidentified(NativeKeyCode::Unidentified)),
            None
        );
    }

    #[test]
    fn scroll_deltas_become_lines() {
        assert_eq!(scroll_lines(MouseScrollDelta::LineDelta(0.0, 2.0)), 2.0);
        let pixels = MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, -240.0));
        assert_eq!(scroll_lines(pixels), -2.0);
    }

    #[test]
    fn virtual_cursor_integrates_motion() {
        let mut cursor = VirtualCursor::new(DVec2::new(400.0, 300.0));
        cursor.apply_motion(5.0, -3.0);
        let event = cursor.apply_motion(1.5, 0.5);
        assert_eq!(event, InputEvent::CursorMoved { x: 406.5, y: 297.5 });
        assert_eq!(cursor.position(), DVec2::new(406.5, 297.5));
    }
}
