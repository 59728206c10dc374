//! Input state tracking and translation of window events into sandbox events

use std::collections::HashSet;
use winit::event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::core::types::Vec2;

/// Pixels of touchpad scrolling treated as one wheel line
const PIXELS_PER_LINE: f32 = 40.0;

/// Discrete input delivered to the sandbox, in delivery order.
///
/// Pointer coordinates are normalized device coordinates: x right, y up, both in [-1, 1].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    PointerMove { ndc: Vec2 },
    PointerDown { ndc: Vec2, button: MouseButton },
    KeyDown(KeyCode),
    KeyUp(KeyCode),
    /// The window lost focus; held keys will not report their release
    FocusLost,
}

/// Tracks keyboard and mouse input state
pub struct InputState {
    /// Current mouse position in physical pixels
    mouse_position: (f32, f32),
    /// Mouse movement since last frame while a button is held
    drag_delta: (f32, f32),
    /// Scroll lines since last frame
    scroll_delta: f32,
    /// Currently pressed mouse buttons
    mouse_buttons: HashSet<MouseButton>,
    /// Viewport size in physical pixels
    viewport: (f32, f32),
}

impl InputState {
    /// Create new input state for a viewport of the given size
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            mouse_position: (0.0, 0.0),
            drag_delta: (0.0, 0.0),
            scroll_delta: 0.0,
            mouse_buttons: HashSet::new(),
            viewport: (width.max(1) as f32, height.max(1) as f32),
        }
    }

    /// Process a window event, returning the sandbox event it produces, if any
    pub fn process_event(&mut self, event: &WindowEvent) -> Option<InputEvent> {
        match event {
            WindowEvent::KeyboardInput {
                event: KeyEvent {
                    physical_key: PhysicalKey::Code(key_code),
                    state,
                    ..
                },
                ..
            } => self.key(*state, *key_code),
            WindowEvent::CursorMoved { position, .. } => {
                Some(self.cursor_moved(position.x as f32, position.y as f32))
            }
            WindowEvent::MouseInput { state, button, .. } => self.mouse_button(*state, *button),
            WindowEvent::MouseWheel { delta, .. } => {
                self.scroll_by(match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / PIXELS_PER_LINE,
                });
                None
            }
            WindowEvent::Resized(size) => {
                self.set_viewport(size.width, size.height);
                None
            }
            WindowEvent::Focused(false) => {
                self.mouse_buttons.clear();
                Some(InputEvent::FocusLost)
            }
            _ => None,
        }
    }

    /// Record a cursor move in physical pixels
    pub fn cursor_moved(&mut self, x: f32, y: f32) -> InputEvent {
        if !self.mouse_buttons.is_empty() {
            self.drag_delta.0 += x - self.mouse_position.0;
            self.drag_delta.1 += y - self.mouse_position.1;
        }
        self.mouse_position = (x, y);
        InputEvent::PointerMove { ndc: self.pointer_ndc() }
    }

    /// Record a mouse button transition. Only presses produce events.
    pub fn mouse_button(&mut self, state: ElementState, button: MouseButton) -> Option<InputEvent> {
        match state {
            ElementState::Pressed => {
                self.mouse_buttons.insert(button);
                Some(InputEvent::PointerDown { ndc: self.pointer_ndc(), button })
            }
            ElementState::Released => {
                self.mouse_buttons.remove(&button);
                None
            }
        }
    }

    /// Translate a key transition
    pub fn key(&self, state: ElementState, key_code: KeyCode) -> Option<InputEvent> {
        match state {
            ElementState::Pressed => Some(InputEvent::KeyDown(key_code)),
            ElementState::Released => Some(InputEvent::KeyUp(key_code)),
        }
    }

    /// Record wheel movement in lines
    pub fn scroll_by(&mut self, lines: f32) {
        self.scroll_delta += lines;
    }

    /// Call at end of frame to reset per-frame state
    pub fn end_frame(&mut self) {
        self.drag_delta = (0.0, 0.0);
        self.scroll_delta = 0.0;
    }

    /// Update the viewport size (call on window resize)
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport = (width.max(1) as f32, height.max(1) as f32);
    }

    /// Convert a pixel position to normalized device coordinates
    pub fn to_ndc(&self, x: f32, y: f32) -> Vec2 {
        Vec2::new(
            (x / self.viewport.0) * 2.0 - 1.0,
            -(y / self.viewport.1) * 2.0 + 1.0,
        )
    }

    /// Current pointer position in normalized device coordinates
    pub fn pointer_ndc(&self) -> Vec2 {
        self.to_ndc(self.mouse_position.0, self.mouse_position.1)
    }

    /// Check if mouse button is pressed
    pub fn is_mouse_button_pressed(&self, button: MouseButton) -> bool {
        self.mouse_buttons.contains(&button)
    }

    /// Pointer movement in pixels since last frame while any button is held
    pub fn drag_delta(&self) -> (f32, f32) {
        self.drag_delta
    }

    /// Scroll lines since last frame (positive away from the user)
    pub fn scroll_delta(&self) -> f32 {
        self.scroll_delta
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ndc_corners() {
        let input = InputState::new(800, 600);
        assert_eq!(input.to_ndc(0.0, 0.0), Vec2::new(-1.0, 1.0));
        assert_eq!(input.to_ndc(800.0, 600.0), Vec2::new(1.0, -1.0));
        assert_eq!(input.to_ndc(400.0, 300.0), Vec2::ZERO);
    }

    #[test]
    fn test_cursor_move_reports_ndc() {
        let mut input = InputState::new(200, 100);
        let event = input.cursor_moved(150.0, 25.0);
        assert_eq!(event, InputEvent::PointerMove { ndc: Vec2::new(0.5, 0.5) });
    }

    #[test]
    fn test_press_reports_last_cursor_position() {
        let mut input = InputState::new(200, 100);
        input.cursor_moved(100.0, 50.0);
        let event = input.mouse_button(ElementState::Pressed, MouseButton::Left);
        assert_eq!(
            event,
            Some(InputEvent::PointerDown { ndc: Vec2::ZERO, button: MouseButton::Left })
        );
        assert!(input.is_mouse_button_pressed(MouseButton::Left));
        assert_eq!(input.mouse_button(ElementState::Released, MouseButton::Left), None);
        assert!(!input.is_mouse_button_pressed(MouseButton::Left));
    }

    #[test]
    fn test_drag_delta_only_while_button_held() {
        let mut input = InputState::new(200, 100);
        input.cursor_moved(10.0, 10.0);
        input.cursor_moved(20.0, 10.0);
        assert_eq!(input.drag_delta(), (0.0, 0.0));

        input.mouse_button(ElementState::Pressed, MouseButton::Right);
        input.cursor_moved(25.0, 13.0);
        assert_eq!(input.drag_delta(), (5.0, 3.0));

        input.end_frame();
        assert_eq!(input.drag_delta(), (0.0, 0.0));
    }

    #[test]
    fn test_key_transitions() {
        let input = InputState::new(1, 1);
        assert_eq!(
            input.key(ElementState::Pressed, KeyCode::ShiftLeft),
            Some(InputEvent::KeyDown(KeyCode::ShiftLeft))
        );
        assert_eq!(
            input.key(ElementState::Released, KeyCode::ShiftLeft),
            Some(InputEvent::KeyUp(KeyCode::ShiftLeft))
        );
    }

    #[test]
    fn test_focus_loss_releases_buttons() {
        let mut input = InputState::new(100, 100);
        input.mouse_button(ElementState::Pressed, MouseButton::Right);
        assert_eq!(input.process_event(&WindowEvent::Focused(false)), Some(InputEvent::FocusLost));
        assert!(!input.is_mouse_button_pressed(MouseButton::Right));

        input.cursor_moved(30.0, 0.0);
        assert_eq!(input.drag_delta(), (0.0, 0.0));
    }

    #[test]
    fn test_resize_updates_viewport() {
        let mut input = InputState::new(100, 100);
        let event = WindowEvent::Resized(winit::dpi::PhysicalSize::new(400, 200));
        assert_eq!(input.process_event(&event), None);
        assert_eq!(input.to_ndc(400.0, 200.0), Vec2::new(1.0, -1.0));
    }
}
