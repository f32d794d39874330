//! Input handling for the windowed driver.
//!
//! `Input` condenses raw winit window events into what the scatter effect
//! reacts to: left-click positions (spread triggers) and a small set of
//! hotkeys. Clicks accumulate between frames and are drained once per
//! frame by the driver; key presses are edge-triggered and cleared at
//! frame end.

use std::collections::HashSet;

use glam::Vec2;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Hotkeys the driver responds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Toggle pause.
    Space,
    /// Quit.
    Escape,
    /// Toggle the audio mute flag.
    M,
    /// Save a canvas snapshot.
    S,
}

impl Key {
    fn from_code(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Space => Some(Key::Space),
            KeyCode::Escape => Some(Key::Escape),
            KeyCode::KeyM => Some(Key::M),
            KeyCode::KeyS => Some(Key::S),
            _ => None,
        }
    }
}

/// Per-frame input state derived from window events.
#[derive(Debug, Default)]
pub struct Input {
    cursor: Vec2,
    clicks: Vec<Vec2>,
    pressed: HashSet<Key>,
}

impl Input {
    /// Create empty input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one window event.
    pub fn process_window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Vec2::new(position.x as f32, position.y as f32);
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                self.clicks.push(self.cursor);
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed && !event.repeat {
                    if let PhysicalKey::Code(code) = event.physical_key {
                        if let Some(key) = Key::from_code(code) {
                            self.pressed.insert(key);
                        }
                    }
                }
            }
            _ => {}
        }
    }

    /// Last known cursor position in window pixel coordinates.
    #[inline]
    pub fn cursor(&self) -> Vec2 {
        self.cursor
    }

    /// Whether a hotkey was pressed since the last frame.
    #[inline]
    pub fn key_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    /// Take the left-click positions accumulated since the last frame.
    pub fn take_clicks(&mut self) -> Vec<Vec2> {
        std::mem::take(&mut self.clicks)
    }

    /// Clear edge-triggered state. Call at the end of each frame.
    pub fn end_frame(&mut self) {
        self.pressed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clicks_land_at_the_cursor_and_drain_once() {
        let mut input = Input::new();

        // Simulate a move + click via direct state manipulation (normally
        // done via process_window_event).
        input.cursor = Vec2::new(120.0, 80.0);
        input.clicks.push(input.cursor);

        assert_eq!(input.cursor(), Vec2::new(120.0, 80.0));
        assert_eq!(input.take_clicks(), vec![Vec2::new(120.0, 80.0)]);
        assert!(input.take_clicks().is_empty(), "clicks drain once");
    }

    #[test]
    fn test_end_frame_clears_keys_but_not_clicks() {
        let mut input = Input::new();
        input.pressed.insert(Key::Space);
        input.clicks.push(Vec2::new(1.0, 2.0));

        assert!(input.key_pressed(Key::Space));
        input.end_frame();
        assert!(!input.key_pressed(Key::Space));
        assert_eq!(input.take_clicks().len(), 1);
    }

    #[test]
    fn test_key_mapping_covers_hotkeys_only() {
        assert_eq!(Key::from_code(KeyCode::Space), Some(Key::Space));
        assert_eq!(Key::from_code(KeyCode::Escape), Some(Key::Escape));
        assert_eq!(Key::from_code(KeyCode::KeyM), Some(Key::M));
        assert_eq!(Key::from_code(KeyCode::KeyS), Some(Key::S));
        assert_eq!(Key::from_code(KeyCode::KeyQ), None);
    }
}
