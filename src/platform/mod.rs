//! Platform abstraction layer
//!
//! The simulation never talks to a window, speaker or timer directly. A
//! front end supplies these collaborators:
//! - `Display`: window, drawing, presentation and input polling
//! - `Media`: fire-and-forget sound playback
//! - `Clock`: frame pacing

pub mod headless;

use std::collections::HashSet;

use crate::audio::SoundEffect;
use crate::error::PlatformError;
use crate::sim::{Rect, Rgba};

pub use headless::{FixedClock, HeadlessDisplay, LogMedia, SleepClock};

/// Opaque handle to a window surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceHandle(pub u32);

/// Keys the games listen to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Left,
    Right,
    Up,
    Space,
    Enter,
    Escape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
}

/// Snapshot of the input devices for one frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    /// Window close requested
    pub quit: bool,
    pub keys_held: HashSet<KeyCode>,
    pub mouse_buttons_held: HashSet<MouseButton>,
}

impl InputState {
    pub fn with_keys(keys: &[KeyCode]) -> Self {
        Self {
            keys_held: keys.iter().copied().collect(),
            ..Default::default()
        }
    }

    #[inline]
    pub fn held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    /// Held now but not in `previous`
    pub fn pressed(&self, previous: &InputState, key: KeyCode) -> bool {
        self.held(key) && !previous.held(key)
    }

    pub fn clicked(&self, previous: &InputState, button: MouseButton) -> bool {
        self.mouse_buttons_held.contains(&button)
            && !previous.mouse_buttons_held.contains(&button)
    }
}

/// Window, drawing and input
pub trait Display {
    fn create_window(&mut self, width: u32, height: u32) -> Result<SurfaceHandle, PlatformError>;
    fn clear(&mut self, surface: SurfaceHandle, color: Rgba);
    fn draw_rect(&mut self, surface: SurfaceHandle, rect: &Rect, color: Rgba);
    fn draw_ellipse(&mut self, surface: SurfaceHandle, rect: &Rect, color: Rgba);
    fn present(&mut self, surface: SurfaceHandle);
    fn poll_input(&mut self) -> InputState;
}

/// Sound playback
pub trait Media {
    fn play_sound(&mut self, sound: SoundEffect);
}

/// Frame pacing
pub trait Clock {
    /// Block until the frame budget for `target_fps` has elapsed; returns the
    /// milliseconds since the previous call
    fn tick(&mut self, target_fps: u32) -> u32;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pressed_is_edge_triggered() {
        let before = InputState::default();
        let now = InputState::with_keys(&[KeyCode::Up]);
        assert!(now.pressed(&before, KeyCode::Up));
        assert!(!now.pressed(&now, KeyCode::Up));
        assert!(!now.pressed(&before, KeyCode::Space));
    }

    #[test]
    fn test_clicked_is_edge_triggered() {
        let before = InputState::default();
        let mut now = InputState::default();
        now.mouse_buttons_held.insert(MouseButton::Left);
        assert!(now.clicked(&before, MouseButton::Left));
        assert!(!now.clicked(&now, MouseButton::Left));
    }
}
