//! Headless collaborators
//!
//! Used by the native binary (no window toolkit) and by tests: a display that
//! records what it was asked to draw and replays scripted input, a media sink
//! that logs, and two clocks.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use super::{Clock, Display, InputState, Media, SurfaceHandle};
use crate::audio::SoundEffect;
use crate::error::PlatformError;
use crate::sim::{Rect, Rgba, Shape};

/// One recorded draw call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCall {
    pub shape: Shape,
    pub rect: Rect,
    pub color: Rgba,
}

/// Display without a window
#[derive(Debug, Default)]
pub struct HeadlessDisplay {
    /// Size of the created window, if any
    pub window: Option<(u32, u32)>,
    /// Draw calls since the last clear
    pub pending: Vec<DrawCall>,
    /// Draw calls of the last presented frame
    pub last_frame: Vec<DrawCall>,
    pub frames_presented: u64,
    /// Color of the last clear
    pub clear_color: Option<Rgba>,
    /// Input returned by successive polls; empty input once exhausted
    pub script: VecDeque<InputState>,
    /// Report quit after this many polls
    pub quit_after: Option<u64>,
    /// Make `create_window` fail
    pub fail_window: bool,
    polls: u64,
}

impl HeadlessDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_script(script: impl IntoIterator<Item = InputState>) -> Self {
        Self {
            script: script.into_iter().collect(),
            ..Self::default()
        }
    }

    /// A display whose `create_window` always fails
    pub fn failing() -> Self {
        Self {
            fail_window: true,
            ..Self::default()
        }
    }
}

impl Display for HeadlessDisplay {
    fn create_window(&mut self, width: u32, height: u32) -> Result<SurfaceHandle, PlatformError> {
        if self.fail_window {
            return Err(PlatformError::WindowCreation(format!(
                "headless display refused {width}x{height}"
            )));
        }
        self.window = Some((width, height));
        log::info!("Headless window {}x{}", width, height);
        Ok(SurfaceHandle(1))
    }

    fn clear(&mut self, _surface: SurfaceHandle, color: Rgba) {
        self.pending.clear();
        self.clear_color = Some(color);
    }

    fn draw_rect(&mut self, _surface: SurfaceHandle, rect: &Rect, color: Rgba) {
        self.pending.push(DrawCall {
            shape: Shape::Rect,
            rect: *rect,
            color,
        });
    }

    fn draw_ellipse(&mut self, _surface: SurfaceHandle, rect: &Rect, color: Rgba) {
        self.pending.push(DrawCall {
            shape: Shape::Ellipse,
            rect: *rect,
            color,
        });
    }

    fn present(&mut self, _surface: SurfaceHandle) {
        self.last_frame = std::mem::take(&mut self.pending);
        self.frames_presented += 1;
    }

    fn poll_input(&mut self) -> InputState {
        self.polls += 1;
        let mut input = self.script.pop_front().unwrap_or_default();
        if self.quit_after.is_some_and(|limit| self.polls >= limit) {
            input.quit = true;
        }
        input
    }
}

/// Media sink that logs and remembers what was played
#[derive(Debug, Default)]
pub struct LogMedia {
    pub played: Vec<SoundEffect>,
}

impl Media for LogMedia {
    fn play_sound(&mut self, sound: SoundEffect) {
        log::debug!("Sound: {:?}", sound);
        self.played.push(sound);
    }
}

/// Real-time pacing with `std::thread::sleep`
#[derive(Debug, Default)]
pub struct SleepClock {
    last: Option<Instant>,
}

impl Clock for SleepClock {
    fn tick(&mut self, target_fps: u32) -> u32 {
        let budget = Duration::from_secs_f64(1.0 / f64::from(target_fps.max(1)));
        let now = Instant::now();
        let Some(last) = self.last else {
            self.last = Some(now);
            return 0;
        };

        let spent = now.duration_since(last);
        if spent < budget {
            std::thread::sleep(budget - spent);
        }
        let now = Instant::now();
        self.last = Some(now);
        now.duration_since(last).as_millis() as u32
    }
}

/// Clock that never sleeps and always reports the same frame time
#[derive(Debug, Clone)]
pub struct FixedClock {
    pub elapsed_ms: u32,
    pub ticks: u64,
}

impl FixedClock {
    pub fn new(elapsed_ms: u32) -> Self {
        Self {
            elapsed_ms,
            ticks: 0,
        }
    }

    /// Frame time of the given rate, rounded down to whole milliseconds
    pub fn for_fps(fps: u32) -> Self {
        Self::new(1000 / fps.max(1))
    }
}

impl Clock for FixedClock {
    fn tick(&mut self, _target_fps: u32) -> u32 {
        self.ticks += 1;
        self.elapsed_ms
    }
}
