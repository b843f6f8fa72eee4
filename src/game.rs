//! The game loop
//!
//! One iteration = clock tick, input poll, one simulation tick, audio, one
//! render pass. A quit request clears `running`; the iteration that saw it
//! still completes and the loop stops before the next one.

use crate::audio::AudioManager;
use crate::consts::{SIM_DT, SIM_FPS};
use crate::error::ArcadeError;
use crate::platform::{Clock, Display, InputState, KeyCode, Media, MouseButton, SurfaceHandle};
use crate::renderer::render_frame;
use crate::settings::Settings;
use crate::sim::{Outcome, TickInput, VariantConfig, World, WorldEvents, autopilot};

/// How a session went
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub frames: u64,
    pub score: u32,
    pub outcome: Outcome,
    /// Restarts after a loss
    pub resets: u32,
}

/// Translate raw device state into tick signals
pub fn map_input(now: &InputState, previous: &InputState) -> TickInput {
    let pressed = |key| now.pressed(previous, key);
    TickInput {
        move_left: now.held(KeyCode::Left),
        move_right: now.held(KeyCode::Right),
        jump: pressed(KeyCode::Up)
            || pressed(KeyCode::Space)
            || now.clicked(previous, MouseButton::Left),
        restart: pressed(KeyCode::Space) || pressed(KeyCode::Enter),
    }
}

/// Game instance holding the world and its collaborators
pub struct Game<D: Display, M: Media, C: Clock> {
    world: World,
    display: D,
    surface: SurfaceHandle,
    audio: AudioManager<M>,
    clock: C,
    settings: Settings,
    running: bool,
    previous_input: InputState,
    frames: u64,
    resets: u32,
}

impl<D: Display, M: Media, C: Clock> Game<D, M, C> {
    /// Build the world and open its window
    pub fn new(
        config: VariantConfig,
        seed: u64,
        mut display: D,
        media: M,
        clock: C,
        settings: Settings,
    ) -> Result<Self, ArcadeError> {
        settings.validate()?;
        let world = World::new(config, seed)?;
        let surface = display.create_window(
            world.bounds.width.round() as u32,
            world.bounds.height.round() as u32,
        )?;

        Ok(Self {
            world,
            display,
            surface,
            audio: AudioManager::new(media, &settings),
            clock,
            settings,
            running: true,
            previous_input: InputState::default(),
            frames: 0,
            resets: 0,
        })
    }

    /// Run one loop iteration
    pub fn step(&mut self) -> WorldEvents {
        let elapsed = self.clock.tick(SIM_FPS);
        let budget_ms = 1000 / SIM_FPS;
        if elapsed > budget_ms * 2 {
            log::debug!("Frame took {}ms (budget {}ms)", elapsed, budget_ms);
        }

        let raw = self.display.poll_input();
        if raw.quit || raw.held(KeyCode::Escape) {
            log::info!("Quit requested");
            self.running = false;
        }

        let input = if self.settings.autopilot {
            autopilot::suggest(&self.world)
        } else {
            map_input(&raw, &self.previous_input)
        };
        self.previous_input = raw;

        // The clock paces the loop at SIM_FPS, so one tick per frame is real time
        let events = self.world.tick(&input, SIM_DT);
        self.audio.react(&events);

        if events.restarted {
            self.resets += 1;
        }
        if events.died && !self.world.config.replay_on_loss {
            log::info!("Session over");
            self.running = false;
        }

        render_frame(&mut self.display, self.surface, &self.world);
        self.frames += 1;
        events
    }

    /// Loop until quit, a final loss, or the frame budget runs out
    pub fn run(&mut self) -> SessionSummary {
        while self.running {
            if self
                .settings
                .max_frames
                .is_some_and(|limit| self.frames >= limit)
            {
                log::info!("Frame budget of {} reached", self.frames);
                break;
            }
            self.step();
        }

        let summary = self.summary();
        log::info!(
            "Session '{}' ended: {:?}, score {}, {} frames, {} resets",
            self.world.config.name,
            summary.outcome,
            summary.score,
            summary.frames,
            summary.resets
        );
        summary
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            frames: self.frames,
            score: self.world.score,
            outcome: self.world.outcome,
            resets: self.resets,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn audio(&self) -> &AudioManager<M> {
        &self.audio
    }
}
