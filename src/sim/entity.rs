//! Simulation entities
//!
//! One struct for every object in a world, with the per-kind data carried by
//! the closed [`Body`] enum. Entities never see the world: each tick they get
//! the play-field bounds and the tick input, and report what happened through
//! [`Advance`] so the world can react.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::draw::{DrawCommand, Shape, colors};
use super::rect::Rect;
use super::tick::TickInput;

/// Which way the paddle was pushed on its last advance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    #[default]
    None,
}

/// Vertical acceleration for gravity balls (per-tick units)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gravity {
    /// Added to vy every tick without a jump
    pub step: f32,
    /// Terminal fall speed
    pub speed_limit_y: f32,
    /// vy applied instantly on a jump
    pub jump_velocity: f32,
}

/// What happens to a scrolling obstacle once it is fully off the left edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EdgePolicy {
    /// Removed from the world
    Destroy,
    /// Moved right by `span` (the length of the segment strip)
    Wrap { span: f32 },
}

/// Kind-specific entity data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Body {
    Paddle {
        speed: f32,
        last_direction: Direction,
    },
    Ball {
        gravity: Option<Gravity>,
    },
    Brick,
    Pipe {
        edge: EdgePolicy,
    },
    Floor {
        edge: EdgePolicy,
    },
    Background,
}

/// Field-less tag for [`Body`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Paddle,
    Ball,
    Brick,
    Pipe,
    Floor,
    Background,
}

/// Result of advancing one entity by one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Steady,
    /// A wall-bound ball dropped past the bottom edge
    FellOut,
    /// A scrolling obstacle wrapped back to the right
    Wrapped,
    /// A scrolling obstacle left the field and is now dead
    LeftField,
}

/// A simulated object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Assigned by the world; 0 for roster templates
    pub id: u32,
    pub rect: Rect,
    /// Per-tick velocity (zero for static kinds)
    pub vel: Vec2,
    pub alive: bool,
    pub body: Body,
}

impl Entity {
    fn with_body(rect: Rect, vel: Vec2, body: Body) -> Self {
        Self {
            id: 0,
            rect,
            vel,
            alive: true,
            body,
        }
    }

    pub fn paddle(rect: Rect, speed: f32) -> Self {
        Self::with_body(
            rect,
            Vec2::ZERO,
            Body::Paddle {
                speed,
                last_direction: Direction::None,
            },
        )
    }

    /// A wall-bounded ball (brick and tennis games)
    pub fn ball(rect: Rect, vel: Vec2) -> Self {
        Self::with_body(rect, vel, Body::Ball { gravity: None })
    }

    /// A gravity-driven ball (the scroller's bird)
    pub fn gravity_ball(rect: Rect, gravity: Gravity) -> Self {
        Self::with_body(
            rect,
            Vec2::ZERO,
            Body::Ball {
                gravity: Some(gravity),
            },
        )
    }

    pub fn brick(rect: Rect) -> Self {
        Self::with_body(rect, Vec2::ZERO, Body::Brick)
    }

    pub fn pipe(rect: Rect, speed: f32, edge: EdgePolicy) -> Self {
        Self::with_body(rect, Vec2::new(-speed, 0.0), Body::Pipe { edge })
    }

    pub fn floor(rect: Rect, speed: f32, edge: EdgePolicy) -> Self {
        Self::with_body(rect, Vec2::new(-speed, 0.0), Body::Floor { edge })
    }

    pub fn background(rect: Rect) -> Self {
        Self::with_body(rect, Vec2::ZERO, Body::Background)
    }

    pub fn kind(&self) -> EntityKind {
        match self.body {
            Body::Paddle { .. } => EntityKind::Paddle,
            Body::Ball { .. } => EntityKind::Ball,
            Body::Brick => EntityKind::Brick,
            Body::Pipe { .. } => EntityKind::Pipe,
            Body::Floor { .. } => EntityKind::Floor,
            Body::Background => EntityKind::Background,
        }
    }

    #[inline]
    pub fn is_ball(&self) -> bool {
        matches!(self.body, Body::Ball { .. })
    }

    /// Paddle direction at the end of its last advance (None for non-paddles)
    pub fn last_direction(&self) -> Direction {
        match self.body {
            Body::Paddle { last_direction, .. } => last_direction,
            _ => Direction::None,
        }
    }

    /// Advance one tick. `scale` is `dt / SIM_DT`, 1.0 for a regular tick.
    pub fn advance(&mut self, scale: f32, input: &TickInput, bounds: &Rect) -> Advance {
        match &mut self.body {
            Body::Paddle {
                speed,
                last_direction,
            } => {
                let direction = match (input.move_left, input.move_right) {
                    (true, false) => Direction::Left,
                    (false, true) => Direction::Right,
                    _ => Direction::None,
                };
                *last_direction = direction;

                let dx = match direction {
                    Direction::Left => -*speed,
                    Direction::Right => *speed,
                    Direction::None => 0.0,
                } * scale;
                self.vel = Vec2::new(dx, 0.0);
                self.rect.left += dx;
                self.rect = self.rect.clamp_x_into(bounds);
                Advance::Steady
            }

            Body::Ball { gravity: None } => {
                self.rect.translate(self.vel * scale);

                let mut result = Advance::Steady;
                if self.rect.top < bounds.top {
                    self.rect.top = bounds.top;
                    self.vel.y = -self.vel.y;
                }
                if self.rect.bottom() > bounds.bottom() {
                    result = Advance::FellOut;
                }
                if self.rect.left < bounds.left {
                    self.rect.left = bounds.left;
                    self.vel.x = -self.vel.x;
                }
                if self.rect.right() > bounds.right() {
                    self.rect.set_right(bounds.right());
                    self.vel.x = -self.vel.x;
                }
                result
            }

            Body::Ball {
                gravity: Some(gravity),
            } => {
                if input.jump {
                    self.vel.y = gravity.jump_velocity;
                } else if self.vel.y < gravity.speed_limit_y {
                    self.vel.y = (self.vel.y + gravity.step * scale).min(gravity.speed_limit_y);
                }

                self.rect.translate(self.vel * scale);

                if self.rect.top < bounds.top {
                    self.rect.top = bounds.top;
                    self.vel.y = 0.0;
                }
                // Ground contact rests the ball; hazards decide the outcome
                if self.rect.bottom() > bounds.bottom() {
                    self.rect.set_bottom(bounds.bottom());
                    self.vel.y = 0.0;
                }
                Advance::Steady
            }

            Body::Pipe { edge } | Body::Floor { edge } => {
                let edge = *edge;
                self.rect.translate(self.vel * scale);

                if self.rect.right() < bounds.left {
                    match edge {
                        EdgePolicy::Destroy => {
                            self.alive = false;
                            return Advance::LeftField;
                        }
                        EdgePolicy::Wrap { span } => {
                            self.rect.left += span;
                            return Advance::Wrapped;
                        }
                    }
                }
                Advance::Steady
            }

            Body::Brick | Body::Background => Advance::Steady,
        }
    }

    /// What the display should draw for this entity
    pub fn render_intent(&self) -> DrawCommand {
        let (shape, color, layer) = match self.body {
            Body::Background => (Shape::Rect, colors::SKY, 0),
            Body::Brick => (Shape::Rect, colors::BRICK, 1),
            Body::Pipe { .. } => (Shape::Rect, colors::PIPE, 1),
            Body::Paddle { .. } => (Shape::Rect, colors::PADDLE, 2),
            Body::Ball { gravity: None } => (Shape::Ellipse, colors::BALL, 2),
            Body::Ball { gravity: Some(_) } => (Shape::Ellipse, colors::BIRD, 2),
            Body::Floor { .. } => (Shape::Rect, colors::FLOOR, 3),
        };
        DrawCommand {
            shape,
            rect: self.rect,
            color,
            layer,
        }
    }
}
