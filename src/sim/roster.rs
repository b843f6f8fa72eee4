//! Game variants and their starting rosters
//!
//! Each variant is a fixed [`VariantConfig`]: field size, initial entities,
//! score gates, spawn rules and whether a loss can be replayed. Configs are
//! plain serde data and are validated before a world is built from them.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Body, EdgePolicy, Entity, Gravity};
use super::rect::Rect;
use crate::consts::*;
use crate::error::ConfigError;

/// The built-in games
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameVariant {
    /// Brick-breaker: a row of seven bricks plus a column of three
    Arkanoid,
    /// Paddle-and-ball with a single row of bricks
    Tennis,
    /// Side-scroller whose ground segments are destroyed and respawned
    Flappy,
    /// Side-scroller whose ground segments wrap around
    FlappyWrap,
}

impl GameVariant {
    pub const ALL: [GameVariant; 4] = [
        GameVariant::Arkanoid,
        GameVariant::Tennis,
        GameVariant::Flappy,
        GameVariant::FlappyWrap,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GameVariant::Arkanoid => "arkanoid",
            GameVariant::Tennis => "tennis",
            GameVariant::Flappy => "flappy",
            GameVariant::FlappyWrap => "flappy-wrap",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "arkanoid" | "bricks" => Some(GameVariant::Arkanoid),
            "tennis" | "tenis" => Some(GameVariant::Tennis),
            "flappy" | "flappybird" => Some(GameVariant::Flappy),
            "flappy-wrap" | "flappywrap" => Some(GameVariant::FlappyWrap),
            _ => None,
        }
    }

    pub fn config(&self) -> VariantConfig {
        match self {
            GameVariant::Arkanoid => {
                let mut bricks: Vec<(f32, f32)> =
                    (0..7).map(|i| (i as f32 * BRICK_PITCH, 0.0)).collect();
                let column_x = 6.0 * BRICK_PITCH;
                bricks.extend([(column_x, 40.0), (column_x, 120.0), (column_x, 300.0)]);
                paddle_game(self.as_str(), &bricks)
            }
            GameVariant::Tennis => {
                let bricks: Vec<(f32, f32)> =
                    (0..7).map(|i| (i as f32 * BRICK_PITCH, 0.0)).collect();
                paddle_game(self.as_str(), &bricks)
            }
            GameVariant::Flappy => scroller_game(self.as_str(), false),
            GameVariant::FlappyWrap => scroller_game(self.as_str(), true),
        }
    }
}

/// Pipe pairs appended while the pipe count is low
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PipePairRule {
    /// Spawn while fewer pipes than this are alive
    pub low_water: usize,
    /// Below this many pipes the new pair goes to `sparse_x`, else `dense_x`
    pub sparse_below: usize,
    pub sparse_x: f32,
    pub dense_x: f32,
    /// Inclusive range for the random vertical gap offset
    pub gap_offset_min: i32,
    pub gap_offset_max: i32,
    pub pipe_width: f32,
    pub pipe_height: f32,
    /// Distance between a pipe's anchored edge and the field edge
    pub backspace: f32,
    pub speed: f32,
}

impl PipePairRule {
    /// Top pipe, bottom pipe and the score gate between them
    pub fn pair_at(&self, left: f32, offset: f32, field_bottom: f32) -> (Entity, Entity, Rect) {
        let top = Rect::new(
            left,
            -(self.backspace - offset),
            self.pipe_width,
            self.pipe_height,
        );
        let mut bottom = Rect::new(left, 0.0, self.pipe_width, self.pipe_height);
        bottom.set_bottom(self.backspace + field_bottom + offset);

        let gap_height = (bottom.top - top.bottom()).max(0.0);
        let gate = Rect::new(left, top.bottom(), self.pipe_width, gap_height);

        (
            Entity::pipe(top, self.speed, EdgePolicy::Destroy),
            Entity::pipe(bottom, self.speed, EdgePolicy::Destroy),
            gate,
        )
    }
}

/// Ground segments appended while the segment count is low
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FloorRule {
    pub low_water: usize,
    pub spawn_x: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
}

impl FloorRule {
    pub fn segment_at(&self, left: f32, field_bottom: f32) -> Entity {
        let mut rect = Rect::new(left, 0.0, self.width, self.height);
        rect.set_bottom(field_bottom);
        Entity::floor(rect, self.speed, EdgePolicy::Destroy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SpawnRule {
    PipePairs(PipePairRule),
    FloorSegments(FloorRule),
}

/// Everything needed to build (and rebuild) a world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantConfig {
    pub name: String,
    pub width: f32,
    pub height: f32,
    /// A restart input after a loss resets the world instead of ending the session
    pub replay_on_loss: bool,
    /// Leftward speed of score gates
    pub gate_speed: f32,
    pub roster: Vec<Entity>,
    pub gates: Vec<Rect>,
    pub spawns: Vec<SpawnRule>,
}

impl VariantConfig {
    /// A field with nothing in it
    pub fn empty(name: &str, width: f32, height: f32) -> Self {
        Self {
            name: name.to_string(),
            width,
            height,
            replay_on_loss: false,
            gate_speed: 0.0,
            roster: Vec::new(),
            gates: Vec::new(),
            spawns: Vec::new(),
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject configurations the simulation cannot run
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
        {
            return Err(ConfigError::Playfield {
                width: self.width,
                height: self.height,
            });
        }
        check_speed("gate speed", self.gate_speed)?;

        for (i, entity) in self.roster.iter().enumerate() {
            let what = format!("{} roster entry {} ({:?})", self.name, i, entity.kind());
            check_rect(&what, &entity.rect)?;
            check_vec(&what, entity.vel)?;
            match entity.body {
                Body::Paddle { speed, .. } => check_speed(&what, speed)?,
                Body::Ball {
                    gravity: Some(gravity),
                } => {
                    for value in [gravity.step, gravity.speed_limit_y, gravity.jump_velocity] {
                        check_finite(&what, value)?;
                    }
                }
                Body::Pipe {
                    edge: EdgePolicy::Wrap { span },
                }
                | Body::Floor {
                    edge: EdgePolicy::Wrap { span },
                } => {
                    if !span.is_finite() || span <= 0.0 {
                        return Err(ConfigError::NonFinite {
                            what: format!("{what} wrap span"),
                        });
                    }
                }
                _ => {}
            }
        }
        if !self.roster.iter().any(Entity::is_ball) {
            return Err(ConfigError::NoBall(self.name.clone()));
        }

        for (i, gate) in self.gates.iter().enumerate() {
            check_rect(&format!("{} gate {}", self.name, i), gate)?;
        }

        for rule in &self.spawns {
            match rule {
                SpawnRule::PipePairs(rule) => {
                    if rule.low_water == 0 {
                        return Err(ConfigError::ZeroLowWater("pipe pairs".into()));
                    }
                    if rule.gap_offset_min > rule.gap_offset_max {
                        return Err(ConfigError::EmptyGapRange {
                            min: rule.gap_offset_min,
                            max: rule.gap_offset_max,
                        });
                    }
                    let pipe = Rect::new(rule.sparse_x, 0.0, rule.pipe_width, rule.pipe_height);
                    check_rect("pipe pair rule", &pipe)?;
                    check_finite("pipe pair dense_x", rule.dense_x)?;
                    check_finite("pipe pair backspace", rule.backspace)?;
                    check_speed("pipe pair speed", rule.speed)?;
                }
                SpawnRule::FloorSegments(rule) => {
                    if rule.low_water == 0 {
                        return Err(ConfigError::ZeroLowWater("floor segments".into()));
                    }
                    let segment = Rect::new(rule.spawn_x, 0.0, rule.width, rule.height);
                    check_rect("floor rule", &segment)?;
                    check_speed("floor speed", rule.speed)?;
                }
            }
        }
        Ok(())
    }
}

fn check_finite(what: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite {
            what: what.to_string(),
        })
    }
}

fn check_speed(what: &str, value: f32) -> Result<(), ConfigError> {
    check_finite(what, value)?;
    if value < 0.0 {
        return Err(ConfigError::Negative {
            what: what.to_string(),
        });
    }
    Ok(())
}

fn check_vec(what: &str, v: Vec2) -> Result<(), ConfigError> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite {
            what: format!("{what} velocity"),
        })
    }
}

fn check_rect(what: &str, rect: &Rect) -> Result<(), ConfigError> {
    if rect.is_well_formed() {
        Ok(())
    } else {
        Err(ConfigError::MalformedRect {
            what: what.to_string(),
            rect: *rect,
        })
    }
}

/// Paddle at the bottom center, ball a third of the way down, bricks as given
fn paddle_game(name: &str, bricks: &[(f32, f32)]) -> VariantConfig {
    let (w, h) = (PADDLE_FIELD_WIDTH, PADDLE_FIELD_HEIGHT);
    let mut config = VariantConfig::empty(name, w, h);
    config.replay_on_loss = true;

    config.roster.push(Entity::paddle(
        Rect::new(
            w / 2.0 - PADDLE_WIDTH / 2.0,
            h - PADDLE_HEIGHT,
            PADDLE_WIDTH,
            PADDLE_HEIGHT,
        ),
        PADDLE_SPEED,
    ));
    config.roster.push(Entity::ball(
        Rect::centered(Vec2::new(w / 2.0, h / 3.0), BALL_SIZE, BALL_SIZE),
        Vec2::new(BALL_START_SPEED, BALL_START_SPEED),
    ));
    for &(left, top) in bricks {
        config
            .roster
            .push(Entity::brick(Rect::new(left, top, BRICK_WIDTH, BRICK_HEIGHT)));
    }
    config
}

/// Background, ground, bird and a first pipe pair just off screen
fn scroller_game(name: &str, wrap_floor: bool) -> VariantConfig {
    let (w, h) = (SCROLLER_FIELD_WIDTH, SCROLLER_FIELD_HEIGHT);
    let mut config = VariantConfig::empty(name, w, h);
    config.gate_speed = SCROLL_SPEED;

    let pipes = PipePairRule {
        low_water: 6,
        sparse_below: 4,
        sparse_x: 1600.0,
        dense_x: 1200.0,
        gap_offset_min: -300,
        gap_offset_max: 100,
        pipe_width: PIPE_WIDTH,
        pipe_height: PIPE_HEIGHT,
        backspace: PIPE_BACKSPACE,
        speed: SCROLL_SPEED,
    };
    let floor = FloorRule {
        low_water: 3,
        spawn_x: w,
        width: FLOOR_WIDTH,
        height: FLOOR_HEIGHT,
        speed: SCROLL_SPEED,
    };

    let bounds = config.bounds();
    config.roster.push(Entity::background(bounds));

    if wrap_floor {
        // Enough segments to cover the field plus one scrolling in
        let segments = (w / FLOOR_WIDTH).ceil() as usize + 1;
        let span = segments as f32 * FLOOR_WIDTH;
        for i in 0..segments {
            let mut segment = floor.segment_at(i as f32 * FLOOR_WIDTH, h);
            segment.body = Body::Floor {
                edge: EdgePolicy::Wrap { span },
            };
            config.roster.push(segment);
        }
    } else {
        config.roster.push(floor.segment_at(0.0, h));
        config.roster.push(floor.segment_at(w / 2.0, h));
        config.spawns.push(SpawnRule::FloorSegments(floor));
    }

    config.roster.push(Entity::gravity_ball(
        Rect::centered(Vec2::new(w / 2.0, h / 2.0), BIRD_WIDTH, BIRD_HEIGHT),
        Gravity {
            step: GRAVITY_STEP,
            speed_limit_y: FALL_SPEED_LIMIT,
            jump_velocity: JUMP_VELOCITY,
        },
    ));

    let (top, bottom, gate) = pipes.pair_at(800.0, 0.0, h);
    config.roster.push(top);
    config.roster.push(bottom);
    config.gates.push(gate);
    config.spawns.push(SpawnRule::PipePairs(pipes));
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::EntityKind;

    fn count(config: &VariantConfig, kind: EntityKind) -> usize {
        config.roster.iter().filter(|e| e.kind() == kind).count()
    }

    #[test]
    fn test_all_variants_validate() {
        for variant in GameVariant::ALL {
            variant.config().validate().unwrap();
            assert_eq!(GameVariant::from_name(variant.as_str()), Some(variant));
        }
    }

    #[test]
    fn test_brick_rosters() {
        let arkanoid = GameVariant::Arkanoid.config();
        assert_eq!(count(&arkanoid, EntityKind::Brick), 10);
        assert_eq!(count(&arkanoid, EntityKind::Paddle), 1);
        assert!(arkanoid.replay_on_loss);

        let tennis = GameVariant::Tennis.config();
        assert_eq!(count(&tennis, EntityKind::Brick), 7);
        assert!(tennis.gates.is_empty());
    }

    #[test]
    fn test_paddle_starts_at_bottom_center() {
        let config = GameVariant::Tennis.config();
        let paddle = &config.roster[0];
        assert_eq!(paddle.rect, Rect::new(360.0, 620.0, 80.0, 20.0));
        let ball = &config.roster[1];
        assert_eq!(ball.rect.center().x, 400.0);
        assert_eq!(ball.vel, Vec2::new(5.0, 5.0));
    }

    #[test]
    fn test_pipe_pair_geometry() {
        let config = GameVariant::Flappy.config();
        let SpawnRule::PipePairs(rule) = config.spawns[1] else {
            panic!("expected pipe rule last");
        };
        let (top, bottom, gate) = rule.pair_at(800.0, -100.0, 640.0);
        assert_eq!(top.rect.top, -450.0);
        assert_eq!(bottom.rect.bottom(), 890.0);
        assert_eq!(gate.top, top.rect.bottom());
        assert_eq!(gate.bottom(), bottom.rect.top);
        assert_eq!(gate.left, 800.0);
    }

    #[test]
    fn test_wrapping_floor_covers_field() {
        let config = GameVariant::FlappyWrap.config();
        assert_eq!(count(&config, EntityKind::Floor), 3);
        assert!(
            config
                .spawns
                .iter()
                .all(|s| !matches!(s, SpawnRule::FloorSegments(_)))
        );
        let covered: f32 = config
            .roster
            .iter()
            .filter(|e| e.kind() == EntityKind::Floor)
            .map(|e| e.rect.width)
            .sum();
        assert!(covered >= config.width + FLOOR_WIDTH);
    }

    #[test]
    fn test_negative_width_rejected() {
        let mut config = GameVariant::Tennis.config();
        config.roster[2].rect.width = -80.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MalformedRect { .. })
        ));
    }

    #[test]
    fn test_missing_ball_rejected() {
        let mut config = GameVariant::Arkanoid.config();
        config.roster.retain(|e| !e.is_ball());
        assert!(matches!(config.validate(), Err(ConfigError::NoBall(_))));
    }

    #[test]
    fn test_bad_field_and_gap_rejected() {
        let config = VariantConfig::empty("zero", 0.0, 640.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Playfield { .. })
        ));

        let mut config = GameVariant::Flappy.config();
        if let SpawnRule::PipePairs(rule) = &mut config.spawns[1] {
            rule.gap_offset_min = 50;
            rule.gap_offset_max = -50;
        }
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyGapRange { .. })
        ));
    }

    #[test]
    fn test_json_round_trip_keeps_validation() {
        let json = GameVariant::Arkanoid.config().to_json().unwrap();
        let parsed = VariantConfig::from_json(&json).unwrap();
        assert_eq!(parsed, GameVariant::Arkanoid.config());

        assert!(VariantConfig::from_json("{ not json").is_err());
    }
}
