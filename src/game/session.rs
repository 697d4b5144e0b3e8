use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::info;

use super::{
    action::{Direction, TurnVerdict},
    clock::SimulationClock,
    config::WorldConfig,
    error::WorldError,
    state::Position,
    world::{SnakeWorld, StepOutcome},
};

/// What one frame did to the world
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameReport {
    /// Present when the clock fired and the world stepped
    pub step: Option<StepOutcome>,
    /// Where the food sits after the frame
    pub food: Position,
}

/// One game session: a clock driving a world, frame by frame
pub struct GameSession<R = StdRng> {
    clock: SimulationClock,
    world: SnakeWorld<R>,
}

impl GameSession<StdRng> {
    pub fn new(config: &WorldConfig, seed: Option<u64>) -> Result<Self, WorldError> {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> GameSession<R> {
    pub fn with_rng(config: &WorldConfig, rng: R) -> Result<Self, WorldError> {
        let session = Self::from_world(config, SnakeWorld::with_rng(config, rng)?)?;
        info!(
            width = config.grid_width,
            height = config.grid_height,
            tick = config.tick_interval_secs,
            "session started"
        );
        Ok(session)
    }

    /// Drive an already-built world with the configured clock
    pub fn from_world(config: &WorldConfig, world: SnakeWorld<R>) -> Result<Self, WorldError> {
        Ok(Self {
            clock: SimulationClock::new(config.tick_interval_secs)?,
            world,
        })
    }

    /// Forward a turn request to the world; it takes effect on the next tick
    pub fn request_direction(&mut self, direction: Direction) -> TurnVerdict {
        self.world.request_direction(direction)
    }

    /// Run one frame: advance the clock, step the world if a tick fired, then
    /// make sure food is on the board.
    pub fn frame(&mut self, delta_secs: f32) -> Result<FrameReport, WorldError> {
        let step = self.clock.advance(delta_secs).then(|| self.world.step());
        let food = self.world.ensure_food_placed()?;
        Ok(FrameReport { step, food })
    }

    pub fn world(&self) -> &SnakeWorld<R> {
        &self.world
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::state::Snake;

    fn scenario(snake: Snake, food: Option<Position>) -> GameSession {
        let config = WorldConfig::small();
        let world =
            SnakeWorld::from_parts(&config, snake, food, StdRng::seed_from_u64(3)).unwrap();
        GameSession::from_world(&config, world).unwrap()
    }

    #[test]
    fn test_first_frame_places_food() {
        let mut session = GameSession::new(&WorldConfig::small(), Some(9)).unwrap();

        let report = session.frame(0.016).unwrap();

        assert_eq!(report.step, None);
        assert_eq!(session.world().food(), Some(report.food));
        assert_ne!(report.food, session.world().head());
    }

    #[test]
    fn test_steps_only_when_clock_fires() {
        let mut session = scenario(Snake::new(Position::new(5, 5), Direction::Right), None);

        assert!(session.frame(0.1).unwrap().step.is_none());
        assert_eq!(session.world().head(), Position::new(5, 5));

        let report = session.frame(0.1).unwrap();
        assert_eq!(report.step.map(|s| s.head), Some(Position::new(6, 5)));
        assert_eq!(session.world().ticks(), 1);
    }

    #[test]
    fn test_long_frame_steps_once() {
        let mut session = scenario(Snake::new(Position::new(5, 5), Direction::Right), None);

        session.frame(3.0).unwrap();

        assert_eq!(session.world().ticks(), 1);
        assert_eq!(session.world().head(), Position::new(6, 5));
    }

    #[test]
    fn test_turn_applies_on_next_tick() {
        let mut session = scenario(Snake::new(Position::new(5, 5), Direction::Right), None);

        assert!(session.request_direction(Direction::Down).is_accepted());
        assert!(!session.request_direction(Direction::Up).is_accepted());
        assert_eq!(session.world().head(), Position::new(5, 5));

        session.frame(0.2).unwrap();
        assert_eq!(session.world().head(), Position::new(5, 6));
    }

    #[test]
    fn test_capture_then_replace_food_same_frame() {
        let mut session = scenario(
            Snake::new(Position::new(5, 5), Direction::Right),
            Some(Position::new(6, 5)),
        );

        let report = session.frame(0.2).unwrap();

        assert!(report.step.is_some_and(|s| s.ate_food));
        assert_eq!(session.world().segment_count(), 1);
        assert_ne!(report.food, Position::new(6, 5));
        assert_eq!(session.world().food(), Some(report.food));
    }

    #[test]
    fn test_infeasible_board_surfaces_error() {
        let mut session = GameSession::new(&WorldConfig::new(1, 1), Some(0)).unwrap();

        assert!(matches!(
            session.frame(0.016),
            Err(WorldError::InfeasiblePlacement { .. })
        ));
    }

    #[test]
    fn test_rejects_bad_tick_interval() {
        let config = WorldConfig {
            tick_interval_secs: -1.0,
            ..WorldConfig::small()
        };
        assert!(GameSession::new(&config, None).is_err());
    }
}
