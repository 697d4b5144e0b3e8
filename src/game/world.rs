use std::collections::HashSet;

use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{debug, trace, warn};

use super::{
    action::{Direction, TurnVerdict},
    config::{FoodPlacement, WorldConfig},
    error::{ConfigError, WorldError},
    state::{Grid, Position, Snake},
};

/// What happened during one discrete step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepOutcome {
    /// Head cell before the move
    pub previous_head: Position,
    /// Head cell after the move and wrap
    pub head: Position,
    /// Whether the head re-entered from the opposite edge
    pub wrapped: bool,
    /// Whether the snake ate food this step
    pub ate_food: bool,
}

/// The simulation world: grid, snake and food.
///
/// State changes only through [`request_direction`](Self::request_direction),
/// [`step`](Self::step) and [`ensure_food_placed`](Self::ensure_food_placed);
/// everything else is a read-only query.
pub struct SnakeWorld<R = StdRng> {
    grid: Grid,
    snake: Snake,
    food: Option<Position>,
    food_placement: FoodPlacement,
    max_placement_attempts: u32,
    direction_set: bool,
    ticks: u64,
    rng: R,
}

impl SnakeWorld<StdRng> {
    /// Create a world seeded from system entropy
    pub fn new(config: &WorldConfig) -> Result<Self, WorldError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create a world whose food placement replays for a given seed
    pub fn seeded(config: &WorldConfig, seed: u64) -> Result<Self, WorldError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> SnakeWorld<R> {
    /// Create a world with a body-less snake at the configured start cell
    pub fn with_rng(config: &WorldConfig, rng: R) -> Result<Self, WorldError> {
        let snake = Snake::new(config.start, config.start_direction);
        Self::from_parts(config, snake, None, rng)
    }

    /// Create a world from an existing snake and food, e.g. to set up a
    /// specific scenario. The snake's head and every segment must be on the
    /// grid.
    pub fn from_parts(
        config: &WorldConfig,
        snake: Snake,
        food: Option<Position>,
        rng: R,
    ) -> Result<Self, WorldError> {
        let grid = config.validate()?;
        for pos in std::iter::once(snake.head()).chain(snake.segments()).chain(food) {
            if !grid.contains(pos) {
                return Err(ConfigError::StartOutsideGrid {
                    start: pos,
                    width: grid.width(),
                    height: grid.height(),
                }
                .into());
            }
        }

        Ok(Self {
            grid,
            snake,
            food,
            food_placement: config.food_placement,
            max_placement_attempts: config.max_placement_attempts,
            direction_set: false,
            ticks: 0,
            rng,
        })
    }

    /// Ask the snake to turn before the next step.
    ///
    /// Only the first accepted request per tick takes effect. A request for
    /// the current heading, or a reversal while the snake has a body, is
    /// ignored. A body-less snake may reverse freely.
    pub fn request_direction(&mut self, direction: Direction) -> TurnVerdict {
        let current = self.snake.direction();

        let verdict = if self.direction_set {
            TurnVerdict::AlreadyChanged
        } else if direction == current {
            TurnVerdict::Unchanged
        } else if direction.is_opposite(current) && self.snake.has_body() {
            TurnVerdict::Reversal
        } else {
            self.direction_set = true;
            self.snake.set_direction(direction);
            TurnVerdict::Accepted
        };

        if verdict.is_accepted() {
            debug!(from = ?current, to = ?direction, "direction changed");
        } else {
            trace!(?direction, ?verdict, "direction request ignored");
        }
        verdict
    }

    /// Advance the world by one tick
    pub fn step(&mut self) -> StepOutcome {
        // Move
        let previous_head = self.snake.head();
        let moved = previous_head.moved_in_direction(self.snake.direction());

        // Wrap
        let (head, wrapped) = self.grid.wrap(moved);
        self.snake.set_head(head);

        // Shift body: the tail jumps into the cell the head just left
        let vacated_tail = self.snake.shift_body(previous_head);

        // Capture: the tail stays where it was, so the body gains one
        // segment right behind the head
        let ate_food = self.food == Some(head);
        if ate_food {
            self.snake.grow_tail(vacated_tail.unwrap_or(previous_head));
            self.food = None;
            debug!(
                x = head.x,
                y = head.y,
                segments = self.snake.segment_count(),
                "food captured"
            );
        }

        self.direction_set = false;
        self.ticks += 1;

        trace!(tick = self.ticks, x = head.x, y = head.y, wrapped, "step");

        StepOutcome {
            previous_head,
            head,
            wrapped,
            ate_food,
        }
    }

    /// Place food on a random admissible cell if none is present. Returns the
    /// food position.
    pub fn ensure_food_placed(&mut self) -> Result<Position, WorldError> {
        if let Some(food) = self.food {
            return Ok(food);
        }

        let blocked = self.blocked_cells();
        let free = self.grid.area() - blocked.len();
        if free == 0 {
            warn!(
                width = self.grid.width(),
                height = self.grid.height(),
                "no free cell left for food"
            );
            return Err(WorldError::InfeasiblePlacement {
                width: self.grid.width(),
                height: self.grid.height(),
                occupied: blocked.len(),
            });
        }

        let width = self.grid.width() as i32;
        let height = self.grid.height() as i32;
        let sampled = (0..self.max_placement_attempts).find_map(|_| {
            let pos = Position::new(self.rng.gen_range(0..width), self.rng.gen_range(0..height));
            (!blocked.contains(&pos)).then_some(pos)
        });

        let food = match sampled {
            Some(pos) => pos,
            None => {
                let candidates: Vec<Position> =
                    self.grid.cells().filter(|pos| !blocked.contains(pos)).collect();
                debug!(
                    candidates = candidates.len(),
                    "sampling cap reached, picking among free cells"
                );
                candidates[self.rng.gen_range(0..candidates.len())]
            }
        };

        self.food = Some(food);
        debug!(x = food.x, y = food.y, "food placed");
        Ok(food)
    }

    /// Cells the placement policy rules out
    fn blocked_cells(&self) -> HashSet<Position> {
        let mut blocked = HashSet::from([self.snake.head()]);
        if self.food_placement == FoodPlacement::AvoidSnake {
            blocked.extend(self.snake.segments());
        }
        blocked
    }
}

impl<R> SnakeWorld<R> {
    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn head(&self) -> Position {
        self.snake.head()
    }

    pub fn direction(&self) -> Direction {
        self.snake.direction()
    }

    /// Body segments, nearest to the head first
    pub fn segments(&self) -> impl ExactSizeIterator<Item = Position> + '_ {
        self.snake.segments()
    }

    /// Segments a renderer should draw: any segment sharing the head's cell
    /// is hidden under the head.
    pub fn visible_segments(&self) -> impl Iterator<Item = Position> + '_ {
        let head = self.snake.head();
        self.snake.segments().filter(move |&pos| pos != head)
    }

    pub fn segment_count(&self) -> usize {
        self.snake.segment_count()
    }

    pub fn food(&self) -> Option<Position> {
        self.food
    }

    /// Number of steps taken so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Whether a direction change has already been accepted this tick
    pub fn direction_set(&self) -> bool {
        self.direction_set
    }
}
