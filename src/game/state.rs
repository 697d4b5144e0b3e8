use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::action::Direction;
use super::error::ConfigError;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// Fixed grid extents, in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    width: i32,
    height: i32,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyGrid { width, height });
        }
        let to_extent = |extent: usize| {
            i32::try_from(extent).map_err(|_| ConfigError::GridTooLarge { extent })
        };

        Ok(Self {
            width: to_extent(width)?,
            height: to_extent(height)?,
        })
    }

    pub fn width(&self) -> usize {
        self.width as usize
    }

    pub fn height(&self) -> usize {
        self.height as usize
    }

    pub fn area(&self) -> usize {
        self.width() * self.height()
    }

    /// Check if a position is within the grid bounds
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    /// Bring a position that stepped at most one cell off an edge back in
    /// through the opposite edge. Returns the wrapped position and whether
    /// any axis wrapped.
    pub fn wrap(&self, pos: Position) -> (Position, bool) {
        let wrap_axis = |value: i32, extent: i32| {
            if value >= extent {
                0
            } else if value < 0 {
                extent - 1
            } else {
                value
            }
        };

        let wrapped = Position::new(wrap_axis(pos.x, self.width), wrap_axis(pos.y, self.height));
        (wrapped, wrapped != pos)
    }

    /// Every cell, row by row
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Position::new(x, y)))
    }
}

/// The snake: a head plus a chain of body segments
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    head: Position,
    direction: Direction,
    /// Body segments, nearest to the head first
    segments: VecDeque<Position>,
}

impl Snake {
    /// Create a body-less snake
    pub fn new(head: Position, direction: Direction) -> Self {
        Self {
            head,
            direction,
            segments: VecDeque::new(),
        }
    }

    /// Create a snake with an existing body, nearest segment first
    pub fn with_segments(
        head: Position,
        direction: Direction,
        segments: impl IntoIterator<Item = Position>,
    ) -> Self {
        Self {
            head,
            direction,
            segments: segments.into_iter().collect(),
        }
    }

    pub fn head(&self) -> Position {
        self.head
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub(crate) fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    pub(crate) fn set_head(&mut self, head: Position) {
        self.head = head;
    }

    /// Body segments, nearest to the head first
    pub fn segments(&self) -> impl ExactSizeIterator<Item = Position> + '_ {
        self.segments.iter().copied()
    }

    /// Number of body segments (head excluded)
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn has_body(&self) -> bool {
        !self.segments.is_empty()
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.segments.contains(&pos)
    }

    /// Check if a position is occupied by the head or any segment
    pub fn occupies(&self, pos: Position) -> bool {
        self.head == pos || self.collides_with_body(pos)
    }

    /// Relocate the tail segment onto `vacated` and make it the segment
    /// nearest the head. Returns the cell the tail left, or `None` for a
    /// body-less snake.
    pub(crate) fn shift_body(&mut self, vacated: Position) -> Option<Position> {
        let old_tail = self.segments.pop_back()?;
        self.segments.push_front(vacated);
        Some(old_tail)
    }

    /// Append a segment at the tail end
    pub(crate) fn grow_tail(&mut self, pos: Position) {
        self.segments.push_back(pos);
    }
}
