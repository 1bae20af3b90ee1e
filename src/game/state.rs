use serde::{Deserialize, Serialize};

use super::{direction::Direction, power_up::PowerUp, rail::RailMap};

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
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

    /// Move position in a direction; idle leaves it in place
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    /// Body segments, with head at index 0. Never empty.
    body: Vec<Position>,
}

impl Snake {
    /// A fresh single-segment snake
    pub fn new(head: Position) -> Self {
        Self { body: vec![head] }
    }

    /// Snake from explicit segments, head first. Returns `None` for an empty body.
    pub fn from_segments(body: Vec<Position>) -> Option<Self> {
        if body.is_empty() {
            return None;
        }
        Some(Self { body })
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    pub fn segments(&self) -> &[Position] {
        &self.body
    }

    /// Whether any segment, head and tail included, sits on `pos`
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    pub fn push_head(&mut self, head: Position) {
        self.body.insert(0, head);
    }

    /// Drops the tail segment, keeping at least the head
    pub fn pop_tail(&mut self) {
        if self.body.len() > 1 {
            self.body.pop();
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; kept for clippy's `len_without_is_empty`
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Complete state of one session.
///
/// Rebuilt wholesale on restart; only the engine mutates it.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub rail_map: RailMap,
    pub snake: Snake,
    pub food: Option<Position>,
    pub score: u32,
    pub current_direction: Direction,
    pub desired_direction: Direction,
    pub power_up: PowerUp,
    pub game_over: bool,
}

impl GameState {
    /// Create a new game state with an idle snake
    pub fn new(rail_map: RailMap, snake: Snake, food: Option<Position>) -> Self {
        Self {
            rail_map,
            snake,
            food,
            score: 0,
            current_direction: Direction::None,
            desired_direction: Direction::None,
            power_up: PowerUp::default(),
            game_over: false,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.current_direction.is_none()
    }
}
