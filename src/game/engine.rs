use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::{
    config::GameConfig,
    direction::Direction,
    error::GameError,
    food::spawn_food,
    rail::RailMap,
    state::{GameState, Position, Snake},
};

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// The next head position is off the grid
    OutOfBounds,
    /// The destination cell does not open back towards the head
    MissingLink,
    /// Snake ran into one of its own segments, tail included
    SelfCollision,
    /// No free rail cell left for food
    BoardFull,
}

/// Information about a step
#[derive(Debug, Clone, PartialEq)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Set on the step that ended the game
    pub end_reason: Option<EndReason>,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether the head advanced this step
    pub moved: bool,
    /// Whether the game has terminated
    pub terminated: bool,
    /// Additional information about the step
    pub info: StepInfo,
}

impl StepResult {
    fn idle() -> Self {
        Self {
            moved: false,
            terminated: false,
            info: StepInfo {
                ate_food: false,
                end_reason: None,
            },
        }
    }

    fn ended(moved: bool, ate_food: bool, reason: Option<EndReason>) -> Self {
        Self {
            moved,
            terminated: true,
            info: StepInfo {
                ate_food,
                end_reason: reason,
            },
        }
    }
}

/// Movement engine: builds fresh states and advances them one tick at a time.
///
/// The random source only feeds food placement; inject a seeded or mock
/// generator through [`GameEngine::with_rng`] for reproducible games.
pub struct GameEngine<R: Rng = StdRng> {
    config: GameConfig,
    rng: R,
}

impl GameEngine<StdRng> {
    /// Create a new game engine, seeded from the config when it carries a seed
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> GameEngine<R> {
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Swaps the configuration; takes effect on the next [`reset`](Self::reset)
    pub fn set_config(&mut self, config: GameConfig) {
        self.config = config;
    }

    /// Build a fresh game state: new rail map, idle snake on the first rail cell, first food
    pub fn reset(&mut self) -> Result<GameState, GameError> {
        self.config.validate()?;

        let (width, height) = (self.config.grid_width, self.config.grid_height);
        let rail_map = RailMap::generate(width, height);
        let spawn = rail_map
            .find_safe_spot(&[])
            .ok_or(GameError::NoSpawnPoint { width, height })?;

        let snake = Snake::new(spawn);
        let food = spawn_food(&rail_map, &snake, &mut self.rng);
        if food.is_none() {
            tracing::warn!(width, height, "no free rail cell for the first food");
        }

        Ok(GameState::new(rail_map, snake, food))
    }

    /// Execute one movement tick
    pub fn step(&mut self, state: &mut GameState) -> StepResult {
        if state.game_over {
            return StepResult::ended(false, false, None);
        }

        // Idle snakes only start once the head cell opens in the requested direction
        if state.is_idle() {
            if !head_allows(state, state.desired_direction) {
                return StepResult::idle();
            }
            state.current_direction = state.desired_direction;
        }

        state.power_up.tick();

        // Turn, reversal included, whenever the head cell permits it
        if state.desired_direction != state.current_direction
            && head_allows(state, state.desired_direction)
        {
            state.current_direction = state.desired_direction;
        }

        let new_head = state
            .snake
            .head()
            .moved_in_direction(state.current_direction);

        if let Some(reason) = check_collision(state, new_head) {
            state.game_over = true;
            return StepResult::ended(false, false, Some(reason));
        }

        state.snake.push_head(new_head);

        let ate_food = state.food == Some(new_head);
        if !ate_food {
            state.snake.pop_tail();
            return StepResult {
                moved: true,
                terminated: false,
                info: StepInfo {
                    ate_food,
                    end_reason: None,
                },
            };
        }

        state.score += 1;
        state.power_up.activate(self.config.power_up_duration);
        state.food = spawn_food(&state.rail_map, &state.snake, &mut self.rng);
        tracing::debug!(score = state.score, food = ?state.food, "food eaten");

        if state.food.is_none() {
            state.game_over = true;
            return StepResult::ended(true, true, Some(EndReason::BoardFull));
        }

        StepResult {
            moved: true,
            terminated: false,
            info: StepInfo {
                ate_food,
                end_reason: None,
            },
        }
    }
}

fn head_allows(state: &GameState, direction: Direction) -> bool {
    state
        .rail_map
        .exits(state.snake.head())
        .is_some_and(|exits| exits.allows(direction))
}

/// Check if moving the head onto `pos` ends the game.
///
/// The destination must open back towards the head, and must not hold any
/// current segment. The tail counts even though it would move away this tick.
fn check_collision(state: &GameState, pos: Position) -> Option<EndReason> {
    let Some(exits) = state.rail_map.exits(pos) else {
        return Some(EndReason::OutOfBounds);
    };

    if !exits.allows(state.current_direction.opposite()) {
        return Some(EndReason::MissingLink);
    }

    if state.snake.occupies(pos) {
        return Some(EndReason::SelfCollision);
    }

    None
}
