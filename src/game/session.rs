//! Game loop orchestrator
//!
//! A [`GameSession`] owns the one [`GameState`] of a session and sequences the
//! engine on behalf of a host scheduler. The host calls [`GameSession::tick`]
//! at the movement cadence and [`GameSession::on_second`] once per second;
//! the session decides whether those ticks do anything. Nothing here owns a
//! timer, so tests drive it synchronously.

use rand::Rng;
use rand::rngs::StdRng;
use serde::Serialize;

use super::{
    config::GameConfig,
    direction::Direction,
    engine::{EndReason, GameEngine},
    error::GameError,
    power_up::PowerUp,
    rail::RailMap,
    state::{GameState, Position},
};

/// Where a session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionPhase {
    /// Built, waiting for an explicit or implicit start
    Ready,
    /// Tick sources armed
    Running,
    /// Game over; only a reset leaves this phase
    Over,
}

/// What the host should do after a movement tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Tick sources are not armed; nothing changed
    Stopped,
    /// Armed, but the snake is waiting for a usable direction
    Idle,
    /// State advanced; draw it
    Render,
    /// The session just ended. Reported once.
    GameOver { score: u32, reason: EndReason },
}

/// Read-only view of a session for renderers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub snake: Vec<Position>,
    pub food: Option<Position>,
    pub score: u32,
    pub direction: Direction,
    pub power_up: PowerUp,
    pub power_up_intensity: f32,
    pub phase: SessionPhase,
    pub game_over: bool,
    pub elapsed_secs: u64,
}

pub struct GameSession<R: Rng = StdRng> {
    engine: GameEngine<R>,
    state: GameState,
    phase: SessionPhase,
    elapsed_secs: u64,
    end_reason: Option<EndReason>,
}

impl GameSession<StdRng> {
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        Self::with_engine(GameEngine::new(config))
    }
}

impl<R: Rng> GameSession<R> {
    /// Build a session around an engine, e.g. one with an injected random source
    pub fn with_engine(mut engine: GameEngine<R>) -> Result<Self, GameError> {
        let state = engine.reset()?;
        log_new_session(&state);

        Ok(Self {
            engine,
            state,
            phase: SessionPhase::Ready,
            elapsed_secs: 0,
            end_reason: None,
        })
    }

    pub fn config(&self) -> &GameConfig {
        self.engine.config()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn rail_map(&self) -> &RailMap {
        &self.state.rail_map
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    pub fn end_reason(&self) -> Option<EndReason> {
        self.end_reason
    }

    /// Arms both tick sources. Returns true only if this call armed them.
    pub fn start(&mut self) -> bool {
        if self.phase != SessionPhase::Ready {
            return false;
        }
        self.phase = SessionPhase::Running;
        tracing::info!("session started");
        true
    }

    /// Disarms both tick sources. Idempotent.
    pub fn stop(&mut self) {
        if self.phase == SessionPhase::Running {
            self.phase = SessionPhase::Ready;
            tracing::debug!("session stopped");
        }
    }

    /// Latches the most recent direction request.
    ///
    /// Starts a session that has not started yet; ignored once the game is over.
    pub fn request_direction(&mut self, direction: Direction) {
        if self.phase == SessionPhase::Over {
            tracing::trace!(?direction, "direction ignored after game over");
            return;
        }
        self.start();
        self.state.desired_direction = direction;
    }

    /// One movement tick
    pub fn tick(&mut self) -> TickOutcome {
        if !self.is_running() {
            return TickOutcome::Stopped;
        }

        let result = self.engine.step(&mut self.state);

        if result.terminated {
            let reason = result.info.end_reason.unwrap_or(EndReason::MissingLink);
            self.phase = SessionPhase::Over;
            self.end_reason = Some(reason);
            tracing::info!(
                score = self.state.score,
                length = self.state.snake.len(),
                elapsed_secs = self.elapsed_secs,
                ?reason,
                "game over"
            );
            return TickOutcome::GameOver {
                score: self.state.score,
                reason,
            };
        }

        if result.moved {
            TickOutcome::Render
        } else {
            TickOutcome::Idle
        }
    }

    /// One-second tick of the duration counter
    pub fn on_second(&mut self) {
        if self.is_running() {
            self.elapsed_secs += 1;
        }
    }

    /// Replaces the session with a fresh one. Nothing is armed afterwards.
    pub fn reset(&mut self) -> Result<(), GameError> {
        self.stop();
        self.state = self.engine.reset()?;
        self.phase = SessionPhase::Ready;
        self.elapsed_secs = 0;
        self.end_reason = None;
        log_new_session(&self.state);
        Ok(())
    }

    /// Resets with new grid dimensions. The old session is kept if they are invalid.
    pub fn resize(&mut self, width: usize, height: usize) -> Result<(), GameError> {
        let config = GameConfig {
            grid_width: width,
            grid_height: height,
            ..self.engine.config().clone()
        };
        config.validate()?;

        self.engine.set_config(config);
        self.reset()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            snake: self.state.snake.segments().to_vec(),
            food: self.state.food,
            score: self.state.score,
            direction: self.state.current_direction,
            power_up: self.state.power_up,
            power_up_intensity: self.state.power_up.intensity(self.state.score),
            phase: self.phase,
            game_over: self.state.game_over,
            elapsed_secs: self.elapsed_secs,
        }
    }
}

fn log_new_session(state: &GameState) {
    tracing::info!(
        width = state.rail_map.width(),
        height = state.rail_map.height(),
        spawn = ?state.snake.head(),
        food = ?state.food,
        "new session"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::mock::StepRng;

    fn session() -> GameSession {
        GameSession::with_engine(GameEngine::with_rng(
            GameConfig::small(),
            StdRng::seed_from_u64(3),
        ))
        .unwrap()
    }

    #[test]
    fn test_new_session_is_ready() {
        let session = session();
        assert_eq!(session.phase(), SessionPhase::Ready);
        assert_eq!(session.elapsed_secs(), 0);
        assert_eq!(session.state().snake.head(), Position::new(1, 1));
    }

    #[test]
    fn test_ticks_ignored_until_started() {
        let mut session = session();
        session.state.desired_direction = Direction::Right;

        assert_eq!(session.tick(), TickOutcome::Stopped);
        session.on_second();

        assert_eq!(session.state().snake.head(), Position::new(1, 1));
        assert_eq!(session.elapsed_secs(), 0);
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut session = session();
        assert!(session.start());
        assert!(!session.start());

        session.request_direction(Direction::Right);
        assert_eq!(session.tick(), TickOutcome::Render);

        // One external tick, one cell
        assert_eq!(session.state().snake.head(), Position::new(2, 1));
    }

    #[test]
    fn test_direction_request_starts_session() {
        let mut session = session();
        session.request_direction(Direction::Down);
        assert!(session.is_running());

        session.tick();
        assert_eq!(session.state().snake.head(), Position::new(1, 2));
    }

    #[test]
    fn test_blocked_direction_stays_idle() {
        let mut session = session();
        session.request_direction(Direction::Left);

        assert_eq!(session.tick(), TickOutcome::Idle);
        assert_eq!(session.state().snake.head(), Position::new(1, 1));
        assert!(session.state().is_idle());
    }

    #[test]
    fn test_last_request_wins() {
        let mut session = session();
        session.request_direction(Direction::Right);
        session.request_direction(Direction::Up);
        session.request_direction(Direction::Down);

        session.tick();
        assert_eq!(session.state().snake.head(), Position::new(1, 2));
        assert_eq!(session.state().current_direction, Direction::Down);
    }

    #[test]
    fn test_game_over_reported_once() {
        let mut session = session();
        // Row 1 dead-ends against the frame at (8, 1)
        session.request_direction(Direction::Right);

        let mut outcomes = Vec::new();
        for _ in 0..20 {
            outcomes.push(session.tick());
        }

        let game_overs: Vec<_> = outcomes
            .iter()
            .filter(|outcome| matches!(outcome, TickOutcome::GameOver { .. }))
            .collect();
        assert_eq!(game_overs.len(), 1);
        assert_eq!(session.phase(), SessionPhase::Over);
        assert_eq!(*outcomes.last().unwrap(), TickOutcome::Stopped);
        assert!(session.snapshot().game_over);
    }

    #[test]
    fn test_game_over_freezes_session() {
        let mut session = session();
        session.request_direction(Direction::Right);
        while !matches!(session.tick(), TickOutcome::GameOver { .. }) {}

        let before = session.snapshot();
        session.request_direction(Direction::Left);
        session.on_second();
        session.tick();

        assert_eq!(session.snapshot(), before);
        assert_eq!(session.end_reason(), Some(EndReason::MissingLink));
        assert!(!session.start());
    }

    #[test]
    fn test_elapsed_counter() {
        let mut session = session();
        session.start();
        session.on_second();
        session.on_second();
        assert_eq!(session.elapsed_secs(), 2);

        session.stop();
        session.stop();
        session.on_second();
        assert_eq!(session.elapsed_secs(), 2);
    }

    #[test]
    fn test_reset_disarms_and_rebuilds() {
        let mut session = session();
        session.request_direction(Direction::Right);
        session.tick();
        session.on_second();

        session.reset().unwrap();

        assert_eq!(session.phase(), SessionPhase::Ready);
        assert_eq!(session.elapsed_secs(), 0);
        assert_eq!(session.state().snake.segments(), &[Position::new(1, 1)]);
        assert_eq!(session.state().desired_direction, Direction::None);
        assert_eq!(session.tick(), TickOutcome::Stopped);
    }

    #[test]
    fn test_reset_after_game_over() {
        let mut session = session();
        session.request_direction(Direction::Right);
        while !matches!(session.tick(), TickOutcome::GameOver { .. }) {}

        session.reset().unwrap();
        assert_eq!(session.end_reason(), None);
        assert!(!session.snapshot().game_over);
        assert!(session.start());
    }

    #[test]
    fn test_resize() {
        let mut session = session();
        session.resize(19, 13).unwrap();
        assert_eq!(session.rail_map().width(), 19);
        assert_eq!(session.rail_map().height(), 13);
        assert_eq!(session.config().grid_width, 19);

        assert!(matches!(
            session.resize(2, 40),
            Err(GameError::GridTooSmall { .. })
        ));
        assert_eq!(session.rail_map().width(), 19);
    }

    #[test]
    fn test_snapshot_after_eating() {
        // All-zero random source: first food lands on (2, 1)
        let mut session =
            GameSession::with_engine(GameEngine::with_rng(GameConfig::small(), StepRng::new(0, 0)))
                .unwrap();
        assert_eq!(session.snapshot().food, Some(Position::new(2, 1)));

        session.request_direction(Direction::Right);
        session.tick();

        let snapshot = session.snapshot();
        assert_eq!(snapshot.score, 1);
        assert_eq!(snapshot.snake, vec![Position::new(2, 1), Position::new(1, 1)]);
        assert_eq!(snapshot.food, Some(Position::new(3, 1)));
        assert_eq!(snapshot.direction, Direction::Right);
        assert!(snapshot.power_up.active);
        assert_eq!(snapshot.power_up_intensity, 1.0 / 50.0);
        assert_eq!(snapshot.phase, SessionPhase::Running);
    }
}
