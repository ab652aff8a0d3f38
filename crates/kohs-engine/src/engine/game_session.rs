use std::{
    fmt,
    time::{Duration, Instant},
};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{Board, GridSize};

use super::{
    board_shuffler::shuffle_board,
    completion::boards_match,
    game_metrics::GameMetrics,
    interaction::{DragState, Interaction, InteractionEngine, PointerEvent},
    pattern_generator::{Difficulty, generate_pattern},
    random::{BoardSeed, RandomSource},
    recorder::{GameType, SessionId, SessionMetrics, SessionRecorder},
};

/// Settings for a single puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameConfig {
    pub grid: GridSize,
    pub difficulty: Difficulty,
    /// Pointer travel (in surface units) that turns a press into a drag.
    pub drag_threshold: f32,
    /// How long the solved board stays on screen before the game finishes.
    #[serde(with = "duration_millis")]
    pub completion_delay: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid: GridSize::Sixteen,
            difficulty: Difficulty::Easy,
            drag_threshold: 1.0,
            completion_delay: Duration::from_millis(1500),
        }
    }
}

mod duration_millis {
    use std::time::Duration;

    use serde::{Deserialize as _, Deserializer, Serializer};

    pub(super) fn serialize<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

/// Lifecycle of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum GameState {
    /// Accepting gestures.
    Playing,
    /// Solved; the confirmation delay is running and gestures are ignored.
    Completed { completed_at: Instant },
    /// The confirmation delay has elapsed; the caller may navigate away.
    Finished,
}

/// Change notifications delivered to observers after each applied event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameNotification {
    /// The player board was replaced.
    BoardChanged(Interaction),
    /// A press started, moved, ended or was cancelled without changing the board.
    DragChanged(Interaction),
    /// The player board now matches the target.
    Completed(SessionMetrics),
    /// The confirmation delay has elapsed.
    Finished,
    /// A new puzzle was dealt.
    Restarted,
}

type Observer = Box<dyn FnMut(&GameNotification)>;

/// One Kohs puzzle from start to finish.
///
/// A game owns the hidden target, the player board, the gesture state, the
/// metrics and the session recorder. Every event runs to completion in
/// [`apply`](Self::apply): the interaction engine replaces the player board,
/// the board is evaluated against the target, and observers are notified.
///
/// # Game Flow
///
/// 1. [`start`](Self::start) generates a target, shuffles the player board,
///    resets the metrics and opens a recorder session
/// 2. The front-end feeds hit-tested [`PointerEvent`]s to [`apply`](Self::apply)
/// 3. When the boards match, the recorder session is completed once and the
///    game enters [`GameState::Completed`]
/// 4. [`tick`](Self::tick) moves the game to [`GameState::Finished`] after the
///    configured delay
pub struct KohsGame<R> {
    config: GameConfig,
    seed: BoardSeed,
    target: Board,
    player: Board,
    interaction: InteractionEngine,
    metrics: GameMetrics,
    state: GameState,
    recorder: R,
    session_id: SessionId,
    observers: Vec<Observer>,
}

impl<R> fmt::Debug for KohsGame<R>
where
    R: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KohsGame")
            .field("config", &self.config)
            .field("seed", &self.seed)
            .field("target", &self.target)
            .field("player", &self.player)
            .field("interaction", &self.interaction)
            .field("metrics", &self.metrics)
            .field("state", &self.state)
            .field("recorder", &self.recorder)
            .field("session_id", &self.session_id)
            .finish_non_exhaustive()
    }
}

impl<R> KohsGame<R>
where
    R: SessionRecorder,
{
    /// Starts a new game from a fresh random seed.
    pub fn new(config: GameConfig, recorder: R, now: Instant) -> Self {
        Self::start(config, rand::random(), recorder, now)
    }

    /// Starts a new game whose boards are fully determined by `seed`.
    pub fn start(config: GameConfig, seed: BoardSeed, mut recorder: R, now: Instant) -> Self {
        let (target, player) = deal(&config, seed);
        let mut metrics = GameMetrics::new();
        metrics.reset(now);
        let session_id = recorder.start_session(GameType::Kohs, config.difficulty.into());
        log_start(&config, seed, &session_id);

        Self {
            config,
            seed,
            target,
            player,
            interaction: InteractionEngine::new(config.drag_threshold),
            metrics,
            state: GameState::Playing,
            recorder,
            session_id,
            observers: Vec::new(),
        }
    }

    /// Discards the current puzzle and deals a new one with the same
    /// configuration, opening a new recorder session.
    ///
    /// Observers stay subscribed and receive [`GameNotification::Restarted`].
    pub fn restart(&mut self, seed: BoardSeed, now: Instant) {
        let (target, player) = deal(&self.config, seed);
        self.seed = seed;
        self.target = target;
        self.player = player;
        self.interaction.reset();
        self.metrics.reset(now);
        self.state = GameState::Playing;
        self.session_id = self
            .recorder
            .start_session(GameType::Kohs, self.config.difficulty.into());
        log_start(&self.config, seed, &self.session_id);
        self.notify(&GameNotification::Restarted);
    }

    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub const fn seed(&self) -> BoardSeed {
        self.seed
    }

    /// The hidden pattern the player must reproduce.
    #[must_use]
    pub const fn target(&self) -> &Board {
        &self.target
    }

    #[must_use]
    pub const fn player(&self) -> &Board {
        &self.player
    }

    #[must_use]
    pub const fn metrics(&self) -> &GameMetrics {
        &self.metrics
    }

    #[must_use]
    pub const fn state(&self) -> GameState {
        self.state
    }

    #[must_use]
    pub const fn drag(&self) -> Option<&DragState> {
        self.interaction.drag()
    }

    #[must_use]
    pub const fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    #[must_use]
    pub const fn recorder(&self) -> &R {
        &self.recorder
    }

    pub fn into_recorder(self) -> R {
        self.recorder
    }

    /// Registers a callback invoked after every state change.
    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: FnMut(&GameNotification) + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    /// Applies one gesture.
    ///
    /// Gestures are ignored once the game is solved.
    pub fn apply(&mut self, event: PointerEvent, now: Instant) -> Interaction {
        if !self.state.is_playing() {
            return Interaction::Ignored;
        }

        let interaction = self
            .interaction
            .handle(event, &mut self.player, &mut self.metrics);
        debug!(?event, ?interaction, "pointer event");

        match interaction {
            Interaction::Ignored => {}
            _ if interaction.changed_board() => {
                self.notify(&GameNotification::BoardChanged(interaction));
                self.evaluate(now);
            }
            _ => self.notify(&GameNotification::DragChanged(interaction)),
        }
        interaction
    }

    /// Advances time-based state; call periodically from the event loop.
    pub fn tick(&mut self, now: Instant) {
        if let GameState::Completed { completed_at } = self.state
            && now.saturating_duration_since(completed_at) >= self.config.completion_delay
        {
            self.state = GameState::Finished;
            debug!(session = %self.session_id, "game finished");
            self.notify(&GameNotification::Finished);
        }
    }

    fn evaluate(&mut self, now: Instant) {
        if !boards_match(&self.target, &self.player) {
            return;
        }

        self.interaction.reset();
        self.state = GameState::Completed { completed_at: now };

        let metrics = SessionMetrics {
            time_seconds: self.metrics.elapsed(now).as_secs_f64(),
            rotations: Some(self.metrics.rotation_count()),
            drags: Some(self.metrics.drag_count()),
            errors: None,
        };
        info!(
            session = %self.session_id,
            time_seconds = metrics.time_seconds,
            rotations = self.metrics.rotation_count(),
            drags = self.metrics.drag_count(),
            "puzzle solved"
        );
        if let Err(e) = self.recorder.complete_session(metrics) {
            warn!(session = %self.session_id, "failed to record completion: {e}");
        }
        self.notify(&GameNotification::Completed(metrics));
    }

    fn notify(&mut self, notification: &GameNotification) {
        for observer in &mut self.observers {
            observer(notification);
        }
    }
}

fn deal(config: &GameConfig, seed: BoardSeed) -> (Board, Board) {
    let mut rng = RandomSource::with_seed(seed);
    let target = generate_pattern(config.grid, config.difficulty, &mut rng);
    let player = shuffle_board(&target, &mut rng);
    (target, player)
}

fn log_start(config: &GameConfig, seed: BoardSeed, session_id: &SessionId) {
    info!(
        session = %session_id,
        grid = %config.grid,
        difficulty = %config.difficulty,
        %seed,
        "game started"
    );
}
