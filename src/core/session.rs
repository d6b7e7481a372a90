//! Session glue: one game, its tick scheduler and its RNG.
//!
//! The session owns the clock. Inputs and due ticks are both funnelled
//! through it, one at a time, and the scheduler is cancelled the moment the
//! game turns terminal so no transition can run afterwards. When that
//! happens the session emits a single [`ScoreEvent`] for the persistence
//! port to judge.

use crate::core::error::PersistenceError;
use crate::core::rng::GameRng;
use crate::core::scheduler::TickScheduler;
use crate::games::blackjack::{BlackjackGame, BlackjackPhase};
use crate::games::flappy::{self, FlappyGame, TICK_MS};
use crate::games::gomoku::{GomokuGame, GomokuResult, Player};
use crate::games::memory::{MemoryGame, MemoryResult};
use crate::games::minesweeper::{self, MinesweeperGame, MinesweeperResult};
use crate::games::snake::{self, SnakeGame};
use crate::games::solitaire::{SolitaireGame, SolitaireResult};
use crate::games::tetris::{self, TetrisGame};
use crate::games::twenty48::Twenty48Game;
use crate::games::typing::{self, TypingGame};
use crate::games::GameId;
use crate::utils::persistence::ScoreStore;
use rand::Rng;
use tracing::debug;

/// Clock resolution for the games whose only timed element is a stopwatch.
pub const CLOCK_TICK_MS: u64 = 100;

/// Emitted once per finished game with a score worth recording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreEvent {
    CandidateBest { game: GameId, score: u32 },
}

/// A game that can report a candidate best score.
pub trait Scored {
    const ID: GameId;

    fn is_over(&self) -> bool;

    /// The value to offer the score store, if this state earns one.
    fn candidate_best(&self) -> Option<u32>;
}

/// A game advanced by a fixed-interval clock.
pub trait TickGame: Scored + Clone {
    /// Current cadence; may change between ticks (Tetris levels).
    fn tick_interval_ms(&self) -> u64;

    fn tick<R: Rng>(&self, rng: &mut R) -> Self;
}

/// The event a state would emit, if any.
pub fn score_event<G: Scored>(game: &G) -> Option<ScoreEvent> {
    game.candidate_best().map(|score| ScoreEvent::CandidateBest {
        game: G::ID,
        score,
    })
}

/// Hand an event to the store. Returns whether it became the new best.
pub fn record_best<S: ScoreStore>(store: &mut S, event: ScoreEvent) -> Result<bool, PersistenceError> {
    match event {
        ScoreEvent::CandidateBest { game, score } => store.submit(game, score),
    }
}

pub struct GameSession<G, R = GameRng> {
    game: G,
    scheduler: TickScheduler,
    rng: R,
}

impl<G: TickGame, R: Rng> GameSession<G, R> {
    /// Wrap `game` and start its clock.
    pub fn new(game: G, rng: R) -> Self {
        let mut scheduler = TickScheduler::new(game.tick_interval_ms());
        scheduler.start();
        if game.is_over() {
            scheduler.cancel();
        }
        Self {
            game,
            scheduler,
            rng,
        }
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn scheduler(&self) -> &TickScheduler {
        &self.scheduler
    }

    /// The clock has stopped, either because the game ended or it was torn
    /// down.
    pub fn is_finished(&self) -> bool {
        !self.scheduler.is_running()
    }

    /// Apply one input transition. Ignored once the session is finished.
    pub fn input<F>(&mut self, transition: F) -> Option<ScoreEvent>
    where
        F: FnOnce(&G, &mut R) -> G,
    {
        if self.is_finished() {
            return None;
        }
        self.game = transition(&self.game, &mut self.rng);
        self.after_transition()
    }

    /// Feed elapsed wall-clock time and run every tick that is due.
    pub fn advance(&mut self, dt_ms: u64) -> Option<ScoreEvent> {
        let due = self.scheduler.advance(dt_ms);
        for _ in 0..due {
            self.game = self.game.tick(&mut self.rng);
            if let Some(event) = self.after_transition() {
                return Some(event);
            }
            if self.is_finished() {
                break;
            }
        }
        None
    }

    /// Run exactly one tick, regardless of elapsed time.
    pub fn step(&mut self) -> Option<ScoreEvent> {
        if !self.scheduler.step() {
            return None;
        }
        self.game = self.game.tick(&mut self.rng);
        self.after_transition()
    }

    /// Tear down without finishing the game.
    pub fn cancel(&mut self) {
        self.scheduler.cancel();
    }

    pub fn into_game(self) -> G {
        self.game
    }

    fn after_transition(&mut self) -> Option<ScoreEvent> {
        if self.game.is_over() {
            self.scheduler.cancel();
            debug!(game = G::ID.name(), "session finished");
            return score_event(&self.game);
        }
        let interval = self.game.tick_interval_ms();
        if interval != self.scheduler.interval_ms() {
            self.scheduler.set_interval(interval);
        }
        None
    }
}

impl Scored for SnakeGame {
    const ID: GameId = GameId::Snake;

    fn is_over(&self) -> bool {
        self.game_result.is_some()
    }

    fn candidate_best(&self) -> Option<u32> {
        self.is_over().then_some(self.score)
    }
}

impl TickGame for SnakeGame {
    fn tick_interval_ms(&self) -> u64 {
        self.move_interval_ms
    }

    fn tick<R: Rng>(&self, rng: &mut R) -> Self {
        snake::step_snake(self, rng)
    }
}

impl Scored for FlappyGame {
    const ID: GameId = GameId::Flappy;

    fn is_over(&self) -> bool {
        self.game_result.is_some()
    }

    fn candidate_best(&self) -> Option<u32> {
        self.is_over().then_some(self.score)
    }
}

impl TickGame for FlappyGame {
    fn tick_interval_ms(&self) -> u64 {
        TICK_MS
    }

    fn tick<R: Rng>(&self, rng: &mut R) -> Self {
        flappy::step_flappy(self, rng)
    }
}

impl Scored for TetrisGame {
    const ID: GameId = GameId::Tetris;

    fn is_over(&self) -> bool {
        TetrisGame::is_over(self)
    }

    fn candidate_best(&self) -> Option<u32> {
        TetrisGame::is_over(self).then_some(self.score)
    }
}

impl TickGame for TetrisGame {
    fn tick_interval_ms(&self) -> u64 {
        self.gravity_interval_ms()
    }

    fn tick<R: Rng>(&self, rng: &mut R) -> Self {
        tetris::tick(self, rng)
    }
}

impl Scored for MinesweeperGame {
    const ID: GameId = GameId::Minesweeper;

    fn is_over(&self) -> bool {
        self.game_result.is_some()
    }

    /// Best time, in seconds; only wins count.
    fn candidate_best(&self) -> Option<u32> {
        (self.game_result == Some(MinesweeperResult::Win)).then(|| self.elapsed_secs())
    }
}

impl TickGame for MinesweeperGame {
    fn tick_interval_ms(&self) -> u64 {
        CLOCK_TICK_MS
    }

    fn tick<R: Rng>(&self, _rng: &mut R) -> Self {
        minesweeper::advance_clock(self, CLOCK_TICK_MS)
    }
}

impl Scored for TypingGame {
    const ID: GameId = GameId::Typing;

    fn is_over(&self) -> bool {
        self.is_complete()
    }

    /// Words per minute, rounded.
    fn candidate_best(&self) -> Option<u32> {
        self.is_complete().then(|| self.wpm().round() as u32)
    }
}

impl TickGame for TypingGame {
    fn tick_interval_ms(&self) -> u64 {
        CLOCK_TICK_MS
    }

    fn tick<R: Rng>(&self, _rng: &mut R) -> Self {
        typing::advance_clock(self, CLOCK_TICK_MS)
    }
}

impl Scored for Twenty48Game {
    const ID: GameId = GameId::Twenty48;

    fn is_over(&self) -> bool {
        self.game_result.is_some()
    }

    fn candidate_best(&self) -> Option<u32> {
        self.is_over().then_some(self.score)
    }
}

impl Scored for SolitaireGame {
    const ID: GameId = GameId::Solitaire;

    fn is_over(&self) -> bool {
        self.game_result.is_some()
    }

    fn candidate_best(&self) -> Option<u32> {
        (self.game_result == Some(SolitaireResult::Win)).then_some(self.score)
    }
}

impl Scored for BlackjackGame {
    const ID: GameId = GameId::Blackjack;

    fn is_over(&self) -> bool {
        self.is_broke()
    }

    /// Highest bankroll reached, offered after every settled hand.
    fn candidate_best(&self) -> Option<u32> {
        (self.phase == BlackjackPhase::Resolved).then_some(self.peak_bankroll)
    }
}

impl Scored for MemoryGame {
    const ID: GameId = GameId::Memory;

    fn is_over(&self) -> bool {
        self.game_result.is_some()
    }

    /// Fewest attempts to clear the table.
    fn candidate_best(&self) -> Option<u32> {
        (self.game_result == Some(MemoryResult::Win)).then_some(self.moves)
    }
}

impl Scored for GomokuGame {
    const ID: GameId = GameId::Gomoku;

    fn is_over(&self) -> bool {
        self.game_result.is_some()
    }

    /// Fewest stones the human needed to win.
    fn candidate_best(&self) -> Option<u32> {
        (self.game_result == Some(GomokuResult::Win)).then(|| {
            self.move_history
                .iter()
                .filter(|(_, _, p)| *p == Player::Human)
                .count() as u32
        })
    }
}
