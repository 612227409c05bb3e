//! Game session state machine: turn alternation, end conditions, clocks
//!
//! The session drives exactly one decision at a time, single-threaded: it
//! asks the selector for the computer's move or the input source for the
//! human's, applies it through the board (and ledger, when active), and
//! re-checks the rules for game end. Nothing here is shared across threads;
//! search branches get their own clones of board and ledger.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
    board::{Board, Player},
    error::{Error, Result},
    ledger::MoveLedger,
    ports::{Clock, InputSource, Renderer, Sleeper},
    selector::best_move,
    timer::PlayerTimer,
};

/// Hard cap on total plies, forcing a draw. The limited-memory variant can
/// never fill the board (marks keep getting evicted), so natural termination
/// via a full board cannot be relied upon there.
pub const MOVE_CAP: u32 = 100;

/// Which rule set the session plays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Variant {
    /// Marks are permanent; the game ends on a win or a full board
    Classic,
    /// Only each player's last three marks stay on the board
    LimitedMemory,
}

/// Per-player chess clock settings for the timed variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeControl {
    /// Each player's total time budget
    pub budget: Duration,
    /// Cosmetic pause before the computer commits a move; runs on the
    /// computer's own clock
    pub think_delay: Duration,
}

/// Session parameters, fixed at creation
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub variant: Variant,
    pub first_to_move: Player,
    pub time_control: Option<TimeControl>,
    pub move_cap: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            variant: Variant::Classic,
            first_to_move: Player::Human,
            time_control: None,
            move_cap: MOVE_CAP,
        }
    }
}

/// Why the game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOverReason {
    ComputerWin,
    HumanWin,
    Draw,
    /// The computer's clock ran out; the human wins on time
    ComputerTimeout,
    /// The human's clock ran out; the computer wins on time
    HumanTimeout,
}

impl fmt::Display for GameOverReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            GameOverReason::ComputerWin => "computer wins",
            GameOverReason::HumanWin => "human wins",
            GameOverReason::Draw => "draw",
            GameOverReason::ComputerTimeout => "computer ran out of time; human wins",
            GameOverReason::HumanTimeout => "human ran out of time; computer wins",
        };
        f.write_str(text)
    }
}

/// States of the session state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    AwaitingComputerMove,
    AwaitingHumanMove,
    GameOver(GameOverReason),
}

/// Something that happened during a turn, for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    ComputerPlayed { position: usize },
    HumanPlayed { position: usize },
    /// A mark vanished because its owner placed a fourth one
    MarkEvicted { player: Player, position: usize },
    /// The last entry was not a usable move; the turn is not consumed
    InvalidEntry,
    /// The entry named an occupied cell; the turn is not consumed
    OccupiedCell { position: usize },
    GameOver(GameOverReason),
}

/// One committed move, for the transcript
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub ply: u32,
    pub player: Player,
    pub position: usize,
    pub evicted: Option<usize>,
}

#[derive(Debug)]
struct TimerPair {
    computer: PlayerTimer,
    human: PlayerTimer,
}

impl TimerPair {
    fn new(budget: Duration) -> Self {
        TimerPair {
            computer: PlayerTimer::new(budget),
            human: PlayerTimer::new(budget),
        }
    }

    fn get(&self, player: Player) -> &PlayerTimer {
        match player {
            Player::Computer => &self.computer,
            Player::Human => &self.human,
        }
    }

    fn get_mut(&mut self, player: Player) -> &mut PlayerTimer {
        match player {
            Player::Computer => &mut self.computer,
            Player::Human => &mut self.human,
        }
    }
}

/// One game from first move to terminal state.
///
/// Created once per game and discarded after the outcome is reported; there
/// is no way to restart a finished session.
#[derive(Debug)]
pub struct GameSession {
    board: Board,
    ledger: Option<MoveLedger>,
    timers: Option<TimerPair>,
    think_delay: Duration,
    move_cap: u32,
    plies: u32,
    state: SessionState,
    transcript: Vec<MoveRecord>,
}

impl GameSession {
    pub fn new(config: SessionConfig) -> Self {
        let ledger = match config.variant {
            Variant::LimitedMemory => Some(MoveLedger::new()),
            Variant::Classic => None,
        };
        let timers = config.time_control.map(|tc| TimerPair::new(tc.budget));
        let think_delay = config
            .time_control
            .map_or(Duration::ZERO, |tc| tc.think_delay);
        let state = match config.first_to_move {
            Player::Computer => SessionState::AwaitingComputerMove,
            Player::Human => SessionState::AwaitingHumanMove,
        };

        GameSession {
            board: Board::new(),
            ledger,
            timers,
            think_delay,
            move_cap: config.move_cap,
            plies: 0,
            state,
            transcript: Vec::new(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn ledger(&self) -> Option<&MoveLedger> {
        self.ledger.as_ref()
    }

    pub fn plies(&self) -> u32 {
        self.plies
    }

    /// Every committed move so far, in order
    pub fn transcript(&self) -> &[MoveRecord] {
        &self.transcript
    }

    /// Time left on a player's clock, if the session is timed
    pub fn remaining_time(&self, player: Player, now: Duration) -> Option<Duration> {
        self.timers.as_ref().map(|t| t.get(player).remaining(now))
    }

    /// Drive the session until it reaches a terminal state.
    ///
    /// # Errors
    ///
    /// Only I/O failures from the input source propagate; invalid entries
    /// are consumed by the retry loop.
    pub fn run(
        &mut self,
        renderer: &mut dyn Renderer,
        input: &mut dyn InputSource,
        clock: &dyn Clock,
        sleeper: &mut dyn Sleeper,
    ) -> Result<GameOverReason> {
        loop {
            if let SessionState::GameOver(reason) = self.step(renderer, input, clock, sleeper)? {
                return Ok(reason);
            }
        }
    }

    /// Advance by exactly one turn (or to game over) and return the new
    /// state. A no-op once the game is over.
    pub fn step(
        &mut self,
        renderer: &mut dyn Renderer,
        input: &mut dyn InputSource,
        clock: &dyn Clock,
        sleeper: &mut dyn Sleeper,
    ) -> Result<SessionState> {
        match self.state {
            SessionState::GameOver(_) => {}
            SessionState::AwaitingComputerMove => self.computer_turn(renderer, clock, sleeper),
            SessionState::AwaitingHumanMove => self.human_turn(renderer, input, clock)?,
        }
        Ok(self.state)
    }

    fn computer_turn(
        &mut self,
        renderer: &mut dyn Renderer,
        clock: &dyn Clock,
        sleeper: &mut dyn Sleeper,
    ) {
        let now = clock.now();
        // An already-expired clock loses before any move is computed
        if self.flag_expired(Player::Computer, now, renderer) {
            return;
        }
        if let Some(timers) = &mut self.timers {
            timers.get_mut(Player::Computer).start(now);
        }
        if !self.think_delay.is_zero() {
            sleeper.sleep(self.think_delay);
        }

        let Some(chosen) = best_move(&self.board, self.ledger.as_ref()) else {
            // No move available: terminal condition, not an error
            self.stop_timer(Player::Computer, clock);
            self.finish(GameOverReason::Draw, renderer);
            return;
        };

        // The delay and the search both ran on the computer's clock
        if self.flag_expired(Player::Computer, clock.now(), renderer) {
            return;
        }

        let evicted = self.commit(chosen.position, Player::Computer);
        self.stop_timer(Player::Computer, clock);
        if let Some(position) = evicted {
            renderer.announce(&SessionEvent::MarkEvicted {
                player: Player::Computer,
                position,
            });
        }
        renderer.announce(&SessionEvent::ComputerPlayed {
            position: chosen.position,
        });
        renderer.render(&self.board);

        if self.board.winner() == Some(Player::Computer) {
            self.finish(GameOverReason::ComputerWin, renderer);
        } else if self.reached_draw() {
            self.finish(GameOverReason::Draw, renderer);
        } else {
            self.state = SessionState::AwaitingHumanMove;
        }
    }

    fn human_turn(
        &mut self,
        renderer: &mut dyn Renderer,
        input: &mut dyn InputSource,
        clock: &dyn Clock,
    ) -> Result<()> {
        let now = clock.now();
        if self.flag_expired(Player::Human, now, renderer) {
            return Ok(());
        }
        if let Some(timers) = &mut self.timers {
            timers.get_mut(Player::Human).start(now);
        }

        // Invalid entries re-prompt without consuming the turn; the clock
        // keeps running against the human the whole time
        let position = loop {
            let entry = input.read_move();
            if self.flag_expired(Player::Human, clock.now(), renderer) {
                return Ok(());
            }
            match entry {
                Ok(position) if position < 9 && self.board.is_empty(position) => break position,
                Ok(position) if position < 9 => {
                    renderer.announce(&SessionEvent::OccupiedCell { position });
                }
                Ok(_) => renderer.announce(&SessionEvent::InvalidEntry),
                Err(Error::InvalidInput { .. }) | Err(Error::OutOfBounds { .. }) => {
                    renderer.announce(&SessionEvent::InvalidEntry);
                }
                // I/O failures are fatal, not retried
                Err(err) => return Err(err),
            }
        };

        let evicted = self.commit(position, Player::Human);
        self.stop_timer(Player::Human, clock);
        if let Some(vacated) = evicted {
            renderer.announce(&SessionEvent::MarkEvicted {
                player: Player::Human,
                position: vacated,
            });
        }
        renderer.announce(&SessionEvent::HumanPlayed { position });
        renderer.render(&self.board);

        if self.board.winner() == Some(Player::Human) {
            self.finish(GameOverReason::HumanWin, renderer);
        } else if self.reached_draw() {
            self.finish(GameOverReason::Draw, renderer);
        } else {
            self.state = SessionState::AwaitingComputerMove;
        }
        Ok(())
    }

    /// Apply a validated move through the ledger (or straight onto the
    /// board), returning any evicted position
    fn commit(&mut self, position: usize, player: Player) -> Option<usize> {
        let evicted = match &mut self.ledger {
            Some(ledger) => ledger
                .apply(&mut self.board, position, player)
                .expect("session commits only validated moves"),
            None => {
                self.board.set(position, player.to_cell());
                None
            }
        };
        self.plies += 1;
        self.transcript.push(MoveRecord {
            ply: self.plies,
            player,
            position,
            evicted,
        });
        tracing::debug!(ply = self.plies, ?player, position, ?evicted, "move committed");
        evicted
    }

    fn reached_draw(&self) -> bool {
        self.plies >= self.move_cap || (self.ledger.is_none() && self.board.is_full())
    }

    fn flag_expired(&mut self, player: Player, now: Duration, renderer: &mut dyn Renderer) -> bool {
        let expired = self
            .timers
            .as_ref()
            .is_some_and(|t| !t.get(player).has_time_left(now));
        if expired {
            // Settle the clock so remaining-time queries stay consistent
            // after the game is over
            if let Some(timers) = &mut self.timers {
                timers.get_mut(player).stop(now);
            }
            let reason = match player {
                Player::Computer => GameOverReason::ComputerTimeout,
                Player::Human => GameOverReason::HumanTimeout,
            };
            self.finish(reason, renderer);
        }
        expired
    }

    fn stop_timer(&mut self, player: Player, clock: &dyn Clock) {
        if let Some(timers) = &mut self.timers {
            timers.get_mut(player).stop(clock.now());
        }
    }

    fn finish(&mut self, reason: GameOverReason, renderer: &mut dyn Renderer) {
        self.state = SessionState::GameOver(reason);
        renderer.announce(&SessionEvent::GameOver(reason));
        tracing::debug!(%reason, "session finished");
    }
}
