//! Tic-tac-toe engine with exhaustive adversarial search and a
//! limited-memory rule variant.
//!
//! The crate splits into a rules core ([`board`], [`rules`], [`ledger`]), an
//! engine ([`search`], [`selector`]), and a session layer ([`session`],
//! [`timer`]) that drives one game through the collaborator traits in
//! [`ports`]. Console implementations of those traits live in [`adapters`].
//!
//! In the limited-memory variant only each player's last
//! [`LEDGER_CAPACITY`] marks stay on the board: placing a fourth mark
//! silently evicts that player's oldest one. Wins become transient and the
//! board never fills, so the session enforces a ply cap and the search is
//! depth-bounded.

pub mod adapters;
pub mod board;
pub mod error;
pub mod ledger;
pub mod ports;
pub mod rules;
pub mod search;
pub mod selector;
pub mod session;
pub mod timer;

pub use board::{Board, Cell, Player};
pub use error::{Error, Result};
pub use ledger::{MoveLedger, LEDGER_CAPACITY};
pub use search::{minimax, LIMITED_SEARCH_DEPTH, WIN_SCORE};
pub use selector::{best_move, BestMove};
pub use session::{
    GameOverReason, GameSession, MoveRecord, SessionConfig, SessionEvent, SessionState,
    TimeControl, Variant, MOVE_CAP,
};
pub use timer::PlayerTimer;
