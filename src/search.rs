//! Exhaustive adversarial search over the game tree
//!
//! The computer maximizes and the human minimizes one scalar score. Without a
//! ledger the search mutates the board in place and undoes each move on the
//! way back up; with a ledger every branch explores a fresh copy of the joint
//! board/ledger state, because eviction is not a simple inverse of placement.

use crate::{
    board::{Board, Player},
    ledger::MoveLedger,
};

/// Base score for a win before depth adjustment
pub const WIN_SCORE: i32 = 10;

/// Ply cutoff used when searching with a move ledger. Eviction keeps the
/// board from ever filling, so the limited-memory tree never bottoms out on
/// its own and the search must be bounded.
pub const LIMITED_SEARCH_DEPTH: u8 = 4;

/// Score a position from the computer's perspective.
///
/// Base cases, in precedence order:
///
/// 1. Computer has a completed line: `WIN_SCORE - depth` (prefers the
///    quickest win among equally winning continuations).
/// 2. Human has a completed line: `depth - WIN_SCORE` (prefers the slowest
///    loss).
/// 3. `depth >= max_depth`: `0`. This is a heuristic cutoff, not draw
///    detection; a cut-off position scored neutral may in fact be winning or
///    losing. Known limitation of the bounded-depth variant, kept as-is.
/// 4. Full board, or no legal move: `0`.
///
/// The recursion enumerates empty cells in index order 0..9 and alternates
/// `to_move` each ply.
pub fn minimax(
    board: &mut Board,
    depth: u8,
    to_move: Player,
    ledger: Option<&MoveLedger>,
    max_depth: Option<u8>,
) -> i32 {
    match board.winner() {
        Some(Player::Computer) => return WIN_SCORE - i32::from(depth),
        Some(Player::Human) => return i32::from(depth) - WIN_SCORE,
        None => {}
    }
    if let Some(limit) = max_depth {
        if depth >= limit {
            return 0;
        }
    }
    if board.is_full() {
        return 0;
    }

    let mut best: Option<i32> = None;
    for position in 0..9 {
        if !board.is_empty(position) {
            continue;
        }
        let score = match ledger {
            Some(ledger) => {
                let mut child_board = *board;
                let mut child_ledger = ledger.clone();
                child_ledger
                    .apply(&mut child_board, position, to_move)
                    .expect("search only visits empty cells");
                minimax(
                    &mut child_board,
                    depth + 1,
                    to_move.opponent(),
                    Some(&child_ledger),
                    max_depth,
                )
            }
            None => {
                board.set(position, to_move.to_cell());
                let score = minimax(board, depth + 1, to_move.opponent(), None, max_depth);
                board.clear(position);
                score
            }
        };
        best = Some(match (best, to_move) {
            (None, _) => score,
            (Some(b), Player::Computer) => b.max(score),
            (Some(b), Player::Human) => b.min(score),
        });
    }

    // No legal move left: neutral, matching the full-board rule
    best.unwrap_or(0)
}
