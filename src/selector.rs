//! Move selection policy on top of the search

use crate::{
    board::{Board, Player},
    ledger::MoveLedger,
    search::{minimax, LIMITED_SEARCH_DEPTH},
};

/// A chosen move together with its search score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BestMove {
    pub position: usize,
    pub score: i32,
}

/// Pick the computer's best move from the current position.
///
/// Every empty cell is tried in index order 0..9 as the computer's move and
/// scored via [`minimax`] one ply deeper with the human to move next. With a
/// ledger the search is cut off at [`LIMITED_SEARCH_DEPTH`] plies; without
/// one it runs to the bottom of the tree. The comparison against the running
/// best is strict `>`, so ties resolve to the lowest index encountered
/// first.
///
/// Returns `None` when the board is already terminal or has no empty cell;
/// the caller must treat that as a draw/terminal condition, not an error.
pub fn best_move(board: &Board, ledger: Option<&MoveLedger>) -> Option<BestMove> {
    if board.winner().is_some() {
        return None;
    }

    let max_depth = ledger.map(|_| LIMITED_SEARCH_DEPTH);
    let mut scratch = *board;
    let mut best: Option<BestMove> = None;

    for position in 0..9 {
        if !board.is_empty(position) {
            continue;
        }
        let score = match ledger {
            Some(ledger) => {
                let mut child_board = *board;
                let mut child_ledger = ledger.clone();
                child_ledger
                    .apply(&mut child_board, position, Player::Computer)
                    .expect("selector only tries empty cells");
                minimax(
                    &mut child_board,
                    1,
                    Player::Human,
                    Some(&child_ledger),
                    max_depth,
                )
            }
            None => {
                scratch.set(position, Player::Computer.to_cell());
                let score = minimax(&mut scratch, 1, Player::Human, None, None);
                scratch.clear(position);
                score
            }
        };
        if best.map_or(true, |b| score > b.score) {
            best = Some(BestMove { position, score });
        }
    }

    if let Some(chosen) = best {
        tracing::debug!(
            position = chosen.position,
            score = chosen.score,
            "computer move selected"
        );
    }
    best
}
