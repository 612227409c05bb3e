//! Bounded per-player move history for the limited-memory variant
//!
//! Each player keeps at most [`LEDGER_CAPACITY`] marks on the board; placing
//! one more evicts their oldest mark. Board and ledger always change together
//! as a joint state, never independently.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::board::{Board, Player};

/// Number of marks each player may keep on the board at once
pub const LEDGER_CAPACITY: usize = 3;

/// FIFO queues of occupied positions, one per player.
///
/// `Clone` performs a deep copy of both queues: the search explores many
/// hypothetical futures from the same starting ledger and must never mutate
/// the original through a branch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveLedger {
    computer: VecDeque<usize>,
    human: VecDeque<usize>,
}

impl MoveLedger {
    pub fn new() -> Self {
        MoveLedger {
            computer: VecDeque::with_capacity(LEDGER_CAPACITY),
            human: VecDeque::with_capacity(LEDGER_CAPACITY),
        }
    }

    fn queue(&self, player: Player) -> &VecDeque<usize> {
        match player {
            Player::Computer => &self.computer,
            Player::Human => &self.human,
        }
    }

    fn queue_mut(&mut self, player: Player) -> &mut VecDeque<usize> {
        match player {
            Player::Computer => &mut self.computer,
            Player::Human => &mut self.human,
        }
    }

    /// The player's currently retained positions, oldest first
    pub fn positions(&self, player: Player) -> impl Iterator<Item = usize> + '_ {
        self.queue(player).iter().copied()
    }

    /// Number of marks the player currently has on the board
    pub fn len(&self, player: Player) -> usize {
        self.queue(player).len()
    }

    /// True when the player has no marks on the board
    pub fn is_empty(&self, player: Player) -> bool {
        self.queue(player).is_empty()
    }

    /// Place `player`'s mark at `position`, evicting their oldest mark when
    /// the queue already holds [`LEDGER_CAPACITY`] entries.
    ///
    /// The evicted position (its cell is simultaneously reset to empty) is
    /// returned so the caller can report the vanished mark. Occupancy is
    /// validated before any mutation, so board and ledger change together or
    /// not at all.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::OutOfBounds`] or [`crate::Error::IllegalMove`]
    /// without touching either structure.
    pub fn apply(
        &mut self,
        board: &mut Board,
        position: usize,
        player: Player,
    ) -> Result<Option<usize>, crate::Error> {
        if position >= 9 {
            return Err(crate::Error::OutOfBounds { position });
        }
        if !board.is_empty(position) {
            return Err(crate::Error::IllegalMove { position });
        }

        let queue = self.queue_mut(player);
        let evicted = if queue.len() >= LEDGER_CAPACITY {
            let oldest = queue
                .pop_front()
                .expect("a full queue holds at least one entry");
            board.clear(oldest);
            Some(oldest)
        } else {
            None
        };

        queue.push_back(position);
        board.set(position, player.to_cell());
        Ok(evicted)
    }
}
