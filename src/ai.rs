// Computer opponent: draws uniformly among the currently valid moves.
// Uses no_std; randomness comes from the caller's RNG.

use rand::Rng;

use crate::board::Board;
use crate::common::{Move, Player};
use crate::variant::{valid_moves, GameVariant};

/// AI player picking a random valid move each turn.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomAi;

impl RandomAi {
    pub fn new() -> Self {
        Self
    }

    /// A uniformly random valid move for `player`, or `None` when it has none.
    pub fn choose_move<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        board: &Board,
        variant: GameVariant,
        player: Player,
    ) -> Option<Move> {
        let moves = valid_moves(board, variant, player);
        if moves.is_empty() {
            return None;
        }
        Some(moves[rng.random_range(0..moves.len())])
    }
}
