use arrayvec::ArrayVec;

use crate::{Block, Board, CellPosition, MAX_BLOCKS};

use super::random::RandomSource;

/// Derives the player's starting board from a target pattern.
///
/// Every block keeps its id and face. Each block draws a fresh rotation,
/// independent of its target rotation, and the target positions are permuted
/// with a Fisher–Yates shuffle (walking from the last index down to 1, each
/// swapped with a partner uniform in `[0, i]`) before being handed back to
/// the blocks in their original order.
///
/// The result may coincide with the target; that is not excluded.
pub fn shuffle_board(target: &Board, rng: &mut RandomSource) -> Board {
    let mut blocks = target
        .blocks()
        .iter()
        .map(|block| block.with_rotation(rng.rotation()))
        .collect::<ArrayVec<Block, MAX_BLOCKS>>();

    let mut positions = target
        .blocks()
        .iter()
        .map(Block::position)
        .collect::<ArrayVec<CellPosition, MAX_BLOCKS>>();
    for i in (1..positions.len()).rev() {
        let j = rng.index_up_to(i);
        positions.swap(i, j);
    }

    for (block, position) in blocks.iter_mut().zip(positions) {
        *block = block.with_position(position);
    }
    Board::from_parts(target.grid(), blocks)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::{BoardSeed, Difficulty, GridSize, generate_pattern};

    fn seeded(byte: u8) -> RandomSource {
        RandomSource::with_seed(BoardSeed::from_bytes([byte; 16]))
    }

    #[test]
    fn test_shuffle_preserves_identity_and_cells() {
        for grid in [GridSize::Four, GridSize::Sixteen] {
            for byte in 0..30 {
                let mut rng = seeded(byte);
                let target = generate_pattern(grid, Difficulty::Medium, &mut rng);
                let player = shuffle_board(&target, &mut rng);

                assert_eq!(player.len(), target.len());
                assert_eq!(player.face_counts(), target.face_counts());
                for (t, p) in target.blocks().iter().zip(player.blocks()) {
                    assert_eq!(t.id(), p.id());
                    assert_eq!(t.face_index(), p.face_index());
                }

                let cells = |board: &Board| {
                    board
                        .blocks()
                        .iter()
                        .map(Block::position)
                        .collect::<HashSet<_>>()
                };
                assert_eq!(cells(&player), cells(&target));
                assert!(Board::new(grid, player.blocks().iter().copied()).is_ok());
            }
        }
    }

    #[test]
    fn test_shuffle_moves_blocks() {
        // Over many seeds a 4×4 shuffle should almost never be the identity.
        let moved = (0..20)
            .filter(|&byte| {
                let mut rng = seeded(byte);
                let target = generate_pattern(GridSize::Sixteen, Difficulty::Easy, &mut rng);
                let player = shuffle_board(&target, &mut rng);
                target
                    .blocks()
                    .iter()
                    .zip(player.blocks())
                    .any(|(t, p)| t.position() != p.position())
            })
            .count();
        assert!(moved >= 19);
    }

    #[test]
    fn test_shuffle_is_deterministic_per_seed() {
        let run = || {
            let mut rng = seeded(0x77);
            let target = generate_pattern(GridSize::Sixteen, Difficulty::Hard, &mut rng);
            shuffle_board(&target, &mut rng)
        };
        assert_eq!(run(), run());
    }
}
