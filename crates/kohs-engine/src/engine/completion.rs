use crate::{Block, Board, FaceKind};

/// Returns whether a player block reproduces the target block in its cell.
///
/// Faces must be identical. Solid faces look the same at every rotation, so
/// only diagonal faces also compare rotation.
#[must_use]
pub fn block_matches(target: &Block, player: &Block) -> bool {
    if target.face_index() != player.face_index() {
        return false;
    }
    match target.face().kind() {
        FaceKind::Solid => true,
        FaceKind::Diagonal => target.rotation() == player.rotation(),
    }
}

/// Returns whether the player board reproduces the target pattern.
///
/// Both boards are put in cell order (`row * 10 + col`) and compared block by
/// block with [`block_matches`]. Block ids play no part: any block with the
/// right face (and rotation, for diagonals) satisfies a cell.
///
/// # Example
///
/// ```
/// use kohs_engine::{Board, boards_match};
/// # use kohs_engine::{Block, BlockId, FaceIndex, GridSize, Rotation};
/// # let blocks = GridSize::Four.cells().enumerate().map(|(i, position)| {
/// #     Block::new(BlockId(i as u16), position, FaceIndex::DIAGONAL[1], Rotation::Deg0)
/// # });
/// # let board = Board::new(GridSize::Four, blocks).unwrap();
///
/// assert!(boards_match(&board, &board));
/// ```
#[must_use]
pub fn boards_match(target: &Board, player: &Board) -> bool {
    if target.len() != player.len() {
        return false;
    }
    target
        .sorted_by_cell()
        .iter()
        .zip(&player.sorted_by_cell())
        .all(|(t, p)| block_matches(t, p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        BlockId, BoardSeed, Difficulty, GridSize, RandomSource, Rotation,
        core::board::tests::board_2x2, generate_pattern,
    };

    #[test]
    fn test_board_matches_itself() {
        for byte in 0..20 {
            let mut rng = RandomSource::with_seed(BoardSeed::from_bytes([byte; 16]));
            let board = generate_pattern(GridSize::Sixteen, Difficulty::Hard, &mut rng);
            assert!(boards_match(&board, &board));
        }
    }

    #[test]
    fn test_solid_board_ignores_rotation() {
        let target = board_2x2([(0, 0), (0, 90), (1, 0), (1, 180)]);
        let player = board_2x2([(0, 270), (0, 180), (1, 90), (1, 90)]);
        assert!(boards_match(&target, &player));

        let mut rotated = target.clone();
        for id in 0..4 {
            rotated = rotated.with_rotated(BlockId(id)).unwrap();
            assert!(boards_match(&target, &rotated));
        }
    }

    #[test]
    fn test_solid_blocks_interchangeable_between_cells() {
        let target = board_2x2([(0, 0), (0, 90), (1, 0), (1, 180)]);
        // Blocks 0 and 1 share a face, so swapping them still matches.
        let swapped = target.with_swapped(BlockId(0), BlockId(1)).unwrap();
        assert!(boards_match(&target, &swapped));
        // Blocks 1 and 2 differ, so swapping them does not.
        let swapped = target.with_swapped(BlockId(1), BlockId(2)).unwrap();
        assert!(!boards_match(&target, &swapped));
    }

    #[test]
    fn test_diagonal_rotation_must_match() {
        let target = board_2x2([(4, 0), (0, 0), (1, 0), (2, 0)]);
        let player = board_2x2([(4, 90), (0, 0), (1, 0), (2, 0)]);
        assert!(!boards_match(&target, &player));

        let restored = board_2x2([(4, 0), (0, 0), (1, 0), (2, 0)]);
        assert!(boards_match(&target, &restored));

        // Three more quarter turns bring the diagonal block home.
        let mut turned = player;
        for _ in 0..3 {
            assert!(!boards_match(&target, &turned));
            turned = turned.with_rotated(BlockId(0)).unwrap();
        }
        assert_eq!(turned.block(BlockId(0)).unwrap().rotation(), Rotation::Deg0);
        assert!(boards_match(&target, &turned));
    }

    #[test]
    fn test_face_mismatch_fails() {
        let target = board_2x2([(0, 0), (1, 0), (2, 0), (3, 0)]);
        let player = board_2x2([(0, 0), (1, 0), (2, 0), (5, 0)]);
        assert!(!boards_match(&target, &player));
    }

    #[test]
    fn test_size_mismatch_fails() {
        let small = board_2x2([(0, 0), (1, 0), (2, 0), (3, 0)]);
        let mut rng = RandomSource::with_seed(BoardSeed::from_bytes([1; 16]));
        let large = generate_pattern(GridSize::Sixteen, Difficulty::Easy, &mut rng);
        assert!(!boards_match(&small, &large));
    }
}
