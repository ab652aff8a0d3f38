use super::{
    face::{Face, FaceIndex},
    rotation::Rotation,
};

/// Stable identity of a block, preserved across shuffles and swaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub struct BlockId(pub u16);

/// Grid coordinates of a cell, counted from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[display("({row}, {col})")]
pub struct CellPosition {
    pub row: u8,
    pub col: u8,
}

impl CellPosition {
    #[must_use]
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Canonical cell-major ordering key.
    ///
    /// Requires `col < 10`, which holds for every supported grid.
    #[must_use]
    pub fn cell_key(self) -> u16 {
        u16::from(self.row) * 10 + u16::from(self.col)
    }
}

/// A single block on a board.
///
/// The `id` and `face` form the block's identity and never change during a
/// game. Position and rotation are owned by the block and change as the
/// player rotates and swaps it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    id: BlockId,
    position: CellPosition,
    face_index: FaceIndex,
    rotation: Rotation,
}

impl Block {
    #[must_use]
    pub const fn new(
        id: BlockId,
        position: CellPosition,
        face_index: FaceIndex,
        rotation: Rotation,
    ) -> Self {
        Self {
            id,
            position,
            face_index,
            rotation,
        }
    }

    #[must_use]
    pub const fn id(&self) -> BlockId {
        self.id
    }

    #[must_use]
    pub const fn position(&self) -> CellPosition {
        self.position
    }

    #[must_use]
    pub const fn face_index(&self) -> FaceIndex {
        self.face_index
    }

    #[must_use]
    pub fn face(&self) -> &'static Face {
        self.face_index.face()
    }

    #[must_use]
    pub const fn rotation(&self) -> Rotation {
        self.rotation
    }

    #[must_use]
    pub const fn with_position(self, position: CellPosition) -> Self {
        Self { position, ..self }
    }

    #[must_use]
    pub const fn with_rotation(self, rotation: Rotation) -> Self {
        Self { rotation, ..self }
    }
}
