use std::{fmt, str::FromStr};

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use super::{
    block::{Block, BlockId, CellPosition},
    face::FACE_COUNT,
};

/// Largest number of blocks a board can hold (4×4 grid).
pub const MAX_BLOCKS: usize = 16;

/// Supported grid sizes, named after their block count.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, derive_more::IsVariant, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum GridSize {
    /// 2×2 grid.
    Four,
    /// 4×4 grid.
    #[default]
    Sixteen,
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("unsupported grid size: {_0} (expected 4 or 16)")]
pub struct UnsupportedGridSize(#[error(not(source))] String);

impl GridSize {
    #[must_use]
    pub const fn rows(self) -> u8 {
        match self {
            Self::Four => 2,
            Self::Sixteen => 4,
        }
    }

    #[must_use]
    pub const fn cols(self) -> u8 {
        self.rows()
    }

    #[must_use]
    pub const fn block_count(self) -> u8 {
        self.rows() * self.cols()
    }

    /// Iterates over every cell in row-major order.
    pub fn cells(self) -> impl Iterator<Item = CellPosition> {
        (0..self.rows()).flat_map(move |row| (0..self.cols()).map(move |col| CellPosition::new(row, col)))
    }

    #[must_use]
    pub const fn contains(self, position: CellPosition) -> bool {
        position.row < self.rows() && position.col < self.cols()
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.block_count())
    }
}

impl TryFrom<u8> for GridSize {
    type Error = UnsupportedGridSize;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            4 => Ok(Self::Four),
            16 => Ok(Self::Sixteen),
            _ => Err(UnsupportedGridSize(value.to_string())),
        }
    }
}

impl From<GridSize> for u8 {
    fn from(value: GridSize) -> Self {
        value.block_count()
    }
}

impl FromStr for GridSize {
    type Err = UnsupportedGridSize;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u8>()
            .map_err(|_| UnsupportedGridSize(s.to_owned()))
            .and_then(Self::try_from)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum BoardError {
    #[display("expected {expected} blocks, got {actual}")]
    BlockCount { expected: usize, actual: usize },
    #[display("block {id} lies outside the grid at {position}")]
    OutOfBounds { id: BlockId, position: CellPosition },
    #[display("cell {position} is occupied by more than one block")]
    DuplicateCell { position: CellPosition },
    #[display("block id {id} appears more than once")]
    DuplicateId { id: BlockId },
}

/// A complete arrangement of blocks on a grid.
///
/// Every cell of the grid holds exactly one block, and block ids are unique.
/// Boards are replaced rather than edited: the `with_*` methods return a new
/// board and leave `self` untouched.
///
/// # Example
///
/// ```
/// use kohs_engine::{Block, BlockId, Board, CellPosition, FaceIndex, GridSize, Rotation};
///
/// let blocks = GridSize::Four.cells().enumerate().map(|(i, position)| {
///     Block::new(BlockId(i as u16), position, FaceIndex::SOLID[0], Rotation::Deg0)
/// });
/// let board = Board::new(GridSize::Four, blocks).unwrap();
///
/// let rotated = board.with_rotated(BlockId(0)).unwrap();
/// assert_eq!(rotated.block(BlockId(0)).unwrap().rotation(), Rotation::Deg90);
/// assert_eq!(board.block(BlockId(0)).unwrap().rotation(), Rotation::Deg0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    grid: GridSize,
    blocks: ArrayVec<Block, MAX_BLOCKS>,
}

impl Board {
    pub fn new<I>(grid: GridSize, blocks: I) -> Result<Self, BoardError>
    where
        I: IntoIterator<Item = Block>,
    {
        let mut collected = ArrayVec::<Block, MAX_BLOCKS>::new();
        let mut actual = 0;
        for block in blocks {
            actual += 1;
            // Keep counting past capacity so the error reports the real size.
            let _ = collected.try_push(block);
        }
        let expected = usize::from(grid.block_count());
        if actual != expected {
            return Err(BoardError::BlockCount { expected, actual });
        }

        let mut occupied = [false; MAX_BLOCKS];
        for (i, block) in collected.iter().enumerate() {
            let position = block.position();
            if !grid.contains(position) {
                return Err(BoardError::OutOfBounds {
                    id: block.id(),
                    position,
                });
            }
            let cell = usize::from(position.row * grid.cols() + position.col);
            if std::mem::replace(&mut occupied[cell], true) {
                return Err(BoardError::DuplicateCell { position });
            }
            if collected[..i].iter().any(|other| other.id() == block.id()) {
                return Err(BoardError::DuplicateId { id: block.id() });
            }
        }

        Ok(Self {
            grid,
            blocks: collected,
        })
    }

    #[must_use]
    pub const fn grid(&self) -> GridSize {
        self.grid
    }

    /// Returns the blocks in their stored (identity) order.
    #[must_use]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    #[must_use]
    pub fn block(&self, id: BlockId) -> Option<&Block> {
        self.blocks.iter().find(|block| block.id() == id)
    }

    #[must_use]
    pub fn block_at(&self, position: CellPosition) -> Option<&Block> {
        self.blocks.iter().find(|block| block.position() == position)
    }

    /// Returns the blocks ordered by cell (`row * 10 + col`).
    #[must_use]
    pub fn sorted_by_cell(&self) -> ArrayVec<Block, MAX_BLOCKS> {
        let mut sorted = self.blocks.clone();
        sorted.sort_by_key(|block| block.position().cell_key());
        sorted
    }

    /// Counts how many blocks use each catalog face.
    #[must_use]
    pub fn face_counts(&self) -> [usize; FACE_COUNT] {
        let mut counts = [0; FACE_COUNT];
        for block in &self.blocks {
            counts[usize::from(block.face_index().get())] += 1;
        }
        counts
    }

    /// Returns a copy of the board with one block turned a quarter clockwise.
    ///
    /// Returns `None` if no block has the given id.
    #[must_use]
    pub fn with_rotated(&self, id: BlockId) -> Option<Self> {
        let mut next = self.clone();
        let block = next.blocks.iter_mut().find(|block| block.id() == id)?;
        *block = block.with_rotation(block.rotation().rotated_clockwise());
        Some(next)
    }

    /// Returns a copy of the board with the positions of two blocks exchanged.
    ///
    /// Faces and rotations stay with their blocks. Returns `None` if either
    /// id is unknown.
    #[must_use]
    pub fn with_swapped(&self, a: BlockId, b: BlockId) -> Option<Self> {
        let a_index = self.blocks.iter().position(|block| block.id() == a)?;
        let b_index = self.blocks.iter().position(|block| block.id() == b)?;
        let mut next = self.clone();
        let a_position = next.blocks[a_index].position();
        let b_position = next.blocks[b_index].position();
        next.blocks[a_index] = next.blocks[a_index].with_position(b_position);
        next.blocks[b_index] = next.blocks[b_index].with_position(a_position);
        Some(next)
    }

    /// Builds a board from trusted parts produced by the engine itself.
    pub(crate) fn from_parts(grid: GridSize, blocks: ArrayVec<Block, MAX_BLOCKS>) -> Self {
        debug_assert!(Self::new(grid, blocks.clone()).is_ok());
        Self { grid, blocks }
    }
}
