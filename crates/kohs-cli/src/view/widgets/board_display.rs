use kohs_engine::{Block, BlockId, Board, CellPosition, GridSize, PointerPosition};
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::view::widgets::style;

/// Terminal columns per block.
const BLOCK_WIDTH: u16 = 8;
/// Terminal rows per block. Each row shows two pixel rows with `▀`.
const BLOCK_HEIGHT: u16 = 4;
/// Blank columns/rows between neighboring blocks.
const GAP: u16 = 1;

/// Where each cell of a board lands on screen.
///
/// Used both to draw the board and to map mouse positions back to cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardGeometry {
    inner: Rect,
    grid: GridSize,
}

impl BoardGeometry {
    /// Pointer travel that turns a press into a drag: half a block width.
    ///
    /// Small enough that any move into a neighboring block commits the drag,
    /// large enough that jitter inside the pressed block stays a tap.
    pub const DRAG_THRESHOLD: f32 = 4.0;

    #[must_use]
    pub const fn new(inner: Rect, grid: GridSize) -> Self {
        Self { inner, grid }
    }

    /// Geometry of a board drawn at the top-left corner of the screen.
    #[must_use]
    pub fn at_origin(grid: GridSize) -> Self {
        Self::new(Rect::new(0, 0, Self::width(grid), Self::height(grid)), grid)
    }

    #[must_use]
    pub fn width(grid: GridSize) -> u16 {
        let cols = u16::from(grid.cols());
        cols * BLOCK_WIDTH + (cols - 1) * GAP
    }

    #[must_use]
    pub fn height(grid: GridSize) -> u16 {
        let rows = u16::from(grid.rows());
        rows * BLOCK_HEIGHT + (rows - 1) * GAP
    }

    /// Screen area of the block in `cell`.
    #[must_use]
    pub fn cell_area(&self, cell: CellPosition) -> Rect {
        let x = self.inner.x + u16::from(cell.col) * (BLOCK_WIDTH + GAP);
        let y = self.inner.y + u16::from(cell.row) * (BLOCK_HEIGHT + GAP);
        Rect::new(x, y, BLOCK_WIDTH, BLOCK_HEIGHT).intersection(self.inner)
    }

    /// Returns the cell under a terminal position, or `None` over the gaps
    /// between blocks and outside the board.
    #[must_use]
    pub fn cell_at(&self, column: u16, row: u16) -> Option<CellPosition> {
        if !self.contains(column, row) {
            return None;
        }
        let dx = column - self.inner.x;
        let dy = row - self.inner.y;
        if dx % (BLOCK_WIDTH + GAP) >= BLOCK_WIDTH || dy % (BLOCK_HEIGHT + GAP) >= BLOCK_HEIGHT {
            return None;
        }
        let cell = CellPosition::new(
            u8::try_from(dy / (BLOCK_HEIGHT + GAP)).ok()?,
            u8::try_from(dx / (BLOCK_WIDTH + GAP)).ok()?,
        );
        self.grid.contains(cell).then_some(cell)
    }

    /// Whether a terminal position is inside the board (gaps included).
    #[must_use]
    pub fn contains(&self, column: u16, row: u16) -> bool {
        let board = Rect {
            width: Self::width(self.grid),
            height: Self::height(self.grid),
            ..self.inner
        }
        .intersection(self.inner);
        board.contains(Position::new(column, row))
    }

    /// Pointer coordinates of a terminal position.
    ///
    /// Rows are scaled by two so distances are roughly isotropic on a
    /// terminal whose cells are twice as tall as they are wide.
    #[must_use]
    pub fn pointer(column: u16, row: u16) -> PointerPosition {
        PointerPosition::new(f32::from(column), f32::from(row) * 2.0)
    }

    /// Pointer coordinates of the center of `cell`.
    #[must_use]
    pub fn cell_center(&self, cell: CellPosition) -> PointerPosition {
        let area = self.cell_area(cell);
        Self::pointer(area.x + area.width / 2, area.y + area.height / 2)
    }
}

#[derive(Debug)]
pub struct BoardDisplay<'a> {
    board: &'a Board,
    cursor: Option<CellPosition>,
    selected: Option<BlockId>,
    drop_target: Option<CellPosition>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self {
            board,
            cursor: None,
            selected: None,
            drop_target: None,
            block: None,
        }
    }

    /// Marks the keyboard cursor cell.
    pub fn cursor(self, cursor: CellPosition) -> Self {
        Self {
            cursor: Some(cursor),
            ..self
        }
    }

    /// Marks the block being dragged or held.
    pub fn selected(self, selected: Option<BlockId>) -> Self {
        Self { selected, ..self }
    }

    /// Marks the cell a drag would drop onto.
    pub fn drop_target(self, drop_target: Option<CellPosition>) -> Self {
        Self {
            drop_target,
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        BoardGeometry::width(self.board.grid()) + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        BoardGeometry::height(self.board.grid()) + super::block_vertical_margin(self.block.as_ref())
    }

    /// Geometry of the board when rendered into `area`.
    pub fn geometry(&self, area: Rect) -> BoardGeometry {
        BoardGeometry::new(self.block.inner_if_some(area), self.board.grid())
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let geometry = self.geometry(area);
        self.block.as_ref().render(area, buf);

        for block in self.board.blocks() {
            let cell_area = geometry.cell_area(block.position());
            render_face(block, cell_area, buf);

            if self.cursor == Some(block.position()) {
                render_corners(cell_area, buf);
            }
            if self.drop_target == Some(block.position()) {
                render_corners(cell_area, buf);
            }
            if self.selected == Some(block.id()) {
                render_center_mark(cell_area, buf);
            }
        }
    }
}

/// Paints a block's face at its rotation, two pixel rows per terminal row.
fn render_face(block: &Block, area: Rect, buf: &mut Buffer) {
    let face = block.face();
    let width = f32::from(BLOCK_WIDTH);
    let pixel_rows = f32::from(BLOCK_HEIGHT * 2);
    for dy in 0..area.height {
        for dx in 0..area.width {
            let u = (f32::from(dx) + 0.5) / width;
            let top = (f32::from(dy * 2) + 0.5) / pixel_rows;
            let bottom = (f32::from(dy * 2 + 1) + 0.5) / pixel_rows;
            let fg = style::face_color(face.color_at(block.rotation(), u, top));
            let bg = style::face_color(face.color_at(block.rotation(), u, bottom));
            if let Some(cell) = buf.cell_mut((area.x + dx, area.y + dy)) {
                cell.set_symbol("▀").set_fg(fg).set_bg(bg);
            }
        }
    }
}

fn render_corners(area: Rect, buf: &mut Buffer) {
    if area.is_empty() {
        return;
    }
    let (left, right) = (area.x, area.right() - 1);
    let (top, bottom) = (area.y, area.bottom() - 1);
    for (x, y, symbol) in [
        (left, top, "┏"),
        (right, top, "┓"),
        (left, bottom, "┗"),
        (right, bottom, "┛"),
    ] {
        if let Some(cell) = buf.cell_mut((x, y)) {
            cell.set_symbol(symbol).set_style(style::MARKER);
        }
    }
}

fn render_center_mark(area: Rect, buf: &mut Buffer) {
    let x = area.x + area.width / 2;
    let y = area.y + area.height / 2;
    if let Some(cell) = buf.cell_mut((x, y)) {
        cell.set_symbol("◆").set_style(style::MARKER);
    }
}

#[cfg(test)]
mod tests {
    use kohs_engine::{BoardSeed, Difficulty, RandomSource, generate_pattern};

    use super::*;

    fn geometry(grid: GridSize) -> BoardGeometry {
        BoardGeometry::new(Rect::new(10, 5, 60, 30), grid)
    }

    #[test]
    fn test_cell_at_maps_block_areas() {
        let geometry = geometry(GridSize::Sixteen);
        for cell in GridSize::Sixteen.cells() {
            let area = geometry.cell_area(cell);
            assert_eq!(area.width, BLOCK_WIDTH);
            assert_eq!(geometry.cell_at(area.x, area.y), Some(cell));
            assert_eq!(
                geometry.cell_at(area.right() - 1, area.bottom() - 1),
                Some(cell)
            );
        }
    }

    #[test]
    fn test_cell_at_outside_and_gaps() {
        let geometry = geometry(GridSize::Four);
        // Left of the board.
        assert_eq!(geometry.cell_at(9, 5), None);
        // The gap column between the two blocks of the first row.
        assert_eq!(geometry.cell_at(10 + BLOCK_WIDTH, 5), None);
        // Below the last row of a 2x2 board.
        assert_eq!(geometry.cell_at(10, 5 + BoardGeometry::height(GridSize::Four)), None);
        assert!(!geometry.contains(10 + BoardGeometry::width(GridSize::Four), 5));
    }

    #[test]
    fn test_neighbor_centers_exceed_drag_threshold() {
        let half_block = f32::from(BLOCK_WIDTH) / 2.0;
        assert!((BoardGeometry::DRAG_THRESHOLD - half_block).abs() < f32::EPSILON);

        let geometry = BoardGeometry::at_origin(GridSize::Sixteen);
        let origin = geometry.cell_center(CellPosition::new(1, 1));
        for neighbor in [CellPosition::new(1, 2), CellPosition::new(2, 1)] {
            let distance = origin.distance(geometry.cell_center(neighbor));
            assert!(distance >= BoardGeometry::DRAG_THRESHOLD, "{neighbor}: {distance}");
        }

        // Jitter of one row or two columns inside a block stays below it.
        let area = geometry.cell_area(CellPosition::new(1, 1));
        let press = BoardGeometry::pointer(area.x, area.y);
        let jitter = BoardGeometry::pointer(area.x + 2, area.y + 1);
        assert!(press.distance(jitter) < BoardGeometry::DRAG_THRESHOLD);
    }

    #[test]
    fn test_render_paints_every_block() {
        let mut rng = RandomSource::with_seed(BoardSeed::from_bytes([4; 16]));
        let board = generate_pattern(GridSize::Four, Difficulty::Hard, &mut rng);
        let display = BoardDisplay::new(&board).block(BlockWidget::bordered());
        let area = Rect::new(0, 0, display.width(), display.height());
        let mut buf = Buffer::empty(area);
        (&display).render(area, &mut buf);

        let geometry = display.geometry(area);
        for block in board.blocks() {
            let cell_area = geometry.cell_area(block.position());
            let cell = &buf[(cell_area.x, cell_area.y)];
            assert_eq!(cell.symbol(), "▀");
            let expected = block.face().color_at(block.rotation(), 0.5 / 8.0, 0.5 / 8.0);
            assert_eq!(cell.fg, style::face_color(expected));
        }
    }
}
