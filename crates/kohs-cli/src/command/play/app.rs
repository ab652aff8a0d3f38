use std::{cell::RefCell, rc::Rc, time::Instant};

use crossterm::event::{Event, KeyCode, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use kohs_engine::{
    Block, BlockId, BoardSeed, CellPosition, DragState, GameConfig, GameNotification, GameState,
    KohsGame, PointerEvent, PointerPosition, SessionMetrics,
};
use kohs_profile::ProfileRecorder;
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout},
    text::Line,
    widgets::Block as BlockWidget,
};
use tracing::debug;

use crate::{
    tui::{App, Runtime},
    util,
    view::widgets::{BoardDisplay, BoardGeometry, StatsDisplay, style},
};

const TICK_RATE: f64 = 20.0;

/// Puzzles solved during this run, fed by the game's observer.
#[derive(Debug, Default)]
struct Outcome {
    current: Option<SessionMetrics>,
    solved: Vec<SessionMetrics>,
}

#[derive(Debug)]
pub(super) struct PlayApp {
    game: KohsGame<ProfileRecorder>,
    outcome: Rc<RefCell<Outcome>>,
    cursor: CellPosition,
    /// Block picked up with the keyboard, waiting to be dropped.
    held: Option<BlockId>,
    /// Mouse position during a drag, for the drop highlight.
    drag_pointer: Option<(u16, u16)>,
    /// Player board placement from the last frame.
    geometry: Option<BoardGeometry>,
    is_exiting: bool,
}

impl PlayApp {
    pub(super) fn new(config: GameConfig, seed: BoardSeed, recorder: ProfileRecorder) -> Self {
        let mut game = KohsGame::start(config, seed, recorder, Instant::now());
        let outcome = Rc::new(RefCell::new(Outcome::default()));
        game.subscribe({
            let outcome = Rc::clone(&outcome);
            move |notification| {
                let mut outcome = outcome.borrow_mut();
                match notification {
                    GameNotification::Completed(metrics) => {
                        outcome.current = Some(*metrics);
                        outcome.solved.push(*metrics);
                    }
                    GameNotification::Restarted => outcome.current = None,
                    GameNotification::BoardChanged(_)
                    | GameNotification::DragChanged(_)
                    | GameNotification::Finished => {}
                }
            }
        });

        Self {
            game,
            outcome,
            cursor: CellPosition::new(0, 0),
            held: None,
            drag_pointer: None,
            geometry: None,
            is_exiting: false,
        }
    }

    pub(super) fn solved(&self) -> Vec<SessionMetrics> {
        self.outcome.borrow().solved.clone()
    }

    fn new_game(&mut self, now: Instant) {
        self.game.restart(rand::random(), now);
        self.held = None;
        self.drag_pointer = None;
        self.cursor = CellPosition::new(0, 0);
    }

    fn block_at_cursor(&self) -> Option<BlockId> {
        self.game.player().block_at(self.cursor).map(Block::id)
    }

    fn cell_point(&self, cell: CellPosition) -> PointerPosition {
        self.geometry
            .unwrap_or_else(|| BoardGeometry::at_origin(self.game.config().grid))
            .cell_center(cell)
    }

    fn move_cursor(&mut self, d_row: i8, d_col: i8) {
        let grid = self.game.config().grid;
        let clamp = |value: u8, delta: i8, len: u8| {
            value.saturating_add_signed(delta).min(len - 1)
        };
        self.cursor = CellPosition::new(
            clamp(self.cursor.row, d_row, grid.rows()),
            clamp(self.cursor.col, d_col, grid.cols()),
        );
        if self.held.is_some() {
            let at = self.cell_point(self.cursor);
            self.game.apply(PointerEvent::Move { at }, Instant::now());
        }
    }

    /// Enter picks up the block under the cursor, and a second Enter drops
    /// it onto the block under the cursor, swapping the two.
    fn pick_or_drop(&mut self, now: Instant) {
        let at = self.cell_point(self.cursor);
        let over = self.block_at_cursor();
        match self.held.take() {
            None => {
                let Some(block) = over else { return };
                if self.game.apply(PointerEvent::Press { block, at }, now).is_pressed() {
                    self.held = Some(block);
                }
            }
            Some(held) if over == Some(held) => {
                self.game.apply(PointerEvent::Cancel, now);
            }
            Some(_) => {
                self.game.apply(PointerEvent::Move { at }, now);
                self.game.apply(PointerEvent::Release { over, at }, now);
            }
        }
    }

    fn cancel(&mut self, now: Instant) {
        self.held = None;
        self.drag_pointer = None;
        self.game.apply(PointerEvent::Cancel, now);
    }

    fn handle_key(&mut self, code: KeyCode, now: Instant) {
        let is_playing = self.game.state().is_playing();
        match code {
            KeyCode::Char('q') => self.is_exiting = true,
            KeyCode::Char('n') => self.new_game(now),
            KeyCode::Enter if self.game.state().is_finished() => self.new_game(now),
            KeyCode::Left | KeyCode::Char('h') if is_playing => self.move_cursor(0, -1),
            KeyCode::Right | KeyCode::Char('l') if is_playing => self.move_cursor(0, 1),
            KeyCode::Up | KeyCode::Char('k') if is_playing => self.move_cursor(-1, 0),
            KeyCode::Down | KeyCode::Char('j') if is_playing => self.move_cursor(1, 0),
            KeyCode::Char(' ') if is_playing => {
                if let Some(block) = self.block_at_cursor() {
                    self.game.apply(PointerEvent::Click { block }, now);
                }
            }
            KeyCode::Enter if is_playing => self.pick_or_drop(now),
            KeyCode::Esc => self.cancel(now),
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        let Some(geometry) = self.geometry else {
            return;
        };
        let (column, row) = (mouse.column, mouse.row);
        let at = BoardGeometry::pointer(column, row);
        let cell = geometry.cell_at(column, row);
        let over = cell
            .and_then(|cell| self.game.player().block_at(cell))
            .map(Block::id);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if self.held.take().is_some() {
                    self.game.apply(PointerEvent::Cancel, now);
                }
                let Some(block) = over else { return };
                if self.game.apply(PointerEvent::Press { block, at }, now).is_pressed()
                    && let Some(cell) = cell
                {
                    self.cursor = cell;
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if geometry.contains(column, row) {
                    self.drag_pointer = Some((column, row));
                    self.game.apply(PointerEvent::Move { at }, now);
                } else {
                    self.drag_pointer = None;
                    self.game.apply(PointerEvent::Leave, now);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.drag_pointer = None;
                let interaction = self.game.apply(PointerEvent::Release { over, at }, now);
                debug!(?interaction, "mouse release");
            }
            _ => {}
        }
    }

    /// Cell a committed drag would currently drop onto.
    fn drop_target(&self) -> Option<CellPosition> {
        let drag = self.game.drag().filter(|drag| drag.is_dragging())?;
        let (column, row) = self.drag_pointer?;
        let cell = self.geometry?.cell_at(column, row)?;
        let dragged = self.game.player().block(drag.block())?;
        (dragged.position() != cell).then_some(cell)
    }

    fn status_line(&self) -> Line<'static> {
        match self.game.state() {
            GameState::Playing => {
                let text = if self.held.is_some() {
                    "Holding a block: move and press Enter to swap, Esc to put it back"
                } else {
                    "Rotate and swap the blocks until your board matches the target"
                };
                Line::styled(text, style::DEFAULT)
            }
            GameState::Completed { .. } => Line::styled("Solved!", style::HIGHLIGHT),
            GameState::Finished => {
                let time = self
                    .outcome
                    .borrow()
                    .current
                    .map_or_else(String::new, |metrics| {
                        format!(" in {}", util::format_time(metrics.time_seconds))
                    });
                Line::styled(
                    format!("Solved{time}. Press Enter or n for a new puzzle, q to quit"),
                    style::HIGHLIGHT,
                )
            }
        }
    }
}

impl App for PlayApp {
    fn init(&mut self, runtime: &mut Runtime) {
        runtime.set_tick_rate(Some(TICK_RATE));
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, _runtime: &mut Runtime, event: Event) {
        let now = Instant::now();
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key.code, now),
            Event::Mouse(mouse) => self.handle_mouse(mouse, now),
            Event::FocusLost => self.cancel(now),
            _ => {}
        }
    }

    fn draw(&mut self, frame: &mut Frame) {
        let is_playing = self.game.state().is_playing();
        let target = BoardDisplay::new(self.game.target())
            .block(BlockWidget::bordered().title(" Target ").title_style(style::TITLE));
        let mut player = BoardDisplay::new(self.game.player())
            .selected(self.game.drag().map(DragState::block))
            .drop_target(self.drop_target());
        let mut player_frame = BlockWidget::bordered()
            .title(" Your board ")
            .title_style(style::TITLE);
        if is_playing {
            player = player.cursor(self.cursor);
        } else {
            player_frame = player_frame.border_style(style::HIGHLIGHT);
        }
        let player = player.block(player_frame);

        let stats = StatsDisplay::new(&self.game, Instant::now())
            .solved(self.outcome.borrow().current)
            .block(BlockWidget::bordered().title(" Session ").title_style(style::TITLE));
        let help = Line::styled(
            "Mouse: click rotate, drag swap | Keys: arrows move, Space rotate, Enter pick/drop, Esc cancel, n new, q quit",
            style::MUTED,
        )
        .centered();

        let [title_area, boards_area, stats_area, status_area, help_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(target.height()),
            Constraint::Length(stats.height()),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());
        let [target_area, _, player_area] = Layout::horizontal([
            Constraint::Length(target.width()),
            Constraint::Length(4),
            Constraint::Length(player.width()),
        ])
        .flex(Flex::Center)
        .areas(boards_area);
        let [stats_area] = Layout::horizontal([Constraint::Length(target.width() * 2 + 4)])
            .flex(Flex::Center)
            .areas(stats_area);

        self.geometry = Some(player.geometry(player_area));

        frame.render_widget(
            Line::styled("Kohs Block Design", style::TITLE).centered(),
            title_area,
        );
        frame.render_widget(&target, target_area);
        frame.render_widget(&player, player_area);
        frame.render_widget(stats, stats_area);
        frame.render_widget(self.status_line().centered(), status_area);
        frame.render_widget(help, help_area);
    }

    fn update(&mut self, _runtime: &mut Runtime) {
        self.game.tick(Instant::now());
    }
}
