use crate::{BlockId, Board};

use super::game_metrics::GameMetrics;

/// Pointer coordinates on the interactive surface, in renderer-defined units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerPosition {
    pub x: f32,
    pub y: f32,
}

impl PointerPosition {
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn distance(self, other: Self) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// A user gesture, already hit-tested against the player board.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Direct activation of a block (click or keyboard), rotating it.
    Click { block: BlockId },
    /// Pointer pressed down on a block.
    Press { block: BlockId, at: PointerPosition },
    /// Pointer moved while pressed.
    Move { at: PointerPosition },
    /// Pointer released, over a block or over empty space.
    Release {
        over: Option<BlockId>,
        at: PointerPosition,
    },
    /// Pointer left the interactive surface.
    Leave,
    /// The gesture was interrupted (focus loss, escape key, ...).
    Cancel,
}

/// Transient state of a press that has not been released yet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragState {
    block: BlockId,
    origin: PointerPosition,
    pointer: PointerPosition,
    is_dragging: bool,
}

impl DragState {
    /// The block that was pressed.
    #[must_use]
    pub const fn block(&self) -> BlockId {
        self.block
    }

    /// Where the press started.
    #[must_use]
    pub const fn origin(&self) -> PointerPosition {
        self.origin
    }

    /// Latest tracked pointer position.
    #[must_use]
    pub const fn pointer(&self) -> PointerPosition {
        self.pointer
    }

    /// Whether the pointer has moved far enough to turn the press into a drag.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.is_dragging
    }
}

/// Result of feeding one event to the [`InteractionEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum Interaction {
    /// A block turned a quarter clockwise.
    Rotated { block: BlockId },
    /// Two blocks exchanged positions.
    Swapped { dragged: BlockId, target: BlockId },
    /// A press started on a block.
    Pressed { block: BlockId },
    /// The pressed pointer moved.
    Moved,
    /// A press ended without changing the board.
    Released,
    /// A press was abandoned; the board is untouched.
    Cancelled,
    /// The event did not apply in the current state.
    Ignored,
}

impl Interaction {
    /// Returns whether the player board was replaced.
    #[must_use]
    pub const fn changed_board(self) -> bool {
        matches!(self, Self::Rotated { .. } | Self::Swapped { .. })
    }
}

/// Gesture state machine for the player board.
///
/// # Gestures
///
/// - **Click** on a block (no press in progress): rotate it.
/// - **Press** on a block, then **Move**: once the pointer is at least
///   `drag_threshold` away from the press point the press becomes a drag.
/// - **Release** over another block after a drag: the two blocks swap cells.
/// - **Release** over the pressed block without ever dragging: a tap, which
///   rotates the block exactly like a click.
/// - Any other release, a **Leave**, or a **Cancel** clears the press and
///   leaves the board and the counters untouched.
///
/// The drag state is cleared after every release or cancel.
///
/// # Example
///
/// ```
/// use std::time::Instant;
///
/// use kohs_engine::{
///     BlockId, BoardSeed, Difficulty, GameMetrics, GridSize, Interaction, InteractionEngine,
///     PointerEvent, PointerPosition, RandomSource, generate_pattern,
/// };
///
/// let mut rng = RandomSource::with_seed(BoardSeed::from_bytes([1; 16]));
/// let mut board = generate_pattern(GridSize::Four, Difficulty::Easy, &mut rng);
/// let mut metrics = GameMetrics::new();
/// metrics.reset(Instant::now());
/// let mut engine = InteractionEngine::new(1.0);
///
/// let at = PointerPosition::new(0.0, 0.0);
/// let far = PointerPosition::new(5.0, 0.0);
/// engine.handle(PointerEvent::Press { block: BlockId(0), at }, &mut board, &mut metrics);
/// engine.handle(PointerEvent::Move { at: far }, &mut board, &mut metrics);
/// let result = engine.handle(
///     PointerEvent::Release { over: Some(BlockId(1)), at: far },
///     &mut board,
///     &mut metrics,
/// );
///
/// assert!(result.is_swapped());
/// assert_eq!(metrics.drag_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct InteractionEngine {
    drag: Option<DragState>,
    drag_threshold: f32,
}

impl InteractionEngine {
    #[must_use]
    pub const fn new(drag_threshold: f32) -> Self {
        Self {
            drag: None,
            drag_threshold,
        }
    }

    #[must_use]
    pub const fn drag(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    #[must_use]
    pub const fn drag_threshold(&self) -> f32 {
        self.drag_threshold
    }

    /// Drops any press in progress without touching the board.
    pub fn reset(&mut self) {
        self.drag = None;
    }

    /// Applies one event.
    ///
    /// `board` is replaced (never edited in place) when the event rotates or
    /// swaps blocks, and the matching counter in `metrics` is advanced.
    pub fn handle(
        &mut self,
        event: PointerEvent,
        board: &mut Board,
        metrics: &mut GameMetrics,
    ) -> Interaction {
        match event {
            PointerEvent::Click { block } => {
                if self.drag.is_some() {
                    return Interaction::Ignored;
                }
                rotate(block, board, metrics)
            }
            PointerEvent::Press { block, at } => {
                if board.block(block).is_none() {
                    return Interaction::Ignored;
                }
                self.drag = Some(DragState {
                    block,
                    origin: at,
                    pointer: at,
                    is_dragging: false,
                });
                Interaction::Pressed { block }
            }
            PointerEvent::Move { at } => {
                let threshold = self.drag_threshold;
                let Some(drag) = &mut self.drag else {
                    return Interaction::Ignored;
                };
                drag.pointer = at;
                if !drag.is_dragging && drag.origin.distance(at) >= threshold {
                    drag.is_dragging = true;
                }
                Interaction::Moved
            }
            PointerEvent::Release { over, at: _ } => {
                let Some(drag) = self.drag.take() else {
                    return Interaction::Ignored;
                };
                match over {
                    None => Interaction::Cancelled,
                    Some(target) if drag.is_dragging && target != drag.block => {
                        swap(drag.block, target, board, metrics)
                    }
                    Some(target) if !drag.is_dragging && target == drag.block => {
                        rotate(target, board, metrics)
                    }
                    Some(_) => Interaction::Released,
                }
            }
            PointerEvent::Leave | PointerEvent::Cancel => {
                if self.drag.take().is_some() {
                    Interaction::Cancelled
                } else {
                    Interaction::Ignored
                }
            }
        }
    }
}

fn rotate(block: BlockId, board: &mut Board, metrics: &mut GameMetrics) -> Interaction {
    let Some(next) = board.with_rotated(block) else {
        return Interaction::Ignored;
    };
    *board = next;
    metrics.record_rotation();
    Interaction::Rotated { block }
}

fn swap(dragged: BlockId, target: BlockId, board: &mut Board, metrics: &mut GameMetrics) -> Interaction {
    let Some(next) = board.with_swapped(dragged, target) else {
        return Interaction::Released;
    };
    *board = next;
    metrics.record_drag();
    Interaction::Swapped { dragged, target }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;
    use crate::{CellPosition, Rotation, core::board::tests::board_2x2};

    const ORIGIN: PointerPosition = PointerPosition::new(0.0, 0.0);
    const FAR: PointerPosition = PointerPosition::new(3.0, 4.0);
    const NEAR: PointerPosition = PointerPosition::new(0.3, 0.4);

    struct Fixture {
        engine: InteractionEngine,
        board: Board,
        metrics: GameMetrics,
    }

    impl Fixture {
        fn new() -> Self {
            let mut metrics = GameMetrics::new();
            metrics.reset(Instant::now());
            Self {
                engine: InteractionEngine::new(1.0),
                board: board_2x2([(4, 0), (5, 90), (0, 180), (1, 270)]),
                metrics,
            }
        }

        fn send(&mut self, event: PointerEvent) -> Interaction {
            self.engine
                .handle(event, &mut self.board, &mut self.metrics)
        }

        fn press(&mut self, id: u16) -> Interaction {
            self.send(PointerEvent::Press {
                block: BlockId(id),
                at: ORIGIN,
            })
        }

        fn move_to(&mut self, at: PointerPosition) -> Interaction {
            self.send(PointerEvent::Move { at })
        }

        fn release(&mut self, over: Option<u16>) -> Interaction {
            self.send(PointerEvent::Release {
                over: over.map(BlockId),
                at: FAR,
            })
        }
    }

    #[test]
    fn test_click_rotates_one_block() {
        let mut f = Fixture::new();
        let before = f.board.clone();

        let result = f.send(PointerEvent::Click { block: BlockId(1) });
        assert_eq!(result, Interaction::Rotated { block: BlockId(1) });
        assert_eq!(f.metrics.rotation_count(), 1);

        for (old, new) in before.blocks().iter().zip(f.board.blocks()) {
            assert_eq!(old.position(), new.position());
            if old.id() == BlockId(1) {
                assert_eq!(new.rotation(), Rotation::Deg180);
            } else {
                assert_eq!(old.rotation(), new.rotation());
            }
        }
    }

    #[test]
    fn test_click_unknown_block_is_ignored() {
        let mut f = Fixture::new();
        let result = f.send(PointerEvent::Click { block: BlockId(42) });
        assert_eq!(result, Interaction::Ignored);
        assert_eq!(f.metrics.rotation_count(), 0);
    }

    #[test]
    fn test_completed_drag_swaps_positions() {
        let mut f = Fixture::new();
        let before = f.board.clone();

        assert_eq!(f.press(0), Interaction::Pressed { block: BlockId(0) });
        assert_eq!(f.move_to(FAR), Interaction::Moved);
        assert!(f.engine.drag().unwrap().is_dragging());
        assert_eq!(
            f.release(Some(3)),
            Interaction::Swapped {
                dragged: BlockId(0),
                target: BlockId(3)
            }
        );

        assert_eq!(f.metrics.drag_count(), 1);
        assert_eq!(f.metrics.rotation_count(), 0);
        assert!(f.engine.drag().is_none());
        assert_eq!(
            f.board.block(BlockId(0)).unwrap().position(),
            CellPosition::new(1, 1)
        );
        assert_eq!(
            f.board.block(BlockId(3)).unwrap().position(),
            CellPosition::new(0, 0)
        );
        for (old, new) in before.blocks().iter().zip(f.board.blocks()) {
            assert_eq!(old.face_index(), new.face_index());
            assert_eq!(old.rotation(), new.rotation());
            if ![BlockId(0), BlockId(3)].contains(&old.id()) {
                assert_eq!(old.position(), new.position());
            }
        }
    }

    #[test]
    fn test_cancelled_drag_changes_nothing() {
        for cancel in [PointerEvent::Leave, PointerEvent::Cancel] {
            let mut f = Fixture::new();
            let before = f.board.clone();

            f.press(2);
            f.move_to(FAR);
            assert_eq!(f.send(cancel), Interaction::Cancelled);
            assert!(f.engine.drag().is_none());

            // A release after the cancel has nothing to act on.
            assert_eq!(f.release(Some(0)), Interaction::Ignored);
            assert_eq!(f.board, before);
            assert_eq!(f.metrics.drag_count(), 0);
            assert_eq!(f.metrics.rotation_count(), 0);
        }
    }

    #[test]
    fn test_tap_rotates_pressed_block() {
        let mut f = Fixture::new();
        f.press(0);
        assert_eq!(f.move_to(NEAR), Interaction::Moved);
        assert!(!f.engine.drag().unwrap().is_dragging());
        assert_eq!(f.release(Some(0)), Interaction::Rotated { block: BlockId(0) });
        assert_eq!(f.metrics.rotation_count(), 1);
        assert_eq!(f.metrics.drag_count(), 0);
    }

    #[test]
    fn test_drag_back_onto_same_block_is_noop() {
        let mut f = Fixture::new();
        let before = f.board.clone();
        f.press(0);
        f.move_to(FAR);
        f.move_to(ORIGIN);
        // Once a drag, always a drag for this press.
        assert!(f.engine.drag().unwrap().is_dragging());
        assert_eq!(f.release(Some(0)), Interaction::Released);
        assert_eq!(f.board, before);
        assert_eq!(f.metrics, {
            let mut m = GameMetrics::new();
            m.reset(f.metrics.start_time().unwrap());
            m
        });
    }

    #[test]
    fn test_short_release_over_other_block_is_noop() {
        let mut f = Fixture::new();
        let before = f.board.clone();
        f.press(0);
        assert_eq!(f.release(Some(1)), Interaction::Released);
        assert_eq!(f.board, before);
    }

    #[test]
    fn test_release_outside_blocks_cancels() {
        let mut f = Fixture::new();
        let before = f.board.clone();
        f.press(0);
        f.move_to(FAR);
        assert_eq!(f.release(None), Interaction::Cancelled);
        assert_eq!(f.board, before);
    }

    #[test]
    fn test_click_ignored_during_press() {
        let mut f = Fixture::new();
        f.press(0);
        assert_eq!(
            f.send(PointerEvent::Click { block: BlockId(1) }),
            Interaction::Ignored
        );
        assert_eq!(f.metrics.rotation_count(), 0);
    }

    #[test]
    fn test_move_and_release_without_press_are_ignored() {
        let mut f = Fixture::new();
        assert_eq!(f.move_to(FAR), Interaction::Ignored);
        assert_eq!(f.release(Some(1)), Interaction::Ignored);
        assert_eq!(f.send(PointerEvent::Leave), Interaction::Ignored);
    }

    #[test]
    fn test_zero_threshold_drags_on_any_move() {
        let mut f = Fixture::new();
        f.engine = InteractionEngine::new(0.0);
        f.press(0);
        f.move_to(ORIGIN);
        assert!(f.engine.drag().unwrap().is_dragging());
    }
}
