// Interaction flow tests for the board sync & animation engine.
// These run natively: the server is an in-memory fake that only knows gravity
// and turn order, and the view records what it was asked to draw.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use connect_four_web::engine::{BoardProjection, DropOutcome, PlacedDisc, UiPhase, project};
use connect_four_web::{
    BoardView, ClientError, Column, Coord, GameApi, GameState, Interaction, Marker, Mode, Session,
};
use futures::FutureExt;
use futures::channel::oneshot;
use futures::executor::block_on;
use futures::future::LocalBoxFuture;

const ROWS: usize = 6;

#[derive(Default)]
struct FakeServer {
    state: RefCell<Option<GameState>>,
    scripted: RefCell<VecDeque<GameState>>,
    gate: RefCell<Option<oneshot::Receiver<()>>>,
    fail_next_play: Cell<bool>,
    fetch_calls: Cell<usize>,
    play_calls: Cell<usize>,
}

impl FakeServer {
    fn current(&self) -> GameState {
        self.state
            .borrow_mut()
            .get_or_insert_with(GameState::initial)
            .clone()
    }

    /// Lowest empty row, player swap, nothing else.
    fn apply(&self, column: Column) -> GameState {
        let mut state = self.current();
        let col = column.index();
        let landing = (0..ROWS)
            .rev()
            .find(|&row| state.board.get(row, col) == Some(Marker::Empty));
        if let Some(row) = landing {
            state.board = state.board.with_marker(row, col, state.current_player);
            state.current_player = match state.current_player {
                Marker::One => Marker::Two,
                _ => Marker::One,
            };
        }
        *self.state.borrow_mut() = Some(state.clone());
        state
    }

    fn hold_next_play(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.gate.borrow_mut() = Some(rx);
        tx
    }
}

impl GameApi for FakeServer {
    fn fetch_state(&self) -> LocalBoxFuture<'_, Result<GameState, ClientError>> {
        self.fetch_calls.set(self.fetch_calls.get() + 1);
        let state = self.current();
        async move { Ok(state) }.boxed_local()
    }

    fn play(&self, column: Column) -> LocalBoxFuture<'_, Result<GameState, ClientError>> {
        self.play_calls.set(self.play_calls.get() + 1);
        async move {
            let gate = self.gate.borrow_mut().take();
            if let Some(rx) = gate {
                let _ = rx.await;
            }
            if self.fail_next_play.replace(false) {
                return Err(ClientError::Network {
                    endpoint: "/api/play",
                    message: "connection reset".into(),
                });
            }
            if let Some(next) = self.scripted.borrow_mut().pop_front() {
                *self.state.borrow_mut() = Some(next.clone());
                return Ok(next);
            }
            Ok(self.apply(column))
        }
        .boxed_local()
    }

    fn reset(&self) -> LocalBoxFuture<'_, Result<GameState, ClientError>> {
        let mode = self.current().mode;
        let fresh = GameState {
            mode,
            ..GameState::initial()
        };
        *self.state.borrow_mut() = Some(fresh.clone());
        async move { Ok(fresh) }.boxed_local()
    }

    fn set_mode(&self, mode: Mode) -> LocalBoxFuture<'_, Result<GameState, ClientError>> {
        let mut state = self.current();
        state.mode = Some(mode);
        *self.state.borrow_mut() = Some(state.clone());
        async move { Ok(state) }.boxed_local()
    }
}

#[derive(Default)]
struct RecordingView {
    renders: RefCell<Vec<BoardProjection>>,
    drops: RefCell<Vec<PlacedDisc>>,
}

impl RecordingView {
    fn last_render(&self) -> BoardProjection {
        self.renders.borrow().last().cloned().expect("nothing rendered")
    }
}

impl BoardView for RecordingView {
    fn render(&self, projection: &BoardProjection) {
        self.renders.borrow_mut().push(projection.clone());
    }

    fn animate_drop(&self, disc: PlacedDisc) -> LocalBoxFuture<'_, DropOutcome> {
        self.drops.borrow_mut().push(disc);
        async { DropOutcome::Landed }.boxed_local()
    }
}

fn session() -> Session<FakeServer, RecordingView> {
    Session::new(FakeServer::default(), RecordingView::default())
}

fn col(i: usize) -> Column {
    Column::new(i).unwrap()
}

#[test]
fn initial_render_shows_empty_board_player_one() {
    let s = session();
    assert_eq!(block_on(s.start()), Interaction::Redrawn);
    let p = s.view().last_render();
    assert_eq!(p.cells.len(), 42);
    assert!(p.cells.iter().all(|c| c.marker == Marker::Empty));
    assert_eq!(p.status, "Player 1 to move");
}

#[test]
fn column_three_lands_on_bottom_row_and_passes_turn() {
    let s = session();
    block_on(s.start());

    let expected = PlacedDisc { row: 5, col: 3, marker: Marker::One };
    assert_eq!(block_on(s.play_column(col(3))), Interaction::Animated(expected));
    assert_eq!(*s.view().drops.borrow(), vec![expected]);

    let p = s.view().last_render();
    let cell = p.cell(Coord::new(5, 3)).unwrap();
    assert_eq!(cell.marker, Marker::One);
    assert!(cell.just_placed);
    assert_eq!(p.status, "Player 2 to move");
    assert_eq!(s.api().current().current_player, Marker::Two);
    assert_eq!(s.phase(), UiPhase::Idle);
}

#[test]
fn stacked_discs_animate_into_successive_rows() {
    let s = session();
    block_on(s.play_column(col(2)));
    let second = block_on(s.play_column(col(2)));
    assert_eq!(
        second,
        Interaction::Animated(PlacedDisc { row: 4, col: 2, marker: Marker::Two })
    );
}

#[test]
fn full_column_redraws_without_animation() {
    let s = session();
    for _ in 0..ROWS {
        assert!(matches!(block_on(s.play_column(col(0))), Interaction::Animated(_)));
    }
    let before = s.api().current();

    assert_eq!(block_on(s.play_column(col(0))), Interaction::Redrawn);
    assert_eq!(s.view().drops.borrow().len(), ROWS);
    assert_eq!(s.api().play_calls.get(), ROWS + 1);
    assert_eq!(s.api().current(), before);
    assert_eq!(s.view().last_render(), project(&before, None));
}

#[test]
fn second_move_while_pending_makes_no_network_call() {
    let s = session();
    let release = s.api().hold_next_play();

    let mut first = Box::pin(s.play_column(col(3)));
    assert!(first.as_mut().now_or_never().is_none());
    assert_eq!(s.phase(), UiPhase::AwaitingMove);

    assert_eq!(block_on(s.play_column(col(4))), Interaction::Dropped);
    assert_eq!(block_on(s.reset()), Interaction::Dropped);
    assert_eq!(s.api().play_calls.get(), 1);
    assert_eq!(s.api().fetch_calls.get(), 1);

    release.send(()).unwrap();
    assert!(matches!(block_on(first), Interaction::Animated(_)));
    assert_eq!(s.phase(), UiPhase::Idle);

    // Guard is free again.
    assert!(matches!(block_on(s.play_column(col(4))), Interaction::Animated(_)));
    assert_eq!(s.api().play_calls.get(), 2);
}

#[test]
fn network_failure_leaves_render_untouched_and_releases_guard() {
    let s = session();
    block_on(s.start());
    let renders_before = s.view().renders.borrow().len();

    s.api().fail_next_play.set(true);
    assert_eq!(block_on(s.play_column(col(1))), Interaction::Failed);
    assert_eq!(s.view().renders.borrow().len(), renders_before);
    assert!(s.view().drops.borrow().is_empty());
    assert_eq!(s.phase(), UiPhase::Idle);

    assert!(matches!(block_on(s.play_column(col(1))), Interaction::Animated(_)));
}

#[test]
fn winning_response_highlights_exactly_the_line() {
    let s = session();
    let mut board = GameState::initial().board;
    for c in 0..3 {
        board = board.with_marker(5, c, Marker::One).with_marker(4, c, Marker::Two);
    }
    s.api().state.replace(Some(GameState { board: board.clone(), ..GameState::initial() }));

    let line: Vec<Coord> = (0..4).map(|c| Coord::new(5, c)).collect();
    s.api().scripted.borrow_mut().push_back(GameState {
        board: board.with_marker(5, 3, Marker::One),
        current_player: Marker::One,
        winner: Marker::One,
        draw: false,
        win_coords: line.clone(),
        mode: None,
    });

    assert_eq!(
        block_on(s.play_column(col(3))),
        Interaction::Animated(PlacedDisc { row: 5, col: 3, marker: Marker::One })
    );
    let p = s.view().last_render();
    let lit: Vec<Coord> = p.highlighted().map(|c| Coord::new(c.row, c.col)).collect();
    assert_eq!(lit, line);
    assert_eq!(p.status, "Player 1 wins!");
    assert!(p.game_over);
}

#[test]
fn reset_returns_canonical_initial_state() {
    let s = session();
    for c in [3, 3, 4, 2] {
        block_on(s.play_column(col(c)));
    }
    assert_eq!(block_on(s.reset()), Interaction::Redrawn);
    assert_eq!(s.view().last_render(), project(&GameState::initial(), None));
    assert_eq!(s.api().current(), GameState::initial());
}

#[test]
fn mode_change_redraws_with_label_and_no_animation() {
    let s = session();
    block_on(s.start());
    assert_eq!(block_on(s.select_mode(Mode::AntiPveSmart)), Interaction::Redrawn);

    let p = s.view().last_render();
    assert_eq!(p.selected_mode, Some(Mode::AntiPveSmart));
    assert_eq!(p.mode_label, Some("Reverse gravity: Player vs AI (smart)"));
    assert!(s.view().drops.borrow().is_empty());

    // Reset keeps the server-side mode.
    block_on(s.reset());
    assert_eq!(s.view().last_render().selected_mode, Some(Mode::AntiPveSmart));
}
