//! Board sync & animation engine.
//!
//! Flow of one move: user input -> pre-move snapshot -> `/api/play` -> diff
//! against the snapshot -> drop animation for the new disc -> full redraw from
//! the server's answer. The view never keeps animation-local state past the
//! redraw; the returned [`GameState`] is always the final word.
//!
//! The engine talks to the server through [`GameApi`] and to the screen through
//! [`BoardView`]. In the browser those are `HttpApi` and `DomView`; tests plug
//! in fakes.

pub mod diff;
pub mod guard;
pub mod projection;
pub mod settle;

use futures::future::LocalBoxFuture;
use tracing::{debug, error, warn};

use crate::error::ClientError;
use crate::state::{Column, GameState, Mode};

pub use diff::{PlacedDisc, find_placed_disc};
pub use guard::{GuardTicket, InteractionGuard, UiPhase};
pub use projection::{BoardProjection, CellView, project};
pub use settle::{DropLanding, DropOutcome, DropSettle, drop_settle};

/// Server boundary. Implementations never retry.
pub trait GameApi {
    fn fetch_state(&self) -> LocalBoxFuture<'_, Result<GameState, ClientError>>;
    fn play(&self, column: Column) -> LocalBoxFuture<'_, Result<GameState, ClientError>>;
    fn reset(&self) -> LocalBoxFuture<'_, Result<GameState, ClientError>>;
    fn set_mode(&self, mode: Mode) -> LocalBoxFuture<'_, Result<GameState, ClientError>>;
}

/// Screen boundary.
pub trait BoardView {
    /// Rebuild everything from `projection`.
    fn render(&self, projection: &BoardProjection);
    /// Play the drop for `disc`. Must resolve exactly once, bounded by the
    /// configured timeout.
    fn animate_drop(&self, disc: PlacedDisc) -> LocalBoxFuture<'_, DropOutcome>;
}

/// What became of one user interaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Interaction {
    /// Another interaction was in flight; nothing was sent.
    Dropped,
    Animated(PlacedDisc),
    /// Rendered without animation (no placement found, reset, mode change).
    Redrawn,
    /// Network or decode failure; the previous render was left untouched.
    Failed,
}

pub struct Session<A, V> {
    api: A,
    view: V,
    guard: InteractionGuard,
}

impl<A: GameApi, V: BoardView> Session<A, V> {
    pub fn new(api: A, view: V) -> Self {
        Self {
            api,
            view,
            guard: InteractionGuard::new(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn phase(&self) -> UiPhase {
        self.guard.phase()
    }

    /// Initial render from `/api/state`.
    pub async fn start(&self) -> Interaction {
        let Some(_ticket) = self.guard.try_acquire() else {
            return Interaction::Dropped;
        };
        match self.api.fetch_state().await {
            Ok(state) => {
                self.view.render(&project(&state, None));
                Interaction::Redrawn
            }
            Err(err) => abandon("start", err),
        }
    }

    pub async fn play_column(&self, column: Column) -> Interaction {
        let Some(ticket) = self.guard.try_acquire() else {
            debug!(%column, "move dropped, interaction in flight");
            return Interaction::Dropped;
        };
        let prev = match self.api.fetch_state().await {
            Ok(state) => state,
            Err(err) => return abandon("play", err),
        };
        let next = match self.api.play(column).await {
            Ok(state) => state,
            Err(err) => return abandon("play", err),
        };

        match find_placed_disc(&prev.board, &next.board) {
            Some(placed) => {
                ticket.begin_animation();
                debug!(row = placed.row, col = placed.col, "animating drop");
                let outcome = self.view.animate_drop(placed).await;
                if outcome != DropOutcome::Landed {
                    warn!(?outcome, row = placed.row, col = placed.col, "drop did not land cleanly");
                }
                self.view.render(&project(&next, Some(placed)));
                Interaction::Animated(placed)
            }
            None => {
                debug!(%column, "no placement in response, plain redraw");
                self.view.render(&project(&next, None));
                Interaction::Redrawn
            }
        }
    }

    pub async fn reset(&self) -> Interaction {
        let Some(_ticket) = self.guard.try_acquire() else {
            return Interaction::Dropped;
        };
        if let Err(err) = self.api.reset().await {
            return abandon("reset", err);
        }
        match self.api.fetch_state().await {
            Ok(state) => {
                self.view.render(&project(&state, None));
                Interaction::Redrawn
            }
            Err(err) => abandon("reset", err),
        }
    }

    /// Mode changes never animate, even when the server opens with an AI move.
    pub async fn select_mode(&self, mode: Mode) -> Interaction {
        let Some(_ticket) = self.guard.try_acquire() else {
            return Interaction::Dropped;
        };
        match self.api.set_mode(mode).await {
            Ok(state) => {
                self.view.render(&project(&state, None));
                Interaction::Redrawn
            }
            Err(err) => abandon("set_mode", err),
        }
    }
}

fn abandon(action: &'static str, err: ClientError) -> Interaction {
    error!(action, %err, "interaction abandoned");
    Interaction::Failed
}
