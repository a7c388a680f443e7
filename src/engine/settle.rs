//! Single-resolution completion for drop animations.
//!
//! A drop can finish through `transitionend` or through the timeout ceiling;
//! both hold a clone of the same [`DropSettle`]. Whoever settles first runs the
//! commit step and resolves the [`DropLanding`] future, the other call is a
//! no-op.

use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use futures::channel::oneshot;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropOutcome {
    /// The transition reached its resting cell.
    Landed,
    /// The ceiling elapsed first.
    TimedOut,
    /// Target cell missing; nothing was animated.
    Skipped,
}

#[derive(Clone)]
pub struct DropSettle {
    tx: Rc<RefCell<Option<oneshot::Sender<DropOutcome>>>>,
}

/// Resolves with the first outcome passed to [`DropSettle::settle_with`].
pub struct DropLanding {
    rx: oneshot::Receiver<DropOutcome>,
}

pub fn drop_settle() -> (DropSettle, DropLanding) {
    let (tx, rx) = oneshot::channel();
    (
        DropSettle {
            tx: Rc::new(RefCell::new(Some(tx))),
        },
        DropLanding { rx },
    )
}

impl DropSettle {
    /// Runs `commit` and resolves the landing only on the first call. Returns
    /// whether this call won.
    pub fn settle_with(&self, outcome: DropOutcome, commit: impl FnOnce()) -> bool {
        let Some(tx) = self.tx.borrow_mut().take() else {
            return false;
        };
        commit();
        // Receiver may already be gone if the caller stopped waiting.
        let _ = tx.send(outcome);
        true
    }

    pub fn settle(&self, outcome: DropOutcome) -> bool {
        self.settle_with(outcome, || {})
    }

    pub fn is_settled(&self) -> bool {
        self.tx.borrow().is_none()
    }
}

impl Future for DropLanding {
    type Output = DropOutcome;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<DropOutcome> {
        // Every settle handle dropped without settling counts as a timeout.
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|res| res.unwrap_or(DropOutcome::TimedOut))
    }
}
