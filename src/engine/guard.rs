//! Reentrancy guard serializing user interactions.
//!
//! UI-level state machine: `Idle -> AwaitingMove -> Animating -> Idle`. The
//! guard is busy in both non-idle phases. A [`GuardTicket`] is the only way out
//! of `Idle` and dropping it is the only way back, so every exit path of an
//! interaction (success, error, early return) releases the guard.

use std::cell::Cell;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiPhase {
    Idle,
    AwaitingMove,
    Animating,
}

#[derive(Clone, Debug)]
pub struct InteractionGuard {
    phase: Rc<Cell<UiPhase>>,
}

impl InteractionGuard {
    pub fn new() -> Self {
        Self {
            phase: Rc::new(Cell::new(UiPhase::Idle)),
        }
    }

    pub fn phase(&self) -> UiPhase {
        self.phase.get()
    }

    pub fn is_busy(&self) -> bool {
        self.phase.get() != UiPhase::Idle
    }

    /// `None` while another interaction holds the guard; the caller drops the
    /// request.
    pub fn try_acquire(&self) -> Option<GuardTicket> {
        if self.is_busy() {
            return None;
        }
        self.phase.set(UiPhase::AwaitingMove);
        Some(GuardTicket {
            phase: self.phase.clone(),
        })
    }
}

impl Default for InteractionGuard {
    fn default() -> Self {
        Self::new()
    }
}

/// Held for the lifetime of one interaction.
#[derive(Debug)]
pub struct GuardTicket {
    phase: Rc<Cell<UiPhase>>,
}

impl GuardTicket {
    pub fn begin_animation(&self) {
        self.phase.set(UiPhase::Animating);
    }
}

impl Drop for GuardTicket {
    fn drop(&mut self) {
        self.phase.set(UiPhase::Idle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_acquire_rejected_until_release() {
        let guard = InteractionGuard::new();
        let ticket = guard.try_acquire().expect("idle guard");
        assert_eq!(guard.phase(), UiPhase::AwaitingMove);
        assert!(guard.try_acquire().is_none());
        drop(ticket);
        assert_eq!(guard.phase(), UiPhase::Idle);
        assert!(guard.try_acquire().is_some());
    }

    #[test]
    fn test_phase_cycle() {
        let guard = InteractionGuard::new();
        {
            let ticket = guard.try_acquire().unwrap();
            ticket.begin_animation();
            assert_eq!(guard.phase(), UiPhase::Animating);
            assert!(guard.clone().try_acquire().is_none());
        }
        assert!(!guard.is_busy());
    }

    #[test]
    fn test_release_on_early_return() {
        fn bail(guard: &InteractionGuard) -> Result<(), &'static str> {
            let _ticket = guard.try_acquire().ok_or("busy")?;
            Err("network down")
        }
        let guard = InteractionGuard::new();
        assert_eq!(bail(&guard), Err("network down"));
        assert_eq!(guard.phase(), UiPhase::Idle);
    }
}
