//! # Focus State Machine
//!
//! Sole owner of the engine's notion of "currently focused element".
//!
//! ```text
//!            bootstrap (pool non-empty)
//!   Unset ───────────────────────────────► Focused(e)
//!     ▲                                      │  move(d) → Focused(e')
//!     └──── focused element left the pool ───┘  move(d), no candidate → unchanged
//! ```
//!
//! Activate and Back are effects, not transitions; they live on the engine.

use std::fmt::Debug;

use log::debug;

use crate::core::geometry::NavigableElement;
use crate::core::host::Host;
use crate::core::selector::{self, Direction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusState<E> {
    Unset,
    Focused(E),
}

impl<E: Copy> FocusState<E> {
    pub fn element(&self) -> Option<E> {
        match self {
            FocusState::Unset => None,
            FocusState::Focused(e) => Some(*e),
        }
    }
}

/// What a move request did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome<E> {
    /// Focus moved to a neighbor.
    Moved(E),
    /// Nothing was focused (or the focused element vanished), so the first
    /// eligible element was focused instead.
    Bootstrapped(E),
    /// No candidate in that direction; focus unchanged.
    Stayed,
    /// The pool was empty.
    Empty,
}

#[derive(Debug)]
pub struct FocusMachine<E> {
    state: FocusState<E>,
}

impl<E> Default for FocusMachine<E> {
    fn default() -> Self {
        Self {
            state: FocusState::Unset,
        }
    }
}

impl<E> FocusMachine<E>
where
    E: Copy + Eq + Debug,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> FocusState<E> {
        self.state
    }

    /// Focuses the first element of `pool` (document order). Only acts from
    /// `Unset`; returns the element focused by this call.
    pub fn bootstrap<H>(&mut self, host: &mut H, pool: &[NavigableElement<E>]) -> Option<E>
    where
        H: Host<Element = E>,
    {
        if let FocusState::Focused(_) = self.state {
            return None;
        }
        let first = pool.first()?.element();
        self.focus(host, first);
        debug!("Bootstrapped focus on {:?}", first);
        Some(first)
    }

    /// Moves focus in `direction` using a freshly computed `pool`.
    ///
    /// If the focused element is no longer in the pool the state reverts to
    /// `Unset` and the request bootstraps instead.
    pub fn move_focus<H>(
        &mut self,
        host: &mut H,
        pool: &[NavigableElement<E>],
        direction: Direction,
        dead_zone: f64,
    ) -> MoveOutcome<E>
    where
        H: Host<Element = E>,
    {
        if pool.is_empty() {
            return MoveOutcome::Empty;
        }

        let current = self
            .state
            .element()
            .and_then(|e| pool.iter().find(|n| n.element() == e));

        let Some(current) = current else {
            if self.state != FocusState::Unset {
                debug!("Focused element {:?} left the pool", self.state);
                self.state = FocusState::Unset;
            }
            return match self.bootstrap(host, pool) {
                Some(e) => MoveOutcome::Bootstrapped(e),
                None => MoveOutcome::Empty,
            };
        };

        match selector::select(current, direction, pool, dead_zone) {
            Some(next) => {
                debug!("Move {} {:?} → {:?}", direction.label(), current.element(), next);
                self.focus(host, next);
                MoveOutcome::Moved(next)
            }
            None => {
                debug!("Move {} from {:?}: no candidate", direction.label(), current.element());
                MoveOutcome::Stayed
            }
        }
    }

    /// The element Activate should target: whatever holds platform focus,
    /// falling back to our own state when the platform reports nothing.
    pub fn activation_target<H>(&self, host: &H) -> Option<E>
    where
        H: Host<Element = E>,
    {
        host.active_element().or_else(|| self.state.element())
    }

    fn focus<H>(&mut self, host: &mut H, element: E)
    where
        H: Host<Element = E>,
    {
        self.state = FocusState::Focused(element);
        host.focus(element);
    }
}
