//! Show/hide lifecycle of an overlay.

use std::time::Instant;

use crate::animation::{AnimationState, Transition};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlayState {
    #[default]
    Hidden,
    Showing,
    Visible,
    Hiding,
}

impl OverlayState {
    /// Showing or Visible: the overlay holds focus and receives input.
    pub fn is_shown(self) -> bool {
        matches!(self, OverlayState::Showing | OverlayState::Visible)
    }

    pub fn is_transitioning(self) -> bool {
        matches!(self, OverlayState::Showing | OverlayState::Hiding)
    }
}

/// Why a hide started. Anything but `Explicit` ends in a cancel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HideReason {
    Explicit,
    /// Focus loss or a press outside the container with autohide on
    Autohide,
    /// The boundary left no room for the container
    Boundary,
}

/// Result of completing a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Finished {
    pub state: OverlayState,
    pub canceled: bool,
}

/// State plus the 0..1 transition progress driving it.
pub struct Lifecycle {
    state: OverlayState,
    progress: AnimationState<f32>,
    hide_reason: HideReason,
}

impl Lifecycle {
    pub fn new(transition: Transition) -> Self {
        Self {
            state: OverlayState::Hidden,
            progress: AnimationState::new(0.0, transition),
            hide_reason: HideReason::Explicit,
        }
    }

    pub fn state(&self) -> OverlayState {
        self.state
    }

    pub fn progress(&self) -> f32 {
        *self.progress.current()
    }

    pub fn hide_reason(&self) -> HideReason {
        self.hide_reason
    }

    pub fn set_transition(&mut self, transition: Transition) {
        self.progress.set_transition(transition);
    }

    /// Start or reverse toward Visible. Returns the new state if it changed.
    pub fn show(&mut self, now: Instant) -> Option<OverlayState> {
        match self.state {
            OverlayState::Showing | OverlayState::Visible => None,
            OverlayState::Hidden | OverlayState::Hiding => {
                self.progress.animate_to_at(1.0, now);
                self.state = OverlayState::Showing;
                Some(self.state)
            }
        }
    }

    /// Start or reverse toward Hidden. A hide already in flight keeps its
    /// original reason.
    pub fn hide(&mut self, reason: HideReason, now: Instant) -> Option<OverlayState> {
        match self.state {
            OverlayState::Hidden | OverlayState::Hiding => None,
            OverlayState::Showing | OverlayState::Visible => {
                self.progress.animate_to_at(0.0, now);
                self.hide_reason = reason;
                self.state = OverlayState::Hiding;
                Some(self.state)
            }
        }
    }

    /// Step the progress. Returns (progress changed, transition complete).
    pub fn advance(&mut self, now: Instant) -> (bool, bool) {
        let changed = self.progress.advance_at(now).is_changed();
        let complete = self.state.is_transitioning() && !self.progress.is_animating();
        (changed, complete)
    }

    pub fn is_animating(&self) -> bool {
        self.state.is_transitioning()
    }

    /// Settle the in-flight transition at its endpoint.
    pub fn finish(&mut self) -> Option<Finished> {
        let finished = match self.state {
            OverlayState::Showing => {
                self.progress.set_immediate(1.0);
                Finished {
                    state: OverlayState::Visible,
                    canceled: false,
                }
            }
            OverlayState::Hiding => {
                self.progress.set_immediate(0.0);
                Finished {
                    state: OverlayState::Hidden,
                    canceled: self.hide_reason != HideReason::Explicit,
                }
            }
            OverlayState::Hidden | OverlayState::Visible => return None,
        };
        self.state = finished.state;
        self.hide_reason = HideReason::Explicit;
        Some(finished)
    }
}
