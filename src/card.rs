//! Commit state machine for the card: gesture swipes and the manual buttons
//! both funnel through one `begin_commit`/`finish_commit` pair, so the
//! animation window can never be skipped or entered twice.

use crate::queue::SwipeAction;

/// How long the full-intensity overlay holds before the queue advances.
pub const COMMIT_ANIMATION_MS: u32 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardPhase {
    /// Awaiting gesture or button input.
    Idle,
    /// Animation window open, input locked.
    Committing(SwipeAction),
    /// No sneakers remain; terminal.
    Exhausted,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardMachine {
    phase: CardPhase,
}

impl Default for CardMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl CardMachine {
    pub fn new() -> Self {
        Self {
            phase: CardPhase::Idle,
        }
    }

    pub fn phase(&self) -> CardPhase {
        self.phase
    }

    pub fn is_committing(&self) -> bool {
        matches!(self.phase, CardPhase::Committing(_))
    }

    pub fn accepts_input(&self) -> bool {
        self.phase == CardPhase::Idle
    }

    /// Opens the animation window for `action`. Returns false (and changes
    /// nothing) when a window is already open or the deck is exhausted.
    pub fn begin_commit(&mut self, action: SwipeAction) -> bool {
        if self.phase != CardPhase::Idle {
            return false;
        }
        self.phase = CardPhase::Committing(action);
        true
    }

    /// Closes the animation window, handing back the stored action so the
    /// caller can advance the queue. `queue_exhausted` decides whether the
    /// machine returns to `Idle` for the next card or terminates.
    pub fn finish_commit(&mut self, queue_exhausted: bool) -> Option<SwipeAction> {
        let CardPhase::Committing(action) = self.phase else {
            return None;
        };
        self.phase = if queue_exhausted {
            CardPhase::Exhausted
        } else {
            CardPhase::Idle
        };
        Some(action)
    }
}
