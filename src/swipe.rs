//! Pointer-drag swipe tracking for a single card surface.
//!
//! The tracker is a small state machine fed raw pointer coordinates by the
//! view layer. It reports the live horizontal displacement while a drag is
//! active and decides on pointer-up whether the drag travelled far enough to
//! count as a committed swipe.

/// Fraction of the viewport width a drag must cover to commit.
pub const DEFAULT_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
struct Drag {
    pointer_id: i32,
    start_x: f64,
    translate_x: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwipeTracker {
    threshold: f64,
    enabled: bool,
    drag: Option<Drag>,
}

impl Default for SwipeTracker {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

impl SwipeTracker {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            enabled: true,
            drag: None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Current horizontal displacement, 0.0 when no drag is active.
    pub fn translate_x(&self) -> f64 {
        self.drag.as_ref().map(|d| d.translate_x).unwrap_or(0.0)
    }

    /// Starts tracking a new drag. Ignored while disabled or while another
    /// pointer already owns the drag.
    pub fn begin(&mut self, pointer_id: i32, start_x: f64) {
        if !self.enabled || self.drag.is_some() {
            return;
        }
        self.drag = Some(Drag {
            pointer_id,
            start_x,
            translate_x: 0.0,
        });
    }

    /// Updates the displacement from a pointer-move. The delta is capped at
    /// one full viewport width in either direction.
    pub fn update(&mut self, pointer_id: i32, current_x: f64, viewport_width: f64) {
        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        if drag.pointer_id != pointer_id {
            return;
        }
        let delta = current_x - drag.start_x;
        drag.translate_x = delta.clamp(-viewport_width, viewport_width);
    }

    /// Ends the drag. Returns the committed direction when the displacement
    /// covered at least `threshold` of the viewport width; sub-threshold
    /// drags spring back with no commit. The drag state is cleared either way.
    pub fn end(&mut self, pointer_id: i32, viewport_width: f64) -> Option<SwipeDirection> {
        let drag = self.drag.as_ref()?;
        if drag.pointer_id != pointer_id {
            return None;
        }
        let translate_x = drag.translate_x;
        self.drag = None;

        if viewport_width <= 0.0 {
            return None;
        }
        let percent_moved = translate_x.abs() / viewport_width;
        if percent_moved >= self.threshold {
            Some(if translate_x > 0.0 {
                SwipeDirection::Right
            } else {
                SwipeDirection::Left
            })
        } else {
            None
        }
    }

    /// Abandons the drag without a commit decision (pointer-cancel path).
    pub fn cancel(&mut self, pointer_id: i32) {
        if let Some(drag) = self.drag.as_ref() {
            if drag.pointer_id == pointer_id {
                self.drag = None;
            }
        }
    }

    /// Disabling mid-drag abandons the in-flight gesture without a commit.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.drag = None;
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}
