//! Like/dislike overlay feedback derived from drag or commit state.

use crate::queue::SwipeAction;

/// Opacity cap while dragging, so the card stays legible under the overlay.
const DRAG_INTENSITY_CAP: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayKind {
    Like,
    Dislike,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayState {
    pub kind: Option<OverlayKind>,
    pub intensity: f64,
}

impl OverlayState {
    pub fn clear() -> Self {
        Self {
            kind: None,
            intensity: 0.0,
        }
    }

    /// Live feedback while a drag is in flight. Intensity ramps at twice the
    /// drag fraction and caps at 60%.
    pub fn for_drag(translate_x: f64, viewport_width: f64) -> Self {
        if translate_x == 0.0 || viewport_width <= 0.0 {
            return Self::clear();
        }
        let drag_percent = translate_x.abs() / viewport_width;
        let kind = if translate_x > 0.0 {
            OverlayKind::Like
        } else {
            OverlayKind::Dislike
        };
        Self {
            kind: Some(kind),
            intensity: (drag_percent * 2.0).min(DRAG_INTENSITY_CAP),
        }
    }

    /// Full-intensity feedback held for the whole commit-animation window.
    pub fn committed(action: SwipeAction) -> Self {
        let kind = match action {
            SwipeAction::Like => OverlayKind::Like,
            SwipeAction::Dislike => OverlayKind::Dislike,
        };
        Self {
            kind: Some(kind),
            intensity: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_card_shows_nothing() {
        let state = OverlayState::for_drag(0.0, 1000.0);
        assert_eq!(state, OverlayState::clear());
    }

    #[test]
    fn drag_direction_picks_the_kind() {
        assert_eq!(
            OverlayState::for_drag(120.0, 1000.0).kind,
            Some(OverlayKind::Like)
        );
        assert_eq!(
            OverlayState::for_drag(-120.0, 1000.0).kind,
            Some(OverlayKind::Dislike)
        );
    }

    #[test]
    fn intensity_ramps_double_and_caps_at_sixty_percent() {
        let ramp = OverlayState::for_drag(100.0, 1000.0);
        assert!((ramp.intensity - 0.2).abs() < 1e-9);

        let capped = OverlayState::for_drag(900.0, 1000.0);
        assert!((capped.intensity - 0.6).abs() < 1e-9);
    }

    #[test]
    fn committed_overlay_is_full_intensity() {
        let state = OverlayState::committed(SwipeAction::Dislike);
        assert_eq!(state.kind, Some(OverlayKind::Dislike));
        assert_eq!(state.intensity, 1.0);
    }
}
