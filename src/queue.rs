//! Ordered sneaker queue with an append-only interaction log.

use crate::data::Sneaker;
use crate::swipe::SwipeDirection;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeAction {
    Like,
    Dislike,
}

impl SwipeAction {
    pub fn from_direction(direction: SwipeDirection) -> Self {
        match direction {
            SwipeDirection::Right => SwipeAction::Like,
            SwipeDirection::Left => SwipeAction::Dislike,
        }
    }
}

/// One recorded decision. Records are only ever appended, never rewritten.
#[derive(Debug, Clone, PartialEq)]
pub struct Interaction {
    pub sneaker_index: usize,
    pub action: SwipeAction,
    pub timestamp_ms: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SneakerQueue {
    sneakers: Vec<Sneaker>,
    cursor: usize,
    interactions: Vec<Interaction>,
}

impl SneakerQueue {
    pub fn new(sneakers: Vec<Sneaker>) -> Self {
        Self {
            sneakers,
            cursor: 0,
            interactions: Vec::new(),
        }
    }

    pub fn current(&self) -> Option<&Sneaker> {
        self.sneakers.get(self.cursor)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.sneakers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sneakers.is_empty()
    }

    pub fn interactions(&self) -> &[Interaction] {
        &self.interactions
    }

    pub fn is_complete(&self) -> bool {
        self.cursor >= self.sneakers.len()
    }

    /// Primary images of the next `count` sneakers past the cursor, used to
    /// warm the browser cache before those cards come up.
    pub fn upcoming_images(&self, count: usize) -> Vec<String> {
        self.sneakers
            .iter()
            .skip(self.cursor + 1)
            .take(count)
            .filter_map(|sneaker| sneaker.images.first().cloned())
            .collect()
    }

    /// Records one decision for the current sneaker and advances the cursor
    /// by exactly one. No-op once the queue is exhausted. The timestamp comes
    /// from the caller (`js_sys::Date::now()` in the app).
    pub fn commit(&mut self, action: SwipeAction, timestamp_ms: f64) {
        if self.is_complete() {
            return;
        }
        self.interactions.push(Interaction {
            sneaker_index: self.cursor,
            action,
            timestamp_ms,
        });
        self.cursor += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sneaker(name: &str) -> Sneaker {
        Sneaker {
            name: name.to_string(),
            description: "classic".to_string(),
            purchase_type: "online".to_string(),
            availability_type: "stock".to_string(),
            images: vec!["a.jpg".to_string()],
            info_box_bg: None,
        }
    }

    fn four_sneakers() -> Vec<Sneaker> {
        ["dunk", "blazer", "janoski", "force"]
            .iter()
            .map(|n| sneaker(n))
            .collect()
    }

    #[test]
    fn commit_advances_cursor_and_appends_one_record() {
        let mut queue = SneakerQueue::new(four_sneakers());
        assert_eq!(queue.current().map(|s| s.name.as_str()), Some("dunk"));

        queue.commit(SwipeAction::Like, 1.0);
        assert_eq!(queue.cursor(), 1);
        assert_eq!(queue.interactions().len(), 1);
        assert_eq!(queue.interactions()[0].sneaker_index, 0);
        assert_eq!(queue.interactions()[0].action, SwipeAction::Like);
        assert_eq!(queue.current().map(|s| s.name.as_str()), Some("blazer"));
    }

    #[test]
    fn completes_after_all_items_and_stays_complete() {
        let mut queue = SneakerQueue::new(four_sneakers());
        let actions = [
            SwipeAction::Like,
            SwipeAction::Dislike,
            SwipeAction::Dislike,
            SwipeAction::Like,
        ];
        for (i, action) in actions.iter().enumerate() {
            assert!(!queue.is_complete());
            queue.commit(*action, i as f64);
        }
        assert!(queue.is_complete());
        assert!(queue.current().is_none());

        let indices: Vec<usize> = queue.interactions().iter().map(|r| r.sneaker_index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
        assert!(queue.is_complete());
    }

    #[test]
    fn commit_after_exhaustion_is_a_no_op() {
        let mut queue = SneakerQueue::new(vec![sneaker("dunk")]);
        queue.commit(SwipeAction::Like, 1.0);
        queue.commit(SwipeAction::Dislike, 2.0);
        assert_eq!(queue.cursor(), 1);
        assert_eq!(queue.interactions().len(), 1);
    }

    #[test]
    fn upcoming_images_track_the_cursor() {
        let mut queue = SneakerQueue::new(four_sneakers());
        // Each sample sneaker carries one image named "a.jpg".
        assert_eq!(queue.upcoming_images(2).len(), 2);

        queue.commit(SwipeAction::Like, 1.0);
        queue.commit(SwipeAction::Like, 2.0);
        // Cursor at 2 of 4: only one sneaker left to look ahead to.
        assert_eq!(queue.upcoming_images(2).len(), 1);

        queue.commit(SwipeAction::Dislike, 3.0);
        queue.commit(SwipeAction::Dislike, 4.0);
        assert!(queue.upcoming_images(2).is_empty());
    }

    #[test]
    fn action_maps_from_direction() {
        use crate::swipe::SwipeDirection;
        assert_eq!(
            SwipeAction::from_direction(SwipeDirection::Right),
            SwipeAction::Like
        );
        assert_eq!(
            SwipeAction::from_direction(SwipeDirection::Left),
            SwipeAction::Dislike
        );
    }
}
