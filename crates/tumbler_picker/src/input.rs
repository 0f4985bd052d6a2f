//! Drag tracking
//!
//! Turns pointer and touch streams into one drag contract per column:
//! start, live offset updates and a projected release target. Wheel and key
//! input become whole-slot nudges that settle through the same animator.

use tumbler_core::events::{event_types, EventData, InputEvent, KeyCode};

/// Rows moved by page up / page down
pub const PAGE_ROWS: f32 = 5.0;

/// What the picker should do with a column after an input event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragUpdate {
    /// A drag began; any settle on the column must be cancelled
    Started,
    /// Live offset while dragging
    Moved { offset: f32 },
    /// Drag released; settle towards `target`
    Released { target: f32, velocity: f32 },
    /// Discrete scroll (wheel, key); settle towards `target`
    Nudged { target: f32 },
}

/// Column geometry needed to turn discrete input into offsets
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnGeometry {
    pub item_height: f32,
    pub item_count: usize,
}

impl ColumnGeometry {
    fn max_offset(&self) -> f32 {
        self.item_count.saturating_sub(1) as f32 * self.item_height
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ActiveDrag {
    contact: u64,
    origin_y: f32,
    origin_offset: f32,
    previous_y: f32,
    previous_time: f64,
    offset: f32,
}

/// Per-column drag state and velocity estimate
#[derive(Debug, Clone, PartialEq)]
pub struct InputTracker {
    momentum_multiplier: f32,
    drag: Option<ActiveDrag>,
    /// Pixels per millisecond, positive when scrolling towards later values
    velocity: f32,
}

impl InputTracker {
    pub fn new(momentum_multiplier: f32) -> Self {
        Self {
            momentum_multiplier,
            drag: None,
            velocity: 0.0,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    /// Route a raw input event
    ///
    /// `offset` is the column's current scroll offset. Returns `None` for
    /// events that do not affect the column (moves without a drag, a second
    /// finger, unmapped keys).
    pub fn handle(
        &mut self,
        event: &InputEvent,
        offset: f32,
        geometry: ColumnGeometry,
    ) -> Option<DragUpdate> {
        use event_types::*;
        match event.event_type {
            POINTER_DOWN | TOUCH_START => {
                let y = event.y().filter(|y| y.is_finite())?;
                if self.is_dragging() {
                    // Additional contact while one already drives the column
                    return None;
                }
                self.drag_start(event.contact_id().unwrap_or(0), y, event.timestamp, offset);
                Some(DragUpdate::Started)
            }
            POINTER_MOVE | TOUCH_MOVE => {
                let y = self.contact_y(event)?;
                self.drag_move(y, event.timestamp).map(|offset| DragUpdate::Moved { offset })
            }
            POINTER_UP | TOUCH_END | TOUCH_CANCEL => {
                if !self.owns_contact(event) {
                    return None;
                }
                self.release()
            }
            // Leaving the column mid-drag releases it
            POINTER_LEAVE => self.release(),
            WHEEL => {
                if self.is_dragging() {
                    return None;
                }
                let EventData::Wheel { delta_y } = event.data else {
                    return None;
                };
                if delta_y == 0.0 || !delta_y.is_finite() {
                    return None;
                }
                let step = geometry.item_height * delta_y.signum();
                Some(DragUpdate::Nudged {
                    target: offset + step,
                })
            }
            KEY_DOWN => {
                if self.is_dragging() {
                    return None;
                }
                let EventData::Key { key } = event.data else {
                    return None;
                };
                let target = match key {
                    KeyCode::UP => offset - geometry.item_height,
                    KeyCode::DOWN => offset + geometry.item_height,
                    KeyCode::PAGE_UP => offset - geometry.item_height * PAGE_ROWS,
                    KeyCode::PAGE_DOWN => offset + geometry.item_height * PAGE_ROWS,
                    KeyCode::HOME => 0.0,
                    KeyCode::END => geometry.max_offset(),
                    _ => return None,
                };
                Some(DragUpdate::Nudged { target })
            }
            _ => None,
        }
    }

    /// Begin a drag at `y` with the column at `offset`
    pub fn drag_start(&mut self, contact: u64, y: f32, timestamp: f64, offset: f32) {
        tracing::trace!("drag start y={:.1} offset={:.1}", y, offset);
        self.velocity = 0.0;
        self.drag = Some(ActiveDrag {
            contact,
            origin_y: y,
            origin_offset: offset,
            previous_y: y,
            previous_time: timestamp,
            offset,
        });
    }

    /// Follow the pointer; returns the new live offset
    ///
    /// Offsets are not clamped so the wheel can be pulled past its ends.
    /// Samples with a non-finite coordinate are dropped.
    pub fn drag_move(&mut self, y: f32, timestamp: f64) -> Option<f32> {
        let drag = self.drag.as_mut()?;
        if !y.is_finite() {
            tracing::trace!("drag move ignored: y={}", y);
            return None;
        }
        drag.offset = drag.origin_offset + (drag.origin_y - y);

        let dt = timestamp - drag.previous_time;
        if dt != 0.0 {
            let velocity = ((drag.previous_y - y) as f64 / dt) as f32;
            if velocity.is_finite() {
                self.velocity = velocity;
            }
        }
        drag.previous_y = y;
        if timestamp.is_finite() {
            drag.previous_time = timestamp;
        }

        tracing::trace!("drag move offset={:.1} v={:.3}", drag.offset, self.velocity);
        Some(drag.offset)
    }

    /// End the drag; returns the projected momentum target
    pub fn drag_end(&mut self) -> Option<f32> {
        let drag = self.drag.take()?;
        let target = drag.offset + self.velocity * self.momentum_multiplier;
        tracing::trace!(
            "drag end offset={:.1} v={:.3} -> target {:.1}",
            drag.offset,
            self.velocity,
            target
        );
        Some(target)
    }

    /// Drop an active drag without producing a release
    pub fn cancel(&mut self) {
        self.drag = None;
        self.velocity = 0.0;
    }

    fn release(&mut self) -> Option<DragUpdate> {
        let velocity = self.velocity;
        self.drag_end()
            .map(|target| DragUpdate::Released { target, velocity })
    }

    fn owns_contact(&self, event: &InputEvent) -> bool {
        match (&self.drag, event.contact_id()) {
            (Some(drag), Some(contact)) => drag.contact == contact,
            // Touch end without changed touches still ends the drag
            (Some(_), None) => true,
            (None, _) => false,
        }
    }

    fn contact_y(&self, event: &InputEvent) -> Option<f32> {
        let drag = self.drag.as_ref()?;
        match &event.data {
            EventData::Touch { touches } => touches
                .iter()
                .find(|t| t.id == drag.contact)
                .map(|t| t.y),
            _ => event.y(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GEOMETRY: ColumnGeometry = ColumnGeometry {
        item_height: 40.0,
        item_count: 12,
    };

    #[test]
    fn test_drag_follows_pointer_unclamped() {
        let mut tracker = InputTracker::new(20.0);
        tracker.drag_start(0, 200.0, 0.0, 80.0);
        assert_eq!(tracker.drag_move(150.0, 16.0), Some(130.0));
        // Pulled past the top
        assert_eq!(tracker.drag_move(400.0, 32.0), Some(-120.0));
        assert!(tracker.is_dragging());
    }

    #[test]
    fn test_velocity_from_last_sample() {
        let mut tracker = InputTracker::new(20.0);
        tracker.drag_start(0, 200.0, 0.0, 0.0);
        tracker.drag_move(180.0, 10.0);
        assert_eq!(tracker.velocity(), 2.0);
        tracker.drag_move(170.0, 20.0);
        assert_eq!(tracker.velocity(), 1.0);
        // Same timestamp keeps the previous estimate
        tracker.drag_move(100.0, 20.0);
        assert_eq!(tracker.velocity(), 1.0);
    }

    #[test]
    fn test_release_projects_momentum() {
        let mut tracker = InputTracker::new(20.0);
        tracker.drag_start(0, 200.0, 0.0, 0.0);
        tracker.drag_move(180.0, 10.0);
        assert_eq!(tracker.drag_end(), Some(20.0 + 2.0 * 20.0));
        assert!(!tracker.is_dragging());
        assert_eq!(tracker.drag_end(), None);
    }

    #[test]
    fn test_pointer_leave_ends_drag() {
        let mut tracker = InputTracker::new(20.0);
        let down = InputEvent::pointer_down(0, 100.0, 0.0);
        assert_eq!(tracker.handle(&down, 0.0, GEOMETRY), Some(DragUpdate::Started));

        let leave = InputEvent::pointer_leave(0, 5.0);
        assert_eq!(
            tracker.handle(&leave, 0.0, GEOMETRY),
            Some(DragUpdate::Released {
                target: 0.0,
                velocity: 0.0
            })
        );
        assert!(!tracker.is_dragging());
        // Leaving again is a no-op
        assert_eq!(tracker.handle(&leave, 0.0, GEOMETRY), None);
    }

    #[test]
    fn test_moves_without_drag_are_ignored() {
        let mut tracker = InputTracker::new(20.0);
        let moved = InputEvent::pointer_move(0, 10.0, 0.0);
        assert_eq!(tracker.handle(&moved, 0.0, GEOMETRY), None);
        let up = InputEvent::pointer_up(0, 10.0, 0.0);
        assert_eq!(tracker.handle(&up, 0.0, GEOMETRY), None);
    }

    #[test]
    fn test_touch_tracks_first_contact() {
        use event_types::*;
        let mut tracker = InputTracker::new(20.0);
        let start = InputEvent::touch(TOUCH_START, 0, 7, 300.0, 0.0);
        assert_eq!(tracker.handle(&start, 0.0, GEOMETRY), Some(DragUpdate::Started));

        // Second finger neither restarts nor ends the drag
        let other = InputEvent::touch(TOUCH_START, 0, 8, 10.0, 1.0);
        assert_eq!(tracker.handle(&other, 0.0, GEOMETRY), None);
        let other_end = InputEvent::touch(TOUCH_END, 0, 8, 10.0, 2.0);
        assert_eq!(tracker.handle(&other_end, 0.0, GEOMETRY), None);

        let moved = InputEvent::touch(TOUCH_MOVE, 0, 7, 260.0, 10.0);
        assert_eq!(
            tracker.handle(&moved, 0.0, GEOMETRY),
            Some(DragUpdate::Moved { offset: 40.0 })
        );

        let cancel = InputEvent::touch(TOUCH_CANCEL, 0, 7, 260.0, 12.0);
        assert!(matches!(
            tracker.handle(&cancel, 40.0, GEOMETRY),
            Some(DragUpdate::Released { .. })
        ));
    }

    #[test]
    fn test_wheel_and_keys_nudge_by_slot() {
        let mut tracker = InputTracker::new(20.0);
        assert_eq!(
            tracker.handle(&InputEvent::wheel(0, 3.0, 0.0), 80.0, GEOMETRY),
            Some(DragUpdate::Nudged { target: 120.0 })
        );
        assert_eq!(
            tracker.handle(&InputEvent::wheel(0, -120.0, 0.0), 80.0, GEOMETRY),
            Some(DragUpdate::Nudged { target: 40.0 })
        );
        assert_eq!(
            tracker.handle(&InputEvent::key(0, KeyCode::END, 0.0), 80.0, GEOMETRY),
            Some(DragUpdate::Nudged { target: 440.0 })
        );
        assert_eq!(
            tracker.handle(&InputEvent::key(0, KeyCode::PAGE_UP, 0.0), 80.0, GEOMETRY),
            Some(DragUpdate::Nudged { target: -120.0 })
        );
        assert_eq!(
            tracker.handle(&InputEvent::key(0, KeyCode::UNKNOWN, 0.0), 80.0, GEOMETRY),
            None
        );
    }

    #[test]
    fn test_non_finite_samples_are_dropped() {
        let mut tracker = InputTracker::new(20.0);
        let down = InputEvent::pointer_down(0, f32::NAN, 0.0);
        assert_eq!(tracker.handle(&down, 0.0, GEOMETRY), None);
        assert!(!tracker.is_dragging());

        tracker.drag_start(0, 200.0, 0.0, 80.0);
        assert_eq!(tracker.drag_move(f32::NAN, 10.0), None);
        assert_eq!(tracker.drag_move(f32::INFINITY, 20.0), None);
        assert_eq!(tracker.drag_move(180.0, f64::NAN), Some(100.0));
        assert_eq!(tracker.velocity(), 0.0);
        assert_eq!(tracker.drag_end(), Some(100.0));
    }

    #[test]
    fn test_wheel_ignored_while_dragging() {
        let mut tracker = InputTracker::new(20.0);
        tracker.drag_start(0, 0.0, 0.0, 0.0);
        assert_eq!(
            tracker.handle(&InputEvent::wheel(0, 3.0, 0.0), 0.0, GEOMETRY),
            None
        );
    }
}
