//! Input event vocabulary
//!
//! Pointer, touch, wheel and key input reduced to one platform-agnostic shape.
//! Hosts translate their native events into [`InputEvent`] and route them to
//! the column they hit.

use smallvec::SmallVec;

/// Event type identifier
pub type EventType = u32;

/// Common event types
pub mod event_types {
    use super::EventType;

    pub const POINTER_DOWN: EventType = 1;
    pub const POINTER_UP: EventType = 2;
    pub const POINTER_MOVE: EventType = 3;
    /// Pointer left the column bounds
    pub const POINTER_LEAVE: EventType = 5;
    pub const TOUCH_START: EventType = 10;
    pub const TOUCH_MOVE: EventType = 11;
    pub const TOUCH_END: EventType = 12;
    /// Touch sequence interrupted by the platform
    pub const TOUCH_CANCEL: EventType = 13;
    pub const KEY_DOWN: EventType = 20;
    /// Mouse wheel or trackpad scroll
    pub const WHEEL: EventType = 30;
}

/// A single contact point of a touch event
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchPoint {
    /// Platform identifier, stable for the lifetime of the contact
    pub id: u64,
    pub y: f32,
}

/// Virtual key codes the wheel reacts to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct KeyCode(pub u32);

impl KeyCode {
    pub const UP: KeyCode = KeyCode(0x26);
    pub const DOWN: KeyCode = KeyCode(0x28);
    pub const PAGE_UP: KeyCode = KeyCode(0x21);
    pub const PAGE_DOWN: KeyCode = KeyCode(0x22);
    pub const HOME: KeyCode = KeyCode(0x24);
    pub const END: KeyCode = KeyCode(0x23);

    // Unknown/unmapped key
    pub const UNKNOWN: KeyCode = KeyCode(0);
}

/// Event-specific data
#[derive(Clone, Debug, PartialEq)]
pub enum EventData {
    Pointer {
        y: f32,
    },
    Touch {
        /// Changed touches; the first one drives the drag
        touches: SmallVec<[TouchPoint; 2]>,
    },
    Wheel {
        delta_y: f32,
    },
    Key {
        key: KeyCode,
    },
    None,
}

/// An input event addressed to one column of a picker
#[derive(Clone, Debug, PartialEq)]
pub struct InputEvent {
    pub event_type: EventType,
    /// Positional column index the event hit
    pub column: usize,
    pub data: EventData,
    /// Milliseconds, monotonic
    pub timestamp: f64,
}

impl InputEvent {
    pub fn new(event_type: EventType, column: usize, data: EventData, timestamp: f64) -> Self {
        Self {
            event_type,
            column,
            data,
            timestamp,
        }
    }

    pub fn pointer_down(column: usize, y: f32, timestamp: f64) -> Self {
        Self::new(
            event_types::POINTER_DOWN,
            column,
            EventData::Pointer { y },
            timestamp,
        )
    }

    pub fn pointer_move(column: usize, y: f32, timestamp: f64) -> Self {
        Self::new(
            event_types::POINTER_MOVE,
            column,
            EventData::Pointer { y },
            timestamp,
        )
    }

    pub fn pointer_up(column: usize, y: f32, timestamp: f64) -> Self {
        Self::new(
            event_types::POINTER_UP,
            column,
            EventData::Pointer { y },
            timestamp,
        )
    }

    pub fn pointer_leave(column: usize, timestamp: f64) -> Self {
        Self::new(event_types::POINTER_LEAVE, column, EventData::None, timestamp)
    }

    /// Touch event carrying a single contact point
    pub fn touch(event_type: EventType, column: usize, id: u64, y: f32, timestamp: f64) -> Self {
        let mut touches = SmallVec::new();
        touches.push(TouchPoint { id, y });
        Self::new(event_type, column, EventData::Touch { touches }, timestamp)
    }

    pub fn wheel(column: usize, delta_y: f32, timestamp: f64) -> Self {
        Self::new(
            event_types::WHEEL,
            column,
            EventData::Wheel { delta_y },
            timestamp,
        )
    }

    pub fn key(column: usize, key: KeyCode, timestamp: f64) -> Self {
        Self::new(
            event_types::KEY_DOWN,
            column,
            EventData::Key { key },
            timestamp,
        )
    }

    /// Vertical position of the contact driving this event, if it has one
    ///
    /// For touch events this is the first changed touch.
    pub fn y(&self) -> Option<f32> {
        match &self.data {
            EventData::Pointer { y } => Some(*y),
            EventData::Touch { touches } => touches.first().map(|t| t.y),
            _ => None,
        }
    }

    /// Identifier of the contact driving this event
    ///
    /// Pointer events share a single implicit contact id of 0.
    pub fn contact_id(&self) -> Option<u64> {
        match &self.data {
            EventData::Pointer { .. } => Some(0),
            EventData::Touch { touches } => touches.first().map(|t| t.id),
            _ => None,
        }
    }
}
