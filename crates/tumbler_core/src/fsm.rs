//! Column interaction state machine
//!
//! Each wheel column is either at rest, following a finger, or settling onto
//! a slot. States are plain enums that react to `u32` event ids, so a column
//! can be driven without any closures or allocation:
//!
//! ```text
//! Idle --DRAG_START--> Dragging --DRAG_END--> Settling --SETTLED--> Idle
//!                         ^                      |
//!                         +------DRAG_START------+
//! ```

use std::hash::Hash;

/// Trait for enum state types that transition on event ids
///
/// # Example
///
/// ```
/// use tumbler_core::fsm::StateTransitions;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// enum Door {
///     #[default]
///     Closed,
///     Open,
/// }
///
/// impl StateTransitions for Door {
///     fn on_event(&self, event: u32) -> Option<Self> {
///         match (self, event) {
///             (Door::Closed, 1) => Some(Door::Open),
///             (Door::Open, 2) => Some(Door::Closed),
///             _ => None,
///         }
///     }
/// }
///
/// let mut door = Door::default();
/// assert!(door.send(1));
/// assert_eq!(door, Door::Open);
/// assert!(!door.send(1));
/// ```
pub trait StateTransitions:
    Clone + Copy + PartialEq + Eq + Hash + Send + Sync + std::fmt::Debug + 'static
{
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: u32) -> Option<Self>;

    /// Apply an event in place, returning whether a transition happened
    fn send(&mut self, event: u32) -> bool {
        match self.on_event(event) {
            Some(next) => {
                tracing::trace!("state {:?} --{}--> {:?}", self, event, next);
                *self = next;
                true
            }
            None => false,
        }
    }
}

/// Events understood by [`ColumnState`]
pub mod column_events {
    /// Finger or pointer pressed on the column
    pub const DRAG_START: u32 = 100;
    /// Drag released, momentum hand-off
    pub const DRAG_END: u32 = 101;
    /// Settle animation reached its slot
    pub const SETTLED: u32 = 102;
    /// Settle requested without a drag (wheel, keyboard, relayout)
    pub const NUDGE: u32 = 103;
    /// Interaction aborted (programmatic set, teardown)
    pub const CANCEL: u32 = 104;
}

/// Interaction state of one wheel column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColumnState {
    #[default]
    Idle,
    /// Offset follows the pointer, no animation may run
    Dragging,
    /// Momentum animation is driving the offset to a slot
    Settling,
}

impl ColumnState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, ColumnState::Dragging)
    }

    /// Whether the column offset may still change without further input
    pub fn is_active(&self) -> bool {
        !matches!(self, ColumnState::Idle)
    }
}

impl StateTransitions for ColumnState {
    fn on_event(&self, event: u32) -> Option<Self> {
        use column_events::*;
        match (self, event) {
            (ColumnState::Idle, DRAG_START) => Some(ColumnState::Dragging),
            // Grabbing a moving wheel cancels its settle
            (ColumnState::Settling, DRAG_START) => Some(ColumnState::Dragging),
            (ColumnState::Dragging, DRAG_END) => Some(ColumnState::Settling),
            (ColumnState::Idle, NUDGE) => Some(ColumnState::Settling),
            (ColumnState::Settling, NUDGE) => Some(ColumnState::Settling),
            (ColumnState::Settling, SETTLED) => Some(ColumnState::Idle),
            (ColumnState::Dragging | ColumnState::Settling, CANCEL) => Some(ColumnState::Idle),
            _ => None,
        }
    }
}
