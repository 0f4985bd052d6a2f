//! Tumbler Core
//!
//! Foundational primitives shared by the Tumbler crates:
//!
//! - **Input Events**: pointer, touch, wheel and key input in one shape
//! - **State Machines**: enum statecharts for column interaction states

pub mod events;
pub mod fsm;

pub use events::{event_types, EventData, EventType, InputEvent, KeyCode, TouchPoint};
pub use fsm::{column_events, ColumnState, StateTransitions};
