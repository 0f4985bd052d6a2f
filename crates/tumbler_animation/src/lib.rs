//! Tumbler Animation System
//!
//! Snap-to-slot settling and cooperative frame scheduling.
//!
//! # Features
//!
//! - **Settling**: geometric damping onto the nearest item slot
//! - **Scheduling**: one slot-map of active settles, stepped once per frame
//! - **Injectable frames**: hosts plug their frame callback in through
//!   [`FrameScheduler`]; [`ManualFrames`] drives tests deterministically
//! - **Cancellable**: removing a settle guarantees none of its steps run again

pub mod scheduler;
pub mod settle;

pub use scheduler::{AnimationScheduler, FrameScheduler, ManualFrames, SettleId, TickSteps};
pub use settle::{nearest_slot, SettleAnimation, SettleConfig, SettleStep};
