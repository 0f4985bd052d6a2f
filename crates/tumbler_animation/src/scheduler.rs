//! Animation scheduler
//!
//! Holds every active settle animation and advances them one step per frame.
//! Frames are not driven by a timer: the scheduler asks its [`FrameScheduler`]
//! for a one-shot callback whenever work remains, and the host answers by
//! calling [`AnimationScheduler::tick`] on its next frame.

use std::cell::Cell;
use std::rc::Rc;

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::settle::{SettleAnimation, SettleStep};

new_key_type! {
    /// Handle to an active settle animation
    pub struct SettleId;
}

/// Host hook for requesting a frame callback
///
/// Implementations forward to the platform's per-frame mechanism
/// (vsync callback, `requestAnimationFrame`, an event-loop redraw request).
/// Requests are one-shot; repeated requests before the frame fires may be
/// coalesced.
pub trait FrameScheduler {
    /// Ask the host to call `tick()` on the next frame
    fn request_frame(&mut self);
}

/// Deterministic frame scheduler for tests and headless hosts
///
/// Requests set a pending flag; the driver fires frames explicitly:
///
/// ```
/// use tumbler_animation::{AnimationScheduler, ManualFrames, SettleAnimation, SettleConfig};
///
/// let frames = ManualFrames::new();
/// let mut scheduler = AnimationScheduler::new(Box::new(frames.clone()));
/// scheduler.add_settle(SettleAnimation::new(SettleConfig::default(), 10.0, 35.0, 40.0, 3));
///
/// let mut ticks = 0;
/// while frames.take_frame() {
///     scheduler.tick();
///     ticks += 1;
/// }
/// assert!(ticks > 1);
/// assert!(!scheduler.has_active_animations());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualFrames {
    pending: Rc<Cell<bool>>,
    requests: Rc<Cell<u64>>,
}

impl ManualFrames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the pending frame request, if any
    pub fn take_frame(&self) -> bool {
        self.pending.replace(false)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.get()
    }

    /// Total number of requests received, including coalesced ones
    pub fn request_count(&self) -> u64 {
        self.requests.get()
    }
}

impl FrameScheduler for ManualFrames {
    fn request_frame(&mut self) {
        self.pending.set(true);
        self.requests.set(self.requests.get() + 1);
    }
}

/// Steps produced by one scheduler tick, keyed by animation
pub type TickSteps = SmallVec<[(SettleId, SettleStep); 4]>;

/// The animation scheduler that ticks all active settles
pub struct AnimationScheduler {
    settles: SlotMap<SettleId, SettleAnimation>,
    frames: Box<dyn FrameScheduler>,
}

impl AnimationScheduler {
    pub fn new(frames: Box<dyn FrameScheduler>) -> Self {
        Self {
            settles: SlotMap::with_key(),
            frames,
        }
    }

    /// Register a settle and request a frame for its first step
    pub fn add_settle(&mut self, settle: SettleAnimation) -> SettleId {
        let id = self.settles.insert(settle);
        self.frames.request_frame();
        id
    }

    pub fn get_settle(&self, id: SettleId) -> Option<&SettleAnimation> {
        self.settles.get(id)
    }

    /// Cancel a settle; none of its steps run after this returns
    pub fn remove_settle(&mut self, id: SettleId) -> Option<SettleAnimation> {
        self.settles.remove(id)
    }

    /// Advance every active settle by one step
    ///
    /// Settles that reach their slot are removed and reported with their
    /// terminal step. Requests another frame while any settle remains.
    pub fn tick(&mut self) -> TickSteps {
        let mut steps = TickSteps::new();
        for (id, settle) in self.settles.iter_mut() {
            steps.push((id, settle.step()));
        }

        for (id, step) in &steps {
            if step.is_settled() {
                self.settles.remove(*id);
            }
        }

        if !self.settles.is_empty() {
            self.frames.request_frame();
        }
        steps
    }

    /// Check if any animations are still active
    pub fn has_active_animations(&self) -> bool {
        !self.settles.is_empty()
    }

    /// Get the number of settles in the scheduler
    pub fn settle_count(&self) -> usize {
        self.settles.len()
    }

    /// Cancel every active settle
    pub fn clear(&mut self) {
        self.settles.clear();
    }
}

impl std::fmt::Debug for AnimationScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationScheduler")
            .field("settles", &self.settles.len())
            .finish()
    }
}
