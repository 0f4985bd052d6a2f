//! Snap-to-slot settling
//!
//! A settle animation takes a released wheel column and moves its offset onto
//! the nearest item slot. Each frame closes a fixed fraction of the remaining
//! distance, so the distance shrinks geometrically and the animation always
//! terminates for a damping factor in `(0, 1)`.

/// Settle animation tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SettleConfig {
    /// Fraction of the remaining distance covered per frame, in `(0, 1)`
    pub damping: f32,
    /// Distance in pixels below which the offset snaps onto the slot
    pub epsilon: f32,
}

impl SettleConfig {
    pub fn new(damping: f32, epsilon: f32) -> Self {
        Self { damping, epsilon }
    }
}

impl Default for SettleConfig {
    fn default() -> Self {
        Self {
            damping: 0.15,
            epsilon: 0.5,
        }
    }
}

/// Result of a single settle step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SettleStep {
    /// Offset moved closer to the slot, another frame is needed
    Moving { offset: f32 },
    /// Offset landed exactly on slot `index`; terminal
    Settled { offset: f32, index: usize },
}

impl SettleStep {
    pub fn offset(&self) -> f32 {
        match self {
            SettleStep::Moving { offset } | SettleStep::Settled { offset, .. } => *offset,
        }
    }

    pub fn is_settled(&self) -> bool {
        matches!(self, SettleStep::Settled { .. })
    }
}

/// Index of the slot nearest to `target` for a column of `item_count` items
///
/// The target is clamped into `[0, (item_count - 1) * item_height]` first, so
/// overscrolled and projected momentum targets always map to a real item.
pub fn nearest_slot(target: f32, item_height: f32, item_count: usize) -> usize {
    if item_count == 0 || item_height.is_nan() || item_height <= 0.0 || !target.is_finite() {
        return 0;
    }
    let max_offset = (item_count - 1) as f32 * item_height;
    let clamped = target.clamp(0.0, max_offset);
    ((clamped / item_height).round() as usize).min(item_count - 1)
}

/// Momentum-driven snap of one column onto its nearest slot
#[derive(Debug, Clone)]
pub struct SettleAnimation {
    config: SettleConfig,
    offset: f32,
    target_index: usize,
    target_offset: f32,
    steps: u32,
    settled: bool,
}

impl SettleAnimation {
    /// Create a settle from the current `offset` towards the requested target
    ///
    /// `requested_target` may lie anywhere; it is clamped to the column's
    /// scroll range and rounded to the nearest slot. A non-finite target
    /// settles on the slot nearest to `offset`.
    pub fn new(
        config: SettleConfig,
        offset: f32,
        requested_target: f32,
        item_height: f32,
        item_count: usize,
    ) -> Self {
        let aim = if requested_target.is_finite() {
            requested_target
        } else {
            offset
        };
        let target_index = nearest_slot(aim, item_height, item_count);
        let target_offset = target_index as f32 * item_height.max(0.0);
        let offset = if offset.is_finite() {
            offset
        } else {
            target_offset
        };

        tracing::trace!(
            "settle: offset={:.1} requested={:.1} -> slot {} ({:.1})",
            offset,
            requested_target,
            target_index,
            target_offset
        );

        Self {
            config,
            offset,
            target_index,
            target_offset,
            steps: 0,
            settled: false,
        }
    }

    /// Advance one frame
    ///
    /// Once settled, further calls keep returning the terminal step.
    pub fn step(&mut self) -> SettleStep {
        if self.settled {
            return self.terminal();
        }
        self.steps += 1;

        let diff = self.target_offset - self.offset;
        if diff.abs() < self.config.epsilon {
            self.offset = self.target_offset;
            self.settled = true;
            return self.terminal();
        }

        self.offset += diff * self.config.damping;
        SettleStep::Moving {
            offset: self.offset,
        }
    }

    fn terminal(&self) -> SettleStep {
        SettleStep::Settled {
            offset: self.target_offset,
            index: self.target_index,
        }
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn target_index(&self) -> usize {
        self.target_index
    }

    pub fn target_offset(&self) -> f32 {
        self.target_offset
    }

    /// Frames stepped so far
    pub fn steps(&self) -> u32 {
        self.steps
    }

    pub fn is_settled(&self) -> bool {
        self.settled
    }
}
