//! Wheel picker orchestration
//!
//! [`WheelPicker`] owns the columns and wires every other piece together:
//! raw input goes through an [`InputTracker`] per column, releases and nudges
//! become settle animations on the shared [`AnimationScheduler`], and each
//! settle that lands commits through the [`DateSynchronizer`]. Listeners are
//! notified once per committed change of the composed date.
//!
//! The picker is driven cooperatively. The host forwards input through
//! [`WheelPicker::handle_event`] and calls [`WheelPicker::tick`] whenever the
//! frame scheduler it supplied fires.

use std::fmt;
use std::ops::RangeInclusive;

use chrono::{NaiveDate, NaiveDateTime};
use rustc_hash::FxHashMap;
use tumbler_animation::{
    AnimationScheduler, FrameScheduler, SettleAnimation, SettleId, SettleStep,
};
use tumbler_core::events::{event_types, InputEvent};
use tumbler_core::fsm::{column_events, ColumnState, StateTransitions};

use crate::column::Column;
use crate::config::{Format, PickerConfig};
use crate::error::PickerError;
use crate::input::{ColumnGeometry, DragUpdate, InputTracker};
use crate::projector::project_column;
use crate::render::{ColumnView, ContainerId, RenderSurface};
use crate::sync::{self, DateSynchronizer, DAY};

/// Listener for committed date changes
pub type ChangeCallback = Box<dyn FnMut(NaiveDateTime)>;

/// Builder for [`WheelPicker`]
pub struct WheelPickerBuilder {
    config: PickerConfig,
    on_change: Option<ChangeCallback>,
}

impl WheelPickerBuilder {
    pub fn new(config: PickerConfig) -> Self {
        Self {
            config,
            on_change: None,
        }
    }

    /// Called once per committed selection change
    pub fn on_change(mut self, callback: impl FnMut(NaiveDateTime) + 'static) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    /// Validate the config, resolve the container and mount the columns
    ///
    /// Nothing is mounted when this fails. The listener is not invoked for
    /// the initial date.
    pub fn build<S: RenderSurface>(
        self,
        mut surface: S,
        frames: Box<dyn FrameScheduler>,
    ) -> Result<WheelPicker<S>, PickerError> {
        let config = self.config;
        config.validate()?;

        let target = config
            .container
            .as_ref()
            .ok_or(PickerError::MissingContainer)?;
        let container = surface
            .resolve(target)
            .ok_or_else(|| PickerError::UnresolvedContainer(target.to_string()))?;

        let years = config.year_range();
        let requested = config
            .initial_date
            .unwrap_or_else(|| chrono::Local::now().naive_local());
        let initial = clamp_to_years(requested, &years);

        let month_names = tumbler_i18n::month_names(
            config
                .locale
                .as_deref()
                .unwrap_or(tumbler_i18n::DEFAULT_LOCALE),
        );

        let mut sync = DateSynchronizer::new(config.format);
        let mut columns = sync.build_columns(initial, &years);
        for column in &mut columns {
            column.snap_offset(config.item_height);
        }

        let views: Vec<ColumnView> = columns
            .iter()
            .map(|column| ColumnView {
                kind: column.kind(),
                labels: column.labels(&month_names),
            })
            .collect();
        surface.mount(container, &views);

        let count = columns.len();
        let momentum = config.physics.momentum_multiplier;
        let mut picker = WheelPicker {
            columns,
            states: vec![ColumnState::default(); count],
            trackers: vec![InputTracker::new(momentum); count],
            settles: vec![None; count],
            owners: FxHashMap::default(),
            scheduler: AnimationScheduler::new(frames),
            sync,
            years,
            date: initial,
            anchor: initial.date(),
            month_names,
            on_change: self.on_change,
            surface,
            container: Some(container),
            config,
        };
        picker.present_all();
        picker.commit(false);

        tracing::debug!(
            "wheel picker mounted: format={} columns={} date={}",
            picker.config.format,
            count,
            picker.date
        );
        Ok(picker)
    }
}

fn clamp_to_years(date: NaiveDateTime, years: &RangeInclusive<i32>) -> NaiveDateTime {
    let clamped = sync::clamp_year(date, years);
    if clamped != date {
        tracing::warn!(
            "date {} outside years {}..={}, clamped to {}",
            date,
            years.start(),
            years.end(),
            clamped
        );
    }
    clamped
}

/// A mounted wheel date picker
pub struct WheelPicker<S: RenderSurface> {
    config: PickerConfig,
    columns: Vec<Column>,
    states: Vec<ColumnState>,
    trackers: Vec<InputTracker>,
    /// Active settle per column
    settles: Vec<Option<SettleId>>,
    owners: FxHashMap<SettleId, usize>,
    scheduler: AnimationScheduler,
    sync: DateSynchronizer,
    years: RangeInclusive<i32>,
    date: NaiveDateTime,
    /// Calendar day used by the time format
    anchor: NaiveDate,
    month_names: Vec<String>,
    on_change: Option<ChangeCallback>,
    surface: S,
    /// `None` once destroyed
    container: Option<ContainerId>,
}

impl<S: RenderSurface> WheelPicker<S> {
    /// Build a picker without a change listener
    pub fn new(
        config: PickerConfig,
        surface: S,
        frames: Box<dyn FrameScheduler>,
    ) -> Result<Self, PickerError> {
        WheelPickerBuilder::new(config).build(surface, frames)
    }

    /// Last committed date
    pub fn get_date(&self) -> NaiveDateTime {
        self.date
    }

    /// Jump every column to `date` without animation or notification
    ///
    /// In-flight drags and settles are cancelled. Years outside the
    /// configured bounds clamp to the nearest bound.
    pub fn set_date(&mut self, date: NaiveDateTime) {
        self.apply_date(date, false);
    }

    /// Like [`set_date`](Self::set_date), but notifies when the date changed
    pub fn select_date(&mut self, date: NaiveDateTime) {
        self.apply_date(date, true);
    }

    /// Route one input event to its column
    ///
    /// Returns whether the event was consumed.
    pub fn handle_event(&mut self, event: &InputEvent) -> bool {
        if self.is_destroyed() {
            return false;
        }
        let index = event.column;
        let Some(column) = self.columns.get(index) else {
            tracing::trace!("event for unknown column {}", index);
            return false;
        };

        let geometry = ColumnGeometry {
            item_height: self.config.item_height,
            item_count: column.len(),
        };
        // Discrete steps continue from where a running settle is heading
        let base = match event.event_type {
            event_types::WHEEL | event_types::KEY_DOWN => self
                .settle_target(index)
                .unwrap_or_else(|| column.offset()),
            _ => column.offset(),
        };

        let Some(update) = self.trackers[index].handle(event, base, geometry) else {
            return false;
        };

        match update {
            DragUpdate::Started => {
                self.cancel_settle(index);
                self.states[index].send(column_events::DRAG_START);
            }
            DragUpdate::Moved { offset } => {
                self.columns[index].set_offset(offset);
                self.present(index);
            }
            DragUpdate::Released { target, velocity } => {
                self.states[index].send(column_events::DRAG_END);
                tracing::debug!(
                    "column {} released: v={:.3} target={:.1}",
                    index,
                    velocity,
                    target
                );
                self.start_settle(index, target);
            }
            DragUpdate::Nudged { target } => {
                self.states[index].send(column_events::NUDGE);
                self.start_settle(index, target);
            }
        }
        true
    }

    /// Advance every running settle by one frame
    ///
    /// Columns that land commit their selection; all columns landing in the
    /// same frame produce a single commit. Returns
    /// [`is_animating`](Self::is_animating), which stays true while any
    /// column is still dragging or settling.
    pub fn tick(&mut self) -> bool {
        if self.is_destroyed() {
            return false;
        }

        let mut committed = false;
        for (id, step) in self.scheduler.tick() {
            let Some(&index) = self.owners.get(&id) else {
                continue;
            };
            match step {
                SettleStep::Moving { offset } => {
                    self.columns[index].set_offset(offset);
                }
                SettleStep::Settled { offset, index: slot } => {
                    self.owners.remove(&id);
                    self.settles[index] = None;
                    let column = &mut self.columns[index];
                    column.set_selected_index(slot);
                    column.set_offset(offset);
                    self.states[index].send(column_events::SETTLED);
                    tracing::debug!(
                        "column {} settled on {} ({})",
                        index,
                        slot,
                        column.selected_value()
                    );
                    committed = true;
                }
            }
            self.present(index);
        }

        if committed {
            self.commit(true);
        }
        self.is_animating()
    }

    /// Detach from the surface and stop all animation
    ///
    /// Safe to call more than once. Afterwards events and ticks are ignored
    /// and [`get_date`](Self::get_date) keeps returning the last date.
    pub fn destroy(&mut self) {
        let Some(container) = self.container.take() else {
            return;
        };
        for (tracker, state) in self.trackers.iter_mut().zip(self.states.iter_mut()) {
            tracker.cancel();
            state.send(column_events::CANCEL);
        }
        self.settles.fill(None);
        self.owners.clear();
        self.scheduler.clear();
        self.surface.unmount(container);
        tracing::debug!("wheel picker destroyed");
    }

    pub fn is_destroyed(&self) -> bool {
        self.container.is_none()
    }

    /// Whether any column is dragging or settling
    pub fn is_animating(&self) -> bool {
        self.scheduler.has_active_animations() || self.states.iter().any(|s| s.is_active())
    }

    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_state(&self, index: usize) -> Option<ColumnState> {
        self.states.get(index).copied()
    }

    pub fn format(&self) -> Format {
        self.config.format
    }

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    /// Localized month names, January first
    pub fn month_names(&self) -> &[String] {
        &self.month_names
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    fn apply_date(&mut self, date: NaiveDateTime, notify: bool) {
        if self.is_destroyed() {
            return;
        }
        self.interrupt();

        let date = clamp_to_years(date, &self.years);
        self.anchor = date.date();
        if self.sync.decompose(&mut self.columns, date) {
            self.relabel(DAY);
        }
        let item_height = self.config.item_height;
        for column in &mut self.columns {
            column.snap_offset(item_height);
        }
        self.present_all();
        self.commit(notify);
    }

    /// Cancel every drag and settle
    fn interrupt(&mut self) {
        for index in 0..self.columns.len() {
            self.cancel_settle(index);
            self.trackers[index].cancel();
            self.states[index].send(column_events::CANCEL);
        }
    }

    fn settle_target(&self, index: usize) -> Option<f32> {
        let id = self.settles[index]?;
        self.scheduler.get_settle(id).map(|s| s.target_offset())
    }

    fn cancel_settle(&mut self, index: usize) {
        if let Some(id) = self.settles[index].take() {
            self.scheduler.remove_settle(id);
            self.owners.remove(&id);
            tracing::trace!("column {} settle cancelled", index);
        }
    }

    fn start_settle(&mut self, index: usize, target: f32) {
        self.cancel_settle(index);
        if !self.columns[index].offset().is_finite() {
            self.columns[index].snap_offset(self.config.item_height);
        }
        let column = &self.columns[index];
        let settle = SettleAnimation::new(
            self.config.physics.settle(),
            column.offset(),
            target,
            self.config.item_height,
            column.len(),
        );
        let id = self.scheduler.add_settle(settle);
        self.settles[index] = Some(id);
        self.owners.insert(id, index);
    }

    /// Recompose the date from the columns and notify on change
    fn commit(&mut self, notify: bool) {
        let composed = self.sync.compose(&mut self.columns, self.anchor);
        if composed.day_regenerated {
            self.refresh_day_column();
        }

        let previous = std::mem::replace(&mut self.date, composed.date);
        if previous == composed.date {
            return;
        }
        tracing::debug!("date committed: {} -> {}", previous, composed.date);
        if notify {
            if let Some(callback) = self.on_change.as_mut() {
                callback(composed.date);
            }
        }
    }

    /// Follow up on a day column whose values were replaced
    fn refresh_day_column(&mut self) {
        self.relabel(DAY);
        let state = self.states[DAY];
        match state {
            ColumnState::Idle => self.columns[DAY].snap_offset(self.config.item_height),
            ColumnState::Settling => {
                // Re-aim at the same offset; the slot clamps to the new length
                if let Some(target) = self.settle_target(DAY) {
                    self.start_settle(DAY, target);
                }
            }
            // Offset follows the pointer; the release targets the new range
            ColumnState::Dragging => {}
        }
        self.present(DAY);
    }

    fn relabel(&mut self, index: usize) {
        let labels = self.columns[index].labels(&self.month_names);
        self.surface.relabel(index, &labels);
    }

    fn present(&mut self, index: usize) {
        let items = project_column(
            &self.columns[index],
            self.config.item_height,
            self.config.visible_items,
        );
        self.surface.present(index, &items);
    }

    fn present_all(&mut self) {
        for index in 0..self.columns.len() {
            self.present(index);
        }
    }
}

impl<S: RenderSurface + fmt::Debug> fmt::Debug for WheelPicker<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WheelPicker")
            .field("format", &self.config.format)
            .field("date", &self.date)
            .field("states", &self.states)
            .field("settles", &self.owners.len())
            .field("destroyed", &self.is_destroyed())
            .field("surface", &self.surface)
            .finish()
    }
}
