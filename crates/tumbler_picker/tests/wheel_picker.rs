//! End-to-end behaviour of a mounted picker driven by scripted input

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{NaiveDate, NaiveDateTime};
use pretty_assertions::assert_eq;
use tumbler_animation::ManualFrames;
use tumbler_core::events::{event_types, InputEvent, KeyCode};
use tumbler_picker::{
    ColumnState, Format, MemorySurface, PhysicsConfig, PickerConfig, PickerError, WheelPicker,
    WheelPickerBuilder,
};

const MONTH: usize = 0;
const DAY: usize = 1;
const YEAR: usize = 2;

fn dt(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|d| d.and_hms_opt(h, min, 0))
        .unwrap()
}

struct Harness {
    picker: WheelPicker<MemorySurface>,
    frames: ManualFrames,
    changes: Rc<RefCell<Vec<NaiveDateTime>>>,
}

impl Harness {
    fn new(config: PickerConfig) -> Self {
        let frames = ManualFrames::new();
        let changes = Rc::new(RefCell::new(Vec::new()));
        let sink = changes.clone();
        let picker = WheelPickerBuilder::new(config)
            .on_change(move |date| sink.borrow_mut().push(date))
            .build(
                MemorySurface::with_container("#picker"),
                Box::new(frames.clone()),
            )
            .unwrap();
        Self {
            picker,
            frames,
            changes,
        }
    }

    fn at(date: NaiveDateTime) -> Self {
        Self::new(PickerConfig::new("#picker").initial_date(date))
    }

    fn run(&mut self) -> usize {
        let mut ticks = 0;
        while self.frames.take_frame() {
            self.picker.tick();
            ticks += 1;
            assert!(ticks < 1000, "animation did not terminate");
        }
        ticks
    }

    /// Slow drag by `dy` pixels of content (positive scrolls to later values)
    fn drag(&mut self, column: usize, dy: f32) {
        self.picker
            .handle_event(&InputEvent::pointer_down(column, 300.0, 0.0));
        self.picker
            .handle_event(&InputEvent::pointer_move(column, 300.0 - dy, 1000.0));
        self.picker
            .handle_event(&InputEvent::pointer_up(column, 300.0 - dy, 2000.0));
    }

    fn changes(&self) -> Vec<NaiveDateTime> {
        self.changes.borrow().clone()
    }
}

fn assert_indices_valid(picker: &WheelPicker<MemorySurface>) {
    for column in picker.columns() {
        assert!(column.selected_index() < column.len());
    }
}

#[test]
fn test_february_day_counts() {
    let harness = Harness::at(dt(2024, 2, 10, 0, 0));
    assert_eq!(harness.picker.column(DAY).unwrap().len(), 29);

    let harness = Harness::at(dt(2023, 2, 10, 0, 0));
    assert_eq!(harness.picker.column(DAY).unwrap().len(), 28);

    let harness = Harness::at(dt(2023, 4, 10, 0, 0));
    assert_eq!(harness.picker.column(DAY).unwrap().len(), 30);

    let harness = Harness::at(dt(2023, 1, 10, 0, 0));
    assert_eq!(harness.picker.column(DAY).unwrap().len(), 31);
}

#[test]
fn test_set_date_round_trip_per_format() {
    let target = dt(2024, 2, 29, 13, 45);

    let mut harness = Harness::new(PickerConfig::new("#picker").format(Format::Date));
    harness.picker.set_date(target);
    assert_eq!(harness.picker.get_date(), dt(2024, 2, 29, 0, 0));

    let mut harness = Harness::new(PickerConfig::new("#picker").format(Format::Datetime));
    harness.picker.set_date(target + chrono::Duration::seconds(30));
    assert_eq!(harness.picker.get_date(), target);

    let mut harness = Harness::new(
        PickerConfig::new("#picker")
            .format(Format::Time)
            .initial_date(dt(2020, 5, 5, 8, 0)),
    );
    assert_eq!(harness.picker.get_date(), dt(2020, 5, 5, 8, 0));
    harness.picker.set_date(target);
    assert_eq!(harness.picker.get_date(), target);
    assert_eq!(harness.picker.columns().len(), 2);
    assert!(harness.changes().is_empty());
}

#[test]
fn test_drag_january_31_to_february_clamps_day() {
    let mut harness = Harness::new(
        PickerConfig::new("#picker")
            .initial_date(dt(2023, 1, 31, 0, 0))
            .physics(PhysicsConfig::no_momentum()),
    );
    harness.drag(MONTH, 40.0);
    harness.run();

    assert_eq!(harness.picker.get_date(), dt(2023, 2, 28, 0, 0));
    assert_eq!(harness.changes(), vec![dt(2023, 2, 28, 0, 0)]);

    let picker = &harness.picker;
    assert_eq!(picker.column(MONTH).unwrap().selected_value(), 2);
    assert_eq!(picker.column(YEAR).unwrap().selected_value(), 2023);
    assert_eq!(picker.column(DAY).unwrap().len(), 28);
    assert_eq!(picker.surface().center_label(MONTH), Some("February"));
    assert_eq!(picker.surface().center_label(DAY), Some("28"));
    assert_eq!(picker.surface().labels(DAY).unwrap().len(), 28);
    assert_indices_valid(picker);
}

#[test]
fn test_leap_year_change_shrinks_february() {
    let mut harness = Harness::at(dt(2024, 2, 29, 0, 0));
    harness
        .picker
        .handle_event(&InputEvent::key(YEAR, KeyCode::DOWN, 0.0));
    harness.run();
    assert_eq!(harness.picker.get_date(), dt(2025, 2, 28, 0, 0));
    assert_eq!(harness.picker.column(DAY).unwrap().len(), 28);
}

#[test]
fn test_zero_drag_changes_nothing() {
    let mut harness = Harness::at(dt(2023, 6, 15, 0, 0));
    let before: Vec<usize> = harness
        .picker
        .columns()
        .iter()
        .map(|c| c.selected_index())
        .collect();

    harness
        .picker
        .handle_event(&InputEvent::pointer_down(DAY, 200.0, 0.0));
    harness
        .picker
        .handle_event(&InputEvent::pointer_up(DAY, 200.0, 50.0));
    assert_eq!(harness.run(), 1);

    let after: Vec<usize> = harness
        .picker
        .columns()
        .iter()
        .map(|c| c.selected_index())
        .collect();
    assert_eq!(before, after);
    assert_eq!(harness.picker.get_date(), dt(2023, 6, 15, 0, 0));
    assert!(harness.changes().is_empty());
}

#[test]
fn test_momentum_carries_past_release_point() {
    let mut harness = Harness::at(dt(2023, 1, 15, 0, 0));
    let picker = &mut harness.picker;
    picker.handle_event(&InputEvent::pointer_down(MONTH, 300.0, 0.0));
    // 40px in 20ms: 2px/ms, projected 40px further
    picker.handle_event(&InputEvent::pointer_move(MONTH, 260.0, 20.0));
    picker.handle_event(&InputEvent::pointer_up(MONTH, 260.0, 30.0));
    assert_eq!(picker.column_state(MONTH), Some(ColumnState::Settling));
    harness.run();
    assert_eq!(harness.picker.get_date(), dt(2023, 3, 15, 0, 0));
}

#[test]
fn test_new_drag_cancels_settle() {
    let mut harness = Harness::at(dt(2023, 1, 15, 0, 0));

    harness
        .picker
        .handle_event(&InputEvent::pointer_down(MONTH, 300.0, 0.0));
    harness
        .picker
        .handle_event(&InputEvent::pointer_move(MONTH, 220.0, 40.0));
    harness
        .picker
        .handle_event(&InputEvent::pointer_up(MONTH, 220.0, 40.0));
    assert!(harness.picker.tick());
    let grabbed_at = harness.picker.column(MONTH).unwrap().offset();
    assert!(grabbed_at > 80.0 && grabbed_at < 120.0);

    // Grab the moving wheel
    assert!(harness
        .picker
        .handle_event(&InputEvent::pointer_down(MONTH, 100.0, 100.0)));
    assert_eq!(harness.picker.column_state(MONTH), Some(ColumnState::Dragging));
    harness.picker.tick();
    assert_eq!(harness.picker.column(MONTH).unwrap().offset(), grabbed_at);
    assert!(harness.changes().is_empty());

    harness
        .picker
        .handle_event(&InputEvent::pointer_up(MONTH, 100.0, 150.0));
    harness.run();

    assert_eq!(harness.changes(), vec![dt(2023, 3, 15, 0, 0)]);
    assert_eq!(harness.picker.column_state(MONTH), Some(ColumnState::Idle));
    assert_indices_valid(&harness.picker);
}

#[test]
fn test_pointer_leave_releases_drag() {
    let mut harness = Harness::new(
        PickerConfig::new("#picker")
            .initial_date(dt(2023, 6, 15, 0, 0))
            .physics(PhysicsConfig::no_momentum()),
    );
    let picker = &mut harness.picker;
    picker.handle_event(&InputEvent::pointer_down(DAY, 300.0, 0.0));
    picker.handle_event(&InputEvent::pointer_move(DAY, 220.0, 500.0));
    assert!(picker.handle_event(&InputEvent::pointer_leave(DAY, 600.0)));
    assert_eq!(picker.column_state(DAY), Some(ColumnState::Settling));

    // Moves after the leave no longer drive the column
    assert!(!picker.handle_event(&InputEvent::pointer_move(DAY, 0.0, 700.0)));
    harness.run();
    assert_eq!(harness.picker.get_date(), dt(2023, 6, 17, 0, 0));
}

#[test]
fn test_touch_drag() {
    let mut harness = Harness::new(
        PickerConfig::new("#picker")
            .initial_date(dt(2023, 6, 15, 0, 0))
            .physics(PhysicsConfig::no_momentum()),
    );
    let picker = &mut harness.picker;
    picker.handle_event(&InputEvent::touch(event_types::TOUCH_START, YEAR, 3, 300.0, 0.0));
    picker.handle_event(&InputEvent::touch(event_types::TOUCH_MOVE, YEAR, 3, 380.0, 500.0));
    picker.handle_event(&InputEvent::touch(event_types::TOUCH_END, YEAR, 3, 380.0, 600.0));
    harness.run();
    assert_eq!(harness.picker.get_date(), dt(2021, 6, 15, 0, 0));
}

#[test]
fn test_simultaneous_settles_commit_once() {
    let mut harness = Harness::new(
        PickerConfig::new("#picker")
            .initial_date(dt(2023, 6, 15, 0, 0))
            .physics(PhysicsConfig::no_momentum()),
    );
    harness.drag(MONTH, 40.0);
    harness.drag(YEAR, 40.0);
    assert_eq!(harness.run(), 1);
    assert_eq!(harness.changes(), vec![dt(2024, 7, 15, 0, 0)]);
}

#[test]
fn test_settling_day_column_retargets_after_regeneration() {
    let mut harness = Harness::at(dt(2023, 1, 31, 0, 0));
    harness
        .picker
        .handle_event(&InputEvent::key(DAY, KeyCode::HOME, 0.0));
    harness
        .picker
        .handle_event(&InputEvent::wheel(MONTH, 1.0, 0.0));
    harness.run();

    assert_eq!(harness.picker.get_date(), dt(2023, 2, 1, 0, 0));
    assert_eq!(harness.picker.column(DAY).unwrap().len(), 28);
    assert_eq!(harness.changes().last(), Some(&dt(2023, 2, 1, 0, 0)));
    assert_indices_valid(&harness.picker);
}

#[test]
fn test_held_day_column_follows_regeneration() {
    let mut harness = Harness::at(dt(2023, 1, 31, 0, 0));
    harness
        .picker
        .handle_event(&InputEvent::pointer_down(DAY, 300.0, 0.0));
    harness
        .picker
        .handle_event(&InputEvent::wheel(MONTH, 1.0, 16.0));
    harness.run();

    // Month committed while the day column is still held
    assert_eq!(harness.picker.column_state(DAY), Some(ColumnState::Dragging));
    assert_eq!(harness.picker.column(DAY).unwrap().len(), 28);
    assert_eq!(harness.picker.column(DAY).unwrap().selected_index(), 27);
    assert_eq!(harness.picker.surface().labels(DAY).unwrap().len(), 28);
    assert_eq!(harness.picker.get_date(), dt(2023, 2, 28, 0, 0));

    // Released past the shortened end, the wheel settles on the last day
    harness
        .picker
        .handle_event(&InputEvent::pointer_up(DAY, 300.0, 5000.0));
    harness.run();
    let day = harness.picker.column(DAY).unwrap();
    assert_eq!(day.selected_index(), 27);
    assert_eq!(day.offset(), 27.0 * 40.0);
    assert_eq!(harness.changes(), vec![dt(2023, 2, 28, 0, 0)]);
    assert_indices_valid(&harness.picker);
}

#[test]
fn test_non_finite_pointer_sample_keeps_selection() {
    let mut harness = Harness::at(dt(2023, 6, 15, 0, 0));
    let picker = &mut harness.picker;
    picker.handle_event(&InputEvent::pointer_down(MONTH, 300.0, 0.0));
    assert!(!picker.handle_event(&InputEvent::pointer_move(MONTH, f32::NAN, 16.0)));
    picker.handle_event(&InputEvent::pointer_up(MONTH, 300.0, 32.0));
    harness.run();

    assert_eq!(harness.picker.get_date(), dt(2023, 6, 15, 0, 0));
    assert_eq!(harness.picker.column(MONTH).unwrap().selected_value(), 6);
    assert!(harness.changes().is_empty());
}

#[test]
fn test_overscroll_clamps_to_ends() {
    let mut harness = Harness::new(
        PickerConfig::new("#picker")
            .initial_date(dt(2023, 3, 15, 0, 0))
            .physics(PhysicsConfig::no_momentum()),
    );
    harness.drag(MONTH, -400.0);
    harness.run();
    assert_eq!(harness.picker.column(MONTH).unwrap().selected_value(), 1);

    harness.drag(MONTH, 4000.0);
    harness.run();
    assert_eq!(harness.picker.column(MONTH).unwrap().selected_value(), 12);
    assert_eq!(harness.picker.get_date(), dt(2023, 12, 15, 0, 0));
    assert_indices_valid(&harness.picker);
}

#[test]
fn test_set_date_is_silent_and_select_date_notifies() {
    let mut harness = Harness::at(dt(2023, 6, 15, 0, 0));
    harness.picker.set_date(dt(2001, 9, 9, 0, 0));
    assert!(harness.changes().is_empty());
    assert_eq!(harness.picker.surface().center_label(YEAR), Some("2001"));

    harness.picker.select_date(dt(2002, 10, 10, 0, 0));
    harness.picker.select_date(dt(2002, 10, 10, 0, 0));
    assert_eq!(harness.changes(), vec![dt(2002, 10, 10, 0, 0)]);
}

#[test]
fn test_out_of_range_dates_clamp_to_bounds() {
    let harness = Harness::at(dt(1850, 2, 14, 0, 0));
    assert_eq!(harness.picker.get_date(), dt(1900, 2, 14, 0, 0));

    let mut harness = Harness::new(
        PickerConfig::new("#picker")
            .min_date(NaiveDate::from_ymd_opt(2000, 1, 1).unwrap())
            .max_date(NaiveDate::from_ymd_opt(2010, 12, 31).unwrap())
            .initial_date(dt(2005, 1, 1, 0, 0)),
    );
    assert_eq!(harness.picker.column(YEAR).unwrap().len(), 11);
    harness.picker.set_date(dt(2012, 2, 29, 0, 0));
    assert_eq!(harness.picker.get_date(), dt(2010, 2, 28, 0, 0));
}

#[test]
fn test_locale_month_labels() {
    let harness = Harness::new(PickerConfig::new("#picker").locale("fr-FR"));
    assert_eq!(harness.picker.surface().labels(MONTH).unwrap()[0], "janvier");

    let harness = Harness::new(PickerConfig::new("#picker").locale("tlh"));
    assert_eq!(harness.picker.surface().labels(MONTH).unwrap()[0], "January");
}

#[test]
fn test_destroy_is_idempotent() {
    let mut harness = Harness::at(dt(2023, 6, 15, 0, 0));
    harness
        .picker
        .handle_event(&InputEvent::wheel(MONTH, 1.0, 0.0));

    harness.picker.destroy();
    harness.picker.destroy();
    assert!(harness.picker.is_destroyed());
    assert!(!harness.picker.surface().is_mounted());
    assert!(!harness.picker.surface().is_listening());
    assert_eq!(harness.picker.surface().unmount_count(), 1);

    assert!(!harness.picker.tick());
    assert!(!harness
        .picker
        .handle_event(&InputEvent::wheel(MONTH, 1.0, 0.0)));
    harness.picker.set_date(dt(1999, 1, 1, 0, 0));
    harness.run();
    assert_eq!(harness.picker.get_date(), dt(2023, 6, 15, 0, 0));
    assert!(harness.changes().is_empty());
}

#[test]
fn test_container_errors() {
    let frames = ManualFrames::new();
    let err = WheelPicker::new(
        PickerConfig::default(),
        MemorySurface::with_container("#picker"),
        Box::new(frames.clone()),
    )
    .unwrap_err();
    assert!(matches!(err, PickerError::MissingContainer));

    let mut surface = MemorySurface::with_container("#picker");
    let err = WheelPicker::new(
        PickerConfig::new("#missing"),
        surface.clone(),
        Box::new(frames.clone()),
    )
    .unwrap_err();
    assert!(matches!(err, PickerError::UnresolvedContainer(ref s) if s == "#missing"));
    assert!(!surface.is_mounted());
    surface = MemorySurface::new();
    assert!(WheelPicker::new(PickerConfig::new(42u64), surface, Box::new(frames)).is_err());
}

#[test]
fn test_invalid_config_rejected() {
    let frames = ManualFrames::new();
    let config = PickerConfig::new("#picker").visible_items(4);
    let err = WheelPicker::new(
        config,
        MemorySurface::with_container("#picker"),
        Box::new(frames),
    )
    .unwrap_err();
    assert!(matches!(err, PickerError::InvalidVisibleItems(4)));
}
