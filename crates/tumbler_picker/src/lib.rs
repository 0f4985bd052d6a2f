//! Tumbler Wheel Picker
//!
//! A headless wheel date picker: vertically scrolling columns (month, day,
//! year, hour, minute) that follow drags, fling with momentum and settle onto
//! exact slots. The committed selections always compose into a valid date.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use tumbler_animation::ManualFrames;
//! use tumbler_core::InputEvent;
//! use tumbler_picker::{MemorySurface, PickerConfig, WheelPicker};
//!
//! let initial = NaiveDate::from_ymd_opt(2023, 1, 31)
//!     .and_then(|d| d.and_hms_opt(0, 0, 0))
//!     .unwrap();
//! let frames = ManualFrames::new();
//! let mut picker = WheelPicker::new(
//!     PickerConfig::new("#picker").initial_date(initial),
//!     MemorySurface::with_container("#picker"),
//!     Box::new(frames.clone()),
//! )
//! .unwrap();
//!
//! // Scroll the month column one row down and let it settle
//! picker.handle_event(&InputEvent::wheel(0, 1.0, 0.0));
//! while frames.take_frame() {
//!     picker.tick();
//! }
//! assert_eq!(picker.get_date().date(), NaiveDate::from_ymd_opt(2023, 2, 28).unwrap());
//! ```

pub mod column;
pub mod config;
pub mod error;
pub mod input;
pub mod picker;
pub mod projector;
pub mod render;
pub mod sync;

pub use column::{remap_selection, Column, ColumnKind};
pub use config::{Container, Format, PhysicsConfig, PickerConfig};
pub use error::PickerError;
pub use input::{ColumnGeometry, DragUpdate, InputTracker};
pub use picker::{ChangeCallback, WheelPicker, WheelPickerBuilder};
pub use projector::{project, project_column, ItemTransform};
pub use render::{ColumnView, ContainerId, MemorySurface, RenderSurface};
pub use sync::{days_in_month, DateSynchronizer};

pub use tumbler_core::fsm::ColumnState;
