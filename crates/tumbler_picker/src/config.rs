//! Picker configuration
//!
//! [`PickerConfig`] is plain data: it can be built in code with the chained
//! setters or loaded from a TOML file.
//!
//! ```toml
//! container = "#birthday"
//! format = "datetime"
//! initial_date = "1990-07-14T08:30:00"
//! min_date = "1950-01-01"
//! locale = "fr-FR"
//! item_height = 36.0
//!
//! [physics]
//! damping = 0.2
//! ```

use std::fmt;
use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tumbler_animation::SettleConfig;

use crate::column::ColumnKind;
use crate::error::PickerError;

/// Earliest year offered when no `min_date` is configured
pub const DEFAULT_MIN_YEAR: i32 = 1900;
/// Latest year offered when no `max_date` is configured
pub const DEFAULT_MAX_YEAR: i32 = 2100;

/// Which fields the picker shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Month, day, year
    #[default]
    Date,
    /// Month, day, year, hour, minute
    Datetime,
    /// Hour, minute
    Time,
}

impl Format {
    /// Column kinds in positional order
    pub fn column_kinds(&self) -> &'static [ColumnKind] {
        use ColumnKind::*;
        match self {
            Format::Date => &[Month, Day, Year],
            Format::Datetime => &[Month, Day, Year, Hour, Minute],
            Format::Time => &[Hour, Minute],
        }
    }

    /// Whether the date portion is selectable
    pub fn has_date(&self) -> bool {
        !matches!(self, Format::Time)
    }

    /// Whether the time-of-day portion is selectable
    pub fn has_time(&self) -> bool {
        !matches!(self, Format::Date)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Date => write!(f, "date"),
            Format::Datetime => write!(f, "datetime"),
            Format::Time => write!(f, "time"),
        }
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "date" => Ok(Format::Date),
            "datetime" => Ok(Format::Datetime),
            "time" => Ok(Format::Time),
            other => Err(format!(
                "unknown format `{}` (expected date, datetime or time)",
                other
            )),
        }
    }
}

/// Where the picker mounts
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Container {
    /// Host element handle
    Handle(u64),
    /// Host-defined selector, resolved by the render surface
    Selector(String),
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Container::Handle(id) => write!(f, "#{}", id),
            Container::Selector(selector) => f.write_str(selector),
        }
    }
}

impl From<&str> for Container {
    fn from(selector: &str) -> Self {
        Container::Selector(selector.to_string())
    }
}

impl From<String> for Container {
    fn from(selector: String) -> Self {
        Container::Selector(selector)
    }
}

impl From<u64> for Container {
    fn from(handle: u64) -> Self {
        Container::Handle(handle)
    }
}

/// Drag release and settle tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Release velocity (px/ms) is multiplied by this to project the fling
    pub momentum_multiplier: f32,
    /// Fraction of the remaining distance covered per frame, in `(0, 1)`
    pub damping: f32,
    /// Snap distance in pixels
    pub epsilon: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            momentum_multiplier: 20.0,
            damping: 0.15,
            epsilon: 0.5,
        }
    }
}

impl PhysicsConfig {
    /// Heavier wheel that stops close to where it was released
    pub fn no_momentum() -> Self {
        Self {
            momentum_multiplier: 0.0,
            ..Default::default()
        }
    }

    /// Settle tuning for the animation scheduler
    pub fn settle(&self) -> SettleConfig {
        SettleConfig::new(self.damping, self.epsilon)
    }

    fn validate(&self) -> Result<(), PickerError> {
        if !(self.damping > 0.0 && self.damping < 1.0) {
            return Err(PickerError::InvalidPhysics("damping must be in (0, 1)"));
        }
        if !(self.epsilon > 0.0) || !self.epsilon.is_finite() {
            return Err(PickerError::InvalidPhysics("epsilon must be positive"));
        }
        if !self.momentum_multiplier.is_finite() || self.momentum_multiplier < 0.0 {
            return Err(PickerError::InvalidPhysics(
                "momentum multiplier must be finite and non-negative",
            ));
        }
        Ok(())
    }
}

/// Construction options for a wheel picker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    /// Mount target; required
    pub container: Option<Container>,
    /// Defaults to the current local date and time
    pub initial_date: Option<NaiveDateTime>,
    /// Lower bound of the year column
    pub min_date: Option<NaiveDate>,
    /// Upper bound of the year column
    pub max_date: Option<NaiveDate>,
    pub format: Format,
    /// Month-name locale; unsupported values fall back to `en-US`
    pub locale: Option<String>,
    /// Row height in pixels
    pub item_height: f32,
    /// Rows visible at once; odd so one row sits in the center
    pub visible_items: usize,
    pub physics: PhysicsConfig,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            container: None,
            initial_date: None,
            min_date: None,
            max_date: None,
            format: Format::Date,
            locale: None,
            item_height: 40.0,
            visible_items: 5,
            physics: PhysicsConfig::default(),
        }
    }
}

impl PickerConfig {
    /// Config mounted at `container` with defaults for everything else
    pub fn new(container: impl Into<Container>) -> Self {
        Self {
            container: Some(container.into()),
            ..Default::default()
        }
    }

    pub fn container(mut self, container: impl Into<Container>) -> Self {
        self.container = Some(container.into());
        self
    }

    pub fn initial_date(mut self, date: NaiveDateTime) -> Self {
        self.initial_date = Some(date);
        self
    }

    pub fn min_date(mut self, date: NaiveDate) -> Self {
        self.min_date = Some(date);
        self
    }

    pub fn max_date(mut self, date: NaiveDate) -> Self {
        self.max_date = Some(date);
        self
    }

    pub fn format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    pub fn item_height(mut self, height: f32) -> Self {
        self.item_height = height;
        self
    }

    pub fn visible_items(mut self, count: usize) -> Self {
        self.visible_items = count;
        self
    }

    pub fn physics(mut self, physics: PhysicsConfig) -> Self {
        self.physics = physics;
        self
    }

    /// Years offered by the year column
    pub fn year_range(&self) -> RangeInclusive<i32> {
        let min = self.min_date.map_or(DEFAULT_MIN_YEAR, |d| d.year());
        let max = self.max_date.map_or(DEFAULT_MAX_YEAR, |d| d.year());
        min..=max
    }

    /// Check everything except the container, which needs a render surface
    pub fn validate(&self) -> Result<(), PickerError> {
        if let (Some(min), Some(max)) = (self.min_date, self.max_date) {
            if min > max {
                return Err(PickerError::InvalidBounds { min, max });
            }
        }
        let range = self.year_range();
        if range.start() > range.end() {
            // One bound configured against the other's default
            let min = self
                .min_date
                .or_else(|| NaiveDate::from_ymd_opt(DEFAULT_MIN_YEAR, 1, 1));
            let max = self
                .max_date
                .or_else(|| NaiveDate::from_ymd_opt(DEFAULT_MAX_YEAR, 12, 31));
            if let (Some(min), Some(max)) = (min, max) {
                return Err(PickerError::InvalidBounds { min, max });
            }
        }
        if self.visible_items == 0 || self.visible_items % 2 == 0 {
            return Err(PickerError::InvalidVisibleItems(self.visible_items));
        }
        if !(self.item_height > 0.0) || !self.item_height.is_finite() {
            return Err(PickerError::InvalidItemHeight(self.item_height));
        }
        self.physics.validate()
    }

    /// Parse a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self, PickerError> {
        Ok(toml::from_str(content)?)
    }

    /// Load a TOML config file
    pub fn load(path: &Path) -> Result<Self, PickerError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}
