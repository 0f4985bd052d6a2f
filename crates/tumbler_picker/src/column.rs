//! Column model
//!
//! One wheel column: an ordered list of values, the selected index and the
//! live scroll offset. The selected index is always a valid position; every
//! mutation clamps instead of failing.

/// Field a column represents; decides how values are labelled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    /// Values 1..=12, labelled with localized month names
    Month,
    Day,
    Year,
    /// Values 0..=23, zero-padded labels
    Hour,
    /// Values 0..=59, zero-padded labels
    Minute,
}

impl ColumnKind {
    pub fn name(&self) -> &'static str {
        match self {
            ColumnKind::Month => "month",
            ColumnKind::Day => "day",
            ColumnKind::Year => "year",
            ColumnKind::Hour => "hour",
            ColumnKind::Minute => "minute",
        }
    }

    /// Display label for `value`
    ///
    /// `month_names` holds twelve names starting with January.
    pub fn label(&self, value: i32, month_names: &[String]) -> String {
        match self {
            ColumnKind::Month => usize::try_from(value - 1)
                .ok()
                .and_then(|i| month_names.get(i))
                .cloned()
                .unwrap_or_else(|| value.to_string()),
            ColumnKind::Day | ColumnKind::Year => value.to_string(),
            ColumnKind::Hour | ColumnKind::Minute => format!("{:02}", value),
        }
    }
}

/// Index of `preferred` in `values`, else of the largest value below it,
/// else 0
fn position_for(values: &[i32], preferred: i32) -> usize {
    if let Some(exact) = values.iter().position(|v| *v == preferred) {
        return exact;
    }
    values
        .iter()
        .enumerate()
        .filter(|(_, v)| **v <= preferred)
        .max_by_key(|(_, v)| **v)
        .map_or(0, |(i, _)| i)
}

/// Remap a selection onto a replacement value list
///
/// The value selected in `old_values` is kept when it still exists; a day 31
/// remapped onto a 30-day month lands on 30. Pure: nothing but the return
/// value is produced.
pub fn remap_selection(
    old_values: &[i32],
    old_selected: usize,
    new_values: Vec<i32>,
) -> (Vec<i32>, usize) {
    let index = match old_values.get(old_selected) {
        Some(preferred) => position_for(&new_values, *preferred),
        None => 0,
    };
    let index = index.min(new_values.len().saturating_sub(1));
    (new_values, index)
}

/// A single wheel column
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    kind: ColumnKind,
    values: Vec<i32>,
    selected: usize,
    offset: f32,
}

impl Column {
    /// Create a column selecting `selected_value`, or the first value
    ///
    /// An empty list is replaced by a single `0` so the selected index is
    /// always valid.
    pub fn new(kind: ColumnKind, values: Vec<i32>, selected_value: i32) -> Self {
        let values = non_empty(values);
        let selected = values
            .iter()
            .position(|v| *v == selected_value)
            .unwrap_or(0);
        Self {
            kind,
            values,
            selected,
            offset: 0.0,
        }
    }

    pub fn kind(&self) -> ColumnKind {
        self.kind
    }

    pub fn values(&self) -> &[i32] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false; columns keep at least one value
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_value(&self) -> i32 {
        self.values[self.selected]
    }

    /// Select by position, clamped into range
    pub fn set_selected_index(&mut self, index: usize) {
        self.selected = index.min(self.values.len() - 1);
    }

    /// Select `value` if present; returns whether it was found
    pub fn select_value(&mut self, value: i32) -> bool {
        match self.values.iter().position(|v| *v == value) {
            Some(index) => {
                self.selected = index;
                true
            }
            None => false,
        }
    }

    /// Replace the values, keeping the selected value or the nearest one
    /// below it
    ///
    /// Returns the new selected index.
    pub fn regenerate(&mut self, values: Vec<i32>) -> usize {
        let (values, selected) = remap_selection(&self.values, self.selected, non_empty(values));
        self.values = values;
        self.selected = selected;
        self.selected
    }

    /// Current scroll offset in pixels
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Set the live offset; unclamped so drags can overscroll
    pub fn set_offset(&mut self, offset: f32) {
        self.offset = offset;
    }

    /// Put the offset exactly on the selected slot
    pub fn snap_offset(&mut self, item_height: f32) {
        self.offset = self.selected as f32 * item_height;
    }

    /// Display labels for every value
    pub fn labels(&self, month_names: &[String]) -> Vec<String> {
        self.values
            .iter()
            .map(|v| self.kind.label(*v, month_names))
            .collect()
    }
}

fn non_empty(values: Vec<i32>) -> Vec<i32> {
    if values.is_empty() {
        vec![0]
    } else {
        values
    }
}
