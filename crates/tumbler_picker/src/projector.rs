//! Offset to visual transform projection
//!
//! Items shrink and fade with their distance from the center slot. The
//! projection is a pure function of the scroll offset and is recomputed on
//! every offset change (drag move, settle step, programmatic set).

use crate::column::Column;

/// Smallest scale an item shrinks to
pub const MIN_SCALE: f32 = 0.7;
/// Smallest opacity an item fades to
pub const MIN_OPACITY: f32 = 0.3;

/// Visual state of one rendered item
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemTransform {
    /// Vertical translation from the top of the list, pixels
    pub translate_y: f32,
    pub scale: f32,
    pub opacity: f32,
    /// Item occupies the selection slot
    pub is_center_slot: bool,
}

/// Project the item at `item_index` for the given scroll offset
pub fn project(
    item_index: usize,
    scroll_offset: f32,
    item_height: f32,
    visible_item_count: usize,
) -> ItemTransform {
    let translate_y = item_index as f32 * item_height - scroll_offset;
    let center_offset =
        translate_y - item_height * (visible_item_count.saturating_sub(1)) as f32 / 2.0;
    let distance = center_offset.abs();

    ItemTransform {
        translate_y,
        scale: (1.0 - distance / (item_height * 3.0)).max(MIN_SCALE),
        opacity: (1.0 - distance / (item_height * 2.5)).max(MIN_OPACITY),
        is_center_slot: distance < item_height / 2.0,
    }
}

/// Spacer slots rendered above the first item
///
/// With this padding, value `i` sits in the center slot when the scroll
/// offset equals `i * item_height`.
pub fn leading_slots(visible_item_count: usize) -> usize {
    visible_item_count.saturating_sub(1) / 2
}

/// Project every value of a column, spacer padding applied
pub fn project_column(
    column: &Column,
    item_height: f32,
    visible_item_count: usize,
) -> Vec<ItemTransform> {
    let padding = leading_slots(visible_item_count);
    (0..column.len())
        .map(|i| project(i + padding, column.offset(), item_height, visible_item_count))
        .collect()
}
