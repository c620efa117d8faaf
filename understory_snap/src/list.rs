// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An in-memory list that implements [`ScrollHost`].

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use crate::{ItemInfo, ScrollHost};

/// A self-contained scrollable list of items with known extents.
///
/// `SnapList` lays items out back to back along one axis, separated by a fixed
/// spacing and surrounded by optional content padding. Its scroll offset is
/// clamped to the content, so scrolling past either end under-consumes the
/// requested delta the way a real list does.
///
/// It is useful as a host for tests and headless tools, and as a reference
/// for how a host should report geometry.
#[derive(Debug, Clone)]
pub struct SnapList {
    extents: Vec<u32>,
    starts: Vec<i64>,
    spacing: u32,
    padding_before: u32,
    padding_after: u32,
    viewport_extent: u32,
    scroll_offset: f32,
}

impl SnapList {
    /// Creates a list with the given item extents and viewport extent.
    #[must_use]
    pub fn new(extents: impl IntoIterator<Item = u32>, viewport_extent: u32) -> Self {
        let mut list = Self {
            extents: extents.into_iter().collect(),
            starts: Vec::new(),
            spacing: 0,
            padding_before: 0,
            padding_after: 0,
            viewport_extent,
            scroll_offset: 0.0,
        };
        list.relayout();
        list
    }

    /// Creates a list of `len` items that all share `extent`.
    #[must_use]
    pub fn uniform(len: usize, extent: u32, viewport_extent: u32) -> Self {
        Self::new(core::iter::repeat_n(extent, len), viewport_extent)
    }

    /// Sets the gap between consecutive items.
    #[must_use]
    pub fn with_spacing(mut self, spacing: u32) -> Self {
        self.spacing = spacing;
        self.relayout();
        self
    }

    /// Sets the content padding before the first and after the last item.
    #[must_use]
    pub fn with_padding(mut self, before: u32, after: u32) -> Self {
        self.padding_before = before;
        self.padding_after = after;
        self.relayout();
        self
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.extents.len()
    }

    /// Returns `true` if the list has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.extents.is_empty()
    }

    /// Updates the extent of one item, shifting every item after it.
    pub fn set_extent(&mut self, index: usize, extent: u32) {
        if let Some(slot) = self.extents.get_mut(index) {
            *slot = extent;
            self.relayout();
            self.set_scroll_offset(self.scroll_offset);
        }
    }

    /// Total extent of the content, including spacing and padding.
    #[must_use]
    pub fn content_extent(&self) -> i64 {
        let items = match (self.starts.last(), self.extents.last()) {
            (Some(start), Some(extent)) => start + i64::from(*extent),
            _ => i64::from(self.padding_before),
        };
        items + i64::from(self.padding_after)
    }

    /// Largest valid scroll offset.
    #[must_use]
    pub fn max_scroll_offset(&self) -> f32 {
        (self.content_extent() - i64::from(self.viewport_extent)).max(0) as f32
    }

    /// Current scroll offset.
    #[must_use]
    pub const fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    /// Sets the scroll offset, clamped to the content.
    pub fn set_scroll_offset(&mut self, offset: f32) {
        debug_assert!(offset.is_finite(), "scroll offset must be finite");
        self.scroll_offset = offset.clamp(0.0, self.max_scroll_offset());
    }

    /// Scrolls so that item `index` starts at `offset` from the viewport's
    /// leading edge, as far as the content allows.
    pub fn scroll_to_item(&mut self, index: usize, offset: i32) {
        if let Some(start) = self.starts.get(index) {
            self.set_scroll_offset((start - i64::from(offset)) as f32);
        }
    }

    /// Geometry of item `index` relative to the viewport, visible or not.
    #[must_use]
    pub fn item(&self, index: usize) -> Option<ItemInfo> {
        let start = *self.starts.get(index)?;
        let size = self.extents[index];
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Float-to-int casts saturate; offsets beyond i32 are not representable anyway"
        )]
        let offset = (start as f32 - self.scroll_offset).round() as i32;
        Some(ItemInfo::new(index, offset, size))
    }

    fn relayout(&mut self) {
        self.starts.clear();
        let mut position = i64::from(self.padding_before);
        for extent in &self.extents {
            self.starts.push(position);
            position += i64::from(*extent) + i64::from(self.spacing);
        }
    }
}

impl ScrollHost for SnapList {
    fn visible_items(&self) -> impl Iterator<Item = ItemInfo> + '_ {
        let viewport = i32::try_from(self.viewport_extent).unwrap_or(i32::MAX);
        let spacing = i32::try_from(self.spacing).unwrap_or(i32::MAX);
        // An item stays laid out while the leading edge is in its trailing gap.
        (0..self.len())
            .filter_map(move |index| self.item(index))
            .skip_while(move |item| item.end().saturating_add(spacing) <= 0)
            .take_while(move |item| item.offset < viewport)
    }

    fn total_item_count(&self) -> usize {
        self.len()
    }

    fn viewport_range(&self) -> (i32, i32) {
        (0, i32::try_from(self.viewport_extent).unwrap_or(i32::MAX))
    }

    fn scroll_by(&mut self, delta: f32) -> f32 {
        debug_assert!(delta.is_finite(), "scroll delta must be finite");
        let before = self.scroll_offset;
        self.set_scroll_offset(before + delta);
        self.scroll_offset - before
    }
}
