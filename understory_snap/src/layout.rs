// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Read-only snapshots of a host list's visible geometry.

#[cfg(not(feature = "std"))]
#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use smallvec::SmallVec;

use crate::SnapAnchor;

/// Geometry of one laid-out item along the scroll axis.
///
/// Offsets are measured in pixels from the viewport's leading edge and may be
/// negative for items that are partially scrolled out. An `ItemInfo` is only
/// meaningful for the snapshot it came from; after any scroll it is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemInfo {
    /// Index of the item in the list.
    pub index: usize,
    /// Offset of the item's leading edge from the viewport's leading edge.
    pub offset: i32,
    /// Size of the item along the scroll axis.
    pub size: u32,
}

impl ItemInfo {
    /// Creates a new [`ItemInfo`].
    #[must_use]
    pub const fn new(index: usize, offset: i32, size: u32) -> Self {
        Self {
            index,
            offset,
            size,
        }
    }

    /// The item size as a signed pixel distance, saturating at `i32::MAX`.
    #[must_use]
    pub fn extent(&self) -> i32 {
        i32::try_from(self.size).unwrap_or(i32::MAX)
    }

    /// Offset of the item's trailing edge.
    #[must_use]
    pub fn end(&self) -> i32 {
        self.offset.saturating_add(self.extent())
    }
}

/// An immutable view over the host list's geometry at one point in time.
///
/// Visible items are stored in ascending index order with no duplicates. The
/// snapshot may be empty when nothing has been laid out yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutSnapshot {
    items: SmallVec<[ItemInfo; 8]>,
    total_item_count: usize,
    viewport_start: i32,
    viewport_end: i32,
}

impl LayoutSnapshot {
    /// Creates a snapshot from the visible items, the total number of items in
    /// the list, and the `(start, end)` pixel range of the viewport.
    #[must_use]
    pub fn new(
        items: impl IntoIterator<Item = ItemInfo>,
        total_item_count: usize,
        viewport: (i32, i32),
    ) -> Self {
        let items: SmallVec<[ItemInfo; 8]> = items.into_iter().collect();
        debug_assert!(
            items.windows(2).all(|pair| pair[0].index < pair[1].index),
            "visible items must be strictly ascending by index"
        );
        Self {
            items,
            total_item_count,
            viewport_start: viewport.0,
            viewport_end: viewport.1,
        }
    }

    /// The visible items, ordered by index.
    #[must_use]
    pub fn visible_items(&self) -> &[ItemInfo] {
        &self.items
    }

    /// Returns `true` if no items are laid out.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of items in the list, visible or not.
    #[must_use]
    pub const fn total_item_count(&self) -> usize {
        self.total_item_count
    }

    /// Leading edge of the viewport.
    #[must_use]
    pub const fn viewport_start(&self) -> i32 {
        self.viewport_start
    }

    /// Trailing edge of the viewport.
    #[must_use]
    pub const fn viewport_end(&self) -> i32 {
        self.viewport_end
    }

    /// Highest valid item index, or `0` for an empty list.
    #[must_use]
    pub const fn last_index(&self) -> usize {
        self.total_item_count.saturating_sub(1)
    }

    /// Gap between consecutive items, inferred from the first two visible items.
    ///
    /// Returns `0` when fewer than two items are visible.
    #[must_use]
    pub fn item_spacing(&self) -> i32 {
        match self.items.as_slice() {
            [first, second, ..] => second.offset - first.end(),
            _ => 0,
        }
    }

    /// Extent that anchors are positioned within.
    ///
    /// This is the viewport extent. Before the viewport has been measured, the
    /// size of the first visible item with a nonzero size is used instead.
    #[must_use]
    pub fn layout_extent(&self) -> i32 {
        let viewport = self.viewport_end.saturating_sub(self.viewport_start);
        if viewport > 0 {
            return viewport;
        }
        self.items
            .iter()
            .find(|item| item.size > 0)
            .map_or(0, ItemInfo::extent)
    }

    /// Average distance occupied by one visible item, including spacing.
    ///
    /// Returns `None` when it cannot be inferred (nothing visible, or all
    /// visible items collapsed to a single point).
    #[must_use]
    pub fn distance_per_child(&self) -> Option<f32> {
        let start = self.items.iter().map(|item| item.offset).min()?;
        let end = self.items.iter().map(ItemInfo::end).max()?;
        let distance = end.saturating_sub(start);
        if distance == 0 {
            return None;
        }
        Some(distance as f32 / self.items.len() as f32)
    }

    /// Looks up a visible item by index.
    #[must_use]
    pub fn item(&self, index: usize) -> Option<ItemInfo> {
        self.items
            .binary_search_by_key(&index, |item| item.index)
            .ok()
            .map(|pos| self.items[pos])
    }

    /// The item the list is currently resting on for the given anchor.
    ///
    /// This is the highest-index visible item whose offset is at or before its
    /// anchor offset. Returns `None` when no visible item qualifies.
    #[must_use]
    pub fn current_item<A: SnapAnchor + ?Sized>(&self, anchor: &A) -> Option<ItemInfo> {
        self.items
            .iter()
            .rev()
            .find(|item| item.offset <= anchor.anchor_offset(self, item))
            .copied()
    }

    /// Scroll distance that would place item `index` on its anchor.
    ///
    /// A positive result means scrolling forward (towards higher indices).
    /// For items outside the snapshot the distance is extrapolated from the
    /// current item using [`distance_per_child`](Self::distance_per_child),
    /// assuming the off-screen item anchors like the current one.
    #[must_use]
    pub fn distance_to_index_snap<A: SnapAnchor + ?Sized>(
        &self,
        index: usize,
        anchor: &A,
    ) -> Option<i32> {
        if let Some(item) = self.item(index) {
            return Some(item.offset - anchor.anchor_offset(self, &item));
        }
        let current = self.current_item(anchor)?;
        let per_child = self.distance_per_child()?;
        let children = index as f32 - current.index as f32;
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Float-to-int casts saturate; the estimate is bounded by the list extent"
        )]
        let estimated = (children * per_child).round() as i32;
        let offset = current.offset.saturating_add(estimated);
        Some(offset.saturating_sub(anchor.anchor_offset(self, &current)))
    }
}
