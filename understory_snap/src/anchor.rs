// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Anchor policies: where an item should rest relative to the viewport.

use crate::{ItemInfo, LayoutSnapshot};

/// Computes the resting offset of an item relative to the viewport's leading edge.
///
/// Implementations must be pure: the same snapshot and item must always map to
/// the same offset. The engine calls this many times per tick, against fresh
/// snapshots, and never caches the result.
///
/// Any `Fn(&LayoutSnapshot, &ItemInfo) -> i32` closure is a [`SnapAnchor`], which
/// is the way to express custom offsets:
///
/// ```rust
/// use understory_snap::{ItemInfo, LayoutSnapshot, SnapAnchor};
///
/// // Rest 16px after the viewport's leading edge.
/// let inset = |_: &LayoutSnapshot, _: &ItemInfo| 16;
/// let layout = LayoutSnapshot::new([ItemInfo::new(0, 0, 40)], 1, (0, 100));
/// assert_eq!(inset.anchor_offset(&layout, &layout.visible_items()[0]), 16);
/// ```
pub trait SnapAnchor {
    /// Offset at which `item` is considered snapped.
    fn anchor_offset(&self, layout: &LayoutSnapshot, item: &ItemInfo) -> i32;
}

impl<F> SnapAnchor for F
where
    F: Fn(&LayoutSnapshot, &ItemInfo) -> i32,
{
    fn anchor_offset(&self, layout: &LayoutSnapshot, item: &ItemInfo) -> i32 {
        self(layout, item)
    }
}

/// The canonical anchor policies.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SnapPosition {
    /// Align the item's leading edge with the viewport's leading edge.
    #[default]
    Start,
    /// Center the item within the layout extent.
    Center,
    /// Align the item's trailing edge with the end of the layout extent.
    End,
}

impl SnapAnchor for SnapPosition {
    fn anchor_offset(&self, layout: &LayoutSnapshot, item: &ItemInfo) -> i32 {
        match self {
            Self::Start => 0,
            Self::Center => (layout.layout_extent() - item.extent()) / 2,
            Self::End => layout.layout_extent() - item.extent(),
        }
    }
}
