// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The interface a host scrollable list exposes to the fling engine.

use crate::{ItemInfo, LayoutSnapshot};

/// A 1D scrollable list of discrete items.
///
/// The engine only reads geometry through this trait and only mutates the list
/// through [`scroll_by`](Self::scroll_by). Geometry is re-read after every
/// scroll, so hosts are free to re-layout (and shift items) inside `scroll_by`.
pub trait ScrollHost {
    /// Currently laid-out items, in ascending index order.
    fn visible_items(&self) -> impl Iterator<Item = ItemInfo> + '_;

    /// Total number of items in the list.
    fn total_item_count(&self) -> usize;

    /// `(start, end)` pixel range of the viewport along the scroll axis.
    fn viewport_range(&self) -> (i32, i32);

    /// Scrolls by `delta` pixels and returns how much was actually consumed.
    ///
    /// Positive deltas move towards higher indices. Hosts may consume less
    /// than requested, for example at the ends of the list.
    fn scroll_by(&mut self, delta: f32) -> f32;

    /// Captures the current geometry.
    fn snapshot(&self) -> LayoutSnapshot {
        LayoutSnapshot::new(
            self.visible_items(),
            self.total_item_count(),
            self.viewport_range(),
        )
    }
}
