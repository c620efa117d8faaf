// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Observable "currently animating towards" state.

use core::sync::atomic::{AtomicUsize, Ordering};

const IDLE: usize = usize::MAX;

/// The item index a running fling is driving towards, if any.
///
/// Readable from anywhere that can see the owning behavior (for example a page
/// indicator). Only the fling driver writes it, through a scoped guard that
/// clears it again on every exit path.
#[derive(Debug)]
pub struct AnimationTarget(AtomicUsize);

impl AnimationTarget {
    /// Creates an idle target.
    #[must_use]
    pub const fn new() -> Self {
        Self(AtomicUsize::new(IDLE))
    }

    /// The current target index, or `None` when no fling is running.
    #[must_use]
    pub fn get(&self) -> Option<usize> {
        match self.0.load(Ordering::Acquire) {
            IDLE => None,
            index => Some(index),
        }
    }

    /// Publishes `index` until the returned guard is released or dropped.
    pub(crate) fn acquire(&self, index: usize) -> TargetGuard<'_> {
        self.store(index);
        TargetGuard { target: self }
    }

    fn store(&self, index: usize) {
        debug_assert_ne!(index, IDLE, "usize::MAX is reserved for the idle state");
        self.0.store(index, Ordering::Release);
    }

    fn clear(&self) {
        self.0.store(IDLE, Ordering::Release);
    }
}

impl Default for AnimationTarget {
    fn default() -> Self {
        Self::new()
    }
}

/// Scoped ownership of an [`AnimationTarget`]; clears it when dropped.
#[derive(Debug)]
pub(crate) struct TargetGuard<'a> {
    target: &'a AnimationTarget,
}

impl Drop for TargetGuard<'_> {
    fn drop(&mut self) {
        self.target.clear();
    }
}
