// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Choosing the trajectory and the item a fling should land on.

#[cfg(not(feature = "std"))]
#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use crate::{DecayCurve, ItemInfo, LayoutSnapshot, SnapAnchor};

/// How a fling travels to its target item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlingMode {
    /// Free deceleration past the current item.
    Decay,
    /// A short corrective spring onto a neighboring item.
    Spring,
}

/// The outcome of target selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlingPlan {
    /// Trajectory to run.
    pub mode: FlingMode,
    /// Index the trajectory should come to rest on.
    pub target_index: usize,
}

/// Numeric limits applied during target selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlingLimits {
    /// Below this speed a decay cannot pass the current item.
    pub min_velocity: f32,
    /// Upper bound on the distance a decay may extrapolate over, in pixels.
    pub max_fling_distance: i32,
}

impl Default for FlingLimits {
    fn default() -> Self {
        Self {
            min_velocity: 0.5,
            max_fling_distance: i32::MAX,
        }
    }
}

/// Returns `true` if a decay starting at `current` with `velocity` would travel
/// past the current item.
///
/// Near-zero velocities never pass the item.
pub fn can_fling_past_current_item<A, D>(
    layout: &LayoutSnapshot,
    anchor: &A,
    decay: &D,
    current: &ItemInfo,
    velocity: f32,
    min_velocity: f32,
) -> bool
where
    A: SnapAnchor + ?Sized,
    D: DecayCurve + ?Sized,
{
    if velocity.abs() < min_velocity {
        return false;
    }
    let projected = decay.target_value(current.offset as f32, velocity);
    let anchor_offset = anchor.anchor_offset(layout, current) as f32;
    let spacing = layout.item_spacing() as f32;
    if velocity < 0.0 {
        projected <= anchor_offset - (current.extent() as f32 + spacing)
    } else {
        projected >= anchor_offset + spacing
    }
}

/// Decides between a decay and a spring trajectory and picks the target index.
///
/// The target is always within `0..=layout.last_index()`. For spring
/// trajectories only the current item's position matters; the release speed
/// does not bias the choice.
pub fn decide_fling_plan<A, D>(
    layout: &LayoutSnapshot,
    anchor: &A,
    decay: &D,
    current: &ItemInfo,
    velocity: f32,
    limits: FlingLimits,
) -> FlingPlan
where
    A: SnapAnchor + ?Sized,
    D: DecayCurve + ?Sized,
{
    let last = layout.last_index();
    if can_fling_past_current_item(layout, anchor, decay, current, velocity, limits.min_velocity)
    {
        return FlingPlan {
            mode: FlingMode::Decay,
            target_index: decay_target_index(layout, decay, current, velocity, limits)
                .min(last),
        };
    }

    let anchor_offset = anchor.anchor_offset(layout, current);
    let target_index = if current.offset < anchor_offset - current.extent() / 2 {
        current.index.saturating_add(1)
    } else {
        current.index
    };
    FlingPlan {
        mode: FlingMode::Spring,
        target_index: target_index.min(last),
    }
}

fn decay_target_index<D: DecayCurve + ?Sized>(
    layout: &LayoutSnapshot,
    decay: &D,
    current: &ItemInfo,
    velocity: f32,
    limits: FlingLimits,
) -> usize {
    let Some(per_child) = layout.distance_per_child() else {
        return current.index;
    };
    let max_distance = limits.max_fling_distance.max(0) as f32;
    let distance = decay
        .target_value(0.0, velocity)
        .clamp(-max_distance, max_distance);
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Float-to-int casts saturate and the index is clamped afterwards"
    )]
    let children = (distance / per_child).trunc() as i64;
    offset_index(current.index, children)
}

/// Moves `index` by a signed number of items, saturating at `0` and `usize::MAX`.
pub(crate) fn offset_index(index: usize, delta: i64) -> usize {
    let magnitude = usize::try_from(delta.unsigned_abs()).unwrap_or(usize::MAX);
    if delta < 0 {
        index.saturating_sub(magnitude)
    } else {
        index.saturating_add(magnitude)
    }
}
