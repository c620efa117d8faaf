// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tick-by-tick trajectory driving and overshoot correction.

use tracing::trace;

use crate::{CurveState, DecayCurve, ItemInfo, LayoutSnapshot, ScrollHost, SnapAnchor, SpringCurve};

/// Signed correction, in pixels, that puts the target item back on its anchor
/// once the list has scrolled past it.
///
/// `direction` is the sign of the motion: positive when scrolling towards
/// higher indices. Returns `0` while the target has not been reached, and
/// also when the target's position cannot be resolved from `layout`.
#[must_use]
pub fn calculate_snap_back<A: SnapAnchor + ?Sized>(
    layout: &LayoutSnapshot,
    anchor: &A,
    current: &ItemInfo,
    direction: f32,
    target_index: usize,
) -> i32 {
    let current_anchor = anchor.anchor_offset(layout, current);
    let overshot = if direction > 0.0 && current.index >= target_index {
        current.index > target_index || current.offset < current_anchor
    } else if direction <= 0.0 && current.index <= target_index {
        current.index < target_index || current.offset > current_anchor
    } else {
        false
    };
    if !overshot {
        return 0;
    }
    layout
        .distance_to_index_snap(target_index, anchor)
        .unwrap_or(0)
}

/// Result of one snap-back check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SnapBack {
    /// The target has not been passed.
    Clear,
    /// A correction of this many pixels was issued.
    Corrected(i32),
    /// Nothing is laid out any more.
    NoCurrentItem,
}

impl SnapBack {
    pub(crate) const fn cancels(self) -> bool {
        !matches!(self, Self::Clear)
    }
}

/// Re-reads the host's layout and, if the target item has been passed,
/// scrolls straight back onto its anchor.
pub(crate) fn check_snap_back<H, A>(
    host: &mut H,
    anchor: &A,
    direction: f32,
    target_index: usize,
) -> SnapBack
where
    H: ScrollHost + ?Sized,
    A: SnapAnchor + ?Sized,
{
    let layout = host.snapshot();
    let Some(current) = layout.current_item(anchor) else {
        return SnapBack::NoCurrentItem;
    };
    let correction = calculate_snap_back(&layout, anchor, &current, direction, target_index);
    if correction == 0 {
        return SnapBack::Clear;
    }
    trace!(
        correction,
        current_index = current.index,
        target_index,
        "snapping back onto target"
    );
    host.scroll_by(correction as f32);
    SnapBack::Corrected(correction)
}

/// The curves and tolerances a trajectory is driven with.
#[derive(Debug)]
pub(crate) struct Driver<'a, A: ?Sized, D, S> {
    pub(crate) anchor: &'a A,
    pub(crate) decay: &'a D,
    pub(crate) spring: &'a S,
    pub(crate) consumption_tolerance: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Curve {
    Decay,
    Spring { target: f32 },
}

/// How a single tick ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum TickResult {
    /// Keep ticking.
    Running,
    /// The curve came to rest on its own.
    Settled { velocity: f32 },
    /// The snap-back corrector fired.
    SnappedBack { velocity: f32 },
    /// The host refused part of the requested delta.
    Boundary { velocity: f32 },
    /// The layout no longer has a current item.
    NoCurrentItem { velocity: f32 },
}

/// A single decay or spring motion, applied to the host as scroll deltas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Trajectory {
    curve: Curve,
    state: CurveState,
    last_applied: f32,
    direction: f32,
}

impl Trajectory {
    /// A decay from `0` with the release velocity.
    pub(crate) fn decay(velocity: f32) -> Self {
        Self {
            curve: Curve::Decay,
            state: CurveState::new(0.0, velocity),
            last_applied: 0.0,
            direction: velocity,
        }
    }

    /// A spring from `0` towards `target` pixels.
    pub(crate) fn spring(velocity: f32, target: f32) -> Self {
        Self {
            curve: Curve::Spring { target },
            state: CurveState::new(0.0, velocity),
            last_applied: 0.0,
            direction: target,
        }
    }

    /// Advances the curve by `dt`, scrolls the host by the change, and checks
    /// whether the trajectory has to stop.
    pub(crate) fn tick<H, A, D, S>(
        &mut self,
        host: &mut H,
        driver: &Driver<'_, A, D, S>,
        target_index: usize,
        dt: f32,
    ) -> TickResult
    where
        H: ScrollHost + ?Sized,
        A: SnapAnchor + ?Sized,
        D: DecayCurve,
        S: SpringCurve,
    {
        let (next, at_rest) = match self.curve {
            Curve::Decay => {
                let next = driver.decay.step(self.state, dt);
                (next, driver.decay.is_at_rest(&next))
            }
            Curve::Spring { target } => {
                let next = driver.spring.step(self.state, target, dt);
                if driver.spring.is_at_rest(&next, target) {
                    (CurveState::new(target, 0.0), true)
                } else {
                    (next, false)
                }
            }
        };

        let delta = next.value - self.last_applied;
        let consumed = host.scroll_by(delta);
        self.last_applied = next.value;
        self.state = next;
        trace!(delta, consumed, value = next.value, "fling tick");

        let velocity = next.velocity;
        match check_snap_back(host, driver.anchor, self.direction, target_index) {
            SnapBack::NoCurrentItem => return TickResult::NoCurrentItem { velocity },
            snap_back if snap_back.cancels() => return TickResult::SnappedBack { velocity },
            _ => {}
        }
        if (delta - consumed).abs() > driver.consumption_tolerance {
            return TickResult::Boundary { velocity };
        }
        if at_rest {
            TickResult::Settled { velocity }
        } else {
            TickResult::Running
        }
    }
}
