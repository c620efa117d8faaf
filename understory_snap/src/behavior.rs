// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The public entry point: one snapping fling per gesture.

use alloc::boxed::Box;
use core::cmp::Ordering;
use core::fmt;

use tracing::debug;

use crate::target::TargetGuard;
use crate::trajectory::{Driver, TickResult, Trajectory};
use crate::{
    AnimationTarget, ConfigError, DecayCurve, ExponentialDecay, FlingLimits, FlingMode, ItemInfo,
    LayoutSnapshot, ScrollHost, SnapAnchor, Spring, SpringCurve, decide_fling_plan,
};

/// Computes the maximum decay distance for the given layout.
pub type MaxFlingDistanceFn = Box<dyn Fn(&LayoutSnapshot) -> i32 + Send + Sync>;

/// Adjusts a selected target: `(layout, start_index, target_index) -> index`.
pub type SnapIndexFn = Box<dyn Fn(&LayoutSnapshot, usize, usize) -> usize + Send + Sync>;

/// Construction-time settings of a [`SnapFlingBehavior`].
pub struct SnapConfig {
    frame_interval: f32,
    consumption_tolerance: f32,
    min_fling_velocity: f32,
    max_fling_distance: Option<MaxFlingDistanceFn>,
    snap_index: Option<SnapIndexFn>,
}

impl SnapConfig {
    /// Time step used by [`SnapFlingBehavior::perform_fling`], in seconds.
    #[must_use]
    pub const fn frame_interval(&self) -> f32 {
        self.frame_interval
    }

    /// How far, in pixels, the host may fall short of a requested scroll
    /// before the fling is treated as having hit a boundary.
    #[must_use]
    pub const fn consumption_tolerance(&self) -> f32 {
        self.consumption_tolerance
    }

    /// Release speed below which a fling never decays past the current item.
    #[must_use]
    pub const fn min_fling_velocity(&self) -> f32 {
        self.min_fling_velocity
    }

    /// Target selection limits for `layout`.
    #[must_use]
    pub fn limits(&self, layout: &LayoutSnapshot) -> FlingLimits {
        FlingLimits {
            min_velocity: self.min_fling_velocity,
            max_fling_distance: self
                .max_fling_distance
                .as_ref()
                .map_or(i32::MAX, |max| max(layout)),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.frame_interval.is_finite() && self.frame_interval > 0.0) {
            return Err(ConfigError::FrameInterval(self.frame_interval));
        }
        if !(self.consumption_tolerance.is_finite() && self.consumption_tolerance >= 0.0) {
            return Err(ConfigError::ConsumptionTolerance(self.consumption_tolerance));
        }
        if !(self.min_fling_velocity.is_finite() && self.min_fling_velocity >= 0.0) {
            return Err(ConfigError::MinFlingVelocity(self.min_fling_velocity));
        }
        Ok(())
    }
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            frame_interval: 1.0 / 60.0,
            consumption_tolerance: 0.5,
            min_fling_velocity: 0.5,
            max_fling_distance: None,
            snap_index: None,
        }
    }
}

impl fmt::Debug for SnapConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnapConfig")
            .field("frame_interval", &self.frame_interval)
            .field("consumption_tolerance", &self.consumption_tolerance)
            .field("min_fling_velocity", &self.min_fling_velocity)
            .field("max_fling_distance", &self.max_fling_distance.is_some())
            .field("snap_index", &self.snap_index.is_some())
            .finish()
    }
}

/// Why a fling stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlingEnd {
    /// Nothing could be snapped: the layout had no current item.
    NoCurrentItem,
    /// The trajectory came to rest on its own.
    Settled,
    /// The target was passed and the list was scrolled back onto it.
    SnappedBack,
    /// The host stopped consuming scroll, typically at an end of the list.
    Boundary,
}

/// Summary of a finished fling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlingOutcome {
    /// Velocity the host may pass on, for example to an overscroll effect.
    pub leftover_velocity: f32,
    /// Why the fling stopped.
    pub end: FlingEnd,
    /// The index the fling was driving towards, if one was selected.
    pub target_index: Option<usize>,
}

/// Progress reported by [`Fling::tick`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlingStatus {
    /// The fling needs more ticks.
    Running,
    /// The fling is over.
    Finished(FlingOutcome),
}

/// Snaps a list of items onto an anchor at the end of every fling.
///
/// The behavior is configured once and then invoked by the host for each
/// fling gesture with [`perform_fling`](Self::perform_fling), or driven frame
/// by frame through [`begin_fling`](Self::begin_fling). It owns no list
/// state besides the observable [`AnimationTarget`]; the host is expected not
/// to run two flings on the same behavior at once.
pub struct SnapFlingBehavior<A, D = ExponentialDecay, S = Spring> {
    anchor: A,
    decay: D,
    spring: S,
    config: SnapConfig,
    target: AnimationTarget,
}

impl<A: SnapAnchor> SnapFlingBehavior<A> {
    /// Creates a behavior with the default curves and settings.
    #[must_use]
    pub fn new(anchor: A) -> Self {
        Self {
            anchor,
            decay: ExponentialDecay::default(),
            spring: Spring::default(),
            config: SnapConfig::default(),
            target: AnimationTarget::new(),
        }
    }

    /// Starts configuring a behavior for `anchor`.
    #[must_use]
    pub fn builder(anchor: A) -> SnapFlingBuilder<A> {
        SnapFlingBuilder {
            anchor,
            decay: ExponentialDecay::default(),
            spring: Spring::default(),
            config: SnapConfig::default(),
        }
    }
}

impl<A, D, S> SnapFlingBehavior<A, D, S>
where
    A: SnapAnchor,
    D: DecayCurve,
    S: SpringCurve,
{
    /// The anchor policy.
    #[must_use]
    pub fn anchor(&self) -> &A {
        &self.anchor
    }

    /// The settings this behavior was built with.
    #[must_use]
    pub fn config(&self) -> &SnapConfig {
        &self.config
    }

    /// The observable target cell.
    #[must_use]
    pub fn animation_target(&self) -> &AnimationTarget {
        &self.target
    }

    /// Index of the item a running fling is driving towards, if any.
    #[must_use]
    pub fn current_animation_target(&self) -> Option<usize> {
        self.target.get()
    }

    /// Runs a complete fling and returns the leftover velocity.
    ///
    /// Ticks are simulated at the configured frame interval, scrolling `host`
    /// on each one. When the layout has no current item the fling is a no-op
    /// and `velocity` is returned unchanged.
    pub fn perform_fling<H: ScrollHost + ?Sized>(&self, host: &mut H, velocity: f32) -> f32 {
        self.perform_fling_detailed(host, velocity).leftover_velocity
    }

    /// Like [`perform_fling`](Self::perform_fling), but reports how the fling ended.
    pub fn perform_fling_detailed<H: ScrollHost + ?Sized>(
        &self,
        host: &mut H,
        velocity: f32,
    ) -> FlingOutcome {
        let mut fling = self.begin_fling(&*host, velocity);
        let dt = self.config.frame_interval;
        loop {
            if let FlingStatus::Finished(outcome) = fling.tick(host, dt) {
                return outcome;
            }
        }
    }

    /// Selects a target and returns a fling to be driven with [`Fling::tick`].
    ///
    /// The animation target is published immediately and cleared when the
    /// fling finishes or is dropped.
    pub fn begin_fling<H: ScrollHost + ?Sized>(&self, host: &H, velocity: f32) -> Fling<'_, A, D, S> {
        debug_assert!(velocity.is_finite(), "fling velocity must be finite");
        let layout = host.snapshot();
        let Some(current) = layout.current_item(&self.anchor) else {
            debug!(velocity, "no current item, fling left unconsumed");
            return Fling::finished(
                self,
                FlingOutcome {
                    leftover_velocity: velocity,
                    end: FlingEnd::NoCurrentItem,
                    target_index: None,
                },
            );
        };

        let plan = decide_fling_plan(
            &layout,
            &self.anchor,
            &self.decay,
            &current,
            velocity,
            self.config.limits(&layout),
        );
        let target_index = match &self.config.snap_index {
            Some(snap_index) => snap_index(&layout, current.index, plan.target_index),
            None => plan.target_index,
        }
        .min(layout.last_index());
        debug!(
            mode = ?plan.mode,
            velocity,
            current_index = current.index,
            target_index,
            "starting snap fling"
        );

        let trajectory = match plan.mode {
            FlingMode::Decay => Trajectory::decay(velocity),
            FlingMode::Spring => {
                let distance = spring_distance(&layout, &self.anchor, &current, target_index);
                if distance == 0 {
                    return Fling::finished(
                        self,
                        FlingOutcome {
                            leftover_velocity: 0.0,
                            end: FlingEnd::Settled,
                            target_index: Some(target_index),
                        },
                    );
                }
                Trajectory::spring(velocity, distance as f32)
            }
        };
        Fling {
            behavior: self,
            guard: Some(self.target.acquire(target_index)),
            state: FlingState::Running {
                trajectory,
                target_index,
            },
            last_settle_distance: None,
        }
    }

    fn driver(&self) -> Driver<'_, A, D, S> {
        Driver {
            anchor: &self.anchor,
            decay: &self.decay,
            spring: &self.spring,
            consumption_tolerance: self.config.consumption_tolerance,
        }
    }
}

impl<A: fmt::Debug, D: fmt::Debug, S: fmt::Debug> fmt::Debug for SnapFlingBehavior<A, D, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnapFlingBehavior")
            .field("anchor", &self.anchor)
            .field("decay", &self.decay)
            .field("spring", &self.spring)
            .field("config", &self.config)
            .field("target", &self.target)
            .finish()
    }
}

/// Signed spring distance from `current` towards `target_index`.
///
/// Moving to a neighbor travels one item plus spacing. Staying on the current
/// item pulls back towards its anchor, which is never ahead of it; an item
/// already on its anchor needs no motion.
fn spring_distance<A: SnapAnchor + ?Sized>(
    layout: &LayoutSnapshot,
    anchor: &A,
    current: &ItemInfo,
    target_index: usize,
) -> i32 {
    let step = current.extent().saturating_add(layout.item_spacing());
    match target_index.cmp(&current.index) {
        Ordering::Greater => step,
        Ordering::Less => -step,
        Ordering::Equal if current.offset == anchor.anchor_offset(layout, current) => 0,
        Ordering::Equal => -step,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum FlingState {
    Running {
        trajectory: Trajectory,
        target_index: usize,
    },
    Finished(FlingOutcome),
}

/// A fling in progress.
///
/// Dropping an unfinished fling cancels it and clears the animation target.
pub struct Fling<'a, A, D, S> {
    behavior: &'a SnapFlingBehavior<A, D, S>,
    guard: Option<TargetGuard<'a>>,
    state: FlingState,
    last_settle_distance: Option<u32>,
}

impl<'a, A, D, S> Fling<'a, A, D, S>
where
    A: SnapAnchor,
    D: DecayCurve,
    S: SpringCurve,
{
    fn finished(behavior: &'a SnapFlingBehavior<A, D, S>, outcome: FlingOutcome) -> Self {
        Self {
            behavior,
            guard: None,
            state: FlingState::Finished(outcome),
            last_settle_distance: None,
        }
    }

    /// The index this fling is driving towards.
    #[must_use]
    pub fn target_index(&self) -> Option<usize> {
        match self.state {
            FlingState::Running { target_index, .. } => Some(target_index),
            FlingState::Finished(outcome) => outcome.target_index,
        }
    }

    /// How the fling ended, once it has.
    #[must_use]
    pub fn outcome(&self) -> Option<FlingOutcome> {
        match self.state {
            FlingState::Running { .. } => None,
            FlingState::Finished(outcome) => Some(outcome),
        }
    }

    /// Returns `true` once the fling is over.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self.state, FlingState::Finished(_))
    }

    /// Advances the fling by `dt` seconds, scrolling `host`.
    ///
    /// Ticking a finished fling does nothing and reports its outcome again.
    pub fn tick<H: ScrollHost + ?Sized>(&mut self, host: &mut H, dt: f32) -> FlingStatus {
        let behavior = self.behavior;
        let (trajectory, target_index) = match &mut self.state {
            FlingState::Finished(outcome) => return FlingStatus::Finished(*outcome),
            FlingState::Running {
                trajectory,
                target_index,
            } => (trajectory, *target_index),
        };

        let (end, velocity) = match trajectory.tick(host, &behavior.driver(), target_index, dt) {
            TickResult::Running => return FlingStatus::Running,
            TickResult::Settled { velocity } => {
                // A trajectory can come to rest short of its target, for example when the
                // target was off screen and its distance was estimated. Settle with springs
                // for as long as each one gets closer.
                let remaining = host
                    .snapshot()
                    .distance_to_index_snap(target_index, &behavior.anchor)
                    .filter(|distance| *distance != 0);
                match remaining {
                    Some(distance)
                        if self
                            .last_settle_distance
                            .is_none_or(|last| distance.unsigned_abs() < last) =>
                    {
                        debug!(distance, target_index, "settling onto target with a spring");
                        *trajectory = Trajectory::spring(velocity, distance as f32);
                        self.last_settle_distance = Some(distance.unsigned_abs());
                        return FlingStatus::Running;
                    }
                    _ => (FlingEnd::Settled, velocity),
                }
            }
            TickResult::SnappedBack { velocity } => (FlingEnd::SnappedBack, velocity),
            TickResult::Boundary { velocity } => (FlingEnd::Boundary, velocity),
            TickResult::NoCurrentItem { velocity } => (FlingEnd::NoCurrentItem, velocity),
        };

        let outcome = FlingOutcome {
            leftover_velocity: velocity,
            end,
            target_index: Some(target_index),
        };
        self.guard = None;
        self.state = FlingState::Finished(outcome);
        debug!(?end, leftover_velocity = velocity, target_index, "snap fling finished");
        FlingStatus::Finished(outcome)
    }
}

impl<A, D, S> fmt::Debug for Fling<'_, A, D, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fling")
            .field("state", &self.state)
            .field("last_settle_distance", &self.last_settle_distance)
            .finish_non_exhaustive()
    }
}

/// Configures a [`SnapFlingBehavior`].
pub struct SnapFlingBuilder<A, D = ExponentialDecay, S = Spring> {
    anchor: A,
    decay: D,
    spring: S,
    config: SnapConfig,
}

impl<A, D, S> SnapFlingBuilder<A, D, S>
where
    A: SnapAnchor,
    D: DecayCurve,
    S: SpringCurve,
{
    /// Uses `decay` for long flings.
    #[must_use]
    pub fn decay<D2: DecayCurve>(self, decay: D2) -> SnapFlingBuilder<A, D2, S> {
        SnapFlingBuilder {
            anchor: self.anchor,
            decay,
            spring: self.spring,
            config: self.config,
        }
    }

    /// Uses `spring` for short corrective flings.
    #[must_use]
    pub fn spring<S2: SpringCurve>(self, spring: S2) -> SnapFlingBuilder<A, D, S2> {
        SnapFlingBuilder {
            anchor: self.anchor,
            decay: self.decay,
            spring,
            config: self.config,
        }
    }

    /// Caps how far a decay may extrapolate, in pixels. Unbounded by default.
    #[must_use]
    pub fn max_fling_distance(
        mut self,
        max: impl Fn(&LayoutSnapshot) -> i32 + Send + Sync + 'static,
    ) -> Self {
        self.config.max_fling_distance = Some(Box::new(max));
        self
    }

    /// Lets the host adjust each selected target.
    ///
    /// The hook receives the layout, the index the fling started on, and the
    /// selected target. Its result is clamped to the list.
    #[must_use]
    pub fn snap_index(
        mut self,
        snap_index: impl Fn(&LayoutSnapshot, usize, usize) -> usize + Send + Sync + 'static,
    ) -> Self {
        self.config.snap_index = Some(Box::new(snap_index));
        self
    }

    /// Sets the time step used by [`SnapFlingBehavior::perform_fling`], in seconds.
    #[must_use]
    pub fn frame_interval(mut self, seconds: f32) -> Self {
        self.config.frame_interval = seconds;
        self
    }

    /// Sets the under-consumption tolerance, in pixels.
    #[must_use]
    pub fn consumption_tolerance(mut self, pixels: f32) -> Self {
        self.config.consumption_tolerance = pixels;
        self
    }

    /// Sets the release speed below which flings never decay past the current item.
    #[must_use]
    pub fn min_fling_velocity(mut self, velocity: f32) -> Self {
        self.config.min_fling_velocity = velocity;
        self
    }

    /// Validates the settings and builds the behavior.
    pub fn build(self) -> Result<SnapFlingBehavior<A, D, S>, ConfigError> {
        self.config.validate()?;
        Ok(SnapFlingBehavior {
            anchor: self.anchor,
            decay: self.decay,
            spring: self.spring,
            config: self.config,
            target: AnimationTarget::new(),
        })
    }
}

impl<A: fmt::Debug, D: fmt::Debug, S: fmt::Debug> fmt::Debug for SnapFlingBuilder<A, D, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnapFlingBuilder")
            .field("anchor", &self.anchor)
            .field("decay", &self.decay)
            .field("spring", &self.spring)
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::{FlingEnd, FlingStatus, SnapFlingBehavior};
    use crate::{ConfigError, ItemInfo, ScrollHost, SnapAnchor, SnapList, SnapPosition};

    /// Wraps a [`SnapList`] and routes every scroll through `on_scroll`.
    struct TestHost<F> {
        list: SnapList,
        scrolls: usize,
        on_scroll: F,
    }

    fn host<F: FnMut(&mut SnapList, f32) -> f32>(list: SnapList, on_scroll: F) -> TestHost<F> {
        TestHost {
            list,
            scrolls: 0,
            on_scroll,
        }
    }

    fn plain(list: SnapList) -> TestHost<impl FnMut(&mut SnapList, f32) -> f32> {
        host(list, |list: &mut SnapList, delta| list.scroll_by(delta))
    }

    impl<F: FnMut(&mut SnapList, f32) -> f32> ScrollHost for TestHost<F> {
        fn visible_items(&self) -> impl Iterator<Item = ItemInfo> + '_ {
            self.list.visible_items()
        }

        fn total_item_count(&self) -> usize {
            self.list.total_item_count()
        }

        fn viewport_range(&self) -> (i32, i32) {
            self.list.viewport_range()
        }

        fn scroll_by(&mut self, delta: f32) -> f32 {
            self.scrolls += 1;
            (self.on_scroll)(&mut self.list, delta)
        }
    }

    fn scrolled(offset: f32) -> SnapList {
        let mut list = SnapList::uniform(30, 100, 300);
        list.set_scroll_offset(offset);
        list
    }

    fn anchored<A: SnapAnchor>(list: &SnapList, index: usize, anchor: &A) -> bool {
        list.snapshot().distance_to_index_snap(index, anchor) == Some(0)
    }

    #[test]
    fn empty_layout_is_a_no_op() {
        let behavior = SnapFlingBehavior::new(SnapPosition::Center);
        let mut host = plain(SnapList::uniform(0, 100, 300));
        let outcome = behavior.perform_fling_detailed(&mut host, 1234.0);
        assert_eq!(outcome.leftover_velocity, 1234.0);
        assert_eq!(outcome.end, FlingEnd::NoCurrentItem);
        assert_eq!(outcome.target_index, None);
        assert_eq!(host.scrolls, 0);
        assert_eq!(behavior.perform_fling(&mut host, -5.0), -5.0);
    }

    #[test]
    fn target_is_published_while_scrolling() {
        let behavior = SnapFlingBehavior::new(SnapPosition::Start);
        let target = behavior.animation_target();
        let mut observed = Vec::new();
        let (outcome, list) = {
            let mut host = host(SnapList::uniform(20, 100, 300), |list: &mut SnapList, delta| {
                observed.push(target.get());
                list.scroll_by(delta)
            });
            (behavior.perform_fling_detailed(&mut host, 3000.0), host.list)
        };

        let index = outcome.target_index.unwrap();
        assert_eq!(index, 7);
        assert_eq!(outcome.end, FlingEnd::SnappedBack);
        assert!(anchored(&list, index, &SnapPosition::Start));
        assert!(!observed.is_empty());
        assert!(observed.iter().all(|seen| *seen == Some(index)));
        assert_eq!(behavior.current_animation_target(), None);
    }

    #[test]
    fn dropping_a_fling_clears_the_target() {
        let behavior = SnapFlingBehavior::new(SnapPosition::Start);
        let mut list = scrolled(1000.0);
        let mut fling = behavior.begin_fling(&list, 3000.0);
        let target = fling.target_index();
        assert!(target.is_some());
        assert_eq!(behavior.current_animation_target(), target);
        assert_eq!(fling.tick(&mut list, 1.0 / 60.0), FlingStatus::Running);
        assert_eq!(behavior.current_animation_target(), target);
        drop(fling);
        assert_eq!(behavior.current_animation_target(), None);
    }

    #[test]
    fn flings_converge_on_every_anchor() {
        let velocities = [-2500.0, -600.0, -100.0, 0.0, 100.0, 600.0, 2500.0];
        for anchor in [SnapPosition::Start, SnapPosition::Center, SnapPosition::End] {
            let behavior = SnapFlingBehavior::new(anchor);
            for offset in [1000.0, 1030.0, 1070.0] {
                for velocity in velocities {
                    let mut list = scrolled(offset);
                    let start = list.snapshot().current_item(&anchor).unwrap().index;
                    let outcome = behavior.perform_fling_detailed(&mut list, velocity);
                    let index = outcome.target_index.unwrap();
                    assert_ne!(outcome.end, FlingEnd::Boundary);
                    assert!(
                        anchored(&list, index, &anchor),
                        "{anchor:?} from {offset} at {velocity}: {outcome:?}"
                    );
                    if velocity >= 600.0 {
                        assert!(index > start);
                    } else if velocity <= -600.0 {
                        assert!(index < start);
                    }
                    assert_eq!(behavior.current_animation_target(), None);
                }
            }
        }
    }

    #[test]
    fn flings_converge_over_mixed_extents_with_spacing() {
        const EXTENTS: [u32; 8] = [50, 120, 200, 80, 150, 60, 180, 100];
        let velocities = [-2500.0, -800.0, -120.0, 0.0, 120.0, 800.0, 2500.0];
        for anchor in [SnapPosition::Start, SnapPosition::Center, SnapPosition::End] {
            let behavior = SnapFlingBehavior::new(anchor);
            for offset in [1200.0, 1237.0, 1311.0, 1490.0, 1800.0] {
                for velocity in velocities {
                    let mut list = SnapList::new(EXTENTS.iter().copied().cycle().take(30), 300)
                        .with_spacing(16)
                        .with_padding(24, 40);
                    list.set_scroll_offset(offset);
                    let start = list.snapshot().current_item(&anchor);
                    assert!(start.is_some(), "{anchor:?} from {offset}: no current item");

                    let outcome = behavior.perform_fling_detailed(&mut list, velocity);
                    assert_ne!(outcome.end, FlingEnd::NoCurrentItem);
                    assert_ne!(outcome.end, FlingEnd::Boundary);
                    let index = outcome.target_index.unwrap();
                    assert!(
                        anchored(&list, index, &anchor),
                        "{anchor:?} from {offset} at {velocity}: {outcome:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn fling_released_in_a_gap_still_snaps() {
        let behavior = SnapFlingBehavior::new(SnapPosition::Start);
        // Item 1 spans 116..216 and its trailing gap ends at 232.
        let mut list = SnapList::uniform(20, 100, 300).with_spacing(16);
        list.set_scroll_offset(224.0);
        let outcome = behavior.perform_fling_detailed(&mut list, 0.0);
        assert_eq!(outcome.target_index, Some(2));
        assert_eq!(outcome.end, FlingEnd::SnappedBack);
        assert_eq!(list.item(2).unwrap().offset, 0);
    }

    #[test]
    fn custom_anchor_converges() {
        let anchor = |_: &crate::LayoutSnapshot, _: &ItemInfo| 40;
        let behavior = SnapFlingBehavior::new(anchor);
        let mut list = scrolled(1010.0);
        let outcome = behavior.perform_fling_detailed(&mut list, 1500.0);
        let index = outcome.target_index.unwrap();
        assert_eq!(list.item(index).unwrap().offset, 40);
    }

    #[test]
    fn huge_velocity_is_clamped_to_last_item() {
        let behavior = SnapFlingBehavior::new(SnapPosition::Start);
        let mut list = SnapList::uniform(5, 100, 200);
        let outcome = behavior.perform_fling_detailed(&mut list, 1e6);
        assert_eq!(outcome.target_index, Some(4));
        // The list cannot scroll item 4 onto the start anchor.
        assert_eq!(outcome.end, FlingEnd::Boundary);
        assert!(outcome.leftover_velocity > 0.0);
        assert_eq!(list.scroll_offset(), 300.0);
        assert_eq!(behavior.current_animation_target(), None);
    }

    #[test]
    fn anchored_item_needs_no_motion() {
        let behavior = SnapFlingBehavior::new(SnapPosition::Start);
        let mut host = plain(scrolled(200.0));
        let fling = behavior.begin_fling(&host, 0.0);
        assert!(fling.is_finished());
        assert_eq!(behavior.current_animation_target(), None);
        drop(fling);

        let outcome = behavior.perform_fling_detailed(&mut host, 0.0);
        assert_eq!(outcome.end, FlingEnd::Settled);
        assert_eq!(outcome.leftover_velocity, 0.0);
        assert_eq!(outcome.target_index, Some(2));
        assert_eq!(host.scrolls, 0);
    }

    #[test]
    fn slow_release_springs_to_next_item() {
        let behavior = SnapFlingBehavior::new(SnapPosition::Start);
        for velocity in [0.0, 0.3, -0.3] {
            let mut list = scrolled(260.0);
            let outcome = behavior.perform_fling_detailed(&mut list, velocity);
            assert_eq!(outcome.target_index, Some(3));
            assert_eq!(outcome.end, FlingEnd::SnappedBack);
            assert_eq!(list.item(3).unwrap().offset, 0);
        }
    }

    #[test]
    fn under_consumption_halts_the_decay() {
        let behavior = SnapFlingBehavior::new(SnapPosition::Start);
        let mut host = host(SnapList::uniform(50, 100, 300), |list: &mut SnapList, delta| {
            list.scroll_by(delta / 2.0)
        });
        let outcome = behavior.perform_fling_detailed(&mut host, 3000.0);
        assert_eq!(outcome.end, FlingEnd::Boundary);
        assert_eq!(host.scrolls, 1);
        // The simulated velocity after one frame is left over.
        assert!(outcome.leftover_velocity > 2700.0 && outcome.leftover_velocity < 3000.0);
        assert_eq!(behavior.current_animation_target(), None);
    }

    #[test]
    fn builder_rejects_invalid_settings() {
        let build = |frame: f32, tolerance: f32, min_velocity: f32| {
            SnapFlingBehavior::builder(SnapPosition::Start)
                .frame_interval(frame)
                .consumption_tolerance(tolerance)
                .min_fling_velocity(min_velocity)
                .build()
                .err()
        };
        assert_eq!(build(1.0 / 120.0, 0.0, 0.0), None);
        assert_eq!(build(0.0, 0.5, 0.5), Some(ConfigError::FrameInterval(0.0)));
        assert_eq!(
            build(f32::INFINITY, 0.5, 0.5),
            Some(ConfigError::FrameInterval(f32::INFINITY))
        );
        assert_eq!(
            build(0.01, -1.0, 0.5),
            Some(ConfigError::ConsumptionTolerance(-1.0))
        );
        assert!(matches!(
            build(0.01, 0.5, f32::NAN),
            Some(ConfigError::MinFlingVelocity(v)) if v.is_nan()
        ));
    }

    #[test]
    fn snap_index_adjusts_the_target() {
        let behavior = SnapFlingBehavior::builder(SnapPosition::Start)
            .snap_index(|_, start, target| target.min(start + 1))
            .build()
            .unwrap();
        let mut list = scrolled(1030.0);
        let outcome = behavior.perform_fling_detailed(&mut list, 2500.0);
        assert_eq!(outcome.target_index, Some(11));
        assert_eq!(list.item(11).unwrap().offset, 0);

        let behavior = SnapFlingBehavior::builder(SnapPosition::Start)
            .snap_index(|_, _, _| 1000)
            .build()
            .unwrap();
        let list = scrolled(1000.0);
        let fling = behavior.begin_fling(&list, 0.0);
        assert_eq!(fling.target_index(), Some(29));
        assert_eq!(behavior.current_animation_target(), Some(29));
    }

    #[test]
    fn max_fling_distance_caps_the_target() {
        let behavior = SnapFlingBehavior::builder(SnapPosition::Start)
            .max_fling_distance(|_| 150)
            .build()
            .unwrap();
        let mut list = scrolled(1000.0);
        let outcome = behavior.perform_fling_detailed(&mut list, 5000.0);
        assert_eq!(outcome.target_index, Some(11));
        assert_eq!(outcome.end, FlingEnd::SnappedBack);
        assert_eq!(list.item(11).unwrap().offset, 0);
    }

    #[test]
    fn layout_changes_mid_fling_are_picked_up() {
        let behavior = SnapFlingBehavior::new(SnapPosition::Start);
        let mut resized = false;
        let mut host = host(scrolled(1030.0), |list: &mut SnapList, delta| {
            if !resized {
                // Shrinking an item above the viewport shifts everything below it.
                list.set_extent(0, 50);
                resized = true;
            }
            list.scroll_by(delta)
        });
        let outcome = behavior.perform_fling_detailed(&mut host, 2500.0);
        let index = outcome.target_index.unwrap();
        assert_eq!(index, 15);
        assert_eq!(host.list.item(index).unwrap().offset, 0);
    }

    #[test]
    fn ticking_a_finished_fling_repeats_its_outcome() {
        let behavior = SnapFlingBehavior::new(SnapPosition::Start);
        let mut list = scrolled(260.0);
        let mut fling = behavior.begin_fling(&list, 0.0);
        let outcome = loop {
            if let FlingStatus::Finished(outcome) = fling.tick(&mut list, 1.0 / 90.0) {
                break outcome;
            }
        };
        let offset = list.scroll_offset();
        assert_eq!(fling.tick(&mut list, 1.0 / 90.0), FlingStatus::Finished(outcome));
        assert_eq!(fling.outcome(), Some(outcome));
        assert_eq!(list.scroll_offset(), offset);
    }
}
