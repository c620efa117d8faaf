// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_snap --heading-base-level=0

//! Understory Snap: snapping fling behavior for 1D item lists.
//!
//! When a scrollable list of discrete items is released with some velocity,
//! this crate decides where it comes to rest so that an item always ends up
//! aligned with an anchor (start, center, end, or a custom offset) instead of
//! at an arbitrary scroll position.
//!
//! The core concepts are:
//!
//! - [`ScrollHost`]: the interface a host list implements. It reports the
//!   visible items and accepts scroll deltas, telling the engine how much of
//!   each delta it actually consumed.
//! - [`LayoutSnapshot`] and [`ItemInfo`]: an immutable view of the visible
//!   geometry, re-read after every scroll.
//! - [`SnapAnchor`]: where an item should rest. [`SnapPosition`] provides the
//!   start, center, and end policies; any pure closure works as a custom one.
//! - [`decide_fling_plan`]: chooses between a long [decay](DecayCurve) and a
//!   short [spring](SpringCurve) trajectory and selects the target index.
//! - [`SnapFlingBehavior`]: drives the chosen trajectory tick by tick, stops
//!   early when the host under-consumes a delta, and snaps back exactly onto
//!   the target's anchor once it has been passed.
//!
//! This crate deliberately does **not** know about widgets, input handling,
//! or frame scheduling. Host frameworks are responsible for:
//!
//! - Measuring the release velocity of a drag.
//! - Reporting geometry and applying scroll deltas through [`ScrollHost`].
//! - Either calling [`SnapFlingBehavior::perform_fling`], which simulates all
//!   ticks at a fixed interval, or driving a [`Fling`] from their own frame
//!   clock via [`Fling::tick`].
//!
//! ## Minimal example
//!
//! Twenty 100px items in a 300px viewport, snapping to the start:
//!
//! ```rust
//! use understory_snap::{ScrollHost, SnapFlingBehavior, SnapList, SnapPosition};
//!
//! let mut list = SnapList::uniform(20, 100, 300);
//! list.set_scroll_offset(130.0);
//!
//! let behavior = SnapFlingBehavior::new(SnapPosition::Start);
//! behavior.perform_fling(&mut list, 2500.0);
//!
//! // The list came to rest with an item exactly on the anchor.
//! let current = list.snapshot().current_item(&SnapPosition::Start).unwrap();
//! assert_eq!(current.offset, 0);
//! assert!(current.index > 1);
//! assert_eq!(behavior.current_animation_target(), None);
//! ```
//!
//! ## Driving ticks from a host clock
//!
//! ```rust
//! use understory_snap::{FlingStatus, SnapFlingBehavior, SnapList, SnapPosition};
//!
//! let mut list = SnapList::uniform(20, 100, 300);
//! list.set_scroll_offset(70.0);
//!
//! let behavior = SnapFlingBehavior::new(SnapPosition::Start);
//! let mut fling = behavior.begin_fling(&list, 0.0);
//! // Item 0 sits at -70, more than half an item behind its anchor.
//! assert_eq!(behavior.current_animation_target(), Some(1));
//!
//! while let FlingStatus::Running = fling.tick(&mut list, 1.0 / 120.0) {}
//! assert_eq!(list.item(1).unwrap().offset, 0);
//! assert_eq!(behavior.current_animation_target(), None);
//! ```
//!
//! All geometry lives in a 1D pixel space along the scroll axis. Positive
//! velocities and deltas move towards higher indices.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod anchor;
mod behavior;
mod curve;
mod error;
mod host;
mod layout;
mod list;
mod plan;
mod target;
mod trajectory;

pub use anchor::{SnapAnchor, SnapPosition};
pub use behavior::{
    Fling, FlingEnd, FlingOutcome, FlingStatus, MaxFlingDistanceFn, SnapConfig,
    SnapFlingBehavior, SnapFlingBuilder, SnapIndexFn,
};
pub use curve::{CurveState, DecayCurve, ExponentialDecay, Spring, SpringCurve};
pub use error::ConfigError;
pub use host::ScrollHost;
pub use layout::{ItemInfo, LayoutSnapshot};
pub use list::SnapList;
pub use plan::{FlingLimits, FlingMode, FlingPlan, can_fling_past_current_item, decide_fling_plan};
pub use target::AnimationTarget;
pub use trajectory::calculate_snap_back;
