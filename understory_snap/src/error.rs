// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported while configuring a fling behavior.

/// A [`SnapFlingBuilder`](crate::SnapFlingBuilder) setting was out of range.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// The frame interval must be finite and strictly positive.
    #[error("frame interval must be finite and positive, got {0}s")]
    FrameInterval(f32),
    /// The consumption tolerance must be finite and non-negative.
    #[error("consumption tolerance must be finite and non-negative, got {0}px")]
    ConsumptionTolerance(f32),
    /// The minimum fling velocity must be finite and non-negative.
    #[error("minimum fling velocity must be finite and non-negative, got {0}px/s")]
    MinFlingVelocity(f32),
}
