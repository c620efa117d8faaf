// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Decay and spring curves used to animate a fling.
//!
//! Curves are plain state-transition functions: given a [`CurveState`] and a
//! time step they return the next state. They hold no clock of their own, so
//! a host can drive them from any frame scheduler.

#[cfg(not(feature = "std"))]
#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

/// Instantaneous value and velocity of a simulated 1D motion.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct CurveState {
    /// Current value, in pixels.
    pub value: f32,
    /// Current velocity, in pixels per second.
    pub velocity: f32,
}

impl CurveState {
    /// Creates a new state.
    #[must_use]
    pub const fn new(value: f32, velocity: f32) -> Self {
        Self { value, velocity }
    }
}

/// A decelerating motion that runs until its velocity decays to rest.
pub trait DecayCurve {
    /// Value at which a motion starting at `value` with `velocity` comes to rest.
    fn target_value(&self, value: f32, velocity: f32) -> f32;

    /// Advances `state` by `dt` seconds.
    fn step(&self, state: CurveState, dt: f32) -> CurveState;

    /// Returns `true` once the motion has stopped.
    fn is_at_rest(&self, state: &CurveState) -> bool;
}

/// A motion pulled towards a fixed target.
pub trait SpringCurve {
    /// Advances `state` by `dt` seconds towards `target`.
    fn step(&self, state: CurveState, target: f32, dt: f32) -> CurveState;

    /// Returns `true` once the motion has settled on `target`.
    fn is_at_rest(&self, state: &CurveState, target: f32) -> bool;
}

const EXPONENTIAL_DECAY_FRICTION: f32 = -4.2;

/// Exponential velocity decay: `v(t) = v0 * e^(friction * t)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExponentialDecay {
    friction: f32,
    velocity_threshold: f32,
}

impl ExponentialDecay {
    /// Creates a decay curve.
    ///
    /// Larger `friction_multiplier` values stop sooner. The motion is at rest
    /// once its speed drops to `velocity_threshold` pixels per second.
    #[must_use]
    pub fn new(friction_multiplier: f32, velocity_threshold: f32) -> Self {
        debug_assert!(
            friction_multiplier.is_finite() && velocity_threshold.is_finite(),
            "decay parameters must be finite"
        );
        Self {
            friction: EXPONENTIAL_DECAY_FRICTION * friction_multiplier.max(0.0001),
            velocity_threshold: velocity_threshold.abs().max(f32::EPSILON),
        }
    }
}

impl Default for ExponentialDecay {
    fn default() -> Self {
        Self::new(1.0, 0.1)
    }
}

impl DecayCurve for ExponentialDecay {
    fn target_value(&self, value: f32, velocity: f32) -> f32 {
        let speed = velocity.abs();
        if speed <= self.velocity_threshold {
            return value;
        }
        // Distance travelled until the speed reaches the threshold.
        value - velocity / self.friction * (1.0 - self.velocity_threshold / speed)
    }

    fn step(&self, state: CurveState, dt: f32) -> CurveState {
        let decay = (self.friction * dt).exp();
        CurveState {
            value: state.value + state.velocity / self.friction * (decay - 1.0),
            velocity: state.velocity * decay,
        }
    }

    fn is_at_rest(&self, state: &CurveState) -> bool {
        state.velocity.abs() <= self.velocity_threshold
    }
}

/// A damped harmonic oscillator, solved analytically per step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    damping_ratio: f32,
    stiffness: f32,
    displacement_threshold: f32,
    velocity_threshold: f32,
}

impl Spring {
    /// No oscillation; the fastest approach that never overshoots.
    pub const DAMPING_RATIO_NO_BOUNCY: f32 = 1.0;
    /// A fairly soft spring.
    pub const STIFFNESS_MEDIUM_LOW: f32 = 400.0;

    /// Creates a spring.
    ///
    /// `damping_ratio` below `1.0` oscillates, above `1.0` approaches slowly.
    #[must_use]
    pub fn new(damping_ratio: f32, stiffness: f32) -> Self {
        debug_assert!(
            damping_ratio >= 0.0 && stiffness > 0.0,
            "spring needs a non-negative damping ratio and positive stiffness"
        );
        Self {
            damping_ratio: damping_ratio.max(0.0),
            stiffness: stiffness.max(f32::EPSILON),
            displacement_threshold: 0.01,
            velocity_threshold: 0.5,
        }
    }

    /// Sets how close to the target, in pixels and pixels per second, the
    /// spring must be to count as settled.
    #[must_use]
    pub fn with_thresholds(mut self, displacement: f32, velocity: f32) -> Self {
        self.displacement_threshold = displacement.abs();
        self.velocity_threshold = velocity.abs();
        self
    }
}

impl Default for Spring {
    fn default() -> Self {
        Self::new(Self::DAMPING_RATIO_NO_BOUNCY, Self::STIFFNESS_MEDIUM_LOW)
    }
}

impl SpringCurve for Spring {
    fn step(&self, state: CurveState, target: f32, dt: f32) -> CurveState {
        let x0 = state.value - target;
        let v0 = state.velocity;
        let omega = self.stiffness.sqrt();
        let zeta = self.damping_ratio;

        let (displacement, velocity) = if zeta > 1.0 {
            // Overdamped.
            let root = omega * (zeta * zeta - 1.0).sqrt();
            let gamma_plus = -zeta * omega + root;
            let gamma_minus = -zeta * omega - root;
            let coeff_b = (gamma_minus * x0 - v0) / (gamma_minus - gamma_plus);
            let coeff_a = x0 - coeff_b;
            let exp_minus = (gamma_minus * dt).exp();
            let exp_plus = (gamma_plus * dt).exp();
            (
                coeff_a * exp_minus + coeff_b * exp_plus,
                coeff_a * gamma_minus * exp_minus + coeff_b * gamma_plus * exp_plus,
            )
        } else if zeta < 1.0 {
            // Underdamped.
            let damped = omega * (1.0 - zeta * zeta).sqrt();
            let cos_coeff = x0;
            let sin_coeff = (zeta * omega * x0 + v0) / damped;
            let envelope = (-zeta * omega * dt).exp();
            let (sin, cos) = ((damped * dt).sin(), (damped * dt).cos());
            let displacement = envelope * (cos_coeff * cos + sin_coeff * sin);
            (
                displacement,
                displacement * -zeta * omega
                    + envelope * damped * (sin_coeff * cos - cos_coeff * sin),
            )
        } else {
            // Critically damped.
            let coeff_b = v0 + omega * x0;
            let envelope = (-omega * dt).exp();
            let displacement = (x0 + coeff_b * dt) * envelope;
            (displacement, coeff_b * envelope - omega * displacement)
        };

        CurveState {
            value: displacement + target,
            velocity,
        }
    }

    fn is_at_rest(&self, state: &CurveState, target: f32) -> bool {
        (state.value - target).abs() < self.displacement_threshold
            && state.velocity.abs() < self.velocity_threshold
    }
}
