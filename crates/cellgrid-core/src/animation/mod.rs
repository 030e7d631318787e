#![forbid(unsafe_code)]

//! Visual feedback animations as plain data.
//!
//! An [`Animation`] describes a rotate, scale, or translate transition (or a
//! set of them played together). It owns no clock: hosts record when they
//! started one and call [`Animation::sample`] with the elapsed time on each
//! frame tick to obtain the [`Transform`] to draw with.
//!
//! Animations are purely observational. Nothing in the layout model reads
//! them back, so dropping or clearing one never changes logical state.
//!
//! # Invariants
//!
//! 1. `sample(Duration::ZERO)` of a leaf returns its `from` value.
//! 2. A finished `Once` animation samples to its `to` value when `fill_after`
//!    is set, and to the identity transform otherwise.
//! 3. `Infinite` animations never finish; with [`RepeatMode::Reverse`] odd
//!    cycles run backwards so the motion oscillates without jumps.
//!
//! # Failure Modes
//!
//! - Zero duration: treated as already complete (progress 1.0).

pub mod presets;

pub use presets::{
    LIFT_DURATION, LIFT_SCALE, SLIDE_DURATION, WIGGLE_DEGREES, WIGGLE_HALF_CYCLE, lift, slide,
    wiggle, wiggle_and_slide,
};

use std::f32::consts::PI;
use std::time::Duration;

use crate::geometry::Point;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Timing
// ---------------------------------------------------------------------------

/// Progress curve applied to linear time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Easing {
    Linear,
    /// Slow start and end, fast middle: `0.5 - 0.5 * cos(pi * t)`.
    #[default]
    AccelerateDecelerate,
}

impl Easing {
    /// Map linear progress in `[0, 1]` to eased progress in `[0, 1]`.
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::AccelerateDecelerate => 0.5 - 0.5 * (PI * t).cos(),
        }
    }
}

/// How many times an animation plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LoopCount {
    /// Play once (no looping).
    #[default]
    Once,
    /// Loop until cleared.
    Infinite,
}

/// What a looping animation does at the end of each cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RepeatMode {
    #[default]
    Restart,
    Reverse,
}

/// Duration and playback policy shared by every animation leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Timing {
    pub duration: Duration,
    pub easing: Easing,
    pub loop_count: LoopCount,
    pub repeat_mode: RepeatMode,
    /// Keep the final value once a `Once` animation completes.
    pub fill_after: bool,
}

impl Timing {
    /// Play once over `duration` with the default easing.
    #[must_use]
    pub const fn once(duration: Duration) -> Self {
        Self {
            duration,
            easing: Easing::AccelerateDecelerate,
            loop_count: LoopCount::Once,
            repeat_mode: RepeatMode::Restart,
            fill_after: false,
        }
    }

    /// Loop forever, reversing direction every `half_cycle`.
    #[must_use]
    pub const fn oscillate(half_cycle: Duration) -> Self {
        Self {
            duration: half_cycle,
            easing: Easing::AccelerateDecelerate,
            loop_count: LoopCount::Infinite,
            repeat_mode: RepeatMode::Reverse,
            fill_after: false,
        }
    }

    #[must_use]
    pub const fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    #[must_use]
    pub const fn fill_after(mut self, fill_after: bool) -> Self {
        self.fill_after = fill_after;
        self
    }

    /// Eased progress at `elapsed`, or `None` once the animation no longer
    /// affects the drawing.
    #[must_use]
    pub fn progress(&self, elapsed: Duration) -> Option<f32> {
        if self.duration.is_zero() {
            return match self.loop_count {
                LoopCount::Once if !self.fill_after => None,
                _ => Some(self.easing.apply(1.0)),
            };
        }

        let cycle_nanos = self.duration.as_nanos();
        let cycle = elapsed.as_nanos() / cycle_nanos;
        let within = elapsed.as_nanos() % cycle_nanos;

        let linear = match self.loop_count {
            LoopCount::Once => {
                if cycle >= 1 {
                    return self.fill_after.then(|| self.easing.apply(1.0));
                }
                within as f64 / cycle_nanos as f64
            }
            LoopCount::Infinite => {
                let frac = within as f64 / cycle_nanos as f64;
                if self.repeat_mode == RepeatMode::Reverse && cycle % 2 == 1 {
                    1.0 - frac
                } else {
                    frac
                }
            }
        };
        Some(self.easing.apply(linear as f32))
    }

    /// Whether the animation has run to completion at `elapsed`.
    #[must_use]
    pub fn is_finished(&self, elapsed: Duration) -> bool {
        match self.loop_count {
            LoopCount::Once => elapsed >= self.duration,
            LoopCount::Infinite => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Animation
// ---------------------------------------------------------------------------

/// Where a rotation or scale is anchored, in element-local pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Pivot {
    /// The element's own center, resolved by the host at draw time.
    #[default]
    Center,
    /// A fixed point relative to the element's top-left corner.
    At(Point),
}

/// A single transition or a set played in parallel.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Animation {
    Rotate {
        from_degrees: f32,
        to_degrees: f32,
        pivot: Pivot,
        timing: Timing,
    },
    Scale {
        from: f32,
        to: f32,
        pivot: Pivot,
        timing: Timing,
    },
    /// Offsets are relative to the element's laid-out frame.
    Translate {
        from: Point,
        to: Point,
        timing: Timing,
    },
    Set {
        children: Vec<Animation>,
    },
}

/// Drawing transform produced by sampling an animation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Transform {
    pub translate_x: f32,
    pub translate_y: f32,
    pub rotation_degrees: f32,
    pub rotation_pivot: Pivot,
    pub scale: f32,
    pub scale_pivot: Pivot,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translate_x: 0.0,
        translate_y: 0.0,
        rotation_degrees: 0.0,
        rotation_pivot: Pivot::Center,
        scale: 1.0,
        scale_pivot: Pivot::Center,
    };

    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.translate_x == 0.0
            && self.translate_y == 0.0
            && self.rotation_degrees == 0.0
            && self.scale == 1.0
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

impl Animation {
    /// Play `children` together.
    #[must_use]
    pub fn set(children: impl IntoIterator<Item = Animation>) -> Self {
        Self::Set {
            children: children.into_iter().collect(),
        }
    }

    /// Sample the transform at `elapsed` since the animation started.
    ///
    /// Sets compose their children: translations and rotations add, scales
    /// multiply.
    #[must_use]
    pub fn sample(&self, elapsed: Duration) -> Transform {
        let mut out = Transform::IDENTITY;
        self.accumulate(elapsed, &mut out);
        out
    }

    fn accumulate(&self, elapsed: Duration, out: &mut Transform) {
        match self {
            Self::Rotate {
                from_degrees,
                to_degrees,
                pivot,
                timing,
            } => {
                if let Some(t) = timing.progress(elapsed) {
                    out.rotation_degrees += lerp(*from_degrees, *to_degrees, t);
                    out.rotation_pivot = *pivot;
                }
            }
            Self::Scale {
                from,
                to,
                pivot,
                timing,
            } => {
                if let Some(t) = timing.progress(elapsed) {
                    out.scale *= lerp(*from, *to, t);
                    out.scale_pivot = *pivot;
                }
            }
            Self::Translate { from, to, timing } => {
                if let Some(t) = timing.progress(elapsed) {
                    out.translate_x += lerp(from.x as f32, to.x as f32, t);
                    out.translate_y += lerp(from.y as f32, to.y as f32, t);
                }
            }
            Self::Set { children } => {
                for child in children {
                    child.accumulate(elapsed, out);
                }
            }
        }
    }

    /// Whether every part of the animation has completed at `elapsed`.
    ///
    /// An empty set is complete immediately.
    #[must_use]
    pub fn is_finished(&self, elapsed: Duration) -> bool {
        match self {
            Self::Rotate { timing, .. }
            | Self::Scale { timing, .. }
            | Self::Translate { timing, .. } => timing.is_finished(elapsed),
            Self::Set { children } => children.iter().all(|c| c.is_finished(elapsed)),
        }
    }

    /// Total running time, or `None` if any part loops forever.
    #[must_use]
    pub fn total_duration(&self) -> Option<Duration> {
        match self {
            Self::Rotate { timing, .. }
            | Self::Scale { timing, .. }
            | Self::Translate { timing, .. } => match timing.loop_count {
                LoopCount::Once => Some(timing.duration),
                LoopCount::Infinite => None,
            },
            Self::Set { children } => children
                .iter()
                .map(Animation::total_duration)
                .try_fold(Duration::ZERO, |acc, d| d.map(|d| acc.max(d))),
        }
    }
}
