// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reduced-motion gating.
//!
//! The platform preference is sampled once when a session starts and never
//! re-read. When it asks for reduced motion, every [`MotionEffect`] is refused
//! for the lifetime of the gate. Scroll reveals are not gated: they are the
//! page's content becoming visible, not decoration.

use crate::trace::{MotionSuppressedEvent, Tracer};

/// The user's motion preference, as reported by the platform.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MotionPreference {
    /// No preference expressed; all effects run.
    #[default]
    NoPreference,
    /// The user asked for reduced motion.
    Reduce,
}

impl MotionPreference {
    /// Builds a preference from a `prefers-reduced-motion: reduce` match.
    #[must_use]
    pub const fn from_reduce_query(matches: bool) -> Self {
        if matches { Self::Reduce } else { Self::NoPreference }
    }
}

/// Decorative motion that is suppressed under reduced motion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MotionEffect {
    /// Scroll-linked translation of floating elements.
    Parallax,
    /// Expanding ripple on hover.
    Ripple,
    /// Momentary scale-down on click.
    ClickScale,
}

/// Gate that decides whether a [`MotionEffect`] may run.
#[derive(Clone, Copy, Debug, Default)]
pub struct MotionGate {
    preference: MotionPreference,
    suppressed: u64,
}

impl MotionGate {
    /// Creates a gate for a preference sampled at session start.
    #[must_use]
    pub const fn new(preference: MotionPreference) -> Self {
        Self {
            preference,
            suppressed: 0,
        }
    }

    /// Returns the sampled preference.
    #[must_use]
    pub const fn preference(&self) -> MotionPreference {
        self.preference
    }

    /// Returns `true` if `effect` may run, counting and tracing refusals.
    pub fn allow(&mut self, effect: MotionEffect, tracer: &mut Tracer<'_>) -> bool {
        match self.preference {
            MotionPreference::NoPreference => true,
            MotionPreference::Reduce => {
                self.suppressed += 1;
                tracer.motion_suppressed(&MotionSuppressedEvent { effect });
                false
            }
        }
    }

    /// Number of effect requests refused so far.
    #[must_use]
    pub const fn suppressed(&self) -> u64 {
        self.suppressed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_preference_allows_everything() {
        let mut gate = MotionGate::new(MotionPreference::from_reduce_query(false));
        let mut tracer = Tracer::none();
        for effect in [MotionEffect::Parallax, MotionEffect::Ripple, MotionEffect::ClickScale] {
            assert!(gate.allow(effect, &mut tracer), "{effect:?} allowed");
        }
        assert_eq!(gate.suppressed(), 0, "nothing suppressed");
    }

    #[test]
    fn reduce_refuses_every_effect() {
        let mut gate = MotionGate::new(MotionPreference::from_reduce_query(true));
        let mut tracer = Tracer::none();
        for _ in 0..3 {
            assert!(!gate.allow(MotionEffect::Ripple, &mut tracer), "ripple refused");
        }
        assert!(!gate.allow(MotionEffect::Parallax, &mut tracer), "parallax refused");
        assert_eq!(gate.suppressed(), 4, "every request counted");
    }
}
