// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the reveal engine.
//!
//! This module provides a [`RevealSink`] trait with per-event methods that the
//! session calls at each step of a target's life. All method bodies default to
//! no-ops, so implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn RevealSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! Recoverable failures (missing nodes, unknown animation tags) are reported
//! here and nowhere else.

use crate::kind::{AnimationKind, Reveal};
use crate::motion::MotionEffect;
use crate::node::{NodeId, TargetId};
use crate::time::{Duration, HostTime};

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when a node starts being watched.
#[derive(Clone, Copy, Debug)]
pub struct TargetObservedEvent {
    /// Handle of the new target.
    pub target: TargetId,
    /// Node being watched.
    pub node: NodeId,
    /// Configured animation.
    pub kind: AnimationKind,
    /// Configured delay before the reveal.
    pub delay: Duration,
}

/// Emitted when an animation tag was not recognized.
#[derive(Clone, Copy, Debug)]
pub struct KindFallbackEvent {
    /// Node whose tag fell back to a plain reveal.
    pub node: NodeId,
}

/// Emitted for each entry notification about a watched or revealed target.
#[derive(Clone, Copy, Debug)]
pub struct TargetEnteredEvent {
    /// Target that satisfied the entry condition.
    pub target: TargetId,
    /// Its node.
    pub node: NodeId,
    /// Host time of the notification.
    pub now: HostTime,
    /// `false` when the target had already triggered and the notification
    /// was ignored.
    pub first: bool,
}

/// Emitted when a staggered target schedules its children.
#[derive(Clone, Copy, Debug)]
pub struct StaggerScheduledEvent {
    /// Parent target.
    pub target: TargetId,
    /// Number of direct children scheduled.
    pub children: u32,
    /// Trigger time of the parent, which is when the first child reveals.
    pub start: HostTime,
}

/// Emitted when a reveal is applied to a node.
#[derive(Clone, Copy, Debug)]
pub struct RevealAppliedEvent {
    /// Target the reveal belongs to.
    pub target: TargetId,
    /// Node that received the reveal (a child for staggered targets).
    pub node: NodeId,
    /// Terminal style applied.
    pub reveal: Reveal,
    /// Index among the parent's children, for staggered reveals.
    pub child_index: Option<u32>,
    /// Deadline the reveal was scheduled for.
    pub scheduled: HostTime,
    /// Host time it was actually applied.
    pub applied: HostTime,
}

/// Emitted when a node referenced by a target no longer exists.
#[derive(Clone, Copy, Debug)]
pub struct MissingTargetEvent {
    /// Target whose node is gone.
    pub target: TargetId,
    /// The missing node.
    pub node: NodeId,
    /// Host time the miss was noticed.
    pub now: HostTime,
}

/// Emitted when reduced motion suppresses an effect.
#[derive(Clone, Copy, Debug)]
pub struct MotionSuppressedEvent {
    /// Effect that did not run.
    pub effect: MotionEffect,
}

/// Emitted once when a session is disposed.
#[derive(Clone, Copy, Debug)]
pub struct SessionDisposedEvent {
    /// Targets that were still being watched.
    pub watched: u32,
    /// Pending deferred reveals that were cancelled.
    pub cancelled: u32,
}

// ---------------------------------------------------------------------------
// RevealSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from an observation session.
///
/// All methods have default no-op implementations.
pub trait RevealSink {
    /// Called when a node starts being watched.
    fn on_target_observed(&mut self, e: &TargetObservedEvent) {
        _ = e;
    }

    /// Called when an animation tag falls back to a plain reveal.
    fn on_kind_fallback(&mut self, e: &KindFallbackEvent) {
        _ = e;
    }

    /// Called for each entry notification about a known target.
    fn on_target_entered(&mut self, e: &TargetEnteredEvent) {
        _ = e;
    }

    /// Called when a staggered target schedules its children.
    fn on_stagger_scheduled(&mut self, e: &StaggerScheduledEvent) {
        _ = e;
    }

    /// Called when a reveal is applied.
    fn on_reveal_applied(&mut self, e: &RevealAppliedEvent) {
        _ = e;
    }

    /// Called when a target's node is missing.
    fn on_missing_target(&mut self, e: &MissingTargetEvent) {
        _ = e;
    }

    /// Called when reduced motion suppresses an effect.
    fn on_motion_suppressed(&mut self, e: &MotionSuppressedEvent) {
        _ = e;
    }

    /// Called when the session is disposed.
    fn on_session_disposed(&mut self, e: &SessionDisposedEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`RevealSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl RevealSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`RevealSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn RevealSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn RevealSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

/// Generates a `Tracer` method that forwards one event type.
macro_rules! forward {
    ($(#[$doc:meta])* $name:ident, $event:ty, $hook:ident) => {
        $(#[$doc])*
        #[inline]
        pub fn $name(&mut self, e: &$event) {
            #[cfg(feature = "trace")]
            if let Some(s) = &mut self.sink {
                s.$hook(e);
            }
            #[cfg(not(feature = "trace"))]
            {
                _ = e;
            }
        }
    };
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn RevealSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    forward!(
        /// Emits a [`TargetObservedEvent`].
        target_observed, TargetObservedEvent, on_target_observed
    );
    forward!(
        /// Emits a [`KindFallbackEvent`].
        kind_fallback, KindFallbackEvent, on_kind_fallback
    );
    forward!(
        /// Emits a [`TargetEnteredEvent`].
        target_entered, TargetEnteredEvent, on_target_entered
    );
    forward!(
        /// Emits a [`StaggerScheduledEvent`].
        stagger_scheduled, StaggerScheduledEvent, on_stagger_scheduled
    );
    forward!(
        /// Emits a [`RevealAppliedEvent`].
        reveal_applied, RevealAppliedEvent, on_reveal_applied
    );
    forward!(
        /// Emits a [`MissingTargetEvent`].
        missing_target, MissingTargetEvent, on_missing_target
    );
    forward!(
        /// Emits a [`MotionSuppressedEvent`].
        motion_suppressed, MotionSuppressedEvent, on_motion_suppressed
    );
    forward!(
        /// Emits a [`SessionDisposedEvent`].
        session_disposed, SessionDisposedEvent, on_session_disposed
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_kind_fallback(&KindFallbackEvent { node: NodeId(1) });
        sink.on_session_disposed(&SessionDisposedEvent {
            watched: 0,
            cancelled: 0,
        });
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.motion_suppressed(&MotionSuppressedEvent {
            effect: MotionEffect::Parallax,
        });
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::vec::Vec;

        struct RecordingSink {
            nodes: Vec<NodeId>,
        }
        impl RevealSink for RecordingSink {
            fn on_kind_fallback(&mut self, e: &KindFallbackEvent) {
                self.nodes.push(e.node);
            }
        }

        let mut sink = RecordingSink { nodes: Vec::new() };
        let mut tracer = Tracer::new(&mut sink);
        tracer.kind_fallback(&KindFallbackEvent { node: NodeId(42) });
        drop(tracer);
        assert_eq!(sink.nodes, &[NodeId(42)], "one event forwarded");
    }
}
