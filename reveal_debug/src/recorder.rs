// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory event recording.
//!
//! [`RecorderSink`] implements [`RevealSink`] and keeps every event in arrival
//! order as a [`RecordedEvent`]. Events are small `Copy` structs, so recording
//! a whole page session is cheap.

use reveal_core::trace::{
    KindFallbackEvent, MissingTargetEvent, MotionSuppressedEvent, RevealAppliedEvent,
    RevealSink, SessionDisposedEvent, StaggerScheduledEvent, TargetEnteredEvent,
    TargetObservedEvent,
};

/// A single recorded event.
#[derive(Clone, Copy, Debug)]
pub enum RecordedEvent {
    /// A node started being watched.
    TargetObserved(TargetObservedEvent),
    /// An animation tag fell back to a plain reveal.
    KindFallback(KindFallbackEvent),
    /// An entry notification arrived for a known target.
    TargetEntered(TargetEnteredEvent),
    /// A staggered target scheduled its children.
    StaggerScheduled(StaggerScheduledEvent),
    /// A reveal was applied.
    RevealApplied(RevealAppliedEvent),
    /// A target's node was missing.
    MissingTarget(MissingTargetEvent),
    /// Reduced motion suppressed an effect.
    MotionSuppressed(MotionSuppressedEvent),
    /// The session was disposed.
    SessionDisposed(SessionDisposedEvent),
}

/// A [`RevealSink`] that keeps every event in memory.
#[derive(Debug, Default)]
pub struct RecorderSink {
    events: Vec<RecordedEvent>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded events in arrival order.
    #[must_use]
    pub fn events(&self) -> &[RecordedEvent] {
        &self.events
    }

    /// Consumes the recorder and returns the recorded events.
    #[must_use]
    pub fn into_events(self) -> Vec<RecordedEvent> {
        self.events
    }

    /// Iterates over the applied reveals only.
    pub fn reveals(&self) -> impl Iterator<Item = &RevealAppliedEvent> {
        self.events.iter().filter_map(|e| match e {
            RecordedEvent::RevealApplied(r) => Some(r),
            _ => None,
        })
    }
}

impl RevealSink for RecorderSink {
    fn on_target_observed(&mut self, e: &TargetObservedEvent) {
        self.events.push(RecordedEvent::TargetObserved(*e));
    }

    fn on_kind_fallback(&mut self, e: &KindFallbackEvent) {
        self.events.push(RecordedEvent::KindFallback(*e));
    }

    fn on_target_entered(&mut self, e: &TargetEnteredEvent) {
        self.events.push(RecordedEvent::TargetEntered(*e));
    }

    fn on_stagger_scheduled(&mut self, e: &StaggerScheduledEvent) {
        self.events.push(RecordedEvent::StaggerScheduled(*e));
    }

    fn on_reveal_applied(&mut self, e: &RevealAppliedEvent) {
        self.events.push(RecordedEvent::RevealApplied(*e));
    }

    fn on_missing_target(&mut self, e: &MissingTargetEvent) {
        self.events.push(RecordedEvent::MissingTarget(*e));
    }

    fn on_motion_suppressed(&mut self, e: &MotionSuppressedEvent) {
        self.events.push(RecordedEvent::MotionSuppressed(*e));
    }

    fn on_session_disposed(&mut self, e: &SessionDisposedEvent) {
        self.events.push(RecordedEvent::SessionDisposed(*e));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reveal_core::backend::{IntersectionEntry, RevealPresenter};
    use reveal_core::error::RevealError;
    use reveal_core::kind::Reveal;
    use reveal_core::node::NodeId;
    use reveal_core::session::{ObservationSession, SessionConfig};
    use reveal_core::time::HostTime;
    use reveal_core::trace::Tracer;

    struct FlatPresenter;

    impl RevealPresenter for FlatPresenter {
        fn apply(&mut self, node: NodeId, _reveal: Reveal) -> Result<(), RevealError> {
            if node == NodeId(99) {
                Err(RevealError::MissingTarget(node))
            } else {
                Ok(())
            }
        }

        fn children(&mut self, _node: NodeId) -> Result<Vec<NodeId>, RevealError> {
            Ok(vec![NodeId(2), NodeId(3)])
        }
    }

    #[test]
    fn records_a_session_in_order() {
        let mut rec = RecorderSink::new();
        let mut presenter = FlatPresenter;
        {
            let mut tracer = Tracer::new(&mut rec);
            let mut session = ObservationSession::new(SessionConfig::page());
            session.observe_tagged(NodeId(1), "stagger", None, &mut tracer);
            session.observe_tagged(NodeId(99), "zoom", Some("10"), &mut tracer);
            let entries = [NodeId(1), NodeId(99)].map(|node| IntersectionEntry {
                node,
                is_entered: true,
            });
            session.on_intersections(HostTime(0), &entries, &mut presenter, &mut tracer);
            session.advance(HostTime::from_millis(500), &mut presenter, &mut tracer);
            session.dispose(&mut presenter, &mut tracer);
        }

        let reveals: Vec<_> = rec.reveals().map(|r| (r.node, r.child_index)).collect();
        assert_eq!(
            reveals,
            vec![(NodeId(2), Some(0)), (NodeId(3), Some(1))],
            "children revealed in order"
        );
        assert!(
            rec.events()
                .iter()
                .any(|e| matches!(e, RecordedEvent::KindFallback(k) if k.node == NodeId(99))),
            "unknown tag reported"
        );
        assert!(
            rec.events()
                .iter()
                .any(|e| matches!(e, RecordedEvent::MissingTarget(m) if m.node == NodeId(99))),
            "missing node reported"
        );
        assert!(
            matches!(
                rec.events().last(),
                Some(RecordedEvent::SessionDisposed(d)) if d.cancelled == 0
            ),
            "dispose is last and nothing was pending"
        );
    }
}
