// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Observation sessions.
//!
//! An [`ObservationSession`] owns everything the reveal engine knows about a
//! page: the watched targets, their one-shot trigger state, the pending
//! deferred reveals, and the reduced-motion gate sampled when it was created.
//!
//! # Target lifecycle
//!
//! ```text
//!   observe() ──► watched ──entry──► triggered ──delay──► revealed
//!                    │                   │
//!                    └── unobserve() ────┴──► (slot freed, timers cancelled)
//! ```
//!
//! A target triggers at most once. The trigger happens on the first entry
//! notification: the target is marked, the host is told to stop reporting it,
//! and its reveal is queued for `now + delay`. Later notifications about the
//! same node, whether spurious or from re-entering the viewport, are traced
//! and ignored.
//!
//! Staggered targets resolve their children when the delay elapses (the
//! parent's trigger time) and queue child *i* for `trigger + i * stagger_step`.
//!
//! # Disposal
//!
//! [`dispose`](ObservationSession::dispose) cancels every pending reveal and
//! releases every watch. A disposed session accepts calls but never again
//! produces a presenter mutation.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use kurbo::Rect;

use crate::backend::{IntersectionEntry, RevealPresenter};
use crate::entry::EntryConfig;
use crate::error::RevealError;
use crate::kind::{AnimationKind, Reveal, parse_delay};
use crate::motion::{MotionGate, MotionPreference};
use crate::node::{NodeId, TargetId};
use crate::time::{Duration, HostTime};
use crate::timer::TimerQueue;
use crate::trace::{
    KindFallbackEvent, MissingTargetEvent, RevealAppliedEvent, SessionDisposedEvent,
    StaggerScheduledEvent, TargetEnteredEvent, TargetObservedEvent, Tracer,
};

/// Configuration for an [`ObservationSession`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionConfig {
    /// Entry condition used by [`ObservationSession::on_geometry`] and passed
    /// to native observers by backends.
    pub entry: EntryConfig,
    /// Offset between consecutive child reveals of a staggered target.
    pub stagger_step: Duration,
    /// Motion preference sampled at session start.
    pub motion: MotionPreference,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::page()
    }
}

impl SessionConfig {
    /// Defaults used by the portfolio page: 10% threshold, 50px bottom
    /// margin, 100ms stagger, no motion preference.
    #[must_use]
    pub const fn page() -> Self {
        Self {
            entry: EntryConfig::page(),
            stagger_step: Duration::from_millis(100),
            motion: MotionPreference::NoPreference,
        }
    }

    /// Returns this configuration with the given motion preference.
    #[must_use]
    pub const fn with_motion(mut self, motion: MotionPreference) -> Self {
        self.motion = motion;
        self
    }
}

/// The watched state of one node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RevealTarget {
    node: NodeId,
    kind: AnimationKind,
    delay: Duration,
    triggered_at: Option<HostTime>,
}

impl RevealTarget {
    /// The node this target reveals.
    #[must_use]
    pub const fn node(&self) -> NodeId {
        self.node
    }

    /// The configured animation.
    #[must_use]
    pub const fn kind(&self) -> AnimationKind {
        self.kind
    }

    /// The configured delay between trigger and reveal.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Whether the target has triggered. Never reset once `true`.
    #[must_use]
    pub const fn triggered(&self) -> bool {
        self.triggered_at.is_some()
    }

    /// Host time of the entry that triggered the target.
    #[must_use]
    pub const fn triggered_at(&self) -> Option<HostTime> {
        self.triggered_at
    }
}

/// Key of a pending deferred reveal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum TimerKey {
    /// The target's own delay.
    Target(TargetId),
    /// One child of a staggered target.
    Child { target: TargetId, index: u32 },
}

impl TimerKey {
    const fn target(self) -> TargetId {
        match self {
            Self::Target(id) | Self::Child { target: id, .. } => id,
        }
    }
}

#[derive(Clone, Debug)]
struct Slot {
    generation: u32,
    state: Option<TargetState>,
}

#[derive(Clone, Debug)]
struct TargetState {
    target: RevealTarget,
    /// Direct children, resolved when a staggered target's delay elapses.
    children: Vec<NodeId>,
}

/// Watched targets, pending reveals, and the motion gate of one page.
#[derive(Debug)]
pub struct ObservationSession {
    config: SessionConfig,
    motion: MotionGate,
    slots: Vec<Slot>,
    free_list: Vec<u32>,
    /// Live targets by node, whether still watched or already triggered.
    by_node: BTreeMap<NodeId, TargetId>,
    timers: TimerQueue<TimerKey>,
    disposed: bool,
}

impl ObservationSession {
    /// Creates a session, sampling the motion preference from `config`.
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        Self {
            motion: MotionGate::new(config.motion),
            config,
            slots: Vec::new(),
            free_list: Vec::new(),
            by_node: BTreeMap::new(),
            timers: TimerQueue::new(),
            disposed: false,
        }
    }

    /// Returns the session configuration.
    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Returns the reduced-motion gate for decorative effects.
    pub fn motion(&mut self) -> &mut MotionGate {
        &mut self.motion
    }

    /// Returns `true` once [`dispose`](Self::dispose) has run.
    #[must_use]
    pub const fn is_disposed(&self) -> bool {
        self.disposed
    }

    // -- Registration --

    /// Starts watching `node`.
    ///
    /// Observing a node that already has a live target returns the existing
    /// handle without registering it twice. Returns `None` on a disposed
    /// session.
    pub fn observe(
        &mut self,
        node: NodeId,
        kind: AnimationKind,
        delay: Duration,
        tracer: &mut Tracer<'_>,
    ) -> Option<TargetId> {
        if self.disposed {
            return None;
        }
        if let Some(&existing) = self.by_node.get(&node) {
            return Some(existing);
        }

        let state = TargetState {
            target: RevealTarget {
                node,
                kind,
                delay,
                triggered_at: None,
            },
            children: Vec::new(),
        };
        let id = if let Some(idx) = self.free_list.pop() {
            let slot = &mut self.slots[idx as usize];
            slot.generation += 1;
            slot.state = Some(state);
            TargetId {
                idx,
                generation: slot.generation,
            }
        } else {
            let idx = u32::try_from(self.slots.len()).ok()?;
            self.slots.push(Slot {
                generation: 0,
                state: Some(state),
            });
            TargetId { idx, generation: 0 }
        };
        self.by_node.insert(node, id);
        tracer.target_observed(&TargetObservedEvent {
            target: id,
            node,
            kind,
            delay,
        });
        Some(id)
    }

    /// Starts watching `node` from raw `data-animate` / `data-delay` values.
    ///
    /// Unrecognized tags fall back to [`AnimationKind::PlainReveal`] and are
    /// reported to the tracer.
    pub fn observe_tagged(
        &mut self,
        node: NodeId,
        tag: &str,
        delay: Option<&str>,
        tracer: &mut Tracer<'_>,
    ) -> Option<TargetId> {
        let (kind, fell_back) = AnimationKind::from_tag_or_plain(tag);
        if fell_back {
            tracer.kind_fallback(&KindFallbackEvent { node });
        }
        self.observe(node, kind, parse_delay(delay), tracer)
    }

    /// Stops watching a target and cancels its pending reveals.
    ///
    /// # Errors
    ///
    /// Returns [`RevealError::StaleTarget`] if `id` no longer names a live
    /// target.
    pub fn unobserve(
        &mut self,
        id: TargetId,
        presenter: &mut dyn RevealPresenter,
    ) -> Result<(), RevealError> {
        let state = self
            .slot_mut(id)
            .and_then(|slot| slot.state.take())
            .ok_or(RevealError::StaleTarget(id))?;
        self.free_list.push(id.idx);
        self.by_node.remove(&state.target.node);
        self.timers.cancel_where(|key| key.target() == id);
        if !state.target.triggered() {
            presenter.unobserve(state.target.node);
        }
        Ok(())
    }

    // -- Queries --

    /// Returns the target named by `id`.
    #[must_use]
    pub fn target(&self, id: TargetId) -> Option<&RevealTarget> {
        self.slot(id)?.state.as_ref().map(|s| &s.target)
    }

    /// Returns the live target for `node`.
    #[must_use]
    pub fn target_for(&self, node: NodeId) -> Option<TargetId> {
        self.by_node.get(&node).copied()
    }

    /// Returns whether `id` has triggered.
    ///
    /// # Errors
    ///
    /// Returns [`RevealError::StaleTarget`] if `id` no longer names a live
    /// target.
    pub fn is_triggered(&self, id: TargetId) -> Result<bool, RevealError> {
        self.target(id)
            .map(RevealTarget::triggered)
            .ok_or(RevealError::StaleTarget(id))
    }

    /// Number of targets still waiting for their first entry.
    #[must_use]
    pub fn watched_count(&self) -> usize {
        self.live_states().filter(|s| !s.target.triggered()).count()
    }

    /// Number of deferred reveals not yet applied.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    /// Earliest deadline the host timer should be armed for.
    #[must_use]
    pub fn next_deadline(&self) -> Option<HostTime> {
        self.timers.next_deadline()
    }

    // -- Observation --

    /// Processes a batch of entry notifications in the order given.
    ///
    /// Notifications about unknown nodes or nodes that are not entering are
    /// ignored. Returns the number of targets that triggered.
    pub fn on_intersections(
        &mut self,
        now: HostTime,
        entries: &[IntersectionEntry],
        presenter: &mut dyn RevealPresenter,
        tracer: &mut Tracer<'_>,
    ) -> usize {
        if self.disposed {
            return 0;
        }
        let mut triggered = 0;
        for entry in entries.iter().filter(|e| e.is_entered) {
            if let Some(&id) = self.by_node.get(&entry.node)
                && self.trigger(id, now, presenter, tracer)
            {
                triggered += 1;
            }
        }
        triggered
    }

    /// Tests element bounds against `viewport` with the session's entry
    /// condition and processes the result as one batch.
    pub fn on_geometry(
        &mut self,
        now: HostTime,
        viewport: Rect,
        bounds: &[(NodeId, Rect)],
        presenter: &mut dyn RevealPresenter,
        tracer: &mut Tracer<'_>,
    ) -> usize {
        let entry = self.config.entry;
        let entries: Vec<IntersectionEntry> = bounds
            .iter()
            .map(|&(node, rect)| IntersectionEntry {
                node,
                is_entered: entry.is_entered(rect, viewport),
            })
            .collect();
        self.on_intersections(now, &entries, presenter, tracer)
    }

    /// Marks `id` triggered and queues its reveal. Returns `false` if it had
    /// already triggered.
    fn trigger(
        &mut self,
        id: TargetId,
        now: HostTime,
        presenter: &mut dyn RevealPresenter,
        tracer: &mut Tracer<'_>,
    ) -> bool {
        let Some(state) = self.slot_mut(id).and_then(|slot| slot.state.as_mut()) else {
            return false;
        };
        let node = state.target.node;
        let first = state.target.triggered_at.is_none();
        tracer.target_entered(&TargetEnteredEvent {
            target: id,
            node,
            now,
            first,
        });
        if !first {
            return false;
        }
        state.target.triggered_at = Some(now);
        let at = now.saturating_add(state.target.delay);
        presenter.unobserve(node);
        self.timers.schedule(TimerKey::Target(id), at);
        true
    }

    // -- Deferred reveals --

    /// Applies every reveal due at or before `now`, in deadline order.
    ///
    /// A missing node is reported and skipped; it never blocks other reveals.
    /// Returns the number of reveals applied.
    pub fn advance(
        &mut self,
        now: HostTime,
        presenter: &mut dyn RevealPresenter,
        tracer: &mut Tracer<'_>,
    ) -> usize {
        if self.disposed {
            return 0;
        }
        let mut applied = 0;
        while let Some((key, scheduled)) = self.timers.pop_due(now) {
            let id = key.target();
            let step = self.config.stagger_step;
            let Some(state) = self.slot_mut(id).and_then(|slot| slot.state.as_mut()) else {
                continue;
            };
            let parent = state.target.node;

            let (node, reveal, child_index) = match key {
                TimerKey::Target(_) => match state.target.kind.reveal() {
                    Some(reveal) => (parent, reveal, None),
                    None => {
                        match presenter.children(parent) {
                            Ok(children) => {
                                state.children = children;
                            }
                            Err(_) => {
                                tracer.missing_target(&MissingTargetEvent {
                                    target: id,
                                    node: parent,
                                    now,
                                });
                                continue;
                            }
                        }
                        let count = u32::try_from(state.children.len()).unwrap_or(u32::MAX);
                        if count > 0 {
                            tracer.stagger_scheduled(&StaggerScheduledEvent {
                                target: id,
                                children: count,
                                start: scheduled,
                            });
                        }
                        for index in 0..count {
                            let offset = step.saturating_mul(u64::from(index));
                            let at = scheduled.saturating_add(offset);
                            self.timers
                                .schedule(TimerKey::Child { target: id, index }, at);
                        }
                        continue;
                    }
                },
                TimerKey::Child { index, .. } => {
                    let Some(&child) = state.children.get(index as usize) else {
                        continue;
                    };
                    (child, Reveal::FadeInUp, Some(index))
                }
            };

            match presenter.apply(node, reveal) {
                Ok(()) => {
                    applied += 1;
                    tracer.reveal_applied(&RevealAppliedEvent {
                        target: id,
                        node,
                        reveal,
                        child_index,
                        scheduled,
                        applied: now,
                    });
                }
                Err(_) => tracer.missing_target(&MissingTargetEvent {
                    target: id,
                    node,
                    now,
                }),
            }
        }
        applied
    }

    // -- Teardown --

    /// Cancels every pending reveal and releases every watch.
    ///
    /// Idempotent: a second call does nothing.
    pub fn dispose(&mut self, presenter: &mut dyn RevealPresenter, tracer: &mut Tracer<'_>) {
        if self.disposed {
            return;
        }
        self.disposed = true;

        let mut watched = 0_u32;
        for state in self.slots.iter().filter_map(|s| s.state.as_ref()) {
            if !state.target.triggered() {
                presenter.unobserve(state.target.node);
                watched += 1;
            }
        }
        let cancelled = u32::try_from(self.timers.clear()).unwrap_or(u32::MAX);
        self.slots.clear();
        self.free_list.clear();
        self.by_node.clear();
        tracer.session_disposed(&SessionDisposedEvent { watched, cancelled });
    }

    // -- Internals --

    fn slot(&self, id: TargetId) -> Option<&Slot> {
        self.slots
            .get(id.idx as usize)
            .filter(|slot| slot.generation == id.generation)
    }

    fn slot_mut(&mut self, id: TargetId) -> Option<&mut Slot> {
        self.slots
            .get_mut(id.idx as usize)
            .filter(|slot| slot.generation == id.generation)
    }

    fn live_states(&self) -> impl Iterator<Item = &TargetState> {
        self.slots.iter().filter_map(|slot| slot.state.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::MotionEffect;
    use alloc::vec;

    /// Presenter double: a fixed tree and a log of applied reveals.
    #[derive(Default)]
    struct RecordingPresenter {
        children: BTreeMap<NodeId, Vec<NodeId>>,
        missing: Vec<NodeId>,
        applied: Vec<(NodeId, Reveal)>,
        unobserved: Vec<NodeId>,
    }

    impl RevealPresenter for RecordingPresenter {
        fn apply(&mut self, node: NodeId, reveal: Reveal) -> Result<(), RevealError> {
            if self.missing.contains(&node) {
                return Err(RevealError::MissingTarget(node));
            }
            self.applied.push((node, reveal));
            Ok(())
        }

        fn children(&mut self, node: NodeId) -> Result<Vec<NodeId>, RevealError> {
            if self.missing.contains(&node) {
                return Err(RevealError::MissingTarget(node));
            }
            Ok(self.children.get(&node).cloned().unwrap_or_default())
        }

        fn unobserve(&mut self, node: NodeId) {
            self.unobserved.push(node);
        }
    }

    fn enter(node: NodeId) -> IntersectionEntry {
        IntersectionEntry {
            node,
            is_entered: true,
        }
    }

    fn leave(node: NodeId) -> IntersectionEntry {
        IntersectionEntry {
            node,
            is_entered: false,
        }
    }

    fn ms(v: u64) -> HostTime {
        HostTime::from_millis(v)
    }

    #[test]
    fn slide_from_left_reveals_on_next_advance() {
        let mut session = ObservationSession::new(SessionConfig::page());
        let mut p = RecordingPresenter::default();
        let mut t = Tracer::none();
        let id = session
            .observe(NodeId(1), AnimationKind::SlideFromLeft, Duration::ZERO, &mut t)
            .unwrap();

        assert_eq!(
            session.on_intersections(ms(10), &[enter(NodeId(1))], &mut p, &mut t),
            1,
            "one trigger"
        );
        assert_eq!(session.is_triggered(id), Ok(true), "triggered on entry");
        assert_eq!(session.next_deadline(), Some(ms(10)), "due immediately");
        assert!(p.applied.is_empty(), "reveal is deferred, not inline");

        assert_eq!(session.advance(ms(10), &mut p, &mut t), 1, "one reveal");
        assert_eq!(p.applied, vec![(NodeId(1), Reveal::SlideInLeft)], "left");
        assert_eq!(p.unobserved, vec![NodeId(1)], "host told to stop observing");
    }

    #[test]
    fn delay_defers_reveal() {
        let mut session = ObservationSession::new(SessionConfig::page());
        let mut p = RecordingPresenter::default();
        let mut t = Tracer::none();
        session.observe_tagged(NodeId(3), "fadeInUp", Some("400"), &mut t);

        session.on_intersections(ms(100), &[enter(NodeId(3))], &mut p, &mut t);
        assert_eq!(session.advance(ms(499), &mut p, &mut t), 0, "not yet");
        assert_eq!(session.advance(ms(500), &mut p, &mut t), 1, "at trigger + delay");
        assert_eq!(p.applied, vec![(NodeId(3), Reveal::FadeInUp)], "fade");
    }

    #[test]
    fn re_entry_never_retriggers() {
        let mut session = ObservationSession::new(SessionConfig::page());
        let mut p = RecordingPresenter::default();
        let mut t = Tracer::none();
        let id = session
            .observe(NodeId(1), AnimationKind::PlainReveal, Duration::ZERO, &mut t)
            .unwrap();

        session.on_intersections(ms(0), &[enter(NodeId(1))], &mut p, &mut t);
        session.advance(ms(0), &mut p, &mut t);
        session.on_intersections(ms(50), &[leave(NodeId(1))], &mut p, &mut t);
        let again = session.on_intersections(
            ms(60),
            &[enter(NodeId(1)), enter(NodeId(1))],
            &mut p,
            &mut t,
        );
        session.advance(ms(1_000), &mut p, &mut t);

        assert_eq!(again, 0, "no second trigger");
        assert_eq!(p.applied.len(), 1, "exactly one mutation");
        assert_eq!(p.unobserved.len(), 1, "unobserved once");
        assert_eq!(session.target(id).unwrap().triggered_at(), Some(ms(0)), "first time kept");
    }

    #[test]
    fn spurious_refire_during_delay_is_ignored() {
        let mut session = ObservationSession::new(SessionConfig::page());
        let mut p = RecordingPresenter::default();
        let mut t = Tracer::none();
        session.observe(NodeId(1), AnimationKind::FadeInUp, Duration::from_millis(200), &mut t);

        session.on_intersections(ms(0), &[enter(NodeId(1))], &mut p, &mut t);
        session.on_intersections(ms(150), &[enter(NodeId(1))], &mut p, &mut t);
        assert_eq!(session.next_deadline(), Some(ms(200)), "deadline not pushed back");
        session.advance(ms(400), &mut p, &mut t);
        assert_eq!(p.applied.len(), 1, "one reveal");
    }

    #[test]
    fn observing_twice_does_not_duplicate() {
        let mut session = ObservationSession::new(SessionConfig::page());
        let mut t = Tracer::none();
        let a = session.observe(NodeId(9), AnimationKind::FadeInUp, Duration::ZERO, &mut t);
        let b = session.observe(NodeId(9), AnimationKind::SlideFromRight, Duration::ZERO, &mut t);
        assert_eq!(a, b, "same handle");
        assert_eq!(session.watched_count(), 1, "one registration");
    }

    #[test]
    fn stagger_reveals_children_one_step_apart() {
        let mut session = ObservationSession::new(SessionConfig::page());
        let mut p = RecordingPresenter::default();
        let mut t = Tracer::none();
        let kids = vec![NodeId(11), NodeId(12), NodeId(13)];
        p.children.insert(NodeId(10), kids.clone());
        session.observe(NodeId(10), AnimationKind::StaggeredChildren, Duration::ZERO, &mut t);

        session.on_intersections(ms(1_000), &[enter(NodeId(10))], &mut p, &mut t);

        let mut fired = Vec::new();
        for now in [1_000, 1_099, 1_100, 1_199, 1_200, 1_500] {
            let before = p.applied.len();
            session.advance(ms(now), &mut p, &mut t);
            for &(node, _) in &p.applied[before..] {
                fired.push((node, now));
            }
        }

        assert_eq!(
            fired,
            vec![(NodeId(11), 1_000), (NodeId(12), 1_100), (NodeId(13), 1_200)],
            "document order at 0, 100, 200ms"
        );
        assert!(
            p.applied.iter().all(|&(_, r)| r == Reveal::FadeInUp),
            "children fade in"
        );
        assert!(
            !p.applied.iter().any(|&(n, _)| n == NodeId(10)),
            "parent itself is not revealed"
        );
    }

    #[test]
    fn stagger_starts_after_parent_delay() {
        let mut session = ObservationSession::new(SessionConfig::page());
        let mut p = RecordingPresenter::default();
        let mut t = Tracer::none();
        p.children.insert(NodeId(10), vec![NodeId(11), NodeId(12)]);
        session.observe(
            NodeId(10),
            AnimationKind::StaggeredChildren,
            Duration::from_millis(50),
            &mut t,
        );

        session.on_intersections(ms(0), &[enter(NodeId(10))], &mut p, &mut t);
        // A late host timer still schedules children from the parent's
        // deadline, not from when the host got around to advancing.
        session.advance(ms(120), &mut p, &mut t);
        assert_eq!(p.applied.len(), 1, "child 0 at 50ms; child 1 due at 150ms");
        assert_eq!(session.next_deadline(), Some(ms(150)), "child 1 deadline");
    }

    #[test]
    fn stagger_without_children_is_silent() {
        let mut session = ObservationSession::new(SessionConfig::page());
        let mut p = RecordingPresenter::default();
        let mut t = Tracer::none();
        let id = session
            .observe(NodeId(4), AnimationKind::StaggeredChildren, Duration::ZERO, &mut t)
            .unwrap();

        session.on_intersections(ms(0), &[enter(NodeId(4))], &mut p, &mut t);
        assert_eq!(session.advance(ms(5_000), &mut p, &mut t), 0, "no work");
        assert_eq!(session.pending(), 0, "nothing left pending");
        assert_eq!(session.is_triggered(id), Ok(true), "still triggered");
    }

    #[test]
    fn missing_node_does_not_block_batch() {
        let mut session = ObservationSession::new(SessionConfig::page());
        let mut p = RecordingPresenter::default();
        let mut t = Tracer::none();
        p.missing.push(NodeId(1));
        session.observe(NodeId(1), AnimationKind::FadeInUp, Duration::ZERO, &mut t);
        session.observe(NodeId(2), AnimationKind::SlideFromRight, Duration::ZERO, &mut t);

        let entered = session.on_intersections(
            ms(0),
            &[enter(NodeId(1)), enter(NodeId(2))],
            &mut p,
            &mut t,
        );
        assert_eq!(entered, 2, "both triggered");
        assert_eq!(session.advance(ms(0), &mut p, &mut t), 1, "only the live node");
        assert_eq!(p.applied, vec![(NodeId(2), Reveal::SlideInRight)], "second target ran");
    }

    #[test]
    fn unknown_tag_falls_back_to_plain_reveal() {
        let mut session = ObservationSession::new(SessionConfig::page());
        let mut p = RecordingPresenter::default();
        let mut t = Tracer::none();
        let id = session.observe_tagged(NodeId(5), "wobble", None, &mut t).unwrap();
        assert_eq!(
            session.target(id).map(RevealTarget::kind),
            Some(AnimationKind::PlainReveal),
            "fallback kind"
        );
        session.on_intersections(ms(0), &[enter(NodeId(5))], &mut p, &mut t);
        session.advance(ms(0), &mut p, &mut t);
        assert_eq!(p.applied, vec![(NodeId(5), Reveal::Visible)], "plain reveal");
    }

    #[test]
    fn dispose_cancels_pending_reveals() {
        let mut session = ObservationSession::new(SessionConfig::page());
        let mut p = RecordingPresenter::default();
        let mut t = Tracer::none();
        p.children.insert(NodeId(10), vec![NodeId(11), NodeId(12), NodeId(13)]);
        session.observe(NodeId(10), AnimationKind::StaggeredChildren, Duration::ZERO, &mut t);
        session.observe(NodeId(20), AnimationKind::FadeInUp, Duration::from_millis(300), &mut t);
        session.observe(NodeId(30), AnimationKind::FadeInUp, Duration::ZERO, &mut t);

        session.on_intersections(
            ms(0),
            &[enter(NodeId(10)), enter(NodeId(20))],
            &mut p,
            &mut t,
        );
        session.advance(ms(0), &mut p, &mut t);
        assert_eq!(p.applied.len(), 1, "first child only");
        assert_eq!(session.pending(), 3, "two children and one delayed target");

        session.dispose(&mut p, &mut t);
        assert!(session.is_disposed(), "disposed");
        assert_eq!(session.pending(), 0, "all cancelled");
        assert!(p.unobserved.contains(&NodeId(30)), "untriggered watch released");

        session.on_intersections(ms(10), &[enter(NodeId(30))], &mut p, &mut t);
        session.advance(ms(10_000), &mut p, &mut t);
        assert_eq!(p.applied.len(), 1, "no mutation after dispose");
        assert_eq!(
            session.observe(NodeId(40), AnimationKind::FadeInUp, Duration::ZERO, &mut t),
            None,
            "no new watches"
        );
        session.dispose(&mut p, &mut t);
    }

    #[test]
    fn unobserve_cancels_and_invalidates_handle() {
        let mut session = ObservationSession::new(SessionConfig::page());
        let mut p = RecordingPresenter::default();
        let mut t = Tracer::none();
        let id = session
            .observe(NodeId(1), AnimationKind::FadeInUp, Duration::from_millis(100), &mut t)
            .unwrap();
        session.on_intersections(ms(0), &[enter(NodeId(1))], &mut p, &mut t);

        assert_eq!(session.unobserve(id, &mut p), Ok(()), "live handle");
        assert_eq!(session.unobserve(id, &mut p), Err(RevealError::StaleTarget(id)), "stale");
        assert_eq!(session.advance(ms(1_000), &mut p, &mut t), 0, "cancelled");

        let reused = session
            .observe(NodeId(2), AnimationKind::FadeInUp, Duration::ZERO, &mut t)
            .unwrap();
        assert_eq!(reused.index(), id.index(), "slot reused");
        assert_ne!(reused, id, "generation bumped");
        assert!(session.target(id).is_none(), "old handle resolves to nothing");
    }

    #[test]
    fn geometry_batches_use_entry_config() {
        let mut session = ObservationSession::new(SessionConfig::page());
        let mut p = RecordingPresenter::default();
        let mut t = Tracer::none();
        session.observe(NodeId(1), AnimationKind::FadeInUp, Duration::ZERO, &mut t);
        session.observe(NodeId(2), AnimationKind::FadeInUp, Duration::ZERO, &mut t);
        let viewport = Rect::new(0.0, 0.0, 1000.0, 800.0);
        let bounds = [
            (NodeId(1), Rect::new(0.0, 100.0, 100.0, 200.0)),
            (NodeId(2), Rect::new(0.0, 770.0, 100.0, 870.0)),
        ];

        assert_eq!(
            session.on_geometry(ms(0), viewport, &bounds, &mut p, &mut t),
            1,
            "second element sits inside the bottom margin"
        );
        assert_eq!(session.watched_count(), 1, "one still watched");
    }

    #[test]
    fn reduced_motion_gates_effects_but_not_reveals() {
        let config = SessionConfig::page().with_motion(MotionPreference::Reduce);
        let mut session = ObservationSession::new(config);
        let mut p = RecordingPresenter::default();
        let mut t = Tracer::none();
        session.observe(NodeId(1), AnimationKind::FadeInUp, Duration::ZERO, &mut t);

        for effect in [MotionEffect::Parallax, MotionEffect::Ripple, MotionEffect::ClickScale] {
            assert!(!session.motion().allow(effect, &mut t), "{effect:?} refused");
        }
        session.on_intersections(ms(0), &[enter(NodeId(1))], &mut p, &mut t);
        assert_eq!(session.advance(ms(0), &mut p, &mut t), 1, "content still revealed");
        assert_eq!(session.motion().suppressed(), 3, "every refusal counted");
    }
}
