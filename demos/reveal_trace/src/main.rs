// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Simulated page scroll that exercises the tracing and diagnostics pipeline.
//!
//! Lays out a synthetic portfolio page, scrolls a viewport down it one frame
//! at a time, and feeds the element bounds to an [`ObservationSession`].
//! Events go to both a [`PrettyPrintSink`] and a [`RecorderSink`]; the
//! recording is then exported as a Chrome trace JSON file.

use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::BufWriter;

use kurbo::Rect;
use reveal_core::backend::RevealPresenter;
use reveal_core::error::RevealError;
use reveal_core::kind::Reveal;
use reveal_core::node::NodeId;
use reveal_core::session::{ObservationSession, SessionConfig};
use reveal_core::time::{Duration, HostTime};
use reveal_core::trace::{
    KindFallbackEvent, MissingTargetEvent, MotionSuppressedEvent, RevealAppliedEvent,
    RevealSink, SessionDisposedEvent, StaggerScheduledEvent, TargetEnteredEvent,
    TargetObservedEvent, Tracer,
};

use reveal_debug::pretty::PrettyPrintSink;
use reveal_debug::recorder::RecorderSink;

const VIEWPORT_WIDTH: f64 = 1280.0;
const VIEWPORT_HEIGHT: f64 = 720.0;
const FRAME: Duration = Duration::from_millis(16);
const SCROLL_PER_FRAME: f64 = 24.0;
/// Frame at which the second project card is removed from the page.
const REMOVE_AT_FRAME: u64 = 40;
const MAX_FRAMES: u64 = 1_000;

/// One annotated element of the synthetic page.
struct Block {
    tag: &'static str,
    delay: Option<&'static str>,
    top: f64,
    height: f64,
    children: u32,
}

const fn block(
    tag: &'static str,
    delay: Option<&'static str>,
    top: f64,
    height: f64,
    children: u32,
) -> Block {
    Block {
        tag,
        delay,
        top,
        height,
        children,
    }
}

const PAGE: &[Block] = &[
    block("fade-in-up", None, 900.0, 80.0, 0),
    block("fade-in-up", Some("150"), 1000.0, 120.0, 0),
    block("plain-reveal", None, 1150.0, 60.0, 0),
    block("slideInLeft", Some("0"), 1500.0, 100.0, 0),
    block("slideInRight", Some("200"), 1620.0, 100.0, 0),
    block("slideInLeft", Some("400"), 1740.0, 100.0, 0),
    block("stagger", None, 2100.0, 300.0, 6),
    // Unknown tag: falls back to a plain reveal.
    block("zoom-in", Some("50"), 2500.0, 40.0, 0),
    block("stagger", Some("100"), 2700.0, 400.0, 3),
];

/// Forwards every event to two sinks.
struct Tee<'a> {
    pretty: &'a mut PrettyPrintSink,
    recorder: &'a mut RecorderSink,
}

macro_rules! tee {
    ($($method:ident($event:ty)),* $(,)?) => {
        $(
            fn $method(&mut self, e: &$event) {
                self.pretty.$method(e);
                self.recorder.$method(e);
            }
        )*
    };
}

impl RevealSink for Tee<'_> {
    tee! {
        on_target_observed(TargetObservedEvent),
        on_kind_fallback(KindFallbackEvent),
        on_target_entered(TargetEnteredEvent),
        on_stagger_scheduled(StaggerScheduledEvent),
        on_reveal_applied(RevealAppliedEvent),
        on_missing_target(MissingTargetEvent),
        on_motion_suppressed(MotionSuppressedEvent),
        on_session_disposed(SessionDisposedEvent),
    }
}

/// A presenter over the synthetic page.
#[derive(Default)]
struct SimPresenter {
    children: BTreeMap<NodeId, Vec<NodeId>>,
    removed: BTreeSet<NodeId>,
    applied: usize,
}

impl RevealPresenter for SimPresenter {
    fn apply(&mut self, node: NodeId, _reveal: Reveal) -> Result<(), RevealError> {
        if self.removed.contains(&node) {
            return Err(RevealError::MissingTarget(node));
        }
        self.applied += 1;
        Ok(())
    }

    fn children(&mut self, node: NodeId) -> Result<Vec<NodeId>, RevealError> {
        if self.removed.contains(&node) {
            return Err(RevealError::MissingTarget(node));
        }
        Ok(self.children.get(&node).cloned().unwrap_or_default())
    }
}

fn main() {
    // -- sinks -------------------------------------------------------------
    let mut pretty = PrettyPrintSink::new(Box::new(std::io::stdout()));
    let mut recorder = RecorderSink::new();

    // -- page --------------------------------------------------------------
    let mut presenter = SimPresenter::default();
    let mut bounds: Vec<(NodeId, Rect)> = Vec::new();
    let mut next_child = u32::try_from(PAGE.len()).expect("page fits in u32");
    for (idx, block) in PAGE.iter().enumerate() {
        let node = NodeId(u32::try_from(idx).expect("page fits in u32"));
        bounds.push((node, Rect::new(0.0, block.top, VIEWPORT_WIDTH, block.top + block.height)));
        let kids = (0..block.children)
            .map(|_| {
                let child = NodeId(next_child);
                next_child += 1;
                child
            })
            .collect();
        presenter.children.insert(node, kids);
    }
    let doomed = presenter.children[&NodeId(8)][1];

    // -- session -----------------------------------------------------------
    let mut session = ObservationSession::new(SessionConfig::page());
    {
        let mut sink = Tee {
            pretty: &mut pretty,
            recorder: &mut recorder,
        };
        let mut tracer = Tracer::new(&mut sink);
        for (idx, block) in PAGE.iter().enumerate() {
            let node = NodeId(u32::try_from(idx).expect("page fits in u32"));
            session.observe_tagged(node, block.tag, block.delay, &mut tracer);
        }

        // -- simulated scroll ----------------------------------------------
        let mut now = HostTime::from_millis(1_000);
        let mut scroll_y = 0.0;
        let mut frame = 0;
        while (session.watched_count() > 0 || session.pending() > 0) && frame < MAX_FRAMES {
            if frame == REMOVE_AT_FRAME {
                presenter.removed.insert(doomed);
            }
            let viewport = Rect::new(0.0, scroll_y, VIEWPORT_WIDTH, scroll_y + VIEWPORT_HEIGHT);
            session.on_geometry(now, viewport, &bounds, &mut presenter, &mut tracer);
            session.advance(now, &mut presenter, &mut tracer);

            now = now.saturating_add(FRAME);
            scroll_y += SCROLL_PER_FRAME;
            frame += 1;
        }
        session.dispose(&mut presenter, &mut tracer);
    }

    // -- export Chrome trace -----------------------------------------------
    let path = "reveal_trace.json";
    let file = File::create(path).expect("failed to create reveal_trace.json");
    let mut writer = BufWriter::new(file);
    reveal_debug::chrome::export(recorder.events(), &mut writer)
        .expect("failed to write chrome trace");

    println!(
        "Wrote {path} ({} events, {} reveals applied)",
        recorder.events().len(),
        presenter.applied
    );
}
