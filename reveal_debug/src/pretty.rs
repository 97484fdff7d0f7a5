// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`RevealSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Timestamps
//! are printed in milliseconds.

use std::io::Write;

use reveal_core::trace::{
    KindFallbackEvent, MissingTargetEvent, MotionSuppressedEvent, RevealAppliedEvent,
    RevealSink, SessionDisposedEvent, StaggerScheduledEvent, TargetEnteredEvent,
    TargetObservedEvent,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns the writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RevealSink for PrettyPrintSink<W> {
    fn on_target_observed(&mut self, e: &TargetObservedEvent) {
        let _ = writeln!(
            self.writer,
            "[observe] target={:?} node={} kind={} delay={}ms",
            e.target,
            e.node.0,
            e.kind.as_str(),
            e.delay.as_millis(),
        );
    }

    fn on_kind_fallback(&mut self, e: &KindFallbackEvent) {
        let _ = writeln!(
            self.writer,
            "[warn] node={} unknown animation kind, using plain-reveal",
            e.node.0,
        );
    }

    fn on_target_entered(&mut self, e: &TargetEnteredEvent) {
        let _ = writeln!(
            self.writer,
            "[enter] target={:?} node={} at={:.1}ms{}",
            e.target,
            e.node.0,
            e.now.as_millis_f64(),
            if e.first { "" } else { " (ignored, already triggered)" },
        );
    }

    fn on_stagger_scheduled(&mut self, e: &StaggerScheduledEvent) {
        let _ = writeln!(
            self.writer,
            "[stagger] target={:?} children={} start={:.1}ms",
            e.target,
            e.children,
            e.start.as_millis_f64(),
        );
    }

    fn on_reveal_applied(&mut self, e: &RevealAppliedEvent) {
        let child = e
            .child_index
            .map_or_else(String::new, |i| format!(" child={i}"));
        let _ = writeln!(
            self.writer,
            "[reveal] target={:?} node={}{} style={:?} scheduled={:.1}ms applied={:.1}ms",
            e.target,
            e.node.0,
            child,
            e.reveal,
            e.scheduled.as_millis_f64(),
            e.applied.as_millis_f64(),
        );
    }

    fn on_missing_target(&mut self, e: &MissingTargetEvent) {
        let _ = writeln!(
            self.writer,
            "[warn] target={:?} node={} missing at={:.1}ms, skipped",
            e.target,
            e.node.0,
            e.now.as_millis_f64(),
        );
    }

    fn on_motion_suppressed(&mut self, e: &MotionSuppressedEvent) {
        let _ = writeln!(self.writer, "[motion] {:?} suppressed (reduced motion)", e.effect);
    }

    fn on_session_disposed(&mut self, e: &SessionDisposedEvent) {
        let _ = writeln!(
            self.writer,
            "[dispose] watched={} cancelled={}",
            e.watched, e.cancelled,
        );
    }
}
