// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser console trace output.

use alloc::format;

use reveal_core::trace::{
    KindFallbackEvent, MissingTargetEvent, MotionSuppressedEvent, RevealAppliedEvent,
    RevealSink, SessionDisposedEvent, StaggerScheduledEvent, TargetObservedEvent,
};
use wasm_bindgen::JsValue;
use web_sys::console;

/// A [`RevealSink`] that writes to the browser console.
///
/// Warnings (unknown animation tags, vanished targets) always go to
/// `console.warn`. Everything else is logged only when `verbose` is set.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleSink {
    /// Also log routine events with `console.log`.
    pub verbose: bool,
}

impl ConsoleSink {
    /// Creates a sink that only reports warnings.
    #[must_use]
    pub const fn quiet() -> Self {
        Self { verbose: false }
    }

    /// Creates a sink that logs every event.
    #[must_use]
    pub const fn verbose() -> Self {
        Self { verbose: true }
    }

    fn log(&self, message: &str) {
        if self.verbose {
            console::log_1(&JsValue::from_str(message));
        }
    }
}

pub(crate) fn warn(message: &str) {
    console::warn_1(&JsValue::from_str(message));
}

impl RevealSink for ConsoleSink {
    fn on_target_observed(&mut self, e: &TargetObservedEvent) {
        self.log(&format!(
            "reveal: watching node {} as {} (+{}ms)",
            e.node.0,
            e.kind.as_str(),
            e.delay.as_millis()
        ));
    }

    fn on_kind_fallback(&mut self, e: &KindFallbackEvent) {
        warn(&format!(
            "reveal: node {} has an unknown data-animate value, using a plain reveal",
            e.node.0
        ));
    }

    fn on_stagger_scheduled(&mut self, e: &StaggerScheduledEvent) {
        self.log(&format!("reveal: staggering {} children", e.children));
    }

    fn on_reveal_applied(&mut self, e: &RevealAppliedEvent) {
        self.log(&format!("reveal: node {} -> {:?}", e.node.0, e.reveal));
    }

    fn on_missing_target(&mut self, e: &MissingTargetEvent) {
        warn(&format!("reveal: node {} left the document, skipped", e.node.0));
    }

    fn on_motion_suppressed(&mut self, e: &MotionSuppressedEvent) {
        self.log(&format!("reveal: {:?} suppressed for reduced motion", e.effect));
    }

    fn on_session_disposed(&mut self, e: &SessionDisposedEvent) {
        self.log(&format!(
            "reveal: disposed ({} watched, {} pending cancelled)",
            e.watched, e.cancelled
        ));
    }
}
