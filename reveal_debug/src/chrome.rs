// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads events from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes [Chrome Trace Event Format][format] JSON to the given writer.
//!
//! Each target gets its own track (`tid` = target slot). Reveals are complete
//! events (`"ph": "X"`) spanning from the scheduled deadline to when the host
//! applied them, so timer lateness is visible at a glance.
//!
//! [format]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use reveal_core::time::HostTime;

use crate::recorder::RecordedEvent;

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
/// Events that carry no timestamp are placed at the latest time seen so far.
pub fn export(events: &[RecordedEvent], writer: &mut dyn Write) -> io::Result<()> {
    let mut out: Vec<Value> = Vec::new();
    let mut last = HostTime(0);

    for recorded in events {
        match recorded {
            RecordedEvent::TargetObserved(e) => {
                out.push(json!({
                    "ph": "i",
                    "name": "Observe",
                    "cat": "Session",
                    "ts": last.ticks(),
                    "pid": 0,
                    "tid": e.target.index(),
                    "s": "t",
                    "args": {
                        "node": e.node.0,
                        "kind": e.kind.as_str(),
                        "delay_ms": e.delay.as_millis(),
                    }
                }));
            }
            RecordedEvent::KindFallback(e) => {
                out.push(json!({
                    "ph": "i",
                    "name": "KindFallback",
                    "cat": "Warning",
                    "ts": last.ticks(),
                    "pid": 0,
                    "tid": 0,
                    "s": "g",
                    "args": { "node": e.node.0 }
                }));
            }
            RecordedEvent::TargetEntered(e) => {
                last = last.max(e.now);
                out.push(json!({
                    "ph": "i",
                    "name": if e.first { "Trigger" } else { "Reentry" },
                    "cat": "Session",
                    "ts": e.now.ticks(),
                    "pid": 0,
                    "tid": e.target.index(),
                    "s": "t",
                    "args": { "node": e.node.0 }
                }));
            }
            RecordedEvent::StaggerScheduled(e) => {
                last = last.max(e.start);
                out.push(json!({
                    "ph": "i",
                    "name": "Stagger",
                    "cat": "Session",
                    "ts": e.start.ticks(),
                    "pid": 0,
                    "tid": e.target.index(),
                    "s": "t",
                    "args": { "children": e.children }
                }));
            }
            RecordedEvent::RevealApplied(e) => {
                last = last.max(e.applied);
                out.push(json!({
                    "ph": "X",
                    "name": format!("{:?}", e.reveal),
                    "cat": "Reveal",
                    "ts": e.scheduled.ticks(),
                    "dur": e.applied.saturating_duration_since(e.scheduled).ticks(),
                    "pid": 0,
                    "tid": e.target.index(),
                    "args": {
                        "node": e.node.0,
                        "child_index": e.child_index,
                    }
                }));
            }
            RecordedEvent::MissingTarget(e) => {
                last = last.max(e.now);
                out.push(json!({
                    "ph": "i",
                    "name": "MissingTarget",
                    "cat": "Warning",
                    "ts": e.now.ticks(),
                    "pid": 0,
                    "tid": e.target.index(),
                    "s": "t",
                    "args": { "node": e.node.0 }
                }));
            }
            RecordedEvent::MotionSuppressed(e) => {
                out.push(json!({
                    "ph": "i",
                    "name": "MotionSuppressed",
                    "cat": "Motion",
                    "ts": last.ticks(),
                    "pid": 0,
                    "tid": 0,
                    "s": "g",
                    "args": { "effect": format!("{:?}", e.effect) }
                }));
            }
            RecordedEvent::SessionDisposed(e) => {
                out.push(json!({
                    "ph": "i",
                    "name": "Dispose",
                    "cat": "Session",
                    "ts": last.ticks(),
                    "pid": 0,
                    "tid": 0,
                    "s": "g",
                    "args": {
                        "watched": e.watched,
                        "cancelled": e.cancelled,
                    }
                }));
            }
        }
    }

    serde_json::to_writer_pretty(writer, &out)?;
    Ok(())
}
