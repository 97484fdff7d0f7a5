// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll-triggered reveal engine for static pages.
//!
//! `reveal_core` decides *when* marked elements are revealed and *which*
//! terminal style each one receives. It never touches a document tree or
//! reads a clock itself: hosts feed it viewport observations and the current
//! [`HostTime`](time::HostTime), and it answers with calls on a
//! [`RevealPresenter`](backend::RevealPresenter). It is `no_std` compatible
//! (with `alloc`), which keeps every timing decision deterministic and
//! testable off the browser.
//!
//! # Architecture
//!
//! ```text
//!   Host (IntersectionObserver / scroll geometry)
//!       │
//!       ▼
//!   IntersectionEntry ──► ObservationSession::on_intersections()
//!                                │
//!                                ▼
//!                         TimerQueue (cancelable, keyed by target)
//!                                │
//!   host timer fires ──► ObservationSession::advance(now)
//!                                │
//!                                ▼
//!                         RevealPresenter::apply(node, Reveal)
//! ```
//!
//! **[`session`]** — [`ObservationSession`](session::ObservationSession): the
//! set of watched targets, their one-shot trigger state, and the pending
//! deferred reveals. Disposal cancels everything.
//!
//! **[`kind`]** — The closed [`AnimationKind`](kind::AnimationKind) tag and
//! the terminal [`Reveal`](kind::Reveal) styles.
//!
//! **[`entry`]** — The entry condition: intersection ratio against a viewport
//! whose bottom edge is pulled inward.
//!
//! **[`timer`]** — Deterministic queue of cancelable deadlines.
//!
//! **[`motion`]** — Reduced-motion gate for non-essential effects.
//!
//! **[`effects`]** — Pure decisions behind the page's decorative effects
//! (parallax, ripple, click scale, header styling, smooth scroll).
//!
//! **[`typing`]** — Character-at-a-time typing animation.
//!
//! **[`trace`]** — [`RevealSink`](trace::RevealSink) trait and the
//! zero-overhead [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod backend;
pub mod effects;
pub mod entry;
pub mod error;
pub mod kind;
pub mod motion;
pub mod node;
pub mod session;
pub mod time;
pub mod timer;
pub mod trace;
pub mod typing;
