// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser backend for reveal.
//!
//! This crate wires a [`reveal_core`] session to browser APIs:
//!
//! - [`EntryObserver`]: `IntersectionObserver` entry source
//! - [`Timeout`]: re-armable `setTimeout` driver for deferred reveals
//! - [`DomRevealPresenter`]: class-list presenter over live elements
//! - [`ConsoleSink`]: forwards session events to the browser console
//! - [`RevealPage`]: the whole portfolio page, from annotation to disposal
//!
//! Everything is single-threaded: state shared between JS callbacks lives in
//! `Rc<RefCell<..>>`, and callbacks hold `Weak` handles so dropping the page
//! releases every closure.

#![no_std]

extern crate alloc;

mod console;
mod dom;
mod listener;
mod observer;
mod page;
mod presenter;
mod skeleton;
mod timer;
mod typing;

pub use console::ConsoleSink;
pub use observer::EntryObserver;
pub use page::RevealPage;
pub use presenter::DomRevealPresenter;
pub use reveal_core::backend::RevealPresenter;
pub use skeleton::{hide_skeletons, hide_skeletons_on_load, show_skeletons};
pub use timer::Timeout;
pub use typing::TypingText;

use reveal_core::motion::MotionPreference;
use reveal_core::time::{HostTime, TICKS_PER_MILLI};

/// Media query matched when the user asked for less motion.
pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

/// Returns the current host time from `performance.now()`.
///
/// The returned [`HostTime`] is in microsecond ticks.
#[must_use]
pub fn now() -> HostTime {
    millis_to_host_time(timer::performance_now())
}

/// Samples the reduced-motion preference once.
///
/// Browsers without `matchMedia` support report no preference.
#[must_use]
pub fn reduced_motion(window: &web_sys::Window) -> MotionPreference {
    let matches = window
        .match_media(REDUCED_MOTION_QUERY)
        .ok()
        .flatten()
        .is_some_and(|query| query.matches());
    MotionPreference::from_reduce_query(matches)
}

/// Converts a `DOMHighResTimeStamp` to microsecond ticks.
fn millis_to_host_time(ms: f64) -> HostTime {
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "performance.now() returns small positive f64; µs fits in u64"
    )]
    let us = (ms * TICKS_PER_MILLI as f64) as u64;
    HostTime(us)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamps_convert_to_microseconds() {
        assert_eq!(millis_to_host_time(16.5), HostTime(16_500), "fractional ms");
        assert_eq!(millis_to_host_time(0.0), HostTime(0), "origin");
    }

    #[test]
    fn negative_timestamps_clamp_to_zero() {
        assert_eq!(millis_to_host_time(-3.0), HostTime(0), "saturating cast");
    }
}
