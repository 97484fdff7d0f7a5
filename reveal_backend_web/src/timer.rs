// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `setTimeout` driver.
//!
//! The core never owns a clock or a timer. [`Timeout`] is the single platform
//! timer a backend keeps per deadline source: the host arms it for
//! `next_deadline()` and the callback calls `advance(now)` and re-arms.

use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

use reveal_core::time::{Duration, HostTime, TICKS_PER_MILLI};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = performance, js_name = "now")]
    pub(crate) fn performance_now() -> f64;

    #[wasm_bindgen(js_name = "setTimeout")]
    fn set_timeout(callback: &JsValue, millis: i32) -> i32;

    #[wasm_bindgen(js_name = "clearTimeout")]
    fn clear_timeout(id: i32);
}

/// A re-armable one-shot `setTimeout`.
///
/// [`arm`](Self::arm) keeps the earliest requested deadline: arming for a
/// later time than the pending one is a no-op, arming earlier replaces it.
/// Dropping the `Timeout` clears the pending timer and releases the closure.
pub struct Timeout {
    inner: Rc<TimeoutInner>,
}

type TimeoutClosure = Closure<dyn FnMut()>;

struct TimeoutInner {
    closure: RefCell<Option<TimeoutClosure>>,
    callback: RefCell<Box<dyn FnMut()>>,
    /// Browser timer id and the deadline it was armed for.
    armed: Cell<Option<(i32, HostTime)>>,
}

impl Timeout {
    /// Creates an idle timer that runs `callback` each time it fires.
    pub fn new(callback: impl FnMut() + 'static) -> Self {
        let inner = Rc::new(TimeoutInner {
            closure: RefCell::new(None),
            callback: RefCell::new(Box::new(callback)),
            armed: Cell::new(None),
        });

        let weak: Weak<TimeoutInner> = Rc::downgrade(&inner);
        let closure = Closure::wrap(Box::new(move || {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            inner.armed.set(None);
            inner.callback.borrow_mut()();
        }) as Box<dyn FnMut()>);
        *inner.closure.borrow_mut() = Some(closure);

        Self { inner }
    }

    /// Arms the timer for `at`, measured from `now`.
    pub fn arm(&self, at: HostTime, now: HostTime) {
        if let Some((_, pending)) = self.inner.armed.get()
            && pending <= at
        {
            return;
        }
        self.cancel();
        if let Some(ref closure) = *self.inner.closure.borrow() {
            let id = set_timeout(closure.as_ref(), delay_millis(at, now));
            self.inner.armed.set(Some((id, at)));
        }
    }

    /// Clears the pending timer, if any.
    pub fn cancel(&self) {
        if let Some((id, _)) = self.inner.armed.take() {
            clear_timeout(id);
        }
    }

    /// Returns the deadline the timer is armed for.
    #[must_use]
    pub fn pending(&self) -> Option<HostTime> {
        self.inner.armed.get().map(|(_, at)| at)
    }
}

impl Drop for Timeout {
    fn drop(&mut self) {
        self.cancel();
        self.inner.closure.borrow_mut().take();
    }
}

impl core::fmt::Debug for Timeout {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Timeout")
            .field("pending", &self.pending())
            .finish_non_exhaustive()
    }
}

type Action = Box<dyn FnOnce()>;

/// An action that runs at most once, from whichever handle asks first.
#[derive(Clone)]
struct OnceAction(Rc<RefCell<Option<Action>>>);

impl OnceAction {
    fn new(f: impl FnOnce() + 'static) -> Self {
        Self(Rc::new(RefCell::new(Some(Box::new(f)))))
    }

    fn run(&self) {
        // Taken before running so the action may drop its own handle.
        let action = self.0.borrow_mut().take();
        if let Some(action) = action {
            action();
        }
    }

    fn is_done(&self) -> bool {
        self.0.borrow().is_none()
    }
}

/// Deferred undo actions for short-lived decoration (ripples, click scale).
///
/// Each action runs after its delay, or right away on [`flush`](Self::flush).
/// Dropping the set cancels whatever has not run.
#[derive(Default)]
pub(crate) struct Cleanups {
    entries: Vec<(Timeout, OnceAction)>,
}

impl Cleanups {
    /// Runs `f` once `delay` from now.
    pub(crate) fn schedule(&mut self, delay: Duration, f: impl FnOnce() + 'static) {
        self.entries.retain(|(_, action)| !action.is_done());
        let action = OnceAction::new(f);
        let fire = action.clone();
        let timeout = Timeout::new(move || fire.run());
        let now = crate::now();
        timeout.arm(now.saturating_add(delay), now);
        self.entries.push((timeout, action));
    }

    /// Cancels every timer and runs the actions still pending.
    pub(crate) fn flush(&mut self) {
        for (timeout, action) in self.entries.drain(..) {
            timeout.cancel();
            action.run();
        }
    }

    /// Number of actions that have not run yet.
    pub(crate) fn pending(&self) -> usize {
        self.entries.iter().filter(|(_, a)| !a.is_done()).count()
    }
}

/// Runs `f` once after `delay`. The timer cannot be cancelled.
///
/// Only used by the standalone skeleton export, which outlives any page.
pub(crate) fn after(delay: Duration, f: impl FnOnce() + 'static) {
    let callback = Closure::once_into_js(f);
    set_timeout(&callback, delay_millis(HostTime(delay.ticks()), HostTime(0)));
}

/// Whole milliseconds to wait until `at`, rounded up so a timer never fires
/// before its deadline.
fn delay_millis(at: HostTime, now: HostTime) -> i32 {
    let ms = at.saturating_duration_since(now).ticks().div_ceil(TICKS_PER_MILLI);
    i32::try_from(ms).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_rounds_up_to_whole_millis() {
        let now = HostTime::from_millis(10);
        assert_eq!(delay_millis(HostTime(10_001), now), 1, "1µs late is 1ms");
        assert_eq!(delay_millis(HostTime::from_millis(110), now), 100, "exact");
    }

    #[test]
    fn past_deadlines_fire_immediately() {
        let now = HostTime::from_millis(500);
        assert_eq!(delay_millis(HostTime::from_millis(100), now), 0, "overdue");
    }

    #[test]
    fn huge_delays_saturate() {
        assert_eq!(delay_millis(HostTime(u64::MAX), HostTime(0)), i32::MAX, "clamped");
    }

    #[test]
    fn once_action_runs_once_across_handles() {
        let count = Rc::new(Cell::new(0));
        let seen = Rc::clone(&count);
        let action = OnceAction::new(move || seen.set(seen.get() + 1));
        let timer_side = action.clone();
        assert!(!action.is_done(), "fresh");

        // Flushed on dispose, then the stale timer fires anyway.
        action.run();
        timer_side.run();
        assert_eq!(count.get(), 1, "ran exactly once");
        assert!(timer_side.is_done(), "shared state");
    }

    #[test]
    fn empty_cleanups_flush_quietly() {
        let mut cleanups = Cleanups::default();
        cleanups.flush();
        assert_eq!(cleanups.pending(), 0, "nothing scheduled");
    }
}
