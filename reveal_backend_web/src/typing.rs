// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typing text bound to an element's text content.

use alloc::rc::Rc;
use core::cell::RefCell;

use reveal_core::time::Duration;
use reveal_core::typing::TypingAnimation;
use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::timer::Timeout;

struct TypingState {
    element: Element,
    animation: TypingAnimation,
    timer: Option<Timeout>,
}

/// Types `text` into an element one character at a time.
///
/// Exported to JS as `TypingText`. Dropping (or `free`-ing) the handle stops
/// the animation where it is.
#[wasm_bindgen]
pub struct TypingText {
    state: Rc<RefCell<TypingState>>,
}

#[wasm_bindgen]
impl TypingText {
    /// Prepares an animation; `speed_ms` is the delay between characters.
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new(element: Element, text: &str, speed_ms: u32) -> Self {
        let state = Rc::new(RefCell::new(TypingState {
            element,
            animation: TypingAnimation::new(text, Duration::from_millis(u64::from(speed_ms))),
            timer: None,
        }));

        let weak = Rc::downgrade(&state);
        let timer = Timeout::new(move || {
            if let Some(state) = weak.upgrade() {
                state.borrow_mut().step();
            }
        });
        state.borrow_mut().timer = Some(timer);

        Self { state }
    }

    /// Clears the element and starts typing.
    pub fn start(&self) {
        let mut guard = self.state.borrow_mut();
        let s = &mut *guard;
        let now = crate::now();
        let visible = s.animation.start(now);
        s.element.set_text_content(Some(visible));
        s.rearm();
    }

    /// Whether the whole text has been typed.
    #[wasm_bindgen(js_name = isFinished)]
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.state.borrow().animation.is_finished()
    }
}

impl TypingState {
    fn step(&mut self) {
        let now = crate::now();
        if let Some(visible) = self.animation.advance(now) {
            self.element.set_text_content(Some(visible));
        }
        self.rearm();
    }

    fn rearm(&self) {
        if let (Some(timer), Some(at)) = (&self.timer, self.animation.next_deadline()) {
            timer.arm(at, crate::now());
        }
    }
}

impl core::fmt::Debug for TypingText {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TypingText")
            .field("finished", &self.is_finished())
            .finish()
    }
}
