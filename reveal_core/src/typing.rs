// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Character-at-a-time typing animation.

use alloc::string::String;

use crate::time::{Duration, HostTime};

/// Types out a string one character per interval.
///
/// Like the reveal session, it never reads a clock: the host arms a timer for
/// [`next_deadline`](Self::next_deadline) and writes back whatever
/// [`advance`](Self::advance) returns. A late timer catches up by typing every
/// character that became due.
#[derive(Clone, Debug)]
pub struct TypingAnimation {
    text: String,
    interval: Duration,
    /// Number of characters typed so far.
    typed: usize,
    /// Total number of characters.
    total: usize,
    next_at: Option<HostTime>,
}

impl TypingAnimation {
    /// Creates an idle animation for `text`.
    #[must_use]
    pub fn new(text: impl Into<String>, interval: Duration) -> Self {
        let text = text.into();
        let total = text.chars().count();
        Self {
            text,
            interval,
            typed: 0,
            total,
            next_at: None,
        }
    }

    /// Clears the output and types the first character at `now`.
    ///
    /// Returns the visible prefix.
    pub fn start(&mut self, now: HostTime) -> &str {
        self.typed = 0;
        self.next_at = (self.total > 0).then_some(now);
        self.advance(now);
        self.visible()
    }

    /// Types every character due at or before `now`.
    ///
    /// Returns the new visible prefix if anything was typed.
    pub fn advance(&mut self, now: HostTime) -> Option<&str> {
        let before = self.typed;
        while let Some(at) = self.next_at {
            if at > now || self.typed >= self.total {
                break;
            }
            self.typed += 1;
            self.next_at = if self.typed < self.total {
                Some(at.saturating_add(self.interval))
            } else {
                None
            };
        }
        if self.typed == before {
            return None;
        }
        Some(self.visible())
    }

    /// The currently visible prefix.
    #[must_use]
    pub fn visible(&self) -> &str {
        let end = self
            .text
            .char_indices()
            .nth(self.typed)
            .map_or(self.text.len(), |(i, _)| i);
        &self.text[..end]
    }

    /// When the next character is due, or `None` when idle or finished.
    #[must_use]
    pub const fn next_deadline(&self) -> Option<HostTime> {
        self.next_at
    }

    /// Whether every character has been typed.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.typed >= self.total
    }
}
