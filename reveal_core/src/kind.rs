// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Animation kinds and terminal reveal styles.
//!
//! An [`AnimationKind`] is what a target is annotated with; a [`Reveal`] is
//! the terminal style a presenter applies to a node. Every kind except
//! [`StaggeredChildren`](AnimationKind::StaggeredChildren) maps to exactly one
//! reveal on the target itself. Staggered targets reveal their direct
//! children with [`Reveal::FadeInUp`] instead.

use core::str::FromStr;

use crate::error::RevealError;
use crate::time::Duration;

/// The animation a target is annotated with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AnimationKind {
    /// Flip straight into the generic visible state.
    #[default]
    PlainReveal,
    /// Fade in while rising into place.
    FadeInUp,
    /// Slide in from the left edge.
    SlideFromLeft,
    /// Slide in from the right edge.
    SlideFromRight,
    /// Reveal each direct child in document order, one stagger step apart.
    StaggeredChildren,
}

impl AnimationKind {
    /// Parses a tag, falling back to [`PlainReveal`](Self::PlainReveal).
    ///
    /// Returns the kind and whether the fallback was taken.
    #[must_use]
    pub fn from_tag_or_plain(tag: &str) -> (Self, bool) {
        match tag.parse() {
            Ok(kind) => (kind, false),
            Err(_) => (Self::PlainReveal, true),
        }
    }

    /// Returns the reveal applied to the target itself, or `None` for
    /// staggered targets (whose children are revealed instead).
    #[must_use]
    pub const fn reveal(self) -> Option<Reveal> {
        match self {
            Self::PlainReveal => Some(Reveal::Visible),
            Self::FadeInUp => Some(Reveal::FadeInUp),
            Self::SlideFromLeft => Some(Reveal::SlideInLeft),
            Self::SlideFromRight => Some(Reveal::SlideInRight),
            Self::StaggeredChildren => None,
        }
    }

    /// Returns the canonical tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PlainReveal => "plain-reveal",
            Self::FadeInUp => "fade-in-up",
            Self::SlideFromLeft => "slide-from-left",
            Self::SlideFromRight => "slide-from-right",
            Self::StaggeredChildren => "staggered-children",
        }
    }
}

impl FromStr for AnimationKind {
    type Err = RevealError;

    /// Accepts the canonical tags and the page's `data-animate` values.
    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag.trim() {
            "plain-reveal" => Ok(Self::PlainReveal),
            "fade-in-up" | "fadeInUp" => Ok(Self::FadeInUp),
            "slide-from-left" | "slideInLeft" => Ok(Self::SlideFromLeft),
            "slide-from-right" | "slideInRight" => Ok(Self::SlideFromRight),
            "staggered-children" | "stagger" => Ok(Self::StaggeredChildren),
            _ => Err(RevealError::InvalidAnimationKind),
        }
    }
}

/// Parses a `data-delay` style attribute in whole milliseconds.
///
/// Missing, negative, or malformed values yield [`Duration::ZERO`].
#[must_use]
pub fn parse_delay(value: Option<&str>) -> Duration {
    value
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map_or(Duration::ZERO, Duration::from_millis)
}

/// A terminal visual state applied to a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Reveal {
    /// Generic visible state (plain reveals and unknown tags).
    Visible,
    /// Faded in and risen into place. Also used for staggered children.
    FadeInUp,
    /// Slid in from the left.
    SlideInLeft,
    /// Slid in from the right.
    SlideInRight,
}

impl Reveal {
    /// CSS classes a DOM presenter adds for this reveal.
    #[must_use]
    pub const fn classes(self) -> &'static [&'static str] {
        match self {
            Self::Visible => &["animate-on-scroll", "visible"],
            Self::FadeInUp => &["fade-in-up"],
            Self::SlideInLeft => &["slide-in-left"],
            Self::SlideInRight => &["slide-in-right"],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_canonical_and_page_tags() {
        let cases = [
            ("slide-from-left", AnimationKind::SlideFromLeft),
            ("slideInRight", AnimationKind::SlideFromRight),
            ("stagger", AnimationKind::StaggeredChildren),
            (" fadeInUp ", AnimationKind::FadeInUp),
        ];
        for (tag, kind) in cases {
            assert_eq!(tag.parse::<AnimationKind>(), Ok(kind), "tag {tag:?}");
        }
    }

    #[test]
    fn unknown_tag_falls_back_to_plain() {
        assert_eq!(
            "bounce".parse::<AnimationKind>(),
            Err(RevealError::InvalidAnimationKind),
            "unknown tag is an error"
        );
        assert_eq!(
            AnimationKind::from_tag_or_plain("bounce"),
            (AnimationKind::PlainReveal, true),
            "fallback flagged"
        );
        assert_eq!(
            AnimationKind::from_tag_or_plain("stagger"),
            (AnimationKind::StaggeredChildren, false),
            "known tag not flagged"
        );
    }

    #[test]
    fn kinds_map_to_reveals() {
        assert_eq!(AnimationKind::PlainReveal.reveal(), Some(Reveal::Visible), "plain");
        assert_eq!(AnimationKind::SlideFromLeft.reveal(), Some(Reveal::SlideInLeft), "left");
        assert_eq!(AnimationKind::StaggeredChildren.reveal(), None, "stagger");
        assert_eq!(Reveal::Visible.classes(), &["animate-on-scroll", "visible"], "classes");
    }

    #[test]
    fn delay_parsing() {
        assert_eq!(parse_delay(None), Duration::ZERO, "missing");
        assert_eq!(parse_delay(Some("400")), Duration::from_millis(400), "integer");
        assert_eq!(parse_delay(Some("-5")), Duration::ZERO, "negative");
        assert_eq!(parse_delay(Some("soon")), Duration::ZERO, "garbage");
    }
}
