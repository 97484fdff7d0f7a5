// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport entry condition.
//!
//! A target has *entered* when at least [`EntryConfig::threshold`] of its area
//! lies inside the viewport after the viewport's bottom edge has been pulled
//! inward by [`EntryConfig::bottom_margin`]. The margin makes reveals fire
//! slightly before an element reaches the physical bottom edge.
//!
//! Browsers evaluate this natively through `IntersectionObserver`;
//! [`EntryConfig::root_margin`] renders the same margin in its option syntax.
//! [`EntryConfig::is_entered`] evaluates it geometrically for hosts that only
//! have element bounds.

use alloc::format;
use alloc::string::String;

use kurbo::Rect;

/// Configuration of the entry condition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EntryConfig {
    /// Fraction of the target's area (0.0–1.0) that must be inside the
    /// effective viewport.
    pub threshold: f64,
    /// Pixels by which the viewport's bottom edge is pulled inward.
    pub bottom_margin: f64,
}

impl Default for EntryConfig {
    fn default() -> Self {
        Self::page()
    }
}

impl EntryConfig {
    /// Defaults used by the portfolio page: 10% visible, 50px early.
    #[must_use]
    pub const fn page() -> Self {
        Self {
            threshold: 0.1,
            bottom_margin: 50.0,
        }
    }

    /// Returns the viewport shrunk by the bottom margin.
    ///
    /// The result never has negative height.
    #[must_use]
    pub fn effective_viewport(&self, viewport: Rect) -> Rect {
        let y1 = (viewport.y1 - self.bottom_margin).max(viewport.y0);
        Rect::new(viewport.x0, viewport.y0, viewport.x1, y1)
    }

    /// Fraction of `bounds` inside the effective viewport.
    ///
    /// A zero-area target counts as fully visible when its origin lies inside
    /// the effective viewport, and invisible otherwise.
    #[must_use]
    pub fn intersection_ratio(&self, bounds: Rect, viewport: Rect) -> f64 {
        let root = self.effective_viewport(viewport);
        let area = bounds.area();
        if area <= 0.0 {
            return if root.contains(bounds.origin()) { 1.0 } else { 0.0 };
        }
        let overlap = bounds.intersect(root);
        (overlap.area() / area).clamp(0.0, 1.0)
    }

    /// Returns `true` if `bounds` satisfies the entry condition.
    #[must_use]
    pub fn is_entered(&self, bounds: Rect, viewport: Rect) -> bool {
        self.admits(self.intersection_ratio(bounds, viewport))
    }

    /// Returns `true` if a target showing `ratio` of its area has entered.
    ///
    /// Hosts that measure the ratio themselves (such as an
    /// `IntersectionObserver` entry) apply the threshold through this.
    #[must_use]
    pub fn admits(&self, ratio: f64) -> bool {
        ratio > 0.0 && ratio >= self.threshold
    }

    /// Renders the margin as an `IntersectionObserver` `rootMargin` value.
    #[must_use]
    pub fn root_margin(&self) -> String {
        format!("0px 0px {}px 0px", -self.bottom_margin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Rect = Rect::new(0.0, 0.0, 1000.0, 800.0);

    #[test]
    fn fully_inside_is_entered() {
        let cfg = EntryConfig::page();
        let bounds = Rect::new(0.0, 100.0, 200.0, 300.0);
        assert!((cfg.intersection_ratio(bounds, VIEWPORT) - 1.0).abs() < 1e-9, "ratio");
        assert!(cfg.is_entered(bounds, VIEWPORT), "entered");
    }

    #[test]
    fn bottom_margin_delays_entry() {
        let cfg = EntryConfig::page();
        // 100px tall element straddling the physical bottom edge: 40px of it is
        // in the physical viewport, but all of that is inside the margin.
        let bounds = Rect::new(0.0, 760.0, 100.0, 860.0);
        assert_eq!(cfg.intersection_ratio(bounds, VIEWPORT), 0.0, "hidden by margin");
        assert!(!cfg.is_entered(bounds, VIEWPORT), "not entered");

        // Scrolled up so 15px lies above the pulled-in edge.
        let bounds = Rect::new(0.0, 735.0, 100.0, 835.0);
        assert!(cfg.is_entered(bounds, VIEWPORT), "15% is above the 10% threshold");
    }

    #[test]
    fn threshold_is_inclusive() {
        let cfg = EntryConfig {
            threshold: 0.25,
            bottom_margin: 0.0,
        };
        let bounds = Rect::new(0.0, 775.0, 100.0, 875.0);
        assert!(cfg.is_entered(bounds, VIEWPORT), "exactly 25%");
        let bounds = Rect::new(0.0, 776.0, 100.0, 876.0);
        assert!(!cfg.is_entered(bounds, VIEWPORT), "just under 25%");
    }

    #[test]
    fn measured_ratio_below_threshold_is_not_admitted() {
        let cfg = EntryConfig::page();
        assert!(!cfg.admits(0.0), "touching edge");
        assert!(!cfg.admits(0.01), "first pixel past the margin");
        assert!(cfg.admits(0.1), "inclusive");
        assert!(cfg.admits(1.0), "fully visible");
    }

    #[test]
    fn zero_area_target_uses_origin() {
        let cfg = EntryConfig::page();
        assert!(cfg.is_entered(Rect::new(10.0, 10.0, 10.0, 10.0), VIEWPORT), "inside");
        assert!(
            !cfg.is_entered(Rect::new(10.0, 790.0, 10.0, 790.0), VIEWPORT),
            "inside physical viewport but under the margin"
        );
    }

    #[test]
    fn margin_larger_than_viewport_collapses() {
        let cfg = EntryConfig {
            threshold: 0.1,
            bottom_margin: 5_000.0,
        };
        let root = cfg.effective_viewport(VIEWPORT);
        assert_eq!(root.height(), 0.0, "collapsed root");
        assert!(!cfg.is_entered(Rect::new(0.0, 0.0, 10.0, 10.0), VIEWPORT), "nothing enters");
    }

    #[test]
    fn root_margin_matches_observer_syntax() {
        assert_eq!(EntryConfig::page().root_margin(), "0px 0px -50px 0px", "css");
    }
}
