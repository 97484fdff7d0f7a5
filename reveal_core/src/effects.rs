// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Decisions behind the page's decorative effects and navigation glue.
//!
//! Everything here is a pure function of configuration and platform input so
//! the web backend's event handlers stay one-liners. Parallax, ripple, and
//! click scale are motion effects: callers must pass them through a
//! [`MotionGate`](crate::motion::MotionGate) before applying the result.

use alloc::format;
use alloc::string::String;

use kurbo::{Point, Rect};

use crate::time::Duration;

/// Tunables for the decorative effects.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EffectsConfig {
    /// Parallax speed of the first floating element.
    pub parallax_base_speed: f64,
    /// Extra parallax speed per subsequent floating element.
    pub parallax_speed_step: f64,
    /// How long a hover ripple stays in the tree.
    pub ripple_lifetime: Duration,
    /// Scale factor applied on click.
    pub click_scale: f64,
    /// How long the click scale is held.
    pub click_scale_duration: Duration,
    /// Scroll offset past which the header switches to its solid style.
    pub header_solid_after: f64,
    /// Header height assumed for smooth scrolling when there is no header.
    pub fallback_header_height: f64,
    /// Delay before the hero block fades in after load.
    pub hero_reveal_delay: Duration,
    /// Delay between fading skeletons out and removing them from layout.
    pub skeleton_hide_delay: Duration,
    /// Interval between typed characters.
    pub typing_interval: Duration,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self::page()
    }
}

impl EffectsConfig {
    /// Defaults used by the portfolio page.
    #[must_use]
    pub const fn page() -> Self {
        Self {
            parallax_base_speed: 0.5,
            parallax_speed_step: 0.2,
            ripple_lifetime: Duration::from_millis(600),
            click_scale: 0.95,
            click_scale_duration: Duration::from_millis(150),
            header_solid_after: 100.0,
            fallback_header_height: 70.0,
            hero_reveal_delay: Duration::from_millis(500),
            skeleton_hide_delay: Duration::from_millis(300),
            typing_interval: Duration::from_millis(100),
        }
    }

    /// Vertical translation of the `index`-th floating element.
    ///
    /// Later elements move faster, which gives the layered depth effect.
    #[must_use]
    pub fn parallax_offset(&self, scroll_y: f64, index: usize) -> f64 {
        let speed = self.parallax_base_speed + index as f64 * self.parallax_speed_step;
        -(scroll_y * speed)
    }

    /// CSS `transform` value for a parallax offset.
    #[must_use]
    pub fn parallax_transform(&self, scroll_y: f64, index: usize) -> String {
        format!("translateY({}px)", self.parallax_offset(scroll_y, index))
    }

    /// CSS `transform` value held during a click.
    #[must_use]
    pub fn click_transform(&self) -> String {
        format!("scale({})", self.click_scale)
    }

    /// Header style for the given scroll offset.
    #[must_use]
    pub fn header_style(&self, scroll_y: f64) -> HeaderStyle {
        if scroll_y > self.header_solid_after {
            HeaderStyle::SOLID
        } else {
            HeaderStyle::TRANSLUCENT
        }
    }

    /// Scroll position that puts a section's top just under the header.
    #[must_use]
    pub fn scroll_target(&self, section_top: f64, header_height: Option<f64>) -> f64 {
        section_top - header_height.unwrap_or(self.fallback_header_height)
    }
}

/// A ripple span positioned inside its host element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ripple {
    /// Width and height of the ripple square.
    pub size: f64,
    /// Left offset relative to the host element.
    pub left: f64,
    /// Top offset relative to the host element.
    pub top: f64,
}

impl Ripple {
    /// Centers a ripple on `pointer` (client coordinates) inside `host`.
    ///
    /// The ripple is as large as the host's longer side.
    #[must_use]
    pub fn centered(host: Rect, pointer: Point) -> Self {
        let size = host.width().max(host.height());
        Self {
            size,
            left: pointer.x - host.x0 - size / 2.0,
            top: pointer.y - host.y0 - size / 2.0,
        }
    }
}

/// Inline header background and shadow.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeaderStyle {
    /// CSS `background` value.
    pub background: &'static str,
    /// CSS `box-shadow` value.
    pub box_shadow: &'static str,
}

impl HeaderStyle {
    /// Style once the page has scrolled past the header threshold.
    pub const SOLID: Self = Self {
        background: "rgba(255, 255, 255, 0.98)",
        box_shadow: "0 2px 20px rgba(0, 0, 0, 0.1)",
    };

    /// Style at the top of the page.
    pub const TRANSLUCENT: Self = Self {
        background: "rgba(255, 255, 255, 0.95)",
        box_shadow: "none",
    };
}

/// Open/closed state of the mobile navigation menu.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NavMenu {
    open: bool,
}

impl NavMenu {
    /// Flips the menu and returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    /// Closes the menu (a nav link was followed).
    pub fn close(&mut self) {
        self.open = false;
    }

    /// Whether the menu is open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parallax_speeds_increase_per_element() {
        let cfg = EffectsConfig::page();
        assert_eq!(cfg.parallax_offset(100.0, 0), -50.0, "base speed");
        assert!((cfg.parallax_offset(100.0, 2) + 90.0).abs() < 1e-9, "0.5 + 2 * 0.2");
        assert_eq!(cfg.parallax_transform(10.0, 0), "translateY(-5px)", "css value");
    }

    #[test]
    fn ripple_is_centered_on_pointer() {
        let host = Rect::new(100.0, 50.0, 300.0, 100.0);
        let ripple = Ripple::centered(host, Point::new(150.0, 60.0));
        assert_eq!(ripple.size, 200.0, "longer side");
        assert_eq!(ripple.left, -50.0, "150 - 100 - 100");
        assert_eq!(ripple.top, -90.0, "60 - 50 - 100");
    }

    #[test]
    fn header_switches_past_threshold() {
        let cfg = EffectsConfig::page();
        assert_eq!(cfg.header_style(0.0), HeaderStyle::TRANSLUCENT, "top");
        assert_eq!(cfg.header_style(100.0), HeaderStyle::TRANSLUCENT, "threshold is exclusive");
        assert_eq!(cfg.header_style(101.0), HeaderStyle::SOLID, "scrolled");
    }

    #[test]
    fn scroll_target_subtracts_header() {
        let cfg = EffectsConfig::page();
        assert_eq!(cfg.scroll_target(900.0, Some(80.0)), 820.0, "measured header");
        assert_eq!(cfg.scroll_target(900.0, None), 830.0, "fallback height");
        assert_eq!(cfg.click_transform(), "scale(0.95)", "click scale");
    }

    #[test]
    fn nav_menu_toggles_and_closes() {
        let mut menu = NavMenu::default();
        assert!(menu.toggle(), "opened");
        assert!(!menu.toggle(), "closed again");
        menu.toggle();
        menu.close();
        assert!(!menu.is_open(), "link click closes");
    }
}
