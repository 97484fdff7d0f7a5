// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The portfolio page: scroll reveals plus the navigation and decoration glue.
//!
//! [`RevealPage::start`] annotates the document, registers every
//! `[data-animate]` element with an [`ObservationSession`], and binds the
//! page's listeners. All state sits behind one `Rc<RefCell<PageState>>`;
//! every JS callback holds a `Weak` to it, so [`RevealPage::dispose`] (or
//! dropping the handle) detaches everything at once.

use alloc::format;
use alloc::rc::{Rc, Weak};
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;

use js_sys::Array;
use kurbo::{Point, Rect};
use reveal_core::effects::{EffectsConfig, NavMenu, Ripple};
use reveal_core::motion::MotionEffect;
use reveal_core::session::{ObservationSession, SessionConfig};
use reveal_core::time::HostTime;
use reveal_core::trace::Tracer;
use wasm_bindgen::JsCast as _;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlElement, MouseEvent, ScrollBehavior,
    ScrollToOptions, Window,
};

use crate::console::{self, ConsoleSink};
use crate::dom;
use crate::listener::Listener;
use crate::observer::{self, EntryObserver};
use crate::presenter::DomRevealPresenter;
use crate::timer::{Cleanups, Timeout};

const ANIMATED: &str = "[data-animate]";
const TIMELINE_ITEM: &str = ".timeline-item";
const STAGGER_GRIDS: [&str; 2] = [".skills-grid", ".projects-grid"];
const INTERACTIVE: &str = ".btn, .project-card, .skill-category, .stat-card";
const HOVER_EFFECT: &str = "hover-effect";
const HERO_PARTS: [&str; 4] = [
    ".hero-title",
    ".hero-subtitle",
    ".hero-description",
    ".hero-actions",
];
const ACTIVE: &str = "active";
const TIMELINE_DELAY_STEP_MS: usize = 200;

struct NavElements {
    toggle: Element,
    menu: Element,
}

struct PageState {
    window: Window,
    document: Document,
    session: ObservationSession,
    presenter: DomRevealPresenter,
    effects: EffectsConfig,
    sink: ConsoleSink,
    menu: NavMenu,
    nav: Option<NavElements>,
    header: Option<HtmlElement>,
    floating: Vec<HtmlElement>,
    reveal_timer: Option<Timeout>,
    hero_timer: Option<Timeout>,
    cleanups: Cleanups,
    observer: Option<EntryObserver>,
    listeners: Vec<Listener>,
}

impl PageState {
    /// Feeds one observer batch to the session and applies zero-delay reveals
    /// right away.
    fn on_batch(&mut self, batch: &Array) {
        let now = crate::now();
        let config = self.session.config().entry;
        let entries = observer::to_entries(batch, &self.presenter, &config);
        let mut tracer = Tracer::new(&mut self.sink);
        self.session
            .on_intersections(now, &entries, &mut self.presenter, &mut tracer);
        self.session.advance(now, &mut self.presenter, &mut tracer);
        self.rearm(now);
    }

    fn on_reveal_timer(&mut self) {
        let now = crate::now();
        let mut tracer = Tracer::new(&mut self.sink);
        self.session.advance(now, &mut self.presenter, &mut tracer);
        self.rearm(now);
    }

    fn rearm(&self, now: HostTime) {
        if let (Some(timer), Some(at)) = (&self.reveal_timer, self.session.next_deadline()) {
            timer.arm(at, now);
        }
    }

    fn allow(&mut self, effect: MotionEffect) -> bool {
        let mut tracer = Tracer::new(&mut self.sink);
        self.session.motion().allow(effect, &mut tracer)
    }

    fn set_menu_open(&self, open: bool) {
        if let Some(nav) = &self.nav {
            let _ = nav.menu.class_list().toggle_with_force(ACTIVE, open);
            let _ = nav.toggle.class_list().toggle_with_force(ACTIVE, open);
        }
    }

    fn scroll_to(&self, top: f64) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn follow_nav_link(&mut self, link: &Element, event: &Event) {
        self.menu.close();
        self.set_menu_open(false);
        event.prevent_default();

        let Some(href) = link.get_attribute("href") else {
            return;
        };
        // Links that are not selectors (external URLs) simply do nothing.
        let Some(section) = dom::query_html(&self.document, &href) else {
            return;
        };
        let header_height = self.header.as_ref().map(|h| f64::from(h.offset_height()));
        let top = self
            .effects
            .scroll_target(f64::from(section.offset_top()), header_height);
        self.scroll_to(top);
    }

    fn update_header(&self) {
        let Some(header) = &self.header else {
            return;
        };
        let style = self.effects.header_style(self.scroll_y());
        let css = header.style();
        let _ = css.set_property("background", style.background);
        let _ = css.set_property("box-shadow", style.box_shadow);
    }

    fn update_parallax(&self) {
        let scroll_y = self.scroll_y();
        for (index, element) in self.floating.iter().enumerate() {
            let transform = self.effects.parallax_transform(scroll_y, index);
            let _ = element.style().set_property("transform", &transform);
        }
    }

    fn spawn_ripple(&mut self, event: &Event) -> Result<(), JsValue> {
        if !self.allow(MotionEffect::Ripple) {
            return Ok(());
        }
        let (Some(host), Some(mouse)) = (
            current_html_target(event),
            event.dyn_ref::<MouseEvent>(),
        ) else {
            return Ok(());
        };
        let bounds = host.get_bounding_client_rect();
        let rect = Rect::new(
            bounds.left(),
            bounds.top(),
            bounds.left() + bounds.width(),
            bounds.top() + bounds.height(),
        );
        let pointer = Point::new(f64::from(mouse.client_x()), f64::from(mouse.client_y()));
        let ripple = Ripple::centered(rect, pointer);

        let span: HtmlElement = self.document.create_element("span")?.unchecked_into();
        let css = span.style();
        css.set_property("width", &px(ripple.size))?;
        css.set_property("height", &px(ripple.size))?;
        css.set_property("left", &px(ripple.left))?;
        css.set_property("top", &px(ripple.top))?;
        span.class_list().add_1("ripple")?;
        host.append_child(&span)?;
        self.cleanups
            .schedule(self.effects.ripple_lifetime, move || span.remove());
        Ok(())
    }

    fn press_button(&mut self, event: &Event) {
        if !self.allow(MotionEffect::ClickScale) {
            return;
        }
        let Some(button) = current_html_target(event) else {
            return;
        };
        let _ = button
            .style()
            .set_property("transform", &self.effects.click_transform());
        self.cleanups
            .schedule(self.effects.click_scale_duration, move || {
                let _ = button.style().remove_property("transform");
            });
    }
}

/// A running reveal page.
///
/// Exported to JS as `RevealPage`. Call `RevealPage.start()` once the DOM has
/// been parsed, and `dispose()` (or `free()`) to tear everything down.
#[wasm_bindgen]
pub struct RevealPage {
    state: Rc<RefCell<PageState>>,
}

#[wasm_bindgen]
impl RevealPage {
    /// Starts the page with its default configuration.
    ///
    /// # Errors
    ///
    /// Fails when there is no window or document, or when the browser rejects
    /// the observer options.
    pub fn start() -> Result<Self, JsValue> {
        Self::start_with(
            SessionConfig::page(),
            EffectsConfig::page(),
            ConsoleSink::quiet(),
        )
    }

    /// Stops everything: pending reveals, observers, listeners and timers.
    ///
    /// Ripples still on screen are removed and pressed buttons are restored
    /// right away instead of waiting for their timers. Calling it again does
    /// nothing.
    pub fn dispose(&self) {
        let (released, mut cleanups) = {
            let mut guard = self.state.borrow_mut();
            let s = &mut *guard;
            if s.session.is_disposed() {
                return;
            }
            let mut tracer = Tracer::new(&mut s.sink);
            s.session.dispose(&mut s.presenter, &mut tracer);
            s.presenter.clear_observer();
            let released = (
                core::mem::take(&mut s.listeners),
                s.observer.take(),
                s.reveal_timer.take(),
                s.hero_timer.take(),
            );
            (released, core::mem::take(&mut s.cleanups))
        };
        // Closures are dropped and cleanups run outside the borrow.
        cleanups.flush();
        drop(released);
    }

    /// Whether [`dispose`](Self::dispose) has run.
    #[wasm_bindgen(js_name = isDisposed)]
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.state.borrow().session.is_disposed()
    }

    /// Number of elements still waiting to enter the viewport.
    #[wasm_bindgen(js_name = watchedCount)]
    #[must_use]
    pub fn watched_count(&self) -> usize {
        self.state.borrow().session.watched_count()
    }
}

impl RevealPage {
    /// Starts the page with explicit configuration and trace sink.
    ///
    /// The reduced-motion preference is sampled here, once, and overrides
    /// `session.motion`.
    ///
    /// # Errors
    ///
    /// Fails when there is no window or document, or when the browser rejects
    /// the observer options.
    pub fn start_with(
        session: SessionConfig,
        effects: EffectsConfig,
        sink: ConsoleSink,
    ) -> Result<Self, JsValue> {
        let window = dom::window()?;
        let document = dom::document(&window)?;
        annotate(&document)?;

        let config = session.with_motion(crate::reduced_motion(&window));
        let nav = match (
            document.query_selector(".nav-toggle")?,
            document.query_selector(".nav-menu")?,
        ) {
            (Some(toggle), Some(menu)) => Some(NavElements { toggle, menu }),
            _ => {
                console::warn("reveal: navigation toggle or menu not found");
                None
            }
        };
        let state = Rc::new(RefCell::new(PageState {
            header: dom::query_html(&document, ".header"),
            floating: dom::query_all_html(&document, ".floating-element")?,
            window,
            document,
            session: ObservationSession::new(config),
            presenter: DomRevealPresenter::new(),
            effects,
            sink,
            menu: NavMenu::default(),
            nav,
            reveal_timer: None,
            hero_timer: None,
            cleanups: Cleanups::default(),
            observer: None,
            listeners: Vec::new(),
        }));

        let weak = Rc::downgrade(&state);
        let reveal_timer = Timeout::new(move || {
            if let Some(state) = weak.upgrade() {
                state.borrow_mut().on_reveal_timer();
            }
        });
        let weak = Rc::downgrade(&state);
        let entries = EntryObserver::new(&config.entry, move |batch: Array| {
            if let Some(state) = weak.upgrade() {
                state.borrow_mut().on_batch(&batch);
            }
        })?;

        {
            let mut guard = state.borrow_mut();
            let s = &mut *guard;
            s.presenter.set_observer(entries.handle().clone());
            let mut tracer = Tracer::new(&mut s.sink);
            for element in dom::query_all(&s.document, ANIMATED)? {
                let Some(node) = s.presenter.register(&element) else {
                    continue;
                };
                let tag = element.get_attribute("data-animate").unwrap_or_default();
                let delay = element.get_attribute("data-delay");
                s.session
                    .observe_tagged(node, &tag, delay.as_deref(), &mut tracer);
                entries.observe(&element);
            }
            s.reveal_timer = Some(reveal_timer);
            s.observer = Some(entries);
        }

        let listeners = bind_listeners(&state)?;
        let hero_timer = {
            let document = state.borrow().document.clone();
            let timer = Timeout::new(move || reveal_hero(&document));
            let now = crate::now();
            timer.arm(now.saturating_add(effects.hero_reveal_delay), now);
            timer
        };
        {
            let mut s = state.borrow_mut();
            s.listeners = listeners;
            s.hero_timer = Some(hero_timer);
        }

        Ok(Self { state })
    }
}

impl Drop for RevealPage {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl core::fmt::Debug for RevealPage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = self.state.borrow();
        f.debug_struct("RevealPage")
            .field("watched", &s.session.watched_count())
            .field("pending", &s.session.pending())
            .field("listeners", &s.listeners.len())
            .field("cleanups", &s.cleanups.pending())
            .field("disposed", &s.session.is_disposed())
            .finish()
    }
}

/// Adds the page's implicit animation attributes and hover classes.
fn annotate(document: &Document) -> Result<(), JsValue> {
    for (index, item) in dom::query_all(document, TIMELINE_ITEM)?.iter().enumerate() {
        let tag = if index % 2 == 0 {
            "slideInLeft"
        } else {
            "slideInRight"
        };
        item.set_attribute("data-animate", tag)?;
        item.set_attribute("data-delay", &format!("{}", index * TIMELINE_DELAY_STEP_MS))?;
    }
    for selector in STAGGER_GRIDS {
        if let Some(grid) = document.query_selector(selector)? {
            grid.set_attribute("data-animate", "stagger")?;
        }
    }
    for element in dom::query_all(document, INTERACTIVE)? {
        element.class_list().add_1(HOVER_EFFECT)?;
    }
    Ok(())
}

fn bind_listeners(state: &Rc<RefCell<PageState>>) -> Result<Vec<Listener>, JsValue> {
    let s = state.borrow();
    let mut listeners = Vec::new();

    if let Some(nav) = &s.nav {
        listeners.push(listen(state, &nav.toggle, "click", |s, _| {
            let open = s.menu.toggle();
            s.set_menu_open(open);
        })?);
    }
    for link in dom::query_all(&s.document, ".nav-link")? {
        let target = link.clone();
        listeners.push(listen(state, &target, "click", move |s, event| {
            s.follow_nav_link(&link, &event);
        })?);
    }
    if let Some(logo) = s.document.query_selector(".nav-brand")? {
        listeners.push(listen(state, &logo, "click", |s, _| s.scroll_to(0.0))?);
    }
    if s.header.is_some() {
        listeners.push(listen(state, &s.window, "scroll", |s, _| s.update_header())?);
    }

    let parallax = !s.floating.is_empty();
    for element in dom::query_all(&s.document, &format!(".{HOVER_EFFECT}"))? {
        listeners.push(listen(state, &element, "mouseenter", |s, event| {
            let _ = s.spawn_ripple(&event);
        })?);
    }
    for button in dom::query_all(&s.document, ".btn")? {
        listeners.push(listen(state, &button, "click", |s, event| {
            s.press_button(&event);
        })?);
    }
    let window = s.window.clone();
    drop(s);

    if parallax && state.borrow_mut().allow(MotionEffect::Parallax) {
        listeners.push(listen(state, &window, "scroll", |s, _| s.update_parallax())?);
    }

    Ok(listeners)
}

/// Attaches `handler` to `target`, handing it the page state while the page
/// is alive.
fn listen(
    state: &Rc<RefCell<PageState>>,
    target: &EventTarget,
    kind: &'static str,
    mut handler: impl FnMut(&mut PageState, Event) + 'static,
) -> Result<Listener, JsValue> {
    let weak: Weak<RefCell<PageState>> = Rc::downgrade(state);
    Listener::new(target, kind, move |event| {
        if let Some(state) = weak.upgrade() {
            handler(&mut state.borrow_mut(), event);
        }
    })
}

fn reveal_hero(document: &Document) {
    for selector in HERO_PARTS {
        if let Some(part) = dom::query_html(document, selector) {
            let _ = part.style().set_property("opacity", "1");
        }
    }
}

fn current_html_target(event: &Event) -> Option<HtmlElement> {
    event
        .current_target()
        .and_then(|target| target.dyn_into::<HtmlElement>().ok())
}

fn px(value: f64) -> String {
    format!("{value}px")
}
