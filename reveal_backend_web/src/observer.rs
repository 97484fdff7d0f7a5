// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `IntersectionObserver` entry source.

use alloc::boxed::Box;
use alloc::vec::Vec;

use js_sys::Array;
use reveal_core::backend::IntersectionEntry;
use reveal_core::entry::EntryConfig;
use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::presenter::DomRevealPresenter;

type EntryClosure = Closure<dyn FnMut(Array)>;

/// Owns an `IntersectionObserver` configured from an [`EntryConfig`].
///
/// The root margin and threshold shape when the browser notifies, but not
/// every notification is an entry: the first `observe()` and any flip of
/// `isIntersecting` are reported whatever the ratio. [`to_entries`] applies
/// the threshold again. Dropping the observer disconnects it.
pub struct EntryObserver {
    observer: IntersectionObserver,
    _closure: EntryClosure,
}

impl EntryObserver {
    /// Creates an observer that hands every raw batch to `on_batch`.
    ///
    /// # Errors
    ///
    /// Propagates the exception thrown by the `IntersectionObserver`
    /// constructor (e.g. an unparsable root margin).
    pub fn new(
        config: &EntryConfig,
        on_batch: impl FnMut(Array) + 'static,
    ) -> Result<Self, JsValue> {
        let closure = Closure::wrap(Box::new(on_batch) as Box<dyn FnMut(Array)>);
        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(config.threshold));
        init.set_root_margin(&config.root_margin());
        let observer =
            IntersectionObserver::new_with_options(closure.as_ref().unchecked_ref(), &init)?;
        Ok(Self {
            observer,
            _closure: closure,
        })
    }

    /// Starts reporting `element`.
    pub fn observe(&self, element: &Element) {
        self.observer.observe(element);
    }

    /// The underlying observer, for handing to a [`DomRevealPresenter`].
    #[must_use]
    pub fn handle(&self) -> &IntersectionObserver {
        &self.observer
    }

    /// Stops all reporting.
    pub fn disconnect(&self) {
        self.observer.disconnect();
    }
}

impl Drop for EntryObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

impl core::fmt::Debug for EntryObserver {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EntryObserver").finish_non_exhaustive()
    }
}

/// Converts a raw observer batch into session entries, preserving order.
///
/// Entries for elements the presenter has never seen are dropped.
pub(crate) fn to_entries(
    batch: &Array,
    presenter: &DomRevealPresenter,
    config: &EntryConfig,
) -> Vec<IntersectionEntry> {
    batch
        .iter()
        .filter_map(|value| {
            let entry: IntersectionObserverEntry = value.unchecked_into();
            let node = presenter.node_of(&entry.target())?;
            Some(IntersectionEntry {
                node,
                is_entered: entered(entry.is_intersecting(), entry.intersection_ratio(), config),
            })
        })
        .collect()
}

/// The entry decision for one observer entry.
fn entered(is_intersecting: bool, ratio: f64, config: &EntryConfig) -> bool {
    is_intersecting && config.admits(ratio)
}
