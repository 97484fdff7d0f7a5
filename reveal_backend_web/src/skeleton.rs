// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Skeleton placeholders shown while content loads.

use reveal_core::effects::EffectsConfig;
use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

use crate::dom;
use crate::timer;

const SKELETON: &str = ".skeleton";
const SHIMMER: &str = "loading-shimmer";

/// Starts the shimmer on every `.skeleton` element.
///
/// # Errors
///
/// Fails when there is no document.
#[wasm_bindgen(js_name = showSkeletons)]
pub fn show_skeletons() -> Result<(), JsValue> {
    let document = dom::document(&dom::window()?)?;
    for el in dom::query_all(&document, SKELETON)? {
        el.class_list().add_1(SHIMMER)?;
    }
    Ok(())
}

/// Fades every `.skeleton` element out, then removes it from layout.
///
/// # Errors
///
/// Fails when there is no document.
#[wasm_bindgen(js_name = hideSkeletons)]
pub fn hide_skeletons() -> Result<(), JsValue> {
    let document = dom::document(&dom::window()?)?;
    let delay = EffectsConfig::page().skeleton_hide_delay;
    for el in dom::query_all_html(&document, SKELETON)? {
        el.class_list().remove_1(SHIMMER)?;
        el.style().set_property("opacity", "0")?;
        timer::after(delay, move || {
            let _ = el.style().set_property("display", "none");
        });
    }
    Ok(())
}

/// Hides the skeletons once the window has finished loading.
///
/// Hides them right away when the `load` event has already fired.
///
/// # Errors
///
/// Fails when there is no window or document.
#[wasm_bindgen(js_name = hideSkeletonsOnLoad)]
pub fn hide_skeletons_on_load() -> Result<(), JsValue> {
    let window = dom::window()?;
    if loaded(&dom::document(&window)?.ready_state()) {
        return hide_skeletons();
    }
    let on_load = Closure::once_into_js(|| {
        if let Err(err) = hide_skeletons() {
            web_sys::console::warn_1(&err);
        }
    });
    window.add_event_listener_with_callback("load", on_load.unchecked_ref())
}

/// Whether `document.readyState` says the `load` event has fired.
fn loaded(ready_state: &str) -> bool {
    ready_state == "complete"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_complete_documents_count_as_loaded() {
        assert!(loaded("complete"), "load fired");
        assert!(!loaded("interactive"), "parsed, subresources pending");
        assert!(!loaded("loading"), "still parsing");
    }
}
