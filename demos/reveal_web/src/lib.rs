// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll reveals on a static portfolio page.
//!
//! Build with: `wasm-pack build --target web demos/reveal_web`
//! Then serve `demos/reveal_web/` and open `index.html`.

#![no_std]
#![cfg_attr(
    not(target_arch = "wasm32"),
    allow(dead_code, reason = "this crate only runs in the browser")
)]

use reveal_backend_web::RevealPage;
use wasm_bindgen::prelude::*;

/// Entry point for the portfolio demo.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() -> Result<(), JsValue> {
    let page = RevealPage::start()?;
    // Shimmer until images and fonts have arrived.
    reveal_backend_web::show_skeletons()?;
    reveal_backend_web::hide_skeletons_on_load()?;

    // The page lives as long as the document.
    core::mem::forget(page);
    Ok(())
}
