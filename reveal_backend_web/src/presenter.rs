// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM reveal presenter.
//!
//! Maps [`NodeId`]s to live elements and applies reveals as class-list
//! additions. Stylesheets own the transitions; the presenter only flips the
//! terminal classes named by [`Reveal::classes`].

use alloc::vec::Vec;

use js_sys::Map;
use reveal_core::backend::RevealPresenter;
use reveal_core::error::RevealError;
use reveal_core::kind::Reveal;
use reveal_core::node::NodeId;
use wasm_bindgen::JsValue;
use web_sys::{Element, IntersectionObserver};

/// Applies reveals to DOM elements.
///
/// Every element the session may touch is registered first; the returned
/// [`NodeId`] is its index in the presenter's table. Children of staggered
/// containers are registered lazily when the stagger resolves.
pub struct DomRevealPresenter {
    elements: Vec<Element>,
    /// Element object to table index, keyed by JS identity.
    index: Map,
    observer: Option<IntersectionObserver>,
}

impl Default for DomRevealPresenter {
    fn default() -> Self {
        Self {
            elements: Vec::new(),
            index: Map::new(),
            observer: None,
        }
    }
}

impl core::fmt::Debug for DomRevealPresenter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomRevealPresenter")
            .field("elements_len", &self.elements.len())
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

impl DomRevealPresenter {
    /// Creates an empty presenter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the node for `element`, registering it if needed.
    ///
    /// Returns `None` once the table has run out of node ids.
    pub fn register(&mut self, element: &Element) -> Option<NodeId> {
        if let Some(node) = self.node_of(element) {
            return Some(node);
        }
        let idx = u32::try_from(self.elements.len()).ok()?;
        self.index.set(element, &JsValue::from(idx));
        self.elements.push(element.clone());
        Some(NodeId(idx))
    }

    /// Looks up the node registered for `element`.
    #[must_use]
    pub fn node_of(&self, element: &Element) -> Option<NodeId> {
        node_from_slot(self.index.get(element).as_f64())
    }

    /// Returns the element registered as `node`.
    #[must_use]
    pub fn element(&self, node: NodeId) -> Option<&Element> {
        self.elements.get(node.0 as usize)
    }

    /// Routes [`unobserve`](RevealPresenter::unobserve) to `observer`.
    pub fn set_observer(&mut self, observer: IntersectionObserver) {
        self.observer = Some(observer);
    }

    /// Forgets the observer; later unobserve calls do nothing.
    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    /// The element for `node`, provided it is still in the document.
    fn live(&self, node: NodeId) -> Result<&Element, RevealError> {
        self.element(node)
            .filter(|el| el.is_connected())
            .ok_or(RevealError::MissingTarget(node))
    }
}

/// Decodes a table index stored in the identity map.
///
/// A missing key reads back as `undefined`, which is not a number.
fn node_from_slot(slot: Option<f64>) -> Option<NodeId> {
    let slot = slot?;
    if slot.fract() != 0.0 || !(0.0..=f64::from(u32::MAX)).contains(&slot) {
        return None;
    }
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "range and integrality checked above"
    )]
    let idx = slot as u32;
    Some(NodeId(idx))
}

impl RevealPresenter for DomRevealPresenter {
    fn apply(&mut self, node: NodeId, reveal: Reveal) -> Result<(), RevealError> {
        let classes = self.live(node)?.class_list();
        for class in reveal.classes() {
            let _ = classes.add_1(class);
        }
        Ok(())
    }

    fn children(&mut self, node: NodeId) -> Result<Vec<NodeId>, RevealError> {
        let children = self.live(node)?.children();
        let mut nodes = Vec::with_capacity(children.length() as usize);
        for i in 0..children.length() {
            if let Some(child) = children.item(i)
                && let Some(id) = self.register(&child)
            {
                nodes.push(id);
            }
        }
        Ok(nodes)
    }

    fn unobserve(&mut self, node: NodeId) {
        if let (Some(observer), Some(el)) = (&self.observer, self.element(node)) {
            observer.unobserve(el);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_indices_decode_to_nodes() {
        assert_eq!(node_from_slot(Some(0.0)), Some(NodeId(0)), "first");
        assert_eq!(node_from_slot(Some(41.0)), Some(NodeId(41)), "later");
        assert_eq!(
            node_from_slot(Some(f64::from(u32::MAX))),
            Some(NodeId(u32::MAX)),
            "largest id"
        );
    }

    #[test]
    fn unregistered_or_foreign_slots_are_rejected() {
        assert_eq!(node_from_slot(None), None, "undefined");
        assert_eq!(node_from_slot(Some(-1.0)), None, "negative");
        assert_eq!(node_from_slot(Some(2.5)), None, "fractional");
        assert_eq!(node_from_slot(Some(f64::NAN)), None, "nan");
    }
}
