// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend contract for host integrations.
//!
//! Reveal splits host-specific work into *backend* crates. Each backend
//! provides the following pieces:
//!
//! - **Entry source** — Produces [`IntersectionEntry`] batches from a platform
//!   mechanism (e.g. `IntersectionObserver`), or element bounds that the
//!   session tests itself via [`EntryConfig`](crate::entry::EntryConfig).
//!
//! - **Time** — A `now() -> HostTime` free function reading the platform's
//!   monotonic clock.
//!
//! - **Timer** — A single re-armable platform timer set to
//!   [`ObservationSession::next_deadline`], calling
//!   [`ObservationSession::advance`] when it fires.
//!
//! - **Presenter** — Implements [`RevealPresenter`] to apply reveals to the
//!   host tree and to enumerate a node's children.
//!
//! [`ObservationSession::next_deadline`]: crate::session::ObservationSession::next_deadline
//! [`ObservationSession::advance`]: crate::session::ObservationSession::advance

use alloc::vec::Vec;

use crate::error::RevealError;
use crate::kind::Reveal;
use crate::node::NodeId;

/// One visibility notification for a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IntersectionEntry {
    /// The node the notification is about.
    pub node: NodeId,
    /// Whether the node currently satisfies the entry condition.
    pub is_entered: bool,
}

/// Applies reveals to a host presentation tree.
///
/// DOM presenters and test doubles both implement this trait, so the session
/// stays ignorant of how a reveal is rendered.
pub trait RevealPresenter {
    /// Flips `node` into the terminal style `reveal`.
    ///
    /// # Errors
    ///
    /// Returns [`RevealError::MissingTarget`] if `node` no longer exists.
    fn apply(&mut self, node: NodeId, reveal: Reveal) -> Result<(), RevealError>;

    /// Returns the direct children of `node` in document order.
    ///
    /// # Errors
    ///
    /// Returns [`RevealError::MissingTarget`] if `node` no longer exists.
    fn children(&mut self, node: NodeId) -> Result<Vec<NodeId>, RevealError>;

    /// Tells the entry source to stop reporting `node`.
    fn unobserve(&mut self, node: NodeId) {
        _ = node;
    }
}
