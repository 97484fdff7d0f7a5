// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node and target identity types.

use core::fmt;

/// An opaque reference to a node in the host's document tree.
///
/// Hosts assign node IDs (the web backend uses an index into its element
/// table); core passes them through without interpreting the value.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u32);

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

/// A handle to a watched target in an
/// [`ObservationSession`](crate::session::ObservationSession).
///
/// Contains both a slot index and a generation counter so that stale handles
/// can be detected after a target is unobserved and the slot is reused.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TargetId {
    /// Slot index into the session's target table.
    pub(crate) idx: u32,
    /// Generation counter; must match the session's generation for this slot.
    pub(crate) generation: u32,
}

impl TargetId {
    /// Returns the raw slot index (for diagnostics only).
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.idx
    }

    /// Returns the generation counter.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TargetId({}@gen{})", self.idx, self.generation)
    }
}
