// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recoverable reveal errors.
//!
//! None of these ever escape an observation batch or a timer advance: the
//! session reports them to the trace sink, skips the offending target, and
//! carries on with the rest.

use core::fmt;

use crate::node::{NodeId, TargetId};

/// Errors produced while resolving or revealing a target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealError {
    /// The referenced node no longer exists in the host tree.
    MissingTarget(NodeId),
    /// The animation tag was not recognized; a plain reveal is used instead.
    InvalidAnimationKind,
    /// The handle names a slot that has been unobserved or reused.
    StaleTarget(TargetId),
}

impl fmt::Display for RevealError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingTarget(node) => write!(f, "reveal target {node:?} does not exist"),
            Self::InvalidAnimationKind => f.write_str("unrecognized animation kind"),
            Self::StaleTarget(id) => write!(f, "target handle {id:?} is stale"),
        }
    }
}

impl core::error::Error for RevealError {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn display_names_the_node() {
        let msg = RevealError::MissingTarget(NodeId(7)).to_string();
        assert_eq!(msg, "reveal target NodeId(7) does not exist", "message");
    }
}
