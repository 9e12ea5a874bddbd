// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Core traits and types shared by every AST node.
//!
//! # Node identity
//!
//! [`NodeId`] gives every node a stable identity independent of its
//! position or contents. Ids come from a process-global counter, so nodes
//! synthesized during a rewrite get fresh ids without threading a generator
//! through every constructor. Cloning a tree preserves ids — that is what
//! lets transform records collected against one tree address a clone of it.
//!
//! # Formatting
//!
//! [`Formatting`] is the opaque source-layout metadata (leading and
//! trailing text) the parser attaches to each node. The engine never
//! interprets it; transforms preserve it unless they explicitly move it,
//! as receiver retargeting does when it carries the old receiver's prefix
//! onto the replacement identifier.

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

/// A stable, unique identifier for an AST node.
///
/// Transform records target nodes by id; the apply phase matches ids while
/// rebuilding, so identity survives the rebuild even though every node is
/// an owned value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

static NEXT_NODE_ID: AtomicU32 = AtomicU32::new(0);

impl NodeId {
    /// Mint a fresh id from the process-global counter.
    pub fn next() -> NodeId {
        NodeId(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw u32 value.
    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

/// Opaque source-layout metadata carried by every node.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Formatting {
    /// Text (whitespace, comments) preceding the node.
    pub prefix: String,
    /// Text following the node.
    pub suffix: String,
}

impl Formatting {
    /// No surrounding text.
    pub fn empty() -> Formatting {
        Formatting::default()
    }
}

/// Uniform access to the fields every node carries.
///
/// Implemented for every node kind (and for the `Expression`, `Statement`
/// and `NameTree` sums by delegation), so generic code like the transform
/// apply phase can read identity without matching on kind.
pub trait AstNode {
    fn id(&self) -> NodeId;
    fn formatting(&self) -> &Formatting;
}
