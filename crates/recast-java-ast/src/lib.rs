// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Java AST, traversal engine, and rewrite engine.
//!
//! This crate is the tree half of recast: an immutable AST node model for
//! a Java compilation unit, a generic visitor that walks it while reducing
//! per-node results through a pluggable strategy, and a rewrite engine
//! that turns declarative "change this node" records into a new tree.
//!
//! The parser and attribution front end are external: trees arrive here
//! fully formed, with resolved [`recast_core`] types already attached to
//! type-bearing nodes. The engine never mutates a tree — analysis passes
//! are read-only, and rewrite passes produce a new tree that moves every
//! unchanged subtree through.
//!
//! # Analysis
//!
//! ```
//! use recast_java_ast::nodes::{Ident, TreeRef};
//! use recast_java_ast::visitor::{visit, AstVisitor, Cursor};
//!
//! struct CountIdents(usize);
//!
//! impl<'t> AstVisitor<'t> for CountIdents {
//!     type Output = ();
//!
//!     fn visit_ident(&mut self, _node: &'t Ident, _cursor: &Cursor<'t>) {
//!         self.0 += 1;
//!     }
//! }
//!
//! let ident = Ident::build("x", None, Default::default());
//! let mut counter = CountIdents(0);
//! visit(&mut counter, TreeRef::from(&ident), &Cursor::root());
//! assert_eq!(counter.0, 1);
//! ```
//!
//! # Rewriting
//!
//! A refactor visitor collects [`AstTransform`] records during one
//! traversal; [`transform::apply`] then rebuilds the tree bottom-up. See
//! [`transform::ChangeMethodTargetToVariable`] for a complete recipe.

pub mod nodes;
pub mod transform;
pub mod visitor;

pub use nodes::{AstNode, Formatting, NodeId, Tree, TreeRef};
pub use transform::{AstTransform, RefactorVisitor, TransformError};
pub use visitor::{AstVisitor, Cursor, Reduce};
