// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! The rewrite engine.
//!
//! A refactor visitor is a traversal whose result type is a list of
//! pending [`AstTransform`] records; its reduction is the inherited list
//! concatenation. A rewrite pass runs in two phases: [`collect`] gathers
//! every record produced anywhere in the tree, then [`apply`] rebuilds the
//! tree bottom-up, substituting each targeted node's replacement and
//! moving every untouched subtree through unchanged. Collection order is
//! application order for records that target the same node.
//!
//! Two-phase structure is required, not stylistic: records can target
//! nodes anywhere in the tree in any order, and only a bottom-up rebuild
//! keeps node identities valid while substituting.
//!
//! Misusing the extension contract — a mutation built for one node kind
//! reaching a node of another, or a record targeting a node that is not in
//! the tree — is a programmer error and surfaces as a [`TransformError`]
//! instead of a silently wrong tree.

mod apply;
mod retarget;

use std::fmt;

use thiserror::Error;

use crate::nodes::{AstNode, CompilationUnit, NodeId, Tree, TreeRef};
use crate::visitor::{visit, AstVisitor, Cursor};

pub use apply::apply;
pub use retarget::ChangeMethodTargetToVariable;

/// Error raised by the apply phase on misuse of the transform contract.
#[derive(Debug, Error)]
pub enum TransformError {
    /// A mutation reached a node of a kind it was not built for.
    #[error("transform '{rule}' reached {id} of kind {found}, which it was not built for")]
    TargetKindMismatch {
        rule: String,
        id: NodeId,
        found: &'static str,
    },

    /// A record targeted a node that does not exist in the tree.
    #[error("transform '{rule}' targeted {id}, which is not in the tree")]
    MissingTarget { rule: String, id: NodeId },
}

/// A pending rewrite: the identity of a targeted node paired with a pure
/// function from its current value to its replacement.
///
/// The mutation never runs during collection; it runs once, against the
/// node's bottom-up-rebuilt value, during the apply phase.
pub struct AstTransform {
    rule: String,
    target: NodeId,
    #[allow(clippy::type_complexity)]
    mutation: Box<dyn Fn(Tree) -> Result<Tree, Tree>>,
}

impl AstTransform {
    /// A record targeting `target` with a typed mutation.
    ///
    /// The mutation is wrapped so that reaching a node of a different kind
    /// yields [`TransformError::TargetKindMismatch`] at apply time.
    pub fn new<T, F>(rule: impl Into<String>, target: NodeId, f: F) -> AstTransform
    where
        T: Into<Tree> + TryFrom<Tree, Error = Tree>,
        F: Fn(T) -> T + 'static,
    {
        AstTransform {
            rule: rule.into(),
            target,
            mutation: Box::new(move |tree| match T::try_from(tree) {
                Ok(node) => Ok(f(node).into()),
                Err(tree) => Err(tree),
            }),
        }
    }

    /// A record whose mutation works on the untyped tree.
    ///
    /// For rewrites that replace a node with one of a different kind —
    /// legal wherever the position's sum admits the new kind (an
    /// expression for an expression position, and so on).
    pub fn new_untyped<F>(rule: impl Into<String>, target: NodeId, f: F) -> AstTransform
    where
        F: Fn(Tree) -> Tree + 'static,
    {
        AstTransform {
            rule: rule.into(),
            target,
            mutation: Box::new(move |tree| Ok(f(tree))),
        }
    }

    /// Name of the rule that produced this record.
    pub fn rule(&self) -> &str {
        &self.rule
    }

    /// Identity of the targeted node.
    pub fn target(&self) -> NodeId {
        self.target
    }
}

impl fmt::Debug for AstTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AstTransform")
            .field("rule", &self.rule)
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

/// A traversal that emits transform records instead of an analytic value.
///
/// Hooks return zero or more records per node; the inherited sequence
/// reduction concatenates them in traversal order. The [`transform`]
/// convenience builds a single-record result carrying the visitor's rule
/// name.
///
/// [`transform`]: RefactorVisitor::transform
pub trait RefactorVisitor<'t>: AstVisitor<'t, Output = Vec<AstTransform>> {
    /// Name recorded on every transform this visitor emits.
    fn rule_name(&self) -> &'static str;

    /// One record targeting `node`, preserving every field the mutation
    /// does not change.
    fn transform<T, F>(&self, node: &T, f: F) -> Vec<AstTransform>
    where
        T: AstNode + Into<Tree> + TryFrom<Tree, Error = Tree>,
        F: Fn(T) -> T + 'static,
    {
        vec![AstTransform::new(self.rule_name(), node.id(), f)]
    }
}

/// Phase one: run the visitor over the whole unit and gather its records.
pub fn collect<'t, V: RefactorVisitor<'t>>(
    visitor: &mut V,
    unit: &'t CompilationUnit,
) -> Vec<AstTransform> {
    visit(visitor, TreeRef::from(unit), &Cursor::root())
}

/// Collect against `unit`, then apply to a clone of it.
///
/// Node ids survive cloning, so records collected against the original
/// address the clone; the input tree is left untouched.
pub fn run<'t, V: RefactorVisitor<'t>>(
    visitor: &mut V,
    unit: &'t CompilationUnit,
) -> Result<CompilationUnit, TransformError> {
    let transforms = collect(visitor, unit);
    apply(unit.clone(), transforms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::{Formatting, Ident};
    use crate::visitor::Cursor;

    /// Renames every identifier with a given name.
    struct RenameIdent {
        from: &'static str,
        to: &'static str,
    }

    impl<'t> AstVisitor<'t> for RenameIdent {
        type Output = Vec<AstTransform>;

        fn visit_ident(&mut self, node: &'t Ident, _cursor: &Cursor<'t>) -> Vec<AstTransform> {
            if node.name != self.from {
                return Vec::new();
            }
            let to = self.to;
            self.transform(node, move |mut ident: Ident| {
                ident.name = to.to_string();
                ident
            })
        }
    }

    impl<'t> RefactorVisitor<'t> for RenameIdent {
        fn rule_name(&self) -> &'static str {
            "rename-ident"
        }
    }

    #[test]
    fn records_carry_rule_and_target() {
        let ident = Ident::build("x", None, Formatting::empty());
        let visitor = RenameIdent { from: "x", to: "y" };
        let records = visitor.transform(&ident, |i: Ident| i);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].rule(), "rename-ident");
        assert_eq!(records[0].target(), ident.id);
    }

    #[test]
    fn debug_format_omits_the_mutation() {
        let ident = Ident::build("x", None, Formatting::empty());
        let record = AstTransform::new("r", ident.id, |i: Ident| i);
        let dbg = format!("{record:?}");
        assert!(dbg.contains("rule: \"r\""));
    }
}
