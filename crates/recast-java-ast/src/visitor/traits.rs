// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! The visitor trait and its result-reduction contract.
//!
//! A visitor is parameterized by a result type `Output` that knows how to
//! combine itself through the [`Reduce`] strategy trait: boolean results
//! OR together ("does this hold anywhere in the subtree"), sequence
//! results concatenate in traversal order ("collect every match"), and
//! optional results prefer the first present value. The reduction policy
//! is part of the output type, not inferred from it at runtime; a visitor
//! can still override [`AstVisitor::reduce`] for bespoke aggregation.
//!
//! Every node kind gets one `visit_*` hook whose default implementation is
//! the structural walk of its children (see the `dispatch` module), so a
//! concrete visitor overrides only the hooks relevant to its query.

use paste::paste;

use super::cursor::Cursor;
use super::dispatch::{
    walk_annotation, walk_array_access, walk_array_type, walk_assert, walk_assign, walk_assign_op,
    walk_binary, walk_block, walk_break_stmt, walk_case, walk_catch, walk_class_decl,
    walk_compilation_unit, walk_continue_stmt, walk_do_while_loop, walk_empty, walk_enum_value,
    walk_enum_value_set, walk_field_access, walk_for_each_loop, walk_for_loop, walk_ident,
    walk_if_stmt, walk_import, walk_instance_of, walk_label, walk_lambda, walk_literal,
    walk_member_reference, walk_method_decl, walk_method_invocation, walk_multi_catch,
    walk_multi_variable, walk_new_array, walk_new_class, walk_package, walk_parameterized_type,
    walk_parentheses, walk_primitive, walk_return_stmt, walk_switch, walk_synchronized,
    walk_ternary, walk_throw, walk_try_stmt, walk_type_cast, walk_type_parameter, walk_unary,
    walk_unparsed_source, walk_variable, walk_while_loop, walk_wildcard,
};
use crate::nodes::{
    for_each_tree_kind,
    // Declarations and module
    Annotation, ClassDecl, CompilationUnit, Import, MethodDecl, NamedVar, PackageDecl,
    TypeParameter, VariableDecls,
    // Statements
    Assert, Block, Break, Case, Catch, Continue, DoWhileLoop, EnumValue, EnumValueSet,
    ForEachLoop, ForLoop, If, Label, MultiCatch, Return, Switch, Synchronized, Throw, Try,
    WhileLoop,
    // Expressions
    ArrayAccess, ArrayType, Assign, AssignOp, Binary, Empty, FieldAccess, Ident, InstanceOf,
    Lambda, Literal, MemberReference, MethodInvocation, NameTreeRef, NewArray, NewClass,
    ParameterizedType, Parentheses, Primitive, Ternary, TreeRef, TypeCast, Unary, UnparsedSource,
    Wildcard,
};

/// Reduction strategy for visitor results.
///
/// `unit()` is the value for an absent node or empty sequence, and must be
/// an identity for `reduce`.
pub trait Reduce {
    fn unit() -> Self;
    fn reduce(self, other: Self) -> Self;
}

/// Logical OR: "does the property hold anywhere".
impl Reduce for bool {
    fn unit() -> bool {
        false
    }

    fn reduce(self, other: bool) -> bool {
        self || other
    }
}

/// Concatenation in traversal order: "collect every match".
impl<T> Reduce for Vec<T> {
    fn unit() -> Vec<T> {
        Vec::new()
    }

    fn reduce(mut self, mut other: Vec<T>) -> Vec<T> {
        self.append(&mut other);
        self
    }
}

/// First present value wins: "resolve a single answer".
impl<T> Reduce for Option<T> {
    fn unit() -> Option<T> {
        None
    }

    fn reduce(self, other: Option<T>) -> Option<T> {
        self.or(other)
    }
}

/// Side-effect-only visitors that keep their findings in their own state.
impl Reduce for () {
    fn unit() {}

    fn reduce(self, _other: ()) {}
}

macro_rules! visitor_hooks {
    (
        $(
            $Variant:ident => $snake:ident
        ),* $(,)?
    ) => {
        paste! {
            $(
                #[doc = concat!("Visit a [`", stringify!($Variant), "`] node.")]
                #[doc = ""]
                #[doc = "Defaults to the structural walk of the node's children."]
                #[allow(unused_variables)]
                fn [<visit_ $snake>](&mut self, node: &'t $Variant, cursor: &Cursor<'t>) -> Self::Output {
                    [<walk_ $snake>](self, node, cursor)
                }
            )*
        }
    };
}

/// A generic, overridable visitor over the AST.
///
/// Traversal is synchronous, single-threaded and depth-first; children are
/// visited in source order. One visitor instance owns one traversal at a
/// time — run one visitor per concurrent pass.
///
/// # Example
///
/// ```
/// use recast_java_ast::nodes::{Ident, TreeRef};
/// use recast_java_ast::visitor::{visit, AstVisitor, Cursor};
///
/// struct NameCollector;
///
/// impl<'t> AstVisitor<'t> for NameCollector {
///     type Output = Vec<String>;
///
///     fn visit_ident(&mut self, node: &'t Ident, _cursor: &Cursor<'t>) -> Vec<String> {
///         vec![node.name.clone()]
///     }
/// }
///
/// let ident = Ident::build("x", None, Default::default());
/// let names = visit(&mut NameCollector, TreeRef::from(&ident), &Cursor::root());
/// assert_eq!(names, vec!["x".to_string()]);
/// ```
pub trait AstVisitor<'t>: Sized {
    type Output: Reduce;

    /// The result for an absent node. `tree` is the node a skipped
    /// position belongs to, when there is one, so the default can depend
    /// on it.
    #[allow(unused_variables)]
    fn default_output(&mut self, tree: Option<TreeRef<'t>>) -> Self::Output {
        Self::Output::unit()
    }

    /// Combine two intermediate results. Delegates to [`Reduce`]; override
    /// for visitor-specific aggregation.
    fn reduce(&mut self, r1: Self::Output, r2: Self::Output) -> Self::Output {
        r1.reduce(r2)
    }

    /// Catch-all invoked for every node, reduced with the node's specific
    /// hook result.
    #[allow(unused_variables)]
    fn visit_tree(&mut self, tree: TreeRef<'t>, cursor: &Cursor<'t>) -> Self::Output {
        self.default_output(Some(tree))
    }

    /// Catch-all invoked for every expression node, reduced with the
    /// node's specific hook result.
    #[allow(unused_variables)]
    fn visit_expression(&mut self, expr: TreeRef<'t>, cursor: &Cursor<'t>) -> Self::Output {
        self.default_output(None)
    }

    /// Invoked for every node standing in type-name position, before that
    /// position's structural visit. Identifiers naming variables never
    /// come through here; identifiers naming types always do.
    #[allow(unused_variables)]
    fn visit_type_name(&mut self, name: NameTreeRef<'t>, cursor: &Cursor<'t>) -> Self::Output {
        self.default_output(None)
    }

    /// Invoked at the end of a compilation unit's walk.
    fn visit_end(&mut self) -> Self::Output {
        self.default_output(None)
    }

    for_each_tree_kind!(visitor_hooks);
}
