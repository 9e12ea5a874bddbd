// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Traversal entry points and per-kind walk functions.
//!
//! [`visit`] is the single descent step: extend the cursor, dispatch to
//! the node's specific hook, reduce with the `visit_expression` and
//! `visit_tree` catch-alls, return. The `walk_*` functions are the default
//! hook bodies: visit required children in source order, thread optional
//! children through the reduction, and call `visit_type_name` ahead of the
//! structural visit of every type-name position.
//!
//! Positions routed through `visit_type_name` before their structural
//! visit: annotation types, extends/implements clauses, throws clauses,
//! cast targets, instantiation targets, array element types,
//! parameterized-type names and arguments, wildcard bounds, multi-catch
//! alternatives, variable-declaration type expressions, explicit call type
//! arguments, and — when the resolved method is static and the receiver is
//! a plain name — method-invocation receivers.

use paste::paste;

use super::cursor::Cursor;
use super::traits::AstVisitor;
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
    ArrayAccess, ArrayType, Assign, AssignOp, Binary, Empty, Expression, FieldAccess, Ident,
    InstanceOf, Lambda, Literal, MemberReference, MethodInvocation, NameTree, NameTreeRef,
    NewArray, NewClass, ParameterizedType, Parentheses, Primitive, Ternary, TreeRef, TypeCast,
    Unary, UnparsedSource, Wildcard,
};

macro_rules! dispatch_tree {
    (
        $(
            $Variant:ident => $snake:ident
        ),* $(,)?
    ) => {
        paste! {
            fn dispatch<'t, V: AstVisitor<'t>>(
                v: &mut V,
                tree: TreeRef<'t>,
                cursor: &Cursor<'t>,
            ) -> V::Output {
                match tree {
                    $( TreeRef::$Variant(node) => v.[<visit_ $snake>](node, cursor), )*
                }
            }
        }
    };
}
for_each_tree_kind!(dispatch_tree);

/// Visit one node: descend the cursor, run the node's specific hook, and
/// reduce its result with the catch-all hooks.
pub fn visit<'t, V: AstVisitor<'t>>(v: &mut V, tree: TreeRef<'t>, cursor: &Cursor<'t>) -> V::Output {
    let cursor = cursor.descend(tree);
    let mut r = dispatch(v, tree, &cursor);
    if tree.is_expression() {
        let e = v.visit_expression(tree, &cursor);
        r = v.reduce(r, e);
    }
    let t = v.visit_tree(tree, &cursor);
    v.reduce(r, t)
}

/// Visit an optional node; absence yields the visitor's default.
pub fn visit_opt<'t, V: AstVisitor<'t>>(
    v: &mut V,
    tree: Option<TreeRef<'t>>,
    cursor: &Cursor<'t>,
) -> V::Output {
    match tree {
        Some(tree) => visit(v, tree, cursor),
        None => v.default_output(None),
    }
}

/// Visit a sequence of nodes in order, threading each result through the
/// reduction with the previous one. The first node's result seeds the
/// chain; an empty sequence yields the visitor's default.
pub fn visit_all<'t, V: AstVisitor<'t>>(
    v: &mut V,
    nodes: impl IntoIterator<Item = TreeRef<'t>>,
    cursor: &Cursor<'t>,
) -> V::Output {
    let mut iter = nodes.into_iter();
    let Some(first) = iter.next() else {
        return v.default_output(None);
    };
    let mut r = visit(v, first, cursor);
    for node in iter {
        let next = visit(v, node, cursor);
        r = v.reduce(r, next);
    }
    r
}

fn and_then<'t, V: AstVisitor<'t>>(
    v: &mut V,
    r: V::Output,
    tree: Option<TreeRef<'t>>,
    cursor: &Cursor<'t>,
) -> V::Output {
    match tree {
        Some(tree) => {
            let next = visit(v, tree, cursor);
            v.reduce(r, next)
        }
        None => r,
    }
}

fn and_then_all<'t, V: AstVisitor<'t>>(
    v: &mut V,
    r: V::Output,
    nodes: impl IntoIterator<Item = TreeRef<'t>>,
    cursor: &Cursor<'t>,
) -> V::Output {
    let mut r = r;
    for node in nodes {
        let next = visit(v, node, cursor);
        r = v.reduce(r, next);
    }
    r
}

fn type_name<'t, V: AstVisitor<'t>>(
    v: &mut V,
    r: V::Output,
    name: NameTreeRef<'t>,
    cursor: &Cursor<'t>,
) -> V::Output {
    let next = v.visit_type_name(name, cursor);
    v.reduce(r, next)
}

// ============================================================================
// Walks: declarations and module
// ============================================================================

pub fn walk_annotation<'t, V: AstVisitor<'t>>(
    v: &mut V,
    node: &'t Annotation,
    cursor: &Cursor<'t>,
) -> V::Output {
    let r = v.default_output(None);
    let r = type_name(v, r, NameTreeRef::from(&node.annotation_type), cursor);
    let r = and_then(v, r, Some(TreeRef::from(&node.annotation_type)), cursor);
    and_then_all(v, r, node.args.iter().map(TreeRef::from), cursor)
}

pub fn walk_class_decl<'t, V: AstVisitor<'t>>(
    v: &mut V,
    node: &'t ClassDecl,
    cursor: &Cursor<'t>,
) -> V::Output {
    let mut r = v.default_output(None);
    if let Some(extends) = &node.extends {
        r = type_name(v, r, NameTreeRef::from(extends), cursor);
    }
    for implemented in &node.implements {
        r = type_name(v, r, NameTreeRef::from(implemented), cursor);
    }
    let r = and_then_all(v, r, node.annotations.iter().map(TreeRef::from), cursor);
    let r = and_then(v, r, Some(TreeRef::from(&node.name)), cursor);
    let r = and_then_all(v, r, node.type_params.iter().map(TreeRef::from), cursor);
    let r = and_then(v, r, node.extends.as_ref().map(TreeRef::from), cursor);
    let r = and_then_all(v, r, node.implements.iter().map(TreeRef::from), cursor);
    and_then(v, r, Some(TreeRef::from(&node.body)), cursor)
}

pub fn walk_compilation_unit<'t, V: AstVisitor<'t>>(
    v: &mut V,
    node: &'t CompilationUnit,
    cursor: &Cursor<'t>,
) -> V::Output {
    let r = visit_all(v, node.imports.iter().map(TreeRef::from), cursor);
    let r = and_then(v, r, node.package_decl.as_ref().map(TreeRef::from), cursor);
    let r = and_then_all(v, r, node.classes.iter().map(TreeRef::from), cursor);
    let end = v.visit_end();
    v.reduce(r, end)
}

pub fn walk_import<'t, V: AstVisitor<'t>>(
    v: &mut V,
    node: &'t Import,
    cursor: &Cursor<'t>,
) -> V::Output {
    visit(v, TreeRef::from(&node.qualid), cursor)
}

pub fn walk_method_decl<'t, V: AstVisitor<'t>>(
    v: &mut V,
    node: &'t MethodDecl,
    cursor: &Cursor<'t>,
) -> V::Output {
    let mut r = v.default_output(None);
    if let Some(return_type) = &node.return_type_expr {
        r = type_name(v, r, NameTreeRef::from(return_type), cursor);
    }
    for thrown in &node.throws {
        r = type_name(v, r, NameTreeRef::from(thrown), cursor);
    }
    let r = and_then_all(v, r, node.annotations.iter().map(TreeRef::from), cursor);
    let r = and_then_all(v, r, node.type_params.iter().map(TreeRef::from), cursor);
    let r = and_then(v, r, node.return_type_expr.as_ref().map(TreeRef::from), cursor);
    let r = and_then(v, r, Some(TreeRef::from(&node.name)), cursor);
    let r = and_then_all(v, r, node.params.iter().map(TreeRef::from), cursor);
    let r = and_then_all(v, r, node.throws.iter().map(TreeRef::from), cursor);
    let r = and_then(v, r, node.body.as_ref().map(TreeRef::from), cursor);
    and_then(v, r, node.default_value.as_deref().map(TreeRef::from), cursor)
}

pub fn walk_multi_variable<'t, V: AstVisitor<'t>>(
    v: &mut V,
    node: &'t VariableDecls,
    cursor: &Cursor<'t>,
) -> V::Output {
    let mut r = v.default_output(None);
    // A multi-catch type expression is routed through its own alternatives
    // rather than as a single type name.
    if let Some(type_expr) = &node.type_expr {
        if !matches!(type_expr, NameTree::MultiCatch(_)) {
            r = type_name(v, r, NameTreeRef::from(type_expr), cursor);
        }
    }
    let r = and_then_all(v, r, node.annotations.iter().map(TreeRef::from), cursor);
    let r = and_then(v, r, node.type_expr.as_ref().map(TreeRef::from), cursor);
    and_then_all(v, r, node.vars.iter().map(TreeRef::from), cursor)
}

pub fn walk_variable<'t, V: AstVisitor<'t>>(
    v: &mut V,
    node: &'t NamedVar,
    cursor: &Cursor<'t>,
) -> V::Output {
    let r = visit(v, TreeRef::from(&node.name), cursor);
    and_then(v, r, node.initializer.as_deref().map(TreeRef::from), cursor)
}

pub fn walk_package<'t, V: AstVisitor<'t>>(
    v: &mut V,
    node: &'t PackageDecl,
    cursor: &Cursor<'t>,
) -> V::Output {
    visit(v, TreeRef::from(&*node.expr), cursor)
}

pub fn walk_type_parameter<'t, V: AstVisitor<'t>>(
    v: &mut V,
    node: &'t TypeParameter,
    cursor: &Cursor<'t>,
) -> V::Output {
    let mut r = v.default_output(None);
    for bound in &node.bounds {
        r = type_name(v, r, NameTreeRef::from(bound), cursor);
    }
    let r = and_then_all(v, r, node.annotations.iter().map(TreeRef::from), cursor);
    let r = and_then(v, r, Some(TreeRef::from(&node.name)), cursor);
    and_then_all(v, r, node.bounds.iter().map(TreeRef::from), cursor)
}

// ============================================================================
// Walks: statements
// ============================================================================

pub fn walk_assert<'t, V: AstVisitor<'t>>(
    v: &mut V,
    node: &'t Assert,
    cursor: &Cursor<'t>,
) -> V::Output {
    visit(v, TreeRef::from(&*node.condition), cursor)
}

pub fn walk_block<'t, V: AstVisitor<'t>>(
    v: &mut V,
    node: &'t Block,
    cursor: &Cursor<'t>,
) -> V::Output {
    visit_all(v, node.statements.iter().map(TreeRef::from), cursor)
}

pub fn walk_break_stmt<'t, V: AstVisitor<'t>>(
    v: &mut V,
    node: &'t Break,
    cursor: &Cursor<'t>,
) -> V::Output {
    visit_opt(v, node.label.as_ref().map(TreeRef::from), cursor)
}

pub fn walk_case<'t, V: AstVisitor<'t>>(
    v: &mut V,
    node: &'t Case,
    cursor: &Cursor<'t>,
) -> V::Output {
    let r = visit_opt(v, node.pattern.as_deref().map(TreeRef::from), cursor);
    and_then_all(v, r, node.statements.iter().map(TreeRef::from), cursor)
}

pub fn walk_catch<'t, V: AstVisitor<'t>>(
    v: &mut V,
    node: &'t Catch,
    cursor: &Cursor<'t>,
) -> V::Output {
    let r = visit(v, TreeRef::from(&node.param), cursor);
    and_then(v, r, Some(TreeRef::from(&node.body)), cursor)
}

pub fn walk_continue_stmt<'t, V: AstVisitor<'t>>(
    v: &mut V,
    node: &'t Continue,
    cursor: &Cursor<'t>,
) -> V::Output {
    visit_opt(v, node.label.as_ref().map(TreeRef::from), cursor)
}

pub fn walk_do_while_loop<'t, V: AstVisitor<'t>>(
    v: &mut V,
    node: &'t DoWhileLoop,
    cursor: &Cursor<'t>,
) -> V::Output {
    let r = visit(v, TreeRef::from(&*node.condition), cursor);
    and_then(v, r, Some(TreeRef::from(&*node.body)), cursor)
}

pub fn walk_enum_value<'t, V: AstVisitor<'t>>(
    v: &mut V,
    node: &'t EnumValue,
    cursor: &Cursor<'t>,
) -> V::Output {
    let r = visit(v, TreeRef::from(&node.name), cursor);
    match &node.initializer_args {
        Some(args) => and_then_all(v, r, args.iter().map(TreeRef::from), cursor),
        None => r,
    }
}

pub fn walk_enum_value_set<'t, V: AstVisitor<'t>>(
    v: &mut V,
    node: &'t EnumValueSet,
    cursor: &Cursor<'t>,
) -> V::Output {
    visit_all(v, node.enums.iter().map(TreeRef::from), cursor)
}

pub fn walk_for_each_loop<'t, V: AstVisitor<'t>>(
    v: &mut V,
    node: &'t ForEachLoop,
    cursor: &Cursor<'t>,
) -> V::Output {
    let r = visit(v, TreeRef::from(&node.variable), cursor);
    let r = and_then(v, r, Some(TreeRef::from(&*node.iterable)), cursor);
    and_then(v, r, Some(TreeRef::from(&*node.body)), cursor)
}

pub fn walk_for_loop<'t, V: AstVisitor<'t>>(
    v: &mut V,
    node: &'t ForLoop,
    cursor: &Cursor<'t>,
) -> V::Output {
    let r = visit_all(v, node.init.iter().map(TreeRef::from), cursor);
    let r = and_then(v, r, node.condition.as_deref().map(TreeRef::from), cursor);
    let r = and_then_all(v, r, node.update.iter().map(TreeRef::from), cursor);
    and_then(v, r, Some(TreeRef::from(&*node.body)), cursor)
}

pub fn walk_if_stmt<'t, V: AstVisitor<'t>>(
    v: &mut V,
    node: &'t If,
    cursor: &Cursor<'t>,
) -> V::Output {
    let r = visit(v, TreeRef::from(&*node.condition), cursor);
    let r = and_then(v, r, Some(TreeRef::from(&*node.then_part)), cursor);
    and_then(v, r, node.else_part.as_deref().map(TreeRef::from), cursor)
}

pub fn walk_label<'t, V: AstVisitor<'t>>(
    v: &mut V,
    node: &'t Label,
    cursor: &Cursor<'t>,
) -> V::Output {
    let r = visit(v, TreeRef::from(&node.label), cursor);
    and_then(v, r, Some(TreeRef::from(&*node.statement)), cursor)
}

pub fn walk_multi_catch<'t, V: AstVisitor<'t>>(
    v: &mut V,
    node: &'t MultiCatch,
    cursor: &Cursor<'t>,
) -> V::Output {
    let mut r = v.default_output(None);
    for alternative in &node.alternatives {
        r = type_name(v, r, NameTreeRef::from(alternative), cursor);
    }
    and_then_all(v, r, node.alternatives.iter().map(TreeRef::from), cursor)
}

pub fn walk_return_stmt<'t, V: AstVisitor<'t>>(
    v: &mut V,
    node: &'t Return,
    cursor: &Cursor<'t>,
) -> V::Output {
    visit_opt(v, node.expr.as_deref().map(TreeRef::from), cursor)
}

pub fn walk_switch<'t, V: AstVisitor<'t>>(
    v: &mut V,
    node: &'t Switch,
    cursor: &Cursor<'t>,
) -> V::Output {
    let r = visit(v, TreeRef::from(&*node.selector), cursor);
    and_then_all(v, r, node.cases.iter().map(TreeRef::from), cursor)
}

pub fn walk_synchronized<'t, V: AstVisitor<'t>>(
    v: &mut V,
    node: &'t Synchronized,
    cursor: &Cursor<'t>,
) -> V::Output {
    let r = visit(v, TreeRef::from(&*node.lock), cursor);
    and_then(v, r, Some(TreeRef::from(&node.body)), cursor)
}

pub fn walk_throw<'t, V: AstVisitor<'t>>(
    v: &mut V,
    node: &'t Throw,
    cursor: &Cursor<'t>,
) -> V::Output {
    visit(v, TreeRef::from(&*node.exception), cursor)
}

pub fn walk_try_stmt<'t, V: AstVisitor<'t>>(
    v: &mut V,
    node: &'t Try,
    cursor: &Cursor<'t>,
) -> V::Output {
    let r = visit_all(v, node.resources.iter().map(TreeRef::from), cursor);
    let r = and_then(v, r, Some(TreeRef::from(&node.body)), cursor);
    let r = and_then_all(v, r, node.catches.iter().map(TreeRef::from), cursor);
    and_then(v, r, node.finally.as_ref().map(TreeRef::from), cursor)
}

pub fn walk_while_loop<'t, V: AstVisitor<'t>>(
    v: &mut V,
    node: &'t WhileLoop,
    cursor: &Cursor<'t>,
) -> V::Output {
    let r = visit(v, TreeRef::from(&*node.condition), cursor);
    and_then(v, r, Some(TreeRef::from(&*node.body)), cursor)
}

// ============================================================================
// Walks: expressions
// ============================================================================

pub fn walk_array_access<'t, V: AstVisitor<'t>>(
    v: &mut V,
    node: &'t ArrayAccess,
    cursor: &Cursor<'t>,
) -> V::Output {
    let r = visit(v, TreeRef::from(&*node.indexed), cursor);
    and_then(v, r, Some(TreeRef::from(&*node.index)), cursor)
}

pub fn walk_array_type<'t, V: AstVisitor<'t>>(
    v: &mut V,
    node: &'t ArrayType,
    cursor: &Cursor<'t>,
) -> V::Output {
    let r = v.default_output(None);
    let r = type_name(v, r, NameTreeRef::from(&*node.element_type), cursor);
    and_then(v, r, Some(TreeRef::from(&*node.element_type)), cursor)
}

pub fn walk_assign<'t, V: AstVisitor<'t>>(
    v: &mut V,
    node: &'t Assign,
    cursor: &Cursor<'t>,
) -> V::Output {
    let r = visit(v, TreeRef::from(&*node.variable), cursor);
    and_then(v, r, Some(TreeRef::from(&*node.assignment)), cursor)
}

pub fn walk_assign_op<'t, V: AstVisitor<'t>>(
    v: &mut V,
    node: &'t AssignOp,
    cursor: &Cursor<'t>,
) -> V::Output {
    let r = visit(v, TreeRef::from(&*node.variable), cursor);
    and_then(v, r, Some(TreeRef::from(&*node.assignment)), cursor)
}

pub fn walk_binary<'t, V: AstVisitor<'t>>(
    v: &mut V,
    node: &'t Binary,
    cursor: &Cursor<'t>,
) -> V::Output {
    let r = visit(v, TreeRef::from(&*node.left), cursor);
    and_then(v, r, Some(TreeRef::from(&*node.right)), cursor)
}

pub fn walk_empty<'t, V: AstVisitor<'t>>(
    v: &mut V,
    node: &'t Empty,
    _cursor: &Cursor<'t>,
) -> V::Output {
    v.default_output(Some(TreeRef::from(node)))
}

pub fn walk_field_access<'t, V: AstVisitor<'t>>(
    v: &mut V,
    node: &'t FieldAccess,
    cursor: &Cursor<'t>,
) -> V::Output {
    let r = visit(v, TreeRef::from(&*node.target), cursor);
    and_then(v, r, Some(TreeRef::from(&node.name)), cursor)
}

pub fn walk_ident<'t, V: AstVisitor<'t>>(
    v: &mut V,
    node: &'t Ident,
    _cursor: &Cursor<'t>,
) -> V::Output {
    v.default_output(Some(TreeRef::from(node)))
}

pub fn walk_instance_of<'t, V: AstVisitor<'t>>(
    v: &mut V,
    node: &'t InstanceOf,
    cursor: &Cursor<'t>,
) -> V::Output {
    let r = visit(v, TreeRef::from(&*node.expr), cursor);
    and_then(v, r, Some(TreeRef::from(&*node.clazz)), cursor)
}

pub fn walk_lambda<'t, V: AstVisitor<'t>>(
    v: &mut V,
    node: &'t Lambda,
    cursor: &Cursor<'t>,
) -> V::Output {
    let r = visit_all(v, node.params.iter().map(TreeRef::from), cursor);
    and_then(v, r, Some(TreeRef::from(&*node.body)), cursor)
}

pub fn walk_literal<'t, V: AstVisitor<'t>>(
    v: &mut V,
    node: &'t Literal,
    _cursor: &Cursor<'t>,
) -> V::Output {
    v.default_output(Some(TreeRef::from(node)))
}

pub fn walk_member_reference<'t, V: AstVisitor<'t>>(
    v: &mut V,
    node: &'t MemberReference,
    cursor: &Cursor<'t>,
) -> V::Output {
    let r = visit(v, TreeRef::from(&*node.containing), cursor);
    and_then(v, r, Some(TreeRef::from(&node.reference)), cursor)
}

pub fn walk_method_invocation<'t, V: AstVisitor<'t>>(
    v: &mut V,
    node: &'t MethodInvocation,
    cursor: &Cursor<'t>,
) -> V::Output {
    let mut r = v.default_output(None);
    // A name-shaped receiver of a static call names a class, not an
    // instance; route it through the type-name hook before the structural
    // visit sees it as an ordinary expression.
    if node.is_static_call() {
        if let Some(name) = node.select.as_deref().and_then(Expression::as_name_tree) {
            r = type_name(v, r, name, cursor);
        }
    }
    for type_param in &node.type_params {
        r = type_name(v, r, NameTreeRef::from(type_param), cursor);
    }
    let r = and_then(v, r, node.select.as_deref().map(TreeRef::from), cursor);
    let r = and_then_all(v, r, node.type_params.iter().map(TreeRef::from), cursor);
    let r = and_then(v, r, Some(TreeRef::from(&node.name)), cursor);
    and_then_all(v, r, node.args.iter().map(TreeRef::from), cursor)
}

pub fn walk_new_array<'t, V: AstVisitor<'t>>(
    v: &mut V,
    node: &'t NewArray,
    cursor: &Cursor<'t>,
) -> V::Output {
    let mut r = v.default_output(None);
    if let Some(type_expr) = node.type_expr.as_deref() {
        r = type_name(v, r, NameTreeRef::from(type_expr), cursor);
    }
    let r = and_then(v, r, node.type_expr.as_deref().map(TreeRef::from), cursor);
    let r = and_then_all(v, r, node.dimensions.iter().map(TreeRef::from), cursor);
    match &node.initializer {
        Some(elements) => and_then_all(v, r, elements.iter().map(TreeRef::from), cursor),
        None => r,
    }
}

pub fn walk_new_class<'t, V: AstVisitor<'t>>(
    v: &mut V,
    node: &'t NewClass,
    cursor: &Cursor<'t>,
) -> V::Output {
    let r = v.default_output(None);
    let r = type_name(v, r, NameTreeRef::from(&*node.clazz), cursor);
    let r = and_then(v, r, Some(TreeRef::from(&*node.clazz)), cursor);
    let r = and_then_all(v, r, node.args.iter().map(TreeRef::from), cursor);
    and_then(v, r, node.body.as_ref().map(TreeRef::from), cursor)
}

pub fn walk_parameterized_type<'t, V: AstVisitor<'t>>(
    v: &mut V,
    node: &'t ParameterizedType,
    cursor: &Cursor<'t>,
) -> V::Output {
    let mut r = v.default_output(None);
    r = type_name(v, r, NameTreeRef::from(&*node.clazz), cursor);
    for arg in &node.type_arguments {
        r = type_name(v, r, NameTreeRef::from(arg), cursor);
    }
    let r = and_then(v, r, Some(TreeRef::from(&*node.clazz)), cursor);
    and_then_all(v, r, node.type_arguments.iter().map(TreeRef::from), cursor)
}

pub fn walk_parentheses<'t, V: AstVisitor<'t>>(
    v: &mut V,
    node: &'t Parentheses,
    cursor: &Cursor<'t>,
) -> V::Output {
    visit(v, TreeRef::from(&*node.tree), cursor)
}

pub fn walk_primitive<'t, V: AstVisitor<'t>>(
    v: &mut V,
    node: &'t Primitive,
    _cursor: &Cursor<'t>,
) -> V::Output {
    v.default_output(Some(TreeRef::from(node)))
}

pub fn walk_ternary<'t, V: AstVisitor<'t>>(
    v: &mut V,
    node: &'t Ternary,
    cursor: &Cursor<'t>,
) -> V::Output {
    let r = visit(v, TreeRef::from(&*node.condition), cursor);
    let r = and_then(v, r, Some(TreeRef::from(&*node.true_part)), cursor);
    and_then(v, r, Some(TreeRef::from(&*node.false_part)), cursor)
}

pub fn walk_type_cast<'t, V: AstVisitor<'t>>(
    v: &mut V,
    node: &'t TypeCast,
    cursor: &Cursor<'t>,
) -> V::Output {
    let r = v.default_output(None);
    let r = type_name(v, r, NameTreeRef::from(&*node.clazz), cursor);
    let r = and_then(v, r, Some(TreeRef::from(&*node.clazz)), cursor);
    and_then(v, r, Some(TreeRef::from(&*node.expr)), cursor)
}

pub fn walk_unary<'t, V: AstVisitor<'t>>(
    v: &mut V,
    node: &'t Unary,
    cursor: &Cursor<'t>,
) -> V::Output {
    visit(v, TreeRef::from(&*node.expr), cursor)
}

pub fn walk_unparsed_source<'t, V: AstVisitor<'t>>(
    v: &mut V,
    _node: &'t UnparsedSource,
    _cursor: &Cursor<'t>,
) -> V::Output {
    v.default_output(None)
}

pub fn walk_wildcard<'t, V: AstVisitor<'t>>(
    v: &mut V,
    node: &'t Wildcard,
    cursor: &Cursor<'t>,
) -> V::Output {
    let mut r = v.default_output(None);
    if let Some(bounded) = node.bounded_type.as_deref() {
        r = type_name(v, r, NameTreeRef::from(bounded), cursor);
    }
    and_then(v, r, node.bounded_type.as_deref().map(TreeRef::from), cursor)
}
