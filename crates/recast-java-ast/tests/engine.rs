// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! End-to-end engine tests: one attributed compilation unit driven through
//! analysis visitors and a rewrite pass.
//!
//! The unit stands in for the parsed-and-attributed form of:
//!
//! ```java
//! package com.acme;
//!
//! public class A {
//!     Integer n = obj.foo(0);
//! }
//! ```

use std::sync::Arc;

use recast_core::{ClassTy, Flags, MethodTy, Tag, Ty, TypeCache, VarTy};
use recast_java_ast::nodes::{
    AstNode, Block, ClassDecl, ClassKind, CompilationUnit, Expression, FieldAccess, Formatting,
    Ident, Literal, LiteralValue, MethodInvocation, NameTree, NamedVar, NodeId, PackageDecl,
    Statement, TreeRef, VariableDecls,
};
use recast_java_ast::transform::{apply, run, ChangeMethodTargetToVariable};
use recast_java_ast::visitor::{visit, visit_all, AstVisitor, Cursor, Field, FindFields};

struct Attributed {
    unit: CompilationUnit,
    cache: TypeCache,
}

fn fmt() -> Formatting {
    Formatting::empty()
}

fn ident(name: &str) -> Ident {
    Ident::build(name, None, fmt())
}

/// Build the attributed unit the way a front end would hand it over.
fn attributed_unit() -> Attributed {
    let mut cache = TypeCache::new();
    let integer = ClassTy::build(&mut cache, "java.lang.Integer", Vec::new(), None);
    let obj_class = ClassTy::build(&mut cache, "com.acme.Obj", Vec::new(), None);
    let a_class = ClassTy::build(
        &mut cache,
        "com.acme.A",
        vec![VarTy::new(
            "n",
            Some(Ty::Class(integer.clone())),
            Flags::empty(),
        )],
        None,
    );

    let invocation = MethodInvocation {
        id: NodeId::next(),
        select: Some(Box::new(Expression::Ident(Ident::build(
            "obj",
            Some(Ty::Class(obj_class.clone())),
            Formatting {
                prefix: " ".to_string(),
                suffix: String::new(),
            },
        )))),
        type_params: Vec::new(),
        name: ident("foo"),
        args: vec![Expression::Literal(Literal {
            id: NodeId::next(),
            value: LiteralValue::Int(0),
            ty: Some(Ty::Primitive(Tag::Int)),
            fmt: fmt(),
        })],
        ty: Some(MethodTy {
            declaring_type: Some(obj_class),
            return_type: Some(Ty::Class(integer)),
            param_types: vec![Ty::Primitive(Tag::Int)],
            flags: Flags::PUBLIC,
        }),
        fmt: fmt(),
    };

    let field = VariableDecls {
        id: NodeId::next(),
        annotations: Vec::new(),
        modifiers: Flags::empty(),
        type_expr: Some(NameTree::Ident(ident("Integer"))),
        vars: vec![NamedVar {
            id: NodeId::next(),
            name: ident("n"),
            initializer: Some(Box::new(Expression::MethodInvocation(invocation))),
            ty: None,
            fmt: fmt(),
        }],
        fmt: fmt(),
    };

    let class = ClassDecl {
        id: NodeId::next(),
        annotations: Vec::new(),
        modifiers: Flags::PUBLIC,
        kind: ClassKind::Class,
        name: ident("A"),
        type_params: Vec::new(),
        extends: None,
        implements: Vec::new(),
        body: Block {
            id: NodeId::next(),
            statements: vec![Statement::VariableDecls(field)],
            fmt: fmt(),
        },
        ty: Some(Ty::Class(a_class)),
        fmt: fmt(),
    };

    let package = PackageDecl {
        id: NodeId::next(),
        expr: Box::new(Expression::FieldAccess(FieldAccess {
            id: NodeId::next(),
            target: Box::new(Expression::Ident(ident("com"))),
            name: ident("acme"),
            ty: None,
            fmt: fmt(),
        })),
        fmt: fmt(),
    };

    let unit = CompilationUnit {
        id: NodeId::next(),
        source_path: Some("com/acme/A.java".to_string()),
        package_decl: Some(package),
        imports: Vec::new(),
        classes: vec![class],
        fmt: fmt(),
    };

    Attributed { unit, cache }
}

fn first_invocation(unit: &CompilationUnit) -> &MethodInvocation {
    match unit.classes[0].fields()[0].vars[0].initializer.as_deref() {
        Some(Expression::MethodInvocation(m)) => m,
        other => panic!("expected invocation, got {other:?}"),
    }
}

/// Counts identifier nodes through internal state.
#[derive(Default)]
struct CountIdents {
    count: usize,
}

impl<'t> AstVisitor<'t> for CountIdents {
    type Output = ();

    fn visit_ident(&mut self, _node: &'t Ident, _cursor: &Cursor<'t>) {
        self.count += 1;
    }
}

#[test]
fn ident_count_agrees_between_entry_points() {
    let Attributed { unit, .. } = attributed_unit();

    let mut whole = CountIdents::default();
    visit(&mut whole, TreeRef::from(&unit), &Cursor::root());

    // The same nodes, entered as a sequence of top-level children.
    let mut parts = CountIdents::default();
    let children: Vec<TreeRef<'_>> = unit
        .imports
        .iter()
        .map(TreeRef::from)
        .chain(unit.package_decl.as_ref().map(TreeRef::from))
        .chain(unit.classes.iter().map(TreeRef::from))
        .collect();
    visit_all(&mut parts, children, &Cursor::root());

    assert_eq!(whole.count, parts.count);
    // com, acme, A, Integer, n, obj, foo: seven identifiers.
    assert_eq!(whole.count, 7);
}

#[test]
fn boolean_visitor_is_or_over_the_whole_tree() {
    struct CallsMethod<'a> {
        needle: &'a str,
    }

    impl<'a, 't> AstVisitor<'t> for CallsMethod<'a> {
        type Output = bool;

        fn visit_method_invocation(
            &mut self,
            node: &'t MethodInvocation,
            cursor: &Cursor<'t>,
        ) -> bool {
            let below = recast_java_ast::visitor::walk_method_invocation(self, node, cursor);
            node.name.name == self.needle || below
        }
    }

    let Attributed { unit, .. } = attributed_unit();
    let tree = TreeRef::from(&unit);
    assert!(visit(&mut CallsMethod { needle: "foo" }, tree, &Cursor::root()));
    assert!(!visit(&mut CallsMethod { needle: "bar" }, tree, &Cursor::root()));
}

#[test]
fn find_fields_reads_the_resolved_members() {
    let Attributed { unit, .. } = attributed_unit();
    let fields = FindFields::find(&unit, "java.lang.Integer", false);
    assert_eq!(
        fields,
        vec![Field {
            name: "n".to_string(),
            ty: "java.lang.Integer".to_string(),
        }]
    );

    // Deterministic across runs.
    assert_eq!(fields, FindFields::find(&unit, "java.lang.Integer", false));
}

#[test]
fn applying_no_transforms_returns_an_equal_tree() {
    let Attributed { unit, .. } = attributed_unit();
    let after = apply(unit.clone(), Vec::new()).unwrap();
    assert_eq!(after, unit);
}

#[test]
fn retarget_scenario_from_collect_to_apply() {
    let Attributed { unit, mut cache } = attributed_unit();
    let repl = ClassTy::build(&mut cache, "com.acme.Repl", Vec::new(), None);
    let before = first_invocation(&unit).clone();

    let mut visitor = ChangeMethodTargetToVariable::new("foo", "repl", Arc::clone(&repl));
    let after = run(&mut visitor, &unit).unwrap();
    let call = first_invocation(&after);

    match call.select.as_deref() {
        Some(Expression::Ident(receiver)) => {
            assert_eq!(receiver.name, "repl");
            assert_eq!(receiver.ty, Some(Ty::Class(repl.clone())));
            // The old receiver's leading whitespace survives.
            assert_eq!(receiver.fmt.prefix, " ");
        }
        other => panic!("expected ident receiver, got {other:?}"),
    }
    assert_eq!(
        call.declaring_type().map(|c| c.fully_qualified_name.as_str()),
        Some("com.acme.Repl")
    );
    assert_eq!(call.name, before.name);
    assert_eq!(call.args, before.args);

    // The structurally untouched part of the tree is value-equal.
    assert_eq!(after.package_decl, unit.package_decl);
    assert_eq!(after.classes[0].name, unit.classes[0].name);
}

#[test]
fn rewritten_tree_keeps_node_identity_outside_the_edit() {
    let Attributed { unit, mut cache } = attributed_unit();
    let repl = ClassTy::build(&mut cache, "com.acme.Repl", Vec::new(), None);

    let mut visitor = ChangeMethodTargetToVariable::new("foo", "repl", repl);
    let after = run(&mut visitor, &unit).unwrap();

    assert_eq!(after.id, unit.id);
    assert_eq!(first_invocation(&after).id, first_invocation(&unit).id);
    // The synthesized receiver is a new node.
    let old_receiver = first_invocation(&unit).select.as_deref().unwrap();
    let new_receiver = first_invocation(&after).select.as_deref().unwrap();
    assert_ne!(old_receiver.id(), new_receiver.id());
}
