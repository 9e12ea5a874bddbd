// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! The traversal engine.
//!
//! A visitor implements [`AstVisitor`], overriding only the hooks relevant
//! to its query; every other hook defaults to the structural walk of its
//! children. Results flow back up through the [`Reduce`] strategy of the
//! visitor's output type.
//!
//! # Traversal order
//!
//! Depth-first, children in source order. For each node, the specific
//! `visit_*` hook runs with the cursor already extended to the node, then
//! its result is reduced with the `visit_expression` (expressions only)
//! and `visit_tree` catch-alls.
//!
//! # Failure semantics
//!
//! Traversal cannot fail on a well-formed tree. Missing type attribution
//! is absence: type-aware rules (like the static-receiver rule) treat an
//! unattributed position as if it were not there.
//!
//! # Example
//!
//! ```
//! use recast_java_ast::nodes::{Ident, TreeRef};
//! use recast_java_ast::visitor::{visit, AstVisitor, Cursor};
//!
//! struct HasName<'a> {
//!     needle: &'a str,
//! }
//!
//! impl<'a, 't> AstVisitor<'t> for HasName<'a> {
//!     type Output = bool;
//!
//!     fn visit_ident(&mut self, node: &'t Ident, _cursor: &Cursor<'t>) -> bool {
//!         node.name == self.needle
//!     }
//! }
//!
//! let ident = Ident::build("x", None, Default::default());
//! let mut visitor = HasName { needle: "x" };
//! assert!(visit(&mut visitor, TreeRef::from(&ident), &Cursor::root()));
//! ```

mod cursor;
mod dispatch;
mod fields;
mod traits;

pub use cursor::Cursor;
pub use dispatch::*;
pub use fields::{Field, FindFields};
pub use traits::{AstVisitor, Reduce};

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use recast_core::{ClassTy, Flags, MethodTy, Tag, Ty, TypeCache};

    use super::*;
    use crate::nodes::{
        Binary, BinaryOp, Block, ClassDecl, ClassKind, CompilationUnit, Expression, Formatting,
        Ident, Literal, LiteralValue, MethodInvocation, NameTree, NameTreeRef, NamedVar, NodeId,
        Statement, TreeRef, VariableDecls,
    };

    fn fmt() -> Formatting {
        Formatting::empty()
    }

    fn ident(name: &str) -> Ident {
        Ident::build(name, None, fmt())
    }

    fn int_lit(n: i64) -> Expression {
        Expression::Literal(Literal {
            id: NodeId::next(),
            value: LiteralValue::Int(n),
            ty: Some(Ty::Primitive(Tag::Int)),
            fmt: fmt(),
        })
    }

    fn invocation(
        select: Option<Expression>,
        name: &str,
        args: Vec<Expression>,
        ty: Option<MethodTy>,
    ) -> MethodInvocation {
        MethodInvocation {
            id: NodeId::next(),
            select: select.map(Box::new),
            type_params: Vec::new(),
            name: ident(name),
            args,
            ty,
            fmt: fmt(),
        }
    }

    fn static_signature(cache: &mut TypeCache, declaring: &str) -> MethodTy {
        MethodTy {
            declaring_type: Some(ClassTy::build(cache, declaring, Vec::new(), None)),
            return_type: Some(Ty::Primitive(Tag::Int)),
            param_types: vec![Ty::Primitive(Tag::Int)],
            flags: Flags::PUBLIC | Flags::STATIC,
        }
    }

    /// Collects identifier names in traversal order.
    struct NameCollector;

    impl<'t> AstVisitor<'t> for NameCollector {
        type Output = Vec<String>;

        fn visit_ident(&mut self, node: &'t Ident, _cursor: &Cursor<'t>) -> Vec<String> {
            vec![node.name.clone()]
        }
    }

    /// Counts identifiers through internal state.
    #[derive(Default)]
    struct IdentCounter {
        count: usize,
    }

    impl<'t> AstVisitor<'t> for IdentCounter {
        type Output = ();

        fn visit_ident(&mut self, _node: &'t Ident, _cursor: &Cursor<'t>) {
            self.count += 1;
        }
    }

    /// True anywhere an identifier has the given name.
    struct HasIdent<'a> {
        needle: &'a str,
    }

    impl<'a, 't> AstVisitor<'t> for HasIdent<'a> {
        type Output = bool;

        fn visit_ident(&mut self, node: &'t Ident, _cursor: &Cursor<'t>) -> bool {
            node.name == self.needle
        }
    }

    /// Collects names routed through the type-name hook.
    struct TypeNameCollector;

    impl<'t> AstVisitor<'t> for TypeNameCollector {
        type Output = Vec<String>;

        fn visit_type_name(
            &mut self,
            name: NameTreeRef<'t>,
            _cursor: &Cursor<'t>,
        ) -> Vec<String> {
            match name {
                NameTreeRef::Ident(i) => vec![i.name.clone()],
                _ => Vec::new(),
            }
        }
    }

    #[test]
    fn sequence_reduction_concatenates_in_traversal_order() {
        // obj.foo(x, y)
        let inv = invocation(
            Some(Expression::Ident(ident("obj"))),
            "foo",
            vec![
                Expression::Ident(ident("x")),
                Expression::Ident(ident("y")),
            ],
            None,
        );
        let names = visit(&mut NameCollector, TreeRef::from(&inv), &Cursor::root());
        assert_eq!(names, vec!["obj", "foo", "x", "y"]);
    }

    #[test]
    fn boolean_reduction_is_or_over_every_node() {
        let inv = invocation(
            Some(Expression::Ident(ident("obj"))),
            "foo",
            vec![int_lit(0)],
            None,
        );
        let tree = TreeRef::from(&inv);
        assert!(visit(&mut HasIdent { needle: "obj" }, tree, &Cursor::root()));
        assert!(visit(&mut HasIdent { needle: "foo" }, tree, &Cursor::root()));
        assert!(!visit(&mut HasIdent { needle: "bar" }, tree, &Cursor::root()));
    }

    #[test]
    fn single_and_sequence_entry_points_agree() {
        let statements = vec![
            Statement::Expr(Expression::Ident(ident("a"))),
            Statement::Expr(Expression::Binary(Binary {
                id: NodeId::next(),
                left: Box::new(Expression::Ident(ident("b"))),
                op: BinaryOp::Add,
                right: Box::new(Expression::Ident(ident("c"))),
                ty: None,
                fmt: fmt(),
            })),
        ];

        let mut one_by_one = IdentCounter::default();
        for stmt in &statements {
            visit(&mut one_by_one, TreeRef::from(stmt), &Cursor::root());
        }

        let mut in_sequence = IdentCounter::default();
        visit_all(
            &mut in_sequence,
            statements.iter().map(TreeRef::from),
            &Cursor::root(),
        );

        assert_eq!(one_by_one.count, 3);
        assert_eq!(in_sequence.count, one_by_one.count);
    }

    #[test]
    fn empty_sequence_yields_default() {
        let names = visit_all(&mut NameCollector, std::iter::empty(), &Cursor::root());
        assert!(names.is_empty());
    }

    #[test]
    fn static_call_receiver_routes_through_type_name() {
        let mut cache = TypeCache::new();
        let inv = invocation(
            Some(Expression::Ident(ident("Collections"))),
            "emptyList",
            Vec::new(),
            Some(static_signature(&mut cache, "java.util.Collections")),
        );
        let names = visit(&mut TypeNameCollector, TreeRef::from(&inv), &Cursor::root());
        assert_eq!(names, vec!["Collections"]);
    }

    #[test]
    fn instance_call_receiver_is_not_a_type_name() {
        let mut cache = TypeCache::new();
        let mut sig = static_signature(&mut cache, "java.util.List");
        sig.flags = Flags::PUBLIC;
        let inv = invocation(
            Some(Expression::Ident(ident("list"))),
            "size",
            Vec::new(),
            Some(sig),
        );
        let names = visit(&mut TypeNameCollector, TreeRef::from(&inv), &Cursor::root());
        assert!(names.is_empty());
    }

    #[test]
    fn unattributed_call_is_never_static() {
        let inv = invocation(
            Some(Expression::Ident(ident("Maybe"))),
            "of",
            Vec::new(),
            None,
        );
        let names = visit(&mut TypeNameCollector, TreeRef::from(&inv), &Cursor::root());
        assert!(names.is_empty());
    }

    #[test]
    fn variable_type_expression_is_a_type_name_but_its_vars_are_not() {
        let decl = VariableDecls {
            id: NodeId::next(),
            annotations: Vec::new(),
            modifiers: Flags::empty(),
            type_expr: Some(NameTree::Ident(ident("String"))),
            vars: vec![NamedVar {
                id: NodeId::next(),
                name: ident("s"),
                initializer: None,
                ty: None,
                fmt: fmt(),
            }],
            fmt: fmt(),
        };
        let names = visit(&mut TypeNameCollector, TreeRef::from(&decl), &Cursor::root());
        assert_eq!(names, vec!["String"]);
    }

    #[test]
    fn cursor_reflects_root_to_current_path() {
        struct CursorProbe {
            seen: Vec<(String, Option<String>)>,
        }

        impl<'t> AstVisitor<'t> for CursorProbe {
            type Output = ();

            fn visit_ident(&mut self, node: &'t Ident, cursor: &Cursor<'t>) {
                assert_eq!(cursor.current().map(|t| t.id()), Some(node.id));
                self.seen.push((
                    node.name.clone(),
                    cursor.enclosing_class().map(|c| c.name.name.clone()),
                ));
            }
        }

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
                statements: vec![Statement::Expr(Expression::Ident(ident("x")))],
                fmt: fmt(),
            },
            ty: None,
            fmt: fmt(),
        };
        let unit = CompilationUnit {
            id: NodeId::next(),
            source_path: None,
            package_decl: None,
            imports: Vec::new(),
            classes: vec![class],
            fmt: fmt(),
        };

        let mut probe = CursorProbe { seen: Vec::new() };
        visit(&mut probe, TreeRef::from(&unit), &Cursor::root());

        // Both the class's own name and the body identifier see class A.
        assert_eq!(
            probe.seen,
            vec![
                ("A".to_string(), Some("A".to_string())),
                ("x".to_string(), Some("A".to_string())),
            ]
        );
    }

    #[test]
    fn option_reduction_prefers_first_present() {
        /// Resolves the declaring class of the first attributed call.
        struct FirstDeclaringType;

        impl<'t> AstVisitor<'t> for FirstDeclaringType {
            type Output = Option<Arc<ClassTy>>;

            fn visit_method_invocation(
                &mut self,
                node: &'t MethodInvocation,
                cursor: &Cursor<'t>,
            ) -> Option<Arc<ClassTy>> {
                let below = walk_method_invocation(self, node, cursor);
                let here = node.declaring_type().cloned();
                self.reduce(here, below)
            }
        }

        let mut cache = TypeCache::new();
        let inner = invocation(
            None,
            "inner",
            Vec::new(),
            Some(static_signature(&mut cache, "com.acme.Inner")),
        );
        let outer = invocation(
            Some(Expression::MethodInvocation(inner)),
            "outer",
            Vec::new(),
            Some(static_signature(&mut cache, "com.acme.Outer")),
        );

        let resolved = visit(
            &mut FirstDeclaringType,
            TreeRef::from(&outer),
            &Cursor::root(),
        );
        assert_eq!(
            resolved.unwrap().fully_qualified_name,
            "com.acme.Outer"
        );
    }
}
