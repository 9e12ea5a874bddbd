// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! ChangeMethodTargetToVariable: point a call at a local variable.
//!
//! A refactor recipe built on the rewrite engine. For each invocation of
//! the named method, it emits one transform that replaces the receiver
//! with an identifier naming the given variable and, in the same record,
//! updates the call's resolved declaring type to the variable's class —
//! the structural edit and its attribution stay consistent within one
//! transform, so no later transform in the pass can observe a half-edited
//! call.

use std::sync::Arc;

use recast_core::{ClassTy, Ty};

use super::{AstTransform, RefactorVisitor};
use crate::nodes::{AstNode, Expression, Formatting, Ident, MethodInvocation};
use crate::visitor::{walk_method_invocation, AstVisitor, Cursor};

/// Rewrites `obj.foo(...)` into `repl.foo(...)` where `repl` is a
/// variable of a known class.
///
/// The replacement receiver keeps the original receiver's formatting, so
/// leading whitespace and comments survive the edit. Every other field of
/// the invocation — name, arguments, explicit type arguments — is
/// preserved.
pub struct ChangeMethodTargetToVariable {
    method_name: String,
    var_name: String,
    ty: Arc<ClassTy>,
}

impl ChangeMethodTargetToVariable {
    pub fn new(
        method_name: impl Into<String>,
        var_name: impl Into<String>,
        ty: Arc<ClassTy>,
    ) -> ChangeMethodTargetToVariable {
        ChangeMethodTargetToVariable {
            method_name: method_name.into(),
            var_name: var_name.into(),
            ty,
        }
    }
}

impl<'t> AstVisitor<'t> for ChangeMethodTargetToVariable {
    type Output = Vec<AstTransform>;

    fn visit_method_invocation(
        &mut self,
        node: &'t MethodInvocation,
        cursor: &Cursor<'t>,
    ) -> Vec<AstTransform> {
        let mut transforms = walk_method_invocation(self, node, cursor);
        if node.name.name != self.method_name {
            return transforms;
        }
        let var_name = self.var_name.clone();
        let ty = self.ty.clone();
        transforms.extend(self.transform(node, move |mut meth: MethodInvocation| {
            let fmt = meth
                .select
                .as_deref()
                .map(|select| select.formatting().clone())
                .unwrap_or_else(Formatting::empty);
            let select = Ident::build(var_name.clone(), Some(Ty::Class(ty.clone())), fmt);
            meth.select = Some(Box::new(Expression::Ident(select)));
            meth.ty = meth.ty.map(|sig| sig.with_declaring_type(ty.clone()));
            meth
        }));
        transforms
    }
}

impl<'t> RefactorVisitor<'t> for ChangeMethodTargetToVariable {
    fn rule_name(&self) -> &'static str {
        "change-method-target"
    }
}

#[cfg(test)]
mod tests {
    use recast_core::{Flags, MethodTy, Tag, TypeCache};

    use super::*;
    use crate::nodes::{
        Block, ClassDecl, ClassKind, CompilationUnit, LiteralValue, NameTree, NamedVar, NodeId,
        Statement, VariableDecls,
    };
    use crate::transform::run;

    fn fmt_prefix(prefix: &str) -> Formatting {
        Formatting {
            prefix: prefix.to_string(),
            suffix: String::new(),
        }
    }

    fn sample_unit(cache: &mut TypeCache) -> CompilationUnit {
        let obj_class = ClassTy::build(cache, "com.acme.Obj", Vec::new(), None);
        let integer = ClassTy::build(cache, "java.lang.Integer", Vec::new(), None);
        let invocation = MethodInvocation {
            id: NodeId::next(),
            select: Some(Box::new(Expression::Ident(Ident::build(
                "obj",
                Some(Ty::Class(obj_class.clone())),
                fmt_prefix(" "),
            )))),
            type_params: Vec::new(),
            name: Ident::build("foo", None, Formatting::empty()),
            args: vec![Expression::Literal(crate::nodes::Literal {
                id: NodeId::next(),
                value: LiteralValue::Int(0),
                ty: Some(Ty::Primitive(Tag::Int)),
                fmt: Formatting::empty(),
            })],
            ty: Some(MethodTy {
                declaring_type: Some(obj_class),
                return_type: Some(Ty::Class(integer)),
                param_types: vec![Ty::Primitive(Tag::Int)],
                flags: Flags::PUBLIC,
            }),
            fmt: Formatting::empty(),
        };
        let field = VariableDecls {
            id: NodeId::next(),
            annotations: Vec::new(),
            modifiers: Flags::empty(),
            type_expr: Some(NameTree::Ident(Ident::build(
                "Integer",
                None,
                Formatting::empty(),
            ))),
            vars: vec![NamedVar {
                id: NodeId::next(),
                name: Ident::build("n", None, Formatting::empty()),
                initializer: Some(Box::new(Expression::MethodInvocation(invocation))),
                ty: None,
                fmt: Formatting::empty(),
            }],
            fmt: Formatting::empty(),
        };
        let class = ClassDecl {
            id: NodeId::next(),
            annotations: Vec::new(),
            modifiers: Flags::PUBLIC,
            kind: ClassKind::Class,
            name: Ident::build("A", None, Formatting::empty()),
            type_params: Vec::new(),
            extends: None,
            implements: Vec::new(),
            body: Block {
                id: NodeId::next(),
                statements: vec![Statement::VariableDecls(field)],
                fmt: Formatting::empty(),
            },
            ty: None,
            fmt: Formatting::empty(),
        };
        CompilationUnit {
            id: NodeId::next(),
            source_path: None,
            package_decl: None,
            imports: Vec::new(),
            classes: vec![class],
            fmt: Formatting::empty(),
        }
    }

    fn first_invocation(unit: &CompilationUnit) -> &MethodInvocation {
        match unit.classes[0].fields()[0].vars[0].initializer.as_deref() {
            Some(Expression::MethodInvocation(m)) => m,
            other => panic!("expected invocation, got {other:?}"),
        }
    }

    #[test]
    fn retargets_receiver_and_declaring_type_together() {
        let mut cache = TypeCache::new();
        let unit = sample_unit(&mut cache);
        let repl = ClassTy::build(&mut cache, "com.acme.Repl", Vec::new(), None);
        let before = first_invocation(&unit).clone();

        let mut visitor = ChangeMethodTargetToVariable::new("foo", "repl", repl.clone());
        let after = run(&mut visitor, &unit).unwrap();
        let call = first_invocation(&after);

        // New receiver: the variable, typed with the given class, keeping
        // the old receiver's formatting.
        match call.select.as_deref() {
            Some(Expression::Ident(ident)) => {
                assert_eq!(ident.name, "repl");
                assert_eq!(ident.ty, Some(Ty::Class(repl.clone())));
                assert_eq!(ident.fmt, fmt_prefix(" "));
            }
            other => panic!("expected ident receiver, got {other:?}"),
        }

        // Declaring type moved with the receiver, in the same transform.
        assert_eq!(
            call.declaring_type().map(|c| c.fully_qualified_name.as_str()),
            Some("com.acme.Repl")
        );

        // Everything else is unchanged.
        assert_eq!(call.name, before.name);
        assert_eq!(call.args, before.args);
        let sig = call.ty.as_ref().unwrap();
        let before_sig = before.ty.as_ref().unwrap();
        assert_eq!(sig.return_type, before_sig.return_type);
        assert_eq!(sig.param_types, before_sig.param_types);
        assert_eq!(sig.flags, before_sig.flags);
    }

    #[test]
    fn non_matching_calls_are_left_alone() {
        let mut cache = TypeCache::new();
        let unit = sample_unit(&mut cache);
        let repl = ClassTy::build(&mut cache, "com.acme.Repl", Vec::new(), None);
        let before = unit.clone();

        let mut visitor = ChangeMethodTargetToVariable::new("bar", "repl", repl);
        let after = run(&mut visitor, &unit).unwrap();
        assert_eq!(after, before);
    }

    #[test]
    fn input_tree_is_not_mutated() {
        let mut cache = TypeCache::new();
        let unit = sample_unit(&mut cache);
        let repl = ClassTy::build(&mut cache, "com.acme.Repl", Vec::new(), None);
        let before = unit.clone();

        let mut visitor = ChangeMethodTargetToVariable::new("foo", "repl", repl);
        let _ = run(&mut visitor, &unit).unwrap();
        assert_eq!(unit, before);
    }

    #[test]
    fn unattributed_call_still_gets_its_receiver_replaced() {
        let mut cache = TypeCache::new();
        let mut unit = sample_unit(&mut cache);
        // Drop attribution from the call.
        match unit.classes[0].body.statements.first_mut() {
            Some(Statement::VariableDecls(decls)) => {
                match decls.vars[0].initializer.as_deref_mut() {
                    Some(Expression::MethodInvocation(m)) => m.ty = None,
                    other => panic!("expected invocation, got {other:?}"),
                }
            }
            other => panic!("expected field, got {other:?}"),
        }
        let repl = ClassTy::build(&mut cache, "com.acme.Repl", Vec::new(), None);

        let mut visitor = ChangeMethodTargetToVariable::new("foo", "repl", repl);
        let after = run(&mut visitor, &unit).unwrap();
        let call = first_invocation(&after);
        assert!(call.ty.is_none());
        match call.select.as_deref() {
            Some(Expression::Ident(ident)) => assert_eq!(ident.name, "repl"),
            other => panic!("expected ident receiver, got {other:?}"),
        }
    }
}
