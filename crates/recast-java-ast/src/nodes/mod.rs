// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! The AST node model.
//!
//! Nodes form a closed set of immutable value types. The set is registered
//! once in [`for_each_tree_kind`]; the owned [`Tree`] sum, the borrowed
//! [`TreeRef`] sum, the visitor hook methods, and the traversal dispatch
//! are all generated from that registry, so adding a kind is a single-site
//! change and every match over kinds stays exhaustive at compile time.
//!
//! Ownership: children are exclusively-owned substructure. The traversal
//! engine never mutates nodes; the rewrite engine consumes a tree and
//! produces a new one, moving unchanged subtrees through.

pub mod expression;
pub mod module;
pub mod statement;
pub mod traits;

pub use expression::{
    ArrayAccess, ArrayType, Assign, AssignOp, Binary, BinaryOp, Empty, Expression, FieldAccess,
    Ident, InstanceOf, Lambda, Literal, LiteralValue, MemberReference, MethodInvocation, NameTree,
    NameTreeRef, NewArray, NewClass, ParameterizedType, Parentheses, Primitive, Ternary, TypeCast,
    Unary, UnaryOp, UnparsedSource, Wildcard, WildcardBound,
};
pub use module::CompilationUnit;
pub use statement::{
    Annotation, Assert, Block, Break, Case, Catch, ClassDecl, ClassKind, Continue, DoWhileLoop,
    EnumValue, EnumValueSet, ForEachLoop, ForLoop, If, Import, Label, MethodDecl, MultiCatch,
    NamedVar, PackageDecl, Return, Statement, Switch, Synchronized, Throw, Try, TypeParameter,
    VariableDecls, WhileLoop,
};
pub use traits::{AstNode, Formatting, NodeId};

/// The registry of node kinds: `Variant => hook_name` pairs.
///
/// Invoked with a callback macro that receives the full list; used to
/// generate [`Tree`], [`TreeRef`], the visitor hooks, and dispatch.
macro_rules! for_each_tree_kind {
    ($cb:ident) => {
        $cb! {
            Annotation => annotation,
            ArrayAccess => array_access,
            ArrayType => array_type,
            Assert => assert,
            Assign => assign,
            AssignOp => assign_op,
            Binary => binary,
            Block => block,
            Break => break_stmt,
            Case => case,
            Catch => catch,
            ClassDecl => class_decl,
            CompilationUnit => compilation_unit,
            Continue => continue_stmt,
            DoWhileLoop => do_while_loop,
            Empty => empty,
            EnumValue => enum_value,
            EnumValueSet => enum_value_set,
            FieldAccess => field_access,
            ForEachLoop => for_each_loop,
            ForLoop => for_loop,
            Ident => ident,
            If => if_stmt,
            Import => import,
            InstanceOf => instance_of,
            Label => label,
            Lambda => lambda,
            Literal => literal,
            MemberReference => member_reference,
            MethodDecl => method_decl,
            MethodInvocation => method_invocation,
            MultiCatch => multi_catch,
            VariableDecls => multi_variable,
            NamedVar => variable,
            NewArray => new_array,
            NewClass => new_class,
            PackageDecl => package,
            ParameterizedType => parameterized_type,
            Parentheses => parentheses,
            Primitive => primitive,
            Return => return_stmt,
            Switch => switch,
            Synchronized => synchronized,
            Ternary => ternary,
            Throw => throw,
            Try => try_stmt,
            TypeCast => type_cast,
            TypeParameter => type_parameter,
            Unary => unary,
            UnparsedSource => unparsed_source,
            WhileLoop => while_loop,
            Wildcard => wildcard,
        }
    };
}
pub(crate) use for_each_tree_kind;

macro_rules! define_tree_sums {
    ($($Variant:ident => $snake:ident),* $(,)?) => {
        /// Owned sum over every node kind — the type transform mutations
        /// receive and return.
        #[allow(clippy::large_enum_variant)]
        #[derive(Debug, Clone, PartialEq)]
        pub enum Tree {
            $( $Variant($Variant), )*
        }

        /// Borrowed sum over every node kind — cursor entries and the
        /// generic traversal entry points.
        #[derive(Debug, Clone, Copy, PartialEq)]
        pub enum TreeRef<'t> {
            $( $Variant(&'t $Variant), )*
        }

        impl Tree {
            /// Stable identity of the wrapped node.
            pub fn id(&self) -> NodeId {
                match self { $( Tree::$Variant(n) => n.id, )* }
            }

            /// Kind name for diagnostics.
            pub fn kind_name(&self) -> &'static str {
                match self { $( Tree::$Variant(_) => stringify!($snake), )* }
            }
        }

        impl<'t> TreeRef<'t> {
            /// Stable identity of the referenced node.
            pub fn id(&self) -> NodeId {
                match self { $( TreeRef::$Variant(n) => n.id, )* }
            }

            /// Kind name for diagnostics.
            pub fn kind_name(&self) -> &'static str {
                match self { $( TreeRef::$Variant(_) => stringify!($snake), )* }
            }
        }

        $(
            impl AstNode for $Variant {
                fn id(&self) -> NodeId {
                    self.id
                }
                fn formatting(&self) -> &Formatting {
                    &self.fmt
                }
            }

            impl From<$Variant> for Tree {
                fn from(node: $Variant) -> Tree {
                    Tree::$Variant(node)
                }
            }

            impl TryFrom<Tree> for $Variant {
                type Error = Tree;
                fn try_from(tree: Tree) -> Result<$Variant, Tree> {
                    match tree {
                        Tree::$Variant(n) => Ok(n),
                        other => Err(other),
                    }
                }
            }

            impl<'t> From<&'t $Variant> for TreeRef<'t> {
                fn from(node: &'t $Variant) -> TreeRef<'t> {
                    TreeRef::$Variant(node)
                }
            }
        )*
    };
}
for_each_tree_kind!(define_tree_sums);

impl TreeRef<'_> {
    /// True for kinds that are expressions; the traversal engine routes
    /// these through the `visit_expression` catch-all in addition to their
    /// specific hook.
    pub fn is_expression(&self) -> bool {
        matches!(
            self,
            TreeRef::ArrayAccess(_)
                | TreeRef::Assign(_)
                | TreeRef::AssignOp(_)
                | TreeRef::Binary(_)
                | TreeRef::Empty(_)
                | TreeRef::FieldAccess(_)
                | TreeRef::Ident(_)
                | TreeRef::InstanceOf(_)
                | TreeRef::Lambda(_)
                | TreeRef::Literal(_)
                | TreeRef::MemberReference(_)
                | TreeRef::MethodInvocation(_)
                | TreeRef::NewArray(_)
                | TreeRef::NewClass(_)
                | TreeRef::Parentheses(_)
                | TreeRef::Ternary(_)
                | TreeRef::TypeCast(_)
                | TreeRef::Unary(_)
                | TreeRef::UnparsedSource(_)
        )
    }
}

impl<'t> From<&'t Expression> for TreeRef<'t> {
    fn from(expr: &'t Expression) -> TreeRef<'t> {
        match expr {
            Expression::ArrayAccess(n) => TreeRef::ArrayAccess(n),
            Expression::Assign(n) => TreeRef::Assign(n),
            Expression::AssignOp(n) => TreeRef::AssignOp(n),
            Expression::Binary(n) => TreeRef::Binary(n),
            Expression::Empty(n) => TreeRef::Empty(n),
            Expression::FieldAccess(n) => TreeRef::FieldAccess(n),
            Expression::Ident(n) => TreeRef::Ident(n),
            Expression::InstanceOf(n) => TreeRef::InstanceOf(n),
            Expression::Lambda(n) => TreeRef::Lambda(n),
            Expression::Literal(n) => TreeRef::Literal(n),
            Expression::MemberReference(n) => TreeRef::MemberReference(n),
            Expression::MethodInvocation(n) => TreeRef::MethodInvocation(n),
            Expression::NewArray(n) => TreeRef::NewArray(n),
            Expression::NewClass(n) => TreeRef::NewClass(n),
            Expression::Parentheses(n) => TreeRef::Parentheses(n),
            Expression::Ternary(n) => TreeRef::Ternary(n),
            Expression::TypeCast(n) => TreeRef::TypeCast(n),
            Expression::Unary(n) => TreeRef::Unary(n),
            Expression::UnparsedSource(n) => TreeRef::UnparsedSource(n),
        }
    }
}

impl<'t> From<&'t Statement> for TreeRef<'t> {
    fn from(stmt: &'t Statement) -> TreeRef<'t> {
        match stmt {
            Statement::Assert(n) => TreeRef::Assert(n),
            Statement::Block(n) => TreeRef::Block(n),
            Statement::Break(n) => TreeRef::Break(n),
            Statement::ClassDecl(n) => TreeRef::ClassDecl(n),
            Statement::Continue(n) => TreeRef::Continue(n),
            Statement::DoWhileLoop(n) => TreeRef::DoWhileLoop(n),
            Statement::Empty(n) => TreeRef::Empty(n),
            Statement::EnumValueSet(n) => TreeRef::EnumValueSet(n),
            Statement::Expr(e) => TreeRef::from(e),
            Statement::ForEachLoop(n) => TreeRef::ForEachLoop(n),
            Statement::ForLoop(n) => TreeRef::ForLoop(n),
            Statement::If(n) => TreeRef::If(n),
            Statement::Label(n) => TreeRef::Label(n),
            Statement::MethodDecl(n) => TreeRef::MethodDecl(n),
            Statement::Return(n) => TreeRef::Return(n),
            Statement::Switch(n) => TreeRef::Switch(n),
            Statement::Synchronized(n) => TreeRef::Synchronized(n),
            Statement::Throw(n) => TreeRef::Throw(n),
            Statement::Try(n) => TreeRef::Try(n),
            Statement::VariableDecls(n) => TreeRef::VariableDecls(n),
            Statement::WhileLoop(n) => TreeRef::WhileLoop(n),
        }
    }
}

impl<'t> From<&'t NameTree> for TreeRef<'t> {
    fn from(name: &'t NameTree) -> TreeRef<'t> {
        match name {
            NameTree::ArrayType(n) => TreeRef::ArrayType(n),
            NameTree::FieldAccess(n) => TreeRef::FieldAccess(n),
            NameTree::Ident(n) => TreeRef::Ident(n),
            NameTree::MultiCatch(n) => TreeRef::MultiCatch(n),
            NameTree::ParameterizedType(n) => TreeRef::ParameterizedType(n),
            NameTree::Primitive(n) => TreeRef::Primitive(n),
            NameTree::Wildcard(n) => TreeRef::Wildcard(n),
        }
    }
}

impl<'t> From<NameTreeRef<'t>> for TreeRef<'t> {
    fn from(name: NameTreeRef<'t>) -> TreeRef<'t> {
        match name {
            NameTreeRef::ArrayType(n) => TreeRef::ArrayType(n),
            NameTreeRef::FieldAccess(n) => TreeRef::FieldAccess(n),
            NameTreeRef::Ident(n) => TreeRef::Ident(n),
            NameTreeRef::MultiCatch(n) => TreeRef::MultiCatch(n),
            NameTreeRef::ParameterizedType(n) => TreeRef::ParameterizedType(n),
            NameTreeRef::Primitive(n) => TreeRef::Primitive(n),
            NameTreeRef::Wildcard(n) => TreeRef::Wildcard(n),
        }
    }
}

impl From<Expression> for Tree {
    fn from(expr: Expression) -> Tree {
        match expr {
            Expression::ArrayAccess(n) => Tree::ArrayAccess(n),
            Expression::Assign(n) => Tree::Assign(n),
            Expression::AssignOp(n) => Tree::AssignOp(n),
            Expression::Binary(n) => Tree::Binary(n),
            Expression::Empty(n) => Tree::Empty(n),
            Expression::FieldAccess(n) => Tree::FieldAccess(n),
            Expression::Ident(n) => Tree::Ident(n),
            Expression::InstanceOf(n) => Tree::InstanceOf(n),
            Expression::Lambda(n) => Tree::Lambda(n),
            Expression::Literal(n) => Tree::Literal(n),
            Expression::MemberReference(n) => Tree::MemberReference(n),
            Expression::MethodInvocation(n) => Tree::MethodInvocation(n),
            Expression::NewArray(n) => Tree::NewArray(n),
            Expression::NewClass(n) => Tree::NewClass(n),
            Expression::Parentheses(n) => Tree::Parentheses(n),
            Expression::Ternary(n) => Tree::Ternary(n),
            Expression::TypeCast(n) => Tree::TypeCast(n),
            Expression::Unary(n) => Tree::Unary(n),
            Expression::UnparsedSource(n) => Tree::UnparsedSource(n),
        }
    }
}

impl TryFrom<Tree> for Expression {
    type Error = Tree;

    fn try_from(tree: Tree) -> Result<Expression, Tree> {
        Ok(match tree {
            Tree::ArrayAccess(n) => Expression::ArrayAccess(n),
            Tree::Assign(n) => Expression::Assign(n),
            Tree::AssignOp(n) => Expression::AssignOp(n),
            Tree::Binary(n) => Expression::Binary(n),
            Tree::Empty(n) => Expression::Empty(n),
            Tree::FieldAccess(n) => Expression::FieldAccess(n),
            Tree::Ident(n) => Expression::Ident(n),
            Tree::InstanceOf(n) => Expression::InstanceOf(n),
            Tree::Lambda(n) => Expression::Lambda(n),
            Tree::Literal(n) => Expression::Literal(n),
            Tree::MemberReference(n) => Expression::MemberReference(n),
            Tree::MethodInvocation(n) => Expression::MethodInvocation(n),
            Tree::NewArray(n) => Expression::NewArray(n),
            Tree::NewClass(n) => Expression::NewClass(n),
            Tree::Parentheses(n) => Expression::Parentheses(n),
            Tree::Ternary(n) => Expression::Ternary(n),
            Tree::TypeCast(n) => Expression::TypeCast(n),
            Tree::Unary(n) => Expression::Unary(n),
            Tree::UnparsedSource(n) => Expression::UnparsedSource(n),
            other => return Err(other),
        })
    }
}

impl From<Statement> for Tree {
    fn from(stmt: Statement) -> Tree {
        match stmt {
            Statement::Assert(n) => Tree::Assert(n),
            Statement::Block(n) => Tree::Block(n),
            Statement::Break(n) => Tree::Break(n),
            Statement::ClassDecl(n) => Tree::ClassDecl(n),
            Statement::Continue(n) => Tree::Continue(n),
            Statement::DoWhileLoop(n) => Tree::DoWhileLoop(n),
            Statement::Empty(n) => Tree::Empty(n),
            Statement::EnumValueSet(n) => Tree::EnumValueSet(n),
            Statement::Expr(e) => Tree::from(e),
            Statement::ForEachLoop(n) => Tree::ForEachLoop(n),
            Statement::ForLoop(n) => Tree::ForLoop(n),
            Statement::If(n) => Tree::If(n),
            Statement::Label(n) => Tree::Label(n),
            Statement::MethodDecl(n) => Tree::MethodDecl(n),
            Statement::Return(n) => Tree::Return(n),
            Statement::Switch(n) => Tree::Switch(n),
            Statement::Synchronized(n) => Tree::Synchronized(n),
            Statement::Throw(n) => Tree::Throw(n),
            Statement::Try(n) => Tree::Try(n),
            Statement::VariableDecls(n) => Tree::VariableDecls(n),
            Statement::WhileLoop(n) => Tree::WhileLoop(n),
        }
    }
}

impl TryFrom<Tree> for Statement {
    type Error = Tree;

    fn try_from(tree: Tree) -> Result<Statement, Tree> {
        Ok(match tree {
            Tree::Assert(n) => Statement::Assert(n),
            Tree::Block(n) => Statement::Block(n),
            Tree::Break(n) => Statement::Break(n),
            Tree::ClassDecl(n) => Statement::ClassDecl(n),
            Tree::Continue(n) => Statement::Continue(n),
            Tree::DoWhileLoop(n) => Statement::DoWhileLoop(n),
            Tree::EnumValueSet(n) => Statement::EnumValueSet(n),
            Tree::ForEachLoop(n) => Statement::ForEachLoop(n),
            Tree::ForLoop(n) => Statement::ForLoop(n),
            Tree::If(n) => Statement::If(n),
            Tree::Label(n) => Statement::Label(n),
            Tree::MethodDecl(n) => Statement::MethodDecl(n),
            Tree::Return(n) => Statement::Return(n),
            Tree::Switch(n) => Statement::Switch(n),
            Tree::Synchronized(n) => Statement::Synchronized(n),
            Tree::Throw(n) => Statement::Throw(n),
            Tree::Try(n) => Statement::Try(n),
            Tree::VariableDecls(n) => Statement::VariableDecls(n),
            Tree::WhileLoop(n) => Statement::WhileLoop(n),
            // An expression kind in statement position stays a statement.
            other => Statement::Expr(Expression::try_from(other)?),
        })
    }
}

impl From<NameTree> for Tree {
    fn from(name: NameTree) -> Tree {
        match name {
            NameTree::ArrayType(n) => Tree::ArrayType(n),
            NameTree::FieldAccess(n) => Tree::FieldAccess(n),
            NameTree::Ident(n) => Tree::Ident(n),
            NameTree::MultiCatch(n) => Tree::MultiCatch(n),
            NameTree::ParameterizedType(n) => Tree::ParameterizedType(n),
            NameTree::Primitive(n) => Tree::Primitive(n),
            NameTree::Wildcard(n) => Tree::Wildcard(n),
        }
    }
}

impl TryFrom<Tree> for NameTree {
    type Error = Tree;

    fn try_from(tree: Tree) -> Result<NameTree, Tree> {
        Ok(match tree {
            Tree::ArrayType(n) => NameTree::ArrayType(n),
            Tree::FieldAccess(n) => NameTree::FieldAccess(n),
            Tree::Ident(n) => NameTree::Ident(n),
            Tree::MultiCatch(n) => NameTree::MultiCatch(n),
            Tree::ParameterizedType(n) => NameTree::ParameterizedType(n),
            Tree::Primitive(n) => NameTree::Primitive(n),
            Tree::Wildcard(n) => NameTree::Wildcard(n),
            other => return Err(other),
        })
    }
}

impl AstNode for Expression {
    fn id(&self) -> NodeId {
        TreeRef::from(self).id()
    }

    fn formatting(&self) -> &Formatting {
        match self {
            Expression::ArrayAccess(n) => &n.fmt,
            Expression::Assign(n) => &n.fmt,
            Expression::AssignOp(n) => &n.fmt,
            Expression::Binary(n) => &n.fmt,
            Expression::Empty(n) => &n.fmt,
            Expression::FieldAccess(n) => &n.fmt,
            Expression::Ident(n) => &n.fmt,
            Expression::InstanceOf(n) => &n.fmt,
            Expression::Lambda(n) => &n.fmt,
            Expression::Literal(n) => &n.fmt,
            Expression::MemberReference(n) => &n.fmt,
            Expression::MethodInvocation(n) => &n.fmt,
            Expression::NewArray(n) => &n.fmt,
            Expression::NewClass(n) => &n.fmt,
            Expression::Parentheses(n) => &n.fmt,
            Expression::Ternary(n) => &n.fmt,
            Expression::TypeCast(n) => &n.fmt,
            Expression::Unary(n) => &n.fmt,
            Expression::UnparsedSource(n) => &n.fmt,
        }
    }
}

impl AstNode for Statement {
    fn id(&self) -> NodeId {
        TreeRef::from(self).id()
    }

    fn formatting(&self) -> &Formatting {
        match self {
            Statement::Assert(n) => &n.fmt,
            Statement::Block(n) => &n.fmt,
            Statement::Break(n) => &n.fmt,
            Statement::ClassDecl(n) => &n.fmt,
            Statement::Continue(n) => &n.fmt,
            Statement::DoWhileLoop(n) => &n.fmt,
            Statement::Empty(n) => &n.fmt,
            Statement::EnumValueSet(n) => &n.fmt,
            Statement::Expr(e) => e.formatting(),
            Statement::ForEachLoop(n) => &n.fmt,
            Statement::ForLoop(n) => &n.fmt,
            Statement::If(n) => &n.fmt,
            Statement::Label(n) => &n.fmt,
            Statement::MethodDecl(n) => &n.fmt,
            Statement::Return(n) => &n.fmt,
            Statement::Switch(n) => &n.fmt,
            Statement::Synchronized(n) => &n.fmt,
            Statement::Throw(n) => &n.fmt,
            Statement::Try(n) => &n.fmt,
            Statement::VariableDecls(n) => &n.fmt,
            Statement::WhileLoop(n) => &n.fmt,
        }
    }
}

impl AstNode for NameTree {
    fn id(&self) -> NodeId {
        TreeRef::from(self).id()
    }

    fn formatting(&self) -> &Formatting {
        match self {
            NameTree::ArrayType(n) => &n.fmt,
            NameTree::FieldAccess(n) => &n.fmt,
            NameTree::Ident(n) => &n.fmt,
            NameTree::MultiCatch(n) => &n.fmt,
            NameTree::ParameterizedType(n) => &n.fmt,
            NameTree::Primitive(n) => &n.fmt,
            NameTree::Wildcard(n) => &n.fmt,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tree_round_trips_through_typed_conversion() {
        let ident = Ident::build("x", None, Formatting::empty());
        let id = ident.id;
        let tree = Tree::from(ident);
        assert_eq!(tree.id(), id);
        assert_eq!(tree.kind_name(), "ident");
        let back = Ident::try_from(tree).unwrap();
        assert_eq!(back.id, id);
    }

    #[test]
    fn wrong_kind_conversion_returns_tree() {
        let ident = Ident::build("x", None, Formatting::empty());
        let tree = Tree::from(ident);
        let err = Literal::try_from(tree).unwrap_err();
        assert_eq!(err.kind_name(), "ident");
    }

    #[test]
    fn statement_expr_has_no_wrapper_kind() {
        let expr = Expression::Ident(Ident::build("x", None, Formatting::empty()));
        let id = expr.id();
        let stmt = Statement::Expr(expr);
        let tree_ref = TreeRef::from(&stmt);
        assert_eq!(tree_ref.kind_name(), "ident");
        assert_eq!(tree_ref.id(), id);
    }
}
