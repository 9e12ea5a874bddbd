// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Expression nodes.
//!
//! Expressions optionally carry a resolved [`Ty`] from attribution. A
//! `None` type means attribution gave up on that position; every type-aware
//! rule in the engine treats that as absence, never as an error.

use std::sync::Arc;

use recast_core::{ClassTy, Flags, MethodTy, Tag, Ty};

use super::statement::{Block, MultiCatch, Statement, VariableDecls};
use super::traits::{Formatting, NodeId};

/// An identifier. The same node kind names variables and types; the
/// traversal engine's `visit_type_name` hook is what disambiguates.
#[derive(Debug, Clone, PartialEq)]
pub struct Ident {
    pub id: NodeId,
    pub name: String,
    pub ty: Option<Ty>,
    pub fmt: Formatting,
}

impl Ident {
    /// Build an identifier with a fresh id.
    pub fn build(name: impl Into<String>, ty: Option<Ty>, fmt: Formatting) -> Ident {
        Ident {
            id: NodeId::next(),
            name: name.into(),
            ty,
            fmt,
        }
    }
}

/// `target.name` — a field access or qualified name.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldAccess {
    pub id: NodeId,
    pub target: Box<Expression>,
    pub name: Ident,
    pub ty: Option<Ty>,
    pub fmt: Formatting,
}

/// `indexed[index]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayAccess {
    pub id: NodeId,
    pub indexed: Box<Expression>,
    pub index: Box<Expression>,
    pub ty: Option<Ty>,
    pub fmt: Formatting,
}

/// Binary operators, shared with compound assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Less,
    Greater,
    LessEq,
    GreaterEq,
    Eq,
    NotEq,
    BitAnd,
    BitOr,
    BitXor,
    ShiftLeft,
    ShiftRight,
    UnsignedShiftRight,
    And,
    Or,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Binary {
    pub id: NodeId,
    pub left: Box<Expression>,
    pub op: BinaryOp,
    pub right: Box<Expression>,
    pub ty: Option<Ty>,
    pub fmt: Formatting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    PreInc,
    PreDec,
    PostInc,
    PostDec,
    Pos,
    Neg,
    Complement,
    Not,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Unary {
    pub id: NodeId,
    pub op: UnaryOp,
    pub expr: Box<Expression>,
    pub ty: Option<Ty>,
    pub fmt: Formatting,
}

/// `variable = assignment`.
#[derive(Debug, Clone, PartialEq)]
pub struct Assign {
    pub id: NodeId,
    pub variable: Box<Expression>,
    pub assignment: Box<Expression>,
    pub ty: Option<Ty>,
    pub fmt: Formatting,
}

/// `variable op= assignment`.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignOp {
    pub id: NodeId,
    pub variable: Box<Expression>,
    pub op: BinaryOp,
    pub assignment: Box<Expression>,
    pub ty: Option<Ty>,
    pub fmt: Formatting,
}

/// `condition ? true_part : false_part`.
#[derive(Debug, Clone, PartialEq)]
pub struct Ternary {
    pub id: NodeId,
    pub condition: Box<Expression>,
    pub true_part: Box<Expression>,
    pub false_part: Box<Expression>,
    pub ty: Option<Ty>,
    pub fmt: Formatting,
}

/// `expr instanceof clazz`.
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceOf {
    pub id: NodeId,
    pub expr: Box<Expression>,
    pub clazz: Box<NameTree>,
    pub ty: Option<Ty>,
    pub fmt: Formatting,
}

/// `(params) -> body`.
#[derive(Debug, Clone, PartialEq)]
pub struct Lambda {
    pub id: NodeId,
    pub params: Vec<VariableDecls>,
    pub body: Box<Statement>,
    pub ty: Option<Ty>,
    pub fmt: Formatting,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Boolean(bool),
    Char(char),
    Int(i64),
    Long(i64),
    Float(f64),
    Double(f64),
    Str(String),
    Null,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    pub id: NodeId,
    pub value: LiteralValue,
    pub ty: Option<Ty>,
    pub fmt: Formatting,
}

impl Literal {
    /// The primitive tag of this literal's resolved type, if attributed.
    pub fn type_tag(&self) -> Option<Tag> {
        match self.ty {
            Some(Ty::Primitive(tag)) => Some(tag),
            _ => None,
        }
    }
}

/// `select.name(args)` — or an unqualified `name(args)` when `select` is
/// absent.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodInvocation {
    pub id: NodeId,
    pub select: Option<Box<Expression>>,
    /// Explicit type arguments, e.g. `Collections.<String>emptyList()`.
    pub type_params: Vec<NameTree>,
    pub name: Ident,
    pub args: Vec<Expression>,
    /// The resolved signature this call site binds to, if attribution
    /// found one.
    pub ty: Option<MethodTy>,
    pub fmt: Formatting,
}

impl MethodInvocation {
    /// True iff attribution resolved this call to a static method. An
    /// unresolved call is never treated as static.
    pub fn is_static_call(&self) -> bool {
        self.ty.as_ref().is_some_and(|t| t.has_flags(Flags::STATIC))
    }

    /// Resolved return type of the call, if attributed.
    pub fn return_type(&self) -> Option<&Ty> {
        self.ty.as_ref().and_then(|t| t.return_type.as_ref())
    }

    /// Class declaring the resolved method, if attributed.
    pub fn declaring_type(&self) -> Option<&Arc<ClassTy>> {
        self.ty.as_ref().and_then(|t| t.declaring_type.as_ref())
    }
}

/// `new type_expr[dim]...` with an optional initializer list.
#[derive(Debug, Clone, PartialEq)]
pub struct NewArray {
    pub id: NodeId,
    pub type_expr: Option<Box<NameTree>>,
    pub dimensions: Vec<Expression>,
    pub initializer: Option<Vec<Expression>>,
    pub ty: Option<Ty>,
    pub fmt: Formatting,
}

/// `new clazz(args)` with an optional anonymous class body.
#[derive(Debug, Clone, PartialEq)]
pub struct NewClass {
    pub id: NodeId,
    pub clazz: Box<NameTree>,
    pub args: Vec<Expression>,
    pub body: Option<Block>,
    pub ty: Option<Ty>,
    pub fmt: Formatting,
}

/// `(clazz) expr`.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeCast {
    pub id: NodeId,
    pub clazz: Box<NameTree>,
    pub expr: Box<Expression>,
    pub ty: Option<Ty>,
    pub fmt: Formatting,
}

/// `(tree)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Parentheses {
    pub id: NodeId,
    pub tree: Box<Expression>,
    pub ty: Option<Ty>,
    pub fmt: Formatting,
}

/// `containing::reference`.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberReference {
    pub id: NodeId,
    pub containing: Box<Expression>,
    pub reference: Ident,
    pub ty: Option<Ty>,
    pub fmt: Formatting,
}

/// A position the grammar allows to be empty, e.g. a lone semicolon.
#[derive(Debug, Clone, PartialEq)]
pub struct Empty {
    pub id: NodeId,
    pub fmt: Formatting,
}

/// Escape hatch for source the front end could not parse. Opaque to the
/// engine; carried through rewrites verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct UnparsedSource {
    pub id: NodeId,
    pub source: String,
    pub fmt: Formatting,
}

/// `clazz<type_arguments>`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterizedType {
    pub id: NodeId,
    pub clazz: Box<NameTree>,
    pub type_arguments: Vec<NameTree>,
    pub ty: Option<Ty>,
    pub fmt: Formatting,
}

/// `element_type[]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayType {
    pub id: NodeId,
    pub element_type: Box<NameTree>,
    pub ty: Option<Ty>,
    pub fmt: Formatting,
}

/// A primitive type in name position, e.g. the `int` in `int[] xs`.
#[derive(Debug, Clone, PartialEq)]
pub struct Primitive {
    pub id: NodeId,
    pub tag: Tag,
    pub fmt: Formatting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WildcardBound {
    Extends,
    Super,
}

/// `?`, `? extends T`, `? super T`.
#[derive(Debug, Clone, PartialEq)]
pub struct Wildcard {
    pub id: NodeId,
    pub bound: Option<WildcardBound>,
    pub bounded_type: Option<Box<NameTree>>,
    pub fmt: Formatting,
}

// ============================================================================
// Sums
// ============================================================================

/// The expression sum. Expressions may also appear in statement position
/// (wrapped by `Statement::Expr`), as in the source language.
#[allow(clippy::large_enum_variant)]
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    ArrayAccess(ArrayAccess),
    Assign(Assign),
    AssignOp(AssignOp),
    Binary(Binary),
    Empty(Empty),
    FieldAccess(FieldAccess),
    Ident(Ident),
    InstanceOf(InstanceOf),
    Lambda(Lambda),
    Literal(Literal),
    MemberReference(MemberReference),
    MethodInvocation(MethodInvocation),
    NewArray(NewArray),
    NewClass(NewClass),
    Parentheses(Parentheses),
    Ternary(Ternary),
    TypeCast(TypeCast),
    Unary(Unary),
    UnparsedSource(UnparsedSource),
}

/// The sum of node kinds that can stand in type-name position: extends and
/// implements clauses, throws clauses, cast targets, instantiation targets,
/// variable type expressions, parameterized-type arguments, wildcard
/// bounds, and multi-catch alternatives.
#[allow(clippy::large_enum_variant)]
#[derive(Debug, Clone, PartialEq)]
pub enum NameTree {
    ArrayType(ArrayType),
    FieldAccess(FieldAccess),
    Ident(Ident),
    MultiCatch(MultiCatch),
    ParameterizedType(ParameterizedType),
    Primitive(Primitive),
    Wildcard(Wildcard),
}

/// Borrowed view of a node in type-name position, handed to the
/// `visit_type_name` hook. Also produced from an expression receiver when
/// the static-call rule reroutes it.
#[derive(Debug, Clone, Copy)]
pub enum NameTreeRef<'t> {
    ArrayType(&'t ArrayType),
    FieldAccess(&'t FieldAccess),
    Ident(&'t Ident),
    MultiCatch(&'t MultiCatch),
    ParameterizedType(&'t ParameterizedType),
    Primitive(&'t Primitive),
    Wildcard(&'t Wildcard),
}

impl<'t> From<&'t NameTree> for NameTreeRef<'t> {
    fn from(name: &'t NameTree) -> NameTreeRef<'t> {
        match name {
            NameTree::ArrayType(n) => NameTreeRef::ArrayType(n),
            NameTree::FieldAccess(n) => NameTreeRef::FieldAccess(n),
            NameTree::Ident(n) => NameTreeRef::Ident(n),
            NameTree::MultiCatch(n) => NameTreeRef::MultiCatch(n),
            NameTree::ParameterizedType(n) => NameTreeRef::ParameterizedType(n),
            NameTree::Primitive(n) => NameTreeRef::Primitive(n),
            NameTree::Wildcard(n) => NameTreeRef::Wildcard(n),
        }
    }
}

impl Expression {
    /// View this expression as a type-name node, if it has a name shape.
    ///
    /// A method invocation's receiver is represented as an ordinary
    /// expression; when the resolved method is static, the receiver names a
    /// class and the traversal engine reroutes it through
    /// `visit_type_name` using this view.
    pub fn as_name_tree(&self) -> Option<NameTreeRef<'_>> {
        match self {
            Expression::Ident(n) => Some(NameTreeRef::Ident(n)),
            Expression::FieldAccess(n) => Some(NameTreeRef::FieldAccess(n)),
            _ => None,
        }
    }
}
