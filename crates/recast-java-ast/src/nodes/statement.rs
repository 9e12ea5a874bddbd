// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Statement and declaration nodes.
//!
//! Modifier keywords are carried as [`Flags`] on the declaration nodes
//! rather than as child nodes; the keyword text itself is formatting,
//! which is opaque at this layer.

use recast_core::{Flags, Ty};

use super::expression::{Empty, Expression, FieldAccess, Ident, NameTree};
use super::traits::{Formatting, NodeId};

/// `{ statements }` — also the body of classes and methods.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub id: NodeId,
    pub statements: Vec<Statement>,
    pub fmt: Formatting,
}

/// `assert condition`.
#[derive(Debug, Clone, PartialEq)]
pub struct Assert {
    pub id: NodeId,
    pub condition: Box<Expression>,
    pub fmt: Formatting,
}

/// `break label?`.
#[derive(Debug, Clone, PartialEq)]
pub struct Break {
    pub id: NodeId,
    pub label: Option<Ident>,
    pub fmt: Formatting,
}

/// `continue label?`.
#[derive(Debug, Clone, PartialEq)]
pub struct Continue {
    pub id: NodeId,
    pub label: Option<Ident>,
    pub fmt: Formatting,
}

/// One `case pattern:` (or `default:`, with no pattern) arm of a switch.
#[derive(Debug, Clone, PartialEq)]
pub struct Case {
    pub id: NodeId,
    pub pattern: Option<Box<Expression>>,
    pub statements: Vec<Statement>,
    pub fmt: Formatting,
}

/// `catch (param) body`.
#[derive(Debug, Clone, PartialEq)]
pub struct Catch {
    pub id: NodeId,
    pub param: VariableDecls,
    pub body: Block,
    pub fmt: Formatting,
}

/// The `A | B` alternatives of a multi-catch parameter. Appears only in
/// type-expression position of a catch parameter's declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiCatch {
    pub id: NodeId,
    pub alternatives: Vec<NameTree>,
    pub fmt: Formatting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassKind {
    Class,
    Interface,
    Enum,
    Annotation,
}

/// A class, interface, enum, or annotation declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDecl {
    pub id: NodeId,
    pub annotations: Vec<Annotation>,
    pub modifiers: Flags,
    pub kind: ClassKind,
    pub name: Ident,
    pub type_params: Vec<TypeParameter>,
    pub extends: Option<NameTree>,
    pub implements: Vec<NameTree>,
    pub body: Block,
    pub ty: Option<Ty>,
    pub fmt: Formatting,
}

impl ClassDecl {
    /// The field declarations in this class's body, in source order.
    pub fn fields(&self) -> Vec<&VariableDecls> {
        self.body
            .statements
            .iter()
            .filter_map(|s| match s {
                Statement::VariableDecls(v) => Some(v),
                _ => None,
            })
            .collect()
    }

    /// The method declarations in this class's body, in source order.
    pub fn methods(&self) -> Vec<&MethodDecl> {
        self.body
            .statements
            .iter()
            .filter_map(|s| match s {
                Statement::MethodDecl(m) => Some(m),
                _ => None,
            })
            .collect()
    }
}

/// A method or constructor declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDecl {
    pub id: NodeId,
    pub annotations: Vec<Annotation>,
    pub modifiers: Flags,
    pub type_params: Vec<TypeParameter>,
    /// Absent for constructors.
    pub return_type_expr: Option<NameTree>,
    pub name: Ident,
    pub params: Vec<VariableDecls>,
    pub throws: Vec<NameTree>,
    /// Absent for abstract and interface methods.
    pub body: Option<Block>,
    /// Annotation member default, e.g. `int value() default 42`.
    pub default_value: Option<Box<Expression>>,
    pub ty: Option<Ty>,
    pub fmt: Formatting,
}

/// One declaration statement covering one or more variables of a shared
/// type expression, e.g. `int a, b = 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDecls {
    pub id: NodeId,
    pub annotations: Vec<Annotation>,
    pub modifiers: Flags,
    /// Absent for inferred-type positions (e.g. lambda parameters).
    pub type_expr: Option<NameTree>,
    pub vars: Vec<NamedVar>,
    pub fmt: Formatting,
}

/// One named variable within a [`VariableDecls`].
#[derive(Debug, Clone, PartialEq)]
pub struct NamedVar {
    pub id: NodeId,
    pub name: Ident,
    pub initializer: Option<Box<Expression>>,
    pub ty: Option<Ty>,
    pub fmt: Formatting,
}

/// `do body while (condition)`.
#[derive(Debug, Clone, PartialEq)]
pub struct DoWhileLoop {
    pub id: NodeId,
    pub condition: Box<Expression>,
    pub body: Box<Statement>,
    pub fmt: Formatting,
}

/// `while (condition) body`.
#[derive(Debug, Clone, PartialEq)]
pub struct WhileLoop {
    pub id: NodeId,
    pub condition: Box<Expression>,
    pub body: Box<Statement>,
    pub fmt: Formatting,
}

/// `for (init; condition; update) body`.
#[derive(Debug, Clone, PartialEq)]
pub struct ForLoop {
    pub id: NodeId,
    pub init: Vec<Statement>,
    pub condition: Option<Box<Expression>>,
    pub update: Vec<Statement>,
    pub body: Box<Statement>,
    pub fmt: Formatting,
}

/// `for (variable : iterable) body`.
#[derive(Debug, Clone, PartialEq)]
pub struct ForEachLoop {
    pub id: NodeId,
    pub variable: VariableDecls,
    pub iterable: Box<Expression>,
    pub body: Box<Statement>,
    pub fmt: Formatting,
}

/// `if (condition) then_part else else_part?`.
#[derive(Debug, Clone, PartialEq)]
pub struct If {
    pub id: NodeId,
    pub condition: Box<Expression>,
    pub then_part: Box<Statement>,
    pub else_part: Option<Box<Statement>>,
    pub fmt: Formatting,
}

/// `label: statement`.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub id: NodeId,
    pub label: Ident,
    pub statement: Box<Statement>,
    pub fmt: Formatting,
}

/// `return expr?`.
#[derive(Debug, Clone, PartialEq)]
pub struct Return {
    pub id: NodeId,
    pub expr: Option<Box<Expression>>,
    pub fmt: Formatting,
}

/// `switch (selector) { cases }`.
#[derive(Debug, Clone, PartialEq)]
pub struct Switch {
    pub id: NodeId,
    pub selector: Box<Expression>,
    pub cases: Vec<Case>,
    pub fmt: Formatting,
}

/// `synchronized (lock) body`.
#[derive(Debug, Clone, PartialEq)]
pub struct Synchronized {
    pub id: NodeId,
    pub lock: Box<Expression>,
    pub body: Block,
    pub fmt: Formatting,
}

/// `throw exception`.
#[derive(Debug, Clone, PartialEq)]
pub struct Throw {
    pub id: NodeId,
    pub exception: Box<Expression>,
    pub fmt: Formatting,
}

/// `try (resources) body catches finally?`.
#[derive(Debug, Clone, PartialEq)]
pub struct Try {
    pub id: NodeId,
    pub resources: Vec<VariableDecls>,
    pub body: Block,
    pub catches: Vec<Catch>,
    pub finally: Option<Block>,
    pub fmt: Formatting,
}

/// `@annotation_type(args)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub id: NodeId,
    pub annotation_type: NameTree,
    pub args: Vec<Expression>,
    pub ty: Option<Ty>,
    pub fmt: Formatting,
}

/// One constant of an enum declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumValue {
    pub id: NodeId,
    pub name: Ident,
    pub initializer_args: Option<Vec<Expression>>,
    pub fmt: Formatting,
}

/// The constants block of an enum declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumValueSet {
    pub id: NodeId,
    pub enums: Vec<EnumValue>,
    pub fmt: Formatting,
}

/// `import qualid` / `import static qualid`.
#[derive(Debug, Clone, PartialEq)]
pub struct Import {
    pub id: NodeId,
    pub qualid: FieldAccess,
    pub static_import: bool,
    pub fmt: Formatting,
}

/// `package expr`.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageDecl {
    pub id: NodeId,
    pub expr: Box<Expression>,
    pub fmt: Formatting,
}

/// One declared type parameter, e.g. `T extends Comparable<T>`.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeParameter {
    pub id: NodeId,
    pub annotations: Vec<Annotation>,
    pub name: Ident,
    pub bounds: Vec<NameTree>,
    pub fmt: Formatting,
}

/// The statement sum. Expressions in statement position are wrapped by
/// `Expr` without introducing a separate node kind: a traversal's path
/// contains the expression node itself.
#[allow(clippy::large_enum_variant)]
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Assert(Assert),
    Block(Block),
    Break(Break),
    ClassDecl(ClassDecl),
    Continue(Continue),
    DoWhileLoop(DoWhileLoop),
    Empty(Empty),
    EnumValueSet(EnumValueSet),
    Expr(Expression),
    ForEachLoop(ForEachLoop),
    ForLoop(ForLoop),
    If(If),
    Label(Label),
    MethodDecl(MethodDecl),
    Return(Return),
    Switch(Switch),
    Synchronized(Synchronized),
    Throw(Throw),
    Try(Try),
    VariableDecls(VariableDecls),
    WhileLoop(WhileLoop),
}
