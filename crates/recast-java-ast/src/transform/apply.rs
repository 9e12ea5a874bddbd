// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Phase two of a rewrite: bottom-up tree reconstruction.
//!
//! The rebuild consumes the tree and produces a new one. Children are
//! rebuilt before their parent's pending mutations run, so a mutation
//! always sees a node whose subtree is already final. Subtrees containing
//! no targeted node move through untouched — structural sharing falls out
//! of ownership, nothing is cloned.

use std::collections::HashMap;

use super::{AstTransform, TransformError};
use crate::nodes::{
    Annotation, AstNode, Block, Case, Catch, ClassDecl, CompilationUnit, EnumValue, Expression,
    FieldAccess, Ident, Import, MethodDecl, NameTree, NamedVar, NodeId, PackageDecl, Statement,
    Tree, TypeParameter, VariableDecls,
};

/// Apply collected transform records to a tree, producing the rewritten
/// tree.
///
/// Zero records is the identity: the returned tree is deep-equal to the
/// input. Records whose target is absent from the tree, and mutations
/// reaching a node of the wrong kind, are reported as errors.
pub fn apply(
    unit: CompilationUnit,
    transforms: Vec<AstTransform>,
) -> Result<CompilationUnit, TransformError> {
    if transforms.is_empty() {
        return Ok(unit);
    }
    tracing::debug!(transforms = transforms.len(), "applying AST transforms");
    let mut set = TransformSet::new(transforms);
    let unit = rebuild_compilation_unit(unit, &mut set)?;
    set.ensure_exhausted()?;
    Ok(unit)
}

/// Pending records grouped by target, consumed as the rebuild reaches each
/// target.
struct TransformSet {
    pending: HashMap<NodeId, Vec<AstTransform>>,
}

impl TransformSet {
    fn new(transforms: Vec<AstTransform>) -> TransformSet {
        let mut pending: HashMap<NodeId, Vec<AstTransform>> = HashMap::new();
        for transform in transforms {
            pending.entry(transform.target).or_default().push(transform);
        }
        TransformSet { pending }
    }

    fn take(&mut self, id: NodeId) -> Option<Vec<AstTransform>> {
        self.pending.remove(&id)
    }

    fn ensure_exhausted(&self) -> Result<(), TransformError> {
        match self.pending.iter().next() {
            Some((id, transforms)) => Err(TransformError::MissingTarget {
                rule: transforms[0].rule.clone(),
                id: *id,
            }),
            None => Ok(()),
        }
    }
}

fn run_pending(mut tree: Tree, pending: &[AstTransform]) -> Result<Tree, TransformError> {
    for transform in pending {
        tree = (transform.mutation)(tree).map_err(|unchanged| {
            TransformError::TargetKindMismatch {
                rule: transform.rule.clone(),
                id: transform.target,
                found: unchanged.kind_name(),
            }
        })?;
    }
    Ok(tree)
}

fn position_mismatch(pending: &[AstTransform], tree: Tree) -> TransformError {
    let last = pending
        .last()
        .expect("a pending transform set entry is never empty");
    TransformError::TargetKindMismatch {
        rule: last.rule.clone(),
        id: last.target,
        found: tree.kind_name(),
    }
}

/// Run a node's pending mutations in a position that requires the node's
/// exact kind back.
fn apply_typed<T>(node: T, set: &mut TransformSet) -> Result<T, TransformError>
where
    T: AstNode + Into<Tree> + TryFrom<Tree, Error = Tree>,
{
    let Some(pending) = set.take(node.id()) else {
        return Ok(node);
    };
    let tree = run_pending(node.into(), &pending)?;
    T::try_from(tree).map_err(|tree| position_mismatch(&pending, tree))
}

/// Run pending mutations in expression position: the replacement may be
/// any expression kind.
fn apply_expr(expr: Expression, set: &mut TransformSet) -> Result<Expression, TransformError> {
    let Some(pending) = set.take(expr.id()) else {
        return Ok(expr);
    };
    let tree = run_pending(expr.into(), &pending)?;
    Expression::try_from(tree).map_err(|tree| position_mismatch(&pending, tree))
}

/// Run pending mutations in statement position.
fn apply_stmt(stmt: Statement, set: &mut TransformSet) -> Result<Statement, TransformError> {
    let Some(pending) = set.take(stmt.id()) else {
        return Ok(stmt);
    };
    let tree = run_pending(Tree::from(stmt), &pending)?;
    Statement::try_from(tree).map_err(|tree| position_mismatch(&pending, tree))
}

/// Run pending mutations in type-name position.
fn apply_name_tree(name: NameTree, set: &mut TransformSet) -> Result<NameTree, TransformError> {
    let Some(pending) = set.take(name.id()) else {
        return Ok(name);
    };
    let tree = run_pending(Tree::from(name), &pending)?;
    NameTree::try_from(tree).map_err(|tree| position_mismatch(&pending, tree))
}

fn rebuild_vec<T>(
    items: Vec<T>,
    set: &mut TransformSet,
    rebuild: fn(T, &mut TransformSet) -> Result<T, TransformError>,
) -> Result<Vec<T>, TransformError> {
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        out.push(rebuild(item, set)?);
    }
    Ok(out)
}

fn rebuild_expr_box(
    expr: Box<Expression>,
    set: &mut TransformSet,
) -> Result<Box<Expression>, TransformError> {
    Ok(Box::new(rebuild_expr(*expr, set)?))
}

fn rebuild_opt_expr(
    expr: Option<Box<Expression>>,
    set: &mut TransformSet,
) -> Result<Option<Box<Expression>>, TransformError> {
    expr.map(|e| rebuild_expr_box(e, set)).transpose()
}

fn rebuild_stmt_box(
    stmt: Box<Statement>,
    set: &mut TransformSet,
) -> Result<Box<Statement>, TransformError> {
    Ok(Box::new(rebuild_stmt(*stmt, set)?))
}

fn rebuild_opt_name_tree(
    name: Option<NameTree>,
    set: &mut TransformSet,
) -> Result<Option<NameTree>, TransformError> {
    name.map(|n| rebuild_name_tree(n, set)).transpose()
}

fn rebuild_opt_block(
    block: Option<Block>,
    set: &mut TransformSet,
) -> Result<Option<Block>, TransformError> {
    block.map(|b| rebuild_block(b, set)).transpose()
}

// ============================================================================
// Typed positions
// ============================================================================

fn rebuild_compilation_unit(
    mut unit: CompilationUnit,
    set: &mut TransformSet,
) -> Result<CompilationUnit, TransformError> {
    unit.package_decl = unit
        .package_decl
        .map(|p| rebuild_package_decl(p, set))
        .transpose()?;
    unit.imports = rebuild_vec(unit.imports, set, rebuild_import)?;
    unit.classes = rebuild_vec(unit.classes, set, rebuild_class_decl)?;
    apply_typed(unit, set)
}

fn rebuild_package_decl(
    mut pkg: PackageDecl,
    set: &mut TransformSet,
) -> Result<PackageDecl, TransformError> {
    pkg.expr = rebuild_expr_box(pkg.expr, set)?;
    apply_typed(pkg, set)
}

fn rebuild_import(mut import: Import, set: &mut TransformSet) -> Result<Import, TransformError> {
    import.qualid = rebuild_field_access_children(import.qualid, set)?;
    import.qualid = apply_typed(import.qualid, set)?;
    apply_typed(import, set)
}

fn rebuild_class_decl(
    mut class: ClassDecl,
    set: &mut TransformSet,
) -> Result<ClassDecl, TransformError> {
    class.annotations = rebuild_vec(class.annotations, set, rebuild_annotation)?;
    class.name = rebuild_ident(class.name, set)?;
    class.type_params = rebuild_vec(class.type_params, set, rebuild_type_parameter)?;
    class.extends = rebuild_opt_name_tree(class.extends, set)?;
    class.implements = rebuild_vec(class.implements, set, rebuild_name_tree)?;
    class.body = rebuild_block(class.body, set)?;
    apply_typed(class, set)
}

fn rebuild_method_decl(
    mut method: MethodDecl,
    set: &mut TransformSet,
) -> Result<MethodDecl, TransformError> {
    method.annotations = rebuild_vec(method.annotations, set, rebuild_annotation)?;
    method.type_params = rebuild_vec(method.type_params, set, rebuild_type_parameter)?;
    method.return_type_expr = rebuild_opt_name_tree(method.return_type_expr, set)?;
    method.name = rebuild_ident(method.name, set)?;
    method.params = rebuild_vec(method.params, set, rebuild_variable_decls)?;
    method.throws = rebuild_vec(method.throws, set, rebuild_name_tree)?;
    method.body = rebuild_opt_block(method.body, set)?;
    method.default_value = rebuild_opt_expr(method.default_value, set)?;
    apply_typed(method, set)
}

fn rebuild_variable_decls(
    mut decls: VariableDecls,
    set: &mut TransformSet,
) -> Result<VariableDecls, TransformError> {
    decls.annotations = rebuild_vec(decls.annotations, set, rebuild_annotation)?;
    decls.type_expr = rebuild_opt_name_tree(decls.type_expr, set)?;
    decls.vars = rebuild_vec(decls.vars, set, rebuild_named_var)?;
    apply_typed(decls, set)
}

fn rebuild_named_var(
    mut var: NamedVar,
    set: &mut TransformSet,
) -> Result<NamedVar, TransformError> {
    var.name = rebuild_ident(var.name, set)?;
    var.initializer = rebuild_opt_expr(var.initializer, set)?;
    apply_typed(var, set)
}

fn rebuild_annotation(
    mut annotation: Annotation,
    set: &mut TransformSet,
) -> Result<Annotation, TransformError> {
    annotation.annotation_type = rebuild_name_tree(annotation.annotation_type, set)?;
    annotation.args = rebuild_vec(annotation.args, set, rebuild_expr)?;
    apply_typed(annotation, set)
}

fn rebuild_type_parameter(
    mut param: TypeParameter,
    set: &mut TransformSet,
) -> Result<TypeParameter, TransformError> {
    param.annotations = rebuild_vec(param.annotations, set, rebuild_annotation)?;
    param.name = rebuild_ident(param.name, set)?;
    param.bounds = rebuild_vec(param.bounds, set, rebuild_name_tree)?;
    apply_typed(param, set)
}

fn rebuild_ident(ident: Ident, set: &mut TransformSet) -> Result<Ident, TransformError> {
    apply_typed(ident, set)
}

fn rebuild_block(mut block: Block, set: &mut TransformSet) -> Result<Block, TransformError> {
    block.statements = rebuild_vec(block.statements, set, rebuild_stmt)?;
    apply_typed(block, set)
}

fn rebuild_case(mut case: Case, set: &mut TransformSet) -> Result<Case, TransformError> {
    case.pattern = rebuild_opt_expr(case.pattern, set)?;
    case.statements = rebuild_vec(case.statements, set, rebuild_stmt)?;
    apply_typed(case, set)
}

fn rebuild_catch(mut catch: Catch, set: &mut TransformSet) -> Result<Catch, TransformError> {
    catch.param = rebuild_variable_decls(catch.param, set)?;
    catch.body = rebuild_block(catch.body, set)?;
    apply_typed(catch, set)
}

fn rebuild_enum_value(
    mut value: EnumValue,
    set: &mut TransformSet,
) -> Result<EnumValue, TransformError> {
    value.name = rebuild_ident(value.name, set)?;
    value.initializer_args = value
        .initializer_args
        .map(|args| rebuild_vec(args, set, rebuild_expr))
        .transpose()?;
    apply_typed(value, set)
}

fn rebuild_field_access_children(
    mut field: FieldAccess,
    set: &mut TransformSet,
) -> Result<FieldAccess, TransformError> {
    field.target = rebuild_expr_box(field.target, set)?;
    field.name = rebuild_ident(field.name, set)?;
    Ok(field)
}

// ============================================================================
// Sum positions
// ============================================================================

fn rebuild_expr(expr: Expression, set: &mut TransformSet) -> Result<Expression, TransformError> {
    let expr = match expr {
        Expression::ArrayAccess(mut n) => {
            n.indexed = rebuild_expr_box(n.indexed, set)?;
            n.index = rebuild_expr_box(n.index, set)?;
            Expression::ArrayAccess(n)
        }
        Expression::Assign(mut n) => {
            n.variable = rebuild_expr_box(n.variable, set)?;
            n.assignment = rebuild_expr_box(n.assignment, set)?;
            Expression::Assign(n)
        }
        Expression::AssignOp(mut n) => {
            n.variable = rebuild_expr_box(n.variable, set)?;
            n.assignment = rebuild_expr_box(n.assignment, set)?;
            Expression::AssignOp(n)
        }
        Expression::Binary(mut n) => {
            n.left = rebuild_expr_box(n.left, set)?;
            n.right = rebuild_expr_box(n.right, set)?;
            Expression::Binary(n)
        }
        Expression::Empty(n) => Expression::Empty(n),
        Expression::FieldAccess(n) => {
            Expression::FieldAccess(rebuild_field_access_children(n, set)?)
        }
        Expression::Ident(n) => Expression::Ident(n),
        Expression::InstanceOf(mut n) => {
            n.expr = rebuild_expr_box(n.expr, set)?;
            n.clazz = Box::new(rebuild_name_tree(*n.clazz, set)?);
            Expression::InstanceOf(n)
        }
        Expression::Lambda(mut n) => {
            n.params = rebuild_vec(n.params, set, rebuild_variable_decls)?;
            n.body = rebuild_stmt_box(n.body, set)?;
            Expression::Lambda(n)
        }
        Expression::Literal(n) => Expression::Literal(n),
        Expression::MemberReference(mut n) => {
            n.containing = rebuild_expr_box(n.containing, set)?;
            n.reference = rebuild_ident(n.reference, set)?;
            Expression::MemberReference(n)
        }
        Expression::MethodInvocation(mut n) => {
            n.select = rebuild_opt_expr(n.select, set)?;
            n.type_params = rebuild_vec(n.type_params, set, rebuild_name_tree)?;
            n.name = rebuild_ident(n.name, set)?;
            n.args = rebuild_vec(n.args, set, rebuild_expr)?;
            Expression::MethodInvocation(n)
        }
        Expression::NewArray(mut n) => {
            n.type_expr = n
                .type_expr
                .map(|t| Ok::<_, TransformError>(Box::new(rebuild_name_tree(*t, set)?)))
                .transpose()?;
            n.dimensions = rebuild_vec(n.dimensions, set, rebuild_expr)?;
            n.initializer = n
                .initializer
                .map(|elements| rebuild_vec(elements, set, rebuild_expr))
                .transpose()?;
            Expression::NewArray(n)
        }
        Expression::NewClass(mut n) => {
            n.clazz = Box::new(rebuild_name_tree(*n.clazz, set)?);
            n.args = rebuild_vec(n.args, set, rebuild_expr)?;
            n.body = rebuild_opt_block(n.body, set)?;
            Expression::NewClass(n)
        }
        Expression::Parentheses(mut n) => {
            n.tree = rebuild_expr_box(n.tree, set)?;
            Expression::Parentheses(n)
        }
        Expression::Ternary(mut n) => {
            n.condition = rebuild_expr_box(n.condition, set)?;
            n.true_part = rebuild_expr_box(n.true_part, set)?;
            n.false_part = rebuild_expr_box(n.false_part, set)?;
            Expression::Ternary(n)
        }
        Expression::TypeCast(mut n) => {
            n.clazz = Box::new(rebuild_name_tree(*n.clazz, set)?);
            n.expr = rebuild_expr_box(n.expr, set)?;
            Expression::TypeCast(n)
        }
        Expression::Unary(mut n) => {
            n.expr = rebuild_expr_box(n.expr, set)?;
            Expression::Unary(n)
        }
        Expression::UnparsedSource(n) => Expression::UnparsedSource(n),
    };
    apply_expr(expr, set)
}

fn rebuild_stmt(stmt: Statement, set: &mut TransformSet) -> Result<Statement, TransformError> {
    let stmt = match stmt {
        // Expression position handles its own application; a wrapper pass
        // here would look the id up a second time.
        Statement::Expr(e) => return Ok(Statement::Expr(rebuild_expr(e, set)?)),
        Statement::Assert(mut n) => {
            n.condition = rebuild_expr_box(n.condition, set)?;
            Statement::Assert(n)
        }
        Statement::Block(n) => Statement::Block(rebuild_block(n, set)?),
        Statement::Break(mut n) => {
            n.label = n.label.map(|l| rebuild_ident(l, set)).transpose()?;
            Statement::Break(n)
        }
        Statement::ClassDecl(n) => Statement::ClassDecl(rebuild_class_decl(n, set)?),
        Statement::Continue(mut n) => {
            n.label = n.label.map(|l| rebuild_ident(l, set)).transpose()?;
            Statement::Continue(n)
        }
        Statement::DoWhileLoop(mut n) => {
            n.condition = rebuild_expr_box(n.condition, set)?;
            n.body = rebuild_stmt_box(n.body, set)?;
            Statement::DoWhileLoop(n)
        }
        Statement::Empty(n) => Statement::Empty(n),
        Statement::EnumValueSet(mut n) => {
            n.enums = rebuild_vec(n.enums, set, rebuild_enum_value)?;
            Statement::EnumValueSet(n)
        }
        Statement::ForEachLoop(mut n) => {
            n.variable = rebuild_variable_decls(n.variable, set)?;
            n.iterable = rebuild_expr_box(n.iterable, set)?;
            n.body = rebuild_stmt_box(n.body, set)?;
            Statement::ForEachLoop(n)
        }
        Statement::ForLoop(mut n) => {
            n.init = rebuild_vec(n.init, set, rebuild_stmt)?;
            n.condition = rebuild_opt_expr(n.condition, set)?;
            n.update = rebuild_vec(n.update, set, rebuild_stmt)?;
            n.body = rebuild_stmt_box(n.body, set)?;
            Statement::ForLoop(n)
        }
        Statement::If(mut n) => {
            n.condition = rebuild_expr_box(n.condition, set)?;
            n.then_part = rebuild_stmt_box(n.then_part, set)?;
            n.else_part = n.else_part.map(|e| rebuild_stmt_box(e, set)).transpose()?;
            Statement::If(n)
        }
        Statement::Label(mut n) => {
            n.label = rebuild_ident(n.label, set)?;
            n.statement = rebuild_stmt_box(n.statement, set)?;
            Statement::Label(n)
        }
        Statement::MethodDecl(n) => Statement::MethodDecl(rebuild_method_decl(n, set)?),
        Statement::Return(mut n) => {
            n.expr = rebuild_opt_expr(n.expr, set)?;
            Statement::Return(n)
        }
        Statement::Switch(mut n) => {
            n.selector = rebuild_expr_box(n.selector, set)?;
            n.cases = rebuild_vec(n.cases, set, rebuild_case)?;
            Statement::Switch(n)
        }
        Statement::Synchronized(mut n) => {
            n.lock = rebuild_expr_box(n.lock, set)?;
            n.body = rebuild_block(n.body, set)?;
            Statement::Synchronized(n)
        }
        Statement::Throw(mut n) => {
            n.exception = rebuild_expr_box(n.exception, set)?;
            Statement::Throw(n)
        }
        Statement::Try(mut n) => {
            n.resources = rebuild_vec(n.resources, set, rebuild_variable_decls)?;
            n.body = rebuild_block(n.body, set)?;
            n.catches = rebuild_vec(n.catches, set, rebuild_catch)?;
            n.finally = rebuild_opt_block(n.finally, set)?;
            Statement::Try(n)
        }
        Statement::VariableDecls(n) => Statement::VariableDecls(rebuild_variable_decls(n, set)?),
        Statement::WhileLoop(mut n) => {
            n.condition = rebuild_expr_box(n.condition, set)?;
            n.body = rebuild_stmt_box(n.body, set)?;
            Statement::WhileLoop(n)
        }
    };
    apply_stmt(stmt, set)
}

fn rebuild_name_tree(name: NameTree, set: &mut TransformSet) -> Result<NameTree, TransformError> {
    let name = match name {
        NameTree::ArrayType(mut n) => {
            n.element_type = Box::new(rebuild_name_tree(*n.element_type, set)?);
            NameTree::ArrayType(n)
        }
        NameTree::FieldAccess(n) => NameTree::FieldAccess(rebuild_field_access_children(n, set)?),
        NameTree::Ident(n) => NameTree::Ident(n),
        NameTree::MultiCatch(mut n) => {
            n.alternatives = rebuild_vec(n.alternatives, set, rebuild_name_tree)?;
            NameTree::MultiCatch(n)
        }
        NameTree::ParameterizedType(mut n) => {
            n.clazz = Box::new(rebuild_name_tree(*n.clazz, set)?);
            n.type_arguments = rebuild_vec(n.type_arguments, set, rebuild_name_tree)?;
            NameTree::ParameterizedType(n)
        }
        NameTree::Primitive(n) => NameTree::Primitive(n),
        NameTree::Wildcard(mut n) => {
            n.bounded_type = n
                .bounded_type
                .map(|b| Ok::<_, TransformError>(Box::new(rebuild_name_tree(*b, set)?)))
                .transpose()?;
            NameTree::Wildcard(n)
        }
    };
    apply_name_tree(name, set)
}
