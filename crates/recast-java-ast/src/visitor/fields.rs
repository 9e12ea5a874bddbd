// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! FindFields visitor: class-typed field lookup over resolved members.
//!
//! This is a search recipe built on the traversal engine: it walks a
//! compilation unit, then reads each top-level class's *resolved* member
//! list (not the syntax) so that fields inherited from supertypes can be
//! reported too.

use std::sync::Arc;

use recast_core::{ClassTy, Flags, Ty};
use serde::{Deserialize, Serialize};

use super::cursor::Cursor;
use super::dispatch::{visit, walk_compilation_unit};
use super::traits::AstVisitor;
use crate::nodes::{CompilationUnit, TreeRef};

/// One matching field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// The member's name.
    pub name: String,
    /// Fully-qualified name of the member's class type.
    pub ty: String,
}

/// A visitor that finds fields of a given class type in the top-level
/// types of a compilation unit.
///
/// With `include_inherited`, the supertype chain is scanned too, skipping
/// private members and stopping at a missing supertype or at the cyclic
/// sentinel.
///
/// # Example
///
/// ```ignore
/// let fields = FindFields::find(&unit, "java.lang.String", true);
/// for field in &fields {
///     println!("{}: {}", field.name, field.ty);
/// }
/// ```
pub struct FindFields {
    clazz: String,
    include_inherited: bool,
}

impl FindFields {
    pub fn new(clazz: impl Into<String>, include_inherited: bool) -> FindFields {
        FindFields {
            clazz: clazz.into(),
            include_inherited,
        }
    }

    /// Find matching fields in `unit`'s top-level types.
    pub fn find(unit: &CompilationUnit, clazz: &str, include_inherited: bool) -> Vec<Field> {
        let mut visitor = FindFields::new(clazz, include_inherited);
        visit(&mut visitor, TreeRef::from(unit), &Cursor::root())
    }

    fn super_fields(&self, class: Option<&Arc<ClassTy>>, in_hierarchy: bool) -> Vec<Field> {
        let Some(class) = class else {
            return Vec::new();
        };
        if class.is_cyclic_ref() {
            return Vec::new();
        }

        let mut fields: Vec<Field> = class
            .members
            .iter()
            .filter(|member| !in_hierarchy || !member.has_flags(Flags::PRIVATE))
            // Arrays of the matching class are Ty::Array and do not match.
            .filter_map(|member| {
                let member_class = member.ty.as_ref().and_then(Ty::as_class)?;
                (member_class.fully_qualified_name == self.clazz).then(|| Field {
                    name: member.name.clone(),
                    ty: member_class.fully_qualified_name.clone(),
                })
            })
            .collect();

        if self.include_inherited {
            fields.extend(self.super_fields(class.supertype.as_ref(), true));
        }
        fields
    }
}

impl<'t> AstVisitor<'t> for FindFields {
    type Output = Vec<Field>;

    fn visit_compilation_unit(
        &mut self,
        node: &'t CompilationUnit,
        cursor: &Cursor<'t>,
    ) -> Vec<Field> {
        let r = walk_compilation_unit(self, node, cursor);
        let found: Vec<Field> = node
            .classes
            .iter()
            .flat_map(|class| self.super_fields(class.ty.as_ref().and_then(Ty::as_class), false))
            .collect();
        self.reduce(r, found)
    }
}
