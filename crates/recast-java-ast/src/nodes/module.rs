// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! The compilation-unit root node.

use super::statement::{ClassDecl, Import, PackageDecl};
use super::traits::{Formatting, NodeId};

/// One parsed source file: package declaration, imports, top-level types.
#[derive(Debug, Clone, PartialEq)]
pub struct CompilationUnit {
    pub id: NodeId,
    /// Path the front end parsed this unit from, if any.
    pub source_path: Option<String>,
    pub package_decl: Option<PackageDecl>,
    pub imports: Vec<Import>,
    pub classes: Vec<ClassDecl>,
    pub fmt: Formatting,
}
