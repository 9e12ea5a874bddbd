//! Core semantic model for recast.
//!
//! This crate provides the language-independent half of the refactoring
//! engine: an immutable, interned representation of a nominal type system
//! (packages, classes, methods, generics, arrays, primitives, member
//! variables) together with the per-session cache that gives class and
//! package values canonical identity.
//!
//! Attribution (the front end that resolves source text to types) and the
//! AST itself live elsewhere; everything here is a plain value that can be
//! attached to tree nodes and shared freely across passes.

pub mod types;

pub use types::{
    ArrayTy, ClassTy, Flags, GenericTy, MethodTy, PackageTy, Tag, Ty, TypeCache, VarTy,
};
