//! The interned type model.
//!
//! Types are immutable values. `Class` and `Package` values are interned
//! per resolution session through a [`TypeCache`]: two lookups for the same
//! fully-qualified name yield the same `Arc`, so pointer identity is a
//! valid fast-path equality check, and "copy with one field changed"
//! operations cannot fragment canonical identity unless they go through the
//! explicit [`ClassTy::rebuild`] recache operation.
//!
//! A class whose declaration indirectly references itself before its shape
//! is known resolves to the [`ClassTy::cyclic`] sentinel rather than
//! recursing; callers must test [`ClassTy::is_cyclic_ref`] before trusting
//! a supertype's shape.

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

// ============================================================================
// Modifier flags
// ============================================================================

bitflags::bitflags! {
    /// Declaration modifier bits, in the javac-compatible layout.
    ///
    /// Bit 9 is reserved. Queries test via bitwise AND ([`Flags::contains`]),
    /// never equality: a `public static final` member still "has" `STATIC`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Flags: u64 {
        const PUBLIC = 1;
        const PRIVATE = 1 << 1;
        const PROTECTED = 1 << 2;
        const STATIC = 1 << 3;
        const FINAL = 1 << 4;
        const SYNCHRONIZED = 1 << 5;
        const VOLATILE = 1 << 6;
        const TRANSIENT = 1 << 7;
        const NATIVE = 1 << 8;
        const ABSTRACT = 1 << 10;
        const STRICTFP = 1 << 11;
    }
}

// ============================================================================
// Primitive tags
// ============================================================================

/// Tags for primitive and pseudo-primitive types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tag {
    Boolean,
    Byte,
    Char,
    Double,
    Float,
    Int,
    Long,
    Short,
    Void,
    String,
    None,
    Wildcard,
    Null,
}

// ============================================================================
// Type values
// ============================================================================

/// A resolved type attached to AST nodes by attribution.
///
/// `Class` and `Package` payloads are interned `Arc`s; comparing them with
/// `==` takes a pointer-identity fast path before falling back to
/// structural equality.
#[derive(Debug, Clone)]
pub enum Ty {
    Package(Arc<PackageTy>),
    Class(Arc<ClassTy>),
    Method(Arc<MethodTy>),
    GenericTypeVariable(Arc<GenericTy>),
    Array(Arc<ArrayTy>),
    Primitive(Tag),
    Var(Arc<VarTy>),
}

/// A package, owned by its enclosing package (or nothing at the root).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageTy {
    pub full_name: String,
    pub owner: Option<Ty>,
}

/// A class, interned by fully-qualified name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassTy {
    pub fully_qualified_name: String,
    pub owner: Option<Ty>,
    pub members: Vec<VarTy>,
    pub supertype: Option<Arc<ClassTy>>,
}

/// A resolved method signature.
///
/// `declaring_type` and `flags` come from the declaration site; the engine
/// uses them to detect static access and to keep call-site attribution
/// consistent when a rewrite changes a receiver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodTy {
    pub declaring_type: Option<Arc<ClassTy>>,
    pub return_type: Option<Ty>,
    pub param_types: Vec<Ty>,
    pub flags: Flags,
}

/// A generic type variable, optionally bounded by a class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericTy {
    pub name: String,
    pub bound: Option<Arc<ClassTy>>,
}

/// An array type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayTy {
    pub elem_type: Ty,
}

/// A member variable: name, resolved type, modifier flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarTy {
    pub name: String,
    pub ty: Option<Ty>,
    pub flags: Flags,
}

impl PartialEq for Ty {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Ty::Package(a), Ty::Package(b)) => Arc::ptr_eq(a, b) || a == b,
            (Ty::Class(a), Ty::Class(b)) => Arc::ptr_eq(a, b) || a == b,
            (Ty::Method(a), Ty::Method(b)) => a == b,
            (Ty::GenericTypeVariable(a), Ty::GenericTypeVariable(b)) => a == b,
            (Ty::Array(a), Ty::Array(b)) => a == b,
            (Ty::Primitive(a), Ty::Primitive(b)) => a == b,
            (Ty::Var(a), Ty::Var(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Ty {}

impl Ty {
    /// Narrow to a class, or `None` if this is any other variant.
    pub fn as_class(&self) -> Option<&Arc<ClassTy>> {
        match self {
            Ty::Class(c) => Some(c),
            _ => None,
        }
    }

    /// Narrow to a package.
    pub fn as_package(&self) -> Option<&Arc<PackageTy>> {
        match self {
            Ty::Package(p) => Some(p),
            _ => None,
        }
    }

    /// Narrow to an array type.
    pub fn as_array(&self) -> Option<&Arc<ArrayTy>> {
        match self {
            Ty::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Narrow to a generic type variable.
    pub fn as_generic(&self) -> Option<&Arc<GenericTy>> {
        match self {
            Ty::GenericTypeVariable(g) => Some(g),
            _ => None,
        }
    }

    /// Narrow to a method signature.
    pub fn as_method(&self) -> Option<&Arc<MethodTy>> {
        match self {
            Ty::Method(m) => Some(m),
            _ => None,
        }
    }

    /// True iff this is an array whose element is a class with the given
    /// fully-qualified name, or a generic type variable with that name.
    ///
    /// Lets generic-aware call sites check "is this parameter a `T...`
    /// varargs array" without branching on raw vs. generic element kind.
    pub fn is_array_of_type(&self, qualified_name_or_type_var: &str) -> bool {
        match self {
            Ty::Array(arr) => match &arr.elem_type {
                Ty::Class(c) => c.fully_qualified_name == qualified_name_or_type_var,
                Ty::GenericTypeVariable(g) => g.name == qualified_name_or_type_var,
                _ => false,
            },
            _ => false,
        }
    }

    /// Walk the owner chain upward looking for a class with the given
    /// fully-qualified name.
    ///
    /// Terminates on match, on a non-owned type, or when the chain runs
    /// out: every package owner has a strictly shorter name, so the chain
    /// is finite by construction.
    pub fn owned_by_type(&self, clazz: &str) -> bool {
        let mut current = Some(self);
        while let Some(ty) = current {
            if let Ty::Class(c) = ty {
                if c.fully_qualified_name == clazz {
                    return true;
                }
            }
            current = match ty {
                Ty::Class(c) => c.owner.as_ref(),
                Ty::Package(p) => p.owner.as_ref(),
                _ => None,
            };
        }
        false
    }
}

// ============================================================================
// Type cache
// ============================================================================

/// Per-session interning pools for classes and packages.
///
/// One cache per attribution session, one writer per cache: the cache is
/// append-only while attribution runs and read-only afterwards. Callers
/// wanting concurrent attribution passes use one cache per pass.
#[derive(Debug, Default)]
pub struct TypeCache {
    classes: HashMap<String, Arc<ClassTy>>,
    packages: HashMap<String, Arc<PackageTy>>,
}

impl TypeCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of interned classes.
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Number of interned packages.
    pub fn package_count(&self) -> usize {
        self.packages.len()
    }
}

static CYCLIC: Lazy<Arc<ClassTy>> = Lazy::new(|| {
    Arc::new(ClassTy {
        fully_qualified_name: "CYCLIC_TYPE_REF".to_string(),
        owner: None,
        members: Vec::new(),
        supertype: None,
    })
});

impl PackageTy {
    /// Intern the package for `full_name`, constructing it (and its owner
    /// chain) on first request. An empty name is absence, not a package.
    pub fn build(cache: &mut TypeCache, full_name: &str) -> Option<Arc<PackageTy>> {
        if full_name.is_empty() {
            return None;
        }
        if let Some(pkg) = cache.packages.get(full_name) {
            return Some(pkg.clone());
        }
        let owner = full_name
            .rfind('.')
            .and_then(|idx| Self::build(cache, &full_name[..idx]))
            .map(Ty::Package);
        let pkg = Arc::new(PackageTy {
            full_name: full_name.to_string(),
            owner,
        });
        tracing::trace!(package = full_name, "interned package");
        cache.packages.insert(full_name.to_string(), pkg.clone());
        Some(pkg)
    }
}

impl ClassTy {
    /// Intern the class for `fully_qualified_name`.
    ///
    /// The first request constructs the class, deriving its owner by
    /// stripping the trailing name segment. Re-requests return the cached
    /// instance even when called with different `members` or `supertype`
    /// arguments; use [`ClassTy::rebuild`] to update a cached class's
    /// shape.
    pub fn build(
        cache: &mut TypeCache,
        fully_qualified_name: &str,
        members: Vec<VarTy>,
        supertype: Option<Arc<ClassTy>>,
    ) -> Arc<ClassTy> {
        if let Some(class) = cache.classes.get(fully_qualified_name) {
            return class.clone();
        }
        Self::rebuild(cache, fully_qualified_name, members, supertype)
    }

    /// Construct and cache a class for `fully_qualified_name`, replacing
    /// any previously interned instance.
    ///
    /// This is the explicit copy-and-recache operation for attribution
    /// steps that learn a class's members or supertype after first
    /// interning it. Values already holding the old `Arc` keep it; new
    /// lookups see the rebuilt class.
    pub fn rebuild(
        cache: &mut TypeCache,
        fully_qualified_name: &str,
        members: Vec<VarTy>,
        supertype: Option<Arc<ClassTy>>,
    ) -> Arc<ClassTy> {
        let owner = fully_qualified_name
            .rfind('.')
            .and_then(|idx| PackageTy::build(cache, &fully_qualified_name[..idx]))
            .map(Ty::Package);
        let class = Arc::new(ClassTy {
            fully_qualified_name: fully_qualified_name.to_string(),
            owner,
            members,
            supertype,
        });
        tracing::trace!(class = fully_qualified_name, "interned class");
        cache
            .classes
            .insert(fully_qualified_name.to_string(), class.clone());
        class
    }

    /// The shared sentinel standing in for a class whose resolution is in
    /// progress or whose self-reference could not be resolved.
    pub fn cyclic() -> Arc<ClassTy> {
        CYCLIC.clone()
    }

    /// Identity check against the cyclic sentinel. Structural equality is
    /// deliberately not enough: a user class could spell the same name.
    pub fn is_cyclic_ref(&self) -> bool {
        std::ptr::eq(self, Arc::as_ptr(&CYCLIC))
    }
}

impl MethodTy {
    /// Copy of this signature with the declaring type replaced.
    pub fn with_declaring_type(&self, declaring_type: Arc<ClassTy>) -> MethodTy {
        MethodTy {
            declaring_type: Some(declaring_type),
            ..self.clone()
        }
    }

    /// True iff this method has all of the given modifier flags.
    pub fn has_flags(&self, flags: Flags) -> bool {
        self.flags.contains(flags)
    }
}

impl VarTy {
    pub fn new(name: impl Into<String>, ty: Option<Ty>, flags: Flags) -> VarTy {
        VarTy {
            name: name.into(),
            ty,
            flags,
        }
    }

    /// True iff this member has all of the given modifier flags.
    pub fn has_flags(&self, flags: Flags) -> bool {
        self.flags.contains(flags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_interning_returns_same_instance() {
        let mut cache = TypeCache::new();
        let a = ClassTy::build(&mut cache, "a.b.C", Vec::new(), None);
        let b = ClassTy::build(
            &mut cache,
            "a.b.C",
            vec![VarTy::new("n", Some(Ty::Primitive(Tag::Int)), Flags::PRIVATE)],
            None,
        );
        // Second request ignores the differing members argument.
        assert!(Arc::ptr_eq(&a, &b));
        assert!(b.members.is_empty());
    }

    #[test]
    fn rebuild_replaces_cached_instance() {
        let mut cache = TypeCache::new();
        let first = ClassTy::build(&mut cache, "a.b.C", Vec::new(), None);
        let rebuilt = ClassTy::rebuild(
            &mut cache,
            "a.b.C",
            vec![VarTy::new("n", Some(Ty::Primitive(Tag::Int)), Flags::PRIVATE)],
            None,
        );
        assert!(!Arc::ptr_eq(&first, &rebuilt));
        let looked_up = ClassTy::build(&mut cache, "a.b.C", Vec::new(), None);
        assert!(Arc::ptr_eq(&rebuilt, &looked_up));
        assert_eq!(looked_up.members.len(), 1);
    }

    #[test]
    fn class_owner_is_enclosing_package() {
        let mut cache = TypeCache::new();
        let c = ClassTy::build(&mut cache, "a.b.C", Vec::new(), None);
        let owner = c.owner.as_ref().and_then(Ty::as_package).unwrap();
        assert_eq!(owner.full_name, "a.b");
    }

    #[test]
    fn class_without_package_has_no_owner() {
        let mut cache = TypeCache::new();
        let c = ClassTy::build(&mut cache, "A", Vec::new(), None);
        assert!(c.owner.is_none());
    }

    #[test]
    fn package_build_empty_name_is_absent() {
        let mut cache = TypeCache::new();
        assert!(PackageTy::build(&mut cache, "").is_none());
    }

    #[test]
    fn package_owner_chain() {
        let mut cache = TypeCache::new();
        let ab = PackageTy::build(&mut cache, "a.b").unwrap();
        let a = PackageTy::build(&mut cache, "a").unwrap();
        let owner = ab.owner.as_ref().and_then(Ty::as_package).unwrap();
        assert!(Arc::ptr_eq(owner, &a));
        assert!(a.owner.is_none());
    }

    #[test]
    fn cyclic_is_identity_not_structure() {
        let mut cache = TypeCache::new();
        let sentinel = ClassTy::cyclic();
        assert!(sentinel.is_cyclic_ref());
        // A user class spelling the same name is not the sentinel.
        let impostor = ClassTy::build(&mut cache, "CYCLIC_TYPE_REF", Vec::new(), None);
        assert!(!impostor.is_cyclic_ref());
    }

    #[test]
    fn has_flags_tests_via_and_mask() {
        let var = VarTy::new("x", None, Flags::PUBLIC | Flags::STATIC | Flags::FINAL);
        assert!(var.has_flags(Flags::STATIC));
        assert!(var.has_flags(Flags::PUBLIC | Flags::FINAL));
        assert!(!var.has_flags(Flags::PRIVATE));
        assert!(!var.has_flags(Flags::STATIC | Flags::PRIVATE));
    }

    #[test]
    fn is_array_of_type_shapes() {
        let mut cache = TypeCache::new();
        let integer = ClassTy::build(&mut cache, "java.lang.Integer", Vec::new(), None);
        let arr = Ty::Array(Arc::new(ArrayTy {
            elem_type: Ty::Class(integer.clone()),
        }));
        assert!(arr.is_array_of_type("java.lang.Integer"));
        assert!(!arr.is_array_of_type("java.lang.Long"));
        // Non-array of the same class is false.
        assert!(!Ty::Class(integer).is_array_of_type("java.lang.Integer"));
        // Generic element matches by type-variable name.
        let generic_arr = Ty::Array(Arc::new(ArrayTy {
            elem_type: Ty::GenericTypeVariable(Arc::new(GenericTy {
                name: "T".to_string(),
                bound: None,
            })),
        }));
        assert!(generic_arr.is_array_of_type("T"));
    }

    #[test]
    fn owned_by_type_walks_owner_chain() {
        let mut cache = TypeCache::new();
        let c = ClassTy::build(&mut cache, "a.b.C", Vec::new(), None);
        let ty = Ty::Class(c);
        assert!(ty.owned_by_type("a.b.C"));
        assert!(!ty.owned_by_type("a.b.D"));
        // A package chain has no classes to match, but still terminates.
        let p = Ty::Package(PackageTy::build(&mut cache, "a.b").unwrap());
        assert!(!p.owned_by_type("a.b.C"));
    }

    #[test]
    fn interned_class_equality_fast_path() {
        let mut cache = TypeCache::new();
        let a = Ty::Class(ClassTy::build(&mut cache, "a.b.C", Vec::new(), None));
        let b = Ty::Class(ClassTy::build(&mut cache, "a.b.C", Vec::new(), None));
        assert_eq!(a, b);
        assert_ne!(
            a,
            Ty::Class(ClassTy::build(&mut cache, "a.b.D", Vec::new(), None))
        );
    }

    #[test]
    fn with_declaring_type_preserves_signature() {
        let mut cache = TypeCache::new();
        let string = ClassTy::build(&mut cache, "java.lang.String", Vec::new(), None);
        let repl = ClassTy::build(&mut cache, "com.acme.Repl", Vec::new(), None);
        let m = MethodTy {
            declaring_type: Some(string.clone()),
            return_type: Some(Ty::Primitive(Tag::Int)),
            param_types: vec![Ty::Class(string)],
            flags: Flags::PUBLIC,
        };
        let retargeted = m.with_declaring_type(repl.clone());
        assert!(Arc::ptr_eq(
            retargeted.declaring_type.as_ref().unwrap(),
            &repl
        ));
        assert_eq!(retargeted.return_type, m.return_type);
        assert_eq!(retargeted.param_types, m.param_types);
        assert_eq!(retargeted.flags, m.flags);
    }
}
