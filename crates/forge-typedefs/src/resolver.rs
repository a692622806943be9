//! External type resolution
//!
//! Types declared in other assemblies are never generated here; the
//! generator only needs a display name for them. An [`ExternalTypeResolver`]
//! supplies that name, or nothing, in which case the reference renders as
//! `any`.

use crate::ir::TypeIdentity;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::sync::RwLock;

/// Supplies display names for types declared outside the generated assembly
pub trait ExternalTypeResolver {
    /// Name to use for `ty` when referenced from `from_assembly`
    fn resolve(&self, ty: &TypeIdentity, from_assembly: &str) -> Option<String>;
}

impl<F> ExternalTypeResolver for F
where
    F: Fn(&TypeIdentity, &str) -> Option<String>,
{
    fn resolve(&self, ty: &TypeIdentity, from_assembly: &str) -> Option<String> {
        self(ty, from_assembly)
    }
}

/// Resolver that knows no external types
#[derive(Debug, Clone, Copy, Default)]
pub struct NoResolver;

impl ExternalTypeResolver for NoResolver {
    fn resolve(&self, _ty: &TypeIdentity, _from_assembly: &str) -> Option<String> {
        None
    }
}

/// Resolves types from a set of referenced assemblies to their qualified
/// names, optionally under an import alias
#[derive(Debug, Clone, Default)]
pub struct ReferenceAssemblies {
    /// Assembly name -> import alias
    assemblies: IndexMap<String, Option<String>>,
}

impl ReferenceAssemblies {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Reference an assembly whose types are declared globally
    pub fn with_assembly(mut self, assembly: impl Into<String>) -> Self {
        self.assemblies.insert(assembly.into(), None);
        self
    }

    /// Reference an assembly whose declarations are imported under `alias`
    pub fn with_alias(mut self, assembly: impl Into<String>, alias: impl Into<String>) -> Self {
        self.assemblies.insert(assembly.into(), Some(alias.into()));
        self
    }

    /// Check if an assembly is referenced
    pub fn contains(&self, assembly: &str) -> bool {
        self.assemblies.contains_key(assembly)
    }
}

impl ExternalTypeResolver for ReferenceAssemblies {
    fn resolve(&self, ty: &TypeIdentity, _from_assembly: &str) -> Option<String> {
        match self.assemblies.get(&ty.assembly)? {
            Some(alias) => Some(format!("{}.{}", alias, ty.qualified_name())),
            None => Some(ty.qualified_name()),
        }
    }
}

/// Explicit qualified-name -> display-name table
#[derive(Debug, Clone, Default)]
pub struct TypeNameMap {
    names: IndexMap<String, String>,
}

impl TypeNameMap {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Map a qualified type name to a display name
    pub fn with_name(mut self, qualified: impl Into<String>, display: impl Into<String>) -> Self {
        self.names.insert(qualified.into(), display.into());
        self
    }
}

impl ExternalTypeResolver for TypeNameMap {
    fn resolve(&self, ty: &TypeIdentity, _from_assembly: &str) -> Option<String> {
        self.names.get(&ty.qualified_name()).cloned()
    }
}

/// Memoizes lookups of an inner resolver
///
/// Safe to share between threads when the inner resolver is.
#[derive(Debug, Default)]
pub struct CachingResolver<R> {
    inner: R,
    cache: RwLock<HashMap<(TypeIdentity, String), Option<String>>>,
}

impl<R: ExternalTypeResolver> CachingResolver<R> {
    /// Wrap a resolver
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Number of cached lookups (hits and misses)
    pub fn cached(&self) -> usize {
        self.cache.read().map(|cache| cache.len()).unwrap_or(0)
    }

    /// Unwrap the inner resolver
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: ExternalTypeResolver> ExternalTypeResolver for CachingResolver<R> {
    fn resolve(&self, ty: &TypeIdentity, from_assembly: &str) -> Option<String> {
        let key = (ty.clone(), from_assembly.to_string());
        if let Ok(cache) = self.cache.read() {
            if let Some(hit) = cache.get(&key) {
                return hit.clone();
            }
        }

        let resolved = self.inner.resolve(ty, from_assembly);
        if let Ok(mut cache) = self.cache.write() {
            cache.insert(key, resolved.clone());
        }
        resolved
    }
}
