//! Compile-time type inventory
//!
//! This module provides the infrastructure for collecting reflected type
//! metadata at compile time using the `linkme` crate's distributed slices.

use crate::ir::ReflectedType;

/// Distributed slice for collecting reflected types at compile time
#[linkme::distributed_slice]
pub static REFLECTED_TYPES: [fn() -> ReflectedType];

/// Collect all registered types from the distributed slice
pub fn collect_types() -> Vec<ReflectedType> {
    REFLECTED_TYPES.iter().map(|f| f()).collect()
}

/// Registry for manually collecting types (alternative to linkme)
#[derive(Debug, Default)]
pub struct TypeRegistry {
    types: Vec<ReflectedType>,
}

impl TypeRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry from the distributed slice
    pub fn from_inventory() -> Self {
        Self {
            types: collect_types(),
        }
    }

    /// Register a type
    pub fn register_type(&mut self, ty: ReflectedType) {
        self.types.push(ty);
    }

    /// Get all registered types
    pub fn types(&self) -> &[ReflectedType] {
        &self.types
    }

    /// Registered types declared by the given assembly
    pub fn types_in<'a>(&'a self, assembly: &'a str) -> impl Iterator<Item = &'a ReflectedType> {
        self.types.iter().filter(move |t| t.assembly() == assembly)
    }

    /// Take ownership of types
    pub fn into_types(self) -> Vec<ReflectedType> {
        self.types
    }
}

/// Macro to register a reflected type in the distributed slice
#[macro_export]
macro_rules! register_type {
    ($ty:expr) => {
        const _: () = {
            #[$crate::linkme::distributed_slice($crate::ir::REFLECTED_TYPES)]
            #[linkme(crate = $crate::linkme)]
            static _REFLECTED_TYPE: fn() -> $crate::ir::ReflectedType = || $ty;
        };
    };
}
