//! Assembly metadata
//!
//! This module provides the AssemblyMetadata structure: the set of reflected
//! types declared by one assembly, as handed over by a reflection front end.

use crate::docs::MemberId;
use crate::ir::ReflectedType;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Metadata for an entire assembly
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssemblyMetadata {
    /// Assembly name (e.g., "Acme.Widgets")
    pub name: String,

    /// Types declared by this assembly, in reflection order
    #[serde(default)]
    pub types: Vec<ReflectedType>,
}

impl AssemblyMetadata {
    /// Create a new assembly
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            types: Vec::new(),
        }
    }

    /// Add a type
    pub fn type_def(mut self, ty: ReflectedType) -> Self {
        self.types.push(ty);
        self
    }

    /// Set types
    pub fn with_types(mut self, types: Vec<ReflectedType>) -> Self {
        self.types = types;
        self
    }

    /// Deserialize from a JSON document
    pub fn from_json(json: &str) -> Result<Self, MetadataError> {
        let assembly: AssemblyMetadata = serde_json::from_str(json)?;
        assembly.validate()?;
        Ok(assembly)
    }

    /// Serialize to a JSON document
    pub fn to_json(&self) -> Result<String, MetadataError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Find a type by simple name
    pub fn find(&self, name: &str) -> Option<&ReflectedType> {
        self.types.iter().find(|t| t.name() == name)
    }

    /// Validate the assembly contents
    pub fn validate(&self) -> Result<(), AssemblyValidationError> {
        if self.name.is_empty() {
            return Err(AssemblyValidationError::EmptyName);
        }

        let mut seen = std::collections::HashSet::new();
        for ty in &self.types {
            if ty.assembly() != self.name {
                return Err(AssemblyValidationError::ForeignType {
                    type_name: ty.identity.qualified_name(),
                    assembly: ty.assembly().to_string(),
                });
            }
            let id = MemberId::for_type(ty);
            if !seen.insert(id.clone()) {
                return Err(AssemblyValidationError::DuplicateType(id));
            }
        }

        Ok(())
    }
}

/// Errors that can occur during assembly validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssemblyValidationError {
    /// Assembly name is empty
    #[error("assembly name cannot be empty")]
    EmptyName,
    /// Two types share a documentation identifier
    #[error("duplicate type: {0}")]
    DuplicateType(String),
    /// A type claims to be declared by a different assembly
    #[error("type {type_name} is declared by {assembly}")]
    ForeignType { type_name: String, assembly: String },
}

/// Errors loading assembly metadata
#[derive(Debug, Error)]
pub enum MetadataError {
    /// Malformed JSON document
    #[error("invalid metadata document: {0}")]
    Json(#[from] serde_json::Error),
    /// Document parsed but failed validation
    #[error(transparent)]
    Invalid(#[from] AssemblyValidationError),
}

/// Builder for constructing AssemblyMetadata from discovered types
#[derive(Debug, Default)]
pub struct AssemblyBuilder {
    name: Option<String>,
    types: Vec<ReflectedType>,
}

impl AssemblyBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set assembly name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Add a type
    pub fn type_def(mut self, ty: ReflectedType) -> Self {
        self.types.push(ty);
        self
    }

    /// Add several types
    pub fn types(mut self, types: impl IntoIterator<Item = ReflectedType>) -> Self {
        self.types.extend(types);
        self
    }

    /// Build the assembly
    pub fn build(self) -> Result<AssemblyMetadata, AssemblyValidationError> {
        let name = self.name.ok_or(AssemblyValidationError::EmptyName)?;
        let assembly = AssemblyMetadata::new(name).with_types(self.types);
        assembly.validate()?;
        Ok(assembly)
    }
}
