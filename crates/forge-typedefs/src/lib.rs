//! Forge-Typedefs: TypeScript declarations for reflected assemblies
//!
//! This crate turns reflection metadata of an assembly (classes, structs,
//! interfaces, enums and delegates) into TypeScript ambient declarations,
//! with summaries pulled from the assembly's XML documentation file.
//!
//! Open generic types cannot be expressed directly as TypeScript classes
//! that are instantiated from runtime type tokens, so each one is emitted
//! as a factory function plus a static-shape and an instance-shape
//! interface.
//!
//! # Architecture
//!
//! - `ir`: Reflected types, members, type references and assemblies
//! - `docs`: Documentation identifiers and the XML documentation index
//! - `codegen`: Classification, signature rendering and emission
//! - `resolver`: Display names for types from other assemblies
//! - `config`: Generator configuration
//!
//! # Usage
//!
//! ```rust,ignore
//! use forge_typedefs::{AssemblyMetadata, DocumentationIndex, TypeDefinitionsGenerator};
//!
//! let assembly = AssemblyMetadata::from_json(&std::fs::read_to_string("Acme.json")?)?;
//! let docs = DocumentationIndex::from_path("Acme.xml")?;
//! let generator = TypeDefinitionsGenerator::without_references(&assembly.name, docs);
//!
//! let declarations = generator.generate_declarations(&assembly.types);
//! std::fs::write("Acme.d.ts", declarations.text)?;
//! ```

pub mod codegen;
pub mod config;
pub mod docs;
pub mod error;
pub mod ir;
pub mod resolver;

// Re-export commonly used types
pub use codegen::{Declarations, TypeDefinition, TypeDefinitionsGenerator};
pub use config::GeneratorConfig;
pub use docs::{DocumentationIndex, MemberId};
pub use error::{ConfigError, Diagnostics, DocsError, GenerateError, GenerateResult, Warning};
pub use ir::{
    collect_types, AssemblyBuilder, AssemblyMetadata, AssemblyValidationError, EnumValue,
    MemberKind, MetadataError, Parameter, PrimitiveType, ReflectedMember, ReflectedType,
    TypeIdentity, TypeKind, TypeRef, TypeRegistry, REFLECTED_TYPES,
};
pub use resolver::{
    CachingResolver, ExternalTypeResolver, NoResolver, ReferenceAssemblies, TypeNameMap,
};

// Re-export linkme for the type inventory
pub use linkme;
