//! Code generation for TypeScript ambient declarations
//!
//! This module provides:
//! - Type-shape classification (enum, delegate, class, interface, generic)
//! - Signature rendering for types, parameters and members
//! - The generic type factory encoding
//! - Declaration emission and the generation session

pub mod classify;
pub mod emit;
pub mod generator;
pub mod generic;
pub mod signature;

pub use classify::{classify, DeclarationShape, GenericBase, MemberGroups};
pub use emit::{emit, BlockBody, BlockKind, DeclarationBlock, MemberLine};
pub use generator::{Declarations, TypeDefinition, TypeDefinitionsGenerator};
pub use generic::{GenericBody, GenericFactoryEncoder, FACTORY_TAG};
pub use signature::{MemberContext, SignatureRenderer};
