//! Intermediate Representation (IR) for reflected types
//!
//! This module provides the type references and metadata structures for
//! representing compiled types and their members.

pub mod assembly;
pub mod inventory;
pub mod symbol;
pub mod types;

pub use assembly::*;
pub use inventory::*;
pub use symbol::*;
pub use types::*;
