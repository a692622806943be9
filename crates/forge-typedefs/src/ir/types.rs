//! Type references for forge-typedefs
//!
//! This module provides the representation of reflected type references
//! and their TypeScript spellings.
//!
//! # Type Mapping Overview
//!
//! ## Primitive Type Mapping
//!
//! | .NET Type | TypeScript Type | Notes |
//! |-----------|----------------|-------|
//! | `byte`, `sbyte`, `short`, `ushort` | `number` | |
//! | `int`, `uint`, `long`, `ulong` | `number` | Integral types collapse to number |
//! | `float`, `double`, `decimal` | `number` | |
//! | `bool` | `boolean` | |
//! | `string`, `char` | `string` | |
//! | `object` | `any` | No safely expressible shape |
//! | `IntPtr`, `UIntPtr` | `any` | No safely expressible shape |
//! | `void` | `void` | Return types only |
//!
//! ## Composite Type Mapping
//!
//! | .NET Type | TypeScript Type |
//! |-----------|----------------|
//! | `T[]` | `T[]` |
//! | `Nullable<T>` | `T \| undefined` |
//! | `Task` | `Promise<void>` |
//! | `Task<T>` | `Promise<T>` |
//! | `IEnumerable<T>` | `Iterable<T>` |
//! | `List<T>`, `IList<T>` | `T[]` |
//! | `IReadOnlyList<T>` | `readonly T[]` |
//! | `Dictionary<K, V>` | `Map<K, V>` |
//! | `HashSet<T>` | `Set<T>` |
//! | `DateTime` | `Date` |
//!
//! References to named types are never expanded: they render as a name only,
//! which keeps cyclic references (A has a member of type B, B of type A)
//! from recursing. See [`crate::codegen::SignatureRenderer`] for the
//! rendering rules that depend on the assembly being generated.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Built-in types of the source type system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimitiveType {
    Boolean,
    Char,
    SByte,
    Byte,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Single,
    Double,
    Decimal,
    String,
    Object,
    IntPtr,
    UIntPtr,
    Void,
}

impl PrimitiveType {
    /// Convert to TypeScript type string
    pub fn to_typescript(&self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Char | PrimitiveType::String => "string",
            PrimitiveType::SByte
            | PrimitiveType::Byte
            | PrimitiveType::Int16
            | PrimitiveType::UInt16
            | PrimitiveType::Int32
            | PrimitiveType::UInt32
            | PrimitiveType::Int64
            | PrimitiveType::UInt64 => "number",
            PrimitiveType::Single | PrimitiveType::Double | PrimitiveType::Decimal => "number",
            PrimitiveType::Object | PrimitiveType::IntPtr | PrimitiveType::UIntPtr => "any",
            PrimitiveType::Void => "void",
        }
    }

    /// Fully qualified runtime name, as used in documentation identifiers
    pub fn clr_name(&self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "System.Boolean",
            PrimitiveType::Char => "System.Char",
            PrimitiveType::SByte => "System.SByte",
            PrimitiveType::Byte => "System.Byte",
            PrimitiveType::Int16 => "System.Int16",
            PrimitiveType::UInt16 => "System.UInt16",
            PrimitiveType::Int32 => "System.Int32",
            PrimitiveType::UInt32 => "System.UInt32",
            PrimitiveType::Int64 => "System.Int64",
            PrimitiveType::UInt64 => "System.UInt64",
            PrimitiveType::Single => "System.Single",
            PrimitiveType::Double => "System.Double",
            PrimitiveType::Decimal => "System.Decimal",
            PrimitiveType::String => "System.String",
            PrimitiveType::Object => "System.Object",
            PrimitiveType::IntPtr => "System.IntPtr",
            PrimitiveType::UIntPtr => "System.UIntPtr",
            PrimitiveType::Void => "System.Void",
        }
    }

    /// Parse from a fully qualified runtime name or a C# keyword
    pub fn from_clr_name(s: &str) -> Option<Self> {
        match s {
            "System.Boolean" | "bool" => Some(PrimitiveType::Boolean),
            "System.Char" | "char" => Some(PrimitiveType::Char),
            "System.SByte" | "sbyte" => Some(PrimitiveType::SByte),
            "System.Byte" | "byte" => Some(PrimitiveType::Byte),
            "System.Int16" | "short" => Some(PrimitiveType::Int16),
            "System.UInt16" | "ushort" => Some(PrimitiveType::UInt16),
            "System.Int32" | "int" => Some(PrimitiveType::Int32),
            "System.UInt32" | "uint" => Some(PrimitiveType::UInt32),
            "System.Int64" | "long" => Some(PrimitiveType::Int64),
            "System.UInt64" | "ulong" => Some(PrimitiveType::UInt64),
            "System.Single" | "float" => Some(PrimitiveType::Single),
            "System.Double" | "double" => Some(PrimitiveType::Double),
            "System.Decimal" | "decimal" => Some(PrimitiveType::Decimal),
            "System.String" | "string" => Some(PrimitiveType::String),
            "System.Object" | "object" => Some(PrimitiveType::Object),
            "System.IntPtr" | "nint" => Some(PrimitiveType::IntPtr),
            "System.UIntPtr" | "nuint" => Some(PrimitiveType::UIntPtr),
            "System.Void" | "void" => Some(PrimitiveType::Void),
            _ => None,
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_typescript())
    }
}

/// Nominal identity of a declared type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeIdentity {
    /// Namespace (may be empty)
    #[serde(default)]
    pub namespace: String,
    /// Enclosing type names, outermost first (nested types only)
    #[serde(default)]
    pub enclosing: Vec<String>,
    /// Simple name, without any arity suffix
    pub name: String,
    /// Name of the declaring assembly
    pub assembly: String,
}

impl TypeIdentity {
    /// Create a new identity
    pub fn new(
        namespace: impl Into<String>,
        name: impl Into<String>,
        assembly: impl Into<String>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            enclosing: Vec::new(),
            name: name.into(),
            assembly: assembly.into(),
        }
    }

    /// Nest inside an enclosing type
    pub fn nested_in(mut self, enclosing: impl Into<String>) -> Self {
        self.enclosing.push(enclosing.into());
        self
    }

    /// Dotted path: namespace, enclosing types, then the simple name
    pub fn qualified_name(&self) -> String {
        let mut parts: Vec<&str> = Vec::with_capacity(self.enclosing.len() + 2);
        if !self.namespace.is_empty() {
            parts.push(&self.namespace);
        }
        parts.extend(self.enclosing.iter().map(String::as_str));
        parts.push(&self.name);
        parts.join(".")
    }
}

impl fmt::Display for TypeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.qualified_name())
    }
}

/// A reference to a type from a member signature
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TypeRef {
    /// Built-in type
    Primitive(PrimitiveType),

    /// Reference to a generic type parameter in scope (e.g. `T`)
    GenericParameter(String),

    /// T[] -> T[]
    Array(Box<TypeRef>),

    /// Nullable<T> -> T | undefined
    Nullable(Box<TypeRef>),

    /// Task / Task<T> -> Promise<void> / Promise<T>
    Task(Option<Box<TypeRef>>),

    /// Named class, interface, enum, delegate or struct, possibly
    /// instantiated with type arguments
    Named {
        identity: TypeIdentity,
        #[serde(default)]
        args: Vec<TypeRef>,
    },

    /// No safely expressible shape -> any
    #[default]
    Unknown,
}

impl TypeRef {
    /// Create a primitive type
    pub fn primitive(p: PrimitiveType) -> Self {
        TypeRef::Primitive(p)
    }

    /// Create a string type
    pub fn string() -> Self {
        TypeRef::Primitive(PrimitiveType::String)
    }

    /// Create a boolean type
    pub fn bool() -> Self {
        TypeRef::Primitive(PrimitiveType::Boolean)
    }

    /// Create a 32-bit integer type
    pub fn int() -> Self {
        TypeRef::Primitive(PrimitiveType::Int32)
    }

    /// Create a void type
    pub fn void() -> Self {
        TypeRef::Primitive(PrimitiveType::Void)
    }

    /// Create a generic parameter reference
    pub fn param(name: impl Into<String>) -> Self {
        TypeRef::GenericParameter(name.into())
    }

    /// Create an array type
    pub fn array(element: TypeRef) -> Self {
        TypeRef::Array(Box::new(element))
    }

    /// Create a nullable type
    pub fn nullable(inner: TypeRef) -> Self {
        TypeRef::Nullable(Box::new(inner))
    }

    /// Create a Task<T> type
    pub fn task(result: TypeRef) -> Self {
        TypeRef::Task(Some(Box::new(result)))
    }

    /// Create a named, non-generic type reference
    pub fn named(identity: TypeIdentity) -> Self {
        TypeRef::Named {
            identity,
            args: Vec::new(),
        }
    }

    /// Create a named type reference instantiated with type arguments
    pub fn generic(identity: TypeIdentity, args: Vec<TypeRef>) -> Self {
        TypeRef::Named { identity, args }
    }

    /// Check if this is the void type
    pub fn is_void(&self) -> bool {
        matches!(self, TypeRef::Primitive(PrimitiveType::Void))
    }

    /// Visit every generic parameter name referenced by this type
    pub fn generic_parameters(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_generic_parameters(&mut out);
        out
    }

    fn collect_generic_parameters<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            TypeRef::GenericParameter(name) => out.push(name),
            TypeRef::Array(inner) | TypeRef::Nullable(inner) => {
                inner.collect_generic_parameters(out)
            }
            TypeRef::Task(Some(inner)) => inner.collect_generic_parameters(out),
            TypeRef::Named { args, .. } => {
                for arg in args {
                    arg.collect_generic_parameters(out);
                }
            }
            TypeRef::Primitive(_) | TypeRef::Task(None) | TypeRef::Unknown => {}
        }
    }

    /// Render in documentation-identifier syntax (e.g. `System.Int32`,
    /// `System.Collections.Generic.List{T}`, `System.String[]`)
    pub fn doc_id_name(&self) -> String {
        match self {
            TypeRef::Primitive(p) => p.clr_name().to_string(),
            TypeRef::GenericParameter(name) => name.clone(),
            TypeRef::Array(inner) => format!("{}[]", inner.doc_id_name()),
            TypeRef::Nullable(inner) => format!("System.Nullable{{{}}}", inner.doc_id_name()),
            TypeRef::Task(None) => "System.Threading.Tasks.Task".to_string(),
            TypeRef::Task(Some(inner)) => {
                format!("System.Threading.Tasks.Task{{{}}}", inner.doc_id_name())
            }
            TypeRef::Named { identity, args } => {
                if args.is_empty() {
                    identity.qualified_name()
                } else {
                    let args: Vec<String> = args.iter().map(|a| a.doc_id_name()).collect();
                    format!("{}{{{}}}", identity.qualified_name(), args.join(","))
                }
            }
            TypeRef::Unknown => "System.Object".to_string(),
        }
    }
}

/// TypeScript spelling of a well-known framework type, given its already
/// rendered type arguments. Returns `None` for types that are not built in.
pub fn well_known_typescript(qualified_name: &str, args: &[String]) -> Option<String> {
    let rendered = match (qualified_name, args) {
        ("System.DateTime" | "System.DateTimeOffset", []) => "Date".to_string(),
        ("System.Guid", []) => "string".to_string(),
        ("System.Numerics.BigInteger", []) => "bigint".to_string(),
        ("System.Collections.Generic.IEnumerable", [t]) => format!("Iterable<{}>", t),
        ("System.Collections.Generic.IAsyncEnumerable", [t]) => format!("AsyncIterable<{}>", t),
        (
            "System.Collections.Generic.List"
            | "System.Collections.Generic.IList"
            | "System.Collections.Generic.ICollection",
            [t],
        ) => format!("{}[]", with_parens(t)),
        (
            "System.Collections.Generic.IReadOnlyList"
            | "System.Collections.Generic.IReadOnlyCollection",
            [t],
        ) => format!("readonly {}[]", with_parens(t)),
        (
            "System.Collections.Generic.Dictionary" | "System.Collections.Generic.IDictionary",
            [k, v],
        ) => format!("Map<{}, {}>", k, v),
        ("System.Collections.Generic.IReadOnlyDictionary", [k, v]) => {
            format!("ReadonlyMap<{}, {}>", k, v)
        }
        ("System.Collections.Generic.HashSet" | "System.Collections.Generic.ISet", [t]) => {
            format!("Set<{}>", t)
        }
        ("System.Collections.Generic.IReadOnlySet", [t]) => format!("ReadonlySet<{}>", t),
        _ => return None,
    };
    Some(rendered)
}

/// Parenthesize a rendered type if it is a union (for use as array element)
///
/// Only top-level unions count: `Promise<string | undefined>` is left alone.
pub fn with_parens(rendered: &str) -> String {
    if is_top_level_union(rendered) {
        format!("({})", rendered)
    } else {
        rendered.to_string()
    }
}

fn is_top_level_union(rendered: &str) -> bool {
    let mut depth = 0usize;
    for (i, c) in rendered.char_indices() {
        match c {
            '<' | '(' | '[' | '{' => depth += 1,
            '>' if rendered[..i].ends_with('=') => {}
            '>' | ')' | ']' | '}' => depth = depth.saturating_sub(1),
            '|' if depth == 0 && rendered[..i].ends_with(' ') => return true,
            _ => {}
        }
    }
    false
}
