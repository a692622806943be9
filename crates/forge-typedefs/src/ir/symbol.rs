//! Symbol metadata for reflected types and members
//!
//! This module provides the metadata structures describing a compiled type
//! and its members, independent of any particular reflection API.

use crate::ir::{TypeIdentity, TypeRef};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a reflected type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeKind {
    Class,
    /// Value type; declared like a class
    Struct,
    Interface,
    Enum,
    Delegate,
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TypeKind::Class => "class",
            TypeKind::Struct => "struct",
            TypeKind::Interface => "interface",
            TypeKind::Enum => "enum",
            TypeKind::Delegate => "delegate",
        };
        f.write_str(name)
    }
}

/// Kind of a reflected member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemberKind {
    Constructor,
    Property,
    Method,
    Field,
    Event,
    NestedType,
    /// Anything a reflection front end could not classify
    #[serde(other)]
    Unknown,
}

impl MemberKind {
    /// Check if the generator can render this kind of member
    pub fn is_supported(&self) -> bool {
        matches!(
            self,
            MemberKind::Constructor | MemberKind::Property | MemberKind::Method | MemberKind::Field
        )
    }
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MemberKind::Constructor => "constructor",
            MemberKind::Property => "property",
            MemberKind::Method => "method",
            MemberKind::Field => "field",
            MemberKind::Event => "event",
            MemberKind::NestedType => "nested type",
            MemberKind::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Parameter metadata for a method, constructor or delegate
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name
    pub name: String,
    /// Parameter type
    pub ty: TypeRef,
    /// Whether this parameter has a default value
    #[serde(default)]
    pub optional: bool,
    /// Whether this is a `params` array
    #[serde(default)]
    pub variadic: bool,
}

impl Parameter {
    /// Create a new parameter
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            optional: false,
            variadic: false,
        }
    }

    /// Mark as optional
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Mark as a `params` array
    pub fn variadic(mut self) -> Self {
        self.variadic = true;
        self
    }
}

/// Metadata for a single member of a reflected type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReflectedMember {
    /// Member name (`.ctor` for constructors)
    pub name: String,
    /// Member kind
    pub kind: MemberKind,
    /// Whether the member is static
    #[serde(default)]
    pub is_static: bool,
    /// Parameters (methods and constructors)
    #[serde(default)]
    pub params: Vec<Parameter>,
    /// Return type (methods) or value type (properties and fields)
    #[serde(default = "TypeRef::void")]
    pub ty: TypeRef,
    /// Method-level generic parameters
    #[serde(default)]
    pub type_params: Vec<String>,
    /// Whether the property has no setter, or the field is read-only
    #[serde(default)]
    pub read_only: bool,
    /// Explicit documentation identifier (derived from the signature if absent)
    #[serde(default)]
    pub doc_id: Option<String>,
}

impl ReflectedMember {
    fn new(name: impl Into<String>, kind: MemberKind, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            kind,
            is_static: false,
            params: Vec::new(),
            ty,
            type_params: Vec::new(),
            read_only: false,
            doc_id: None,
        }
    }

    /// Create a constructor
    pub fn constructor() -> Self {
        Self::new(".ctor", MemberKind::Constructor, TypeRef::void())
    }

    /// Create a property
    pub fn property(name: impl Into<String>, ty: TypeRef) -> Self {
        Self::new(name, MemberKind::Property, ty)
    }

    /// Create a method returning `returns`
    pub fn method(name: impl Into<String>, returns: TypeRef) -> Self {
        Self::new(name, MemberKind::Method, returns)
    }

    /// Create a field
    pub fn field(name: impl Into<String>, ty: TypeRef) -> Self {
        Self::new(name, MemberKind::Field, ty)
    }

    /// Create a member of an arbitrary kind
    pub fn of_kind(name: impl Into<String>, kind: MemberKind) -> Self {
        Self::new(name, kind, TypeRef::Unknown)
    }

    /// Mark as static
    pub fn static_member(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Mark as read-only
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    /// Add a parameter
    pub fn param(mut self, param: Parameter) -> Self {
        self.params.push(param);
        self
    }

    /// Set parameters
    pub fn with_params(mut self, params: Vec<Parameter>) -> Self {
        self.params = params;
        self
    }

    /// Add a method-level type parameter
    pub fn type_param(mut self, name: impl Into<String>) -> Self {
        self.type_params.push(name.into());
        self
    }

    /// Override the documentation identifier
    pub fn with_doc_id(mut self, id: impl Into<String>) -> Self {
        self.doc_id = Some(id.into());
        self
    }

    /// Check if this member is property-like (property or field)
    pub fn is_property_like(&self) -> bool {
        matches!(self.kind, MemberKind::Property | MemberKind::Field)
    }
}

/// Enum member metadata
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnumValue {
    /// Member name
    pub name: String,
    /// Integral value; wide enough for both `long` and `ulong` backed enums
    pub value: i128,
}

impl EnumValue {
    /// Create a new enum value
    pub fn new(name: impl Into<String>, value: impl Into<i128>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Metadata for a reflected type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReflectedType {
    /// Type kind
    pub kind: TypeKind,
    /// Nominal identity (name, namespace, declaring assembly)
    pub identity: TypeIdentity,
    /// Generic type parameter names, in declaration order
    #[serde(default)]
    pub type_params: Vec<String>,
    /// Members, in declaration order
    #[serde(default)]
    pub members: Vec<ReflectedMember>,
    /// Enum members, in declaration order
    #[serde(default)]
    pub enum_values: Vec<EnumValue>,
}

impl ReflectedType {
    /// Create a new type
    pub fn new(kind: TypeKind, identity: TypeIdentity) -> Self {
        Self {
            kind,
            identity,
            type_params: Vec::new(),
            members: Vec::new(),
            enum_values: Vec::new(),
        }
    }

    /// Create a class
    pub fn class(identity: TypeIdentity) -> Self {
        Self::new(TypeKind::Class, identity)
    }

    /// Create an interface
    pub fn interface(identity: TypeIdentity) -> Self {
        Self::new(TypeKind::Interface, identity)
    }

    /// Create an enum
    pub fn enumeration(identity: TypeIdentity) -> Self {
        Self::new(TypeKind::Enum, identity)
    }

    /// Create a delegate with the given invoke signature
    pub fn delegate(identity: TypeIdentity, params: Vec<Parameter>, returns: TypeRef) -> Self {
        Self::new(TypeKind::Delegate, identity)
            .member(ReflectedMember::method("Invoke", returns).with_params(params))
    }

    /// Add a generic type parameter
    pub fn type_param(mut self, name: impl Into<String>) -> Self {
        self.type_params.push(name.into());
        self
    }

    /// Add a member
    pub fn member(mut self, member: ReflectedMember) -> Self {
        self.members.push(member);
        self
    }

    /// Add an enum value
    pub fn value(mut self, value: EnumValue) -> Self {
        self.enum_values.push(value);
        self
    }

    /// Simple name
    pub fn name(&self) -> &str {
        &self.identity.name
    }

    /// Generic arity
    pub fn arity(&self) -> usize {
        self.type_params.len()
    }

    /// Check if this is an open generic type
    pub fn is_generic(&self) -> bool {
        !self.type_params.is_empty()
    }

    /// Name of the declaring assembly
    pub fn assembly(&self) -> &str {
        &self.identity.assembly
    }

    /// The delegate invoke method, if any
    pub fn invoke_method(&self) -> Option<&ReflectedMember> {
        self.members
            .iter()
            .find(|m| m.kind == MemberKind::Method && !m.is_static && m.name == "Invoke")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(name: &str) -> TypeIdentity {
        TypeIdentity::new("Acme", name, "Acme")
    }

    #[test]
    fn test_reflected_type_builder() {
        let ty = ReflectedType::class(identity("Box"))
            .type_param("T")
            .member(ReflectedMember::constructor().param(Parameter::new("value", TypeRef::param("T"))))
            .member(ReflectedMember::property("Value", TypeRef::param("T")).read_only());

        assert_eq!(ty.name(), "Box");
        assert_eq!(ty.arity(), 1);
        assert!(ty.is_generic());
        assert_eq!(ty.members.len(), 2);
        assert!(ty.members[1].read_only);
        assert!(ty.invoke_method().is_none());
    }

    #[test]
    fn test_delegate_invoke() {
        let ty = ReflectedType::delegate(
            identity("Callback"),
            vec![Parameter::new("arg", TypeRef::string())],
            TypeRef::void(),
        );
        let invoke = ty.invoke_method().expect("delegate has an invoke method");
        assert_eq!(invoke.params.len(), 1);
        assert!(invoke.ty.is_void());
    }

    #[test]
    fn test_member_kinds() {
        assert!(MemberKind::Field.is_supported());
        assert!(!MemberKind::Event.is_supported());
        assert!(ReflectedMember::field("X", TypeRef::int()).is_property_like());
        assert!(!ReflectedMember::method("M", TypeRef::void()).is_property_like());
    }

    #[test]
    fn test_enum_values_json() {
        let ty: ReflectedType = serde_json::from_str(
            r#"{
                "kind": "Enum",
                "identity": { "name": "Mask", "assembly": "Acme" },
                "enum_values": [
                    { "name": "None", "value": 0 },
                    { "name": "Low", "value": -9223372036854775808 },
                    { "name": "All", "value": 18446744073709551615 }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(ty.enum_values[1].value, i64::MIN as i128);
        assert_eq!(ty.enum_values[2], EnumValue::new("All", u64::MAX));
    }

    #[test]
    fn test_member_json_defaults() {
        let member: ReflectedMember =
            serde_json::from_str(r#"{ "name": "Count", "kind": "Property", "ty": { "Primitive": "Int32" } }"#)
                .unwrap();
        assert_eq!(member.kind, MemberKind::Property);
        assert!(!member.is_static);
        assert!(member.params.is_empty());
        assert_eq!(member.doc_id, None);

        let event: ReflectedMember =
            serde_json::from_str(r#"{ "name": "Changed", "kind": "Indexer" }"#).unwrap();
        assert_eq!(event.kind, MemberKind::Unknown);
        assert!(event.ty.is_void());
    }
}
