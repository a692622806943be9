//! Type-shape classifier
//!
//! Decides which declaration pattern a reflected type is emitted as:
//!
//! | Kind | Arity | Pattern |
//! |------|-------|---------|
//! | enum | 0 | `export enum` with `Name = value,` entries |
//! | delegate | 0 | `export interface` holding a bare call signature |
//! | class, struct | 0 | `export class` |
//! | interface | 0 | `export interface` |
//! | class, struct, interface, delegate | ≥1 | generic factory encoding |

use crate::docs::MemberId;
use crate::error::{GenerateError, GenerateResult};
use crate::ir::{MemberKind, ReflectedMember, ReflectedType, TypeKind};
use std::collections::HashSet;

/// Base pattern of a generic type's factory encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenericBase {
    Class,
    Interface,
    Delegate,
}

/// Declaration pattern for a reflected type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationShape {
    Enum,
    Delegate,
    Class,
    Interface,
    /// Factory function + static shape + instance shape
    Generic { base: GenericBase, arity: usize },
}

/// Classify a reflected type
pub fn classify(ty: &ReflectedType) -> GenerateResult<DeclarationShape> {
    let arity = ty.arity();
    let shape = match (ty.kind, arity) {
        (TypeKind::Enum, 0) => DeclarationShape::Enum,
        (TypeKind::Enum, _) => {
            return Err(GenerateError::malformed(
                MemberId::for_type(ty),
                "enums cannot declare type parameters",
            ))
        }
        (TypeKind::Delegate, 0) => DeclarationShape::Delegate,
        (TypeKind::Class | TypeKind::Struct, 0) => DeclarationShape::Class,
        (TypeKind::Interface, 0) => DeclarationShape::Interface,
        (TypeKind::Class | TypeKind::Struct, _) => DeclarationShape::Generic {
            base: GenericBase::Class,
            arity,
        },
        (TypeKind::Interface, _) => DeclarationShape::Generic {
            base: GenericBase::Interface,
            arity,
        },
        (TypeKind::Delegate, _) => DeclarationShape::Generic {
            base: GenericBase::Delegate,
            arity,
        },
    };
    Ok(shape)
}

/// Members of a type, grouped in emission order
///
/// Declaration order is kept within each group. Static constructors are
/// dropped. Every member is validated, including members that are never
/// emitted (static interface members, delegate members besides `Invoke`).
#[derive(Debug, Default)]
pub struct MemberGroups<'a> {
    pub constructors: Vec<&'a ReflectedMember>,
    /// Properties and fields
    pub properties: Vec<&'a ReflectedMember>,
    pub methods: Vec<&'a ReflectedMember>,
}

impl<'a> MemberGroups<'a> {
    /// Group the members of `ty`, rejecting unsupported kinds, duplicate
    /// documentation identifiers and references to undeclared type parameters
    pub fn of(ty: &'a ReflectedType) -> GenerateResult<Self> {
        let mut groups = Self::default();
        let mut seen = HashSet::new();

        for member in &ty.members {
            let id = MemberId::for_member(ty, member);
            if !member.kind.is_supported() {
                return Err(GenerateError::unsupported(id, member.kind));
            }
            if !seen.insert(id.clone()) {
                return Err(GenerateError::malformed(
                    id,
                    "duplicate documentation identifier",
                ));
            }
            check_type_params(ty, member, &id)?;

            match member.kind {
                MemberKind::Constructor if member.is_static => {}
                MemberKind::Constructor => groups.constructors.push(member),
                _ if member.is_property_like() => groups.properties.push(member),
                MemberKind::Method => groups.methods.push(member),
                _ => {}
            }
        }

        Ok(groups)
    }

    /// All members in emission order: constructors, properties, methods
    pub fn ordered(&self) -> impl Iterator<Item = &'a ReflectedMember> + '_ {
        self.constructors
            .iter()
            .chain(&self.properties)
            .chain(&self.methods)
            .copied()
    }

    /// Static properties then static methods
    pub fn statics(&self) -> impl Iterator<Item = &'a ReflectedMember> + '_ {
        self.properties
            .iter()
            .chain(&self.methods)
            .copied()
            .filter(|m| m.is_static)
    }

    /// Instance properties then instance methods
    pub fn instance(&self) -> impl Iterator<Item = &'a ReflectedMember> + '_ {
        self.properties
            .iter()
            .chain(&self.methods)
            .copied()
            .filter(|m| !m.is_static)
    }
}

/// Reject generic parameters that neither the member nor its type declares
fn check_type_params(ty: &ReflectedType, member: &ReflectedMember, id: &str) -> GenerateResult<()> {
    let referenced = member
        .params
        .iter()
        .flat_map(|p| p.ty.generic_parameters())
        .chain(member.ty.generic_parameters());

    for name in referenced {
        let declared = member.type_params.iter().any(|p| p == name)
            || ty.type_params.iter().any(|p| p == name);
        if !declared {
            return Err(GenerateError::malformed(
                id,
                format!("unknown type parameter `{}`", name),
            ));
        }
    }
    Ok(())
}

/// The invoke method of a delegate type
pub fn delegate_invoke(ty: &ReflectedType) -> GenerateResult<&ReflectedMember> {
    ty.invoke_method().ok_or_else(|| {
        GenerateError::malformed(
            format!("M:{}.Invoke", MemberId::type_name(ty)),
            "delegate has no invoke method",
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Parameter, TypeIdentity, TypeRef};

    fn identity(name: &str) -> TypeIdentity {
        TypeIdentity::new("Acme", name, "Acme")
    }

    #[test]
    fn test_classify_non_generic() {
        let cases = [
            (ReflectedType::enumeration(identity("E")), DeclarationShape::Enum),
            (ReflectedType::class(identity("C")), DeclarationShape::Class),
            (
                ReflectedType::new(TypeKind::Struct, identity("S")),
                DeclarationShape::Class,
            ),
            (ReflectedType::interface(identity("I")), DeclarationShape::Interface),
            (
                ReflectedType::delegate(identity("D"), vec![], TypeRef::void()),
                DeclarationShape::Delegate,
            ),
        ];
        for (ty, expected) in cases {
            assert_eq!(classify(&ty).unwrap(), expected, "{}", ty.name());
        }
    }

    #[test]
    fn test_classify_generic() {
        let ty = ReflectedType::interface(identity("Pair"))
            .type_param("TKey")
            .type_param("TValue");
        let shape = classify(&ty).unwrap();
        assert_eq!(
            shape,
            DeclarationShape::Generic {
                base: GenericBase::Interface,
                arity: 2
            }
        );

        let delegate = ReflectedType::delegate(identity("Func"), vec![], TypeRef::param("T"))
            .type_param("T");
        assert_eq!(
            classify(&delegate).unwrap(),
            DeclarationShape::Generic {
                base: GenericBase::Delegate,
                arity: 1
            }
        );
    }

    #[test]
    fn test_generic_enum_is_malformed() {
        let ty = ReflectedType::enumeration(identity("Flags")).type_param("T");
        let err = classify(&ty).unwrap_err();
        assert_eq!(err.member_id(), "T:Acme.Flags`1");
    }

    #[test]
    fn test_member_groups_order() {
        let ty = ReflectedType::class(identity("Widget"))
            .member(ReflectedMember::method("Reset", TypeRef::void()))
            .member(ReflectedMember::property("Name", TypeRef::string()))
            .member(ReflectedMember::constructor().static_member())
            .member(ReflectedMember::field("Count", TypeRef::int()).static_member())
            .member(ReflectedMember::constructor())
            .member(ReflectedMember::method("Create", TypeRef::void()).static_member());

        let groups = MemberGroups::of(&ty).unwrap();
        let ordered: Vec<&str> = groups.ordered().map(|m| m.name.as_str()).collect();
        assert_eq!(ordered, vec![".ctor", "Name", "Count", "Reset", "Create"]);

        let statics: Vec<&str> = groups.statics().map(|m| m.name.as_str()).collect();
        assert_eq!(statics, vec!["Count", "Create"]);

        let instance: Vec<&str> = groups.instance().map(|m| m.name.as_str()).collect();
        assert_eq!(instance, vec!["Name", "Reset"]);
    }

    #[test]
    fn test_member_groups_rejects_unsupported() {
        let ty = ReflectedType::class(identity("Widget"))
            .member(ReflectedMember::of_kind("Changed", MemberKind::Event));
        assert_eq!(
            MemberGroups::of(&ty).unwrap_err(),
            GenerateError::unsupported("E:Acme.Widget.Changed", "event")
        );
    }

    #[test]
    fn test_member_groups_rejects_duplicate_ids() {
        let ty = ReflectedType::class(identity("Widget"))
            .member(
                ReflectedMember::method("Resize", TypeRef::void())
                    .param(Parameter::new("size", TypeRef::int())),
            )
            .member(
                ReflectedMember::method("Resize", TypeRef::bool())
                    .param(Parameter::new("other", TypeRef::int())),
            );
        let err = MemberGroups::of(&ty).unwrap_err();
        assert_eq!(err.member_id(), "M:Acme.Widget.Resize(System.Int32)");
    }

    #[test]
    fn test_static_and_instance_constructors() {
        let ty = ReflectedType::class(identity("Widget"))
            .member(ReflectedMember::constructor().static_member())
            .member(ReflectedMember::constructor());

        let groups = MemberGroups::of(&ty).unwrap();
        assert_eq!(groups.constructors.len(), 1);
        assert!(!groups.constructors[0].is_static);
    }

    #[test]
    fn test_member_groups_rejects_unknown_type_params() {
        let ty = ReflectedType::interface(identity("Factory"))
            .type_param("T")
            .member(
                ReflectedMember::method("Create", TypeRef::param("T"))
                    .static_member()
                    .param(Parameter::new("seed", TypeRef::array(TypeRef::param("U")))),
            );
        assert_eq!(
            MemberGroups::of(&ty).unwrap_err(),
            GenerateError::malformed("M:Acme.Factory`1.Create(U[])", "unknown type parameter `U`")
        );

        let ok = ReflectedType::interface(identity("Factory"))
            .type_param("T")
            .member(
                ReflectedMember::method("Convert", TypeRef::param("U"))
                    .type_param("U")
                    .param(Parameter::new("value", TypeRef::param("T"))),
            );
        assert!(MemberGroups::of(&ok).is_ok());
    }

    #[test]
    fn test_delegate_without_invoke() {
        let ty = ReflectedType::new(TypeKind::Delegate, identity("Broken"));
        let err = delegate_invoke(&ty).unwrap_err();
        assert_eq!(err.member_id(), "M:Acme.Broken.Invoke");
    }
}
