//! Documentation identifiers
//!
//! Builds the structured string keys that correlate a type or member with
//! its entry in an XML documentation file:
//!
//! | Element | Identifier |
//! |---------|------------|
//! | type | `T:Acme.Widget` |
//! | generic type | ``T:Acme.Box`1`` |
//! | property | `P:Acme.Widget.Name` |
//! | method | `M:Acme.Widget.Resize(System.Int32,System.Int32)` |
//! | parameterless method | `M:Acme.Widget.Reset` |
//! | constructor | `M:Acme.Widget.#ctor` |
//! | static constructor | `M:Acme.Widget.#cctor` |
//! | generic method | ``M:Acme.Widget.Convert``1(U)`` |
//! | field / enum member | `F:Acme.Color.Red` |
//!
//! Generic parameter references inside parameter lists use the literal
//! parameter name (`M:Acme.Box`1.Set(T)`).

use crate::ir::{EnumValue, MemberKind, ReflectedMember, ReflectedType};

/// Documentation identifier construction
pub struct MemberId;

impl MemberId {
    /// Qualified type name with arity suffix, e.g. ``Acme.Box`1``
    pub fn type_name(ty: &ReflectedType) -> String {
        let name = ty.identity.qualified_name();
        if ty.is_generic() {
            format!("{}`{}", name, ty.arity())
        } else {
            name
        }
    }

    /// Identifier of the type itself
    pub fn for_type(ty: &ReflectedType) -> String {
        format!("T:{}", Self::type_name(ty))
    }

    /// Identifier of a member; an explicit `doc_id` on the member wins
    pub fn for_member(ty: &ReflectedType, member: &ReflectedMember) -> String {
        if let Some(id) = &member.doc_id {
            return id.clone();
        }

        let owner = Self::type_name(ty);
        match member.kind {
            MemberKind::Constructor if member.is_static => format!("M:{}.#cctor", owner),
            MemberKind::Constructor => {
                format!("M:{}.#ctor{}", owner, Self::param_list(member))
            }
            MemberKind::Method => {
                let arity = if member.type_params.is_empty() {
                    String::new()
                } else {
                    format!("``{}", member.type_params.len())
                };
                format!(
                    "M:{}.{}{}{}",
                    owner,
                    member.name,
                    arity,
                    Self::param_list(member)
                )
            }
            MemberKind::Property => {
                format!("P:{}.{}{}", owner, member.name, Self::param_list(member))
            }
            MemberKind::Field => format!("F:{}.{}", owner, member.name),
            MemberKind::Event => format!("E:{}.{}", owner, member.name),
            MemberKind::NestedType => format!("T:{}.{}", owner, member.name),
            MemberKind::Unknown => format!("!:{}.{}", owner, member.name),
        }
    }

    /// Identifier of an enum member
    pub fn for_enum_value(ty: &ReflectedType, value: &EnumValue) -> String {
        format!("F:{}.{}", Self::type_name(ty), value.name)
    }

    fn param_list(member: &ReflectedMember) -> String {
        if member.params.is_empty() {
            return String::new();
        }
        let params: Vec<String> = member.params.iter().map(|p| p.ty.doc_id_name()).collect();
        format!("({})", params.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Parameter, TypeIdentity, TypeRef};

    fn widget() -> ReflectedType {
        ReflectedType::class(TypeIdentity::new("Acme", "Widget", "Acme"))
    }

    #[test]
    fn test_type_ids() {
        assert_eq!(MemberId::for_type(&widget()), "T:Acme.Widget");
        assert_eq!(
            MemberId::for_type(&widget().type_param("TKey").type_param("TValue")),
            "T:Acme.Widget`2"
        );

        let nested = ReflectedType::interface(
            TypeIdentity::new("Acme.Tests", "SimpleInterface", "Acme").nested_in("Fixtures"),
        );
        assert_eq!(
            MemberId::for_type(&nested),
            "T:Acme.Tests.Fixtures.SimpleInterface"
        );
    }

    #[test]
    fn test_member_ids() {
        let ty = widget();
        let resize = ReflectedMember::method("Resize", TypeRef::void())
            .param(Parameter::new("width", TypeRef::int()))
            .param(Parameter::new("height", TypeRef::int()));
        assert_eq!(
            MemberId::for_member(&ty, &resize),
            "M:Acme.Widget.Resize(System.Int32,System.Int32)"
        );

        let reset = ReflectedMember::method("Reset", TypeRef::void());
        assert_eq!(MemberId::for_member(&ty, &reset), "M:Acme.Widget.Reset");

        assert_eq!(
            MemberId::for_member(&ty, &ReflectedMember::constructor()),
            "M:Acme.Widget.#ctor"
        );
        assert_eq!(
            MemberId::for_member(&ty, &ReflectedMember::constructor().static_member()),
            "M:Acme.Widget.#cctor"
        );
        assert_eq!(
            MemberId::for_member(&ty, &ReflectedMember::property("Name", TypeRef::string())),
            "P:Acme.Widget.Name"
        );
        assert_eq!(
            MemberId::for_member(&ty, &ReflectedMember::field("Count", TypeRef::int())),
            "F:Acme.Widget.Count"
        );
        assert_eq!(
            MemberId::for_member(&ty, &ReflectedMember::of_kind("Changed", MemberKind::Event)),
            "E:Acme.Widget.Changed"
        );
    }

    #[test]
    fn test_generic_member_ids() {
        let ty = widget().type_param("T");
        let ctor = ReflectedMember::constructor().param(Parameter::new("value", TypeRef::param("T")));
        assert_eq!(MemberId::for_member(&ty, &ctor), "M:Acme.Widget`1.#ctor(T)");

        let convert = ReflectedMember::method("Convert", TypeRef::param("U"))
            .type_param("U")
            .param(Parameter::new("value", TypeRef::param("T")));
        assert_eq!(
            MemberId::for_member(&ty, &convert),
            "M:Acme.Widget`1.Convert``1(T)"
        );
    }

    #[test]
    fn test_explicit_doc_id() {
        let member = ReflectedMember::method("Run", TypeRef::void()).with_doc_id("M:Custom.Id");
        assert_eq!(MemberId::for_member(&widget(), &member), "M:Custom.Id");
    }

    #[test]
    fn test_enum_value_id() {
        let color = ReflectedType::enumeration(TypeIdentity::new("Acme", "Color", "Acme"));
        assert_eq!(
            MemberId::for_enum_value(&color, &EnumValue::new("Red", 0)),
            "F:Acme.Color.Red"
        );
    }
}
