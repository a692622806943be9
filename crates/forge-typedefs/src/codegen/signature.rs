//! Signature renderer
//!
//! Converts type references, parameter lists and members into TypeScript
//! syntax. Named types are always rendered as a name, never expanded.

use crate::codegen::generic::instance_shape_name;
use crate::docs::MemberId;
use crate::error::{Diagnostics, GenerateError, GenerateResult, Warning};
use crate::ir::{
    well_known_typescript, with_parens, MemberKind, Parameter, ReflectedMember, ReflectedType,
    TypeIdentity, TypeRef,
};
use crate::resolver::ExternalTypeResolver;

/// Where a member line is going to be placed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberContext {
    /// Non-generic class: `constructor(...)`, `static` prefix for statics
    Class,
    /// Non-generic interface
    Interface,
    /// Static shape of a generic type: constructors become `new(...)`
    StaticShape,
    /// Instance shape of a generic type
    InstanceShape,
}

/// Generic parameters visible to a member, and the member's identifier for
/// error reporting
#[derive(Debug, Clone, Copy)]
pub struct Scope<'a> {
    pub type_params: &'a [String],
    pub method_params: &'a [String],
    pub member_id: &'a str,
}

impl<'a> Scope<'a> {
    /// Scope of a member declared by `owner`
    pub fn member(owner: &'a ReflectedType, member: &'a ReflectedMember, member_id: &'a str) -> Self {
        Self {
            type_params: &owner.type_params,
            method_params: &member.type_params,
            member_id,
        }
    }

    fn contains(&self, name: &str) -> bool {
        self.method_params.iter().any(|p| p == name) || self.type_params.iter().any(|p| p == name)
    }
}

/// Renders signatures for the types of one assembly
pub struct SignatureRenderer<'a> {
    assembly: &'a str,
    resolver: &'a dyn ExternalTypeResolver,
}

impl<'a> SignatureRenderer<'a> {
    /// Create a renderer for types declared in `assembly`
    pub fn new(assembly: &'a str, resolver: &'a dyn ExternalTypeResolver) -> Self {
        Self { assembly, resolver }
    }

    /// Render a type reference
    pub fn render_type(
        &self,
        ty: &TypeRef,
        scope: &Scope<'_>,
        diag: &mut Diagnostics,
    ) -> GenerateResult<String> {
        let rendered = match ty {
            TypeRef::Primitive(p) => p.to_typescript().to_string(),

            TypeRef::GenericParameter(name) => {
                if !scope.contains(name) {
                    return Err(GenerateError::malformed(
                        scope.member_id,
                        format!("unknown type parameter `{}`", name),
                    ));
                }
                name.clone()
            }

            TypeRef::Array(element) => {
                format!("{}[]", with_parens(&self.render_type(element, scope, diag)?))
            }

            TypeRef::Nullable(inner) => {
                let inner = self.render_type(inner, scope, diag)?;
                if inner.ends_with(" | undefined") {
                    inner
                } else {
                    format!("{} | undefined", inner)
                }
            }

            TypeRef::Task(None) => "Promise<void>".to_string(),
            TypeRef::Task(Some(result)) => {
                format!("Promise<{}>", self.render_type(result, scope, diag)?)
            }

            TypeRef::Named { identity, args } => {
                let args = args
                    .iter()
                    .map(|arg| self.render_type(arg, scope, diag))
                    .collect::<GenerateResult<Vec<String>>>()?;
                self.render_named(identity, &args, diag)
            }

            TypeRef::Unknown => "any".to_string(),
        };
        Ok(rendered)
    }

    fn render_named(&self, identity: &TypeIdentity, args: &[String], diag: &mut Diagnostics) -> String {
        let qualified = identity.qualified_name();
        if let Some(builtin) = well_known_typescript(&qualified, args) {
            return builtin;
        }

        if identity.assembly == self.assembly {
            return if args.is_empty() {
                identity.name.clone()
            } else {
                format!(
                    "{}<{}>",
                    instance_shape_name(&identity.name, args.len()),
                    args.join(", ")
                )
            };
        }

        match self.resolver.resolve(identity, self.assembly) {
            Some(name) if args.is_empty() => name,
            Some(name) => format!("{}<{}>", name, args.join(", ")),
            None => {
                diag.warn(Warning::UnresolvedType {
                    type_name: qualified,
                    assembly: identity.assembly.clone(),
                });
                "any".to_string()
            }
        }
    }

    /// Render a parameter list, without the surrounding parentheses
    pub fn render_parameter_list(
        &self,
        params: &[Parameter],
        scope: &Scope<'_>,
        diag: &mut Diagnostics,
    ) -> GenerateResult<String> {
        let params = params
            .iter()
            .map(|p| -> GenerateResult<String> {
                let ty = self.render_type(&p.ty, scope, diag)?;
                Ok(if p.variadic {
                    let ty = match &p.ty {
                        TypeRef::Array(_) => ty,
                        _ => format!("{}[]", with_parens(&ty)),
                    };
                    format!("...{}: {}", p.name, ty)
                } else if p.optional {
                    format!("{}?: {}", p.name, ty)
                } else {
                    format!("{}: {}", p.name, ty)
                })
            })
            .collect::<GenerateResult<Vec<String>>>()?;
        Ok(params.join(", "))
    }

    /// Render a single member line (without its doc comment)
    pub fn render_member(
        &self,
        owner: &ReflectedType,
        member: &ReflectedMember,
        context: MemberContext,
        diag: &mut Diagnostics,
    ) -> GenerateResult<String> {
        let member_id = MemberId::for_member(owner, member);
        let scope = Scope::member(owner, member, &member_id);
        let static_prefix = if member.is_static && context == MemberContext::Class {
            "static "
        } else {
            ""
        };

        let line = match member.kind {
            MemberKind::Constructor => {
                let params = self.render_parameter_list(&member.params, &scope, diag)?;
                match context {
                    MemberContext::Class => format!("constructor({});", params),
                    MemberContext::StaticShape => format!(
                        "new({}): {}<{}>;",
                        params,
                        instance_shape_name(owner.name(), owner.arity()),
                        owner.type_params.join(", ")
                    ),
                    MemberContext::Interface | MemberContext::InstanceShape => {
                        return Err(GenerateError::malformed(
                            member_id.as_str(),
                            "constructor outside a class",
                        ))
                    }
                }
            }
            MemberKind::Property | MemberKind::Field => {
                let readonly = if member.read_only { "readonly " } else { "" };
                format!(
                    "{}{}{}: {};",
                    static_prefix,
                    readonly,
                    member.name,
                    self.render_type(&member.ty, &scope, diag)?
                )
            }
            MemberKind::Method => {
                let type_params = if member.type_params.is_empty() {
                    String::new()
                } else {
                    format!("<{}>", member.type_params.join(", "))
                };
                format!(
                    "{}{}{}({}): {};",
                    static_prefix,
                    member.name,
                    type_params,
                    self.render_parameter_list(&member.params, &scope, diag)?,
                    self.render_type(&member.ty, &scope, diag)?
                )
            }
            MemberKind::Event | MemberKind::NestedType | MemberKind::Unknown => {
                return Err(GenerateError::unsupported(member_id.as_str(), member.kind));
            }
        };
        Ok(line)
    }

    /// Render a delegate invoke method as a bare call signature:
    /// `(arg: string): void;`
    pub fn render_call_signature(
        &self,
        owner: &ReflectedType,
        invoke: &ReflectedMember,
        diag: &mut Diagnostics,
    ) -> GenerateResult<String> {
        let member_id = MemberId::for_member(owner, invoke);
        let scope = Scope::member(owner, invoke, &member_id);
        Ok(format!(
            "({}): {};",
            self.render_parameter_list(&invoke.params, &scope, diag)?,
            self.render_type(&invoke.ty, &scope, diag)?
        ))
    }

    /// Render a delegate invoke method as a function type:
    /// `(arg: string) => void`
    pub fn render_function_type(
        &self,
        owner: &ReflectedType,
        invoke: &ReflectedMember,
        diag: &mut Diagnostics,
    ) -> GenerateResult<String> {
        let member_id = MemberId::for_member(owner, invoke);
        let scope = Scope::member(owner, invoke, &member_id);
        Ok(format!(
            "({}) => {}",
            self.render_parameter_list(&invoke.params, &scope, diag)?,
            self.render_type(&invoke.ty, &scope, diag)?
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::{NoResolver, ReferenceAssemblies};
    use pretty_assertions::assert_eq;

    const NO_PARAMS: &[String] = &[];

    fn scope<'a>(type_params: &'a [String]) -> Scope<'a> {
        Scope {
            type_params,
            method_params: NO_PARAMS,
            member_id: "M:Acme.Test",
        }
    }

    fn render(ty: &TypeRef) -> String {
        let renderer = SignatureRenderer::new("Acme", &NoResolver);
        let params = vec!["T".to_string()];
        renderer
            .render_type(ty, &scope(&params), &mut Diagnostics::new(false))
            .unwrap()
    }

    #[test]
    fn test_render_primitives_and_composites() {
        assert_eq!(render(&TypeRef::string()), "string");
        assert_eq!(render(&TypeRef::int()), "number");
        assert_eq!(render(&TypeRef::Unknown), "any");
        assert_eq!(render(&TypeRef::array(TypeRef::bool())), "boolean[]");
        assert_eq!(render(&TypeRef::nullable(TypeRef::int())), "number | undefined");
        assert_eq!(
            render(&TypeRef::array(TypeRef::nullable(TypeRef::param("T")))),
            "(T | undefined)[]"
        );
        assert_eq!(render(&TypeRef::Task(None)), "Promise<void>");
        assert_eq!(
            render(&TypeRef::array(TypeRef::task(TypeRef::nullable(TypeRef::string())))),
            "Promise<string | undefined>[]"
        );
        assert_eq!(render(&TypeRef::task(TypeRef::string())), "Promise<string>");
    }

    #[test]
    fn test_render_local_types() {
        let widget = TypeIdentity::new("Acme", "Widget", "Acme");
        assert_eq!(render(&TypeRef::named(widget)), "Widget");

        let boxed = TypeIdentity::new("Acme", "Box", "Acme");
        assert_eq!(
            render(&TypeRef::generic(boxed, vec![TypeRef::param("T")])),
            "Box$1<T>"
        );
    }

    #[test]
    fn test_render_well_known_types() {
        let list = TypeIdentity::new("System.Collections.Generic", "IList", "System.Runtime");
        assert_eq!(
            render(&TypeRef::generic(list, vec![TypeRef::string()])),
            "string[]"
        );
        let date = TypeIdentity::new("System", "DateTime", "System.Runtime");
        assert_eq!(render(&TypeRef::named(date)), "Date");
    }

    #[test]
    fn test_render_external_types() {
        let refs = ReferenceAssemblies::new().with_assembly("Other");
        let renderer = SignatureRenderer::new("Acme", &refs);
        let mut diag = Diagnostics::new(false);
        let params: Vec<String> = Vec::new();

        let thing = TypeRef::generic(
            TypeIdentity::new("Other.Ns", "Thing", "Other"),
            vec![TypeRef::string()],
        );
        assert_eq!(
            renderer.render_type(&thing, &scope(&params), &mut diag).unwrap(),
            "Other.Ns.Thing<string>"
        );
        assert!(diag.warnings().is_empty());

        let unknown = TypeRef::named(TypeIdentity::new("Far", "Away", "Far"));
        assert_eq!(
            renderer.render_type(&unknown, &scope(&params), &mut diag).unwrap(),
            "any"
        );
        assert_eq!(
            diag.warnings(),
            &[Warning::UnresolvedType {
                type_name: "Far.Away".to_string(),
                assembly: "Far".to_string(),
            }]
        );
    }

    #[test]
    fn test_unknown_type_parameter_is_malformed() {
        let renderer = SignatureRenderer::new("Acme", &NoResolver);
        let params = vec!["T".to_string()];
        let err = renderer
            .render_type(&TypeRef::param("U"), &scope(&params), &mut Diagnostics::new(false))
            .unwrap_err();
        assert_eq!(
            err,
            GenerateError::malformed("M:Acme.Test", "unknown type parameter `U`")
        );
    }

    #[test]
    fn test_render_parameter_list() {
        let renderer = SignatureRenderer::new("Acme", &NoResolver);
        let params = vec![
            Parameter::new("path", TypeRef::string()),
            Parameter::new("retries", TypeRef::int()).optional(),
            Parameter::new("tags", TypeRef::array(TypeRef::string())).variadic(),
        ];
        let no_params: Vec<String> = Vec::new();
        assert_eq!(
            renderer
                .render_parameter_list(&params, &scope(&no_params), &mut Diagnostics::new(false))
                .unwrap(),
            "path: string, retries?: number, ...tags: string[]"
        );
    }

    #[test]
    fn test_render_members() {
        let renderer = SignatureRenderer::new("Acme", &NoResolver);
        let owner = ReflectedType::class(TypeIdentity::new("Acme", "Widget", "Acme"));
        let mut diag = Diagnostics::new(false);

        let ctor = ReflectedMember::constructor().param(Parameter::new("name", TypeRef::string()));
        assert_eq!(
            renderer
                .render_member(&owner, &ctor, MemberContext::Class, &mut diag)
                .unwrap(),
            "constructor(name: string);"
        );

        let count = ReflectedMember::field("Count", TypeRef::int())
            .static_member()
            .read_only();
        assert_eq!(
            renderer
                .render_member(&owner, &count, MemberContext::Class, &mut diag)
                .unwrap(),
            "static readonly Count: number;"
        );

        let convert = ReflectedMember::method("Convert", TypeRef::param("U"))
            .type_param("U")
            .param(Parameter::new("value", TypeRef::string()));
        assert_eq!(
            renderer
                .render_member(&owner, &convert, MemberContext::Class, &mut diag)
                .unwrap(),
            "Convert<U>(value: string): U;"
        );

        assert!(renderer
            .render_member(&owner, &ctor, MemberContext::Interface, &mut diag)
            .is_err());
    }

    #[test]
    fn test_render_generic_constructor() {
        let renderer = SignatureRenderer::new("Acme", &NoResolver);
        let owner = ReflectedType::class(TypeIdentity::new("Acme", "Map", "Acme"))
            .type_param("TKey")
            .type_param("TValue");
        let ctor = ReflectedMember::constructor()
            .param(Parameter::new("capacity", TypeRef::int()));
        assert_eq!(
            renderer
                .render_member(&owner, &ctor, MemberContext::StaticShape, &mut Diagnostics::new(false))
                .unwrap(),
            "new(capacity: number): Map$2<TKey, TValue>;"
        );
    }

    #[test]
    fn test_render_delegate_signatures() {
        let renderer = SignatureRenderer::new("Acme", &NoResolver);
        let owner = ReflectedType::delegate(
            TypeIdentity::new("Acme", "Transform", "Acme"),
            vec![Parameter::new("arg", TypeRef::param("T"))],
            TypeRef::param("T"),
        )
        .type_param("T");
        let invoke = owner.invoke_method().unwrap();
        let mut diag = Diagnostics::new(false);

        assert_eq!(
            renderer.render_call_signature(&owner, invoke, &mut diag).unwrap(),
            "(arg: T): T;"
        );
        assert_eq!(
            renderer.render_function_type(&owner, invoke, &mut diag).unwrap(),
            "(arg: T) => T"
        );
    }
}
