//! TypeScript type definitions generator
//!
//! A [`TypeDefinitionsGenerator`] is one generation session: the assembly
//! being generated, its documentation index, a resolver for types from
//! other assemblies, and the configuration. It holds no mutable state, so
//! one generator can serve requests from several threads at once.

use crate::codegen::classify::{
    classify, delegate_invoke, DeclarationShape, GenericBase, MemberGroups,
};
use crate::codegen::emit::{emit, BlockBody, BlockKind, DeclarationBlock, MemberLine};
use crate::codegen::generic::{GenericBody, GenericFactoryEncoder};
use crate::codegen::signature::{MemberContext, Scope, SignatureRenderer};
use crate::config::GeneratorConfig;
use crate::docs::{DocumentationIndex, MemberId};
use crate::error::{Diagnostics, GenerateError, GenerateResult, Warning};
use crate::ir::{MemberKind, ReflectedMember, ReflectedType};
use crate::resolver::{ExternalTypeResolver, NoResolver};
use tracing::{debug, warn};

/// Generated declaration text for one top-level type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDefinition {
    /// Simple name of the generated type
    pub name: String,
    /// Declaration text (one or three declarations)
    pub text: String,
    /// Warnings raised while generating (empty when suppressed)
    pub warnings: Vec<Warning>,
}

/// Declarations for a set of types
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Declarations {
    /// Header followed by every successfully generated definition
    pub text: String,
    /// Names of the types included in `text`, in order
    pub generated: Vec<String>,
    /// Warnings from all generated types
    pub warnings: Vec<Warning>,
    /// Types that failed, keyed by their documentation identifier
    pub failures: Vec<(String, GenerateError)>,
}

/// Generator for TypeScript ambient declarations of reflected types
pub struct TypeDefinitionsGenerator<R = NoResolver> {
    assembly: String,
    docs: DocumentationIndex,
    resolver: R,
    config: GeneratorConfig,
}

impl TypeDefinitionsGenerator<NoResolver> {
    /// Create a generator that treats every external type as unresolvable
    pub fn without_references(assembly: impl Into<String>, docs: DocumentationIndex) -> Self {
        Self::new(assembly, docs, NoResolver)
    }
}

impl<R: ExternalTypeResolver> TypeDefinitionsGenerator<R> {
    /// Create a generator for the types declared by `assembly`
    pub fn new(assembly: impl Into<String>, docs: DocumentationIndex, resolver: R) -> Self {
        Self {
            assembly: assembly.into(),
            docs,
            resolver,
            config: GeneratorConfig::default(),
        }
    }

    /// Set configuration
    pub fn with_config(mut self, config: GeneratorConfig) -> Self {
        self.config = config;
        self
    }

    /// Name of the assembly being generated
    pub fn assembly(&self) -> &str {
        &self.assembly
    }

    /// Current configuration
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate the declaration text for one type
    ///
    /// Generation is all-or-nothing: a malformed or unsupported member fails
    /// the whole type.
    pub fn generate_type_definition(&self, ty: &ReflectedType) -> GenerateResult<TypeDefinition> {
        let shape = classify(ty)?;
        debug!(type_name = %ty.identity, shape = ?shape, "typedefs.generate");

        let mut diag = Diagnostics::new(self.config.suppress_warnings);
        let blocks = self.declaration_blocks(ty, shape, &mut diag)?;

        Ok(TypeDefinition {
            name: ty.name().to_string(),
            text: emit(&blocks),
            warnings: diag.into_warnings(),
        })
    }

    /// Generate the declaration blocks for one type, before emission
    pub fn declaration_blocks(
        &self,
        ty: &ReflectedType,
        shape: DeclarationShape,
        diag: &mut Diagnostics,
    ) -> GenerateResult<Vec<DeclarationBlock>> {
        let renderer = SignatureRenderer::new(&self.assembly, &self.resolver);
        let summary = self.summary(&MemberId::for_type(ty), diag);
        let name = ty.name();

        let blocks = match shape {
            DeclarationShape::Enum => {
                let members = ty
                    .enum_values
                    .iter()
                    .map(|v| {
                        let doc = self.summary(&MemberId::for_enum_value(ty, v), diag);
                        MemberLine::new(format!("{} = {},", v.name, v.value)).with_doc(doc)
                    })
                    .collect();
                vec![DeclarationBlock::new(
                    name,
                    BlockKind::Enum,
                    format!("export enum {}", name),
                    BlockBody::Members(members),
                )
                .with_doc(summary)]
            }

            DeclarationShape::Delegate => {
                MemberGroups::of(ty)?;
                let invoke = delegate_invoke(ty)?;
                let signature = renderer.render_call_signature(ty, invoke, diag)?;
                vec![DeclarationBlock::new(
                    name,
                    BlockKind::Delegate,
                    format!("export interface {}", name),
                    BlockBody::Inline(signature),
                )
                .with_doc(summary)]
            }

            DeclarationShape::Class | DeclarationShape::Interface => {
                let (kind, keyword, context) = if shape == DeclarationShape::Class {
                    (BlockKind::Class, "class", MemberContext::Class)
                } else {
                    (BlockKind::Interface, "interface", MemberContext::Interface)
                };

                let groups = MemberGroups::of(ty)?;
                let mut members = Vec::new();
                for member in groups.ordered() {
                    if context == MemberContext::Interface && member.is_static {
                        debug!(member = %member.name, "typedefs.skip static interface member");
                        continue;
                    }
                    members.push(self.member_line(&renderer, ty, member, context, diag)?);
                }

                vec![DeclarationBlock::new(
                    name,
                    kind,
                    format!("export {} {}", keyword, name),
                    BlockBody::Members(members),
                )
                .with_doc(summary)]
            }

            DeclarationShape::Generic { base, .. } => {
                let body = self.generic_body(&renderer, ty, base, diag)?;
                GenericFactoryEncoder::new(ty, summary.as_deref())
                    .encode(body)
                    .into()
            }
        };

        Ok(blocks)
    }

    fn generic_body(
        &self,
        renderer: &SignatureRenderer<'_>,
        ty: &ReflectedType,
        base: GenericBase,
        diag: &mut Diagnostics,
    ) -> GenerateResult<GenericBody> {
        let groups = MemberGroups::of(ty)?;
        if base == GenericBase::Delegate {
            let invoke = delegate_invoke(ty)?;
            let member_id = MemberId::for_member(ty, invoke);
            let scope = Scope::member(ty, invoke, &member_id);
            return Ok(GenericBody::Delegate {
                params: renderer.render_parameter_list(&invoke.params, &scope, diag)?,
                returns: renderer.render_type(&invoke.ty, &scope, diag)?,
            });
        }

        let instance = groups
            .instance()
            .map(|m| self.member_line(renderer, ty, m, MemberContext::InstanceShape, diag))
            .collect::<GenerateResult<Vec<_>>>()?;

        if base == GenericBase::Interface {
            for member in groups.statics() {
                debug!(member = %member.name, "typedefs.skip static interface member");
            }
            return Ok(GenericBody::Interface { instance });
        }

        let constructors = groups
            .constructors
            .iter()
            .map(|m| self.member_line(renderer, ty, m, MemberContext::StaticShape, diag))
            .collect::<GenerateResult<Vec<_>>>()?;
        let statics = groups
            .statics()
            .map(|m| self.member_line(renderer, ty, m, MemberContext::StaticShape, diag))
            .collect::<GenerateResult<Vec<_>>>()?;

        Ok(GenericBody::Class {
            constructors,
            statics,
            instance,
        })
    }

    /// Generate the single line for one member, without its doc comment
    pub fn generate_member_definition(
        &self,
        ty: &ReflectedType,
        member: &ReflectedMember,
    ) -> GenerateResult<String> {
        let renderer = SignatureRenderer::new(&self.assembly, &self.resolver);
        let mut diag = Diagnostics::new(self.config.suppress_warnings);

        let context = match classify(ty)? {
            DeclarationShape::Class => MemberContext::Class,
            DeclarationShape::Interface => MemberContext::Interface,
            DeclarationShape::Delegate
            | DeclarationShape::Generic {
                base: GenericBase::Delegate,
                ..
            } if member.kind == MemberKind::Method && member.name == "Invoke" => {
                return renderer.render_call_signature(ty, member, &mut diag);
            }
            DeclarationShape::Generic { .. }
                if member.is_static || member.kind == MemberKind::Constructor =>
            {
                MemberContext::StaticShape
            }
            DeclarationShape::Generic { .. } => MemberContext::InstanceShape,
            DeclarationShape::Enum | DeclarationShape::Delegate => {
                return Err(GenerateError::malformed(
                    MemberId::for_member(ty, member),
                    format!("{} members have no declaration of their own", ty.kind),
                ));
            }
        };

        renderer.render_member(ty, member, context, &mut diag)
    }

    /// Generate declarations for several types
    ///
    /// Each type is generated independently; a failing type is reported in
    /// `failures` and left out of the text without affecting the others.
    pub fn generate_declarations<'t>(
        &self,
        types: impl IntoIterator<Item = &'t ReflectedType>,
    ) -> Declarations {
        let mut declarations = Declarations {
            text: format!("// Type definitions for {}\n", self.assembly),
            ..Declarations::default()
        };

        for ty in types {
            match self.generate_type_definition(ty) {
                Ok(definition) => {
                    declarations.text.push('\n');
                    declarations.text.push_str(&definition.text);
                    declarations.text.push('\n');
                    declarations.generated.push(definition.name);
                    declarations.warnings.extend(definition.warnings);
                }
                Err(err) => {
                    warn!(type_name = %ty.identity, error = %err, "typedefs.generate failed");
                    declarations.failures.push((MemberId::for_type(ty), err));
                }
            }
        }

        debug!(
            assembly = %self.assembly,
            generated = declarations.generated.len(),
            failed = declarations.failures.len(),
            "typedefs.generate_declarations complete"
        );
        declarations
    }

    fn member_line(
        &self,
        renderer: &SignatureRenderer<'_>,
        ty: &ReflectedType,
        member: &ReflectedMember,
        context: MemberContext,
        diag: &mut Diagnostics,
    ) -> GenerateResult<MemberLine> {
        let text = renderer.render_member(ty, member, context, diag)?;
        let doc = self.summary(&MemberId::for_member(ty, member), diag);
        Ok(MemberLine::new(text).with_doc(doc))
    }

    fn summary(&self, id: &str, diag: &mut Diagnostics) -> Option<String> {
        let summary = self.docs.lookup(id).map(str::to_string);
        if summary.is_none() {
            diag.warn(Warning::MissingDocumentation {
                member_id: id.to_string(),
            });
        }
        summary
    }
}
