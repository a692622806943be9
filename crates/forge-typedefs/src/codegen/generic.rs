//! Generic type factory encoding
//!
//! TypeScript declarations cannot express "construct the instantiation of a
//! generic type for a runtime type token". A generic type `Name<T1..Tk>` is
//! therefore split into three declarations:
//!
//! ```text
//! /** [Generic type factory] summary */
//! export function Name$(T1: IType<any>, ...): Name$$k<any, ...>;
//!
//! /** summary */
//! export interface Name$$k<T1, ...> { constructors and statics }
//!
//! /** summary */
//! export interface Name$k<T1, ...> { instance members }
//! ```
//!
//! The factory's return type is always instantiated at `any`: it cannot
//! depend on the factory's own runtime arguments.

use crate::codegen::emit::{BlockBody, BlockKind, DeclarationBlock, MemberLine};
use crate::ir::ReflectedType;

/// Tag prefixed to the factory function's summary
pub const FACTORY_TAG: &str = "[Generic type factory]";

/// Name of the factory function: `Name$`
pub fn factory_name(name: &str) -> String {
    format!("{}$", name)
}

/// Name of the static-shape interface: `Name$$k`
pub fn static_shape_name(name: &str, arity: usize) -> String {
    format!("{}$${}", name, arity)
}

/// Name of the instance-shape interface: `Name$k`
pub fn instance_shape_name(name: &str, arity: usize) -> String {
    format!("{}${}", name, arity)
}

/// Rendered members of a generic type, by base pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenericBody {
    Class {
        /// `new(...)` lines
        constructors: Vec<MemberLine>,
        /// Static properties then static methods
        statics: Vec<MemberLine>,
        /// Instance properties then instance methods
        instance: Vec<MemberLine>,
    },
    Interface {
        instance: Vec<MemberLine>,
    },
    Delegate {
        /// Rendered parameter list of the invoke method
        params: String,
        /// Rendered return type of the invoke method
        returns: String,
    },
}

/// Builds the three-declaration encoding for one generic type
pub struct GenericFactoryEncoder<'a> {
    ty: &'a ReflectedType,
    summary: Option<&'a str>,
}

impl<'a> GenericFactoryEncoder<'a> {
    /// Create an encoder for `ty`, documented with `summary`
    pub fn new(ty: &'a ReflectedType, summary: Option<&'a str>) -> Self {
        Self { ty, summary }
    }

    /// Produce factory, static shape and instance shape, in that order
    pub fn encode(&self, body: GenericBody) -> [DeclarationBlock; 3] {
        let name = self.ty.name();
        let arity = self.ty.arity();
        let type_params = self.ty.type_params.join(", ");
        let instance_name = instance_shape_name(name, arity);

        let (static_members, instance_body) = match body {
            GenericBody::Class {
                constructors,
                statics,
                instance,
            } => {
                let mut members = constructors;
                members.extend(statics);
                (members, BlockBody::Members(instance))
            }
            GenericBody::Interface { instance } => (Vec::new(), BlockBody::Members(instance)),
            GenericBody::Delegate { params, returns } => {
                let bridge = MemberLine::new(format!(
                    "new(func: ({}) => {}): {}<{}>;",
                    params, returns, instance_name, type_params
                ));
                (
                    vec![bridge],
                    BlockBody::Inline(format!("({}): {};", params, returns)),
                )
            }
        };

        let summary = self.summary.map(str::to_string);
        [
            self.factory(),
            DeclarationBlock::new(
                static_shape_name(name, arity),
                BlockKind::StaticShape,
                format!(
                    "export interface {}<{}>",
                    static_shape_name(name, arity),
                    type_params
                ),
                BlockBody::Members(static_members),
            )
            .with_doc(summary.clone()),
            DeclarationBlock::new(
                instance_name.clone(),
                BlockKind::InstanceShape,
                format!("export interface {}<{}>", instance_name, type_params),
                instance_body,
            )
            .with_doc(summary),
        ]
    }

    fn factory(&self) -> DeclarationBlock {
        let name = self.ty.name();
        let arity = self.ty.arity();
        let params: Vec<String> = self
            .ty
            .type_params
            .iter()
            .map(|p| format!("{}: IType<any>", p))
            .collect();
        let any_args = vec!["any"; arity].join(", ");

        let doc = match self.summary {
            Some(summary) => format!("{} {}", FACTORY_TAG, summary),
            None => FACTORY_TAG.to_string(),
        };

        DeclarationBlock::new(
            factory_name(name),
            BlockKind::Factory,
            format!(
                "export function {}({}): {}<{}>",
                factory_name(name),
                params.join(", "),
                static_shape_name(name, arity),
                any_args
            ),
            BlockBody::Signature,
        )
        .with_doc(Some(doc))
    }
}
