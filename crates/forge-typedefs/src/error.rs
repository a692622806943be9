//! Error and warning types
//!
//! Generation failures are fatal to the one type being generated; warnings
//! never stop generation and are only reported when not suppressed.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

/// Result type for type definition generation
pub type GenerateResult<T> = Result<T, GenerateError>;

/// Failure to generate the declaration of a single type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    /// Member metadata that cannot be rendered consistently
    #[error("malformed member {member_id}: {reason}")]
    MalformedMember { member_id: String, reason: String },

    /// Member kind the generator has no declaration form for
    #[error("unsupported {kind} member {member_id}")]
    UnsupportedMember { member_id: String, kind: String },
}

impl GenerateError {
    /// Create a malformed member error
    pub fn malformed(member_id: impl Into<String>, reason: impl Into<String>) -> Self {
        GenerateError::MalformedMember {
            member_id: member_id.into(),
            reason: reason.into(),
        }
    }

    /// Create an unsupported member error
    pub fn unsupported(member_id: impl Into<String>, kind: impl ToString) -> Self {
        GenerateError::UnsupportedMember {
            member_id: member_id.into(),
            kind: kind.to_string(),
        }
    }

    /// Documentation identifier of the offending member
    pub fn member_id(&self) -> &str {
        match self {
            GenerateError::MalformedMember { member_id, .. }
            | GenerateError::UnsupportedMember { member_id, .. } => member_id,
        }
    }
}

/// Errors loading documentation
#[derive(Debug, Error)]
pub enum DocsError {
    /// Documentation file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed XML
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Malformed XML attribute
    #[error("XML attribute error: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    /// Invalid character or entity reference
    #[error("XML escape error: {0}")]
    Escape(#[from] quick_xml::escape::EscapeError),
}

/// Errors loading generator configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed TOML or unknown option
    #[error("invalid configuration: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Non-fatal problem found while generating
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Warning {
    /// No documentation entry for an identifier
    MissingDocumentation { member_id: String },

    /// A type from another assembly the resolver could not name; rendered as `any`
    UnresolvedType { type_name: String, assembly: String },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::MissingDocumentation { member_id } => {
                write!(f, "missing documentation for {}", member_id)
            }
            Warning::UnresolvedType {
                type_name,
                assembly,
            } => write!(
                f,
                "unresolved type {} from assembly {}; using any",
                type_name, assembly
            ),
        }
    }
}

/// Per-request warning collector
///
/// When warnings are suppressed nothing is logged or collected.
#[derive(Debug, Default)]
pub struct Diagnostics {
    suppress: bool,
    warnings: Vec<Warning>,
}

impl Diagnostics {
    /// Create a collector
    pub fn new(suppress: bool) -> Self {
        Self {
            suppress,
            warnings: Vec::new(),
        }
    }

    /// Record a warning; repeated warnings are recorded once
    pub fn warn(&mut self, warning: Warning) {
        if self.suppress || self.warnings.contains(&warning) {
            return;
        }
        warn!(%warning, "typedefs.warning");
        self.warnings.push(warning);
    }

    /// Warnings recorded so far
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Take the recorded warnings
    pub fn into_warnings(self) -> Vec<Warning> {
        self.warnings
    }
}
