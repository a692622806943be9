//! Declaration emitter
//!
//! Turns declaration blocks into text. Layout rules:
//!
//! - a doc comment is a single `/** text */` line directly above what it documents
//! - member lines are indented with one tab
//! - a blank line separates two members when both of them are documented
//! - blocks are separated by exactly one blank line

/// Role of a declaration block in the emitted text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Enum,
    Class,
    Interface,
    /// Non-generic delegate: interface holding a bare call signature
    Delegate,
    /// Generic type factory function
    Factory,
    /// Constructors and statics of a generic type
    StaticShape,
    /// Instance members of a generic type
    InstanceShape,
}

/// One rendered member, with its optional summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberLine {
    pub doc: Option<String>,
    pub text: String,
}

impl MemberLine {
    /// Create an undocumented line
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            doc: None,
            text: text.into(),
        }
    }

    /// Attach a summary
    pub fn with_doc(mut self, doc: Option<String>) -> Self {
        self.doc = doc;
        self
    }
}

/// Body of a declaration block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockBody {
    /// `header;`
    Signature,
    /// `header { member }` on a single line
    Inline(String),
    /// `header {`, one member per line, `}`
    Members(Vec<MemberLine>),
}

/// A single emitted declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationBlock {
    /// Declared name, including any `$` suffix
    pub name: String,
    /// Role of this block
    pub kind: BlockKind,
    /// Everything before the body, e.g. `export interface Box$1<T>`
    pub header: String,
    /// Summary shown above the declaration
    pub doc: Option<String>,
    pub body: BlockBody,
}

impl DeclarationBlock {
    /// Create a block
    pub fn new(
        name: impl Into<String>,
        kind: BlockKind,
        header: impl Into<String>,
        body: BlockBody,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            header: header.into(),
            doc: None,
            body,
        }
    }

    /// Attach a summary
    pub fn with_doc(mut self, doc: Option<String>) -> Self {
        self.doc = doc;
        self
    }

    /// Member lines of the body (empty for signatures and inline bodies)
    pub fn members(&self) -> &[MemberLine] {
        match &self.body {
            BlockBody::Members(members) => members,
            BlockBody::Signature | BlockBody::Inline(_) => &[],
        }
    }

    /// Render this block
    pub fn render(&self) -> String {
        let mut output = String::new();

        if let Some(doc) = &self.doc {
            output.push_str(&doc_comment(doc));
            output.push('\n');
        }

        match &self.body {
            BlockBody::Signature => {
                output.push_str(&self.header);
                output.push(';');
            }
            BlockBody::Inline(member) => {
                output.push_str(&format!("{} {{ {} }}", self.header, member));
            }
            BlockBody::Members(members) => {
                output.push_str(&self.header);
                output.push_str(" {\n");
                for (i, member) in members.iter().enumerate() {
                    if i > 0 && member.doc.is_some() && members[i - 1].doc.is_some() {
                        output.push('\n');
                    }
                    if let Some(doc) = &member.doc {
                        output.push('\t');
                        output.push_str(&doc_comment(doc));
                        output.push('\n');
                    }
                    output.push('\t');
                    output.push_str(&member.text);
                    output.push('\n');
                }
                output.push('}');
            }
        }

        output
    }
}

/// Format a summary as a single-line doc comment
pub fn doc_comment(text: &str) -> String {
    format!("/** {} */", text.replace("*/", "*\\/"))
}

/// Join blocks with one blank line between them
pub fn emit(blocks: &[DeclarationBlock]) -> String {
    let rendered: Vec<String> = blocks.iter().map(|b| b.render()).collect();
    let mut output = rendered.join("\n\n");
    output.truncate(output.trim_end().len());
    output
}
