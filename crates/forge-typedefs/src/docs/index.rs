//! Documentation index
//!
//! Maps documentation identifiers to summary text. The index is built once
//! per generation session, usually from the XML documentation file the
//! compiler writes next to an assembly:
//!
//! ```xml
//! <doc>
//!   <members>
//!     <member name="T:Acme.Widget">
//!       <summary>A widget.</summary>
//!     </member>
//!   </members>
//! </doc>
//! ```

use crate::error::DocsError;
use indexmap::IndexMap;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Summary text keyed by documentation identifier
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentationIndex {
    entries: IndexMap<String, String>,
}

impl DocumentationIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an entry
    pub fn insert(&mut self, id: impl Into<String>, summary: impl Into<String>) {
        self.entries.insert(id.into(), summary.into());
    }

    /// Add an entry, builder style
    pub fn with_entry(mut self, id: impl Into<String>, summary: impl Into<String>) -> Self {
        self.insert(id, summary);
        self
    }

    /// Summary for a documentation identifier
    pub fn lookup(&self, id: &str) -> Option<&str> {
        self.entries.get(id).map(String::as_str)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the index has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over (identifier, summary) pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Read an XML documentation file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DocsError> {
        let path = path.as_ref();
        let xml = std::fs::read_to_string(path).map_err(|source| DocsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let index = Self::from_xml(&xml)?;
        debug!(path = %path.display(), entries = index.len(), "typedefs.docs loaded");
        Ok(index)
    }

    /// Parse an XML documentation document
    ///
    /// Only `<summary>` elements are indexed. Inline markup is flattened:
    /// `<see cref="..."/>` becomes the referenced short name, `<paramref>` and
    /// `<typeparamref>` become the parameter name, `<c>` is wrapped in
    /// backticks, and whitespace runs collapse to single spaces.
    pub fn from_xml(xml: &str) -> Result<Self, DocsError> {
        let mut reader = Reader::from_str(xml);
        let mut index = Self::new();
        let mut member: Option<String> = None;
        let mut summary: Option<String> = None;
        // Open `<see>` element: its reference text, and whether it has its own label
        let mut reference: Option<(String, bool)> = None;

        loop {
            match reader.read_event()? {
                Event::Start(e) => match e.name().as_ref() {
                    b"member" => {
                        member = attribute(&e, b"name")?;
                        summary = None;
                    }
                    b"summary" if member.is_some() => summary = Some(String::new()),
                    b"see" | b"seealso" if summary.is_some() => {
                        reference = Some((inline_reference(&e)?, false));
                    }
                    b"c" => push(&mut summary, "`"),
                    b"para" => push(&mut summary, " "),
                    _ => {}
                },
                Event::Empty(e) => {
                    if summary.is_some() {
                        let inline = inline_reference(&e)?;
                        push(&mut summary, &inline);
                    }
                }
                Event::Text(t) => {
                    if summary.is_some() {
                        let text = t.unescape()?;
                        if let Some((_, labelled)) = reference.as_mut() {
                            *labelled |= !text.trim().is_empty();
                        }
                        push(&mut summary, &text);
                    }
                }
                Event::CData(c) => {
                    if summary.is_some() {
                        let text = String::from_utf8_lossy(&c).into_owned();
                        push(&mut summary, &text);
                    }
                }
                Event::End(e) => match e.name().as_ref() {
                    b"summary" => {
                        if let (Some(id), Some(text)) = (member.as_ref(), summary.take()) {
                            let text = normalize_whitespace(&text);
                            if !text.is_empty() {
                                index.insert(id.clone(), text);
                            }
                        }
                    }
                    b"member" => {
                        member = None;
                        summary = None;
                    }
                    b"see" | b"seealso" => {
                        if let Some((text, false)) = reference.take() {
                            push(&mut summary, &text);
                        }
                    }
                    b"c" => push(&mut summary, "`"),
                    b"para" => push(&mut summary, " "),
                    _ => {}
                },
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(index)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for DocumentationIndex {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut index = Self::new();
        for (id, summary) in iter {
            index.insert(id, summary);
        }
        index
    }
}

fn push(summary: &mut Option<String>, text: &str) {
    if let Some(summary) = summary {
        summary.push_str(text);
    }
}

fn attribute(element: &BytesStart<'_>, name: &[u8]) -> Result<Option<String>, DocsError> {
    match element.try_get_attribute(name)? {
        Some(attr) => Ok(Some(attr.unescape_value()?.into_owned())),
        None => Ok(None),
    }
}

/// Text for a self-closing element inside a summary
fn inline_reference(element: &BytesStart<'_>) -> Result<String, DocsError> {
    let text = match element.name().as_ref() {
        b"see" | b"seealso" => {
            if let Some(cref) = attribute(element, b"cref")? {
                short_name(&cref).to_string()
            } else {
                attribute(element, b"langword")?.unwrap_or_default()
            }
        }
        b"paramref" | b"typeparamref" => attribute(element, b"name")?.unwrap_or_default(),
        b"para" | b"br" => " ".to_string(),
        _ => String::new(),
    };
    Ok(text)
}

/// Short display name of a cref: `M:Acme.Widget.Resize(System.Int32)` -> `Resize`
fn short_name(cref: &str) -> &str {
    let name = match cref.split_once(':') {
        Some((prefix, rest)) if prefix.len() == 1 => rest,
        _ => cref,
    };
    let name = name.split('(').next().unwrap_or(name);
    let name = name.rsplit('.').next().unwrap_or(name);
    name.split('`').next().unwrap_or(name)
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    const DOCS: &str = r#"<?xml version="1.0"?>
<doc>
    <assembly><name>Acme</name></assembly>
    <members>
        <member name="T:Acme.Widget">
            <summary>
            A widget that can be
            resized.
            </summary>
            <remarks>Not indexed.</remarks>
        </member>
        <member name="M:Acme.Widget.Resize(System.Int32,System.Int32)">
            <summary>Resizes to <paramref name="width"/> by <c>height</c>; see <see cref="T:Acme.Gadget`1"/>.</summary>
            <param name="width">Ignored.</param>
        </member>
        <member name="P:Acme.Widget.Owner">
            <summary>Owner, or <see langword="null"/> &amp; unset.</summary>
        </member>
        <member name="F:Acme.Widget.Empty">
            <summary>   </summary>
        </member>
        <member name="F:Acme.Widget.Undocumented" />
    </members>
</doc>"#;

    #[test]
    fn test_from_xml() {
        let index = DocumentationIndex::from_xml(DOCS).unwrap();

        assert_eq!(index.len(), 3);
        assert_eq!(
            index.lookup("T:Acme.Widget"),
            Some("A widget that can be resized.")
        );
        assert_eq!(
            index.lookup("M:Acme.Widget.Resize(System.Int32,System.Int32)"),
            Some("Resizes to width by `height`; see Gadget.")
        );
        assert_eq!(
            index.lookup("P:Acme.Widget.Owner"),
            Some("Owner, or null & unset.")
        );
        assert_eq!(index.lookup("F:Acme.Widget.Empty"), None);
        assert_eq!(index.lookup("F:Acme.Widget.Undocumented"), None);
    }

    #[test]
    fn test_see_with_closing_tag() {
        let index = DocumentationIndex::from_xml(
            r#"<doc><members>
                <member name="T:Acme.Gadget">
                    <summary>Wraps <see cref="T:Acme.Widget"></see> and <see cref="T:Acme.Box`1">a box</see>.</summary>
                </member>
            </members></doc>"#,
        )
        .unwrap();
        assert_eq!(
            index.lookup("T:Acme.Gadget"),
            Some("Wraps Widget and a box.")
        );
    }

    #[test]
    fn test_malformed_xml() {
        let result = DocumentationIndex::from_xml("<doc><members></doc>");
        assert!(result.is_err());
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(DOCS.as_bytes()).unwrap();

        let index = DocumentationIndex::from_path(file.path()).unwrap();
        assert_eq!(index.len(), 3);

        let missing = DocumentationIndex::from_path(file.path().with_extension("missing"));
        assert!(matches!(missing, Err(DocsError::Io { .. })));
    }

    #[test]
    fn test_from_iter() {
        let index: DocumentationIndex =
            [("T:A", "type a"), ("P:A.X", "property x")].into_iter().collect();
        assert_eq!(index.lookup("P:A.X"), Some("property x"));
        assert_eq!(index.lookup("P:A.Y"), None);
        assert_eq!(
            index.iter().map(|(k, _)| k).collect::<Vec<_>>(),
            vec!["T:A", "P:A.X"]
        );
    }

    #[test]
    fn test_short_name() {
        assert_eq!(short_name("T:Acme.Widget"), "Widget");
        assert_eq!(short_name("M:Acme.Widget.Resize(System.Int32)"), "Resize");
        assert_eq!(short_name("T:System.Collections.Generic.List`1"), "List");
        assert_eq!(short_name("Plain"), "Plain");
    }
}
