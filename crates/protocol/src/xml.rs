//! Minimal namespace-aware XML element tree.
//!
//! Backend responses are small documents that need child and attribute
//! lookups rather than streaming, so the event stream from
//! [`quick_xml::NsReader`] is materialised into an [`Element`] tree once and
//! queried from there. Element text is kept verbatim — token decoding
//! depends on whitespace runs surviving untouched.

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;

use crate::error::DecodeError;

/// A parsed XML element: local name, resolved namespace, attributes, the
/// text contained directly in the element, and child elements in document
/// order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    namespace: Option<String>,
    attributes: Vec<(String, String)>,
    text: String,
    children: Vec<Element>,
}

impl Element {
    /// Parses a full XML document and returns its root element.
    ///
    /// Fails with [`DecodeError::Xml`] on non-well-formed input and
    /// [`DecodeError::EmptyDocument`] if no root element is present.
    pub fn parse(xml: &str) -> Result<Element, DecodeError> {
        let mut reader = NsReader::from_str(xml);
        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            let (resolution, event) = reader.read_resolved_event()?;
            match event {
                Event::Start(start) => {
                    stack.push(element_from_start(namespace_of(&resolution), &start)?);
                }
                Event::Empty(start) => {
                    let element = element_from_start(namespace_of(&resolution), &start)?;
                    attach(&mut stack, &mut root, element);
                }
                Event::End(_) => {
                    // The reader rejects unmatched end tags before we get here.
                    let Some(element) = stack.pop() else { continue };
                    attach(&mut stack, &mut root, element);
                }
                Event::Text(text) => {
                    if let Some(parent) = stack.last_mut() {
                        parent
                            .text
                            .push_str(&text.unescape().map_err(quick_xml::Error::from)?);
                    }
                }
                Event::CData(data) => {
                    if let Some(parent) = stack.last_mut() {
                        parent
                            .text
                            .push_str(&String::from_utf8_lossy(&data.into_inner()));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        root.ok_or(DecodeError::EmptyDocument)
    }

    /// Local (prefix-free) name of the element.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Namespace URI the element resolved to, if any.
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Text contained directly in this element, verbatim.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// All child elements in document order.
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Value of the named attribute, if present.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Value of the named attribute, or [`DecodeError::MissingAttribute`].
    pub fn expect_attribute(&self, name: &str) -> Result<&str, DecodeError> {
        self.attribute(name)
            .ok_or_else(|| DecodeError::MissingAttribute {
                element: self.name.clone(),
                attribute: name.to_owned(),
            })
    }

    /// First child with the given namespace and local name, if any.
    pub fn child<'a>(&'a self, namespace: &'a str, local: &'a str) -> Option<&'a Element> {
        self.children_named(namespace, local).next()
    }

    /// All children with the given namespace and local name, in document order.
    pub fn children_named<'a>(
        &'a self,
        namespace: &'a str,
        local: &'a str,
    ) -> impl Iterator<Item = &'a Element> {
        self.children
            .iter()
            .filter(move |child| child.name == local && child.namespace.as_deref() == Some(namespace))
    }

    /// First child with the given namespace and local name, or
    /// [`DecodeError::MissingElement`].
    pub fn expect_child<'a>(
        &'a self,
        namespace: &'a str,
        local: &'a str,
    ) -> Result<&'a Element, DecodeError> {
        self.child(namespace, local)
            .ok_or_else(|| DecodeError::MissingElement {
                name: local.to_owned(),
            })
    }

    /// Like [`Element::expect_child`] but takes the child out of the tree,
    /// avoiding a clone of potentially large subtrees.
    pub fn take_child(mut self, namespace: &str, local: &str) -> Result<Element, DecodeError> {
        let index = self
            .children
            .iter()
            .position(|child| {
                child.name == local && child.namespace.as_deref() == Some(namespace)
            })
            .ok_or_else(|| DecodeError::MissingElement {
                name: local.to_owned(),
            })?;
        Ok(self.children.swap_remove(index))
    }
}

fn namespace_of(resolution: &ResolveResult<'_>) -> Option<String> {
    match resolution {
        ResolveResult::Bound(Namespace(uri)) => Some(String::from_utf8_lossy(uri).into_owned()),
        _ => None,
    }
}

fn element_from_start(
    namespace: Option<String>,
    start: &BytesStart<'_>,
) -> Result<Element, DecodeError> {
    let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
    let mut attributes = Vec::new();
    for attribute in start.attributes() {
        let attribute = attribute.map_err(quick_xml::Error::from)?;
        // Namespace declarations are resolved by the reader, not kept as data.
        if attribute.key.as_ref().starts_with(b"xmlns") {
            continue;
        }
        let key = String::from_utf8_lossy(attribute.key.local_name().as_ref()).into_owned();
        let value = attribute
            .unescape_value()
            .map_err(quick_xml::Error::from)?
            .into_owned();
        attributes.push((key, value));
    }
    Ok(Element {
        name,
        namespace,
        attributes,
        text: String::new(),
        children: Vec::new(),
    })
}

fn attach(stack: &mut Vec<Element>, root: &mut Option<Element>, element: Element) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => {
            if root.is_none() {
                *root = Some(element);
            }
        }
    }
}
