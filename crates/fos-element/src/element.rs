//! Element
//!
//! Aggregate wrapper over one native node. Attribute, class, style and
//! search operations delegate to their facades.

use std::fmt;
use std::ops::Div;

use crate::{
    Attribute, AttributeIter, AttributeView, ClassNames, Document, NativeDocument, NativeNode,
    NodeSet, Result, SearchEngine, SearchOptions, StyleFacade, StyleInput, Styled,
};

/// Client size snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// Client position snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Wrapped DOM element.
///
/// Elements wrapping the same native node compare equal.
#[derive(Clone)]
pub struct Element<N: NativeNode> {
    native: N,
}

impl<N: NativeNode> Element<N> {
    pub fn new(native: N) -> Self {
        Self { native }
    }

    /// Create an element through the document factory
    pub fn create<D>(document: &Document<D>, tag: &str) -> Result<Self>
    where
        D: NativeDocument<Node = N>,
    {
        document.create_element(tag)
    }

    /// Native node handle
    pub fn native(&self) -> &N {
        &self.native
    }

    pub fn into_native(self) -> N {
        self.native
    }

    /// Owning document context
    pub fn document(&self) -> Option<Document<N::Document>> {
        self.native.owner_document().map(Document::new)
    }

    /// Tag name
    pub fn name(&self) -> String {
        self.native.tag_name()
    }

    pub fn tag_name(&self) -> String {
        self.name()
    }

    /// The `id` attribute, empty when absent
    pub fn id(&self) -> String {
        self.attr("id").unwrap_or_default()
    }

    // Attributes

    /// Live map view over the attributes
    pub fn attributes(&self) -> AttributeView<'_, N> {
        AttributeView::new(self)
    }

    pub fn attr(&self, name: &str) -> Option<String> {
        self.attributes().get(name)
    }

    pub fn get_attribute(&self, name: &str) -> Option<String> {
        self.attributes().get(name)
    }

    pub fn get(&self, name: &str) -> Option<String> {
        self.attributes().get(name)
    }

    pub fn set_attribute(&self, name: &str, value: impl ToString) -> Result<()> {
        self.attributes().set(name, value)
    }

    pub fn set(&self, name: &str, value: impl ToString) -> Result<()> {
        self.attributes().set(name, value)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes().has(name)
    }

    pub fn remove_attribute(&self, name: &str) -> Result<()> {
        self.attributes().delete(name)
    }

    pub fn attribute_nodes(&self) -> Vec<Attribute> {
        self.native.attributes()
    }

    pub fn keys(&self) -> Vec<String> {
        self.attributes().keys()
    }

    pub fn values(&self) -> Vec<String> {
        self.attributes().values()
    }

    /// Visit every attribute value in native order
    pub fn each(&self, mut visitor: impl FnMut(&str)) {
        self.attributes().each(|_, value| visitor(value));
    }

    /// Lazy `(name, value)` pairs, re-read on every call
    pub fn attribute_pairs(&self) -> AttributeIter<'_, N> {
        self.attributes().iter()
    }

    // Classes

    pub fn class_list(&self) -> ClassNames<'_, N> {
        ClassNames::new(self)
    }

    /// Raw class string
    pub fn class_name(&self) -> String {
        self.native.class_name()
    }

    pub fn set_class_name(&self, value: &str) -> Result<()> {
        self.native.set_class_name(value)
    }

    pub fn class_names(&self) -> Vec<String> {
        self.class_list().list()
    }

    pub fn has_class(&self, name: &str) -> bool {
        self.class_list().contains(name)
    }

    pub fn add_class(&self, name: &str) -> Result<&Self> {
        self.class_list().add(name)
    }

    pub fn remove_class(&self, name: &str) -> Result<&Self> {
        self.class_list().remove(name)
    }

    // Style

    pub fn style_facade(&self) -> StyleFacade<'_, N> {
        StyleFacade::new(self)
    }

    /// Style dispatcher.
    ///
    /// Text replaces the inline style, properties are assigned one at a
    /// time; both hand back the element. No input returns a read view.
    pub fn style(&self, input: impl Into<StyleInput>) -> Result<Styled<'_, N>> {
        let style = self.style_facade();
        match input.into() {
            StyleInput::Text(text) => {
                style.replace(&text)?;
                Ok(Styled::Element(self))
            }
            StyleInput::Properties(properties) => {
                style.assign(properties)?;
                Ok(Styled::Element(self))
            }
            StyleInput::None => Ok(Styled::View(style.read())),
        }
    }

    // Geometry

    pub fn size(&self) -> Size {
        let rect = self.native.client_rect();
        Size {
            width: rect.width,
            height: rect.height,
        }
    }

    pub fn position(&self) -> Position {
        let rect = self.native.client_rect();
        Position {
            x: rect.left,
            y: rect.top,
        }
    }

    // Search

    pub fn search_engine(&self) -> SearchEngine<'_, N> {
        SearchEngine::new(self)
    }

    pub fn css(&self, selector: &str) -> NodeSet<N> {
        self.search_engine().css(selector)
    }

    pub fn xpath(&self, path: &str) -> NodeSet<N> {
        self.search_engine().xpath(path)
    }

    pub fn search<I>(&self, selectors: I) -> NodeSet<N>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.search_engine().search(selectors)
    }

    pub fn search_with<I>(&self, options: &SearchOptions, selectors: I) -> NodeSet<N>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.search_engine().search_with(options, selectors)
    }

    pub fn at(&self, path: &str) -> Option<Element<N>> {
        self.search_engine().at(path)
    }

    pub fn at_css<I>(&self, rules: I) -> Option<Element<N>>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.search_engine().at_css(rules)
    }

    pub fn at_xpath<I>(&self, paths: I) -> Option<Element<N>>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.search_engine().at_xpath(paths)
    }

    /// XPath over several paths, flattened without duplicates
    pub fn xpath_all<I>(&self, paths: I) -> NodeSet<N>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.search_engine().xpath_all(paths)
    }
}

impl<N: NativeNode> PartialEq for Element<N> {
    fn eq(&self, other: &Self) -> bool {
        self.native.is_same_node(&other.native)
    }
}

impl<N: NativeNode> fmt::Debug for Element<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element").field("name", &self.name()).finish()
    }
}

impl<N: NativeNode> fmt::Display for Element<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.name())
    }
}

/// `element / "path"` evaluates the path as XPath
impl<'a, 'b, N: NativeNode> Div<&'b str> for &'a Element<N> {
    type Output = NodeSet<N>;

    fn div(self, path: &'b str) -> NodeSet<N> {
        self.xpath_all([path])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockDocument;
    use crate::ClientRect;

    #[test]
    fn test_identity() {
        let doc = MockDocument::new();
        let node = doc.node("div");

        let a = Element::new(node.clone());
        let b = Element::new(node);
        let c = Element::new(doc.node("div"));

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_scenario_id_and_classes() {
        let doc = MockDocument::new();
        let el = Element::new(doc.node("div"));
        el.set_attribute("id", "a").unwrap();
        el.set_attribute("class", "foo bar").unwrap();

        assert_eq!(el.attr("id").as_deref(), Some("a"));
        assert_eq!(el.id(), "a");
        assert_eq!(el.class_names(), vec!["foo", "bar"]);

        el.add_class("baz").unwrap();
        assert_eq!(el.class_names(), vec!["foo", "bar", "baz"]);
        assert_eq!(el.class_name(), "foo bar baz");
    }

    #[test]
    fn test_missing_id_is_empty() {
        let doc = MockDocument::new();
        let el = Element::new(doc.node("span"));
        assert_eq!(el.id(), "");
        assert_eq!(el.attr("id"), None);
    }

    #[test]
    fn test_geometry() {
        let doc = MockDocument::new();
        let node = doc.node("div");
        node.set_rect(ClientRect {
            top: 2.0,
            left: 1.0,
            width: 300.0,
            height: 150.0,
        });
        let el = Element::new(node);

        assert_eq!(el.size(), Size { width: 300.0, height: 150.0 });
        assert_eq!(el.position(), Position { x: 1.0, y: 2.0 });
    }

    #[test]
    fn test_display() {
        let doc = MockDocument::new();
        let el = Element::new(doc.node("section"));
        assert_eq!(el.to_string(), "<section>");
        assert_eq!(format!("{el:?}"), "Element { name: \"section\" }");
    }

    #[test]
    fn test_create_through_document() {
        let doc = MockDocument::new();
        let document = Document::new(doc);
        let el = Element::create(&document, "p").unwrap();
        assert_eq!(el.name(), "p");
        assert!(el.document().is_some());
    }

    #[test]
    fn test_wrap_native_node() {
        let doc = MockDocument::new();
        let node = doc.node("p");
        let document = Document::new(doc);

        let el = document.wrap(node.clone());
        assert_eq!(el.name(), "p");
        assert_eq!(el, Element::new(node.clone()));
        assert_eq!(el.into_native().key(), node.key());
    }

    #[test]
    fn test_attribute_pairs_in_order() {
        let doc = MockDocument::new();
        let el = Element::new(doc.node("a"));
        el.set("href", "/x").unwrap();
        el.set("rel", "next").unwrap();

        let pairs: Vec<(String, String)> = el.attribute_pairs().collect();
        assert_eq!(
            pairs,
            vec![
                ("href".to_string(), "/x".to_string()),
                ("rel".to_string(), "next".to_string()),
            ]
        );
    }

    #[test]
    fn test_each_visits_values() {
        let doc = MockDocument::new();
        let el = Element::new(doc.node("a"));
        el.set("href", "/x").unwrap();
        el.set("rel", "next").unwrap();

        let mut seen = Vec::new();
        el.each(|value| seen.push(value.to_string()));
        assert_eq!(seen, vec!["/x", "next"]);
    }
}
