//! Inline style
//!
//! Read view, whole-text replace and per-property assignment over the
//! native inline style.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::{Element, NativeNode, Result};

/// Argument of the style dispatcher
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StyleInput {
    /// Raw declaration text, replaces the whole inline style
    Text(String),
    /// Property/value pairs, applied in order
    Properties(Vec<(String, String)>),
    /// Read the current style
    #[default]
    None,
}

impl From<&str> for StyleInput {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for StyleInput {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<()> for StyleInput {
    fn from(_: ()) -> Self {
        Self::None
    }
}

impl<K: Into<String>, V: Into<String>> From<Vec<(K, V)>> for StyleInput {
    fn from(pairs: Vec<(K, V)>) -> Self {
        Self::properties(pairs)
    }
}

impl<K: Into<String>, V: Into<String>, const LEN: usize> From<[(K, V); LEN]> for StyleInput {
    fn from(pairs: [(K, V); LEN]) -> Self {
        Self::properties(pairs)
    }
}

impl<K: Into<String>, V: Into<String>> From<BTreeMap<K, V>> for StyleInput {
    fn from(map: BTreeMap<K, V>) -> Self {
        Self::properties(map)
    }
}

impl<K: Into<String>, V: Into<String>, S> From<HashMap<K, V, S>> for StyleInput {
    fn from(map: HashMap<K, V, S>) -> Self {
        Self::properties(map)
    }
}

impl StyleInput {
    pub fn properties<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self::Properties(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Outcome of the style dispatcher
pub enum Styled<'a, N: NativeNode> {
    /// A write happened; the element, for chaining
    Element(&'a Element<N>),
    /// Nothing was written; the current style
    View(StyleDeclaration),
}

impl<'a, N: NativeNode> Styled<'a, N> {
    pub fn element(self) -> Option<&'a Element<N>> {
        match self {
            Self::Element(element) => Some(element),
            Self::View(_) => None,
        }
    }

    pub fn view(self) -> Option<StyleDeclaration> {
        match self {
            Self::View(view) => Some(view),
            Self::Element(_) => None,
        }
    }
}

impl<N: NativeNode> fmt::Debug for Styled<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Element(element) => f.debug_tuple("Element").field(element).finish(),
            Self::View(view) => f.debug_tuple("View").field(view).finish(),
        }
    }
}

/// Inline style as read at construction time
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StyleDeclaration {
    declarations: Vec<(String, String)>,
    css_text: String,
}

impl StyleDeclaration {
    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|(name, _)| name == property)
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Property names in declaration order
    pub fn properties(&self) -> impl Iterator<Item = &str> {
        self.declarations.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.declarations
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Serialized declaration text
    pub fn css_text(&self) -> &str {
        &self.css_text
    }
}

/// Inline style of an element, created per call
pub struct StyleFacade<'a, N: NativeNode> {
    element: &'a Element<N>,
}

impl<'a, N: NativeNode> StyleFacade<'a, N> {
    pub fn new(element: &'a Element<N>) -> Self {
        Self { element }
    }

    /// Snapshot of the current inline style
    pub fn read(&self) -> StyleDeclaration {
        let native = self.element.native();
        StyleDeclaration {
            declarations: native.style_declarations(),
            css_text: native.style_text(),
        }
    }

    pub fn get(&self, property: &str) -> Option<String> {
        self.element.native().style_property(property)
    }

    pub fn set(&self, property: &str, value: &str) -> Result<()> {
        tracing::trace!(property, value, "set style property");
        self.element.native().set_style_property(property, value)
    }

    /// Overwrite the whole inline style
    pub fn replace(&self, text: &str) -> Result<()> {
        tracing::trace!(text, "replace inline style");
        self.element.native().set_style_text(text)
    }

    /// Apply each pair in order; a repeated property keeps the last value
    pub fn assign<K, V>(&self, properties: impl IntoIterator<Item = (K, V)>) -> Result<()>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (property, value) in properties {
            self.set(property.as_ref(), value.as_ref())?;
        }
        Ok(())
    }
}
