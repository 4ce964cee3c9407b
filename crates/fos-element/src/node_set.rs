//! Node sets
//!
//! Ordered collection of wrapped elements returned by searches.

use std::collections::HashSet;
use std::fmt;

use crate::{Document, Element, IdentityKey, NativeNode};

/// Ordered, de-duplicated collection of elements scoped to a document.
///
/// Duplicates are detected by native node identity; the first occurrence
/// wins and keeps its position.
pub struct NodeSet<N: NativeNode> {
    document: Option<Document<N::Document>>,
    elements: Vec<Element<N>>,
    /// Identity keys of keyed members
    keys: HashSet<IdentityKey>,
}

impl<N: NativeNode> NodeSet<N> {
    /// Build a node set from native nodes
    pub fn new(
        document: Option<Document<N::Document>>,
        nodes: impl IntoIterator<Item = N>,
    ) -> Self {
        Self::from_elements(document, nodes.into_iter().map(Element::new))
    }

    /// Empty node set
    pub fn empty(document: Option<Document<N::Document>>) -> Self {
        Self {
            document,
            elements: Vec::new(),
            keys: HashSet::new(),
        }
    }

    /// Build a node set from already wrapped elements
    pub fn from_elements(
        document: Option<Document<N::Document>>,
        elements: impl IntoIterator<Item = Element<N>>,
    ) -> Self {
        let mut set = Self::empty(document);
        set.extend(elements);
        set
    }

    /// Append elements not already present
    pub fn extend(&mut self, elements: impl IntoIterator<Item = Element<N>>) {
        for element in elements {
            let fresh = match element.native().identity_key() {
                Some(key) => self.keys.insert(key),
                None => !self.contains(&element),
            };
            if fresh {
                self.elements.push(element);
            }
        }
    }

    /// Check if the set holds the same native node
    pub fn contains(&self, element: &Element<N>) -> bool {
        match element.native().identity_key() {
            Some(key) => self.keys.contains(&key),
            None => self.elements.iter().any(|e| e == element),
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn first(&self) -> Option<&Element<N>> {
        self.elements.first()
    }

    pub fn get(&self, index: usize) -> Option<&Element<N>> {
        self.elements.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Element<N>> {
        self.elements.iter()
    }

    /// Document context the set was built for
    pub fn document(&self) -> Option<&Document<N::Document>> {
        self.document.as_ref()
    }

    pub fn into_vec(self) -> Vec<Element<N>> {
        self.elements
    }
}

impl<N: NativeNode> Clone for NodeSet<N> {
    fn clone(&self) -> Self {
        Self {
            document: self.document.clone(),
            elements: self.elements.clone(),
            keys: self.keys.clone(),
        }
    }
}

impl<N: NativeNode> fmt::Debug for NodeSet<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.elements.iter()).finish()
    }
}

impl<N: NativeNode> IntoIterator for NodeSet<N> {
    type Item = Element<N>;
    type IntoIter = std::vec::IntoIter<Element<N>>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

impl<'a, N: NativeNode> IntoIterator for &'a NodeSet<N> {
    type Item = &'a Element<N>;
    type IntoIter = std::slice::Iter<'a, Element<N>>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}
