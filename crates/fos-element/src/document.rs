//! Document context
//!
//! Wraps a native document handle and builds elements and node sets for it.

use std::fmt;

use crate::{Element, NativeDocument, NodeSet, Result};

/// Document context for wrapped elements
pub struct Document<D: NativeDocument> {
    native: D,
}

impl<D: NativeDocument> Document<D> {
    pub fn new(native: D) -> Self {
        Self { native }
    }

    /// Native document handle
    pub fn native(&self) -> &D {
        &self.native
    }

    /// Create a new element through the host factory
    pub fn create_element(&self, tag: &str) -> Result<Element<D::Node>> {
        let node = self.native.create_element(tag)?;
        tracing::trace!(tag, "created element");
        Ok(Element::new(node))
    }

    /// Wrap a native node
    pub fn wrap(&self, node: D::Node) -> Element<D::Node> {
        Element::new(node)
    }

    /// Build a node set scoped to this document
    pub fn node_set(&self, nodes: impl IntoIterator<Item = D::Node>) -> NodeSet<D::Node> {
        NodeSet::new(Some(self.clone()), nodes)
    }
}

impl<D: NativeDocument> Clone for Document<D> {
    fn clone(&self) -> Self {
        Self {
            native: self.native.clone(),
        }
    }
}

impl<D: NativeDocument> fmt::Debug for Document<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document").finish_non_exhaustive()
    }
}
