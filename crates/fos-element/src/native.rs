//! Native host adapter
//!
//! One method per primitive the host DOM provides. The facade depends only
//! on these traits.
//!
//! Handles are cheap to clone and refer to a node owned by the host; two
//! clones of a handle are the same node. Mutation goes through `&self`
//! because the host owns the state, and hosts are single-threaded.

use crate::Result;

/// Single attribute node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Client box of an element (content + padding, no scrollbar)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ClientRect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

/// Host-defined node identity (for example tree address and node index)
pub type IdentityKey = (usize, u64);

/// Path expression evaluation.
///
/// Implemented by documents and by nodes; nodes serve as the evaluator
/// when they have no owner document.
pub trait XPathEvaluator<N> {
    /// Evaluate `expression` with `context` as the context node.
    ///
    /// Returns matches as an ordered snapshot in document order.
    fn evaluate(&self, expression: &str, context: &N) -> Result<Vec<N>>;
}

/// Native document handle
pub trait NativeDocument: Clone {
    type Node: NativeNode<Document = Self>;

    /// Create a detached element owned by this document
    fn create_element(&self, tag: &str) -> Result<Self::Node>;
}

/// Native element handle
pub trait NativeNode: Clone + XPathEvaluator<Self> {
    /// Owning document type; evaluates paths against this node type
    type Document: NativeDocument<Node = Self> + XPathEvaluator<Self>;

    /// Identity comparison (`Node.isSameNode`)
    fn is_same_node(&self, other: &Self) -> bool;

    /// Hashable identity, equal exactly when `is_same_node` holds.
    ///
    /// Node sets de-duplicate through a hash set when the host provides
    /// one and fall back to pairwise `is_same_node` otherwise.
    fn identity_key(&self) -> Option<IdentityKey> {
        None
    }

    /// Owning document, if the host tracks one
    fn owner_document(&self) -> Option<Self::Document>;

    /// Tag name
    fn tag_name(&self) -> String;

    /// Attribute value, `None` when absent
    fn get_attribute(&self, name: &str) -> Option<String>;

    fn set_attribute(&self, name: &str, value: &str) -> Result<()>;

    /// Remove an attribute. Removing an absent attribute is not an error.
    fn remove_attribute(&self, name: &str) -> Result<()>;

    /// Attribute nodes in native order
    fn attributes(&self) -> Vec<Attribute>;

    /// Raw class string (`className`)
    fn class_name(&self) -> String {
        self.get_attribute("class").unwrap_or_default()
    }

    fn set_class_name(&self, value: &str) -> Result<()> {
        self.set_attribute("class", value)
    }

    /// Inline style property value
    fn style_property(&self, property: &str) -> Option<String>;

    fn set_style_property(&self, property: &str, value: &str) -> Result<()>;

    /// Serialized inline style (`style.cssText`)
    fn style_text(&self) -> String;

    /// Replace the whole inline style
    fn set_style_text(&self, text: &str) -> Result<()>;

    /// Inline style declarations in declaration order
    fn style_declarations(&self) -> Vec<(String, String)>;

    /// Subtree selector match (`querySelectorAll`) in document order
    fn query_selector_all(&self, selector: &str) -> Result<Vec<Self>>;

    /// Client geometry at call time
    fn client_rect(&self) -> ClientRect;
}
