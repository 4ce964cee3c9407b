//! Document and node handles
//!
//! `Document` owns the arena behind `Rc<RefCell<..>>`; `NodeRef` is a cheap
//! handle to one element in it. Both implement the `fos-element` adapter
//! traits.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use fos_element::{
    Attribute, ClientRect, DomError, IdentityKey, NativeDocument, NativeNode, Result,
    XPathEvaluator,
};

use crate::style::{parse_declarations, serialize_declarations, set_property};
use crate::{DomTree, ElementData, NodeId, SelectorList, XPath, is_valid_tag_name};

type SharedTree = Rc<RefCell<DomTree>>;

/// In-memory document
#[derive(Clone)]
pub struct Document {
    tree: SharedTree,
}

impl Document {
    /// Create a document with an `html` root element
    pub fn new() -> Self {
        let mut tree = DomTree::new();
        let html = tree.create_element("html");
        tree.append_child(NodeId::ROOT, html);
        Self {
            tree: Rc::new(RefCell::new(tree)),
        }
    }

    /// Document element (first element child of the document node)
    pub fn root(&self) -> Option<NodeRef> {
        let tree = self.tree.borrow();
        tree.children(NodeId::ROOT)
            .iter()
            .copied()
            .find(|&id| tree.element(id).is_some())
            .map(|id| self.handle(id))
    }

    /// Create a detached element
    pub fn create_element(&self, tag: &str) -> Result<NodeRef> {
        if !is_valid_tag_name(tag) {
            return Err(DomError::InvalidTagName(tag.to_string()));
        }
        let id = self.tree.borrow_mut().create_element(tag);
        tracing::trace!(tag, ?id, "allocated element");
        Ok(self.handle(id))
    }

    /// Append `child` to `parent`
    pub fn append_child(&self, parent: &NodeRef, child: &NodeRef) {
        parent.append_child(child);
    }

    fn handle(&self, id: NodeId) -> NodeRef {
        NodeRef {
            tree: self.tree.clone(),
            id,
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("nodes", &self.tree.borrow().len())
            .finish()
    }
}

impl NativeDocument for Document {
    type Node = NodeRef;

    fn create_element(&self, tag: &str) -> Result<NodeRef> {
        Document::create_element(self, tag)
    }
}

impl XPathEvaluator<NodeRef> for Document {
    fn evaluate(&self, expression: &str, context: &NodeRef) -> Result<Vec<NodeRef>> {
        evaluate_path(&context.tree, expression, context.id)
    }
}

/// Handle to an element in a document
#[derive(Clone)]
pub struct NodeRef {
    tree: SharedTree,
    id: NodeId,
}

impl NodeRef {
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Create an element and append it as the last child
    pub fn append(&self, tag: &str) -> Result<NodeRef> {
        let child = self.owner().create_element(tag)?;
        self.append_child(&child);
        Ok(child)
    }

    /// Append `child`, moving it from its current parent.
    ///
    /// Nodes from another document and cycles are ignored.
    pub fn append_child(&self, child: &NodeRef) {
        if !Rc::ptr_eq(&self.tree, &child.tree) {
            tracing::warn!(parent = ?self.id, child = ?child.id, "node belongs to another document");
            return;
        }
        self.tree.borrow_mut().append_child(self.id, child.id);
    }

    /// Set the client box reported to the facade
    pub fn set_client_rect(&self, rect: ClientRect) {
        if let Some(element) = self.tree.borrow_mut().element_mut(self.id) {
            element.rect = rect;
        }
    }

    /// Element children in order
    pub fn children(&self) -> Vec<NodeRef> {
        let tree = self.tree.borrow();
        tree.children(self.id)
            .iter()
            .copied()
            .filter(|&id| tree.element(id).is_some())
            .map(|id| self.sibling(id))
            .collect()
    }

    /// Parent element
    pub fn parent(&self) -> Option<NodeRef> {
        let parent = self.tree.borrow().parent_element(self.id)?;
        Some(self.sibling(parent))
    }

    fn owner(&self) -> Document {
        Document {
            tree: self.tree.clone(),
        }
    }

    fn sibling(&self, id: NodeId) -> NodeRef {
        NodeRef {
            tree: self.tree.clone(),
            id,
        }
    }

    fn with_element<R>(&self, f: impl FnOnce(&ElementData) -> R) -> Option<R> {
        self.tree.borrow().element(self.id).map(f)
    }

    fn with_element_mut<R>(&self, f: impl FnOnce(&mut ElementData) -> R) -> Option<R> {
        self.tree.borrow_mut().element_mut(self.id).map(f)
    }

    fn style_attribute(&self) -> String {
        self.get_attribute("style").unwrap_or_default()
    }

    /// Store serialized style text, dropping the attribute when empty
    fn write_style(&self, text: &str) -> Result<()> {
        if text.is_empty() {
            self.remove_attribute("style")
        } else {
            self.set_attribute("style", text)
        }
    }
}

impl fmt::Debug for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("tag", &self.tag_name())
            .finish()
    }
}

impl XPathEvaluator<NodeRef> for NodeRef {
    fn evaluate(&self, expression: &str, context: &NodeRef) -> Result<Vec<NodeRef>> {
        evaluate_path(&context.tree, expression, context.id)
    }
}

impl NativeNode for NodeRef {
    type Document = Document;

    fn is_same_node(&self, other: &Self) -> bool {
        self.id == other.id && Rc::ptr_eq(&self.tree, &other.tree)
    }

    /// Arena address plus slot; stable while any handle keeps the tree alive
    fn identity_key(&self) -> Option<IdentityKey> {
        Some((Rc::as_ptr(&self.tree) as usize, u64::from(self.id.0)))
    }

    fn owner_document(&self) -> Option<Document> {
        Some(self.owner())
    }

    fn tag_name(&self) -> String {
        self.with_element(|e| e.tag.clone()).unwrap_or_default()
    }

    fn get_attribute(&self, name: &str) -> Option<String> {
        self.with_element(|e| e.attrs.get_attribute(name).map(str::to_string))
            .flatten()
    }

    fn set_attribute(&self, name: &str, value: &str) -> Result<()> {
        self.with_element_mut(|e| e.attrs.set_attribute(name, value))
            .unwrap_or(Ok(()))
    }

    fn remove_attribute(&self, name: &str) -> Result<()> {
        self.with_element_mut(|e| e.attrs.remove_attribute(name));
        Ok(())
    }

    fn attributes(&self) -> Vec<Attribute> {
        self.with_element(|e| e.attrs.iter().cloned().collect())
            .unwrap_or_default()
    }

    fn style_property(&self, property: &str) -> Option<String> {
        let property = property.trim().to_ascii_lowercase();
        parse_declarations(&self.style_attribute())
            .into_iter()
            .find(|(p, _)| *p == property)
            .map(|(_, value)| value)
    }

    fn set_style_property(&self, property: &str, value: &str) -> Result<()> {
        let text = set_property(&self.style_attribute(), property, value)?;
        self.write_style(&text)
    }

    fn style_text(&self) -> String {
        serialize_declarations(&parse_declarations(&self.style_attribute()))
    }

    fn set_style_text(&self, text: &str) -> Result<()> {
        self.write_style(&serialize_declarations(&parse_declarations(text)))
    }

    fn style_declarations(&self) -> Vec<(String, String)> {
        parse_declarations(&self.style_attribute())
    }

    fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeRef>> {
        let list = SelectorList::parse(selector)
            .map_err(|err| DomError::query(selector, err.to_string()))?;
        let matches = list.query_all(&self.tree.borrow(), self.id);
        Ok(matches.into_iter().map(|id| self.sibling(id)).collect())
    }

    fn client_rect(&self) -> ClientRect {
        self.with_element(|e| e.rect).unwrap_or_default()
    }
}

fn evaluate_path(tree: &SharedTree, expression: &str, context: NodeId) -> Result<Vec<NodeRef>> {
    let path = XPath::parse(expression).map_err(|err| DomError::query(expression, err.to_string()))?;
    let matches = path.evaluate(&tree.borrow(), context);
    Ok(matches
        .into_iter()
        .map(|id| NodeRef {
            tree: tree.clone(),
            id,
        })
        .collect())
}
