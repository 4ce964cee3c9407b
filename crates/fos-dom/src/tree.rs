//! DOM Tree (arena-based allocation)

use std::cmp::Ordering;

use crate::{ElementData, Node, NodeId};

/// Arena-based DOM tree. Slot 0 is the document node.
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a tree holding only the document node
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::document()],
        }
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(Node::as_element)
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.get_mut(id).and_then(Node::as_element_mut)
    }

    /// Allocate a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::element(tag));
        id
    }

    /// Append `child` to `parent`, detaching it from its old parent first
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if parent == child || self.is_ancestor(child, parent) {
            tracing::warn!(?parent, ?child, "refusing to create a cycle");
            return;
        }
        if let Some(old) = self.parent(child) {
            if let Some(node) = self.get_mut(old) {
                node.children.retain(|&c| c != child);
            }
        }
        if let Some(node) = self.get_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.get_mut(parent) {
            node.children.push(child);
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Parent if it is an element (not the document node)
    pub fn parent_element(&self, id: NodeId) -> Option<NodeId> {
        self.parent(id).filter(|&p| self.element(p).is_some())
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or_default()
    }

    /// Topmost ancestor (the document node for attached nodes)
    pub fn top(&self, mut id: NodeId) -> NodeId {
        while let Some(parent) = self.parent(id) {
            id = parent;
        }
        id
    }

    /// Check if `ancestor` is a proper ancestor of `id`
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = self.parent(id);
        while let Some(p) = current {
            if p == ancestor {
                return true;
            }
            current = self.parent(p);
        }
        false
    }

    /// Descendants of `id` in document order, excluding `id`
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev());
        }
        out
    }

    /// Compare two nodes by document order.
    ///
    /// Nodes in different trees order by their roots' arena position.
    pub fn document_order(&self, a: NodeId, b: NodeId) -> Ordering {
        self.position(a).cmp(&self.position(b))
    }

    fn position(&self, id: NodeId) -> (NodeId, Vec<usize>) {
        let mut path = Vec::new();
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            let index = self
                .children(parent)
                .iter()
                .position(|&c| c == current)
                .unwrap_or_default();
            path.push(index);
            current = parent;
        }
        path.reverse();
        (current, path)
    }

    /// Number of nodes in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree holds only the document node
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}
