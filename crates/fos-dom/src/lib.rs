//! fOS DOM - In-memory DOM host
//!
//! Arena-backed element tree implementing the native adapter traits of
//! `fos-element`: attributes, inline style, selector and XPath queries and
//! client geometry.

mod attributes;
mod document;
mod node;
mod selector;
mod style;
mod tree;
mod xpath;

pub use attributes::{NamedNodeMap, is_valid_attribute_name, is_valid_tag_name};
pub use document::{Document, NodeRef};
pub use node::{ElementData, Node, NodeData};
pub use selector::SelectorList;
pub use style::{parse_declarations, serialize_declarations};
pub use tree::DomTree;
pub use xpath::XPath;

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Document node ID
    pub const ROOT: NodeId = NodeId(0);

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Selector and path parse errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Empty expression")]
    Empty,
    #[error("Unexpected character {0:?} at {1}")]
    UnexpectedChar(char, usize),
    #[error("Unexpected token {0}")]
    UnexpectedToken(String),
    #[error("Unexpected end of expression")]
    UnexpectedEnd,
}
