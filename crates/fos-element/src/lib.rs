//! fOS Element - Element facade
//!
//! Ergonomic wrapper over a single native DOM element: attribute access,
//! class management, inline style and combined CSS/XPath search.
//!
//! The facade never owns a DOM. Hosts plug in through the [`NativeNode`]
//! and [`NativeDocument`] traits and every call passes straight through to
//! them.
//!
//! # Example
//! ```rust,ignore
//! use fos_element::{Element, StyleInput};
//!
//! let el = Element::new(native_node);
//! el.set_attribute("id", "main")?;
//! el.add_class("card")?.add_class("active")?;
//! el.style("color: red")?;
//!
//! let links = el.search(["a", ".//a[@href]"]);
//! let first = el.at_css([".missing", "a"]);
//! ```

mod attributes;
mod classlist;
mod document;
mod element;
mod error;
mod native;
mod node_set;
mod search;
mod style;

#[cfg(test)]
mod mock;

pub use attributes::{AttributeIter, AttributeView};
pub use classlist::ClassNames;
pub use document::Document;
pub use element::{Element, Position, Size};
pub use error::{DomError, Result};
pub use native::{
    Attribute, ClientRect, IdentityKey, NativeDocument, NativeNode, XPathEvaluator,
};
pub use node_set::NodeSet;
pub use search::{SearchEngine, SearchOptions, SearchOrder};
pub use style::{StyleDeclaration, StyleFacade, StyleInput, Styled};
