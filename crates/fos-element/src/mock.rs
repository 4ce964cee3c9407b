//! Scripted host for unit tests
//!
//! Attributes and style are stored for real; query results are scripted per
//! selector/path string. Unscripted queries fail like a host rejecting the
//! expression.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::{
    Attribute, ClientRect, DomError, IdentityKey, NativeDocument, NativeNode, Result, XPathEvaluator,
};

static NEXT_KEY: AtomicU32 = AtomicU32::new(1);

type Script = RefCell<HashMap<String, Vec<MockNode>>>;

#[derive(Default)]
struct DocumentState {
    xpath: Script,
}

#[derive(Clone, Default)]
pub struct MockDocument(Rc<DocumentState>);

impl MockDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&self, tag: &str) -> MockNode {
        MockNode::create(tag, Some(self.clone()), true)
    }

    /// Node without an identity key; node sets compare it pairwise
    pub fn keyless_node(&self, tag: &str) -> MockNode {
        MockNode::create(tag, Some(self.clone()), false)
    }

    pub fn detached_node(tag: &str) -> MockNode {
        MockNode::create(tag, None, true)
    }

    pub fn on_xpath(&self, path: &str, nodes: Vec<MockNode>) {
        self.0.xpath.borrow_mut().insert(path.to_string(), nodes);
    }
}

impl XPathEvaluator<MockNode> for MockDocument {
    fn evaluate(&self, expression: &str, _context: &MockNode) -> Result<Vec<MockNode>> {
        lookup(&self.0.xpath, expression)
    }
}

impl NativeDocument for MockDocument {
    type Node = MockNode;

    fn create_element(&self, tag: &str) -> Result<MockNode> {
        if tag.is_empty() {
            return Err(DomError::InvalidTagName(tag.to_string()));
        }
        Ok(self.node(tag))
    }
}

struct NodeState {
    key: u32,
    keyed: bool,
    tag: String,
    document: Option<MockDocument>,
    attrs: RefCell<Vec<Attribute>>,
    rect: Cell<ClientRect>,
    css: Script,
    xpath: Script,
    css_calls: RefCell<Vec<String>>,
}

#[derive(Clone)]
pub struct MockNode(Rc<NodeState>);

impl MockNode {
    fn create(tag: &str, document: Option<MockDocument>, keyed: bool) -> Self {
        Self(Rc::new(NodeState {
            key: NEXT_KEY.fetch_add(1, Ordering::Relaxed),
            keyed,
            tag: tag.to_string(),
            document,
            attrs: RefCell::default(),
            rect: Cell::default(),
            css: Script::default(),
            xpath: Script::default(),
            css_calls: RefCell::default(),
        }))
    }

    pub fn key(&self) -> u32 {
        self.0.key
    }

    pub fn set_rect(&self, rect: ClientRect) {
        self.0.rect.set(rect);
    }

    pub fn on_css(&self, selector: &str, nodes: Vec<MockNode>) {
        self.0.css.borrow_mut().insert(selector.to_string(), nodes);
    }

    pub fn on_node_xpath(&self, path: &str, nodes: Vec<MockNode>) {
        self.0.xpath.borrow_mut().insert(path.to_string(), nodes);
    }

    pub fn css_calls(&self) -> Vec<String> {
        self.0.css_calls.borrow().clone()
    }

    fn declarations(&self) -> Vec<(String, String)> {
        self.get_attribute("style")
            .unwrap_or_default()
            .split(';')
            .filter_map(|decl| decl.split_once(':'))
            .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
            .filter(|(k, _)| !k.is_empty())
            .collect()
    }
}

fn lookup(script: &Script, query: &str) -> Result<Vec<MockNode>> {
    script
        .borrow()
        .get(query)
        .cloned()
        .ok_or_else(|| DomError::query(query, "not scripted"))
}

impl XPathEvaluator<MockNode> for MockNode {
    fn evaluate(&self, expression: &str, _context: &MockNode) -> Result<Vec<MockNode>> {
        lookup(&self.0.xpath, expression)
    }
}

impl NativeNode for MockNode {
    type Document = MockDocument;

    fn is_same_node(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    fn identity_key(&self) -> Option<IdentityKey> {
        self.0.keyed.then_some((0, u64::from(self.0.key)))
    }

    fn owner_document(&self) -> Option<MockDocument> {
        self.0.document.clone()
    }

    fn tag_name(&self) -> String {
        self.0.tag.clone()
    }

    fn get_attribute(&self, name: &str) -> Option<String> {
        self.0
            .attrs
            .borrow()
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.clone())
    }

    fn set_attribute(&self, name: &str, value: &str) -> Result<()> {
        if name.is_empty() || name.contains(char::is_whitespace) {
            return Err(DomError::InvalidAttributeName(name.to_string()));
        }
        let mut attrs = self.0.attrs.borrow_mut();
        match attrs.iter_mut().find(|a| a.name == name) {
            Some(attr) => attr.value = value.to_string(),
            None => attrs.push(Attribute::new(name, value)),
        }
        Ok(())
    }

    fn remove_attribute(&self, name: &str) -> Result<()> {
        self.0.attrs.borrow_mut().retain(|a| a.name != name);
        Ok(())
    }

    fn attributes(&self) -> Vec<Attribute> {
        self.0.attrs.borrow().clone()
    }

    fn style_property(&self, property: &str) -> Option<String> {
        self.declarations()
            .into_iter()
            .find(|(k, _)| k == property)
            .map(|(_, v)| v)
    }

    fn set_style_property(&self, property: &str, value: &str) -> Result<()> {
        if property.is_empty() {
            return Err(DomError::InvalidStyleAssignment(
                "empty property name".to_string(),
            ));
        }
        let mut decls = self.declarations();
        match decls.iter_mut().find(|(k, _)| k == property) {
            Some(decl) => decl.1 = value.to_string(),
            None => decls.push((property.to_string(), value.to_string())),
        }
        let text: Vec<String> = decls.iter().map(|(k, v)| format!("{k}: {v};")).collect();
        self.set_attribute("style", &text.join(" "))
    }

    fn style_text(&self) -> String {
        self.get_attribute("style").unwrap_or_default()
    }

    fn set_style_text(&self, text: &str) -> Result<()> {
        self.set_attribute("style", text)
    }

    fn style_declarations(&self) -> Vec<(String, String)> {
        self.declarations()
    }

    fn query_selector_all(&self, selector: &str) -> Result<Vec<MockNode>> {
        self.0.css_calls.borrow_mut().push(selector.to_string());
        lookup(&self.0.css, selector)
    }

    fn client_rect(&self) -> ClientRect {
        self.0.rect.get()
    }
}
