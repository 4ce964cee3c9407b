//! Selector matching
//!
//! Selector lists with descendant and child combinators over compound
//! selectors of type, universal, id, class and attribute parts.

use crate::{DomTree, ElementData, NodeId, ParseError};

/// Simple selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleSelector {
    Tag(String),
    Class(String),
    Id(String),
    Universal,
    Attribute { name: String, value: Option<String> },
}

impl SimpleSelector {
    fn matches(&self, element: &ElementData) -> bool {
        match self {
            Self::Universal => true,
            Self::Tag(tag) => element.tag.eq_ignore_ascii_case(tag),
            Self::Id(id) => element.attrs.get_attribute("id") == Some(id.as_str()),
            Self::Class(class) => element.classes().any(|c| c == class),
            Self::Attribute { name, value } => match (element.attrs.get_attribute(name), value) {
                (Some(_), None) => true,
                (Some(actual), Some(expected)) => actual == expected,
                (None, _) => false,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
    Descendant,
    Child,
}

/// Compound selectors joined by combinators, left to right
#[derive(Debug, Clone)]
struct ComplexSelector {
    compounds: Vec<Vec<SimpleSelector>>,
    /// `combinators[i]` joins `compounds[i]` and `compounds[i + 1]`
    combinators: Vec<Combinator>,
}

impl ComplexSelector {
    fn matches(&self, tree: &DomTree, id: NodeId) -> bool {
        self.matches_at(tree, id, self.compounds.len() - 1)
    }

    fn matches_at(&self, tree: &DomTree, id: NodeId, index: usize) -> bool {
        let Some(element) = tree.element(id) else {
            return false;
        };
        if !self.compounds[index].iter().all(|s| s.matches(element)) {
            return false;
        }
        if index == 0 {
            return true;
        }
        match self.combinators[index - 1] {
            Combinator::Child => tree
                .parent_element(id)
                .is_some_and(|parent| self.matches_at(tree, parent, index - 1)),
            Combinator::Descendant => {
                let mut current = tree.parent_element(id);
                while let Some(ancestor) = current {
                    if self.matches_at(tree, ancestor, index - 1) {
                        return true;
                    }
                    current = tree.parent_element(ancestor);
                }
                false
            }
        }
    }
}

/// Parsed selector list (`a, b > c`)
#[derive(Debug, Clone)]
pub struct SelectorList {
    selectors: Vec<ComplexSelector>,
}

impl SelectorList {
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let mut selectors = Vec::new();
        for part in input.split(',') {
            selectors.push(Parser::new(part).complex()?);
        }
        Ok(Self { selectors })
    }

    /// Check if an element matches any selector in the list
    pub fn matches(&self, tree: &DomTree, id: NodeId) -> bool {
        self.selectors.iter().any(|s| s.matches(tree, id))
    }

    /// Matching descendants of `scope` in document order.
    ///
    /// Ancestors outside the scope still count for combinators.
    pub fn query_all(&self, tree: &DomTree, scope: NodeId) -> Vec<NodeId> {
        tree.descendants(scope)
            .into_iter()
            .filter(|&id| self.matches(tree, id))
            .collect()
    }
}

struct Parser<'a> {
    chars: Vec<(usize, char)>,
    pos: usize,
    source: &'a str,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            chars: source.char_indices().collect(),
            pos: 0,
            source,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).map(|&(_, c)| c)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek();
        self.pos += 1;
        c
    }

    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
        self.pos > start
    }

    fn unexpected(&self) -> ParseError {
        match self.chars.get(self.pos) {
            Some(&(offset, c)) => ParseError::UnexpectedChar(c, offset),
            None => ParseError::UnexpectedEnd,
        }
    }

    fn complex(&mut self) -> Result<ComplexSelector, ParseError> {
        self.skip_whitespace();
        if self.peek().is_none() {
            return Err(if self.source.trim().is_empty() {
                ParseError::Empty
            } else {
                ParseError::UnexpectedEnd
            });
        }
        let mut compounds = vec![self.compound()?];
        let mut combinators = Vec::new();
        loop {
            let had_space = self.skip_whitespace();
            let combinator = match self.peek() {
                None => break,
                Some('>') => {
                    self.bump();
                    self.skip_whitespace();
                    Combinator::Child
                }
                Some(_) if had_space => Combinator::Descendant,
                Some(_) => return Err(self.unexpected()),
            };
            combinators.push(combinator);
            compounds.push(self.compound()?);
        }
        Ok(ComplexSelector {
            compounds,
            combinators,
        })
    }

    fn compound(&mut self) -> Result<Vec<SimpleSelector>, ParseError> {
        let mut parts = Vec::new();
        match self.peek() {
            Some('*') => {
                self.bump();
                parts.push(SimpleSelector::Universal);
            }
            Some(c) if is_ident_start(c) => {
                parts.push(SimpleSelector::Tag(self.ident()?.to_ascii_lowercase()));
            }
            _ => {}
        }
        loop {
            match self.peek() {
                Some('#') => {
                    self.bump();
                    parts.push(SimpleSelector::Id(self.ident()?));
                }
                Some('.') => {
                    self.bump();
                    parts.push(SimpleSelector::Class(self.ident()?));
                }
                Some('[') => {
                    self.bump();
                    parts.push(self.attribute()?);
                }
                _ => break,
            }
        }
        if parts.is_empty() {
            return Err(self.unexpected());
        }
        Ok(parts)
    }

    fn attribute(&mut self) -> Result<SimpleSelector, ParseError> {
        self.skip_whitespace();
        let name = self.ident()?;
        self.skip_whitespace();
        let value = match self.bump() {
            Some(']') => return Ok(SimpleSelector::Attribute { name, value: None }),
            Some('=') => {
                self.skip_whitespace();
                let value = match self.peek() {
                    Some(quote @ ('"' | '\'')) => {
                        self.bump();
                        self.quoted(quote)?
                    }
                    _ => self.ident()?,
                };
                self.skip_whitespace();
                value
            }
            _ => {
                self.pos -= 1;
                return Err(self.unexpected());
            }
        };
        match self.bump() {
            Some(']') => Ok(SimpleSelector::Attribute {
                name,
                value: Some(value),
            }),
            _ => {
                self.pos -= 1;
                Err(self.unexpected())
            }
        }
    }

    fn quoted(&mut self, quote: char) -> Result<String, ParseError> {
        let mut value = String::new();
        loop {
            match self.bump() {
                Some(c) if c == quote => return Ok(value),
                Some(c) => value.push(c),
                None => return Err(ParseError::UnexpectedEnd),
            }
        }
    }

    fn ident(&mut self) -> Result<String, ParseError> {
        let mut ident = String::new();
        while let Some(c) = self.peek() {
            if !(is_ident_start(c) || c.is_ascii_digit() || c == '-') {
                break;
            }
            ident.push(c);
            self.pos += 1;
        }
        if ident.is_empty() {
            return Err(self.unexpected());
        }
        Ok(ident)
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '-' || !c.is_ascii()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> (DomTree, [NodeId; 5]) {
        // <body><div id=main class="a b"><p class=a></p><span title=x></span></div><p></p></body>
        let mut tree = DomTree::new();
        let body = tree.create_element("body");
        let div = tree.create_element("div");
        let p1 = tree.create_element("p");
        let span = tree.create_element("span");
        let p2 = tree.create_element("p");
        tree.append_child(NodeId::ROOT, body);
        tree.append_child(body, div);
        tree.append_child(div, p1);
        tree.append_child(div, span);
        tree.append_child(body, p2);
        let set = |tree: &mut DomTree, id, name: &str, value: &str| {
            tree.element_mut(id)
                .unwrap()
                .attrs
                .set_attribute(name, value)
                .unwrap();
        };
        set(&mut tree, div, "id", "main");
        set(&mut tree, div, "class", "a b");
        set(&mut tree, p1, "class", "a");
        set(&mut tree, span, "title", "x");
        (tree, [body, div, p1, span, p2])
    }

    fn query(tree: &DomTree, scope: NodeId, selector: &str) -> Vec<NodeId> {
        SelectorList::parse(selector).unwrap().query_all(tree, scope)
    }

    #[test]
    fn test_simple_selectors() {
        let (tree, [body, div, p1, span, p2]) = tree();
        assert_eq!(query(&tree, body, "p"), vec![p1, p2]);
        assert_eq!(query(&tree, body, "#main"), vec![div]);
        assert_eq!(query(&tree, body, ".a"), vec![div, p1]);
        assert_eq!(query(&tree, body, "*"), vec![div, p1, span, p2]);
        assert_eq!(query(&tree, body, "[title]"), vec![span]);
        assert_eq!(query(&tree, body, "[title='x']"), vec![span]);
        assert!(query(&tree, body, "[title=y]").is_empty());
    }

    #[test]
    fn test_compound_and_combinators() {
        let (tree, [body, div, p1, span, _]) = tree();
        assert_eq!(query(&tree, body, "div.a.b"), vec![div]);
        assert_eq!(query(&tree, body, "div p"), vec![p1]);
        assert_eq!(query(&tree, body, "body > p"), query(&tree, body, "body>p"));
        assert_eq!(query(&tree, body, "#main > *"), vec![p1, span]);
        assert_eq!(query(&tree, body, "span, p.a"), vec![p1, span]);
    }

    #[test]
    fn test_scope_excludes_self_but_sees_ancestors() {
        let (tree, [_, div, p1, _, _]) = tree();
        assert!(query(&tree, div, "div").is_empty());
        assert_eq!(query(&tree, div, "body p"), vec![p1]);
    }

    #[test]
    fn test_case_insensitive_tags() {
        let (tree, [body, div, ..]) = tree();
        assert_eq!(query(&tree, body, "DIV"), vec![div]);
    }

    #[test]
    fn test_parse_errors() {
        for bad in ["", "   ", "//div", "div >", "div,", "[x", "[x=]", ".", "#", "a!b", ">>>"] {
            assert!(SelectorList::parse(bad).is_err(), "{bad:?} should fail");
        }
    }
}
