//! XPath evaluation
//!
//! Location paths over the child and descendant axes: `/`, `//`, `.`, `..`,
//! `*`, name tests, `[@attr]`, `[@attr='v']`, `[n]` predicates and `|`
//! unions. Results are element snapshots in document order.

use crate::{DomTree, NodeId, ParseError};

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Slash,
    DoubleSlash,
    Dot,
    DotDot,
    Star,
    At,
    LBracket,
    RBracket,
    Eq,
    Pipe,
    Name(String),
    Literal(String),
    Number(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Child,
    /// `//`: descendant-or-self, then the step
    Descendant,
}

#[derive(Debug, Clone)]
enum NodeTest {
    SelfNode,
    Parent,
    Any,
    Name(String),
}

#[derive(Debug, Clone)]
enum Predicate {
    HasAttribute(String),
    AttributeEquals(String, String),
    Position(usize),
}

#[derive(Debug, Clone)]
struct Step {
    axis: Axis,
    test: NodeTest,
    predicates: Vec<Predicate>,
}

impl Step {
    fn apply(&self, tree: &DomTree, origin: NodeId) -> Vec<NodeId> {
        let mut candidates: Vec<NodeId> = match &self.test {
            NodeTest::SelfNode => vec![origin],
            NodeTest::Parent => tree.parent(origin).into_iter().collect(),
            NodeTest::Any => tree
                .children(origin)
                .iter()
                .copied()
                .filter(|&c| tree.element(c).is_some())
                .collect(),
            NodeTest::Name(name) => tree
                .children(origin)
                .iter()
                .copied()
                .filter(|&c| tree.element(c).is_some_and(|e| e.tag.eq_ignore_ascii_case(name)))
                .collect(),
        };
        for predicate in &self.predicates {
            candidates = match predicate {
                Predicate::Position(n) => n
                    .checked_sub(1)
                    .and_then(|i| candidates.get(i).copied())
                    .into_iter()
                    .collect(),
                Predicate::HasAttribute(name) => candidates
                    .into_iter()
                    .filter(|&c| tree.element(c).is_some_and(|e| e.attrs.has_attribute(name)))
                    .collect(),
                Predicate::AttributeEquals(name, value) => candidates
                    .into_iter()
                    .filter(|&c| {
                        tree.element(c)
                            .is_some_and(|e| e.attrs.get_attribute(name) == Some(value.as_str()))
                    })
                    .collect(),
            };
        }
        candidates
    }
}

#[derive(Debug, Clone)]
struct LocationPath {
    absolute: bool,
    steps: Vec<Step>,
}

impl LocationPath {
    fn evaluate(&self, tree: &DomTree, context: NodeId) -> Vec<NodeId> {
        let start = if self.absolute { tree.top(context) } else { context };
        let mut current = vec![start];
        for step in &self.steps {
            let mut next = Vec::new();
            for &node in &current {
                match step.axis {
                    Axis::Child => next.extend(step.apply(tree, node)),
                    Axis::Descendant => {
                        next.extend(step.apply(tree, node));
                        for descendant in tree.descendants(node) {
                            next.extend(step.apply(tree, descendant));
                        }
                    }
                }
            }
            sort_unique(tree, &mut next);
            current = next;
        }
        current
    }
}

fn sort_unique(tree: &DomTree, nodes: &mut Vec<NodeId>) {
    nodes.sort_by(|&a, &b| tree.document_order(a, b));
    nodes.dedup();
}

/// Compiled path expression
#[derive(Debug, Clone)]
pub struct XPath {
    paths: Vec<LocationPath>,
}

impl XPath {
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let tokens = tokenize(input)?;
        if tokens.is_empty() {
            return Err(ParseError::Empty);
        }
        Parser { tokens, pos: 0 }.expr()
    }

    /// Matching elements in document order, without duplicates
    pub fn evaluate(&self, tree: &DomTree, context: NodeId) -> Vec<NodeId> {
        let mut out: Vec<NodeId> = self
            .paths
            .iter()
            .flat_map(|path| path.evaluate(tree, context))
            .filter(|&id| tree.element(id).is_some())
            .collect();
        sort_unique(tree, &mut out);
        out
    }
}

fn tokenize(input: &str) -> Result<Vec<Token>, ParseError> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();
    while let Some((offset, c)) = chars.next() {
        let token = match c {
            c if c.is_whitespace() => continue,
            '/' if chars.next_if(|&(_, n)| n == '/').is_some() => Token::DoubleSlash,
            '/' => Token::Slash,
            '.' if chars.next_if(|&(_, n)| n == '.').is_some() => Token::DotDot,
            '.' => Token::Dot,
            '*' => Token::Star,
            '@' => Token::At,
            '[' => Token::LBracket,
            ']' => Token::RBracket,
            '=' => Token::Eq,
            '|' => Token::Pipe,
            '\'' | '"' => {
                let mut literal = String::new();
                loop {
                    match chars.next() {
                        Some((_, q)) if q == c => break,
                        Some((_, ch)) => literal.push(ch),
                        None => return Err(ParseError::UnexpectedEnd),
                    }
                }
                Token::Literal(literal)
            }
            c if c.is_ascii_digit() => {
                let mut number = c.to_digit(10).unwrap_or_default() as usize;
                while let Some((_, d)) = chars.next_if(|&(_, d)| d.is_ascii_digit()) {
                    number = number
                        .saturating_mul(10)
                        .saturating_add(d.to_digit(10).unwrap_or_default() as usize);
                }
                Token::Number(number)
            }
            c if c.is_alphabetic() || c == '_' => {
                let mut name = String::from(c);
                while let Some((_, n)) =
                    chars.next_if(|&(_, n)| n.is_alphanumeric() || n == '-' || n == '_')
                {
                    name.push(n);
                }
                Token::Name(name)
            }
            other => return Err(ParseError::UnexpectedChar(other, offset)),
        };
        tokens.push(token);
    }
    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Result<Token, ParseError> {
        let token = self.tokens.get(self.pos).cloned().ok_or(ParseError::UnexpectedEnd)?;
        self.pos += 1;
        Ok(token)
    }

    fn expect(&mut self, expected: Token) -> Result<(), ParseError> {
        let token = self.next()?;
        if token == expected {
            Ok(())
        } else {
            Err(ParseError::UnexpectedToken(format!("{token:?}")))
        }
    }

    fn expr(mut self) -> Result<XPath, ParseError> {
        let mut paths = vec![self.path()?];
        while let Some(token) = self.peek() {
            match token {
                Token::Pipe => {
                    self.pos += 1;
                    paths.push(self.path()?);
                }
                other => return Err(ParseError::UnexpectedToken(format!("{other:?}"))),
            }
        }
        Ok(XPath { paths })
    }

    fn path(&mut self) -> Result<LocationPath, ParseError> {
        let (absolute, axis) = match self.peek() {
            Some(Token::Slash) => {
                self.pos += 1;
                // A lone `/` selects the document node
                if !self.at_step_start() {
                    return Ok(LocationPath {
                        absolute: true,
                        steps: Vec::new(),
                    });
                }
                (true, Axis::Child)
            }
            Some(Token::DoubleSlash) => {
                self.pos += 1;
                (true, Axis::Descendant)
            }
            _ => (false, Axis::Child),
        };
        let mut steps = vec![self.step(axis)?];
        loop {
            let axis = match self.peek() {
                Some(Token::Slash) => Axis::Child,
                Some(Token::DoubleSlash) => Axis::Descendant,
                _ => break,
            };
            self.pos += 1;
            steps.push(self.step(axis)?);
        }
        Ok(LocationPath { absolute, steps })
    }

    fn at_step_start(&self) -> bool {
        matches!(
            self.peek(),
            Some(Token::Dot | Token::DotDot | Token::Star | Token::Name(_))
        )
    }

    fn step(&mut self, axis: Axis) -> Result<Step, ParseError> {
        let test = match self.next()? {
            Token::Dot => NodeTest::SelfNode,
            Token::DotDot => NodeTest::Parent,
            Token::Star => NodeTest::Any,
            Token::Name(name) => NodeTest::Name(name),
            other => return Err(ParseError::UnexpectedToken(format!("{other:?}"))),
        };
        let mut predicates = Vec::new();
        while self.peek() == Some(&Token::LBracket) {
            self.pos += 1;
            predicates.push(self.predicate()?);
            self.expect(Token::RBracket)?;
        }
        Ok(Step {
            axis,
            test,
            predicates,
        })
    }

    fn predicate(&mut self) -> Result<Predicate, ParseError> {
        match self.next()? {
            Token::Number(n) => Ok(Predicate::Position(n)),
            Token::At => {
                let name = match self.next()? {
                    Token::Name(name) => name,
                    other => return Err(ParseError::UnexpectedToken(format!("{other:?}"))),
                };
                if self.peek() != Some(&Token::Eq) {
                    return Ok(Predicate::HasAttribute(name));
                }
                self.pos += 1;
                match self.next()? {
                    Token::Literal(value) => Ok(Predicate::AttributeEquals(name, value)),
                    other => Err(ParseError::UnexpectedToken(format!("{other:?}"))),
                }
            }
            other => Err(ParseError::UnexpectedToken(format!("{other:?}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // <html><body><div id=a><p/><p title=x/></div><div><p/></div></body></html>
    fn tree() -> (DomTree, [NodeId; 7]) {
        let mut tree = DomTree::new();
        let html = tree.create_element("html");
        let body = tree.create_element("body");
        let div1 = tree.create_element("div");
        let p1 = tree.create_element("p");
        let p2 = tree.create_element("p");
        let div2 = tree.create_element("div");
        let p3 = tree.create_element("p");
        tree.append_child(NodeId::ROOT, html);
        tree.append_child(html, body);
        tree.append_child(body, div1);
        tree.append_child(div1, p1);
        tree.append_child(div1, p2);
        tree.append_child(body, div2);
        tree.append_child(div2, p3);
        tree.element_mut(div1)
            .unwrap()
            .attrs
            .set_attribute("id", "a")
            .unwrap();
        tree.element_mut(p2)
            .unwrap()
            .attrs
            .set_attribute("title", "x")
            .unwrap();
        (tree, [html, body, div1, p1, p2, div2, p3])
    }

    fn eval(tree: &DomTree, context: NodeId, expr: &str) -> Vec<NodeId> {
        XPath::parse(expr).unwrap().evaluate(tree, context)
    }

    #[test]
    fn test_relative_child() {
        let (tree, [_, body, div1, _, _, div2, _]) = tree();
        assert_eq!(eval(&tree, body, "div"), vec![div1, div2]);
        assert_eq!(eval(&tree, body, "*"), vec![div1, div2]);
        assert!(eval(&tree, body, "p").is_empty());
    }

    #[test]
    fn test_descendant() {
        let (tree, [_, body, _, p1, p2, _, p3]) = tree();
        assert_eq!(eval(&tree, body, ".//p"), vec![p1, p2, p3]);
        assert_eq!(eval(&tree, body, "//p"), vec![p1, p2, p3]);
    }

    #[test]
    fn test_absolute() {
        let (tree, [html, body, _, _, _, _, p3]) = tree();
        assert_eq!(eval(&tree, p3, "/html"), vec![html]);
        assert_eq!(eval(&tree, p3, "/html/body"), vec![body]);
        assert!(eval(&tree, p3, "/").is_empty());
    }

    #[test]
    fn test_self_and_parent() {
        let (tree, [_, body, div1, p1, _, _, _]) = tree();
        assert_eq!(eval(&tree, p1, "."), vec![p1]);
        assert_eq!(eval(&tree, p1, ".."), vec![div1]);
        assert_eq!(eval(&tree, p1, "../.."), vec![body]);
    }

    #[test]
    fn test_predicates() {
        let (tree, [_, body, div1, p1, p2, div2, p3]) = tree();
        assert_eq!(eval(&tree, body, "div[@id]"), vec![div1]);
        assert_eq!(eval(&tree, body, "div[@id='a']"), vec![div1]);
        assert!(eval(&tree, body, "div[@id=\"b\"]").is_empty());
        assert_eq!(eval(&tree, body, "div[2]"), vec![div2]);
        assert!(eval(&tree, body, "div[0]").is_empty());
        // Position is per parent
        assert_eq!(eval(&tree, body, "//p[1]"), vec![p1, p3]);
        assert_eq!(eval(&tree, body, "//p[@title]"), vec![p2]);
    }

    #[test]
    fn test_union_document_order() {
        let (tree, [_, body, div1, p1, p2, div2, p3]) = tree();
        assert_eq!(
            eval(&tree, body, "//p | //div"),
            vec![div1, p1, p2, div2, p3]
        );
        assert_eq!(eval(&tree, body, "div | div"), vec![div1, div2]);
    }

    #[test]
    fn test_parse_errors() {
        for bad in [
            "", "//[", "div[", "div[@]", "div[@id=a]", ".foo", "#a", "div > p", "div p", "a |",
            "'open", "count(//p)", "child::p", "[x]",
        ] {
            assert!(XPath::parse(bad).is_err(), "{bad:?} should fail");
        }
    }
}
