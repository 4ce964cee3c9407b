//! Element search
//!
//! CSS selector and XPath resolution against an element, on their own and
//! merged into one node set.
//!
//! Queries are exploratory: a selector or path the host cannot evaluate
//! yields an empty set instead of an error.

use crate::{DomError, Element, NativeNode, NodeSet, XPathEvaluator};

/// Which mechanism's matches come first in a merged search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchOrder {
    /// CSS matches, then XPath-only matches
    #[default]
    CssFirst,
    /// XPath matches, then CSS-only matches
    XPathFirst,
}

/// Options for [`SearchEngine::search_with`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchOptions {
    pub order: SearchOrder,
}

impl SearchOptions {
    pub fn with_order(order: SearchOrder) -> Self {
        Self { order }
    }
}

/// Query resolution scoped to one element
pub struct SearchEngine<'a, N: NativeNode> {
    element: &'a Element<N>,
}

impl<'a, N: NativeNode> SearchEngine<'a, N> {
    pub fn new(element: &'a Element<N>) -> Self {
        Self { element }
    }

    /// Subtree selector match in document order
    pub fn css(&self, selector: &str) -> NodeSet<N> {
        let result = self.element.native().query_selector_all(selector);
        self.collect(selector, result)
    }

    /// XPath evaluated with the element as context node.
    ///
    /// Goes through the owner document when there is one, otherwise
    /// through the node itself.
    pub fn xpath(&self, path: &str) -> NodeSet<N> {
        let native = self.element.native();
        let result = match native.owner_document() {
            Some(document) => document.evaluate(path, native),
            None => native.evaluate(path, native),
        };
        self.collect(path, result)
    }

    /// Union of CSS and XPath matches for every selector, CSS first
    pub fn search<I>(&self, selectors: I) -> NodeSet<N>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.search_with(&SearchOptions::default(), selectors)
    }

    /// Union of CSS and XPath matches for every selector.
    ///
    /// Every string goes through both mechanisms. Results keep selector
    /// order, then mechanism order, then document order; a node matched
    /// twice stays at its first position.
    pub fn search_with<I>(&self, options: &SearchOptions, selectors: I) -> NodeSet<N>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut set = NodeSet::empty(self.element.document());
        for selector in selectors {
            let selector = selector.as_ref();
            let (first, second) = match options.order {
                SearchOrder::CssFirst => (self.css(selector), self.xpath(selector)),
                SearchOrder::XPathFirst => (self.xpath(selector), self.css(selector)),
            };
            set.extend(first);
            set.extend(second);
        }
        tracing::trace!(matches = set.len(), "search resolved");
        set
    }

    /// First XPath match
    pub fn at(&self, path: &str) -> Option<Element<N>> {
        self.xpath(path).into_iter().next()
    }

    /// First match of the first rule that matches anything
    pub fn at_css<I>(&self, rules: I) -> Option<Element<N>>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        rules
            .into_iter()
            .find_map(|rule| self.css(rule.as_ref()).into_iter().next())
    }

    /// First match of the first path that matches anything
    pub fn at_xpath<I>(&self, paths: I) -> Option<Element<N>>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        paths
            .into_iter()
            .find_map(|path| self.xpath(path.as_ref()).into_iter().next())
    }

    /// XPath over several paths, flattened without duplicates
    pub fn xpath_all<I>(&self, paths: I) -> NodeSet<N>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut set = NodeSet::empty(self.element.document());
        for path in paths {
            set.extend(self.xpath(path.as_ref()));
        }
        set
    }

    fn collect(&self, query: &str, result: Result<Vec<N>, DomError>) -> NodeSet<N> {
        let document = self.element.document();
        match result {
            Ok(nodes) => NodeSet::new(document, nodes),
            Err(err) => {
                tracing::debug!(query, error = %err, "query failed, returning empty set");
                NodeSet::empty(document)
            }
        }
    }
}
