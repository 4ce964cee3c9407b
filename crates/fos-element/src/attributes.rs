//! Element Attributes
//!
//! Map-like live view over the native attribute list: get, set, delete,
//! has, keys, values, iteration and merge.

use crate::{Attribute, Element, NativeNode, Result};

/// Live attribute view.
///
/// Nothing is cached: every read goes to the native node and every write
/// is visible to the next read. Iteration follows native attribute order.
pub struct AttributeView<'a, N: NativeNode> {
    element: &'a Element<N>,
}

impl<'a, N: NativeNode> AttributeView<'a, N> {
    pub fn new(element: &'a Element<N>) -> Self {
        Self { element }
    }

    /// Attribute value, `None` when absent
    pub fn get(&self, name: &str) -> Option<String> {
        self.element.native().get_attribute(name)
    }

    /// Set an attribute, coercing the value to a string
    pub fn set(&self, name: &str, value: impl ToString) -> Result<()> {
        let value = value.to_string();
        tracing::trace!(name, value = %value, "set attribute");
        self.element.native().set_attribute(name, &value)
    }

    /// True when the attribute is present, whatever its value
    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Remove an attribute; absent attributes are ignored
    pub fn delete(&self, name: &str) -> Result<()> {
        tracing::trace!(name, "remove attribute");
        self.element.native().remove_attribute(name)
    }

    pub fn keys(&self) -> Vec<String> {
        self.nodes().into_iter().map(|a| a.name).collect()
    }

    /// Values aligned with [`keys`](Self::keys)
    pub fn values(&self) -> Vec<String> {
        self.nodes().into_iter().map(|a| a.value).collect()
    }

    /// Visit `(name, value)` pairs in native order
    pub fn each(&self, mut visitor: impl FnMut(&str, &str)) {
        for attr in self.nodes() {
            visitor(&attr.name, &attr.value);
        }
    }

    /// Lazy `(name, value)` pairs.
    ///
    /// Attributes are read on the first call to `next`, so every call to
    /// `iter` observes the current state.
    pub fn iter(&self) -> AttributeIter<'a, N> {
        AttributeIter {
            element: self.element,
            pending: None,
        }
    }

    /// Set every pair in iteration order.
    ///
    /// Later pairs overwrite earlier ones with the same name. Stops at the
    /// first rejected name.
    pub fn merge<I, K, V>(&self, pairs: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: ToString,
    {
        for (name, value) in pairs {
            self.set(name.as_ref(), value)?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.nodes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn nodes(&self) -> Vec<Attribute> {
        self.element.native().attributes()
    }
}

impl<N: NativeNode> Clone for AttributeView<'_, N> {
    fn clone(&self) -> Self {
        Self {
            element: self.element,
        }
    }
}

impl<'a, N: NativeNode> IntoIterator for AttributeView<'a, N> {
    type Item = (String, String);
    type IntoIter = AttributeIter<'a, N>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Lazy iterator over attribute pairs
pub struct AttributeIter<'a, N: NativeNode> {
    element: &'a Element<N>,
    pending: Option<std::vec::IntoIter<Attribute>>,
}

impl<N: NativeNode> Iterator for AttributeIter<'_, N> {
    type Item = (String, String);

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.element;
        let pending = self
            .pending
            .get_or_insert_with(|| element.native().attributes().into_iter());
        pending.next().map(|attr| (attr.name, attr.value))
    }
}
