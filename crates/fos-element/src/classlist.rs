//! Class names
//!
//! Ordered-unique view over the whitespace-separated `class` attribute.

use crate::{Element, NativeNode, Result};

/// Class list of an element.
///
/// Each mutation is its own read-modify-write cycle against the native
/// class string. Writes serialize unique names in first-seen order. Both
/// `add` and `remove` return the element for chaining.
pub struct ClassNames<'a, N: NativeNode> {
    element: &'a Element<N>,
}

impl<'a, N: NativeNode> ClassNames<'a, N> {
    pub fn new(element: &'a Element<N>) -> Self {
        Self { element }
    }

    /// Current class names; empty or missing attribute gives `[]`
    pub fn list(&self) -> Vec<String> {
        split(&self.element.native().class_name())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.list().iter().any(|c| c == name)
    }

    /// Append `name` if absent.
    ///
    /// A name containing whitespace adds each of its tokens.
    pub fn add(&self, name: &str) -> Result<&'a Element<N>> {
        let mut names = self.list();
        names.extend(split(name));
        self.write(names)
    }

    /// Drop `name`. Removing an absent name leaves the attribute untouched.
    pub fn remove(&self, name: &str) -> Result<&'a Element<N>> {
        let removed = split(name);
        let mut names = self.list();
        let before = names.len();
        names.retain(|c| !removed.contains(c));
        if names.len() == before {
            return Ok(self.element);
        }
        self.write(names)
    }

    fn write(&self, names: Vec<String>) -> Result<&'a Element<N>> {
        let value = unique(names).join(" ");
        let native = self.element.native();
        // Skip no-op writes so a missing attribute is not created empty
        if native.class_name() != value {
            tracing::trace!(class = %value, "write class names");
            native.set_class_name(&value)?;
        }
        Ok(self.element)
    }
}

fn split(value: &str) -> Vec<String> {
    value.split_whitespace().map(str::to_string).collect()
}

fn unique(names: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        if !out.contains(&name) {
            out.push(name);
        }
    }
    out
}
