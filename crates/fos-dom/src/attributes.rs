//! Element Attributes
//!
//! Ordered attribute storage and name validation.

use std::collections::HashMap;

use fos_element::{Attribute, DomError};

/// Named node map (attribute collection)
#[derive(Debug, Clone, Default)]
pub struct NamedNodeMap {
    attributes: Vec<Attribute>,
    by_name: HashMap<String, usize>,
}

impl NamedNodeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get number of attributes
    pub fn length(&self) -> usize {
        self.attributes.len()
    }

    /// Get attribute value
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.by_name
            .get(name)
            .and_then(|&i| self.attributes.get(i))
            .map(|a| a.value.as_str())
    }

    /// Set attribute by name/value.
    ///
    /// Existing attributes keep their position; new ones are appended.
    pub fn set_attribute(&mut self, name: &str, value: &str) -> Result<(), DomError> {
        if !is_valid_attribute_name(name) {
            return Err(DomError::InvalidAttributeName(name.to_string()));
        }
        if let Some(&index) = self.by_name.get(name) {
            self.attributes[index].value = value.to_string();
        } else {
            self.by_name.insert(name.to_string(), self.attributes.len());
            self.attributes.push(Attribute::new(name, value));
        }
        Ok(())
    }

    /// Remove attribute by name
    pub fn remove_attribute(&mut self, name: &str) -> Option<Attribute> {
        let index = self.by_name.remove(name)?;
        // Update indices for items after removed
        for idx in self.by_name.values_mut() {
            if *idx > index {
                *idx -= 1;
            }
        }
        Some(self.attributes.remove(index))
    }

    /// Check if attribute exists
    pub fn has_attribute(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Iterate over attributes
    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.iter()
    }
}

/// Attribute names: non-empty, no whitespace, quotes, `>`, `/`, `=` or
/// control characters, and not starting with a digit, `-` or `.`.
pub fn is_valid_attribute_name(name: &str) -> bool {
    match name.chars().next() {
        None => return false,
        Some(c) if c.is_ascii_digit() || c == '-' || c == '.' => return false,
        Some(_) => {}
    }
    !name.chars().any(|c| {
        c.is_whitespace() || c.is_control() || matches!(c, '"' | '\'' | '<' | '>' | '/' | '=')
    })
}

/// Tag names: ASCII letter followed by ASCII alphanumerics or `-`
pub fn is_valid_tag_name(tag: &str) -> bool {
    let mut chars = tag.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-')
}
