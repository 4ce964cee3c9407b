//! Inline style declarations
//!
//! The `style` attribute is the single source of truth; property access
//! parses it and writes it back serialized.

use fos_element::DomError;

/// Parse `prop: value; ...` into ordered pairs.
///
/// Property names are lowercased. Malformed declarations are dropped and a
/// repeated property keeps its first position with the last value.
pub fn parse_declarations(text: &str) -> Vec<(String, String)> {
    let mut out: Vec<(String, String)> = Vec::new();
    for decl in text.split(';') {
        let Some((property, value)) = decl.split_once(':') else {
            continue;
        };
        let property = property.trim().to_ascii_lowercase();
        let value = value.trim();
        if !is_valid_property(&property) || value.is_empty() {
            continue;
        }
        match out.iter_mut().find(|(p, _)| *p == property) {
            Some(existing) => existing.1 = value.to_string(),
            None => out.push((property, value.to_string())),
        }
    }
    out
}

/// Serialize pairs as `prop: value;` separated by single spaces
pub fn serialize_declarations(declarations: &[(String, String)]) -> String {
    declarations
        .iter()
        .map(|(property, value)| format!("{property}: {value};"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Set one property in serialized style text. An empty value removes it.
pub(crate) fn set_property(text: &str, property: &str, value: &str) -> Result<String, DomError> {
    let property = property.trim().to_ascii_lowercase();
    if !is_valid_property(&property) {
        return Err(DomError::InvalidStyleAssignment(format!(
            "invalid property name {property:?}"
        )));
    }
    let value = value.trim();
    if value.contains(';') {
        return Err(DomError::InvalidStyleAssignment(format!(
            "invalid value {value:?} for {property}"
        )));
    }
    let mut declarations = parse_declarations(text);
    if value.is_empty() {
        declarations.retain(|(p, _)| *p != property);
    } else {
        match declarations.iter_mut().find(|(p, _)| *p == property) {
            Some(existing) => existing.1 = value.to_string(),
            None => declarations.push((property, value.to_string())),
        }
    }
    Ok(serialize_declarations(&declarations))
}

fn is_valid_property(property: &str) -> bool {
    !property.is_empty()
        && property
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let decls = parse_declarations("color:red;  Margin : 0 auto ;");
        assert_eq!(
            decls,
            vec![
                ("color".to_string(), "red".to_string()),
                ("margin".to_string(), "0 auto".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_skips_garbage() {
        let decls = parse_declarations("nonsense; :red; color:; width: 5px");
        assert_eq!(decls, vec![("width".to_string(), "5px".to_string())]);
        assert!(parse_declarations("").is_empty());
    }

    #[test]
    fn test_parse_repeated_property() {
        let decls = parse_declarations("color: red; top: 0; color: blue");
        assert_eq!(decls[0], ("color".to_string(), "blue".to_string()));
        assert_eq!(decls.len(), 2);
    }

    #[test]
    fn test_serialize() {
        let decls = parse_declarations("color:red;margin:0");
        assert_eq!(serialize_declarations(&decls), "color: red; margin: 0;");
    }

    #[test]
    fn test_set_property() {
        let text = set_property("color: red;", "margin", "0").unwrap();
        assert_eq!(text, "color: red; margin: 0;");

        let text = set_property(&text, "color", "blue").unwrap();
        assert_eq!(text, "color: blue; margin: 0;");

        let text = set_property(&text, "color", "").unwrap();
        assert_eq!(text, "margin: 0;");
    }

    #[test]
    fn test_set_property_rejects() {
        assert!(matches!(
            set_property("", "", "red"),
            Err(DomError::InvalidStyleAssignment(_))
        ));
        assert!(matches!(
            set_property("", "co lor", "red"),
            Err(DomError::InvalidStyleAssignment(_))
        ));
        assert!(matches!(
            set_property("", "color", "red; top: 0"),
            Err(DomError::InvalidStyleAssignment(_))
        ));
    }
}
