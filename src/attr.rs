//! Attribute lists for rendered HTML elements
//!
//! A plain `Vec<(String, String)>`, rendered in insertion order.

/// Element attributes as simple key-value pairs, rendered in order.
pub type Attrs = Vec<(String, String)>;

/// Extension trait for building attribute lists
pub trait AttrsExt {
    /// Set an attribute value (insert or update in place)
    fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>);

    /// Set an attribute only when `value` is present
    fn set_opt_attr(&mut self, name: impl Into<String>, value: Option<impl Into<String>>) {
        if let Some(value) = value {
            self.set_attr(name, value);
        }
    }
}

impl AttrsExt for Attrs {
    fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(attr) = self.iter_mut().find(|(k, _)| k == &name) {
            attr.1 = value;
        } else {
            self.push((name, value));
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(name: &str, value: &str) -> (String, String) {
        (name.to_string(), value.to_string())
    }

    #[test]
    fn test_set_attr_updates_in_place() {
        let mut attrs: Attrs = Vec::new();
        attrs.set_attr("data-panel-type", "info");
        attrs.set_attr("class", "ak-ul");
        attrs.set_attr("data-panel-type", "note");
        assert_eq!(attrs, vec![pair("data-panel-type", "note"), pair("class", "ak-ul")]);
    }

    #[test]
    fn test_set_opt_attr() {
        let mut attrs: Attrs = Vec::new();
        attrs.set_opt_attr("title", None::<String>);
        attrs.set_opt_attr("href", Some("/x"));
        assert_eq!(attrs, vec![pair("href", "/x")]);
    }
}
