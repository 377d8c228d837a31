use std::collections::BTreeMap;

use crate::field::FormField;

/// Attributes mirrored from the original field onto the editable surface,
/// copied only when declared on the source
pub const COPY_ATTRIBUTES: &[&str] = &[
    "placeholder",
    "pattern",
    "spellcheck",
    "autocomplete",
    "autocapitalize",
    "autofocus",
    "accesskey",
    "accept",
    "lang",
    "minlength",
    "maxlength",
    "required",
];

/// The visible editable field that sits after the hidden form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSurface {
    id: String,
    input_type: String,
    attributes: BTreeMap<String, String>,
}

impl InputSurface {
    /// Describe the surface for `field`, owned by the control identified by `control_id`
    pub fn mirror(field: &FormField, control_id: &str) -> Self {
        let attributes = COPY_ATTRIBUTES
            .iter()
            .filter_map(|name| {
                field
                    .attribute(name)
                    .map(|value| (name.to_string(), value.to_string()))
            })
            .collect();

        Self {
            id: format!("{}-editable", control_id),
            input_type: field.input_type().to_string(),
            attributes,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn input_type(&self) -> &str {
        &self.input_type
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(|s| s.as_str())
    }

    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    pub fn placeholder(&self) -> Option<&str> {
        self.attribute("placeholder").filter(|p| !p.is_empty())
    }

    /// Maximum draft length in characters; unparsable values are ignored
    pub fn max_length(&self) -> Option<usize> {
        self.attribute("maxlength")
            .and_then(|v| v.trim().parse::<usize>().ok())
    }

    pub fn autofocus(&self) -> bool {
        flag(self.attribute("autofocus"))
    }

    pub fn required(&self) -> bool {
        flag(self.attribute("required"))
    }

    /// Accelerator key (first character of `accesskey`), lowercased
    pub fn access_key(&self) -> Option<char> {
        self.attribute("accesskey")
            .and_then(|v| v.trim().chars().next())
            .map(|c| c.to_ascii_lowercase())
    }
}

// Boolean attributes are on when present, unless spelled out as "false"
fn flag(value: Option<&str>) -> bool {
    match value {
        Some(v) => !v.trim().eq_ignore_ascii_case("false"),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copies_only_allow_listed_declared_attributes() {
        let field = FormField::new("tags")
            .with_attribute("placeholder", "Add a tag")
            .with_attribute("maxlength", "12")
            .with_attribute("class", "wide")
            .with_attribute("name", "tags");
        let surface = InputSurface::mirror(&field, "labels");

        assert_eq!(surface.id(), "labels-editable");
        assert_eq!(surface.input_type(), "text");
        assert_eq!(surface.attributes().len(), 2);
        assert_eq!(surface.placeholder(), Some("Add a tag"));
        assert_eq!(surface.max_length(), Some(12));
        assert_eq!(surface.attribute("class"), None);
    }

    #[test]
    fn boolean_attributes() {
        let field = FormField::new("tags")
            .with_attribute("autofocus", "")
            .with_attribute("required", "false");
        let surface = InputSurface::mirror(&field, "t");
        assert!(surface.autofocus());
        assert!(!surface.required());
    }

    #[test]
    fn access_key_and_bad_max_length() {
        let field = FormField::new("tags")
            .with_attribute("accessKey", "T")
            .with_attribute("maxlength", "lots");
        let surface = InputSurface::mirror(&field, "t");
        assert_eq!(surface.access_key(), Some('t'));
        assert_eq!(surface.max_length(), None);
    }

    #[test]
    fn keeps_input_type() {
        let field = FormField::new("tags").with_attribute("type", "email");
        assert_eq!(InputSurface::mirror(&field, "t").input_type(), "email");
    }
}
