//! Server formset naming protocol
//!
//! Every input inside a formset slot is named `<prefix>-<index>-<subfield>` and
//! carries the id `id_<prefix>-<index>-<subfield>`. Labels point at the input id.
//! The unbound template uses the literal `__prefix__` in place of the index.
//! A management field `<prefix>-TOTAL_FORMS` tells the server how many slots to read.

use std::fmt;

use crate::error::DomainError;

/// Placeholder the server renders into the blank slot template.
pub const PREFIX_PLACEHOLDER: &str = "__prefix__";

/// Management field suffix carrying the live slot count.
pub const TOTAL_FORMS_SUFFIX: &str = "TOTAL_FORMS";

/// Prefix used by the build form's image formset.
pub const IMAGES_PREFIX: &str = "images";

/// Subfields of a build image slot.
pub mod subfields {
    pub const IMAGE: &str = "image";
    pub const CAPTION: &str = "caption";
    pub const IS_PRIMARY: &str = "is_primary";
    pub const DELETE: &str = "DELETE";
    pub const ID: &str = "id";

    pub const BUILD_IMAGE: [&str; 5] = [IMAGE, CAPTION, IS_PRIMARY, DELETE, ID];
}

/// A validated formset prefix (non-empty, `[A-Za-z0-9_]` only)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FormsetPrefix(String);

impl FormsetPrefix {
    /// Create a new validated prefix.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the prefix is empty or contains a
    /// character that would collide with the `-` separator of the protocol.
    pub fn new(prefix: impl Into<String>) -> Result<Self, DomainError> {
        let prefix = prefix.into();
        if prefix.is_empty() {
            return Err(DomainError::validation("Formset prefix cannot be empty"));
        }
        if !prefix
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(DomainError::validation(format!(
                "Formset prefix '{}' may only contain letters, digits and underscores",
                prefix
            )));
        }
        Ok(Self(prefix))
    }

    /// The `images` prefix of the build form.
    pub fn images() -> Self {
        Self(IMAGES_PREFIX.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `<prefix>-<index>-<subfield>`
    pub fn field_name(&self, index: usize, subfield: &str) -> String {
        format!("{}-{}-{}", self.0, index, subfield)
    }

    /// `id_<prefix>-<index>-<subfield>`
    pub fn field_id(&self, index: usize, subfield: &str) -> String {
        format!("id_{}", self.field_name(index, subfield))
    }

    /// `<prefix>-TOTAL_FORMS`
    pub fn total_forms_name(&self) -> String {
        format!("{}-{}", self.0, TOTAL_FORMS_SUFFIX)
    }

    /// `id_<prefix>-TOTAL_FORMS`
    pub fn total_forms_id(&self) -> String {
        format!("id_{}", self.total_forms_name())
    }
}

impl fmt::Display for FormsetPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Name, id and label target of a single input inside a slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldBinding {
    pub subfield: String,
    pub name: String,
    pub id: String,
    pub label_for: String,
}

impl FieldBinding {
    /// Binding for `subfield` at position `index`.
    pub fn at(prefix: &FormsetPrefix, index: usize, subfield: &str) -> Self {
        let id = prefix.field_id(index, subfield);
        Self {
            subfield: subfield.to_string(),
            name: prefix.field_name(index, subfield),
            label_for: id.clone(),
            id,
        }
    }
}

/// The blank, unbound slot the server renders once per page.
///
/// Names and ids carry [`PREFIX_PLACEHOLDER`] until the template is instantiated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotTemplate {
    prefix: FormsetPrefix,
    bindings: Vec<FieldBinding>,
}

impl SlotTemplate {
    pub fn new(prefix: FormsetPrefix, subfields: &[&str]) -> Self {
        let bindings = subfields
            .iter()
            .map(|subfield| {
                let name = format!("{}-{}-{}", prefix.as_str(), PREFIX_PLACEHOLDER, subfield);
                let id = format!("id_{}", name);
                FieldBinding {
                    subfield: subfield.to_string(),
                    name,
                    label_for: id.clone(),
                    id,
                }
            })
            .collect();
        Self { prefix, bindings }
    }

    /// Template for the build form's image slots.
    pub fn build_images() -> Self {
        Self::new(FormsetPrefix::images(), &subfields::BUILD_IMAGE)
    }

    pub fn prefix(&self) -> &FormsetPrefix {
        &self.prefix
    }

    pub fn bindings(&self) -> &[FieldBinding] {
        &self.bindings
    }

    /// Substitute the placeholder with `index` in every name, id and label target.
    pub fn instantiate(&self, index: usize) -> Vec<FieldBinding> {
        let index = index.to_string();
        self.bindings
            .iter()
            .map(|binding| FieldBinding {
                subfield: binding.subfield.clone(),
                name: binding.name.replace(PREFIX_PLACEHOLDER, &index),
                id: binding.id.replace(PREFIX_PLACEHOLDER, &index),
                label_for: binding.label_for.replace(PREFIX_PLACEHOLDER, &index),
            })
            .collect()
    }

    /// Subfield names in template order.
    pub fn subfields(&self) -> impl Iterator<Item = &str> {
        self.bindings.iter().map(|b| b.subfield.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_rejects_separator() {
        assert!(FormsetPrefix::new("images").is_ok());
        assert!(FormsetPrefix::new("").is_err());
        assert!(FormsetPrefix::new("build-images").is_err());
    }

    #[test]
    fn names_follow_protocol() {
        let prefix = FormsetPrefix::images();
        assert_eq!(prefix.field_name(2, "caption"), "images-2-caption");
        assert_eq!(prefix.field_id(2, "caption"), "id_images-2-caption");
        assert_eq!(prefix.total_forms_name(), "images-TOTAL_FORMS");
        assert_eq!(prefix.total_forms_id(), "id_images-TOTAL_FORMS");
    }

    #[test]
    fn template_carries_placeholder_until_instantiated() {
        let template = SlotTemplate::build_images();
        assert!(template
            .bindings()
            .iter()
            .all(|b| b.name.contains(PREFIX_PLACEHOLDER) && b.id.contains(PREFIX_PLACEHOLDER)));

        let bound = template.instantiate(1);
        assert_eq!(bound.len(), subfields::BUILD_IMAGE.len());
        assert_eq!(bound[0], FieldBinding::at(&FormsetPrefix::images(), 1, "image"));
        assert!(bound.iter().all(|b| !b.name.contains(PREFIX_PLACEHOLDER)));
        assert!(bound.iter().all(|b| b.label_for == b.id));
    }
}
