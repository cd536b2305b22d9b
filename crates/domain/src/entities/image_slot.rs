//! One image-upload position in a formset

use std::collections::BTreeMap;

use crate::ids::SlotId;
use crate::value_objects::{subfields, FieldBinding, FormsetPrefix, UploadFile};

/// Value written into checkbox subfields when checked
const CHECKED: &str = "on";

/// An image already stored on the server, as rendered into an edit page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedImage {
    pub record_id: u64,
    pub caption: Option<String>,
    pub image_url: Option<String>,
    pub is_primary: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSlot {
    id: SlotId,
    index: usize,
    bindings: Vec<FieldBinding>,
    field_values: BTreeMap<String, String>,
    is_primary: bool,
    file: Option<UploadFile>,
    /// Bumped whenever the file changes; preview reads carry it back.
    file_generation: u64,
    preview: Option<String>,
    persisted: bool,
}

impl ImageSlot {
    pub(crate) fn blank(index: usize, bindings: Vec<FieldBinding>) -> Self {
        Self {
            id: SlotId::new(),
            index,
            bindings,
            field_values: BTreeMap::new(),
            is_primary: false,
            file: None,
            file_generation: 0,
            preview: None,
            persisted: false,
        }
    }

    /// A slot the server rendered for an already stored image.
    pub fn persisted(
        prefix: &FormsetPrefix,
        index: usize,
        subfield_names: &[&str],
        image: &PersistedImage,
    ) -> Self {
        let bindings = subfield_names
            .iter()
            .map(|subfield| FieldBinding::at(prefix, index, subfield))
            .collect();
        let mut slot = Self::blank(index, bindings);
        slot.persisted = true;
        slot.field_values
            .insert(subfields::ID.to_string(), image.record_id.to_string());
        if let Some(caption) = &image.caption {
            slot.field_values
                .insert(subfields::CAPTION.to_string(), caption.clone());
        }
        slot.preview = image.image_url.clone();
        slot.set_primary_flag(image.is_primary);
        slot
    }

    pub fn id(&self) -> SlotId {
        self.id
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn bindings(&self) -> &[FieldBinding] {
        &self.bindings
    }

    pub fn binding(&self, subfield: &str) -> Option<&FieldBinding> {
        self.bindings.iter().find(|b| b.subfield == subfield)
    }

    pub fn field_value(&self, subfield: &str) -> Option<&str> {
        self.field_values.get(subfield).map(String::as_str)
    }

    pub fn field_values(&self) -> &BTreeMap<String, String> {
        &self.field_values
    }

    pub fn set_field_value(&mut self, subfield: &str, value: impl Into<String>) {
        self.field_values.insert(subfield.to_string(), value.into());
    }

    pub fn is_primary(&self) -> bool {
        self.is_primary
    }

    pub fn file(&self) -> Option<&UploadFile> {
        self.file.as_ref()
    }

    pub fn file_generation(&self) -> u64 {
        self.file_generation
    }

    pub fn preview(&self) -> Option<&str> {
        self.preview.as_deref()
    }

    pub fn is_persisted(&self) -> bool {
        self.persisted
    }

    pub fn is_marked_for_deletion(&self) -> bool {
        self.field_value(subfields::DELETE) == Some(CHECKED)
    }

    /// CSS hook for the primary indicator.
    pub fn css_class(&self) -> &'static str {
        if self.is_primary {
            "image-upload-item primary-image"
        } else {
            "image-upload-item"
        }
    }

    /// Store `file` in the image field and drop any stale preview.
    ///
    /// Returns the new file generation.
    pub(crate) fn set_file(&mut self, file: UploadFile) -> u64 {
        self.field_values
            .insert(subfields::IMAGE.to_string(), file.name.clone());
        self.file = Some(file);
        self.preview = None;
        self.file_generation += 1;
        self.file_generation
    }

    pub(crate) fn clear_file(&mut self) {
        self.field_values.remove(subfields::IMAGE);
        self.file = None;
        self.preview = None;
        self.file_generation += 1;
    }

    pub(crate) fn set_preview(&mut self, data_url: String) {
        self.preview = Some(data_url);
    }

    pub(crate) fn set_primary_flag(&mut self, primary: bool) {
        self.is_primary = primary;
        if primary {
            self.field_values
                .insert(subfields::IS_PRIMARY.to_string(), CHECKED.to_string());
        } else {
            self.field_values.remove(subfields::IS_PRIMARY);
        }
    }

    pub(crate) fn set_deletion_flag(&mut self, delete: bool) {
        if delete {
            self.field_values
                .insert(subfields::DELETE.to_string(), CHECKED.to_string());
        } else {
            self.field_values.remove(subfields::DELETE);
        }
    }

    /// Move the slot to `index`, regenerating every binding from its subfield.
    pub(crate) fn rebind(&mut self, prefix: &FormsetPrefix, index: usize) {
        self.index = index;
        for binding in &mut self.bindings {
            *binding = FieldBinding::at(prefix, index, &binding.subfield);
        }
    }
}
