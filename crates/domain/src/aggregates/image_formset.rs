//! ImageFormset aggregate - the ordered image slots of a build form
//!
//! # Invariants
//!
//! - Slot indices are exactly `0..count` in sequence order after every mutation
//! - `count <= max_count`; the add affordance is visible iff `count < max_count`
//! - The management field value always equals `count`
//! - At most one slot is primary
//!
//! The aggregate is the record of truth for slot existence. Rendering layers
//! read [`ImageSlot::bindings`] instead of rewriting live markup.

use crate::entities::{ImageSlot, PersistedImage};
use crate::error::DomainError;
use crate::ids::SlotId;
use crate::value_objects::{subfields, FormsetPrefix, SlotTemplate, UploadFile, UploadRejection};

/// Maximum number of images per build
pub const MAX_IMAGE_SLOTS: usize = 3;

/// A file accepted into a slot, waiting for its preview to be read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewRequest {
    pub slot_id: SlotId,
    pub generation: u64,
    pub file: UploadFile,
}

/// Outcome of handing a batch of files to the formset
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileIntake {
    /// One entry per accepted file, in arrival order
    pub accepted: Vec<PreviewRequest>,
    /// Files beyond the remaining capacity, in arrival order
    pub discarded: Vec<UploadFile>,
}

impl FileIntake {
    /// User-facing warning when files had to be dropped.
    pub fn warning(&self, max_count: usize) -> Option<String> {
        if self.discarded.is_empty() {
            return None;
        }
        Some(format!(
            "You can only upload up to {} images. Only the first {} will be used.",
            max_count,
            self.accepted.len()
        ))
    }
}

#[derive(Debug, Clone)]
pub struct ImageFormset {
    template: SlotTemplate,
    slots: Vec<ImageSlot>,
    max_count: usize,
    /// Mirror of the `<prefix>-TOTAL_FORMS` management field
    total_forms: usize,
    /// Refill to one blank slot when the last one is removed
    keep_one_slot: bool,
}

impl ImageFormset {
    /// A create page: starts with one blank slot.
    pub fn new(template: SlotTemplate) -> Self {
        Self::with_persisted(template, Vec::new())
    }

    /// The build form's image formset on a create page.
    pub fn build_images() -> Self {
        Self::new(SlotTemplate::build_images())
    }

    /// An edit page that rendered `images` already stored on the server.
    ///
    /// Pages that loaded stored images may be emptied by the user; pages that
    /// loaded none behave like create pages.
    pub fn with_persisted(template: SlotTemplate, images: Vec<PersistedImage>) -> Self {
        let subfield_names: Vec<String> = template.subfields().map(str::to_string).collect();
        let subfield_refs: Vec<&str> = subfield_names.iter().map(String::as_str).collect();
        let slots: Vec<ImageSlot> = images
            .iter()
            .take(MAX_IMAGE_SLOTS)
            .enumerate()
            .map(|(index, image)| {
                ImageSlot::persisted(template.prefix(), index, &subfield_refs, image)
            })
            .collect();

        let keep_one_slot = slots.is_empty();
        let mut formset = Self {
            template,
            slots,
            max_count: MAX_IMAGE_SLOTS,
            total_forms: 0,
            keep_one_slot,
        };
        formset.enforce_single_primary();
        formset.sync();
        if formset.slots.is_empty() {
            formset.add_slot();
        }
        formset
    }

    pub fn prefix(&self) -> &FormsetPrefix {
        self.template.prefix()
    }

    pub fn max_count(&self) -> usize {
        self.max_count
    }

    pub fn count(&self) -> usize {
        self.slots.len()
    }

    pub fn slots(&self) -> &[ImageSlot] {
        &self.slots
    }

    pub fn slot(&self, id: SlotId) -> Option<&ImageSlot> {
        self.slots.iter().find(|s| s.id() == id)
    }

    pub fn available_capacity(&self) -> usize {
        self.max_count.saturating_sub(self.count())
    }

    /// Value of the `<prefix>-TOTAL_FORMS` management field.
    pub fn total_forms(&self) -> usize {
        self.total_forms
    }

    /// `(name, value)` of the management field as it must be submitted.
    pub fn management_field(&self) -> (String, String) {
        (self.prefix().total_forms_name(), self.total_forms.to_string())
    }

    pub fn add_affordance_visible(&self) -> bool {
        self.count() < self.max_count
    }

    /// Mirrors the container's `data-max-reached` styling hook.
    pub fn max_reached(&self) -> bool {
        self.count() >= self.max_count
    }

    /// Append a blank slot at the end.
    ///
    /// Returns `None` without touching anything when the formset is full.
    pub fn add_slot(&mut self) -> Option<SlotId> {
        if self.max_reached() {
            return None;
        }
        let index = self.count();
        let slot = ImageSlot::blank(index, self.template.instantiate(index));
        let id = slot.id();
        self.slots.push(slot);
        self.sync();
        Some(id)
    }

    /// Remove a slot and renumber the rest.
    ///
    /// Returns the id of the blank slot added back when the policy requires at
    /// least one visible slot.
    pub fn remove_slot(&mut self, id: SlotId) -> Result<Option<SlotId>, DomainError> {
        let position = self.position(id)?;
        self.slots.remove(position);
        self.reindex();

        if self.slots.is_empty() && self.keep_one_slot {
            return Ok(self.add_slot());
        }
        Ok(None)
    }

    /// Rewrite every binding so it embeds the slot's rank in the sequence.
    pub fn reindex(&mut self) {
        let prefix = self.template.prefix().clone();
        for (rank, slot) in self.slots.iter_mut().enumerate() {
            slot.rebind(&prefix, rank);
        }
        self.sync();
    }

    /// Make `id` the only primary slot.
    pub fn set_primary(&mut self, id: SlotId) -> Result<(), DomainError> {
        self.position(id)?;
        for slot in &mut self.slots {
            let primary = slot.id() == id;
            slot.set_primary_flag(primary);
        }
        Ok(())
    }

    /// Uncheck the primary box of `id`.
    pub fn clear_primary(&mut self, id: SlotId) -> Result<(), DomainError> {
        let position = self.position(id)?;
        self.slots[position].set_primary_flag(false);
        Ok(())
    }

    pub fn primary(&self) -> Option<&ImageSlot> {
        self.slots.iter().find(|s| s.is_primary())
    }

    /// Place files into new slots, first come first served.
    ///
    /// Only `max_count - count` files are accepted; the rest are returned as discarded.
    pub fn intake_files(&mut self, files: Vec<UploadFile>) -> FileIntake {
        let mut intake = FileIntake::default();
        for file in files {
            match self.add_slot() {
                Some(slot_id) => {
                    let position = self.slots.len() - 1;
                    let generation = self.slots[position].set_file(file.clone());
                    intake.accepted.push(PreviewRequest {
                        slot_id,
                        generation,
                        file,
                    });
                }
                None => intake.discarded.push(file),
            }
        }
        intake
    }

    /// Put `file` into an existing slot's file input.
    ///
    /// A rejected file leaves the slot's file field cleared.
    pub fn set_slot_file(
        &mut self,
        id: SlotId,
        file: UploadFile,
    ) -> Result<PreviewRequest, DomainError> {
        let position = self.position(id)?;
        if let Err(rejection) = file.validate() {
            self.slots[position].clear_file();
            return Err(rejection.into());
        }
        let generation = self.slots[position].set_file(file.clone());
        Ok(PreviewRequest {
            slot_id: id,
            generation,
            file,
        })
    }

    /// Apply a finished preview read.
    ///
    /// Returns `false` when the slot is gone or its file changed since the read
    /// was issued.
    pub fn apply_preview(&mut self, slot_id: SlotId, generation: u64, data_url: String) -> bool {
        match self.slots.iter_mut().find(|s| s.id() == slot_id) {
            Some(slot) if slot.file_generation() == generation && slot.file().is_some() => {
                slot.set_preview(data_url);
                true
            }
            _ => false,
        }
    }

    /// Toggle the `DELETE` checkbox of a stored image.
    pub fn mark_for_deletion(&mut self, id: SlotId, delete: bool) -> Result<(), DomainError> {
        let position = self.position(id)?;
        let slot = &mut self.slots[position];
        if !slot.is_persisted() {
            return Err(DomainError::invalid_state_transition(
                "Only stored images can be marked for deletion",
            ));
        }
        slot.set_deletion_flag(delete);
        Ok(())
    }

    /// Type into the caption input of `id`.
    pub fn set_caption(&mut self, id: SlotId, caption: &str) -> Result<(), DomainError> {
        let position = self.position(id)?;
        self.slots[position].set_field_value(subfields::CAPTION, caption);
        Ok(())
    }

    /// Check every selected file before the form is submitted.
    ///
    /// Offending slots have their file cleared; all rejections are returned.
    pub fn validate_for_submit(&mut self) -> Result<(), Vec<UploadRejection>> {
        let mut rejections = Vec::new();
        for slot in &mut self.slots {
            let rejection = slot.file().and_then(|file| file.validate().err());
            if let Some(rejection) = rejection {
                slot.clear_file();
                rejections.push(rejection);
            }
        }
        if rejections.is_empty() {
            Ok(())
        } else {
            Err(rejections)
        }
    }

    fn position(&self, id: SlotId) -> Result<usize, DomainError> {
        self.slots
            .iter()
            .position(|s| s.id() == id)
            .ok_or_else(|| DomainError::not_found("ImageSlot", id.to_string()))
    }

    fn enforce_single_primary(&mut self) {
        let mut seen = false;
        for slot in &mut self.slots {
            if slot.is_primary() {
                if seen {
                    slot.set_primary_flag(false);
                }
                seen = true;
            }
        }
    }

    fn sync(&mut self) {
        self.total_forms = self.slots.len();
    }
}
