//! Formset Service - Drives the build form's image formset
//!
//! [`FormsetController`] owns the [`ImageFormset`] aggregate and the two
//! platform ports it needs: a file reader for previews and a notifier for
//! alerts. Aggregate mutations are short critical sections; preview reads run
//! outside the lock and are applied only if their slot still holds the same
//! file.

use std::sync::{Arc, Mutex, MutexGuard};

use futures_util::future::join_all;

use erbuilds_domain::{
    DomainError, FileIntake, ImageFormset, PreviewRequest, SlotId, UploadFile, UploadRejection,
};

use crate::ports::outbound::{FileReaderPort, NotifierPort};

pub struct FormsetController {
    formset: Mutex<ImageFormset>,
    reader: Arc<dyn FileReaderPort>,
    notifier: Arc<dyn NotifierPort>,
}

impl FormsetController {
    pub fn new(
        formset: ImageFormset,
        reader: Arc<dyn FileReaderPort>,
        notifier: Arc<dyn NotifierPort>,
    ) -> Self {
        Self {
            formset: Mutex::new(formset),
            reader,
            notifier,
        }
    }

    /// Read the current formset.
    pub fn with_formset<R>(&self, f: impl FnOnce(&ImageFormset) -> R) -> R {
        f(&self.lock())
    }

    /// A copy of the current formset, for rendering.
    pub fn snapshot(&self) -> ImageFormset {
        self.lock().clone()
    }

    pub fn add_slot(&self) -> Option<SlotId> {
        let added = self.lock().add_slot();
        if added.is_none() {
            tracing::debug!("Image formset is full, add ignored");
        }
        added
    }

    pub fn remove_slot(&self, id: SlotId) -> Result<Option<SlotId>, DomainError> {
        self.lock().remove_slot(id)
    }

    pub fn reindex(&self) {
        self.lock().reindex();
    }

    pub fn set_primary(&self, id: SlotId) -> Result<(), DomainError> {
        self.lock().set_primary(id)
    }

    pub fn clear_primary(&self, id: SlotId) -> Result<(), DomainError> {
        self.lock().clear_primary(id)
    }

    pub fn mark_for_deletion(&self, id: SlotId, delete: bool) -> Result<(), DomainError> {
        self.lock().mark_for_deletion(id, delete)
    }

    pub fn set_caption(&self, id: SlotId, caption: &str) -> Result<(), DomainError> {
        self.lock().set_caption(id, caption)
    }

    /// Files dropped on the drop zone. Non-images are ignored.
    pub async fn handle_files_dropped(&self, files: Vec<UploadFile>) -> Vec<SlotId> {
        let (images, ignored): (Vec<UploadFile>, Vec<UploadFile>) =
            files.into_iter().partition(UploadFile::is_image);
        if !ignored.is_empty() {
            tracing::debug!(ignored = ignored.len(), "Dropped non-image files ignored");
        }
        self.intake(images).await
    }

    /// Files picked through the multi-file input.
    pub async fn handle_files_selected(&self, files: Vec<UploadFile>) -> Vec<SlotId> {
        self.intake(files).await
    }

    /// A file chosen in one slot's own file input.
    ///
    /// A rejected file is reported to the user and cleared from the slot.
    pub async fn set_slot_file(&self, id: SlotId, file: UploadFile) -> Result<(), DomainError> {
        let name = file.name.clone();
        let result = self.lock().set_slot_file(id, file);
        let request = match result {
            Ok(request) => request,
            Err(DomainError::Validation(message)) => {
                tracing::info!(file = %name, %message, "Slot file rejected");
                self.notifier.alert(&message);
                return Err(DomainError::Validation(message));
            }
            Err(e) => return Err(e),
        };
        self.load_preview(request).await;
        Ok(())
    }

    /// Submit guard: `Ok` when the form may be sent.
    ///
    /// Offending slots are cleared and a single alert lists every rejected file.
    pub fn validate_for_submit(&self) -> Result<(), Vec<UploadRejection>> {
        let result = self.lock().validate_for_submit();
        if let Err(rejections) = &result {
            tracing::info!(rejected = rejections.len(), "Submission blocked");
            self.notifier.alert(&submit_alert(rejections));
        }
        result
    }

    async fn intake(&self, files: Vec<UploadFile>) -> Vec<SlotId> {
        if files.is_empty() {
            return Vec::new();
        }
        let (intake, max_count): (FileIntake, usize) = {
            let mut formset = self.lock();
            let max_count = formset.max_count();
            (formset.intake_files(files), max_count)
        };

        if let Some(warning) = intake.warning(max_count) {
            tracing::info!(
                accepted = intake.accepted.len(),
                discarded = intake.discarded.len(),
                "Files beyond capacity discarded"
            );
            self.notifier.alert(&warning);
        }

        let ids: Vec<SlotId> = intake.accepted.iter().map(|r| r.slot_id).collect();
        join_all(
            intake
                .accepted
                .into_iter()
                .map(|request| self.load_preview(request)),
        )
        .await;
        ids
    }

    async fn load_preview(&self, request: PreviewRequest) {
        match self.reader.read_data_url(&request.file).await {
            Ok(data_url) => {
                let applied =
                    self.lock()
                        .apply_preview(request.slot_id, request.generation, data_url);
                if !applied {
                    tracing::debug!(slot = %request.slot_id, "Stale preview dropped");
                }
            }
            Err(e) => tracing::warn!(slot = %request.slot_id, error = %e, "Preview read failed"),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ImageFormset> {
        self.formset.lock().unwrap_or_else(|p| p.into_inner())
    }
}

/// One alert for every rejected file, grouped by reason.
fn submit_alert(rejections: &[UploadRejection]) -> String {
    let too_large: Vec<&str> = rejections
        .iter()
        .filter(|r| matches!(r, UploadRejection::TooLarge { .. }))
        .map(UploadRejection::file_name)
        .collect();
    let not_images: Vec<&str> = rejections
        .iter()
        .filter(|r| matches!(r, UploadRejection::NotAnImage { .. }))
        .map(UploadRejection::file_name)
        .collect();

    let mut sections = Vec::new();
    if !too_large.is_empty() {
        sections.push(format!(
            "The following files are too large (max 10MB):\n{}",
            too_large.join("\n")
        ));
    }
    if !not_images.is_empty() {
        sections.push(format!(
            "The following files are not valid images:\n{}",
            not_images.join("\n")
        ));
    }
    sections.join("\n\n")
}
