//! Image files picked or dropped by the user

use std::fmt;

/// Largest accepted upload (10 MiB)
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// A file handed over by a file input or a drop zone
#[derive(Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub mime_type: String,
    pub size_bytes: u64,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size_bytes: bytes.len() as u64,
            bytes,
        }
    }

    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }

    /// Check the file against the upload rules.
    pub fn validate(&self) -> Result<(), UploadRejection> {
        if !self.is_image() {
            return Err(UploadRejection::NotAnImage {
                name: self.name.clone(),
            });
        }
        if self.size_bytes > MAX_UPLOAD_BYTES {
            return Err(UploadRejection::TooLarge {
                name: self.name.clone(),
                size_bytes: self.size_bytes,
            });
        }
        Ok(())
    }
}

// Raw bytes are noise in logs and test failures.
impl fmt::Debug for UploadFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadFile")
            .field("name", &self.name)
            .field("mime_type", &self.mime_type)
            .field("size_bytes", &self.size_bytes)
            .finish()
    }
}

/// Why a file was refused before submission
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadRejection {
    #[error("{name} is not a valid image")]
    NotAnImage { name: String },

    #[error("{name} is too large (max 10MB)")]
    TooLarge { name: String, size_bytes: u64 },
}

impl UploadRejection {
    pub fn file_name(&self) -> &str {
        match self {
            Self::NotAnImage { name } | Self::TooLarge { name, .. } => name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_small_images() {
        let file = UploadFile::new("tarnished.png", "image/png", vec![0; 512]);
        assert!(file.validate().is_ok());
    }

    #[test]
    fn rejects_non_images() {
        let file = UploadFile::new("notes.txt", "text/plain", vec![0; 16]);
        assert_eq!(
            file.validate(),
            Err(UploadRejection::NotAnImage {
                name: "notes.txt".into()
            })
        );
    }

    #[test]
    fn rejects_files_over_ten_megabytes() {
        let mut file = UploadFile::new("huge.jpg", "image/jpeg", Vec::new());
        file.size_bytes = MAX_UPLOAD_BYTES + 1;
        let err = file.validate().unwrap_err();
        assert!(matches!(err, UploadRejection::TooLarge { .. }));
        assert_eq!(err.file_name(), "huge.jpg");
    }
}
