//! Data URL previews for selected images

use base64::{engine::general_purpose::STANDARD, Engine as _};

use erbuilds_domain::UploadFile;

use crate::ports::outbound::{FileReadError, FileReaderPort};

/// Encodes the file's bytes inline, as `FileReader.readAsDataURL` does
#[derive(Debug, Clone, Copy, Default)]
pub struct DataUrlReader;

impl DataUrlReader {
    pub fn encode(file: &UploadFile) -> Result<String, FileReadError> {
        if file.bytes.is_empty() && file.size_bytes > 0 {
            return Err(FileReadError::Unreadable {
                name: file.name.clone(),
                message: "file contents are not loaded".to_string(),
            });
        }
        let mime = if file.mime_type.is_empty() {
            "application/octet-stream"
        } else {
            file.mime_type.as_str()
        };
        Ok(format!("data:{};base64,{}", mime, STANDARD.encode(&file.bytes)))
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
impl FileReaderPort for DataUrlReader {
    async fn read_data_url(&self, file: &UploadFile) -> Result<String, FileReadError> {
        Self::encode(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn encodes_png_bytes() {
        let file = UploadFile::new("a.png", "image/png", vec![0x89, b'P', b'N', b'G']);
        let url = DataUrlReader.read_data_url(&file).await.unwrap();
        assert_eq!(url, "data:image/png;base64,iVBORw==");
    }

    #[test]
    fn missing_contents_are_unreadable() {
        let mut file = UploadFile::new("a.png", "image/png", Vec::new());
        file.size_bytes = 10;
        assert!(matches!(
            DataUrlReader::encode(&file),
            Err(FileReadError::Unreadable { .. })
        ));
    }
}
