//! Upload payload type.

use std::path::Path;

const OCTET_STREAM: &str = "application/octet-stream";

/// Binary file content to send as a multipart part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    /// Wrap `bytes`, guessing the content type from `file_name`'s extension.
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        let file_name = file_name.into();
        let content_type = guess_content_type(&file_name).to_string();
        Self {
            file_name,
            content_type,
            bytes: bytes.into(),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    /// Read a file from disk. The part's file name is the path's final component.
    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::new(file_name, bytes))
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

fn guess_content_type(file_name: &str) -> &'static str {
    let Some((_, ext)) = file_name.rsplit_once('.') else {
        return OCTET_STREAM;
    };
    match ext.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "mp4" => "video/mp4",
        "avi" => "video/x-msvideo",
        "mov" => "video/quicktime",
        _ => OCTET_STREAM,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_follows_extension() {
        assert_eq!(FileUpload::new("cat.PNG", vec![1]).content_type, "image/png");
        assert_eq!(FileUpload::new("a.b.jpeg", vec![1]).content_type, "image/jpeg");
        assert_eq!(FileUpload::new("clip.mov", vec![1]).content_type, "video/quicktime");
    }

    #[test]
    fn unknown_or_missing_extension_is_octet_stream() {
        assert_eq!(FileUpload::new("notes.txt", vec![]).content_type, OCTET_STREAM);
        assert_eq!(FileUpload::new("README", vec![]).content_type, OCTET_STREAM);
    }

    #[test]
    fn explicit_content_type_wins() {
        let file = FileUpload::new("raw", vec![0xff]).with_content_type("image/png");
        assert_eq!(file.content_type, "image/png");
        assert_eq!(file.len(), 1);
    }

    #[tokio::test]
    async fn from_path_reads_bytes_and_name() {
        let dir = std::env::temp_dir().join(format!("backend-client-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("photo.jpg");
        std::fs::write(&path, b"\xff\xd8\xff").unwrap();

        let file = FileUpload::from_path(&path).await.unwrap();
        assert_eq!(file.file_name, "photo.jpg");
        assert_eq!(file.content_type, "image/jpeg");
        assert_eq!(file.bytes, b"\xff\xd8\xff");

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn from_path_missing_file_is_io_error() {
        let err = FileUpload::from_path("/definitely/not/here.png").await.unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }
}
