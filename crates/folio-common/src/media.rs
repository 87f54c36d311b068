use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::CommonError;

/// Inline an uploaded file as a `data:` URI so it can live inside the content JSON.
pub fn to_data_uri(bytes: &[u8], file_name: &str) -> String {
    format!(
        "data:{};base64,{}",
        mime_for(file_name),
        STANDARD.encode(bytes)
    )
}

/// Read a local image file and inline it.
pub async fn file_to_data_uri(path: &Path) -> Result<String, CommonError> {
    let bytes = tokio::fs::read(path).await?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    Ok(to_data_uri(&bytes, &name))
}

fn mime_for(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "avif" => "image/avif",
        "bmp" => "image/bmp",
        "ico" => "image/x-icon",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_with_mime_from_extension() {
        assert_eq!(to_data_uri(b"hi", "a.PNG"), "data:image/png;base64,aGk=");
        assert_eq!(to_data_uri(b"", "photo.jpeg"), "data:image/jpeg;base64,");
        assert!(to_data_uri(b"x", "noext").starts_with("data:application/octet-stream;base64,"));
    }

    #[tokio::test]
    async fn reads_files_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo.svg");
        std::fs::write(&path, "<svg/>").unwrap();
        let uri = file_to_data_uri(&path).await.unwrap();
        assert_eq!(uri, "data:image/svg+xml;base64,PHN2Zy8+");

        let missing = file_to_data_uri(&dir.path().join("nope.png")).await;
        assert!(matches!(missing, Err(CommonError::Io(_))));
    }
}
