//! Image type and size checks.
//!
//! The declared MIME type, the file extension and the leading signature bytes
//! must all agree on one of JPEG, PNG or GIF.

use super::ImageUpload;
use crate::errors::ServiceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Jpeg,
    Png,
    Gif,
}

impl ImageKind {
    pub fn extension(self) -> &'static str {
        match self {
            ImageKind::Jpeg => "jpg",
            ImageKind::Png => "png",
            ImageKind::Gif => "gif",
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            ImageKind::Jpeg => "image/jpeg",
            ImageKind::Png => "image/png",
            ImageKind::Gif => "image/gif",
        }
    }

    fn from_token(token: &str) -> Option<Self> {
        match token {
            "jpeg" | "jpg" | "pjpeg" => Some(ImageKind::Jpeg),
            "png" => Some(ImageKind::Png),
            "gif" => Some(ImageKind::Gif),
            _ => None,
        }
    }

    /// Kind named by a MIME type such as `image/png`.
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next()?.trim().to_ascii_lowercase();
        let subtype = essence.strip_prefix("image/")?;
        Self::from_token(subtype)
    }

    /// Kind named by the extension of `file_name`.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let (_, ext) = file_name.rsplit_once('.')?;
        Self::from_token(&ext.to_ascii_lowercase())
    }

    /// Kind recognised from the magic bytes at the start of the payload.
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        const PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Some(ImageKind::Jpeg)
        } else if bytes.starts_with(PNG) {
            Some(ImageKind::Png)
        } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
            Some(ImageKind::Gif)
        } else {
            None
        }
    }
}

fn unsupported() -> ServiceError {
    ServiceError::Validation("File type not supported".into())
}

/// Check size and type; returns the verified kind.
pub fn inspect(upload: &ImageUpload, max_bytes: usize) -> Result<ImageKind, ServiceError> {
    if upload.bytes.is_empty() {
        return Err(ServiceError::Validation("No file uploaded".into()));
    }
    if upload.bytes.len() > max_bytes {
        return Err(ServiceError::Validation(format!(
            "File too large: {} bytes exceeds the {} byte limit",
            upload.bytes.len(),
            max_bytes
        )));
    }
    let declared = upload.content_type.as_deref().and_then(ImageKind::from_mime).ok_or_else(unsupported)?;
    let named = upload.file_name.as_deref().and_then(ImageKind::from_file_name).ok_or_else(unsupported)?;
    let sniffed = ImageKind::sniff(&upload.bytes).ok_or_else(unsupported)?;
    if declared != sniffed || named != sniffed {
        return Err(unsupported());
    }
    Ok(sniffed)
}
