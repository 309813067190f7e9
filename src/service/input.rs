//! Input validation, done before any network call.

use std::fs;
use std::path::Path;

use crate::error::InputError;

/// File extensions the service can extract text from.
pub const ALLOWED_EXTENSIONS: [&str; 4] = ["txt", "md", "docx", "pdf"];

/// A validated request body for the text-to-diagram service.
///
/// The constructors are the only way to build one, so holding a
/// `ServiceInput` means validation already passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceInput {
    Text(String),
    File { name: String, bytes: Vec<u8> },
}

impl ServiceInput {
    /// Raw PRD text. Blank text is rejected.
    pub fn text(text: impl Into<String>) -> Result<Self, InputError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(InputError::EmptyText);
        }
        Ok(Self::Text(text))
    }

    /// Read and validate an uploaded document from disk.
    pub fn file(path: &Path, max_bytes: u64) -> Result<Self, InputError> {
        check_extension(path)?;
        let unreadable = |source| InputError::Unreadable {
            path: path.to_path_buf(),
            source,
        };
        let size = fs::metadata(path).map_err(unreadable)?.len();
        check_size(path, size, max_bytes)?;
        let bytes = fs::read(path).map_err(unreadable)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::File { name, bytes })
    }

    /// Validate document bytes obtained some other way, e.g. from stdin.
    pub fn from_bytes(
        name: impl Into<String>,
        bytes: Vec<u8>,
        max_bytes: u64,
    ) -> Result<Self, InputError> {
        let name = name.into();
        let path = Path::new(&name);
        check_extension(path)?;
        check_size(path, bytes.len() as u64, max_bytes)?;
        Ok(Self::File { name, bytes })
    }

    /// Size of the payload in bytes.
    pub fn len(&self) -> usize {
        match self {
            ServiceInput::Text(text) => text.len(),
            ServiceInput::File { bytes, .. } => bytes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn check_extension(path: &Path) -> Result<(), InputError> {
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    if ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        Ok(())
    } else {
        Err(InputError::UnsupportedFileType { extension })
    }
}

fn check_size(path: &Path, size: u64, max: u64) -> Result<(), InputError> {
    if size == 0 {
        return Err(InputError::EmptyFile {
            path: path.to_path_buf(),
        });
    }
    if size > max {
        return Err(InputError::TooLarge { size, max });
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/rust/test_service_input.rs"]
mod tests;
