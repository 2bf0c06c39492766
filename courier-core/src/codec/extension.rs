//! The fixed-width extension field that opens every file frame.

use std::path::Path;

use crate::error::CourierError;

/// Width of the extension field in bytes.
pub const EXTENSION_FIELD_LEN: usize = 15;

pub type ExtensionField = [u8; EXTENSION_FIELD_LEN];

/// Pack `extension` into a zero-filled field.
///
/// Extensions whose UTF-8 encoding does not fit are rejected rather
/// than truncated.
pub fn encode_extension(extension: &str) -> Result<ExtensionField, CourierError> {
    let bytes = extension.as_bytes();
    if bytes.len() > EXTENSION_FIELD_LEN {
        return Err(CourierError::ExtensionTooLong {
            len: bytes.len(),
            max: EXTENSION_FIELD_LEN,
        });
    }

    let mut field = [0u8; EXTENSION_FIELD_LEN];
    field[..bytes.len()].copy_from_slice(bytes);
    Ok(field)
}

/// Recover the extension text, dropping every zero byte in the field.
pub fn decode_extension(field: &ExtensionField) -> String {
    String::from_utf8_lossy(field).replace('\0', "")
}

/// The extension of `path` including its leading dot, or an empty string.
pub fn extension_of(path: &Path) -> String {
    match path.extension() {
        Some(ext) => format!(".{}", ext.to_string_lossy()),
        None => String::new(),
    }
}

/// Refuse extensions that would place the stored file outside its dated directory.
pub fn validate_extension(extension: &str) -> Result<(), CourierError> {
    if extension.contains(['/', '\\']) {
        return Err(CourierError::InvalidExtension(extension.to_string()));
    }
    Ok(())
}
