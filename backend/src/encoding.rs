// Reading of the legacy HTML documents.
// They are saved in ISO-8859-1, with the Ethiopic text as numeric character references.

use anyhow::{Context, Result};
use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::logger;

/// Reads an HTML document, decodes it to UTF-8 and converts to Unix line endings
pub fn read_legacy_html(path: &Path) -> Result<String> {
    let mut file = File::open(path)
        .with_context(|| format!("Failed to open file: {:?}", path))?;

    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)
        .with_context(|| format!("Failed to read file: {:?}", path))?;

    Ok(decode_legacy_bytes(&bytes, path))
}

pub(crate) fn decode_legacy_bytes(bytes: &[u8], path: &Path) -> String {
    let (encoding, has_bom) = detect_encoding(bytes);

    logger::debug(&format!(
        "File: {:?}, Encoding: {}, BOM: {}",
        path.file_name().unwrap_or_default(),
        encoding.name(),
        has_bom
    ));

    let bytes_without_bom = if has_bom { &bytes[3..] } else { bytes };

    // WHATWG maps the iso-8859-1 label to windows-1252
    let (decoded, _encoding_used, had_errors) = encoding.decode(bytes_without_bom);

    if had_errors {
        logger::warn(&format!("Encoding errors detected while decoding {:?}", path));
    }

    decoded.replace("\r\n", "\n")
}

/// UTF-8 when the file starts with a UTF-8 BOM, otherwise the legacy single-byte encoding
fn detect_encoding(bytes: &[u8]) -> (&'static Encoding, bool) {
    if bytes.len() >= 3 && bytes[0] == 0xEF && bytes[1] == 0xBB && bytes[2] == 0xBF {
        return (UTF_8, true);
    }

    (WINDOWS_1252, false)
}
