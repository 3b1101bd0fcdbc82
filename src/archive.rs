use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;

use crate::batch::ObfuscationResult;
use crate::errors::AppError;

/// Packs results into an in-memory ZIP, one entry per unit, entry name taken
/// from the unit path with forward slashes as separators. Any writer failure
/// fails the whole archive; no partial bytes are returned.
pub fn build_zip(results: &[ObfuscationResult]) -> Result<Vec<u8>, AppError> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    for result in results {
        let entry_name = result.path.replace('\\', "/");
        writer
            .start_file(&entry_name, options)
            .map_err(|e| AppError::Packaging(e.to_string()))?;
        writer
            .write_all(result.code.as_bytes())
            .map_err(|e| AppError::Packaging(e.to_string()))?;
    }

    let cursor = writer
        .finish()
        .map_err(|e| AppError::Packaging(e.to_string()))?;
    Ok(cursor.into_inner())
}
