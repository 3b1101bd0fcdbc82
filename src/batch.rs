use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::engine::{self, ObfuscationOptions};
use crate::errors::AppError;
use crate::rename::{NameGenerator, RenameTable};

/// One logical file in a batch. `path` is preserved verbatim as the archive
/// entry name; `content` is the raw upload, not yet known to be text.
#[derive(Debug, Clone)]
pub struct SourceUnit {
    pub path: String,
    pub content: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct ObfuscationResult {
    pub path: String,
    pub code: String,
}

#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub obfuscation: ObfuscationOptions,
    /// One rename table across the whole batch instead of a fresh table per
    /// file. Off by default.
    pub shared_names: bool,
    pub max_file_bytes: usize,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            obfuscation: ObfuscationOptions::default(),
            shared_names: false,
            max_file_bytes: 5 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Error)]
pub enum UnitError {
    #[error("content is not valid UTF-8")]
    NotUtf8,
    #[error("file is {size} bytes, cap is {cap}")]
    TooLarge { size: usize, cap: usize },
}

/// Transforms each unit in submission order. A unit that fails is logged and
/// skipped; its output never reaches the archive and the batch continues.
/// An empty batch is rejected before the engine is touched.
pub fn run_batch(
    units: &[SourceUnit],
    options: &BatchOptions,
) -> Result<Vec<ObfuscationResult>, AppError> {
    if units.is_empty() {
        return Err(AppError::NoInput);
    }

    let job_id = Uuid::new_v4();
    info!(%job_id, files = units.len(), "starting obfuscation batch");

    let mut names = NameGenerator::new();
    let mut shared_table = RenameTable::new();
    let mut results = Vec::with_capacity(units.len());

    for unit in units {
        match transform_unit(unit, options, &mut shared_table, &mut names) {
            Ok(result) => results.push(result),
            Err(err) => warn!(%job_id, path = %unit.path, %err, "skipping file"),
        }
    }

    info!(
        %job_id,
        produced = results.len(),
        skipped = units.len() - results.len(),
        "obfuscation batch complete"
    );
    Ok(results)
}

fn transform_unit(
    unit: &SourceUnit,
    options: &BatchOptions,
    shared_table: &mut RenameTable,
    names: &mut NameGenerator,
) -> Result<ObfuscationResult, UnitError> {
    if unit.content.len() > options.max_file_bytes {
        return Err(UnitError::TooLarge {
            size: unit.content.len(),
            cap: options.max_file_bytes,
        });
    }
    let source = std::str::from_utf8(&unit.content).map_err(|_| UnitError::NotUtf8)?;

    let code = if options.shared_names {
        engine::obfuscate_with(source, &options.obfuscation, shared_table, names)
    } else {
        let mut table = RenameTable::new();
        engine::obfuscate_with(source, &options.obfuscation, &mut table, names)
    };

    Ok(ObfuscationResult {
        path: unit.path.clone(),
        code,
    })
}
