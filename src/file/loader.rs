//! Schema and instance document loading.
//!
//! Schemas are loaded from plain text files; instance documents from JSON
//! files, gzipped JSON files (detected by the `.gz` extension, or by magic
//! bytes on stdin), or stdin.

use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use std::fs;
use std::io::Read;
use std::path::Path;

use crate::data::{parse_instance_with_options, DataModel, ParseOptions};
use crate::schema::{parse_schema, SchemaModel};

/// Loads and parses a schema definition file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or its contents are not a
/// valid schema definition.
pub fn load_schema_file<P: AsRef<Path>>(path: P) -> Result<SchemaModel> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read schema file {}", path.display()))?;
    parse_schema(&text)
        .with_context(|| format!("Failed to parse schema file {}", path.display()))
}

/// Loads and parses a JSON instance document against a schema.
///
/// Files ending in `.gz` are decompressed transparently.
///
/// # Errors
///
/// Returns an error if the file cannot be read, decompression fails, or
/// the document does not conform to the schema.
pub fn load_instance_file<P: AsRef<Path>>(
    schema: &SchemaModel,
    path: P,
    options: &ParseOptions,
) -> Result<DataModel> {
    let path = path.as_ref();

    let is_gzipped = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == "gz")
        .unwrap_or(false);

    let content = if is_gzipped {
        read_gzipped_file(path)?
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read instance file {}", path.display()))?
    };

    parse_instance_with_options(schema, &content, options)
        .with_context(|| format!("Failed to parse instance file {}", path.display()))
}

/// Loads and parses a JSON instance document from standard input.
///
/// Gzipped input is detected by its magic bytes and decompressed.
pub fn load_instance_from_stdin(
    schema: &SchemaModel,
    options: &ParseOptions,
) -> Result<DataModel> {
    let mut buffer = Vec::new();
    std::io::stdin()
        .read_to_end(&mut buffer)
        .context("Failed to read from stdin")?;

    // Check for gzip magic bytes (0x1f 0x8b)
    let content = if buffer.starts_with(&[0x1f, 0x8b]) {
        decompress_gzip_bytes(&buffer)?
    } else {
        String::from_utf8(buffer).context("Invalid UTF-8 in stdin")?
    };

    parse_instance_with_options(schema, &content, options)
        .context("Failed to parse instance from stdin")
}

fn read_gzipped_file(path: &Path) -> Result<String> {
    let file =
        fs::File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let mut decoder = GzDecoder::new(file);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzip file")?;
    Ok(content)
}

fn decompress_gzip_bytes(bytes: &[u8]) -> Result<String> {
    let mut decoder = GzDecoder::new(bytes);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzip input")?;
    Ok(content)
}
