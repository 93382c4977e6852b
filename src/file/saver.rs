//! Instance document serialization and saving.
//!
//! Renders a `DataModel` back to JSON text: consecutive list entries
//! regroup into arrays under their list name, and leaf values render as
//! their typed JSON forms. Reparsing the output against the same schema
//! yields a structurally equal model. Writes are atomic (temp file plus
//! rename), matching the loader's `.gz` handling on the way out.

use anyhow::{Context, Result};
use flate2::write::GzEncoder;
use flate2::Compression;
use serde_json::Value as SerdeValue;
use std::fs;
use std::io::Write;
use std::path::Path;

use crate::data::{DataModel, DataNode, Value};
use crate::schema::{SchemaKind, SchemaModel};

/// Serializes an instance document to JSON text.
pub fn instance_to_json(
    schema: &SchemaModel,
    model: &DataModel,
    pretty: bool,
) -> Result<String> {
    let value = node_to_json(schema, model.root());
    let text = if pretty {
        serde_json::to_string_pretty(&value)
    } else {
        serde_json::to_string(&value)
    };
    text.context("Failed to serialize instance document")
}

/// Saves an instance document to a file atomically.
///
/// A `.gz` target path is compressed on the way out.
pub fn save_instance_file<P: AsRef<Path>>(
    path: P,
    schema: &SchemaModel,
    model: &DataModel,
    pretty: bool,
) -> Result<()> {
    let path = path.as_ref();
    let should_compress = path.to_string_lossy().ends_with(".gz");

    let mut text = instance_to_json(schema, model, pretty)?;
    if !text.ends_with('\n') {
        text.push('\n');
    }

    write_file_atomic(path, text.as_bytes(), should_compress)
}

/// Renders one container or list-entry node as a JSON object.
fn node_to_json(schema: &SchemaModel, node: &DataNode) -> SerdeValue {
    let mut map = serde_json::Map::new();

    for child in node.children() {
        let child_schema = schema.node(child.schema());
        let name = child_schema.name();
        match child_schema.kind() {
            SchemaKind::Leaf { .. } => {
                if let Some(value) = child.leaf_value() {
                    map.insert(name.to_string(), value_to_json(value));
                }
            }
            SchemaKind::Container => {
                map.insert(name.to_string(), node_to_json(schema, child));
            }
            SchemaKind::List { .. } => {
                let entry = node_to_json(schema, child);
                match map.get_mut(name) {
                    Some(SerdeValue::Array(entries)) => entries.push(entry),
                    _ => {
                        map.insert(name.to_string(), SerdeValue::Array(vec![entry]));
                    }
                }
            }
        }
    }

    SerdeValue::Object(map)
}

fn value_to_json(value: &Value) -> SerdeValue {
    match value {
        Value::String(s) => SerdeValue::String(s.clone()),
        Value::Int(n) => SerdeValue::Number((*n).into()),
        Value::Uint(n) => SerdeValue::Number((*n).into()),
        Value::Bool(b) => SerdeValue::Bool(*b),
    }
}

/// Writes data to a file atomically, optionally compressing with gzip.
///
/// Writes to a `.tmp` sibling first, then renames over the target, so the
/// target is never left in a partially written state.
fn write_file_atomic(path: &Path, data: &[u8], compress: bool) -> Result<()> {
    let mut tmp_path = path.to_path_buf();
    let file_name = tmp_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow::anyhow!("Invalid file name"))?;
    tmp_path.set_file_name(format!("{}.tmp", file_name));

    if compress {
        let file = fs::File::create(&tmp_path).context("Failed to create temp file")?;
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder
            .write_all(data)
            .context("Failed to write compressed data")?;
        encoder.finish().context("Failed to finish compression")?;
    } else {
        fs::write(&tmp_path, data).context("Failed to write temp file")?;
    }

    fs::rename(&tmp_path, path).context("Failed to rename temp file into place")?;
    Ok(())
}
