//! ArrayOfModel package writers.
//!
//! Two interchangeable strategies serialize the same two-node package:
//!
//! - [`StructuredXmlWriter`]: element-by-element XML, UTF-16LE with BOM.
//! - [`ManualXmlWriter`]: the legacy generator's hand-written layout,
//!   UTF-8 without BOM, reproduced byte for byte.
//!
//! Both consume nodes in package order (model first, then manufacturer).

mod manual;
mod number;
mod structured;

pub use manual::ManualXmlWriter;
pub use number::{format_invariant, format_legacy};
pub use structured::StructuredXmlWriter;

use crate::config::{LineEnding, PackageConfig, PackageFormat};
use crate::error::{ExportError, Result};
use crate::models::{ModelPackage, ModelRecord};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use std::io::Write;

/// A serialization strategy for [`ModelPackage`]s.
pub trait PackageWriter: Send + Sync {
    fn format(&self) -> PackageFormat;

    /// Serialize `package` into a caller-owned sink.
    fn write_package(&self, package: &ModelPackage, out: &mut dyn Write) -> Result<()>;

    /// Serialize `package` into memory.
    fn to_bytes(&self, package: &ModelPackage) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.write_package(package, &mut buf)?;
        Ok(buf)
    }
}

/// Select the writer for a format.
///
/// `include_extras` and `line_ending` only affect the manual writer.
pub fn writer_for(
    format: PackageFormat,
    include_extras: bool,
    line_ending: LineEnding,
) -> Box<dyn PackageWriter> {
    match format {
        PackageFormat::Structured => Box::new(StructuredXmlWriter::new()),
        PackageFormat::Manual => Box::new(
            ManualXmlWriter::new()
                .include_extras(include_extras)
                .line_ending(line_ending),
        ),
    }
}

pub(crate) fn format_date(record_date: &chrono::NaiveDateTime) -> String {
    record_date.format(PackageConfig::DATE_FORMAT).to_string()
}

pub(crate) fn format_bool(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

/// Base64 text of the node's specification blob, if it has a non-empty one.
pub(crate) fn specification_data_text(record: &ModelRecord) -> Option<String> {
    record
        .specification_data
        .as_deref()
        .filter(|data| !data.is_empty())
        .map(|data| BASE64.encode(data))
}

pub(crate) fn write_all(out: &mut dyn Write, bytes: &[u8]) -> Result<()> {
    out.write_all(bytes)?;
    out.flush().map_err(ExportError::from)
}
