//! Element-by-element XML serialization of a package.
//!
//! Every field of the schema is written for every node. Absent values
//! become `xsi:nil` elements instead of being left out. The document is
//! produced as UTF-8 through `quick-xml` and transcoded to UTF-16LE with a
//! byte-order mark on output.

use super::{
    format_bool, format_date, format_invariant, specification_data_text, write_all, PackageWriter,
};
use crate::config::{PackageConfig, PackageFormat};
use crate::error::{ExportError, Result};
use crate::models::{ModelPackage, ModelRecord, Specification};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Write;
use tracing::debug;

const UTF16LE_BOM: [u8; 2] = [0xFF, 0xFE];

#[derive(Debug, Clone, Copy, Default)]
pub struct StructuredXmlWriter;

impl StructuredXmlWriter {
    pub fn new() -> Self {
        Self
    }

    /// Render the document as text, before transcoding.
    pub fn render(&self, package: &ModelPackage) -> Result<String> {
        let mut xml = XmlEmitter::new();
        xml.emit(Event::Decl(BytesDecl::new("1.0", Some("utf-16"), None)))?;
        xml.emit(Event::Start(
            BytesStart::new(PackageConfig::ROOT_ELEMENT).with_attributes([
                ("xmlns:xsi", PackageConfig::XSI_NAMESPACE),
                ("xmlns:xsd", PackageConfig::XSD_NAMESPACE),
            ]),
        ))?;
        for record in package.nodes() {
            write_record(&mut xml, record)?;
        }
        xml.emit(Event::End(BytesEnd::new(PackageConfig::ROOT_ELEMENT)))?;
        xml.finish()
    }
}

fn write_record(xml: &mut XmlEmitter, record: &ModelRecord) -> Result<()> {
    xml.emit(Event::Start(BytesStart::new(PackageConfig::MODEL_ELEMENT)))?;
    xml.text("Name", &record.name)?;
    xml.empty("Pictures")?;
    xml.optional_text("SearchName", record.search_name.as_deref())?;
    xml.text("MinProductionDate", &format_date(&record.min_production_date))?;
    xml.text("MaxProductionDate", &format_date(&record.max_production_date))?;
    xml.empty("VINMasks")?;
    xml.nil("LegacyID")?;
    xml.nil("FirebirdID")?;
    xml.text("LegacyType", &record.legacy_type.to_string())?;
    xml.text("ID", &record.id.to_string())?;
    xml.empty("Properties")?;

    match record.specifications.as_deref() {
        Some([]) => xml.empty("Specifications")?,
        Some(specs) => {
            xml.emit(Event::Start(BytesStart::new("Specifications")))?;
            for spec in specs {
                write_specification(xml, spec)?;
            }
            xml.emit(Event::End(BytesEnd::new("Specifications")))?;
        }
        None => xml.nil("Specifications")?,
    }

    xml.optional_text("SpecificationData", specification_data_text(record).as_deref())?;
    xml.nil("DocumentKeys")?;
    xml.text("IsCustomModel", format_bool(record.is_custom_model))?;
    xml.text("ParentKey", &record.parent_key.to_string())?;
    xml.text("Deprecated", format_bool(record.deprecated))?;
    xml.nil("LastUpdated")?;
    xml.emit(Event::End(BytesEnd::new(PackageConfig::MODEL_ELEMENT)))
}

fn write_specification(xml: &mut XmlEmitter, spec: &Specification) -> Result<()> {
    xml.emit(Event::Start(BytesStart::new(PackageConfig::SPECIFICATION_ELEMENT)))?;
    xml.text("TypeKey", &spec.type_key.to_string())?;
    xml.text("BaseSpecTypeID", &spec.base_spec_type_id.to_string())?;
    xml.text("MinValue", &format_invariant(spec.min_value))?;
    xml.text("MaxValue", &format_invariant(spec.max_value))?;
    xml.text("BestValue", &format_invariant(spec.best_value))?;
    xml.text("IsAdjustable", format_bool(spec.is_adjustable))?;
    xml.text("Axle", &spec.axle.to_string())?;
    xml.text("ID", &spec.id.to_string())?;
    xml.emit(Event::End(BytesEnd::new(PackageConfig::SPECIFICATION_ELEMENT)))
}

/// Thin wrapper over an indenting `quick-xml` writer.
struct XmlEmitter {
    writer: Writer<Vec<u8>>,
}

impl XmlEmitter {
    fn new() -> Self {
        Self {
            writer: Writer::new_with_indent(Vec::new(), b' ', 2),
        }
    }

    fn emit(&mut self, event: Event<'_>) -> Result<()> {
        self.writer.write_event(event).map_err(ExportError::xml)
    }

    fn text(&mut self, name: &str, value: &str) -> Result<()> {
        self.emit(Event::Start(BytesStart::new(name)))?;
        self.emit(Event::Text(BytesText::new(value)))?;
        self.emit(Event::End(BytesEnd::new(name)))
    }

    fn optional_text(&mut self, name: &str, value: Option<&str>) -> Result<()> {
        match value {
            Some(value) => self.text(name, value),
            None => self.nil(name),
        }
    }

    fn empty(&mut self, name: &str) -> Result<()> {
        self.emit(Event::Empty(BytesStart::new(name)))
    }

    fn nil(&mut self, name: &str) -> Result<()> {
        self.emit(Event::Empty(
            BytesStart::new(name).with_attributes([("xsi:nil", "true")]),
        ))
    }

    fn finish(self) -> Result<String> {
        String::from_utf8(self.writer.into_inner()).map_err(ExportError::xml)
    }
}

/// Transcode text to UTF-16LE, prefixed with a byte-order mark.
pub fn encode_utf16le_with_bom(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(UTF16LE_BOM.len() + text.len() * 2);
    out.extend_from_slice(&UTF16LE_BOM);
    for unit in text.encode_utf16() {
        out.extend_from_slice(&unit.to_le_bytes());
    }
    out
}

impl PackageWriter for StructuredXmlWriter {
    fn format(&self) -> PackageFormat {
        PackageFormat::Structured
    }

    fn write_package(&self, package: &ModelPackage, out: &mut dyn Write) -> Result<()> {
        let text = self.render(package)?;
        let bytes = encode_utf16le_with_bom(&text);
        debug!("Writing structured package ({} bytes)", bytes.len());
        write_all(out, &bytes)
    }
}
