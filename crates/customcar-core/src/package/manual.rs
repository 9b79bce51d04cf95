//! Hand-written writer reproducing the legacy generator's output.
//!
//! Layout rules the downstream importer relies on:
//! - only nodes with a parent get `Properties`, `Specifications`,
//!   `SpecificationData` and `DocumentKeys`; root nodes omit them entirely
//! - with extras, `RimSize` follows `Name` (nil on root nodes) and five
//!   caster/steering flags close each node
//! - two-space indentation, every line terminated, UTF-8 without BOM

use super::{
    format_bool, format_date, format_legacy, specification_data_text, write_all, PackageWriter,
};
use crate::config::{LineEnding, PackageConfig, PackageFormat};
use crate::error::Result;
use crate::models::{ModelPackage, ModelRecord, Specification};
use quick_xml::escape::escape;
use std::io::Write;
use tracing::debug;

const NIL_ATTRS: &str =
    "xsi:nil=\"true\" xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\"";

const EXTRA_FLAGS: [&str; 5] = [
    "Caster10Degrees",
    "Caster20Degrees",
    "Caster_Adjustment",
    "SteeringLock",
    "UseTargetToMinMaxMeasurement",
];

#[derive(Debug, Clone, Copy)]
pub struct ManualXmlWriter {
    include_extras: bool,
    line_ending: LineEnding,
}

impl ManualXmlWriter {
    pub fn new() -> Self {
        Self {
            include_extras: true,
            line_ending: LineEnding::default(),
        }
    }

    pub fn include_extras(mut self, enable: bool) -> Self {
        self.include_extras = enable;
        self
    }

    pub fn line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    /// Render the whole document as text.
    pub fn render(&self, package: &ModelPackage) -> String {
        let mut doc = Lines::new(self.line_ending);
        doc.line(0, "<?xml version=\"1.0\" encoding=\"utf-8\"?>");
        doc.line(0, &format!("<{}>", PackageConfig::ROOT_ELEMENT));
        for record in package.nodes() {
            self.render_record(&mut doc, record);
        }
        doc.line(0, &format!("</{}>", PackageConfig::ROOT_ELEMENT));
        doc.finish()
    }

    fn render_record(&self, doc: &mut Lines, record: &ModelRecord) {
        doc.line(1, "<Model>");
        doc.element(2, "Name", &escape(record.name.as_str()));

        if self.include_extras {
            if record.is_root() {
                doc.nil(2, "RimSize");
            } else {
                doc.element(2, "RimSize", &PackageConfig::LEGACY_RIM_SIZE.to_string());
            }
        }

        doc.empty(2, "Pictures");
        if let Some(search_name) = record.search_name.as_deref().filter(|s| !s.is_empty()) {
            doc.element(2, "SearchName", &escape(search_name));
        }
        doc.element(2, "MinProductionDate", &format_date(&record.min_production_date));
        doc.element(2, "MaxProductionDate", &format_date(&record.max_production_date));
        doc.empty(2, "VINMasks");
        doc.nil(2, "LegacyID");
        doc.nil(2, "FirebirdID");
        doc.element(2, "LegacyType", &record.legacy_type.to_string());
        doc.element(2, "ID", &record.id.to_string());

        if !record.is_root() {
            doc.empty(2, "Properties");
            match record.specifications.as_deref() {
                Some(specs) if !specs.is_empty() => {
                    doc.line(2, "<Specifications>");
                    for spec in specs {
                        render_specification(doc, spec);
                    }
                    doc.line(2, "</Specifications>");
                }
                _ => doc.empty(2, "Specifications"),
            }
            match specification_data_text(record) {
                Some(data) => doc.element(2, "SpecificationData", &data),
                None => doc.empty(2, "SpecificationData"),
            }
            doc.empty(2, "DocumentKeys");
        }

        doc.element(2, "IsCustomModel", format_bool(record.is_custom_model));
        doc.element(2, "ParentKey", &record.parent_key.to_string());
        doc.element(2, "Deprecated", format_bool(record.deprecated));
        doc.nil(2, "LastUpdated");

        if self.include_extras {
            for flag in EXTRA_FLAGS {
                doc.element(2, flag, format_bool(false));
            }
        }

        doc.line(1, "</Model>");
    }
}

fn render_specification(doc: &mut Lines, spec: &Specification) {
    doc.line(3, "<Specification>");
    doc.element(4, "TypeKey", &spec.type_key.to_string());
    doc.element(4, "BaseSpecTypeID", &spec.base_spec_type_id.to_string());
    doc.element(4, "MinValue", &format_legacy(spec.min_value));
    doc.element(4, "MaxValue", &format_legacy(spec.max_value));
    doc.element(4, "BestValue", &format_legacy(spec.best_value));
    doc.element(4, "IsAdjustable", format_bool(spec.is_adjustable));
    doc.element(4, "ID", &spec.id.to_string());
    doc.line(3, "</Specification>");
}

impl Default for ManualXmlWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl PackageWriter for ManualXmlWriter {
    fn format(&self) -> PackageFormat {
        PackageFormat::Manual
    }

    fn write_package(&self, package: &ModelPackage, out: &mut dyn Write) -> Result<()> {
        let text = self.render(package);
        debug!("Writing manual package ({} bytes)", text.len());
        write_all(out, text.as_bytes())
    }
}

/// Line-oriented document buffer.
struct Lines {
    buf: String,
    eol: &'static str,
}

impl Lines {
    fn new(line_ending: LineEnding) -> Self {
        Self {
            buf: String::with_capacity(4096),
            eol: line_ending.as_str(),
        }
    }

    fn line(&mut self, depth: usize, text: &str) {
        for _ in 0..depth {
            self.buf.push_str("  ");
        }
        self.buf.push_str(text);
        self.buf.push_str(self.eol);
    }

    /// `text` must already be escaped.
    fn element(&mut self, depth: usize, name: &str, text: &str) {
        self.line(depth, &format!("<{name}>{text}</{name}>"));
    }

    fn empty(&mut self, depth: usize, name: &str) {
        self.line(depth, &format!("<{name} />"));
    }

    fn nil(&mut self, depth: usize, name: &str) {
        self.line(depth, &format!("<{name} {NIL_ATTRS} />"));
    }

    fn finish(self) -> String {
        self.buf
    }
}
