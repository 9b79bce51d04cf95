//! Centralized configuration for the customcar exporter.
//!
//! Fixed constants of the ArrayOfModel package schema and unit conversion,
//! plus the small enums that select output behaviour.

/// Package schema constants.
pub struct PackageConfig;

impl PackageConfig {
    pub const ROOT_ELEMENT: &'static str = "ArrayOfModel";
    pub const MODEL_ELEMENT: &'static str = "Model";
    pub const SPECIFICATION_ELEMENT: &'static str = "Specification";
    pub const XSI_NAMESPACE: &'static str = "http://www.w3.org/2001/XMLSchema-instance";
    pub const XSD_NAMESPACE: &'static str = "http://www.w3.org/2001/XMLSchema";
    pub const FILE_EXTENSION: &'static str = "customcar";
    pub const UNKNOWN_MANUFACTURER: &'static str = "Unknown";
    pub const SEARCH_NAME_SEPARATOR: char = '>';
    /// Rim size written for model nodes when legacy extras are enabled.
    pub const LEGACY_RIM_SIZE: u32 = 14;
    /// Date layout used by the legacy manual writer.
    pub const DATE_FORMAT: &'static str = "%Y-%m-%dT%H:%M:%S";
}

/// Unit conversion constants.
pub struct UnitConfig;

impl UnitConfig {
    pub const MM_PER_INCH: f64 = 25.4;
    pub const DEG_PER_RAD: f64 = 180.0 / std::f64::consts::PI;
}

/// Serialization strategy for a package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackageFormat {
    /// Field-by-field XML, UTF-16LE with BOM, indented.
    Structured,
    /// Hand-written legacy layout, UTF-8 without BOM.
    Manual,
}

impl PackageFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            PackageFormat::Structured => "structured",
            PackageFormat::Manual => "manual",
        }
    }

    /// Map the request's `UseManualXml` flag to a format.
    pub fn from_manual_flag(use_manual_xml: bool) -> Self {
        if use_manual_xml {
            PackageFormat::Manual
        } else {
            PackageFormat::Structured
        }
    }
}

impl Default for PackageFormat {
    fn default() -> Self {
        PackageFormat::Structured
    }
}

impl std::fmt::Display for PackageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Line terminator used by the manual writer.
///
/// The legacy tool ran on Windows, so its files end every line with CRLF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineEnding {
    CrLf,
    Lf,
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::CrLf => "\r\n",
            LineEnding::Lf => "\n",
        }
    }
}

impl Default for LineEnding {
    fn default() -> Self {
        LineEnding::CrLf
    }
}
