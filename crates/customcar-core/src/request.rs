//! Export request types.
//!
//! Field names follow the JSON documents the legacy generator consumed
//! (`ManufacturerName`, `TypeKeyOrAlias`, ...). snake_case spellings are
//! accepted as aliases.

use crate::config::PackageFormat;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{de, Deserialize, Deserializer, Serialize};

/// Axle indicator for the front axle.
pub const FRONT_AXLE: i32 = 1;

fn default_axle() -> i32 {
    FRONT_AXLE
}

fn default_true() -> bool {
    true
}

/// One requested specification, before alias resolution.
///
/// `min` and `max` are tolerances below and above `best`, not bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SpecificationEntry {
    #[serde(default, alias = "type_key_or_alias", alias = "alias")]
    pub type_key_or_alias: String,
    #[serde(default, alias = "min")]
    pub min: Option<f64>,
    #[serde(default, alias = "max")]
    pub max: Option<f64>,
    #[serde(default, alias = "best")]
    pub best: Option<f64>,
    #[serde(default = "default_axle", alias = "axle")]
    pub axle: i32,
}

impl SpecificationEntry {
    pub fn new(type_key_or_alias: impl Into<String>) -> Self {
        Self {
            type_key_or_alias: type_key_or_alias.into(),
            min: None,
            max: None,
            best: None,
            axle: FRONT_AXLE,
        }
    }

    pub fn best(mut self, value: f64) -> Self {
        self.best = Some(value);
        self
    }

    /// Set the lower and upper tolerance around `best`.
    pub fn tolerances(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    pub fn axle(mut self, axle: i32) -> Self {
        self.axle = axle;
        self
    }
}

/// Parameters for one package export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExportRequest {
    #[serde(default, alias = "manufacturer_name")]
    pub manufacturer_name: Option<String>,
    /// Prefix prepended to the model name for display.
    #[serde(default, alias = "folder_name")]
    pub folder_name: Option<String>,
    #[serde(default, alias = "model_name")]
    pub model_name: Option<String>,
    #[serde(
        default,
        alias = "production_start",
        deserialize_with = "deserialize_optional_date"
    )]
    pub production_start: Option<NaiveDateTime>,
    #[serde(
        default,
        alias = "production_end",
        deserialize_with = "deserialize_optional_date"
    )]
    pub production_end: Option<NaiveDateTime>,
    #[serde(default, alias = "specifications")]
    pub specifications: Vec<SpecificationEntry>,
    /// Use the hand-written legacy writer instead of the structured one.
    #[serde(default, alias = "use_manual_xml")]
    pub use_manual_xml: bool,
    /// Legacy-only fields (`RimSize`, caster flags) in manual mode.
    #[serde(default = "default_true", alias = "include_extras")]
    pub include_extras: bool,
}

impl ExportRequest {
    pub fn new(model_name: impl Into<String>) -> Self {
        Self {
            manufacturer_name: None,
            folder_name: None,
            model_name: Some(model_name.into()),
            production_start: None,
            production_end: None,
            specifications: Vec::new(),
            use_manual_xml: false,
            include_extras: true,
        }
    }

    pub fn manufacturer(mut self, name: impl Into<String>) -> Self {
        self.manufacturer_name = Some(name.into());
        self
    }

    pub fn folder(mut self, name: impl Into<String>) -> Self {
        self.folder_name = Some(name.into());
        self
    }

    pub fn production(mut self, start: Option<NaiveDateTime>, end: Option<NaiveDateTime>) -> Self {
        self.production_start = start;
        self.production_end = end;
        self
    }

    pub fn specification(mut self, entry: SpecificationEntry) -> Self {
        self.specifications.push(entry);
        self
    }

    pub fn manual_xml(mut self, include_extras: bool) -> Self {
        self.use_manual_xml = true;
        self.include_extras = include_extras;
        self
    }

    pub fn format(&self) -> PackageFormat {
        PackageFormat::from_manual_flag(self.use_manual_xml)
    }
}

/// Parse a request date: `YYYY-MM-DDTHH:MM:SS[.fff]` or `YYYY-MM-DD`.
pub fn parse_request_date(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => parse_request_date(text)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("invalid date '{}'", text))),
    }
}
