//! Construction of the two package nodes from an export request.

use crate::aliases::AliasTable;
use crate::config::PackageConfig;
use crate::error::{ExportError, Result};
use crate::models::{unset_date, ModelPackage, ModelRecord, Specification};
use crate::request::{ExportRequest, SpecificationEntry};
use crate::spec_data::SpecificationEncoder;
use tracing::debug;

/// Builds a [`ModelPackage`] from a request. Never mutates the request.
pub struct ModelBuilder<'a> {
    aliases: &'a AliasTable,
    encoder: &'a dyn SpecificationEncoder,
}

impl<'a> ModelBuilder<'a> {
    pub fn new(aliases: &'a AliasTable, encoder: &'a dyn SpecificationEncoder) -> Self {
        Self { aliases, encoder }
    }

    /// Build the model node and its manufacturer placeholder.
    ///
    /// Fails only when the model name is missing or blank. Specifications
    /// whose alias does not resolve to an allowed type are left out.
    pub fn build(&self, request: &ExportRequest) -> Result<ModelPackage> {
        let model_name = request
            .model_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or(ExportError::ModelNameRequired)?;

        let manufacturer_name = manufacturer_name(request.manufacturer_name.as_deref());
        let display_name = display_name(request.folder_name.as_deref(), model_name);

        let mut model = ModelRecord::new(display_name);
        model.search_name = Some(format!(
            "{}{}{}",
            manufacturer_name,
            PackageConfig::SEARCH_NAME_SEPARATOR,
            model.name
        ));
        model.min_production_date = request.production_start.unwrap_or_else(unset_date);
        model.max_production_date = request.production_end.unwrap_or_else(unset_date);

        let specifications = self.resolve_specifications(&request.specifications);
        if !specifications.is_empty() {
            model.specification_data = Some(self.encoder.encode(&specifications));
            model.specifications = Some(specifications);
        }

        let manufacturer = ModelRecord::new(manufacturer_name);
        model.parent_key = manufacturer.id;

        debug!(
            "Built model '{}' under '{}' with {} specification(s)",
            model.name,
            manufacturer.name,
            model.specification_count()
        );

        Ok(ModelPackage {
            model,
            manufacturer,
        })
    }

    fn resolve_specifications(&self, entries: &[SpecificationEntry]) -> Vec<Specification> {
        entries
            .iter()
            .filter_map(|entry| self.resolve_entry(entry))
            .collect()
    }

    fn resolve_entry(&self, entry: &SpecificationEntry) -> Option<Specification> {
        let Some(type_key) = self.aliases.resolve(&entry.type_key_or_alias) else {
            debug!(
                "Skipping specification '{}': alias not recognized",
                entry.type_key_or_alias
            );
            return None;
        };
        if !self.aliases.is_allowed(&type_key) {
            debug!(
                "Skipping specification '{}': type {} is not supported",
                entry.type_key_or_alias, type_key
            );
            return None;
        }

        Some(Specification::from_tolerances(
            type_key,
            entry.best.unwrap_or(0.0),
            entry.min.unwrap_or(0.0),
            entry.max.unwrap_or(0.0),
            entry.axle,
        ))
    }
}

fn manufacturer_name(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => PackageConfig::UNKNOWN_MANUFACTURER.to_string(),
    }
}

/// Prefix the model name with the folder name unless it already is.
pub fn display_name(folder_name: Option<&str>, model_name: &str) -> String {
    match folder_name.map(str::trim) {
        Some(folder) if !folder.is_empty() => {
            let prefix = format!("{} ", folder);
            if model_name.starts_with(&prefix) {
                model_name.to_string()
            } else {
                prefix + model_name
            }
        }
        _ => model_name.to_string(),
    }
}
