//! Export entry point tying the builder and package writers together.

use crate::aliases::AliasTable;
use crate::builder::ModelBuilder;
use crate::config::LineEnding;
use crate::error::Result;
use crate::models::ModelPackage;
use crate::output::atomic_write_with;
use crate::package::{writer_for, PackageWriter};
use crate::request::ExportRequest;
use crate::spec_data::{BinarySpecificationEncoder, SpecificationEncoder};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Generates `.customcar` packages from export requests.
///
/// # Example
///
/// ```rust,ignore
/// use customcar_core::{ExportRequest, Exporter, SpecificationEntry};
///
/// let exporter = Exporter::new();
/// let request = ExportRequest::new("2107")
///     .manufacturer("Lada")
///     .specification(SpecificationEntry::new("camber_front_left").best(0.5));
/// exporter.generate_to_file(&request, "lada-2107.customcar".as_ref())?;
/// ```
#[derive(Clone)]
pub struct Exporter {
    aliases: Arc<AliasTable>,
    encoder: Arc<dyn SpecificationEncoder>,
    line_ending: LineEnding,
}

impl Exporter {
    /// Exporter with the built-in aliases and default encoder.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> ExporterBuilder {
        ExporterBuilder::new()
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    /// Build the two package nodes without serializing them.
    pub fn build(&self, request: &ExportRequest) -> Result<ModelPackage> {
        ModelBuilder::new(&self.aliases, self.encoder.as_ref()).build(request)
    }

    /// The writer selected by the request's mode flags.
    pub fn writer(&self, request: &ExportRequest) -> Box<dyn PackageWriter> {
        writer_for(request.format(), request.include_extras, self.line_ending)
    }

    /// Build and serialize into a caller-owned sink.
    pub fn write_package(&self, request: &ExportRequest, out: &mut dyn Write) -> Result<()> {
        let package = self.build(request)?;
        self.writer(request).write_package(&package, out)
    }

    /// Build and serialize into memory.
    pub fn generate_package(&self, request: &ExportRequest) -> Result<Vec<u8>> {
        let package = self.build(request)?;
        self.writer(request).to_bytes(&package)
    }

    /// Build and serialize to `path`.
    ///
    /// The file only appears once fully written; on error the previous
    /// contents of `path`, if any, are kept.
    pub fn generate_to_file(&self, request: &ExportRequest, path: &Path) -> Result<()> {
        let package = self.build(request)?;
        let writer = self.writer(request);
        atomic_write_with(path, |out| writer.write_package(&package, out))?;
        info!(
            "Generated {} package {} for '{}'",
            writer.format(),
            path.display(),
            package.model.name
        );
        Ok(())
    }
}

impl Default for Exporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for configuring an [`Exporter`].
///
/// # Example
///
/// ```rust,ignore
/// let mut aliases = AliasTable::with_defaults();
/// aliases.register("neg camber", spec_types::FRONT_CAMBER_LEFT);
///
/// let exporter = Exporter::builder()
///     .aliases(aliases)
///     .line_ending(LineEnding::Lf)
///     .build();
/// ```
pub struct ExporterBuilder {
    aliases: Option<AliasTable>,
    encoder: Arc<dyn SpecificationEncoder>,
    line_ending: LineEnding,
}

impl ExporterBuilder {
    pub fn new() -> Self {
        Self {
            aliases: None,
            encoder: Arc::new(BinarySpecificationEncoder),
            line_ending: LineEnding::default(),
        }
    }

    /// Use a custom alias table.
    ///
    /// Default: the built-in table
    pub fn aliases(mut self, aliases: AliasTable) -> Self {
        self.aliases = Some(aliases);
        self
    }

    /// Use a different `SpecificationData` encoder.
    ///
    /// Default: [`BinarySpecificationEncoder`]
    pub fn encoder(mut self, encoder: impl SpecificationEncoder + 'static) -> Self {
        self.encoder = Arc::new(encoder);
        self
    }

    /// Line terminator for the manual writer.
    ///
    /// Default: CRLF
    pub fn line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    pub fn build(self) -> Exporter {
        Exporter {
            aliases: Arc::new(
                self.aliases
                    .unwrap_or_else(|| AliasTable::standard().clone()),
            ),
            encoder: self.encoder,
            line_ending: self.line_ending,
        }
    }
}

impl Default for ExporterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
