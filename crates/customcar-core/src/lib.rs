//! customcar-core - headless library for `.customcar` alignment packages.
//!
//! Turns a flat description of a vehicle alignment model (manufacturer,
//! model name, production dates and a handful of named specifications such
//! as camber, caster, toe and SAI) into an `ArrayOfModel` XML package for
//! the alignment database.
//!
//! The pieces, leaf to root:
//! - [`aliases`]: specification-name aliases to fixed type identifiers
//! - [`angle`]: toe conversions between millimeters at the rim and degrees
//! - [`builder`]: the model node and its manufacturer placeholder
//! - [`package`]: structured (UTF-16) and legacy manual (UTF-8) writers
//!
//! # Example
//!
//! ```rust,ignore
//! use customcar_core::{ExportRequest, Exporter, SpecificationEntry};
//!
//! fn main() -> customcar_core::Result<()> {
//!     let request = ExportRequest::new("Test")
//!         .specification(SpecificationEntry::new("camber_front_left").best(0.5));
//!
//!     let bytes = Exporter::new().generate_package(&request)?;
//!     println!("Package is {} bytes", bytes.len());
//!     Ok(())
//! }
//! ```

pub mod aliases;
pub mod angle;
pub mod builder;
pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod package;
pub mod request;
pub mod spec_data;

mod exporter;

// Re-export commonly used types
pub use aliases::{spec_types, AliasTable};
pub use builder::ModelBuilder;
pub use config::{LineEnding, PackageConfig, PackageFormat, UnitConfig};
pub use error::{ExportError, Result};
pub use exporter::{Exporter, ExporterBuilder};
pub use models::{ModelPackage, ModelRecord, Specification};
pub use package::{
    format_invariant, format_legacy, writer_for, ManualXmlWriter, PackageWriter,
    StructuredXmlWriter,
};
pub use request::{ExportRequest, SpecificationEntry};
pub use spec_data::{BinarySpecificationEncoder, SpecificationEncoder};
