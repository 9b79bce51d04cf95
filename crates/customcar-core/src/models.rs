//! Records written into an ArrayOfModel package.

use chrono::{NaiveDate, NaiveDateTime};
use uuid::Uuid;

/// Sentinel for an unset production date (`0001-01-01T00:00:00`).
pub fn unset_date() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .unwrap_or(NaiveDateTime::MIN)
}

/// A resolved alignment specification. Values are decimal degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct Specification {
    pub id: Uuid,
    pub type_key: Uuid,
    pub base_spec_type_id: i32,
    pub min_value: f64,
    pub max_value: f64,
    pub best_value: f64,
    pub is_adjustable: bool,
    pub axle: i32,
}

impl Specification {
    /// Build from a nominal value and tolerances relative to it.
    pub fn from_tolerances(type_key: Uuid, best: f64, min_tol: f64, max_tol: f64, axle: i32) -> Self {
        Self {
            id: Uuid::nil(),
            type_key,
            base_spec_type_id: 0,
            min_value: best - min_tol,
            max_value: best + max_tol,
            best_value: best,
            is_adjustable: false,
            axle,
        }
    }
}

/// One `Model` node of the package: either a vehicle model or the
/// manufacturer folder that parents it.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelRecord {
    pub id: Uuid,
    pub name: String,
    pub search_name: Option<String>,
    pub min_production_date: NaiveDateTime,
    pub max_production_date: NaiveDateTime,
    pub legacy_type: i32,
    /// Nil for root nodes.
    pub parent_key: Uuid,
    pub is_custom_model: bool,
    pub deprecated: bool,
    pub specifications: Option<Vec<Specification>>,
    /// Pre-serialized form of `specifications`, embedded verbatim.
    pub specification_data: Option<Vec<u8>>,
}

impl ModelRecord {
    /// A fresh custom record with a random identifier and unset dates.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            search_name: None,
            min_production_date: unset_date(),
            max_production_date: unset_date(),
            legacy_type: 0,
            parent_key: Uuid::nil(),
            is_custom_model: true,
            deprecated: false,
            specifications: None,
            specification_data: None,
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent_key.is_nil()
    }

    pub fn specification_count(&self) -> usize {
        self.specifications.as_ref().map_or(0, Vec::len)
    }
}

/// The two-node package: the model first, then its manufacturer.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelPackage {
    pub model: ModelRecord,
    pub manufacturer: ModelRecord,
}

impl ModelPackage {
    /// Nodes in package order.
    pub fn nodes(&self) -> [&ModelRecord; 2] {
        [&self.model, &self.manufacturer]
    }
}
