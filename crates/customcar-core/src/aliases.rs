//! Specification-type alias resolution.
//!
//! Maps human-friendly specification names (`camber_front_left`,
//! `Front Camber Left`, ...) to the fixed type identifiers of the alignment
//! database. Lookup ignores case, surrounding whitespace, and any spaces,
//! hyphens, underscores or periods inside the alias.
//!
//! An [`AliasTable`] is an ordinary value: build one, register extra aliases
//! while configuring, then share it read-only with the exporter. The
//! process-wide [`AliasTable::standard`] table is never mutated.

use crate::error::{ExportError, Result};
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;
use uuid::Uuid;

/// Fixed specification type identifiers from the alignment database.
pub mod spec_types {
    use uuid::Uuid;

    pub const FRONT_CAMBER_LEFT: Uuid = Uuid::from_u128(0x918580AB_6531_435A_B63B_9929F4E06173);
    pub const FRONT_CAMBER_RIGHT: Uuid = Uuid::from_u128(0x12A0C794_2052_42CF_9308_6A3229900B8C);
    pub const FRONT_CASTER_LEFT: Uuid = Uuid::from_u128(0x29301B8E_EE21_4F0E_A515_10A52B736DE5);
    pub const FRONT_CASTER_RIGHT: Uuid = Uuid::from_u128(0x7440FE93_1D1A_4770_9E0C_1D8C5A7BA939);
    pub const FRONT_TOE_TOTAL: Uuid = Uuid::from_u128(0x2BC86976_B40D_4659_84D0_18986E7AF9D2);
    pub const FRONT_TOE_LEFT: Uuid = Uuid::from_u128(0x2BC86976_1AAD_1451_84D0_18986E7AF902);
    pub const FRONT_TOE_RIGHT: Uuid = Uuid::from_u128(0xDDDD6916_0AAD_1451_84D0_18986E7AF902);
    pub const FRONT_SAI_LEFT: Uuid = Uuid::from_u128(0xC55DF4A3_6889_4C68_BB35_C2C8C4CC0979);
    pub const FRONT_SAI_RIGHT: Uuid = Uuid::from_u128(0xB2A5CF5D_23B2_449A_A9B7_7EB6C85E5C7F);
    /// Shared by the left and right rear wheels.
    pub const REAR_CAMBER: Uuid = Uuid::from_u128(0xC6241905_C753_48C9_9DE0_5E58D4DBB9D9);
    /// Uncontrolled total toe on the rear axle.
    pub const REAR_TOE_TOTAL: Uuid = Uuid::from_u128(0xAB546991_BE46_4CB9_BDF0_1A2EEF649AE1);

    /// Every type the package format accepts.
    pub const ALLOWED: [Uuid; 11] = [
        FRONT_CAMBER_LEFT,
        FRONT_CAMBER_RIGHT,
        FRONT_CASTER_LEFT,
        FRONT_CASTER_RIGHT,
        FRONT_TOE_TOTAL,
        FRONT_TOE_LEFT,
        FRONT_TOE_RIGHT,
        FRONT_SAI_LEFT,
        FRONT_SAI_RIGHT,
        REAR_CAMBER,
        REAR_TOE_TOTAL,
    ];
}

/// Built-in aliases. Each type has an axle-first and a measurement-first
/// spelling.
const BUILTIN_ALIASES: &[(&str, Uuid)] = &[
    ("camber_front_left", spec_types::FRONT_CAMBER_LEFT),
    ("camber_front_right", spec_types::FRONT_CAMBER_RIGHT),
    ("caster_front_left", spec_types::FRONT_CASTER_LEFT),
    ("caster_front_right", spec_types::FRONT_CASTER_RIGHT),
    ("toe_front_total", spec_types::FRONT_TOE_TOTAL),
    ("toe_front_left", spec_types::FRONT_TOE_LEFT),
    ("toe_front_right", spec_types::FRONT_TOE_RIGHT),
    ("sai_front_left", spec_types::FRONT_SAI_LEFT),
    ("sai_front_right", spec_types::FRONT_SAI_RIGHT),
    ("camber_rear_left", spec_types::REAR_CAMBER),
    ("camber_rear_right", spec_types::REAR_CAMBER),
    ("toe_rear_total", spec_types::REAR_TOE_TOTAL),
    ("front_camber_left", spec_types::FRONT_CAMBER_LEFT),
    ("front_camber_right", spec_types::FRONT_CAMBER_RIGHT),
    ("front_caster_left", spec_types::FRONT_CASTER_LEFT),
    ("front_caster_right", spec_types::FRONT_CASTER_RIGHT),
    ("front_toe_total", spec_types::FRONT_TOE_TOTAL),
    ("front_toe_left", spec_types::FRONT_TOE_LEFT),
    ("front_toe_right", spec_types::FRONT_TOE_RIGHT),
    ("front_sai_left", spec_types::FRONT_SAI_LEFT),
    ("front_sai_right", spec_types::FRONT_SAI_RIGHT),
    ("rear_camber_left", spec_types::REAR_CAMBER),
    ("rear_camber_right", spec_types::REAR_CAMBER),
    ("rear_toe_total", spec_types::REAR_TOE_TOTAL),
];

/// Characters ignored when comparing aliases.
static IGNORED_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \-_.]").expect("static regex is valid"));

static STANDARD: LazyLock<AliasTable> = LazyLock::new(AliasTable::with_defaults);

/// Normalize an alias for lookup.
///
/// # Examples
///
/// ```
/// use customcar_core::aliases::normalize_alias;
///
/// assert_eq!(normalize_alias(" Camber_Front-Left "), "camberfrontleft");
/// assert_eq!(normalize_alias("toe.rear total"), "toereartotal");
/// ```
pub fn normalize_alias(value: &str) -> String {
    if value.trim().is_empty() {
        return String::new();
    }
    let lowered = value.trim().to_lowercase();
    IGNORED_CHARS.replace_all(&lowered, "").into_owned()
}

/// Parse a non-nil identifier literal.
///
/// Hyphenated, simple, braced and URN forms are accepted.
pub fn parse_identifier(value: &str) -> Option<Uuid> {
    Uuid::try_parse(value.trim()).ok().filter(|id| !id.is_nil())
}

/// Alias-to-identifier table plus the allow-list of identifiers that may
/// appear in a package.
#[derive(Debug, Clone)]
pub struct AliasTable {
    aliases: HashMap<String, Uuid>,
    allowed: HashSet<Uuid>,
}

impl AliasTable {
    /// Table seeded with the built-in aliases and allow-list.
    pub fn with_defaults() -> Self {
        let aliases = BUILTIN_ALIASES
            .iter()
            .map(|(alias, id)| (normalize_alias(alias), *id))
            .collect();
        Self {
            aliases,
            allowed: spec_types::ALLOWED.into_iter().collect(),
        }
    }

    /// Shared read-only table with the built-in aliases.
    pub fn standard() -> &'static AliasTable {
        &STANDARD
    }

    /// Register or override an alias.
    ///
    /// Returns `false` without touching the table when the identifier is nil
    /// or the alias normalizes to nothing. Registration never widens the
    /// allow-list.
    pub fn register(&mut self, alias: &str, id: Uuid) -> bool {
        self.try_register(alias, id).is_ok()
    }

    /// Register or override an alias, reporting why a registration is
    /// rejected.
    pub fn try_register(&mut self, alias: &str, id: Uuid) -> Result<()> {
        if id.is_nil() {
            return Err(ExportError::Validation {
                field: "identifier".to_string(),
                message: format!("alias '{}' maps to the nil identifier", alias),
            });
        }
        let key = normalize_alias(alias);
        if key.is_empty() {
            return Err(ExportError::Validation {
                field: "alias".to_string(),
                message: format!("alias '{}' is empty after normalization", alias),
            });
        }
        self.aliases.insert(key, id);
        Ok(())
    }

    /// Resolve an alias or identifier literal.
    ///
    /// A valid non-nil identifier literal is returned as-is without
    /// consulting the table.
    pub fn resolve(&self, key: &str) -> Option<Uuid> {
        if key.trim().is_empty() {
            return None;
        }
        if let Some(id) = parse_identifier(key) {
            return Some(id);
        }
        self.aliases.get(&normalize_alias(key)).copied()
    }

    /// Whether `id` may be written to a package.
    pub fn is_allowed(&self, id: &Uuid) -> bool {
        self.allowed.contains(id)
    }

    pub fn allowed(&self) -> &HashSet<Uuid> {
        &self.allowed
    }

    /// Number of registered aliases.
    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

impl Default for AliasTable {
    fn default() -> Self {
        Self::with_defaults()
    }
}
