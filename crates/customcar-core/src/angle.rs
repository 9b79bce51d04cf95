//! Toe and angle conversions.
//!
//! Angles are always decimal degrees. Toe in millimeters is measured at the
//! edge of the wheel rim, so the rim diameter in inches is the lever arm:
//!
//! ```text
//! rim_mm          = rim_inches * 25.4
//! per_wheel_deg   = atan(mm / rim_mm)
//! total_deg       = 2 * atan((total_mm / 2) / rim_mm)
//! ```
//!
//! Millimeter-to-degree conversions return `0.0` for a non-positive rim.
//! Degree-to-millimeter conversions are not clamped.

use crate::config::UnitConfig;

fn rim_mm(rim_diameter_inches: f64) -> f64 {
    rim_diameter_inches * UnitConfig::MM_PER_INCH
}

/// Identity helper for values that are already decimal degrees.
pub fn degrees_decimal(degrees: f64) -> f64 {
    degrees
}

/// Toe of a single wheel in millimeters to degrees.
pub fn toe_mm_to_degrees_per_wheel(mm: f64, rim_diameter_inches: f64) -> f64 {
    let rim = rim_mm(rim_diameter_inches);
    if rim <= 0.0 {
        return 0.0;
    }
    (mm / rim).atan() * UnitConfig::DEG_PER_RAD
}

/// Total axle toe in millimeters to total degrees.
pub fn toe_mm_to_total_degrees(total_mm: f64, rim_diameter_inches: f64) -> f64 {
    let rim = rim_mm(rim_diameter_inches);
    if rim <= 0.0 {
        return 0.0;
    }
    2.0 * ((total_mm * 0.5) / rim).atan() * UnitConfig::DEG_PER_RAD
}

/// Single wheel angle in degrees to toe in millimeters.
pub fn degrees_to_toe_mm_per_wheel(angle_deg: f64, rim_diameter_inches: f64) -> f64 {
    (angle_deg / UnitConfig::DEG_PER_RAD).tan() * rim_mm(rim_diameter_inches)
}

/// Total axle angle in degrees to total toe in millimeters.
pub fn total_degrees_to_toe_mm(total_angle_deg: f64, rim_diameter_inches: f64) -> f64 {
    let half_rad = (total_angle_deg * 0.5) / UnitConfig::DEG_PER_RAD;
    2.0 * half_rad.tan() * rim_mm(rim_diameter_inches)
}

/// How a toe value is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToeScope {
    PerWheel,
    Total,
}

impl ToeScope {
    pub fn mm_to_degrees(self, mm: f64, rim_diameter_inches: f64) -> f64 {
        match self {
            ToeScope::PerWheel => toe_mm_to_degrees_per_wheel(mm, rim_diameter_inches),
            ToeScope::Total => toe_mm_to_total_degrees(mm, rim_diameter_inches),
        }
    }

    pub fn degrees_to_mm(self, degrees: f64, rim_diameter_inches: f64) -> f64 {
        match self {
            ToeScope::PerWheel => degrees_to_toe_mm_per_wheel(degrees, rim_diameter_inches),
            ToeScope::Total => total_degrees_to_toe_mm(degrees, rim_diameter_inches),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_per_wheel_roundtrip() {
        let deg = toe_mm_to_degrees_per_wheel(3.0, 14.0);
        assert!((degrees_to_toe_mm_per_wheel(deg, 14.0) - 3.0).abs() < EPS);
    }

    #[test]
    fn test_total_roundtrip() {
        let deg = toe_mm_to_total_degrees(3.0, 14.0);
        assert!((total_degrees_to_toe_mm(deg, 14.0) - 3.0).abs() < EPS);
    }

    #[test]
    fn test_known_value() {
        // 3 mm over a 355.6 mm rim
        let expected = (3.0_f64 / 355.6).atan().to_degrees();
        assert!((toe_mm_to_degrees_per_wheel(3.0, 14.0) - expected).abs() < EPS);
        assert!((toe_mm_to_degrees_per_wheel(3.0, 14.0) - 0.48336).abs() < 1e-4);
    }

    #[test]
    fn test_total_is_not_twice_per_wheel() {
        let total = toe_mm_to_total_degrees(6.0, 15.0);
        let twice_half = 2.0 * toe_mm_to_degrees_per_wheel(3.0, 15.0);
        assert!((total - twice_half).abs() < EPS);
        assert!((total - toe_mm_to_degrees_per_wheel(6.0, 15.0)).abs() > 1e-6);
    }

    #[test]
    fn test_degenerate_rim_returns_zero() {
        assert_eq!(toe_mm_to_degrees_per_wheel(3.0, 0.0), 0.0);
        assert_eq!(toe_mm_to_degrees_per_wheel(3.0, -14.0), 0.0);
        assert_eq!(toe_mm_to_total_degrees(3.0, 0.0), 0.0);
        assert_eq!(toe_mm_to_total_degrees(3.0, -1.0), 0.0);
    }

    #[test]
    fn test_negative_toe_is_symmetric() {
        let out = toe_mm_to_degrees_per_wheel(-2.0, 16.0);
        let inward = toe_mm_to_degrees_per_wheel(2.0, 16.0);
        assert!((out + inward).abs() < EPS);
    }

    #[test]
    fn test_scope_dispatch() {
        for scope in [ToeScope::PerWheel, ToeScope::Total] {
            let deg = scope.mm_to_degrees(4.5, 17.0);
            assert!((scope.degrees_to_mm(deg, 17.0) - 4.5).abs() < EPS);
        }
        assert_eq!(degrees_decimal(1.25), 1.25);
    }
}
