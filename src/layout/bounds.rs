//! Physical plausibility bounds.
//!
//! A reading outside its bounds is not an error; it is replaced with NaN and the
//! rest of the record is kept.

/// Inclusive range of plausible values for a reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Bounds { min, max }
    }

    /// Returns `value` if it is within bounds, otherwise NaN. NaN is passed through.
    #[must_use]
    pub fn check(self, value: f64) -> f64 {
        if value < self.min || value > self.max {
            f64::NAN
        } else {
            value
        }
    }

    /// Check every value in `values`.
    #[must_use]
    pub fn check_all<const N: usize>(self, values: [f64; N]) -> [f64; N] {
        values.map(|v| self.check(v))
    }
}

/// GPS latitude, degrees.
pub const LATITUDE: Bounds = Bounds::new(-90.0, 90.0);
/// GPS longitude, degrees.
pub const LONGITUDE: Bounds = Bounds::new(-180.0, 180.0);
/// Seawater temperature, degC.
pub const SEAWATER_TEMPERATURE: Bounds = Bounds::new(-5.0, 40.0);
/// Seawater conductivity, S/m.
pub const CONDUCTIVITY: Bounds = Bounds::new(2.0, 7.0);
/// Pressure of the CTD reported with the surface met packet, dbar.
pub const MET_CTD_PRESSURE: Bounds = Bounds::new(0.0, 10.0);
/// Pressure of the CTD sub-records, dbar.
pub const CTD_PRESSURE: Bounds = Bounds::new(-10.0, 10.0);
/// Shortwave radiation, W/m^2.
pub const SHORTWAVE: Bounds = Bounds::new(-5.0, 2000.0);
/// Longwave radiation, W/m^2.
pub const LONGWAVE: Bounds = Bounds::new(200.0, 500.0);
/// Current profile velocity and wave spectrum bins.
pub const BIN: Bounds = Bounds::new(-5000.0, 5000.0);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check() {
        assert!(LATITUDE.check(95.0).is_nan());
        assert!(LATITUDE.check(-90.5).is_nan());
        assert_eq!(LATITUDE.check(45.0), 45.0);
        assert_eq!(LATITUDE.check(90.0), 90.0);
        assert!(CONDUCTIVITY.check(1.5).is_nan());
        assert_eq!(CONDUCTIVITY.check(5.0), 5.0);
        assert!(CONDUCTIVITY.check(f64::NAN).is_nan());
    }

    #[test]
    fn check_all() {
        let got = BIN.check_all([0.0, 5000.0, 5000.5, -6000.0]);
        assert_eq!(got[0], 0.0);
        assert_eq!(got[1], 5000.0);
        assert!(got[2].is_nan());
        assert!(got[3].is_nan());
    }
}
