use std::fmt;

use txd_common::{Result, TxdError};

/// Domain the trip-distance slider operates over, in miles.
pub const DISTANCE_DOMAIN_MIN: f64 = 0.0;
pub const DISTANCE_DOMAIN_MAX: f64 = 50.0;

/// A closed interval `[low, high]` over `trip_distance`.
///
/// Each user interaction replaces the previous filter wholesale; there is no
/// merging and no history. Boundary values are matched inclusively on both
/// ends by every query built from this filter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeFilter {
    low: f64,
    high: f64,
}

impl RangeFilter {
    pub fn new(low: f64, high: f64) -> Result<Self> {
        if !low.is_finite() || !high.is_finite() {
            return Err(TxdError::InvalidConfig(format!(
                "filter bounds must be finite, got [{low}, {high}]"
            )));
        }
        if low > high {
            return Err(TxdError::InvalidConfig(format!(
                "filter low {low} exceeds high {high}"
            )));
        }
        if low < DISTANCE_DOMAIN_MIN || high > DISTANCE_DOMAIN_MAX {
            return Err(TxdError::InvalidConfig(format!(
                "filter [{low}, {high}] outside distance domain [{DISTANCE_DOMAIN_MIN}, {DISTANCE_DOMAIN_MAX}]"
            )));
        }
        Ok(Self { low, high })
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }
}

impl fmt::Display for RangeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}] miles", self.low, self.high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ordered_bounds_within_domain() {
        let filter = RangeFilter::new(0.0, 20.0).expect("valid filter");
        assert_eq!(filter.low(), 0.0);
        assert_eq!(filter.high(), 20.0);
        assert!(RangeFilter::new(50.0, 50.0).is_ok());
    }

    #[test]
    fn rejects_inverted_bounds() {
        assert!(matches!(
            RangeFilter::new(10.0, 5.0),
            Err(TxdError::InvalidConfig(_))
        ));
    }

    #[test]
    fn rejects_bounds_outside_domain() {
        assert!(RangeFilter::new(-1.0, 20.0).is_err());
        assert!(RangeFilter::new(0.0, 50.1).is_err());
    }

    #[test]
    fn rejects_non_finite_bounds() {
        assert!(RangeFilter::new(f64::NAN, 20.0).is_err());
        assert!(RangeFilter::new(0.0, f64::INFINITY).is_err());
    }
}
