use crate::error::{PhError, Result};

/// Base of the empirically fitted hue → pH curve
pub const PH_CURVE_BASE: f64 = 1.55;

/// Estimate pH from a hue in half-degrees: `ln(hue) / ln(1.55)`
pub fn get_ph(hue: f64) -> Result<f64> {
    if !hue.is_finite() || hue <= 0.0 {
        return Err(PhError::NonPositiveHue { hue });
    }
    Ok(hue.ln() / PH_CURVE_BASE.ln())
}

/// Round to the single decimal reported to users
pub fn round_ph(ph: f64) -> f64 {
    (ph * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curve_anchor_points() {
        assert!((get_ph(1.55).unwrap() - 1.0).abs() < 1e-12);
        assert_eq!(get_ph(1.0).unwrap(), 0.0);
    }

    #[test]
    fn test_monotonic_in_hue() {
        let mut previous = get_ph(0.5).unwrap();
        for hue in 1..180 {
            let ph = get_ph(hue as f64).unwrap();
            assert!(ph > previous);
            previous = ph;
        }
    }

    #[test]
    fn test_non_positive_hue_is_rejected() {
        assert!(matches!(get_ph(0.0), Err(PhError::NonPositiveHue { .. })));
        assert!(matches!(get_ph(-3.0), Err(PhError::NonPositiveHue { .. })));
        assert!(get_ph(f64::NAN).is_err());
    }

    #[test]
    fn test_round_ph() {
        assert_eq!(round_ph(get_ph(45.0).unwrap()), 8.7);
        assert_eq!(round_ph(7.04), 7.0);
    }
}
