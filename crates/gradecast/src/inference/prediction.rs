use std::fmt;

use serde::Serialize;

/// Upper end of the GPA scale.
pub const GPA_SCALE: f64 = 4.0;

/// Map a GPA onto `[0, 1]` for progress-style display.
///
/// Out-of-scale values are clamped; NaN maps to `0.0`.
///
/// ```
/// use gradecast::inference::display_ratio;
///
/// assert_eq!(display_ratio(2.0), 0.5);
/// assert_eq!(display_ratio(5.2), 1.0);
/// assert_eq!(display_ratio(-0.3), 0.0);
/// ```
#[inline]
pub fn display_ratio(gpa: f64) -> f64 {
    if gpa.is_nan() {
        return 0.0;
    }
    (gpa / GPA_SCALE).clamp(0.0, 1.0)
}

/// Result of a successful prediction.
///
/// `gpa` is the raw model output and is not clamped; only `display_ratio`
/// is bounded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    pub gpa: f64,
    pub display_ratio: f64,
}

impl Prediction {
    pub fn from_gpa(gpa: f64) -> Self {
        Self {
            gpa,
            display_ratio: display_ratio(gpa),
        }
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Predicted Student GPA: {:.2}", self.gpa)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_clamps() {
        assert_eq!(display_ratio(5.2), 1.0);
        assert_eq!(display_ratio(-0.3), 0.0);
        assert_eq!(display_ratio(2.0), 0.5);
        assert_eq!(display_ratio(4.0), 1.0);
        assert_eq!(display_ratio(f64::INFINITY), 1.0);
        assert_eq!(display_ratio(f64::NEG_INFINITY), 0.0);
        assert_eq!(display_ratio(f64::NAN), 0.0);
    }

    #[test]
    fn gpa_is_not_clamped() {
        let p = Prediction::from_gpa(4.7);
        assert_eq!(p.gpa, 4.7);
        assert_eq!(p.display_ratio, 1.0);
    }

    #[test]
    fn display_two_decimals() {
        assert_eq!(Prediction::from_gpa(2.8761).to_string(), "Predicted Student GPA: 2.88");
        assert_eq!(Prediction::from_gpa(2.0).to_string(), "Predicted Student GPA: 2.00");
    }

    #[test]
    fn serializes_both_fields() {
        let json = serde_json::to_string(&Prediction::from_gpa(2.0)).unwrap();
        assert_eq!(json, r#"{"gpa":2.0,"display_ratio":0.5}"#);
    }
}
