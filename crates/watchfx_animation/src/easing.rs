//! Easing curves for animations

use std::fmt;
use std::str::FromStr;

use crate::error::AnimationError;

/// Built-in interpolation curve
///
/// Every curve maps a tick position `x` in `0..=max_x` onto an output value
/// between `begin` and `end`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Curve {
    #[default]
    Linear,
    /// Quadratic deceleration toward `end`
    EaseInQuad,
    /// Quadratic acceleration away from `begin`
    EaseOutQuad,
    /// Accelerate through the first half, decelerate through the second
    EaseInOutQuad,
}

impl Curve {
    pub const ALL: [Curve; 4] = [
        Curve::Linear,
        Curve::EaseInQuad,
        Curve::EaseOutQuad,
        Curve::EaseInOutQuad,
    ];

    /// Evaluate the curve at tick position `x` of `max_x`
    pub fn apply(&self, x: f64, begin: f64, end: f64, max_x: f64) -> f64 {
        match self {
            Curve::Linear => (end - begin) / max_x * x + begin,
            Curve::EaseInQuad => {
                let rest = max_x - x;
                (begin - end) / (max_x * max_x) * rest * rest + end
            }
            Curve::EaseOutQuad => (end - begin) / (max_x * max_x) * x * x + begin,
            Curve::EaseInOutQuad => {
                let length = end - begin;
                let t = x / (max_x / 2.0);
                if t < 1.0 {
                    length / 2.0 * t * t + begin
                } else {
                    let u = t - 1.0;
                    -length / 2.0 * (u * (u - 2.0) - 1.0) + begin
                }
            }
        }
    }

    /// Numeric style id used by watch faces (`LINEAR = 0` ... `EASE_OUT_QUAD = 3`)
    pub fn id(&self) -> u8 {
        match self {
            Curve::Linear => 0,
            Curve::EaseInOutQuad => 1,
            Curve::EaseInQuad => 2,
            Curve::EaseOutQuad => 3,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Curve::Linear => "linear",
            Curve::EaseInQuad => "ease_in_quad",
            Curve::EaseOutQuad => "ease_out_quad",
            Curve::EaseInOutQuad => "ease_in_out_quad",
        }
    }
}

impl TryFrom<u8> for Curve {
    type Error = AnimationError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Curve::ALL
            .into_iter()
            .find(|curve| curve.id() == id)
            .ok_or(AnimationError::UnknownCurveId(id))
    }
}

impl FromStr for Curve {
    type Err = AnimationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Curve::ALL
            .into_iter()
            .find(|curve| curve.name() == normalized)
            .ok_or_else(|| AnimationError::UnknownCurve(s.to_string()))
    }
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_endpoints() {
        for curve in Curve::ALL {
            assert!(approx(curve.apply(0.0, 20.0, 80.0, 30.0), 20.0), "{curve} at 0");
            assert!(approx(curve.apply(30.0, 20.0, 80.0, 30.0), 80.0), "{curve} at max");
        }
    }

    #[test]
    fn test_linear_midpoint() {
        assert!(approx(Curve::Linear.apply(5.0, 0.0, 100.0, 10.0), 50.0));
    }

    #[test]
    fn test_quadratic_shapes() {
        // Ease-out starts slow, ease-in ends slow
        assert!(approx(Curve::EaseOutQuad.apply(5.0, 0.0, 100.0, 10.0), 25.0));
        assert!(approx(Curve::EaseInQuad.apply(5.0, 0.0, 100.0, 10.0), 75.0));
        assert!(approx(Curve::EaseInOutQuad.apply(5.0, 0.0, 100.0, 10.0), 50.0));
        assert!(approx(Curve::EaseInOutQuad.apply(2.5, 0.0, 100.0, 10.0), 12.5));
        assert!(approx(Curve::EaseInOutQuad.apply(7.5, 0.0, 100.0, 10.0), 87.5));
    }

    #[test]
    fn test_descending_range() {
        assert!(approx(Curve::Linear.apply(2.0, 10.0, 0.0, 10.0), 8.0));
        assert!(approx(Curve::EaseInOutQuad.apply(10.0, 10.0, 0.0, 10.0), 0.0));
    }

    #[test]
    fn test_ids_round_trip() {
        for curve in Curve::ALL {
            assert_eq!(Curve::try_from(curve.id()).unwrap(), curve);
        }
        assert_eq!(Curve::try_from(1).unwrap(), Curve::EaseInOutQuad);
        assert!(matches!(
            Curve::try_from(7),
            Err(AnimationError::UnknownCurveId(7))
        ));
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("linear".parse::<Curve>().unwrap(), Curve::Linear);
        assert_eq!("EASE-IN-OUT-QUAD".parse::<Curve>().unwrap(), Curve::EaseInOutQuad);
        assert!("bounce".parse::<Curve>().is_err());
    }
}
