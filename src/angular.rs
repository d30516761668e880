use std::fmt;

use uom::si::{angle::radian, f64::Angle};

use crate::error::{Error, Result};

/// Largest disagreement [degrees] tolerated when both representations are given.
const AGREEMENT_TOLERANCE: f64 = 0.01;

/// An angle carried in both radians and degrees, or no angle at all.
///
/// An unvalued instance means "undefined for this situation" (e.g. the solar
/// azimuth while the sun is down). It is neither zero nor an error, and every
/// calculation that consumes it yields another unvalued result.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Angular {
    value: Option<Value>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Value {
    radians: f64,
    degrees: f64,
}

impl Angular {
    pub fn from_radians(radians: f64) -> Self {
        if !radians.is_finite() {
            return Self::unvalued();
        }
        Angular {
            value: Some(Value {
                radians,
                degrees: radians.to_degrees(),
            }),
        }
    }

    pub fn from_degrees(degrees: f64) -> Self {
        if !degrees.is_finite() {
            return Self::unvalued();
        }
        Angular {
            value: Some(Value {
                radians: degrees.to_radians(),
                degrees,
            }),
        }
    }

    pub fn from_angle(angle: Angle) -> Self {
        Self::from_radians(angle.get::<radian>())
    }

    pub fn unvalued() -> Self {
        Angular { value: None }
    }

    /// Build from either representation, both, or neither.
    ///
    /// When both are given they are kept verbatim, provided they agree to
    /// within 0.01 degrees.
    pub fn try_new(radians: Option<f64>, degrees: Option<f64>) -> Result<Self> {
        match (radians, degrees) {
            (None, None) => Ok(Self::unvalued()),
            (Some(radians), None) => Ok(Self::from_radians(radians)),
            (None, Some(degrees)) => Ok(Self::from_degrees(degrees)),
            (Some(radians), Some(degrees)) => {
                if !((radians.to_degrees() - degrees).abs() <= AGREEMENT_TOLERANCE) {
                    return Err(Error::InconsistentAngle { radians, degrees });
                }
                Ok(Angular {
                    value: Some(Value { radians, degrees }),
                })
            }
        }
    }

    pub fn is_valued(&self) -> bool {
        self.value.is_some()
    }

    pub fn radians(&self) -> Option<f64> {
        self.value.map(|v| v.radians)
    }

    pub fn degrees(&self) -> Option<f64> {
        self.value.map(|v| v.degrees)
    }

    pub fn angle(&self) -> Option<Angle> {
        self.radians().map(|r| Angle::new::<radian>(r))
    }

    /// Unwrap the angle of a caller-supplied input, naming it in the error.
    pub(crate) fn require(&self, name: &'static str) -> Result<Angle> {
        self.angle().ok_or(Error::UnvaluedInput(name))
    }
}

impl From<Angle> for Angular {
    fn from(angle: Angle) -> Self {
        Self::from_angle(angle)
    }
}

impl fmt::Display for Angular {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Some(v) => write!(f, "{:.3}°", v.degrees),
            None => write!(f, "unvalued"),
        }
    }
}
