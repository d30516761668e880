use uom::si::{angle::degree, f64::Angle};

use crate::angular::Angular;
use crate::error::Result;

/// Site coordinates for a single calculation.
///
/// Longitudes are measured *west* of the prime meridian (Golden, CO is at
/// 105.2 with a standard meridian of 105); latitude is measured north of the
/// equator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Location {
    pub longitude: Angle,
    pub standard_meridian: Angle,
    pub latitude: Angle,
}

impl Location {
    pub fn new(longitude: Angular, standard_meridian: Angular, latitude: Angular) -> Result<Self> {
        Ok(Location {
            longitude: longitude.require("longitude")?,
            standard_meridian: standard_meridian.require("standard meridian")?,
            latitude: latitude.require("latitude")?,
        })
    }

    pub fn from_degrees(longitude: f64, standard_meridian: f64, latitude: f64) -> Self {
        Location {
            longitude: Angle::new::<degree>(longitude),
            standard_meridian: Angle::new::<degree>(standard_meridian),
            latitude: Angle::new::<degree>(latitude),
        }
    }
}

/// Orientation of a vertical surface: the azimuth of its outward normal,
/// clockwise from north (east 90, south 180, west 270), normalized to [0, 360).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceAzimuth(Angle);

impl SurfaceAzimuth {
    pub fn new(azimuth: Angular) -> Result<Self> {
        let azimuth = azimuth.require("surface azimuth")?;
        Ok(Self::from_degrees(azimuth.get::<degree>()))
    }

    pub fn from_degrees(degrees: f64) -> Self {
        SurfaceAzimuth(Angle::new::<degree>(degrees.rem_euclid(360.0)))
    }

    pub fn degrees(&self) -> f64 {
        self.0.get::<degree>()
    }

    pub fn angle(&self) -> Angle {
        self.0
    }
}
