// Solar position after Chapter 6 of
//   McQuiston, F.C. and J.D. Parker. 1998.
//   Heating, Ventilating, and Air Conditioning Analysis and Design, Third Edition.
//   John Wiley and Sons, New York.
//
// Conventions used throughout:
// - hour angle is negative before solar noon and positive after
// - solar azimuth is measured clockwise from north (east 90, south 180, west 270)

use chrono::{Duration, NaiveDate};
use itertools::Itertools;
use log::{debug, trace};
use uom::si::angle::radian;

use super::{acos_clamped, asin_clamped};
use crate::angular::Angular;
use crate::location::Location;
use crate::time::{self, day_angle, day_of_year, equation_of_time_for_day, Timestamp};

/// Everything about the sun's position at one instant and place.
///
/// The free functions below ([`altitude_angle`], [`azimuth_angle`], ...) each
/// compute one of these fields; use this when several are needed at once.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolarPosition {
    pub day_of_year: u32,
    /// [minutes]
    pub equation_of_time: f64,
    /// [hours]
    pub local_solar_time: f64,
    pub declination: Angular,
    pub hour_angle: Angular,
    pub altitude: Angular,
    /// Unvalued while the sun is at or below the horizon.
    pub azimuth: Angular,
}

impl SolarPosition {
    pub fn calculate<T: Timestamp>(timestamp: &T, daylight_saving: bool, location: &Location) -> Self {
        let day_of_year = day_of_year(timestamp);
        let equation_of_time = equation_of_time_for_day(day_of_year);
        let local_solar_time = time::local_civil_time(timestamp, daylight_saving, location)
            + equation_of_time / 60.0;

        let declination = declination_for_day(day_of_year).to_radians();
        let hour_angle = hour_angle_for_solar_time(local_solar_time).to_radians();
        let latitude = location.latitude.get::<radian>();
        let altitude = altitude(latitude, declination, hour_angle);
        let azimuth = azimuth(latitude, declination, hour_angle, altitude);
        trace!(
            "day {} solar time {:.4} h: declination {:.4} rad, hour angle {:.4} rad, altitude {:.4} rad, azimuth {}",
            day_of_year,
            local_solar_time,
            declination,
            hour_angle,
            altitude,
            azimuth
        );

        SolarPosition {
            day_of_year,
            equation_of_time,
            local_solar_time,
            declination: Angular::from_radians(declination),
            hour_angle: Angular::from_radians(hour_angle),
            altitude: Angular::from_radians(altitude),
            azimuth,
        }
    }

    pub fn is_sun_up(&self) -> bool {
        self.altitude.degrees().map_or(false, |a| a > 0.0)
    }
}

/// Solar declination: the angle between the earth-sun line and the equatorial
/// plane. Always valued.
pub fn declination_angle<T: Timestamp>(timestamp: &T) -> Angular {
    Angular::from_degrees(declination_for_day(day_of_year(timestamp)))
}

/// Seven term Fourier fit of the declination [degrees].
fn declination_for_day(day_of_year: u32) -> f64 {
    let g = day_angle(day_of_year, 1.0);
    0.3963723 - 22.9132745 * g.cos() + 4.0254304 * g.sin() - 0.387205 * (2.0 * g).cos()
        + 0.05196728 * (2.0 * g).sin()
        - 0.1545267 * (3.0 * g).cos()
        + 0.08479777 * (3.0 * g).sin()
}

/// Hour angle: 15 degrees per hour away from local solar noon, negative in the
/// morning. Always valued.
pub fn hour_angle<T: Timestamp>(timestamp: &T, daylight_saving: bool, location: &Location) -> Angular {
    let solar_time = time::local_solar_time(timestamp, daylight_saving, location);
    Angular::from_degrees(hour_angle_for_solar_time(solar_time))
}

fn hour_angle_for_solar_time(local_solar_time: f64) -> f64 {
    15.0 * (local_solar_time - 12.0)
}

/// Solar altitude: the angle between the sun's rays and the horizontal plane.
/// Negative while the sun is down.
pub fn altitude_angle<T: Timestamp>(
    timestamp: &T,
    daylight_saving: bool,
    location: &Location,
) -> Angular {
    SolarPosition::calculate(timestamp, daylight_saving, location).altitude
}

/// Solar azimuth, clockwise from north. Unvalued when the sun is at or below
/// the horizon.
pub fn azimuth_angle<T: Timestamp>(
    timestamp: &T,
    daylight_saving: bool,
    location: &Location,
) -> Angular {
    SolarPosition::calculate(timestamp, daylight_saving, location).azimuth
}

/// All arguments and the result in radians.
fn altitude(latitude: f64, declination: f64, hour_angle: f64) -> f64 {
    asin_clamped(
        latitude.cos() * declination.cos() * hour_angle.cos() + latitude.sin() * declination.sin(),
    )
}

fn azimuth(latitude: f64, declination: f64, hour_angle: f64, altitude: f64) -> Angular {
    if altitude <= 0.0 {
        debug!("sun is down (altitude {:.4} rad), azimuth undefined", altitude);
        return Angular::unvalued();
    }
    let acos_from_south = acos_clamped(
        (altitude.sin() * latitude.sin() - declination.sin()) / (altitude.cos() * latitude.cos()),
    );
    // acos alone can't tell a morning bearing from an afternoon one
    let from_south = if hour_angle < 0.0 {
        acos_from_south
    } else {
        -acos_from_south
    };
    Angular::from_radians(std::f64::consts::PI - from_south)
}

/// Sunrise and sunset as local clock hours of one day.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DaylightWindow {
    pub sunrise: f64,
    pub sunset: f64,
}

impl DaylightWindow {
    /// [hours]
    pub fn length(&self) -> f64 {
        self.sunset - self.sunrise
    }
}

/// Estimate sunrise and sunset for a day by sampling the altitude every clock
/// hour and interpolating linearly where it crosses the horizon.
///
/// Returns `None` when the sun doesn't both rise and set within the day
/// (polar day or polar night).
pub fn daylight_window(
    date: NaiveDate,
    daylight_saving: bool,
    location: &Location,
) -> Option<DaylightWindow> {
    let midnight = date.and_hms_opt(0, 0, 0)?;
    let samples = (0..=24).map(|hour| {
        let timestamp = midnight + Duration::hours(hour);
        let altitude = altitude_angle(&timestamp, daylight_saving, location);
        (hour as f64, altitude.degrees().unwrap_or(f64::NAN))
    });

    let mut sunrise = None;
    let mut sunset = None;
    for ((hour, before), (_, after)) in samples.tuple_windows() {
        if sunrise.is_none() && before <= 0.0 && after > 0.0 {
            sunrise = Some(hour + before / (before - after));
        }
        if before > 0.0 && after <= 0.0 {
            sunset = Some(hour + before / (before - after));
        }
    }

    match (sunrise, sunset) {
        (Some(sunrise), Some(sunset)) => Some(DaylightWindow { sunrise, sunset }),
        _ => {
            debug!("no sunrise/sunset on {} at {:?}", date, location);
            None
        }
    }
}
