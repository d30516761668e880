use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use log::trace;
use uom::si::angle::degree;

use crate::error::{Error, Result};
use crate::location::Location;

/// A full calendar date plus time of day.
///
/// Bare dates (`NaiveDate`) and bare times (`NaiveTime`) don't qualify, so they
/// can't be passed where the calculations need both parts.
pub trait Timestamp: Datelike + Timelike {}

impl<T: Datelike + Timelike> Timestamp for T {}

/// Parse a local clock timestamp such as `2001-07-21T10:00:00` or
/// `2001-07-21 10:00`.
///
/// Text holding only a date or only a time is rejected instead of being padded
/// out with midnight or today's date.
pub fn parse_timestamp(text: &str) -> Result<NaiveDateTime> {
    const FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];
    let text = text.trim();
    FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .ok_or_else(|| {
            let kind = if NaiveDate::parse_from_str(text, "%Y-%m-%d").is_ok() {
                "a bare date"
            } else if NaiveTime::parse_from_str(text, "%H:%M:%S").is_ok()
                || NaiveTime::parse_from_str(text, "%H:%M").is_ok()
            {
                "a bare time"
            } else {
                "unparseable text"
            };
            Error::NotATimestamp(format!("{} ({})", text, kind))
        })
}

/// Day of year, 1 to 365 (366 in Gregorian leap years).
pub fn day_of_year<T: Timestamp>(timestamp: &T) -> u32 {
    timestamp.ordinal()
}

/// Day-of-year expressed as an angle around a 365 day orbit, in radians,
/// counted from `offset_days`.
pub(crate) fn day_angle(day_of_year: u32, offset_days: f64) -> f64 {
    ((f64::from(day_of_year) - offset_days) * (360.0 / 365.0)).to_radians()
}

/// Equation of time [minutes], the difference between solar time and mean
/// (clock) time for the day.
///
/// McQuiston's own correlation doesn't reproduce its Table 6-1, so this uses
/// `E = 9.87 sin 2B - 7.53 cos B - 1.5 sin B` with `B = (n - 81) 360/365`.
pub fn equation_of_time<T: Timestamp>(timestamp: &T) -> f64 {
    equation_of_time_for_day(day_of_year(timestamp))
}

pub(crate) fn equation_of_time_for_day(day_of_year: u32) -> f64 {
    let b = day_angle(day_of_year, 81.0);
    9.87 * (2.0 * b).sin() - 7.53 * b.cos() - 1.5 * b.sin()
}

/// Local civil time [hours]: the clock time shifted from the standard meridian
/// to the actual longitude (4 minutes per degree).
///
/// With `daylight_saving` on, the clock hour is one ahead of standard time and
/// is decremented first.
pub fn local_civil_time<T: Timestamp>(
    timestamp: &T,
    daylight_saving: bool,
    location: &Location,
) -> f64 {
    let mut civil_hour = f64::from(timestamp.hour());
    if daylight_saving {
        civil_hour -= 1.0;
    }
    let longitude_offset =
        location.longitude.get::<degree>() - location.standard_meridian.get::<degree>();
    civil_hour + f64::from(timestamp.minute()) / 60.0 + f64::from(timestamp.second()) / 3600.0
        - 4.0 * longitude_offset / 60.0
}

/// Local solar time [hours]: local civil time corrected by the equation of time.
pub fn local_solar_time<T: Timestamp>(
    timestamp: &T,
    daylight_saving: bool,
    location: &Location,
) -> f64 {
    let lct = local_civil_time(timestamp, daylight_saving, location);
    let eot = equation_of_time(timestamp);
    trace!("local civil time {:.4} h, equation of time {:.4} min", lct, eot);
    lct + eot / 60.0
}
