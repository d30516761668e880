//! Solar angles for building energy simulation.
//!
//! Declination, hour angle, altitude and azimuth of the sun, the angle of
//! incidence on vertical surfaces, and the direct/diffuse split of horizontal
//! irradiation, using the simplified correlations of McQuiston & Parker.
//!
//! Every function is a pure mapping from its arguments; nothing is cached
//! between calls, so sweeps over many timestamps can be split up freely.
//! Results that are physically undefined (sun below the horizon, surface
//! facing away from the sun) come back as an unvalued [`Angular`] rather than
//! an error.

pub mod angular;
pub mod error;
pub mod location;
pub mod sweep;
pub mod time;
pub mod tools;

pub use angular::Angular;
pub use error::{Error, Result};
pub use location::{Location, SurfaceAzimuth};
pub use time::{
    day_of_year, equation_of_time, local_civil_time, local_solar_time, parse_timestamp, Timestamp,
};
pub use tools::irradiation::{
    clearness_index, direct_diffuse_split, extraterrestrial_irradiation, split_for_position,
    DirectDiffuseSplit,
};
pub use tools::sun::{
    altitude_angle, azimuth_angle, daylight_window, declination_angle, hour_angle,
    DaylightWindow, SolarPosition,
};
pub use tools::surface::{
    cos_incidence, direct_radiation_for_incidence, direct_radiation_on_surface,
    solar_angle_of_incidence, wall_azimuth_angle,
};
