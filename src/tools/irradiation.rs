use log::{debug, trace};
use uom::si::{f64::HeatFluxDensity, heat_flux_density::watt_per_square_meter};

use super::sun::SolarPosition;
use crate::angular::Angular;
use crate::location::Location;
use crate::time::Timestamp;

const SOLAR_CONST: f64 = 1367.0; // W/m^2

// Skartveit & Olseth fit constants
const OVERCAST_CLEARNESS: f64 = 0.22;
const MAX_BEAM_TRANSMITTANCE_BASE: f64 = 0.81;

/// Global horizontal irradiation split into its beam and sky parts.
/// The two always sum to the (possibly clamped) input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectDiffuseSplit {
    pub direct: HeatFluxDensity,
    pub diffuse: HeatFluxDensity,
}

impl DirectDiffuseSplit {
    fn watts(direct: f64, diffuse: f64) -> Self {
        DirectDiffuseSplit {
            direct: HeatFluxDensity::new::<watt_per_square_meter>(direct),
            diffuse: HeatFluxDensity::new::<watt_per_square_meter>(diffuse),
        }
    }

    pub fn total(&self) -> HeatFluxDensity {
        self.direct + self.diffuse
    }
}

/// Extraterrestrial irradiation for the day, corrected for the earth-sun
/// distance and projected with the sun's altitude.
pub fn extraterrestrial_irradiation(day_of_year: u32, altitude: &Angular) -> Option<HeatFluxDensity> {
    let altitude = altitude.radians()?;
    let eccentricity = 1.0 + 0.033 * (360.0 * f64::from(day_of_year) / 365.0).to_radians().cos();
    Some(HeatFluxDensity::new::<watt_per_square_meter>(
        SOLAR_CONST * eccentricity * altitude.cos(),
    ))
}

/// Ratio of measured to extraterrestrial irradiation, capped at 1.
pub fn clearness_index(
    day_of_year: u32,
    altitude: &Angular,
    global_horizontal: HeatFluxDensity,
) -> Option<f64> {
    let extraterrestrial = extraterrestrial_irradiation(day_of_year, altitude)?;
    let ratio = global_horizontal.get::<watt_per_square_meter>()
        / extraterrestrial.get::<watt_per_square_meter>();
    Some(ratio.min(1.0))
}

/// Split global horizontal irradiation into direct and diffuse parts for the
/// sun position at `timestamp`.
pub fn direct_diffuse_split<T: Timestamp>(
    timestamp: &T,
    daylight_saving: bool,
    location: &Location,
    global_horizontal: HeatFluxDensity,
) -> DirectDiffuseSplit {
    let position = SolarPosition::calculate(timestamp, daylight_saving, location);
    split_for_position(position.day_of_year, &position.altitude, global_horizontal)
}

/// Skartveit & Olseth diffuse fraction model, keyed on the clearness index and
/// the solar altitude.
///
/// - sun down (or altitude unknown): everything is diffuse
/// - no irradiation: nothing to split
/// - measured above the extraterrestrial ceiling: clamped to the ceiling
pub fn split_for_position(
    day_of_year: u32,
    altitude: &Angular,
    global_horizontal: HeatFluxDensity,
) -> DirectDiffuseSplit {
    let total = global_horizontal.get::<watt_per_square_meter>();
    let altitude_deg = match altitude.degrees() {
        Some(a) if a > 0.0 => a,
        _ => {
            debug!("sun is down, {:.2} W/m^2 treated as diffuse", total);
            return DirectDiffuseSplit::watts(0.0, total);
        }
    };
    if total <= 0.0 {
        return DirectDiffuseSplit::watts(0.0, 0.0);
    }

    let extraterrestrial = match extraterrestrial_irradiation(day_of_year, altitude) {
        Some(e) => e.get::<watt_per_square_meter>(),
        None => return DirectDiffuseSplit::watts(0.0, total),
    };
    let mut total = total;
    let mut clearness = total / extraterrestrial;
    if clearness > 1.0 {
        debug!(
            "{:.2} W/m^2 exceeds the extraterrestrial {:.2} W/m^2, clamping",
            total, extraterrestrial
        );
        clearness = 1.0;
        total = extraterrestrial;
    }

    let diffuse_fraction = SkartveitOlseth::new(altitude_deg).diffuse_fraction(clearness);
    trace!(
        "clearness {:.4} at altitude {:.2} deg: diffuse fraction {:.4}",
        clearness,
        altitude_deg,
        diffuse_fraction
    );
    let diffuse = total * diffuse_fraction;
    DirectDiffuseSplit::watts(total - diffuse, diffuse)
}

/// Breakpoints of the piecewise model for one solar altitude.
struct SkartveitOlseth {
    k1: f64,
    k2: f64,
    k_max: f64,
    d1: f64,
    d2: f64,
    d_max: f64,
}

impl SkartveitOlseth {
    fn new(altitude_deg: f64) -> Self {
        let k1 = 0.83 - 0.56 * (-0.06 * altitude_deg).exp();
        let k2 = 0.95 * k1;
        let d1 = if altitude_deg > 1.4 {
            0.07 + 0.046 * (90.0 - altitude_deg) / (altitude_deg + 3.0)
        } else {
            1.0
        };
        let d2 = Self::partly_cloudy_fraction(k2, k1, d1);

        let alpha = (1.0 / altitude_deg.to_radians().sin()).powf(0.6);
        let max_beam = MAX_BEAM_TRANSMITTANCE_BASE.powf(alpha);
        let c = d2 * k2 / (1.0 - k2);
        let k_max = (max_beam + c) / (1.0 + c);
        let d_max = d2 * k2 * (1.0 - k_max) / (k_max * (1.0 - k2));

        SkartveitOlseth {
            k1,
            k2,
            k_max,
            d1,
            d2,
            d_max,
        }
    }

    fn partly_cloudy_fraction(clearness: f64, k1: f64, d1: f64) -> f64 {
        let k = 0.5
            * (1.0
                + (std::f64::consts::PI * (clearness - OVERCAST_CLEARNESS)
                    / (k1 - OVERCAST_CLEARNESS)
                    - std::f64::consts::FRAC_PI_2)
                    .sin());
        1.0 - (1.0 - d1) * (0.11 * k.sqrt() + 0.15 * k + 0.74 * k * k)
    }

    fn diffuse_fraction(&self, clearness: f64) -> f64 {
        if clearness < OVERCAST_CLEARNESS {
            1.0
        } else if clearness < self.k2 {
            Self::partly_cloudy_fraction(clearness, self.k1, self.d1)
        } else if clearness < self.k_max {
            self.d2 * self.k2 * (1.0 - clearness) / (clearness * (1.0 - self.k2))
        } else {
            1.0 - self.k_max * (1.0 - self.d_max) / clearness
        }
    }
}
