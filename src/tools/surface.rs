use log::debug;
use uom::si::{f64::HeatFluxDensity, heat_flux_density::watt_per_square_meter, ratio::ratio};

use super::acos_clamped;
use super::sun::SolarPosition;
use crate::angular::Angular;
use crate::location::{Location, SurfaceAzimuth};
use crate::time::Timestamp;

impl SolarPosition {
    /// Angle in the horizontal plane between the sun and the outward normal of a
    /// vertical surface. Unvalued when the sun is down or behind the surface.
    pub fn wall_azimuth(&self, surface: &SurfaceAzimuth) -> Angular {
        let solar_azimuth = match self.azimuth.degrees() {
            Some(azimuth) => azimuth,
            None => return Angular::unvalued(),
        };
        // shortest signed difference, so a north facing wall still sees the
        // evening sun at 300 degrees as -60
        let wall_azimuth = (solar_azimuth - surface.degrees() + 180.0).rem_euclid(360.0) - 180.0;
        if !(-90.0..=90.0).contains(&wall_azimuth) {
            debug!(
                "surface at {:.1} deg faces away from the sun at {:.1} deg",
                surface.degrees(),
                solar_azimuth
            );
            return Angular::unvalued();
        }
        Angular::from_degrees(wall_azimuth)
    }

    /// Angle between the incoming rays and the outward normal of a vertical
    /// surface. Unvalued when the sun is down or behind the surface.
    pub fn angle_of_incidence(&self, surface: &SurfaceAzimuth) -> Angular {
        let (wall_azimuth, altitude) =
            match (self.wall_azimuth(surface).radians(), self.altitude.radians()) {
                (Some(wall_azimuth), Some(altitude)) => (wall_azimuth, altitude),
                _ => return Angular::unvalued(),
            };
        Angular::from_radians(acos_clamped(altitude.cos() * wall_azimuth.cos()))
    }
}

/// See [`SolarPosition::wall_azimuth`].
pub fn wall_azimuth_angle<T: Timestamp>(
    timestamp: &T,
    daylight_saving: bool,
    location: &Location,
    surface: &SurfaceAzimuth,
) -> Angular {
    SolarPosition::calculate(timestamp, daylight_saving, location).wall_azimuth(surface)
}

/// See [`SolarPosition::angle_of_incidence`].
pub fn solar_angle_of_incidence<T: Timestamp>(
    timestamp: &T,
    daylight_saving: bool,
    location: &Location,
    surface: &SurfaceAzimuth,
) -> Angular {
    SolarPosition::calculate(timestamp, daylight_saving, location).angle_of_incidence(surface)
}

/// Direct radiation incident on a vertical surface: the horizontal direct
/// irradiation scaled by the cosine of the angle of incidence.
///
/// `None` when the angle of incidence is undefined; the caller decides what
/// that means (usually no direct gain), it is not silently zero here.
pub fn direct_radiation_on_surface<T: Timestamp>(
    timestamp: &T,
    daylight_saving: bool,
    location: &Location,
    surface: &SurfaceAzimuth,
    horizontal_direct_irradiation: HeatFluxDensity,
) -> Option<HeatFluxDensity> {
    let incidence = solar_angle_of_incidence(timestamp, daylight_saving, location, surface);
    direct_radiation_for_incidence(&incidence, horizontal_direct_irradiation)
}

pub fn direct_radiation_for_incidence(
    incidence: &Angular,
    horizontal_direct_irradiation: HeatFluxDensity,
) -> Option<HeatFluxDensity> {
    let theta = incidence.angle()?;
    Some(HeatFluxDensity::new::<watt_per_square_meter>(
        horizontal_direct_irradiation.get::<watt_per_square_meter>() * theta.cos().get::<ratio>(),
    ))
}

/// Cosine of the angle of incidence, the column reported by validation sweeps.
pub fn cos_incidence(incidence: &Angular) -> Option<f64> {
    incidence.radians().map(f64::cos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use chrono::{NaiveDate, NaiveDateTime};
    use nalgebra::Vector3;
    use test_strategy::proptest;
    use uom::si::{angle::radian, f64::Angle};

    fn datetime(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn example_location() -> Location {
        Location::from_degrees(85.0, 90.0, 40.0)
    }

    /// Unit vector: x north, y east, z up.
    fn vector_from_azimuth_elevation(azimuth: Angle, elevation: Angle) -> Vector3<f64> {
        let x = azimuth.cos().get::<ratio>() * elevation.cos().get::<ratio>();
        let y = azimuth.sin().get::<ratio>() * elevation.cos().get::<ratio>();
        let z = elevation.sin().get::<ratio>();
        Vector3::new(x, y, z).normalize()
    }

    #[test]
    fn wall_azimuth_east_facing() {
        let surface = SurfaceAzimuth::from_degrees(90.0);
        let expected_solar_azimuth = 180.0 - 73.7;
        let wall_azimuth = wall_azimuth_angle(
            &datetime(2001, 7, 21, 10, 0),
            true,
            &example_location(),
            &surface,
        );
        assert_abs_diff_eq!(
            wall_azimuth.degrees().unwrap(),
            expected_solar_azimuth - 90.0,
            epsilon = 0.1
        );
    }

    #[test]
    fn wall_azimuth_when_sun_is_down() {
        let wall_azimuth = wall_azimuth_angle(
            &datetime(2001, 3, 21, 22, 0),
            true,
            &example_location(),
            &SurfaceAzimuth::from_degrees(90.0),
        );
        assert!(!wall_azimuth.is_valued());
    }

    #[test]
    fn west_wall_shaded_in_the_morning() {
        let timestamp = datetime(2001, 7, 21, 10, 0);
        let surface = SurfaceAzimuth::from_degrees(270.0);
        assert!(!wall_azimuth_angle(&timestamp, true, &example_location(), &surface).is_valued());
        assert!(
            !solar_angle_of_incidence(&timestamp, true, &example_location(), &surface).is_valued()
        );
    }

    #[test]
    fn north_wall_sees_evening_sun() {
        let timestamp = datetime(2001, 6, 21, 19, 0);
        let wall_azimuth = wall_azimuth_angle(
            &timestamp,
            true,
            &example_location(),
            &SurfaceAzimuth::from_degrees(0.0),
        );
        assert_abs_diff_eq!(wall_azimuth.degrees().unwrap(), -68.9, epsilon = 0.1);
    }

    #[test]
    fn incidence_east_facing() {
        let surface = SurfaceAzimuth::from_degrees(90.0);
        let expected_wall_azimuth = (180.0_f64 - 73.7 - 90.0).to_radians();
        let expected_altitude = 49.7_f64.to_radians();
        let expected = (expected_wall_azimuth.cos() * expected_altitude.cos()).acos();
        let incidence = solar_angle_of_incidence(
            &datetime(2001, 7, 21, 10, 0),
            true,
            &example_location(),
            &surface,
        );
        assert_abs_diff_eq!(incidence.radians().unwrap(), expected, epsilon = 0.002);
    }

    #[test]
    fn incidence_when_sun_is_down() {
        let incidence = solar_angle_of_incidence(
            &datetime(2001, 3, 21, 22, 0),
            true,
            &example_location(),
            &SurfaceAzimuth::from_degrees(90.0),
        );
        assert!(!incidence.is_valued());
    }

    #[proptest]
    fn incidence_invariant_under_full_turns(
        #[strategy(0.0..360.0f64)] surface: f64,
        #[strategy(-3i32..=3)] turns: i32,
        #[strategy(5u32..20)] hour: u32,
    ) {
        let timestamp = datetime(2001, 7, 21, hour, 0);
        let base = solar_angle_of_incidence(
            &timestamp,
            true,
            &example_location(),
            &SurfaceAzimuth::from_degrees(surface),
        );
        let rotated = solar_angle_of_incidence(
            &timestamp,
            true,
            &example_location(),
            &SurfaceAzimuth::from_degrees(surface + 360.0 * f64::from(turns)),
        );
        assert_eq!(base.is_valued(), rotated.is_valued());
        if let (Some(a), Some(b)) = (base.radians(), rotated.radians()) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-6);
        }
    }

    #[proptest]
    fn incidence_matches_vector_projection(
        #[strategy(0.0..360.0f64)] surface: f64,
        #[strategy(6u32..20)] hour: u32,
    ) {
        let position =
            SolarPosition::calculate(&datetime(2001, 7, 21, hour, 0), true, &example_location());
        let surface = SurfaceAzimuth::from_degrees(surface);
        if let (Some(incidence), Some(azimuth), Some(altitude)) = (
            position.angle_of_incidence(&surface).radians(),
            position.azimuth.angle(),
            position.altitude.angle(),
        ) {
            let sun = vector_from_azimuth_elevation(azimuth, altitude);
            let normal = vector_from_azimuth_elevation(surface.angle(), Angle::new::<radian>(0.0));
            assert_abs_diff_eq!(incidence.cos(), sun.dot(&normal), epsilon = 1e-9);
        }
    }

    #[test]
    fn direct_radiation_south_facing() {
        let timestamp = datetime(2001, 7, 21, 10, 0);
        let surface = SurfaceAzimuth::from_degrees(180.0);
        let theta = solar_angle_of_incidence(&timestamp, true, &example_location(), &surface)
            .radians()
            .unwrap();
        let insolation = HeatFluxDensity::new::<watt_per_square_meter>(293.0);
        let direct =
            direct_radiation_on_surface(&timestamp, true, &example_location(), &surface, insolation)
                .unwrap();
        assert_abs_diff_eq!(
            direct.get::<watt_per_square_meter>(),
            293.0 * theta.cos(),
            epsilon = 0.1
        );
    }

    #[test]
    fn direct_radiation_absent_when_shaded() {
        let insolation = HeatFluxDensity::new::<watt_per_square_meter>(293.0);
        let direct = direct_radiation_on_surface(
            &datetime(2001, 7, 21, 10, 0),
            true,
            &example_location(),
            &SurfaceAzimuth::from_degrees(270.0),
            insolation,
        );
        assert_eq!(direct, None);
    }

    #[test]
    fn cos_incidence_column() {
        assert_eq!(cos_incidence(&Angular::unvalued()), None);
        assert_abs_diff_eq!(
            cos_incidence(&Angular::from_degrees(60.0)).unwrap(),
            0.5,
            epsilon = 1e-12
        );
    }
}
