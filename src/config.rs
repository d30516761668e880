use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use uom::si::{f64::HeatFluxDensity, heat_flux_density::watt_per_square_meter};

use solar_angles::{Location, SurfaceAzimuth};

/// Site, day and surfaces of a validation sweep.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub location: Location,
    pub daylight_saving: bool,
    pub date: NaiveDate,
    pub step_minutes: u32,
    pub surfaces: Vec<(String, SurfaceAzimuth)>,
    pub global_horizontal: Option<HeatFluxDensity>,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let string = fs::read_to_string(path)?;
        Self::from_json(&string)
    }

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let loaded: as_loaded::Config = json5::from_str(json)?;
        let converted = loaded.try_into()?;
        Ok(converted)
    }
}

impl TryFrom<as_loaded::Config> for Config {
    type Error = anyhow::Error;
    fn try_from(value: as_loaded::Config) -> Result<Self, Self::Error> {
        let location = value.location;
        if !(-90.0..=90.0).contains(&location.latitude) {
            anyhow::bail!("Latitude {} is outside [-90, 90] degrees", location.latitude)
        }
        if value.step_minutes == 0 || value.step_minutes > 24 * 60 {
            anyhow::bail!(
                "Step of {} minutes doesn't fit into a day",
                value.step_minutes
            )
        }
        let date = NaiveDate::parse_from_str(&value.date, "%Y-%m-%d")
            .map_err(|e| anyhow::anyhow!("Could not parse date {:?}: {}", value.date, e))?;

        Ok(Config {
            location: Location::from_degrees(
                location.longitude,
                location.standard_meridian,
                location.latitude,
            ),
            daylight_saving: value.daylight_saving,
            date,
            step_minutes: value.step_minutes,
            surfaces: value
                .surfaces
                .into_iter()
                .map(|(name, azimuth)| (name, SurfaceAzimuth::from_degrees(azimuth)))
                .collect(),
            global_horizontal: value
                .global_horizontal
                .map(|w| HeatFluxDensity::new::<watt_per_square_meter>(w)),
        })
    }
}

mod as_loaded {
    use std::collections::BTreeMap;

    use serde::Deserialize;

    #[derive(Clone, Debug, Deserialize)]
    pub struct Config {
        pub location: Location,
        #[serde(default)]
        pub daylight_saving: bool,
        pub date: String,
        #[serde(default = "default_step_minutes")]
        pub step_minutes: u32,
        /// Surface name -> outward normal azimuth [degrees clockwise from north]
        #[serde(default)]
        pub surfaces: BTreeMap<String, f64>,
        /// [W/m^2]
        pub global_horizontal: Option<f64>,
    }

    /// All in degrees; longitudes west of the prime meridian.
    #[derive(Clone, Debug, Deserialize, PartialEq)]
    pub struct Location {
        pub longitude: f64,
        pub standard_meridian: f64,
        pub latitude: f64,
    }

    fn default_step_minutes() -> u32 {
        60
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn loaded_location() -> as_loaded::Location {
        as_loaded::Location {
            longitude: 85.0,
            standard_meridian: 90.0,
            latitude: 40.0,
        }
    }

    #[test]
    fn convert_config() {
        let input = as_loaded::Config {
            location: loaded_location(),
            daylight_saving: true,
            date: "2001-07-21".into(),
            step_minutes: 30,
            surfaces: BTreeMap::from([("east".into(), 90.0), ("north".into(), 360.0)]),
            global_horizontal: Some(400.0),
        };

        let output: Config = input.try_into().unwrap();

        assert_eq!(output.location, Location::from_degrees(85.0, 90.0, 40.0));
        assert!(output.daylight_saving);
        assert_eq!(output.date, NaiveDate::from_ymd_opt(2001, 7, 21).unwrap());
        assert_eq!(output.step_minutes, 30);
        assert_eq!(
            output.surfaces,
            vec![
                ("east".to_string(), SurfaceAzimuth::from_degrees(90.0)),
                ("north".to_string(), SurfaceAzimuth::from_degrees(0.0)),
            ]
        );
        assert_eq!(
            output.global_horizontal,
            Some(HeatFluxDensity::new::<watt_per_square_meter>(400.0))
        );
    }

    #[test]
    fn convert_config_bad_latitude() {
        let input = as_loaded::Config {
            location: as_loaded::Location {
                latitude: 123.0,
                ..loaded_location()
            },
            daylight_saving: false,
            date: "2001-07-21".into(),
            step_minutes: 60,
            surfaces: BTreeMap::new(),
            global_horizontal: None,
        };

        let message = format!("{}", Config::try_from(input).unwrap_err());
        message
            .find("Latitude")
            .expect("Error message should say that the latitude is the problem");
        message
            .find("123")
            .expect("Error message should contain the offending value");
    }

    #[test]
    fn convert_config_zero_step() {
        let input = as_loaded::Config {
            location: loaded_location(),
            daylight_saving: false,
            date: "2001-07-21".into(),
            step_minutes: 0,
            surfaces: BTreeMap::new(),
            global_horizontal: None,
        };

        let message = format!("{}", Config::try_from(input).unwrap_err());
        message
            .find("minutes")
            .expect("Error message should mention the step");
    }

    #[test]
    fn convert_config_bare_time_as_date() {
        let input = as_loaded::Config {
            location: loaded_location(),
            daylight_saving: false,
            date: "10:00:00".into(),
            step_minutes: 60,
            surfaces: BTreeMap::new(),
            global_horizontal: None,
        };

        let message = format!("{}", Config::try_from(input).unwrap_err());
        message
            .find("10:00:00")
            .expect("Error message should contain the text that failed to parse");
    }

    #[test]
    fn load_config() {
        let mut f = tempfile::NamedTempFile::new().unwrap();

        use std::io::Write;
        write!(f, "{}", sample_config_json()).unwrap();

        let config = Config::load(f.path()).unwrap();

        check_sample_config(config);
    }

    #[test]
    fn config_from_json() {
        let config = Config::from_json(sample_config_json()).unwrap();
        check_sample_config(config);
    }

    #[test]
    fn config_from_json_defaults() {
        let config = Config::from_json(
            r#"{
                location: { longitude: 105.2, standard_meridian: 105, latitude: 39.75 },
                date: "2011-01-15",
            }"#,
        )
        .unwrap();
        assert!(!config.daylight_saving);
        assert_eq!(config.step_minutes, 60);
        assert!(config.surfaces.is_empty());
        assert_eq!(config.global_horizontal, None);
    }

    /// Provide string with sample JSON5 config
    fn sample_config_json() -> &'static str {
        r#"{
            location: {
                longitude: 85,
                standard_meridian: 90,
                latitude: 40,
            },
            daylight_saving: true,
            date: "2001-07-21",
            step_minutes: 15,
            surfaces: {
                west: 270,
                east: 90,
                south: 180,
            },
            global_horizontal: 800,
        }"#
    }

    fn check_sample_config(config: Config) {
        assert_eq!(config.location, Location::from_degrees(85.0, 90.0, 40.0));
        assert!(config.daylight_saving);
        assert_eq!(config.step_minutes, 15);
        let names: Vec<_> = config.surfaces.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["east", "south", "west"]);
        assert_eq!(
            config.global_horizontal,
            Some(HeatFluxDensity::new::<watt_per_square_meter>(800.0))
        );
    }
}
