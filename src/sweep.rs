use chrono::{Duration, NaiveDate, NaiveDateTime};
use uom::si::f64::HeatFluxDensity;

use crate::angular::Angular;
use crate::location::{Location, SurfaceAzimuth};
use crate::tools::irradiation::{split_for_position, DirectDiffuseSplit};
use crate::tools::sun::SolarPosition;

/// Clock timestamps through one day at a fixed step, starting at midnight.
#[derive(Clone, Debug)]
pub struct Sweep {
    next: NaiveDateTime,
    end: NaiveDateTime,
    step: Duration,
}

impl Sweep {
    /// `None` for a zero step.
    pub fn day(date: NaiveDate, step_minutes: u32) -> Option<Self> {
        if step_minutes == 0 {
            return None;
        }
        let start = date.and_hms_opt(0, 0, 0)?;
        Some(Sweep {
            next: start,
            end: start + Duration::days(1),
            step: Duration::minutes(i64::from(step_minutes)),
        })
    }
}

impl Iterator for Sweep {
    type Item = NaiveDateTime;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let current = self.next;
        self.next += self.step;
        Some(current)
    }
}

/// One line of a validation sweep.
#[derive(Clone, Debug, PartialEq)]
pub struct SweepRow {
    pub timestamp: NaiveDateTime,
    pub position: SolarPosition,
    /// Angle of incidence per named surface, in the order given.
    pub incidence: Vec<(String, Angular)>,
    pub split: Option<DirectDiffuseSplit>,
}

impl SweepRow {
    pub fn calculate(
        timestamp: NaiveDateTime,
        daylight_saving: bool,
        location: &Location,
        surfaces: &[(String, SurfaceAzimuth)],
        global_horizontal: Option<HeatFluxDensity>,
    ) -> Self {
        let position = SolarPosition::calculate(&timestamp, daylight_saving, location);
        let incidence = surfaces
            .iter()
            .map(|(name, surface)| (name.clone(), position.angle_of_incidence(surface)))
            .collect();
        let split = global_horizontal
            .map(|global| split_for_position(position.day_of_year, &position.altitude, global));
        SweepRow {
            timestamp,
            position,
            incidence,
            split,
        }
    }
}
