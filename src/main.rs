mod config;

use log::info;
use uom::si::heat_flux_density::watt_per_square_meter;

use config::Config;
use solar_angles::sweep::{Sweep, SweepRow};
use solar_angles::{cos_incidence, daylight_window, Angular};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.json5".to_string());
    let config = Config::load(&path)?;
    info!("loaded {}: {:?}", path, config);

    match daylight_window(config.date, config.daylight_saving, &config.location) {
        Some(window) => println!(
            "sunrise {:.2} h, sunset {:.2} h, daylight {:.2} h",
            window.sunrise,
            window.sunset,
            window.length()
        ),
        None => println!("no sunrise or sunset on {}", config.date),
    }

    let sweep = Sweep::day(config.date, config.step_minutes)
        .ok_or_else(|| anyhow::anyhow!("Invalid sweep for {}", config.date))?;

    let mut header = vec![
        "Timestamp".to_string(),
        "Hour Angle".to_string(),
        "Solar Altitude".to_string(),
        "Solar Azimuth".to_string(),
    ];
    header.extend(
        config
            .surfaces
            .iter()
            .map(|(name, _)| format!("Cos {} Theta", name)),
    );
    if config.global_horizontal.is_some() {
        header.push("Direct".to_string());
        header.push("Diffuse".to_string());
    }
    println!("{}", header.join(", "));

    for timestamp in sweep {
        let row = SweepRow::calculate(
            timestamp,
            config.daylight_saving,
            &config.location,
            &config.surfaces,
            config.global_horizontal,
        );
        println!("{}", format_row(&row));
    }

    anyhow::Result::Ok(())
}

fn format_row(row: &SweepRow) -> String {
    let mut columns = vec![
        row.timestamp.to_string(),
        format_degrees(&row.position.hour_angle),
        format_degrees(&row.position.altitude),
        format_degrees(&row.position.azimuth),
    ];
    columns.extend(
        row.incidence
            .iter()
            .map(|(_, incidence)| format_optional(cos_incidence(incidence))),
    );
    if let Some(split) = row.split {
        columns.push(format!("{:.2}", split.direct.get::<watt_per_square_meter>()));
        columns.push(format!("{:.2}", split.diffuse.get::<watt_per_square_meter>()));
    }
    columns.join(", ")
}

fn format_degrees(angle: &Angular) -> String {
    format_optional(angle.degrees())
}

fn format_optional(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.4}", v))
}
