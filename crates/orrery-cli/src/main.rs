use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hifitime::{Duration, Epoch};
use orrery_core::constants::{sim_time_to_years, years_to_sim_time, DAYS_PER_YEAR};
use orrery_core::lod::DetailLevel;
use orrery_sim::bodies::builtin_registry;
use orrery_sim::{propagator, speeds, Body, BodyId, BodyRegistry, SharedClock, SimulationClock};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "orrery")]
#[command(about = "Orbit viewer simulation core")]
struct Cli {
    /// JSON body catalog; built-in planets and NEAs when omitted
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show body positions at a simulation time
    Positions {
        /// Simulation time (normalized units)
        #[arg(short, long, default_value = "0.0")]
        time: f64,

        /// Interpret --time as Julian years since J2000 instead
        #[arg(long, default_value = "false")]
        years: bool,
    },

    /// Dump the sampled orbit path of one body
    Path {
        /// Body id
        #[arg(short, long)]
        body: String,

        /// Segment count (>= 3)
        #[arg(short, long, default_value = "256")]
        segments: usize,

        /// Pick the segment count from a camera distance (AU) instead
        #[arg(long)]
        distance: Option<f64>,
    },

    /// Show orbital quantities for one body
    Inspect {
        /// Body id
        #[arg(short, long)]
        body: String,
    },

    /// Run the frame-tick loop, printing positions as time advances
    Simulate {
        /// Playback speed (sim years per real second)
        #[arg(short, long, default_value = "1.0")]
        rate: f64,

        /// Real seconds to run
        #[arg(short, long, default_value = "10.0")]
        duration: f64,

        /// Frame updates per second
        #[arg(long, default_value = "10")]
        fps: u32,

        /// Select this body and report it each frame
        #[arg(long)]
        follow: Option<String>,

        /// Start at this simulation time (years since J2000)
        #[arg(long, default_value = "0.0")]
        start_year: f64,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let mut registry = load_registry(cli.catalog.as_deref())?;

    match cli.command {
        Commands::Positions { time, years } => {
            let t = if years { years_to_sim_time(time) } else { time };
            print_positions(&registry, t);
        }

        Commands::Path { body, segments, distance } => {
            let segments = match distance {
                Some(d) => {
                    let level = DetailLevel::for_distance(d);
                    println!("# camera distance {:.2} AU -> {:?} ({} segments)",
                        d, level, level.segment_count());
                    level.segment_count()
                }
                None => segments,
            };

            let id = BodyId::new(body);
            let points = registry.orbit_path(&id, segments)?;
            println!("# {} points (closed loop)", points.len());
            for p in points.iter() {
                println!("{:.6} {:.6} {:.6}", p.x, p.y, p.z);
            }
        }

        Commands::Inspect { body } => {
            let id = BodyId::new(body);
            let body = registry
                .get(&id)
                .with_context(|| format!("unknown body '{}'", id))?;
            let elements = &body.elements;

            println!("Body: {}", body.id);
            println!("  a:              {:.5} AU", elements.a);
            println!("  e:              {:.5}", elements.e);
            println!("  i:              {:.3}°", elements.i.to_degrees());
            println!("  Ω:              {:.3}°", elements.raan.to_degrees());
            println!("  ω:              {:.3}°", elements.arg_periapsis.to_degrees());
            println!("  period:         {:.4} sim units ({:.3} years)",
                propagator::period(elements),
                sim_time_to_years(propagator::period(elements)));
            println!("  mean motion:    {:.6} rad/unit", propagator::angular_speed(elements));
            println!("  periapsis:      {:.4} AU", elements.periapsis_distance());
            println!("  apoapsis:       {:.4} AU", elements.apoapsis_distance());
            println!("  hazardous:      {}", body.display.hazardous);
        }

        Commands::Simulate { rate, duration, fps, follow, start_year } => {
            let clock = SharedClock::new(SimulationClock::at_time(years_to_sim_time(start_year)));
            clock.set_speed(rate * speeds::YEAR_PER_SEC)?;

            if let Some(name) = &follow {
                let id = BodyId::new(name.clone());
                registry.select(&id)?;
                registry.selection().subscribe(|current| match current {
                    Some(id) => println!("[selection] now {}", id),
                    None => println!("[selection] cleared"),
                });
            }

            tracing::info!(rate, duration, fps, "starting simulation loop");

            let steps = (duration * fps as f64) as usize;
            let dt = 1.0 / fps as f64;
            let earth: BodyId = "earth".into();

            for _ in 0..steps {
                let t = clock.advance(dt);

                match registry.selected() {
                    Some(body) => {
                        let pos = propagator::position(&body.elements, t);
                        let line = format!(
                            "{}  t={:8.3}  {:<16} ({:8.4}, {:8.4}, {:8.4}) AU",
                            format_date(t), t, body.id.to_string(), pos.x, pos.y, pos.z
                        );
                        if registry.contains(&earth) && body.id != earth {
                            let e = registry.position_of(&earth, t)?;
                            println!("{}  d(Earth)={:.4} AU", line, pos.distance_to(&e));
                        } else {
                            println!("{}", line);
                        }
                    }
                    None => {
                        let positions = registry.positions_at(t);
                        println!("{}  t={:8.3}  {} bodies propagated",
                            format_date(t), t, positions.len());
                    }
                }

                std::thread::sleep(std::time::Duration::from_secs_f64(dt));
            }
        }
    }

    Ok(())
}

fn print_positions(registry: &BodyRegistry, t: f64) {
    println!("Positions at t={:.4} ({}):", t, format_date(t));
    println!("{:<16} {:>12} {:>12} {:>12} {:>10}", "Body", "X (AU)", "Y (AU)", "Z (AU)", "Dist (AU)");

    let mut bodies: Vec<&Body> = registry.iter().collect();
    bodies.sort_by(|a, b| {
        a.elements
            .a
            .partial_cmp(&b.elements.a)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    for body in bodies {
        let p = propagator::position(&body.elements, t);
        println!("{:<16} {:>12.6} {:>12.6} {:>12.6} {:>10.4}",
            body.id.to_string(), p.x, p.y, p.z, p.magnitude());
    }
}

/// Simulation time to a calendar date around J2000 (display only)
fn format_date(t: f64) -> String {
    let j2000 = Epoch::from_gregorian_utc(2000, 1, 1, 12, 0, 0, 0);
    let epoch = j2000 + Duration::from_days(sim_time_to_years(t) * DAYS_PER_YEAR);
    format!("{}", epoch)
}

/// Catalog record as produced by the external fetch/normalization layer.
/// Element fields are optional on the wire; conversion requires each one
/// explicitly rather than defaulting absent values to zero.
#[derive(Debug, Deserialize)]
struct CatalogRecord {
    id: String,
    a_au: Option<f64>,
    eccentricity: Option<f64>,
    inclination_deg: Option<f64>,
    raan_deg: Option<f64>,
    arg_periapsis_deg: Option<f64>,
    mean_anomaly_deg: Option<f64>,
    epoch: Option<f64>,
    radius: Option<f64>,
    color: Option<[u8; 3]>,
    hazardous: Option<bool>,
}

fn record_to_body(record: CatalogRecord) -> Result<Body> {
    let require = |value: Option<f64>, field: &str| -> Result<f64> {
        value.with_context(|| format!("body '{}': missing field '{}'", record.id, field))
    };

    let elements = orrery_sim::OrbitalElements::new(
        require(record.a_au, "a_au")?,
        require(record.eccentricity, "eccentricity")?,
        require(record.inclination_deg, "inclination_deg")?.to_radians(),
        require(record.raan_deg, "raan_deg")?.to_radians(),
        require(record.arg_periapsis_deg, "arg_periapsis_deg")?.to_radians(),
        require(record.mean_anomaly_deg, "mean_anomaly_deg")?.to_radians(),
        require(record.epoch, "epoch")?,
    )?;

    let defaults = orrery_sim::DisplayAttributes::default();
    let display = orrery_sim::DisplayAttributes {
        radius: record.radius.unwrap_or(defaults.radius),
        color: record.color.unwrap_or(defaults.color),
        hazardous: record.hazardous.unwrap_or(false),
    };

    Ok(Body::new(record.id, elements, display)?)
}

fn load_registry(catalog: Option<&Path>) -> Result<BodyRegistry> {
    match catalog {
        None => Ok(builtin_registry()?),
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading catalog {}", path.display()))?;
            let records: Vec<CatalogRecord> = serde_json::from_str(&text)
                .with_context(|| format!("parsing catalog {}", path.display()))?;

            let mut registry = BodyRegistry::new();
            for record in records {
                registry.insert(record_to_body(record)?)?;
            }
            tracing::debug!(bodies = registry.len(), "catalog loaded");
            Ok(registry)
        }
    }
}
