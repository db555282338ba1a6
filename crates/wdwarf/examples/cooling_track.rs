//! Print a white dwarf cooling track as CSV
//!
//! Usage: cargo run -p wdwarf --example cooling_track -- [body.json] [grid.json ...]
//!
//! Without arguments a 0.6 M☉ hydrogen-envelope body is cooled on a synthetic
//! grid. Set `RUST_LOG=info` to see setup and grid-exit messages.

use std::error::Error;
use std::sync::Arc;

use ndarray::Array2;
use units::Time;

use wdwarf::axis::Axis;
use wdwarf::{
    DirectUpdate, Grid, GridStore, Integrator, ModelKey, Quantity, SystemState,
    WhiteDwarf, WhiteDwarfConfig,
};

/// Synthetic cooling sequence with tracks above 1 M☉ ending at 1.5 Gyr
fn synthetic_store(key: ModelKey) -> Result<Arc<GridStore>, Box<dyn Error>> {
    let shape = key.mass_nodes().ok_or("model has no tabulated family")?;
    let masses = Axis::for_masses(shape);
    let ages = Axis::standard_ages();

    let mut builder = GridStore::builder();
    for quantity in [Quantity::Luminosity, Quantity::Temperature] {
        let values = Array2::from_shape_fn((masses.len(), ages.len()), |(i, j)| {
            let m = masses.nodes()[i];
            let a = ages.nodes()[j];
            let log_age = a.log10() + 9.0;
            if m >= 1.0 && a > 1.5 {
                return f64::NAN;
            }
            match quantity {
                Quantity::Luminosity => -1.0 - 1.3 * (log_age - 6.1) - 0.3 * (m - 0.6),
                Quantity::Temperature => 4.7 - 0.3 * (log_age - 6.1) + 0.05 * (m - 0.6),
            }
        });
        builder.insert(key, quantity, Grid::new(masses.clone(), ages.clone(), values)?)?;
    }
    Ok(builder.build())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match args.first() {
        Some(path) => WhiteDwarfConfig::from_path(path)?,
        None => WhiteDwarfConfig {
            name: "wd_0.6".to_string(),
            mass_msun: 0.6,
            age_yr: 2.0e6,
            ..WhiteDwarfConfig::default()
        },
    };
    let store = if args.len() > 1 {
        GridStore::from_files(&args[1..])?
    } else {
        synthetic_store(config.key())?
    };

    let mut system = SystemState::new();
    system.add_body(WhiteDwarf::new(&config, &store)?);

    let header: Vec<String> = system.bodies[0]
        .output_descriptors()
        .iter()
        .map(|d| format!("{}[{}]", d.name, d.unit))
        .collect();
    println!("age_yr,{},mode", header.join(","));

    let dt = Time::from_years(5.0e7);
    loop {
        let wd = &system.bodies[0];
        let values: Vec<String> = wd
            .outputs()
            .iter()
            .map(|o| format!("{:.6e}", o.value))
            .collect();
        println!(
            "{:.6e},{},{:?}",
            wd.age().to_years(),
            values.join(","),
            wd.mode()
        );

        if system.should_halt() || wd.age() > Time::from_gyr(10.0) {
            break;
        }
        DirectUpdate.step(&mut system, dt)?;
    }

    Ok(())
}
