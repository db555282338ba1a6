use approx::assert_relative_eq;
use units::{Mass, Time, SOLAR_LUMINOSITY_W};

use crate::config::WhiteDwarfConfig;
use crate::dispatch::lookup;
use crate::error::WdwarfError;
use crate::evolution::{Derivative, EvolutionMode, WhiteDwarf};
use crate::interpolate::{InterpolationOrder, Status};
use crate::model::{Atmosphere, MetallicityLevel, ModelKey, OpacityModel, Quantity};
use crate::test_support;
use crate::xuv::xuv_fraction;

fn config_at(age_gyr: f64) -> WhiteDwarfConfig {
    WhiteDwarfConfig {
        name: "test_wd".to_string(),
        mass_msun: 0.7,
        age_yr: age_gyr * 1e9,
        ..WhiteDwarfConfig::default()
    }
}

#[test]
fn test_new_body_is_grid_driven() {
    let store = test_support::store(ModelKey::default(), Some(6));
    // Cell [0.1, 0.5] Gyr: the stencil spans age columns 1..4, all tabulated
    let body = WhiteDwarf::new(&config_at(0.3), &store).unwrap();

    assert_eq!(body.mode(), EvolutionMode::GridDriven);
    assert!(!body.has_left_grid());
    assert!(!body.should_halt());

    let luminosity_at = |age_gyr: f64| {
        lookup(
            &store,
            Quantity::Luminosity,
            &ModelKey::default(),
            Mass::from_solar_masses(0.7),
            Time::from_gyr(age_gyr),
            InterpolationOrder::Cubic,
        )
    };
    let expected = luminosity_at(0.3);
    assert_eq!(expected.status, Status::Exact);
    assert_relative_eq!(body.luminosity().to_watts(), expected.value);

    // At 1 Gyr the stencil reaches the first missing column
    assert_eq!(luminosity_at(1.0).status, Status::LinearFallback);

    let fraction = xuv_fraction(body.temperature().to_kelvin());
    assert_relative_eq!(
        body.xuv_luminosity().to_watts(),
        body.luminosity().to_watts() * fraction,
        max_relative = 1e-12
    );
}

#[test]
fn test_body_freezes_at_end_of_track() {
    let store = test_support::store(ModelKey::default(), Some(6));
    let mut body = WhiteDwarf::new(&config_at(1.0), &store).unwrap();

    // Stencil reaches the truncated columns, bilinear takes over
    body.update(Time::from_gyr(1.5)).unwrap();
    assert_eq!(body.mode(), EvolutionMode::GridDriven);
    let last_luminosity = body.luminosity();
    let last_temperature = body.temperature();

    // Cell [2, 5] Gyr contains missing values
    body.update(Time::from_gyr(3.0)).unwrap();
    assert_eq!(body.mode(), EvolutionMode::FrozenConstant);
    assert!(body.has_left_grid());
    assert!(body.should_halt());
    assert_eq!(body.luminosity(), last_luminosity);
    assert_eq!(body.temperature(), last_temperature);
    assert_relative_eq!(body.left_grid_at().unwrap().to_gyr(), 3.0);

    // Frozen values hold from here on
    body.update(Time::from_gyr(8.0)).unwrap();
    assert_eq!(body.mode(), EvolutionMode::FrozenConstant);
    assert_eq!(body.luminosity(), last_luminosity);
    assert_relative_eq!(body.age().to_gyr(), 8.0);
    assert_relative_eq!(body.left_grid_at().unwrap().to_gyr(), 3.0);
}

#[test]
fn test_body_freezes_past_last_age() {
    let store = test_support::store(ModelKey::default(), None);
    let mut body = WhiteDwarf::new(&config_at(1.0), &store).unwrap();
    let initial = body.luminosity();

    body.update(Time::from_gyr(25.0)).unwrap();
    assert!(body.has_left_grid());
    assert_eq!(body.luminosity(), initial);
}

#[test]
fn test_halt_flag_is_optional() {
    let store = test_support::store(ModelKey::default(), Some(6));
    let config = WhiteDwarfConfig {
        halt_at_grid_end: false,
        ..config_at(1.0)
    };
    let mut body = WhiteDwarf::new(&config, &store).unwrap();

    body.update(Time::from_gyr(4.0)).unwrap();
    assert!(body.has_left_grid());
    assert!(!body.should_halt());
}

#[test]
fn test_starting_beyond_grid_needs_constants() {
    let store = test_support::store(ModelKey::default(), Some(6));

    let result = WhiteDwarf::new(&config_at(4.0), &store);
    assert!(matches!(
        result,
        Err(WdwarfError::NoFrozenValue(_, Quantity::Luminosity))
    ));

    let only_luminosity = WhiteDwarfConfig {
        luminosity_lsun: Some(1.0e-3),
        ..config_at(4.0)
    };
    assert!(matches!(
        WhiteDwarf::new(&only_luminosity, &store),
        Err(WdwarfError::NoFrozenValue(_, Quantity::Temperature))
    ));

    let constants = WhiteDwarfConfig {
        luminosity_lsun: Some(1.0e-3),
        temperature_k: Some(9_000.0),
        ..config_at(4.0)
    };
    let body = WhiteDwarf::new(&constants, &store).unwrap();
    assert_eq!(body.mode(), EvolutionMode::FrozenConstant);
    assert_relative_eq!(body.luminosity().to_solar_luminosities(), 1.0e-3, max_relative = 1e-12);
    assert_relative_eq!(body.temperature().to_kelvin(), 9_000.0);
    assert!(body.should_halt());
}

#[test]
fn test_grid_overrides_configured_values() {
    let store = test_support::store(ModelKey::default(), None);
    let config = WhiteDwarfConfig {
        luminosity_lsun: Some(1.0),
        temperature_k: Some(5_778.0),
        ..config_at(1.0)
    };
    let body = WhiteDwarf::new(&config, &store).unwrap();

    assert_eq!(body.mode(), EvolutionMode::GridDriven);
    assert!(body.luminosity().to_solar_luminosities() < 0.1);
    assert!(body.temperature().to_kelvin() > 10_000.0);
}

#[test]
fn test_below_grid_is_fatal() {
    let store = test_support::store(ModelKey::default(), None);

    let too_young = WhiteDwarfConfig {
        age_yr: 1.0e5,
        ..config_at(1.0)
    };
    assert!(matches!(
        WhiteDwarf::new(&too_young, &store),
        Err(WdwarfError::OutOfBoundsLow {
            quantity: Quantity::Luminosity,
            ..
        })
    ));

    let too_light = WhiteDwarfConfig {
        mass_msun: 0.3,
        ..config_at(1.0)
    };
    assert!(matches!(
        WhiteDwarf::new(&too_light, &store),
        Err(WdwarfError::OutOfBoundsLow { .. })
    ));
}

#[test]
fn test_untabulated_model_is_fatal() {
    let store = test_support::store(ModelKey::default(), None);
    let config = WhiteDwarfConfig {
        opacity: OpacityModel::Cassisi07,
        he_atmosphere: true,
        metallicity: MetallicityLevel::new(1).unwrap(),
        ..config_at(1.0)
    };

    assert!(matches!(
        WhiteDwarf::new(&config, &store),
        Err(WdwarfError::DataUnavailable { .. })
    ));
}

#[test]
fn test_helium_family_with_two_tracks() {
    let key = ModelKey::new(
        OpacityModel::Blouin20,
        Atmosphere::Helium,
        MetallicityLevel::new(2).unwrap(),
    );
    let store = test_support::store(key, None);
    let config = WhiteDwarfConfig {
        mass_msun: 1.05,
        he_atmosphere: true,
        metallicity: MetallicityLevel::new(2).unwrap(),
        ..config_at(0.2)
    };

    let body = WhiteDwarf::new(&config, &store).unwrap();
    assert_eq!(*body.key(), key);
    assert_eq!(body.mode(), EvolutionMode::GridDriven);

    // Two-track families start at 0.99 M☉
    let light = WhiteDwarfConfig {
        mass_msun: 0.7,
        ..config
    };
    assert!(WhiteDwarf::new(&light, &store).is_err());
}

#[test]
fn test_age_must_not_decrease() {
    let store = test_support::store(ModelKey::default(), None);
    let mut body = WhiteDwarf::new(&config_at(1.0), &store).unwrap();

    let result = body.update(Time::from_gyr(0.5));
    assert!(matches!(result, Err(WdwarfError::AgeDecreased { .. })));
    assert_relative_eq!(body.age().to_gyr(), 1.0);

    // Same age is allowed
    assert!(body.update(Time::from_gyr(1.0)).is_ok());
}

#[test]
fn test_derivative_sources() {
    let store = test_support::store(ModelKey::default(), None);
    let mut body = WhiteDwarf::new(&config_at(1.0), &store).unwrap();

    assert_eq!(body.derivatives(), Derivative::ALL.to_vec());

    let luminosity = Derivative::Luminosity.evaluate(&mut body).unwrap();
    assert_relative_eq!(luminosity, body.luminosity().to_watts());

    let temperature = Derivative::Temperature.evaluate(&mut body).unwrap();
    assert_relative_eq!(temperature, body.temperature().to_kelvin());

    let xuv = Derivative::XuvLuminosity.evaluate(&mut body).unwrap();
    assert_relative_eq!(xuv, body.xuv_luminosity().to_watts(), max_relative = 1e-12);
}

#[test]
fn test_outputs() {
    let store = test_support::store(ModelKey::default(), None);
    let body = WhiteDwarf::new(&config_at(1.0), &store).unwrap();

    let names: Vec<&str> = body.output_descriptors().iter().map(|d| d.name).collect();
    assert_eq!(names, ["WDLuminosity", "WDTemperature", "WDLXUV"]);

    let [luminosity, temperature, lxuv] = body.outputs();
    assert_eq!(luminosity.unit, "LSUN");
    assert_relative_eq!(
        luminosity.value,
        body.luminosity().to_watts() / SOLAR_LUMINOSITY_W,
        max_relative = 1e-12
    );
    assert_eq!(temperature.unit, "K");
    assert_relative_eq!(temperature.value, body.temperature().to_kelvin());
    assert!(lxuv.value < luminosity.value);

    let si = WhiteDwarfConfig {
        solar_units: false,
        ..config_at(1.0)
    };
    let body = WhiteDwarf::new(&si, &store).unwrap();
    let [luminosity, _, _] = body.outputs();
    assert_eq!(luminosity.unit, "W");
    assert_relative_eq!(luminosity.value, body.luminosity().to_watts());
}
