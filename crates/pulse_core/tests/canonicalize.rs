use pretty_assertions::assert_eq;
use time::macros::datetime;

use pulse_core::canonicalize::{build_snapshot, GWH_TO_MWH};
use pulse_core::domain::Snapshot;
use pulse_core::sources::{
    AirQualityReading, EnergyMarketReport, GenerationMixReport, GridStatus, LocalSensorReading,
    SourceSet, WeatherObservation,
};

const TS: time::OffsetDateTime = datetime!(2026-03-01 12:00:00 UTC);

#[test]
fn timestamp_is_rfc3339_utc() {
    let snap = build_snapshot("Los Angeles", TS, &SourceSet::default());
    assert_eq!(snap.ts, "2026-03-01T12:00:00Z");
}

#[test]
fn empty_source_set_yields_identity_only_snapshot() {
    let snap = build_snapshot("Los Angeles", TS, &SourceSet::default());

    assert_eq!(
        snap,
        Snapshot::empty("2026-03-01T12:00:00Z", "Los Angeles")
    );
}

#[test]
fn local_sensor_overrides_weather_api_for_shared_quantities() {
    let sources = SourceSet {
        weather: Some(WeatherObservation {
            temperature_c: Some(21.0),
            relative_humidity_pct: Some(40.0),
            wind_speed_ms: Some(3.2),
            precipitation_mm: None,
        }),
        local_sensor: Some(LocalSensorReading {
            temperature_c: Some(23.5),
            humidity_pct: Some(44.0),
            pm25: None,
            power_kw: None,
        }),
        ..SourceSet::default()
    };

    let snap = build_snapshot("Los Angeles", TS, &sources);
    assert_eq!(snap.weather.temp_c, Some(23.5));
    assert_eq!(snap.weather.humidity_pct, Some(44.0));
    // Quantities the sensor does not report keep the API value.
    assert_eq!(snap.weather.wind_speed_ms, Some(3.2));
}

#[test]
fn local_sensor_overrides_air_network_pm25() {
    let sources = SourceSet {
        air_quality: Some(vec![
            AirQualityReading {
                parameter: "PM2.5".to_string(),
                value: 18.0,
            },
            AirQualityReading {
                parameter: "pm10".to_string(),
                value: 30.0,
            },
            AirQualityReading {
                parameter: "ozone".to_string(),
                value: 0.04,
            },
        ]),
        local_sensor: Some(LocalSensorReading {
            pm25: Some(22.5),
            ..LocalSensorReading::default()
        }),
        ..SourceSet::default()
    };

    let snap = build_snapshot("Los Angeles", TS, &sources);
    assert_eq!(snap.air.pm25, Some(22.5));
    assert_eq!(snap.air.pm10, Some(30.0));
    assert_eq!(snap.air.ozone_ppm, Some(0.04));
}

#[test]
fn energy_market_overrides_generation_mix() {
    let sources = SourceSet {
        generation_mix: Some(GenerationMixReport {
            carbon_intensity_gco2_kwh: Some(220.0),
            renewable_pct: Some(38.0),
            generation_gwh: Some(12.5),
        }),
        energy_market: Some(EnergyMarketReport {
            generation_mwh: Some(20_000.0),
            renewable_generation_mwh: Some(9_000.0),
            natural_gas_price_mmbtu: Some(2.8),
            electricity_price_usd_kwh: Some(0.145),
        }),
        ..SourceSet::default()
    };

    let snap = build_snapshot("Los Angeles", TS, &sources);
    assert_eq!(snap.energy.generation_mwh, Some(20_000.0));
    assert_eq!(snap.energy.renewable_pct, Some(45.0));
    assert_eq!(snap.energy.natural_gas_price_mmbtu, Some(2.8));
    // Fields only the mix report carries survive the override.
    assert_eq!(snap.energy.carbon_intensity_gco2_kwh, Some(220.0));
}

#[test]
fn generation_unit_conversion_is_exact() {
    let sources = SourceSet {
        generation_mix: Some(GenerationMixReport {
            generation_gwh: Some(12.5),
            ..GenerationMixReport::default()
        }),
        ..SourceSet::default()
    };

    let snap = build_snapshot("Los Angeles", TS, &sources);
    assert_eq!(snap.energy.generation_mwh, Some(12.5 * GWH_TO_MWH));
    assert_eq!(snap.energy.generation_mwh, Some(12_500.0));
}

#[test]
fn grid_monitor_overrides_local_sensor_load() {
    let sources = SourceSet {
        local_sensor: Some(LocalSensorReading {
            power_kw: Some(4.2),
            ..LocalSensorReading::default()
        }),
        grid: Some(GridStatus {
            load_mw: Some(31_500.0),
            utilization_pct: Some(78.0),
        }),
        ..SourceSet::default()
    };

    let snap = build_snapshot("Los Angeles", TS, &sources);
    assert_eq!(snap.energy.grid_load_mw, Some(31_500.0));
    assert_eq!(snap.energy.grid_utilization_pct, Some(78.0));

    // Without the grid monitor the sensor reading stands.
    let sensor_only = SourceSet {
        local_sensor: Some(LocalSensorReading {
            power_kw: Some(4.2),
            ..LocalSensorReading::default()
        }),
        ..SourceSet::default()
    };
    let snap = build_snapshot("Los Angeles", TS, &sensor_only);
    assert_eq!(snap.energy.grid_load_mw, Some(4.2));
}

#[test]
fn absent_sources_never_reintroduce_zeroes() {
    let sources = SourceSet {
        weather: Some(WeatherObservation {
            temperature_c: Some(0.0),
            ..WeatherObservation::default()
        }),
        ..SourceSet::default()
    };

    let snap = build_snapshot("Oslo", TS, &sources);
    // A measured zero is a value, not "unknown".
    assert_eq!(snap.weather.temp_c, Some(0.0));
    assert_eq!(snap.weather.humidity_pct, None);
    assert_eq!(snap.air.pm25, None);
}
