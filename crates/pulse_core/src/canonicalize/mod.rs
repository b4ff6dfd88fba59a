use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::domain::Snapshot;
use crate::sources::SourceSet;

/// Exact scale factor for generation-mix reports, which arrive in GWh while
/// the canonical unit is MWh.
pub const GWH_TO_MWH: f64 = 1_000.0;

/// Merge whatever sources a cycle fetched into one canonical snapshot.
///
/// Precedence is a declared table, not call order. Sources apply in the
/// order below; where two sources report the same physical quantity, the
/// later apply step wins:
///
/// | quantity                    | base source     | overridden by  |
/// |-----------------------------|-----------------|----------------|
/// | temperature, humidity       | weather         | local_sensor   |
/// | pm2.5                       | air_quality     | local_sensor   |
/// | grid load                   | local_sensor    | grid           |
/// | generation, renewable share | generation_mix  | energy_market  |
///
/// Absent sources are skipped; this function never fails and has no side
/// effects.
pub fn build_snapshot(
    location: &str,
    captured_at: OffsetDateTime,
    sources: &SourceSet,
) -> Snapshot {
    // Rfc3339 formatting of a UTC OffsetDateTime cannot fail.
    let ts = captured_at
        .format(&Rfc3339)
        .unwrap_or_else(|_| String::new());
    let mut snap = Snapshot::empty(ts, location);

    if let Some(w) = &sources.weather {
        snap.weather.temp_c = w.temperature_c;
        snap.weather.humidity_pct = w.relative_humidity_pct;
        snap.weather.wind_speed_ms = w.wind_speed_ms;
        snap.weather.precip_mm = w.precipitation_mm;
    }

    if let Some(readings) = &sources.air_quality {
        for r in readings {
            match normalize_air_parameter(&r.parameter) {
                "pm25" => snap.air.pm25 = Some(r.value),
                "pm10" => snap.air.pm10 = Some(r.value),
                "o3" => snap.air.ozone_ppm = Some(r.value),
                _ => {}
            }
        }
    }

    // On-site sensor wins over API estimates for the quantities it covers.
    if let Some(s) = &sources.local_sensor {
        if s.pm25.is_some() {
            snap.air.pm25 = s.pm25;
        }
        if s.temperature_c.is_some() {
            snap.weather.temp_c = s.temperature_c;
        }
        if s.humidity_pct.is_some() {
            snap.weather.humidity_pct = s.humidity_pct;
        }
        if s.power_kw.is_some() {
            snap.energy.grid_load_mw = s.power_kw;
        }
    }

    if let Some(q) = &sources.equity {
        snap.finance.stock_symbol = Some(q.symbol.clone());
        snap.finance.stock_price = Some(q.price);
    }

    if let Some(m) = &sources.market_index {
        snap.finance.index_value = m.index_value;
        snap.finance.volume_traded = m.volume_traded;
    }

    if let Some(mix) = &sources.generation_mix {
        snap.energy.carbon_intensity_gco2_kwh = mix.carbon_intensity_gco2_kwh;
        snap.energy.renewable_pct = mix.renewable_pct;
        snap.energy.generation_mwh = mix.generation_gwh.map(|g| g * GWH_TO_MWH);
    }

    // Grid monitor is authoritative for load and utilization.
    if let Some(g) = &sources.grid {
        if g.load_mw.is_some() {
            snap.energy.grid_load_mw = g.load_mw;
        }
        snap.energy.grid_utilization_pct = g.utilization_pct;
    }

    // Administration figures override the generation-mix estimate.
    if let Some(e) = &sources.energy_market {
        if e.generation_mwh.is_some() {
            snap.energy.generation_mwh = e.generation_mwh;
        }
        snap.energy.natural_gas_price_mmbtu = e.natural_gas_price_mmbtu;
        snap.energy.electricity_price_usd_kwh = e.electricity_price_usd_kwh;
        if let (Some(renewable), Some(total)) = (e.renewable_generation_mwh, e.generation_mwh) {
            if total > 0.0 {
                snap.energy.renewable_pct = Some(renewable / total * 100.0);
            }
        }
    }

    if let Some(c) = &sources.crops {
        snap.agriculture.crop_type = c.crop_type.clone();
        snap.agriculture.yield_per_acre = c.yield_per_acre;
        snap.agriculture.production_bushels = c.production_bushels;
        snap.agriculture.price_per_bushel = c.price_per_bushel;
        snap.agriculture.harvested_acres = c.harvested_acres;
    }

    if let Some(d) = &sources.disasters {
        snap.disasters.active_disasters = d.active_disasters;
        snap.disasters.top_incident_type = d.top_incident_type.clone();
        snap.disasters.severity = d.severity;
        snap.disasters.affected_counties = d.affected_counties;
    }

    if let Some(f) = &sources.flu {
        snap.health.flu_cases = f.cases;
        snap.health.ili_pct = f.unweighted_ili_pct;
        snap.health.hospital_admissions = f.hospital_admissions;
    }

    if let Some(w) = &sources.wildlife {
        snap.wildlife.active_species = w.active_species;
        snap.wildlife.animals_tracked = w.animals_tracked;
        snap.wildlife.avg_migration_pace_km_day = w.avg_migration_pace_km_day;
    }

    snap
}

/// Collapse provider parameter spellings to canonical names.
fn normalize_air_parameter(name: &str) -> &str {
    match name {
        "pm25" | "pm2.5" | "PM2.5" => "pm25",
        "pm10" | "PM10" => "pm10",
        "o3" | "ozone" | "O3" => "o3",
        other => other,
    }
}
