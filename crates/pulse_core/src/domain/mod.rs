use serde::{Deserialize, Serialize};

/// Canonical snapshot: the unified shape every upstream source converges
/// into, one row per (ts, location).
///
/// Notes:
/// - `ts` is an RFC3339 UTC string and, together with `location`, identifies
///   the row.
/// - Every measured field is independently optional. `None` means "unknown";
///   a source that reports an actual zero still stores `Some(0.0)`, so
///   absence is never conflated with a measurement.
/// - Snapshots are immutable after construction and append-only at rest; a
///   new ingestion cycle produces a new `ts`, never an update in place.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Snapshot {
    pub ts: String,
    pub location: String,

    pub weather: Weather,
    pub air: AirQuality,
    pub finance: Finance,
    pub energy: Energy,
    pub health: Health,
    pub agriculture: Agriculture,
    pub disasters: Disasters,
    pub wildlife: Wildlife,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Weather {
    pub temp_c: Option<f64>,
    pub humidity_pct: Option<f64>,
    pub wind_speed_ms: Option<f64>,
    pub precip_mm: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AirQuality {
    pub pm25: Option<f64>,
    pub pm10: Option<f64>,
    pub ozone_ppm: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Finance {
    pub stock_symbol: Option<String>,
    pub stock_price: Option<f64>,
    pub index_value: Option<f64>,
    pub volume_traded: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Energy {
    pub electricity_price_usd_kwh: Option<f64>,
    pub generation_mwh: Option<f64>,
    pub renewable_pct: Option<f64>,
    pub grid_load_mw: Option<f64>,
    pub grid_utilization_pct: Option<f64>,
    pub carbon_intensity_gco2_kwh: Option<f64>,
    pub natural_gas_price_mmbtu: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Health {
    pub flu_cases: Option<i64>,
    pub ili_pct: Option<f64>,
    pub hospital_admissions: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Agriculture {
    pub crop_type: Option<String>,
    pub yield_per_acre: Option<f64>,
    pub production_bushels: Option<f64>,
    pub price_per_bushel: Option<f64>,
    pub harvested_acres: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Disasters {
    pub active_disasters: Option<i64>,
    pub top_incident_type: Option<String>,
    pub severity: Option<i64>,
    pub affected_counties: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Wildlife {
    pub active_species: Option<i64>,
    pub animals_tracked: Option<i64>,
    pub avg_migration_pace_km_day: Option<f64>,
}

impl Snapshot {
    /// A snapshot with only its identity set; every measured field unknown.
    pub fn empty(ts: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            ts: ts.into(),
            location: location.into(),
            ..Self::default()
        }
    }
}
