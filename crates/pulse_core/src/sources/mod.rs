use serde::{Deserialize, Serialize};

/// Parsed upstream payloads, one type per source.
///
/// The fetch clients themselves live outside this crate; by the time data
/// reaches the canonicalizer it has already been decoded into one of these
/// structs. Every field a source may omit is an explicit `Option` — absence
/// is modeled as "not present", never as a sentinel zero.

/// Current conditions from the weather API.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WeatherObservation {
    pub temperature_c: Option<f64>,
    pub relative_humidity_pct: Option<f64>,
    pub wind_speed_ms: Option<f64>,
    pub precipitation_mm: Option<f64>,
}

/// One sensor reading from the air-quality network. Parameter names vary by
/// provider ("pm25", "pm2.5", "PM2.5"); the canonicalizer normalizes them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AirQualityReading {
    pub parameter: String,
    pub value: f64,
}

/// Reading from an on-site sensor. Treated as the most authoritative source
/// for the physical quantities it covers.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LocalSensorReading {
    pub pm25: Option<f64>,
    pub temperature_c: Option<f64>,
    pub humidity_pct: Option<f64>,
    pub power_kw: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EquityQuote {
    pub symbol: String,
    pub price: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MarketIndexSummary {
    pub index_value: Option<f64>,
    pub volume_traded: Option<i64>,
}

/// Annual generation-mix aggregate; generation arrives in GWh.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GenerationMixReport {
    pub carbon_intensity_gco2_kwh: Option<f64>,
    pub renewable_pct: Option<f64>,
    pub generation_gwh: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GridStatus {
    pub load_mw: Option<f64>,
    pub utilization_pct: Option<f64>,
}

/// Energy administration figures; overrides the generation-mix estimate when
/// both report the same quantity.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EnergyMarketReport {
    pub generation_mwh: Option<f64>,
    pub renewable_generation_mwh: Option<f64>,
    pub natural_gas_price_mmbtu: Option<f64>,
    pub electricity_price_usd_kwh: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CropReport {
    pub crop_type: Option<String>,
    pub yield_per_acre: Option<f64>,
    pub production_bushels: Option<f64>,
    pub price_per_bushel: Option<f64>,
    pub harvested_acres: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DisasterBulletin {
    pub active_disasters: Option<i64>,
    pub top_incident_type: Option<String>,
    pub severity: Option<i64>,
    pub affected_counties: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FluSurveillanceReport {
    pub cases: Option<i64>,
    pub unweighted_ili_pct: Option<f64>,
    pub hospital_admissions: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WildlifeMovementReport {
    pub active_species: Option<i64>,
    pub animals_tracked: Option<i64>,
    pub avg_migration_pace_km_day: Option<f64>,
}

/// Everything one ingestion cycle managed to fetch. Any subset of slots may
/// be `None` on any given cycle; that is the steady state, not an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SourceSet {
    pub weather: Option<WeatherObservation>,
    pub air_quality: Option<Vec<AirQualityReading>>,
    pub local_sensor: Option<LocalSensorReading>,
    pub equity: Option<EquityQuote>,
    pub market_index: Option<MarketIndexSummary>,
    pub generation_mix: Option<GenerationMixReport>,
    pub grid: Option<GridStatus>,
    pub energy_market: Option<EnergyMarketReport>,
    pub crops: Option<CropReport>,
    pub disasters: Option<DisasterBulletin>,
    pub flu: Option<FluSurveillanceReport>,
    pub wildlife: Option<WildlifeMovementReport>,
}
