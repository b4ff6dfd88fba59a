use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::domain::Snapshot;
use crate::error::AppError;

pub mod embeddings;

/// One metric value at one instant, for dashboard time-series reads.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeSeriesPoint {
    pub ts: String,
    pub value: f64,
}

const SNAPSHOT_COLUMNS: &str = r#"
      ts, location,
      temp_c, humidity_pct, wind_speed_ms, precip_mm,
      pm25, pm10, ozone_ppm,
      stock_symbol, stock_price, index_value, volume_traded,
      electricity_price_usd_kwh, generation_mwh, renewable_pct, grid_load_mw,
      grid_utilization_pct, carbon_intensity_gco2_kwh, natural_gas_price_mmbtu,
      flu_cases, ili_pct, hospital_admissions,
      crop_type, yield_per_acre, production_bushels, price_per_bushel, harvested_acres,
      active_disasters, top_incident_type, severity, affected_counties,
      active_species, animals_tracked, avg_migration_pace_km_day
"#;

/// Append one canonical snapshot. Rows are never updated in place; a
/// duplicate (ts, location) pair is a write failure, not an upsert.
pub fn insert_snapshot(conn: &Connection, snap: &Snapshot) -> Result<(), AppError> {
    let sql = format!(
        "INSERT INTO snapshots ({SNAPSHOT_COLUMNS}) VALUES (\
         ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, \
         ?18, ?19, ?20, ?21, ?22, ?23, ?24, ?25, ?26, ?27, ?28, ?29, ?30, ?31, ?32, ?33, ?34, ?35)"
    );

    conn.execute(
        &sql,
        params![
            snap.ts,
            snap.location,
            snap.weather.temp_c,
            snap.weather.humidity_pct,
            snap.weather.wind_speed_ms,
            snap.weather.precip_mm,
            snap.air.pm25,
            snap.air.pm10,
            snap.air.ozone_ppm,
            snap.finance.stock_symbol,
            snap.finance.stock_price,
            snap.finance.index_value,
            snap.finance.volume_traded,
            snap.energy.electricity_price_usd_kwh,
            snap.energy.generation_mwh,
            snap.energy.renewable_pct,
            snap.energy.grid_load_mw,
            snap.energy.grid_utilization_pct,
            snap.energy.carbon_intensity_gco2_kwh,
            snap.energy.natural_gas_price_mmbtu,
            snap.health.flu_cases,
            snap.health.ili_pct,
            snap.health.hospital_admissions,
            snap.agriculture.crop_type,
            snap.agriculture.yield_per_acre,
            snap.agriculture.production_bushels,
            snap.agriculture.price_per_bushel,
            snap.agriculture.harvested_acres,
            snap.disasters.active_disasters,
            snap.disasters.top_incident_type,
            snap.disasters.severity,
            snap.disasters.affected_counties,
            snap.wildlife.active_species,
            snap.wildlife.animals_tracked,
            snap.wildlife.avg_migration_pace_km_day,
        ],
    )
    .map_err(|e| {
        AppError::new("DB_INSERT_FAILED", "Failed to insert snapshot")
            .with_details(e.to_string())
    })?;

    Ok(())
}

fn snapshot_from_row(row: &Row<'_>) -> Result<Snapshot, rusqlite::Error> {
    let mut snap = Snapshot::empty(row.get::<_, String>(0)?, row.get::<_, String>(1)?);
    snap.weather.temp_c = row.get(2)?;
    snap.weather.humidity_pct = row.get(3)?;
    snap.weather.wind_speed_ms = row.get(4)?;
    snap.weather.precip_mm = row.get(5)?;
    snap.air.pm25 = row.get(6)?;
    snap.air.pm10 = row.get(7)?;
    snap.air.ozone_ppm = row.get(8)?;
    snap.finance.stock_symbol = row.get(9)?;
    snap.finance.stock_price = row.get(10)?;
    snap.finance.index_value = row.get(11)?;
    snap.finance.volume_traded = row.get(12)?;
    snap.energy.electricity_price_usd_kwh = row.get(13)?;
    snap.energy.generation_mwh = row.get(14)?;
    snap.energy.renewable_pct = row.get(15)?;
    snap.energy.grid_load_mw = row.get(16)?;
    snap.energy.grid_utilization_pct = row.get(17)?;
    snap.energy.carbon_intensity_gco2_kwh = row.get(18)?;
    snap.energy.natural_gas_price_mmbtu = row.get(19)?;
    snap.health.flu_cases = row.get(20)?;
    snap.health.ili_pct = row.get(21)?;
    snap.health.hospital_admissions = row.get(22)?;
    snap.agriculture.crop_type = row.get(23)?;
    snap.agriculture.yield_per_acre = row.get(24)?;
    snap.agriculture.production_bushels = row.get(25)?;
    snap.agriculture.price_per_bushel = row.get(26)?;
    snap.agriculture.harvested_acres = row.get(27)?;
    snap.disasters.active_disasters = row.get(28)?;
    snap.disasters.top_incident_type = row.get(29)?;
    snap.disasters.severity = row.get(30)?;
    snap.disasters.affected_counties = row.get(31)?;
    snap.wildlife.active_species = row.get(32)?;
    snap.wildlife.animals_tracked = row.get(33)?;
    snap.wildlife.avg_migration_pace_km_day = row.get(34)?;
    Ok(snap)
}

/// Most recent snapshot for a location, or `None` when nothing has been
/// ingested there yet.
pub fn latest_snapshot(conn: &Connection, location: &str) -> Result<Option<Snapshot>, AppError> {
    let sql = format!(
        "SELECT {SNAPSHOT_COLUMNS} FROM snapshots WHERE location = ?1 ORDER BY ts DESC LIMIT 1"
    );
    let mut stmt = conn.prepare(&sql).map_err(|e| {
        AppError::new("DB_QUERY_FAILED", "Failed to prepare latest-snapshot query")
            .with_details(e.to_string())
    })?;

    let mut rows = stmt
        .query_map([location], snapshot_from_row)
        .map_err(|e| {
            AppError::new("DB_QUERY_FAILED", "Failed to query latest snapshot")
                .with_details(e.to_string())
        })?;

    match rows.next() {
        None => Ok(None),
        Some(r) => r.map(Some).map_err(|e| {
            AppError::new("DB_DECODE_FAILED", "Failed to decode snapshot row")
                .with_details(e.to_string())
        }),
    }
}

/// Snapshots for a location within [start, end], both RFC3339, ascending.
pub fn snapshots_in_range(
    conn: &Connection,
    location: &str,
    start: &str,
    end: &str,
) -> Result<Vec<Snapshot>, AppError> {
    let sql = format!(
        "SELECT {SNAPSHOT_COLUMNS} FROM snapshots \
         WHERE location = ?1 AND ts >= ?2 AND ts <= ?3 ORDER BY ts ASC"
    );
    let mut stmt = conn.prepare(&sql).map_err(|e| {
        AppError::new("DB_QUERY_FAILED", "Failed to prepare range query")
            .with_details(e.to_string())
    })?;

    let rows = stmt
        .query_map(params![location, start, end], snapshot_from_row)
        .map_err(|e| {
            AppError::new("DB_QUERY_FAILED", "Failed to query snapshot range")
                .with_details(e.to_string())
        })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r.map_err(|e| {
            AppError::new("DB_DECODE_FAILED", "Failed to decode snapshot row")
                .with_details(e.to_string())
        })?);
    }
    Ok(out)
}

// Metric names resolve through an allowlist so a caller-supplied name can
// never reach the SQL text.
fn metric_column(metric: &str) -> Option<&'static str> {
    Some(match metric {
        "temp_c" => "temp_c",
        "humidity_pct" => "humidity_pct",
        "wind_speed_ms" => "wind_speed_ms",
        "precip_mm" => "precip_mm",
        "pm25" => "pm25",
        "pm10" => "pm10",
        "ozone_ppm" => "ozone_ppm",
        "stock_price" => "stock_price",
        "index_value" => "index_value",
        "electricity_price_usd_kwh" => "electricity_price_usd_kwh",
        "generation_mwh" => "generation_mwh",
        "renewable_pct" => "renewable_pct",
        "grid_load_mw" => "grid_load_mw",
        "grid_utilization_pct" => "grid_utilization_pct",
        "carbon_intensity_gco2_kwh" => "carbon_intensity_gco2_kwh",
        "natural_gas_price_mmbtu" => "natural_gas_price_mmbtu",
        "ili_pct" => "ili_pct",
        "yield_per_acre" => "yield_per_acre",
        "price_per_bushel" => "price_per_bushel",
        "avg_migration_pace_km_day" => "avg_migration_pace_km_day",
        _ => return None,
    })
}

/// Time series of one numeric metric for a location within [start, end].
/// Rows where the metric is unknown are omitted.
pub fn metric_series(
    conn: &Connection,
    metric: &str,
    location: &str,
    start: &str,
    end: &str,
) -> Result<Vec<TimeSeriesPoint>, AppError> {
    let column = metric_column(metric).ok_or_else(|| {
        AppError::new("DB_UNKNOWN_METRIC", "Metric name is not queryable")
            .with_details(format!("metric={metric}"))
    })?;

    let sql = format!(
        "SELECT ts, {column} FROM snapshots \
         WHERE location = ?1 AND ts >= ?2 AND ts <= ?3 AND {column} IS NOT NULL \
         ORDER BY ts ASC"
    );
    let mut stmt = conn.prepare(&sql).map_err(|e| {
        AppError::new("DB_QUERY_FAILED", "Failed to prepare metric-series query")
            .with_details(e.to_string())
    })?;

    let rows = stmt
        .query_map(params![location, start, end], |row| {
            Ok(TimeSeriesPoint {
                ts: row.get(0)?,
                value: row.get(1)?,
            })
        })
        .map_err(|e| {
            AppError::new("DB_QUERY_FAILED", "Failed to query metric series")
                .with_details(e.to_string())
        })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r.map_err(|e| {
            AppError::new("DB_DECODE_FAILED", "Failed to decode metric row")
                .with_details(e.to_string())
        })?);
    }
    Ok(out)
}
