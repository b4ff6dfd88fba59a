use crate::domain::Snapshot;

/// Render a snapshot as one deterministic natural-language line.
///
/// The location/timestamp clause is always present. After it, one clause per
/// domain group that has at least one known nonzero field, in fixed order:
/// weather, air quality, wildlife, equity, market index, energy, health,
/// agriculture, disasters. Identical snapshots always yield byte-identical
/// text; this is what gets embedded, so formatting changes invalidate stored
/// vectors.
pub fn generate_summary(snap: &Snapshot) -> String {
    let mut parts: Vec<String> = Vec::new();

    parts.push(format!("Location: {} at {}", snap.location, snap.ts));

    let w = &snap.weather;
    if present(w.temp_c) || present(w.humidity_pct) {
        let mut clause = format!(
            "Weather: {:.1} C, {:.0}% humidity, wind {:.1} m/s",
            w.temp_c.unwrap_or(0.0),
            w.humidity_pct.unwrap_or(0.0),
            w.wind_speed_ms.unwrap_or(0.0)
        );
        if let Some(p) = w.precip_mm.filter(|p| *p > 0.0) {
            clause.push_str(&format!(", {p:.1}mm precipitation"));
        }
        parts.push(clause);
    }

    let a = &snap.air;
    if present(a.pm25) || present(a.pm10) {
        let pm25 = a.pm25.unwrap_or(0.0);
        let mut clause = format!(
            "Air quality: PM2.5 {:.1} ug/m3 ({}), PM10 {:.1} ug/m3",
            pm25,
            pm25_category(pm25),
            a.pm10.unwrap_or(0.0)
        );
        if let Some(o3) = a.ozone_ppm.filter(|o| *o > 0.0) {
            clause.push_str(&format!(", O3 {o3:.2} ppm"));
        }
        parts.push(clause);
    }

    let wl = &snap.wildlife;
    if count_present(wl.active_species) || count_present(wl.animals_tracked) {
        parts.push(format!(
            "Wildlife: {} species, {} animals tracked, {:.1} km/day pace",
            wl.active_species.unwrap_or(0),
            wl.animals_tracked.unwrap_or(0),
            wl.avg_migration_pace_km_day.unwrap_or(0.0)
        ));
    }

    let f = &snap.finance;
    if present(f.stock_price) {
        parts.push(format!(
            "Equity: {} at ${:.2}",
            f.stock_symbol.as_deref().unwrap_or("?"),
            f.stock_price.unwrap_or(0.0)
        ));
    }
    if present(f.index_value) {
        parts.push(format!(
            "Market index: {:.2} (vol {})",
            f.index_value.unwrap_or(0.0),
            f.volume_traded.unwrap_or(0)
        ));
    }

    let e = &snap.energy;
    if present(e.electricity_price_usd_kwh) || present(e.generation_mwh) || present(e.renewable_pct)
    {
        parts.push(format!(
            "Energy: ${:.4}/kWh, {:.0} MWh generated, {:.1}% renewable, {:.0} gCO2/kWh",
            e.electricity_price_usd_kwh.unwrap_or(0.0),
            e.generation_mwh.unwrap_or(0.0),
            e.renewable_pct.unwrap_or(0.0),
            e.carbon_intensity_gco2_kwh.unwrap_or(0.0)
        ));
    }

    let h = &snap.health;
    if count_present(h.flu_cases) || present(h.ili_pct) {
        parts.push(format!(
            "Health: {} flu cases, {:.1}% ILI",
            h.flu_cases.unwrap_or(0),
            h.ili_pct.unwrap_or(0.0)
        ));
    }

    let ag = &snap.agriculture;
    if present(ag.yield_per_acre) {
        parts.push(format!(
            "Agriculture: {} yield {:.1} bu/acre, ${:.2}/bu",
            ag.crop_type.as_deref().unwrap_or("crop"),
            ag.yield_per_acre.unwrap_or(0.0),
            ag.price_per_bushel.unwrap_or(0.0)
        ));
    }

    let d = &snap.disasters;
    if count_present(d.active_disasters) {
        parts.push(format!(
            "Disasters: {} active ({}, severity {}), {} counties affected",
            d.active_disasters.unwrap_or(0),
            d.top_incident_type.as_deref().unwrap_or("unknown"),
            d.severity.unwrap_or(0),
            d.affected_counties.unwrap_or(0)
        ));
    }

    parts.join(". ")
}

/// Qualitative PM2.5 bucket (ug/m3). Upper boundary of each bucket is
/// inclusive: [0, 12.0] Good, (12.0, 35.4] Moderate, (35.4, 55.4] Unhealthy
/// for Sensitive Groups, (55.4, 150.4] Unhealthy, (150.4, 250.4] Very
/// Unhealthy, above that Hazardous.
pub fn pm25_category(pm25: f64) -> &'static str {
    if pm25 <= 12.0 {
        "Good"
    } else if pm25 <= 35.4 {
        "Moderate"
    } else if pm25 <= 55.4 {
        "Unhealthy for Sensitive Groups"
    } else if pm25 <= 150.4 {
        "Unhealthy"
    } else if pm25 <= 250.4 {
        "Very Unhealthy"
    } else {
        "Hazardous"
    }
}

// A field counts as present when it is known and nonzero; zero reads as
// "unknown" for clause selection even when stored explicitly.
fn present(v: Option<f64>) -> bool {
    matches!(v, Some(x) if x != 0.0)
}

fn count_present(v: Option<i64>) -> bool {
    matches!(v, Some(x) if x != 0)
}
