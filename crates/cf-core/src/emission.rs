//! Emission calculation.
//!
//! Maps an activity's (category, type, quantity, unit) to kilograms of CO2e
//! using fixed, illustrative factors. The calculation is total: any input it
//! does not recognise yields `0.0` instead of an error, so recording an
//! activity never fails because of an unfamiliar type.

use serde::Serialize;

use crate::category::Category;

/// Emission factors in kg CO2e per unit.
///
/// Held by [`EmissionCalculator`] rather than hard-coded so tests can supply
/// alternates. The values are not configurable at runtime.
#[derive(Debug, Clone, PartialEq)]
pub struct EmissionFactors {
    /// Average petrol car, per km.
    pub car_per_km: f64,
    pub bus_per_km: f64,
    pub train_per_km: f64,
    /// Bike and walk, per km.
    pub active_travel_per_km: f64,
    /// Short/medium haul average, per km.
    pub flight_per_km: f64,
    /// Grid electricity, per kWh.
    pub electricity_per_kwh: f64,
    /// LPG burned, per kg.
    pub lpg_per_kg: f64,
    /// Flat, per day.
    pub meat_heavy_day: f64,
    /// Flat, per day.
    pub vegetarian_day: f64,
    /// Flat, per day.
    pub vegan_day: f64,
    /// Per 1000 units of currency spent.
    pub shopping_per_thousand: f64,
}

impl Default for EmissionFactors {
    fn default() -> Self {
        Self {
            car_per_km: 0.192,
            bus_per_km: 0.105,
            train_per_km: 0.041,
            active_travel_per_km: 0.0,
            flight_per_km: 0.255,
            electricity_per_kwh: 0.7,
            lpg_per_kg: 3.0,
            meat_heavy_day: 7.0,
            vegetarian_day: 3.0,
            vegan_day: 2.0,
            shopping_per_thousand: 1.5,
        }
    }
}

/// One row of the factor table, for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactorRow {
    pub category: Category,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub factor: f64,
    pub basis: &'static str,
}

/// Units accepted by the `other` category as a direct emissions value.
const DIRECT_UNITS: [&str; 2] = ["kg", "kgco2e"];

/// Computes emissions for activities.
#[derive(Debug, Clone, Default)]
pub struct EmissionCalculator {
    factors: EmissionFactors,
}

impl EmissionCalculator {
    pub const fn new(factors: EmissionFactors) -> Self {
        Self { factors }
    }

    pub const fn factors(&self) -> &EmissionFactors {
        &self.factors
    }

    /// Returns kilograms of CO2e for an activity, rounded to 2 decimals.
    ///
    /// Category, type and unit are matched case-insensitively. Unrecognised
    /// combinations return `0.0`.
    pub fn compute(&self, category: &str, kind: &str, quantity: f64, unit: &str) -> f64 {
        let Ok(category) = category.parse::<Category>() else {
            tracing::debug!(category, kind, "unknown category, recording zero emissions");
            return 0.0;
        };
        let kind = kind.trim().to_lowercase();
        let unit = unit.trim().to_lowercase();
        let f = &self.factors;

        let emission = match category {
            Category::Transport => match kind.as_str() {
                "car" => Some(round2(quantity * f.car_per_km)),
                "bus" => Some(round2(quantity * f.bus_per_km)),
                "train" => Some(round2(quantity * f.train_per_km)),
                "bike" | "walk" => Some(round2(quantity * f.active_travel_per_km)),
                "flight" => Some(round2(quantity * f.flight_per_km)),
                _ => None,
            },
            Category::Energy => match kind.as_str() {
                "electricity" => Some(round2(quantity * f.electricity_per_kwh)),
                "lpg" => Some(round2(quantity * f.lpg_per_kg)),
                _ => None,
            },
            // Per-day flags: quantity is ignored.
            Category::Food => match kind.as_str() {
                "meat_heavy_day" => Some(f.meat_heavy_day),
                "vegetarian_day" => Some(f.vegetarian_day),
                "vegan_day" => Some(f.vegan_day),
                _ => None,
            },
            Category::Shopping => Some(round2(quantity / 1000.0 * f.shopping_per_thousand)),
            Category::Other => DIRECT_UNITS
                .contains(&unit.as_str())
                .then(|| round2(quantity)),
        };

        emission.unwrap_or_else(|| {
            tracing::debug!(%category, %kind, %unit, "no emission factor, recording zero emissions");
            0.0
        })
    }

    /// Lists the active factors in display order.
    pub fn factor_table(&self) -> Vec<FactorRow> {
        let f = &self.factors;
        let row = |category, kind, factor, basis| FactorRow {
            category,
            kind,
            factor,
            basis,
        };
        vec![
            row(Category::Transport, "car", f.car_per_km, "per km"),
            row(Category::Transport, "bus", f.bus_per_km, "per km"),
            row(Category::Transport, "train", f.train_per_km, "per km"),
            row(Category::Transport, "bike", f.active_travel_per_km, "per km"),
            row(Category::Transport, "walk", f.active_travel_per_km, "per km"),
            row(Category::Transport, "flight", f.flight_per_km, "per km"),
            row(Category::Energy, "electricity", f.electricity_per_kwh, "per kWh"),
            row(Category::Energy, "lpg", f.lpg_per_kg, "per kg"),
            row(Category::Food, "meat_heavy_day", f.meat_heavy_day, "per day"),
            row(Category::Food, "vegetarian_day", f.vegetarian_day, "per day"),
            row(Category::Food, "vegan_day", f.vegan_day, "per day"),
            row(Category::Shopping, "*", f.shopping_per_thousand, "per 1000 spent"),
            row(Category::Other, "*", 1.0, "direct kg/kgco2e"),
        ]
    }
}

/// Rounds to 2 decimal places, half away from zero.
///
/// Negative zero is folded into `0.0`. Values too large to scale by 100 are
/// returned unchanged.
pub fn round2(value: f64) -> f64 {
    let scaled = value * 100.0;
    if !scaled.is_finite() {
        return value;
    }
    let rounded = scaled.round() / 100.0;
    if rounded == 0.0 { 0.0 } else { rounded }
}
