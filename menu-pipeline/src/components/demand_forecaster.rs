//! Per-weekday demand forecasting from daily sales history.
//!
//! The model is deliberately simple: collapse transactions into one
//! observation per item per calendar day, then take the mean quantity per
//! weekday. Weekdays the item never sold on fall back to the item's overall
//! daily mean. Items with ten or fewer observed days are excluded outright
//! rather than given a low-confidence guess, so callers must not assume
//! every menu item appears in the output.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::dataset::SalesTransaction;
use crate::types::{DemandForecast, ForecastConfidence};

/// An item needs strictly more observed days than this to be forecast.
const MIN_OBSERVATIONS: usize = 10;
/// Strictly more observed days than this earns High confidence.
const HIGH_CONFIDENCE_OBSERVATIONS: usize = 30;
/// Forecast days, Monday = 0 .. Sunday = 6.
const DAYS_PER_WEEK: u8 = 7;

/// One item-day of summed sales, with derived calendar features.
///
/// `is_weekend` and `month` are carried for consumers building richer
/// features; the forecast itself only reads `day_of_week`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DailyObservation {
    pub menu_item_id: u32,
    pub date: NaiveDate,
    pub quantity: u64,
    /// 0 = Monday .. 6 = Sunday.
    pub day_of_week: u8,
    pub is_weekend: bool,
    /// 1 = January .. 12 = December.
    pub month: u32,
}

/// Sum transaction quantities into per-(item, day) observations.
///
/// Output sorted by item id, then date.
pub fn daily_observations(sales: &[SalesTransaction]) -> Vec<DailyObservation> {
    let mut totals: BTreeMap<(u32, NaiveDate), u64> = BTreeMap::new();
    for tx in sales {
        *totals.entry((tx.menu_item_id, tx.date)).or_insert(0) += u64::from(tx.quantity);
    }

    totals
        .into_iter()
        .map(|((menu_item_id, date), quantity)| {
            let day_of_week = date.weekday().num_days_from_monday() as u8;
            DailyObservation {
                menu_item_id,
                date,
                quantity,
                day_of_week,
                is_weekend: day_of_week >= 5,
                month: date.month(),
            }
        })
        .collect()
}

/// Forecast demand per weekday for every item with enough history.
///
/// Emits seven rows (Monday through Sunday) per included item, ordered by
/// item id then day.
pub fn forecast(sales: &[SalesTransaction]) -> Vec<DemandForecast> {
    let observations = daily_observations(sales);

    let mut forecasts = Vec::new();
    let mut idx = 0;
    while idx < observations.len() {
        let item_id = observations[idx].menu_item_id;
        let start = idx;
        while idx < observations.len() && observations[idx].menu_item_id == item_id {
            idx += 1;
        }
        let item_days = &observations[start..idx];

        if item_days.len() <= MIN_OBSERVATIONS {
            log::debug!(
                "item {}: only {} observed days, below the forecast minimum; skipped",
                item_id,
                item_days.len()
            );
            continue;
        }

        forecasts.extend(forecast_item(item_id, item_days));
    }

    forecasts
}

/// Weekly pattern for one item: mean per observed weekday, overall daily
/// mean for the rest, rounded to whole units.
fn forecast_item(item_id: u32, observations: &[DailyObservation]) -> Vec<DemandForecast> {
    let mut sums = [0u64; DAYS_PER_WEEK as usize];
    let mut counts = [0u64; DAYS_PER_WEEK as usize];
    for obs in observations {
        sums[obs.day_of_week as usize] += obs.quantity;
        counts[obs.day_of_week as usize] += 1;
    }

    let total: u64 = observations.iter().map(|o| o.quantity).sum();
    let overall_mean = total as f64 / observations.len() as f64;
    let confidence = if observations.len() > HIGH_CONFIDENCE_OBSERVATIONS {
        ForecastConfidence::High
    } else {
        ForecastConfidence::Medium
    };

    (0..DAYS_PER_WEEK)
        .map(|day| {
            let d = day as usize;
            let mean = if counts[d] > 0 {
                sums[d] as f64 / counts[d] as f64
            } else {
                overall_mean
            };
            DemandForecast {
                menu_item_id: item_id,
                day_of_week: day,
                predicted_demand: mean.max(0.0).round() as u32,
                confidence,
            }
        })
        .collect()
}
