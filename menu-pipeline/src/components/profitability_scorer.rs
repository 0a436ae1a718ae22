//! Composite profitability scoring.
//!
//! Min-max normalizes revenue, sales volume, and profit margin across the
//! whole menu and blends them into one profitability score per item:
//!   score = 0.4 * revenue + 0.3 * volume + 0.3 * margin
//! The weights sum to 1, so the composite stays in [0, 1]. A metric that is
//! constant across the menu has no spread and contributes 0.0 everywhere.

use crate::types::ItemView;
use crate::util;

/// Weight of normalized revenue in the composite score.
const REVENUE_WEIGHT: f64 = 0.4;
/// Weight of normalized sales volume.
const VOLUME_WEIGHT: f64 = 0.3;
/// Weight of normalized profit margin.
const MARGIN_WEIGHT: f64 = 0.3;

/// Fill the four score fields on every view.
///
/// Normalization spans the full input set, so the scores only mean anything
/// relative to the menu they were computed against.
pub fn score(mut views: Vec<ItemView>) -> Vec<ItemView> {
    if views.is_empty() {
        return views;
    }

    let revenues: Vec<f64> = views.iter().map(|v| v.total_price).collect();
    let volumes: Vec<f64> = views.iter().map(|v| v.quantity as f64).collect();
    let margins: Vec<f64> = views.iter().map(|v| v.profit_margin).collect();

    for (metric, values) in [("revenue", &revenues), ("volume", &volumes), ("margin", &margins)] {
        if values.len() > 1 && util::is_constant(values) {
            log::warn!(
                "menu-wide {} has no spread; every {} score normalizes to 0.0",
                metric,
                metric
            );
        }
    }

    let revenue_scores = util::min_max_normalize(&revenues);
    let volume_scores = util::min_max_normalize(&volumes);
    let margin_scores = util::min_max_normalize(&margins);

    for (i, view) in views.iter_mut().enumerate() {
        view.revenue_score = Some(revenue_scores[i]);
        view.volume_score = Some(volume_scores[i]);
        view.margin_score = Some(margin_scores[i]);
        view.profitability_score = Some(
            REVENUE_WEIGHT * revenue_scores[i]
                + VOLUME_WEIGHT * volume_scores[i]
                + MARGIN_WEIGHT * margin_scores[i],
        );
    }

    views
}
