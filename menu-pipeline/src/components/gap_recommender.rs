//! Menu assortment gap detection.
//!
//! Rolls the scored views up by category, ranks categories by mean
//! profitability, and scans the top three for price bands containing no
//! item at all. An empty band in a category that already earns well is a
//! gap worth filling; the suggested price is the band midpoint.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;

use crate::types::{GapRecommendation, ItemView, OpportunityScore, PriceBand};

/// Number of top categories scanned for gaps.
const TOP_CATEGORY_COUNT: usize = 3;

/// Per-category aggregate used to rank categories.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CategoryRollup {
    pub category: String,
    /// Mean profitability score across the category's items; unscored items
    /// count as 0.
    pub mean_profitability: f64,
    pub total_quantity: u64,
    pub total_revenue: f64,
    /// Mean of the items' average ratings, skipping unrated items. `None`
    /// when nothing in the category has a rating.
    pub mean_rating: Option<f64>,
}

/// Roll the views up by category.
///
/// Sorted by mean profitability descending, ties broken by category name
/// ascending, so the ranking is identical run over run.
pub fn category_rollups(views: &[ItemView]) -> Vec<CategoryRollup> {
    #[derive(Default)]
    struct Acc {
        count: u64,
        profitability_sum: f64,
        quantity: u64,
        revenue: f64,
        rating_sum: f64,
        rating_count: u64,
    }

    let mut groups: HashMap<&str, Acc> = HashMap::new();
    for view in views {
        let acc = groups.entry(view.category.as_str()).or_default();
        acc.count += 1;
        acc.profitability_sum += view.profitability_score.unwrap_or(0.0);
        acc.quantity += view.quantity;
        acc.revenue += view.total_price;
        if let Some(rating) = view.avg_rating {
            acc.rating_sum += rating;
            acc.rating_count += 1;
        }
    }

    let mut rollups: Vec<CategoryRollup> = groups
        .into_iter()
        .map(|(category, acc)| CategoryRollup {
            category: category.to_string(),
            mean_profitability: acc.profitability_sum / acc.count as f64,
            total_quantity: acc.quantity,
            total_revenue: acc.revenue,
            mean_rating: (acc.rating_count > 0).then(|| acc.rating_sum / acc.rating_count as f64),
        })
        .collect();

    rollups.sort_by(|a, b| {
        b.mean_profitability
            .partial_cmp(&a.mean_profitability)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.category.cmp(&b.category))
    });

    rollups
}

/// Emit one recommendation per (top category, empty band) pair.
///
/// Bands are checked against the category's full item list. An item priced
/// at 100 or above sits outside every band, so a category holding only such
/// items gaps in all three. Output order: categories by rank, bands in
/// ascending price order.
pub fn recommend(views: &[ItemView]) -> Vec<GapRecommendation> {
    let rollups = category_rollups(views);

    let mut recommendations = Vec::new();
    for rollup in rollups.iter().take(TOP_CATEGORY_COUNT) {
        for band in PriceBand::ALL {
            let covered = views
                .iter()
                .any(|v| v.category == rollup.category && band.contains(v.selling_price));
            if !covered {
                recommendations.push(GapRecommendation {
                    category: rollup.category.clone(),
                    price_band: band,
                    suggested_price: band.midpoint(),
                    opportunity: OpportunityScore::High,
                });
            }
        }
    }

    recommendations
}
