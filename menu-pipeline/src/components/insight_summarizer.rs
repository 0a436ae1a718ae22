//! Operator-facing insight digests.
//!
//! Distills the enriched views into three quick reads: the items carrying
//! the menu (top performers by profitability), the items quietly bleeding
//! margin, and the hidden gems: highly rated Underperformers worth
//! promoting instead of cutting.

use serde::Serialize;

use crate::types::{ItemView, PerformanceCategory};

/// Items listed in the top-performer digest.
const TOP_PERFORMER_COUNT: usize = 5;
/// Margin (percent) below which an item joins the low-margin list.
const LOW_MARGIN_THRESHOLD: f64 = 20.0;
/// Average rating an Underperformer must exceed to count as a hidden gem.
const HIDDEN_GEM_RATING: f64 = 4.0;

/// A top performer and its composite score.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TopPerformer {
    pub item_id: u32,
    pub item_name: String,
    pub profitability_score: f64,
}

/// An item whose margin needs attention.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LowMarginItem {
    pub item_id: u32,
    pub item_name: String,
    pub profit_margin: f64,
}

/// A highly rated item the sales numbers are hiding.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HiddenGem {
    pub item_id: u32,
    pub item_name: String,
    pub avg_rating: f64,
    pub quantity: u64,
}

/// The three insight lists for one pipeline run.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct MenuInsights {
    /// Up to five items, highest profitability first.
    pub top_performers: Vec<TopPerformer>,
    /// Items with margin under 20%, worst margin first.
    pub low_margin_items: Vec<LowMarginItem>,
    /// Underperformers rated above 4.0, in menu order. Unrated items never
    /// qualify; no rating is not a high rating.
    pub hidden_gems: Vec<HiddenGem>,
}

/// Build the insight lists from the scored, rating-merged views.
pub fn summarize(views: &[ItemView]) -> MenuInsights {
    let mut ranked: Vec<&ItemView> = views.iter().collect();
    // Stable sort: ties keep menu order.
    ranked.sort_by(|a, b| {
        let a_score = a.profitability_score.unwrap_or(0.0);
        let b_score = b.profitability_score.unwrap_or(0.0);
        b_score.partial_cmp(&a_score).unwrap_or(std::cmp::Ordering::Equal)
    });

    let top_performers = ranked
        .iter()
        .take(TOP_PERFORMER_COUNT)
        .map(|v| TopPerformer {
            item_id: v.item_id,
            item_name: v.item_name.clone(),
            profitability_score: v.profitability_score.unwrap_or(0.0),
        })
        .collect();

    let mut low_margin_items: Vec<LowMarginItem> = views
        .iter()
        .filter(|v| v.profit_margin < LOW_MARGIN_THRESHOLD)
        .map(|v| LowMarginItem {
            item_id: v.item_id,
            item_name: v.item_name.clone(),
            profit_margin: v.profit_margin,
        })
        .collect();
    low_margin_items.sort_by(|a, b| {
        a.profit_margin
            .partial_cmp(&b.profit_margin)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let hidden_gems = views
        .iter()
        .filter(|v| {
            v.performance_category == PerformanceCategory::Underperformer
                && v.avg_rating.is_some_and(|r| r > HIDDEN_GEM_RATING)
        })
        .map(|v| HiddenGem {
            item_id: v.item_id,
            item_name: v.item_name.clone(),
            avg_rating: v.avg_rating.unwrap_or(0.0),
            quantity: v.quantity,
        })
        .collect();

    MenuInsights {
        top_performers,
        low_margin_items,
        hidden_gems,
    }
}
