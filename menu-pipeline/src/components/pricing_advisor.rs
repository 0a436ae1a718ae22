//! Rule-based pricing suggestions.
//!
//! Walks a fixed decision table per item, first match wins:
//! 1. Bestseller with margin under 30% and inelastic sampled demand
//!    (elasticity > -0.5): raise the price 10%.
//! 2. Underperformer with margin over 40%: cut the price 15% to move volume.
//! 3. Margin under 15%: review the recipe cost before touching the price.
//! 4. Otherwise: maintain.
//!
//! Expected margin changes are fixed heuristics (+8 / -5 points), not
//! recomputed from the new price. The elasticity input is sampled noise
//! rather than an estimate from data, so borderline bestsellers can flip
//! between runs unless the caller injects a deterministic sampler.

use crate::elasticity::ElasticitySampler;
use crate::types::{ItemView, PerformanceCategory, PricingAction, PricingSuggestion};
use crate::util;

/// Margin below which a bestseller counts as under-priced.
const BESTSELLER_MARGIN_CEILING: f64 = 30.0;
/// Sampled elasticity above which demand is treated as inelastic.
const INELASTIC_THRESHOLD: f64 = -0.5;
/// Price raise factor for under-priced bestsellers (+10%).
const RAISE_FACTOR: f64 = 1.10;
/// Heuristic margin gain for a raise, in percentage points.
const RAISE_MARGIN_GAIN: f64 = 8.0;
/// Margin above which an underperformer has room for a cut.
const UNDERPERFORMER_MARGIN_FLOOR: f64 = 40.0;
/// Price cut factor for high-margin underperformers (-15%).
const CUT_FACTOR: f64 = 0.85;
/// Heuristic margin loss for a cut, in percentage points.
const CUT_MARGIN_LOSS: f64 = -5.0;
/// Margin below which the recipe cost needs review.
const RECIPE_REVIEW_MARGIN: f64 = 15.0;

/// Produce one suggestion per view, in input order.
///
/// Draws exactly one elasticity value per item, in input order, so a seeded
/// sampler yields reproducible suggestions for the same views.
pub fn suggest(views: &[ItemView], sampler: &mut dyn ElasticitySampler) -> Vec<PricingSuggestion> {
    views
        .iter()
        .map(|view| suggest_one(view, sampler.sample()))
        .collect()
}

fn suggest_one(view: &ItemView, elasticity: f64) -> PricingSuggestion {
    let (action, new_price, margin_change) = if view.performance_category
        == PerformanceCategory::Bestseller
        && view.profit_margin < BESTSELLER_MARGIN_CEILING
        && elasticity > INELASTIC_THRESHOLD
    {
        (
            PricingAction::IncreasePrice,
            util::round2(view.selling_price * RAISE_FACTOR),
            RAISE_MARGIN_GAIN,
        )
    } else if view.performance_category == PerformanceCategory::Underperformer
        && view.profit_margin > UNDERPERFORMER_MARGIN_FLOOR
    {
        (
            PricingAction::DecreasePrice,
            util::round2(view.selling_price * CUT_FACTOR),
            CUT_MARGIN_LOSS,
        )
    } else if view.profit_margin < RECIPE_REVIEW_MARGIN {
        (PricingAction::ReviewRecipeCost, view.selling_price, 0.0)
    } else {
        (PricingAction::Maintain, view.selling_price, 0.0)
    };

    PricingSuggestion {
        item_id: view.item_id,
        item_name: view.item_name.clone(),
        current_price: view.selling_price,
        current_margin: view.profit_margin,
        action,
        new_price,
        expected_margin_change: margin_change,
    }
}
