//! The end-to-end menu analysis pipeline.
//!
//! Wires the stages in their required order:
//! 1. Performance classifier builds the item views from menu + sales
//! 2. Profitability scorer fills the normalized score fields
//! 3. Pricing advisor emits one suggestion per view
//! 4. Preference aggregator summarizes feedback and merges it in
//! 5. Gap recommender scans the rating-aware views for empty price bands
//! 6. Demand forecaster reads the raw transactions
//! 7. Insight summarizer distills the operator digests
//!
//! The merge must precede gap detection so the category rollups see the
//! rating fields. Each `execute` re-derives everything from the dataset it
//! is handed; the pipeline keeps no state between runs beyond the advancing
//! elasticity sampler.

use serde::Serialize;

use crate::components::demand_forecaster;
use crate::components::gap_recommender;
use crate::components::insight_summarizer::{self, MenuInsights};
use crate::components::performance_classifier;
use crate::components::preference_aggregator;
use crate::components::pricing_advisor;
use crate::components::profitability_scorer;
use crate::dataset::{FeedbackRecord, InventoryRecord, MenuDataset, MenuItem, SalesTransaction};
use crate::elasticity::{ElasticitySampler, UniformElasticity};
use crate::types::{
    DemandForecast, GapRecommendation, ItemView, PerformanceCategory, PricingAction,
    PricingSuggestion,
};

/// Headline numbers for one run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PipelineSummary {
    pub total_items: usize,
    pub bestsellers: usize,
    pub underperformers: usize,
    /// Sum of per-item sales revenue.
    pub total_revenue: f64,
    /// Mean profit margin across the menu, in percent; 0.0 for an empty menu.
    pub avg_profit_margin: f64,
    /// Suggestions that recommend anything other than Maintain.
    pub pricing_adjustments: usize,
}

/// Everything one pipeline run produces.
///
/// Plain structured records throughout; consumers must tolerate `None`
/// rating fields on the views and must not assume every menu item has a
/// forecast row.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PipelineResult {
    pub items: Vec<ItemView>,
    pub pricing: Vec<PricingSuggestion>,
    pub gaps: Vec<GapRecommendation>,
    pub forecasts: Vec<DemandForecast>,
    pub insights: MenuInsights,
    pub summary: PipelineSummary,
}

/// The menu analysis pipeline with an injectable elasticity source.
pub struct MenuAnalysisPipeline {
    sampler: Box<dyn ElasticitySampler>,
}

impl MenuAnalysisPipeline {
    /// Entropy-seeded pipeline for production runs.
    pub fn new() -> Self {
        Self::with_sampler(Box::new(UniformElasticity::new()))
    }

    /// Seeded pipeline: identical datasets yield identical results.
    pub fn seeded(seed: u64) -> Self {
        Self::with_sampler(Box::new(UniformElasticity::seeded(seed)))
    }

    /// Pipeline with a custom elasticity source.
    pub fn with_sampler(sampler: Box<dyn ElasticitySampler>) -> Self {
        Self { sampler }
    }

    /// Run every stage over the dataset, in order.
    pub fn execute(&mut self, dataset: &MenuDataset) -> PipelineResult {
        log::info!(
            "analyzing menu: {} items, {} transactions, {} feedback records, {} inventory rows",
            dataset.menu_items.len(),
            dataset.sales.len(),
            dataset.feedback.len(),
            dataset.inventory.len()
        );

        let views = performance_classifier::classify(&dataset.menu_items, &dataset.sales);
        let views = profitability_scorer::score(views);
        let pricing = pricing_advisor::suggest(&views, self.sampler.as_mut());

        let views = match preference_aggregator::aggregate(&dataset.feedback) {
            Some(summaries) => preference_aggregator::merge(views, &summaries),
            None => {
                log::info!("no preference data; rating fields stay unset");
                views
            }
        };

        let gaps = gap_recommender::recommend(&views);
        let forecasts = demand_forecaster::forecast(&dataset.sales);
        let insights = insight_summarizer::summarize(&views);
        let summary = summarize_run(&views, &pricing);

        log::info!(
            "analysis complete: {} bestsellers, {} underperformers, {} pricing adjustments, {} gaps, {} forecast rows",
            summary.bestsellers,
            summary.underperformers,
            summary.pricing_adjustments,
            gaps.len(),
            forecasts.len()
        );

        PipelineResult {
            items: views,
            pricing,
            gaps,
            forecasts,
            insights,
            summary,
        }
    }
}

impl Default for MenuAnalysisPipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the full pipeline once over the four tables, entropy-seeded.
///
/// This is the plain-function form of the contract; callers that need
/// reproducible suggestions construct a [`MenuAnalysisPipeline`] instead.
pub fn run_pipeline(
    menu_items: Vec<MenuItem>,
    sales: Vec<SalesTransaction>,
    feedback: Vec<FeedbackRecord>,
    inventory: Vec<InventoryRecord>,
) -> PipelineResult {
    let dataset = MenuDataset {
        menu_items,
        sales,
        feedback,
        inventory,
    };
    MenuAnalysisPipeline::new().execute(&dataset)
}

fn summarize_run(views: &[ItemView], pricing: &[PricingSuggestion]) -> PipelineSummary {
    let bestsellers = views
        .iter()
        .filter(|v| v.performance_category == PerformanceCategory::Bestseller)
        .count();
    let underperformers = views
        .iter()
        .filter(|v| v.performance_category == PerformanceCategory::Underperformer)
        .count();
    let total_revenue = views.iter().map(|v| v.total_price).sum();
    let avg_profit_margin = if views.is_empty() {
        0.0
    } else {
        views.iter().map(|v| v.profit_margin).sum::<f64>() / views.len() as f64
    };
    let pricing_adjustments = pricing
        .iter()
        .filter(|s| s.action != PricingAction::Maintain)
        .count();

    PipelineSummary {
        total_items: views.len(),
        bestsellers,
        underperformers,
        total_revenue,
        avg_profit_margin,
        pricing_adjustments,
    }
}
