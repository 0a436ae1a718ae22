//! Offline menu analytics over restaurant point-of-sale exports.
//!
//! Four CSV tables go in (menu, sales, feedback, inventory); structured
//! findings come out: per-item performance categories and profitability
//! scores, rule-based pricing suggestions, price-band gaps by category,
//! per-weekday demand forecasts, and operator-facing insight digests.
//!
//! Every stage is a pure function over plain records. The only
//! nondeterminism is the elasticity draw inside the pricing advisor, and
//! that sits behind [`elasticity::ElasticitySampler`] so runs can be seeded
//! or pinned in tests. Stages never fail; bad input is rejected once, at
//! load time, by [`MenuDataset::load_dir`].

pub mod components;
pub mod dataset;
pub mod elasticity;
pub mod error;
pub mod pipelines;
pub mod types;
pub mod util;

pub use components::gap_recommender::CategoryRollup;
pub use components::insight_summarizer::{HiddenGem, LowMarginItem, MenuInsights, TopPerformer};
pub use components::preference_aggregator::PreferenceSummary;
pub use dataset::{FeedbackRecord, InventoryRecord, MenuDataset, MenuItem, SalesTransaction};
pub use elasticity::{ElasticitySampler, FixedElasticity, UniformElasticity};
pub use error::{LoadError, LoadResult};
pub use pipelines::menu_analysis::{
    run_pipeline, MenuAnalysisPipeline, PipelineResult, PipelineSummary,
};
pub use types::{
    DemandForecast, ForecastConfidence, GapRecommendation, ItemView, OpportunityScore,
    PerformanceCategory, PriceBand, PricingAction, PricingSuggestion,
};
