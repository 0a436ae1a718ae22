pub mod performance_classifier;
pub mod profitability_scorer;
pub mod pricing_advisor;
pub mod preference_aggregator;
pub mod gap_recommender;
pub mod demand_forecaster;
pub mod insight_summarizer;
