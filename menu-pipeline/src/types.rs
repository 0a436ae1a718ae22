use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Item view types
// ---------------------------------------------------------------------------

/// Where an item's sales performance lands relative to the rest of the menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum PerformanceCategory {
    Bestseller,
    Underperformer,
    Average,
}

impl fmt::Display for PerformanceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PerformanceCategory::Bestseller => write!(f, "Bestseller"),
            PerformanceCategory::Underperformer => write!(f, "Underperformer"),
            PerformanceCategory::Average => write!(f, "Average"),
        }
    }
}

/// The per-item analysis row flowing through the pipeline.
///
/// Built by the performance classifier (one row per menu item, left-joined
/// sales aggregates with zero fill) and enriched in place by later stages:
/// the profitability scorer fills the score fields, the preference merge
/// fills the rating fields. A field still `None` means the stage that owns
/// it had no data for this item, which is not the same as zero.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ItemView {
    pub item_id: u32,
    pub item_name: String,
    pub category: String,
    pub selling_price: f64,
    pub cost_price: f64,

    // Sales aggregates (zero when the item never sold)
    pub quantity: u64,
    pub total_price: f64,
    pub order_count: u64,

    pub performance_category: PerformanceCategory,
    /// Gross margin as a percentage of selling price. Defined as 0.0 when
    /// the selling price is zero, where the ratio would be undefined.
    pub profit_margin: f64,

    // Scoring fields (populated by the profitability scorer)
    pub revenue_score: Option<f64>,
    pub volume_score: Option<f64>,
    pub margin_score: Option<f64>,
    pub profitability_score: Option<f64>,

    // Feedback fields (populated by the preference merge)
    pub avg_rating: Option<f64>,
    pub rating_count: Option<u64>,
}

impl Default for ItemView {
    fn default() -> Self {
        Self {
            item_id: 0,
            item_name: String::new(),
            category: String::new(),
            selling_price: 0.0,
            cost_price: 0.0,
            quantity: 0,
            total_price: 0.0,
            order_count: 0,
            performance_category: PerformanceCategory::Average,
            profit_margin: 0.0,
            revenue_score: None,
            volume_score: None,
            margin_score: None,
            profitability_score: None,
            avg_rating: None,
            rating_count: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Pricing types
// ---------------------------------------------------------------------------

/// What to do with an item's price.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum PricingAction {
    Maintain,
    IncreasePrice,
    DecreasePrice,
    ReviewRecipeCost,
}

impl fmt::Display for PricingAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingAction::Maintain => write!(f, "Maintain"),
            PricingAction::IncreasePrice => write!(f, "Increase Price"),
            PricingAction::DecreasePrice => write!(f, "Decrease Price"),
            PricingAction::ReviewRecipeCost => write!(f, "Review Recipe Cost"),
        }
    }
}

/// One pricing suggestion per menu item, in menu order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PricingSuggestion {
    pub item_id: u32,
    pub item_name: String,
    pub current_price: f64,
    /// Gross margin at the current price, in percent.
    pub current_margin: f64,
    pub action: PricingAction,
    /// Equal to `current_price` unless the action moves the price.
    pub new_price: f64,
    /// Heuristic margin shift in percentage points; 0.0 for non-moves.
    pub expected_margin_change: f64,
}

// ---------------------------------------------------------------------------
// Gap recommendation types
// ---------------------------------------------------------------------------

/// The fixed price bands scanned for assortment gaps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum PriceBand {
    Budget,
    MidRange,
    Premium,
}

impl PriceBand {
    /// All bands, in ascending price order.
    pub const ALL: [PriceBand; 3] = [PriceBand::Budget, PriceBand::MidRange, PriceBand::Premium];

    /// Half-open price interval `[low, high)` covered by this band.
    /// Items priced at 100 or above fall outside every band.
    pub fn bounds(self) -> (f64, f64) {
        match self {
            PriceBand::Budget => (0.0, 15.0),
            PriceBand::MidRange => (15.0, 30.0),
            PriceBand::Premium => (30.0, 100.0),
        }
    }

    pub fn contains(self, price: f64) -> bool {
        let (low, high) = self.bounds();
        price >= low && price < high
    }

    /// Band midpoint, used as the suggested price when the band is empty.
    pub fn midpoint(self) -> f64 {
        let (low, high) = self.bounds();
        (low + high) / 2.0
    }
}

impl fmt::Display for PriceBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceBand::Budget => write!(f, "Budget"),
            PriceBand::MidRange => write!(f, "Mid-range"),
            PriceBand::Premium => write!(f, "Premium"),
        }
    }
}

/// How promising a detected gap looks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum OpportunityScore {
    High,
    Medium,
    Low,
}

impl fmt::Display for OpportunityScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpportunityScore::High => write!(f, "High"),
            OpportunityScore::Medium => write!(f, "Medium"),
            OpportunityScore::Low => write!(f, "Low"),
        }
    }
}

/// An empty price band in a top-performing category.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GapRecommendation {
    pub category: String,
    pub price_band: PriceBand,
    /// Midpoint of the empty band.
    pub suggested_price: f64,
    pub opportunity: OpportunityScore,
}

// ---------------------------------------------------------------------------
// Forecast types
// ---------------------------------------------------------------------------

/// How much history backs a forecast.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ForecastConfidence {
    High,
    Medium,
}

impl fmt::Display for ForecastConfidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForecastConfidence::High => write!(f, "High"),
            ForecastConfidence::Medium => write!(f, "Medium"),
        }
    }
}

/// Predicted demand for one item on one weekday.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DemandForecast {
    pub menu_item_id: u32,
    /// 0 = Monday .. 6 = Sunday.
    pub day_of_week: u8,
    /// Units per day, rounded to the nearest whole unit.
    pub predicted_demand: u32,
    pub confidence: ForecastConfidence,
}
