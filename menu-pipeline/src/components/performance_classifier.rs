//! Menu performance classification from sales history.
//!
//! Builds one `ItemView` per menu item by left-joining per-item sales
//! aggregates onto the menu (items that never sold keep zero aggregates and
//! still get a row), then labels each item by where its revenue and volume
//! land against the menu-wide quartiles:
//! - Bestseller: revenue >= p75 AND quantity >= p75
//! - Underperformer: revenue <= p25 AND quantity <= p25
//! - Average: everything else
//!
//! The first matching rule wins, so the two labels can never overlap. The
//! gross profit margin computed here feeds the pricing advisor downstream.

use std::collections::HashMap;

use crate::dataset::{MenuItem, SalesTransaction};
use crate::types::{ItemView, PerformanceCategory};
use crate::util;

/// Revenue/quantity percentile at or above which an item is a Bestseller.
const BESTSELLER_PERCENTILE: f64 = 0.75;
/// Revenue/quantity percentile at or below which an item is an Underperformer.
const UNDERPERFORMER_PERCENTILE: f64 = 0.25;

/// Per-item sales totals produced by the join.
#[derive(Clone, Copy, Debug, Default)]
struct SalesTotals {
    quantity: u64,
    revenue: f64,
    order_count: u64,
}

/// Quartile cutoffs computed over the joined item set.
#[derive(Clone, Copy, Debug)]
struct QuartileThresholds {
    revenue_p75: f64,
    revenue_p25: f64,
    quantity_p75: f64,
    quantity_p25: f64,
}

/// Classify every menu item against the quartiles of the joined item set.
///
/// Transactions referencing ids that are not on the menu are ignored by the
/// join. Zero-sales items participate in the quartiles like any other row.
/// A single-item menu collapses both quartiles onto that item's own values,
/// so the Bestseller rule matches first; degenerate but defined.
pub fn classify(menu: &[MenuItem], sales: &[SalesTransaction]) -> Vec<ItemView> {
    if menu.is_empty() {
        return Vec::new();
    }
    if menu.len() == 1 {
        log::warn!("single-item menu: quartiles collapse and the item classifies as Bestseller");
    }

    let totals = aggregate_sales(sales);

    let mut views: Vec<ItemView> = menu
        .iter()
        .map(|item| {
            let t = totals.get(&item.item_id).copied().unwrap_or_default();
            ItemView {
                item_id: item.item_id,
                item_name: item.item_name.clone(),
                category: item.category.clone(),
                selling_price: item.selling_price,
                cost_price: item.cost_price,
                quantity: t.quantity,
                total_price: t.revenue,
                order_count: t.order_count,
                profit_margin: profit_margin(item.selling_price, item.cost_price),
                ..ItemView::default()
            }
        })
        .collect();

    let cutoffs = quartile_thresholds(&views);
    for view in &mut views {
        view.performance_category = categorize(view.total_price, view.quantity as f64, &cutoffs);
    }

    views
}

/// Gross margin as a percentage of the selling price.
///
/// The ratio is undefined at a zero selling price; the margin is defined as
/// 0.0 there so downstream arithmetic never sees NaN or infinity.
pub fn profit_margin(selling_price: f64, cost_price: f64) -> f64 {
    if selling_price == 0.0 {
        return 0.0;
    }
    (selling_price - cost_price) / selling_price * 100.0
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Sum quantity and revenue and count transactions per menu item.
fn aggregate_sales(sales: &[SalesTransaction]) -> HashMap<u32, SalesTotals> {
    let mut totals: HashMap<u32, SalesTotals> = HashMap::new();
    for tx in sales {
        let entry = totals.entry(tx.menu_item_id).or_default();
        entry.quantity += u64::from(tx.quantity);
        entry.revenue += tx.total_price;
        entry.order_count += 1;
    }
    totals
}

fn quartile_thresholds(views: &[ItemView]) -> QuartileThresholds {
    let revenues: Vec<f64> = views.iter().map(|v| v.total_price).collect();
    let quantities: Vec<f64> = views.iter().map(|v| v.quantity as f64).collect();
    QuartileThresholds {
        revenue_p75: util::percentile(&revenues, BESTSELLER_PERCENTILE),
        revenue_p25: util::percentile(&revenues, UNDERPERFORMER_PERCENTILE),
        quantity_p75: util::percentile(&quantities, BESTSELLER_PERCENTILE),
        quantity_p25: util::percentile(&quantities, UNDERPERFORMER_PERCENTILE),
    }
}

fn categorize(revenue: f64, quantity: f64, cutoffs: &QuartileThresholds) -> PerformanceCategory {
    if revenue >= cutoffs.revenue_p75 && quantity >= cutoffs.quantity_p75 {
        PerformanceCategory::Bestseller
    } else if revenue <= cutoffs.revenue_p25 && quantity <= cutoffs.quantity_p25 {
        PerformanceCategory::Underperformer
    } else {
        PerformanceCategory::Average
    }
}
