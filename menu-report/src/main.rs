use std::env;
use std::process;
use std::time::Instant;

use chrono::Utc;
use serde::Serialize;

use menu_pipeline::pipelines::menu_analysis::{MenuAnalysisPipeline, PipelineResult};
use menu_pipeline::types::{ItemView, PricingAction, PricingSuggestion};
use menu_pipeline::MenuDataset;

// ---------------------------------------------------------------------------
// JSON output contract
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct ReportJson {
    generated_at: String,
    data_dir: String,
    load_ms: u128,
    pipeline_ms: u128,
    items: Vec<ItemJson>,
    pricing: Vec<PricingJson>,
    gaps: Vec<GapJson>,
    forecasts: Vec<ForecastJson>,
    insights: InsightsJson,
    summary: SummaryJson,
}

#[derive(Serialize)]
struct ItemJson {
    item_id: u32,
    item_name: String,
    category: String,
    selling_price: f64,
    performance: String,
    profit_margin: f64,
    quantity: u64,
    revenue: f64,
    order_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    profitability_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    avg_rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rating_count: Option<u64>,
}

#[derive(Serialize)]
struct PricingJson {
    item_id: u32,
    item_name: String,
    action: String,
    current_price: f64,
    new_price: f64,
    current_margin: f64,
    expected_margin_change: f64,
    context: String,
}

#[derive(Serialize)]
struct GapJson {
    category: String,
    price_band: String,
    suggested_price: f64,
    opportunity: String,
}

#[derive(Serialize)]
struct ForecastJson {
    menu_item_id: u32,
    day: String,
    predicted_demand: u32,
    confidence: String,
}

#[derive(Serialize)]
struct InsightsJson {
    top_performers: Vec<TopPerformerJson>,
    low_margin_items: Vec<LowMarginJson>,
    hidden_gems: Vec<HiddenGemJson>,
}

#[derive(Serialize)]
struct TopPerformerJson {
    item_id: u32,
    item_name: String,
    profitability_score: f64,
}

#[derive(Serialize)]
struct LowMarginJson {
    item_id: u32,
    item_name: String,
    profit_margin: f64,
}

#[derive(Serialize)]
struct HiddenGemJson {
    item_id: u32,
    item_name: String,
    avg_rating: f64,
    quantity: u64,
}

#[derive(Serialize)]
struct SummaryJson {
    total_items: usize,
    bestsellers: usize,
    underperformers: usize,
    total_revenue: f64,
    avg_profit_margin: f64,
    pricing_adjustments: usize,
}

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

fn weekday_name(day: u8) -> &'static str {
    WEEKDAYS.get(day as usize).copied().unwrap_or("?")
}

/// Generate a human-readable context string for a pricing suggestion.
fn generate_context(suggestion: &PricingSuggestion) -> String {
    match suggestion.action {
        PricingAction::IncreasePrice => format!(
            "Bestseller at {:.0}% margin with inelastic demand sampled. Raising to ${:.2} should add roughly {:.0} margin points.",
            suggestion.current_margin, suggestion.new_price, suggestion.expected_margin_change
        ),
        PricingAction::DecreasePrice => format!(
            "Underperformer with {:.0}% margin headroom. Cutting to ${:.2} trades about {:.0} margin points for volume.",
            suggestion.current_margin,
            suggestion.new_price,
            suggestion.expected_margin_change.abs()
        ),
        PricingAction::ReviewRecipeCost => format!(
            "Margin of {:.1}% is below the 15% floor. Re-cost ingredients or portions before touching the price.",
            suggestion.current_margin
        ),
        PricingAction::Maintain => {
            "Margin and demand are balanced at the current price.".to_string()
        }
    }
}

fn item_json(view: &ItemView) -> ItemJson {
    ItemJson {
        item_id: view.item_id,
        item_name: view.item_name.clone(),
        category: view.category.clone(),
        selling_price: view.selling_price,
        performance: view.performance_category.to_string(),
        profit_margin: view.profit_margin,
        quantity: view.quantity,
        revenue: view.total_price,
        order_count: view.order_count,
        profitability_score: view.profitability_score,
        avg_rating: view.avg_rating,
        rating_count: view.rating_count,
    }
}

fn build_json(
    result: &PipelineResult,
    data_dir: &str,
    load_ms: u128,
    pipeline_ms: u128,
) -> ReportJson {
    ReportJson {
        generated_at: Utc::now().to_rfc3339(),
        data_dir: data_dir.to_string(),
        load_ms,
        pipeline_ms,
        items: result.items.iter().map(item_json).collect(),
        pricing: result
            .pricing
            .iter()
            .map(|s| PricingJson {
                item_id: s.item_id,
                item_name: s.item_name.clone(),
                action: s.action.to_string(),
                current_price: s.current_price,
                new_price: s.new_price,
                current_margin: s.current_margin,
                expected_margin_change: s.expected_margin_change,
                context: generate_context(s),
            })
            .collect(),
        gaps: result
            .gaps
            .iter()
            .map(|g| GapJson {
                category: g.category.clone(),
                price_band: g.price_band.to_string(),
                suggested_price: g.suggested_price,
                opportunity: g.opportunity.to_string(),
            })
            .collect(),
        forecasts: result
            .forecasts
            .iter()
            .map(|f| ForecastJson {
                menu_item_id: f.menu_item_id,
                day: weekday_name(f.day_of_week).to_string(),
                predicted_demand: f.predicted_demand,
                confidence: f.confidence.to_string(),
            })
            .collect(),
        insights: InsightsJson {
            top_performers: result
                .insights
                .top_performers
                .iter()
                .map(|t| TopPerformerJson {
                    item_id: t.item_id,
                    item_name: t.item_name.clone(),
                    profitability_score: t.profitability_score,
                })
                .collect(),
            low_margin_items: result
                .insights
                .low_margin_items
                .iter()
                .map(|i| LowMarginJson {
                    item_id: i.item_id,
                    item_name: i.item_name.clone(),
                    profit_margin: i.profit_margin,
                })
                .collect(),
            hidden_gems: result
                .insights
                .hidden_gems
                .iter()
                .map(|g| HiddenGemJson {
                    item_id: g.item_id,
                    item_name: g.item_name.clone(),
                    avg_rating: g.avg_rating,
                    quantity: g.quantity,
                })
                .collect(),
        },
        summary: SummaryJson {
            total_items: result.summary.total_items,
            bestsellers: result.summary.bestsellers,
            underperformers: result.summary.underperformers,
            total_revenue: result.summary.total_revenue,
            avg_profit_margin: result.summary.avg_profit_margin,
            pricing_adjustments: result.summary.pricing_adjustments,
        },
    }
}

// ---------------------------------------------------------------------------
// Human-readable output
// ---------------------------------------------------------------------------

/// Format a number with comma thousands separators.
fn format_dollars(amount: f64) -> String {
    let whole = amount.abs() as u64;
    let sign = if amount < 0.0 { "-" } else { "" };

    if whole < 1_000 {
        return format!("{}{}", sign, whole);
    }

    let s = whole.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    format!("{}{}", sign, result.chars().rev().collect::<String>())
}

fn print_human(result: &PipelineResult, load_ms: u128, pipeline_ms: u128) {
    println!();
    println!("  \u{2554}{}\u{2557}", "\u{2550}".repeat(62));
    println!("  \u{2551}            MENU OPTIMIZER \u{2014} Menu Analysis Digest             \u{2551}");
    println!("  \u{255a}{}\u{255d}", "\u{2550}".repeat(62));
    println!();

    let s = &result.summary;
    println!(
        "  {} items analyzed  \u{00b7}  {} bestsellers  \u{00b7}  {} underperformers",
        s.total_items, s.bestsellers, s.underperformers
    );
    println!(
        "  ${} total revenue  \u{00b7}  {:.1}% average margin  \u{00b7}  {} pricing moves",
        format_dollars(s.total_revenue),
        s.avg_profit_margin,
        s.pricing_adjustments
    );
    println!();

    let moves: Vec<&PricingSuggestion> = result
        .pricing
        .iter()
        .filter(|p| p.action != PricingAction::Maintain)
        .collect();
    if moves.is_empty() {
        println!("  No pricing moves recommended. The menu is where it should be.");
    } else {
        println!("  Pricing moves");
        println!("  {:\u{2500}<64}", "");
        for (i, suggestion) in moves.iter().enumerate() {
            println!(
                "  {}. {:24} {:18} ${:>6.2} \u{2192} ${:>6.2}",
                i + 1,
                suggestion.item_name,
                format!("{}", suggestion.action),
                suggestion.current_price,
                suggestion.new_price,
            );
            println!("     {}", generate_context(suggestion));
            println!();
        }
    }

    if !result.gaps.is_empty() {
        println!("  Menu gaps");
        println!("  {:\u{2500}<64}", "");
        for gap in &result.gaps {
            println!(
                "  {:16} {:10} try around ${:.2}  (opportunity: {})",
                gap.category, gap.price_band, gap.suggested_price, gap.opportunity
            );
        }
        println!();
    }

    if !result.insights.top_performers.is_empty() {
        println!("  Top performers");
        println!("  {:\u{2500}<64}", "");
        for (i, top) in result.insights.top_performers.iter().enumerate() {
            println!(
                "  {}. {:24} score {:.2}",
                i + 1,
                top.item_name,
                top.profitability_score
            );
        }
        println!();
    }

    if !result.insights.hidden_gems.is_empty() {
        println!("  Hidden gems (loved but barely selling)");
        println!("  {:\u{2500}<64}", "");
        for gem in &result.insights.hidden_gems {
            println!(
                "  {:24} rated {:.1} but only {} sold",
                gem.item_name, gem.avg_rating, gem.quantity
            );
        }
        println!();
    }

    if !result.forecasts.is_empty() {
        let mut item_ids: Vec<u32> = result.forecasts.iter().map(|f| f.menu_item_id).collect();
        item_ids.dedup();
        println!("  Demand forecast ({} items with enough history)", item_ids.len());
        println!("  {:\u{2500}<64}", "");
        for id in item_ids {
            let name = result
                .items
                .iter()
                .find(|v| v.item_id == id)
                .map(|v| v.item_name.as_str())
                .unwrap_or("?");
            let week: Vec<String> = result
                .forecasts
                .iter()
                .filter(|f| f.menu_item_id == id)
                .map(|f| format!("{} {}", weekday_name(f.day_of_week), f.predicted_demand))
                .collect();
            let confidence = result
                .forecasts
                .iter()
                .find(|f| f.menu_item_id == id)
                .map(|f| f.confidence.to_string())
                .unwrap_or_default();
            println!("  {:24} {}  ({} confidence)", name, week.join("  "), confidence);
        }
        println!();
    }

    println!(
        "  \u{23f1}  CSV loaded in {}ms \u{00b7} Pipeline ran in {}ms \u{00b7} Total {}ms",
        load_ms,
        pipeline_ms,
        load_ms + pipeline_ms
    );
    println!();
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: menu-report <data-dir> [--seed N] [--json]");
        eprintln!();
        eprintln!("Expects four CSV files in <data-dir>:");
        eprintln!("  menu_items.csv, sales_transactions.csv,");
        eprintln!("  customer_feedback.csv, inventory.csv");
        eprintln!();
        eprintln!("Options:");
        eprintln!("  --seed     Seed the elasticity sampler for reproducible suggestions");
        eprintln!("  --json     Output as JSON instead of formatted text");
        eprintln!();
        eprintln!("Example:");
        eprintln!("  menu-report fixtures");
        eprintln!("  menu-report fixtures --seed 42 --json");
        process::exit(1);
    }

    let data_dir = &args[1];

    // Parse optional flags
    let mut seed: Option<u64> = None;
    let mut json_output = false;
    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                if i + 1 < args.len() {
                    seed = Some(args[i + 1].parse().unwrap_or_else(|_| {
                        eprintln!("Error: --seed requires a non-negative integer");
                        process::exit(1);
                    }));
                    i += 2;
                } else {
                    eprintln!("Error: --seed requires a number");
                    process::exit(1);
                }
            }
            "--json" => {
                json_output = true;
                i += 1;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                process::exit(1);
            }
        }
    }

    // Load the four tables from CSV
    let load_start = Instant::now();
    let dataset = match MenuDataset::load_dir(data_dir) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Error loading data: {}", e);
            process::exit(1);
        }
    };
    let load_ms = load_start.elapsed().as_millis();

    if dataset.menu_items.is_empty() {
        eprintln!("Error: no menu items found in {}", data_dir);
        process::exit(1);
    }

    // Run the pipeline once
    let pipeline_start = Instant::now();
    let mut pipeline = match seed {
        Some(seed) => MenuAnalysisPipeline::seeded(seed),
        None => MenuAnalysisPipeline::new(),
    };
    let result = pipeline.execute(&dataset);
    let pipeline_ms = pipeline_start.elapsed().as_millis();

    if json_output {
        let report = build_json(&result, data_dir, load_ms, pipeline_ms);
        match serde_json::to_string_pretty(&report) {
            Ok(doc) => println!("{}", doc),
            Err(e) => {
                eprintln!("Error serializing report: {}", e);
                process::exit(1);
            }
        }
    } else {
        print_human(&result, load_ms, pipeline_ms);
    }
}
