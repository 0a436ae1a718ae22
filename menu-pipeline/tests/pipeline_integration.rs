use chrono::NaiveDate;
use menu_pipeline::components::demand_forecaster;
use menu_pipeline::components::gap_recommender;
use menu_pipeline::components::insight_summarizer;
use menu_pipeline::components::performance_classifier;
use menu_pipeline::components::preference_aggregator;
use menu_pipeline::components::pricing_advisor;
use menu_pipeline::components::profitability_scorer;
use menu_pipeline::dataset::{
    load_feedback, load_menu_items, load_sales, FeedbackRecord, InventoryRecord, MenuDataset,
    MenuItem, SalesTransaction,
};
use menu_pipeline::elasticity::FixedElasticity;
use menu_pipeline::pipelines::menu_analysis::MenuAnalysisPipeline;
use menu_pipeline::types::*;

// ---------------------------------------------------------------------------
// Test data fixtures
// ---------------------------------------------------------------------------

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn tx(id: u32, item_id: u32, date: NaiveDate, quantity: u32, total: f64) -> SalesTransaction {
    SalesTransaction {
        transaction_id: id,
        menu_item_id: item_id,
        date,
        quantity,
        total_price: total,
    }
}

fn rating(item_id: u32, value: f64, text: Option<&str>) -> FeedbackRecord {
    FeedbackRecord {
        menu_item_id: item_id,
        rating: value,
        feedback_text: text.map(str::to_string),
    }
}

fn item(id: u32, name: &str, category: &str, selling: f64, cost: f64) -> MenuItem {
    MenuItem {
        item_id: id,
        item_name: name.to_string(),
        category: category.to_string(),
        selling_price: selling,
        cost_price: cost,
    }
}

/// An eight-item menu across four categories with deliberately spread sales.
fn sample_menu() -> Vec<MenuItem> {
    vec![
        // barely sells, thin 20% margin, but customers love it
        item(1, "Truffle Pasta", "Mains", 20.0, 16.0),
        // the workhorse: heavy volume, margin 25%, room to raise
        item(2, "Classic Burger", "Mains", 10.0, 7.5),
        // new dish, zero sales so far, 50% margin
        item(3, "Seasonal Special", "Mains", 18.0, 9.0),
        // strong dessert, 66.7% margin
        item(4, "Chocolate Cake", "Desserts", 18.0, 6.0),
        // strong dessert, 63.6% margin
        item(5, "Tiramisu", "Desserts", 22.0, 8.0),
        // 10% margin, cost problem
        item(6, "House Lemonade", "Drinks", 5.0, 4.5),
        // steady mid-volume drink
        item(7, "Espresso", "Drinks", 3.0, 1.0),
        // 7.1% margin, cost problem
        item(8, "Side Salad", "Sides", 7.0, 6.5),
    ]
}

/// Per-item totals this produces:
///   1: qty 1 / $20   2: qty 96 / $960   3: qty 0 / $0   4: qty 50 / $900
///   5: qty 40 / $880   6: qty 30 / $150   7: qty 35 / $105   8: qty 5 / $35
fn sample_sales() -> Vec<SalesTransaction> {
    // The burger sells every day from Monday 2024-03-04 through 2024-03-15:
    // twelve observed days, the only item with enough history to forecast.
    let start = day(2024, 3, 4);
    let mut sales: Vec<SalesTransaction> = (0..12)
        .map(|offset| {
            tx(
                200 + offset as u32,
                2,
                start + chrono::Days::new(offset),
                8,
                80.0,
            )
        })
        .collect();

    sales.extend([
        tx(100, 1, day(2024, 3, 8), 1, 20.0),
        tx(400, 4, day(2024, 3, 9), 30, 540.0),
        tx(401, 4, day(2024, 3, 16), 20, 360.0),
        tx(500, 5, day(2024, 3, 9), 25, 550.0),
        tx(501, 5, day(2024, 3, 10), 15, 330.0),
        tx(600, 6, day(2024, 3, 8), 20, 100.0),
        tx(601, 6, day(2024, 3, 15), 10, 50.0),
        tx(700, 7, day(2024, 3, 4), 20, 60.0),
        tx(701, 7, day(2024, 3, 11), 15, 45.0),
        tx(800, 8, day(2024, 3, 10), 5, 35.0),
    ]);
    sales
}

fn sample_feedback() -> Vec<FeedbackRecord> {
    vec![
        rating(1, 4.5, Some("Perfectly cooked")),
        rating(1, 4.8, None),
        rating(2, 4.2, Some("Reliable classic")),
        rating(2, 3.8, None),
        rating(4, 4.9, Some("Best dessert in town")),
        rating(6, 2.0, Some("Too sweet")),
        // items 3, 5, 7 and 8 never get rated
    ]
}

fn sample_dataset() -> MenuDataset {
    MenuDataset {
        menu_items: sample_menu(),
        sales: sample_sales(),
        feedback: sample_feedback(),
        inventory: vec![
            InventoryRecord {
                ingredient_id: 10,
                ingredient_name: "Ground Beef".to_string(),
                quantity_on_hand: 24.0,
                unit: "kg".to_string(),
                last_restocked: day(2024, 3, 12),
            },
            InventoryRecord {
                ingredient_id: 11,
                ingredient_name: "Mascarpone".to_string(),
                quantity_on_hand: 6.5,
                unit: "kg".to_string(),
                last_restocked: day(2024, 3, 14),
            },
        ],
    }
}

/// Classified and scored views with the feedback merged in, the state the
/// gap and insight stages consume.
fn enriched_views() -> Vec<ItemView> {
    let dataset = sample_dataset();
    let views = performance_classifier::classify(&dataset.menu_items, &dataset.sales);
    let views = profitability_scorer::score(views);
    let summaries = preference_aggregator::aggregate(&dataset.feedback).unwrap();
    preference_aggregator::merge(views, &summaries)
}

// ---------------------------------------------------------------------------
// Classification tests
// ---------------------------------------------------------------------------

#[test]
fn quartiles_label_the_sample_menu() {
    let views = performance_classifier::classify(&sample_menu(), &sample_sales());

    // quantities [0, 1, 5, 30, 35, 40, 50, 96]: p75 = 42.5, p25 = 4.0
    // revenues [0, 20, 35, 105, 150, 880, 900, 960]: p75 = 885, p25 = 31.25
    let expect = [
        (1, PerformanceCategory::Underperformer),
        (2, PerformanceCategory::Bestseller),
        (3, PerformanceCategory::Underperformer),
        (4, PerformanceCategory::Bestseller),
        (5, PerformanceCategory::Average),
        (6, PerformanceCategory::Average),
        (7, PerformanceCategory::Average),
        (8, PerformanceCategory::Average),
    ];
    for (id, category) in expect {
        let view = views.iter().find(|v| v.item_id == id).unwrap();
        assert_eq!(
            view.performance_category, category,
            "item {} should be {}",
            id, category
        );
    }

    // The zero-sales special keeps a fully zeroed row.
    let special = views.iter().find(|v| v.item_id == 3).unwrap();
    assert_eq!(special.quantity, 0);
    assert_eq!(special.total_price, 0.0);
    assert_eq!(special.order_count, 0);
}

// ---------------------------------------------------------------------------
// Scoring tests
// ---------------------------------------------------------------------------

#[test]
fn composite_scores_rank_the_menu() {
    let views = profitability_scorer::score(performance_classifier::classify(
        &sample_menu(),
        &sample_sales(),
    ));

    for view in &views {
        let score = view.profitability_score.unwrap();
        assert!(
            (0.0..=1.0).contains(&score),
            "item {} score out of range: {}",
            view.item_id,
            score
        );
    }

    // Chocolate Cake: 0.4 * (900/960) + 0.3 * (50/96) + 0.3 * 1.0 = 0.83125
    let cake = views.iter().find(|v| v.item_id == 4).unwrap();
    assert!((cake.profitability_score.unwrap() - 0.83125).abs() < 1e-9);

    // Classic Burger maxes revenue and volume but not margin: 0.79
    let burger = views.iter().find(|v| v.item_id == 2).unwrap();
    assert!((burger.profitability_score.unwrap() - 0.79).abs() < 1e-9);

    // Side Salad is the floor on margin and near it on everything else.
    let salad = views.iter().find(|v| v.item_id == 8).unwrap();
    assert_eq!(salad.margin_score, Some(0.0));
}

// ---------------------------------------------------------------------------
// Pricing tests
// ---------------------------------------------------------------------------

#[test]
fn decision_table_covers_all_four_actions() {
    let views = profitability_scorer::score(performance_classifier::classify(
        &sample_menu(),
        &sample_sales(),
    ));
    let suggestions = pricing_advisor::suggest(&views, &mut FixedElasticity(-0.3));
    assert_eq!(suggestions.len(), views.len());

    // Classic Burger: bestseller at 25% margin with inelastic demand.
    let burger = suggestions.iter().find(|s| s.item_id == 2).unwrap();
    assert_eq!(burger.action, PricingAction::IncreasePrice);
    assert!((burger.new_price - 11.0).abs() < 0.001); // 10.00 * 1.10
    assert_eq!(burger.expected_margin_change, 8.0);

    // Seasonal Special: underperformer at 50% margin, cut to move volume.
    let special = suggestions.iter().find(|s| s.item_id == 3).unwrap();
    assert_eq!(special.action, PricingAction::DecreasePrice);
    assert!((special.new_price - 15.30).abs() < 0.001); // 18.00 * 0.85
    assert_eq!(special.expected_margin_change, -5.0);

    // Lemonade and Side Salad: margins under 15%, the cost is the problem.
    for id in [6, 8] {
        let s = suggestions.iter().find(|s| s.item_id == id).unwrap();
        assert_eq!(s.action, PricingAction::ReviewRecipeCost, "item {}", id);
        assert_eq!(s.new_price, s.current_price);
    }

    // Truffle Pasta: underperformer, but margin 20% fires no rule.
    let pasta = suggestions.iter().find(|s| s.item_id == 1).unwrap();
    assert_eq!(pasta.action, PricingAction::Maintain);
    assert_eq!(pasta.new_price, 20.0);

    // Comfortable items stay put too.
    for id in [4, 5, 7] {
        let s = suggestions.iter().find(|s| s.item_id == id).unwrap();
        assert_eq!(s.action, PricingAction::Maintain, "item {}", id);
    }
}

#[test]
fn elastic_draw_blocks_the_burger_raise() {
    let views = profitability_scorer::score(performance_classifier::classify(
        &sample_menu(),
        &sample_sales(),
    ));
    // -1.2 <= -0.5: price-sensitive demand, the raise rule must not fire.
    let suggestions = pricing_advisor::suggest(&views, &mut FixedElasticity(-1.2));
    let burger = suggestions.iter().find(|s| s.item_id == 2).unwrap();
    assert_eq!(burger.action, PricingAction::Maintain);
    assert_eq!(burger.new_price, 10.0);
}

// ---------------------------------------------------------------------------
// Preference tests
// ---------------------------------------------------------------------------

#[test]
fn feedback_merge_fills_only_rated_items() {
    let views = enriched_views();

    let pasta = views.iter().find(|v| v.item_id == 1).unwrap();
    assert_eq!(pasta.avg_rating, Some(4.65)); // (4.5 + 4.8) / 2
    assert_eq!(pasta.rating_count, Some(2));

    let burger = views.iter().find(|v| v.item_id == 2).unwrap();
    assert_eq!(burger.avg_rating, Some(4.0));

    let cake = views.iter().find(|v| v.item_id == 4).unwrap();
    assert_eq!(cake.avg_rating, Some(4.9));
    assert_eq!(cake.rating_count, Some(1));

    for id in [3, 5, 7, 8] {
        let view = views.iter().find(|v| v.item_id == id).unwrap();
        assert_eq!(view.avg_rating, None, "item {} was never rated", id);
        assert_eq!(view.rating_count, None);
    }
}

// ---------------------------------------------------------------------------
// Gap detection tests
// ---------------------------------------------------------------------------

#[test]
fn category_rollups_blend_sales_scores_and_ratings() {
    let rollups = gap_recommender::category_rollups(&enriched_views());

    let order: Vec<&str> = rollups.iter().map(|r| r.category.as_str()).collect();
    assert_eq!(order, vec!["Desserts", "Mains", "Drinks", "Sides"]);

    let desserts = &rollups[0];
    assert_eq!(desserts.total_quantity, 90);
    assert!((desserts.total_revenue - 1780.0).abs() < 0.001);
    assert_eq!(desserts.mean_rating, Some(4.9)); // only the cake is rated

    let mains = &rollups[1];
    assert_eq!(mains.total_quantity, 97);
    assert!((mains.mean_rating.unwrap() - 4.325).abs() < 0.001);

    // Nothing in Sides was ever rated: no rating, not a zero rating.
    let sides = &rollups[3];
    assert_eq!(sides.mean_rating, None);
}

#[test]
fn empty_bands_in_the_top_categories_become_gaps() {
    let gaps = gap_recommender::recommend(&enriched_views());

    // Desserts (all mid-range) gaps at both ends; Mains covers Budget and
    // Mid-range; Drinks (all budget) gaps upward. Sides ranks fourth and
    // is never scanned.
    let found: Vec<(&str, PriceBand)> = gaps
        .iter()
        .map(|g| (g.category.as_str(), g.price_band))
        .collect();
    assert_eq!(
        found,
        vec![
            ("Desserts", PriceBand::Budget),
            ("Desserts", PriceBand::Premium),
            ("Mains", PriceBand::Premium),
            ("Drinks", PriceBand::MidRange),
            ("Drinks", PriceBand::Premium),
        ]
    );

    assert!((gaps[0].suggested_price - 7.5).abs() < 0.001);
    assert!((gaps[1].suggested_price - 65.0).abs() < 0.001);
    assert!((gaps[3].suggested_price - 22.5).abs() < 0.001);
    assert!(gaps.iter().all(|g| g.opportunity == OpportunityScore::High));
}

// ---------------------------------------------------------------------------
// Forecast tests
// ---------------------------------------------------------------------------

#[test]
fn only_the_burger_has_enough_history_to_forecast() {
    let forecasts = demand_forecaster::forecast(&sample_sales());

    // Twelve observed days clears the >10 gate; every other item has at
    // most two and is skipped.
    assert_eq!(forecasts.len(), 7);
    assert!(forecasts.iter().all(|f| f.menu_item_id == 2));

    let days: Vec<u8> = forecasts.iter().map(|f| f.day_of_week).collect();
    assert_eq!(days, vec![0, 1, 2, 3, 4, 5, 6]);

    // Eight units every observed day, so every weekday mean is eight.
    assert!(forecasts.iter().all(|f| f.predicted_demand == 8));
    assert!(forecasts
        .iter()
        .all(|f| f.confidence == ForecastConfidence::Medium));
}

// ---------------------------------------------------------------------------
// Insight tests
// ---------------------------------------------------------------------------

#[test]
fn insights_distill_the_enriched_views() {
    let insights = insight_summarizer::summarize(&enriched_views());

    // Scores: cake 0.83125, burger 0.79, tiramisu ~0.776, espresso
    // ~0.453, special 0.216.
    let top: Vec<u32> = insights.top_performers.iter().map(|t| t.item_id).collect();
    assert_eq!(top, vec![4, 2, 5, 7, 3]);

    // Margin under 20%, worst first: the salad at 7.1% then the lemonade
    // at 10%. The pasta sits exactly at 20 and stays off the list.
    let low: Vec<u32> = insights.low_margin_items.iter().map(|i| i.item_id).collect();
    assert_eq!(low, vec![8, 6]);

    // The pasta is the only loved underperformer; the unrated special
    // must not appear.
    assert_eq!(insights.hidden_gems.len(), 1);
    let gem = &insights.hidden_gems[0];
    assert_eq!(gem.item_id, 1);
    assert_eq!(gem.item_name, "Truffle Pasta");
    assert!((gem.avg_rating - 4.65).abs() < 0.001);
    assert_eq!(gem.quantity, 1);
}

// ---------------------------------------------------------------------------
// Full pipeline integration tests
// ---------------------------------------------------------------------------

#[test]
fn full_pipeline_end_to_end() {
    let mut pipeline = MenuAnalysisPipeline::with_sampler(Box::new(FixedElasticity(-0.3)));
    let result = pipeline.execute(&sample_dataset());

    // One view per menu item, menu order preserved through every stage.
    let ids: Vec<u32> = result.items.iter().map(|v| v.item_id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7, 8]);

    assert_eq!(result.summary.total_items, 8);
    assert_eq!(result.summary.bestsellers, 2);
    assert_eq!(result.summary.underperformers, 2);
    assert!((result.summary.total_revenue - 3050.0).abs() < 0.01);
    assert!((result.summary.avg_profit_margin - 38.64).abs() < 0.01);
    // Burger raise, special cut, two recipe reviews.
    assert_eq!(result.summary.pricing_adjustments, 4);

    assert_eq!(result.pricing.len(), 8);
    assert_eq!(result.gaps.len(), 5);
    assert_eq!(result.forecasts.len(), 7);
    assert_eq!(result.insights.hidden_gems.len(), 1);

    // Every stage saw the merged ratings.
    let pasta = result.items.iter().find(|v| v.item_id == 1).unwrap();
    assert_eq!(pasta.avg_rating, Some(4.65));
}

#[test]
fn seeded_runs_reproduce_exactly() {
    let dataset = sample_dataset();
    let first = MenuAnalysisPipeline::seeded(7).execute(&dataset);
    let second = MenuAnalysisPipeline::seeded(7).execute(&dataset);
    assert_eq!(first, second);
}

#[test]
fn csv_tables_feed_straight_into_the_pipeline() {
    const MENU_CSV: &str = "\
item_id,item_name,category,selling_price,cost_price
1,Garden Salad,Starters,9.00,3.00
2,Steak Frites,Mains,28.00,14.00
3,Creme Brulee,Desserts,9.50,2.50
";
    const SALES_CSV: &str = "\
transaction_id,menu_item_id,date,quantity,total_price
900,1,2024-03-04,5,45.00
901,2,2024-03-04,10,280.00
902,3,2024-03-05,2,19.00
";
    const FEEDBACK_CSV: &str = "\
menu_item_id,rating,feedback_text
2,4.6,Cooked to perfection
";

    let dataset = MenuDataset {
        menu_items: load_menu_items(MENU_CSV.as_bytes()).unwrap(),
        sales: load_sales(SALES_CSV.as_bytes()).unwrap(),
        feedback: load_feedback(FEEDBACK_CSV.as_bytes()).unwrap(),
        inventory: Vec::new(),
    };

    let mut pipeline = MenuAnalysisPipeline::with_sampler(Box::new(FixedElasticity(-0.3)));
    let result = pipeline.execute(&dataset);

    assert_eq!(result.items.len(), 3);
    assert_eq!(result.pricing.len(), 3);
    let steak = result.items.iter().find(|v| v.item_id == 2).unwrap();
    assert_eq!(steak.performance_category, PerformanceCategory::Bestseller);
    assert_eq!(steak.avg_rating, Some(4.6));
}

#[test]
fn results_serialize_to_the_reporting_contract() {
    let mut pipeline = MenuAnalysisPipeline::with_sampler(Box::new(FixedElasticity(-0.3)));
    let result = pipeline.execute(&sample_dataset());
    let value = serde_json::to_value(&result).unwrap();

    assert_eq!(value["summary"]["total_items"], 8);
    assert_eq!(value["items"][0]["performance_category"], "Underperformer");
    assert_eq!(value["items"][0]["avg_rating"], 4.65);
    assert_eq!(value["pricing"][1]["action"], "IncreasePrice");
    assert_eq!(value["pricing"][1]["new_price"], 11.0);
    assert_eq!(value["gaps"][0]["category"], "Desserts");
    assert_eq!(value["gaps"][0]["price_band"], "Budget");
    assert_eq!(value["forecasts"].as_array().unwrap().len(), 7);
    assert_eq!(value["insights"]["hidden_gems"][0]["item_id"], 1);
}
