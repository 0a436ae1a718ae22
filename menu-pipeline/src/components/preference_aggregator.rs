//! Customer preference aggregation.
//!
//! Summarizes the feedback table per item (mean rating, rating count, count
//! of records with actual text) and left-merges the summaries onto the item
//! views. Items nobody rated keep `None` in the rating fields; "no data"
//! and "rated zero" must stay distinguishable downstream.

use std::collections::HashMap;

use crate::dataset::FeedbackRecord;
use crate::types::ItemView;
use crate::util;

/// Per-item rating summary.
#[derive(Clone, Debug, PartialEq)]
pub struct PreferenceSummary {
    pub menu_item_id: u32,
    /// Mean rating, rounded to two decimals.
    pub avg_rating: f64,
    /// Number of ratings received.
    pub rating_count: u64,
    /// Number of records that carried non-blank feedback text.
    pub feedback_count: u64,
}

/// Summarize feedback per item, or `None` when the table is empty.
///
/// `None` means "no preference data at all", which callers treat differently
/// from "every item unrated": the merge is skipped entirely. Summaries come
/// back sorted by item id.
pub fn aggregate(feedback: &[FeedbackRecord]) -> Option<Vec<PreferenceSummary>> {
    if feedback.is_empty() {
        return None;
    }

    #[derive(Default)]
    struct Acc {
        rating_sum: f64,
        rating_count: u64,
        feedback_count: u64,
    }

    let mut groups: HashMap<u32, Acc> = HashMap::new();
    for record in feedback {
        let acc = groups.entry(record.menu_item_id).or_default();
        acc.rating_sum += record.rating;
        acc.rating_count += 1;
        if record
            .feedback_text
            .as_deref()
            .is_some_and(|text| !text.trim().is_empty())
        {
            acc.feedback_count += 1;
        }
    }

    let mut summaries: Vec<PreferenceSummary> = groups
        .into_iter()
        .map(|(menu_item_id, acc)| PreferenceSummary {
            menu_item_id,
            avg_rating: util::round2(acc.rating_sum / acc.rating_count as f64),
            rating_count: acc.rating_count,
            feedback_count: acc.feedback_count,
        })
        .collect();
    summaries.sort_by_key(|s| s.menu_item_id);

    Some(summaries)
}

/// Left-merge summaries onto the views by item id.
///
/// Views without a summary keep `None`; summaries whose id is not on the
/// menu are dropped silently.
pub fn merge(mut views: Vec<ItemView>, summaries: &[PreferenceSummary]) -> Vec<ItemView> {
    let by_id: HashMap<u32, &PreferenceSummary> =
        summaries.iter().map(|s| (s.menu_item_id, s)).collect();

    for view in &mut views {
        if let Some(summary) = by_id.get(&view.item_id) {
            view.avg_rating = Some(summary.avg_rating);
            view.rating_count = Some(summary.rating_count);
        }
    }

    views
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_feedback(item_id: u32, rating: f64, text: Option<&str>) -> FeedbackRecord {
        FeedbackRecord {
            menu_item_id: item_id,
            rating,
            feedback_text: text.map(str::to_string),
        }
    }

    #[test]
    fn ratings_average_per_item() {
        let feedback = vec![
            make_feedback(1, 5.0, Some("great")),
            make_feedback(1, 4.0, None),
            make_feedback(2, 3.0, Some("ok")),
        ];
        let summaries = aggregate(&feedback).unwrap();

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].menu_item_id, 1);
        assert!((summaries[0].avg_rating - 4.5).abs() < 0.001);
        assert_eq!(summaries[0].rating_count, 2);
        assert_eq!(summaries[1].menu_item_id, 2);
        assert_eq!(summaries[1].rating_count, 1);
    }

    #[test]
    fn mean_rating_rounds_to_two_decimals() {
        let feedback = vec![
            make_feedback(1, 4.0, None),
            make_feedback(1, 3.0, None),
            make_feedback(1, 3.0, None),
        ];
        let summaries = aggregate(&feedback).unwrap();
        // 10 / 3 = 3.3333... -> 3.33
        assert_eq!(summaries[0].avg_rating, 3.33);
    }

    #[test]
    fn blank_text_does_not_count_as_feedback() {
        let feedback = vec![
            make_feedback(1, 5.0, Some("loved it")),
            make_feedback(1, 4.0, Some("   ")),
            make_feedback(1, 3.0, None),
        ];
        let summaries = aggregate(&feedback).unwrap();
        assert_eq!(summaries[0].rating_count, 3);
        assert_eq!(summaries[0].feedback_count, 1);
    }

    #[test]
    fn empty_table_means_no_preference_data() {
        assert_eq!(aggregate(&[]), None);
    }

    #[test]
    fn merge_fills_only_matched_views() {
        let views = vec![
            ItemView { item_id: 1, ..ItemView::default() },
            ItemView { item_id: 2, ..ItemView::default() },
        ];
        let summaries = aggregate(&[make_feedback(1, 4.0, None)]).unwrap();
        let merged = merge(views, &summaries);

        assert_eq!(merged[0].avg_rating, Some(4.0));
        assert_eq!(merged[0].rating_count, Some(1));
        // Item 2 was never rated: unknown, not zero.
        assert_eq!(merged[1].avg_rating, None);
        assert_eq!(merged[1].rating_count, None);
    }

    #[test]
    fn summaries_for_off_menu_items_are_dropped() {
        let views = vec![ItemView { item_id: 1, ..ItemView::default() }];
        let summaries = aggregate(&[make_feedback(99, 2.0, None)]).unwrap();
        let merged = merge(views, &summaries);
        assert_eq!(merged[0].avg_rating, None);
    }
}
