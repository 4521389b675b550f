//! Deterministic weekly aggregation.
//!
//! Pure function of its inputs: no clock, no storage, no randomness. The
//! statistics computed here are embedded verbatim into the prompt so the
//! generation service never does arithmetic.

use chrono::NaiveDate;
use std::collections::HashSet;

use retro_core::temporal::iso_date;
use retro_core::{JournalEntry, WeekWindow, WeeklyAggregate};

/// Compute the aggregate for one week of entries.
///
/// Precondition (caller error if violated, not validated here): all entries
/// belong to one user, lie within `[week_start, week_start + 6]`, and are
/// sorted by date ascending.
pub fn compute_aggregate(entries: &[JournalEntry], week_start: NaiveDate) -> WeeklyAggregate {
    let window = WeekWindow::new(week_start);

    let avg_rating = if entries.is_empty() {
        0.0
    } else {
        let sum: i64 = entries.iter().map(|e| e.rating as i64).sum();
        round2(sum as f64 / entries.len() as f64)
    };

    let covered: HashSet<NaiveDate> = entries.iter().map(|e| e.date).collect();
    let missing_days = window
        .days()
        .filter(|day| !covered.contains(day))
        .map(iso_date)
        .collect();

    WeeklyAggregate {
        entry_count: entries.len(),
        avg_rating,
        missing_days,
        source_entry_ids: entries.iter().map(|e| e.id).collect(),
    }
}

/// Round to 2 decimal places.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn entry(date: NaiveDate, rating: i32) -> JournalEntry {
        let now = Utc::now();
        JournalEntry {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            date,
            wins: "w".to_string(),
            challenges: "c".to_string(),
            learnings: "l".to_string(),
            gratitude: "g".to_string(),
            rating,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_empty_week() {
        let agg = compute_aggregate(&[], date(2025, 10, 6));
        assert_eq!(agg.entry_count, 0);
        assert_eq!(agg.avg_rating, 0.0);
        assert_eq!(agg.missing_days.len(), 7);
        assert_eq!(agg.missing_days[0], "2025-10-06");
        assert_eq!(agg.missing_days[6], "2025-10-12");
        assert!(agg.source_entry_ids.is_empty());
    }

    #[test]
    fn test_avg_rating_of_two_and_one_is_one_point_five() {
        let entries = vec![entry(date(2025, 10, 6), 2), entry(date(2025, 10, 9), 1)];
        let agg = compute_aggregate(&entries, date(2025, 10, 6));
        assert_eq!(agg.avg_rating, 1.5);
    }

    #[test]
    fn test_avg_rating_rounds_to_two_decimals() {
        // (2 + 1 + 1) / 3 = 1.333... → 1.33
        let entries = vec![
            entry(date(2025, 10, 6), 2),
            entry(date(2025, 10, 7), 1),
            entry(date(2025, 10, 8), 1),
        ];
        let agg = compute_aggregate(&entries, date(2025, 10, 6));
        assert_eq!(agg.avg_rating, 1.33);

        // (-2 + -1 + -1) / 3 = -1.333... → -1.33
        let entries = vec![
            entry(date(2025, 10, 6), -2),
            entry(date(2025, 10, 7), -1),
            entry(date(2025, 10, 8), -1),
        ];
        let agg = compute_aggregate(&entries, date(2025, 10, 6));
        assert_eq!(agg.avg_rating, -1.33);
    }

    #[test]
    fn test_missing_days_in_window_order() {
        // Entries Mon and Thu of a window starting Monday 2025-10-06.
        let entries = vec![entry(date(2025, 10, 6), 2), entry(date(2025, 10, 9), 1)];
        let agg = compute_aggregate(&entries, date(2025, 10, 6));

        assert_eq!(agg.entry_count, 2);
        assert_eq!(
            agg.missing_days,
            vec![
                "2025-10-07".to_string(),
                "2025-10-08".to_string(),
                "2025-10-10".to_string(),
                "2025-10-11".to_string(),
                "2025-10-12".to_string(),
            ]
        );
    }

    #[test]
    fn test_full_week_has_no_missing_days() {
        let entries: Vec<JournalEntry> = (0..7)
            .map(|offset| entry(date(2025, 10, 6 + offset), 0))
            .collect();
        let agg = compute_aggregate(&entries, date(2025, 10, 6));
        assert_eq!(agg.entry_count, 7);
        assert!(agg.missing_days.is_empty());
        assert_eq!(agg.avg_rating, 0.0);
    }

    #[test]
    fn test_source_ids_follow_entry_order() {
        let entries = vec![entry(date(2025, 10, 6), 2), entry(date(2025, 10, 9), 1)];
        let agg = compute_aggregate(&entries, date(2025, 10, 6));
        assert_eq!(
            agg.source_entry_ids,
            vec![entries[0].id, entries[1].id]
        );
    }

    #[test]
    fn test_missing_day_count_complements_entry_count() {
        for n in 0..=7u32 {
            let entries: Vec<JournalEntry> =
                (0..n).map(|offset| entry(date(2025, 10, 6 + offset), 1)).collect();
            let agg = compute_aggregate(&entries, date(2025, 10, 6));
            assert_eq!(agg.missing_days.len(), (7 - n) as usize);
        }
    }

    #[test]
    fn test_deterministic() {
        let entries = vec![entry(date(2025, 10, 6), 2), entry(date(2025, 10, 9), -1)];
        let a = compute_aggregate(&entries, date(2025, 10, 6));
        let b = compute_aggregate(&entries, date(2025, 10, 6));
        assert_eq!(a, b);
    }
}
