use std::collections::BTreeSet;

use chrono::{Duration, NaiveDate};

use crate::models::{Achievement, Cycle, DayEntry, UserStats};

/// Fallback until at least one cycle has been closed.
pub const DEFAULT_CYCLE_LENGTH: u32 = 28;

/// Consecutive calendar days ending today with at least one entry of any
/// kind. A missing entry for today breaks the streak immediately; this is
/// not the longest historical run.
pub fn current_streak(cycles: &[Cycle], day_entries: &[DayEntry], today: NaiveDate) -> u32 {
    let dates: BTreeSet<NaiveDate> = day_entries
        .iter()
        .map(|e| e.date)
        .chain(cycles.iter().flat_map(|c| c.entries.iter().map(|e| e.date)))
        .collect();

    let mut streak = 0u32;
    while dates.contains(&(today - Duration::days(streak as i64))) {
        streak += 1;
    }
    streak
}

/// Mean length over closed cycles, rounded to the nearest day.
pub fn average_cycle_length(cycles: &[Cycle]) -> u32 {
    let lengths: Vec<i64> = cycles.iter().filter_map(|c| c.length).collect();
    if lengths.is_empty() {
        return DEFAULT_CYCLE_LENGTH;
    }
    let sum: i64 = lengths.iter().sum();
    (sum as f64 / lengths.len() as f64).round() as u32
}

/// Day entries plus every period entry. A date tracked both ways counts
/// twice; the figure measures tracking actions, not distinct days.
pub fn total_entries(cycles: &[Cycle], day_entries: &[DayEntry]) -> u32 {
    let period: usize = cycles.iter().map(|c| c.entries.len()).sum();
    (day_entries.len() + period) as u32
}

pub fn points_total(achievements: &[Achievement]) -> u32 {
    achievements
        .iter()
        .filter(|a| a.unlocked)
        .map(|a| a.points)
        .sum()
}

pub fn compute(
    cycles: &[Cycle],
    day_entries: &[DayEntry],
    achievements: &[Achievement],
    tracking_start_date: NaiveDate,
    today: NaiveDate,
) -> UserStats {
    UserStats {
        current_streak: current_streak(cycles, day_entries, today),
        total_entries: total_entries(cycles, day_entries),
        points: points_total(achievements),
        average_cycle_length: average_cycle_length(cycles),
        tracking_start_date,
    }
}

pub fn fresh(today: NaiveDate) -> UserStats {
    UserStats {
        current_streak: 0,
        total_entries: 0,
        points: 0,
        average_cycle_length: DEFAULT_CYCLE_LENGTH,
        tracking_start_date: today,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::cycles;
    use crate::models::{Flow, PeriodEntry};
    use uuid::Uuid;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn day(date: &str) -> DayEntry {
        DayEntry {
            id: Uuid::new_v4(),
            date: d(date),
            symptoms: vec![],
            mood: "Calm".into(),
            energy: 3,
            sleep: 7.5,
            water: 5,
            exercise: false,
            notes: None,
        }
    }

    fn period(date: &str) -> PeriodEntry {
        PeriodEntry {
            id: Uuid::new_v4(),
            date: d(date),
            flow: Flow::Light,
            symptoms: vec![],
            mood: "Calm".into(),
            notes: None,
        }
    }

    fn cycle_with(dates: &[&str]) -> Cycle {
        let mut cycles = Vec::new();
        for date in dates {
            cycles::save_period_entry(&mut cycles, period(date));
        }
        cycles.remove(0)
    }

    #[test]
    fn streak_is_zero_without_entries() {
        assert_eq!(current_streak(&[], &[], d("2024-01-07")), 0);
    }

    #[test]
    fn streak_counts_consecutive_days_ending_today() {
        let entries: Vec<DayEntry> = ["2024-01-05", "2024-01-06", "2024-01-07"]
            .iter()
            .map(|s| day(s))
            .collect();
        assert_eq!(current_streak(&[], &entries, d("2024-01-07")), 3);
    }

    #[test]
    fn streak_stops_at_first_gap() {
        // 01-04 missing: only the three most recent days count
        let entries: Vec<DayEntry> = ["2024-01-01", "2024-01-02", "2024-01-03", "2024-01-05", "2024-01-06", "2024-01-07"]
            .iter()
            .map(|s| day(s))
            .collect();
        assert_eq!(current_streak(&[], &entries, d("2024-01-07")), 3);
    }

    #[test]
    fn streak_is_zero_when_today_has_no_entry() {
        let entries = vec![day("2024-01-05"), day("2024-01-06")];
        assert_eq!(current_streak(&[], &entries, d("2024-01-07")), 0);
    }

    #[test]
    fn streak_merges_period_and_day_dates() {
        let cycle = cycle_with(&["2024-01-06"]);
        let entries = vec![day("2024-01-07")];
        assert_eq!(current_streak(&[cycle], &entries, d("2024-01-07")), 2);
    }

    #[test]
    fn same_date_in_both_collections_counts_once_for_streak() {
        let cycle = cycle_with(&["2024-01-07"]);
        let entries = vec![day("2024-01-07")];
        assert_eq!(current_streak(&[cycle], &entries, d("2024-01-07")), 1);
    }

    #[test]
    fn average_cycle_length_defaults_to_28() {
        let open = cycle_with(&["2024-01-01"]);
        assert_eq!(average_cycle_length(&[]), 28);
        assert_eq!(average_cycle_length(&[open]), 28);
    }

    #[test]
    fn average_cycle_length_rounds_to_nearest() {
        let mut a = cycle_with(&["2024-01-01"]);
        let mut b = cycle_with(&["2024-02-01"]);
        a.length = Some(27);
        b.length = Some(30);
        // 28.5 rounds up
        assert_eq!(average_cycle_length(&[a, b]), 29);
    }

    #[test]
    fn open_cycles_are_ignored_by_the_average() {
        let mut closed = cycle_with(&["2024-01-01"]);
        closed.length = Some(30);
        let open = cycle_with(&["2024-02-01"]);
        assert_eq!(average_cycle_length(&[closed, open]), 30);
    }

    #[test]
    fn total_entries_double_counts_shared_dates() {
        let cycle = cycle_with(&["2024-01-07", "2024-01-08"]);
        let entries = vec![day("2024-01-07")];
        assert_eq!(total_entries(&[cycle], &entries), 3);
    }

    #[test]
    fn points_sum_only_unlocked_achievements() {
        let mut achievements = crate::engine::achievements::catalog();
        assert_eq!(points_total(&achievements), 0);

        achievements[0].unlocked = true; // 10 points
        achievements[1].unlocked = true; // 50 points
        assert_eq!(points_total(&achievements), 60);
    }

    #[test]
    fn compute_assembles_all_fields() {
        let entries = vec![day("2024-01-07")];
        let stats = compute(&[], &entries, &[], d("2024-01-01"), d("2024-01-07"));
        assert_eq!(stats.current_streak, 1);
        assert_eq!(stats.total_entries, 1);
        assert_eq!(stats.points, 0);
        assert_eq!(stats.average_cycle_length, 28);
        assert_eq!(stats.tracking_start_date, d("2024-01-01"));
    }
}
