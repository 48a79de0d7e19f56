use chrono::NaiveDate;

use crate::models::{Achievement, Cycle, DayEntry, UserStats};

fn badge(id: &str, title: &str, description: &str, icon: &str, points: u32) -> Achievement {
    Achievement {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        icon: icon.to_string(),
        unlocked: false,
        unlocked_date: None,
        points,
    }
}

/// The fixed badge catalog, everything locked.
pub fn catalog() -> Vec<Achievement> {
    vec![
        badge("first_entry", "Getting Started", "Log your first period day", "🌸", 10),
        badge("week_streak", "Week Warrior", "Track for 7 consecutive days", "🔥", 50),
        badge("month_streak", "Monthly Master", "Track for 30 consecutive days", "💪", 150),
        badge("complete_cycle", "Full Circle", "Complete tracking a full cycle", "🎯", 100),
        badge("symptom_tracker", "Symptom Sleuth", "Log symptoms for 10 different days", "🔍", 75),
        badge("eco_friendly", "Eco Conscious", "Track using sustainable menstrual products", "🌱", 120),
        badge("waste_warrior", "Waste Warrior", "Use reusable products for 30 consecutive days", "♻️", 200),
    ]
}

fn rule(id: &str, stats: &UserStats, cycles: &[Cycle], day_entries: &[DayEntry]) -> bool {
    match id {
        "first_entry" => {
            !day_entries.is_empty() || cycles.iter().any(|c| !c.entries.is_empty())
        }
        "week_streak" => stats.current_streak >= 7,
        "month_streak" => stats.current_streak >= 30,
        "complete_cycle" => cycles.iter().any(|c| c.end_date.is_some() && c.length.is_some()),
        "symptom_tracker" => {
            day_entries.iter().filter(|e| !e.symptoms.is_empty()).count() >= 10
        }
        // Entry count and streak stand in for product usage here: nothing in
        // the tracked data records which products were used.
        "eco_friendly" => stats.total_entries >= 5,
        "waste_warrior" => stats.current_streak >= 20,
        _ => false,
    }
}

/// Checks every still-locked badge against the freshest stats and
/// collections. Unlocking is one-way: a badge never re-locks, so each call
/// only ever adds to the unlocked set.
pub fn evaluate(
    stats: &UserStats,
    cycles: &[Cycle],
    day_entries: &[DayEntry],
    achievements: &mut [Achievement],
    today: NaiveDate,
) -> Vec<Achievement> {
    let mut newly_unlocked = Vec::new();
    for achievement in achievements.iter_mut() {
        if achievement.unlocked {
            continue;
        }
        if rule(&achievement.id, stats, cycles, day_entries) {
            achievement.unlocked = true;
            achievement.unlocked_date = Some(today);
            newly_unlocked.push(achievement.clone());
        }
    }
    newly_unlocked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{cycles, stats};
    use crate::models::{Flow, PeriodEntry};
    use uuid::Uuid;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn day(date: &str, symptoms: &[&str]) -> DayEntry {
        DayEntry {
            id: Uuid::new_v4(),
            date: d(date),
            symptoms: symptoms.iter().map(|s| s.to_string()).collect(),
            mood: "Calm".into(),
            energy: 3,
            sleep: 8.0,
            water: 6,
            exercise: false,
            notes: None,
        }
    }

    fn period(date: &str) -> PeriodEntry {
        PeriodEntry {
            id: Uuid::new_v4(),
            date: d(date),
            flow: Flow::Medium,
            symptoms: vec![],
            mood: "Calm".into(),
            notes: None,
        }
    }

    fn stats_with(streak: u32, entries: u32) -> UserStats {
        let mut s = stats::fresh(d("2024-01-01"));
        s.current_streak = streak;
        s.total_entries = entries;
        s
    }

    fn unlocked_ids(newly: &[Achievement]) -> Vec<&str> {
        newly.iter().map(|a| a.id.as_str()).collect()
    }

    #[test]
    fn catalog_points_match_the_reward_table() {
        let points: Vec<(String, u32)> = catalog()
            .into_iter()
            .map(|a| (a.id, a.points))
            .collect();
        assert_eq!(
            points,
            vec![
                ("first_entry".into(), 10),
                ("week_streak".into(), 50),
                ("month_streak".into(), 150),
                ("complete_cycle".into(), 100),
                ("symptom_tracker".into(), 75),
                ("eco_friendly".into(), 120),
                ("waste_warrior".into(), 200),
            ]
        );
    }

    #[test]
    fn nothing_unlocks_on_empty_data() {
        let mut achievements = catalog();
        let newly = evaluate(
            &stats_with(0, 0),
            &[],
            &[],
            &mut achievements,
            d("2024-01-07"),
        );
        assert!(newly.is_empty());
        assert!(achievements.iter().all(|a| !a.unlocked));
    }

    #[test]
    fn first_entry_unlocks_on_a_day_entry() {
        let mut achievements = catalog();
        let entries = vec![day("2024-01-07", &[])];
        let newly = evaluate(
            &stats_with(1, 1),
            &[],
            &entries,
            &mut achievements,
            d("2024-01-07"),
        );
        assert_eq!(unlocked_ids(&newly), vec!["first_entry"]);
        assert_eq!(newly[0].unlocked_date, Some(d("2024-01-07")));
    }

    #[test]
    fn first_entry_unlocks_on_a_period_entry_too() {
        let mut achievements = catalog();
        let mut cycle_list = Vec::new();
        cycles::save_period_entry(&mut cycle_list, period("2024-01-07"));

        let newly = evaluate(
            &stats_with(1, 1),
            &cycle_list,
            &[],
            &mut achievements,
            d("2024-01-07"),
        );
        assert_eq!(unlocked_ids(&newly), vec!["first_entry"]);
    }

    #[test]
    fn unlock_survives_deleting_every_entry() {
        let mut achievements = catalog();
        let entries = vec![day("2024-01-07", &[])];
        evaluate(&stats_with(1, 1), &[], &entries, &mut achievements, d("2024-01-07"));

        // data is gone, badge stays
        let newly = evaluate(&stats_with(0, 0), &[], &[], &mut achievements, d("2024-01-08"));
        assert!(newly.is_empty());
        let first = achievements.iter().find(|a| a.id == "first_entry").unwrap();
        assert!(first.unlocked);
        assert_eq!(first.unlocked_date, Some(d("2024-01-07")));
    }

    #[test]
    fn week_streak_needs_exactly_seven() {
        let mut achievements = catalog();
        let newly = evaluate(&stats_with(6, 6), &[], &[], &mut achievements, d("2024-01-06"));
        assert!(unlocked_ids(&newly).iter().all(|id| *id != "week_streak"));

        let newly = evaluate(&stats_with(7, 7), &[], &[], &mut achievements, d("2024-01-07"));
        assert!(unlocked_ids(&newly).contains(&"week_streak"));
        let week = newly.iter().find(|a| a.id == "week_streak").unwrap();
        assert_eq!(week.points, 50);
    }

    #[test]
    fn streak_thresholds_cascade() {
        let mut achievements = catalog();
        let newly = evaluate(&stats_with(30, 30), &[], &[], &mut achievements, d("2024-01-30"));
        let ids = unlocked_ids(&newly);
        assert!(ids.contains(&"week_streak"));
        assert!(ids.contains(&"month_streak"));
        assert!(ids.contains(&"waste_warrior"));
    }

    #[test]
    fn complete_cycle_requires_a_closed_cycle() {
        let mut achievements = catalog();
        let mut cycle_list = Vec::new();
        cycles::save_period_entry(&mut cycle_list, period("2024-02-01"));

        let newly = evaluate(&stats_with(0, 1), &cycle_list, &[], &mut achievements, d("2024-02-01"));
        assert!(!unlocked_ids(&newly).contains(&"complete_cycle"));

        let id = cycle_list[0].id;
        cycles::close_cycle(&mut cycle_list, id, None).unwrap();
        let newly = evaluate(&stats_with(0, 1), &cycle_list, &[], &mut achievements, d("2024-02-02"));
        assert!(unlocked_ids(&newly).contains(&"complete_cycle"));
    }

    #[test]
    fn symptom_tracker_counts_days_with_symptoms() {
        let mut achievements = catalog();
        let mut entries: Vec<DayEntry> = (1..=9)
            .map(|n| day(&format!("2024-01-{n:02}"), &["Cramps"]))
            .collect();
        entries.push(day("2024-01-10", &[])); // symptom-free day does not count

        let newly = evaluate(&stats_with(0, 10), &[], &entries, &mut achievements, d("2024-01-10"));
        assert!(!unlocked_ids(&newly).contains(&"symptom_tracker"));

        entries.push(day("2024-01-11", &["Headache"]));
        let newly = evaluate(&stats_with(0, 11), &[], &entries, &mut achievements, d("2024-01-11"));
        assert!(unlocked_ids(&newly).contains(&"symptom_tracker"));
    }

    #[test]
    fn eco_friendly_uses_total_entry_count() {
        let mut achievements = catalog();
        let entries = vec![day("2024-01-07", &[])];
        let newly = evaluate(&stats_with(1, 5), &[], &entries, &mut achievements, d("2024-01-07"));
        assert!(unlocked_ids(&newly).contains(&"eco_friendly"));
    }

    #[test]
    fn evaluate_reports_only_fresh_unlocks() {
        let mut achievements = catalog();
        let entries = vec![day("2024-01-07", &[])];
        evaluate(&stats_with(1, 1), &[], &entries, &mut achievements, d("2024-01-07"));

        let newly = evaluate(&stats_with(7, 7), &[], &entries, &mut achievements, d("2024-01-13"));
        assert_eq!(unlocked_ids(&newly), vec!["week_streak", "eco_friendly"]);
    }
}
