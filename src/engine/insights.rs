use std::collections::HashMap;

use chrono::{Duration, NaiveDate};
use uuid::Uuid;

use crate::engine::stats::DEFAULT_CYCLE_LENGTH;
use crate::models::{Cycle, DayEntry, Insight, InsightKind};

const RECENT_WINDOW_DAYS: i64 = 30;
const SYMPTOM_REPEAT_THRESHOLD: u32 = 3;
const LOW_ENERGY_DAYS_THRESHOLD: usize = 5;

fn insight(
    kind: InsightKind,
    title: &str,
    message: String,
    confidence: u8,
    date: NaiveDate,
) -> Insight {
    Insight {
        id: Uuid::new_v4(),
        kind,
        title: title.to_string(),
        message,
        confidence,
        date,
    }
}

/// Fills 0-4 fixed templates from aggregate thresholds. Deterministic; the
/// confidence figure is part of the template, not a model output.
pub fn generate(cycles: &[Cycle], day_entries: &[DayEntry], today: NaiveDate) -> Vec<Insight> {
    let mut insights = Vec::new();

    if cycles.len() >= 2 {
        let avg = cycles
            .iter()
            .map(|c| c.length.unwrap_or(DEFAULT_CYCLE_LENGTH as i64) as f64)
            .sum::<f64>()
            / cycles.len() as f64;
        insights.push(insight(
            InsightKind::Pattern,
            "Cycle Pattern Detected",
            format!(
                "Your average cycle length is {} days. This is within the normal range.",
                avg.round() as i64
            ),
            85,
            today,
        ));
    }

    let recent: Vec<&DayEntry> = day_entries
        .iter()
        .filter(|e| (today - e.date).num_days() <= RECENT_WINDOW_DAYS)
        .collect();

    let mut counts: HashMap<&str, u32> = HashMap::new();
    for entry in &recent {
        for symptom in &entry.symptoms {
            *counts.entry(symptom.as_str()).or_default() += 1;
        }
    }
    let mut ranked: Vec<(&str, u32)> = counts.into_iter().collect();
    // count ties break alphabetically so the message is stable
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
    if let Some(&(symptom, count)) = ranked.first() {
        if count >= SYMPTOM_REPEAT_THRESHOLD {
            insights.push(insight(
                InsightKind::Health,
                "Recurring Symptom Noticed",
                format!(
                    "You've experienced {symptom} frequently this month. Consider tracking potential triggers like stress or diet."
                ),
                70,
                today,
            ));
        }
    }

    if let Some(last) = cycles.last() {
        if let Some(end) = last.end_date {
            let expected = end + Duration::days(last.length.unwrap_or(DEFAULT_CYCLE_LENGTH as i64));
            insights.push(insight(
                InsightKind::Prediction,
                "Next Period Prediction",
                format!(
                    "Based on your cycle pattern, your next period is expected around {}.",
                    expected.format("%B %-d, %Y")
                ),
                80,
                today,
            ));
        }
    }

    let low_energy_days = recent.iter().filter(|e| e.energy <= 2).count();
    if low_energy_days >= LOW_ENERGY_DAYS_THRESHOLD {
        insights.push(insight(
            InsightKind::Recommendation,
            "Energy Level Recommendation",
            "You've had low energy on several days this month. Consider increasing iron-rich foods and ensuring adequate sleep.".to_string(),
            60,
            today,
        ));
    }

    insights
}
