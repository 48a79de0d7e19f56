use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Cycle, DayEntry, PeriodEntry};

/// A period entry joins an open cycle when it lands within this many days
/// of the cycle's start.
pub const CYCLE_WINDOW_DAYS: i64 = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CloseError {
    #[error("cycle {0} not found")]
    NotFound(Uuid),
    #[error("cycle {0} is already closed")]
    AlreadyClosed(Uuid),
    #[error("end date precedes the cycle start")]
    EndBeforeStart,
}

/// Picks the cycle an entry on `date` belongs to: the first open cycle in
/// iteration order whose start is within `window_days` of the date. When
/// none matches, appends a fresh open cycle starting on `date`. Open cycles
/// do not overlap in practice, but the first-match rule keeps the choice
/// single-valued either way.
pub fn find_or_create_cycle(
    cycles: &mut Vec<Cycle>,
    date: NaiveDate,
    window_days: i64,
) -> (usize, bool) {
    let found = cycles.iter().position(|cycle| {
        cycle.is_open() && (date - cycle.start_date).num_days().abs() <= window_days
    });
    match found {
        Some(idx) => (idx, false),
        None => {
            cycles.push(Cycle {
                id: Uuid::new_v4(),
                start_date: date,
                end_date: None,
                length: None,
                entries: Vec::new(),
            });
            (cycles.len() - 1, true)
        }
    }
}

/// Upserts a period entry into its cycle, matching by entry id. The cycle's
/// entries are re-sorted ascending by date afterwards. Cycles are never
/// closed here; see [`close_cycle`].
pub fn save_period_entry(cycles: &mut Vec<Cycle>, entry: PeriodEntry) -> (usize, bool) {
    let (idx, is_new) = find_or_create_cycle(cycles, entry.date, CYCLE_WINDOW_DAYS);
    let cycle = &mut cycles[idx];
    match cycle.entries.iter_mut().find(|e| e.id == entry.id) {
        Some(existing) => *existing = entry,
        None => cycle.entries.push(entry),
    }
    cycle.entries.sort_by_key(|e| e.date);
    (idx, is_new)
}

/// Upserts a day entry by calendar date. An existing record keeps its id;
/// only its fields are replaced.
pub fn save_day_entry(day_entries: &mut Vec<DayEntry>, entry: DayEntry) {
    match day_entries.iter_mut().find(|e| e.date == entry.date) {
        Some(existing) => {
            let id = existing.id;
            *existing = entry;
            existing.id = id;
        }
        None => day_entries.push(entry),
    }
}

/// Removes a period entry wherever it lives and drops any cycle left empty.
/// Unknown ids are a no-op; returns whether anything was removed.
pub fn delete_period_entry(cycles: &mut Vec<Cycle>, entry_id: Uuid) -> bool {
    let mut removed = false;
    for cycle in cycles.iter_mut() {
        let before = cycle.entries.len();
        cycle.entries.retain(|e| e.id != entry_id);
        removed |= cycle.entries.len() != before;
    }
    cycles.retain(|c| !c.entries.is_empty());
    removed
}

/// Closes a cycle. `end_date` defaults to the last entry's date and the
/// length is the inclusive day span from start to end. Nothing triggers
/// this automatically; callers decide when a cycle is over.
pub fn close_cycle(
    cycles: &mut [Cycle],
    cycle_id: Uuid,
    end_date: Option<NaiveDate>,
) -> Result<(), CloseError> {
    let cycle = cycles
        .iter_mut()
        .find(|c| c.id == cycle_id)
        .ok_or(CloseError::NotFound(cycle_id))?;
    if !cycle.is_open() {
        return Err(CloseError::AlreadyClosed(cycle_id));
    }

    let end = end_date
        .or_else(|| cycle.entries.last().map(|e| e.date))
        .unwrap_or(cycle.start_date);
    if end < cycle.start_date {
        return Err(CloseError::EndBeforeStart);
    }

    cycle.end_date = Some(end);
    cycle.length = Some((end - cycle.start_date).num_days() + 1);
    Ok(())
}
