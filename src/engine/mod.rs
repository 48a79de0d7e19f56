pub mod achievements;
pub mod cycles;
pub mod donations;
pub mod insights;
pub mod stats;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::clock::Clock;
use crate::models::{
    Achievement, Cycle, DayEntry, DonationStats, DonationTransaction, Insight, PeriodEntry,
    UserStats,
};
use crate::store::{self, keys, KvStore, StoreError};

use self::cycles::CloseError;
use self::donations::NewDonation;

pub type SharedEngine = Arc<Mutex<Engine>>;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Close(#[from] CloseError),
}

/// What every mutation hands back: refreshed stats plus the badges that
/// flipped to unlocked during this recompute.
#[derive(Debug, Clone, Serialize)]
pub struct RecomputeOutcome {
    pub stats: UserStats,
    pub newly_unlocked: Vec<Achievement>,
}

/// Owns the tracked collections and mirrors every mutation to the store.
/// All operations run to completion on the caller's thread; the store and
/// clock are injected so tests stay deterministic.
///
/// Mutations apply in memory first and persist second. A failing store
/// surfaces the error to the caller but never rolls the in-memory update
/// back.
pub struct Engine {
    store: Box<dyn KvStore>,
    clock: Box<dyn Clock>,
    cycles: Vec<Cycle>,
    day_entries: Vec<DayEntry>,
    stats: UserStats,
    achievements: Vec<Achievement>,
    insights: Vec<Insight>,
    donations: Vec<DonationTransaction>,
    donation_stats: DonationStats,
}

impl Engine {
    pub fn load(store: Box<dyn KvStore>, clock: Box<dyn Clock>) -> Result<Self, EngineError> {
        let today = clock.today();
        let cycles = store::load_or(store.as_ref(), keys::CYCLES, Vec::new)?;
        let day_entries = store::load_or(store.as_ref(), keys::DAY_ENTRIES, Vec::new)?;
        let stats = store::load_or(store.as_ref(), keys::USER_STATS, || stats::fresh(today))?;
        let achievements =
            store::load_or(store.as_ref(), keys::ACHIEVEMENTS, achievements::catalog)?;
        let insights = store::load_or(store.as_ref(), keys::AI_INSIGHTS, Vec::new)?;
        let donations = store::load_or(store.as_ref(), keys::DONATIONS, Vec::new)?;
        let donation_stats =
            store::load_or(store.as_ref(), keys::DONATION_STATS, donations::seed_stats)?;

        Ok(Self {
            store,
            clock,
            cycles,
            day_entries,
            stats,
            achievements,
            insights,
            donations,
            donation_stats,
        })
    }

    pub fn cycles(&self) -> &[Cycle] {
        &self.cycles
    }

    pub fn day_entries(&self) -> &[DayEntry] {
        &self.day_entries
    }

    pub fn stats(&self) -> &UserStats {
        &self.stats
    }

    pub fn achievements(&self) -> &[Achievement] {
        &self.achievements
    }

    pub fn insights(&self) -> &[Insight] {
        &self.insights
    }

    pub fn donations(&self) -> &[DonationTransaction] {
        &self.donations
    }

    pub fn donation_stats(&self) -> &DonationStats {
        &self.donation_stats
    }

    pub fn save_period_entry(
        &mut self,
        entry: PeriodEntry,
    ) -> Result<RecomputeOutcome, EngineError> {
        let (idx, is_new) = cycles::save_period_entry(&mut self.cycles, entry);
        if is_new {
            tracing::info!(
                "🌸 started cycle {} on {}",
                self.cycles[idx].id,
                self.cycles[idx].start_date
            );
        }
        store::save(self.store.as_mut(), keys::CYCLES, &self.cycles)?;
        self.recompute()
    }

    pub fn save_day_entry(&mut self, entry: DayEntry) -> Result<RecomputeOutcome, EngineError> {
        cycles::save_day_entry(&mut self.day_entries, entry);
        store::save(self.store.as_mut(), keys::DAY_ENTRIES, &self.day_entries)?;
        self.recompute()
    }

    /// Deleting an id nothing holds is fine; the recompute still runs so the
    /// stats document stays fresh.
    pub fn delete_period_entry(&mut self, entry_id: Uuid) -> Result<RecomputeOutcome, EngineError> {
        let removed = cycles::delete_period_entry(&mut self.cycles, entry_id);
        if !removed {
            tracing::debug!("delete for unknown period entry {}", entry_id);
        }
        store::save(self.store.as_mut(), keys::CYCLES, &self.cycles)?;
        self.recompute()
    }

    pub fn close_cycle(
        &mut self,
        cycle_id: Uuid,
        end_date: Option<chrono::NaiveDate>,
    ) -> Result<RecomputeOutcome, EngineError> {
        cycles::close_cycle(&mut self.cycles, cycle_id, end_date)?;
        store::save(self.store.as_mut(), keys::CYCLES, &self.cycles)?;
        self.recompute()
    }

    pub fn refresh_insights(&mut self) -> Result<Vec<Insight>, EngineError> {
        self.insights = insights::generate(&self.cycles, &self.day_entries, self.clock.today());
        store::save(self.store.as_mut(), keys::AI_INSIGHTS, &self.insights)?;
        Ok(self.insights.clone())
    }

    pub fn create_donation(
        &mut self,
        donation: NewDonation,
        now: DateTime<Utc>,
    ) -> Result<DonationTransaction, EngineError> {
        let tx = donations::build_transaction(donation, now);
        // newest first, matching ledger display order
        self.donations.insert(0, tx.clone());
        donations::record_donation(&mut self.donation_stats, tx.amount, self.donations.len());
        store::save(self.store.as_mut(), keys::DONATIONS, &self.donations)?;
        store::save(self.store.as_mut(), keys::DONATION_STATS, &self.donation_stats)?;
        Ok(tx)
    }

    /// One confirmation tick for the simulator. Returns whether the
    /// transaction wants more ticks; unknown ids (ledger cleared meanwhile)
    /// end the simulation quietly.
    pub fn advance_donation(&mut self, id: Uuid) -> Result<bool, EngineError> {
        let Some(tx) = self.donations.iter_mut().find(|t| t.id == id) else {
            return Ok(false);
        };
        let more = donations::advance_confirmation(tx);
        store::save(self.store.as_mut(), keys::DONATIONS, &self.donations)?;
        Ok(more)
    }

    /// Resets every collection to its pristine state, including a fresh
    /// badge catalog.
    pub fn clear_data(&mut self) -> Result<(), EngineError> {
        self.cycles.clear();
        self.day_entries.clear();
        self.insights.clear();
        self.achievements = achievements::catalog();
        self.stats = stats::fresh(self.clock.today());
        self.donations.clear();
        self.donation_stats = donations::seed_stats();

        store::save(self.store.as_mut(), keys::CYCLES, &self.cycles)?;
        store::save(self.store.as_mut(), keys::DAY_ENTRIES, &self.day_entries)?;
        store::save(self.store.as_mut(), keys::AI_INSIGHTS, &self.insights)?;
        store::save(self.store.as_mut(), keys::ACHIEVEMENTS, &self.achievements)?;
        store::save(self.store.as_mut(), keys::USER_STATS, &self.stats)?;
        store::save(self.store.as_mut(), keys::DONATIONS, &self.donations)?;
        store::save(self.store.as_mut(), keys::DONATION_STATS, &self.donation_stats)?;
        Ok(())
    }

    /// Recomputes derived stats, persists them, then re-checks the badge
    /// rules. A fresh unlock feeds its points straight back into the stats
    /// before they are written out.
    fn recompute(&mut self) -> Result<RecomputeOutcome, EngineError> {
        let today = self.clock.today();
        self.stats = stats::compute(
            &self.cycles,
            &self.day_entries,
            &self.achievements,
            self.stats.tracking_start_date,
            today,
        );

        let newly_unlocked = achievements::evaluate(
            &self.stats,
            &self.cycles,
            &self.day_entries,
            &mut self.achievements,
            today,
        );
        if !newly_unlocked.is_empty() {
            self.stats.points = stats::points_total(&self.achievements);
            store::save(self.store.as_mut(), keys::ACHIEVEMENTS, &self.achievements)?;
            for badge in &newly_unlocked {
                tracing::info!("🏆 achievement unlocked: {} (+{})", badge.title, badge.points);
            }
        }
        store::save(self.store.as_mut(), keys::USER_STATS, &self.stats)?;

        Ok(RecomputeOutcome {
            stats: self.stats.clone(),
            newly_unlocked,
        })
    }
}
