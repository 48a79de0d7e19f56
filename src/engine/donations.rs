use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::models::{
    DonationBeneficiary, DonationNgo, DonationParty, DonationStats, DonationStatus,
    DonationTransaction,
};

/// Confirmations at which a transaction is considered final.
pub const CONFIRMATIONS_TARGET: u32 = 12;

#[derive(Debug, Clone, Deserialize)]
pub struct NewDonation {
    pub donor: DonationParty,
    pub ngo: DonationNgo,
    pub beneficiary: DonationBeneficiary,
    pub amount: u32,
    pub currency: String,
    pub purpose: String,
}

/// Hex the way a chain explorer would show it, minus any chain behind it.
fn pseudo_block_hash() -> String {
    format!("0x{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())
}

fn pseudo_block_number() -> u64 {
    18_000_000 + (Uuid::new_v4().as_u128() % 1_000_000) as u64
}

/// Platform-wide figures shown before any donation goes through this
/// install.
pub fn seed_stats() -> DonationStats {
    DonationStats {
        total_donated: 95_650,
        total_beneficiaries: 247,
        total_ngos: 12,
        average_donation: 387,
        platform_transparency_score: 98,
        completed_transactions: 127,
    }
}

pub fn build_transaction(donation: NewDonation, timestamp: DateTime<Utc>) -> DonationTransaction {
    DonationTransaction {
        id: Uuid::new_v4(),
        block_hash: pseudo_block_hash(),
        timestamp,
        donor: donation.donor,
        ngo: donation.ngo,
        beneficiary: donation.beneficiary,
        amount: donation.amount,
        currency: donation.currency,
        purpose: donation.purpose,
        status: DonationStatus::Pending,
        block_number: pseudo_block_number(),
        confirmations: 0,
    }
}

/// Folds a fresh donation into the running figures. `ledger_len` counts the
/// local ledger including the new transaction.
pub fn record_donation(stats: &mut DonationStats, amount: u32, ledger_len: usize) {
    stats.total_donated += amount as u64;
    stats.total_beneficiaries += 1;
    let denominator = ledger_len as u64 + stats.completed_transactions as u64;
    if denominator > 0 {
        stats.average_donation = (stats.total_donated as f64 / denominator as f64).round() as u32;
    }
}

/// One simulator tick: bump the confirmation count and walk the status
/// ladder. Returns whether more ticks are needed.
pub fn advance_confirmation(tx: &mut DonationTransaction) -> bool {
    if tx.confirmations >= CONFIRMATIONS_TARGET {
        return false;
    }
    tx.confirmations += 1;
    tx.status = match tx.confirmations {
        c if c >= 12 => DonationStatus::Completed,
        c if c >= 6 => DonationStatus::Distributed,
        _ => DonationStatus::Confirmed,
    };
    tx.confirmations < CONFIRMATIONS_TARGET
}
