use serde::{ Serialize, Deserialize };
use uuid::Uuid;
use chrono::{NaiveDate, DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flow {
    Light,
    Medium,
    Heavy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodEntry {
    pub id: Uuid,
    pub date: NaiveDate,
    pub flow: Flow,
    pub symptoms: Vec<String>,
    pub mood: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// One tracked period. Entries stay sorted ascending by date; the cycle is
/// open until `end_date` is set via an explicit close.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cycle {
    pub id: Uuid,
    pub start_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<i64>,
    pub entries: Vec<PeriodEntry>,
}

impl Cycle {
    pub fn is_open(&self) -> bool {
        self.end_date.is_none()
    }
}

/// A daily wellness log, at most one per calendar date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayEntry {
    pub id: Uuid,
    pub date: NaiveDate,
    pub symptoms: Vec<String>,
    pub mood: String,
    pub energy: u8, // 1-5 scale
    pub sleep: f32, // hours
    pub water: u8,  // glasses
    pub exercise: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Derived figures, recomputed after every mutation. Only
/// `tracking_start_date` carries state of its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserStats {
    pub current_streak: u32,
    pub total_entries: u32,
    pub points: u32,
    pub average_cycle_length: u32,
    pub tracking_start_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub unlocked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unlocked_date: Option<NaiveDate>,
    pub points: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Pattern,
    Health,
    Prediction,
    Recommendation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Insight {
    pub id: Uuid,
    pub kind: InsightKind,
    pub title: String,
    pub message: String,
    pub confidence: u8,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DonationParty {
    pub id: String,
    pub name: String,
    pub wallet_address: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    Verified,
    Pending,
    Unverified,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DonationNgo {
    pub id: String,
    pub name: String,
    pub wallet_address: String,
    pub verification_status: VerificationStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DonationBeneficiary {
    pub id: String,
    pub name: String,
    pub student_id: String,
    pub school: String,
    pub grade: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DonationStatus {
    Pending,
    Confirmed,
    Distributed,
    Completed,
}

/// Entry in the mocked donation ledger. The hash and block number are
/// generated locally; no chain is involved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DonationTransaction {
    pub id: Uuid,
    pub block_hash: String,
    pub timestamp: DateTime<Utc>,
    pub donor: DonationParty,
    pub ngo: DonationNgo,
    pub beneficiary: DonationBeneficiary,
    pub amount: u32,
    pub currency: String,
    pub purpose: String,
    pub status: DonationStatus,
    pub block_number: u64,
    pub confirmations: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DonationStats {
    pub total_donated: u64,
    pub total_beneficiaries: u32,
    pub total_ngos: u32,
    pub average_donation: u32,
    pub platform_transparency_score: u8,
    pub completed_transactions: u32,
}
