use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Rate, Years};

use super::term::LeaseTermBasis;

/// Complete lease measurement for one contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaseMeasurementResult {
    pub contract_id: String,
    pub currency: String,
    /// Lease liability at commencement (PV of lease payments, net of
    /// prepayments when paid in advance)
    pub initial_liability: Money,
    /// Right-of-use asset at commencement
    pub initial_rou: Money,
    /// Sum of interest over the amortization schedule
    pub total_interest: Money,
    /// Sum of the depreciation schedule
    pub total_depreciation: Money,
    /// Undiscounted sum of all payments, RVG included
    pub total_payments: Money,
    pub lease_term_years: Years,
    pub non_cancellable_years: Years,
    pub renewal_years: Years,
    pub termination_years: Years,
    pub lease_term_basis: LeaseTermBasis,
    pub periods: u32,
    pub periods_per_year: u32,
    pub rate_per_period: Rate,
    pub cashflow_schedule: Vec<CashflowRow>,
    pub amortization_schedule: Vec<AmortizationRow>,
    pub depreciation_schedule: Vec<DepreciationRow>,
    pub journal_entries: Vec<JournalEntry>,
}

/// Rent falling due in one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashflowRow {
    /// Period number (1-indexed)
    pub period: u32,
    pub date: NaiveDate,
    pub rent: Money,
}

/// A single row in the lease liability amortization schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    /// Period number (1-indexed)
    pub period: u32,
    pub payment: Money,
    pub interest: Money,
    pub principal: Money,
    /// Closing liability, never below zero
    pub remaining_liability: Money,
    pub depreciation: Money,
    /// Carrying amount of the ROU asset, never below zero
    pub remaining_asset: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepreciationRow {
    pub period: u32,
    pub depreciation: Money,
}

/// One line of a journal posting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub date: NaiveDate,
    pub account: String,
    pub debit: Money,
    pub credit: Money,
    pub memo: String,
    pub currency: String,
}
