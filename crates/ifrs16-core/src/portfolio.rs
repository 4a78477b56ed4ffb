//! Portfolio roll-up of lease measurements.
//!
//! Each contract is measured on its own. Contracts missing a required
//! term, or whose measurement fails, are excluded from the totals and
//! reported; they never abort the rest of the portfolio.

use std::time::Instant;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::Ifrs16Error;
use crate::measurement::{compute, LeaseContractParameters};
use crate::types::{with_metadata, ComputationOutput, Money, Years};
use crate::Ifrs16Result;

/// Headline figures for one measured contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioLine {
    pub contract_id: String,
    pub currency: String,
    pub initial_liability: Money,
    pub initial_rou: Money,
    pub total_interest: Money,
    pub total_depreciation: Money,
    pub lease_term_years: Years,
}

/// A contract left out of the totals, with the reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExcludedContract {
    /// Position in the submitted list (0-indexed)
    pub index: usize,
    pub contract_id: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub total_contracts: usize,
    pub valid_contracts: usize,
    pub total_rou: Money,
    pub total_liability: Money,
    pub total_interest: Money,
    pub total_depreciation: Money,
    /// Mean lease term of the valid contracts (0 when there are none)
    pub average_lease_term_years: Years,
    /// total_depreciation / average term / 12 (a zero term counts as one year)
    pub average_monthly_depreciation: Money,
    /// total_interest / average term / 12 (a zero term counts as one year)
    pub average_monthly_interest: Money,
    pub lines: Vec<PortfolioLine>,
    pub excluded: Vec<ExcludedContract>,
}

/// Running portfolio totals. A contract whose figures would push a total
/// out of the Decimal range is excluded instead of added.
#[derive(Debug, Clone, Copy, Default)]
struct Totals {
    rou: Money,
    liability: Money,
    interest: Money,
    depreciation: Money,
    term: Years,
}

impl Totals {
    fn add(self, line: &PortfolioLine) -> Ifrs16Result<Totals> {
        let sum = |total: Decimal, value: Decimal, what: &str| {
            total.checked_add(value).ok_or_else(|| {
                Ifrs16Error::ArithmeticOverflow(format!("portfolio {what}"))
            })
        };
        Ok(Totals {
            rou: sum(self.rou, line.initial_rou, "total ROU")?,
            liability: sum(self.liability, line.initial_liability, "total liability")?,
            interest: sum(self.interest, line.total_interest, "total interest")?,
            depreciation: sum(self.depreciation, line.total_depreciation, "total depreciation")?,
            term: sum(self.term, line.lease_term_years, "total lease term")?,
        })
    }
}

/// A contract can be rolled up only when it names its ID and
/// commencement date and states a non-zero term, payment and IBR.
pub fn validate_required_fields(params: &LeaseContractParameters) -> Ifrs16Result<()> {
    let missing = |field: &str| Ifrs16Error::InvalidInput {
        field: field.into(),
        reason: "required for portfolio aggregation".into(),
    };
    let non_zero = |v: Option<Decimal>| v.is_some_and(|d| !d.is_zero());

    if params.contract_id().trim().is_empty() {
        return Err(missing("contract_id"));
    }
    if params.commencement_date.is_none() {
        return Err(missing("commencement_date"));
    }
    if !non_zero(params.non_cancellable_years) {
        return Err(missing("non_cancellable_years"));
    }
    if !non_zero(params.fixed_payment_per_period) {
        return Err(missing("fixed_payment_per_period"));
    }
    if !non_zero(params.ibr_annual) {
        return Err(missing("ibr_annual"));
    }
    Ok(())
}

pub fn has_required_fields(params: &LeaseContractParameters) -> bool {
    validate_required_fields(params).is_ok()
}

/// Measure every contract and total the qualifying ones.
pub fn summarize_portfolio(
    contracts: &[LeaseContractParameters],
) -> Ifrs16Result<ComputationOutput<PortfolioSummary>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();
    let mut lines = Vec::with_capacity(contracts.len());
    let mut excluded = Vec::new();

    let mut totals = Totals::default();

    for (index, params) in contracts.iter().enumerate() {
        let measured = validate_required_fields(params)
            .and_then(|_| compute(params))
            .and_then(|result| {
                let line = PortfolioLine {
                    contract_id: result.contract_id,
                    currency: result.currency,
                    initial_liability: result.initial_liability,
                    initial_rou: result.initial_rou,
                    total_interest: result.total_interest,
                    total_depreciation: result.total_depreciation,
                    lease_term_years: result.lease_term_years,
                };
                totals = totals.add(&line)?;
                Ok(line)
            });
        match measured {
            Ok(line) => lines.push(line),
            Err(e) => {
                warn!(index, contract_id = params.contract_id(), error = %e, "contract excluded");
                warnings.push(format!(
                    "Contract #{index} '{}' excluded: {e}",
                    params.contract_id()
                ));
                excluded.push(ExcludedContract {
                    index,
                    contract_id: params.contract_id().to_string(),
                    reason: e.to_string(),
                });
            }
        }
    }

    let Totals {
        rou: total_rou,
        liability: total_liability,
        interest: total_interest,
        depreciation: total_depreciation,
        term: total_term,
    } = totals;

    let average_lease_term_years = if lines.is_empty() {
        Decimal::ZERO
    } else {
        total_term / Decimal::from(lines.len() as u64)
    };
    // Zero average term is treated as one year
    let months = if average_lease_term_years.is_zero() {
        dec!(12)
    } else {
        average_lease_term_years
            .checked_mul(dec!(12))
            .unwrap_or(Decimal::MAX)
    };

    let mut currencies: Vec<&str> = lines.iter().map(|l| l.currency.as_str()).collect();
    currencies.sort_unstable();
    currencies.dedup();
    if currencies.len() > 1 {
        warnings.push(format!(
            "Totals combine contracts in {} currencies ({}); no translation is applied",
            currencies.len(),
            currencies.join(", ")
        ));
    }

    let summary = PortfolioSummary {
        total_contracts: contracts.len(),
        valid_contracts: lines.len(),
        total_rou,
        total_liability,
        total_interest,
        total_depreciation,
        average_lease_term_years,
        average_monthly_depreciation: total_depreciation / months,
        average_monthly_interest: total_interest / months,
        lines,
        excluded,
    };

    let assumptions = serde_json::json!({
        "required_fields": [
            "contract_id",
            "commencement_date",
            "non_cancellable_years",
            "fixed_payment_per_period",
            "ibr_annual"
        ],
        "measurement": "IFRS 16 lessee, per-contract",
    });

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "IFRS 16 Lease Portfolio Summary",
        &assumptions,
        warnings,
        elapsed,
        summary,
    ))
}
