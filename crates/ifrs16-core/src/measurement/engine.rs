//! IFRS 16 lessee measurement at commencement.
//!
//! Determines the lease term from the contractual options, discounts the
//! payment stream at the incremental borrowing rate compounded down to the
//! payment period, and derives the amortization, depreciation and cashflow
//! schedules plus illustrative journal postings. Every call starts from
//! fresh state; identical parameters give identical results.

use std::time::Instant;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::{debug, warn};

use crate::error::Ifrs16Error;
use crate::time_value::{checked_sum, periodic_rate, present_value, round_money};
use crate::types::{with_metadata, ComputationOutput, Money, PaymentTiming, Years};
use crate::Ifrs16Result;

use super::journal::journal_entries;
use super::params::LeaseContractParameters;
use super::result::LeaseMeasurementResult;
use super::schedules::{
    amortization_schedule, cashflow_schedule, depreciation_schedule, payment_stream,
};
use super::term::determine_lease_term;

/// Longest schedule measured: a thousand years of monthly payments.
pub const MAX_PERIODS: u32 = 12_000;

/// Measure a lease: liability, ROU asset and all derived schedules.
///
/// Out-of-range inputs are not rejected; missing values take their
/// defaults and degenerate terms yield empty or negative schedules. A term
/// too long to schedule is measured with no periods. The only failures are
/// a payment date outside the supported calendar range and amounts that
/// leave the Decimal range.
pub fn compute(params: &LeaseContractParameters) -> Ifrs16Result<LeaseMeasurementResult> {
    let term = determine_lease_term(params);
    let frequency = params.frequency();
    let periods_per_year = frequency.periods_per_year();
    let periods = period_count(term.lease_term_years, periods_per_year).unwrap_or_else(|| {
        warn!(
            contract_id = params.contract_id(),
            lease_term_years = %term.lease_term_years,
            "lease term exceeds {MAX_PERIODS} periods; no periods scheduled"
        );
        0
    });
    let rate_per_period = periodic_rate(params.ibr(), periods_per_year);
    let timing = params.timing();

    debug!(
        contract_id = params.contract_id(),
        basis = ?term.basis,
        lease_term_years = %term.lease_term_years,
        periods,
        "lease term determined"
    );

    let payments = payment_stream(params.fixed_payment(), periods, params.rvg_amount())?;

    let prepayments = params.prepayments();
    let mut initial_liability = round_money(present_value(&payments, rate_per_period, timing)?);
    // A contract with no periods has no financed balance to net against.
    if timing == PaymentTiming::Advance && prepayments > Decimal::ZERO && periods > 0 {
        initial_liability = round_money(
            initial_liability
                .checked_sub(prepayments)
                .ok_or_else(|| overflow("lease liability net of prepayments"))?,
        );
    }
    let initial_rou = initial_liability
        .checked_add(params.initial_direct_costs())
        .and_then(|v| v.checked_add(prepayments))
        .and_then(|v| v.checked_sub(params.incentives()))
        .ok_or_else(|| overflow("right-of-use asset"))?;

    let amortization =
        amortization_schedule(&payments, initial_liability, initial_rou, rate_per_period)?;
    let depreciation = depreciation_schedule(initial_rou, periods);
    let cashflows = cashflow_schedule(params.commencement(), frequency, &payments)?;
    let journal = journal_entries(
        params.commencement(),
        params.currency(),
        initial_liability,
        initial_rou,
        amortization.first(),
    )?;

    let total_interest = checked_sum(amortization.iter().map(|r| &r.interest), "total interest")?;
    let total_depreciation = checked_sum(
        depreciation.iter().map(|r| &r.depreciation),
        "total depreciation",
    )?;
    let total_payments: Money = checked_sum(&payments, "total payments")?;

    debug!(
        contract_id = params.contract_id(),
        initial_liability = %initial_liability,
        initial_rou = %initial_rou,
        "lease measured"
    );

    Ok(LeaseMeasurementResult {
        contract_id: params.contract_id().to_string(),
        currency: params.currency().to_string(),
        initial_liability,
        initial_rou,
        total_interest,
        total_depreciation,
        total_payments,
        lease_term_years: term.lease_term_years,
        non_cancellable_years: term.non_cancellable_years,
        renewal_years: term.renewal_years,
        termination_years: term.termination_years,
        lease_term_basis: term.basis,
        periods,
        periods_per_year,
        rate_per_period,
        cashflow_schedule: cashflows,
        amortization_schedule: amortization,
        depreciation_schedule: depreciation,
        journal_entries: journal,
    })
}

/// [`compute`] wrapped in the standard output envelope, with warnings for
/// inputs that measured but look degenerate.
pub fn measure(
    params: &LeaseContractParameters,
) -> Ifrs16Result<ComputationOutput<LeaseMeasurementResult>> {
    let start = Instant::now();
    let result = compute(params)?;

    let mut warnings = Vec::new();
    if let Some(point) = params.termination_option_point.as_deref() {
        if !point.trim().is_empty() && result.termination_years.is_zero() {
            warnings.push(format!(
                "Termination option point '{point}' has no leading number and was ignored"
            ));
        }
    }
    if period_count(result.lease_term_years, result.periods_per_year).is_none() {
        warnings.push(format!(
            "Lease term of {} years exceeds {MAX_PERIODS} payment periods; no periods were scheduled",
            result.lease_term_years
        ));
    } else if result.periods == 0 {
        warnings.push("Lease term gives no payment periods; only initial recognition is measured".into());
    }
    if result.rate_per_period <= -Decimal::ONE {
        warnings.push(format!(
            "IBR of {} is at or below -100%; discounting is best-effort",
            params.ibr()
        ));
    }
    if result.initial_rou < Decimal::ZERO {
        warnings.push(format!(
            "Right-of-use asset is negative ({}); lease incentives exceed the other components",
            result.initial_rou
        ));
    }

    let assumptions = serde_json::json!({
        "ibr_annual": params.ibr().to_string(),
        "payment_frequency": params.frequency(),
        "payment_timing": params.timing(),
        "commencement_date": params.commencement(),
        "lease_term_basis": result.lease_term_basis,
        "rounding": "2 dp, midpoints away from zero",
    });

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "IFRS 16 Lessee Measurement (present value of lease payments at IBR)",
        &assumptions,
        warnings,
        elapsed,
        result,
    ))
}

/// round(term × periods per year), midpoints away from zero. A term at or
/// below zero gives no periods; None when the count exceeds [`MAX_PERIODS`].
fn period_count(lease_term_years: Years, periods_per_year: u32) -> Option<u32> {
    if lease_term_years <= Decimal::ZERO {
        return Some(0);
    }
    lease_term_years
        .checked_mul(Decimal::from(periods_per_year))?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
        .filter(|&periods| periods <= MAX_PERIODS)
}

fn overflow(what: &str) -> Ifrs16Error {
    Ifrs16Error::ArithmeticOverflow(what.to_string())
}
