//! Per-period schedules derived from the initial measurement.
//!
//! The liability is amortized with the effective interest method over the
//! same payment stream that was discounted at commencement. The ROU asset is
//! depreciated straight-line over the lease term regardless of payment
//! timing.

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;

use crate::error::Ifrs16Error;
use crate::time_value::round_money;
use crate::types::{Money, PaymentFrequency, Rate};
use crate::Ifrs16Result;

use super::result::{AmortizationRow, CashflowRow, DepreciationRow};

/// Fixed payment every period, with the RVG added to the final one.
pub fn payment_stream(
    fixed_payment: Money,
    periods: u32,
    rvg_amount: Money,
) -> Ifrs16Result<Vec<Money>> {
    let mut stream = vec![fixed_payment; periods as usize];
    if let Some(last) = stream.last_mut() {
        *last = fixed_payment
            .checked_add(rvg_amount)
            .ok_or_else(|| overflow("final payment including RVG"))?;
    }
    Ok(stream)
}

/// Straight-line depreciation per period, rounded to cents.
pub fn depreciation_per_period(initial_rou: Money, periods: u32) -> Money {
    if periods == 0 {
        return Decimal::ZERO;
    }
    round_money(initial_rou / Decimal::from(periods))
}

pub fn amortization_schedule(
    payments: &[Money],
    initial_liability: Money,
    initial_rou: Money,
    period_rate: Rate,
) -> Ifrs16Result<Vec<AmortizationRow>> {
    let periods = payments.len() as u32;
    let depreciation = depreciation_per_period(initial_rou, periods);
    let mut schedule = Vec::with_capacity(payments.len());

    let mut opening = initial_liability;
    let mut remaining_asset = initial_rou;

    for (i, &payment) in payments.iter().enumerate() {
        let period = (i + 1) as u32;
        let step = |v: Option<Decimal>, what: &str| {
            v.map(round_money)
                .ok_or_else(|| overflow(&format!("{what} in period {period}")))
        };
        let interest = step(opening.checked_mul(period_rate), "interest")?;
        let principal = step(payment.checked_sub(interest), "principal")?;
        let closing = step(opening.checked_sub(principal), "remaining liability")?
            .max(Decimal::ZERO);
        remaining_asset = step(remaining_asset.checked_sub(depreciation), "remaining asset")?;

        schedule.push(AmortizationRow {
            period,
            payment,
            interest,
            principal,
            remaining_liability: closing,
            depreciation,
            remaining_asset: remaining_asset.max(Decimal::ZERO),
        });

        opening = closing;
    }

    Ok(schedule)
}

fn overflow(what: &str) -> Ifrs16Error {
    Ifrs16Error::ArithmeticOverflow(what.to_string())
}

pub fn depreciation_schedule(initial_rou: Money, periods: u32) -> Vec<DepreciationRow> {
    let depreciation = depreciation_per_period(initial_rou, periods);
    (1..=periods)
        .map(|period| DepreciationRow {
            period,
            depreciation,
        })
        .collect()
}

/// Payment dates step by whole calendar months from commencement. A day
/// past the end of a shorter month lands on that month's last day.
pub fn cashflow_schedule(
    commencement: NaiveDate,
    frequency: PaymentFrequency,
    payments: &[Money],
) -> Ifrs16Result<Vec<CashflowRow>> {
    let months_per_period = frequency.months_per_period();
    payments
        .iter()
        .enumerate()
        .map(|(i, &rent)| {
            let date = add_months(commencement, i as u32 * months_per_period)?;
            Ok(CashflowRow {
                period: (i + 1) as u32,
                date,
                rent,
            })
        })
        .collect()
}

pub(crate) fn add_months(date: NaiveDate, months: u32) -> Ifrs16Result<NaiveDate> {
    date.checked_add_months(Months::new(months)).ok_or_else(|| {
        Ifrs16Error::DateError(format!("{date} plus {months} months is out of range"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_payment_stream_adds_rvg_to_final_period() {
        let stream = payment_stream(dec!(1000), 4, dec!(250)).unwrap();
        assert_eq!(stream, vec![dec!(1000), dec!(1000), dec!(1000), dec!(1250)]);
        assert!(payment_stream(dec!(1000), 0, dec!(250)).unwrap().is_empty());
    }

    #[test]
    fn test_amortization_zero_rate_is_straight_repayment() {
        let payments = payment_stream(dec!(100), 3, Decimal::ZERO).unwrap();
        let schedule = amortization_schedule(&payments, dec!(300), dec!(300), Decimal::ZERO).unwrap();

        assert_eq!(schedule.len(), 3);
        for row in &schedule {
            assert_eq!(row.interest, Decimal::ZERO);
            assert_eq!(row.principal, dec!(100));
            assert_eq!(row.depreciation, dec!(100));
        }
        assert_eq!(schedule[0].remaining_liability, dec!(200));
        assert_eq!(schedule[2].remaining_liability, Decimal::ZERO);
        assert_eq!(schedule[2].remaining_asset, Decimal::ZERO);
    }

    #[test]
    fn test_amortization_interest_on_opening_balance() {
        // Arrears, 10% per period, 2 payments of 121 -> PV 210
        let payments = vec![dec!(121), dec!(121)];
        let schedule = amortization_schedule(&payments, dec!(210), dec!(210), dec!(0.10)).unwrap();

        assert_eq!(schedule[0].interest, dec!(21));
        assert_eq!(schedule[0].principal, dec!(100));
        assert_eq!(schedule[0].remaining_liability, dec!(110));
        assert_eq!(schedule[1].interest, dec!(11));
        assert_eq!(schedule[1].principal, dec!(110));
        assert_eq!(schedule[1].remaining_liability, Decimal::ZERO);
    }

    #[test]
    fn test_amortization_liability_floored_at_zero() {
        // Payment well above the balance would drive the liability negative
        let payments = vec![dec!(500), dec!(500)];
        let schedule = amortization_schedule(&payments, dec!(600), dec!(600), Decimal::ZERO).unwrap();

        assert_eq!(schedule[0].remaining_liability, dec!(100));
        assert_eq!(schedule[1].principal, dec!(500));
        assert_eq!(schedule[1].remaining_liability, Decimal::ZERO);
    }

    #[test]
    fn test_remaining_asset_floored_when_rounding_overshoots() {
        // 100 / 3 = 33.33 per period -> 0.01 left after 3 periods;
        // 200 / 3 = 66.67 per period -> -0.01 reported as 0
        let payments = payment_stream(dec!(10), 3, Decimal::ZERO).unwrap();
        let under = amortization_schedule(&payments, dec!(30), dec!(100), Decimal::ZERO).unwrap();
        assert_eq!(under[2].remaining_asset, dec!(0.01));

        let over = amortization_schedule(&payments, dec!(30), dec!(200), Decimal::ZERO).unwrap();
        assert_eq!(over[2].depreciation, dec!(66.67));
        assert_eq!(over[2].remaining_asset, Decimal::ZERO);
    }

    #[test]
    fn test_depreciation_schedule_is_constant() {
        let schedule = depreciation_schedule(dec!(1000), 3);
        assert_eq!(schedule.len(), 3);
        assert!(schedule.iter().all(|r| r.depreciation == dec!(333.33)));
        assert!(depreciation_schedule(dec!(1000), 0).is_empty());
    }

    #[test]
    fn test_cashflow_dates_quarterly_roll_over_year() {
        let payments = payment_stream(dec!(5000), 5, Decimal::ZERO).unwrap();
        let schedule =
            cashflow_schedule(date(2025, 10, 1), PaymentFrequency::Quarterly, &payments).unwrap();

        let dates: Vec<NaiveDate> = schedule.iter().map(|r| r.date).collect();
        assert_eq!(
            dates,
            vec![
                date(2025, 10, 1),
                date(2026, 1, 1),
                date(2026, 4, 1),
                date(2026, 7, 1),
                date(2026, 10, 1),
            ]
        );
    }

    #[test]
    fn test_cashflow_dates_clamp_to_month_end() {
        let payments = payment_stream(dec!(100), 4, Decimal::ZERO).unwrap();
        let schedule =
            cashflow_schedule(date(2024, 1, 31), PaymentFrequency::Monthly, &payments).unwrap();

        assert_eq!(schedule[1].date, date(2024, 2, 29));
        assert_eq!(schedule[2].date, date(2024, 3, 31));
        assert_eq!(schedule[3].date, date(2024, 4, 30));
    }

    #[test]
    fn test_cashflow_rent_includes_rvg_on_last_row() {
        let payments = payment_stream(dec!(100), 2, dec!(40)).unwrap();
        let schedule =
            cashflow_schedule(date(2025, 1, 1), PaymentFrequency::Annual, &payments).unwrap();
        assert_eq!(schedule[0].rent, dec!(100));
        assert_eq!(schedule[1].rent, dec!(140));
        assert_eq!(schedule[1].date, date(2026, 1, 1));
    }

    #[test]
    fn test_overflowing_amounts_are_errors() {
        let huge = dec!(70000000000000000000000000000);
        let err = payment_stream(huge, 2, huge).unwrap_err();
        assert!(matches!(err, Ifrs16Error::ArithmeticOverflow(_)));

        // Interest on the opening balance leaves the Decimal range
        let err = amortization_schedule(&[dec!(1)], huge, Decimal::ZERO, dec!(2)).unwrap_err();
        assert!(err.to_string().contains("interest in period 1"));
    }
}
