use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::error::Ifrs16Error;
use crate::types::{Money, PaymentTiming, Rate};
use crate::Ifrs16Result;

const NEWTON_ITERATIONS: u32 = 50;
const NEWTON_TOLERANCE: Decimal = dec!(0.0000000000001);

/// Round a monetary amount to cents, midpoints away from zero.
pub fn round_money(amount: Money) -> Money {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Convert an annual rate to the equivalent compound rate per period.
/// period_rate = (1 + annual_rate)^(1/periods_per_year) - 1
///
/// A compounding base at or below zero has no real root; the period rate
/// is then -1 and every discounted flow after the undiscounted one drops out.
pub fn periodic_rate(annual_rate: Rate, periods_per_year: u32) -> Rate {
    if periods_per_year <= 1 {
        return annual_rate;
    }
    let base = Decimal::ONE.checked_add(annual_rate).unwrap_or(annual_rate);
    nth_root(base, periods_per_year) - Decimal::ONE
}

/// nth root of A: seeded from exp(ln(A) / n), then polished with Newton
/// steps x_{k+1} = ((n-1)*x_k + A / x_k^(n-1)) / n until they stop moving.
/// A polish step whose power leaves the Decimal range is not taken.
pub fn nth_root(a: Decimal, n: u32) -> Decimal {
    if a <= Decimal::ZERO || n == 0 {
        return Decimal::ZERO;
    }
    if a == Decimal::ONE || n == 1 {
        return a;
    }
    let n_dec = Decimal::from(n);
    let n_minus_1 = n_dec - Decimal::ONE;

    let mut x = a
        .checked_ln()
        .and_then(|ln| (ln / n_dec).checked_exp())
        .filter(|seed| *seed > Decimal::ZERO)
        .unwrap_or(Decimal::ONE);

    for _ in 0..NEWTON_ITERATIONS {
        let Some(x_pow) = checked_powi(x, n - 1) else {
            break;
        };
        let Some(x_new) = a
            .checked_div(x_pow)
            .and_then(|q| n_minus_1.checked_mul(x).and_then(|p| p.checked_add(q)))
            .map(|sum| sum / n_dec)
        else {
            break;
        };
        if x_new <= Decimal::ZERO {
            break;
        }
        let converged = (x_new - x).abs() < NEWTON_TOLERANCE;
        x = x_new;
        if converged {
            break;
        }
    }
    x
}

fn checked_powi(x: Decimal, exp: u32) -> Option<Decimal> {
    (0..exp).try_fold(Decimal::ONE, |acc, _| acc.checked_mul(x))
}

/// Sum money amounts, failing instead of overflowing.
pub fn checked_sum<'a, I>(amounts: I, what: &str) -> Ifrs16Result<Money>
where
    I: IntoIterator<Item = &'a Money>,
{
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, amount| acc.checked_add(*amount))
        .ok_or_else(|| Ifrs16Error::ArithmeticOverflow(what.to_string()))
}

/// Present value of a per-period payment stream.
///
/// Payment i (1-indexed) is discounted by (1+r)^(i-1) when paid in advance
/// and by (1+r)^i when paid in arrears. Once the compounding factor leaves
/// the Decimal range the remaining payments contribute nothing. A total
/// that itself overflows is an error.
pub fn present_value(
    payments: &[Money],
    period_rate: Rate,
    timing: PaymentTiming,
) -> Ifrs16Result<Money> {
    let one_plus_r = Decimal::ONE.checked_add(period_rate).unwrap_or(period_rate);
    let mut compounding = Decimal::ONE;
    let mut pv = Decimal::ZERO;

    for (idx, payment) in payments.iter().enumerate() {
        if idx > 0 || timing == PaymentTiming::Arrears {
            compounding = match compounding.checked_mul(one_plus_r) {
                Some(c) => c,
                None => break,
            };
        }
        if compounding.is_zero() {
            continue;
        }
        if let Some(discounted) = payment.checked_div(compounding) {
            pv = pv.checked_add(discounted).ok_or_else(|| {
                Ifrs16Error::ArithmeticOverflow("present value of lease payments".into())
            })?;
        }
    }

    Ok(pv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_money_midpoint_away_from_zero() {
        assert_eq!(round_money(dec!(1.005)), dec!(1.01));
        assert_eq!(round_money(dec!(-1.005)), dec!(-1.01));
        assert_eq!(round_money(dec!(2.344)), dec!(2.34));
    }

    #[test]
    fn test_monthly_rate_from_12_percent() {
        let r = periodic_rate(dec!(0.12), 12);
        // (1.12)^(1/12) - 1 = 0.0094887929...
        assert!((r - dec!(0.009488793)).abs() < dec!(0.000000001));
        // Compounds back to the annual rate
        let mut acc = Decimal::ONE;
        for _ in 0..12 {
            acc *= Decimal::ONE + r;
        }
        assert!((acc - dec!(1.12)).abs() < dec!(0.0000000001));
    }

    #[test]
    fn test_annual_frequency_keeps_rate() {
        assert_eq!(periodic_rate(dec!(0.14), 1), dec!(0.14));
    }

    #[test]
    fn test_rate_at_minus_100_percent() {
        assert_eq!(periodic_rate(dec!(-1), 12), dec!(-1));
        assert_eq!(periodic_rate(dec!(-1.5), 4), dec!(-1));
    }

    #[test]
    fn test_nth_root_large_base_converges() {
        let root = nth_root(dec!(16), 4);
        assert!((root - dec!(2)).abs() < dec!(0.000000001));
    }

    #[test]
    fn test_pv_advance_first_payment_undiscounted() {
        let pv = present_value(&[dec!(100)], dec!(0.10), PaymentTiming::Advance).unwrap();
        assert_eq!(pv, dec!(100));
    }

    #[test]
    fn test_pv_arrears_discounts_every_payment() {
        let pv = present_value(&[dec!(110), dec!(121)], dec!(0.10), PaymentTiming::Arrears).unwrap();
        assert!((pv - dec!(200)).abs() < dec!(0.0000001));
    }

    #[test]
    fn test_pv_zero_rate_is_undiscounted_sum() {
        let flows = vec![dec!(50), dec!(50), dec!(50)];
        assert_eq!(
            present_value(&flows, Decimal::ZERO, PaymentTiming::Arrears).unwrap(),
            dec!(150)
        );
    }

    #[test]
    fn test_pv_degenerate_rate_keeps_only_undiscounted_flow() {
        let flows = vec![dec!(100), dec!(100), dec!(100)];
        assert_eq!(
            present_value(&flows, dec!(-1), PaymentTiming::Advance).unwrap(),
            dec!(100)
        );
        assert_eq!(
            present_value(&flows, dec!(-1), PaymentTiming::Arrears).unwrap(),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_rate_for_deep_negative_ibr() {
        let close = |ibr: Decimal, ppy: u32, want: Decimal| {
            let r = periodic_rate(ibr, ppy);
            assert!((r - want).abs() < dec!(0.000000001), "ibr {ibr}: got {r}, want {want}");
        };
        // (1 + ibr)^(1/n) - 1
        close(dec!(-0.6), 12, dec!(-0.0735151275));
        close(dec!(-0.9), 12, dec!(-0.1745958147));
        close(dec!(-0.99), 4, dec!(-0.6837722340));
    }

    #[test]
    fn test_rate_for_very_large_ibr() {
        let r = periodic_rate(dec!(1000), 12);
        assert!((r - dec!(0.7784275321)).abs() < dec!(0.000000001));
        let root = nth_root(dec!(1000000000000), 12);
        assert!((root - dec!(10)).abs() < dec!(0.000000001));
    }

    #[test]
    fn test_pv_overflow_is_an_error() {
        let flows = vec![dec!(50000000000000000000000000000); 3];
        let err = present_value(&flows, Decimal::ZERO, PaymentTiming::Advance).unwrap_err();
        assert!(matches!(err, Ifrs16Error::ArithmeticOverflow(_)));
    }

    #[test]
    fn test_checked_sum() {
        let amounts = [dec!(1.5), dec!(2.25)];
        assert_eq!(checked_sum(&amounts, "total").unwrap(), dec!(3.75));
        assert!(checked_sum(&[Decimal::MAX, Decimal::ONE], "total").is_err());
    }
}
