use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::types::Money;
use crate::Ifrs16Result;

use super::result::{AmortizationRow, JournalEntry};
use super::schedules::add_months;

const ROU_ASSET: &str = "Right-of-use asset";
const LEASE_LIABILITY: &str = "Lease liability";
const INTEREST_EXPENSE: &str = "Interest expense (lease)";
const CASH: &str = "Cash";
const DEPRECIATION_EXPENSE: &str = "Depreciation expense";
const ACCUMULATED_DEPRECIATION: &str = "Accumulated depreciation - ROU asset";

/// Illustrative postings: initial recognition at commencement, plus the
/// first period's interest, repayment and depreciation dated one calendar
/// month later. Later periods are not expanded.
pub fn journal_entries(
    commencement: NaiveDate,
    currency: &str,
    initial_liability: Money,
    initial_rou: Money,
    first_period: Option<&AmortizationRow>,
) -> Ifrs16Result<Vec<JournalEntry>> {
    let entry = |date: NaiveDate, account: &str, debit: Money, credit: Money, memo: &str| {
        JournalEntry {
            date,
            account: account.to_string(),
            debit,
            credit,
            memo: memo.to_string(),
            currency: currency.to_string(),
        }
    };

    let mut entries = Vec::with_capacity(7);
    entries.push(entry(
        commencement,
        ROU_ASSET,
        initial_rou,
        Decimal::ZERO,
        "Initial recognition of ROU asset",
    ));
    entries.push(entry(
        commencement,
        LEASE_LIABILITY,
        Decimal::ZERO,
        initial_liability,
        "Initial recognition of lease liability",
    ));

    if let Some(row) = first_period {
        let posted = add_months(commencement, 1)?;
        entries.push(entry(
            posted,
            INTEREST_EXPENSE,
            row.interest,
            Decimal::ZERO,
            "Monthly interest expense",
        ));
        entries.push(entry(
            posted,
            LEASE_LIABILITY,
            row.principal,
            Decimal::ZERO,
            "Principal reduction",
        ));
        entries.push(entry(
            posted,
            CASH,
            Decimal::ZERO,
            row.payment,
            "Lease payment",
        ));
        entries.push(entry(
            posted,
            DEPRECIATION_EXPENSE,
            row.depreciation,
            Decimal::ZERO,
            "Monthly depreciation",
        ));
        entries.push(entry(
            posted,
            ACCUMULATED_DEPRECIATION,
            Decimal::ZERO,
            row.depreciation,
            "Accumulated depreciation",
        ));
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn first_row() -> AmortizationRow {
        AmortizationRow {
            period: 1,
            payment: dec!(1000),
            interest: dec!(90),
            principal: dec!(910),
            remaining_liability: dec!(8090),
            depreciation: dec!(750),
            remaining_asset: dec!(8250),
        }
    }

    #[test]
    fn test_initial_recognition_only_without_periods() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let entries = journal_entries(start, "NGN", Decimal::ZERO, dec!(500), None).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].account, "Right-of-use asset");
        assert_eq!(entries[0].debit, dec!(500));
        assert_eq!(entries[1].account, "Lease liability");
        assert_eq!(entries[1].credit, Decimal::ZERO);
    }

    #[test]
    fn test_first_period_postings() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        let row = first_row();
        let entries = journal_entries(start, "USD", dec!(9000), dec!(9000), Some(&row)).unwrap();

        assert_eq!(entries.len(), 7);
        let posted = NaiveDate::from_ymd_opt(2025, 2, 28).unwrap();
        assert!(entries[2..].iter().all(|e| e.date == posted));
        assert!(entries.iter().all(|e| e.currency == "USD"));

        assert_eq!(entries[2].account, "Interest expense (lease)");
        assert_eq!(entries[2].debit, dec!(90));
        assert_eq!(entries[3].debit, dec!(910));
        assert_eq!(entries[4].account, "Cash");
        assert_eq!(entries[4].credit, dec!(1000));
        assert_eq!(entries[5].debit, dec!(750));
        assert_eq!(entries[6].account, "Accumulated depreciation - ROU asset");
        assert_eq!(entries[6].credit, dec!(750));
    }

    #[test]
    fn test_first_period_balances() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let row = first_row();
        let entries = journal_entries(start, "NGN", dec!(9000), dec!(9000), Some(&row)).unwrap();

        let debits: Money = entries[2..].iter().map(|e| e.debit).sum();
        let credits: Money = entries[2..].iter().map(|e| e.credit).sum();
        assert_eq!(debits, credits);
    }
}
