use chrono::NaiveDate;
use ifrs16_core::import::map_table;
use ifrs16_core::measurement::compute;
use ifrs16_core::portfolio::summarize_portfolio;
use ifrs16_core::types::{PaymentFrequency, PaymentTiming};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

fn register() -> (Vec<&'static str>, Vec<Vec<&'static str>>) {
    let headers = vec![
        "Contract ID",
        "Commencement Date",
        "Non-cancellable Period",
        "Fixed Payment",
        "Payment Frequency",
        "Payment Timing",
        "IBR",
        "Renewal Option Years",
        "Renewal Likelihood",
        "Currency",
        "Asset Description",
    ];
    let rows = vec![
        vec![
            "HQ-01", "2025-01-01", "5", "250,000", "Quarterly", "End of period", "14%", "", "",
            "ngn", "Head office",
        ],
        vec!["", "", "", "", "", "", "", "", "", "", ""],
        vec![
            "DEPOT-02", "45658", "3", "80000", "monthly", "advance", "0.16", "2", "75", "", "Depot",
        ],
    ];
    (headers, rows)
}

#[test]
fn test_register_rows_map_to_contracts() {
    let (headers, rows) = register();
    let imported = map_table(&headers, &rows).rows;

    assert_eq!(imported.len(), 2);
    assert_eq!(imported[0].row, 1);
    assert_eq!(imported[1].row, 3);

    let hq = &imported[0].params;
    assert_eq!(hq.contract_id(), "HQ-01");
    assert_eq!(hq.frequency(), PaymentFrequency::Quarterly);
    assert_eq!(hq.timing(), PaymentTiming::Arrears);
    assert_eq!(hq.ibr(), dec!(0.14));
    assert_eq!(hq.currency(), "NGN");
    assert_eq!(imported[0].unmapped_headers, vec!["Asset Description".to_string()]);

    let depot = &imported[1].params;
    // Excel serial 45658 is 2025-01-01
    assert_eq!(depot.commencement_date, NaiveDate::from_ymd_opt(2025, 1, 1));
    assert_eq!(depot.renewal_likelihood(), dec!(0.75));
    assert_eq!(depot.ibr(), dec!(0.16));
}

#[test]
fn test_imported_rows_measure_like_typed_input() {
    let (headers, rows) = register();
    let imported = map_table(&headers, &rows).rows;

    let hq = compute(&imported[0].params).unwrap();
    assert_eq!(hq.periods, 20);
    assert_eq!(hq.initial_liability, dec!(3608399.19));

    let depot = compute(&imported[1].params).unwrap();
    // Renewal at 75% extends 3 years to 5
    assert_eq!(depot.lease_term_years, dec!(5));
    assert_eq!(depot.periods, 60);
}

#[test]
fn test_imported_register_rolls_up() {
    let (headers, rows) = register();
    let contracts = map_table(&headers, &rows).into_contracts();
    let out = summarize_portfolio(&contracts).unwrap();

    assert_eq!(out.result.valid_contracts, 2);
    assert!(out.result.excluded.is_empty());
    assert_eq!(out.result.average_lease_term_years, dec!(5));
}

#[test]
fn test_misaligned_row_does_not_block_the_register() {
    let (headers, mut rows) = register();
    rows.insert(1, vec!["SHIFTED"; headers.len() + 2]);
    let table = map_table(&headers, &rows);

    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.rejected.len(), 1);
    assert_eq!(table.rejected[0].row, 2);
    assert_eq!(table.warnings(), vec![format!(
        "Row 2 rejected: has {} cells but the header has {} columns",
        headers.len() + 2,
        headers.len()
    )]);

    let out = summarize_portfolio(&table.into_contracts()).unwrap();
    assert_eq!(out.result.valid_contracts, 2);
}
