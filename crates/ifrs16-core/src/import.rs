//! Mapping of spreadsheet rows onto lease contract parameters.
//!
//! Column headers are matched against the synonyms used by lease registers
//! ("Contract ID", "IBR", "Non-cancellable Period", ...). Headers are
//! compared ignoring case, spaces, underscores and hyphens. Columns the
//! measurement does not use are reported back, not rejected.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::measurement::LeaseContractParameters;
use crate::parsing::{normalize_fraction, parse_amount, parse_bool_lenient, parse_date_lenient};
use crate::types::{PaymentFrequency, PaymentTiming};

/// Contract fields that an imported column can populate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    ContractId,
    CommencementDate,
    NonCancellableYears,
    RenewalOptionYears,
    RenewalOptionLikelihood,
    TerminationOptionPoint,
    TerminationOptionLikelihood,
    FixedPaymentPerPeriod,
    Currency,
    PaymentFrequency,
    PaymentTiming,
    RvgExpected,
    RvgReasonablyCertain,
    InitialDirectCosts,
    PrepaymentsBeforeCommencement,
    LeaseIncentives,
    IbrAnnual,
}

/// One imported row, ready for measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportedRow {
    /// Data row number (1-indexed, header excluded)
    pub row: usize,
    pub params: LeaseContractParameters,
    /// Headers that did not map to a measured field
    pub unmapped_headers: Vec<String>,
    /// Cells that could not be interpreted and were left unset
    pub warnings: Vec<String>,
}

/// A data row that could not be mapped at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RejectedRow {
    /// Data row number (1-indexed, header excluded)
    pub row: usize,
    pub reason: String,
}

/// Result of mapping a whole table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportedTable {
    pub rows: Vec<ImportedRow>,
    pub rejected: Vec<RejectedRow>,
}

impl ImportedTable {
    /// Cell warnings and rejected rows, labelled with their row numbers,
    /// in row order.
    pub fn warnings(&self) -> Vec<String> {
        let mut labelled: Vec<(usize, String)> = self
            .rows
            .iter()
            .flat_map(|r| r.warnings.iter().map(move |w| (r.row, format!("Row {}: {w}", r.row))))
            .chain(
                self.rejected
                    .iter()
                    .map(|r| (r.row, format!("Row {} rejected: {}", r.row, r.reason))),
            )
            .collect();
        labelled.sort_by_key(|(row, _)| *row);
        labelled.into_iter().map(|(_, w)| w).collect()
    }

    pub fn into_contracts(self) -> Vec<LeaseContractParameters> {
        self.rows.into_iter().map(|r| r.params).collect()
    }
}

/// Resolve a column header to the contract field it populates.
pub fn canonical_field(header: &str) -> Option<Field> {
    let key: String = header
        .trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .collect::<String>()
        .to_ascii_lowercase();

    let field = match key.as_str() {
        "contractid" => Field::ContractId,
        "commencementdate" => Field::CommencementDate,
        "noncancellableyears" | "noncancellableperiod" => Field::NonCancellableYears,
        "renewaloptionyears" => Field::RenewalOptionYears,
        "renewallikelihood" | "renewaloptionlikelihood" => Field::RenewalOptionLikelihood,
        "terminationoptionpoint" => Field::TerminationOptionPoint,
        "terminationlikelihood" | "terminationoptionlikelihood" => {
            Field::TerminationOptionLikelihood
        }
        "fixedpayment" | "fixedpaymentperperiod" => Field::FixedPaymentPerPeriod,
        "currency" => Field::Currency,
        "paymentfrequency" => Field::PaymentFrequency,
        "paymenttiming" => Field::PaymentTiming,
        "rvgexpected" => Field::RvgExpected,
        "rvgreasonablycertain" => Field::RvgReasonablyCertain,
        "initialdirectcosts" => Field::InitialDirectCosts,
        "prepaymentsbeforecommencement" => Field::PrepaymentsBeforeCommencement,
        "leaseincentives" => Field::LeaseIncentives,
        "ibr" | "ibrannual" => Field::IbrAnnual,
        _ => return None,
    };
    Some(field)
}

/// Map one row of (header, cell) pairs. Empty cells are skipped.
pub fn map_row<'a, I>(row: usize, cells: I) -> ImportedRow
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut params = LeaseContractParameters::default();
    let mut unmapped_headers = Vec::new();
    let mut warnings = Vec::new();

    for (header, raw) in cells {
        let Some(field) = canonical_field(header) else {
            if !header.trim().is_empty() {
                unmapped_headers.push(header.trim().to_string());
            }
            continue;
        };
        let value = raw.trim();
        if value.is_empty() {
            continue;
        }
        if !apply_cell(&mut params, field, value) {
            warnings.push(format!(
                "'{}' value '{}' is not understood; left unset",
                header.trim(),
                value
            ));
        }
    }

    if params.currency.is_none() {
        params.currency = Some(crate::types::DEFAULT_CURRENCY.to_string());
    }

    debug!(
        row,
        contract_id = params.contract_id(),
        unmapped = unmapped_headers.len(),
        warnings = warnings.len(),
        "row mapped"
    );

    ImportedRow {
        row,
        params,
        unmapped_headers,
        warnings,
    }
}

/// Map a header row plus data rows. Rows whose cells are all empty are
/// skipped; a row with more cells than there are headers is rejected and
/// the rest of the table is still mapped.
pub fn map_table<S: AsRef<str>>(headers: &[S], rows: &[Vec<S>]) -> ImportedTable {
    let mut table = ImportedTable::default();
    for (idx, cells) in rows.iter().enumerate() {
        let row = idx + 1;
        if cells.len() > headers.len() {
            let reason = format!(
                "has {} cells but the header has {} columns",
                cells.len(),
                headers.len()
            );
            warn!(row, %reason, "row rejected");
            table.rejected.push(RejectedRow { row, reason });
            continue;
        }
        if cells.iter().all(|c| c.as_ref().trim().is_empty()) {
            continue;
        }
        let pairs = headers
            .iter()
            .map(AsRef::as_ref)
            .zip(cells.iter().map(AsRef::as_ref));
        table.rows.push(map_row(row, pairs));
    }
    table
}

/// Returns false when the cell could not be interpreted.
fn apply_cell(params: &mut LeaseContractParameters, field: Field, value: &str) -> bool {
    match field {
        Field::ContractId => params.contract_id = Some(value.to_string()),
        Field::Currency => params.currency = Some(value.to_ascii_uppercase()),
        Field::TerminationOptionPoint => {
            params.termination_option_point = Some(value.to_string())
        }
        Field::PaymentFrequency => {
            params.payment_frequency = Some(PaymentFrequency::parse_lenient(value))
        }
        Field::PaymentTiming => params.payment_timing = Some(PaymentTiming::parse_lenient(value)),
        Field::RvgReasonablyCertain => {
            params.rvg_reasonably_certain = Some(parse_bool_lenient(value))
        }
        Field::CommencementDate => match parse_date_lenient(value) {
            Some(date) => params.commencement_date = Some(date),
            None => return false,
        },
        numeric => {
            let Some(amount) = parse_amount(value) else {
                return false;
            };
            let slot = match numeric {
                Field::NonCancellableYears => &mut params.non_cancellable_years,
                Field::RenewalOptionYears => &mut params.renewal_option_years,
                Field::RenewalOptionLikelihood => &mut params.renewal_option_likelihood,
                Field::TerminationOptionLikelihood => &mut params.termination_option_likelihood,
                Field::FixedPaymentPerPeriod => &mut params.fixed_payment_per_period,
                Field::RvgExpected => &mut params.rvg_expected,
                Field::InitialDirectCosts => &mut params.initial_direct_costs,
                Field::PrepaymentsBeforeCommencement => {
                    &mut params.prepayments_before_commencement
                }
                Field::LeaseIncentives => &mut params.lease_incentives,
                Field::IbrAnnual => &mut params.ibr_annual,
                _ => return false,
            };
            let is_fraction = matches!(
                numeric,
                Field::IbrAnnual
                    | Field::RenewalOptionLikelihood
                    | Field::TerminationOptionLikelihood
            );
            *slot = Some(if is_fraction {
                normalize_fraction(amount)
            } else {
                amount
            });
        }
    }
    true
}
