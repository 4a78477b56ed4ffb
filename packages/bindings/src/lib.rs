use napi::Result as NapiResult;
use napi_derive::napi;
use serde::Deserialize;

use ifrs16_core::import;
use ifrs16_core::measurement::{self, LeaseContractParameters};
use ifrs16_core::portfolio;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Measurement
// ---------------------------------------------------------------------------

/// Measure one contract. Accepts snake_case or the register's PascalCase
/// field names.
#[napi]
pub fn compute_lease(input_json: String) -> NapiResult<String> {
    let input: LeaseContractParameters =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = measurement::measure(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Portfolio
// ---------------------------------------------------------------------------

#[napi]
pub fn summarize_portfolio(input_json: String) -> NapiResult<String> {
    let input: Vec<LeaseContractParameters> =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = portfolio::summarize_portfolio(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Import
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct ImportInput {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

/// Map spreadsheet rows (`{"headers": [...], "rows": [[...], ...]}`) onto
/// contract parameters. Returns `{"rows": [...], "rejected": [...]}`.
#[napi]
pub fn map_import_rows(input_json: String) -> NapiResult<String> {
    let input: ImportInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = import::map_table(&input.headers, &input.rows);
    serde_json::to_string(&output).map_err(to_napi_error)
}
