use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%). Never as percentages.
pub type Rate = Decimal;

/// Year fractions or counts
pub type Years = Decimal;

/// Probability in [0, 1]
pub type Likelihood = Decimal;

/// Incremental borrowing rate applied when a contract does not state one.
pub const DEFAULT_IBR: Rate = dec!(0.14);

/// Reporting currency applied when a contract does not state one.
pub const DEFAULT_CURRENCY: &str = "NGN";

/// Commencement date applied when a contract does not state one (2025-01-01).
pub fn default_commencement() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// How often the fixed lease payment falls due.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum PaymentFrequency {
    #[default]
    Monthly,
    Quarterly,
    Semiannual,
    Annual,
}

impl PaymentFrequency {
    pub fn periods_per_year(self) -> u32 {
        match self {
            PaymentFrequency::Monthly => 12,
            PaymentFrequency::Quarterly => 4,
            PaymentFrequency::Semiannual => 2,
            PaymentFrequency::Annual => 1,
        }
    }

    pub fn months_per_period(self) -> u32 {
        12 / self.periods_per_year()
    }

    /// Normalize free text from forms and spreadsheets. Anything
    /// unrecognized falls back to monthly.
    pub fn parse_lenient(text: &str) -> Self {
        let key: String = text
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        match key.as_str() {
            "quarterly" | "quarter" | "q" | "4" => PaymentFrequency::Quarterly,
            "semiannual" | "semiannually" | "halfyearly" | "biannual" | "2" => {
                PaymentFrequency::Semiannual
            }
            "annual" | "annually" | "yearly" | "year" | "1" => PaymentFrequency::Annual,
            _ => PaymentFrequency::Monthly,
        }
    }
}

/// Whether each payment is made at the start or the end of its period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum PaymentTiming {
    #[default]
    Advance,
    Arrears,
}

impl PaymentTiming {
    /// Normalize free text. Anything unrecognized falls back to advance.
    pub fn parse_lenient(text: &str) -> Self {
        let key = text.trim().to_ascii_lowercase();
        if key.contains("arrear") || key == "end" || key.contains("end of") {
            PaymentTiming::Arrears
        } else {
            PaymentTiming::Advance
        }
    }
}

impl From<String> for PaymentFrequency {
    fn from(text: String) -> Self {
        PaymentFrequency::parse_lenient(&text)
    }
}

impl From<String> for PaymentTiming {
    fn from(text: String) -> Self {
        PaymentTiming::parse_lenient(&text)
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
