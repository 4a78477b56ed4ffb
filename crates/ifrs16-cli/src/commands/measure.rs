use chrono::NaiveDate;
use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;

use ifrs16_core::measurement::{self, LeaseContractParameters};
use ifrs16_core::types::{PaymentFrequency, PaymentTiming};

use crate::input;

/// Schedule to print instead of the full measurement
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ScheduleKind {
    Cashflow,
    Amortization,
    Depreciation,
    Journal,
}

/// Arguments for measuring a single lease
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct MeasureArgs {
    /// Path to a JSON or YAML contract file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Print only one schedule
    #[arg(long)]
    pub schedule: Option<ScheduleKind>,

    /// Contract identifier
    #[arg(long)]
    pub contract_id: Option<String>,

    /// Fixed payment per period
    #[arg(long, alias = "payment")]
    pub fixed_payment: Option<Decimal>,

    /// Payment frequency (monthly, quarterly, semiannual, annual)
    #[arg(long)]
    pub frequency: Option<String>,

    /// Payment timing (advance or arrears)
    #[arg(long)]
    pub timing: Option<String>,

    /// Non-cancellable period in years
    #[arg(long)]
    pub non_cancellable: Option<Decimal>,

    /// Commencement date (YYYY-MM-DD)
    #[arg(long)]
    pub commencement: Option<NaiveDate>,

    /// Annual incremental borrowing rate (e.g. 0.14 for 14%)
    #[arg(long)]
    pub ibr: Option<Decimal>,

    /// Renewal option length in years
    #[arg(long)]
    pub renewal_years: Option<Decimal>,

    /// Likelihood of exercising the renewal option (0-1)
    #[arg(long)]
    pub renewal_likelihood: Option<Decimal>,

    /// Termination option point, e.g. "4" or "4 years"
    #[arg(long)]
    pub termination_point: Option<String>,

    /// Likelihood of exercising the termination option (0-1)
    #[arg(long)]
    pub termination_likelihood: Option<Decimal>,

    /// Residual value guarantee expected to be paid
    #[arg(long)]
    pub rvg: Option<Decimal>,

    /// Treat the residual value guarantee as reasonably certain
    #[arg(long)]
    pub rvg_certain: bool,

    /// Initial direct costs
    #[arg(long)]
    pub initial_direct_costs: Option<Decimal>,

    /// Payments made before commencement
    #[arg(long)]
    pub prepayments: Option<Decimal>,

    /// Lease incentives received
    #[arg(long)]
    pub incentives: Option<Decimal>,

    /// Currency code
    #[arg(long)]
    pub currency: Option<String>,
}

impl MeasureArgs {
    fn to_params(&self) -> LeaseContractParameters {
        LeaseContractParameters {
            contract_id: self.contract_id.clone(),
            fixed_payment_per_period: self.fixed_payment,
            payment_frequency: self.frequency.as_deref().map(PaymentFrequency::parse_lenient),
            payment_timing: self.timing.as_deref().map(PaymentTiming::parse_lenient),
            non_cancellable_years: self.non_cancellable,
            commencement_date: self.commencement,
            renewal_option_years: self.renewal_years,
            renewal_option_likelihood: self.renewal_likelihood,
            termination_option_point: self.termination_point.clone(),
            termination_option_likelihood: self.termination_likelihood,
            rvg_expected: self.rvg,
            rvg_reasonably_certain: self.rvg_certain.then_some(true),
            ibr_annual: self.ibr,
            initial_direct_costs: self.initial_direct_costs,
            prepayments_before_commencement: self.prepayments,
            lease_incentives: self.incentives,
            currency: self.currency.clone(),
        }
    }
}

pub fn run_measure(args: MeasureArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params: LeaseContractParameters = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        if args.fixed_payment.is_none() && args.non_cancellable.is_none() {
            return Err(
                "--fixed-payment and --non-cancellable are required (or provide --input)".into(),
            );
        }
        args.to_params()
    };

    let output = measurement::measure(&params)?;
    let result = &output.result;
    let value = match args.schedule {
        Some(ScheduleKind::Cashflow) => serde_json::to_value(&result.cashflow_schedule)?,
        Some(ScheduleKind::Amortization) => serde_json::to_value(&result.amortization_schedule)?,
        Some(ScheduleKind::Depreciation) => serde_json::to_value(&result.depreciation_schedule)?,
        Some(ScheduleKind::Journal) => serde_json::to_value(&result.journal_entries)?,
        None => serde_json::to_value(&output)?,
    };
    Ok(value)
}
