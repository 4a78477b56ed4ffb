use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{
    default_commencement, Likelihood, Money, PaymentFrequency, PaymentTiming, Rate, Years,
    DEFAULT_CURRENCY, DEFAULT_IBR,
};

/// Commercial terms of one lease contract, as captured by a form or an
/// import. Every field is optional; accessors resolve the defaults.
///
/// Field names follow snake_case; the column names used by the contract
/// capture forms (`FixedPaymentPerPeriod`, `IBR_Annual`, ...) are accepted
/// as aliases.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeaseContractParameters {
    #[serde(alias = "ContractID", skip_serializing_if = "Option::is_none")]
    pub contract_id: Option<String>,

    /// Fixed payment due each period
    #[serde(alias = "FixedPaymentPerPeriod", skip_serializing_if = "Option::is_none")]
    pub fixed_payment_per_period: Option<Money>,
    #[serde(alias = "PaymentFrequency", skip_serializing_if = "Option::is_none")]
    pub payment_frequency: Option<PaymentFrequency>,
    #[serde(alias = "PaymentTiming", skip_serializing_if = "Option::is_none")]
    pub payment_timing: Option<PaymentTiming>,

    #[serde(alias = "NonCancellableYears", skip_serializing_if = "Option::is_none")]
    pub non_cancellable_years: Option<Years>,
    #[serde(alias = "CommencementDate", skip_serializing_if = "Option::is_none")]
    pub commencement_date: Option<NaiveDate>,

    #[serde(alias = "RenewalOptionYears", skip_serializing_if = "Option::is_none")]
    pub renewal_option_years: Option<Years>,
    #[serde(alias = "RenewalOptionLikelihood", skip_serializing_if = "Option::is_none")]
    pub renewal_option_likelihood: Option<Likelihood>,

    /// Free text; only its leading number is used ("4 years" → 4)
    #[serde(alias = "TerminationOptionPoint", skip_serializing_if = "Option::is_none")]
    pub termination_option_point: Option<String>,
    #[serde(alias = "TerminationOptionLikelihood", skip_serializing_if = "Option::is_none")]
    pub termination_option_likelihood: Option<Likelihood>,

    /// Residual value guarantee expected to be paid at the end of the term
    #[serde(alias = "RVGExpected", skip_serializing_if = "Option::is_none")]
    pub rvg_expected: Option<Money>,
    #[serde(alias = "RVGReasonablyCertain", skip_serializing_if = "Option::is_none")]
    pub rvg_reasonably_certain: Option<bool>,

    /// Annual incremental borrowing rate (0.14 = 14%)
    #[serde(alias = "IBR_Annual", skip_serializing_if = "Option::is_none")]
    pub ibr_annual: Option<Rate>,

    #[serde(alias = "InitialDirectCosts", skip_serializing_if = "Option::is_none")]
    pub initial_direct_costs: Option<Money>,
    #[serde(alias = "PrepaymentsBeforeCommencement", skip_serializing_if = "Option::is_none")]
    pub prepayments_before_commencement: Option<Money>,
    #[serde(alias = "LeaseIncentives", skip_serializing_if = "Option::is_none")]
    pub lease_incentives: Option<Money>,

    #[serde(alias = "Currency", skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

impl LeaseContractParameters {
    pub fn contract_id(&self) -> &str {
        self.contract_id.as_deref().unwrap_or("")
    }

    pub fn fixed_payment(&self) -> Money {
        self.fixed_payment_per_period.unwrap_or(Decimal::ZERO)
    }

    pub fn frequency(&self) -> PaymentFrequency {
        self.payment_frequency.unwrap_or_default()
    }

    pub fn timing(&self) -> PaymentTiming {
        self.payment_timing.unwrap_or_default()
    }

    pub fn non_cancellable(&self) -> Years {
        self.non_cancellable_years.unwrap_or(Decimal::ZERO)
    }

    pub fn commencement(&self) -> NaiveDate {
        self.commencement_date.unwrap_or_else(default_commencement)
    }

    pub fn renewal_years(&self) -> Years {
        self.renewal_option_years.unwrap_or(Decimal::ZERO)
    }

    pub fn renewal_likelihood(&self) -> Likelihood {
        self.renewal_option_likelihood.unwrap_or(Decimal::ZERO)
    }

    pub fn termination_likelihood(&self) -> Likelihood {
        self.termination_option_likelihood.unwrap_or(Decimal::ZERO)
    }

    /// RVG included in the final payment: the expected amount when the
    /// guarantee is reasonably certain to be paid, otherwise zero.
    pub fn rvg_amount(&self) -> Money {
        if self.rvg_reasonably_certain.unwrap_or(false) {
            self.rvg_expected.unwrap_or(Decimal::ZERO)
        } else {
            Decimal::ZERO
        }
    }

    pub fn ibr(&self) -> Rate {
        self.ibr_annual.unwrap_or(DEFAULT_IBR)
    }

    pub fn initial_direct_costs(&self) -> Money {
        self.initial_direct_costs.unwrap_or(Decimal::ZERO)
    }

    pub fn prepayments(&self) -> Money {
        self.prepayments_before_commencement.unwrap_or(Decimal::ZERO)
    }

    pub fn incentives(&self) -> Money {
        self.lease_incentives.unwrap_or(Decimal::ZERO)
    }

    pub fn currency(&self) -> &str {
        match self.currency.as_deref() {
            Some(c) if !c.trim().is_empty() => c,
            _ => DEFAULT_CURRENCY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_defaults_for_empty_contract() {
        let p = LeaseContractParameters::default();
        assert_eq!(p.fixed_payment(), Decimal::ZERO);
        assert_eq!(p.frequency(), PaymentFrequency::Monthly);
        assert_eq!(p.timing(), PaymentTiming::Advance);
        assert_eq!(p.ibr(), dec!(0.14));
        assert_eq!(p.currency(), "NGN");
        assert_eq!(p.commencement(), NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(p.rvg_amount(), Decimal::ZERO);
    }

    #[test]
    fn test_explicit_zero_ibr_is_kept() {
        let p = LeaseContractParameters {
            ibr_annual: Some(Decimal::ZERO),
            ..Default::default()
        };
        assert_eq!(p.ibr(), Decimal::ZERO);
    }

    #[test]
    fn test_rvg_requires_reasonable_certainty() {
        let mut p = LeaseContractParameters {
            rvg_expected: Some(dec!(50000)),
            rvg_reasonably_certain: Some(false),
            ..Default::default()
        };
        assert_eq!(p.rvg_amount(), Decimal::ZERO);
        p.rvg_reasonably_certain = Some(true);
        assert_eq!(p.rvg_amount(), dec!(50000));
    }

    #[test]
    fn test_deserialize_form_field_names() {
        let json = r#"{
            "ContractID": "LC-001",
            "FixedPaymentPerPeriod": "100000",
            "PaymentFrequency": "Quarterly",
            "PaymentTiming": "Arrears",
            "NonCancellableYears": "3",
            "CommencementDate": "2025-03-01",
            "TerminationOptionPoint": "2 years",
            "IBR_Annual": "0.12",
            "RVGReasonablyCertain": true
        }"#;
        let p: LeaseContractParameters = serde_json::from_str(json).unwrap();
        assert_eq!(p.contract_id(), "LC-001");
        assert_eq!(p.fixed_payment(), dec!(100000));
        assert_eq!(p.frequency(), PaymentFrequency::Quarterly);
        assert_eq!(p.timing(), PaymentTiming::Arrears);
        assert_eq!(p.non_cancellable(), dec!(3));
        assert_eq!(p.ibr(), dec!(0.12));
        assert_eq!(p.termination_option_point.as_deref(), Some("2 years"));
        assert_eq!(p.rvg_reasonably_certain, Some(true));
    }
}
