use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::parsing::parse_leading_number;
use crate::types::Years;

use super::params::LeaseContractParameters;

/// Termination counts only when strictly more likely than not.
const TERMINATION_LIKELIHOOD_THRESHOLD: Decimal = dec!(0.5);
/// Renewal counts from exactly 50% upward.
const RENEWAL_LIKELIHOOD_THRESHOLD: Decimal = dec!(0.5);

/// Which contractual rule fixed the lease term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeaseTermBasis {
    Termination,
    Renewal,
    NonCancellable,
}

/// Lease term and the component years it was derived from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaseTerm {
    pub lease_term_years: Years,
    pub non_cancellable_years: Years,
    pub renewal_years: Years,
    /// Parsed termination option point (0 when there is none)
    pub termination_years: Years,
    pub basis: LeaseTermBasis,
}

/// Determine the lease term. First matching rule wins:
///
/// 1. a termination point > 0 with likelihood > 50% replaces the term;
/// 2. a renewal option > 0 with likelihood >= 50% extends the
///    non-cancellable period;
/// 3. otherwise the non-cancellable period stands.
pub fn determine_lease_term(params: &LeaseContractParameters) -> LeaseTerm {
    let non_cancellable_years = params.non_cancellable();
    let renewal_years = params.renewal_years();
    let termination_years = params
        .termination_option_point
        .as_deref()
        .map(parse_leading_number)
        .unwrap_or(Decimal::ZERO);

    let (lease_term_years, basis) = if termination_years > Decimal::ZERO
        && params.termination_likelihood() > TERMINATION_LIKELIHOOD_THRESHOLD
    {
        (termination_years, LeaseTermBasis::Termination)
    } else if renewal_years > Decimal::ZERO
        && params.renewal_likelihood() >= RENEWAL_LIKELIHOOD_THRESHOLD
    {
        // Saturates; such a term is too long to schedule anyway
        let extended = non_cancellable_years
            .checked_add(renewal_years)
            .unwrap_or(Decimal::MAX);
        (extended, LeaseTermBasis::Renewal)
    } else {
        (non_cancellable_years, LeaseTermBasis::NonCancellable)
    };

    LeaseTerm {
        lease_term_years,
        non_cancellable_years,
        renewal_years,
        termination_years,
        basis,
    }
}
